//! SoftLayer driver implementation

use crate::catalog::{self, BillingMode, OrderTemplate};
use crate::config::SoftLayerConfig;
use crate::error::{Result, SoftLayerError};
use crate::model::{
    ACCOUNT_SERVICE, BILLING_ITEM_SERVICE, DATACENTER_SERVICE, PRODUCT_ORDER_SERVICE,
    RebootMode, ResourceKind, SoftLayerExtra, SoftLayerNode,
};
use crate::normalize;
use crate::request::{Credentials, InitParams, RequestBuilder};
use crate::transport::{Transport, XmlRpcTransport};
use async_trait::async_trait;
use nimbus_cloud::{CreateNodeRequest, NodeDriver, NodeLocation, NodeSize, Outcome, Refusal};
use serde_json::{Value, json};

/// Object mask for the account fetch in `list_nodes`
fn account_mask() -> Value {
    json!({
        "hardware": {
            "softwareComponents.passwords": {},
            "primaryNetworkComponent": {},
            "primaryBackendNetworkComponent": {},
            "serverRoom": {},
            "hourlyBillingFlag": {},
            "bareMetalInstanceFlag": {},
        },
        "virtualGuests": {
            "softwareComponents.passwords": {},
            "primaryNetworkComponent": {},
            "primaryBackendNetworkComponent": {},
            "serverRoom": {},
            "hourlyBillingFlag": {},
        },
    })
}

/// SoftLayer compute driver
///
/// Ordering through this driver costs real money. Use
/// [`SoftLayerNodeDriver::verify_order`] to check an order first.
pub struct SoftLayerNodeDriver<T = XmlRpcTransport> {
    transport: T,
    requests: RequestBuilder,
}

impl SoftLayerNodeDriver<XmlRpcTransport> {
    pub fn new(config: &SoftLayerConfig) -> Result<Self> {
        let transport = XmlRpcTransport::new(config)?;
        let credentials = Credentials::new(&config.username, &config.api_key);
        Ok(Self::with_transport(credentials, transport))
    }

    pub fn from_env() -> Result<Self> {
        Self::new(&SoftLayerConfig::from_env()?)
    }
}

impl<T: Transport> SoftLayerNodeDriver<T> {
    pub fn with_transport(credentials: Credentials, transport: T) -> Self {
        Self {
            transport,
            requests: RequestBuilder::new(credentials),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Issue one remote call with the envelope prepended to `args`
    async fn request(
        &self,
        service: &str,
        method: &str,
        params: &InitParams,
        args: Vec<Value>,
    ) -> Result<Value> {
        let mut call_params = Vec::with_capacity(args.len() + 1);
        call_params.push(self.requests.build(service, params));
        call_params.extend(args);

        tracing::debug!("Calling {}::{}", service, method);
        self.transport.call(service, method, call_params).await
    }

    /// Resolve a create request into a private copy of the named template
    fn build_order(request: &CreateNodeRequest) -> Outcome<OrderTemplate> {
        let Some(name) = request.template.as_deref() else {
            tracing::warn!("create_node called without a template");
            return Refusal::MissingTemplate.into();
        };

        let Some(template) = catalog::order_template(name) else {
            tracing::warn!("Unknown order template: {}", name);
            return Refusal::UnknownTemplate(name.to_string()).into();
        };

        match &request.guests {
            Some(guests) => Outcome::Completed(template.with_guests(guests.clone())),
            None => Outcome::Completed(template.clone()),
        }
    }

    async fn submit_order(
        &self,
        request: &CreateNodeRequest,
        method: &str,
    ) -> Result<Outcome<Value>> {
        let order = match Self::build_order(request) {
            Outcome::Completed(order) => order,
            Outcome::Refused(reason) => return Ok(Outcome::Refused(reason)),
        };

        let order = serde_json::to_value(&order)?;
        let reply = self
            .request(PRODUCT_ORDER_SERVICE, method, &InitParams::none(), vec![order])
            .await?;
        Ok(Outcome::Completed(reply))
    }

    /// Validate an order without placing it; returns the remote receipt
    pub async fn verify_order(&self, request: &CreateNodeRequest) -> Result<Outcome<Value>> {
        self.submit_order(request, "verifyOrder").await
    }

    /// Export the order container that would recreate an existing guest
    pub async fn order_template(
        &self,
        node: &SoftLayerNode,
        mode: BillingMode,
    ) -> Result<Outcome<Value>> {
        match node.extra.kind {
            Some(ResourceKind::VirtualGuest) => {}
            Some(ResourceKind::Hardware) => {
                return Ok(Refusal::NotEligible(
                    "order templates are only exported for virtual guests".to_string(),
                )
                .into());
            }
            None => return Ok(Refusal::UnknownResourceKind.into()),
        }

        let reply = self
            .request(
                ResourceKind::VirtualGuest.service(),
                "getOrderTemplate",
                &InitParams::id(remote_id(node)),
                vec![json!(mode.as_str())],
            )
            .await?;
        Ok(Outcome::Completed(reply))
    }

    /// Cancel one billing item; `true` only if the remote side confirmed
    async fn cancel_billing_item(&self, billing_id: Value) -> Result<bool> {
        tracing::info!("Cancelling billing item {}", billing_id);
        let reply = self
            .request(
                BILLING_ITEM_SERVICE,
                "cancelService",
                &InitParams::id(billing_id),
                Vec::new(),
            )
            .await?;
        Ok(reply == Value::Bool(true))
    }

    async fn destroy_virtual_guest(&self, node: &SoftLayerNode) -> Result<Outcome<()>> {
        let billing_item = self
            .request(
                ResourceKind::VirtualGuest.service(),
                "getBillingItem",
                &InitParams::id(remote_id(node)),
                Vec::new(),
            )
            .await?;

        let Some(billing_id) = billing_id(&billing_item) else {
            tracing::warn!("Virtual guest {} has no billing item", node.id);
            return Ok(Refusal::NoBillingItem.into());
        };

        if self.cancel_billing_item(billing_id).await? {
            Ok(Outcome::Completed(()))
        } else {
            Ok(Refusal::NotConfirmed.into())
        }
    }

    /// Only hourly bare-metal instances can be cancelled through the API
    async fn destroy_hardware(&self, node: &SoftLayerNode) -> Result<Outcome<()>> {
        if !node.extra.flag("bareMetalInstanceFlag") {
            tracing::warn!("Hardware {} is not a bare-metal instance", node.id);
            return Ok(Refusal::NotEligible("not a bare-metal instance".to_string()).into());
        }
        if !node.extra.flag("hourlyBillingFlag") {
            tracing::warn!("Hardware {} is not billed hourly", node.id);
            return Ok(Refusal::NotEligible("not billed hourly".to_string()).into());
        }

        let detail = self
            .request(
                ResourceKind::Hardware.service(),
                "getCurrentBillingDetail",
                &InitParams::id(remote_id(node)),
                Vec::new(),
            )
            .await?;

        let items = match detail {
            Value::Array(items) => items,
            Value::Null => Vec::new(),
            other => {
                return Err(SoftLayerError::UnexpectedResponse(format!(
                    "billing detail is not a list: {}",
                    other
                )));
            }
        };

        if items.is_empty() {
            tracing::warn!("Hardware {} has no billing items", node.id);
            return Ok(Refusal::NoBillingItem.into());
        }

        let mut all_confirmed = true;
        for item in &items {
            match billing_id(item) {
                Some(id) => all_confirmed &= self.cancel_billing_item(id).await?,
                None => {
                    tracing::warn!("Skipping billing item without id on hardware {}", node.id);
                    all_confirmed = false;
                }
            }
        }

        if all_confirmed {
            Ok(Outcome::Completed(()))
        } else {
            Ok(Refusal::NotConfirmed.into())
        }
    }
}

fn remote_id(node: &SoftLayerNode) -> Value {
    node.extra
        .remote_id()
        .cloned()
        .unwrap_or_else(|| Value::String(node.id.clone()))
}

fn billing_id(item: &Value) -> Option<Value> {
    item.get("id").filter(|id| !id.is_null()).cloned()
}

#[async_trait]
impl<T: Transport> NodeDriver for SoftLayerNodeDriver<T> {
    type Extra = SoftLayerExtra;

    fn name(&self) -> &str {
        "softlayer"
    }

    fn display_name(&self) -> &str {
        "SoftLayer"
    }

    /// All hardware first, then all virtual guests, each in account order
    async fn list_nodes(&self) -> nimbus_cloud::Result<Vec<SoftLayerNode>> {
        let account = self
            .request(
                ACCOUNT_SERVICE,
                "getObject",
                &InitParams::mask(account_mask()),
                Vec::new(),
            )
            .await?;

        let Value::Object(mut account) = account else {
            return Err(SoftLayerError::UnexpectedResponse(
                "account reply is not a struct".to_string(),
            )
            .into());
        };

        let mut collection = |key: &str| match account.remove(key) {
            Some(Value::Array(records)) => Ok(records),
            Some(Value::Null) | None => Ok(Vec::new()),
            Some(other) => Err(SoftLayerError::UnexpectedResponse(format!(
                "account.{} is not a list: {}",
                key, other
            ))),
        };

        let hardware = collection("hardware")?;
        let guests = collection("virtualGuests")?;

        let mut nodes = normalize::to_nodes(hardware)?;
        nodes.extend(normalize::to_nodes(guests)?);

        tracing::debug!("Listed {} nodes", nodes.len());
        Ok(nodes)
    }

    /// Place an order from a built-in template.
    ///
    /// The node is not available immediately; call `list_nodes` again after
    /// a few minutes to discover it.
    async fn create_node(
        &self,
        request: &CreateNodeRequest,
    ) -> nimbus_cloud::Result<Outcome<()>> {
        let outcome = self.submit_order(request, "placeOrder").await?;
        if let Outcome::Completed(receipt) = &outcome {
            let order_id = receipt
                .get("orderId")
                .map(|id| id.to_string())
                .unwrap_or_default();
            tracing::info!(
                "Placed order from template {} (order id: {})",
                request.template.as_deref().unwrap_or_default(),
                order_id
            );
        }
        Ok(outcome.map(|_| ()))
    }

    async fn destroy_node(&self, node: &SoftLayerNode) -> nimbus_cloud::Result<Outcome<()>> {
        let outcome: Outcome<()> = match node.extra.kind {
            Some(ResourceKind::VirtualGuest) => self.destroy_virtual_guest(node).await?,
            Some(ResourceKind::Hardware) => self.destroy_hardware(node).await?,
            None => {
                tracing::warn!("Cannot destroy node {}: unknown resource kind", node.id);
                Refusal::UnknownResourceKind.into()
            }
        };
        Ok(outcome)
    }

    async fn reboot_node(
        &self,
        node: &SoftLayerNode,
        mode: Option<&str>,
    ) -> nimbus_cloud::Result<Outcome<Value>> {
        let mode = match mode.map(str::parse::<RebootMode>).transpose() {
            Ok(mode) => mode.unwrap_or_default(),
            Err(reason) => {
                tracing::warn!("Cannot reboot node {}: {}", node.id, reason);
                return Ok(reason.into());
            }
        };

        let Some(kind) = node.extra.kind else {
            tracing::warn!("Cannot reboot node {}: unknown resource kind", node.id);
            return Ok(Refusal::UnknownResourceKind.into());
        };

        let reply = self
            .request(
                kind.service(),
                mode.method(),
                &InitParams::id(remote_id(node)),
                Vec::new(),
            )
            .await?;
        Ok(Outcome::Completed(reply))
    }

    async fn list_sizes(
        &self,
        location: Option<&NodeLocation>,
    ) -> nimbus_cloud::Result<Vec<NodeSize>> {
        // TODO: resolve sizes per datacenter from SoftLayer_Product_Package
        if let Some(location) = location {
            tracing::debug!("Size catalog is not filtered by location ({})", location.name);
        }
        Ok(catalog::sizes())
    }

    async fn list_locations(&self) -> nimbus_cloud::Result<Vec<NodeLocation>> {
        let reply = self
            .request(
                DATACENTER_SERVICE,
                "getDatacenters",
                &InitParams::mask(json!({ "regions": {} })),
                Vec::new(),
            )
            .await?;

        let Value::Array(datacenters) = reply else {
            return Err(SoftLayerError::UnexpectedResponse(
                "datacenter reply is not a list".to_string(),
            )
            .into());
        };

        Ok(datacenters.iter().filter_map(normalize::to_location).collect())
    }
}
