//! SoftLayer resource kinds and node side-channel data

use nimbus_cloud::Refusal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const ACCOUNT_SERVICE: &str = "SoftLayer_Account";
pub const HARDWARE_SERVICE: &str = "SoftLayer_Hardware_Server";
pub const VIRTUAL_GUEST_SERVICE: &str = "SoftLayer_Virtual_Guest";
pub const BILLING_ITEM_SERVICE: &str = "SoftLayer_Billing_Item";
pub const PRODUCT_ORDER_SERVICE: &str = "SoftLayer_Product_Order";
pub const DATACENTER_SERVICE: &str = "SoftLayer_Location_Datacenter";

/// Which SoftLayer object category a compute resource belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// Bare-metal server
    Hardware,
    /// Cloud computing instance (CCI)
    VirtualGuest,
}

impl ResourceKind {
    /// Infer the kind from which status field a raw record carries.
    ///
    /// Guests report `statusId`, hardware reports `hardwareStatusId`.
    pub fn detect(record: &Value) -> Option<Self> {
        if record.get("hardwareStatusId").is_some() {
            Some(ResourceKind::Hardware)
        } else if record.get("statusId").is_some() {
            Some(ResourceKind::VirtualGuest)
        } else {
            None
        }
    }

    /// Remote service that owns resources of this kind
    pub fn service(&self) -> &'static str {
        match self {
            ResourceKind::Hardware => HARDWARE_SERVICE,
            ResourceKind::VirtualGuest => VIRTUAL_GUEST_SERVICE,
        }
    }

    /// Field holding the numeric status code
    pub fn status_field(&self) -> &'static str {
        match self {
            ResourceKind::Hardware => "hardwareStatusId",
            ResourceKind::VirtualGuest => "statusId",
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceKind::Hardware => write!(f, "hardware"),
            ResourceKind::VirtualGuest => write!(f, "virtual-guest"),
        }
    }
}

/// Side-channel data attached to every SoftLayer node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoftLayerExtra {
    /// Resolved once during normalization; `None` if the record carried
    /// neither status field
    pub kind: Option<ResourceKind>,

    /// The record exactly as the API returned it
    pub raw: Value,
}

impl SoftLayerExtra {
    /// The object ID in its original wire representation
    pub fn remote_id(&self) -> Option<&Value> {
        self.raw.get("id").filter(|id| !id.is_null())
    }

    /// Whether a billing flag is set, compared by value.
    ///
    /// SoftLayer reports flags as integer `1`/`0` on some objects and as
    /// booleans on others; both spellings are accepted.
    pub fn flag(&self, name: &str) -> bool {
        match self.raw.get(name) {
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_i64() == Some(1),
            _ => false,
        }
    }
}

pub type SoftLayerNode = nimbus_cloud::Node<SoftLayerExtra>;

/// Reboot variants; each maps to its own remote method
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RebootMode {
    #[default]
    Default,
    Hard,
    Soft,
}

impl RebootMode {
    pub fn method(&self) -> &'static str {
        match self {
            RebootMode::Default => "rebootDefault",
            RebootMode::Hard => "rebootHard",
            RebootMode::Soft => "rebootSoft",
        }
    }
}

impl std::str::FromStr for RebootMode {
    type Err = Refusal;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "default" => Ok(RebootMode::Default),
            "hard" => Ok(RebootMode::Hard),
            "soft" => Ok(RebootMode::Soft),
            _ => Err(Refusal::UnsupportedRebootMode(s.to_string())),
        }
    }
}
