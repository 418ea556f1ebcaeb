//! Built-in catalogs
//!
//! Sizes, order templates and the datacenter allow-list are fixed tables.
//! Template and size keys are part of the public interface: callers pass
//! them by name.
//!
//! Templates are immutable blueprints. Callers that need to adjust one take
//! a copy with [`OrderTemplate::with_guests`].
//!
//! Price IDs can be extracted from an existing guest with
//! [`crate::SoftLayerNodeDriver::order_template`].

use nimbus_cloud::{GuestSpec, NodeSize};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::LazyLock;

// TODO: switch to datacenter short names (wdc01 etc.) once orders accept them
pub const LOCATION_DALLAS: i64 = 3;
pub const LOCATION_SEATTLE: i64 = 18171;
pub const LOCATION_WASHINGTON_DC: i64 = 37473;

/// Billing mode for order templates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BillingMode {
    Hourly,
    Monthly,
}

impl BillingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            BillingMode::Hourly => "HOURLY",
            BillingMode::Monthly => "MONTHLY",
        }
    }
}

impl std::fmt::Display for BillingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

struct SizeSpec {
    id: &'static str,
    name: &'static str,
    ram: u32,
    disk: u32,
    bandwidth: Option<u32>,
    price: Option<f64>,
}

// Prices are not resolved from the product catalog yet
const SIZES: &[SizeSpec] = &[SizeSpec {
    id: "example",
    name: "Example CCI WDC01 2-core 2GB 100GB 1Gbps",
    ram: 2048,
    disk: 100,
    bandwidth: None,
    price: None,
}];

/// All sizes in the built-in catalog
pub fn sizes() -> Vec<NodeSize> {
    SIZES
        .iter()
        .map(|s| NodeSize {
            id: s.id.to_string(),
            name: s.name.to_string(),
            ram: s.ram,
            disk: s.disk,
            bandwidth: s.bandwidth,
            price: s.price,
        })
        .collect()
}

/// Datacenters known to accept orders, with their country codes
pub const DATACENTERS: &[(&str, &str)] = &[("dal01", "US"), ("sea01", "US"), ("wdc01", "US")];

/// Country code for an allow-listed datacenter
pub fn datacenter_country(name: &str) -> Option<&'static str> {
    DATACENTERS
        .iter()
        .find(|(dc, _)| *dc == name)
        .map(|(_, country)| *country)
}

/// One price line of an order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Price {
    pub id: i64,
    #[serde(skip)]
    pub description: &'static str,
}

const fn price(id: i64, description: &'static str) -> Price {
    Price { id, description }
}

/// A product order container, serialized in the shape
/// `SoftLayer_Product_Order::placeOrder` expects
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderTemplate {
    pub complex_type: String,
    pub location: i64,
    pub package_id: i64,
    pub prices: Vec<Price>,
    pub quantity: u32,
    pub use_hourly_pricing: bool,
    pub virtual_guests: Vec<GuestSpec>,
}

impl OrderTemplate {
    /// Copy of this template with a different guest list
    pub fn with_guests(&self, guests: Vec<GuestSpec>) -> Self {
        Self {
            virtual_guests: guests,
            ..self.clone()
        }
    }

    pub fn billing_mode(&self) -> BillingMode {
        if self.use_hourly_pricing {
            BillingMode::Hourly
        } else {
            BillingMode::Monthly
        }
    }
}

static ORDER_TEMPLATES: LazyLock<HashMap<&'static str, OrderTemplate>> = LazyLock::new(|| {
    let mut templates = HashMap::new();
    templates.insert(
        "example",
        OrderTemplate {
            complex_type: "SoftLayer_Container_Product_Order_Virtual_Guest".to_string(),
            location: LOCATION_WASHINGTON_DC,
            package_id: 46,
            prices: vec![
                price(1641, "2 x 2.0 GHz Cores"),
                price(1645, "2GB"),
                price(905, "Reboot / Remote Console"),
                price(274, "1000 Mbps Public & Private Networks"),
                price(1800, "0 GB Bandwidth"),
                price(21, "1 IP Address"),
                price(1639, "100 GB (SAN)"),
                price(1696, "Debian GNU/Linux 5.0 Lenny/Stable - Minimal Install (32 bit)"),
                price(55, "Host Ping"),
                price(57, "Email and Ticket"),
                price(58, "Automated Notification"),
                price(420, "Unlimited SSL VPN Users & 1 PPTP VPN User per account"),
                price(418, "Nessus Vulnerability Assessment & Reporting"),
            ],
            quantity: 1,
            use_hourly_pricing: true,
            virtual_guests: vec![GuestSpec::new("newcci", "example.org")],
        },
    );
    templates
});

/// Look up an order template by name
pub fn order_template(name: &str) -> Option<&'static OrderTemplate> {
    ORDER_TEMPLATES.get(name)
}

/// Names of all built-in order templates, sorted
pub fn template_names() -> Vec<&'static str> {
    let mut names: Vec<_> = ORDER_TEMPLATES.keys().copied().collect();
    names.sort_unstable();
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_example_template_serializes() {
        let template = order_template("example").unwrap();
        let value = serde_json::to_value(template).unwrap();

        assert_eq!(
            value["complexType"],
            "SoftLayer_Container_Product_Order_Virtual_Guest"
        );
        assert_eq!(value["location"], LOCATION_WASHINGTON_DC);
        assert_eq!(value["packageId"], 46);
        assert_eq!(value["quantity"], 1);
        assert_eq!(value["useHourlyPricing"], true);
        assert_eq!(value["prices"].as_array().unwrap().len(), 13);
        assert_eq!(value["prices"][0], json!({ "id": 1641 }));
        assert_eq!(
            value["virtualGuests"],
            json!([{ "hostname": "newcci", "domain": "example.org" }])
        );
        assert_eq!(template.billing_mode(), BillingMode::Hourly);
    }

    #[test]
    fn test_with_guests_leaves_blueprint_untouched() {
        let template = order_template("example").unwrap();
        let copy = template.with_guests(vec![GuestSpec::new("other", "example.com")]);

        assert_eq!(copy.virtual_guests[0].hostname, "other");
        assert_eq!(copy.prices, template.prices);
        assert_eq!(
            order_template("example").unwrap().virtual_guests,
            vec![GuestSpec::new("newcci", "example.org")]
        );
    }

    #[test]
    fn test_unknown_template() {
        assert!(order_template("huge").is_none());
        assert_eq!(template_names(), vec!["example"]);
    }

    #[test]
    fn test_datacenter_allow_list() {
        assert_eq!(datacenter_country("wdc01"), Some("US"));
        assert_eq!(datacenter_country("dal01"), Some("US"));
        assert_eq!(datacenter_country("sea01"), Some("US"));
        assert_eq!(datacenter_country("ams01"), None);
    }

    #[test]
    fn test_size_catalog() {
        let sizes = sizes();
        assert_eq!(sizes.len(), 1);
        assert_eq!(sizes[0].id, "example");
        assert_eq!(sizes[0].ram, 2048);
        assert_eq!(sizes[0].disk, 100);
        assert!(sizes[0].bandwidth.is_none());
        assert!(sizes[0].price.is_none());
    }
}
