//! Normalized compute records shared by every provider

use serde::{Deserialize, Serialize};

/// A compute instance as reported by a provider.
///
/// `extra` carries provider-specific data the driver needs for follow-up
/// calls on the same node (e.g. which remote service owns it).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node<X> {
    /// Provider-specific instance ID
    pub id: String,

    /// Display name (usually the hostname)
    pub name: String,

    /// Raw numeric state code reported by the provider
    pub state: i64,

    /// Public address; absent until the provider assigns one
    pub public_ip: Option<String>,

    /// Private (backend) address
    pub private_ip: Option<String>,

    /// Provider-specific side-channel data
    pub extra: X,
}

impl<X> Node<X> {
    /// Whether the provider has assigned a public address yet
    pub fn has_public_ip(&self) -> bool {
        self.public_ip.is_some()
    }
}

/// An orderable instance size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSize {
    pub id: String,
    pub name: String,
    /// Memory in MB
    pub ram: u32,
    /// Disk in GB
    pub disk: u32,
    /// Bandwidth allowance, when known
    pub bandwidth: Option<u32>,
    /// Hourly price, when known
    pub price: Option<f64>,
}

/// A datacenter the provider can place instances in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeLocation {
    pub id: String,
    pub name: String,
    /// ISO 3166-1 alpha-2 country code
    pub country: String,
}

/// Hostname and domain for one guest in a create request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestSpec {
    pub hostname: String,
    pub domain: String,
}

impl GuestSpec {
    pub fn new(hostname: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            hostname: hostname.into(),
            domain: domain.into(),
        }
    }

    /// Parse `host.example.org` into hostname `host` and domain `example.org`
    pub fn from_fqdn(fqdn: &str) -> Option<Self> {
        let (hostname, domain) = fqdn.split_once('.')?;
        if hostname.is_empty() || domain.is_empty() {
            return None;
        }
        Some(Self::new(hostname, domain))
    }

    pub fn fqdn(&self) -> String {
        format!("{}.{}", self.hostname, self.domain)
    }
}

/// Keyword-style arguments for [`crate::NodeDriver::create_node`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateNodeRequest {
    /// Name of a provider order template
    pub template: Option<String>,

    /// Guests overriding the template's default guest list
    pub guests: Option<Vec<GuestSpec>>,
}

impl CreateNodeRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn template(mut self, name: impl Into<String>) -> Self {
        self.template = Some(name.into());
        self
    }

    pub fn guest(mut self, guest: GuestSpec) -> Self {
        self.guests.get_or_insert_with(Vec::new).push(guest);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guest_from_fqdn() {
        let guest = GuestSpec::from_fqdn("web1.example.org").unwrap();
        assert_eq!(guest.hostname, "web1");
        assert_eq!(guest.domain, "example.org");
        assert_eq!(guest.fqdn(), "web1.example.org");

        assert!(GuestSpec::from_fqdn("localhost").is_none());
        assert!(GuestSpec::from_fqdn(".example.org").is_none());
        assert!(GuestSpec::from_fqdn("web1.").is_none());
    }

    #[test]
    fn test_create_request_builder() {
        let request = CreateNodeRequest::new()
            .template("example")
            .guest(GuestSpec::new("a", "example.org"))
            .guest(GuestSpec::new("b", "example.org"));

        assert_eq!(request.template.as_deref(), Some("example"));
        assert_eq!(request.guests.as_ref().map(Vec::len), Some(2));
        assert!(CreateNodeRequest::new().guests.is_none());
    }

    #[test]
    fn test_has_public_ip() {
        let mut node = Node {
            id: "1".to_string(),
            name: "web1".to_string(),
            state: 0,
            public_ip: None,
            private_ip: Some("10.0.0.1".to_string()),
            extra: (),
        };
        assert!(!node.has_public_ip());

        node.public_ip = Some("203.0.113.1".to_string());
        assert!(node.has_public_ip());
    }
}
