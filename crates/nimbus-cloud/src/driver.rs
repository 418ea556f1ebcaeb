//! Compute driver trait definition

use crate::error::Result;
use crate::node::{CreateNodeRequest, Node, NodeLocation, NodeSize};
use crate::outcome::Outcome;
use async_trait::async_trait;

/// Compute provider abstraction trait
///
/// Every provider adapter implements this trait so callers can swap one
/// provider for another without changing call sites. Optional arguments are
/// passed as `Option`s or request structs, mirroring keyword arguments.
#[async_trait]
pub trait NodeDriver: Send + Sync {
    /// Provider-specific data attached to each [`Node`]
    type Extra: Send + Sync;

    /// Returns the provider name (e.g., "softlayer")
    fn name(&self) -> &str;

    /// Returns the provider display name for UI
    fn display_name(&self) -> &str;

    /// List every instance on the account
    async fn list_nodes(&self) -> Result<Vec<Node<Self::Extra>>>;

    /// Order a new instance.
    ///
    /// Provisioning is asynchronous for most providers; a completed outcome
    /// means the order was accepted, not that the node exists yet.
    async fn create_node(&self, request: &CreateNodeRequest) -> Result<Outcome<()>>;

    /// Decommission an instance
    async fn destroy_node(&self, node: &Node<Self::Extra>) -> Result<Outcome<()>>;

    /// Reboot an instance. `mode` of `None` selects the provider default.
    async fn reboot_node(
        &self,
        node: &Node<Self::Extra>,
        mode: Option<&str>,
    ) -> Result<Outcome<serde_json::Value>>;

    /// List orderable sizes, optionally restricted to one location
    async fn list_sizes(&self, location: Option<&NodeLocation>) -> Result<Vec<NodeSize>>;

    /// List locations instances can be placed in
    async fn list_locations(&self) -> Result<Vec<NodeLocation>>;
}
