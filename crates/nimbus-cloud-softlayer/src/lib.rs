//! SoftLayer compute driver for Nimbus
//!
//! This crate implements the NodeDriver trait for SoftLayer, covering both
//! bare-metal hardware and virtual guests (CCIs) through the XML-RPC API.
//!
//! # Features
//!
//! - Node listing (hardware and virtual guests in one account fetch)
//! - Ordering from built-in order templates
//! - Cancellation through billing items
//! - Default / hard / soft reboot
//!
//! # Requirements
//!
//! - `SOFTLAYER_USERNAME` and `SOFTLAYER_API_KEY` env vars
//!
//! It is possible to place rather expensive orders through this API. Check
//! an order with `verify_order` before placing it.
//!
//! # Example
//!
//! ```ignore
//! use nimbus_cloud::{CreateNodeRequest, GuestSpec, NodeDriver};
//! use nimbus_cloud_softlayer::SoftLayerNodeDriver;
//!
//! let driver = SoftLayerNodeDriver::from_env()?;
//!
//! for node in driver.list_nodes().await? {
//!     println!("{} {:?}", node.name, node.public_ip);
//! }
//!
//! // The new guest shows up in list_nodes after a few minutes
//! let request = CreateNodeRequest::new()
//!     .template("example")
//!     .guest(GuestSpec::new("testhost", "testdomain.com"));
//! driver.create_node(&request).await?;
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod model;
pub mod normalize;
pub mod provider;
pub mod request;
pub mod transport;
pub mod xmlrpc;

pub use catalog::{BillingMode, OrderTemplate};
pub use config::SoftLayerConfig;
pub use error::{Result, SoftLayerError};
pub use model::{RebootMode, ResourceKind, SoftLayerExtra, SoftLayerNode};
pub use provider::SoftLayerNodeDriver;
pub use request::{Credentials, InitParams, RequestBuilder};
pub use transport::{Transport, XmlRpcTransport};
