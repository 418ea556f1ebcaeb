//! Nimbus Cloud Compute
//!
//! This crate provides the provider-neutral compute abstraction for Nimbus:
//! one trait that every provider adapter implements, and the small set of
//! normalized records those adapters return.
//!
//! # Supported Providers
//!
//! - **SoftLayer**: bare-metal hardware and virtual guests (via XML-RPC)
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                   nimbus CLI                     │
//! │        (nodes / create / destroy / reboot)       │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────────┐
//! │                 nimbus-cloud                     │
//! │  ┌──────────────────────────────────────────┐   │
//! │  │          Driver Abstraction               │   │
//! │  │  trait NodeDriver { ... }                 │   │
//! │  └──────────────────────────────────────────┘   │
//! │  ┌──────────────┐  ┌──────────────┐            │
//! │  │ Node / Size  │  │   Outcome    │            │
//! │  │  Location    │  │   Refusal    │            │
//! │  └──────────────┘  └──────────────┘            │
//! └───────┬─────────────────────────────────────────┘
//!         │
//! ┌───────▼───────┐
//! │   softlayer   │
//! │    driver     │
//! └───────────────┘
//! ```

pub mod driver;
pub mod error;
pub mod node;
pub mod outcome;

// Re-exports
pub use driver::NodeDriver;
pub use error::{CloudError, Result};
pub use node::{CreateNodeRequest, GuestSpec, Node, NodeLocation, NodeSize};
pub use outcome::{Outcome, Refusal};
