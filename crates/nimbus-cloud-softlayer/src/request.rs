//! Request envelope construction
//!
//! Every SoftLayer call takes a header struct as its first parameter:
//!
//! ```text
//! { "headers": {
//!     "authenticate": { "username": ..., "apiKey": ... },
//!     "<Service>InitParameters": { "id": ... },      // only with an id
//!     "<Service>ObjectMask": { "mask": ... }         // only with a mask
//! } }
//! ```

use serde_json::{Map, Value, json};

/// API username and key. Fixed for the lifetime of a driver.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub api_key: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            api_key: api_key.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Optional per-call targeting: which object and which nested fields
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InitParams {
    pub id: Option<Value>,
    pub object_mask: Option<Value>,
}

impl InitParams {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn id(id: impl Into<Value>) -> Self {
        Self {
            id: Some(id.into()),
            object_mask: None,
        }
    }

    pub fn mask(object_mask: Value) -> Self {
        Self {
            id: None,
            object_mask: Some(object_mask),
        }
    }
}

/// Builds request envelopes for one credential pair
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    credentials: Credentials,
}

impl RequestBuilder {
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }

    /// Build the header envelope for a call against `service`
    pub fn build(&self, service: &str, params: &InitParams) -> Value {
        let mut headers = Map::new();
        headers.insert(
            "authenticate".to_string(),
            json!({
                "username": self.credentials.username,
                "apiKey": self.credentials.api_key,
            }),
        );

        if let Some(id) = &params.id {
            headers.insert(format!("{}InitParameters", service), json!({ "id": id }));
        }

        if let Some(mask) = &params.object_mask {
            headers.insert(format!("{}ObjectMask", service), json!({ "mask": mask }));
        }

        json!({ "headers": headers })
    }
}
