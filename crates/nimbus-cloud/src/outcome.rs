//! Soft-failure results
//!
//! Drivers distinguish "the operation could not even be attempted" from
//! "the remote system rejected it". The former is an [`Outcome::Refused`]
//! carrying a [`Refusal`] reason; the latter is a [`crate::CloudError`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result of an operation that may be declined without contacting the remote side
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "value", rename_all = "snake_case")]
pub enum Outcome<T> {
    /// The operation ran to completion
    Completed(T),
    /// The operation was not carried out
    Refused(Refusal),
}

impl<T> Outcome<T> {
    pub fn is_completed(&self) -> bool {
        matches!(self, Outcome::Completed(_))
    }

    pub fn refusal(&self) -> Option<&Refusal> {
        match self {
            Outcome::Completed(_) => None,
            Outcome::Refused(reason) => Some(reason),
        }
    }

    pub fn completed(self) -> Option<T> {
        match self {
            Outcome::Completed(value) => Some(value),
            Outcome::Refused(_) => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Completed(value) => Outcome::Completed(f(value)),
            Outcome::Refused(reason) => Outcome::Refused(reason),
        }
    }
}

impl<T> From<Refusal> for Outcome<T> {
    fn from(reason: Refusal) -> Self {
        Outcome::Refused(reason)
    }
}

/// Reason code for a refused operation
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", content = "detail", rename_all = "snake_case")]
pub enum Refusal {
    #[error("no order template given")]
    MissingTemplate,

    #[error("unknown order template: {0}")]
    UnknownTemplate(String),

    #[error("unsupported reboot mode: {0}")]
    UnsupportedRebootMode(String),

    /// The node's kind tag is missing, so no remote service owns it
    #[error("resource kind could not be determined")]
    UnknownResourceKind,

    #[error("not eligible: {0}")]
    NotEligible(String),

    #[error("no billing item attached")]
    NoBillingItem,

    /// The remote side answered but did not confirm the operation
    #[error("remote side did not confirm the operation")]
    NotConfirmed,
}
