//! SoftLayer driver error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SoftLayerError {
    /// The remote side answered with an XML-RPC fault.
    ///
    /// `code` is kept as sent; SoftLayer uses exception class names such as
    /// `SoftLayer_Exception_ObjectNotFound`.
    #[error("SoftLayer fault {code}: {message}")]
    Fault { code: String, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("XML-RPC decode error: {0}")]
    Decode(String),

    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<quick_xml::Error> for SoftLayerError {
    fn from(err: quick_xml::Error) -> Self {
        SoftLayerError::Decode(err.to_string())
    }
}

impl From<SoftLayerError> for nimbus_cloud::CloudError {
    fn from(err: SoftLayerError) -> Self {
        match err {
            SoftLayerError::Http(e) if e.is_timeout() => {
                nimbus_cloud::CloudError::Timeout(e.to_string())
            }
            SoftLayerError::MissingEnvVar(_) | SoftLayerError::InvalidConfig(_) => {
                nimbus_cloud::CloudError::InvalidConfig(err.to_string())
            }
            SoftLayerError::Json(e) => nimbus_cloud::CloudError::Json(e),
            other => nimbus_cloud::CloudError::ApiError(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, SoftLayerError>;

#[cfg(test)]
mod tests {
    use super::*;
    use nimbus_cloud::CloudError;

    #[test]
    fn test_fault_maps_to_api_error() {
        let err = SoftLayerError::Fault {
            code: "SoftLayer_Exception_ObjectNotFound".to_string(),
            message: "Unable to find object with id of '1'.".to_string(),
        };
        match CloudError::from(err) {
            CloudError::ApiError(msg) => {
                assert!(msg.contains("SoftLayer_Exception_ObjectNotFound"));
                assert!(msg.contains("Unable to find object"));
            }
            other => panic!("unexpected mapping: {:?}", other),
        }
    }

    #[test]
    fn test_config_errors_map_to_invalid_config() {
        let err = SoftLayerError::MissingEnvVar("SOFTLAYER_API_KEY".to_string());
        assert!(matches!(CloudError::from(err), CloudError::InvalidConfig(_)));
    }
}
