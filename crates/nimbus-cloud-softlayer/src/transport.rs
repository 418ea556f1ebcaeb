//! Remote-procedure transport
//!
//! [`Transport`] performs one labeled call against a SoftLayer service.
//! [`XmlRpcTransport`] is the HTTP implementation used in production; tests
//! substitute their own.

use crate::config::SoftLayerConfig;
use crate::error::{Result, SoftLayerError};
use crate::xmlrpc;
use async_trait::async_trait;
use serde_json::Value;

/// Executes one remote call and returns the decoded reply.
///
/// `params[0]` is always the request envelope built by
/// [`crate::RequestBuilder`]; any further entries are positional arguments.
/// A remote fault is returned as [`SoftLayerError::Fault`].
#[async_trait]
pub trait Transport: Send + Sync {
    async fn call(&self, service: &str, method: &str, params: Vec<Value>) -> Result<Value>;
}

/// XML-RPC over HTTP
pub struct XmlRpcTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl XmlRpcTransport {
    pub fn new(config: &SoftLayerConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent())
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
        })
    }

    /// Get the URL for a service
    pub fn service_url(&self, service: &str) -> String {
        format!("{}/{}", self.endpoint, service)
    }
}

fn user_agent() -> String {
    format!("nimbus/{} (SoftLayer)", env!("CARGO_PKG_VERSION"))
}

#[async_trait]
impl Transport for XmlRpcTransport {
    async fn call(&self, service: &str, method: &str, params: Vec<Value>) -> Result<Value> {
        let url = self.service_url(service);
        let body = xmlrpc::encode_call(method, &params);

        tracing::debug!("XML-RPC call: {}::{}", service, method);

        let response = self
            .client
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, "text/xml")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        // Faults may arrive with a 500 status; prefer the fault body when present
        match xmlrpc::decode_response(&text) {
            Ok(value) if status.is_success() => Ok(value),
            Ok(_) => Err(SoftLayerError::UnexpectedResponse(format!(
                "{}::{} returned HTTP {}",
                service, method, status
            ))),
            Err(SoftLayerError::Decode(msg)) if !status.is_success() => {
                tracing::debug!("Undecodable error body from {}: {}", url, msg);
                Err(SoftLayerError::UnexpectedResponse(format!(
                    "{}::{} returned HTTP {}",
                    service, method, status
                )))
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use serde_json::json;

    fn transport(url: &str) -> XmlRpcTransport {
        let config = SoftLayerConfig::new("SL12345", "secret").with_endpoint(format!("{}/", url));
        XmlRpcTransport::new(&config).unwrap()
    }

    #[test]
    fn test_service_url() {
        let t = transport("http://localhost:9999/xmlrpc/v3");
        assert_eq!(
            t.service_url("SoftLayer_Account"),
            "http://localhost:9999/xmlrpc/v3/SoftLayer_Account"
        );
    }

    #[tokio::test]
    async fn test_call_success() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("POST", "/SoftLayer_Virtual_Guest")
            .match_header("content-type", "text/xml")
            .match_header("user-agent", Matcher::Regex(r"^nimbus/.* \(SoftLayer\)$".to_string()))
            .match_body(Matcher::AllOf(vec![
                Matcher::Regex("<methodName>rebootHard</methodName>".to_string()),
                Matcher::Regex("<name>apiKey</name><value><string>secret</string></value>".to_string()),
            ]))
            .with_status(200)
            .with_header("content-type", "text/xml")
            .with_body(
                "<methodResponse><params><param><value><boolean>1</boolean></value></param></params></methodResponse>",
            )
            .create_async()
            .await;

        let envelope = json!({
            "headers": { "authenticate": { "username": "SL12345", "apiKey": "secret" } }
        });
        let reply = transport(&server.url())
            .call("SoftLayer_Virtual_Guest", "rebootHard", vec![envelope])
            .await
            .unwrap();

        assert_eq!(reply, json!(true));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_call_fault_with_error_status() {
        let mut server = Server::new_async().await;

        let _mock = server
            .mock("POST", "/SoftLayer_Account")
            .with_status(500)
            .with_body(
                "<methodResponse><fault><value><struct>\
                 <member><name>faultCode</name><value><string>SoftLayer_Exception</string></value></member>\
                 <member><name>faultString</name><value><string>Access Denied.</string></value></member>\
                 </struct></value></fault></methodResponse>",
            )
            .create_async()
            .await;

        let err = transport(&server.url())
            .call("SoftLayer_Account", "getObject", vec![json!({})])
            .await
            .unwrap_err();

        match err {
            SoftLayerError::Fault { code, message } => {
                assert_eq!(code, "SoftLayer_Exception");
                assert_eq!(message, "Access Denied.");
            }
            other => panic!("expected fault, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_call_http_error_without_fault() {
        let mut server = Server::new_async().await;

        let _mock = server
            .mock("POST", "/SoftLayer_Account")
            .with_status(502)
            .with_body("<html><body>Bad Gateway</body></html>")
            .create_async()
            .await;

        let err = transport(&server.url())
            .call("SoftLayer_Account", "getObject", vec![json!({})])
            .await
            .unwrap_err();

        assert!(matches!(err, SoftLayerError::UnexpectedResponse(_)));
    }
}
