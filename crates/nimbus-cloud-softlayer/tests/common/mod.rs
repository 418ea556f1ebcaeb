use async_trait::async_trait;
use nimbus_cloud_softlayer::normalize;
use nimbus_cloud_softlayer::{
    Credentials, Result, SoftLayerError, SoftLayerNode, SoftLayerNodeDriver, Transport,
};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;

/// One call as seen by the transport
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub service: String,
    pub method: String,
    pub params: Vec<Value>,
}

impl RecordedCall {
    pub fn headers(&self) -> &Value {
        &self.params[0]["headers"]
    }

    /// The id from `<service>InitParameters`, if any
    pub fn init_id(&self) -> Option<&Value> {
        self.headers()
            .get(format!("{}InitParameters", self.service))
            .and_then(|p| p.get("id"))
    }
}

enum Reply {
    Value(Value),
    Fault(String, String),
}

/// Transport that answers from a script and records every call
#[derive(Default)]
pub struct ScriptedTransport {
    replies: Mutex<VecDeque<Reply>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, value: Value) -> Self {
        self.replies.lock().unwrap().push_back(Reply::Value(value));
        self
    }

    pub fn fault(self, code: &str, message: &str) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(Reply::Fault(code.to_string(), message.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn call(&self, service: &str, method: &str, params: Vec<Value>) -> Result<Value> {
        self.calls.lock().unwrap().push(RecordedCall {
            service: service.to_string(),
            method: method.to_string(),
            params,
        });

        match self.replies.lock().unwrap().pop_front() {
            Some(Reply::Value(value)) => Ok(value),
            Some(Reply::Fault(code, message)) => Err(SoftLayerError::Fault { code, message }),
            None => Err(SoftLayerError::UnexpectedResponse(format!(
                "no scripted reply for {}::{}",
                service, method
            ))),
        }
    }
}

pub fn driver(transport: ScriptedTransport) -> SoftLayerNodeDriver<ScriptedTransport> {
    SoftLayerNodeDriver::with_transport(Credentials::new("SL12345", "secret"), transport)
}

pub fn node(record: Value) -> SoftLayerNode {
    normalize::to_node(record).unwrap()
}
