//! JSON-RPC 2.0 envelopes for the Odoo external API.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Serialize)]
pub struct RpcRequest {
    pub jsonrpc: &'static str,
    pub method: &'static str,
    pub params: RpcParams,
    pub id: u64,
}

#[derive(Debug, Serialize)]
pub struct RpcParams {
    pub service: String,
    pub method: String,
    pub args: Value,
}

impl RpcRequest {
    /// Build a `call` request against one of Odoo's RPC services
    /// (`common` for authentication, `object` for model access).
    pub fn call(service: &str, method: &str, args: Value, id: u64) -> Self {
        Self {
            jsonrpc: "2.0",
            method: "call",
            params: RpcParams {
                service: service.to_string(),
                method: method.to_string(),
                args,
            },
            id,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RpcResponse {
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<RpcFault>,
    #[serde(default)]
    pub id: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct RpcFault {
    #[serde(default)]
    pub code: i64,
    pub message: String,
    #[serde(default)]
    pub data: Option<Value>,
}

impl RpcFault {
    /// Human-readable fault description; Odoo puts the interesting part in
    /// `data.message` and leaves `message` as a generic banner.
    pub fn description(&self) -> String {
        self.data
            .as_ref()
            .and_then(|data| data.get("message"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| self.message.clone())
    }
}
