//! JSON-RPC 2.0 envelope for tool invocation.
//!
//! Supports the small MCP-style method set used by tool clients:
//!
//! - `initialize` - server name, version and capabilities
//! - `ping` - empty result
//! - `tools/list` - tool descriptors
//! - `tools/call` - `{"name": ..., "arguments": {...}}`
//!
//! Requests without an `id` member are notifications and get no response.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Value, json};
use tracing::debug;

use super::registry::{ToolError, ToolRegistry};
use crate::domain::gateways::HttpTransport;

pub const JSONRPC_VERSION: &str = "2.0";
pub const PROTOCOL_VERSION: &str = "2025-06-18";

/// A JSON-RPC request or notification.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Request {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
    /// `None` when the member is absent; an explicit `null` is `Some(Null)`.
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<Value>,
}

fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

impl Request {
    pub fn new(method: impl Into<String>, params: Option<Value>, id: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            method: method.into(),
            params,
            id: Some(id),
        }
    }

    pub fn notification(method: impl Into<String>, params: Option<Value>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            method: method.into(),
            params,
            id: None,
        }
    }

    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }
}

/// A JSON-RPC response carrying either a result or an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
    pub id: Value,
}

impl Response {
    pub fn ok(result: Value, id: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            result: Some(result),
            error: None,
            id,
        }
    }

    pub fn err(error: RpcError, id: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            result: None,
            error: Some(error),
            id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
#[error("Error {code}: {message}")]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl RpcError {
    pub fn parse_error(detail: impl Into<String>) -> Self {
        Self {
            code: -32700,
            message: "Parse error".to_string(),
            data: Some(Value::String(detail.into())),
        }
    }

    pub fn invalid_request(detail: impl Into<String>) -> Self {
        Self {
            code: -32600,
            message: "Invalid Request".to_string(),
            data: Some(Value::String(detail.into())),
        }
    }

    pub fn method_not_found(method: &str) -> Self {
        Self {
            code: -32601,
            message: "Method not found".to_string(),
            data: Some(Value::String(method.to_string())),
        }
    }

    pub fn invalid_params(detail: impl Into<String>) -> Self {
        Self {
            code: -32602,
            message: "Invalid params".to_string(),
            data: Some(Value::String(detail.into())),
        }
    }
}

impl From<ToolError> for RpcError {
    fn from(e: ToolError) -> Self {
        RpcError::invalid_params(e.to_string())
    }
}

#[derive(Debug, Deserialize)]
struct ToolCallParams {
    name: String,
    #[serde(default)]
    arguments: Option<Value>,
}

/// Handles one request against `registry`.
///
/// Returns `None` for notifications.
pub async fn handle<T: HttpTransport + ?Sized>(
    registry: &ToolRegistry<T>,
    request: Request,
) -> Option<Response> {
    if request.is_notification() {
        debug!(method = %request.method, "Ignoring notification");
        return None;
    }

    let id = request.id.clone().unwrap_or(Value::Null);

    let result = if request.jsonrpc != JSONRPC_VERSION {
        Err(RpcError::invalid_request(format!(
            "unsupported jsonrpc version: {}",
            request.jsonrpc
        )))
    } else {
        dispatch(registry, request).await
    };

    Some(match result {
        Ok(value) => Response::ok(value, id),
        Err(error) => Response::err(error, id),
    })
}

async fn dispatch<T: HttpTransport + ?Sized>(
    registry: &ToolRegistry<T>,
    request: Request,
) -> Result<Value, RpcError> {
    debug!(method = %request.method, "JSON-RPC request");

    match request.method.as_str() {
        "initialize" => Ok(json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": {"tools": {"listChanged": false}},
            "serverInfo": {
                "name": env!("CARGO_PKG_NAME"),
                "version": env!("CARGO_PKG_VERSION"),
            },
        })),
        "ping" => Ok(json!({})),
        method if method.starts_with("notifications/") => Ok(json!({})),
        "tools/list" => Ok(json!({"tools": registry.list()})),
        "tools/call" => {
            let params: ToolCallParams = request
                .params
                .ok_or_else(|| RpcError::invalid_params("No parameters provided"))
                .and_then(|p| {
                    serde_json::from_value(p).map_err(|e| RpcError::invalid_params(e.to_string()))
                })?;

            let output = registry
                .call(&params.name, params.arguments.as_ref())
                .await?;

            Ok(json!({
                "content": [{"type": "text", "text": output.content}],
                "isError": output.is_error,
            }))
        }
        other => Err(RpcError::method_not_found(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use crate::application::services::{AnimalService, HealthService};
    use crate::config::ApiEndpoints;
    use crate::domain::gateways::{MockHttpTransport, TransportResponse};

    fn registry(transport: MockHttpTransport) -> ToolRegistry<MockHttpTransport> {
        let transport = Arc::new(transport);
        let endpoints = ApiEndpoints::default();
        ToolRegistry::new(
            Arc::new(AnimalService::new(
                transport.clone(),
                endpoints.clone(),
                Duration::from_secs(1),
            )),
            Arc::new(HealthService::new(transport, endpoints, Duration::from_secs(1))),
        )
    }

    async fn call(request: Request) -> Response {
        handle(&registry(MockHttpTransport::new()), request)
            .await
            .unwrap()
    }

    #[test]
    fn test_request_deserializes_without_params() {
        let request: Request =
            serde_json::from_str(r#"{"jsonrpc":"2.0","method":"ping","id":7}"#).unwrap();

        assert_eq!(request.method, "ping");
        assert!(request.params.is_none());
        assert_eq!(request.id, Some(json!(7)));
    }

    #[tokio::test]
    async fn test_initialize() {
        let response = call(Request::new("initialize", None, json!(1))).await;

        let result = response.result.unwrap();
        assert_eq!(result["protocolVersion"], PROTOCOL_VERSION);
        assert_eq!(result["serverInfo"]["name"], "petting-zootopia");
        assert_eq!(response.id, json!(1));
    }

    #[tokio::test]
    async fn test_tools_list() {
        let response = call(Request::new("tools/list", None, json!("a"))).await;

        let tools = response.result.unwrap()["tools"].as_array().unwrap().clone();
        assert_eq!(tools.len(), 5);
        assert!(tools[0].get("inputSchema").is_some());
    }

    #[tokio::test]
    async fn test_tools_call_ping() {
        let response = call(Request::new(
            "tools/call",
            Some(json!({"name": "ping"})),
            json!(2),
        ))
        .await;

        let result = response.result.unwrap();
        assert_eq!(result["content"][0]["text"], "pong");
        assert_eq!(result["isError"], false);
    }

    #[tokio::test]
    async fn test_tools_call_duck() {
        let mut transport = MockHttpTransport::new();
        transport
            .expect_get()
            .returning(|_, _| Ok(TransportResponse::ok(r#"{"url":"https://d/1.gif"}"#)));

        let response = handle(
            &registry(transport),
            Request::new(
                "tools/call",
                Some(json!({"name": "duck", "arguments": {}})),
                json!(3),
            ),
        )
        .await
        .unwrap();

        assert_eq!(response.result.unwrap()["content"][0]["text"], "https://d/1.gif");
    }

    #[tokio::test]
    async fn test_tools_call_unknown_tool() {
        let response = call(Request::new(
            "tools/call",
            Some(json!({"name": "giraffe"})),
            json!(4),
        ))
        .await;

        assert_eq!(response.error.unwrap().code, -32602);
    }

    #[tokio::test]
    async fn test_tools_call_missing_params() {
        let response = call(Request::new("tools/call", None, json!(5))).await;

        assert_eq!(response.error.unwrap().code, -32602);
    }

    #[tokio::test]
    async fn test_unknown_method() {
        let response = call(Request::new("resources/list", None, json!(6))).await;

        let error = response.error.unwrap();
        assert_eq!(error.code, -32601);
        assert!(response.result.is_none());
    }

    #[tokio::test]
    async fn test_wrong_version() {
        let mut request = Request::new("ping", None, json!(8));
        request.jsonrpc = "1.0".to_string();

        let response = call(request).await;

        assert_eq!(response.error.unwrap().code, -32600);
    }

    #[tokio::test]
    async fn test_notification_has_no_response() {
        let request = Request::notification("notifications/initialized", None);

        assert!(
            handle(&registry(MockHttpTransport::new()), request)
                .await
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_request_without_id_is_a_notification() {
        let request: Request =
            serde_json::from_str(r#"{"jsonrpc":"2.0","method":"ping"}"#).unwrap();

        assert!(request.is_notification());
        assert!(
            handle(&registry(MockHttpTransport::new()), request)
                .await
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_null_id_still_gets_a_response() {
        let request: Request =
            serde_json::from_str(r#"{"jsonrpc":"2.0","method":"ping","id":null}"#).unwrap();

        assert!(!request.is_notification());

        let response = call(request).await;
        assert_eq!(response.result, Some(json!({})));
        assert_eq!(response.id, Value::Null);
    }

    #[tokio::test]
    async fn test_notification_method_with_id_is_answered() {
        let response = call(Request::new("notifications/initialized", None, json!(9))).await;

        assert_eq!(response.result, Some(json!({})));
        assert_eq!(response.id, json!(9));
    }
}
