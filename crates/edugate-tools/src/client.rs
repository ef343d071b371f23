//! HTTP remote client for the school-management API
//!
//! Sends each operation as a JSON-RPC 2.0 request:
//!
//! ```json
//! {"jsonrpc": "2.0", "id": 1, "method": "get_user", "params": {"username": "jane.doe"}}
//! ```
//!
//! Authentication is left to the caller: pass a pre-configured
//! [`reqwest::Client`] (default headers, cookies) via [`HttpRemoteClient::with_client`].

use async_trait::async_trait;
use edugate_core::{EdugateError, EdugateResult, RemoteClient};
use reqwest::Client;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

/// JSON-RPC client for the remote API
pub struct HttpRemoteClient {
    client: Client,
    endpoint: String,
    next_id: AtomicU64,
}

impl HttpRemoteClient {
    /// Create a client with default HTTP settings
    pub fn new(endpoint: &str) -> EdugateResult<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| EdugateError::config(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self::with_client(client, endpoint))
    }

    /// Create a client from a pre-configured `reqwest::Client`
    pub fn with_client(client: Client, endpoint: &str) -> Self {
        Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Turn a raw HTTP response into a result value
///
/// A body that is not JSON still reports the HTTP status when it is an error
/// status (gateways answer 502 with HTML).
fn parse_http_response(operation: &str, status: u16, body: &str) -> EdugateResult<Value> {
    match serde_json::from_str::<Value>(body) {
        Ok(value) => parse_rpc_response(operation, status, value),
        Err(_) if status >= 400 => Err(EdugateError::remote(format!(
            "{} HTTP {}: {}",
            operation,
            status,
            body.trim()
        ))),
        Err(e) => Err(EdugateError::remote(format!("{} parse error: {}", operation, e))),
    }
}

/// Turn a JSON-RPC response body into a result value
fn parse_rpc_response(operation: &str, status: u16, body: Value) -> EdugateResult<Value> {
    if let Some(error) = body.get("error") {
        let message = error
            .get("message")
            .and_then(|m| m.as_str())
            .unwrap_or("Unknown error");
        return Err(match error.get("code").and_then(|c| c.as_i64()) {
            Some(code) => EdugateError::remote(format!("{} failed ({}): {}", operation, code, message)),
            None => EdugateError::remote(format!("{} failed: {}", operation, message)),
        });
    }

    if status >= 400 {
        return Err(EdugateError::remote(format!(
            "{} HTTP {}: {}",
            operation, status, body
        )));
    }

    match body.get("result") {
        Some(result) => Ok(result.clone()),
        None => Err(EdugateError::remote(format!(
            "{} returned a response without result",
            operation
        ))),
    }
}

#[async_trait]
impl RemoteClient for HttpRemoteClient {
    async fn call(&self, operation: &str, params: Value) -> EdugateResult<Value> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": operation,
            "params": params,
        });

        debug!(operation = %operation, id = id, endpoint = %self.endpoint, "Sending remote request");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| EdugateError::remote(format!("Request failed: {}", e)))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| EdugateError::remote(format!("{} read error: {}", operation, e)))?;

        parse_http_response(operation, status, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_result() {
        let value = parse_rpc_response(
            "get_user",
            200,
            json!({"jsonrpc": "2.0", "id": 1, "result": {"username": "jane.doe"}}),
        )
        .unwrap();
        assert_eq!(value["username"], "jane.doe");
    }

    #[test]
    fn test_parse_rpc_error() {
        let err = parse_rpc_response(
            "get_user",
            200,
            json!({"jsonrpc": "2.0", "id": 1, "error": {"code": -32602, "message": "unknown user"}}),
        )
        .unwrap_err();
        let text = err.to_string();
        assert!(text.contains("get_user"));
        assert!(text.contains("unknown user"));
        assert!(text.contains("-32602"));
    }

    #[test]
    fn test_parse_http_error() {
        let err = parse_rpc_response("list_users", 503, json!({"status": "down"})).unwrap_err();
        assert!(matches!(err, EdugateError::Remote(_)));
        assert!(err.to_string().contains("HTTP 503"));
    }

    #[test]
    fn test_non_json_error_keeps_status() {
        let err = parse_http_response("list_users", 502, "<html>Bad Gateway</html>\n").unwrap_err();
        assert_eq!(err.to_string(), "Remote error: list_users HTTP 502: <html>Bad Gateway</html>");

        let err = parse_http_response("list_users", 200, "<html>ok</html>").unwrap_err();
        assert!(err.to_string().contains("list_users parse error"));

        let value = parse_http_response("list_users", 200, r#"{"jsonrpc": "2.0", "id": 3, "result": []}"#).unwrap();
        assert_eq!(value, json!([]));
    }

    #[test]
    fn test_parse_missing_result() {
        assert!(parse_rpc_response("list_users", 200, json!({"jsonrpc": "2.0", "id": 1})).is_err());
    }

    #[test]
    fn test_endpoint_trailing_slash() {
        let client = HttpRemoteClient::new("https://school.example/rpc/").unwrap();
        assert_eq!(client.endpoint(), "https://school.example/rpc");
    }
}
