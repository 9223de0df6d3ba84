//! Transport trait and request envelope helpers.
//!
//! A [`Transport`] issues exactly one request per call: no retries, no
//! timeout, no caching. Adapters decide how the request travels (HTTP, an
//! in-process simulator) but must all report failures as [`ApiError`].
//!
//! ```text
//!   ApiRequest ──→ Transport::call() ──→ serde_json::Value ──→ fetch_list / fetch_one
//!                   (async, 1 attempt)     ({ data: ... })        (typed unwrap)
//! ```

use std::fmt;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ApiError, ApiResult};

/// HTTP method of a registrar request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One request against the registrar API.
///
/// `path` is relative to the API base (`/students/4`). Query parameters are
/// kept unencoded; the transport is responsible for percent-encoding them.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    /// Create a request without query or body.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::Post, path).with_body(body)
    }

    pub fn put(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::Put, path).with_body(body)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::Patch, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// Attach a JSON body.
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Append a query parameter.
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Look up a query parameter by key.
    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl fmt::Display for ApiRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path)?;
        for (i, (key, value)) in self.query.iter().enumerate() {
            let sep = if i == 0 { '?' } else { '&' };
            write!(f, "{sep}{key}={value}")?;
        }
        Ok(())
    }
}

/// Request/response seam between the client core and the registrar service.
///
/// # Contract
///
/// - One attempt per call; implementations MUST NOT retry.
/// - Request bodies are JSON; responses are returned as parsed JSON
///   (`Value::Null` for an empty body).
/// - Non-success statuses MUST become [`ApiError::Status`] carrying the
///   server's `message` when present, else `Error <status>`.
/// - Requests that never reach the server MUST become [`ApiError::Network`].
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue a single request and return the parsed JSON payload.
    async fn call(&self, request: ApiRequest) -> ApiResult<Value>;
}

/// Response wrapper used by every registrar read endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
}

fn unwrap_envelope<T: DeserializeOwned>(payload: Value) -> ApiResult<Option<T>> {
    if payload.is_null() {
        return Ok(None);
    }
    let envelope: Envelope<T> = serde_json::from_value(payload)?;
    Ok(envelope.data)
}

/// GET a collection endpoint; absent or null `data` is an empty list.
pub async fn fetch_list<T: DeserializeOwned>(
    transport: &dyn Transport,
    path: &str,
) -> ApiResult<Vec<T>> {
    let payload = transport.call(ApiRequest::get(path)).await?;
    Ok(unwrap_envelope(payload)?.unwrap_or_default())
}

/// GET a single-record endpoint; absent `data` is a decode failure.
pub async fn fetch_one<T: DeserializeOwned>(transport: &dyn Transport, path: &str) -> ApiResult<T> {
    let payload = transport.call(ApiRequest::get(path)).await?;
    unwrap_envelope(payload)?
        .ok_or_else(|| ApiError::Decode(format!("response to GET {path} carried no data")))
}

/// Serialize `body` and send it with `method` (POST or PUT).
pub async fn send_json<B: Serialize + ?Sized>(
    transport: &dyn Transport,
    method: Method,
    path: &str,
    body: &B,
) -> ApiResult<Value> {
    let body = serde_json::to_value(body)?;
    transport
        .call(ApiRequest::new(method, path).with_body(body))
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Mutex;

    /// Replays a fixed payload and remembers the last request.
    struct Fixed {
        reply: ApiResult<Value>,
        seen: Mutex<Option<ApiRequest>>,
    }

    impl Fixed {
        fn new(reply: ApiResult<Value>) -> Self {
            Self {
                reply,
                seen: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl Transport for Fixed {
        async fn call(&self, request: ApiRequest) -> ApiResult<Value> {
            *self.seen.lock().unwrap() = Some(request);
            self.reply.clone()
        }
    }

    #[test]
    fn test_request_display_includes_query() {
        let request = ApiRequest::patch("/enrollments/4/grade").with_query("grade", "A+");
        assert_eq!(request.to_string(), "PATCH /enrollments/4/grade?grade=A+");
        assert_eq!(request.query_param("grade"), Some("A+"));
        assert_eq!(request.query_param("status"), None);
    }

    #[tokio::test]
    async fn test_fetch_list_unwraps_data() {
        let transport = Fixed::new(Ok(json!({"success": true, "data": [1, 2, 3]})));
        let items: Vec<u32> = fetch_list(&transport, "/numbers").await.unwrap();
        assert_eq!(items, vec![1, 2, 3]);
        let seen = transport.seen.lock().unwrap().clone().unwrap();
        assert_eq!(seen.method, Method::Get);
        assert_eq!(seen.path, "/numbers");
    }

    #[tokio::test]
    async fn test_fetch_list_treats_missing_data_as_empty() {
        let transport = Fixed::new(Ok(json!({"success": true, "data": null})));
        let items: Vec<u32> = fetch_list(&transport, "/numbers").await.unwrap();
        assert!(items.is_empty());

        let transport = Fixed::new(Ok(Value::Null));
        let items: Vec<u32> = fetch_list(&transport, "/numbers").await.unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_one_requires_data() {
        let transport = Fixed::new(Ok(json!({"message": "ok"})));
        let err = fetch_one::<u32>(&transport, "/numbers/1").await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[tokio::test]
    async fn test_fetch_list_rejects_wrong_shape() {
        let transport = Fixed::new(Ok(json!({"data": {"not": "a list"}})));
        let err = fetch_list::<u32>(&transport, "/numbers").await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[tokio::test]
    async fn test_errors_pass_through() {
        let transport = Fixed::new(Err(ApiError::from_status(404, r#"{"message":"gone"}"#)));
        let err = fetch_list::<u32>(&transport, "/numbers").await.unwrap_err();
        assert_eq!(err.to_string(), "gone");
    }

    #[tokio::test]
    async fn test_send_json_serializes_body() {
        let transport = Fixed::new(Ok(Value::Null));
        send_json(&transport, Method::Post, "/things", &json!({"a": 1}))
            .await
            .unwrap();
        let seen = transport.seen.lock().unwrap().clone().unwrap();
        assert_eq!(seen.method, Method::Post);
        assert_eq!(seen.body, Some(json!({"a": 1})));
    }
}
