//! Registrar REST adapter
//!
//! [`HttpTransport`] implements [`registrar_api::Transport`] on top of
//! `reqwest`. Every call is a single HTTP request with JSON `Accept` and
//! `Content-Type` headers; there are no retries and no client-side timeout.
//!
//! # Example
//!
//! ```ignore
//! use registrar_adapter_http::HttpTransport;
//! use registrar_api::{Course, fetch_list};
//!
//! let transport = HttpTransport::new("http://localhost:8080/api")?;
//! let courses: Vec<Course> = fetch_list(&transport, "/courses").await?;
//! ```

mod error;

pub use error::{HttpError, HttpResult};

use async_trait::async_trait;
use registrar_api::{ApiRequest, ApiResult, Method, Transport};
use reqwest::Client;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde_json::Value;
use tracing::{debug, instrument};

/// Base URL of a registrar server running locally with default settings.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

/// User agent string for registrar requests.
const USER_AGENT: &str = concat!("registrar-adapter-http/", env!("CARGO_PKG_VERSION"));

/// Transport that talks to a registrar server over HTTP.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    /// Create a transport for the given API base URL (`http://host:port/api`).
    pub fn new(base_url: impl Into<String>) -> HttpResult<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(HttpError::InvalidBaseUrl(base_url));
        }

        let client = Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self { client, base_url })
    }

    /// Create a transport for [`DEFAULT_BASE_URL`].
    pub fn local() -> HttpResult<Self> {
        Self::new(DEFAULT_BASE_URL)
    }

    /// The API base URL, without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    fn method(method: Method) -> reqwest::Method {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        }
    }

    /// Send one request and return the raw JSON payload.
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    pub async fn send(&self, request: ApiRequest) -> HttpResult<Value> {
        let url = self.url(&request.path);
        debug!("{} {}", request.method, url);

        let mut builder = self
            .client
            .request(Self::method(request.method), &url)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json");

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        self.handle_response(response).await
    }

    /// Extract JSON from a success response or the body of a failure.
    async fn handle_response(&self, response: reqwest::Response) -> HttpResult<Value> {
        let status = response.status();

        if status.is_success() {
            let text = response.text().await?;
            if text.trim().is_empty() {
                return Ok(Value::Null);
            }
            Ok(serde_json::from_str(&text)?)
        } else {
            let body = response.text().await.unwrap_or_default();
            debug!(status = status.as_u16(), "request failed");
            Err(HttpError::Status {
                status: status.as_u16(),
                body,
            })
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn call(&self, request: ApiRequest) -> ApiResult<Value> {
        Ok(self.send(request).await?)
    }
}
