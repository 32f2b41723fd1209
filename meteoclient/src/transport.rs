//! Transport seam between the gateway and the network.
//!
//! The pipeline only ever sees [`WireRequest`]/[`WireResponse`]; the
//! production implementation wraps `reqwest`, tests substitute recording
//! stubs. Suspension happens at this boundary and nowhere else, so callers
//! can cancel a call by dropping its future.

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;

use meteo::error::GatewayError;

use crate::config::GatewayConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Get,
    Post,
    Put,
    Delete,
}

/// One outbound call, already encrypted where encryption applies.
#[derive(Debug, Clone)]
pub struct WireRequest {
    pub verb: Verb,
    /// Path relative to the base URL, e.g. `api/esdeveniments/7/meteo`.
    pub path: String,
    /// Full `Authorization` header value, when the endpoint is authenticated.
    pub bearer: Option<String>,
    /// Raw envelope string sent as `application/json; charset=utf-8`.
    pub body: Option<String>,
    /// Form fields, only used by login.
    pub form: Option<Vec<(&'static str, String)>>,
}

impl WireRequest {
    pub fn new(verb: Verb, path: impl Into<String>) -> Self {
        WireRequest {
            verb,
            path: path.into(),
            bearer: None,
            body: None,
            form: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct WireResponse {
    pub status: u16,
    pub body: String,
}

impl WireResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: WireRequest) -> Result<WireResponse, GatewayError>;
}

/// Production transport over `reqwest`, with the configured timeout applied to
/// every call.
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(config: &GatewayConfig) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GatewayError::Transport(format!("client setup failed: {}", e)))?;
        Ok(HttpTransport {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: WireRequest) -> Result<WireResponse, GatewayError> {
        let url = format!("{}/{}", self.base_url, request.path);
        let method = match request.verb {
            Verb::Get => Method::GET,
            Verb::Post => Method::POST,
            Verb::Put => Method::PUT,
            Verb::Delete => Method::DELETE,
        };

        let mut builder = self.client.request(method, url);
        if let Some(bearer) = request.bearer {
            builder = builder.header(AUTHORIZATION, bearer);
        }
        if let Some(form) = &request.form {
            builder = builder.form(form);
        }
        if let Some(body) = request.body {
            builder = builder
                .header(CONTENT_TYPE, "application/json; charset=utf-8")
                .body(body);
        }

        let response = builder.send().await.map_err(classify_transport)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(classify_transport)?;
        Ok(WireResponse { status, body })
    }
}

fn classify_transport(err: reqwest::Error) -> GatewayError {
    if err.is_timeout() {
        GatewayError::Transport("request timed out".to_string())
    } else {
        GatewayError::Transport(err.to_string())
    }
}
