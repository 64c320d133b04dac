//! HTTP Client Abstraction
//!
//! One request in, one response out. Status codes are not interpreted here;
//! the client only reports a failure to get a response at all.

use async_trait::async_trait;
use bytes::Bytes;
use serde::Serialize;

use crate::error::{BridgeError, Result};

/// Methods used by the photo-service REST APIs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// Outgoing request
///
/// Headers keep insertion order; a name may appear more than once.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Bytes>,
}

impl HttpRequest {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Serialize `body` as the JSON payload and set `Content-Type`.
    pub fn json<T: Serialize>(self, body: &T) -> Result<Self> {
        let payload = serde_json::to_vec(body)
            .map_err(|e| BridgeError::OperationFailed(format!("Cannot encode JSON body: {}", e)))?;

        let mut request = self.header("Content-Type", "application/json");
        request.body = Some(Bytes::from(payload));
        Ok(request)
    }

    /// First value of header `name`, compared case-insensitively.
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Response as received, whatever its status
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Bytes,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// 2xx
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body as text, with invalid UTF-8 replaced; used for error reports.
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Async HTTP client trait
///
/// Implementations send exactly one request per call. A response with any
/// status code is `Ok`; only failures to obtain a response at all
/// (connect, DNS, TLS, timeout) are reported as
/// [`BridgeError::Network`](crate::error::BridgeError::Network).
///
/// # Example
///
/// ```ignore
/// use bridge_traits::http::{HttpClient, HttpRequest, HttpMethod};
///
/// async fn album_count(client: &dyn HttpClient) -> Result<usize> {
///     let request = HttpRequest::new(HttpMethod::Get, "http://immich.local/api/albums")
///         .header("x-api-key", "secret");
///
///     let response = client.execute(request).await?;
///     Ok(serde_json::from_slice::<Vec<serde_json::Value>>(&response.body)?.len())
/// }
/// ```
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse>;
}
