//! HTTP client abstraction for provider API communication.
//!
//! This module provides a trait-based abstraction over HTTP clients,
//! enabling dependency injection and easy mocking in tests. The seam
//! also owns transport-level error classification: a deadline expiry is
//! reported as [`ProviderError::Timeout`], everything else as
//! [`ProviderError::Transport`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::error::ProviderError;

/// Raw result of an HTTP exchange, before any dialect-specific parsing.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body as text.
    pub body: String,
}

impl HttpResponse {
    /// True for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Trait for HTTP communication with provider APIs.
///
/// # Example
///
/// ```ignore
/// use howto::http_client::{HttpClient, ReqwestHttpClient};
///
/// let client = ReqwestHttpClient::new();
/// let response = client.post_json(
///     "https://api.example.com/endpoint",
///     &[("Content-Type", "application/json")],
///     &serde_json::json!({"key": "value"}),
///     std::time::Duration::from_secs(30),
/// ).await?;
/// ```
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Sends a POST request with a JSON body, bounded by `timeout`.
    ///
    /// Non-success statuses are not errors at this layer; the caller
    /// sees the status and body and classifies them per dialect.
    ///
    /// # Errors
    ///
    /// [`ProviderError::Timeout`] when the deadline elapses,
    /// [`ProviderError::Transport`] for any other send or read failure.
    async fn post_json(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: &serde_json::Value,
        timeout: Duration,
    ) -> Result<HttpResponse, ProviderError>;
}

/// HTTP client implementation using reqwest.
pub struct ReqwestHttpClient {
    client: Client,
}

impl ReqwestHttpClient {
    /// Creates a new HTTP client with default configuration.
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

impl Default for ReqwestHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

fn classify(err: reqwest::Error) -> ProviderError {
    if err.is_timeout() {
        ProviderError::Timeout
    } else {
        ProviderError::Transport(err)
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn post_json(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: &serde_json::Value,
        timeout: Duration,
    ) -> Result<HttpResponse, ProviderError> {
        let mut request = self.client.post(url).timeout(timeout);

        for (key, value) in headers {
            request = request.header(*key, *value);
        }

        let response = request.json(body).send().await.map_err(classify)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(classify)?;

        Ok(HttpResponse { status, body })
    }
}
