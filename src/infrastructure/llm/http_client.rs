use async_trait::async_trait;

use crate::domain::DomainError;

/// Largest response body accepted from an upstream provider (1 MiB)
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

/// Longest upstream error body kept in an error message
const MAX_ERROR_BODY_BYTES: usize = 4 * 1024;

/// Trait for HTTP client operations (for mocking)
#[async_trait]
pub trait HttpClientTrait: Send + Sync + std::fmt::Debug {
    async fn post_json(
        &self,
        url: &str,
        headers: Vec<(&str, &str)>,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, DomainError>;
}

/// Real HTTP client using reqwest
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    max_body_bytes: usize,
}

impl HttpClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }

    pub fn with_max_body_bytes(mut self, max_body_bytes: usize) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }

    fn check_body_size(&self, size: usize) -> Result<(), DomainError> {
        if size > self.max_body_bytes {
            return Err(DomainError::upstream(
                "http",
                format!(
                    "Response body of {} bytes exceeds limit of {} bytes",
                    size, self.max_body_bytes
                ),
            ));
        }

        Ok(())
    }

    /// Read the body chunk by chunk, failing as soon as it outgrows the limit
    async fn read_body(&self, mut response: reqwest::Response) -> Result<Vec<u8>, DomainError> {
        if let Some(length) = response.content_length() {
            self.check_body_size(length as usize)?;
        }

        let mut body = Vec::new();

        while let Some(chunk) = response.chunk().await.map_err(|e| {
            DomainError::upstream("http", format!("Failed to read response: {}", e.without_url()))
        })? {
            self.check_body_size(body.len() + chunk.len())?;
            body.extend_from_slice(&chunk);
        }

        Ok(body)
    }
}

/// Leading part of an error body, for diagnostics only
async fn read_error_snippet(mut response: reqwest::Response) -> String {
    let mut body = Vec::new();

    while body.len() < MAX_ERROR_BODY_BYTES {
        match response.chunk().await {
            Ok(Some(chunk)) => body.extend_from_slice(&chunk),
            _ => break,
        }
    }

    body.truncate(MAX_ERROR_BODY_BYTES);
    String::from_utf8_lossy(&body).into_owned()
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClientTrait for HttpClient {
    async fn post_json(
        &self,
        url: &str,
        headers: Vec<(&str, &str)>,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, DomainError> {
        let mut request = self.client.post(url);

        for (key, value) in headers {
            request = request.header(key, value);
        }

        let response = request
            .json(body)
            .send()
            .await
            .map_err(|e| {
                DomainError::upstream("http", format!("Request failed: {}", e.without_url()))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = read_error_snippet(response).await;
            return Err(DomainError::upstream(
                "http",
                format!("HTTP {}: {}", status, error_body),
            ));
        }

        let bytes = self.read_body(response).await?;

        serde_json::from_slice(&bytes)
            .map_err(|e| DomainError::upstream("http", format!("Failed to parse response: {}", e)))
    }
}
