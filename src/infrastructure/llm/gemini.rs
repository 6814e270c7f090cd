use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use super::http_client::HttpClientTrait;
use crate::config::GeminiConfig;
use crate::domain::{
    DomainError, GenerateContentRequest, GenerateContentResponse, GenerativeProvider,
};
use crate::infrastructure::logging::redact_url_secrets;

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
pub const DEFAULT_GEMINI_TIMEOUT: Duration = Duration::from_millis(30_000);

const PROVIDER_NAME: &str = "gemini";

/// Gemini `generateContent` provider
///
/// Holds only immutable configuration, so one instance can serve any number
/// of concurrent requests.
#[derive(Debug)]
pub struct GeminiProvider<C: HttpClientTrait> {
    client: C,
    api_key: String,
    base_url: String,
    model: String,
    timeout: Duration,
}

impl<C: HttpClientTrait> GeminiProvider<C> {
    pub fn with_base_url(
        client: C,
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Self {
            client,
            api_key: api_key.into(),
            base_url,
            model: model.into(),
            timeout: DEFAULT_GEMINI_TIMEOUT,
        }
    }

    pub fn from_config(client: C, config: &GeminiConfig) -> Self {
        Self::with_base_url(client, &config.api_key, &config.model, &config.base_url)
            .with_timeout(config.timeout())
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn generate_content_url(&self) -> Result<String, DomainError> {
        let endpoint = format!("{}/{}:generateContent", self.base_url, self.model);

        reqwest::Url::parse_with_params(&endpoint, &[("key", self.api_key.as_str())])
            .map(String::from)
            .map_err(|e| {
                DomainError::upstream(PROVIDER_NAME, format!("Invalid endpoint URL: {}", e))
            })
    }

    fn headers(&self) -> Vec<(&str, &str)> {
        vec![("Content-Type", "application/json")]
    }

    fn parse_response(
        &self,
        json: serde_json::Value,
    ) -> Result<GenerateContentResponse, DomainError> {
        serde_json::from_value(json).map_err(|e| {
            DomainError::upstream(PROVIDER_NAME, format!("Failed to parse response: {}", e))
        })
    }
}

#[async_trait]
impl<C: HttpClientTrait> GenerativeProvider for GeminiProvider<C> {
    async fn generate_content(
        &self,
        request: GenerateContentRequest,
    ) -> Result<GenerateContentResponse, DomainError> {
        let url = self.generate_content_url()?;
        let body = serde_json::to_value(&request).map_err(|e| {
            DomainError::upstream(PROVIDER_NAME, format!("Failed to encode request: {}", e))
        })?;

        debug!(
            url = %redact_url_secrets(&url),
            model = %self.model,
            timeout_ms = self.timeout.as_millis() as u64,
            "Calling generateContent"
        );

        let call = self.client.post_json(&url, self.headers(), &body);

        // Dropping the call future on expiry abandons the in-flight request.
        let json = match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result?,
            Err(_) => {
                warn!(
                    model = %self.model,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "generateContent timed out"
                );
                return Err(DomainError::upstream_timeout(
                    PROVIDER_NAME,
                    self.timeout.as_millis() as u64,
                ));
            }
        };

        self.parse_response(json)
    }
}
