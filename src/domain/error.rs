use thiserror::Error;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Upstream timeout: {provider} did not respond within {timeout_ms}ms")]
    UpstreamTimeout { provider: String, timeout_ms: u64 },

    #[error("Upstream error: {provider} - {message}")]
    Upstream { provider: String, message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl DomainError {
    pub fn upstream_timeout(provider: impl Into<String>, timeout_ms: u64) -> Self {
        Self::UpstreamTimeout {
            provider: provider.into(),
            timeout_ms,
        }
    }

    pub fn upstream(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Upstream {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Whether this error came from the generative provider call
    pub fn is_upstream(&self) -> bool {
        matches!(self, Self::UpstreamTimeout { .. } | Self::Upstream { .. })
    }
}
