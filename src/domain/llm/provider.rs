use async_trait::async_trait;

use super::{GenerateContentRequest, GenerateContentResponse};
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// A generative-text backend reachable with a single request/response call
#[cfg_attr(test, automock)]
#[async_trait]
pub trait GenerativeProvider: Send + Sync {
    /// Issue one `generateContent` call.
    ///
    /// Fails with [`DomainError::UpstreamTimeout`] when the configured deadline
    /// passes and with [`DomainError::Upstream`] for any other failure.
    async fn generate_content(
        &self,
        request: GenerateContentRequest,
    ) -> Result<GenerateContentResponse, DomainError>;
}
