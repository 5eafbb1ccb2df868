//! Completion provider abstraction.
//!
//! One trait seam between the pipeline and the external model API, so
//! handlers and tests never care which backend answers.

pub mod anthropic;
pub mod mock;

use async_trait::async_trait;
use service_core::error::AppError;
use thiserror::Error;

/// Error type for provider operations. Network failures, non-success
/// statuses, and error payloads embedded in success bodies all
/// normalize here; callers never see partially-parsed content.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("provider not configured: {0}")]
    NotConfigured(String),

    /// Upstream rejected the request; carries its message verbatim.
    #[error("{0}")]
    Api(String),

    #[error("network error: {0}")]
    Network(String),
}

impl From<ProviderError> for AppError {
    fn from(err: ProviderError) -> Self {
        AppError::UpstreamFailure(err.to_string())
    }
}

/// One item of a multi-part user payload. Images come before the
/// trailing text block.
#[derive(Debug, Clone)]
pub enum ContentPart {
    Image { media_type: String, data: Vec<u8> },
    Text(String),
}

#[derive(Debug, Clone)]
pub enum UserContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

/// A single round trip's worth of input.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub model: String,
    /// Persona system instructions.
    pub system: String,
    pub user_content: UserContent,
    /// Token ceiling for the phase: short for question generation,
    /// longer for the verdict narrative.
    pub max_tokens: u32,
}

/// Trait for text completion backends.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Perform exactly one request/response round trip and surface the
    /// raw completion text. No retries, no streaming, no caching.
    async fn complete(&self, request: CompletionRequest) -> Result<String, ProviderError>;
}
