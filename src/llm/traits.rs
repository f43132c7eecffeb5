use super::streaming::DeltaStream;
use super::types::ChatTurn;
use crate::error::LlmError;
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;

/// A structured-output request: the reply must conform to `schema`.
#[derive(Debug, Clone, Copy)]
pub struct StructuredRequest<'a> {
    pub model: &'a str,
    pub system_prompt: &'a str,
    pub user_prompt: &'a str,
    /// Name reported to the service for the schema.
    pub schema_name: &'a str,
    /// JSON Schema the assistant content must satisfy.
    pub schema: &'a Value,
}

/// The external completions service as seen by the verifier.
pub trait CompletionService: Send + Sync {
    /// Service identifier used in logs.
    fn name(&self) -> &str;

    /// Request schema-constrained output and return the raw assistant
    /// content. Decoding against the schema is left to the caller.
    fn complete_structured<'a>(
        &'a self,
        request: StructuredRequest<'a>,
    ) -> Pin<Box<dyn Future<Output = Result<String, LlmError>> + Send + 'a>>;

    /// Start a streamed chat completion over `history`.
    fn stream_chat<'a>(
        &'a self,
        model: &'a str,
        history: &'a [ChatTurn],
    ) -> Pin<Box<dyn Future<Output = Result<DeltaStream, LlmError>> + Send + 'a>>;
}
