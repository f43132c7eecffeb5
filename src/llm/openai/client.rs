use super::stream::sse_response_to_delta_stream;
use super::types::{
    ChatResponse, JsonSchemaFormat, Message, ResponseFormat, StreamChatRequest,
    StructuredChatRequest,
};
use crate::config::Config;
use crate::error::{ConfigError, LlmError};
use crate::llm::http_client::build_http_client;
use crate::llm::scrub::{api_error, scrub_secret_patterns};
use crate::llm::streaming::DeltaStream;
use crate::llm::traits::{CompletionService, StructuredRequest};
use crate::llm::types::{ChatTurn, MessageRole};
use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;
use tracing::debug;

/// Client for an OpenAI-compatible `/chat/completions` endpoint.
pub struct OpenAiClient {
    base_url: String,
    /// Pre-computed `"Bearer <key>"` header value (avoids `format!` per request).
    cached_auth_header: Option<String>,
    /// Whole-exchange bound for the structured call. Streams are bounded
    /// per read by the client instead, so long replies are not cut off.
    request_timeout: Duration,
    client: Client,
}

impl OpenAiClient {
    pub fn new(base_url: &str, api_key: Option<&str>, timeout_secs: u64) -> Result<Self, LlmError> {
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            cached_auth_header: api_key
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(|k| format!("Bearer {k}")),
            request_timeout: Duration::from_secs(timeout_secs),
            client: build_http_client(timeout_secs)?,
        })
    }

    /// Build a client from config, failing fast when no API key is set.
    pub fn from_config(config: &Config) -> Result<Self, crate::error::SkillproofError> {
        let api_key = config.require_api_key()?;
        if config.base_url.trim().is_empty() {
            return Err(ConfigError::Validation("base_url cannot be empty".into()).into());
        }
        Ok(Self::new(
            &config.base_url,
            Some(api_key),
            config.request_timeout_secs,
        )?)
    }

    fn chat_completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    fn post<T: Serialize>(
        &self,
        body: &T,
        total_timeout: Option<Duration>,
    ) -> Result<RequestBuilder, LlmError> {
        let auth_header = self
            .cached_auth_header
            .as_ref()
            .ok_or(LlmError::MissingApiKey)?;

        let request = self
            .client
            .post(self.chat_completions_url())
            .header("Authorization", auth_header)
            .json(body);
        Ok(match total_timeout {
            Some(timeout) => request.timeout(timeout),
            None => request,
        })
    }

    async fn send_raw(request: RequestBuilder) -> Result<reqwest::Response, LlmError> {
        let response = request
            .send()
            .await
            .map_err(|error| {
                LlmError::Request(scrub_secret_patterns(&error.to_string()).into_owned())
            })?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        Ok(response)
    }

    pub async fn complete_structured_raw(
        &self,
        request: StructuredRequest<'_>,
    ) -> Result<String, LlmError> {
        let body = StructuredChatRequest {
            model: request.model,
            messages: vec![
                Message {
                    role: MessageRole::System.as_str(),
                    content: request.system_prompt,
                },
                Message {
                    role: MessageRole::User.as_str(),
                    content: request.user_prompt,
                },
            ],
            response_format: ResponseFormat::JsonSchema {
                json_schema: JsonSchemaFormat {
                    name: request.schema_name,
                    strict: true,
                    schema: request.schema,
                },
            },
        };

        debug!(model = request.model, "sending structured completion request");
        let response = Self::send_raw(self.post(&body, Some(self.request_timeout))?).await?;
        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|error| LlmError::Decode(error.to_string()))?;

        let choice = chat_response
            .choices
            .into_iter()
            .next()
            .ok_or(LlmError::EmptyResponse)?;

        if let Some(refusal) = choice.message.refusal {
            return Err(LlmError::Refusal(refusal));
        }
        if choice.finish_reason.as_deref() == Some("length") {
            return Err(LlmError::Schema(
                "output truncated before the structured result was complete".into(),
            ));
        }

        debug!(model = ?chat_response.model, "structured completion received");
        choice
            .message
            .content
            .filter(|content| !content.trim().is_empty())
            .ok_or(LlmError::EmptyResponse)
    }

    pub async fn stream_chat_raw(
        &self,
        model: &str,
        history: &[ChatTurn],
    ) -> Result<DeltaStream, LlmError> {
        let body = StreamChatRequest {
            model,
            messages: history
                .iter()
                .map(|turn| Message {
                    role: turn.role.as_str(),
                    content: &turn.content,
                })
                .collect(),
            stream: true,
        };

        debug!(model, turns = history.len(), "opening chat stream");
        let response = Self::send_raw(self.post(&body, None)?).await?;
        Ok(sse_response_to_delta_stream(response))
    }
}

impl CompletionService for OpenAiClient {
    fn name(&self) -> &str {
        "openai"
    }

    fn complete_structured<'a>(
        &'a self,
        request: StructuredRequest<'a>,
    ) -> Pin<Box<dyn Future<Output = Result<String, LlmError>> + Send + 'a>> {
        Box::pin(self.complete_structured_raw(request))
    }

    fn stream_chat<'a>(
        &'a self,
        model: &'a str,
        history: &'a [ChatTurn],
    ) -> Pin<Box<dyn Future<Output = Result<DeltaStream, LlmError>> + Send + 'a>> {
        Box::pin(self.stream_chat_raw(model, history))
    }
}
