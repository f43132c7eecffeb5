use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Serialize)]
pub(in crate::llm) struct Message<'a> {
    pub(in crate::llm) role: &'static str,
    pub(in crate::llm) content: &'a str,
}

#[derive(Debug, Serialize)]
pub(in crate::llm) struct StructuredChatRequest<'a> {
    pub(in crate::llm) model: &'a str,
    pub(in crate::llm) messages: Vec<Message<'a>>,
    pub(in crate::llm) response_format: ResponseFormat<'a>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub(in crate::llm) enum ResponseFormat<'a> {
    JsonSchema { json_schema: JsonSchemaFormat<'a> },
}

#[derive(Debug, Serialize)]
pub(in crate::llm) struct JsonSchemaFormat<'a> {
    pub(in crate::llm) name: &'a str,
    pub(in crate::llm) strict: bool,
    pub(in crate::llm) schema: &'a Value,
}

#[derive(Debug, Serialize)]
pub(in crate::llm) struct StreamChatRequest<'a> {
    pub(in crate::llm) model: &'a str,
    pub(in crate::llm) messages: Vec<Message<'a>>,
    pub(in crate::llm) stream: bool,
}

#[derive(Debug, Deserialize)]
pub(in crate::llm) struct ChatResponse {
    pub(in crate::llm) choices: Vec<Choice>,
    pub(in crate::llm) model: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(in crate::llm) struct Choice {
    pub(in crate::llm) message: ResponseMessage,
    pub(in crate::llm) finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(in crate::llm) struct ResponseMessage {
    pub(in crate::llm) content: Option<String>,
    pub(in crate::llm) refusal: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(in crate::llm) struct ChatCompletionChunk {
    pub(in crate::llm) choices: Vec<ChunkChoice>,
}

#[derive(Debug, Deserialize)]
pub(in crate::llm) struct ChunkChoice {
    pub(in crate::llm) delta: ChunkDelta,
}

#[derive(Debug, Deserialize)]
pub(in crate::llm) struct ChunkDelta {
    pub(in crate::llm) content: Option<String>,
}
