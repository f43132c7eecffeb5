use crate::workflow::Step;
use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for `skillproof`.
///
/// Each subsystem defines its own error variant. Library callers can match on
/// these to decide recovery strategy; the binary continues to use
/// `anyhow::Result` for ad-hoc context chains.
#[derive(Debug, Error)]
pub enum SkillproofError {
    // ── Config ───────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── LLM / completions service ───────────────────────────────────────
    #[error("llm: {0}")]
    Llm(#[from] LlmError),

    // ── Step orchestration ──────────────────────────────────────────────
    #[error("workflow: {0}")]
    Workflow(#[from] WorkflowError),

    // ── Task/chat engine ────────────────────────────────────────────────
    #[error("engine: {0}")]
    Engine(#[from] EngineError),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error(
        "API key not set: add api_key to the config file or export SKILLPROOF_API_KEY / OPENAI_API_KEY"
    )]
    MissingApiKey,

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── LLM / completions service errors ───────────────────────────────────────

/// Failures talking to the completions service.
///
/// `Api`, `Refusal`, `EmptyResponse` and `Decode` mean the service answered
/// but did not deliver usable content. `Schema` means content arrived but did
/// not match the requested shape.
#[derive(Debug, Clone, Error)]
pub enum LlmError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("API key not set")]
    MissingApiKey,

    #[error("model refused the request: {0}")]
    Refusal(String),

    #[error("response contained no content")]
    EmptyResponse,

    #[error("response envelope could not be decoded: {0}")]
    Decode(String),

    #[error("response did not match the expected schema: {0}")]
    Schema(String),

    #[error("streaming error: {0}")]
    Streaming(String),
}

impl LlmError {
    /// True when content arrived but failed shape validation.
    pub fn is_shape_mismatch(&self) -> bool {
        matches!(self, Self::Schema(_))
    }
}

// ─── Workflow errors ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    #[error("step {0} is locked")]
    Locked(Step),

    #[error("step {0} is already completed")]
    AlreadyCompleted(Step),

    #[error("file link cannot be empty")]
    EmptyFileLink,

    #[error("select at least one skillset")]
    NoSkillsSelected,

    #[error("unknown skillset: {0}")]
    UnknownSkill(String),
}

// ─── Engine errors ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("another request is still in flight")]
    Busy,

    #[error("tasks have not been requested yet")]
    NotInitialized,
}

// ─── Convenience re-exports ─────────────────────────────────────────────────

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, SkillproofError>;
