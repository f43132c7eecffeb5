// ── Infrastructure ───────────────────────────────────────────────────────────
pub mod http_client;
pub mod scrub;
pub mod sse;
pub mod streaming;
pub mod traits;
pub mod types;

// ── Provider implementations ────────────────────────────────────────────────
pub mod openai;

// ── Re-exports ──────────────────────────────────────────────────────────────
pub use streaming::DeltaStream;
pub use traits::{CompletionService, StructuredRequest};
pub use types::{ChatTurn, MessageRole};

pub use openai::OpenAiClient;
