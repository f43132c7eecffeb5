//! Task/chat engine: turns a file link and claimed skills into verification
//! tasks, then keeps a streamed conversation with the verifier.

mod engine;
pub mod prompt;
pub mod schema;
mod sink;
mod task;
mod transcript;

pub use engine::{ChatEngine, EngineOptions, ExchangeOutcome};
pub use sink::{EngineEvent, EngineSink, NullEngineSink};
pub use task::{TaskPhase, VerificationTask};
pub use transcript::{ChatMessage, Sender, Transcript};
