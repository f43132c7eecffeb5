//! Three-step linear workflow: file link → skillset selection → chat.
//!
//! Every status and visibility flag is derived from the gate booleans held
//! by [`WorkflowState`]; nothing else stores step state.

mod state;
mod step;

pub use state::WorkflowState;
pub use step::{Step, StepStatus};
