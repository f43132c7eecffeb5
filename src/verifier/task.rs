use strum::Display;

/// A unit of work issued by the verifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationTask {
    pub id: String,
    pub title: String,
    pub description: String,
    pub completed: bool,
}

impl VerificationTask {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            completed: false,
        }
    }

    /// One-way transition; returns whether the task was newly completed.
    pub fn mark_completed(&mut self) -> bool {
        !std::mem::replace(&mut self.completed, true)
    }
}

/// Where the task sidebar stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum TaskPhase {
    #[strum(to_string = "Loading tasks...")]
    Loading,
    #[strum(to_string = "Ready")]
    Ready,
    #[strum(to_string = "Failed")]
    Failed,
}
