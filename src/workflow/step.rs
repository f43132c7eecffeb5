use strum::{Display, EnumIter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum Step {
    #[strum(to_string = "Figma File")]
    FileLink,
    #[strum(to_string = "Skillset Selection")]
    Skillsets,
    #[strum(to_string = "Chat Section")]
    Chat,
}

impl Step {
    /// The step that must be completed before this one becomes interactive.
    pub fn prerequisite(self) -> Option<Self> {
        match self {
            Self::FileLink => None,
            Self::Skillsets => Some(Self::FileLink),
            Self::Chat => Some(Self::Skillsets),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum StepStatus {
    #[strum(to_string = "Locked")]
    Locked,
    #[strum(to_string = "In Progress")]
    InProgress,
    #[strum(to_string = "Completed")]
    Completed,
}
