use super::step::{Step, StepStatus};
use crate::catalog;
use crate::error::WorkflowError;
use crate::ui::panel::Panel;
use std::collections::BTreeSet;
use tracing::info;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Gate {
    completed: bool,
    collapsed: bool,
}

/// Session-scoped state of the three-step form.
///
/// For the chat step, `completed` on its gate means "unlocked".
#[derive(Debug, Clone, Default)]
pub struct WorkflowState {
    file_link: String,
    selected_skills: BTreeSet<String>,
    file_link_gate: Gate,
    skills_gate: Gate,
    chat_gate: Gate,
}

impl WorkflowState {
    pub fn new() -> Self {
        Self::default()
    }

    fn gate(&self, step: Step) -> Gate {
        match step {
            Step::FileLink => self.file_link_gate,
            Step::Skillsets => self.skills_gate,
            Step::Chat => self.chat_gate,
        }
    }

    fn gate_mut(&mut self, step: Step) -> &mut Gate {
        match step {
            Step::FileLink => &mut self.file_link_gate,
            Step::Skillsets => &mut self.skills_gate,
            Step::Chat => &mut self.chat_gate,
        }
    }

    // ── Read side ───────────────────────────────────────────────────────

    pub fn file_link(&self) -> &str {
        &self.file_link
    }

    pub fn file_link_confirmed(&self) -> bool {
        self.file_link_gate.completed
    }

    pub fn selected_skills(&self) -> &BTreeSet<String> {
        &self.selected_skills
    }

    /// Selected skills ordered as the catalog lists them.
    pub fn selected_skills_in_catalog_order(&self) -> Vec<String> {
        catalog::all_skills()
            .map(|(_, skill)| skill)
            .filter(|skill| self.selected_skills.contains(*skill))
            .map(str::to_string)
            .collect()
    }

    pub fn is_selected(&self, skill: &str) -> bool {
        self.selected_skills.contains(skill)
    }

    pub fn skills_confirmed(&self) -> bool {
        self.skills_gate.completed
    }

    pub fn chat_unlocked(&self) -> bool {
        self.chat_gate.completed
    }

    pub fn is_locked(&self, step: Step) -> bool {
        step.prerequisite()
            .is_some_and(|prerequisite| !self.gate(prerequisite).completed)
    }

    pub fn status(&self, step: Step) -> StepStatus {
        if self.is_locked(step) {
            StepStatus::Locked
        } else if step != Step::Chat && self.gate(step).completed {
            StepStatus::Completed
        } else {
            StepStatus::InProgress
        }
    }

    /// A locked step always reads as collapsed.
    pub fn is_collapsed(&self, step: Step) -> bool {
        self.is_locked(step) || self.gate(step).collapsed
    }

    pub fn can_submit_file_link(&self) -> bool {
        !self.file_link_gate.completed && !self.file_link.trim().is_empty()
    }

    pub fn can_submit_skills(&self) -> bool {
        !self.is_locked(Step::Skillsets)
            && !self.skills_gate.completed
            && !self.selected_skills.is_empty()
    }

    pub fn submit_skills_label(&self) -> String {
        format!("Submit Skillsets ({})", self.selected_skills.len())
    }

    pub fn panel(&self, step: Step) -> Panel {
        Panel::new(
            step.to_string(),
            self.status(step).to_string(),
            self.is_collapsed(step),
        )
    }

    // ── User actions ────────────────────────────────────────────────────

    pub fn set_file_link(&mut self, text: impl Into<String>) -> Result<(), WorkflowError> {
        if self.file_link_gate.completed {
            return Err(WorkflowError::AlreadyCompleted(Step::FileLink));
        }
        self.file_link = text.into();
        Ok(())
    }

    pub fn submit_file_link(&mut self) -> Result<(), WorkflowError> {
        if self.file_link_gate.completed {
            return Err(WorkflowError::AlreadyCompleted(Step::FileLink));
        }
        let trimmed = self.file_link.trim();
        if trimmed.is_empty() {
            return Err(WorkflowError::EmptyFileLink);
        }
        self.file_link = trimmed.to_string();
        self.file_link_gate = Gate {
            completed: true,
            collapsed: true,
        };
        info!(file_link = %self.file_link, "file link submitted");
        Ok(())
    }

    /// Add `skill` if absent, remove it if present.
    pub fn toggle_skill(&mut self, skill: &str) -> Result<(), WorkflowError> {
        if self.is_locked(Step::Skillsets) {
            return Err(WorkflowError::Locked(Step::Skillsets));
        }
        if self.skills_gate.completed {
            return Err(WorkflowError::AlreadyCompleted(Step::Skillsets));
        }
        if !catalog::is_known(skill) {
            return Err(WorkflowError::UnknownSkill(skill.to_string()));
        }
        if !self.selected_skills.remove(skill) {
            self.selected_skills.insert(skill.to_string());
        }
        Ok(())
    }

    pub fn submit_skills(&mut self) -> Result<(), WorkflowError> {
        if self.is_locked(Step::Skillsets) {
            return Err(WorkflowError::Locked(Step::Skillsets));
        }
        if self.skills_gate.completed {
            return Err(WorkflowError::AlreadyCompleted(Step::Skillsets));
        }
        if self.selected_skills.is_empty() {
            return Err(WorkflowError::NoSkillsSelected);
        }
        self.skills_gate = Gate {
            completed: true,
            collapsed: true,
        };
        self.chat_gate = Gate {
            completed: true,
            collapsed: false,
        };
        info!(
            skills = self.selected_skills.len(),
            "skillsets submitted, chat unlocked"
        );
        Ok(())
    }

    /// Flip a panel's collapse state. Locked steps ignore the toggle.
    pub fn toggle_collapsed(&mut self, step: Step) -> bool {
        if self.is_locked(step) {
            return false;
        }
        let gate = self.gate_mut(step);
        gate.collapsed = !gate.collapsed;
        true
    }
}
