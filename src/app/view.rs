use crate::catalog::SkillCategory;
use crate::ui::style;
use crate::verifier::{
    ChatMessage, EngineEvent, EngineSink, Sender, TaskPhase, VerificationTask,
};
use crate::workflow::{Step, WorkflowState};
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, PoisonError};
use strum::IntoEnumIterator;

fn step_body(state: &WorkflowState, step: Step) -> Vec<String> {
    match step {
        Step::FileLink if state.file_link_confirmed() => {
            vec![format!("Added File: {}", style::url(state.file_link()))]
        }
        Step::FileLink => vec![style::dim("Paste the Figma file link to begin.")],
        Step::Skillsets => {
            let mut lines = vec![format!("Added File: {}", style::url(state.file_link()))];
            for category in SkillCategory::iter() {
                lines.push(style::accent(category.heading()));
                for skill in category.skills() {
                    let mark = if state.is_selected(skill) { "[x]" } else { "[ ]" };
                    lines.push(format!("  {mark} {skill}"));
                }
            }
            if !state.skills_confirmed() {
                lines.push(style::dim(state.submit_skills_label()));
            }
            lines
        }
        Step::Chat => vec![style::dim(
            "Commands: /tasks shows the task list, /done <n> marks task n complete, /quit ends.",
        )],
    }
}

/// All three step panels in order, each with its body when expanded.
pub fn render_workflow(state: &WorkflowState) -> String {
    Step::iter()
        .enumerate()
        .map(|(index, step)| {
            format!(
                "{} {}",
                style::accent(format!("[{}/3]", index + 1)),
                state.panel(step).render(&step_body(state, step))
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_task_sidebar(phase: TaskPhase, tasks: &[VerificationTask]) -> String {
    let mut lines = vec![style::header("Tasks")];
    match phase {
        TaskPhase::Loading => lines.push(style::yellow(phase)),
        _ if tasks.is_empty() => lines.push(style::dim("No tasks available.")),
        _ => {
            for (index, task) in tasks.iter().enumerate() {
                let line = format!("{}. {}", index + 1, task.title);
                lines.push(if task.completed {
                    format!("{} {}", style::success("✓"), style::dim(line))
                } else {
                    format!("  {line}")
                });
            }
        }
    }
    lines.join("\n")
}

fn speaker(sender: Sender) -> String {
    match sender {
        Sender::User => style::accent("You:"),
        Sender::Assistant => style::accent("Verifier:"),
    }
}

/// Prints transcript updates as they arrive: appended messages in full,
/// replacements as the suffix beyond what is already on screen.
pub struct CliEngineSink {
    writer: Arc<dyn Fn(&str) + Send + Sync>,
    shown: Mutex<String>,
}

impl CliEngineSink {
    pub fn new() -> Self {
        Self {
            writer: Arc::new(|text| {
                print!("{text}");
                let _ = std::io::Write::flush(&mut std::io::stdout());
            }),
            shown: Mutex::new(String::new()),
        }
    }

    #[cfg(test)]
    fn with_writer(writer: Arc<dyn Fn(&str) + Send + Sync>) -> Self {
        Self {
            writer,
            shown: Mutex::new(String::new()),
        }
    }

    fn write(&self, message: &ChatMessage) {
        let mut shown = self.shown.lock().unwrap_or_else(PoisonError::into_inner);
        match message.text.strip_prefix(shown.as_str()) {
            Some(suffix) => (self.writer)(suffix),
            None => (self.writer)(&format!("\n{}", message.text)),
        }
        shown.clone_from(&message.text);
    }
}

impl Default for CliEngineSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineSink for CliEngineSink {
    fn on_event<'a>(
        &'a self,
        event: &'a EngineEvent,
    ) -> Pin<Box<dyn Future<Output = ()> + Send + 'a>> {
        Box::pin(async move {
            match event {
                // The user's own line is already on screen.
                EngineEvent::MessageAppended { message } if message.sender == Sender::User => {}
                EngineEvent::MessageAppended { message } => {
                    self.shown
                        .lock()
                        .unwrap_or_else(PoisonError::into_inner)
                        .clear();
                    (self.writer)(&format!("\n{} ", speaker(message.sender)));
                    self.write(message);
                }
                EngineEvent::LastMessageReplaced { message } => self.write(message),
                EngineEvent::TasksReady { .. }
                | EngineEvent::TasksFailed
                | EngineEvent::TaskCompleted { .. } => {}
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capture() -> (CliEngineSink, Arc<Mutex<String>>) {
        console::set_colors_enabled(false);
        let out = Arc::new(Mutex::new(String::new()));
        let sink_out = out.clone();
        let sink = CliEngineSink::with_writer(Arc::new(move |text| {
            sink_out.lock().unwrap().push_str(text);
        }));
        (sink, out)
    }

    #[tokio::test]
    async fn streamed_replacements_print_only_new_text() {
        let (sink, out) = capture();
        for event in [
            EngineEvent::MessageAppended {
                message: ChatMessage::user("hi"),
            },
            EngineEvent::MessageAppended {
                message: ChatMessage::assistant(""),
            },
            EngineEvent::LastMessageReplaced {
                message: ChatMessage::assistant("Hel"),
            },
            EngineEvent::LastMessageReplaced {
                message: ChatMessage::assistant("Hello"),
            },
        ] {
            sink.on_event(&event).await;
        }
        assert_eq!(out.lock().unwrap().clone(), "\nVerifier: Hello");
    }

    #[tokio::test]
    async fn non_extending_replacement_reprints_on_new_line() {
        let (sink, out) = capture();
        sink.on_event(&EngineEvent::MessageAppended {
            message: ChatMessage::assistant(""),
        })
        .await;
        sink.on_event(&EngineEvent::LastMessageReplaced {
            message: ChatMessage::assistant("Hel"),
        })
        .await;
        sink.on_event(&EngineEvent::LastMessageReplaced {
            message: ChatMessage::assistant("Something went wrong"),
        })
        .await;
        assert_eq!(
            out.lock().unwrap().clone(),
            "\nVerifier: Hel\nSomething went wrong"
        );
    }

    #[test]
    fn sidebar_shows_loading_indicator() {
        console::set_colors_enabled(false);
        let rendered = render_task_sidebar(TaskPhase::Loading, &[]);
        assert!(rendered.contains("Loading tasks..."));
    }

    #[test]
    fn sidebar_marks_completed_tasks() {
        console::set_colors_enabled(false);
        let mut done = VerificationTask::new("t1", "Task A", "Desc A");
        done.mark_completed();
        let open = VerificationTask::new("t2", "Task B", "Desc B");
        let rendered = render_task_sidebar(TaskPhase::Ready, &[done, open]);
        assert!(rendered.contains("✓ 1. Task A"));
        assert!(rendered.contains("  2. Task B"));
    }

    #[test]
    fn sidebar_without_tasks_says_so() {
        console::set_colors_enabled(false);
        let rendered = render_task_sidebar(TaskPhase::Failed, &[]);
        assert!(rendered.contains("No tasks available."));
    }

    #[test]
    fn workflow_view_hides_locked_bodies() {
        console::set_colors_enabled(false);
        let state = WorkflowState::new();
        let rendered = render_workflow(&state);
        assert!(rendered.contains("[1/3] Figma File (In Progress) ▲"));
        assert!(rendered.contains("Skillset Selection (Locked) ▼"));
        assert!(!rendered.contains("UI Skillsets"));
    }

    #[test]
    fn workflow_view_lists_skills_once_unlocked() {
        console::set_colors_enabled(false);
        let mut state = WorkflowState::new();
        state.set_file_link("https://figma.com/file/abc").unwrap();
        state.submit_file_link().unwrap();
        state.toggle_skill("Typography").unwrap();
        let rendered = render_workflow(&state);
        assert!(rendered.contains("UI Skillsets"));
        assert!(rendered.contains("\n  Added File: https://figma.com/file/abc"));
        assert!(rendered.contains("[x] Typography"));
        assert!(rendered.contains("[ ] Interaction Design"));
        assert!(rendered.contains("Submit Skillsets (1)"));
    }
}
