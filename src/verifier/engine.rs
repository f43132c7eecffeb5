use super::prompt::{
    CHAT_FAILED, TASK_FETCH_FAILED, VERIFIER_SYSTEM_PROMPT, compose_task_prompt, render_task_list,
};
use super::schema::{TASKS_SCHEMA_NAME, decode_tasks, tasks_schema};
use super::sink::{EngineEvent, EngineSink};
use super::task::{TaskPhase, VerificationTask};
use super::transcript::{ChatMessage, Transcript};
use crate::config::Config;
use crate::error::{EngineError, LlmError};
use crate::llm::{CompletionService, StructuredRequest};
use futures_util::StreamExt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

/// Models and wire options for one engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineOptions {
    pub task_model: String,
    pub chat_model: String,
    pub include_placeholder_turn: bool,
}

impl EngineOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            task_model: config.task_model.clone(),
            chat_model: config.chat_model.clone(),
            include_placeholder_turn: config.chat.include_placeholder_turn,
        }
    }
}

/// Result of a single [`ChatEngine::send`].
#[derive(Debug, Clone)]
pub enum ExchangeOutcome {
    /// Input was empty after trimming; nothing changed.
    Ignored,
    /// Stream finished; the full assistant reply.
    Replied(String),
    /// Transport or service failure; the placeholder now holds the failure text.
    Failed(LlmError),
}

#[derive(Debug)]
struct EngineState {
    initialized: bool,
    phase: TaskPhase,
    tasks: Vec<VerificationTask>,
    transcript: Transcript,
}

/// Clears the busy flag on drop, including when a send future is dropped mid-flight.
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Task list plus streamed conversation for one verification session.
pub struct ChatEngine {
    service: Arc<dyn CompletionService>,
    sink: Arc<dyn EngineSink>,
    options: EngineOptions,
    file_link: String,
    skills: Vec<String>,
    state: Mutex<EngineState>,
    busy: AtomicBool,
}

impl ChatEngine {
    pub fn new(
        service: Arc<dyn CompletionService>,
        sink: Arc<dyn EngineSink>,
        options: EngineOptions,
        file_link: impl Into<String>,
        skills: Vec<String>,
    ) -> Self {
        Self {
            service,
            sink,
            options,
            file_link: file_link.into(),
            skills,
            state: Mutex::new(EngineState {
                initialized: false,
                phase: TaskPhase::Loading,
                tasks: Vec::new(),
                transcript: Transcript::new(),
            }),
            busy: AtomicBool::new(false),
        }
    }

    fn lock(&self) -> MutexGuard<'_, EngineState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn acquire(&self) -> Result<BusyGuard<'_>, EngineError> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| BusyGuard(&self.busy))
            .map_err(|_| EngineError::Busy)
    }

    async fn emit(&self, event: EngineEvent) {
        self.sink.on_event(&event).await;
    }

    async fn append(&self, message: ChatMessage) {
        self.lock().transcript.push(message.clone());
        self.emit(EngineEvent::MessageAppended { message }).await;
    }

    async fn replace_last(&self, message: ChatMessage) {
        let replaced = self.lock().transcript.replace_last(message.clone());
        if replaced {
            self.emit(EngineEvent::LastMessageReplaced { message }).await;
        }
    }

    /// Fetch the initial tasks. Runs once; later calls return the current
    /// phase without touching the service.
    pub async fn initialize(&self) -> TaskPhase {
        let Ok(_busy) = self.acquire() else {
            return self.task_phase();
        };
        {
            let mut state = self.lock();
            if state.initialized {
                return state.phase;
            }
            state.initialized = true;
        }

        let prompt = compose_task_prompt(&self.file_link, &self.skills);
        let schema = tasks_schema();
        let request = StructuredRequest {
            model: &self.options.task_model,
            system_prompt: VERIFIER_SYSTEM_PROMPT,
            user_prompt: &prompt,
            schema_name: TASKS_SCHEMA_NAME,
            schema: &schema,
        };

        debug!(
            service = self.service.name(),
            model = %self.options.task_model,
            skills = self.skills.len(),
            "requesting verification tasks"
        );
        let fetched = match self.service.complete_structured(request).await {
            Ok(content) => decode_tasks(&content),
            Err(error) => Err(error),
        };

        match fetched {
            Ok(tasks) => {
                let count = tasks.len();
                let rendered = render_task_list(&tasks);
                {
                    let mut state = self.lock();
                    state.tasks = tasks;
                    state.phase = TaskPhase::Ready;
                }
                info!(count, "verification tasks ready");
                self.emit(EngineEvent::TasksReady { count }).await;
                self.append(ChatMessage::assistant(rendered)).await;
                TaskPhase::Ready
            }
            Err(error) => {
                warn!(
                    %error,
                    shape_mismatch = error.is_shape_mismatch(),
                    "task fetch failed"
                );
                self.lock().phase = TaskPhase::Failed;
                self.emit(EngineEvent::TasksFailed).await;
                self.append(ChatMessage::assistant(TASK_FETCH_FAILED)).await;
                TaskPhase::Failed
            }
        }
    }

    /// Send one user message and stream the reply into the transcript.
    pub async fn send(&self, text: &str) -> Result<ExchangeOutcome, EngineError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(ExchangeOutcome::Ignored);
        }

        let _busy = self.acquire()?;
        if !self.lock().initialized {
            return Err(EngineError::NotInitialized);
        }

        self.append(ChatMessage::user(text)).await;
        self.append(ChatMessage::assistant("")).await;
        let history = self
            .lock()
            .transcript
            .to_history(self.options.include_placeholder_turn);

        debug!(
            model = %self.options.chat_model,
            turns = history.len(),
            "sending chat exchange"
        );
        let streamed = match self
            .service
            .stream_chat(&self.options.chat_model, &history)
            .await
        {
            Ok(mut deltas) => {
                let mut buffer = String::new();
                loop {
                    match deltas.next().await {
                        Some(Ok(delta)) if delta.is_empty() => {}
                        Some(Ok(delta)) => {
                            buffer.push_str(&delta);
                            self.replace_last(ChatMessage::assistant(buffer.clone()))
                                .await;
                        }
                        Some(Err(error)) => break Err(error),
                        None => break Ok(buffer),
                    }
                }
            }
            Err(error) => Err(error),
        };

        match streamed {
            Ok(reply) => {
                info!(chars = reply.chars().count(), "chat exchange completed");
                Ok(ExchangeOutcome::Replied(reply))
            }
            Err(error) => {
                warn!(%error, "chat exchange failed");
                self.replace_last(ChatMessage::assistant(CHAT_FAILED)).await;
                Ok(ExchangeOutcome::Failed(error))
            }
        }
    }

    /// Mark a task complete. Returns `true` only on an incomplete-to-complete
    /// transition; unknown ids and repeats report `false`.
    pub async fn mark_task_completed(&self, id: &str) -> bool {
        let changed = self
            .lock()
            .tasks
            .iter_mut()
            .find(|task| task.id == id)
            .is_some_and(VerificationTask::mark_completed);
        if changed {
            info!(task = id, "task marked complete");
            self.emit(EngineEvent::TaskCompleted { id: id.to_string() })
                .await;
        }
        changed
    }

    pub fn tasks(&self) -> Vec<VerificationTask> {
        self.lock().tasks.clone()
    }

    pub fn transcript(&self) -> Transcript {
        self.lock().transcript.clone()
    }

    pub fn task_phase(&self) -> TaskPhase {
        self.lock().phase
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Sending is open once the task fetch has resolved and nothing is in flight.
    pub fn can_send(&self) -> bool {
        !self.is_busy() && self.lock().phase != TaskPhase::Loading
    }
}
