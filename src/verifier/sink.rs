use super::transcript::ChatMessage;
use std::future::Future;
use std::pin::Pin;

/// State changes published by [`ChatEngine`](super::ChatEngine), in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    TasksReady { count: usize },
    TasksFailed,
    MessageAppended { message: ChatMessage },
    LastMessageReplaced { message: ChatMessage },
    TaskCompleted { id: String },
}

pub trait EngineSink: Send + Sync {
    fn on_event<'a>(
        &'a self,
        event: &'a EngineEvent,
    ) -> Pin<Box<dyn Future<Output = ()> + Send + 'a>>;
}

#[derive(Debug, Default)]
pub struct NullEngineSink;

impl EngineSink for NullEngineSink {
    fn on_event<'a>(
        &'a self,
        _event: &'a EngineEvent,
    ) -> Pin<Box<dyn Future<Output = ()> + Send + 'a>> {
        Box::pin(async {})
    }
}
