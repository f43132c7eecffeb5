use crate::llm::ChatTurn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::Assistant,
            text: text.into(),
        }
    }

    fn to_turn(&self) -> ChatTurn {
        match self.sender {
            Sender::User => ChatTurn::user(self.text.clone()),
            Sender::Assistant => ChatTurn::assistant(self.text.clone()),
        }
    }
}

/// Append-only message log; only the last entry may be replaced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    /// Replace the trailing message wholesale. No-op on an empty transcript.
    pub fn replace_last(&mut self, message: ChatMessage) -> bool {
        match self.messages.last_mut() {
            Some(last) => {
                *last = message;
                true
            }
            None => false,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Conversation history for the service. With `include_placeholder`
    /// unset, a trailing empty assistant entry is left out.
    pub fn to_history(&self, include_placeholder: bool) -> Vec<ChatTurn> {
        let mut messages = self.messages.as_slice();
        if !include_placeholder
            && let Some((last, rest)) = messages.split_last()
            && last.sender == Sender::Assistant
            && last.text.is_empty()
        {
            messages = rest;
        }
        messages.iter().map(ChatMessage::to_turn).collect()
    }
}
