use crate::types::Message;

/// Message history for a single request. Append-only: earlier turns are
/// context the model has already seen and are never rewritten.
#[derive(Clone, Debug, Default)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    pub fn new(messages: Vec<Message>) -> Self {
        Self { messages }
    }

    /// Start from `history`, or from `system_prompt` alone when the caller
    /// has no history yet.
    pub fn resume_or_seed(history: Vec<Message>, system_prompt: &str) -> Self {
        let mut conversation = Self::new(history);
        if conversation.is_empty() {
            conversation.add_message(Message::system(system_prompt));
        }
        conversation
    }

    // Append one message
    pub fn add_message(&mut self, msg: Message) {
        self.messages.push(msg);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn into_messages(self) -> Vec<Message> {
        self.messages
    }
}
