//! Conversation history with per-turn compaction

use vnfin_llm::{Message, Role};

/// Ordered conversation history behind a fixed system prompt
///
/// The system prompt is sent separately from the message list, so it
/// survives [`reset`](Self::reset).
#[derive(Debug, Clone)]
pub struct ConversationMemory {
    system_prompt: String,
    messages: Vec<Message>,
}

impl ConversationMemory {
    /// Empty history with the given system prompt
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            messages: Vec::new(),
        }
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
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

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Drop everything after the first `len` messages
    pub fn truncate(&mut self, len: usize) {
        self.messages.truncate(len);
    }

    /// Collapse a finished turn
    ///
    /// `user_index` is the position of the turn's user message. Every
    /// message after it is replaced by `final_answer`.
    pub fn compact_turn(&mut self, user_index: usize, final_answer: Message) {
        debug_assert!(
            self.messages
                .get(user_index)
                .is_some_and(|m| m.role == Role::User)
        );
        let dropped = self.messages.len().saturating_sub(user_index + 1);
        self.messages.truncate(user_index + 1);
        self.messages.push(final_answer);
        tracing::debug!(
            dropped,
            history_len = self.messages.len(),
            "Compacted conversation turn"
        );
    }

    /// Forget the conversation, keeping the system prompt
    pub fn reset(&mut self) {
        self.messages.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compact_turn_keeps_user_and_final() {
        let mut memory = ConversationMemory::new("sys");
        memory.push(Message::user("q0"));
        memory.push(Message::assistant("a0"));

        let start = memory.len();
        memory.push(Message::user("q1"));
        memory.push(Message::assistant("calling tool"));
        memory.push(Message::tool_result("t1", "data"));
        memory.push(Message::assistant("calling another"));
        memory.push(Message::tool_result("t2", "more"));

        memory.compact_turn(start, Message::assistant("a1"));

        let texts: Vec<_> = memory.messages().iter().filter_map(Message::text).collect();
        assert_eq!(texts, ["q0", "a0", "q1", "a1"]);
    }

    #[test]
    fn test_reset_keeps_system_prompt() {
        let mut memory = ConversationMemory::new("Bạn là chuyên gia tài chính");
        memory.push(Message::user("hi"));
        memory.reset();
        assert!(memory.is_empty());
        assert_eq!(memory.system_prompt(), "Bạn là chuyên gia tài chính");
    }

    #[test]
    fn test_truncate_rolls_back() {
        let mut memory = ConversationMemory::new("sys");
        memory.push(Message::user("q0"));
        memory.push(Message::assistant("a0"));
        memory.push(Message::user("q1"));
        memory.truncate(2);
        assert_eq!(memory.len(), 2);
    }
}
