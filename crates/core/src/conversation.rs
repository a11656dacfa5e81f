//! Conversation-related types.

use std::slice;

use little_chat_model::ModelMessage;

/// Represents a conversation, the ordered transcript of a session.
///
/// Messages are kept in the order they were appended, which is the order
/// they are sent to the model. The conversation never reorders, edits or
/// drops a message, and it doesn't check that user and assistant messages
/// alternate either.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct Conversation {
    items: Vec<ModelMessage>,
}

impl Conversation {
    /// Creates an empty conversation.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a message to the end of the conversation.
    #[inline]
    pub fn append(&mut self, msg: ModelMessage) {
        self.items.push(msg);
    }

    /// Returns all messages in conversation order.
    #[inline]
    pub fn snapshot(&self) -> &[ModelMessage] {
        &self.items
    }

    /// Returns the number of messages.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if nothing has been said yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the most recent message.
    #[inline]
    pub fn last(&self) -> Option<&ModelMessage> {
        self.items.last()
    }

    /// Iterates over the messages in conversation order.
    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, ModelMessage> {
        self.items.iter()
    }
}

impl<'a> IntoIterator for &'a Conversation {
    type Item = &'a ModelMessage;
    type IntoIter = slice::Iter<'a, ModelMessage>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
