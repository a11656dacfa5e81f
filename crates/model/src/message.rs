use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

/// The author of a message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// A message typed by the user.
    User,
    /// A reply produced by the model.
    Assistant,
}

impl Role {
    /// Returns the wire name of this role.
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A complete message in the conversation.
///
/// Messages are never modified after creation, the fields are only
/// exposed through accessors.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModelMessage {
    role: Role,
    content: String,
}

impl ModelMessage {
    /// Creates a message with the given role and content.
    #[inline]
    pub fn new<S: Into<String>>(role: Role, content: S) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Creates a user message.
    #[inline]
    pub fn user<S: Into<String>>(content: S) -> Self {
        Self::new(Role::User, content)
    }

    /// Creates an assistant message.
    #[inline]
    pub fn assistant<S: Into<String>>(content: S) -> Self {
        Self::new(Role::Assistant, content)
    }

    /// Returns the role of this message.
    #[inline]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Returns the text content of this message.
    #[inline]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Consumes the message and returns its text content.
    #[inline]
    pub fn into_content(self) -> String {
        self.content
    }
}
