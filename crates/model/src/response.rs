use serde::{Deserialize, Serialize};

use crate::ModelMessage;

/// The outcome of a successful call to the model provider.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelReply {
    /// The first candidate message returned by the model.
    Message(ModelMessage),
    /// The call succeeded but the model returned no candidates.
    Empty,
}

impl ModelReply {
    /// Converts the reply into its message, if any.
    #[inline]
    pub fn into_message(self) -> Option<ModelMessage> {
        match self {
            Self::Message(msg) => Some(msg),
            Self::Empty => None,
        }
    }
}
