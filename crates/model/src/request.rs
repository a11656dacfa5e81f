use crate::ModelMessage;

/// A request to be sent to the model provider.
///
/// The request is a snapshot of the conversation at call time. Providers
/// are stateless, so the whole history must be carried on every call.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ModelRequest {
    /// The input messages, in conversation order.
    pub messages: Vec<ModelMessage>,
}

impl ModelRequest {
    /// Creates a request from a slice of messages.
    #[inline]
    pub fn from_messages(messages: &[ModelMessage]) -> Self {
        Self {
            messages: messages.to_vec(),
        }
    }
}
