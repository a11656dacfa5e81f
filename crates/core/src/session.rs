
use little_chat_model::{
    ModelMessage, ModelProvider, ModelProviderError, ModelReply, ModelRequest,
};

use crate::conversation::Conversation;
use crate::model_client::ModelClient;

/// The result of a turn that reached the model successfully.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Turn {
    /// The model replied, and the reply has been added to the conversation.
    Reply(ModelMessage),
    /// The model returned no candidates, nothing has been added.
    NoReply,
}

/// A chat session, holding the conversation and the model it talks to.
///
/// Turns are strictly sequential: `send_message` takes `&mut self`, so the
/// next message can't be sent before the previous exchange finishes.
pub struct Session {
    model_client: ModelClient,
    conversation: Conversation,
}

impl Session {
    /// Creates a session with an empty conversation.
    #[inline]
    pub fn with_model_provider<P: ModelProvider + 'static>(
        provider: P,
    ) -> Self {
        Self {
            model_client: ModelClient::new(provider),
            conversation: Conversation::new(),
        }
    }

    /// Runs one turn: records the user input, sends the whole conversation
    /// and records the reply.
    ///
    /// The user message stays in the conversation whatever the outcome, so
    /// the next turn resends it. On errors and empty replies nothing else is
    /// added.
    pub async fn send_message<S: Into<String>>(
        &mut self,
        input: S,
    ) -> Result<Turn, Box<dyn ModelProviderError>> {
        self.conversation.append(ModelMessage::user(input));
        let req = ModelRequest::from_messages(self.conversation.snapshot());
        debug!("sending turn with {} messages", req.messages.len());

        match self.model_client.send_request(req).await? {
            ModelReply::Message(msg) => {
                self.conversation.append(msg.clone());
                Ok(Turn::Reply(msg))
            }
            ModelReply::Empty => {
                warn!("model returned no candidates");
                Ok(Turn::NoReply)
            }
        }
    }

    /// Returns the conversation so far.
    #[inline]
    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }
}
