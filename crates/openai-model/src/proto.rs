use little_chat_model::{ModelMessage, ModelReply, ModelRequest, Role};
use serde::{Deserialize, Serialize};

use crate::OpenAIConfig;

// ------------------------------
// Types received from the server
// ------------------------------

#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
pub struct ChatCompletion {
    pub choices: Vec<Choice>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
pub struct Choice {
    pub message: Message,
}

// ------------------------
// Types sent to the server
// ------------------------

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Message {
    User {
        content: String,
    },
    Assistant {
        // Some compatible servers send `null` content on empty replies.
        #[serde(default)]
        content: Option<String>,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChatCompletionRequest {
    model: String,
    messages: Vec<Message>,
}

// -----------
// Conversions
// -----------

#[inline]
pub fn create_request(
    req: &ModelRequest,
    config: &OpenAIConfig,
) -> ChatCompletionRequest {
    ChatCompletionRequest {
        model: config.model.clone(),
        messages: req.messages.iter().map(create_message).collect(),
    }
}

#[inline]
fn create_message(msg: &ModelMessage) -> Message {
    match msg.role() {
        Role::User => Message::User {
            content: msg.content().to_owned(),
        },
        Role::Assistant => Message::Assistant {
            content: Some(msg.content().to_owned()),
        },
    }
}

#[inline]
fn into_model_message(msg: Message) -> ModelMessage {
    match msg {
        Message::User { content } => ModelMessage::user(content),
        Message::Assistant { content } => {
            ModelMessage::assistant(content.unwrap_or_default())
        }
    }
}

/// Parses a successful response body, keeping only the first candidate.
pub fn parse_reply(body: &str) -> Result<ModelReply, serde_json::Error> {
    let completion = serde_json::from_str::<ChatCompletion>(body)?;
    let reply = match completion.choices.into_iter().next() {
        Some(choice) => ModelReply::Message(into_model_message(choice.message)),
        None => ModelReply::Empty,
    };
    Ok(reply)
}
