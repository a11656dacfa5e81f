use little_chat_model::ErrorKind;
use serde::{Deserialize, Serialize};

/// How the test model answers one request.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum PresetResponse {
    /// Reply with an assistant message.
    #[serde(rename = "reply")]
    Reply(String),
    /// Succeed without any candidate.
    #[serde(rename = "empty")]
    Empty,
    /// Fail with an error of the given kind.
    #[serde(rename = "failure")]
    Failure(PresetFailure),
}

impl PresetResponse {
    /// Creates a reply preset.
    #[inline]
    pub fn reply<S: Into<String>>(text: S) -> Self {
        Self::Reply(text.into())
    }

    /// Creates a failure preset.
    #[inline]
    pub fn failure<S: Into<String>>(kind: ErrorKind, message: S) -> Self {
        Self::Failure(PresetFailure {
            kind,
            message: message.into(),
        })
    }
}

/// A scripted failure.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PresetFailure {
    /// The kind reported by the error.
    pub kind: ErrorKind,
    /// The error message.
    pub message: String,
}
