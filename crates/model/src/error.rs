use serde::{Deserialize, Serialize};

/// The kind of error that occurred.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The request payload could not be serialized.
    Serialization,
    /// The request never completed: connection refused, TLS failure,
    /// timeout, or the body could not be read.
    Transport,
    /// The service answered with a non-success status code.
    Status,
    /// The response body is not in the expected format.
    Decode,
    /// Any other errors.
    Other,
}
