//! Core logic including the conversation transcript and the turn loop.

#![deny(missing_docs)]

#[macro_use]
extern crate tracing;

pub mod conversation;
mod model_client;
mod session;

pub use conversation::Conversation;
pub use model_client::ModelClient;
pub use session::{Session, Turn};
