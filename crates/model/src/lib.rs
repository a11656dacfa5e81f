//! An abstraction layer for chat completion services.
//!
//! This crate establishes the protocol between the chat session and the
//! remote model it talks to, so that the session can be driven by a real
//! HTTP provider or by an in-process fake without changing its logic.
//!
//! Types in this crate don't define any behavior, instead they are the
//! constraints that the implementors should adhere to.

#![deny(missing_docs)]

mod error;
mod message;
mod provider;
mod request;
mod response;

pub use error::*;
pub use message::*;
pub use provider::*;
pub use request::*;
pub use response::*;
