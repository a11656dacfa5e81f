//! A terminal chat client for OpenAI-compatible completion services.
//!
//! The crate includes a CLI tool for using in the terminal. The REPL and
//! configuration types are exposed as a library as well, so the chat loop
//! can be driven by other inputs and outputs.

#![deny(missing_docs)]

#[macro_use]
extern crate tracing;

mod config;
mod repl;

pub use config::{Config, ConfigError};
pub use repl::{EXIT_COMMAND, Repl};

/// Re-exports of [`little_chat_core`] crate.
pub mod core {
    pub use little_chat_core::*;
}
