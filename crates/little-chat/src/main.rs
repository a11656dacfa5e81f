//! Chat with an LLM served by an OpenAI-compatible API, GroqCloud by
//! default, from the terminal.

#[macro_use]
extern crate tracing;

use std::io::IsTerminal as _;

use little_chat::core::Session;
use little_chat::{Config, EXIT_COMMAND, Repl};
use little_chat_openai_model::{DEFAULT_MODEL, OpenAIProvider};
use tokio::io;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            println!("{err}");
            println!("Exiting program...");
            return;
        }
    };
    if config.uses_default_model() {
        println!(
            "No {} variable set. Defaulting to {DEFAULT_MODEL}",
            Config::MODEL_VAR
        );
    }
    debug!("starting with {config:?}");

    let model_provider = OpenAIProvider::new(config.to_openai_config());
    let session = Session::with_model_provider(model_provider);

    println!("Chat with your chosen LLM through GroqCloud!");
    println!("Type '{EXIT_COMMAND}' to quit the chat.");

    let stdin = io::BufReader::new(io::stdin());
    let mut stdout = std::io::stdout();
    let mut repl = Repl::new(session)
        .with_progress(true)
        .with_color(stdout.is_terminal());
    if let Err(err) = repl.run(stdin, &mut stdout).await {
        error!("error reading input: {}", err);
    }
}
