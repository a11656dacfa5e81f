//! A model provider for OpenAI-compatible chat completion APIs.
//!
//! Every call sends the whole conversation in a single, non-streaming
//! `POST <base_url>/chat/completions` request and keeps the first choice
//! of the response.

#[macro_use]
extern crate tracing;

mod config;
mod proto;

use std::error::Error as StdError;
use std::fmt::{self, Display};
use std::sync::Arc;

use little_chat_model::{
    ErrorKind, ModelProvider, ModelProviderError, ModelReply, ModelRequest,
};
use mime::Mime;
use reqwest::{Client, header};

pub use config::{
    DEFAULT_BASE_URL, DEFAULT_MODEL, OpenAIConfig, OpenAIConfigBuilder,
};

/// Error type for [`OpenAIProvider`].
#[derive(Debug)]
pub struct Error {
    message: String,
    kind: ErrorKind,
    status: Option<u16>,
    body: Option<String>,
}

impl Error {
    fn new(message: impl Into<String>, kind: ErrorKind) -> Self {
        Self {
            message: message.into(),
            kind,
            status: None,
            body: None,
        }
    }

    fn from_status(status: u16, body: String) -> Self {
        Self {
            message: format!(
                "request failed with status code {status}: {body}"
            ),
            kind: ErrorKind::Status,
            status: Some(status),
            body: Some(body),
        }
    }

    /// Returns the error message.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the status code, if the service answered with a failure.
    #[inline]
    pub fn status(&self) -> Option<u16> {
        self.status
    }

    /// Returns the raw response body sent along with a failure status.
    #[inline]
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl StdError for Error {}

impl ModelProviderError for Error {
    #[inline]
    fn kind(&self) -> ErrorKind {
        self.kind
    }
}

/// OpenAI-compatible model provider.
#[derive(Clone, Debug)]
pub struct OpenAIProvider {
    client: Client,
    config: Arc<OpenAIConfig>,
}

impl OpenAIProvider {
    /// Creates a new `OpenAIProvider` with the given configuration.
    #[inline]
    pub fn new(config: OpenAIConfig) -> Self {
        Self {
            client: Client::new(),
            config: Arc::new(config),
        }
    }

    /// Returns the configuration of this provider.
    #[inline]
    pub fn config(&self) -> &OpenAIConfig {
        &self.config
    }
}

impl ModelProvider for OpenAIProvider {
    type Error = Error;

    fn send_request(
        &self,
        req: &ModelRequest,
    ) -> impl Future<Output = Result<ModelReply, Self::Error>> + Send + 'static
    {
        let openai_req = proto::create_request(req, &self.config);
        let client = self.client.clone();
        let config = Arc::clone(&self.config);

        async move {
            let payload = serde_json::to_vec(&openai_req).map_err(|err| {
                Error::new(
                    format!("failed to serialize request: {err}"),
                    ErrorKind::Serialization,
                )
            })?;

            let url = config.completions_url();
            debug!("posting {} bytes to {url}", payload.len());
            let resp = client
                .post(url)
                .header(
                    header::AUTHORIZATION,
                    format!("Bearer {}", config.api_key),
                )
                .header(header::CONTENT_TYPE, "application/json")
                .body(payload)
                .send()
                .await
                .map_err(|err| {
                    Error::new(format!("{err}"), ErrorKind::Transport)
                })?;

            let status = resp.status();
            let content_type = resp
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<Mime>().ok());
            let body = resp.text().await;

            if !status.is_success() {
                // An unreadable body still reports the status.
                let body = body.unwrap_or_else(|err| {
                    warn!("failed to read error body: {err}");
                    String::new()
                });
                return Err(Error::from_status(status.as_u16(), body));
            }

            let body = body.map_err(|err| {
                Error::new(
                    format!("failed to read response body: {err}"),
                    ErrorKind::Transport,
                )
            })?;
            trace!("got response ({status}): {body}");

            // A missing content type is tolerated, a wrong one is not.
            if let Some(content_type) = content_type {
                let is_json = content_type.subtype() == mime::JSON
                    || content_type.suffix() == Some(mime::JSON);
                if !is_json {
                    return Err(Error::new(
                        format!("unexpected content type: {content_type}"),
                        ErrorKind::Decode,
                    ));
                }
            }

            // Here we got a successful response.
            proto::parse_reply(&body).map_err(|err| {
                Error::new(
                    format!("failed to decode response: {err}"),
                    ErrorKind::Decode,
                )
            })
        }
    }
}
