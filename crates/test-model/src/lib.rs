//! A local fake model for testing purpose.

mod preset;

use std::collections::VecDeque;
use std::error::Error as StdError;
use std::fmt::{self, Display, Formatter};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use little_chat_model::{
    ErrorKind, ModelMessage, ModelProvider, ModelProviderError, ModelReply,
    ModelRequest,
};
use tokio::time::sleep;

pub use preset::*;

/// Error type for [`TestModelProvider`], built from a scripted failure.
#[derive(Debug)]
pub struct Error {
    message: String,
    kind: ErrorKind,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl StdError for Error {}

impl ModelProviderError for Error {
    #[inline]
    fn kind(&self) -> ErrorKind {
        self.kind
    }
}

#[derive(Default)]
struct Script {
    responses: VecDeque<PresetResponse>,
    requests: Vec<ModelRequest>,
}

/// A local fake model for testing purpose.
///
/// Before sending requests, you need to setup the script, which is how the
/// model should respond. Presets are consumed one per request, in call
/// order. If the script runs out, an error will be returned.
///
/// Clones share the same script, so a test can keep a handle for
/// inspecting the received requests after moving the provider away.
///
/// # Note
///
/// This type is not optimized for production use, every request is copied
/// and kept. You should only use it for testing.
#[derive(Clone, Default)]
pub struct TestModelProvider {
    script: Arc<Mutex<Script>>,
    delay: Option<Duration>,
}

impl TestModelProvider {
    /// Creates a provider that answers with the given presets.
    #[inline]
    pub fn with_script(
        responses: impl IntoIterator<Item = PresetResponse>,
    ) -> Self {
        let provider = Self::default();
        for response in responses {
            provider.add_response(response);
        }
        provider
    }

    /// Appends a preset to the end of the script.
    #[inline]
    pub fn add_response(&self, preset: PresetResponse) {
        self.script().responses.push_back(preset);
    }

    /// Makes every response wait for `duration` before resolving.
    #[inline]
    pub fn set_delay(&mut self, duration: Duration) {
        self.delay = Some(duration);
    }

    /// Returns the requests received so far.
    pub fn requests(&self) -> Vec<ModelRequest> {
        self.script().requests.clone()
    }

    /// Returns the number of presets not consumed yet.
    pub fn remaining(&self) -> usize {
        self.script().responses.len()
    }

    fn script(&self) -> MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ModelProvider for TestModelProvider {
    type Error = crate::Error;

    fn send_request(
        &self,
        req: &ModelRequest,
    ) -> impl Future<Output = Result<ModelReply, Self::Error>> + Send + 'static
    {
        let result = {
            let mut script = self.script();
            script.requests.push(req.clone());
            match script.responses.pop_front() {
                Some(PresetResponse::Reply(text)) => {
                    Ok(ModelReply::Message(ModelMessage::assistant(text)))
                }
                Some(PresetResponse::Empty) => Ok(ModelReply::Empty),
                Some(PresetResponse::Failure(failure)) => Err(Error {
                    message: failure.message,
                    kind: failure.kind,
                }),
                None => Err(Error {
                    message: "no enough steps".to_owned(),
                    kind: ErrorKind::Other,
                }),
            }
        };
        let delay = self.delay;

        async move {
            if let Some(delay) = delay {
                sleep(delay).await;
            }
            result
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_send_request() {
        let provider = TestModelProvider::with_script([
            PresetResponse::reply("Hello, world!"),
            PresetResponse::Empty,
            PresetResponse::failure(ErrorKind::Transport, "connection refused"),
        ]);

        let mut req = ModelRequest {
            messages: vec![ModelMessage::user("Hi")],
        };
        let reply = provider.send_request(&req).await.unwrap();
        let reply = reply.into_message().unwrap();
        assert_eq!(reply.content(), "Hello, world!");

        req.messages.push(reply);
        req.messages.push(ModelMessage::user("Anything else?"));
        let reply = provider.send_request(&req).await.unwrap();
        assert_eq!(reply, ModelReply::Empty);

        let err = provider.send_request(&req).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert_eq!(err.to_string(), "connection refused");

        let err = provider.send_request(&req).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Other);

        let requests = provider.requests();
        assert_eq!(requests.len(), 4);
        assert_eq!(requests[0].messages.len(), 1);
        assert_eq!(requests[1].messages.len(), 3);
    }

    #[tokio::test]
    async fn test_delay() {
        let mut provider =
            TestModelProvider::with_script([PresetResponse::reply("late")]);
        provider.set_delay(Duration::from_millis(50));

        let req = ModelRequest::from_messages(&[ModelMessage::user("Hi")]);
        let started = tokio::time::Instant::now();
        let reply = provider.send_request(&req).await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(50));
        assert_eq!(reply.into_message().unwrap().content(), "late");
    }

    #[tokio::test]
    async fn test_clones_share_script() {
        let provider = TestModelProvider::default();
        let handle = provider.clone();
        handle.add_response(PresetResponse::reply("shared"));
        assert_eq!(provider.remaining(), 1);

        let req = ModelRequest::from_messages(&[ModelMessage::user("Hi")]);
        provider.send_request(&req).await.unwrap();
        assert_eq!(handle.remaining(), 0);
        assert_eq!(handle.requests(), vec![req]);
    }
}
