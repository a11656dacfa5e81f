use little_chat_model::{
    ErrorKind, ModelMessage, ModelProvider, ModelProviderError, ModelReply,
    ModelRequest,
};
use little_chat_openai_model::{OpenAIConfigBuilder, OpenAIProvider};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;

/// A one-shot HTTP server answering the first request with a canned
/// response, and handing the raw request back to the test.
struct TestServer {
    base_url: String,
    request_rx: oneshot::Receiver<String>,
}

impl TestServer {
    async fn start(status: &str, content_type: &str, body: &str) -> Self {
        let response = format!(
            "HTTP/1.1 {status}\r\n\
             Content-Type: {content_type}\r\n\
             Content-Length: {}\r\n\
             Connection: close\r\n\
             \r\n\
             {body}",
            body.len(),
        );
        Self::start_raw(response).await
    }

    /// Answers with `response` verbatim, then closes the connection.
    async fn start_raw(response: String) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (request_tx, request_rx) = oneshot::channel();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            request_tx.send(request).ok();
        });

        Self {
            base_url: format!("http://{addr}/openai/v1"),
            request_rx,
        }
    }

    async fn json(status: &str, body: &str) -> Self {
        Self::start(status, "application/json", body).await
    }

    fn provider(&self) -> OpenAIProvider {
        let config = OpenAIConfigBuilder::with_api_key("test-key")
            .with_model("test-model")
            .with_base_url(&self.base_url)
            .build();
        OpenAIProvider::new(config)
    }

    async fn received_request(self) -> String {
        self.request_rx.await.unwrap()
    }
}

async fn read_request(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        let text = String::from_utf8_lossy(&buf);
        let Some(header_end) = text.find("\r\n\r\n") else {
            continue;
        };
        let content_length = text[..header_end]
            .lines()
            .filter_map(|line| line.split_once(':'))
            .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
            .and_then(|(_, value)| value.trim().parse::<usize>().ok())
            .unwrap_or(0);
        if buf.len() >= header_end + 4 + content_length {
            break;
        }
    }
    String::from_utf8(buf).unwrap()
}

fn hi_request() -> ModelRequest {
    ModelRequest {
        messages: vec![ModelMessage::user("hi")],
    }
}

#[tokio::test]
async fn test_first_choice_is_returned() {
    let server = TestServer::json(
        "200 OK",
        r#"{"choices":[{"message":{"role":"assistant","content":"hello"}}]}"#,
    )
    .await;

    let reply = server.provider().send_request(&hi_request()).await.unwrap();
    assert_eq!(reply, ModelReply::Message(ModelMessage::assistant("hello")));

    let request = server.received_request().await;
    assert!(request.starts_with("POST /openai/v1/chat/completions "));
    let lowercase = request.to_lowercase();
    assert!(lowercase.contains("authorization: bearer test-key"));
    assert!(lowercase.contains("content-type: application/json"));

    let (_, body) = request.split_once("\r\n\r\n").unwrap();
    let body: serde_json::Value = serde_json::from_str(body).unwrap();
    assert_eq!(
        body,
        serde_json::json!({
            "model": "test-model",
            "messages": [{ "role": "user", "content": "hi" }]
        })
    );
}

#[tokio::test]
async fn test_whole_history_is_sent_in_order() {
    let server = TestServer::json(
        "200 OK",
        r#"{"choices":[{"message":{"role":"assistant","content":"3"}}]}"#,
    )
    .await;
    let req = ModelRequest {
        messages: vec![
            ModelMessage::user("1"),
            ModelMessage::assistant("2"),
            ModelMessage::user("and then?"),
        ],
    };

    server.provider().send_request(&req).await.unwrap();

    let request = server.received_request().await;
    let (_, body) = request.split_once("\r\n\r\n").unwrap();
    let body: serde_json::Value = serde_json::from_str(body).unwrap();
    assert_eq!(
        body["messages"],
        serde_json::json!([
            { "role": "user", "content": "1" },
            { "role": "assistant", "content": "2" },
            { "role": "user", "content": "and then?" },
        ])
    );
}

#[tokio::test]
async fn test_no_choices_is_empty_reply() {
    let server = TestServer::json("200 OK", r#"{"choices":[]}"#).await;
    let reply = server.provider().send_request(&hi_request()).await.unwrap();
    assert_eq!(reply, ModelReply::Empty);
}

#[tokio::test]
async fn test_failure_status_keeps_code_and_body() {
    let server =
        TestServer::start("401 Unauthorized", "text/plain", "invalid api key")
            .await;
    let err = server
        .provider()
        .send_request(&hi_request())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Status);
    assert_eq!(err.status(), Some(401));
    assert_eq!(err.body(), Some("invalid api key"));
    let message = err.to_string();
    assert!(message.contains("401"));
    assert!(message.contains("invalid api key"));
}

#[tokio::test]
async fn test_failure_status_survives_truncated_body() {
    // The declared length is never sent, so reading the body fails.
    let server = TestServer::start_raw(
        "HTTP/1.1 503 Service Unavailable\r\n\
         Content-Type: text/plain\r\n\
         Content-Length: 100\r\n\
         Connection: close\r\n\
         \r\n\
         over capac"
            .to_owned(),
    )
    .await;
    let err = server
        .provider()
        .send_request(&hi_request())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Status);
    assert_eq!(err.status(), Some(503));
    assert!(err.to_string().contains("503"));
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let server = TestServer::json("200 OK", r#"{"choices": "nope"#).await;
    let err = server
        .provider()
        .send_request(&hi_request())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Decode);
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn test_unexpected_content_type_is_decode_error() {
    let server =
        TestServer::start("200 OK", "text/html", "<html>gateway</html>").await;
    let err = server
        .provider()
        .send_request(&hi_request())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Decode);
}

#[tokio::test]
async fn test_refused_connection_is_transport_error() {
    let addr = {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap()
    };
    let config = OpenAIConfigBuilder::with_api_key("test-key")
        .with_base_url(format!("http://{addr}/v1"))
        .build();

    let err = OpenAIProvider::new(config)
        .send_request(&hi_request())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
}
