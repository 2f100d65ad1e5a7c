//! Chat exchange against `POST /api/chat`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{ChatError, ClientError};
use crate::ollama::OllamaClient;
use crate::session::{ChatSession, Turn};

/// Request to Ollama chat API.
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [Turn],
    stream: bool,
}

/// Complete (non-streamed) response from Ollama chat API.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    pub model: String,
    pub message: Turn,
    pub done: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub total_duration: Option<u64>,
    #[serde(default)]
    pub eval_count: Option<u64>,
}

/// The reply shapes a chat endpoint may produce.
///
/// Variants are tried in order, so anything that is not a full response or
/// a mapping ends up as [`ChatReply::Other`].
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ChatReply {
    /// A full Ollama chat response.
    Response(ChatResponse),
    /// A bare JSON object that may carry `message.content`.
    Mapping(serde_json::Map<String, Value>),
    /// Anything else.
    Other(Value),
}

impl ChatReply {
    /// Extract the assistant text, falling back to the raw JSON text.
    pub fn into_content(self) -> String {
        match self {
            ChatReply::Response(response) => response.message.content,
            ChatReply::Mapping(map) => {
                let content = map
                    .get("message")
                    .and_then(|message| message.get("content"))
                    .and_then(Value::as_str)
                    .map(str::to_string);
                match content {
                    Some(content) => content,
                    None => Value::Object(map).to_string(),
                }
            }
            ChatReply::Other(Value::String(text)) => text,
            ChatReply::Other(value) => value.to_string(),
        }
    }
}

/// Pull the `error` text out of an Ollama error body, if there is one.
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}

impl OllamaClient {
    /// Send `text` as the next user turn and append the assistant's reply.
    ///
    /// The request carries the whole conversation. The session's model is
    /// assumed to be installed; see [`ChatSession::ensure_available`]. On
    /// failure the user turn stays in the session with no reply, and
    /// sending again appends a fresh user turn.
    pub async fn send_turn(
        &self,
        session: &mut ChatSession,
        text: impl Into<String>,
    ) -> Result<String, ChatError> {
        session.push(Turn::user(text));

        let reply = self
            .chat(session.model(), session.turns())
            .await
            .map_err(|e| {
                warn!("Chat request to '{}' failed: {}", session.model(), e);
                ChatError::from(e)
            })?;

        let content = reply.into_content();
        session.push(Turn::assistant(content.clone()));
        Ok(content)
    }

    /// One non-streamed chat request.
    pub async fn chat(&self, model: &str, messages: &[Turn]) -> Result<ChatReply, ClientError> {
        debug!("Sending {} turn(s) to '{}'", messages.len(), model);

        let request = ChatRequest {
            model,
            messages,
            stream: false,
        };

        let mut builder = self.client.post(self.endpoint("/api/chat")).json(&request);
        if let Some(timeout) = self.config.chat_timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await.map_err(|e| self.request_error(e))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(ClientError::Api(format!(
                "{}: {}",
                status,
                api_error_message(&text)
            )));
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Role;
    use mockito::{Matcher, Server};
    use serde_json::json;

    fn decode(body: &str) -> ChatReply {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn test_full_response_shape() {
        let reply = decode(
            r#"{"model":"llama3","created_at":"2024-05-01T10:00:00Z","message":{"role":"assistant","content":"hi there"},"done":true,"eval_count":4}"#,
        );
        assert!(matches!(reply, ChatReply::Response(_)));
        assert_eq!(reply.into_content(), "hi there");
    }

    #[test]
    fn test_mapping_shape() {
        let reply = decode(r#"{"message":{"content":"hello"}}"#);
        assert!(matches!(reply, ChatReply::Mapping(_)));
        assert_eq!(reply.into_content(), "hello");
    }

    #[test]
    fn test_fallback_to_raw_json() {
        assert_eq!(decode(r#"{"answer":42}"#).into_content(), r#"{"answer":42}"#);
        assert_eq!(decode(r#"[1,2]"#).into_content(), "[1,2]");
        assert_eq!(decode(r#""plain""#).into_content(), "plain");
    }

    #[test]
    fn test_api_error_message() {
        assert_eq!(
            api_error_message(r#"{"error":"model 'x' not found"}"#),
            "model 'x' not found"
        );
        assert_eq!(api_error_message("gateway down"), "gateway down");
    }

    #[tokio::test]
    async fn test_send_turn_appends_reply() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/api/chat")
            .match_body(Matcher::Json(json!({
                "model": "llama3",
                "messages": [
                    {"role": "user", "content": "hi"},
                    {"role": "assistant", "content": "hey"},
                    {"role": "user", "content": "how are you?"}
                ],
                "stream": false
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"message":{"content":"hello"}}"#)
            .create_async()
            .await;

        let client = OllamaClient::with_url(server.url());
        let mut session = ChatSession::new("llama3");
        session.push(Turn::user("hi"));
        session.push(Turn::assistant("hey"));

        let reply = client.send_turn(&mut session, "how are you?").await.unwrap();
        assert_eq!(reply, "hello");
        assert_eq!(session.len(), 4);
        assert_eq!(session.turns()[3], Turn::assistant("hello"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_failed_send_keeps_user_turn() {
        let client = OllamaClient::with_url("http://127.0.0.1:1");
        let mut session = ChatSession::new("llama3");

        let err = client.send_turn(&mut session, "hi").await.unwrap_err();
        assert!(matches!(err, ChatError::GenerationFailed(_)));
        assert_eq!(session.turns(), [Turn::user("hi")]);

        // A resend appends a second user turn rather than replacing the first.
        let _ = client.send_turn(&mut session, "hi").await;
        assert_eq!(session.len(), 2);
        assert!(session.turns().iter().all(|t| t.role == Role::User));
    }

    #[tokio::test]
    async fn test_server_error_is_generation_failure() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/api/chat")
            .with_status(404)
            .with_body(r#"{"error":"model \"llama3\" not found, try pulling it first"}"#)
            .create_async()
            .await;

        let client = OllamaClient::with_url(server.url());
        let mut session = ChatSession::new("llama3");
        let err = client.send_turn(&mut session, "hi").await.unwrap_err();
        match err {
            ChatError::GenerationFailed(msg) => assert!(msg.contains("try pulling it first")),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(session.last_reply(), None);
    }

    #[tokio::test]
    async fn test_unparseable_body_is_generation_failure() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/api/chat")
            .with_status(200)
            .with_body("<html>proxy error</html>")
            .create_async()
            .await;

        let client = OllamaClient::with_url(server.url());
        let mut session = ChatSession::new("llama3");
        assert!(client.send_turn(&mut session, "hi").await.is_err());
        assert_eq!(session.len(), 1);
    }
}
