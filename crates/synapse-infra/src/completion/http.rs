//! HTTP completion gateway.
//!
//! Implements `CompletionGateway` against the Synapse completion service:
//! `POST {base_url}/api/generate-prompt` with the user's input text and
//! the assembled history, JSON in both directions. The service is opaque;
//! any transport error, non-success status, or malformed payload becomes
//! a `CompletionError` carrying the best message available.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use synapse_core::completion::gateway::CompletionGateway;
use synapse_types::completion::{CompletionError, ContextEntry, ContextRole};
use synapse_types::turn::Turn;

/// HTTP client for the completion service.
pub struct HttpCompletionGateway {
    client: reqwest::Client,
    base_url: String,
}

/// Wire request: `{ "inputText": ..., "history": [{ "text", "kind" }] }`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    input_text: &'a str,
    history: Vec<HistoryEntry<'a>>,
}

#[derive(Debug, Serialize)]
struct HistoryEntry<'a> {
    text: &'a str,
    kind: &'static str,
}

/// Wire response on success: `{ "prompt": ... }`. The field is optional
/// here so a 2xx body without it can be reported as malformed instead of
/// failing deserialization opaquely.
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    prompt: Option<String>,
}

/// Wire response on failure: `{ "message": ... }`, both parts optional in
/// practice.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

impl HttpCompletionGateway {
    /// Create a new gateway for the given base URL.
    pub fn new(base_url: String, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("failed to create reqwest client");

        Self { client, base_url }
    }

    fn url(&self) -> String {
        format!("{}/api/generate-prompt", self.base_url)
    }

    /// Convert the assembled context into the wire request.
    ///
    /// Context roles map back to turn kinds on the wire: the user role is
    /// `userInput`, the model role `modelReply`. The preamble pair travels
    /// as ordinary history entries.
    fn to_request<'a>(user_text: &'a str, context: &'a [ContextEntry]) -> GenerateRequest<'a> {
        let history = context
            .iter()
            .map(|entry| HistoryEntry {
                text: &entry.text,
                kind: match entry.role {
                    ContextRole::User => "userInput",
                    ContextRole::Model => "modelReply",
                },
            })
            .collect();

        GenerateRequest {
            input_text: user_text,
            history,
        }
    }
}

/// Build the service error for a non-success status, extracting the
/// `message` field when the body is JSON and falling back to a generic
/// status line.
fn service_error(status: u16, body: &str) -> CompletionError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .unwrap_or_else(|| format!("HTTP error! status: {status}"));
    CompletionError::Service { status, message }
}

impl CompletionGateway for HttpCompletionGateway {
    async fn generate(
        &self,
        user_text: &str,
        context: &[ContextEntry],
    ) -> Result<Turn, CompletionError> {
        let body = Self::to_request(user_text, context);

        let response = self
            .client
            .post(self.url())
            .json(&body)
            .send()
            .await
            .map_err(|e| CompletionError::Transport(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(service_error(status.as_u16(), &error_body));
        }

        let payload: GenerateResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::MalformedResponse(format!("failed to parse response: {e}")))?;

        let prompt = payload.prompt.ok_or_else(|| {
            CompletionError::MalformedResponse("response is missing the 'prompt' field".to_string())
        })?;

        Ok(Turn::model_reply(prompt))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_wire_shape() {
        let context = vec![
            ContextEntry {
                role: ContextRole::User,
                text: "persona".to_string(),
            },
            ContextEntry {
                role: ContextRole::Model,
                text: "ack".to_string(),
            },
            ContextEntry {
                role: ContextRole::User,
                text: "earlier question".to_string(),
            },
        ];

        let request = HttpCompletionGateway::to_request("make it snappy", &context);
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["inputText"], "make it snappy");
        let history = json["history"].as_array().unwrap();
        assert_eq!(history.len(), 3);
        assert_eq!(history[0]["kind"], "userInput");
        assert_eq!(history[1]["kind"], "modelReply");
        assert_eq!(history[2]["text"], "earlier question");
    }

    #[test]
    fn test_service_error_extracts_message() {
        let err = service_error(500, r#"{"message":"AI service error: overloaded"}"#);
        assert_eq!(err.to_string(), "AI service error: overloaded");
        assert!(matches!(
            err,
            CompletionError::Service { status: 500, .. }
        ));
    }

    #[test]
    fn test_service_error_falls_back_on_plain_body() {
        let err = service_error(502, "Bad Gateway");
        assert_eq!(err.to_string(), "HTTP error! status: 502");
    }

    #[test]
    fn test_service_error_falls_back_on_missing_message_field() {
        let err = service_error(500, r#"{"code":"oops"}"#);
        assert_eq!(err.to_string(), "HTTP error! status: 500");
    }

    #[test]
    fn test_gateway_url() {
        let gateway = HttpCompletionGateway::new(
            "http://localhost:3001".to_string(),
            Duration::from_secs(30),
        );
        assert_eq!(gateway.url(), "http://localhost:3001/api/generate-prompt");
    }
}
