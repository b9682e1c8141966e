//! Core `Proofreader` trait and the `GeminiProofreader` implementation.
//!
//! `GeminiProofreader` calls `POST {base_url}/v1beta/models/{model}:generateContent`
//! with a schema-constrained JSON contract.  Connection details come from
//! [`LlmConfig`]; the API key is resolved once at construction.

use async_trait::async_trait;
use thiserror::Error;

use crate::config::LlmConfig;
use crate::proofread::prompt::PromptBuilder;
use crate::proofread::types::ProofreadResult;

// ---------------------------------------------------------------------------
// ProofreadError
// ---------------------------------------------------------------------------

/// Errors that can occur while proofreading.
#[derive(Debug, Error)]
pub enum ProofreadError {
    /// No API key was found in the environment or settings file.
    #[error("API key is missing (set API_KEY or llm.api_key)")]
    MissingApiKey,

    /// HTTP transport or connection error.
    #[error("HTTP request failed: {0}")]
    Request(String),

    /// The request did not complete within the configured timeout.
    #[error("proofreading request timed out")]
    Timeout,

    /// The API answered with a non-success status.
    #[error("API returned {status}: {message}")]
    Api { status: u16, message: String },

    /// The response body (or the model's JSON payload) could not be parsed.
    #[error("failed to parse response: {0}")]
    Parse(String),

    /// The model returned no text at all.
    #[error("No response received from AI")]
    EmptyResponse,
}

impl From<reqwest::Error> for ProofreadError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ProofreadError::Timeout
        } else {
            ProofreadError::Request(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// Proofreader trait
// ---------------------------------------------------------------------------

/// Async trait for proofreading backends.
///
/// Implementors must be `Send + Sync` so they can be shared with the worker
/// task as `Arc<dyn Proofreader>`.
#[async_trait]
pub trait Proofreader: Send + Sync {
    async fn proofread(&self, text: &str) -> Result<ProofreadResult, ProofreadError>;
}

// ---------------------------------------------------------------------------
// Response handling
// ---------------------------------------------------------------------------

/// Concatenated text parts of the first candidate, if any.
///
/// Mirrors the SDK's `response.text` accessor: parts without a `text` field
/// (e.g. thought signatures) are skipped.
pub fn extract_text(body: &serde_json::Value) -> Option<String> {
    let parts = body["candidates"][0]["content"]["parts"].as_array()?;
    let text: String = parts
        .iter()
        .filter_map(|part| part["text"].as_str())
        .collect();
    Some(text)
}

/// Turn a decoded `generateContent` body into a [`ProofreadResult`].
///
/// Whitespace-only text counts as empty.
pub fn parse_response(body: &serde_json::Value) -> Result<ProofreadResult, ProofreadError> {
    let text = extract_text(body).ok_or(ProofreadError::EmptyResponse)?;
    let text = text.trim();
    if text.is_empty() {
        return Err(ProofreadError::EmptyResponse);
    }

    serde_json::from_str(text).map_err(|e| ProofreadError::Parse(e.to_string()))
}

/// Best-effort error message from a non-2xx body.
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

// ---------------------------------------------------------------------------
// GeminiProofreader
// ---------------------------------------------------------------------------

/// Calls the Gemini REST API.
pub struct GeminiProofreader {
    client: reqwest::Client,
    config: LlmConfig,
    api_key: Option<String>,
    prompt_builder: PromptBuilder,
}

impl GeminiProofreader {
    /// Build a `GeminiProofreader` from application config, resolving the
    /// API key from the environment first.
    pub fn from_config(config: &LlmConfig) -> Self {
        Self::with_api_key(config, config.resolve_api_key())
    }

    /// Build with an explicit key (`None` makes every call fail with
    /// [`ProofreadError::MissingApiKey`]).
    pub fn with_api_key(config: &LlmConfig, api_key: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            config: config.clone(),
            api_key,
            prompt_builder: PromptBuilder::new(config.temperature),
        }
    }

    /// Whether an API key is available.
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Full `generateContent` URL for the configured model.
    pub fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    async fn call(&self, text: &str) -> Result<ProofreadResult, ProofreadError> {
        let key = self.api_key.as_deref().ok_or(ProofreadError::MissingApiKey)?;

        let body = self.prompt_builder.build(text);
        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let raw = response.text().await.unwrap_or_default();
            return Err(ProofreadError::Api {
                status: status.as_u16(),
                message: api_error_message(&raw),
            });
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ProofreadError::Parse(e.to_string()))?;

        parse_response(&json)
    }
}

#[async_trait]
impl Proofreader for GeminiProofreader {
    async fn proofread(&self, text: &str) -> Result<ProofreadResult, ProofreadError> {
        log::debug!(
            "proofread: sending {} chars to {}",
            text.chars().count(),
            self.config.model
        );

        let result = self.call(text).await;
        match &result {
            Ok(r) => log::info!("proofread: {} change(s) returned", r.changes.len()),
            Err(e) => log::error!("Error calling Gemini API: {e}"),
        }
        result
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};

    fn make_config() -> LlmConfig {
        LlmConfig {
            base_url: "http://localhost:9".into(),
            api_key: None,
            model: "gemini-2.5-flash".into(),
            temperature: None,
            timeout_secs: 5,
        }
    }

    fn candidate_with(parts: serde_json::Value) -> serde_json::Value {
        json!({ "candidates": [{ "content": { "role": "model", "parts": parts } }] })
    }

    #[test]
    fn endpoint_includes_model() {
        let p = GeminiProofreader::with_api_key(&make_config(), Some("k".into()));
        assert_eq!(
            p.endpoint(),
            "http://localhost:9/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn endpoint_tolerates_trailing_slash() {
        let mut config = make_config();
        config.base_url = "https://example.test/".into();
        let p = GeminiProofreader::with_api_key(&config, None);
        assert!(p.endpoint().starts_with("https://example.test/v1beta/"));
    }

    #[test]
    fn parse_success() {
        let payload = r#"{"original_text":"ก","corrected_text":"ข","changes":[],"overall_comment":"ดี"}"#;
        let body = candidate_with(json!([{ "text": payload }]));
        let result = parse_response(&body).unwrap();
        assert_eq!(result.corrected_text, "ข");
        assert_eq!(result.overall_comment, "ดี");
    }

    #[test]
    fn parse_joins_split_text_parts() {
        let body = candidate_with(json!([
            { "text": "{\"corrected_text\":" },
            { "thoughtSignature": "abc" },
            { "text": "\"ผล\"}" }
        ]));
        let result = parse_response(&body).unwrap();
        assert_eq!(result.corrected_text, "ผล");
    }

    #[test]
    fn no_candidates_is_empty_response() {
        let err = parse_response(&json!({ "candidates": [] })).unwrap_err();
        assert!(matches!(err, ProofreadError::EmptyResponse));
        assert_eq!(err.to_string(), "No response received from AI");
    }

    #[test]
    fn blank_text_is_empty_response() {
        let body = candidate_with(json!([{ "text": "  \n" }]));
        assert!(matches!(
            parse_response(&body).unwrap_err(),
            ProofreadError::EmptyResponse
        ));
    }

    #[test]
    fn invalid_json_payload_is_parse_error() {
        let body = candidate_with(json!([{ "text": "ไม่ใช่ JSON" }]));
        assert!(matches!(
            parse_response(&body).unwrap_err(),
            ProofreadError::Parse(_)
        ));
    }

    #[test]
    fn api_error_message_prefers_structured_message() {
        let body = r#"{"error":{"code":400,"message":"API key not valid","status":"INVALID_ARGUMENT"}}"#;
        assert_eq!(api_error_message(body), "API key not valid");
        assert_eq!(api_error_message(" plain failure "), "plain failure");
    }

    #[tokio::test]
    async fn missing_key_fails_without_network() {
        let p = GeminiProofreader::with_api_key(&make_config(), None);
        assert!(!p.has_api_key());
        let err = p.proofread("ทดสอบ").await.unwrap_err();
        assert!(matches!(err, ProofreadError::MissingApiKey));
    }

    // -----------------------------------------------------------------------
    // Local HTTP server
    // -----------------------------------------------------------------------

    /// Read one HTTP/1.1 request (head plus `content-length` body).
    async fn read_request(socket: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);

            if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                let head = String::from_utf8_lossy(&buf[..end]).to_ascii_lowercase();
                let len = head
                    .lines()
                    .find_map(|l| l.strip_prefix("content-length:"))
                    .and_then(|v| v.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if buf.len() >= end + 4 + len {
                    break;
                }
            }
        }
        String::from_utf8(buf).unwrap()
    }

    /// Answer a single request with `status` and `body` after `delay`.
    /// The handle yields the raw request that was received.
    async fn serve_once(
        status: &'static str,
        body: String,
        delay: Duration,
    ) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            tokio::time::sleep(delay).await;
            let response = format!(
                "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
            request
        });

        (base_url, handle)
    }

    fn proofreader_for(base_url: String, timeout_secs: u64) -> GeminiProofreader {
        let mut config = make_config();
        config.base_url = base_url;
        config.timeout_secs = timeout_secs;
        GeminiProofreader::with_api_key(&config, Some("test-key".into()))
    }

    #[tokio::test]
    async fn successful_call_posts_key_and_body() {
        let payload = json!({
            "original_text": "ไปทำงาณ",
            "corrected_text": "ไปทำงาน",
            "changes": [{
                "original": "ทำงาณ",
                "corrected": "ทำงาน",
                "type": "spelling",
                "explanation": "สะกดผิด"
            }],
            "overall_comment": "แก้คำสะกด"
        });
        let body = candidate_with(json!([{ "text": payload.to_string() }])).to_string();
        let (base_url, server) = serve_once("200 OK", body, Duration::ZERO).await;

        let result = proofreader_for(base_url, 5).proofread("ไปทำงาณ").await.unwrap();
        assert_eq!(result.corrected_text, "ไปทำงาน");
        assert_eq!(result.changes.len(), 1);
        assert_eq!(result.changes[0].original, "ทำงาณ");

        let request = server.await.unwrap();
        let (head, sent) = request.split_once("\r\n\r\n").unwrap();
        assert!(head.starts_with("POST /v1beta/models/gemini-2.5-flash:generateContent "));
        assert!(head.to_ascii_lowercase().contains("x-goog-api-key: test-key"));

        let sent: serde_json::Value = serde_json::from_str(sent).unwrap();
        assert_eq!(sent["contents"][0]["role"], "user");
        assert_eq!(sent["contents"][0]["parts"][0]["text"], "ไปทำงาณ");
        assert_eq!(sent["generationConfig"]["responseMimeType"], "application/json");
    }

    #[tokio::test]
    async fn non_success_status_is_api_error() {
        let body = json!({ "error": { "code": 400, "message": "API key not valid" } }).to_string();
        let (base_url, _server) = serve_once("400 Bad Request", body, Duration::ZERO).await;

        match proofreader_for(base_url, 5).proofread("ทดสอบ").await.unwrap_err() {
            ProofreadError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "API key not valid");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn stalled_server_times_out() {
        let body = candidate_with(json!([{ "text": "{}" }])).to_string();
        let (base_url, _server) = serve_once("200 OK", body, Duration::from_secs(5)).await;

        let err = proofreader_for(base_url, 1).proofread("ทดสอบ").await.unwrap_err();
        assert!(matches!(err, ProofreadError::Timeout), "got {err:?}");
    }

    #[tokio::test]
    async fn empty_candidates_over_http_is_empty_response() {
        let body = json!({ "candidates": [] }).to_string();
        let (base_url, _server) = serve_once("200 OK", body, Duration::ZERO).await;

        let err = proofreader_for(base_url, 5).proofread("ทดสอบ").await.unwrap_err();
        assert!(matches!(err, ProofreadError::EmptyResponse));
    }

    /// `GeminiProofreader` must be usable as `dyn Proofreader`.
    #[test]
    fn proofreader_is_object_safe() {
        let p: Box<dyn Proofreader> =
            Box::new(GeminiProofreader::with_api_key(&make_config(), None));
        drop(p);
    }
}
