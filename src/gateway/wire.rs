//! Chat completion wire types (internal).

use serde::Deserialize;

use crate::types::{FinishReason, Usage};

#[derive(Deserialize)]
pub(super) struct ChatResponse {
    pub choices: Vec<Choice>,
    pub usage: Option<WireUsage>,
}

#[derive(Deserialize)]
pub(super) struct Choice {
    pub message: ChoiceMessage,
    pub finish_reason: Option<String>,
}

#[derive(Deserialize)]
pub(super) struct ChoiceMessage {
    pub content: Option<String>,
}

/// Counters missing from the body count as zero.
#[derive(Deserialize, Default)]
#[serde(default)]
pub(super) struct WireUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

impl From<WireUsage> for Usage {
    fn from(u: WireUsage) -> Self {
        Usage {
            input_tokens: u.prompt_tokens,
            output_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        }
    }
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

pub(super) fn parse_finish_reason(s: &str) -> Option<FinishReason> {
    s.parse().ok()
}

/// The server-provided message of an error body, falling back to the raw
/// body (or a generic note when it is blank).
pub(super) fn error_message(status: u16, body: &str) -> String {
    if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(body) {
        return envelope.error.message;
    }
    let body = body.trim();
    if body.is_empty() {
        format!("endpoint returned HTTP {status}")
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_prefers_structured_message() {
        let body = r#"{"error":{"message":"Invalid API Key","type":"invalid_request_error","code":"invalid_api_key"}}"#;
        assert_eq!(error_message(401, body), "Invalid API Key");
    }

    #[test]
    fn error_message_falls_back_to_body() {
        assert_eq!(error_message(502, " Bad Gateway \n"), "Bad Gateway");
        assert_eq!(error_message(500, ""), "endpoint returned HTTP 500");
    }

    #[test]
    fn finish_reasons_parse() {
        assert_eq!(parse_finish_reason("stop"), Some(FinishReason::Stop));
        assert_eq!(parse_finish_reason("length"), Some(FinishReason::Length));
        assert_eq!(parse_finish_reason("eos"), None);
    }
}
