//! Extracts the answer text from whatever a Bedrock model returned.
//!
//! Providers disagree on response shape, so known shapes are tried in a
//! fixed order:
//!
//! 1. `content` (Anthropic)
//! 2. `message.content` (Meta, DeepSeek)
//! 3. `choices[0].message.content` (OpenAI-compatible)
//! 4. `results[0].outputText` (AI21 / Titan)
//!
//! Nothing matching means the whole JSON document becomes the answer.

use serde_json::Value;
use tracing::{debug, warn};

type Locator = fn(&Value) -> Option<&Value>;

const SHAPES: [(&str, Locator); 4] = [
    ("content", top_level_content),
    ("message.content", message_content),
    ("choices[0].message.content", first_choice_content),
    ("results[0].outputText", first_result_text),
];

fn top_level_content(v: &Value) -> Option<&Value> {
    v.get("content")
}

fn message_content(v: &Value) -> Option<&Value> {
    v.get("message")?.get("content")
}

fn first_choice_content(v: &Value) -> Option<&Value> {
    v.get("choices")?.get(0)?.get("message")?.get("content")
}

fn first_result_text(v: &Value) -> Option<&Value> {
    v.get("results")?.get(0)?.get("outputText")
}

/// Normalize a raw model reply into answer text. Never fails.
///
/// Bytes that are not JSON are returned as text, with invalid UTF-8 replaced.
pub fn normalize_response(raw: &[u8]) -> String {
    match serde_json::from_slice::<Value>(raw) {
        Ok(body) => extract_answer(&body),
        Err(_) => String::from_utf8_lossy(raw).into_owned(),
    }
}

/// Search a decoded reply for its answer text.
pub fn extract_answer(body: &Value) -> String {
    if let Value::String(text) = body {
        return text.clone();
    }

    for (shape, locate) in SHAPES {
        if let Some(answer) = locate(body).and_then(render) {
            debug!(shape, "Matched model response shape");
            return answer;
        }
    }

    warn!("Unrecognized model response shape, returning raw JSON");
    body.to_string()
}

/// Text for a located value; `None` when the next shape should be tried.
fn render(value: &Value) -> Option<String> {
    let text = match value {
        Value::Null => return None,
        Value::String(s) => s.clone(),
        Value::Array(blocks) => text_blocks(blocks).unwrap_or_else(|| value.to_string()),
        other => other.to_string(),
    };
    (!text.is_empty()).then_some(text)
}

/// Join `[{"type": "text", "text": ...}]` content blocks.
fn text_blocks(blocks: &[Value]) -> Option<String> {
    let texts: Vec<&str> = blocks
        .iter()
        .filter_map(|b| b.get("text").and_then(Value::as_str))
        .collect();
    (!texts.is_empty()).then(|| texts.concat())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn normalize(value: Value) -> String {
        normalize_response(value.to_string().as_bytes())
    }

    #[test]
    fn test_top_level_content() {
        assert_eq!(normalize(json!({"content": "OK"})), "OK");
    }

    #[test]
    fn test_message_content() {
        assert_eq!(normalize(json!({"message": {"role": "assistant", "content": "M"}})), "M");
    }

    #[test]
    fn test_openai_choices() {
        assert_eq!(normalize(json!({"choices": [{"message": {"content": "X"}}]})), "X");
    }

    #[test]
    fn test_ai21_results() {
        assert_eq!(normalize(json!({"results": [{"outputText": "Y"}]})), "Y");
    }

    #[test]
    fn test_shape_order() {
        let body = json!({
            "results": [{"outputText": "last"}],
            "choices": [{"message": {"content": "third"}}],
            "message": {"content": "second"},
            "content": "first"
        });
        assert_eq!(normalize(body), "first");
    }

    #[test]
    fn test_null_and_empty_fall_through() {
        let body = json!({"content": null, "message": {"content": ""}, "results": [{"outputText": "Y"}]});
        assert_eq!(normalize(body), "Y");
    }

    #[test]
    fn test_empty_choices_fall_through() {
        let body = json!({"choices": [], "results": [{"outputText": "Y"}]});
        assert_eq!(normalize(body), "Y");
    }

    #[test]
    fn test_anthropic_content_blocks() {
        let body = json!({
            "content": [
                {"type": "text", "text": "Your glucose "},
                {"type": "text", "text": "looks stable."}
            ],
            "stop_reason": "end_turn"
        });
        assert_eq!(normalize(body), "Your glucose looks stable.");
    }

    #[test]
    fn test_unknown_shape_serializes_everything() {
        let answer = normalize(json!({"foo": "bar"}));
        assert!(answer.contains("\"foo\""));
        assert_eq!(serde_json::from_str::<Value>(&answer).unwrap(), json!({"foo": "bar"}));
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(normalize_response(b"plain text"), "plain text");
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let answer = normalize_response(b"caf\xff ok");
        assert_eq!(answer, "caf\u{FFFD} ok");
    }

    #[test]
    fn test_json_string_and_array() {
        assert_eq!(normalize_response(br#""just words""#), "just words");
        assert_eq!(normalize_response(b"[1,2]"), "[1,2]");
    }

    #[test]
    fn test_empty_body() {
        assert_eq!(normalize_response(b""), "");
    }
}
