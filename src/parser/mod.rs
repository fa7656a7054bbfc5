//! Structured extraction from free-form model output
//!
//! Model responses are not trustworthy: JSON arrives wrapped in markdown
//! fences, surrounded by prose, or not at all. This module pulls the first
//! balanced `{...}` or `[...]` span out of arbitrary text, decodes it, and
//! validates the fields the engine needs. Failures are values, not panics -
//! every call site pairs a parse with a deterministic fallback.

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::domain::{AnswerKind, QuestionCategory, QuestionRecord};

/// Why a model response could not be turned into structured data
///
/// Carries the offending text so orchestration layers can log it for
/// diagnosis before falling back.
#[derive(Debug, Error)]
pub enum ParseFailure {
    #[error("Response was empty")]
    Empty,

    #[error("No JSON object or array found in response: {snippet}")]
    NoJson { snippet: String },

    #[error("Failed to decode JSON span: {source} in {span}")]
    Decode {
        span: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Expected a JSON {expected}, got {got}")]
    WrongShape { expected: &'static str, got: &'static str },

    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}

/// Truncate text for inclusion in a failure/log message
fn snippet(text: &str) -> String {
    const MAX: usize = 120;
    if text.chars().count() <= MAX {
        text.to_string()
    } else {
        let cut: String = text.chars().take(MAX).collect();
        format!("{}...", cut)
    }
}

/// Strip leading/trailing markdown code-fence markers
///
/// Handles ```, ```json, and ~~~ fences. Inner content is returned verbatim.
fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();

    let without_open = if let Some(rest) = trimmed.strip_prefix("```") {
        // Drop an optional language tag on the fence line
        match rest.find('\n') {
            Some(idx) => &rest[idx + 1..],
            None => rest.trim_start_matches(|c: char| c.is_alphanumeric()),
        }
    } else if let Some(rest) = trimmed.strip_prefix("~~~") {
        match rest.find('\n') {
            Some(idx) => &rest[idx + 1..],
            None => rest,
        }
    } else {
        trimmed
    };

    let without_close = without_open
        .trim_end()
        .strip_suffix("```")
        .or_else(|| without_open.trim_end().strip_suffix("~~~"))
        .unwrap_or(without_open);

    without_close.trim()
}

/// Find the first balanced `{...}` or `[...]` span
///
/// Depth counting is string- and escape-aware, so braces inside JSON string
/// values (or unbalanced braces in surrounding prose before the first opener)
/// do not break the match. Returns the span from the first opener to its
/// matching closer.
fn balanced_span(text: &str) -> Option<&str> {
    let start = text.find(['{', '['])?;
    let bytes = text.as_bytes();

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, &b) in bytes[start..].iter().enumerate() {
        if escaped {
            escaped = false;
            continue;
        }
        match b {
            b'\\' if in_string => escaped = true,
            b'"' => in_string = !in_string,
            b'{' | b'[' if !in_string => depth += 1,
            b'}' | b']' if !in_string => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(&text[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }

    None
}

/// Extract the first structured value from arbitrary model text
///
/// Trims, strips code fences, locates the first balanced JSON span, and
/// decodes it. The returned value is either an object or an array.
pub fn extract_json(raw: &str) -> Result<Value, ParseFailure> {
    debug!(chars = raw.len(), "extract_json: called");
    let cleaned = strip_code_fences(raw);
    if cleaned.is_empty() {
        return Err(ParseFailure::Empty);
    }

    let span = balanced_span(cleaned).ok_or_else(|| ParseFailure::NoJson {
        snippet: snippet(cleaned),
    })?;

    serde_json::from_str(span).map_err(|source| ParseFailure::Decode {
        span: snippet(span),
        source,
    })
}

/// Validate a decoded value as an interview question
///
/// `question` is mandatory and never defaulted; `type` defaults to text and
/// `keywords` to an empty list. The category default comes from the caller,
/// which knows which interview round this question is for.
pub fn validate_question(value: &Value, default_category: QuestionCategory) -> Result<QuestionRecord, ParseFailure> {
    let object = value.as_object().ok_or(ParseFailure::WrongShape {
        expected: "object",
        got: json_kind(value),
    })?;

    let text = object
        .get("question")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or(ParseFailure::MissingField("question"))?;

    let kind = object
        .get("type")
        .and_then(Value::as_str)
        .and_then(|s| s.parse::<AnswerKind>().ok())
        .unwrap_or_default();

    let keywords = object
        .get("keywords")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();

    let category = object
        .get("category")
        .and_then(Value::as_str)
        .and_then(|s| s.parse::<QuestionCategory>().ok())
        .unwrap_or(default_category);

    Ok(QuestionRecord {
        text: text.to_string(),
        kind,
        keywords,
        category,
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Sanitize free-text model output: titles, suggested answers
///
/// Strips code fences, surrounding quote pairs, leading/trailing markdown
/// emphasis, and accidental JSON wrapping (a bare JSON string, or an object
/// with a single string value). Idempotent: sanitizing clean text returns it
/// unchanged.
pub fn clean_text(raw: &str) -> String {
    let mut current = strip_code_fences(raw).to_string();

    // Each pass strips one layer of wrapping; clean text is a fixpoint
    for _ in 0..4 {
        let before = current.clone();

        current = current.trim().to_string();

        // Bare JSON string literal
        if current.starts_with('"') && current.ends_with('"') && current.len() >= 2 {
            if let Ok(Value::String(inner)) = serde_json::from_str::<Value>(&current) {
                current = inner;
            } else {
                current = current[1..current.len() - 1].to_string();
            }
        }

        // Object wrapper with a single string value, e.g. {"title": "..."}
        if current.starts_with('{')
            && let Ok(Value::Object(map)) = serde_json::from_str::<Value>(&current)
        {
            let strings: Vec<&str> = map.values().filter_map(Value::as_str).collect();
            if strings.len() == 1 {
                current = strings[0].to_string();
            }
        }

        // Surrounding single quotes
        if current.starts_with('\'') && current.ends_with('\'') && current.len() >= 2 {
            current = current[1..current.len() - 1].to_string();
        }

        // Markdown emphasis markers on either end
        current = current
            .trim_start_matches(['*', '_', '`'])
            .trim_end_matches(['*', '_', '`'])
            .trim()
            .to_string();

        if current == before {
            break;
        }
    }

    current
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_json_fenced_object() {
        let value = extract_json("```json\n{\"question\":\"Q\"}\n```").unwrap();
        assert_eq!(value["question"], "Q");
    }

    #[test]
    fn test_extract_json_prose_wrapped() {
        let raw = "Sure! Here is the question you asked for:\n{\"question\": \"What is your budget?\"}\nHope it helps.";
        let value = extract_json(raw).unwrap();
        assert_eq!(value["question"], "What is your budget?");
    }

    #[test]
    fn test_extract_json_braces_inside_strings() {
        let raw = r#"{"question": "Why use {curly} braces?", "keywords": ["a}b"]}"#;
        let value = extract_json(raw).unwrap();
        assert_eq!(value["question"], "Why use {curly} braces?");
        assert_eq!(value["keywords"][0], "a}b");
    }

    #[test]
    fn test_extract_json_unbalanced_prose_before_span() {
        // A stray closing brace in prose must not end the scan early
        let raw = r#"note: } is a closing brace. ["a", "b"] trailing"#;
        let value = extract_json(raw).unwrap();
        assert_eq!(value[0], "a");
        assert_eq!(value[1], "b");
    }

    #[test]
    fn test_extract_json_array() {
        let raw = "```\n[{\"type\": \"business\", \"content\": \"c\", \"priority\": \"high\"}]\n```";
        let value = extract_json(raw).unwrap();
        assert!(value.is_array());
        assert_eq!(value[0]["type"], "business");
    }

    #[test]
    fn test_extract_json_not_json() {
        assert!(matches!(extract_json("not json at all"), Err(ParseFailure::NoJson { .. })));
    }

    #[test]
    fn test_extract_json_empty() {
        assert!(matches!(extract_json("   "), Err(ParseFailure::Empty)));
        assert!(matches!(extract_json("```\n\n```"), Err(ParseFailure::Empty)));
    }

    #[test]
    fn test_extract_json_unterminated_span() {
        assert!(matches!(
            extract_json(r#"{"question": "never closed"#),
            Err(ParseFailure::NoJson { .. })
        ));
    }

    #[test]
    fn test_validate_question_defaults() {
        let value = serde_json::json!({"question": "How big is the market?"});
        let record = validate_question(&value, QuestionCategory::Marketing).unwrap();
        assert_eq!(record.text, "How big is the market?");
        assert_eq!(record.kind, AnswerKind::Text);
        assert!(record.keywords.is_empty());
        assert_eq!(record.category, QuestionCategory::Marketing);
    }

    #[test]
    fn test_validate_question_full() {
        let value = serde_json::json!({
            "question": "What is your monthly budget?",
            "type": "number",
            "keywords": ["budget", "costs"],
            "category": "finance"
        });
        let record = validate_question(&value, QuestionCategory::Strategy).unwrap();
        assert_eq!(record.kind, AnswerKind::Number);
        assert_eq!(record.keywords, vec!["budget", "costs"]);
        assert_eq!(record.category, QuestionCategory::Finance);
    }

    #[test]
    fn test_validate_question_missing_question_fails() {
        let value = serde_json::json!({"type": "text"});
        assert!(matches!(
            validate_question(&value, QuestionCategory::Strategy),
            Err(ParseFailure::MissingField("question"))
        ));

        let value = serde_json::json!({"question": "   "});
        assert!(matches!(
            validate_question(&value, QuestionCategory::Strategy),
            Err(ParseFailure::MissingField("question"))
        ));
    }

    #[test]
    fn test_validate_question_wrong_shape() {
        let value = serde_json::json!(["not", "an", "object"]);
        assert!(matches!(
            validate_question(&value, QuestionCategory::Strategy),
            Err(ParseFailure::WrongShape { .. })
        ));
    }

    #[test]
    fn test_clean_text_strips_wrapping() {
        assert_eq!(clean_text("\"Quoted Title\""), "Quoted Title");
        assert_eq!(clean_text("**Bold Title**"), "Bold Title");
        assert_eq!(clean_text("```\nFenced Title\n```"), "Fenced Title");
        assert_eq!(clean_text("'single quoted'"), "single quoted");
    }

    #[test]
    fn test_clean_text_unwraps_accidental_json() {
        assert_eq!(clean_text(r#"{"title": "Beanpost Monthly"}"#), "Beanpost Monthly");
        assert_eq!(clean_text("```json\n\"Beanpost Monthly\"\n```"), "Beanpost Monthly");
    }

    #[test]
    fn test_clean_text_idempotent() {
        let samples = [
            "Beanpost Monthly",
            "Coffee for the People",
            "Plan de Negocio: Beanpost",
            "Don't stop now",
        ];
        for sample in samples {
            let once = clean_text(sample);
            assert_eq!(once, sample);
            assert_eq!(clean_text(&once), once);
        }
    }

    #[test]
    fn test_clean_text_layered_wrapping() {
        // Fenced, then quoted, then emphasized
        assert_eq!(clean_text("```\n\"*Great Title*\"\n```"), "Great Title");
    }
}
