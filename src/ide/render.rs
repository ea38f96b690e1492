//! Text renderings of translation values shared by hover, completion and decorations.

use std::fmt::Write as _;

use serde_json::Value;

use crate::input::translation::TranslationValue;

/// Longest primitive shown inline before truncation.
pub const MAX_INLINE_LENGTH: usize = 50;

/// Suffix appended to truncated inline text.
const ELLIPSIS: &str = "...";

/// `1. first\n2. second` for sequence items.
#[must_use]
pub fn numbered_list(items: &[TranslationValue]) -> String {
    let mut result = String::new();
    for (index, item) in items.iter().enumerate() {
        if index > 0 {
            result.push('\n');
        }
        let _ = write!(result, "{}. {}", index + 1, inline_item(item));
    }
    result
}

/// A sequence item on one line: primitives as text, containers as compact JSON.
fn inline_item(value: &TranslationValue) -> String {
    match value {
        TranslationValue::Primitive(primitive) => primitive.to_string(),
        TranslationValue::Sequence(_) | TranslationValue::Document(_) => {
            Value::from(value).to_string()
        }
    }
}

/// Pretty-printed JSON with two-space indentation.
#[must_use]
pub fn pretty_json(value: &TranslationValue) -> String {
    format!("{:#}", Value::from(value))
}

/// Fenced JSON block for markdown.
#[must_use]
pub fn json_block(value: &TranslationValue) -> String {
    format!("```json\n{}\n```", pretty_json(value))
}

/// Short label: `[N items]`, `{object}` or the primitive itself.
#[must_use]
pub fn summary(value: &TranslationValue) -> String {
    match value {
        TranslationValue::Primitive(primitive) => primitive.to_string(),
        TranslationValue::Sequence(items) => item_count(items),
        TranslationValue::Document(_) => "{object}".to_string(),
    }
}

/// Markdown body describing `value`.
#[must_use]
pub fn documentation(value: &TranslationValue) -> String {
    match value {
        TranslationValue::Primitive(primitive) => primitive.to_string(),
        TranslationValue::Sequence(items) => numbered_list(items),
        TranslationValue::Document(_) => json_block(value),
    }
}

/// Single-line condensed form used for inline decorations.
#[must_use]
pub fn one_line(value: &TranslationValue) -> String {
    match value {
        TranslationValue::Primitive(primitive) => {
            let flat = primitive.to_string().replace(['\r', '\n'], " ");
            truncate(&flat, MAX_INLINE_LENGTH)
        }
        TranslationValue::Sequence(items) => item_count(items),
        TranslationValue::Document(_) => "{...}".to_string(),
    }
}

/// `[n items]` placeholder for a sequence.
fn item_count(items: &[TranslationValue]) -> String {
    format!("[{} items]", items.len())
}

/// Keeps the first `max_chars` characters, appending `...` only when something was cut.
#[must_use]
pub fn truncate(text: &str, max_chars: usize) -> String {
    let mut chars = text.chars();
    let kept: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() { format!("{kept}{ELLIPSIS}") } else { kept }
}
