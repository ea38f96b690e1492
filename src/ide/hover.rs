//! Hover implementation

use crate::ide::render;
use crate::input::translation::{
    TranslationDocument,
    TranslationValue,
};
use crate::syntax::KeyExtractor;

/// Outcome of a hover query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HoverResult {
    /// The cursor is not inside a recognized call.
    NoMatch,
    /// A call was found but its key does not resolve.
    KeyNotFound { key: String },
    Resolved { key: String, value: TranslationValue },
}

/// Looks up the call under the cursor and resolves its key.
///
/// `line` is 0-based and `column` is a byte column within that line.
#[must_use]
pub fn hover_at(
    text: &str,
    line: u32,
    column: usize,
    extractor: &KeyExtractor,
    document: &TranslationDocument,
) -> HoverResult {
    let Some(key) = extractor.extract_at(text, line, column) else {
        return HoverResult::NoMatch;
    };

    match document.resolve(&key) {
        Some(value) => HoverResult::Resolved { key, value: value.clone() },
        None => HoverResult::KeyNotFound { key },
    }
}

impl HoverResult {
    /// Markdown shown to the user, or `None` for [`HoverResult::NoMatch`].
    #[must_use]
    pub fn to_markdown(&self) -> Option<String> {
        match self {
            Self::NoMatch => None,
            Self::KeyNotFound { key } => Some(format!("**i18n key not found:** `{key}`")),
            Self::Resolved { key, value } => Some(match value {
                TranslationValue::Sequence(items) => {
                    format!("**Translation ({key}):**\n\n{}", render::numbered_list(items))
                }
                TranslationValue::Document(_) => {
                    format!("**Translation ({key}):**\n{}", render::json_block(value))
                }
                TranslationValue::Primitive(primitive) => format!("**Translation:** {primitive}"),
            }),
        }
    }
}
