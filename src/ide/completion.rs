//! Completion implementation

use crate::ide::render;
use crate::indexer::flatten;
use crate::input::translation::TranslationDocument;
use crate::syntax::KeyExtractor;

/// A key offered while the user is typing inside an unclosed call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionCandidate {
    /// Full dotted key.
    pub key: String,
    /// Remainder of the key after what has already been typed.
    pub insert_text: String,
    /// Short preview: `[N items]`, `{object}` or the value itself.
    pub detail: String,
    /// Markdown preview of the value.
    pub documentation: String,
}

/// Candidates for the partial key ending at the end of `text_before_cursor`.
///
/// Matching is a plain string prefix test, so `men` matches `menu.title`.
#[must_use]
pub fn completions_for(
    text_before_cursor: &str,
    extractor: &KeyExtractor,
    document: &TranslationDocument,
) -> Vec<CompletionCandidate> {
    let Some(partial_key) = extractor.extract_partial(text_before_cursor) else {
        return Vec::new();
    };

    flatten(document)
        .into_iter()
        .filter_map(|key| {
            let insert_text = key.strip_prefix(partial_key)?.to_string();
            let value = document.resolve(&key)?;
            Some(CompletionCandidate {
                detail: render::summary(value),
                documentation: render::documentation(value),
                insert_text,
                key,
            })
        })
        .collect()
}
