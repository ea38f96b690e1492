//! Inline translation previews for every call in a document.

use serde::{
    Deserialize,
    Serialize,
};
use tower_lsp::lsp_types::Range;

use crate::ide::render;
use crate::input::translation::TranslationDocument;
use crate::syntax::KeyExtractor;
use crate::types::SourceRange;

/// A resolvable call and the one-line text to show next to it.
///
/// `start`/`end` are byte offsets of the call span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoration {
    pub key: String,
    pub start: usize,
    pub end: usize,
    pub display_text: String,
}

/// Decorations for each call in `text` whose key resolves, in text order.
///
/// Calls with unknown keys are skipped.
#[must_use]
pub fn decorations_for(
    text: &str,
    extractor: &KeyExtractor,
    document: &TranslationDocument,
) -> Vec<Decoration> {
    extractor
        .extract(text)
        .filter_map(|call| {
            let value = document.resolve(&call.key)?;
            Some(Decoration {
                display_text: render::one_line(value),
                key: call.key,
                start: call.start,
                end: call.end,
            })
        })
        .collect()
}

/// Decoration as sent to editor extensions, with an LSP range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationDecoration {
    pub range: Range,
    pub key: String,
    pub value: String,
}

impl TranslationDecoration {
    #[must_use]
    pub fn from_decoration(text: &str, decoration: Decoration) -> Self {
        Self {
            range: SourceRange::from_byte_span(text, decoration.start, decoration.end).into(),
            key: decoration.key,
            value: decoration.display_text,
        }
    }
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;
    use tower_lsp::lsp_types::Position;

    use super::*;
    use crate::test_utils::{
        default_extractor,
        parse_document as document,
    };

    #[fixture]
    fn extractor() -> KeyExtractor {
        default_extractor()
    }

    #[rstest]
    fn sequence_shows_item_count(extractor: KeyExtractor) {
        let document = document(r#"{"items": ["x", "y", "z"]}"#);

        let decorations = decorations_for("<%= __('items') %>", &extractor, &document);

        assert_that!(decorations, len(eq(1)));
        assert_that!(decorations[0].display_text, eq("[3 items]"));
        assert_that!(decorations[0].start, eq(4));
        assert_that!(decorations[0].end, eq(15));
    }

    #[rstest]
    fn unresolved_calls_are_skipped(extractor: KeyExtractor) {
        let document = document(r#"{"known": "Yes", "menu": {"a": "b"}}"#);
        let text = r#"__('unknown') __("known") __('menu')"#;

        let decorations = decorations_for(text, &extractor, &document);

        assert_that!(
            decorations,
            elements_are![
                all![
                    field!(Decoration.key, eq("known")),
                    field!(Decoration.display_text, eq("Yes"))
                ],
                all![
                    field!(Decoration.key, eq("menu")),
                    field!(Decoration.display_text, eq("{...}"))
                ],
            ]
        );
    }

    #[rstest]
    fn long_values_are_truncated(extractor: KeyExtractor) {
        let long = "x".repeat(80);
        let exact = "y".repeat(50);
        let document = document(&format!(r#"{{"long": "{long}", "exact": "{exact}"}}"#));

        let decorations = decorations_for("__('long') __('exact')", &extractor, &document);

        assert_that!(decorations, len(eq(2)));
        assert_that!(decorations[0].display_text, eq(&format!("{}...", "x".repeat(50))));
        assert_that!(decorations[1].display_text, eq(&exact));
    }

    #[rstest]
    fn empty_document_yields_nothing(extractor: KeyExtractor) {
        let decorations =
            decorations_for("__('a')", &extractor, &TranslationDocument::default());

        assert_that!(decorations, is_empty());
    }

    #[rstest]
    fn translation_decoration_uses_line_positions(extractor: KeyExtractor) {
        let text = "<ul>\n  <li><%= __('nav.home') %></li>\n</ul>";
        let document = document(r#"{"nav": {"home": "Home"}}"#);

        let decoration = decorations_for(text, &extractor, &document).remove(0);
        let lsp = TranslationDecoration::from_decoration(text, decoration);

        assert_that!(lsp.range.start, eq(Position::new(1, 10)));
        assert_that!(lsp.range.end, eq(Position::new(1, 24)));
        assert_that!(lsp.value, eq("Home"));
    }
}
