//! Leaf-key index over a translation document.

use indexmap::IndexSet;

use crate::input::translation::{
    KEY_SEPARATOR,
    TranslationDocument,
    TranslationValue,
};

/// Set of leaf key paths, in document order.
pub type LeafKeyIndex = IndexSet<String>;

/// Collects every dotted path whose value is not a nested document.
///
/// Sequences are leaves at their own path; their items are not indexed.
///
/// # Examples
/// ```
/// use ejs_i18n_language_server::indexer::flatten;
/// use ejs_i18n_language_server::input::translation::TranslationDocument;
///
/// let document = TranslationDocument::parse(r#"{"menu": {"title": "Home", "items": ["a"]}}"#).unwrap();
/// let keys: Vec<String> = flatten(&document).into_iter().collect();
/// assert_eq!(keys, vec!["menu.title", "menu.items"]);
/// ```
#[must_use]
pub fn flatten(document: &TranslationDocument) -> LeafKeyIndex {
    let mut keys = LeafKeyIndex::new();
    collect_leaf_keys(document, None, &mut keys);
    keys
}

/// Appends the leaf paths of `document`, each prefixed with `prefix` when given.
fn collect_leaf_keys(document: &TranslationDocument, prefix: Option<&str>, keys: &mut LeafKeyIndex) {
    for (key, value) in document.iter() {
        let full_key =
            prefix.map_or_else(|| key.clone(), |p| format!("{p}{KEY_SEPARATOR}{key}"));

        match value {
            TranslationValue::Document(nested) => {
                collect_leaf_keys(nested, Some(&full_key), keys);
            }
            TranslationValue::Primitive(_) | TranslationValue::Sequence(_) => {
                keys.insert(full_key);
            }
        }
    }
}
