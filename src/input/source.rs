//! Open source documents tracked by the server.

/// Text of a document opened in the editor, kept in sync on every change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    pub text: String,
    /// Language identifier reported by the client (e.g. `ejs`, `html`).
    pub language_id: String,
}

impl SourceDocument {
    #[must_use]
    pub fn new(text: impl Into<String>, language_id: impl Into<String>) -> Self {
        Self { text: text.into(), language_id: language_id.into() }
    }

    /// Returns `true` if the document's language is one of `languages`.
    #[must_use]
    pub fn is_language_in(&self, languages: &[String]) -> bool {
        languages.iter().any(|language| language == &self.language_id)
    }
}
