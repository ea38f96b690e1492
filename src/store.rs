//! Locale store holding the currently loaded translation document.

use std::path::{
    Path,
    PathBuf,
};
use std::sync::Arc;

use crate::input::translation::{
    DocumentError,
    TranslationDocument,
    TranslationValue,
};

/// Errors raised while loading locale data.
#[derive(Debug, thiserror::Error)]
pub enum LocaleError {
    #[error("Failed to parse locale data: {0}")]
    Parse(#[from] DocumentError),

    #[error("Failed to load locale file {}: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: Box<Self>,
    },

    #[error("Failed to read locale file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No i18n file found. Checked paths: {}", format_paths(checked))]
    SourceMissing { checked: Vec<PathBuf> },
}

/// Joins paths for the `SourceMissing` message.
fn format_paths(paths: &[PathBuf]) -> String {
    paths.iter().map(|path| path.display().to_string()).collect::<Vec<_>>().join(", ")
}

/// Owns the current [`TranslationDocument`].
///
/// The document is only ever replaced as a whole, so a snapshot taken before a reload stays
/// valid and unchanged.
#[derive(Debug, Clone, Default)]
pub struct LocaleStore {
    /// Current document, shared with every snapshot taken from it.
    document: Arc<TranslationDocument>,
    /// File the current document came from; `None` when loaded from text or never loaded.
    source_path: Option<PathBuf>,
}

impl LocaleStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `source` and, on success, swaps it in as the current document.
    ///
    /// On failure the previous document is kept.
    pub fn load(&mut self, source: &str) -> Result<Arc<TranslationDocument>, LocaleError> {
        let document = Arc::new(TranslationDocument::parse(source)?);
        self.document = Arc::clone(&document);
        self.source_path = None;
        Ok(document)
    }

    /// Reads and loads a single locale file.
    pub fn load_file(&mut self, path: &Path) -> Result<Arc<TranslationDocument>, LocaleError> {
        let content = std::fs::read_to_string(path)
            .map_err(|source| LocaleError::Read { path: path.to_path_buf(), source })?;

        let document = self.load(&content).map_err(|error| LocaleError::File {
            path: path.to_path_buf(),
            source: Box::new(error),
        })?;
        self.source_path = Some(path.to_path_buf());
        Ok(document)
    }

    /// Loads the first candidate that exists and parses.
    ///
    /// Missing candidates are skipped silently; unreadable or malformed ones are logged and
    /// skipped. When nothing loads, a single warning lists every checked path and the current
    /// document is left untouched.
    pub fn load_first(&mut self, candidates: &[PathBuf]) -> Result<PathBuf, LocaleError> {
        for candidate in candidates {
            if !candidate.is_file() {
                tracing::debug!(path = %candidate.display(), "Locale candidate does not exist");
                continue;
            }

            match self.load_file(candidate) {
                Ok(document) => {
                    tracing::info!(
                        path = %candidate.display(),
                        keys = document.len(),
                        "Loaded i18n data"
                    );
                    return Ok(candidate.clone());
                }
                Err(error) => {
                    tracing::error!(path = %candidate.display(), %error, "Error loading i18n file");
                }
            }
        }

        let error = LocaleError::SourceMissing { checked: candidates.to_vec() };
        tracing::warn!("{error}");
        Err(error)
    }

    /// Cheap handle to the current document.
    #[must_use]
    pub fn snapshot(&self) -> Arc<TranslationDocument> {
        Arc::clone(&self.document)
    }

    /// Path of the file the current document came from, if it was loaded from disk.
    #[must_use]
    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    #[must_use]
    pub fn resolve(&self, path: &str) -> Option<&TranslationValue> {
        self.document.resolve(path)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use std::fs;

    use googletest::prelude::*;
    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;

    #[rstest]
    fn load_replaces_document() {
        let mut store = LocaleStore::new();

        store.load(r#"{"a": "first"}"#).unwrap();
        store.load(r#"{"b": "second"}"#).unwrap();

        assert_that!(store.resolve("a"), none());
        assert_that!(store.resolve("b"), some(eq(&TranslationValue::text("second"))));
    }

    #[rstest]
    fn invalid_json_keeps_previous_document() {
        let mut store = LocaleStore::new();
        store.load(r#"{"greeting": "Hello"}"#).unwrap();

        let result = store.load(r#"{"greeting": "#);

        assert!(matches!(result, Err(LocaleError::Parse(DocumentError::Json(_)))));
        assert_that!(store.resolve("greeting"), some(eq(&TranslationValue::text("Hello"))));
    }

    #[rstest]
    fn snapshot_survives_reload() {
        let mut store = LocaleStore::new();
        store.load(r#"{"greeting": "Hello"}"#).unwrap();
        let before = store.snapshot();

        store.load(r#"{"greeting": "Bonjour"}"#).unwrap();

        assert_that!(before.resolve("greeting"), some(eq(&TranslationValue::text("Hello"))));
        assert_that!(store.resolve("greeting"), some(eq(&TranslationValue::text("Bonjour"))));
    }

    #[rstest]
    fn load_first_skips_missing_and_malformed_candidates() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("locales/en.json");
        let malformed = temp_dir.path().join("en.json");
        let valid = temp_dir.path().join("example files/en.json");
        fs::write(&malformed, "{ nope").unwrap();
        fs::create_dir_all(valid.parent().unwrap()).unwrap();
        fs::write(&valid, r#"{"title": "From examples"}"#).unwrap();

        let mut store = LocaleStore::new();
        let loaded = store.load_first(&[missing, malformed, valid.clone()]).unwrap();

        assert_that!(loaded, eq(&valid));
        assert_that!(store.source_path(), some(eq(valid.as_path())));
        assert_that!(store.resolve("title"), some(eq(&TranslationValue::text("From examples"))));
    }

    #[rstest]
    fn load_first_prefers_earlier_candidate() {
        let temp_dir = TempDir::new().unwrap();
        let first = temp_dir.path().join("first.json");
        let second = temp_dir.path().join("second.json");
        fs::write(&first, r#"{"which": "first"}"#).unwrap();
        fs::write(&second, r#"{"which": "second"}"#).unwrap();

        let mut store = LocaleStore::new();
        store.load_first(&[first, second]).unwrap();

        assert_that!(store.resolve("which"), some(eq(&TranslationValue::text("first"))));
    }

    #[rstest]
    fn load_first_reports_every_checked_path() {
        let temp_dir = TempDir::new().unwrap();
        let candidates = vec![temp_dir.path().join("a.json"), temp_dir.path().join("b.json")];
        let mut store = LocaleStore::new();
        store.load(r#"{"kept": "yes"}"#).unwrap();

        let result = store.load_first(&candidates);

        let Err(LocaleError::SourceMissing { checked }) = result else {
            panic!("expected SourceMissing");
        };
        assert_that!(checked, eq(&candidates));
        assert_that!(store.resolve("kept"), some(eq(&TranslationValue::text("yes"))));
    }

    #[rstest]
    fn load_file_wraps_parse_error_with_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("en.json");
        fs::write(&path, "[1, 2]").unwrap();

        let mut store = LocaleStore::new();
        let error = store.load_file(&path).unwrap_err();

        assert_that!(error.to_string(), contains_substring("en.json"));
        assert_that!(error.to_string(), contains_substring("must be a JSON object"));
    }
}
