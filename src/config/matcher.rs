//! Decides which changed files belong to the locale folder.

use std::path::{
    Path,
    PathBuf,
};

use globset::{
    Glob,
    GlobMatcher,
};

use super::I18nSettings;

/// Why a [`LocaleFileMatcher`] could not be built.
#[derive(Debug, thiserror::Error)]
pub enum MatcherError {
    #[error("Invalid locale file pattern '{pattern}': {source}")]
    InvalidLocalePattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },
}

/// Matches `<i18nFolder>/**/*.json` below a workspace root.
#[derive(Debug, Clone)]
pub struct LocaleFileMatcher {
    /// Absolute paths are made relative to this root before matching.
    workspace_root: PathBuf,
    /// Source text of `locale_glob`.
    pattern: String,
    /// Compiled `<i18nFolder>/**/*.json`.
    locale_glob: GlobMatcher,
}

impl LocaleFileMatcher {
    /// Creates a new matcher from settings.
    ///
    /// # Errors
    /// - The locale folder does not form a valid glob
    pub fn new(workspace_root: PathBuf, settings: &I18nSettings) -> Result<Self, MatcherError> {
        let pattern = settings.locale_glob();
        let locale_glob = Glob::new(&pattern)
            .map_err(|source| MatcherError::InvalidLocalePattern {
                pattern: pattern.clone(),
                source,
            })?
            .compile_matcher();

        Ok(Self { workspace_root, pattern, locale_glob })
    }

    /// Glob relative to the workspace root, as registered with the client's file watcher.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Returns true if the absolute path is a locale file under the workspace root.
    #[must_use]
    pub fn is_locale_file(&self, absolute_path: &Path) -> bool {
        let Some(relative_path) = absolute_path.strip_prefix(&self.workspace_root).ok() else {
            return false;
        };

        self.is_locale_file_relative(relative_path)
    }

    /// Returns true if the path, relative to the workspace root, is a locale file.
    #[must_use]
    pub fn is_locale_file_relative(&self, relative_path: &Path) -> bool {
        self.locale_glob.is_match(relative_path)
    }
}
