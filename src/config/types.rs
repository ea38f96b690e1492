use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

/// Section name used in `workspace/didChangeConfiguration` payloads.
pub const SETTINGS_SECTION: &str = "i18nEjsPreview";

/// Serialized names of the [`I18nSettings`] fields.
const SETTING_KEYS: [&str; 4] =
    ["i18nFolder", "defaultLocale", "functionName", "decorationLanguages"];

/// Optional per-workspace settings file.
pub const CONFIG_FILE_NAME: &str = ".i18n-ejs-preview.json";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "decorationLanguages[0]")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// One numbered line per validation error.
fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct I18nSettings {
    /// Locale folder relative to the workspace root.
    pub i18n_folder: String,

    /// Locale whose file is loaded, e.g. `en` for `en.json`.
    pub default_locale: String,

    /// Name of the translation function, e.g. `__` or `$t`.
    pub function_name: String,

    /// Language ids whose open documents receive inline decorations.
    pub decoration_languages: Vec<String>,
}

impl I18nSettings {
    /// Reads settings from a `workspace/didChangeConfiguration` payload.
    ///
    /// The payload either wraps the settings in [`SETTINGS_SECTION`] or holds their keys
    /// directly. A payload with neither yields `None`, so the current settings stay in place.
    ///
    /// # Errors
    /// - The settings have the wrong shape, e.g. a number for `functionName`
    pub fn from_change_payload(
        payload: &serde_json::Value,
    ) -> Result<Option<Self>, serde_json::Error> {
        let Some(object) = payload.as_object() else {
            return Ok(None);
        };

        if let Some(section) = object.get(SETTINGS_SECTION) {
            return Self::deserialize(section).map(Some);
        }

        if SETTING_KEYS.iter().any(|key| object.contains_key(*key)) {
            Self::deserialize(payload).map(Some)
        } else {
            Ok(None)
        }
    }

    /// Glob of locale files relative to the workspace root.
    #[must_use]
    pub fn locale_glob(&self) -> String {
        format!("{}/**/*.json", self.i18n_folder.trim_end_matches(['/', '\\']))
    }

    /// # Errors
    /// - Required field is empty
    /// - Locale name contains a path separator
    /// - Locale folder does not form a valid glob
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.i18n_folder.is_empty() {
            errors.push(ValidationError::new(
                "i18nFolder",
                "The folder cannot be empty. Example: \"locales\"",
            ));
        } else if let Err(e) = globset::Glob::new(&self.locale_glob()) {
            errors.push(ValidationError::new(
                "i18nFolder",
                format!("Invalid folder '{}': {e}", self.i18n_folder),
            ));
        }

        if self.default_locale.is_empty() {
            errors.push(ValidationError::new(
                "defaultLocale",
                "The locale cannot be empty. Example: \"en\"",
            ));
        } else if self.default_locale.contains(['/', '\\']) {
            errors.push(ValidationError::new(
                "defaultLocale",
                format!(
                    "The locale '{}' must be a file name without path separators",
                    self.default_locale
                ),
            ));
        }

        if self.function_name.is_empty() {
            errors.push(ValidationError::new(
                "functionName",
                "The function name cannot be empty. Example: \"__\"",
            ));
        }

        for (index, language) in self.decoration_languages.iter().enumerate() {
            if language.is_empty() {
                errors.push(ValidationError::new(
                    format!("decorationLanguages[{index}]"),
                    "Language ids cannot be empty",
                ));
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

impl Default for I18nSettings {
    fn default() -> Self {
        Self {
            i18n_folder: "locales".to_string(),
            default_locale: "en".to_string(),
            function_name: "__".to_string(),
            decoration_languages: vec!["ejs".to_string(), "html".to_string()],
        }
    }
}
