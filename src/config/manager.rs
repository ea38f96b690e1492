//! Owns the active settings and the workspace root they apply to.

use std::path::PathBuf;

use super::{
    ConfigError,
    I18nSettings,
    LocaleFileMatcher,
    MatcherError,
    loader,
};

/// Fallback folder searched after the configured folder and the root.
const FALLBACK_FOLDER: &str = "example files";

#[derive(Default, Debug, Clone)]
pub struct ConfigManager {
    /// Settings currently in effect, already validated.
    current_settings: I18nSettings,
    /// Root the settings file and locale candidates are resolved against.
    workspace_root: Option<PathBuf>,
}

impl ConfigManager {
    #[must_use]
    pub fn new() -> Self {
        Self { current_settings: I18nSettings::default(), workspace_root: None }
    }

    /// Loads and validates the settings file of `workspace_root`.
    ///
    /// A missing file, or no root at all, yields the defaults.
    ///
    /// # Errors
    /// - The settings file could not be read or parsed
    /// - Validation failed
    pub fn load_settings(&mut self, workspace_root: Option<PathBuf>) -> Result<(), ConfigError> {
        tracing::debug!("Loading settings for workspace: {:?}", workspace_root);

        let settings = if let Some(root) = &workspace_root {
            loader::load_from_workspace(root)?.map_or_else(I18nSettings::default, |ws| {
                tracing::debug!("Loaded workspace settings: {:?}", ws);
                ws
            })
        } else {
            I18nSettings::default()
        };

        settings.validate().map_err(ConfigError::ValidationErrors)?;

        self.current_settings = settings;
        self.workspace_root = workspace_root;
        tracing::debug!("Settings loaded successfully: {:?}", self.current_settings);

        Ok(())
    }

    /// Replaces the settings after validating them. The previous settings stay on failure.
    ///
    /// # Errors
    /// - Validation failed
    pub fn update_settings(&mut self, new_settings: I18nSettings) -> Result<(), ConfigError> {
        tracing::debug!("Updating settings...");

        new_settings.validate().map_err(ConfigError::ValidationErrors)?;

        self.current_settings = new_settings;
        tracing::debug!("Settings updated successfully");

        Ok(())
    }

    /// Falls back to the default settings for `workspace_root`.
    pub fn reset(&mut self, workspace_root: Option<PathBuf>) {
        self.current_settings = I18nSettings::default();
        self.workspace_root = workspace_root;
    }

    #[must_use]
    pub const fn get_settings(&self) -> &I18nSettings {
        &self.current_settings
    }

    #[must_use]
    pub const fn workspace_root(&self) -> Option<&PathBuf> {
        self.workspace_root.as_ref()
    }

    /// Locale files to try, in priority order.
    ///
    /// Empty when no workspace root is known.
    #[must_use]
    pub fn locale_candidates(&self) -> Vec<PathBuf> {
        let Some(root) = &self.workspace_root else {
            return Vec::new();
        };
        let file_name = format!("{}.json", self.current_settings.default_locale);

        vec![
            root.join(&self.current_settings.i18n_folder).join(&file_name),
            root.join(&file_name),
            root.join(FALLBACK_FOLDER).join(&file_name),
        ]
    }

    /// Matcher for the locale files of the current root, if any.
    ///
    /// # Errors
    /// - The locale folder does not form a valid glob
    pub fn locale_matcher(&self) -> Result<Option<LocaleFileMatcher>, MatcherError> {
        self.workspace_root
            .as_ref()
            .map(|root| LocaleFileMatcher::new(root.clone(), &self.current_settings))
            .transpose()
    }
}
