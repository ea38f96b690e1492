//! Reads the optional workspace settings file.

use std::path::Path;

use super::{
    CONFIG_FILE_NAME,
    ConfigError,
    I18nSettings,
};

/// Loads `.i18n-ejs-preview.json` from the workspace root.
///
/// # Returns
/// - `Ok(Some(settings))`: the file exists and parsed
/// - `Ok(None)`: there is no settings file
///
/// # Errors
/// - The file could not be read
/// - The file is not valid JSON for [`I18nSettings`]
pub(super) fn load_from_workspace(
    workspace_root: &Path,
) -> Result<Option<I18nSettings>, ConfigError> {
    let config_path = workspace_root.join(CONFIG_FILE_NAME);

    if !config_path.exists() {
        tracing::debug!("Configuration file not found: {:?}", config_path);
        return Ok(None);
    }

    tracing::debug!("Loading configuration from: {:?}", config_path);

    let content = std::fs::read_to_string(&config_path)?;
    let settings: I18nSettings = serde_json::from_str(&content)?;

    Ok(Some(settings))
}
