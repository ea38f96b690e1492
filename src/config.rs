//! Workspace configuration: settings, validation and locale-path matching.

/// Config file loader
mod loader;
/// Configuration manager
mod manager;
/// Locale file pattern matcher
mod matcher;
/// Configuration types and settings
mod types;

pub use manager::ConfigManager;
pub use matcher::{
    LocaleFileMatcher,
    MatcherError,
};
pub use types::{
    CONFIG_FILE_NAME,
    ConfigError,
    I18nSettings,
    SETTINGS_SECTION,
    ValidationError,
};
