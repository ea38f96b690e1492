//! Workspace-related handlers.

use tower_lsp::lsp_types::{
    DidChangeConfigurationParams,
    DidChangeWatchedFilesParams,
    MessageType,
};

use super::super::backend::Backend;
use crate::config::I18nSettings;

/// `workspace/didChangeConfiguration` 通知を処理
///
/// このサーバーの設定を含まないペイロードは無視し、現在の設定を維持します。
pub async fn handle_did_change_configuration(
    backend: &Backend,
    params: DidChangeConfigurationParams,
) {
    tracing::info!(settings = %params.settings, "didChangeConfiguration received");

    let new_settings = match I18nSettings::from_change_payload(&params.settings) {
        Ok(Some(settings)) => settings,
        Ok(None) => {
            tracing::debug!("no i18n settings in configuration payload, ignored");
            return;
        }
        Err(error) => {
            tracing::error!(%error, "configuration could not be parsed");
            return;
        }
    };

    let mut config_manager = backend.config_manager.lock().await;
    let previous_glob = config_manager.get_settings().locale_glob();
    match config_manager.update_settings(new_settings) {
        Ok(()) => {
            let folder_changed = config_manager.get_settings().locale_glob() != previous_glob;
            drop(config_manager);
            tracing::info!("configuration updated successfully");

            if folder_changed {
                backend.register_file_watchers().await;
            }
            backend.refresh().await;
        }
        Err(error) => {
            drop(config_manager);
            tracing::error!(%error, "configuration validation error");
            backend
                .client
                .log_message(MessageType::ERROR, format!("Configuration error: {error}"))
                .await;
        }
    }
}

/// `workspace/didChangeWatchedFiles` 通知を処理
///
/// ロケールファイルが変更された場合のみ再読み込みします。
pub async fn handle_did_change_watched_files(
    backend: &Backend,
    params: DidChangeWatchedFilesParams,
) {
    let mut locale_changed = false;

    for change in params.changes {
        let Some(file_path) = Backend::uri_to_path(&change.uri) else {
            continue;
        };

        if backend.is_locale_file(&file_path).await {
            tracing::debug!("Locale file changed: {:?}, type: {:?}", file_path, change.typ);
            locale_changed = true;
        }
    }

    if locale_changed {
        backend.reload_locale().await;
        backend.send_decorations_changed().await;
    }
}
