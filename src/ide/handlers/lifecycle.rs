//! LSP lifecycle handlers: `initialize`, `initialized`, `shutdown`.

use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::{
    CompletionOptions,
    ExecuteCommandOptions,
    HoverProviderCapability,
    InitializeParams,
    InitializeResult,
    InitializedParams,
    MessageType,
    OneOf,
    ServerCapabilities,
    ServerInfo,
    TextDocumentSyncCapability,
    TextDocumentSyncKind,
    WorkDoneProgressOptions,
};

use super::super::backend::Backend;
use super::execute_command::{
    GET_DECORATIONS,
    RELOAD_LOCALE,
};

/// `initialize` リクエストを処理
///
/// ワークスペースルートを決定して設定を読み込み、サーバーの機能を返します。
pub async fn handle_initialize(
    backend: &Backend,
    params: InitializeParams,
) -> Result<InitializeResult> {
    #[allow(deprecated)]
    let workspace_root = params
        .workspace_folders
        .as_ref()
        .and_then(|folders| folders.first())
        .map(|folder| &folder.uri)
        .or(params.root_uri.as_ref())
        .and_then(Backend::uri_to_path);

    tracing::info!(root = ?workspace_root, "initialize");

    let mut config_manager = backend.config_manager.lock().await;
    let loaded = config_manager.load_settings(workspace_root.clone());
    if loaded.is_err() {
        // 設定ファイルが不正でもルートはデフォルト設定で保持する
        config_manager.reset(workspace_root);
    }
    drop(config_manager);

    if let Err(error) = loaded {
        tracing::error!("Configuration error during initialize: {}", error);
        backend
            .client
            .log_message(MessageType::ERROR, format!("Configuration error: {error}"))
            .await;
    }

    Ok(InitializeResult {
        server_info: Some(ServerInfo {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: Some(env!("CARGO_PKG_VERSION").to_string()),
        }),
        capabilities: ServerCapabilities {
            text_document_sync: Some(TextDocumentSyncCapability::Kind(TextDocumentSyncKind::FULL)),
            hover_provider: Some(HoverProviderCapability::Simple(true)),
            completion_provider: Some(CompletionOptions {
                resolve_provider: Some(false),
                trigger_characters: Some(vec![
                    "'".to_string(),
                    "\"".to_string(),
                    ".".to_string(),
                ]),
                work_done_progress_options: WorkDoneProgressOptions::default(),
                all_commit_characters: None,
                completion_item: None,
            }),
            inlay_hint_provider: Some(OneOf::Left(true)),
            execute_command_provider: Some(ExecuteCommandOptions {
                commands: vec![GET_DECORATIONS.to_string(), RELOAD_LOCALE.to_string()],
                work_done_progress_options: WorkDoneProgressOptions::default(),
            }),
            ..ServerCapabilities::default()
        },
    })
}

/// `initialized` 通知を処理
pub async fn handle_initialized(backend: &Backend, _: InitializedParams) {
    backend.client.log_message(MessageType::INFO, "initialized!").await;

    backend.rebuild_extractor().await;
    backend.reload_locale().await;
    backend.register_file_watchers().await;
    backend.send_decorations_changed().await;
}

/// `shutdown` リクエストを処理
#[allow(clippy::unused_async)]
pub async fn handle_shutdown() -> Result<()> {
    Ok(())
}
