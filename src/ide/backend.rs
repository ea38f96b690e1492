//! LSP Backend 実装

use std::path::{
    Path,
    PathBuf,
};
use std::sync::Arc;

use tokio::sync::Mutex;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::{
    CompletionParams,
    CompletionResponse,
    DidChangeConfigurationParams,
    DidChangeTextDocumentParams,
    DidChangeWatchedFilesParams,
    DidChangeWatchedFilesRegistrationOptions,
    DidCloseTextDocumentParams,
    DidOpenTextDocumentParams,
    ExecuteCommandParams,
    FileSystemWatcher,
    GlobPattern,
    Hover,
    HoverParams,
    InitializeParams,
    InitializeResult,
    InitializedParams,
    InlayHint,
    InlayHintParams,
    MessageType,
    Registration,
    Url,
    WatchKind,
};
use tower_lsp::{
    Client,
    LanguageServer,
};

use super::handlers;
use super::state::ServerState;
use crate::config::ConfigManager;
use crate::syntax::KeyExtractor;

/// Registration id prefix of the locale file watcher; the glob is appended.
const LOCALE_WATCHER_ID: &str = "i18n-locale-watcher";

/// LSP Backend
#[derive(Clone)]
pub struct Backend {
    /// LSP クライアント
    pub client: Client,
    /// 設定管理
    pub config_manager: Arc<Mutex<ConfigManager>>,
    /// 共有状態
    pub state: ServerState,
}

impl std::fmt::Debug for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Backend")
            .field("config_manager", &"<ConfigManager>")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl Backend {
    /// 新しい `Backend` を作成
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self {
            client,
            config_manager: Arc::new(Mutex::new(ConfigManager::new())),
            state: ServerState::new(),
        }
    }

    /// URI をファイルパスに変換
    pub(crate) fn uri_to_path(uri: &Url) -> Option<PathBuf> {
        let path = uri.to_file_path().ok();
        if path.is_none() {
            tracing::warn!("Failed to convert URI to file path: {}", uri);
        }
        path
    }

    /// 現在の設定から抽出器を作り直す
    ///
    /// 構築に失敗した場合は以前の抽出器を維持します。
    pub(crate) async fn rebuild_extractor(&self) {
        let function_name =
            self.config_manager.lock().await.get_settings().function_name.clone();

        match KeyExtractor::new(&function_name) {
            Ok(extractor) => {
                tracing::debug!(function_name = %function_name, "Extractor rebuilt");
                *self.state.extractor.lock().await = Some(extractor);
            }
            Err(error) => {
                tracing::error!(%error, "Failed to build key extractor");
                self.client
                    .log_message(MessageType::ERROR, format!("Invalid functionName: {error}"))
                    .await;
            }
        }
    }

    /// 候補リストからロケールファイルを読み込み直す
    ///
    /// すべての候補が失敗した場合は以前のドキュメントを維持します。
    pub(crate) async fn reload_locale(&self) -> bool {
        let candidates = self.config_manager.lock().await.locale_candidates();
        if candidates.is_empty() {
            tracing::debug!("No workspace root, skipping locale load");
            return false;
        }

        let result = self.state.store.lock().await.load_first(&candidates);
        match result {
            Ok(path) => {
                self.client
                    .log_message(MessageType::INFO, format!("Loaded i18n from: {}", path.display()))
                    .await;
                true
            }
            Err(error) => {
                self.client.log_message(MessageType::WARNING, error.to_string()).await;
                false
            }
        }
    }

    /// 設定を反映して再読み込みし、クライアントに表示更新を依頼する
    pub(crate) async fn refresh(&self) {
        self.rebuild_extractor().await;
        self.reload_locale().await;
        self.send_decorations_changed().await;
    }

    /// パスがロケールフォルダ配下の JSON か判定
    pub(crate) async fn is_locale_file(&self, path: &Path) -> bool {
        let matcher = self.config_manager.lock().await.locale_matcher();
        match matcher {
            Ok(Some(matcher)) => matcher.is_locale_file(path),
            Ok(None) => false,
            Err(error) => {
                tracing::error!(%error, "Invalid locale file pattern");
                false
            }
        }
    }

    /// `<i18nFolder>/**/*.json` の監視をクライアントに登録
    ///
    /// 登録 ID はパターンごとに異なるため、フォルダ変更後に再登録しても衝突しません。
    /// 古いフォルダのイベントは `is_locale_file` で除外されます。
    pub(crate) async fn register_file_watchers(&self) {
        let matcher = self.config_manager.lock().await.locale_matcher();
        let pattern = match matcher {
            Ok(Some(matcher)) => format!("**/{}", matcher.pattern()),
            Ok(None) => {
                tracing::debug!("No workspace root, skipping locale file watcher");
                return;
            }
            Err(error) => {
                tracing::error!(%error, "Invalid locale file pattern");
                return;
            }
        };

        let options = DidChangeWatchedFilesRegistrationOptions {
            watchers: vec![FileSystemWatcher {
                glob_pattern: GlobPattern::String(pattern.clone()),
                kind: Some(WatchKind::Create | WatchKind::Change | WatchKind::Delete),
            }],
        };

        let register_options = match serde_json::to_value(options) {
            Ok(value) => value,
            Err(error) => {
                tracing::error!(%error, "Failed to serialize watcher options");
                return;
            }
        };

        let registration = Registration {
            id: format!("{LOCALE_WATCHER_ID}:{pattern}"),
            method: "workspace/didChangeWatchedFiles".to_string(),
            register_options: Some(register_options),
        };

        if let Err(error) = self.client.register_capability(vec![registration]).await {
            tracing::warn!(%error, "Failed to register locale file watcher");
        } else {
            tracing::debug!(pattern = %pattern, "Registered locale file watcher");
        }
    }

    /// インレイヒントの再取得をクライアントに依頼
    pub(crate) async fn send_decorations_changed(&self) {
        if let Err(error) = self.client.inlay_hint_refresh().await {
            tracing::debug!(%error, "Inlay hint refresh not delivered");
        }
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        handlers::lifecycle::handle_initialize(self, params).await
    }

    async fn initialized(&self, params: InitializedParams) {
        handlers::lifecycle::handle_initialized(self, params).await;
    }

    async fn shutdown(&self) -> Result<()> {
        handlers::lifecycle::handle_shutdown().await
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        handlers::document_sync::handle_did_open(self, params).await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        handlers::document_sync::handle_did_change(self, params).await;
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        handlers::document_sync::handle_did_close(self, params).await;
    }

    async fn hover(&self, params: HoverParams) -> Result<Option<Hover>> {
        handlers::features::handle_hover(self, params).await
    }

    async fn completion(&self, params: CompletionParams) -> Result<Option<CompletionResponse>> {
        handlers::features::handle_completion(self, params).await
    }

    async fn inlay_hint(&self, params: InlayHintParams) -> Result<Option<Vec<InlayHint>>> {
        handlers::features::handle_inlay_hint(self, params).await
    }

    async fn execute_command(
        &self,
        params: ExecuteCommandParams,
    ) -> Result<Option<serde_json::Value>> {
        handlers::execute_command::handle_execute_command(self, params).await
    }

    async fn did_change_configuration(&self, params: DidChangeConfigurationParams) {
        handlers::workspace::handle_did_change_configuration(self, params).await;
    }

    async fn did_change_watched_files(&self, params: DidChangeWatchedFilesParams) {
        handlers::workspace::handle_did_change_watched_files(self, params).await;
    }
}
