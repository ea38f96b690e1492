//! LSP サーバーの共有状態

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tower_lsp::lsp_types::Url;

use crate::input::source::SourceDocument;
use crate::input::translation::TranslationDocument;
use crate::store::LocaleStore;
use crate::syntax::KeyExtractor;

/// LSP サーバーの共有状態
///
/// `Backend` から状態管理の責務を分離し、ハンドラー間で共有可能にします。
///
/// # ロック順序
///
/// 複数のロックを同時に取得する場合は、以下の順序を厳守してください：
/// 1. `extractor`
/// 2. `store`
/// 3. `documents`
#[derive(Clone, Default)]
pub struct ServerState {
    /// `functionName` から構築した抽出器（`initialized` 前は `None`）
    pub extractor: Arc<Mutex<Option<KeyExtractor>>>,
    /// ロケールファイルの内容
    pub store: Arc<Mutex<LocaleStore>>,
    /// 開いているドキュメント（URI → テキストと言語 ID）
    pub documents: Arc<Mutex<HashMap<Url, SourceDocument>>>,
}

/// 1 リクエスト分の検索に必要なスナップショット
///
/// ロックを保持せずに検索できるよう、抽出器とドキュメントを複製して持ちます。
#[derive(Debug, Clone)]
pub struct LookupContext {
    pub extractor: KeyExtractor,
    pub translations: Arc<TranslationDocument>,
    pub source: SourceDocument,
}

impl ServerState {
    /// 新しい `ServerState` を作成
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// `uri` のドキュメントに対する検索コンテキストを取得
    ///
    /// 抽出器が未構築、またはドキュメントが開かれていない場合は `None`。
    pub async fn lookup_context(&self, uri: &Url) -> Option<LookupContext> {
        let extractor = self.extractor.lock().await.clone()?;
        let translations = self.store.lock().await.snapshot();
        let source = self.documents.lock().await.get(uri).cloned()?;

        Some(LookupContext { extractor, translations, source })
    }
}

impl std::fmt::Debug for ServerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerState")
            .field("extractor", &"<Option<KeyExtractor>>")
            .field("store", &"<LocaleStore>")
            .field("documents", &"<HashMap<Url, SourceDocument>>")
            .finish()
    }
}
