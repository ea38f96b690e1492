//! Document synchronization handlers.

use tower_lsp::lsp_types::{
    DidChangeTextDocumentParams,
    DidCloseTextDocumentParams,
    DidOpenTextDocumentParams,
};

use super::super::backend::Backend;
use crate::input::source::SourceDocument;

/// `textDocument/didOpen` 通知を処理
pub async fn handle_did_open(backend: &Backend, params: DidOpenTextDocumentParams) {
    let document = params.text_document;

    tracing::debug!(uri = %document.uri, language_id = %document.language_id, "File opened");

    backend
        .state
        .documents
        .lock()
        .await
        .insert(document.uri, SourceDocument::new(document.text, document.language_id));
}

/// `textDocument/didChange` 通知を処理
///
/// 全文同期のため、最後の変更内容でテキストを置き換えます。
pub async fn handle_did_change(backend: &Backend, params: DidChangeTextDocumentParams) {
    let uri = params.text_document.uri;

    let Some(change) = params.content_changes.into_iter().next_back() else {
        return;
    };

    let mut documents = backend.state.documents.lock().await;
    if let Some(document) = documents.get_mut(&uri) {
        document.text = change.text;
    } else {
        tracing::debug!(uri = %uri, "Change for a document that was never opened");
        documents.insert(uri, SourceDocument::new(change.text, String::new()));
    }
}

/// `textDocument/didClose` 通知を処理
pub async fn handle_did_close(backend: &Backend, params: DidCloseTextDocumentParams) {
    let uri = params.text_document.uri;

    tracing::debug!(uri = %uri, "File closed");

    backend.state.documents.lock().await.remove(&uri);
}
