//! Execute Command ハンドラー
//!
//! `workspace/executeCommand` リクエストを処理し、
//! カスタムコマンドを実行します。

use serde::Deserialize;
use serde_json::Value;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::{
    ExecuteCommandParams,
    Url,
};

use super::super::backend::Backend;
use crate::ide::decoration::{
    TranslationDecoration,
    decorations_for,
};

/// ドキュメント内の装飾一覧を返すコマンド
pub const GET_DECORATIONS: &str = "i18n.getDecorations";

/// ロケールファイルを再読み込みするコマンド
pub const RELOAD_LOCALE: &str = "i18n.reloadLocale";

/// `workspace/executeCommand` リクエストを処理
pub async fn handle_execute_command(
    backend: &Backend,
    params: ExecuteCommandParams,
) -> Result<Option<Value>> {
    tracing::debug!(command = %params.command, "Execute Command request");

    match params.command.as_str() {
        GET_DECORATIONS => handle_get_decorations(backend, params.arguments).await,
        RELOAD_LOCALE => handle_reload_locale(backend).await,
        _ => {
            tracing::warn!("Unknown command: {}", params.command);
            Ok(None)
        }
    }
}

/// `i18n.getDecorations` コマンドの引数
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GetDecorationsArgs {
    /// ファイル URI
    uri: String,
}

/// `i18n.getDecorations` コマンドを実行
///
/// ドキュメント内で解決できた呼び出しと、その 1 行表示を返す。
///
/// # Arguments
/// * `arguments[0]` - `GetDecorationsArgs` オブジェクト
///
/// # Returns
/// `TranslationDecoration` の配列（JSON）
async fn handle_get_decorations(backend: &Backend, arguments: Vec<Value>) -> Result<Option<Value>> {
    let Some(first_arg) = arguments.into_iter().next() else {
        tracing::warn!("Missing arguments for {}", GET_DECORATIONS);
        return Ok(Some(serde_json::json!([])));
    };

    let parsed_args: GetDecorationsArgs = match serde_json::from_value(first_arg) {
        Ok(args) => args,
        Err(e) => {
            tracing::warn!("Invalid arguments for {}: {}", GET_DECORATIONS, e);
            return Ok(Some(serde_json::json!([])));
        }
    };

    tracing::debug!(uri = %parsed_args.uri, "Executing {}", GET_DECORATIONS);

    let Ok(uri) = Url::parse(&parsed_args.uri) else {
        tracing::warn!("Invalid URI: {}", parsed_args.uri);
        return Ok(Some(serde_json::json!([])));
    };

    let Some(context) = backend.state.lookup_context(&uri).await else {
        tracing::debug!("Document not open: {}", uri);
        return Ok(Some(serde_json::json!([])));
    };

    let text = &context.source.text;
    let decorations: Vec<TranslationDecoration> =
        decorations_for(text, &context.extractor, &context.translations)
            .into_iter()
            .map(|decoration| TranslationDecoration::from_decoration(text, decoration))
            .collect();

    match serde_json::to_value(&decorations) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            tracing::error!("Failed to serialize decorations: {}", e);
            Ok(Some(serde_json::json!([])))
        }
    }
}

/// `i18n.reloadLocale` コマンドを実行
///
/// # Returns
/// `{ "loaded": bool }`
async fn handle_reload_locale(backend: &Backend) -> Result<Option<Value>> {
    let loaded = backend.reload_locale().await;
    backend.send_decorations_changed().await;

    Ok(Some(serde_json::json!({ "loaded": loaded })))
}
