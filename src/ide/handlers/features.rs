//! LSP 機能ハンドラー
//!
//! `hover`, `completion`, `inlayHint` の処理を担当します。

use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::{
    CompletionItem,
    CompletionItemKind,
    CompletionParams,
    CompletionResponse,
    Documentation,
    Hover,
    HoverContents,
    HoverParams,
    InlayHint,
    InlayHintLabel,
    InlayHintParams,
    MarkupContent,
    MarkupKind,
    Position,
    Range,
};

use super::super::backend::Backend;
use crate::ide::completion::completions_for;
use crate::ide::decoration::decorations_for;
use crate::ide::hover::hover_at;
use crate::types::{
    SourcePosition,
    SourceRange,
    line_text,
};

/// インレイヒントのラベル接頭辞
const DECORATION_PREFIX: &str = "→ ";

/// `textDocument/hover` リクエストを処理
pub async fn handle_hover(backend: &Backend, params: HoverParams) -> Result<Option<Hover>> {
    let uri = params.text_document_position_params.text_document.uri;
    let position = params.text_document_position_params.position;

    tracing::debug!(uri = %uri, line = position.line, character = position.character, "Hover request");

    let Some(context) = backend.state.lookup_context(&uri).await else {
        tracing::debug!("Document not open or server not initialized: {}", uri);
        return Ok(None);
    };

    let text = &context.source.text;
    let Some(line) = line_text(text, position.line) else {
        return Ok(None);
    };
    let column = SourcePosition::from(position).byte_column(line);

    let result = hover_at(text, position.line, column, &context.extractor, &context.translations);
    let Some(markdown) = result.to_markdown() else {
        tracing::debug!("No translation call at position");
        return Ok(None);
    };

    Ok(Some(Hover {
        contents: HoverContents::Markup(MarkupContent {
            kind: MarkupKind::Markdown,
            value: markdown,
        }),
        range: None,
    }))
}

/// `textDocument/completion` リクエストを処理
pub async fn handle_completion(
    backend: &Backend,
    params: CompletionParams,
) -> Result<Option<CompletionResponse>> {
    let uri = params.text_document_position.text_document.uri;
    let position = params.text_document_position.position;

    tracing::debug!(uri = %uri, line = position.line, character = position.character, "Completion request");

    let Some(context) = backend.state.lookup_context(&uri).await else {
        tracing::debug!("Document not open or server not initialized: {}", uri);
        return Ok(None);
    };

    let Some(line) = line_text(&context.source.text, position.line) else {
        return Ok(None);
    };
    let column = SourcePosition::from(position).byte_column(line);
    let Some(text_before_cursor) = line.get(..column) else {
        return Ok(None);
    };

    let items: Vec<CompletionItem> =
        completions_for(text_before_cursor, &context.extractor, &context.translations)
            .into_iter()
            .map(|candidate| CompletionItem {
                label: candidate.key,
                kind: Some(CompletionItemKind::VALUE),
                detail: Some(candidate.detail),
                documentation: Some(Documentation::MarkupContent(MarkupContent {
                    kind: MarkupKind::Markdown,
                    value: candidate.documentation,
                })),
                insert_text: Some(candidate.insert_text),
                ..CompletionItem::default()
            })
            .collect();

    tracing::debug!("Generated {} completion items", items.len());

    if items.is_empty() { Ok(None) } else { Ok(Some(CompletionResponse::Array(items))) }
}

/// `textDocument/inlayHint` リクエストを処理
///
/// `decorationLanguages` に含まれる言語のドキュメントにのみ、各呼び出しの直後へ翻訳を表示します。
pub async fn handle_inlay_hint(
    backend: &Backend,
    params: InlayHintParams,
) -> Result<Option<Vec<InlayHint>>> {
    let uri = params.text_document.uri;

    tracing::debug!(uri = %uri, "Inlay hint request");

    let languages = backend.config_manager.lock().await.get_settings().decoration_languages.clone();

    let Some(context) = backend.state.lookup_context(&uri).await else {
        return Ok(None);
    };

    if !context.source.is_language_in(&languages) {
        tracing::debug!(language_id = %context.source.language_id, "Decorations disabled for language");
        return Ok(None);
    }

    let text = &context.source.text;
    let hints = decorations_for(text, &context.extractor, &context.translations)
        .into_iter()
        .map(|decoration| {
            let range = SourceRange::from_byte_span(text, decoration.start, decoration.end);
            InlayHint {
                position: Position::from(range.end),
                label: InlayHintLabel::String(format!(
                    "{DECORATION_PREFIX}{}",
                    decoration.display_text
                )),
                kind: None,
                text_edits: None,
                tooltip: None,
                padding_left: Some(true),
                padding_right: None,
                data: None,
            }
        })
        .filter(|hint| in_range(hint.position, &params.range))
        .collect();

    Ok(Some(hints))
}

/// `position` がリクエスト範囲内にあるか
fn in_range(position: Position, range: &Range) -> bool {
    range.start <= position && position <= range.end
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_range_is_inclusive() {
        let range = Range { start: Position::new(1, 0), end: Position::new(3, 5) };

        assert!(in_range(Position::new(1, 0), &range));
        assert!(in_range(Position::new(2, 80), &range));
        assert!(in_range(Position::new(3, 5), &range));
        assert!(!in_range(Position::new(0, 9), &range));
        assert!(!in_range(Position::new(3, 6), &range));
    }
}
