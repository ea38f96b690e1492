//! テスト用ユーティリティ関数
//!
//! 複数のテストモジュールで使用される共通のヘルパー関数を提供します。
#![cfg(test)]
#![allow(clippy::unwrap_used)]

use crate::input::translation::TranslationDocument;
use crate::syntax::KeyExtractor;

/// JSON 文字列から翻訳ドキュメントを作成する
pub(crate) fn parse_document(json: &str) -> TranslationDocument {
    TranslationDocument::parse(json).unwrap()
}

/// デフォルトの関数名 `__` の抽出器を作成する
pub(crate) fn default_extractor() -> KeyExtractor {
    KeyExtractor::new("__").unwrap()
}
