//! ejs-i18n-language-server
//!
//! EJS/HTML テンプレート向けの i18n 翻訳プレビュー Language Server Protocol (LSP) 実装

pub mod config;
pub mod ide;
pub mod indexer;
pub mod input;
pub mod store;
pub mod syntax;
#[cfg(test)]
mod test_utils;
pub mod types;

// Backend を再エクスポート
pub use ide::backend::Backend;
