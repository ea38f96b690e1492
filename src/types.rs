//! Core types used throughout the project.
//!
//! The core works on UTF-8 byte offsets; LSP positions count UTF-16 code units. Conversions
//! between the two live here.

use tower_lsp::lsp_types;

/// A range in source code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceRange {
    pub start: SourcePosition,
    pub end: SourcePosition,
}

impl From<SourceRange> for lsp_types::Range {
    fn from(range: SourceRange) -> Self {
        Self { start: range.start.into(), end: range.end.into() }
    }
}

/// A position in source code (0-indexed, `character` in UTF-16 code units).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourcePosition {
    pub line: u32,
    pub character: u32,
}

impl From<lsp_types::Position> for SourcePosition {
    fn from(position: lsp_types::Position) -> Self {
        Self { line: position.line, character: position.character }
    }
}

impl From<SourcePosition> for lsp_types::Position {
    fn from(position: SourcePosition) -> Self {
        Self { line: position.line, character: position.character }
    }
}

impl SourceRange {
    /// Converts a byte span of `text` into line/character positions.
    #[must_use]
    pub fn from_byte_span(text: &str, start: usize, end: usize) -> Self {
        Self {
            start: SourcePosition::from_byte_offset(text, start),
            end: SourcePosition::from_byte_offset(text, end),
        }
    }
}

impl SourcePosition {
    /// Position of byte `offset` in `text`.
    ///
    /// Offsets past the end clamp to the end of the text.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_byte_offset(text: &str, offset: usize) -> Self {
        let mut line = 0u32;
        let mut character = 0u32;

        for (index, ch) in text.char_indices() {
            if index >= offset {
                break;
            }
            if ch == '\n' {
                line += 1;
                character = 0;
            } else {
                character += ch.len_utf16() as u32;
            }
        }

        Self { line, character }
    }

    /// Byte column within `line_text` for this position's UTF-16 `character`.
    ///
    /// A character inside a surrogate pair maps to the start of that scalar; columns past the
    /// end clamp to the line length.
    #[must_use]
    pub fn byte_column(&self, line_text: &str) -> usize {
        let mut utf16_units = 0usize;
        for (index, ch) in line_text.char_indices() {
            let next = utf16_units + ch.len_utf16();
            if next > self.character as usize {
                return index;
            }
            utf16_units = next;
        }
        line_text.len()
    }
}

/// Text of line `line` without its line terminator.
#[must_use]
pub fn line_text(text: &str, line: u32) -> Option<&str> {
    let raw = text.split('\n').nth(line as usize)?;
    Some(raw.strip_suffix('\r').unwrap_or(raw))
}
