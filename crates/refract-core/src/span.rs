//! Source span and position types for locating code regions.

use std::ops::Range;

use serde::{Deserialize, Serialize};

/// A line and column position within a source file.
///
/// Both fields are zero-indexed to match Tree-sitter conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineCol {
    /// Zero-indexed line number.
    pub line: u32,
    /// Zero-indexed column number (byte offset within the line).
    pub column: u32,
}

impl LineCol {
    /// Creates a new line/column position.
    #[must_use]
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// Returns the zero-indexed line number.
    #[must_use]
    pub const fn line(&self) -> u32 {
        self.line
    }

    /// Returns the zero-indexed column number.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }
}

impl From<tree_sitter::Point> for LineCol {
    fn from(point: tree_sitter::Point) -> Self {
        Self {
            line: u32::try_from(point.row).unwrap_or(u32::MAX),
            column: u32::try_from(point.column).unwrap_or(u32::MAX),
        }
    }
}

/// A byte and line/column span in a UTF-8 source.
///
/// The byte range is half-open: `start_byte` is inclusive and `end_byte` is
/// exclusive. The `start` and `end` positions provide human-readable
/// line/column equivalents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    /// Start byte offset (inclusive).
    pub start_byte: usize,
    /// End byte offset (exclusive).
    pub end_byte: usize,
    /// Start position as line and column.
    pub start: LineCol,
    /// End position as line and column.
    pub end: LineCol,
}

impl Span {
    /// Creates a new span from byte offsets and line/column positions.
    #[must_use]
    pub const fn new(start_byte: usize, end_byte: usize, start: LineCol, end: LineCol) -> Self {
        Self {
            start_byte,
            end_byte,
            start,
            end,
        }
    }

    /// Returns the span covered by a syntax node.
    #[must_use]
    pub fn of(node: tree_sitter::Node<'_>) -> Self {
        Self {
            start_byte: node.start_byte(),
            end_byte: node.end_byte(),
            start: node.start_position().into(),
            end: node.end_position().into(),
        }
    }

    /// Returns the inclusive start byte offset.
    #[must_use]
    pub const fn start_byte(&self) -> usize {
        self.start_byte
    }

    /// Returns the exclusive end byte offset.
    #[must_use]
    pub const fn end_byte(&self) -> usize {
        self.end_byte
    }

    /// Returns the byte range of this span.
    #[must_use]
    pub const fn range(&self) -> Range<usize> {
        self.start_byte..self.end_byte
    }

    /// Returns the start line/column position.
    #[must_use]
    pub const fn start(&self) -> &LineCol {
        &self.start
    }

    /// Returns the end line/column position.
    #[must_use]
    pub const fn end(&self) -> &LineCol {
        &self.end
    }
}
