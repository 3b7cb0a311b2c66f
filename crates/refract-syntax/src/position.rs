//! Shared position conversion helpers.
//!
//! Tree-sitter positions are zero-based. For user-facing messages, we prefer
//! one-based line and column numbers.

/// Converts a Tree-sitter position (0-based) to one-based display coordinates.
#[must_use]
pub fn point_to_one_based(pos: tree_sitter::Point) -> (u32, u32) {
    // Line/column numbers will realistically never exceed u32::MAX.
    let line = u32::try_from(pos.row.saturating_add(1)).unwrap_or(u32::MAX);
    let column = u32::try_from(pos.column.saturating_add(1)).unwrap_or(u32::MAX);
    (line, column)
}

/// Returns the whitespace that precedes `offset` on its line.
///
/// Only the run of spaces and tabs directly after the line break is
/// returned; if any other character sits between the line start and
/// `offset`, the indentation is whatever leading whitespace that line has.
#[must_use]
pub fn line_indent(source: &str, offset: usize) -> &str {
    let head = source.get(..offset).unwrap_or(source);
    let line_start = head.rfind('\n').map_or(0, |idx| idx.saturating_add(1));
    let line = source.get(line_start..).unwrap_or_default();
    let width = line
        .char_indices()
        .find(|(_, c)| *c != ' ' && *c != '\t')
        .map_or(line.len(), |(idx, _)| idx);
    line.get(..width).unwrap_or_default()
}
