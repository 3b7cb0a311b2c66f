//! Text edits and their application.
//!
//! Listeners never mutate the tree they are visiting. Fixes are collected
//! as [`TextEdit`] values against the original source and applied after the
//! traversal, either all at once with [`apply_edits`] or, when several
//! fixes may conflict, with [`apply_first_non_overlapping`].

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::error::EditError;

/// A single textual change against the original source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum TextEdit {
    /// Insert `text` at `offset`.
    Insert {
        /// Byte offset of the insertion point.
        offset: usize,
        /// Inserted text.
        text: String,
    },
    /// Replace the bytes in `range` with `text`.
    Replace {
        /// Replaced byte range.
        range: Range<usize>,
        /// Replacement text.
        text: String,
    },
}

impl TextEdit {
    /// Creates an insertion.
    #[must_use]
    pub fn insert(offset: usize, text: impl Into<String>) -> Self {
        Self::Insert {
            offset,
            text: text.into(),
        }
    }

    /// Creates a replacement.
    #[must_use]
    pub fn replace(range: Range<usize>, text: impl Into<String>) -> Self {
        Self::Replace {
            range,
            text: text.into(),
        }
    }

    /// Returns the byte range this edit consumes; empty for insertions.
    #[must_use]
    pub fn range(&self) -> Range<usize> {
        match self {
            Self::Insert { offset, .. } => *offset..*offset,
            Self::Replace { range, .. } => range.clone(),
        }
    }

    /// Returns the new text.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Insert { text, .. } | Self::Replace { text, .. } => text,
        }
    }
}

/// A named group of edits that must be applied together.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fix {
    description: String,
    edits: Vec<TextEdit>,
}

impl Fix {
    /// Creates a fix from its edits.
    #[must_use]
    pub fn new(description: impl Into<String>, edits: Vec<TextEdit>) -> Self {
        Self {
            description: description.into(),
            edits,
        }
    }

    /// Returns the human-readable description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the edits in application order.
    #[must_use]
    pub fn edits(&self) -> &[TextEdit] {
        &self.edits
    }

    /// Appends edits, keeping their order.
    pub fn extend(&mut self, edits: impl IntoIterator<Item = TextEdit>) {
        self.edits.extend(edits);
    }

    /// Appends one edit.
    pub fn push(&mut self, edit: TextEdit) {
        self.edits.push(edit);
    }
}

/// Applies non-overlapping edits to `source`.
///
/// Insertions at the same offset land in the order given. An insertion at
/// either end of a replaced range is allowed and stays outside it.
///
/// # Errors
///
/// Returns an [`EditError`] if an edit is out of bounds, splits a UTF-8
/// character, has an inverted range, or overlaps another edit.
pub fn apply_edits(source: &str, edits: &[TextEdit]) -> Result<String, EditError> {
    let sorted = validate(source, edits)?;
    let mut output = source.to_owned();
    for edit in sorted.into_iter().rev() {
        output.replace_range(edit.range(), edit.text());
    }
    Ok(output)
}

/// Checks every edit against `source` and returns them sorted for
/// application.
fn validate<'e>(source: &str, edits: &'e [TextEdit]) -> Result<Vec<&'e TextEdit>, EditError> {
    for edit in edits {
        check_bounds(source, &edit.range())?;
    }
    let mut sorted: Vec<&TextEdit> = edits.iter().collect();
    sorted.sort_by_key(|edit| {
        let range = edit.range();
        (range.start, range.end)
    });

    let mut furthest: Option<Range<usize>> = None;
    for edit in &sorted {
        let range = edit.range();
        if let Some(previous) = &furthest {
            if overlaps(previous, &range) {
                return Err(EditError::Overlap {
                    first: previous.clone(),
                    second: range,
                });
            }
            if range.end <= previous.end {
                continue;
            }
        }
        furthest = Some(range);
    }
    Ok(sorted)
}

fn check_bounds(source: &str, range: &Range<usize>) -> Result<(), EditError> {
    if range.start > range.end {
        return Err(EditError::InvertedRange {
            start: range.start,
            end: range.end,
        });
    }
    if range.end > source.len() {
        return Err(EditError::OutOfBounds {
            start: range.start,
            end: range.end,
            len: source.len(),
        });
    }
    for offset in [range.start, range.end] {
        if !source.is_char_boundary(offset) {
            return Err(EditError::NotCharBoundary { offset });
        }
    }
    Ok(())
}

/// Ranges are sorted by start. Touching ranges and empty ranges at a
/// boundary do not overlap.
const fn overlaps(earlier: &Range<usize>, later: &Range<usize>) -> bool {
    later.start < earlier.end && earlier.start < later.end
}

/// Outcome of [`apply_first_non_overlapping`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedFixes {
    output: String,
    applied: Vec<usize>,
    skipped: Vec<usize>,
}

impl AppliedFixes {
    /// Returns the edited source.
    #[must_use]
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Returns the indices of fixes that were applied.
    #[must_use]
    pub fn applied(&self) -> &[usize] {
        &self.applied
    }

    /// Returns the indices of fixes skipped because they conflicted with an
    /// earlier fix. Re-running the rules on the output picks them up again.
    #[must_use]
    pub fn skipped(&self) -> &[usize] {
        &self.skipped
    }
}

/// Applies fixes in order, skipping any fix that overlaps one already
/// accepted.
///
/// # Errors
///
/// Returns an [`EditError`] if an accepted fix is internally invalid (out
/// of bounds or splitting a character). Internally overlapping fixes are
/// skipped rather than reported.
pub fn apply_first_non_overlapping(source: &str, fixes: &[Fix]) -> Result<AppliedFixes, EditError> {
    let mut accepted: Vec<TextEdit> = Vec::new();
    let mut applied = Vec::new();
    let mut skipped = Vec::new();

    for (index, fix) in fixes.iter().enumerate() {
        let mut candidate = accepted.clone();
        candidate.extend(fix.edits().iter().cloned());
        match validate(source, &candidate) {
            Ok(_) => {
                accepted = candidate;
                applied.push(index);
            }
            Err(EditError::Overlap { .. }) => skipped.push(index),
            Err(other) => return Err(other),
        }
    }

    let output = apply_edits(source, &accepted)?;
    Ok(AppliedFixes {
        output,
        applied,
        skipped,
    })
}
