//! Error types for pattern construction, capture access and edit application.
//!
//! Matching itself never fails: a pattern that does not apply is simply "no
//! match". Errors are reserved for configuration faults and for callers that
//! ask for information a match could not provide.

use std::ops::Range;

use thiserror::Error;

/// A configuration-time fault in a pattern description.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum PatternError {
    /// A capture name was empty.
    #[error("capture names must not be empty")]
    EmptyCaptureName,

    /// The same capture name appears twice on one conjunctive path.
    #[error("capture '{name}' is declared more than once")]
    DuplicateCapture {
        /// The repeated capture name.
        name: String,
    },

    /// A capture sits inside a repeated sub-pattern.
    #[error("capture '{name}' cannot be declared inside a repeated sequence element")]
    CaptureInRepetition {
        /// The offending capture name.
        name: String,
    },

    /// An alternation or conjunction has no branches.
    #[error("{combinator} requires at least one branch")]
    EmptyCombinator {
        /// `"alternation"` or `"conjunction"`.
        combinator: &'static str,
    },

    /// An imported-binding pattern names no modules.
    #[error("imported binding pattern lists no modules")]
    NoModules,

    /// An imported-binding pattern names no exports.
    #[error("imported binding pattern lists no exports")]
    NoExports,

    /// The catch-all node kind cannot be matched structurally.
    #[error("node patterns must name a concrete node kind")]
    UnnamedKind,

    /// A property pattern lists the same key twice.
    #[error("property '{key}' is listed more than once")]
    DuplicateProperty {
        /// The repeated key.
        key: String,
    },
}

impl PatternError {
    /// Creates a duplicate capture error.
    #[must_use]
    pub fn duplicate_capture(name: impl Into<String>) -> Self {
        Self::DuplicateCapture { name: name.into() }
    }
}

/// Raised when a listener asks for a capture the match could not provide.
///
/// Listeners use this to fall back to a conservative "needs manual
/// migration" report instead of guessing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MissingCapture {
    /// The pattern never declared the capture.
    #[error("capture '{0}' is not declared by the pattern")]
    Undeclared(String),
    /// The capture was declared optional and its sub-pattern did not match.
    #[error("capture '{0}' did not match")]
    Failed(String),
}

impl MissingCapture {
    /// Returns the capture name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Undeclared(name) | Self::Failed(name) => name,
        }
    }
}

/// Errors raised while applying text edits to a source string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum EditError {
    /// An edit extends past the end of the source.
    #[error("edit range {start}..{end} is out of bounds for source of length {len}")]
    OutOfBounds {
        /// Start offset of the edit.
        start: usize,
        /// End offset of the edit.
        end: usize,
        /// Length of the source.
        len: usize,
    },

    /// An edit range starts after it ends.
    #[error("edit range {start}..{end} is inverted")]
    InvertedRange {
        /// Start offset of the edit.
        start: usize,
        /// End offset of the edit.
        end: usize,
    },

    /// An edit offset splits a UTF-8 character.
    #[error("edit offset {offset} is not on a character boundary")]
    NotCharBoundary {
        /// The offending offset.
        offset: usize,
    },

    /// Two edits touch overlapping text.
    #[error("edits at {first:?} and {second:?} overlap")]
    Overlap {
        /// Range of the earlier edit.
        first: Range<usize>,
        /// Range of the later edit.
        second: Range<usize>,
    },
}
