//! Immutable structural patterns.
//!
//! A [`Pattern`] is a validated [`PatternNode`] tree. Patterns carry no
//! mutable state: they are built once at configuration time and reused for
//! every file.
//!
//! # Example
//!
//! ```
//! use refract_core::{ImportedName, Pattern, PatternNode};
//!
//! // `t("message id")` where `t` is imported from "i18n" under any name.
//! let pattern = Pattern::new(PatternNode::call(
//!     PatternNode::imported(["i18n"], [ImportedName::named("t")]),
//!     PatternNode::sequence([PatternNode::capture("id", PatternNode::Any)]),
//! ))?;
//! assert_eq!(pattern.capture_names().collect::<Vec<_>>(), ["id"]);
//! # Ok::<(), refract_core::PatternError>(())
//! ```

mod builders;
mod validate;

use std::collections::BTreeSet;

use refract_syntax::{LiteralValue, NodeKind};

use crate::binding::ImportedName;
use crate::error::PatternError;

/// One node of a pattern tree.
#[derive(Debug, Clone, PartialEq)]
pub enum PatternNode {
    /// Matches any present node.
    Any,
    /// Matches only where a child is missing.
    Absent,
    /// Matches a node of the given kind whose selected children match.
    NodeOfType {
        /// The node kind to match.
        kind: NodeKind,
        /// Child constraints, all of which must hold.
        children: Vec<ChildPattern>,
    },
    /// Records the node matched by `pattern` under `name`.
    Capture {
        /// Capture name, unique along one conjunctive path.
        name: String,
        /// Whether a failed sub-match records the failure sentinel instead
        /// of failing the enclosing pattern.
        optional: bool,
        /// The captured sub-pattern.
        pattern: Box<PatternNode>,
    },
    /// Tries each branch in order; the first that matches wins.
    Alternation(Vec<PatternNode>),
    /// Every part must match the same node.
    All(Vec<PatternNode>),
    /// An identifier or member access that resolves to one of `exports` of
    /// one of `modules`.
    ImportedBinding {
        /// Accepted module specifiers.
        modules: Vec<String>,
        /// Accepted exports.
        exports: Vec<ImportedName>,
    },
    /// An identifier-like node with exactly this text.
    Name(String),
    /// A literal with this runtime value.
    Literal(LiteralValue),
    /// The elements of an argument list or array literal, by position.
    Sequence {
        /// Patterns for the leading elements. Missing trailing elements are
        /// matched as absent.
        items: Vec<PatternNode>,
        /// Pattern every remaining element must match; `None` forbids
        /// extra elements.
        rest: Option<Box<PatternNode>>,
    },
    /// Static properties of an object literal or attributes of a JSX
    /// element.
    Props(PropsPattern),
}

/// Selects a child of the node being matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChildSelector {
    /// The first child in the named grammar field.
    Field(String),
    /// The n-th named child, ignoring comments.
    Nth(usize),
}

/// A constraint on one child of a [`PatternNode::NodeOfType`].
#[derive(Debug, Clone, PartialEq)]
pub struct ChildPattern {
    /// Which child to inspect.
    pub selector: ChildSelector,
    /// Pattern the child must match. A missing child is matched as absent.
    pub pattern: PatternNode,
}

impl ChildPattern {
    /// Constrains the child in grammar field `field`.
    #[must_use]
    pub fn field(field: impl Into<String>, pattern: PatternNode) -> Self {
        Self {
            selector: ChildSelector::Field(field.into()),
            pattern,
        }
    }

    /// Constrains the `index`-th named child.
    #[must_use]
    pub const fn nth(index: usize, pattern: PatternNode) -> Self {
        Self {
            selector: ChildSelector::Nth(index),
            pattern,
        }
    }
}

/// Property constraints for object literals and JSX attributes.
///
/// Any spread or computed key makes the static shape unknowable, so such
/// nodes never match.
#[derive(Debug, Clone, PartialEq)]
pub struct PropsPattern {
    /// Keyed constraints. A key that is not present is matched as absent.
    pub entries: Vec<(String, PatternNode)>,
    /// When set, properties not listed in `entries` fail the match.
    pub closed: bool,
}

impl PatternNode {
    /// Returns whether this pattern explicitly asks for a node of `kind`.
    pub(crate) fn names_kind(&self, kind: NodeKind) -> bool {
        match self {
            Self::NodeOfType { kind: own, .. } => *own == kind,
            Self::Capture { pattern, .. } => pattern.names_kind(kind),
            Self::Alternation(parts) | Self::All(parts) => {
                parts.iter().any(|part| part.names_kind(kind))
            }
            Self::Any
            | Self::Absent
            | Self::ImportedBinding { .. }
            | Self::Name(_)
            | Self::Literal(_)
            | Self::Sequence { .. }
            | Self::Props(_) => false,
        }
    }
}

/// A validated, immutable pattern.
#[derive(Debug, Clone, PartialEq)]
pub struct Pattern {
    root: PatternNode,
    captures: BTreeSet<String>,
}

impl Pattern {
    /// Validates a pattern tree.
    ///
    /// # Errors
    ///
    /// Returns a [`PatternError`] if a capture name is empty or repeated on
    /// one conjunctive path, a capture sits inside a repeated sequence
    /// element, a combinator has no branches, an imported binding lists no
    /// modules or exports, a property key repeats, or a node pattern names
    /// [`NodeKind::Other`].
    pub fn new(root: PatternNode) -> Result<Self, PatternError> {
        let captures = validate::declared_captures(&root)?;
        Ok(Self { root, captures })
    }

    /// Returns the pattern tree.
    #[must_use]
    pub const fn root(&self) -> &PatternNode {
        &self.root
    }

    /// Returns every capture name the pattern declares, sorted.
    pub fn capture_names(&self) -> impl Iterator<Item = &str> {
        self.captures.iter().map(String::as_str)
    }

    pub(crate) const fn declared(&self) -> &BTreeSet<String> {
        &self.captures
    }
}

impl TryFrom<PatternNode> for Pattern {
    type Error = PatternError;

    fn try_from(root: PatternNode) -> Result<Self, Self::Error> {
        Self::new(root)
    }
}
