//! Capture maps produced by successful matches.
//!
//! A capture binds a name to the node a sub-pattern matched. Optional
//! captures whose sub-pattern did not apply bind [`CaptureResult::Failure`]
//! instead, so every declared name is present after a successful match.

use std::collections::BTreeMap;
use std::collections::btree_map;

use serde::{Deserialize, Serialize};

use crate::error::MissingCapture;
use crate::span::Span;

/// A node captured by a pattern.
///
/// `node` is the matched node with any transparent wrappers (parentheses,
/// JSX expression containers) removed. `root` is the outermost node the
/// capture point saw, which is what a rewrite should replace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapturedNode<'t> {
    node: tree_sitter::Node<'t>,
    root: tree_sitter::Node<'t>,
    text: &'t str,
}

impl<'t> CapturedNode<'t> {
    /// Creates a captured node.
    #[must_use]
    pub const fn new(node: tree_sitter::Node<'t>, root: tree_sitter::Node<'t>, text: &'t str) -> Self {
        Self { node, root, text }
    }

    /// Returns the matched node.
    #[must_use]
    pub const fn node(&self) -> tree_sitter::Node<'t> {
        self.node
    }

    /// Returns the outermost node at the capture point.
    #[must_use]
    pub const fn root(&self) -> tree_sitter::Node<'t> {
        self.root
    }

    /// Returns the source text of the matched node.
    #[must_use]
    pub const fn text(&self) -> &'t str {
        self.text
    }

    /// Returns the span of the matched node.
    #[must_use]
    pub fn span(&self) -> Span {
        Span::of(self.node)
    }

    /// Returns the span of the capture root.
    #[must_use]
    pub fn root_span(&self) -> Span {
        Span::of(self.root)
    }
}

/// The value bound to a capture name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureResult<'t> {
    /// The sub-pattern matched this node.
    Node(CapturedNode<'t>),
    /// The capture is optional and its sub-pattern did not match.
    Failure,
}

impl<'t> CaptureResult<'t> {
    /// Returns the captured node, if any.
    #[must_use]
    pub const fn captured(&self) -> Option<&CapturedNode<'t>> {
        match self {
            Self::Node(captured) => Some(captured),
            Self::Failure => None,
        }
    }

    /// Returns whether this is the failure sentinel.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failure)
    }
}

/// Captures recorded by one successful match, keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaptureMap<'t> {
    entries: BTreeMap<String, CaptureResult<'t>>,
}

impl<'t> CaptureMap<'t> {
    /// Creates an empty capture map.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    pub(crate) fn insert(&mut self, name: &str, result: CaptureResult<'t>) {
        self.entries.insert(name.to_owned(), result);
    }

    pub(crate) fn fill_failures<'n>(&mut self, names: impl IntoIterator<Item = &'n String>) {
        for name in names {
            if !self.entries.contains_key(name) {
                self.entries.insert(name.clone(), CaptureResult::Failure);
            }
        }
    }

    /// Returns the result bound to `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&CaptureResult<'t>> {
        self.entries.get(name)
    }

    /// Returns the captured node bound to `name`.
    ///
    /// Returns `None` when the name is undeclared or bound to the failure
    /// sentinel.
    #[must_use]
    pub fn captured(&self, name: &str) -> Option<&CapturedNode<'t>> {
        self.get(name).and_then(CaptureResult::captured)
    }

    /// Returns the matched syntax node bound to `name`.
    #[must_use]
    pub fn node(&self, name: &str) -> Option<tree_sitter::Node<'t>> {
        self.captured(name).map(CapturedNode::node)
    }

    /// Returns the source text bound to `name`.
    #[must_use]
    pub fn text(&self, name: &str) -> Option<&'t str> {
        self.captured(name).map(CapturedNode::text)
    }

    /// Returns whether `name` is bound to the failure sentinel.
    #[must_use]
    pub fn is_failure(&self, name: &str) -> bool {
        self.get(name).is_some_and(CaptureResult::is_failure)
    }

    /// Returns whether `name` is present in the map.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Returns the captured node bound to `name` or explains why there is
    /// none.
    ///
    /// # Errors
    ///
    /// Returns [`MissingCapture`] if the name is undeclared or bound to the
    /// failure sentinel.
    pub fn require(&self, name: &str) -> Result<&CapturedNode<'t>, MissingCapture> {
        match self.entries.get(name) {
            Some(CaptureResult::Node(captured)) => Ok(captured),
            Some(CaptureResult::Failure) => Err(MissingCapture::Failed(name.to_owned())),
            None => Err(MissingCapture::Undeclared(name.to_owned())),
        }
    }

    /// Requires several captures at once, failing on the first missing one.
    ///
    /// # Errors
    ///
    /// Returns [`MissingCapture`] for the first name, in argument order, that
    /// [`require`](Self::require) rejects.
    pub fn require_all(&self, names: &[&str]) -> Result<Vec<CapturedNode<'t>>, MissingCapture> {
        names
            .iter()
            .map(|name| self.require(name).copied())
            .collect()
    }

    /// Returns the number of bound names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether no names are bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over bindings in name order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, CaptureResult<'t>> {
        self.entries.iter()
    }

    /// Returns an owned, serialisable view of the captures.
    #[must_use]
    pub fn snapshot(&self) -> BTreeMap<String, CaptureRecord> {
        self.entries
            .iter()
            .map(|(name, result)| (name.clone(), CaptureRecord::from(result)))
            .collect()
    }
}

impl<'a, 't> IntoIterator for &'a CaptureMap<'t> {
    type Item = (&'a String, &'a CaptureResult<'t>);
    type IntoIter = btree_map::Iter<'a, String, CaptureResult<'t>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Owned record of one capture, detached from the syntax tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CaptureRecord {
    /// A captured node.
    Node {
        /// The Tree-sitter node kind of the matched node.
        kind: String,
        /// Source text of the matched node.
        text: String,
        /// Span of the matched node.
        span: Span,
        /// Span of the capture root.
        root: Span,
    },
    /// The failure sentinel.
    Failure,
}

impl From<&CaptureResult<'_>> for CaptureRecord {
    fn from(result: &CaptureResult<'_>) -> Self {
        match result {
            CaptureResult::Node(captured) => Self::Node {
                kind: captured.node().kind().to_owned(),
                text: captured.text().to_owned(),
                span: captured.span(),
                root: captured.root_span(),
            },
            CaptureResult::Failure => Self::Failure,
        }
    }
}
