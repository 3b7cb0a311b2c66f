//! Per-file visit state.

use refract_syntax::ScopeResolver;

use crate::binding::{BindingEntry, BindingTable};

/// Everything matching needs to know about the file being visited.
///
/// A context is created fresh for every file and owns that file's
/// [`BindingTable`]; nothing in it outlives the visit.
pub struct FileContext<'t> {
    source: &'t str,
    root: tree_sitter::Node<'t>,
    scopes: &'t dyn ScopeResolver,
    bindings: BindingTable,
}

impl<'t> FileContext<'t> {
    /// Creates the context for one file.
    #[must_use]
    pub fn new(source: &'t str, root: tree_sitter::Node<'t>, scopes: &'t dyn ScopeResolver) -> Self {
        Self {
            source,
            root,
            scopes,
            bindings: BindingTable::new(),
        }
    }

    /// Returns the file's source text.
    #[must_use]
    pub const fn source(&self) -> &'t str {
        self.source
    }

    /// Returns the root node of the file.
    #[must_use]
    pub const fn root(&self) -> tree_sitter::Node<'t> {
        self.root
    }

    /// Returns the scope resolver for the file.
    #[must_use]
    pub fn scopes(&self) -> &'t dyn ScopeResolver {
        self.scopes
    }

    /// Returns the import bindings recorded so far.
    #[must_use]
    pub const fn bindings(&self) -> &BindingTable {
        &self.bindings
    }

    /// Returns the source text covered by `node`.
    #[must_use]
    pub fn text(&self, node: tree_sitter::Node<'_>) -> &'t str {
        self.source.get(node.byte_range()).unwrap_or_default()
    }

    /// Records an import statement in the binding table.
    ///
    /// Returns whether the statement was recognised.
    pub fn record_import(&mut self, node: tree_sitter::Node<'t>) -> bool {
        self.bindings.record_import(node, self.source, self.scopes)
    }

    /// Resolves an identifier or member access to the import it denotes.
    #[must_use]
    pub fn resolve(&self, node: tree_sitter::Node<'t>) -> Option<BindingEntry> {
        self.bindings.resolve(node, self.source, self.scopes)
    }
}

impl std::fmt::Debug for FileContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileContext")
            .field("source_len", &self.source.len())
            .field("root", &self.root.kind())
            .field("bindings", &self.bindings)
            .finish_non_exhaustive()
    }
}
