//! Lexical scope analysis.
//!
//! The matcher never inspects scopes directly. It asks a [`ScopeResolver`]
//! which scope encloses a node and which scope declares a name, so any scope
//! analysis satisfying the trait can drive binding resolution. [`ScopeTree`]
//! is the implementation built from a Tree-sitter parse.

mod builder;

use std::fmt;

pub use builder::ScopeTree;

/// Identifier of a scope within one file's scope analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(u32);

impl ScopeId {
    /// Creates a scope identifier from its raw index.
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Returns the raw index of this scope.
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "scope#{}", self.0)
    }
}

/// The construct that introduced a scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeKind {
    /// The top-level module scope.
    Module,
    /// A function, arrow function, method or generator.
    Function,
    /// A block, loop header or `switch` body.
    Block,
    /// A `catch` clause.
    Catch,
    /// The name scope of a named class expression.
    Class,
}

/// Capability interface for lexical scope lookups.
///
/// Implementations answer structural questions about one parsed file. Nodes
/// passed in must belong to the tree the resolver was built from.
pub trait ScopeResolver {
    /// Returns the module (top-level) scope.
    fn module_scope(&self) -> ScopeId;

    /// Returns the innermost scope enclosing `node`.
    fn scope_at(&self, node: tree_sitter::Node<'_>) -> ScopeId;

    /// Returns the parent of `scope`, or `None` for the module scope.
    fn parent(&self, scope: ScopeId) -> Option<ScopeId>;

    /// Returns whether `scope` itself declares `name`.
    fn scope_declares(&self, scope: ScopeId, name: &str) -> bool;

    /// Returns whether any scope in the file declares `name`.
    fn is_declared_anywhere(&self, name: &str) -> bool;

    /// Returns whether `name` is referenced somewhere in the file without
    /// being declared by any enclosing scope.
    fn is_free_reference(&self, name: &str) -> bool;

    /// Resolves the scope declaring `name` as seen from `node`.
    ///
    /// Walks from the innermost scope outwards; the first declaring scope
    /// wins. Returns `None` when no scope on the chain declares the name.
    fn resolve_declaring_scope(&self, name: &str, node: tree_sitter::Node<'_>) -> Option<ScopeId> {
        let mut scope = Some(self.scope_at(node));
        while let Some(current) = scope {
            if self.scope_declares(current, name) {
                return Some(current);
            }
            scope = self.parent(current);
        }
        None
    }

    /// Returns the chain of scopes from `scope` out to the module scope.
    fn scope_chain(&self, scope: ScopeId) -> Vec<ScopeId> {
        let mut chain = vec![scope];
        let mut current = scope;
        while let Some(parent) = self.parent(current) {
            chain.push(parent);
            current = parent;
        }
        chain
    }
}
