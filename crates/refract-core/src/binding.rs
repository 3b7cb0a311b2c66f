//! Scope-aware index of import bindings.
//!
//! The table is filled by visiting every import statement of a file and
//! answers "which export of which module, if any, does this identifier
//! denote here". Resolution follows the file's lexical scopes: a local
//! declaration that shadows an imported name hides the import for every
//! node inside the shadowing scope.
//!
//! Re-exports are not followed. Only direct imports of the scanned file are
//! resolved.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use refract_syntax::{NodeKind, ScopeId, ScopeResolver, is_intrinsic_jsx_tag, string_value};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::imports::ImportDeclaration;

const BINDING_TARGET: &str = "refract_core::binding";

/// The export an import binding refers to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportedName {
    /// A named export.
    Named(String),
    /// The default export.
    Default,
    /// The module namespace object (`import * as ns`).
    Namespace,
}

impl ImportedName {
    /// Creates a named export reference.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// Maps an export name as written in source, treating `default` as the
    /// default export.
    #[must_use]
    pub fn from_export(name: &str) -> Self {
        if name == "default" {
            Self::Default
        } else {
            Self::Named(name.to_owned())
        }
    }

    /// Returns the export name for named exports.
    #[must_use]
    pub fn as_named(&self) -> Option<&str> {
        match self {
            Self::Named(name) => Some(name),
            Self::Default | Self::Namespace => None,
        }
    }
}

impl fmt::Display for ImportedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => f.write_str(name),
            Self::Default => f.write_str("default"),
            Self::Namespace => f.write_str("*"),
        }
    }
}

/// Whether a binding is usable as a value or only as a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportKind {
    /// A regular import.
    #[default]
    Value,
    /// An `import type` or inline `type` specifier.
    Type,
}

/// One imported local name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindingEntry {
    local: String,
    module: String,
    export: ImportedName,
    kind: ImportKind,
}

impl BindingEntry {
    /// Creates a binding entry.
    #[must_use]
    pub fn new(local: &str, module: &str, export: ImportedName, kind: ImportKind) -> Self {
        Self {
            local: local.to_owned(),
            module: module.to_owned(),
            export,
            kind,
        }
    }

    /// Returns the local name the import is bound to.
    #[must_use]
    pub fn local(&self) -> &str {
        &self.local
    }

    /// Returns the module specifier.
    #[must_use]
    pub fn module(&self) -> &str {
        &self.module
    }

    /// Returns the export this binding denotes.
    #[must_use]
    pub const fn export(&self) -> &ImportedName {
        &self.export
    }

    /// Returns whether the binding is a value or type import.
    #[must_use]
    pub const fn kind(&self) -> ImportKind {
        self.kind
    }
}

/// Per-file table of import bindings keyed by declaring scope and local
/// name.
#[derive(Debug, Default)]
pub struct BindingTable {
    scopes: HashMap<ScopeId, BTreeMap<String, BindingEntry>>,
    declarations: Vec<ImportDeclaration>,
}

impl BindingTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the bindings introduced by an import statement.
    ///
    /// Returns `false`, leaving the table untouched, when `node` is not an
    /// import declaration this crate understands.
    pub fn record_import(
        &mut self,
        node: tree_sitter::Node<'_>,
        source: &str,
        scopes: &dyn ScopeResolver,
    ) -> bool {
        let Some(declaration) = ImportDeclaration::parse(node, source) else {
            trace!(target: BINDING_TARGET, kind = node.kind(), "skipped unrecognised import");
            return false;
        };
        let scope = scopes.scope_at(node);
        let entries = declaration.bindings();
        debug!(
            target: BINDING_TARGET,
            module = %declaration.source,
            bindings = entries.len(),
            %scope,
            "recorded import"
        );
        let table = self.scopes.entry(scope).or_default();
        for entry in entries {
            table.insert(entry.local.clone(), entry);
        }
        self.declarations.push(declaration);
        true
    }

    /// Looks up `name` as declared directly in `scope`.
    ///
    /// Value lookups never see type-only imports and type lookups never see
    /// value imports. This is stricter than import synthesis, where a type
    /// request may reuse a regular import because it carries the type
    /// meaning as well. Callers resolving a type position against a regular
    /// import look it up with [`ImportKind::Value`].
    #[must_use]
    pub fn lookup(&self, scope: ScopeId, name: &str, kind: ImportKind) -> Option<&BindingEntry> {
        self.scopes
            .get(&scope)
            .and_then(|table| table.get(name))
            .filter(|entry| entry.kind == kind)
    }

    /// Resolves an identifier or member access to the import it denotes.
    ///
    /// Supported shapes are value identifiers, type identifiers, property
    /// access on a namespace import (`ns.name`, `ns["name"]`) and qualified
    /// type names (`ns.Type`). Anything else resolves to `None`.
    #[must_use]
    pub fn resolve(
        &self,
        node: tree_sitter::Node<'_>,
        source: &str,
        scopes: &dyn ScopeResolver,
    ) -> Option<BindingEntry> {
        match NodeKind::of(node) {
            NodeKind::Identifier
                if is_import_binding_site(node) || is_intrinsic_jsx_tag(node, source) =>
            {
                None
            }
            NodeKind::Identifier | NodeKind::ShorthandPropertyIdentifier => self
                .resolve_name(node, source, scopes, ImportKind::Value)
                .cloned(),
            NodeKind::TypeIdentifier => self
                .resolve_name(node, source, scopes, ImportKind::Type)
                .cloned(),
            NodeKind::MemberExpression => {
                let property = node.child_by_field_name("property")?;
                if NodeKind::of(property) != NodeKind::PropertyIdentifier {
                    return None;
                }
                let name = source.get(property.byte_range())?;
                self.resolve_namespace_member(node.child_by_field_name("object")?, name, source, scopes)
            }
            NodeKind::SubscriptExpression => {
                let index = node.child_by_field_name("index")?;
                let name = string_value(index, source)?;
                self.resolve_namespace_member(node.child_by_field_name("object")?, &name, source, scopes)
            }
            NodeKind::NestedTypeIdentifier => {
                let namespace = node.child_by_field_name("module")?;
                let member = node.child_by_field_name("name")?;
                let name = source.get(member.byte_range())?;
                let local = source.get(namespace.byte_range())?;
                let entry = [ImportKind::Value, ImportKind::Type]
                    .into_iter()
                    .find_map(|kind| self.resolve_name_text(local, namespace, scopes, kind))?;
                (entry.export == ImportedName::Namespace).then(|| {
                    BindingEntry::new(
                        local,
                        &entry.module,
                        ImportedName::from_export(name),
                        ImportKind::Type,
                    )
                })
            }
            _ => None,
        }
    }

    fn resolve_namespace_member(
        &self,
        object: tree_sitter::Node<'_>,
        member: &str,
        source: &str,
        scopes: &dyn ScopeResolver,
    ) -> Option<BindingEntry> {
        if NodeKind::of(object) != NodeKind::Identifier {
            return None;
        }
        let entry = self.resolve_name(object, source, scopes, ImportKind::Value)?;
        (entry.export == ImportedName::Namespace).then(|| {
            BindingEntry::new(
                &entry.local,
                &entry.module,
                ImportedName::from_export(member),
                ImportKind::Value,
            )
        })
    }

    fn resolve_name(
        &self,
        node: tree_sitter::Node<'_>,
        source: &str,
        scopes: &dyn ScopeResolver,
        kind: ImportKind,
    ) -> Option<&BindingEntry> {
        let name = source.get(node.byte_range())?;
        self.resolve_name_text(name, node, scopes, kind)
    }

    fn resolve_name_text(
        &self,
        name: &str,
        node: tree_sitter::Node<'_>,
        scopes: &dyn ScopeResolver,
        kind: ImportKind,
    ) -> Option<&BindingEntry> {
        // A resolver that knows nothing about the name leaves module-level
        // imports as the only candidates.
        let scope = scopes
            .resolve_declaring_scope(name, node)
            .unwrap_or_else(|| scopes.module_scope());
        self.lookup(scope, name, kind)
    }

    /// Returns every recognised import declaration in source order.
    #[must_use]
    pub fn declarations(&self) -> &[ImportDeclaration] {
        &self.declarations
    }

    /// Iterates over all recorded bindings.
    pub fn entries(&self) -> impl Iterator<Item = &BindingEntry> {
        self.scopes.values().flat_map(BTreeMap::values)
    }

    /// Returns the number of recorded bindings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.scopes.values().map(BTreeMap::len).sum()
    }

    /// Returns whether no bindings were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The local name an import introduces is a declaration, not a use. Names in
/// `export { t } from 'm'` and `export * as ns from 'm'` refer to `m`'s
/// exports, never to local bindings.
fn is_import_binding_site(node: tree_sitter::Node<'_>) -> bool {
    node.parent().is_some_and(|parent| match NodeKind::of(parent) {
        NodeKind::ImportSpecifier | NodeKind::ImportClause | NodeKind::NamespaceImport => true,
        _ => match parent.kind() {
            "namespace_export" => true,
            "export_specifier" => is_reexport_specifier(parent),
            _ => false,
        },
    })
}

fn is_reexport_specifier(specifier: tree_sitter::Node<'_>) -> bool {
    specifier
        .parent()
        .and_then(|clause| clause.parent())
        .is_some_and(|statement| {
            NodeKind::of(statement) == NodeKind::ExportStatement
                && statement.child_by_field_name("source").is_some()
        })
}
