//! Structured view of `import` statements.

use std::ops::Range;

use refract_syntax::string_value;

use crate::binding::{BindingEntry, ImportKind, ImportedName};

/// A local name bound by a default or namespace import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalBinding {
    /// The local identifier.
    pub local: String,
    /// Byte range of the identifier.
    pub range: Range<usize>,
}

/// One entry of a `{ ... }` import block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedSpecifier {
    /// The export being imported.
    pub imported: ImportedName,
    /// The local name it is bound to.
    pub local: String,
    /// Whether the specifier carries its own `type` modifier.
    pub type_only: bool,
    /// Byte range of the whole specifier.
    pub range: Range<usize>,
}

/// A recognised `import ... from "module"` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDeclaration {
    /// Byte range of the whole statement, including any semicolon.
    pub range: Range<usize>,
    /// Decoded module specifier.
    pub source: String,
    /// Quote character used for the module specifier.
    pub quote: char,
    /// Whether this is an `import type` statement.
    pub type_only: bool,
    /// The default import binding, if any.
    pub default: Option<LocalBinding>,
    /// The namespace import binding, if any.
    pub namespace: Option<LocalBinding>,
    /// Specifiers of the named import block, in source order.
    pub named: Vec<NamedSpecifier>,
    /// Byte range of the `{ ... }` block including braces, if present.
    pub named_block: Option<Range<usize>>,
    /// Whether the statement ends with an explicit semicolon.
    pub has_semicolon: bool,
}

impl ImportDeclaration {
    /// Parses an `import_statement` node.
    ///
    /// Returns `None` for nodes that are not import statements and for forms
    /// this crate does not model (`import x = require(...)`, Flow
    /// `import typeof`, statements with syntax errors).
    #[must_use]
    pub fn parse(node: tree_sitter::Node<'_>, source: &str) -> Option<Self> {
        if node.kind() != "import_statement" || node.has_error() {
            return None;
        }
        let source_node = node.child_by_field_name("source")?;
        let module = string_value(source_node, source)?;
        let quote = source
            .get(source_node.byte_range())
            .and_then(|text| text.chars().next())
            .unwrap_or('"');

        let mut declaration = Self {
            range: node.byte_range(),
            source: module,
            quote,
            type_only: false,
            default: None,
            namespace: None,
            named: Vec::new(),
            named_block: None,
            has_semicolon: false,
        };

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            match child.kind() {
                "type" if !child.is_named() => declaration.type_only = true,
                "typeof" if !child.is_named() => return None,
                "import_require_clause" => return None,
                "import_clause" => declaration.read_clause(child, source)?,
                ";" => declaration.has_semicolon = child.end_byte() > child.start_byte(),
                _ => {}
            }
        }
        Some(declaration)
    }

    fn read_clause(&mut self, clause: tree_sitter::Node<'_>, source: &str) -> Option<()> {
        let mut cursor = clause.walk();
        for part in clause.named_children(&mut cursor) {
            match part.kind() {
                "identifier" => self.default = Some(local_binding(part, source)?),
                "namespace_import" => {
                    let mut inner = part.walk();
                    let name = part
                        .named_children(&mut inner)
                        .find(|child| child.kind() == "identifier")?;
                    self.namespace = Some(local_binding(name, source)?);
                }
                "named_imports" => {
                    self.named_block = Some(part.byte_range());
                    let mut inner = part.walk();
                    for specifier in part.named_children(&mut inner) {
                        if specifier.kind() == "import_specifier" {
                            self.named.push(named_specifier(specifier, source)?);
                        }
                    }
                }
                _ => {}
            }
        }
        Some(())
    }

    /// Returns whether the statement binds nothing (`import "polyfill";`).
    #[must_use]
    pub fn is_side_effect(&self) -> bool {
        self.default.is_none() && self.namespace.is_none() && self.named_block.is_none()
    }

    /// Returns the binding entries this statement introduces, in source
    /// order.
    #[must_use]
    pub fn bindings(&self) -> Vec<BindingEntry> {
        let statement_kind = if self.type_only {
            ImportKind::Type
        } else {
            ImportKind::Value
        };
        let mut entries = Vec::new();
        if let Some(default) = &self.default {
            entries.push(BindingEntry::new(
                &default.local,
                &self.source,
                ImportedName::Default,
                statement_kind,
            ));
        }
        if let Some(namespace) = &self.namespace {
            entries.push(BindingEntry::new(
                &namespace.local,
                &self.source,
                ImportedName::Namespace,
                statement_kind,
            ));
        }
        for specifier in &self.named {
            let kind = if specifier.type_only {
                ImportKind::Type
            } else {
                statement_kind
            };
            entries.push(BindingEntry::new(
                &specifier.local,
                &self.source,
                specifier.imported.clone(),
                kind,
            ));
        }
        entries
    }
}

fn local_binding(node: tree_sitter::Node<'_>, source: &str) -> Option<LocalBinding> {
    let local = source.get(node.byte_range())?.to_owned();
    Some(LocalBinding {
        local,
        range: node.byte_range(),
    })
}

fn named_specifier(node: tree_sitter::Node<'_>, source: &str) -> Option<NamedSpecifier> {
    let name = node.child_by_field_name("name")?;
    let imported = match name.kind() {
        "string" => string_value(name, source)?,
        _ => source.get(name.byte_range())?.to_owned(),
    };
    let local = match node.child_by_field_name("alias") {
        Some(alias) => source.get(alias.byte_range())?.to_owned(),
        // `import { "a-b" }` is a syntax error; a string name needs an alias.
        None if name.kind() == "string" => return None,
        None => imported.clone(),
    };

    let mut cursor = node.walk();
    let type_only = node
        .children(&mut cursor)
        .any(|child| !child.is_named() && child.kind() == "type");

    Some(NamedSpecifier {
        imported: ImportedName::from_export(&imported),
        local,
        type_only,
        range: node.byte_range(),
    })
}
