//! Builds a [`ScopeTree`] from a Tree-sitter parse.

use std::collections::HashSet;
use std::ops::Range;

use tracing::debug;

use super::{ScopeId, ScopeKind, ScopeResolver};
use crate::kind::is_intrinsic_jsx_tag;
use crate::parser::ParseResult;

const SCOPE_TARGET: &str = "refract_syntax::scope";

#[derive(Debug)]
struct ScopeData {
    kind: ScopeKind,
    range: Range<usize>,
    parent: Option<ScopeId>,
    declared: HashSet<String>,
}

/// Lexical scopes of one parsed file.
///
/// Scopes are stored in pre-order, so for any byte range the last scope
/// containing it is the innermost one.
#[derive(Debug)]
pub struct ScopeTree {
    scopes: Vec<ScopeData>,
    free_references: HashSet<String>,
}

impl ScopeTree {
    /// Analyses the scopes of a parsed file.
    #[must_use]
    pub fn build(parse: &ParseResult) -> Self {
        let root = parse.root_node();
        let mut builder = Builder {
            source: parse.source(),
            tree: Self {
                scopes: vec![ScopeData {
                    kind: ScopeKind::Module,
                    range: 0..parse.source().len().max(root.end_byte()),
                    parent: None,
                    declared: HashSet::new(),
                }],
                free_references: HashSet::new(),
            },
            references: Vec::new(),
        };
        let module = ScopeId::new(0);
        builder.visit_children(root, module);

        let Builder {
            mut tree,
            references,
            ..
        } = builder;
        for (range, name) in references {
            let scope = tree.scope_at_range(&range);
            if !tree.chain_declares(scope, &name) {
                tree.free_references.insert(name);
            }
        }

        debug!(
            target: SCOPE_TARGET,
            scopes = tree.scopes.len(),
            free_references = tree.free_references.len(),
            "built scope tree"
        );
        tree
    }

    /// Returns the number of scopes in the file.
    #[must_use]
    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    /// Returns whether the tree holds no scopes.
    ///
    /// A built tree always has a module scope, so this is always `false`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// Returns the kind of construct that introduced `scope`.
    #[must_use]
    pub fn kind(&self, scope: ScopeId) -> Option<ScopeKind> {
        self.data(scope).map(|data| data.kind)
    }

    /// Returns the names declared directly in `scope`, sorted.
    #[must_use]
    pub fn declared_names(&self, scope: ScopeId) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .data(scope)
            .map(|data| data.declared.iter().map(String::as_str).collect())
            .unwrap_or_default();
        names.sort_unstable();
        names
    }

    fn data(&self, scope: ScopeId) -> Option<&ScopeData> {
        usize::try_from(scope.index())
            .ok()
            .and_then(|index| self.scopes.get(index))
    }

    fn scope_at_range(&self, range: &Range<usize>) -> ScopeId {
        self.scopes
            .iter()
            .enumerate()
            .rev()
            .find(|(_, data)| data.range.start <= range.start && range.end <= data.range.end)
            .and_then(|(index, _)| u32::try_from(index).ok())
            .map_or(ScopeId::new(0), ScopeId::new)
    }

    fn chain_declares(&self, scope: ScopeId, name: &str) -> bool {
        self.scope_chain(scope)
            .into_iter()
            .any(|id| self.scope_declares(id, name))
    }
}

impl ScopeResolver for ScopeTree {
    fn module_scope(&self) -> ScopeId {
        ScopeId::new(0)
    }

    fn scope_at(&self, node: tree_sitter::Node<'_>) -> ScopeId {
        self.scope_at_range(&node.byte_range())
    }

    fn parent(&self, scope: ScopeId) -> Option<ScopeId> {
        self.data(scope).and_then(|data| data.parent)
    }

    fn scope_declares(&self, scope: ScopeId, name: &str) -> bool {
        self.data(scope)
            .is_some_and(|data| data.declared.contains(name))
    }

    fn is_declared_anywhere(&self, name: &str) -> bool {
        self.scopes.iter().any(|data| data.declared.contains(name))
    }

    fn is_free_reference(&self, name: &str) -> bool {
        self.free_references.contains(name)
    }
}

struct Builder<'s> {
    source: &'s str,
    tree: ScopeTree,
    references: Vec<(Range<usize>, String)>,
}

impl Builder<'_> {
    fn push_scope(&mut self, kind: ScopeKind, range: Range<usize>, parent: ScopeId) -> ScopeId {
        let index = u32::try_from(self.tree.scopes.len()).unwrap_or(u32::MAX);
        self.tree.scopes.push(ScopeData {
            kind,
            range,
            parent: Some(parent),
            declared: HashSet::new(),
        });
        ScopeId::new(index)
    }

    fn declare(&mut self, scope: ScopeId, name: &str) {
        if let Some(data) = usize::try_from(scope.index())
            .ok()
            .and_then(|index| self.tree.scopes.get_mut(index))
        {
            data.declared.insert(name.to_owned());
        }
    }

    fn text(&self, node: tree_sitter::Node<'_>) -> &str {
        self.source.get(node.byte_range()).unwrap_or_default()
    }

    fn declare_node(&mut self, scope: ScopeId, node: tree_sitter::Node<'_>) {
        let name = self.text(node).to_owned();
        if !name.is_empty() {
            self.declare(scope, &name);
        }
    }

    /// Nearest enclosing function or module scope, where `var` lands.
    fn hoisting_scope(&self, mut scope: ScopeId) -> ScopeId {
        loop {
            match self.tree.kind(scope) {
                Some(ScopeKind::Function | ScopeKind::Module) | None => return scope,
                Some(_) => match self.tree.parent(scope) {
                    Some(parent) => scope = parent,
                    None => return scope,
                },
            }
        }
    }

    fn visit_children(&mut self, node: tree_sitter::Node<'_>, scope: ScopeId) {
        let mut cursor = node.walk();
        let children: Vec<_> = node.named_children(&mut cursor).collect();
        for child in children {
            self.visit(child, scope);
        }
    }

    fn visit(&mut self, node: tree_sitter::Node<'_>, scope: ScopeId) {
        match node.kind() {
            "import_statement" => self.declare_import(node, scope),
            "identifier" if is_intrinsic_jsx_tag(node, self.source) => {}
            "identifier" | "shorthand_property_identifier" => {
                let name = self.text(node).to_owned();
                self.references.push((node.byte_range(), name));
            }
            "function_declaration" | "generator_function_declaration" => {
                if let Some(name) = node.child_by_field_name("name") {
                    self.declare_node(scope, name);
                }
                self.visit_function(node, scope);
            }
            "function_expression" | "generator_function" | "arrow_function"
            | "method_definition" => self.visit_function(node, scope),
            "class_declaration" | "abstract_class_declaration" => {
                if let Some(name) = node.child_by_field_name("name") {
                    self.declare_node(scope, name);
                }
                self.visit_children(node, scope);
            }
            "class" => {
                let Some(name) = node.child_by_field_name("name") else {
                    self.visit_children(node, scope);
                    return;
                };
                let inner = self.push_scope(ScopeKind::Class, node.byte_range(), scope);
                self.declare_node(inner, name);
                self.visit_children(node, inner);
            }
            "type_alias_declaration" | "interface_declaration" | "enum_declaration"
            | "internal_module" => {
                if let Some(name) = node.child_by_field_name("name") {
                    self.declare_node(scope, name);
                }
                self.visit_children(node, scope);
            }
            "statement_block" if is_function_body(node) => self.visit_children(node, scope),
            "statement_block" | "for_statement" | "switch_body" => {
                let inner = self.push_scope(ScopeKind::Block, node.byte_range(), scope);
                self.visit_children(node, inner);
            }
            "for_in_statement" => self.visit_for_in(node, scope),
            "catch_clause" => {
                let inner = self.push_scope(ScopeKind::Catch, node.byte_range(), scope);
                if let Some(param) = node.child_by_field_name("parameter") {
                    self.declare_pattern(inner, param);
                }
                self.visit_children(node, inner);
            }
            "lexical_declaration" => {
                self.declare_declarators(node, scope);
                self.visit_children(node, scope);
            }
            "variable_declaration" => {
                let target = self.hoisting_scope(scope);
                self.declare_declarators(node, target);
                self.visit_children(node, scope);
            }
            _ => self.visit_children(node, scope),
        }
    }

    fn visit_function(&mut self, node: tree_sitter::Node<'_>, scope: ScopeId) {
        let inner = self.push_scope(ScopeKind::Function, node.byte_range(), scope);
        if matches!(node.kind(), "function_expression" | "generator_function")
            && let Some(name) = node.child_by_field_name("name")
        {
            self.declare_node(inner, name);
        }
        if let Some(param) = node.child_by_field_name("parameter") {
            self.declare_pattern(inner, param);
        }
        if let Some(params) = node.child_by_field_name("parameters") {
            let mut cursor = params.walk();
            let declared: Vec<_> = params.named_children(&mut cursor).collect();
            for param in declared {
                self.declare_pattern(inner, param);
            }
        }
        self.visit_children(node, inner);
    }

    fn visit_for_in(&mut self, node: tree_sitter::Node<'_>, scope: ScopeId) {
        let inner = self.push_scope(ScopeKind::Block, node.byte_range(), scope);
        let declaration_kind = node
            .child_by_field_name("kind")
            .map(|keyword| self.text(keyword).to_owned());
        if let (Some(keyword), Some(left)) = (declaration_kind, node.child_by_field_name("left")) {
            let target = if keyword == "var" {
                self.hoisting_scope(scope)
            } else {
                inner
            };
            self.declare_pattern(target, left);
        }
        self.visit_children(node, inner);
    }

    fn declare_import(&mut self, node: tree_sitter::Node<'_>, scope: ScopeId) {
        let mut cursor = node.walk();
        let parts: Vec<_> = node.named_children(&mut cursor).collect();
        for part in parts {
            match part.kind() {
                "import_clause" => self.declare_import_clause(part, scope),
                "import_require_clause" => {
                    let mut inner = part.walk();
                    if let Some(name) = part
                        .named_children(&mut inner)
                        .find(|child| child.kind() == "identifier")
                    {
                        self.declare_node(scope, name);
                    }
                }
                _ => {}
            }
        }
    }

    fn declare_import_clause(&mut self, clause: tree_sitter::Node<'_>, scope: ScopeId) {
        let mut cursor = clause.walk();
        let parts: Vec<_> = clause.named_children(&mut cursor).collect();
        for part in parts {
            match part.kind() {
                "identifier" => self.declare_node(scope, part),
                "namespace_import" => {
                    let mut inner = part.walk();
                    if let Some(name) = part
                        .named_children(&mut inner)
                        .find(|child| child.kind() == "identifier")
                    {
                        self.declare_node(scope, name);
                    }
                }
                "named_imports" => {
                    let mut inner = part.walk();
                    let specifiers: Vec<_> = part
                        .named_children(&mut inner)
                        .filter(|child| child.kind() == "import_specifier")
                        .collect();
                    for specifier in specifiers {
                        if let Some(local) = specifier
                            .child_by_field_name("alias")
                            .or_else(|| specifier.child_by_field_name("name"))
                        {
                            self.declare_node(scope, local);
                        }
                    }
                }
                _ => {}
            }
        }
    }

    fn declare_declarators(&mut self, node: tree_sitter::Node<'_>, scope: ScopeId) {
        let mut cursor = node.walk();
        let declarators: Vec<_> = node
            .named_children(&mut cursor)
            .filter(|child| child.kind() == "variable_declarator")
            .collect();
        for declarator in declarators {
            if let Some(name) = declarator.child_by_field_name("name") {
                self.declare_pattern(scope, name);
            }
        }
    }

    /// Declares every binding introduced by a parameter or destructuring
    /// pattern.
    fn declare_pattern(&mut self, scope: ScopeId, pattern: tree_sitter::Node<'_>) {
        match pattern.kind() {
            "identifier" | "shorthand_property_identifier_pattern" => {
                self.declare_node(scope, pattern);
            }
            "required_parameter" | "optional_parameter" => {
                if let Some(inner) = pattern.child_by_field_name("pattern") {
                    self.declare_pattern(scope, inner);
                }
            }
            "pair_pattern" => {
                if let Some(value) = pattern.child_by_field_name("value") {
                    self.declare_pattern(scope, value);
                }
            }
            "assignment_pattern" | "object_assignment_pattern" => {
                if let Some(left) = pattern.child_by_field_name("left") {
                    self.declare_pattern(scope, left);
                }
            }
            "object_pattern" | "array_pattern" | "rest_pattern" => {
                let mut cursor = pattern.walk();
                let parts: Vec<_> = pattern.named_children(&mut cursor).collect();
                for part in parts {
                    self.declare_pattern(scope, part);
                }
            }
            _ => {}
        }
    }
}

fn is_function_body(block: tree_sitter::Node<'_>) -> bool {
    let Some(parent) = block.parent() else {
        return false;
    };
    matches!(
        parent.kind(),
        "function_declaration"
            | "function_expression"
            | "generator_function_declaration"
            | "generator_function"
            | "arrow_function"
            | "method_definition"
    ) && parent.child_by_field_name("body") == Some(block)
}
