//! Unit tests for `refract_core`.

mod behaviour;
mod edit_tests;
mod pattern_tests;
mod synthesis_tests;

use refract_syntax::{NodeKind, ParseResult, Parser, ScopeTree, SupportedLanguage};

use crate::FileContext;

/// A parsed and scope-analysed source file.
pub(crate) struct Fixture {
    parsed: ParseResult,
    scopes: ScopeTree,
}

impl Fixture {
    pub(crate) fn new(language: SupportedLanguage, source: &str) -> Self {
        let mut parser = Parser::new(language).expect("parser init");
        let parsed = parser.parse(source).expect("parse");
        let scopes = ScopeTree::build(&parsed);
        Self { parsed, scopes }
    }

    pub(crate) fn ts(source: &str) -> Self {
        Self::new(SupportedLanguage::TypeScript, source)
    }

    pub(crate) fn tsx(source: &str) -> Self {
        Self::new(SupportedLanguage::Tsx, source)
    }

    pub(crate) fn source(&self) -> &str {
        self.parsed.source()
    }

    /// A context with no imports recorded.
    pub(crate) fn bare_context(&self) -> FileContext<'_> {
        FileContext::new(self.parsed.source(), self.parsed.root_node(), &self.scopes)
    }

    /// A context with every top-level import recorded.
    pub(crate) fn context(&self) -> FileContext<'_> {
        let mut ctx = self.bare_context();
        for node in self.named_nodes() {
            if NodeKind::of(node) == NodeKind::ImportStatement {
                ctx.record_import(node);
            }
        }
        ctx
    }

    /// Every named node in pre-order.
    pub(crate) fn named_nodes(&self) -> Vec<tree_sitter::Node<'_>> {
        let mut nodes = Vec::new();
        collect(self.parsed.root_node(), &mut nodes);
        nodes
    }

    /// The `nth` node of `kind` whose text is `text`, in pre-order.
    pub(crate) fn nth(&self, kind: &str, text: &str, nth: usize) -> tree_sitter::Node<'_> {
        self.named_nodes()
            .into_iter()
            .filter(|node| node.kind() == kind && self.parsed.node_text(*node) == text)
            .nth(nth)
            .unwrap_or_else(|| panic!("no {kind} node `{text}` at occurrence {nth}"))
    }

    /// The first node of `kind` whose text is `text`.
    pub(crate) fn find(&self, kind: &str, text: &str) -> tree_sitter::Node<'_> {
        self.nth(kind, text, 0)
    }

    /// The first node of `kind`.
    pub(crate) fn first(&self, kind: &str) -> tree_sitter::Node<'_> {
        self.named_nodes()
            .into_iter()
            .find(|node| node.kind() == kind)
            .unwrap_or_else(|| panic!("no {kind} node"))
    }
}

fn collect<'t>(node: tree_sitter::Node<'t>, out: &mut Vec<tree_sitter::Node<'t>>) {
    if node.is_named() {
        out.push(node);
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect(child, out);
    }
}
