//! Public API checks for the syntax layer.

use std::path::Path;

use insta::assert_snapshot;
use refract_syntax::{NodeKind, Parser, ScopeResolver, ScopeTree, SupportedLanguage};

fn parse_path(path: &str, source: &str) -> refract_syntax::ParseResult {
    let language = SupportedLanguage::from_path(Path::new(path))
        .unwrap_or_else(|| panic!("no language for {path}"));
    let mut parser = Parser::new(language).unwrap_or_else(|err| panic!("parser init: {err}"));
    parser
        .parse(source)
        .unwrap_or_else(|err| panic!("parse {path}: {err}"))
}

#[test]
fn javascript_files_accept_jsx() {
    let parsed = parse_path("App.jsx", "export const App = () => <Trans id=\"hello\" />;");
    assert!(!parsed.has_errors());
}

#[test]
fn typescript_files_reject_jsx() {
    let parsed = parse_path("App.ts", "const el = <Trans id=\"hello\" />;");
    assert!(parsed.has_errors());
}

#[test]
fn top_level_statement_kinds() {
    let parsed = parse_path(
        "index.mjs",
        "#!/usr/bin/env node\n\"use strict\";\nimport a from 'a';\nexport { a };\n",
    );
    let root = parsed.root_node();
    let mut cursor = root.walk();
    let kinds: Vec<String> = root
        .named_children(&mut cursor)
        .map(|node| NodeKind::of(node).to_string())
        .collect();
    assert_snapshot!(kinds.join("\n"), @r"
    hash_bang_line
    expression_statement
    import_statement
    export_statement
    ");
}

#[test]
fn scope_tree_sees_every_import_binding() {
    let parsed = parse_path(
        "app.tsx",
        "import React, * as Everything from 'react';\n\
         import { useState as useLocalState, type FC } from 'react';\n",
    );
    let scopes = ScopeTree::build(&parsed);
    let module = scopes.module_scope();
    assert_eq!(
        scopes.declared_names(module),
        vec!["Everything", "FC", "React", "useLocalState"]
    );
}
