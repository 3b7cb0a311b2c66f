//! Closed enumeration of the syntax node kinds the matcher understands.
//!
//! Tree-sitter reports node types as strings. [`NodeKind`] lifts the subset
//! that structural patterns inspect into a sum type so that matching code is
//! an exhaustive `match` rather than string comparison. Every other node type
//! maps to [`NodeKind::Other`].

use std::fmt;

macro_rules! node_kinds {
    ($($(#[$doc:meta])* $variant:ident => $kind:literal,)+) => {
        /// Syntax node kinds of the JavaScript/TypeScript grammars.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[non_exhaustive]
        pub enum NodeKind {
            $($(#[$doc])* $variant,)+
            /// Any node type not listed above.
            Other,
        }

        impl NodeKind {
            /// Maps a Tree-sitter node type name to its kind.
            #[must_use]
            pub fn from_type_name(name: &str) -> Self {
                match name {
                    $($kind => Self::$variant,)+
                    _ => Self::Other,
                }
            }

            /// Returns the Tree-sitter node type name for this kind.
            ///
            /// [`NodeKind::Other`] has no grammar name and returns `"other"`.
            #[must_use]
            pub const fn type_name(self) -> &'static str {
                match self {
                    $(Self::$variant => $kind,)+
                    Self::Other => "other",
                }
            }
        }
    };
}

node_kinds! {
    /// The root of a source file.
    Program => "program",
    /// `#!/usr/bin/env node`
    HashBangLine => "hash_bang_line",
    /// `import ... from "m";`
    ImportStatement => "import_statement",
    /// The bindings part of an import statement.
    ImportClause => "import_clause",
    /// `{ a, b as c }` inside an import clause.
    NamedImports => "named_imports",
    /// `* as ns` inside an import clause.
    NamespaceImport => "namespace_import",
    /// One entry of a named import block.
    ImportSpecifier => "import_specifier",
    /// `export ...`
    ExportStatement => "export_statement",
    /// A value-position identifier.
    Identifier => "identifier",
    /// A property name after `.` or an object key.
    PropertyIdentifier => "property_identifier",
    /// `{ a }` in an object literal.
    ShorthandPropertyIdentifier => "shorthand_property_identifier",
    /// `{ a }` in a destructuring pattern.
    ShorthandPropertyIdentifierPattern => "shorthand_property_identifier_pattern",
    /// `#field`
    PrivatePropertyIdentifier => "private_property_identifier",
    /// A type-position identifier.
    TypeIdentifier => "type_identifier",
    /// `ns.Type` in type position.
    NestedTypeIdentifier => "nested_type_identifier",
    /// `this`
    This => "this",
    /// `a.b`
    MemberExpression => "member_expression",
    /// `a[b]`
    SubscriptExpression => "subscript_expression",
    /// `f(x)`
    CallExpression => "call_expression",
    /// `new C(x)`
    NewExpression => "new_expression",
    /// The argument list of a call.
    Arguments => "arguments",
    /// `await x`
    AwaitExpression => "await_expression",
    /// `<a>...</a>`
    JsxElement => "jsx_element",
    /// `<a />`
    JsxSelfClosingElement => "jsx_self_closing_element",
    /// `<a>`
    JsxOpeningElement => "jsx_opening_element",
    /// `</a>`
    JsxClosingElement => "jsx_closing_element",
    /// `name="value"` on a JSX element.
    JsxAttribute => "jsx_attribute",
    /// `{expr}` inside JSX.
    JsxExpression => "jsx_expression",
    /// Literal text between JSX tags.
    JsxText => "jsx_text",
    /// `a:b` in JSX names.
    JsxNamespaceName => "jsx_namespace_name",
    /// `{ ... }` object literal.
    Object => "object",
    /// `key: value` in an object literal.
    Pair => "pair",
    /// `[ ... ]` array literal.
    Array => "array",
    /// `...x`
    SpreadElement => "spread_element",
    /// `[key]: value` key.
    ComputedPropertyName => "computed_property_name",
    /// A method inside an object or class body.
    MethodDefinition => "method_definition",
    /// `"..."` or `'...'`
    String => "string",
    /// Raw text inside a string literal.
    StringFragment => "string_fragment",
    /// `` `...` ``
    TemplateString => "template_string",
    /// `${...}` inside a template string.
    TemplateSubstitution => "template_substitution",
    /// A numeric literal.
    Number => "number",
    /// `true`
    True => "true",
    /// `false`
    False => "false",
    /// `null`
    Null => "null",
    /// `undefined`
    Undefined => "undefined",
    /// `(x)`
    ParenthesizedExpression => "parenthesized_expression",
    /// `-x`, `!x`, `typeof x`
    UnaryExpression => "unary_expression",
    /// `a + b`
    BinaryExpression => "binary_expression",
    /// `a ? b : c`
    TernaryExpression => "ternary_expression",
    /// `a = b`
    AssignmentExpression => "assignment_expression",
    /// `x => y`
    ArrowFunction => "arrow_function",
    /// `function f() {}`
    FunctionDeclaration => "function_declaration",
    /// `function () {}` in expression position.
    FunctionExpression => "function_expression",
    /// `function* g() {}`
    GeneratorFunctionDeclaration => "generator_function_declaration",
    /// `function* () {}` in expression position.
    GeneratorFunction => "generator_function",
    /// `class C {}`
    ClassDeclaration => "class_declaration",
    /// `abstract class C {}`
    AbstractClassDeclaration => "abstract_class_declaration",
    /// `class {}` in expression position.
    Class => "class",
    /// `let` or `const` declaration.
    LexicalDeclaration => "lexical_declaration",
    /// `var` declaration.
    VariableDeclaration => "variable_declaration",
    /// `name = value` in a declaration.
    VariableDeclarator => "variable_declarator",
    /// `type T = ...`
    TypeAliasDeclaration => "type_alias_declaration",
    /// `interface I {}`
    InterfaceDeclaration => "interface_declaration",
    /// `enum E {}`
    EnumDeclaration => "enum_declaration",
    /// An expression used as a statement.
    ExpressionStatement => "expression_statement",
    /// `{ ... }` statement block.
    StatementBlock => "statement_block",
    /// `return x;`
    ReturnStatement => "return_statement",
    /// A comment.
    Comment => "comment",
}

impl NodeKind {
    /// Returns the kind of a Tree-sitter node.
    ///
    /// Error and missing nodes are always [`NodeKind::Other`].
    #[must_use]
    pub fn of(node: tree_sitter::Node<'_>) -> Self {
        if node.is_error() || node.is_missing() {
            return Self::Other;
        }
        Self::from_type_name(node.kind())
    }

    /// Returns whether this kind is an identifier-like leaf whose text is
    /// its name.
    #[must_use]
    pub const fn is_name(self) -> bool {
        matches!(
            self,
            Self::Identifier
                | Self::PropertyIdentifier
                | Self::ShorthandPropertyIdentifier
                | Self::ShorthandPropertyIdentifierPattern
                | Self::PrivatePropertyIdentifier
                | Self::TypeIdentifier
        )
    }

    /// Returns whether this kind is a JSX element with or without children.
    #[must_use]
    pub const fn is_jsx_element(self) -> bool {
        matches!(self, Self::JsxElement | Self::JsxSelfClosingElement)
    }

    /// Returns whether this kind is a literal with a static runtime value.
    #[must_use]
    pub const fn is_literal(self) -> bool {
        matches!(
            self,
            Self::String
                | Self::TemplateString
                | Self::Number
                | Self::True
                | Self::False
                | Self::Null
        )
    }
}

/// Returns whether `node` names an intrinsic JSX element such as `div` or
/// `my-widget`.
///
/// Intrinsic tag names are plain strings at runtime, so they are neither
/// declarations nor references to a binding.
#[must_use]
pub fn is_intrinsic_jsx_tag(node: tree_sitter::Node<'_>, source: &str) -> bool {
    let is_tag_name = node.parent().is_some_and(|parent| {
        matches!(
            NodeKind::of(parent),
            NodeKind::JsxOpeningElement | NodeKind::JsxClosingElement | NodeKind::JsxSelfClosingElement
        ) && parent
            .child_by_field_name("name")
            .is_some_and(|name| name.id() == node.id())
    });
    is_tag_name
        && NodeKind::of(node) == NodeKind::Identifier
        && source
            .get(node.byte_range())
            .is_some_and(|name| name.starts_with(|c: char| c.is_ascii_lowercase()) || name.contains('-'))
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("import_statement", NodeKind::ImportStatement)]
    #[case("jsx_self_closing_element", NodeKind::JsxSelfClosingElement)]
    #[case("member_expression", NodeKind::MemberExpression)]
    #[case("while_statement", NodeKind::Other)]
    #[case("ERROR", NodeKind::Other)]
    fn from_type_name_maps_grammar_names(#[case] name: &str, #[case] expected: NodeKind) {
        assert_eq!(NodeKind::from_type_name(name), expected);
    }

    #[test]
    fn type_name_round_trips_for_named_kinds() {
        let kind = NodeKind::TemplateString;
        assert_eq!(NodeKind::from_type_name(kind.type_name()), kind);
        assert_eq!(NodeKind::Other.type_name(), "other");
    }

    #[test]
    fn classification_helpers() {
        assert!(NodeKind::TypeIdentifier.is_name());
        assert!(!NodeKind::MemberExpression.is_name());
        assert!(NodeKind::JsxElement.is_jsx_element());
        assert!(NodeKind::Null.is_literal());
        assert!(!NodeKind::Undefined.is_literal());
    }
}
