//! Constructors for common pattern shapes.

use refract_syntax::{LiteralValue, NodeKind};

use super::{ChildPattern, PatternNode, PropsPattern};
use crate::binding::ImportedName;

impl PatternNode {
    /// A node of `kind` with the given child constraints.
    #[must_use]
    pub fn node(kind: NodeKind, children: impl IntoIterator<Item = ChildPattern>) -> Self {
        Self::NodeOfType {
            kind,
            children: children.into_iter().collect(),
        }
    }

    /// Any node of `kind`.
    #[must_use]
    pub const fn kind(kind: NodeKind) -> Self {
        Self::NodeOfType {
            kind,
            children: Vec::new(),
        }
    }

    /// A required capture.
    #[must_use]
    pub fn capture(name: impl Into<String>, pattern: Self) -> Self {
        Self::Capture {
            name: name.into(),
            optional: false,
            pattern: Box::new(pattern),
        }
    }

    /// An optional capture, recording the failure sentinel when `pattern`
    /// does not match.
    #[must_use]
    pub fn optional_capture(name: impl Into<String>, pattern: Self) -> Self {
        Self::Capture {
            name: name.into(),
            optional: true,
            pattern: Box::new(pattern),
        }
    }

    /// Ordered alternation.
    #[must_use]
    pub fn alternation(branches: impl IntoIterator<Item = Self>) -> Self {
        Self::Alternation(branches.into_iter().collect())
    }

    /// Conjunction on one node.
    #[must_use]
    pub fn all(parts: impl IntoIterator<Item = Self>) -> Self {
        Self::All(parts.into_iter().collect())
    }

    /// A reference to one of `exports` imported from one of `modules`.
    #[must_use]
    pub fn imported<M, E>(modules: M, exports: E) -> Self
    where
        M: IntoIterator,
        M::Item: Into<String>,
        E: IntoIterator<Item = ImportedName>,
    {
        Self::ImportedBinding {
            modules: modules.into_iter().map(Into::into).collect(),
            exports: exports.into_iter().collect(),
        }
    }

    /// An identifier-like node spelled `name`.
    #[must_use]
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    /// A literal with runtime value `value`.
    #[must_use]
    pub fn literal(value: impl Into<LiteralValue>) -> Self {
        Self::Literal(value.into())
    }

    /// An argument list or array with exactly these elements. Trailing
    /// items may match missing elements (see [`PatternNode::Absent`]).
    #[must_use]
    pub fn sequence(items: impl IntoIterator<Item = Self>) -> Self {
        Self::Sequence {
            items: items.into_iter().collect(),
            rest: None,
        }
    }

    /// An argument list or array whose elements past `items` all match
    /// `rest`.
    #[must_use]
    pub fn sequence_with_rest(items: impl IntoIterator<Item = Self>, rest: Self) -> Self {
        Self::Sequence {
            items: items.into_iter().collect(),
            rest: Some(Box::new(rest)),
        }
    }

    /// Static properties, allowing unlisted keys.
    #[must_use]
    pub fn props<K>(entries: impl IntoIterator<Item = (K, Self)>) -> Self
    where
        K: Into<String>,
    {
        Self::Props(PropsPattern {
            entries: entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
            closed: false,
        })
    }

    /// Static properties, failing on any key not listed.
    #[must_use]
    pub fn props_only<K>(entries: impl IntoIterator<Item = (K, Self)>) -> Self
    where
        K: Into<String>,
    {
        Self::Props(PropsPattern {
            entries: entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
            closed: true,
        })
    }

    /// `callee(args)`.
    #[must_use]
    pub fn call(callee: Self, arguments: Self) -> Self {
        Self::node(
            NodeKind::CallExpression,
            [
                ChildPattern::field("function", callee),
                ChildPattern::field("arguments", arguments),
            ],
        )
    }

    /// `object.property`.
    #[must_use]
    pub fn member(object: Self, property: Self) -> Self {
        Self::node(
            NodeKind::MemberExpression,
            [
                ChildPattern::field("object", object),
                ChildPattern::field("property", property),
            ],
        )
    }

    /// A JSX element, self-closing or not, whose tag name matches `name` and
    /// whose attributes match `props`.
    #[must_use]
    pub fn jsx_element(name: Self, props: Self) -> Self {
        let self_closing = Self::node(
            NodeKind::JsxSelfClosingElement,
            [ChildPattern::field("name", name.clone())],
        );
        let with_children = Self::node(
            NodeKind::JsxElement,
            [ChildPattern::field(
                "open_tag",
                Self::node(
                    NodeKind::JsxOpeningElement,
                    [ChildPattern::field("name", name)],
                ),
            )],
        );
        Self::all([Self::alternation([self_closing, with_children]), props])
    }
}
