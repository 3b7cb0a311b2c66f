//! Matching patterns against syntax nodes.
//!
//! Matching is a pure function of the pattern, the node and the file
//! context. Branches that may fail work on a trial copy of the capture map
//! which is committed only on success, so a failed alternative never leaves
//! partial captures behind.

mod props;

use refract_syntax::{LiteralValue, NodeKind, literal_value};

use crate::capture::{CaptureMap, CaptureResult, CapturedNode};
use crate::context::FileContext;
use crate::pattern::{ChildPattern, ChildSelector, Pattern, PatternNode, PropsPattern};

impl Pattern {
    /// Attempts to match this pattern rooted at `node`.
    ///
    /// On success every declared capture name is present in the returned
    /// map, bound either to a node or to the failure sentinel.
    ///
    /// Parenthesised expressions and JSX expression containers are
    /// transparent to patterns, so they are never match roots themselves
    /// unless the pattern names their kind explicitly. This keeps a wrapped
    /// node from matching twice.
    #[must_use]
    pub fn matches<'t>(
        &self,
        node: tree_sitter::Node<'t>,
        ctx: &FileContext<'t>,
    ) -> Option<CaptureMap<'t>> {
        let kind = NodeKind::of(node);
        if is_transparent(kind) && !self.root().names_kind(kind) {
            return None;
        }
        let mut captures = CaptureMap::new();
        if Matcher::new(ctx).match_node(self.root(), node, &mut captures) {
            captures.fill_failures(self.declared());
            Some(captures)
        } else {
            None
        }
    }
}

const fn is_transparent(kind: NodeKind) -> bool {
    matches!(
        kind,
        NodeKind::ParenthesizedExpression | NodeKind::JsxExpression
    )
}

/// Strips parentheses and JSX expression containers.
pub(crate) fn unwrap_transparent(mut node: tree_sitter::Node<'_>) -> tree_sitter::Node<'_> {
    while is_transparent(NodeKind::of(node)) {
        match named_children(node).first() {
            Some(inner) => node = *inner,
            None => break,
        }
    }
    node
}

/// Named children of `node`, skipping comments.
pub(crate) fn named_children(node: tree_sitter::Node<'_>) -> Vec<tree_sitter::Node<'_>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|child| !child.is_extra())
        .collect()
}

struct Matcher<'c, 't> {
    ctx: &'c FileContext<'t>,
}

impl<'c, 't> Matcher<'c, 't> {
    const fn new(ctx: &'c FileContext<'t>) -> Self {
        Self { ctx }
    }

    fn match_node(
        &self,
        pattern: &PatternNode,
        node: tree_sitter::Node<'t>,
        captures: &mut CaptureMap<'t>,
    ) -> bool {
        match pattern {
            PatternNode::Any => true,
            PatternNode::Absent => false,
            PatternNode::NodeOfType { kind, children } => {
                let target = if is_transparent(*kind) {
                    node
                } else {
                    unwrap_transparent(node)
                };
                if NodeKind::of(target) != *kind {
                    return false;
                }
                self.trial(captures, |this, trial| {
                    children
                        .iter()
                        .all(|child| this.match_child(child, target, trial))
                })
            }
            PatternNode::Capture {
                name,
                optional,
                pattern: captured_pattern,
            } => {
                if self.trial(captures, |this, trial| this.match_node(captured_pattern, node, trial)) {
                    let inner = unwrap_transparent(node);
                    let captured = CapturedNode::new(inner, node, self.ctx.text(inner));
                    captures.insert(name, CaptureResult::Node(captured));
                    true
                } else if *optional {
                    captures.insert(name, CaptureResult::Failure);
                    true
                } else {
                    false
                }
            }
            PatternNode::Alternation(branches) => branches.iter().any(|branch| {
                self.trial(captures, |this, trial| this.match_node(branch, node, trial))
            }),
            PatternNode::All(parts) => self.trial(captures, |this, trial| {
                parts.iter().all(|part| this.match_node(part, node, trial))
            }),
            PatternNode::ImportedBinding { modules, exports } => self
                .ctx
                .resolve(unwrap_transparent(node))
                .is_some_and(|entry| {
                    modules.iter().any(|module| module == entry.module())
                        && exports.contains(entry.export())
                }),
            PatternNode::Name(expected) => {
                let target = unwrap_transparent(node);
                let kind = NodeKind::of(target);
                (kind.is_name() || kind == NodeKind::JsxNamespaceName)
                    && self.ctx.text(target) == expected
            }
            PatternNode::Literal(expected) => self
                .literal(unwrap_transparent(node))
                .is_some_and(|value| value == *expected),
            PatternNode::Sequence { items, rest } => {
                self.match_sequence(items, rest.as_deref(), unwrap_transparent(node), captures)
            }
            PatternNode::Props(props) => self.match_props(props, unwrap_transparent(node), captures),
        }
    }

    /// Matches a pattern where the grammar has no node at all.
    fn match_missing(&self, pattern: &PatternNode, captures: &mut CaptureMap<'t>) -> bool {
        match pattern {
            PatternNode::Absent => true,
            PatternNode::Capture {
                name,
                optional,
                pattern: captured_pattern,
            } => {
                if self.trial(captures, |this, trial| this.match_missing(captured_pattern, trial))
                    || *optional
                {
                    captures.insert(name, CaptureResult::Failure);
                    true
                } else {
                    false
                }
            }
            PatternNode::Alternation(branches) => branches.iter().any(|branch| {
                self.trial(captures, |this, trial| this.match_missing(branch, trial))
            }),
            PatternNode::All(parts) => self.trial(captures, |this, trial| {
                parts.iter().all(|part| this.match_missing(part, trial))
            }),
            PatternNode::Any
            | PatternNode::NodeOfType { .. }
            | PatternNode::ImportedBinding { .. }
            | PatternNode::Name(_)
            | PatternNode::Literal(_)
            | PatternNode::Sequence { .. }
            | PatternNode::Props(_) => false,
        }
    }

    fn match_optional(
        &self,
        pattern: &PatternNode,
        node: Option<tree_sitter::Node<'t>>,
        captures: &mut CaptureMap<'t>,
    ) -> bool {
        let Some(present) = node else {
            return self.match_missing(pattern, captures);
        };
        self.match_node(pattern, present, captures)
    }

    /// Runs `attempt` on a copy of `captures`, keeping the copy only if the
    /// attempt succeeds.
    fn trial(
        &self,
        captures: &mut CaptureMap<'t>,
        attempt: impl FnOnce(&Self, &mut CaptureMap<'t>) -> bool,
    ) -> bool {
        let mut trial = captures.clone();
        if attempt(self, &mut trial) {
            *captures = trial;
            true
        } else {
            false
        }
    }

    fn match_child(
        &self,
        child: &ChildPattern,
        parent: tree_sitter::Node<'t>,
        captures: &mut CaptureMap<'t>,
    ) -> bool {
        let node = match &child.selector {
            ChildSelector::Field(field) => parent.child_by_field_name(field),
            ChildSelector::Nth(index) => named_children(parent).get(*index).copied(),
        };
        self.match_optional(&child.pattern, node, captures)
    }

    fn match_sequence(
        &self,
        items: &[PatternNode],
        rest: Option<&PatternNode>,
        node: tree_sitter::Node<'t>,
        captures: &mut CaptureMap<'t>,
    ) -> bool {
        if !matches!(NodeKind::of(node), NodeKind::Arguments | NodeKind::Array) {
            return false;
        }
        let elements = named_children(node);
        if rest.is_none() && elements.len() > items.len() {
            return false;
        }

        self.trial(captures, |this, trial| {
            let fixed = items.iter().enumerate().all(|(index, item)| {
                match elements.get(index) {
                    Some(element)
                        if NodeKind::of(*element) == NodeKind::SpreadElement
                            && !item.names_kind(NodeKind::SpreadElement) =>
                    {
                        false
                    }
                    Some(element) => this.match_node(item, *element, trial),
                    None => this.match_missing(item, trial),
                }
            });
            fixed
                && rest.is_none_or(|rest_pattern| {
                    elements
                        .iter()
                        .skip(items.len())
                        .all(|element| this.match_node(rest_pattern, *element, trial))
                })
        })
    }

    fn match_props(
        &self,
        props: &PropsPattern,
        node: tree_sitter::Node<'t>,
        captures: &mut CaptureMap<'t>,
    ) -> bool {
        let Some(present) = props::static_props(node, self.ctx) else {
            return false;
        };
        if props.closed
            && present
                .iter()
                .any(|(key, _)| !props.entries.iter().any(|(listed, _)| listed == key))
        {
            return false;
        }

        self.trial(captures, |this, trial| {
            props.entries.iter().all(|(key, pattern)| {
                // Later duplicates override earlier ones at runtime.
                let value = present
                    .iter()
                    .rev()
                    .find(|(present_key, _)| present_key == key)
                    .map(|(_, value)| *value);
                this.match_optional(pattern, value, trial)
            })
        })
    }

    /// Literal value of `node`, treating a valueless JSX attribute as `true`.
    fn literal(&self, node: tree_sitter::Node<'t>) -> Option<LiteralValue> {
        if NodeKind::of(node) == NodeKind::JsxAttribute {
            return (named_children(node).len() == 1).then_some(LiteralValue::Boolean(true));
        }
        literal_value(node, self.ctx.source())
    }
}
