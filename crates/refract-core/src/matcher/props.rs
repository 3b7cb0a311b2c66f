//! Static property extraction for object literals and JSX elements.

use refract_syntax::{NodeKind, static_key};

use super::named_children;
use crate::context::FileContext;

/// Returns the statically known properties of an object literal or the
/// attributes of a JSX element, in source order.
///
/// Returns `None` when the node has a spread, a computed key, or is not an
/// object or JSX element. A JSX attribute without a value is reported with
/// the attribute node itself as its value.
pub(super) fn static_props<'t>(
    node: tree_sitter::Node<'t>,
    ctx: &FileContext<'t>,
) -> Option<Vec<(String, tree_sitter::Node<'t>)>> {
    match NodeKind::of(node) {
        NodeKind::Object => object_props(node, ctx),
        NodeKind::JsxElement => jsx_attributes(node.child_by_field_name("open_tag")?, ctx),
        NodeKind::JsxSelfClosingElement | NodeKind::JsxOpeningElement => {
            jsx_attributes(node, ctx)
        }
        _ => None,
    }
}

fn object_props<'t>(
    node: tree_sitter::Node<'t>,
    ctx: &FileContext<'t>,
) -> Option<Vec<(String, tree_sitter::Node<'t>)>> {
    named_children(node)
        .into_iter()
        .map(|member| match NodeKind::of(member) {
            NodeKind::Pair => {
                let key = static_key(member.child_by_field_name("key")?, ctx.source())?;
                Some((key, member.child_by_field_name("value")?))
            }
            NodeKind::ShorthandPropertyIdentifier => Some((ctx.text(member).to_owned(), member)),
            NodeKind::MethodDefinition => {
                let key = static_key(member.child_by_field_name("name")?, ctx.source())?;
                Some((key, member))
            }
            _ => None,
        })
        .collect()
}

fn jsx_attributes<'t>(
    element: tree_sitter::Node<'t>,
    ctx: &FileContext<'t>,
) -> Option<Vec<(String, tree_sitter::Node<'t>)>> {
    let mut cursor = element.walk();
    let attributes: Vec<_> = element
        .children_by_field_name("attribute", &mut cursor)
        .collect();
    attributes
        .into_iter()
        .map(|attribute| {
            // Spread attributes are `jsx_expression` nodes.
            if NodeKind::of(attribute) != NodeKind::JsxAttribute {
                return None;
            }
            let parts = named_children(attribute);
            let name = parts.first()?;
            let key = ctx.text(*name).to_owned();
            Some((key, parts.get(1).copied().unwrap_or(attribute)))
        })
        .collect()
}
