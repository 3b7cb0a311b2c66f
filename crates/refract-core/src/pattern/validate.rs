//! Configuration-time validation of pattern trees.

use std::collections::{BTreeSet, HashSet};

use refract_syntax::NodeKind;

use super::PatternNode;
use crate::error::PatternError;

/// Returns every capture name declared by `root`.
pub(super) fn declared_captures(root: &PatternNode) -> Result<BTreeSet<String>, PatternError> {
    walk(root, false)
}

fn walk(node: &PatternNode, repeated: bool) -> Result<BTreeSet<String>, PatternError> {
    match node {
        PatternNode::Any | PatternNode::Absent | PatternNode::Name(_) | PatternNode::Literal(_) => {
            Ok(BTreeSet::new())
        }
        PatternNode::ImportedBinding { modules, exports } => {
            if modules.is_empty() {
                return Err(PatternError::NoModules);
            }
            if exports.is_empty() {
                return Err(PatternError::NoExports);
            }
            Ok(BTreeSet::new())
        }
        PatternNode::NodeOfType { kind, children } => {
            if *kind == NodeKind::Other {
                return Err(PatternError::UnnamedKind);
            }
            conjoin(children.iter().map(|child| &child.pattern), repeated)
        }
        PatternNode::Capture { name, pattern, .. } => {
            if name.is_empty() {
                return Err(PatternError::EmptyCaptureName);
            }
            if repeated {
                return Err(PatternError::CaptureInRepetition { name: name.clone() });
            }
            let mut names = walk(pattern, repeated)?;
            if !names.insert(name.clone()) {
                return Err(PatternError::duplicate_capture(name.as_str()));
            }
            Ok(names)
        }
        PatternNode::Alternation(branches) => {
            if branches.is_empty() {
                return Err(PatternError::EmptyCombinator {
                    combinator: "alternation",
                });
            }
            // Branches are exclusive, so they may reuse names.
            let mut names = BTreeSet::new();
            for branch in branches {
                names.extend(walk(branch, repeated)?);
            }
            Ok(names)
        }
        PatternNode::All(parts) => {
            if parts.is_empty() {
                return Err(PatternError::EmptyCombinator {
                    combinator: "conjunction",
                });
            }
            conjoin(parts.iter(), repeated)
        }
        PatternNode::Sequence { items, rest } => {
            let mut names = conjoin(items.iter(), repeated)?;
            if let Some(rest_pattern) = rest {
                merge(&mut names, walk(rest_pattern, true)?)?;
            }
            Ok(names)
        }
        PatternNode::Props(props) => {
            let mut keys = HashSet::new();
            for (key, _) in &props.entries {
                if !keys.insert(key.as_str()) {
                    return Err(PatternError::DuplicateProperty { key: key.clone() });
                }
            }
            conjoin(props.entries.iter().map(|(_, pattern)| pattern), repeated)
        }
    }
}

fn conjoin<'p>(
    parts: impl Iterator<Item = &'p PatternNode>,
    repeated: bool,
) -> Result<BTreeSet<String>, PatternError> {
    let mut names = BTreeSet::new();
    for part in parts {
        merge(&mut names, walk(part, repeated)?)?;
    }
    Ok(names)
}

fn merge(names: &mut BTreeSet<String>, more: BTreeSet<String>) -> Result<(), PatternError> {
    for name in more {
        if names.contains(&name) {
            return Err(PatternError::duplicate_capture(name));
        }
        names.insert(name);
    }
    Ok(())
}
