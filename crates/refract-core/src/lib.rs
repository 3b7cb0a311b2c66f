//! Structural pattern matching and import-aware fix synthesis for
//! JavaScript and TypeScript codemods.
//!
//! The crate sits on top of `refract_syntax` and provides the pieces a
//! migration rule is made of:
//!
//! - [`Pattern`] and [`PatternNode`]: immutable, validated tree patterns
//!   with captures, alternation and conjunction
//! - [`BindingTable`]: which local names denote which module exports
//! - [`Tracker`]: named events that fire listeners when a pattern matches
//! - [`ImportSynthesizer`]: minimal edits that make an export reachable
//!   under a collision-free name
//! - [`TextEdit`], [`Fix`] and [`Report`]: the output of a rule
//!
//! # Example
//!
//! ```
//! use refract_core::{FileContext, ImportedName, Pattern, PatternNode};
//! use refract_syntax::{Parser, ScopeTree, SupportedLanguage};
//!
//! let source = "import { t as translate } from 'i18n';\ntranslate('hello');";
//! let parsed = Parser::new(SupportedLanguage::TypeScript)?.parse(source)?;
//! let scopes = ScopeTree::build(&parsed);
//! let root = parsed.root_node();
//! let mut ctx = FileContext::new(source, root, &scopes);
//! let import = root.named_child(0).expect("import statement");
//! assert!(ctx.record_import(import));
//!
//! let pattern = Pattern::new(PatternNode::call(
//!     PatternNode::imported(["i18n"], [ImportedName::named("t")]),
//!     PatternNode::sequence([PatternNode::capture("id", PatternNode::Any)]),
//! ))?;
//! let call = root
//!     .named_child(1)
//!     .and_then(|statement| statement.named_child(0))
//!     .expect("call expression");
//! let captures = pattern.matches(call, &ctx).expect("match");
//! assert_eq!(captures.text("id"), Some("'hello'"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod binding;
mod capture;
mod config;
mod context;
mod edit;
mod error;
mod imports;
mod matcher;
mod pattern;
mod report;
mod span;
mod tracker;

pub use binding::{BindingEntry, BindingTable, ImportKind, ImportedName};
pub use capture::{CaptureMap, CaptureRecord, CaptureResult, CapturedNode};
pub use config::{ImportStyle, QuoteStyle, SemicolonStyle};
pub use context::FileContext;
pub use edit::{AppliedFixes, Fix, TextEdit, apply_edits, apply_first_non_overlapping};
pub use error::{EditError, MissingCapture, PatternError};
pub use imports::{
    ImportDeclaration, ImportEditPlan, ImportRequest, ImportSynthesizer, LocalBinding,
    NamedSpecifier, Placement,
};
pub use pattern::{ChildPattern, ChildSelector, Pattern, PatternNode, PropsPattern};
pub use report::{Report, ReportCode};
pub use span::{LineCol, Span};
pub use tracker::{Listener, TrackedMatch, Tracker};

#[cfg(test)]
mod tests;
