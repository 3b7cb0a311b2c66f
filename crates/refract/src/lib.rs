//! Refract: structural matching and import-aware fixes for JavaScript and
//! TypeScript codemods.
//!
//! This facade crate re-exports the stable types of [`refract_core`] and
//! [`refract_syntax`] and provides the [`Engine`] that drives a
//! [`Tracker`] over one file at a time.
//!
//! # Core types
//!
//! - [`Pattern`] and [`PatternNode`]: validated tree patterns with captures
//! - [`Tracker`]: named events and their listeners
//! - [`FileContext`] and [`BindingTable`]: per-file import bindings
//! - [`ImportSynthesizer`] and [`ImportRequest`]: minimal import edits
//! - [`TextEdit`], [`Fix`] and [`Report`]: what a rule produces
//! - [`EngineConfig`] and [`Engine`]: the traversal entrypoint
//!
//! # Example
//!
//! ```
//! use std::cell::RefCell;
//!
//! use refract::{Engine, EngineConfig, ImportedName, Pattern, PatternNode, Tracker};
//!
//! let found = RefCell::new(Vec::new());
//! let mut tracker = Tracker::new();
//! tracker.register(
//!     "translate",
//!     Pattern::new(PatternNode::imported(["i18n"], [ImportedName::named("t")]))?,
//! );
//! tracker.listen("translate", |m, ctx| found.borrow_mut().push(ctx.text(m.node()).to_owned()));
//!
//! let engine = Engine::new(EngineConfig::default());
//! engine.visit(&mut tracker, "import { t as tr } from 'i18n';\ntr('a');")?;
//! drop(tracker);
//! assert_eq!(found.into_inner(), vec!["tr".to_owned()]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod config;
mod engine;
mod error;

pub use refract_core::{
    AppliedFixes, BindingEntry, BindingTable, CaptureMap, CaptureRecord, CaptureResult,
    CapturedNode, ChildPattern, ChildSelector, EditError, FileContext, Fix, ImportDeclaration,
    ImportEditPlan, ImportKind, ImportRequest, ImportStyle, ImportSynthesizer, ImportedName,
    LineCol, Listener, LocalBinding, MissingCapture, NamedSpecifier, Pattern, PatternError,
    PatternNode, Placement, PropsPattern, QuoteStyle, Report, ReportCode, SemicolonStyle, Span,
    TextEdit, TrackedMatch, Tracker, apply_edits, apply_first_non_overlapping,
};
pub use refract_syntax::{
    LiteralValue, NodeKind, ParseResult, Parser, ScopeId, ScopeKind, ScopeResolver, ScopeTree,
    SupportedLanguage, SyntaxError, SyntaxErrorInfo,
};

pub use config::EngineConfig;
pub use engine::{Engine, VisitSummary};
pub use error::EngineError;

#[cfg(test)]
mod tests;
