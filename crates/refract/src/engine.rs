//! The reference traversal driver.
//!
//! An [`Engine`] parses one file, records every import declaration through
//! the tracker, then feeds each named node to the tracker in pre-order. The
//! per-file [`FileContext`] lives only for the duration of one visit.

use std::path::Path;

use refract_core::{FileContext, Tracker};
use refract_syntax::{ParseResult, Parser, ScopeTree, SupportedLanguage, SyntaxError};
use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::error::EngineError;

const ENGINE_TARGET: &str = "refract::engine";

/// Counters describing one completed visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VisitSummary {
    nodes: usize,
    imports: usize,
    events: usize,
    had_syntax_errors: bool,
    truncated: bool,
}

impl VisitSummary {
    /// Returns the number of named nodes fed to the tracker.
    #[must_use]
    pub const fn nodes(&self) -> usize {
        self.nodes
    }

    /// Returns the number of import declarations the tracker recognised.
    #[must_use]
    pub const fn imports(&self) -> usize {
        self.imports
    }

    /// Returns the number of events fired across all nodes.
    #[must_use]
    pub const fn events(&self) -> usize {
        self.events
    }

    /// Returns whether the parse tree contained syntax errors.
    #[must_use]
    pub const fn had_syntax_errors(&self) -> bool {
        self.had_syntax_errors
    }

    /// Returns whether the walk stopped at the configured event limit.
    #[must_use]
    pub const fn truncated(&self) -> bool {
        self.truncated
    }
}

/// Drives a [`Tracker`] over JavaScript and TypeScript sources.
///
/// # Example
///
/// ```
/// use refract::{Engine, EngineConfig, Pattern, PatternNode, Tracker};
///
/// let engine = Engine::new(EngineConfig::default());
/// let mut tracker = Tracker::new();
/// tracker.register("greet", Pattern::new(PatternNode::name("greet"))?);
/// let summary = engine.visit(&mut tracker, "greet(); greet();")?;
/// assert_eq!(summary.events(), 2);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Default)]
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    /// Creates a new engine with the given configuration.
    #[must_use]
    pub const fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Returns the engine configuration.
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Visits `source` parsed with the configured default language.
    ///
    /// # Errors
    ///
    /// Returns an [`EngineError`] if the parser cannot be created or fails
    /// to produce a tree.
    pub fn visit(&self, tracker: &mut Tracker<'_>, source: &str) -> Result<VisitSummary, EngineError> {
        self.visit_with(tracker, self.config.language(), source, |_| ())
            .map(|(summary, ())| summary)
    }

    /// Visits `source` using the grammar chosen by the extension of `path`.
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError::UnknownLanguage`] wrapped in an
    /// [`EngineError`] when the extension is not recognised, or any parse
    /// failure.
    pub fn visit_path(
        &self,
        tracker: &mut Tracker<'_>,
        path: &Path,
        source: &str,
    ) -> Result<VisitSummary, EngineError> {
        let language = language_for(path)?;
        self.visit_with(tracker, language, source, |_| ())
            .map(|(summary, ())| summary)
    }

    /// Visits `source` and hands the finished [`FileContext`] to `finish`.
    ///
    /// Listeners only see one match at a time. Rules that need a view of the
    /// whole file, such as one import session shared by every usage, do that
    /// work in `finish`, which runs after the walk while the tree and the
    /// binding table are still alive.
    ///
    /// # Errors
    ///
    /// Returns an [`EngineError`] if the parser cannot be created or fails
    /// to produce a tree. `finish` is not called in that case.
    pub fn visit_with<R, F>(
        &self,
        tracker: &mut Tracker<'_>,
        language: SupportedLanguage,
        source: &str,
        finish: F,
    ) -> Result<(VisitSummary, R), EngineError>
    where
        F: for<'t> FnOnce(&FileContext<'t>) -> R,
    {
        let parsed = Parser::new(language)?.parse(source)?;
        let scopes = ScopeTree::build(&parsed);
        let root = parsed.root_node();
        let mut ctx = FileContext::new(parsed.source(), root, &scopes);

        let mut summary = VisitSummary {
            had_syntax_errors: parsed.has_errors(),
            ..VisitSummary::default()
        };
        if summary.had_syntax_errors {
            warn_syntax_errors(&parsed);
        }

        let mut imports = Vec::new();
        walk(root, |node| {
            if node.kind() == "import_statement" {
                imports.push(node);
            }
            Step::Descend
        });
        for node in imports {
            if tracker.track_import(&mut ctx, node) {
                summary.imports += 1;
            }
        }

        let limit = self.config.max_events_per_file();
        let skip_errors = self.config.skip_error_subtrees();
        walk(root, |node| {
            if skip_errors && node.is_error() {
                return Step::Skip;
            }
            if summary.events >= limit {
                summary.truncated = true;
                return Step::Stop;
            }
            summary.nodes += 1;
            summary.events += tracker.feed(node, &ctx);
            Step::Descend
        });

        if summary.truncated {
            warn!(
                target: ENGINE_TARGET,
                limit,
                events = summary.events,
                "event limit reached, remaining nodes not visited"
            );
        }
        debug!(
            target: ENGINE_TARGET,
            %language,
            nodes = summary.nodes,
            imports = summary.imports,
            events = summary.events,
            "visit complete"
        );

        let output = finish(&ctx);
        Ok((summary, output))
    }
}

fn language_for(path: &Path) -> Result<SupportedLanguage, SyntaxError> {
    SupportedLanguage::from_path(path).ok_or_else(|| SyntaxError::unknown_language(path.to_path_buf()))
}

fn warn_syntax_errors(parsed: &ParseResult) {
    let errors = parsed.errors();
    let Some(first) = errors.first() else {
        return;
    };
    warn!(
        target: ENGINE_TARGET,
        count = errors.len(),
        line = first.line,
        column = first.column,
        message = %first.message,
        "source has syntax errors"
    );
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Descend,
    Skip,
    Stop,
}

/// Pre-order walk over the named nodes below and including `root`.
fn walk<'t>(root: tree_sitter::Node<'t>, mut visit: impl FnMut(tree_sitter::Node<'t>) -> Step) {
    let mut cursor = root.walk();
    loop {
        let node = cursor.node();
        let step = if node.is_named() {
            visit(node)
        } else {
            Step::Skip
        };
        if step == Step::Stop {
            return;
        }
        if step == Step::Descend && cursor.goto_first_child() {
            continue;
        }
        while !cursor.goto_next_sibling() {
            if !cursor.goto_parent() {
                return;
            }
        }
    }
}
