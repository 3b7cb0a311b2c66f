//! Reports produced by migration listeners.
//!
//! A listener that recognises a construct either rewrites it, attaching a
//! [`Fix`], or reports that the construct has a shape it cannot migrate
//! automatically. Both travel as a [`Report`] anchored to the node.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::edit::Fix;
use crate::span::Span;

/// Stable codes for migration reports.
///
/// # Example
///
/// ```
/// use refract_core::ReportCode;
///
/// assert_eq!(ReportCode::UnsupportedShape.to_string(), "unsupported-shape");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub enum ReportCode {
    /// The construct was recognised but cannot be rewritten automatically.
    UnsupportedShape,
    /// The construct can be rewritten; a fix is attached.
    Migratable,
}

impl fmt::Display for ReportCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedShape => f.write_str("unsupported-shape"),
            Self::Migratable => f.write_str("migratable"),
        }
    }
}

/// One finding of a migration rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    code: ReportCode,
    message: String,
    span: Span,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    fix: Option<Fix>,
}

impl Report {
    /// Reports a construct at `node` that cannot be migrated automatically.
    #[must_use]
    pub fn unsupported(node: tree_sitter::Node<'_>, message: impl Into<String>) -> Self {
        Self {
            code: ReportCode::UnsupportedShape,
            message: message.into(),
            span: Span::of(node),
            fix: None,
        }
    }

    /// Reports a construct at `node` together with the fix that migrates it.
    #[must_use]
    pub fn migratable(node: tree_sitter::Node<'_>, message: impl Into<String>, fix: Fix) -> Self {
        Self {
            code: ReportCode::Migratable,
            message: message.into(),
            span: Span::of(node),
            fix: Some(fix),
        }
    }

    /// Returns the report code.
    #[must_use]
    pub const fn code(&self) -> ReportCode {
        self.code
    }

    /// Returns the human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the location of the reported node.
    #[must_use]
    pub const fn span(&self) -> &Span {
        &self.span
    }

    /// Returns the attached fix, if any.
    #[must_use]
    pub const fn fix(&self) -> Option<&Fix> {
        self.fix.as_ref()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let start = self.span.start();
        write!(
            f,
            "{}:{}: [{}] {}",
            start.line().saturating_add(1),
            start.column().saturating_add(1),
            self.code,
            self.message
        )
    }
}
