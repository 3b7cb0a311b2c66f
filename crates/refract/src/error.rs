//! Errors surfaced by the engine.

use refract_syntax::SyntaxError;
use thiserror::Error;

/// A file could not be visited at all.
///
/// Everything after a successful parse is total: patterns that do not apply
/// simply fire no event.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EngineError {
    /// The language could not be chosen or the parser failed.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
}
