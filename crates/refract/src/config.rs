//! Engine configuration.

use refract_syntax::SupportedLanguage;
use serde::{Deserialize, Serialize};

/// Configuration for one [`Engine`](crate::Engine).
///
/// # Defaults
///
/// - `language`: `typescript`, used by [`Engine::visit`](crate::Engine::visit)
///   when no path is available
/// - `max_events_per_file`: 10 000; the traversal stops once this many
///   events have fired in one file
/// - `skip_error_subtrees`: `false`; when set, nodes below a syntax error
///   are not fed to the tracker
///
/// # Example
///
/// ```
/// use refract::EngineConfig;
///
/// let config: EngineConfig = serde_json::from_str(r#"{ "max_events_per_file": 5 }"#)?;
/// assert_eq!(config.max_events_per_file(), 5);
/// assert!(!config.skip_error_subtrees());
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct EngineConfig {
    /// Grammar for sources without a path.
    language: SupportedLanguage,
    /// Events fired per file before the traversal is cut short.
    max_events_per_file: usize,
    /// Whether to skip nodes under `ERROR` nodes.
    skip_error_subtrees: bool,
}

impl EngineConfig {
    /// Creates a configuration with explicit values.
    #[must_use]
    pub const fn new(
        language: SupportedLanguage,
        max_events_per_file: usize,
        skip_error_subtrees: bool,
    ) -> Self {
        Self {
            language,
            max_events_per_file,
            skip_error_subtrees,
        }
    }

    /// Returns the default grammar.
    #[must_use]
    pub const fn language(&self) -> SupportedLanguage {
        self.language
    }

    /// Returns the per-file event limit.
    #[must_use]
    pub const fn max_events_per_file(&self) -> usize {
        self.max_events_per_file
    }

    /// Returns whether error subtrees are skipped.
    #[must_use]
    pub const fn skip_error_subtrees(&self) -> bool {
        self.skip_error_subtrees
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            language: SupportedLanguage::TypeScript,
            max_events_per_file: 10_000,
            skip_error_subtrees: false,
        }
    }
}
