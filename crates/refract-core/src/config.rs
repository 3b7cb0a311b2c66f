//! Formatting preferences for synthesized import statements.

use serde::{Deserialize, Serialize};

/// Quote character for module specifiers in new import statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteStyle {
    /// Follow the neighbouring import, falling back to double quotes.
    #[default]
    Auto,
    /// Always `'module'`.
    Single,
    /// Always `"module"`.
    Double,
}

/// Statement terminator for new import statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SemicolonStyle {
    /// Follow the neighbouring import, falling back to a semicolon.
    #[default]
    Auto,
    /// Always end with `;`.
    Always,
    /// Never end with `;`.
    Never,
}

/// Formatting preferences for the import synthesizer.
///
/// # Defaults
///
/// Both settings default to `auto`, matching whichever import statement the
/// new one is placed next to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct ImportStyle {
    /// Quote preference.
    pub quotes: QuoteStyle,
    /// Semicolon preference.
    pub semicolons: SemicolonStyle,
}

impl ImportStyle {
    /// Creates a style with explicit preferences.
    #[must_use]
    pub const fn new(quotes: QuoteStyle, semicolons: SemicolonStyle) -> Self {
        Self { quotes, semicolons }
    }

    /// Returns the quote preference.
    #[must_use]
    pub const fn quotes(&self) -> QuoteStyle {
        self.quotes
    }

    /// Returns the semicolon preference.
    #[must_use]
    pub const fn semicolons(&self) -> SemicolonStyle {
        self.semicolons
    }

    /// Resolves the quote character given the neighbouring import's quote.
    #[must_use]
    pub const fn quote_char(&self, neighbour: Option<char>) -> char {
        match (self.quotes, neighbour) {
            (QuoteStyle::Single, _) => '\'',
            (QuoteStyle::Double, _) => '"',
            (QuoteStyle::Auto, Some('\'')) => '\'',
            (QuoteStyle::Auto, _) => '"',
        }
    }

    /// Resolves whether to end with a semicolon given the neighbouring
    /// import's terminator.
    #[must_use]
    pub const fn semicolon(&self, neighbour: Option<bool>) -> bool {
        match (self.semicolons, neighbour) {
            (SemicolonStyle::Always, _) => true,
            (SemicolonStyle::Never, _) => false,
            (SemicolonStyle::Auto, Some(has_semicolon)) => has_semicolon,
            (SemicolonStyle::Auto, None) => true,
        }
    }
}
