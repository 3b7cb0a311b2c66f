//! Language detection and Tree-sitter grammar selection.
//!
//! This module provides the [`SupportedLanguage`] enum for identifying the
//! ECMAScript dialect of a file and mapping it to a Tree-sitter grammar.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// ECMAScript dialects supported for structural matching.
///
/// Plain JavaScript is parsed with the TSX grammar, which accepts JSX and is
/// a superset of the JavaScript syntax used in application code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupportedLanguage {
    /// JavaScript source files (`.js`, `.jsx`, `.mjs`, `.cjs`).
    JavaScript,
    /// TypeScript source files without JSX (`.ts`, `.mts`, `.cts`).
    #[default]
    TypeScript,
    /// TypeScript source files with JSX (`.tsx`).
    Tsx,
}

impl SupportedLanguage {
    /// Detects the language from a file extension.
    ///
    /// Returns `None` if the extension is not recognised.
    ///
    /// # Examples
    ///
    /// ```
    /// use refract_syntax::SupportedLanguage;
    ///
    /// assert_eq!(
    ///     SupportedLanguage::from_extension("tsx"),
    ///     Some(SupportedLanguage::Tsx)
    /// );
    /// assert_eq!(SupportedLanguage::from_extension("json"), None);
    /// ```
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        let normalised = ext.to_ascii_lowercase();
        match normalised.as_str() {
            "js" | "jsx" | "mjs" | "cjs" => Some(Self::JavaScript),
            "ts" | "mts" | "cts" => Some(Self::TypeScript),
            "tsx" => Some(Self::Tsx),
            _ => None,
        }
    }

    /// Detects the language from a file path by examining its extension.
    ///
    /// Returns `None` if the path has no extension or the extension is not
    /// recognised.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// Returns the Tree-sitter language grammar for this language.
    #[must_use]
    pub fn tree_sitter_language(self) -> tree_sitter::Language {
        match self {
            Self::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            // JSX is only understood by the TSX grammar.
            Self::JavaScript | Self::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
        }
    }

    /// Returns the lower-case identifier for this language.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::JavaScript => "javascript",
            Self::TypeScript => "typescript",
            Self::Tsx => "tsx",
        }
    }

    /// Returns whether files in this language may contain JSX.
    #[must_use]
    pub const fn supports_jsx(self) -> bool {
        matches!(self, Self::JavaScript | Self::Tsx)
    }

    /// Returns all supported languages.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::JavaScript, Self::TypeScript, Self::Tsx]
    }
}

impl fmt::Display for SupportedLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error raised when parsing a language identifier fails.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unsupported language: '{0}'")]
pub struct LanguageParseError(String);

impl LanguageParseError {
    /// Returns the input that failed to parse.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.0
    }
}

impl FromStr for SupportedLanguage {
    type Err = LanguageParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let normalised = input.trim().to_ascii_lowercase();
        match normalised.as_str() {
            "javascript" | "js" | "jsx" => Ok(Self::JavaScript),
            "typescript" | "ts" => Ok(Self::TypeScript),
            "tsx" => Ok(Self::Tsx),
            other => Err(LanguageParseError(other.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("js", SupportedLanguage::JavaScript)]
    #[case("jsx", SupportedLanguage::JavaScript)]
    #[case("mjs", SupportedLanguage::JavaScript)]
    #[case("cjs", SupportedLanguage::JavaScript)]
    #[case("ts", SupportedLanguage::TypeScript)]
    #[case("MTS", SupportedLanguage::TypeScript)]
    #[case("cts", SupportedLanguage::TypeScript)]
    #[case("tsx", SupportedLanguage::Tsx)]
    fn from_extension_recognises_supported_languages(
        #[case] ext: &str,
        #[case] expected: SupportedLanguage,
    ) {
        assert_eq!(SupportedLanguage::from_extension(ext), Some(expected));
    }

    #[rstest]
    #[case("json")]
    #[case("rs")]
    fn from_extension_returns_none_for_unknown(#[case] ext: &str) {
        assert_eq!(SupportedLanguage::from_extension(ext), None);
    }

    #[rstest]
    #[case("src/App.tsx", SupportedLanguage::Tsx)]
    #[case("lib/index.mjs", SupportedLanguage::JavaScript)]
    fn from_path_extracts_extension(#[case] path_str: &str, #[case] expected: SupportedLanguage) {
        assert_eq!(
            SupportedLanguage::from_path(Path::new(path_str)),
            Some(expected)
        );
    }

    #[test]
    fn from_path_returns_none_for_no_extension() {
        assert_eq!(SupportedLanguage::from_path(Path::new("Makefile")), None);
    }

    #[rstest]
    #[case("JavaScript", SupportedLanguage::JavaScript)]
    #[case("ts", SupportedLanguage::TypeScript)]
    #[case(" TSX ", SupportedLanguage::Tsx)]
    fn from_str_parses_language_names(#[case] input: &str, #[case] expected: SupportedLanguage) {
        assert_eq!(SupportedLanguage::from_str(input), Ok(expected));
    }

    #[test]
    fn from_str_reports_rejected_input() {
        let err = "python".parse::<SupportedLanguage>().expect_err("python is unsupported");
        assert_eq!(err.input(), "python");
    }

    #[test]
    fn only_typescript_lacks_jsx() {
        let jsx: Vec<_> = SupportedLanguage::all()
            .iter()
            .filter(|lang| lang.supports_jsx())
            .collect();
        assert_eq!(jsx, [&SupportedLanguage::JavaScript, &SupportedLanguage::Tsx]);
    }
}
