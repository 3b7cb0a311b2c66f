//! Tree-sitter powered syntax layer for JavaScript and TypeScript.
//!
//! This crate provides everything the structural matcher needs to know about
//! a source file:
//!
//! - **Parsing** via [`Parser`] for JavaScript, TypeScript and TSX
//! - **Node classification** via [`NodeKind`], a closed enumeration of the
//!   node shapes patterns can name
//! - **Literal evaluation** via [`literal_value`], comparing literals by
//!   runtime value rather than spelling
//! - **Scope analysis** via [`ScopeTree`], an implementation of the
//!   [`ScopeResolver`] capability
//!
//! # Example
//!
//! ```
//! use refract_syntax::{Parser, ScopeResolver, ScopeTree, SupportedLanguage};
//!
//! let mut parser = Parser::new(SupportedLanguage::TypeScript)?;
//! let parsed = parser.parse("import { t } from 'i18n';\nfunction f(t) { return t; }")?;
//! let scopes = ScopeTree::build(&parsed);
//!
//! assert!(scopes.scope_declares(scopes.module_scope(), "t"));
//! # Ok::<(), refract_syntax::SyntaxError>(())
//! ```

mod error;
mod kind;
mod language;
mod literal;
mod parser;
mod position;
mod scope;

pub use error::SyntaxError;
pub use kind::{NodeKind, is_intrinsic_jsx_tag};
pub use language::{LanguageParseError, SupportedLanguage};
pub use literal::{LiteralValue, literal_value, parse_number, static_key, string_value};
pub use parser::{ParseResult, Parser, SyntaxErrorInfo};
pub use position::{line_indent, point_to_one_based};
pub use scope::{ScopeId, ScopeKind, ScopeResolver, ScopeTree};

#[cfg(test)]
mod tests;
