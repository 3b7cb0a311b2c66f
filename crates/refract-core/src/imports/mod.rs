//! Import declarations and the import edit synthesizer.

mod declaration;
mod plan;

pub use declaration::{ImportDeclaration, LocalBinding, NamedSpecifier};
pub use plan::{ImportEditPlan, ImportRequest, ImportSynthesizer, Placement};
