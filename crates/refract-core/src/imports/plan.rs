//! The import edit synthesizer.
//!
//! Given an export a fix wants to reference, the synthesizer either finds a
//! local name that already denotes it or produces the smallest edit that
//! introduces one. Every decision is a deterministic function of the file's
//! imports, its scopes and the bindings planned earlier in the same session.

use std::collections::{BTreeSet, HashSet};

use refract_syntax::{NodeKind, line_indent};
use tracing::debug;

use super::declaration::ImportDeclaration;
use crate::binding::{ImportKind, ImportedName};
use crate::config::ImportStyle;
use crate::context::FileContext;
use crate::edit::TextEdit;

const SYNTH_TARGET: &str = "refract_core::imports";

/// A binding a fix needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRequest {
    module: String,
    export: ImportedName,
    local: Option<String>,
    kind: ImportKind,
}

impl ImportRequest {
    /// Requests the named export `export` of `module`.
    ///
    /// The local name defaults to the export name.
    #[must_use]
    pub fn named(module: impl Into<String>, export: &str) -> Self {
        Self {
            module: module.into(),
            export: ImportedName::from_export(export),
            local: None,
            kind: ImportKind::Value,
        }
    }

    /// Requests the default export of `module`, preferably bound as `local`.
    #[must_use]
    pub fn default_export(module: impl Into<String>, local: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            export: ImportedName::Default,
            local: Some(local.into()),
            kind: ImportKind::Value,
        }
    }

    /// Requests the namespace object of `module`, preferably bound as
    /// `local`.
    #[must_use]
    pub fn namespace(module: impl Into<String>, local: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            export: ImportedName::Namespace,
            local: Some(local.into()),
            kind: ImportKind::Value,
        }
    }

    /// Marks the request as type-only.
    #[must_use]
    pub fn as_type(mut self) -> Self {
        self.kind = ImportKind::Type;
        self
    }

    /// Sets the preferred local name.
    #[must_use]
    pub fn with_local(mut self, local: impl Into<String>) -> Self {
        self.local = Some(local.into());
        self
    }

    /// Returns the module specifier.
    #[must_use]
    pub fn module(&self) -> &str {
        &self.module
    }

    /// Returns the requested export.
    #[must_use]
    pub const fn export(&self) -> &ImportedName {
        &self.export
    }

    /// Returns whether a value or type binding is requested.
    #[must_use]
    pub const fn kind(&self) -> ImportKind {
        self.kind
    }

    fn base_name(&self) -> String {
        let raw = match (&self.local, &self.export) {
            (Some(local), _) => local.as_str(),
            (None, ImportedName::Named(name)) => name.as_str(),
            (None, ImportedName::Default | ImportedName::Namespace) => self
                .module
                .rsplit('/')
                .find(|segment| !segment.is_empty())
                .unwrap_or("imported"),
        };
        sanitise_identifier(raw)
    }
}

/// Where a new import statement may go.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Placement {
    position_hints: Vec<String>,
    insert_after_last: bool,
}

impl Placement {
    /// Places new statements before the first import of any of `modules`,
    /// or at the top of the program.
    #[must_use]
    pub fn near<M>(modules: M) -> Self
    where
        M: IntoIterator,
        M::Item: Into<String>,
    {
        Self {
            position_hints: modules.into_iter().map(Into::into).collect(),
            insert_after_last: false,
        }
    }

    /// Places new statements after the last existing import.
    #[must_use]
    pub const fn after_last() -> Self {
        Self {
            position_hints: Vec::new(),
            insert_after_last: true,
        }
    }

    /// Returns the modules whose imports new statements are placed before.
    #[must_use]
    pub fn position_hints(&self) -> &[String] {
        &self.position_hints
    }

    /// Returns whether new statements go after the last import.
    #[must_use]
    pub const fn insert_after_last(&self) -> bool {
        self.insert_after_last
    }
}

/// The synthesizer's decision for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportEditPlan {
    /// An existing or already planned binding denotes the export.
    Reuse {
        /// The local name to reference.
        name: String,
    },
    /// The edits introduce a new binding.
    Insert {
        /// Edits against the original source, in application order.
        edits: Vec<TextEdit>,
        /// The local name the edits bind.
        bound_name: String,
    },
}

impl ImportEditPlan {
    /// Returns the local name to reference in either case.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Reuse { name } => name,
            Self::Insert { bound_name, .. } => bound_name,
        }
    }

    /// Returns the edits; empty when an existing binding is reused.
    #[must_use]
    pub fn edits(&self) -> &[TextEdit] {
        match self {
            Self::Reuse { .. } => &[],
            Self::Insert { edits, .. } => edits,
        }
    }

    /// Returns whether the plan reuses a binding without edits.
    #[must_use]
    pub const fn is_reuse(&self) -> bool {
        matches!(self, Self::Reuse { .. })
    }

    /// Consumes the plan, returning its edits.
    #[must_use]
    pub fn into_edits(self) -> Vec<TextEdit> {
        match self {
            Self::Reuse { .. } => Vec::new(),
            Self::Insert { edits, .. } => edits,
        }
    }
}

#[derive(Debug, Clone)]
struct PlannedBinding {
    module: String,
    export: ImportedName,
    kind: ImportKind,
    local: String,
}

/// An import planning session for one fix.
///
/// The session remembers the bindings it has planned, so a second request
/// for the same export reuses the first answer and distinct requests never
/// receive colliding names. Names a caller introduces by other means can be
/// fed back with [`reserve`](Self::reserve).
pub struct ImportSynthesizer<'c, 't> {
    ctx: &'c FileContext<'t>,
    style: ImportStyle,
    planned: Vec<PlannedBinding>,
    reserved: BTreeSet<String>,
    /// Start offsets of statements whose binding shape an earlier plan
    /// changed; their original join points are no longer valid.
    reshaped: HashSet<usize>,
}

impl<'c, 't> ImportSynthesizer<'c, 't> {
    /// Starts a session over a file whose imports have all been recorded.
    #[must_use]
    pub fn new(ctx: &'c FileContext<'t>, style: ImportStyle) -> Self {
        Self {
            ctx,
            style,
            planned: Vec::new(),
            reserved: BTreeSet::new(),
            reshaped: HashSet::new(),
        }
    }

    /// Marks `name` as taken for the rest of the session.
    pub fn reserve(&mut self, name: impl Into<String>) {
        self.reserved.insert(name.into());
    }

    /// Returns the local names bound by plans of this session.
    pub fn planned_names(&self) -> impl Iterator<Item = &str> {
        self.planned.iter().map(|planned| planned.local.as_str())
    }

    /// Plans access to `request` from the code at `usage`.
    ///
    /// Reuses a visible existing or planned binding when possible, otherwise
    /// chooses a collision-free local name and extends an existing import of
    /// the module or inserts a new statement according to `placement`.
    pub fn plan(
        &mut self,
        request: &ImportRequest,
        usage: tree_sitter::Node<'t>,
        placement: &Placement,
    ) -> ImportEditPlan {
        if let Some(name) = self.reusable(request, usage) {
            debug!(
                target: SYNTH_TARGET,
                module = %request.module,
                export = %request.export,
                name = %name,
                "reusing binding"
            );
            return ImportEditPlan::Reuse { name };
        }

        let local = self.fresh_name(&request.base_name());
        let (edit, strategy) = self.append(request, &local).map_or_else(
            || self.new_statement(request, &local, placement),
            |appended| (appended, "append"),
        );
        debug!(
            target: SYNTH_TARGET,
            module = %request.module,
            export = %request.export,
            name = %local,
            strategy,
            "planned import edit"
        );

        self.reserved.insert(local.clone());
        self.planned.push(PlannedBinding {
            module: request.module.clone(),
            export: request.export.clone(),
            kind: request.kind,
            local: local.clone(),
        });
        ImportEditPlan::Insert {
            edits: vec![edit],
            bound_name: local,
        }
    }

    fn declarations(&self) -> &'c [ImportDeclaration] {
        self.ctx.bindings().declarations()
    }

    fn reusable(&self, request: &ImportRequest, usage: tree_sitter::Node<'t>) -> Option<String> {
        if let Some(planned) = self.planned.iter().find(|candidate| {
            candidate.module == request.module
                && candidate.export == request.export
                && satisfies(candidate.kind, request.kind)
        }) {
            return Some(planned.local.clone());
        }

        self.declarations()
            .iter()
            .filter(|declaration| declaration.source == request.module)
            .flat_map(ImportDeclaration::bindings)
            .find(|entry| {
                *entry.export() == request.export
                    && satisfies(entry.kind(), request.kind)
                    && self.visible_at(entry.local(), usage)
            })
            .map(|entry| entry.local().to_owned())
    }

    /// Whether the module-level `name` is not shadowed at `usage`.
    fn visible_at(&self, name: &str, usage: tree_sitter::Node<'t>) -> bool {
        let scopes = self.ctx.scopes();
        scopes
            .resolve_declaring_scope(name, usage)
            .is_none_or(|scope| scope == scopes.module_scope())
    }

    fn is_taken(&self, name: &str) -> bool {
        let scopes = self.ctx.scopes();
        self.reserved.contains(name)
            || scopes.is_declared_anywhere(name)
            || scopes.is_free_reference(name)
            || self.ctx.bindings().entries().any(|entry| entry.local() == name)
    }

    /// `base`, or `base0`, `base1`, ... whichever is free first.
    fn fresh_name(&self, base: &str) -> String {
        if !self.is_taken(base) {
            return base.to_owned();
        }
        (0_u64..)
            .map(|suffix| format!("{base}{suffix}"))
            .find(|candidate| !self.is_taken(candidate))
            .unwrap_or_else(|| base.to_owned())
    }

    /// Extends the first eligible import of the requested module.
    fn append(&mut self, request: &ImportRequest, local: &str) -> Option<TextEdit> {
        let (edit, reshapes, start) = self
            .declarations()
            .iter()
            .filter(|declaration| {
                declaration.source == request.module
                    && !self.reshaped.contains(&declaration.range.start)
            })
            .find_map(|declaration| {
                self.append_to(declaration, request, local)
                    .map(|(edit, reshapes)| (edit, reshapes, declaration.range.start))
            })?;
        if reshapes {
            self.reshaped.insert(start);
        }
        Some(edit)
    }

    /// Returns the edit adding the binding to `declaration` and whether it
    /// changes the statement's shape.
    fn append_to(
        &self,
        declaration: &ImportDeclaration,
        request: &ImportRequest,
        local: &str,
    ) -> Option<(TextEdit, bool)> {
        if declaration.namespace.is_some() || declaration.is_side_effect() {
            return None;
        }
        let wants_type = request.kind == ImportKind::Type;
        match &request.export {
            ImportedName::Namespace => None,
            ImportedName::Default => {
                // `import type A, { B }` is not valid TypeScript.
                if wants_type || declaration.type_only || declaration.default.is_some() {
                    return None;
                }
                let block = declaration.named_block.as_ref()?;
                Some((TextEdit::insert(block.start, format!("{local}, ")), true))
            }
            ImportedName::Named(export) => {
                if declaration.type_only && !wants_type {
                    return None;
                }
                let modifier = if wants_type && !declaration.type_only {
                    "type "
                } else {
                    ""
                };
                let specifier = format!(
                    "{modifier}{}",
                    specifier_text(export, local, declaration.quote)
                );

                if let Some(last) = declaration.named.last() {
                    return Some((TextEdit::insert(last.range.end, format!(", {specifier}")), false));
                }
                if let Some(block) = &declaration.named_block {
                    return self.fill_empty_block(block.start, block.end, &specifier);
                }
                let default = declaration.default.as_ref()?;
                if declaration.type_only {
                    return None;
                }
                Some((
                    TextEdit::insert(default.range.end, format!(", {{ {specifier} }}")),
                    true,
                ))
            }
        }
    }

    fn fill_empty_block(&self, start: usize, end: usize, specifier: &str) -> Option<(TextEdit, bool)> {
        let inner_start = start.saturating_add(1);
        let inner_end = end.saturating_sub(1);
        let inner = self.ctx.source().get(inner_start..inner_end)?;
        if inner.is_empty() {
            Some((TextEdit::insert(inner_start, format!(" {specifier} ")), true))
        } else if inner.trim().is_empty() {
            Some((
                TextEdit::replace(inner_start..inner_end, format!(" {specifier} ")),
                true,
            ))
        } else {
            // Only comments inside the braces; leave them alone.
            None
        }
    }

    fn new_statement(
        &self,
        request: &ImportRequest,
        local: &str,
        placement: &Placement,
    ) -> (TextEdit, &'static str) {
        let source = self.ctx.source();
        let declarations = self.declarations();

        if placement.insert_after_last
            && let Some(last) = declarations.iter().max_by_key(|declaration| declaration.range.end)
        {
            let statement = self.statement_text(request, local, Some(last));
            let indent = line_indent(source, last.range.start);
            let offset = after_statement(source, last.range.end);
            return (
                TextEdit::insert(offset, format!("\n{indent}{statement}")),
                "after_last",
            );
        }

        if let Some(anchor) = declarations.iter().find(|declaration| {
            placement
                .position_hints
                .iter()
                .any(|hint| *hint == declaration.source)
        }) {
            let statement = self.statement_text(request, local, Some(anchor));
            let indent = line_indent(source, anchor.range.start);
            return (
                TextEdit::insert(anchor.range.start, format!("{statement}\n{indent}")),
                "near_hint",
            );
        }

        let statement = self.statement_text(request, local, declarations.first());
        (self.top_of_program(&statement), "top")
    }

    /// Inserts `statement` before the first statement of the program,
    /// after any hashbang line and directive prologue.
    fn top_of_program(&self, statement: &str) -> TextEdit {
        let source = self.ctx.source();
        let root = self.ctx.root();
        let mut cursor = root.walk();
        let mut preamble_end = None;
        let mut first_statement = None;
        for child in root.named_children(&mut cursor) {
            if child.is_extra() {
                continue;
            }
            if NodeKind::of(child) == NodeKind::HashBangLine || is_directive(child) {
                preamble_end = Some(child.end_byte());
                continue;
            }
            first_statement = Some(child);
            break;
        }

        match (first_statement, preamble_end) {
            (Some(first), _) => {
                let indent = line_indent(source, first.start_byte());
                TextEdit::insert(first.start_byte(), format!("{statement}\n{indent}"))
            }
            (None, Some(end)) => TextEdit::insert(end, format!("\n{statement}")),
            (None, None) => TextEdit::insert(0, format!("{statement}\n")),
        }
    }

    fn statement_text(
        &self,
        request: &ImportRequest,
        local: &str,
        neighbour: Option<&ImportDeclaration>,
    ) -> String {
        let quote = self.style.quote_char(neighbour.map(|declaration| declaration.quote));
        let semicolon = if self
            .style
            .semicolon(neighbour.map(|declaration| declaration.has_semicolon))
        {
            ";"
        } else {
            ""
        };
        let modifier = match request.kind {
            ImportKind::Type => "type ",
            ImportKind::Value => "",
        };
        let clause = match &request.export {
            ImportedName::Named(export) => format!("{{ {} }}", specifier_text(export, local, quote)),
            ImportedName::Default => local.to_owned(),
            ImportedName::Namespace => format!("* as {local}"),
        };
        let module = quote_string(&request.module, quote);
        format!("import {modifier}{clause} from {module}{semicolon}")
    }
}

/// Whether a binding of kind `have` can stand in for a request of kind
/// `want`. Regular imports carry the type meaning too; `import type` does
/// not carry the value.
///
/// [`crate::BindingTable::lookup`] is stricter and keeps the two kinds
/// apart, so reuse goes through this check rather than a typed lookup.
fn satisfies(have: ImportKind, want: ImportKind) -> bool {
    have == ImportKind::Value || want == ImportKind::Type
}

fn is_directive(node: tree_sitter::Node<'_>) -> bool {
    if NodeKind::of(node) != NodeKind::ExpressionStatement {
        return false;
    }
    let mut cursor = node.walk();
    let mut children = node.named_children(&mut cursor).filter(|child| !child.is_extra());
    matches!(
        (children.next(), children.next()),
        (Some(expression), None) if NodeKind::of(expression) == NodeKind::String
    )
}

/// Offset at which to add a line after the statement ending at `end`:
/// the end of its line when only whitespace or a line comment follows.
fn after_statement(source: &str, end: usize) -> usize {
    let rest = source.get(end..).unwrap_or_default();
    let line_len = rest.find('\n').unwrap_or(rest.len());
    let tail = rest.get(..line_len).unwrap_or_default().trim();
    if tail.is_empty() || tail.starts_with("//") {
        end.saturating_add(rest.get(..line_len).unwrap_or_default().trim_end_matches('\r').len())
    } else {
        end
    }
}

fn specifier_text(export: &str, local: &str, quote: char) -> String {
    if export == local {
        export.to_owned()
    } else if is_identifier(export) {
        format!("{export} as {local}")
    } else {
        format!("{} as {local}", quote_string(export, quote))
    }
}

fn quote_string(value: &str, quote: char) -> String {
    let mut quoted = String::with_capacity(value.len().saturating_add(2));
    quoted.push(quote);
    for c in value.chars() {
        if c == quote || c == '\\' {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push(quote);
    quoted
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|first| first.is_alphabetic() || first == '_' || first == '$')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

/// Turns an arbitrary export or module name into a usable identifier.
fn sanitise_identifier(raw: &str) -> String {
    let mut name = String::with_capacity(raw.len());
    let mut upper_next = false;
    for c in raw.chars() {
        if c.is_alphanumeric() || c == '_' || c == '$' {
            if upper_next {
                name.extend(c.to_uppercase());
            } else {
                name.push(c);
            }
            upper_next = false;
        } else {
            upper_next = !name.is_empty();
        }
    }
    if name.chars().next().is_none_or(char::is_numeric) {
        name.insert(0, '_');
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Trans", "Trans")]
    #[case("@hi18n/react-context", "hi18nReactContext")]
    #[case("react-dom", "reactDom")]
    #[case("2d", "_2d")]
    #[case("", "_")]
    fn sanitise_identifier_camel_cases(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(sanitise_identifier(raw), expected);
    }

    #[rstest]
    #[case("Foo", "Foo", "Foo")]
    #[case("Foo", "Bar", "Foo as Bar")]
    #[case("a-b", "ab", "\"a-b\" as ab")]
    fn specifier_text_aliases_when_needed(#[case] export: &str, #[case] local: &str, #[case] expected: &str) {
        assert_eq!(specifier_text(export, local, '"'), expected);
    }

    #[test]
    fn quote_string_escapes_quotes() {
        assert_eq!(quote_string("it's", '\''), "'it\\'s'");
    }

    #[rstest]
    #[case("import a from 'a';\nfoo();", 18, 18)]
    #[case("import a from 'a'; // keep\nfoo();", 18, 26)]
    #[case("import a from 'a'; foo();", 18, 18)]
    #[case("import a from 'a';", 18, 18)]
    fn after_statement_skips_trailing_comment(#[case] source: &str, #[case] end: usize, #[case] expected: usize) {
        assert_eq!(after_statement(source, end), expected);
    }
}
