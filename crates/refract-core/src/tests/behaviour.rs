//! Behaviour-driven tests for import synthesis.

use std::str::FromStr;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

use super::Fixture;
use crate::{ImportEditPlan, ImportRequest, ImportStyle, ImportSynthesizer, Placement, TextEdit, apply_edits};

// ---------------------------------------------------------------------------
// Typed wrappers for Gherkin step parameters
// ---------------------------------------------------------------------------

/// A quoted string value from a Gherkin feature file.
///
/// Only the outermost quotes are removed; `\n` and `\"` escapes are decoded
/// so multi-line sources fit on one step line.
#[derive(Debug, Clone, PartialEq, Eq)]
struct QuotedString(String);

impl FromStr for QuotedString {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let inner = s
            .strip_prefix('"')
            .and_then(|rest| rest.strip_suffix('"'))
            .unwrap_or(s);
        Ok(Self(inner.replace("\\n", "\n").replace("\\\"", "\"")))
    }
}

impl QuotedString {
    fn as_str(&self) -> &str {
        &self.0
    }
}

// ---------------------------------------------------------------------------
// Test world
// ---------------------------------------------------------------------------

#[derive(Default)]
struct TestWorld {
    source: String,
    requests: Vec<(ImportRequest, Placement)>,
}

impl TestWorld {
    /// Runs one planning session over every request.
    fn outcome(&self) -> (Vec<ImportEditPlan>, String) {
        let fixture = Fixture::tsx(&self.source);
        let ctx = fixture.context();
        let mut synthesizer = ImportSynthesizer::new(&ctx, ImportStyle::default());
        let plans: Vec<ImportEditPlan> = self
            .requests
            .iter()
            .map(|(request, placement)| synthesizer.plan(request, ctx.root(), placement))
            .collect();
        let edits: Vec<TextEdit> = plans
            .iter()
            .flat_map(|plan| plan.edits().iter().cloned())
            .collect();
        let output = apply_edits(&self.source, &edits).expect("apply edits");
        (plans, output)
    }

    fn last_plan(&self) -> ImportEditPlan {
        self.outcome().0.pop().expect("at least one request")
    }
}

#[fixture]
fn world() -> TestWorld {
    TestWorld::default()
}

// ---------------------------------------------------------------------------
// Given steps
// ---------------------------------------------------------------------------

#[given("the source {source}")]
fn given_source(world: &mut TestWorld, source: QuotedString) {
    world.source = source.as_str().to_owned();
}

// ---------------------------------------------------------------------------
// When steps
// ---------------------------------------------------------------------------

#[when("the named export {export} of {module} is requested")]
fn when_requested(world: &mut TestWorld, export: QuotedString, module: QuotedString) {
    world.requests.push((
        ImportRequest::named(module.as_str(), export.as_str()),
        Placement::default(),
    ));
}

#[when("the named export {export} of {module} is requested next to {hint}")]
fn when_requested_near(
    world: &mut TestWorld,
    export: QuotedString,
    module: QuotedString,
    hint: QuotedString,
) {
    world.requests.push((
        ImportRequest::named(module.as_str(), export.as_str()),
        Placement::near([hint.as_str()]),
    ));
}

// ---------------------------------------------------------------------------
// Then steps
// ---------------------------------------------------------------------------

#[then("the output is {expected}")]
fn then_output(world: &mut TestWorld, expected: QuotedString) {
    let (_, output) = world.outcome();
    assert_eq!(output, expected.as_str());
}

#[then("the plan reuses {name}")]
fn then_reuses(world: &mut TestWorld, name: QuotedString) {
    let plan = world.last_plan();
    assert_eq!(
        plan,
        ImportEditPlan::Reuse {
            name: name.as_str().to_owned()
        }
    );
}

#[then("the bound name is {name}")]
fn then_bound_name(world: &mut TestWorld, name: QuotedString) {
    let plan = world.last_plan();
    assert!(!plan.is_reuse(), "expected new edits, got {plan:?}");
    assert_eq!(plan.name(), name.as_str());
}

// ---------------------------------------------------------------------------
// Scenario registration
// ---------------------------------------------------------------------------

#[scenario(
    path = "tests/features/import_synthesis.feature",
    name = "A new import is placed before the hinted module"
)]
fn placed_before_hint(world: TestWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/import_synthesis.feature",
    name = "An empty named block is filled"
)]
fn empty_block_filled(world: TestWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/import_synthesis.feature",
    name = "A visible import is reused without edits"
)]
fn visible_import_reused(world: TestWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/import_synthesis.feature",
    name = "A colliding name receives a numeric suffix"
)]
fn colliding_name_suffixed(world: TestWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/import_synthesis.feature",
    name = "Repeated requests share one binding"
)]
fn repeated_requests_share_binding(world: TestWorld) {
    let _ = world;
}
