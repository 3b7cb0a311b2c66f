//! Import edit synthesis.

use insta::assert_snapshot;
use rstest::rstest;

use super::Fixture;
use crate::{
    ImportEditPlan, ImportRequest, ImportStyle, ImportSynthesizer, Placement, QuoteStyle,
    SemicolonStyle, TextEdit, apply_edits,
};

/// Plans every request at the module level and applies the edits.
fn synthesize(source: &str, requests: &[ImportRequest], placement: &Placement) -> String {
    synthesize_with(source, requests, placement, ImportStyle::default())
}

fn synthesize_with(
    source: &str,
    requests: &[ImportRequest],
    placement: &Placement,
    style: ImportStyle,
) -> String {
    let fixture = Fixture::tsx(source);
    let ctx = fixture.context();
    let mut synthesizer = ImportSynthesizer::new(&ctx, style);
    let edits: Vec<TextEdit> = requests
        .iter()
        .flat_map(|request| synthesizer.plan(request, ctx.root(), placement).into_edits())
        .collect();
    apply_edits(source, &edits).expect("apply edits")
}

#[test]
fn new_statement_goes_before_the_hinted_import() {
    let output = synthesize(
        "import { Trans } from \"@lingui/react\";\nimport { foo } from \"bar\";\n",
        &[ImportRequest::named("@hi18n/react", "Translate")],
        &Placement::near(["@lingui/react"]),
    );

    assert_snapshot!(output.trim_end(), @r#"
    import { Translate } from "@hi18n/react";
    import { Trans } from "@lingui/react";
    import { foo } from "bar";
    "#);
}

#[rstest]
#[case::after_last_specifier(
    "import { useState } from 'react';",
    ImportRequest::named("react", "useEffect"),
    "import { useState, useEffect } from 'react';"
)]
#[case::empty_block(
    "import Foo, {} from \"m\";",
    ImportRequest::named("m", "Bar"),
    "import Foo, { Bar } from \"m\";"
)]
#[case::blank_block(
    "import Foo, {   } from \"m\";",
    ImportRequest::named("m", "Bar"),
    "import Foo, { Bar } from \"m\";"
)]
#[case::default_only(
    "import Foo from \"m\";",
    ImportRequest::named("m", "Bar"),
    "import Foo, { Bar } from \"m\";"
)]
#[case::default_into_named(
    "import { Bar } from \"m\";",
    ImportRequest::default_export("m", "Foo"),
    "import Foo, { Bar } from \"m\";"
)]
#[case::type_into_value_import(
    "import { Button } from \"ui\";",
    ImportRequest::named("ui", "Theme").as_type(),
    "import { Button, type Theme } from \"ui\";"
)]
#[case::type_into_type_import(
    "import type { Props } from \"ui\";",
    ImportRequest::named("ui", "Theme").as_type(),
    "import type { Props, Theme } from \"ui\";"
)]
#[case::aliased(
    "import { a } from \"m\";",
    ImportRequest::named("m", "b").with_local("renamed"),
    "import { a, b as renamed } from \"m\";"
)]
fn existing_imports_are_extended(
    #[case] source: &str,
    #[case] request: ImportRequest,
    #[case] expected: &str,
) {
    let output = synthesize(source, &[request], &Placement::default());

    assert_eq!(output, expected);
}

#[rstest]
#[case::namespace_import(
    "import * as m from \"m\";",
    ImportRequest::named("m", "Bar"),
    "import { Bar } from \"m\";\nimport * as m from \"m\";"
)]
#[case::value_into_type_import(
    "import type { Theme } from \"ui\";",
    ImportRequest::named("ui", "Button"),
    "import { Button } from \"ui\";\nimport type { Theme } from \"ui\";"
)]
#[case::namespace_request(
    "import { a } from \"m\";",
    ImportRequest::namespace("m", "ns"),
    "import * as ns from \"m\";\nimport { a } from \"m\";"
)]
#[case::side_effect_import(
    "import \"m\";",
    ImportRequest::named("m", "a"),
    "import { a } from \"m\";\nimport \"m\";"
)]
fn statements_that_cannot_be_extended_get_a_sibling(
    #[case] source: &str,
    #[case] request: ImportRequest,
    #[case] expected: &str,
) {
    let output = synthesize(source, &[request], &Placement::default());

    assert_eq!(output, expected);
}

#[rstest]
#[case::empty("", "import { x } from \"m\";\n")]
#[case::code_only("run();\n", "import { x } from \"m\";\nrun();\n")]
#[case::prologue(
    "#!/usr/bin/env node\n\"use strict\";\nrun();\n",
    "#!/usr/bin/env node\n\"use strict\";\nimport { x } from \"m\";\nrun();\n"
)]
#[case::prologue_only("\"use client\";\n", "\"use client\";\nimport { x } from \"m\";\n")]
fn top_of_program_skips_the_prologue(#[case] source: &str, #[case] expected: &str) {
    let output = synthesize(source, &[ImportRequest::named("m", "x")], &Placement::default());

    assert_eq!(output, expected);
}

#[test]
fn after_last_follows_the_neighbouring_style() {
    let output = synthesize(
        "\"use client\";\nimport a from \"a\";\nimport b from 'b' // legacy\nfoo();\n",
        &[ImportRequest::named("c", "C")],
        &Placement::after_last(),
    );

    assert_snapshot!(output.trim_end(), @r#"
    "use client";
    import a from "a";
    import b from 'b' // legacy
    import { C } from 'c'
    foo();
    "#);
}

#[test]
fn explicit_style_overrides_neighbours() {
    let style = ImportStyle::new(QuoteStyle::Single, SemicolonStyle::Never);
    let output = synthesize_with(
        "import a from \"a\";\n",
        &[ImportRequest::named("it's", "x")],
        &Placement::after_last(),
        style,
    );

    assert_eq!(output, "import a from \"a\";\nimport { x } from 'it\\'s'\n");
}

#[test]
fn visible_existing_import_is_reused() {
    let fixture = Fixture::tsx("import { Trans as T } from \"@lingui/react\";\nconst el = <T />;\n");
    let ctx = fixture.context();
    let mut synthesizer = ImportSynthesizer::new(&ctx, ImportStyle::default());
    let usage = fixture.first("jsx_self_closing_element");

    let plan = synthesizer.plan(
        &ImportRequest::named("@lingui/react", "Trans"),
        usage,
        &Placement::default(),
    );

    assert_eq!(plan, ImportEditPlan::Reuse { name: String::from("T") });
    assert!(plan.edits().is_empty());
}

#[test]
fn shadowed_import_is_not_reused() {
    let source = "import { t } from \"i18n\";\nfunction f(t) {\n  return t;\n}\n";
    let fixture = Fixture::tsx(source);
    let ctx = fixture.context();
    let mut synthesizer = ImportSynthesizer::new(&ctx, ImportStyle::default());
    let usage = fixture.nth("identifier", "t", 2);

    let plan = synthesizer.plan(&ImportRequest::named("i18n", "t"), usage, &Placement::default());
    let output = apply_edits(source, plan.edits()).expect("apply");

    assert_eq!(plan.name(), "t0");
    assert!(output.starts_with("import { t, t as t0 } from \"i18n\";\n"));
}

#[test]
fn type_requests_reuse_value_imports_but_not_the_reverse() {
    let fixture = Fixture::tsx("import { Props } from \"ui\";\nimport type { Theme } from \"ui\";\n");
    let ctx = fixture.context();
    let mut synthesizer = ImportSynthesizer::new(&ctx, ImportStyle::default());
    let root = ctx.root();

    let as_type = synthesizer.plan(
        &ImportRequest::named("ui", "Props").as_type(),
        root,
        &Placement::default(),
    );
    let as_value = synthesizer.plan(&ImportRequest::named("ui", "Theme"), root, &Placement::default());

    assert!(as_type.is_reuse());
    assert_eq!(as_type.name(), "Props");
    assert!(!as_value.is_reuse());
    assert_eq!(as_value.name(), "Theme0");
}

#[test]
fn repeated_requests_reuse_the_planned_binding() {
    let fixture = Fixture::tsx("const el = null;\n");
    let ctx = fixture.context();
    let mut synthesizer = ImportSynthesizer::new(&ctx, ImportStyle::default());
    let request = ImportRequest::named("@hi18n/react", "Translate");

    let first = synthesizer.plan(&request, ctx.root(), &Placement::default());
    let second = synthesizer.plan(&request, ctx.root(), &Placement::default());

    assert_eq!(first.name(), "Translate");
    assert_eq!(second, ImportEditPlan::Reuse { name: String::from("Translate") });
    assert_eq!(synthesizer.planned_names().collect::<Vec<_>>(), ["Translate"]);
}

#[rstest]
#[case::declared("const Translate = 1;\n")]
#[case::free_reference("Translate();\n")]
#[case::nested_declaration("function f() {\n  let Translate;\n}\n")]
fn taken_names_get_a_numeric_suffix(#[case] source: &str) {
    let output = synthesize(
        source,
        &[ImportRequest::named("@hi18n/react", "Translate")],
        &Placement::default(),
    );

    assert_eq!(
        output,
        format!("import {{ Translate as Translate0 }} from \"@hi18n/react\";\n{source}")
    );
}

#[test]
fn distinct_requests_never_share_a_name() {
    let fixture = Fixture::tsx("const t0 = 1;\n");
    let ctx = fixture.context();
    let mut synthesizer = ImportSynthesizer::new(&ctx, ImportStyle::default());
    synthesizer.reserve("t1");

    let names: Vec<String> = ["a", "b", "c", "d"]
        .into_iter()
        .map(|module| {
            synthesizer
                .plan(&ImportRequest::named(module, "t"), ctx.root(), &Placement::default())
                .name()
                .to_owned()
        })
        .collect();

    assert_eq!(names, ["t", "t2", "t3", "t4"]);
}

#[test]
fn reshaped_statements_are_not_extended_twice() {
    let output = synthesize(
        "import Foo from \"m\";\n",
        &[ImportRequest::named("m", "Bar"), ImportRequest::named("m", "Baz")],
        &Placement::default(),
    );

    assert_snapshot!(output.trim_end(), @r#"
    import { Baz } from "m";
    import Foo, { Bar } from "m";
    "#);
}

#[test]
fn appends_after_a_specifier_list_accumulate() {
    let output = synthesize(
        "import { A } from \"m\";\n",
        &[ImportRequest::named("m", "B"), ImportRequest::named("m", "C")],
        &Placement::default(),
    );

    assert_eq!(output, "import { A, B, C } from \"m\";\n");
}

#[test]
fn non_identifier_exports_are_quoted_and_renamed() {
    let output = synthesize("", &[ImportRequest::named("m", "a-b")], &Placement::default());

    assert_eq!(output, "import { \"a-b\" as aB } from \"m\";\n");
}
