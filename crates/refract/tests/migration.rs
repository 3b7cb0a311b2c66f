//! End-to-end migration of `@lingui/react` `<Trans>` elements to
//! `@hi18n/react` `<Translate>` elements.

use std::cell::RefCell;
use std::ops::Range;

use insta::assert_snapshot;
use refract::{
    Engine, EngineConfig, FileContext, Fix, ImportRequest, ImportStyle, ImportSynthesizer,
    ImportedName, Pattern, PatternNode, Placement, Report, ReportCode, SupportedLanguage, TextEdit,
    Tracker, apply_first_non_overlapping,
};
use rstest::rstest;

const LINGUI: &str = "@lingui/react";
const HI18N: &str = "@hi18n/react";

/// A `<Trans id=… />` the rule knows how to rewrite.
#[derive(Debug)]
struct Usage {
    element: Range<usize>,
    id: String,
}

fn trans(props: PatternNode) -> Pattern {
    Pattern::new(PatternNode::jsx_element(
        PatternNode::imported([LINGUI], [ImportedName::named("Trans")]),
        props,
    ))
    .expect("valid pattern")
}

fn tracker<'l>(usages: &'l RefCell<Vec<Usage>>, reports: &'l RefCell<Vec<Report>>) -> Tracker<'l> {
    let mut tracker = Tracker::new();
    tracker.register(
        "trans",
        trans(PatternNode::props_only([(
            "id",
            PatternNode::capture("id", PatternNode::Any),
        )])),
    );
    tracker.register("trans", trans(PatternNode::props(Vec::<(String, PatternNode)>::new())));
    tracker.listen("trans", move |found, ctx| {
        let node = found.node();
        match found.captures().captured("id") {
            Some(id) if node.kind() == "jsx_self_closing_element" => {
                usages.borrow_mut().push(Usage {
                    element: node.byte_range(),
                    id: ctx.text(id.root()).to_owned(),
                });
            }
            _ => reports
                .borrow_mut()
                .push(Report::unsupported(node, "<Trans> needs manual migration")),
        }
    });
    tracker
}

/// Plans one import session for every usage, sharing the bound name.
fn plan_fixes(usages: &[Usage], ctx: &FileContext<'_>) -> Vec<Report> {
    let mut synthesizer = ImportSynthesizer::new(ctx, ImportStyle::default());
    let request = ImportRequest::named(HI18N, "Translate");
    let placement = Placement::near([LINGUI]);

    usages
        .iter()
        .filter_map(|usage| {
            let node = ctx
                .root()
                .descendant_for_byte_range(usage.element.start, usage.element.end)?;
            let plan = synthesizer.plan(&request, node, &placement);
            let mut edits = vec![TextEdit::replace(
                usage.element.clone(),
                format!("<{} id={} />", plan.name(), usage.id),
            )];
            edits.extend(plan.into_edits());
            Some(Report::migratable(
                node,
                "<Trans> can be replaced by <Translate>",
                Fix::new("use <Translate>", edits),
            ))
        })
        .collect()
}

fn migrate(source: &str) -> (String, Vec<Report>) {
    let usages = RefCell::new(Vec::new());
    let unsupported = RefCell::new(Vec::new());
    let mut tracker = tracker(&usages, &unsupported);

    let engine = Engine::new(EngineConfig::new(SupportedLanguage::Tsx, 10_000, false));
    let (_, mut reports) = engine
        .visit_with(&mut tracker, SupportedLanguage::Tsx, source, |ctx| {
            plan_fixes(&usages.borrow(), ctx)
        })
        .expect("visit");
    drop(tracker);

    let fixes: Vec<Fix> = reports.iter().filter_map(Report::fix).cloned().collect();
    let applied = apply_first_non_overlapping(source, &fixes).expect("apply fixes");
    assert!(applied.skipped().is_empty());

    reports.extend(unsupported.into_inner());
    (applied.output().to_owned(), reports)
}

#[test]
fn trans_elements_are_rewritten_with_one_shared_import() {
    let source = r#"import { Trans } from "@lingui/react";
import { foo } from "bar";

export const A = () => <Trans id="greeting" />;
export const B = () => <Trans id={key} />;
export const C = () => <Trans id="x" values={{ n: 1 }} />;
"#;

    let (output, reports) = migrate(source);

    assert_snapshot!(output.trim_end(), @r#"
    import { Translate } from "@hi18n/react";
    import { Trans } from "@lingui/react";
    import { foo } from "bar";

    export const A = () => <Translate id="greeting" />;
    export const B = () => <Translate id={key} />;
    export const C = () => <Trans id="x" values={{ n: 1 }} />;
    "#);

    let summary: Vec<String> = reports.iter().map(ToString::to_string).collect();
    assert_eq!(
        summary,
        [
            "4:24: [migratable] <Trans> can be replaced by <Translate>",
            "5:24: [migratable] <Trans> can be replaced by <Translate>",
            "6:24: [unsupported-shape] <Trans> needs manual migration",
        ]
    );
}

#[test]
fn existing_translate_import_is_reused() {
    let source = r#"import { Translate as T } from "@hi18n/react";
import { Trans } from "@lingui/react";

const el = <Trans id="greeting" />;
"#;

    let (output, reports) = migrate(source);

    assert_snapshot!(output.trim_end(), @r#"
    import { Translate as T } from "@hi18n/react";
    import { Trans } from "@lingui/react";

    const el = <T id="greeting" />;
    "#);
    assert_eq!(reports.len(), 1);
}

#[test]
fn taken_names_get_a_numeric_suffix() {
    let source = r#"import { Trans } from "@lingui/react";

const Translate = 1;
const el = <Trans id="greeting" />;
"#;

    let (output, _) = migrate(source);

    assert_snapshot!(output.trim_end(), @r#"
    import { Translate as Translate0 } from "@hi18n/react";
    import { Trans } from "@lingui/react";

    const Translate = 1;
    const el = <Translate0 id="greeting" />;
    "#);
}

#[test]
fn elements_with_children_are_reported_not_rewritten() {
    let source = r#"import { Trans } from "@lingui/react";

const el = <Trans id="greeting">Hello</Trans>;
"#;

    let (output, reports) = migrate(source);

    assert_eq!(output, source);
    let codes: Vec<ReportCode> = reports.iter().map(Report::code).collect();
    assert_eq!(codes, [ReportCode::UnsupportedShape]);
}

#[rstest]
#[case::unlisted_expression("<Trans id=\"a\" foo={x} />")]
#[case::unlisted_string("<Trans id=\"a\" comment=\"for translators\" />")]
fn unlisted_attributes_are_reported_not_rewritten(#[case] element: &str) {
    let source = format!("import {{ Trans }} from \"@lingui/react\";\n\nconst el = {element};\n");

    let (output, reports) = migrate(&source);

    assert_eq!(output, source);
    let codes: Vec<ReportCode> = reports.iter().map(Report::code).collect();
    assert_eq!(codes, [ReportCode::UnsupportedShape]);
    assert!(reports.iter().all(|report| report.fix().is_none()));
}

#[test]
fn renamed_lingui_import_is_followed() {
    let source = r#"import { Trans as LinguiTrans } from "@lingui/react";

const el = <LinguiTrans id="greeting" />;
const other = <Trans id="not-imported" />;
"#;

    let (output, reports) = migrate(source);

    assert_snapshot!(output.trim_end(), @r#"
    import { Translate } from "@hi18n/react";
    import { Trans as LinguiTrans } from "@lingui/react";

    const el = <Translate id="greeting" />;
    const other = <Trans id="not-imported" />;
    "#);
    assert_eq!(reports.len(), 1);
}
