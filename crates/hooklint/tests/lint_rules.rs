//! End-to-end tests running the recommended rule set over component sources.

use hooklint::{lint, Linter, Severity};

#[test]
fn test_selector_returning_array_literal_reports_error() {
    let source = "const pair = useContextSelector(context, value => [value.a, value.b]);";
    let result = lint(source, "selector.tsx");
    assert_eq!(result.error_count, 1);
    assert_eq!(result.warning_count, 0);
    assert_eq!(
        result.diagnostics[0].rule_name,
        "react/no-unstable-context-selector"
    );
}

#[test]
fn test_selector_returning_rest_binding_reports_error() {
    let source = "const rest = useContextSelector(context, ({ id, ...rest }) => rest);";
    let result = lint(source, "selector.tsx");
    assert_eq!(result.error_count, 1);
}

#[test]
fn test_property_selector_is_clean() {
    let source = "const id = useContextSelector(context, value => value.id);";
    let result = lint(source, "selector.tsx");
    assert!(!result.has_diagnostics());
}

#[test]
fn test_store_only_effect_reports_warning_on_callee() {
    let source = r#"
        function Component({ data }) {
            const [processed, setProcessed] = useState();
            useEffect(() => {
                setProcessed(process(data));
            }, [data]);
            return <span>{processed}</span>;
        }
    "#;
    let result = lint(source, "effect.tsx");
    assert_eq!(result.warning_count, 1);
    assert_eq!(result.error_count, 0);

    let diagnostic = &result.diagnostics[0];
    assert_eq!(diagnostic.rule_name, "react/prefer-use-memo");
    assert_eq!(diagnostic.severity, Severity::Warning);
    let callee = source.find("useEffect").map(|i| i as u32);
    assert_eq!(Some(diagnostic.start), callee);
}

#[test]
fn test_effect_with_broader_setter_usage_is_clean() {
    // Two setters called, and a setter both called and handed off.
    let source = r#"
        function Component({ data }) {
            const [processed, setProcessed] = useState();
            const [stale, setStale] = useState(false);
            useEffect(() => {
                setStale(false);
                setProcessed(process(data));
            }, [data]);
            useEffect(() => {
                fetchInto(data, setProcessed);
                setStale(true);
            }, [data]);
            return <span>{processed}</span>;
        }
    "#;
    let result = lint(source, "effect.tsx");
    assert!(!result.has_diagnostics());
}

#[test]
fn test_teardown_and_mount_only_effects_are_clean() {
    let source = r#"
        function Component({ data }) {
            const [processed, setProcessed] = useState();
            useEffect(() => {
                setProcessed(process(data));
                return () => reset();
            }, [data]);
            useEffect(() => setProcessed(process(data)), []);
            return <span>{processed}</span>;
        }
    "#;
    let result = lint(source, "effect.tsx");
    assert!(!result.has_diagnostics());
}

#[test]
fn test_both_rules_report_in_one_file() {
    let source = r#"
        function Component({ data }) {
            const pair = useContextSelector(context, value => [value.a]);
            const [processed, setProcessed] = useState();
            useEffect(() => setProcessed(process(data)), [data]);
            return <span>{pair}{processed}</span>;
        }
    "#;
    let result = lint(source, "component.tsx");
    assert_eq!(result.error_count, 1);
    assert_eq!(result.warning_count, 1);
    assert!(result.has_errors());
}

#[test]
fn test_rules_reset_between_files() {
    let linter = Linter::new();
    let dirty = "const pair = useContextSelector(context, value => [value.a]);";
    let clean = "const id = useContextSelector(context, value => value.id);";

    assert_eq!(linter.lint_source(dirty, "a.tsx").error_count, 1);
    assert_eq!(linter.lint_source(clean, "b.tsx").error_count, 0);
    assert_eq!(linter.lint_source(dirty, "c.tsx").error_count, 1);
}

#[test]
fn test_diagnostics_serialize_to_json() {
    let source = "const pair = useContextSelector(context, value => [value.a]);";
    let result = lint(source, "selector.tsx");

    let json = serde_json::to_value(&result.diagnostics).unwrap();
    let entry = &json[0];
    assert_eq!(entry["rule_name"], "react/no-unstable-context-selector");
    assert_eq!(entry["severity"], "error");
    assert!(entry["start"].is_u64());
    assert!(entry["message"]
        .as_str()
        .unwrap()
        .contains("Unstable context selectors"));
}

#[test]
fn test_summary_aggregates_across_files() {
    let linter = Linter::new();
    let files = vec![
        (
            "a.tsx".to_string(),
            "const pair = useContextSelector(context, value => [value.a]);".to_string(),
        ),
        (
            "b.tsx".to_string(),
            r#"
            function Component({ data }) {
                const [processed, setProcessed] = useState();
                useEffect(() => setProcessed(process(data)), [data]);
                return <span>{processed}</span>;
            }
            "#
            .to_string(),
        ),
        ("c.tsx".to_string(), "const x = 1;".to_string()),
    ];

    let (results, summary) = linter.lint_files(&files);
    assert_eq!(results.len(), 3);
    assert_eq!(summary.file_count, 3);
    assert_eq!(summary.error_count, 1);
    assert_eq!(summary.warning_count, 1);
    assert!(summary.has_errors());
}
