//! Rule: no-unstable-context-selector
//!
//! Forbids `useContextSelector` selectors that return a value with unstable
//! identity. A selector returning a fresh array or object literal, or a
//! rest-collected binding from its parameter, produces a new reference on
//! every store notification and defeats the selector's memoization.
//!
//! ## Invalid
//!
//! ```tsx
//! const value = useContextSelector(context, value => [value.item]);
//! const value = useContextSelector(context, ({ item, ...rest }) => rest);
//! ```
//!
//! ## Valid
//!
//! ```tsx
//! const item = useContextSelector(context, value => value.item);
//! const [a, b] = useContextSelector(context, ({ a, b }) => [a, b].join("-")) ?? [];
//! ```

use crate::context::LintContext;
use crate::diagnostic::Severity;
use crate::rule::{Rule, RuleCategory, RuleMeta};
use hooklint_tree::{NodeId, NodeKind, ScriptTree};

static META: RuleMeta = RuleMeta {
    name: "react/no-unstable-context-selector",
    description: "Disallow context selectors that return unstable references",
    category: RuleCategory::Correctness,
    default_severity: Severity::Error,
};

const SELECTOR_HOOK: &str = "useContextSelector";

const MESSAGE: &str =
    "Unstable context selectors are forbidden. Avoid creating objects or arrays within selectors.";
const HELP: &str =
    "Return a stored value directly, or select a primitive derived from it; fresh containers defeat the selector's change detection.";

/// Flags `useContextSelector` selectors returning freshly built containers.
///
/// Only concise arrow bodies are inspected. A block-bodied selector can
/// build its result any number of ways, so this rule stays out of it rather
/// than guess.
#[derive(Default)]
pub struct NoUnstableContextSelector {
    /// Selector-hook calls currently open on the traversal path.
    active_calls: Vec<NodeId>,
}

impl NoUnstableContextSelector {
    fn check_selector(&self, ctx: &mut LintContext<'_>, tree: &ScriptTree, node: NodeId) {
        let Some(&call) = self.active_calls.last() else {
            return;
        };
        // Only the second argument is the selector.
        if tree.call_argument(call, 1) != Some(node) {
            return;
        }
        let NodeKind::Function { concise: true, rest_bound } = tree.kind(node) else {
            return;
        };
        let Some(&body) = tree.children(node).first() else {
            return;
        };

        let unstable = match tree.kind(body) {
            NodeKind::ArrayLiteral { .. } | NodeKind::ObjectLiteral => true,
            NodeKind::Identifier(name) => rest_bound.iter().any(|rest| rest == name),
            _ => false,
        };

        if unstable {
            ctx.error_with_help(MESSAGE, tree.span(node), HELP);
        }
    }
}

impl Rule for NoUnstableContextSelector {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn enter_node(&mut self, ctx: &mut LintContext<'_>, tree: &ScriptTree, node: NodeId) {
        match tree.kind(node) {
            NodeKind::Call { callee: Some(name) } if name == SELECTOR_HOOK => {
                self.active_calls.push(node);
            }
            NodeKind::Function { concise: true, .. } => {
                self.check_selector(ctx, tree, node);
            }
            _ => {}
        }
    }

    fn exit_node(&mut self, _ctx: &mut LintContext<'_>, _tree: &ScriptTree, node: NodeId) {
        if self.active_calls.last() == Some(&node) {
            self.active_calls.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linter::Linter;
    use crate::rule::RuleRegistry;

    fn create_linter() -> Linter {
        let mut registry = RuleRegistry::new();
        registry.register(|| Box::new(NoUnstableContextSelector::default()));
        Linter::with_registry(registry)
    }

    fn lint(source: &str) -> Vec<crate::diagnostic::LintDiagnostic> {
        create_linter().lint_source(source, "test.tsx").diagnostics
    }

    #[test]
    fn test_identity_selector_is_valid() {
        assert!(lint("const value = useContextSelector(context, value => value);").is_empty());
    }

    #[test]
    fn test_property_selector_is_valid() {
        assert!(lint("const item = useContextSelector(context, value => value.item);").is_empty());
    }

    #[test]
    fn test_destructured_selector_is_valid() {
        let source = r#"
            const joined = useContextSelector(context, ({ a, b }) => [a, b].join("-"));
        "#;
        assert!(lint(source).is_empty());
    }

    #[test]
    fn test_namespaced_property_selector_is_valid() {
        let source = "const item = Lib.useContextSelector(context, value => value.item);";
        assert!(lint(source).is_empty());
    }

    #[test]
    fn test_block_bodied_selector_is_valid() {
        let source = "const pair = useContextSelector(context, value => { return value.item; });";
        assert!(lint(source).is_empty());
    }

    #[test]
    fn test_unrelated_concise_arrow_is_valid() {
        assert!(lint("const make = () => [1, 2, 3];").is_empty());
    }

    #[test]
    fn test_array_literal_selector_is_invalid() {
        let diagnostics = lint("const pair = useContextSelector(context, value => [value.item]);");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].rule_name, "react/no-unstable-context-selector");
        assert_eq!(diagnostics[0].severity, Severity::Error);
        assert!(diagnostics[0].message.contains("Unstable context selectors"));
    }

    #[test]
    fn test_object_literal_selector_is_invalid() {
        let source = "const view = useContextSelector(context, value => ({ item: value.item }));";
        assert_eq!(lint(source).len(), 1);
    }

    #[test]
    fn test_namespaced_call_is_checked() {
        let source = "const pair = Lib.useContextSelector(context, value => [value.item]);";
        assert_eq!(lint(source).len(), 1);
    }

    #[test]
    fn test_rest_of_object_pattern_is_invalid() {
        let source = "const rest = useContextSelector(context, ({ item, ...rest }) => rest);";
        assert_eq!(lint(source).len(), 1);
    }

    #[test]
    fn test_rest_of_array_pattern_is_invalid() {
        let source = "const rest = useContextSelector(context, ([head, ...rest]) => rest);";
        assert_eq!(lint(source).len(), 1);
    }

    #[test]
    fn test_non_rest_binding_return_is_valid() {
        let source = "const item = useContextSelector(context, ({ item, ...rest }) => item);";
        assert!(lint(source).is_empty());
    }

    #[test]
    fn test_nested_calls_attribute_to_innermost() {
        // The outer selector is stable, the inner one is not.
        let source = r#"
            const value = useContextSelector(outer, value =>
                useContextSelector(inner, state => [state.item]));
        "#;
        let diagnostics = lint(source);
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn test_span_covers_the_selector() {
        let source = "const pair = useContextSelector(context, value => [value.item]);";
        let diagnostics = lint(source);
        let selector = "value => [value.item]";
        let start = source.find(selector).map(|i| i as u32);
        assert_eq!(Some(diagnostics[0].start), start);
    }
}
