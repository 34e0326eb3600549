//! Scope-aware lint rules for React hook usage.
//!
//! Parses component source with OXC, lowers the AST into a small closed
//! script tree ([`hooklint_tree`]) and runs stateful rules over one
//! enter/exit traversal per file.
//!
//! Built-in rules:
//!
//! - `react/no-unstable-context-selector`: forbids `useContextSelector`
//!   selectors that return a freshly built array or object, or a
//!   rest-collected binding, because their identity changes on every store
//!   notification.
//! - `react/prefer-use-memo`: flags `useEffect` callbacks whose only work
//!   is a single unconditional state-setter call; `useMemo` computes the
//!   same value without the extra render pass.
//!
//! ```
//! use hooklint::Linter;
//!
//! let linter = Linter::new();
//! let result = linter.lint_source(
//!     "const pair = useContextSelector(context, value => [value.item]);",
//!     "component.tsx",
//! );
//! assert!(result.has_errors());
//! ```

mod context;
mod diagnostic;
mod linter;
mod rule;
mod scope;
mod walker;

pub mod rules;

pub use context::LintContext;
pub use diagnostic::{LintDiagnostic, LintSummary, Severity};
pub use linter::{LintError, LintResult, Linter};
pub use rule::{Rule, RuleCategory, RuleFactory, RuleMeta, RuleRegistry};
pub use scope::{FunctionScope, ScopeStack};
pub use walker::walk;

/// Lint one source file with the recommended rules.
#[inline]
pub fn lint(source: &str, filename: &str) -> LintResult {
    Linter::new().lint_source(source, filename)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recommended_registry_has_both_rules() {
        let linter = Linter::new();
        assert_eq!(linter.registry().len(), 2);
    }

    #[test]
    fn test_lint_convenience() {
        let result = lint("const x = 1;", "test.tsx");
        assert!(!result.has_diagnostics());
        assert_eq!(result.filename, "test.tsx");
    }
}
