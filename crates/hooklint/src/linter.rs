//! Main linter entry point.

use crate::context::LintContext;
use crate::diagnostic::{LintDiagnostic, LintSummary};
use crate::rule::RuleRegistry;
use crate::walker::walk;
use hooklint_tree::lower_program;
use oxc_allocator::Allocator;
use oxc_parser::Parser;
use oxc_span::SourceType;
use rustc_hash::FxHashSet;
use thiserror::Error;

/// Errors surfaced at the linter boundary.
///
/// The rules themselves have no recoverable-error domain; the only failure
/// a caller can observe is input the parser could not recover into a tree.
#[derive(Debug, Error)]
pub enum LintError {
    #[error("failed to parse `{filename}` as JavaScript/TypeScript")]
    Unparseable { filename: String },
}

/// Lint result for a single file
#[derive(Debug, Clone)]
pub struct LintResult {
    /// Filename that was linted
    pub filename: String,
    /// Collected diagnostics
    pub diagnostics: Vec<LintDiagnostic>,
    /// Number of errors
    pub error_count: usize,
    /// Number of warnings
    pub warning_count: usize,
}

impl LintResult {
    fn empty(filename: &str) -> Self {
        Self {
            filename: filename.to_string(),
            diagnostics: Vec::new(),
            error_count: 0,
            warning_count: 0,
        }
    }

    /// Check if there are any errors
    #[inline]
    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    /// Check if there are any diagnostics
    #[inline]
    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

/// Main linter struct.
///
/// Parses component source with OXC, lowers the AST into the closed script
/// tree and pumps enter/exit events through the registered rules. Rules are
/// instantiated fresh for every file because they carry per-traversal state.
pub struct Linter {
    registry: RuleRegistry,
    /// Optional set of enabled rule names (if None, all rules are enabled)
    enabled_rules: Option<FxHashSet<String>>,
}

impl Linter {
    /// Create a new linter with the recommended rules
    #[inline]
    pub fn new() -> Self {
        Self {
            registry: RuleRegistry::with_recommended(),
            enabled_rules: None,
        }
    }

    /// Create a linter with a custom rule registry
    #[inline]
    pub fn with_registry(registry: RuleRegistry) -> Self {
        Self {
            registry,
            enabled_rules: None,
        }
    }

    /// Set enabled rules (if None, all rules are enabled)
    #[inline]
    pub fn with_enabled_rules(mut self, rules: Option<Vec<String>>) -> Self {
        self.enabled_rules = rules.map(|rules| rules.into_iter().collect());
        self
    }

    /// Check if a rule is enabled
    #[inline]
    pub fn is_rule_enabled(&self, rule_name: &str) -> bool {
        match &self.enabled_rules {
            Some(set) => set.contains(rule_name),
            None => true,
        }
    }

    /// Get the rule registry
    #[inline]
    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// Lint one source file.
    ///
    /// Source the parser cannot recover yields an empty result; use
    /// [`Linter::try_lint_source`] to observe that condition.
    #[inline]
    pub fn lint_source(&self, source: &str, filename: &str) -> LintResult {
        self.try_lint_source(source, filename)
            .unwrap_or_else(|_| LintResult::empty(filename))
    }

    /// Lint one source file, reporting unparseable input as an error.
    pub fn try_lint_source(&self, source: &str, filename: &str) -> Result<LintResult, LintError> {
        let allocator = Allocator::default();
        // TSX accepts the whole JS/TS/JSX surface the rules care about.
        let source_type = SourceType::from_path("component.tsx").unwrap_or_default();
        let ret = Parser::new(&allocator, source, source_type).parse();

        if ret.panicked {
            return Err(LintError::Unparseable {
                filename: filename.to_string(),
            });
        }

        let tree = lower_program(&ret.program);

        let mut ctx = LintContext::new(source, filename);
        let mut rules = self.registry.instantiate();
        if self.enabled_rules.is_some() {
            rules.retain(|rule| self.is_rule_enabled(rule.meta().name));
        }

        walk(&tree, &mut rules, &mut ctx);

        let error_count = ctx.error_count();
        let warning_count = ctx.warning_count();
        let diagnostics = ctx.into_diagnostics();

        Ok(LintResult {
            filename: filename.to_string(),
            diagnostics,
            error_count,
            warning_count,
        })
    }

    /// Lint multiple files and aggregate results
    pub fn lint_files(&self, files: &[(String, String)]) -> (Vec<LintResult>, LintSummary) {
        let mut results = Vec::with_capacity(files.len());
        let mut summary = LintSummary::default();

        for (filename, source) in files {
            let result = self.lint_source(source, filename);
            for diagnostic in &result.diagnostics {
                summary.add(diagnostic);
            }
            results.push(result);
        }

        summary.file_count = files.len();
        (results, summary)
    }
}

impl Default for Linter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lint_empty_source() {
        let linter = Linter::new();
        let result = linter.lint_source("", "test.tsx");
        assert!(!result.has_errors());
        assert!(!result.has_diagnostics());
    }

    #[test]
    fn test_lint_clean_component() {
        let linter = Linter::new();
        let result = linter.lint_source(
            "export function Component({ data }) { return <span>{data}</span>; }",
            "test.tsx",
        );
        assert!(!result.has_diagnostics());
    }

    #[test]
    fn test_try_lint_unparseable() {
        let linter = Linter::new();
        let err = linter.try_lint_source("const = = = {", "broken.tsx");
        assert!(matches!(err, Err(LintError::Unparseable { .. })));
        // The lenient entry point swallows the failure.
        let result = linter.lint_source("const = = = {", "broken.tsx");
        assert!(!result.has_diagnostics());
    }

    #[test]
    fn test_lint_files_batch() {
        let linter = Linter::new();
        let files = vec![
            (
                "a.tsx".to_string(),
                "const v = useContextSelector(context, value => [value.a]);".to_string(),
            ),
            ("b.tsx".to_string(), "const x = 1;".to_string()),
        ];

        let (results, summary) = linter.lint_files(&files);
        assert_eq!(results.len(), 2);
        assert_eq!(summary.file_count, 2);
        assert_eq!(summary.error_count, 1);
    }

    #[test]
    fn test_enabled_rules_filter() {
        let linter = Linter::new().with_enabled_rules(Some(vec![
            "react/prefer-use-memo".to_string(),
        ]));
        let result = linter.lint_source(
            "const v = useContextSelector(context, value => [value.a]);",
            "test.tsx",
        );
        assert!(!result.has_diagnostics());
    }
}
