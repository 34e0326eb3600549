//! Diagnostic types for the hooklint linter.
//!
//! Uses `CompactString` for efficient small string storage.

use compact_str::CompactString;
use oxc_diagnostics::OxcDiagnostic;
use oxc_span::Span;
use serde::Serialize;

/// Lint diagnostic severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// A lint diagnostic with rich information for display.
///
/// The rule name doubles as the diagnostic identifier; messages are fixed
/// per rule, with no interpolation.
#[derive(Debug, Clone, Serialize)]
pub struct LintDiagnostic {
    /// Rule that triggered this diagnostic
    pub rule_name: &'static str,
    /// Severity level
    pub severity: Severity,
    /// Primary message
    pub message: CompactString,
    /// Start byte offset in source
    pub start: u32,
    /// End byte offset in source
    pub end: u32,
    /// Help message for fixing (optional)
    pub help: Option<CompactString>,
}

impl LintDiagnostic {
    /// Create a new error diagnostic
    #[inline]
    pub fn error(
        rule_name: &'static str,
        message: impl Into<CompactString>,
        start: u32,
        end: u32,
    ) -> Self {
        Self {
            rule_name,
            severity: Severity::Error,
            message: message.into(),
            start,
            end,
            help: None,
        }
    }

    /// Create a new warning diagnostic
    #[inline]
    pub fn warn(
        rule_name: &'static str,
        message: impl Into<CompactString>,
        start: u32,
        end: u32,
    ) -> Self {
        Self {
            rule_name,
            severity: Severity::Warning,
            message: message.into(),
            start,
            end,
            help: None,
        }
    }

    /// Add a help message
    #[inline]
    pub fn with_help(mut self, help: impl Into<CompactString>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Convert to OxcDiagnostic for rich rendering
    #[inline]
    pub fn into_oxc_diagnostic(self) -> OxcDiagnostic {
        let mut diag = match self.severity {
            Severity::Error => OxcDiagnostic::error(self.message.to_string()),
            Severity::Warning => OxcDiagnostic::warn(self.message.to_string()),
        };

        diag = diag.with_label(Span::new(self.start, self.end));

        if let Some(help) = self.help {
            diag = diag.with_help(help.to_string());
        }

        diag
    }
}

/// Summary of lint results
#[derive(Debug, Clone, Default, Serialize)]
pub struct LintSummary {
    pub error_count: usize,
    pub warning_count: usize,
    pub file_count: usize,
}

impl LintSummary {
    #[inline]
    pub fn add(&mut self, diagnostic: &LintDiagnostic) {
        match diagnostic.severity {
            Severity::Error => self.error_count += 1,
            Severity::Warning => self.warning_count += 1,
        }
    }

    #[inline]
    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_oxc_diagnostic_keeps_message_severity_and_help() {
        let diag = LintDiagnostic::warn("react/prefer-use-memo", "use useMemo", 4, 13)
            .with_help("compute during render");
        let oxc = diag.into_oxc_diagnostic();
        assert_eq!(oxc.to_string(), "use useMemo");
        assert_eq!(oxc.severity, oxc_diagnostics::Severity::Warning);
        assert_eq!(oxc.help.as_deref(), Some("compute during render"));

        let oxc = LintDiagnostic::error("react/no-unstable-context-selector", "unstable", 0, 1)
            .into_oxc_diagnostic();
        assert_eq!(oxc.severity, oxc_diagnostics::Severity::Error);
        assert!(oxc.help.is_none());
    }

    #[test]
    fn test_summary_add_tracks_severity() {
        let mut summary = LintSummary::default();
        summary.add(&LintDiagnostic::error("rule", "a", 0, 1));
        summary.add(&LintDiagnostic::warn("rule", "b", 1, 2));
        summary.add(&LintDiagnostic::warn("rule", "c", 2, 3));
        assert_eq!(summary.error_count, 1);
        assert_eq!(summary.warning_count, 2);
        assert!(summary.has_errors());
    }
}
