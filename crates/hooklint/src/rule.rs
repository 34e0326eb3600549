//! Rule trait and registry for lint rules.

use crate::context::LintContext;
use crate::diagnostic::Severity;
use hooklint_tree::{NodeId, ScriptTree};

/// Rule category for organization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleCategory {
    /// Rules that prevent definite bugs
    Correctness,
    /// Heuristic rules that catch wasteful or fragile patterns
    BestPractices,
}

/// Rule metadata
pub struct RuleMeta {
    /// Rule name (e.g., "react/prefer-use-memo"); doubles as the
    /// diagnostic identifier
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Rule category
    pub category: RuleCategory,
    /// Default severity
    pub default_severity: Severity,
}

/// Rule trait for implementing lint rules.
///
/// Rules receive enter/exit events for every node of the lowered script
/// tree, in document order with strictly nested exits. Rules are stateful
/// across one traversal, so the registry hands out a fresh instance per
/// file; an instance must never be reused for a second tree.
pub trait Rule {
    /// Get rule metadata
    fn meta(&self) -> &'static RuleMeta;

    /// Called when entering a node
    #[allow(unused_variables)]
    fn enter_node(&mut self, ctx: &mut LintContext<'_>, tree: &ScriptTree, node: NodeId) {}

    /// Called when exiting a node, after all of its descendants
    #[allow(unused_variables)]
    fn exit_node(&mut self, ctx: &mut LintContext<'_>, tree: &ScriptTree, node: NodeId) {}
}

/// Constructor for a fresh rule instance.
pub type RuleFactory = fn() -> Box<dyn Rule>;

/// Registry holding the enabled lint rules as factories.
pub struct RuleRegistry {
    factories: Vec<RuleFactory>,
}

impl RuleRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            factories: Vec::new(),
        }
    }

    /// Register a rule factory
    pub fn register(&mut self, factory: RuleFactory) {
        self.factories.push(factory);
    }

    /// Instantiate fresh rule state for one file
    pub fn instantiate(&self) -> Vec<Box<dyn Rule>> {
        self.factories.iter().map(|factory| factory()).collect()
    }

    /// Number of registered rules
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Create registry with all built-in rules enabled
    pub fn with_recommended() -> Self {
        let mut registry = Self::new();
        registry.register(|| Box::new(crate::rules::react::NoUnstableContextSelector::default()));
        registry.register(|| Box::new(crate::rules::react::PreferUseMemo::default()));
        registry
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::with_recommended()
    }
}
