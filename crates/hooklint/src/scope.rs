//! Lexical function-scope tracking for stateful rules.
//!
//! A [`ScopeStack`] mirrors the nesting of function-like nodes during a
//! traversal: one record is pushed on scope entry and popped at the matching
//! exit. Exits are strictly nested under a conforming walker; a mismatched
//! pop indicates a traversal-order bug, not bad user input, so it asserts in
//! debug builds and abandons the stack in release builds.

use compact_str::CompactString;
use hooklint_tree::NodeId;
use rustc_hash::FxHashSet;

/// Per-function record tracked while the scope is open.
#[derive(Debug)]
pub struct FunctionScope {
    /// The function node this scope belongs to.
    pub node: NodeId,
    /// Whether a return statement was seen directly in this scope.
    pub has_return: bool,
    /// State-setter names declared in this scope.
    pub setters: FxHashSet<CompactString>,
}

impl FunctionScope {
    fn new(node: NodeId) -> Self {
        Self {
            node,
            has_return: false,
            setters: FxHashSet::default(),
        }
    }
}

/// Stack of open function scopes, innermost on top.
#[derive(Debug, Default)]
pub struct ScopeStack {
    scopes: Vec<FunctionScope>,
}

impl ScopeStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a scope for `node`.
    pub fn enter(&mut self, node: NodeId) {
        self.scopes.push(FunctionScope::new(node));
    }

    /// Close the scope for `node` and return its record.
    ///
    /// Returns `None` when the stack discipline was violated; the stack is
    /// cleared in that case so no further attribution can happen against
    /// stale records.
    pub fn exit(&mut self, node: NodeId) -> Option<FunctionScope> {
        let top = self.scopes.pop()?;
        debug_assert_eq!(top.node, node, "function scope exited out of order");
        if top.node != node {
            self.scopes.clear();
            return None;
        }
        Some(top)
    }

    /// The innermost open scope, `None` at top level.
    #[inline]
    pub fn current(&self) -> Option<&FunctionScope> {
        self.scopes.last()
    }

    /// Mutable access to the innermost open scope.
    #[inline]
    pub fn current_mut(&mut self) -> Option<&mut FunctionScope> {
        self.scopes.last_mut()
    }

    /// The scope immediately enclosing the scope for `node`.
    pub fn enclosing_of(&self, node: NodeId) -> Option<&FunctionScope> {
        let position = self.scopes.iter().rposition(|scope| scope.node == node)?;
        position.checked_sub(1).map(|i| &self.scopes[i])
    }

    /// Whether any open scope declares `name` as a setter, innermost first.
    ///
    /// Declarations made in nested scopes are popped with their scope, so
    /// this lookup never sees inner names from the outside.
    pub fn declares_setter(&self, name: &str) -> bool {
        self.scopes.iter().rev().any(|scope| scope.setters.contains(name))
    }

    /// Number of open scopes.
    #[inline]
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hooklint_tree::{lower_program, NodeKind, ScriptTree};

    fn function_nodes(source: &str) -> (ScriptTree, Vec<NodeId>) {
        let allocator = oxc_allocator::Allocator::default();
        let source_type = oxc_span::SourceType::from_path("component.tsx").unwrap_or_default();
        let ret = oxc_parser::Parser::new(&allocator, source, source_type).parse();
        assert!(!ret.panicked);
        let tree = lower_program(&ret.program);
        let functions = tree
            .ids()
            .filter(|&id| matches!(tree.kind(id), NodeKind::Function { .. }))
            .collect();
        (tree, functions)
    }

    #[test]
    fn test_enter_exit_lifo() {
        let (_tree, functions) = function_nodes("function outer() { function inner() {} }");
        let (outer, inner) = (functions[0], functions[1]);

        let mut scopes = ScopeStack::new();
        assert!(scopes.current().is_none());

        scopes.enter(outer);
        scopes.enter(inner);
        assert_eq!(scopes.depth(), 2);
        assert_eq!(scopes.current().map(|s| s.node), Some(inner));
        assert_eq!(scopes.enclosing_of(inner).map(|s| s.node), Some(outer));
        assert!(scopes.enclosing_of(outer).is_none());

        assert_eq!(scopes.exit(inner).map(|s| s.node), Some(inner));
        assert_eq!(scopes.exit(outer).map(|s| s.node), Some(outer));
        assert!(scopes.exit(outer).is_none());
    }

    #[test]
    fn test_setter_visibility_walks_outward() {
        let (_tree, functions) = function_nodes("function outer() { function inner() {} }");
        let (outer, inner) = (functions[0], functions[1]);

        let mut scopes = ScopeStack::new();
        scopes.enter(outer);
        scopes
            .current_mut()
            .unwrap()
            .setters
            .insert("setOuter".into());
        scopes.enter(inner);
        scopes
            .current_mut()
            .unwrap()
            .setters
            .insert("setInner".into());

        // Outer declarations stay visible from inside.
        assert!(scopes.declares_setter("setOuter"));
        assert!(scopes.declares_setter("setInner"));

        // Inner declarations disappear once the scope closes.
        scopes.exit(inner);
        assert!(scopes.declares_setter("setOuter"));
        assert!(!scopes.declares_setter("setInner"));
    }
}
