//! Event pump over the lowered script tree.
//!
//! Emits enter events pre-order and exit events post-order, so every enter
//! is matched by exactly one exit and exits are strictly nested. The rules'
//! scope stacks depend on that discipline.

use crate::context::LintContext;
use crate::rule::Rule;
use hooklint_tree::{NodeId, ScriptTree};

/// Walk the tree and dispatch enter/exit events to all rules.
pub fn walk(tree: &ScriptTree, rules: &mut [Box<dyn Rule>], ctx: &mut LintContext<'_>) {
    walk_node(tree, tree.root(), rules, ctx);
}

fn walk_node(
    tree: &ScriptTree,
    node: NodeId,
    rules: &mut [Box<dyn Rule>],
    ctx: &mut LintContext<'_>,
) {
    for rule in rules.iter_mut() {
        ctx.current_rule = rule.meta().name;
        rule.enter_node(ctx, tree, node);
    }

    for &child in tree.children(node) {
        walk_node(tree, child, rules, ctx);
    }

    for rule in rules.iter_mut() {
        ctx.current_rule = rule.meta().name;
        rule.exit_node(ctx, tree, node);
    }
}
