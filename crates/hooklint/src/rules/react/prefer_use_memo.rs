//! Rule: prefer-use-memo
//!
//! Flags `useEffect` callbacks whose only observable work is a single
//! unconditional state-setter call. Such an effect recomputes a value after
//! render and stores it with an extra render pass; `useMemo` computes the
//! same value during render without the second pass.
//!
//! ## Invalid
//!
//! ```tsx
//! const [processed, setProcessed] = useState();
//! useEffect(() => setProcessed(process(data)), [data]);
//! ```
//!
//! ## Valid
//!
//! ```tsx
//! const processed = useMemo(() => process(data), [data]);
//! useEffect(() => {
//!     const subscription = subscribe(data, setProcessed);
//!     return () => subscription.unsubscribe();
//! }, [data]);
//! ```

use crate::context::LintContext;
use crate::diagnostic::Severity;
use crate::rule::{Rule, RuleCategory, RuleMeta};
use crate::scope::ScopeStack;
use compact_str::CompactString;
use hooklint_tree::{NodeId, NodeKind, ScriptTree};
use rustc_hash::{FxHashMap, FxHashSet};

static META: RuleMeta = RuleMeta {
    name: "react/prefer-use-memo",
    description: "Prefer useMemo over effects that only store a computed value",
    category: RuleCategory::BestPractices,
    default_severity: Severity::Warning,
};

const EFFECT_HOOK: &str = "useEffect";
const STATE_HOOK: &str = "useState";

const MESSAGE: &str =
    "Side effects that perform only a set-state call are inefficient; `useMemo` would be a better choice.";
const HELP: &str =
    "Compute the value with `useMemo` and drop the state pair, avoiding the extra render the effect schedules.";

/// Bookkeeping for one qualified effect callback while it is open.
struct EffectFrame {
    /// The callback function node.
    node: NodeId,
    /// The callback's body node; setter calls must be its direct statements.
    body: NodeId,
    /// The `useEffect` callee node, used as the diagnostic anchor.
    callee: NodeId,
    /// Distinct setter names called in unconditional position.
    called: FxHashSet<CompactString>,
    /// Total setter-name mentions anywhere in the callback, calls included.
    ///
    /// This is an occurrence tally, not a distinct count: a setter that is
    /// both called and separately passed around mentions itself twice and
    /// must disqualify the effect, because the callback then does more than
    /// store one computed value.
    mentions: u32,
}

/// Flags effects that are `useMemo` in disguise.
///
/// An effect qualifies for inspection when its first argument is an inline
/// function and its second a non-empty dependency array. The effect is then
/// reported only when exactly one setter is called, unconditionally, as a
/// direct statement of the callback body, exactly one setter mention exists
/// in the whole callback, and the callback returns nothing (a return value
/// is a teardown and marks a real side effect).
#[derive(Default)]
pub struct PreferUseMemo {
    scopes: ScopeStack,
    /// Qualified effect callbacks, keyed by callback node, valued by the
    /// `useEffect` callee node to anchor the diagnostic on.
    effects: FxHashMap<NodeId, NodeId>,
    /// Open frames for effect callbacks on the traversal path.
    frames: Vec<EffectFrame>,
}

impl PreferUseMemo {
    /// Record the callback of a `useEffect` call worth inspecting.
    fn qualify_effect(&mut self, tree: &ScriptTree, call: NodeId) {
        let Some(callback) = tree.call_argument(call, 0) else {
            return;
        };
        if !matches!(tree.kind(callback), NodeKind::Function { .. }) {
            return;
        }
        // Mount-only and dependency-less effects are not recomputations.
        let Some(deps) = tree.call_argument(call, 1) else {
            return;
        };
        let NodeKind::ArrayLiteral { elements } = tree.kind(deps) else {
            return;
        };
        if *elements == 0 {
            return;
        }
        let Some(callee) = tree.callee_of(call) else {
            return;
        };
        self.effects.insert(callback, callee);
    }

    /// Register the setter binding of a `useState` call in the current scope.
    ///
    /// The setter is the second element of the destructuring pattern the
    /// call initializes (`const [value, setValue] = useState(...)`).
    fn register_setter(&mut self, tree: &ScriptTree, call: NodeId) {
        let mut current = tree.parent(call);
        while let Some(ancestor) = current {
            if let NodeKind::VariableDeclarator { second_binding } = tree.kind(ancestor) {
                if let Some(name) = second_binding {
                    let name = name.clone();
                    if let Some(scope) = self.scopes.current_mut() {
                        scope.setters.insert(name);
                    }
                }
                return;
            }
            current = tree.parent(ancestor);
        }
    }

    /// Tally a call whose target is a known setter.
    fn tally_setter_call(&mut self, tree: &ScriptTree, call: NodeId) {
        if self.frames.is_empty() {
            return;
        }
        // Only bare-identifier calls count; `obj.setX()` is someone else's
        // setter.
        let Some(callee) = tree.callee_of(call) else {
            return;
        };
        let NodeKind::Identifier(name) = tree.kind(callee) else {
            return;
        };
        if !self.scopes.declares_setter(name) {
            return;
        }
        let name = name.clone();
        let Some(frame) = self.frames.last_mut() else {
            return;
        };
        if is_direct_statement(tree, call, frame.body) {
            frame.called.insert(name);
        }
    }

    fn finish_frame(&mut self, ctx: &mut LintContext<'_>, tree: &ScriptTree, node: NodeId) {
        let scope = self.scopes.exit(node);
        if self.frames.last().map(|frame| frame.node) != Some(node) {
            return;
        }
        let Some(frame) = self.frames.pop() else {
            return;
        };
        self.effects.remove(&node);

        let Some(scope) = scope else {
            return;
        };
        if scope.has_return {
            return;
        }
        if frame.called.len() != 1 || frame.mentions != 1 {
            return;
        }
        ctx.warn_with_help(MESSAGE, tree.span(frame.callee), HELP);
    }
}

/// Whether `node` sits in unconditional position within `body`.
///
/// True when the node is the body itself (a concise arrow body) or when
/// walking out of it crosses only expression statements before reaching
/// `body`. Any other wrapper (a conditional, loop, nested function and so
/// on) means the call might not run on every pass.
fn is_direct_statement(tree: &ScriptTree, node: NodeId, body: NodeId) -> bool {
    if node == body {
        return true;
    }
    let mut current = tree.parent(node);
    while let Some(ancestor) = current {
        match tree.kind(ancestor) {
            NodeKind::ExpressionStatement => current = tree.parent(ancestor),
            NodeKind::Block => return ancestor == body,
            _ => return false,
        }
    }
    false
}

impl Rule for PreferUseMemo {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn enter_node(&mut self, _ctx: &mut LintContext<'_>, tree: &ScriptTree, node: NodeId) {
        match tree.kind(node) {
            NodeKind::Function { .. } => {
                self.scopes.enter(node);
                if let Some(&callee) = self.effects.get(&node) {
                    if let Some(&body) = tree.children(node).first() {
                        self.frames.push(EffectFrame {
                            node,
                            body,
                            callee,
                            called: FxHashSet::default(),
                            mentions: 0,
                        });
                    }
                }
            }
            NodeKind::Return => {
                if let Some(scope) = self.scopes.current_mut() {
                    scope.has_return = true;
                }
            }
            NodeKind::Call { callee } => {
                match callee.as_deref() {
                    Some(EFFECT_HOOK) => self.qualify_effect(tree, node),
                    Some(STATE_HOOK) => self.register_setter(tree, node),
                    _ => {}
                }
                self.tally_setter_call(tree, node);
            }
            NodeKind::Identifier(name) => {
                if !self.frames.is_empty() && self.scopes.declares_setter(name) {
                    if let Some(frame) = self.frames.last_mut() {
                        frame.mentions += 1;
                    }
                }
            }
            _ => {}
        }
    }

    fn exit_node(&mut self, ctx: &mut LintContext<'_>, tree: &ScriptTree, node: NodeId) {
        if matches!(tree.kind(node), NodeKind::Function { .. }) {
            self.finish_frame(ctx, tree, node);
        }
    }
}
