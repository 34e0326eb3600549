//! Arena-backed script tree with a closed set of node kinds.

use compact_str::CompactString;
use oxc_span::Span;
use smallvec::SmallVec;

/// Handle to a node in a [`ScriptTree`].
///
/// Identity is the arena index, so handles stay valid for the lifetime of
/// the tree and are cheap to copy, hash and compare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    /// Handle of the program root.
    pub const ROOT: NodeId = NodeId(0);

    /// Arena index of this handle.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Closed set of node kinds the lint rules inspect.
///
/// Anything the rules do not reason about lowers to [`NodeKind::Other`],
/// which preserves ancestry (so "is this call a direct statement of that
/// block" style walks see conditionals, loops and similar wrappers) without
/// modeling their internals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Program root.
    Program,
    /// Call expression. Children: `[callee, argument0, argument1, ...]`.
    ///
    /// `callee` is the bare identifier name of the call target, or the
    /// property name when the target is a static member access (the
    /// namespace-qualified form, e.g. `React.useEffect`). Computed member
    /// targets carry no name.
    Call { callee: Option<CompactString> },
    /// Function declaration, function expression or arrow function.
    /// Children: `[body]` (absent for bodyless declarations).
    ///
    /// `concise` marks an arrow with an expression body; the body child is
    /// then the returned expression itself, not a block. `rest_bound` holds
    /// the identifiers bound by the rest element of the *first* parameter's
    /// destructuring pattern, if any.
    Function {
        concise: bool,
        rest_bound: SmallVec<[CompactString; 1]>,
    },
    /// Return statement. Children: `[argument]` when a value is returned.
    Return,
    /// Identifier reference, or the property name of a static member access.
    Identifier(CompactString),
    /// Array literal. `elements` is the literal element count.
    ArrayLiteral { elements: u32 },
    /// Object literal.
    ObjectLiteral,
    /// Variable declarator. Children: `[init]` when an initializer exists.
    ///
    /// `second_binding` is the bare identifier bound by the second element
    /// of an array destructuring pattern (`const [x, setX] = ...`).
    VariableDeclarator { second_binding: Option<CompactString> },
    /// Expression statement wrapper.
    ExpressionStatement,
    /// Block statement (including function bodies).
    Block,
    /// Any construct outside the closed set.
    Other,
}

#[derive(Debug)]
struct Node {
    kind: NodeKind,
    span: Span,
    parent: Option<NodeId>,
    children: SmallVec<[NodeId; 4]>,
}

/// Arena of lowered nodes for one source file.
///
/// The tree is built once by [`crate::lower_program`] and is immutable
/// afterwards; all lookups are O(1) on the handle.
#[derive(Debug)]
pub struct ScriptTree {
    nodes: Vec<Node>,
}

impl ScriptTree {
    pub(crate) fn new(program_span: Span) -> Self {
        Self {
            nodes: vec![Node {
                kind: NodeKind::Program,
                span: program_span,
                parent: None,
                children: SmallVec::new(),
            }],
        }
    }

    /// Append a node under `parent` and return its handle.
    pub(crate) fn push(&mut self, kind: NodeKind, span: Span, parent: NodeId) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node {
            kind,
            span,
            parent: Some(parent),
            children: SmallVec::new(),
        });
        self.nodes[parent.index()].children.push(id);
        id
    }

    /// Handle of the program root.
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Node kind for a handle.
    #[inline]
    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.index()].kind
    }

    /// Byte span of the node in the original source.
    #[inline]
    pub fn span(&self, id: NodeId) -> Span {
        self.nodes[id.index()].span
    }

    /// Parent handle, `None` for the root.
    #[inline]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.index()].parent
    }

    /// Children in document order.
    #[inline]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.index()].children
    }

    /// The callee child of a call node.
    #[inline]
    pub fn callee_of(&self, call: NodeId) -> Option<NodeId> {
        debug_assert!(matches!(self.kind(call), NodeKind::Call { .. }));
        self.children(call).first().copied()
    }

    /// The `index`-th argument child of a call node.
    #[inline]
    pub fn call_argument(&self, call: NodeId, index: usize) -> Option<NodeId> {
        debug_assert!(matches!(self.kind(call), NodeKind::Call { .. }));
        self.children(call).get(index + 1).copied()
    }

    /// All handles in creation order (parents before children).
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len() as u32).map(NodeId)
    }

    /// Number of nodes in the arena (root included).
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
