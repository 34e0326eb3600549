//! # hooklint_tree
//!
//! The closed script-tree representation used by the hooklint rules.
//!
//! Rules in hooklint never match on the full OXC AST. Instead, the native
//! tree is lowered once, at the boundary, into a small closed set of node
//! kinds (calls, functions, returns, identifiers, literals, declarators and
//! opaque wrappers) stored in an arena indexed by integer handles. This keeps
//! the rule logic exhaustive over the shapes it actually inspects and
//! independent of the parser's node zoo.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use hooklint_tree::lower_program;
//!
//! let ret = Parser::new(&allocator, source, source_type).parse();
//! let tree = lower_program(&ret.program);
//! for &child in tree.children(tree.root()) {
//!     // inspect tree.kind(child) ...
//! }
//! ```

mod lower;
mod tree;

pub use lower::lower_program;
pub use tree::{NodeId, NodeKind, ScriptTree};
