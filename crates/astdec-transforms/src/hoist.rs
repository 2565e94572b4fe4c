//! Hoisting of helper declarations in front of a class.
//!
//! Helpers (hoisted interceptors, extracted generator methods) go immediately
//! before the statement that holds the class: the class declaration itself, or
//! the statement a class expression is nested in.

use astdec_ast::{NodeArena, NodeIndex};
use tracing::trace;

/// Statement the helpers of `klass` are inserted before.
pub fn hoist_anchor(arena: &NodeArena, klass: NodeIndex) -> Option<NodeIndex> {
    arena.enclosing_statement(klass)
}

/// Insert `declarations`, in order, right before `anchor`.
pub fn hoist_declarations(arena: &mut NodeArena, anchor: NodeIndex, declarations: &[NodeIndex]) {
    if declarations.is_empty() {
        return;
    }
    let inserted = arena.insert_before(anchor, declarations);
    debug_assert!(inserted.is_some(), "hoist anchor must sit in a statement list");
    trace!(anchor = anchor.0, count = declarations.len(), "hoisted declarations");
}
