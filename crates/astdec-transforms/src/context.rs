//! Per-pass transform state.

use astdec_ast::{NodeArena, NodeIndex, UidGenerator};

/// Everything a transformer may mutate: the tree and the pass's name allocator.
///
/// Both are owned by the running pass; a new context (and a new allocator) is
/// created for every compilation unit.
pub struct TransformContext<'a> {
    pub arena: &'a mut NodeArena,
    pub uids: UidGenerator,
}

impl<'a> TransformContext<'a> {
    /// Context whose allocator avoids every name found under `root`.
    pub fn new(arena: &'a mut NodeArena, root: NodeIndex) -> Self {
        let uids = UidGenerator::for_tree(arena, root);
        Self { arena, uids }
    }

    pub fn with_uids(arena: &'a mut NodeArena, uids: UidGenerator) -> Self {
        Self { arena, uids }
    }
}
