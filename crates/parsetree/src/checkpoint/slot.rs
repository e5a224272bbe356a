use crate::tree::NodeId;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_SLOT: AtomicU64 = AtomicU64::new(1);

/// Identity of a [`Slot`], compared only for equality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(u64);

/// A traversal's reference to the node it is working on.
///
/// Each recursive call makes its own slot, one level deeper than its
/// caller's. Slots are deliberately not `Clone`: the checkpoint stack pairs
/// a `restore` with the exact slot that opened the frame.
#[derive(Debug)]
pub struct Slot {
    id: SlotId,
    depth: usize,
    node: NodeId,
}

impl Slot {
    /// Slot for the top of a traversal
    pub fn root(node: NodeId) -> Self {
        Self::at_depth(node, 0)
    }

    pub fn at_depth(node: NodeId, depth: usize) -> Self {
        let id = SlotId(NEXT_SLOT.fetch_add(1, Ordering::Relaxed));
        Self { id, depth, node }
    }

    /// Slot for a callee one recursion level below this one
    pub fn child(&self, node: NodeId) -> Self {
        Self::at_depth(node, self.depth + 1)
    }

    pub fn id(&self) -> SlotId {
        self.id
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn node(&self) -> NodeId {
        self.node
    }
}
