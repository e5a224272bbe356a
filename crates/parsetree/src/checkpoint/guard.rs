use super::{CheckpointStack, Outcome, Slot};
use crate::error::{fatal, Result};
use crate::tree::Tree;
use std::ops::{Deref, DerefMut};

/// Scoped checkpoint: restores its frame when dropped.
///
/// The guard holds the tree and the stack mutably for its whole lifetime.
/// Nested guards reborrow their parent through [`Checkpoint::nested`], so
/// they are always dropped, and restored, before it. Reads and writes of the
/// tree go through `Deref`/`DerefMut`.
///
/// ```ignore
/// let slot = Slot::root(node);
/// let mut cp = Checkpoint::save(&mut tree, &mut stack, &slot, &["*name"]);
/// cp.set_attr(node, "name", "foo_wrapped");
/// for child in children {
///     let child_slot = slot.child(child);
///     let inner = cp.nested(&child_slot, &["?access"]);
///     // ...
/// }
/// // `name` is back to its old value once `cp` goes out of scope
/// ```
#[derive(Debug)]
pub struct Checkpoint<'a> {
    tree: &'a mut Tree,
    stack: &'a mut CheckpointStack,
    slot: &'a Slot,
    armed: bool, // Whether this guard owns a frame to restore
}

impl<'a> Checkpoint<'a> {
    /// A guard that saves nothing yet; use [`save_more`](Self::save_more)
    /// to start saving.
    pub fn open(tree: &'a mut Tree, stack: &'a mut CheckpointStack, slot: &'a Slot) -> Self {
        Self { tree, stack, slot, armed: false }
    }

    #[track_caller]
    pub fn save(
        tree: &'a mut Tree,
        stack: &'a mut CheckpointStack,
        slot: &'a Slot,
        names: &[&str],
    ) -> Self {
        Self::try_save(tree, stack, slot, names).unwrap_or_else(|e| fatal(e))
    }

    pub fn try_save(
        tree: &'a mut Tree,
        stack: &'a mut CheckpointStack,
        slot: &'a Slot,
        names: &[&str],
    ) -> Result<Self> {
        let outcome = stack.try_save(tree, slot, names)?;
        Ok(Self { tree, stack, slot, armed: outcome == Outcome::Pushed })
    }

    #[track_caller]
    pub fn require(
        tree: &'a mut Tree,
        stack: &'a mut CheckpointStack,
        slot: &'a Slot,
        names: &[&str],
    ) -> Self {
        Self::try_require(tree, stack, slot, names).unwrap_or_else(|e| fatal(e))
    }

    pub fn try_require(
        tree: &'a mut Tree,
        stack: &'a mut CheckpointStack,
        slot: &'a Slot,
        names: &[&str],
    ) -> Result<Self> {
        let outcome = stack.try_require(tree, slot, names)?;
        Ok(Self { tree, stack, slot, armed: outcome == Outcome::Pushed })
    }

    /// Save a child slot's attributes for the length of the returned guard
    #[track_caller]
    pub fn nested<'b>(&'b mut self, slot: &'b Slot, names: &[&str]) -> Checkpoint<'b> {
        Checkpoint::save(self.tree, self.stack, slot, names)
    }

    #[track_caller]
    pub fn nested_require<'b>(&'b mut self, slot: &'b Slot, names: &[&str]) -> Checkpoint<'b> {
        Checkpoint::require(self.tree, self.stack, slot, names)
    }

    /// Save more attributes of this guard's node into its frame
    #[track_caller]
    pub fn save_more(&mut self, names: &[&str]) -> Outcome {
        let outcome = self.stack.save(self.tree, self.slot, names);
        if outcome == Outcome::Pushed {
            self.armed = true;
        }
        outcome
    }

    pub fn slot(&self) -> &Slot {
        self.slot
    }

    pub fn stack(&self) -> &CheckpointStack {
        self.stack
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }
}

impl Deref for Checkpoint<'_> {
    type Target = Tree;

    fn deref(&self) -> &Tree {
        self.tree
    }
}

impl DerefMut for Checkpoint<'_> {
    fn deref_mut(&mut self) -> &mut Tree {
        self.tree
    }
}

impl Drop for Checkpoint<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        if let Err(error) = self.stack.try_restore(self.tree, self.slot) {
            if std::thread::panicking() {
                log::error!("checkpoint left open while unwinding: {}", error);
            } else {
                fatal(error);
            }
        }
    }
}
