//! Attribute checkpoint stack
//!
//! A backend pass that needs to rewrite node attributes for the length of its
//! own traversal saves them here first and restores them when it is done with
//! the node. Frames must be restored in strict LIFO order matching the pass's
//! recursion; any break in that discipline is reported as a fatal
//! [`CheckpointError`] the moment it is detected.
//!
//! Names passed to [`CheckpointStack::require`] and [`CheckpointStack::save`]
//! take an optional sigil:
//!
//! ```text
//! name    must exist, not saved
//! *name   saved for restore (must exist for require)
//! ?name   saved for restore, may be absent
//! ```
//!
//! The stack assumes a single traversal is active at a time.

pub mod attr_spec;
pub mod frame;
pub mod guard;
pub mod slot;

pub use attr_spec::{AttrSpec, Mode};
pub use frame::{Frame, Saved};
pub use guard::Checkpoint;
pub use slot::{Slot, SlotId};

use crate::config::Config;
use crate::error::{fatal, CheckpointError, Result};
use crate::tree::{NodeId, Tree};

/// Default bound on open frames
pub const DEFAULT_CAPACITY: usize = 256;

/// What a `require` or `save` call did to the stack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Attributes were checked, nothing was saved
    Checked,
    /// A new frame was opened and must be restored
    Pushed,
    /// Attributes were added to the slot's open frame
    Merged,
}

#[derive(Debug, Clone)]
pub struct CheckpointStack {
    frames: Vec<Frame>,
    capacity: usize,
}

impl CheckpointStack {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { frames: Vec::new(), capacity }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::with_capacity(config.stack_capacity)
    }

    /// Number of open frames
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn top(&self) -> Option<&Frame> {
        self.frames.last()
    }

    pub fn top_node(&self) -> Option<NodeId> {
        self.top().map(Frame::node)
    }

    /// Check that attributes exist and save the sigiled ones.
    ///
    /// Terminates on a missing attribute or a nesting violation.
    #[track_caller]
    pub fn require(&mut self, tree: &Tree, slot: &Slot, names: &[&str]) -> Outcome {
        self.try_require(tree, slot, names).unwrap_or_else(|e| fatal(e))
    }

    /// Fallible [`require`](Self::require). The stack is left unchanged on error.
    pub fn try_require(&mut self, tree: &Tree, slot: &Slot, names: &[&str]) -> Result<Outcome> {
        let node = slot.node();
        let mut frame = Frame::new(slot);

        for raw in names {
            let spec = AttrSpec::parse(raw);
            if !spec.is_optional() && !tree.has_attr(node, spec.name) {
                return Err(CheckpointError::MissingAttribute {
                    kind: tree.kind(node).to_string(),
                    location: tree.location(node).clone(),
                    name: spec.name.to_string(),
                });
            }
            if spec.is_saved() && frame.record(tree, spec.name) {
                warn_duplicate("require", tree.kind(node), spec.name);
            }
        }

        if frame.is_empty() {
            return Ok(Outcome::Checked);
        }
        self.push(tree, frame)?;
        Ok(Outcome::Pushed)
    }

    /// Save attributes for a later [`restore`](Self::restore).
    ///
    /// Sigils are accepted and ignored; absent attributes are remembered as
    /// absent. When `slot` opened the top frame the names are merged into
    /// it, otherwise a new frame is pushed.
    #[track_caller]
    pub fn save(&mut self, tree: &Tree, slot: &Slot, names: &[&str]) -> Outcome {
        self.try_save(tree, slot, names).unwrap_or_else(|e| fatal(e))
    }

    /// Fallible [`save`](Self::save). The stack is left unchanged on error.
    pub fn try_save(&mut self, tree: &Tree, slot: &Slot, names: &[&str]) -> Result<Outcome> {
        let kind = tree.kind(slot.node());

        if let Some(top) = self.frames.last_mut().filter(|top| top.slot == slot.id()) {
            record_all(tree, top, names, kind);
            return Ok(Outcome::Merged);
        }

        let mut frame = Frame::new(slot);
        record_all(tree, &mut frame, names, kind);
        self.push(tree, frame)?;
        Ok(Outcome::Pushed)
    }

    /// Pop the frame opened by `slot` and put its attributes back.
    ///
    /// Terminates when the stack is empty or its top frame belongs to
    /// another slot.
    #[track_caller]
    pub fn restore(&mut self, tree: &mut Tree, slot: &Slot) {
        if let Err(e) = self.try_restore(tree, slot) {
            fatal(e)
        }
    }

    /// Fallible [`restore`](Self::restore). The stack is left unchanged on error.
    pub fn try_restore(&mut self, tree: &mut Tree, slot: &Slot) -> Result<()> {
        match self.frames.pop() {
            Some(frame) if frame.slot == slot.id() => {
                log::trace!(
                    "restore checkpoint {} for '{}' ({} attributes)",
                    self.frames.len(),
                    tree.kind(frame.node),
                    frame.len()
                );
                frame.apply(tree);
                Ok(())
            }
            Some(frame) => {
                let open_kind = tree.kind(frame.node).to_string();
                self.frames.push(frame);
                Err(CheckpointError::SlotMismatch {
                    kind: tree.kind(slot.node()).to_string(),
                    open_kind,
                })
            }
            None => Err(CheckpointError::EmptyStack { kind: tree.kind(slot.node()).to_string() }),
        }
    }

    fn push(&mut self, tree: &Tree, frame: Frame) -> Result<()> {
        // A new frame must come from deeper in the traversal than the open
        // one, unless it is for the same node.
        if let Some(top) = self.frames.last() {
            if frame.depth <= top.depth && frame.node != top.node {
                return Err(CheckpointError::NestingViolation {
                    kind: tree.kind(frame.node).to_string(),
                    open_kind: tree.kind(top.node).to_string(),
                });
            }
        }

        if self.frames.len() >= self.capacity {
            return Err(CheckpointError::CapacityExceeded {
                kind: tree.kind(frame.node).to_string(),
                capacity: self.capacity,
            });
        }

        log::trace!(
            "push checkpoint {} for '{}' ({} attributes)",
            self.frames.len(),
            tree.kind(frame.node),
            frame.len()
        );
        self.frames.push(frame);
        Ok(())
    }
}

impl Default for CheckpointStack {
    fn default() -> Self {
        Self::new()
    }
}

fn record_all(tree: &Tree, frame: &mut Frame, names: &[&str], kind: &str) {
    for raw in names {
        let spec = AttrSpec::parse(raw);
        if frame.record(tree, spec.name) {
            warn_duplicate("save", kind, spec.name);
        }
    }
}

fn warn_duplicate(op: &str, kind: &str, name: &str) {
    log::warn!("{}('{}'): attribute '{}' was already saved", op, kind, name);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::Location;

    fn tree_with_node() -> (Tree, NodeId) {
        let mut tree = Tree::new();
        let n = tree.add_node("cdecl", Location::new("test.i", 3));
        tree.set_attr(n, "name", "foo");
        (tree, n)
    }

    #[test]
    fn test_require_check_only_pushes_nothing() {
        let (tree, n) = tree_with_node();
        let mut stack = CheckpointStack::new();
        let slot = Slot::root(n);
        assert_eq!(stack.require(&tree, &slot, &["name"]), Outcome::Checked);
        assert!(stack.is_empty());
    }

    #[test]
    fn test_failed_require_leaves_stack_alone() {
        let (tree, n) = tree_with_node();
        let mut stack = CheckpointStack::new();
        let slot = Slot::root(n);
        let result = stack.try_require(&tree, &slot, &["*name", "type"]);
        assert!(matches!(result, Err(CheckpointError::MissingAttribute { .. })));
        assert!(stack.is_empty());
    }

    #[test]
    fn test_mismatched_restore_keeps_frame() {
        let (mut tree, n) = tree_with_node();
        let mut stack = CheckpointStack::new();
        let slot = Slot::root(n);
        let other = Slot::root(n);
        stack.save(&tree, &slot, &["*name"]);
        assert!(stack.try_restore(&mut tree, &other).is_err());
        assert_eq!(stack.depth(), 1);
        stack.restore(&mut tree, &slot);
        assert!(stack.is_empty());
    }

    #[test]
    fn test_save_with_no_names_still_pushes() {
        let (tree, n) = tree_with_node();
        let mut stack = CheckpointStack::new();
        let slot = Slot::root(n);
        assert_eq!(stack.save(&tree, &slot, &[]), Outcome::Pushed);
        assert_eq!(stack.depth(), 1);
    }
}
