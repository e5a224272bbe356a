use super::slot::{Slot, SlotId};
use crate::tree::{NodeId, Tree, Value};
use indexmap::IndexMap;

/// An attribute value captured at checkpoint time
#[derive(Debug, Clone, PartialEq)]
pub enum Saved {
    /// The attribute did not exist; restoring removes it
    Absent,
    Value(Value),
}

/// Saved attributes of one node, opened by one slot
#[derive(Debug, Clone)]
pub struct Frame {
    pub(crate) slot: SlotId,
    pub(crate) depth: usize,
    pub(crate) node: NodeId,
    pub(crate) saved: IndexMap<String, Saved>,
    positions: IndexMap<String, usize>,
}

impl Frame {
    pub(crate) fn new(slot: &Slot) -> Self {
        Self {
            slot: slot.id(),
            depth: slot.depth(),
            node: slot.node(),
            saved: IndexMap::new(),
            positions: IndexMap::new(),
        }
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn saved(&self, name: &str) -> Option<&Saved> {
        self.saved.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.saved.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.saved.len()
    }

    pub fn is_empty(&self) -> bool {
        self.saved.is_empty()
    }

    /// Capture the current value of `name`. Returns true when the name had
    /// already been captured in this frame; the new value replaces it.
    pub(crate) fn record(&mut self, tree: &Tree, name: &str) -> bool {
        let saved = match tree.attr(self.node, name) {
            Some(value) => Saved::Value(value.clone()),
            None => Saved::Absent,
        };
        match tree.attr_index(self.node, name) {
            Some(index) => self.positions.insert(name.to_string(), index),
            None => self.positions.shift_remove(name),
        };
        self.saved.insert(name.to_string(), saved).is_some()
    }

    /// Write every captured value back onto the node, each at the position
    /// it held when captured
    pub(crate) fn apply(self, tree: &mut Tree) {
        let mut restored = Vec::new();
        for (name, saved) in self.saved {
            match saved {
                Saved::Value(value) => {
                    let index = self.positions.get(&name).copied().unwrap_or(usize::MAX);
                    restored.push((index, name, value));
                }
                Saved::Absent => {
                    tree.remove_attr(self.node, &name);
                }
            }
        }
        restored.sort_by_key(|(index, _, _)| *index);
        for (index, name, value) in restored {
            tree.insert_attr_at(self.node, index, name, value);
        }
    }
}
