use super::{Location, Value};
use indexmap::IndexMap;
use std::fmt;

/// Index of a node inside its [`Tree`](super::Tree)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Ordered attribute bag of a node
pub type Attributes = IndexMap<String, Value>;

/// Storage for a single node.
///
/// `parent` and `previous_sibling` are lookups only; the tree owns every
/// node and the forward links (`first_child`, `next_sibling`) define the
/// structure.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeData {
    pub kind: String,
    pub attrs: Attributes,
    pub location: Location,
    pub parent: Option<NodeId>,
    pub first_child: Option<NodeId>,
    pub last_child: Option<NodeId>,
    pub next_sibling: Option<NodeId>,
    pub previous_sibling: Option<NodeId>,
}

impl NodeData {
    pub fn new(kind: impl Into<String>, location: Location) -> Self {
        Self {
            kind: kind.into(),
            attrs: Attributes::new(),
            location,
            parent: None,
            first_child: None,
            last_child: None,
            next_sibling: None,
            previous_sibling: None,
        }
    }
}
