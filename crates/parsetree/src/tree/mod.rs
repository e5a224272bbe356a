//! Parse tree storage
//!
//! All nodes live in a [`Tree`] arena and refer to each other by [`NodeId`].
//! The forward links (`first_child`, `next_sibling`) carry the structure;
//! `parent` and `previous_sibling` are plain lookups kept consistent by the
//! builder operations here.

pub mod location;
pub mod node;
pub mod value;

pub use location::*;
pub use node::*;
pub use value::*;

/// Arena holding every node of a parse tree
#[derive(Debug, Clone, Default)]
pub struct Tree {
    nodes: Vec<NodeData>,
}

impl Tree {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { nodes: Vec::with_capacity(capacity) }
    }

    /// Create an unattached node
    pub fn add_node(&mut self, kind: impl Into<String>, location: Location) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(NodeData::new(kind, location));
        id
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Panics if `id` was not created by this tree.
    pub fn node(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.index()]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut NodeData {
        &mut self.nodes[id.index()]
    }

    pub fn kind(&self, id: NodeId) -> &str {
        &self.node(id).kind
    }

    pub fn location(&self, id: NodeId) -> &Location {
        &self.node(id).location
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).first_child
    }

    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).last_child
    }

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).next_sibling
    }

    pub fn previous_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).previous_sibling
    }

    /// Append `child` to the end of `node`'s children.
    ///
    /// If `child` already heads a sibling chain, the whole rest of the chain
    /// is appended and adopted. Nothing happens when `child` is `None`. The
    /// child is not checked for an existing parent.
    pub fn append_child(&mut self, node: NodeId, child: Option<NodeId>) {
        let Some(child) = child else { return };

        let last_child = self.node(node).last_child;
        match last_child {
            None => self.node_mut(node).first_child = Some(child),
            Some(last) => {
                self.node_mut(last).next_sibling = Some(child);
                self.node_mut(child).previous_sibling = Some(last);
            }
        }

        let last = self.adopt_chain(node, child);
        self.node_mut(node).last_child = Some(last);
    }

    /// Link `next` (and whatever follows it) directly after `prev`.
    ///
    /// Used to build flat lists of independent roots. When `prev` has a
    /// parent the appended chain joins that parent's children. Any siblings
    /// that followed `prev` are cut off and become an unparented chain.
    pub fn chain_siblings(&mut self, prev: NodeId, next: NodeId) {
        if let Some(old) = self.node(prev).next_sibling {
            self.node_mut(old).previous_sibling = None;
            let mut current = Some(old);
            while let Some(id) = current {
                let data = self.node_mut(id);
                data.parent = None;
                if data.next_sibling == Some(next) {
                    data.next_sibling = None;
                }
                current = data.next_sibling;
            }
        }

        self.node_mut(prev).next_sibling = Some(next);
        self.node_mut(next).previous_sibling = Some(prev);

        let parent = self.node(prev).parent;
        match parent {
            Some(parent) => {
                let last = self.adopt_chain(parent, next);
                self.node_mut(parent).last_child = Some(last);
            }
            None => {
                let mut current = Some(next);
                while let Some(id) = current {
                    let data = self.node_mut(id);
                    data.parent = None;
                    current = data.next_sibling;
                }
            }
        }
    }

    // Set `parent` along the chain starting at `first`, returning its tail
    fn adopt_chain(&mut self, parent: NodeId, first: NodeId) -> NodeId {
        let mut last = first;
        let mut current = Some(first);
        while let Some(id) = current {
            last = id;
            let data = self.node_mut(id);
            data.parent = Some(parent);
            current = data.next_sibling;
        }
        last
    }

    // Attribute access

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&Value> {
        self.node(id).attrs.get(name)
    }

    pub fn attr_str(&self, id: NodeId, name: &str) -> Option<&str> {
        self.attr(id, name).and_then(Value::as_str)
    }

    pub fn has_attr(&self, id: NodeId, name: &str) -> bool {
        self.node(id).attrs.contains_key(name)
    }

    /// Set an attribute, returning the value it replaced
    pub fn set_attr(
        &mut self,
        id: NodeId,
        name: impl Into<String>,
        value: impl Into<Value>,
    ) -> Option<Value> {
        self.node_mut(id).attrs.insert(name.into(), value.into())
    }

    /// Remove an attribute, keeping the order of the remaining ones
    pub fn remove_attr(&mut self, id: NodeId, name: &str) -> Option<Value> {
        self.node_mut(id).attrs.shift_remove(name)
    }

    /// Position of `name` in the node's attribute order
    pub fn attr_index(&self, id: NodeId, name: &str) -> Option<usize> {
        self.node(id).attrs.get_index_of(name)
    }

    /// Set an attribute and move it to `index`, clamped to the end of the
    /// attribute list
    pub fn insert_attr_at(
        &mut self,
        id: NodeId,
        index: usize,
        name: impl Into<String>,
        value: impl Into<Value>,
    ) -> Option<Value> {
        let name = name.into();
        let attrs = &mut self.node_mut(id).attrs;
        let end = if attrs.contains_key(&name) { attrs.len() - 1 } else { attrs.len() };
        attrs.shift_insert(index.min(end), name, value.into())
    }

    pub fn attrs(&self, id: NodeId) -> impl Iterator<Item = (&str, &Value)> + '_ {
        self.node(id).attrs.iter().map(|(k, v)| (k.as_str(), v))
    }

    // Traversal

    /// `first` and every sibling after it
    pub fn siblings(&self, first: NodeId) -> Siblings<'_> {
        Siblings { tree: self, next: Some(first) }
    }

    pub fn children(&self, id: NodeId) -> Siblings<'_> {
        Siblings { tree: self, next: self.first_child(id) }
    }

    /// Parent, grandparent, ... up to the root
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors { tree: self, next: self.parent(id) }
    }

    /// Pre-order walk over `first`, its following siblings and all their
    /// descendants, children before the next sibling
    pub fn walk(&self, first: NodeId) -> Walk<'_> {
        Walk { tree: self, stack: vec![first], root: None }
    }

    /// Pre-order walk over `id` and its descendants only
    pub fn subtree(&self, id: NodeId) -> Walk<'_> {
        Walk { tree: self, stack: vec![id], root: Some(id) }
    }
}

pub struct Siblings<'a> {
    tree: &'a Tree,
    next: Option<NodeId>,
}

impl Iterator for Siblings<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.next?;
        self.next = self.tree.next_sibling(id);
        Some(id)
    }
}

pub struct Ancestors<'a> {
    tree: &'a Tree,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.next?;
        self.next = self.tree.parent(id);
        Some(id)
    }
}

pub struct Walk<'a> {
    tree: &'a Tree,
    stack: Vec<NodeId>,
    root: Option<NodeId>, // Siblings of this node are not visited
}

impl Iterator for Walk<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        let data = self.tree.node(id);
        if self.root != Some(id) {
            if let Some(sibling) = data.next_sibling {
                self.stack.push(sibling);
            }
        }
        if let Some(child) = data.first_child {
            self.stack.push(child);
        }
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc() -> Location {
        Location::new("test.i", 1)
    }

    #[test]
    fn test_append_single_child() {
        let mut tree = Tree::new();
        let parent = tree.add_node("class", loc());
        let child = tree.add_node("cdecl", loc());

        tree.append_child(parent, Some(child));

        assert_eq!(tree.first_child(parent), Some(child));
        assert_eq!(tree.last_child(parent), Some(child));
        assert_eq!(tree.parent(child), Some(parent));
    }

    #[test]
    fn test_append_none_is_noop() {
        let mut tree = Tree::new();
        let parent = tree.add_node("class", loc());
        tree.append_child(parent, None);
        assert_eq!(tree.first_child(parent), None);
        assert_eq!(tree.last_child(parent), None);
    }

    #[test]
    fn test_walk_skips_siblings_of_subtree_root() {
        let mut tree = Tree::new();
        let a = tree.add_node("a", loc());
        let b = tree.add_node("b", loc());
        let c = tree.add_node("c", loc());
        tree.chain_siblings(a, b);
        tree.append_child(a, Some(c));

        assert_eq!(tree.walk(a).collect::<Vec<_>>(), vec![a, c, b]);
        assert_eq!(tree.subtree(a).collect::<Vec<_>>(), vec![a, c]);
    }

    #[test]
    fn test_chain_siblings_cuts_old_tail() {
        let mut tree = Tree::new();
        let a = tree.add_node("a", loc());
        let c1 = tree.add_node("c1", loc());
        let c2 = tree.add_node("c2", loc());
        let c3 = tree.add_node("c3", loc());
        let x = tree.add_node("x", loc());
        tree.append_child(a, Some(c1));
        tree.append_child(a, Some(c2));
        tree.append_child(a, Some(c3));

        tree.chain_siblings(c1, x);

        assert_eq!(tree.children(a).collect::<Vec<_>>(), vec![c1, x]);
        assert_eq!(tree.last_child(a), Some(x));
        assert_eq!(tree.parent(x), Some(a));
        assert_eq!(tree.previous_sibling(x), Some(c1));
        assert_eq!(tree.parent(c2), None);
        assert_eq!(tree.parent(c3), None);
        assert_eq!(tree.previous_sibling(c2), None);
        assert_eq!(tree.siblings(c2).collect::<Vec<_>>(), vec![c2, c3]);
    }

    #[test]
    fn test_chain_siblings_skips_over_middle() {
        let mut tree = Tree::new();
        let a = tree.add_node("a", loc());
        let b = tree.add_node("b", loc());
        let c = tree.add_node("c", loc());
        tree.chain_siblings(a, b);
        tree.chain_siblings(b, c);

        tree.chain_siblings(a, c);

        assert_eq!(tree.siblings(a).collect::<Vec<_>>(), vec![a, c]);
        assert_eq!(tree.next_sibling(b), None);
        assert_eq!(tree.previous_sibling(b), None);
        assert_eq!(tree.previous_sibling(c), Some(a));
    }

    #[test]
    fn test_chain_after_root_clears_parent() {
        let mut tree = Tree::new();
        let root = tree.add_node("root", loc());
        let p = tree.add_node("p", loc());
        let child = tree.add_node("child", loc());
        tree.append_child(p, Some(child));

        tree.chain_siblings(root, child);

        assert_eq!(tree.parent(child), None);
        assert_eq!(tree.siblings(root).collect::<Vec<_>>(), vec![root, child]);
    }

    #[test]
    fn test_set_attr_returns_previous() {
        let mut tree = Tree::new();
        let n = tree.add_node("cdecl", loc());
        assert_eq!(tree.set_attr(n, "name", "foo"), None);
        assert_eq!(tree.set_attr(n, "name", "bar"), Some(Value::from("foo")));
        assert_eq!(tree.attr_str(n, "name"), Some("bar"));
    }

    #[test]
    fn test_insert_attr_at_clamps() {
        let mut tree = Tree::new();
        let n = tree.add_node("cdecl", loc());
        tree.set_attr(n, "a", "1");
        tree.set_attr(n, "b", "2");
        tree.insert_attr_at(n, 0, "c", "3");
        tree.insert_attr_at(n, 9, "a", "4");
        let names: Vec<&str> = tree.attrs(n).map(|(k, _)| k).collect();
        assert_eq!(names, vec!["c", "b", "a"]);
        assert_eq!(tree.attr_index(n, "b"), Some(1));
        assert_eq!(tree.attr_str(n, "a"), Some("4"));
    }

    #[test]
    fn test_remove_attr_keeps_order() {
        let mut tree = Tree::new();
        let n = tree.add_node("cdecl", loc());
        tree.set_attr(n, "a", "1");
        tree.set_attr(n, "b", "2");
        tree.set_attr(n, "c", "3");
        tree.remove_attr(n, "b");
        let names: Vec<&str> = tree.attrs(n).map(|(k, _)| k).collect();
        assert_eq!(names, vec!["a", "c"]);
    }
}
