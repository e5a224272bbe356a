// Test infrastructure shared by the parsetree integration tests

#![allow(dead_code)]

use parsetree::{Location, NodeId, Parm, ParmList, Tree, Value};

pub const FILE: &str = "example.i";

/// Builder for a node and its subtree
pub struct NodeBuilder {
    kind: String,
    line: u32,
    attrs: Vec<(String, Value)>,
    children: Vec<NodeBuilder>,
}

impl NodeBuilder {
    pub fn new(kind: impl Into<String>) -> Self {
        Self { kind: kind.into(), line: 1, attrs: Vec::new(), children: Vec::new() }
    }

    pub fn line(mut self, line: u32) -> Self {
        self.line = line;
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    pub fn child(mut self, child: NodeBuilder) -> Self {
        self.children.push(child);
        self
    }

    pub fn build(self, tree: &mut Tree) -> NodeId {
        let id = tree.add_node(self.kind, Location::new(FILE, self.line));
        for (name, value) in self.attrs {
            tree.set_attr(id, name, value);
        }
        for child in self.children {
            let child_id = child.build(tree);
            tree.append_child(id, Some(child_id));
        }
        id
    }
}

pub fn node(kind: &str) -> NodeBuilder {
    NodeBuilder::new(kind)
}

/// Two independent roots:
///
/// ```text
/// class Shape (3)
///   cdecl area (4)  parms: int,double
///   cdecl draw (6)
/// constant PI (9)
/// ```
pub fn sample_tree() -> (Tree, NodeId) {
    let mut tree = Tree::new();
    let class = node("class")
        .line(3)
        .attr("name", "Shape")
        .child(
            node("cdecl")
                .line(4)
                .attr("name", "area")
                .attr("type", "double")
                .attr("parms", ParmList::new(vec![Parm::new("int", "w"), Parm::new("double", "h")])),
        )
        .child(node("cdecl").line(6).attr("name", "draw"))
        .build(&mut tree);
    let constant = node("constant").line(9).attr("name", "PI").attr("value", "3.14").build(&mut tree);
    tree.chain_siblings(class, constant);
    (tree, class)
}

/// A single node with the given string attributes
pub fn single(kind: &str, attrs: &[(&str, &str)]) -> (Tree, NodeId) {
    let mut tree = Tree::new();
    let mut builder = node(kind);
    for (name, value) in attrs {
        builder = builder.attr(*name, *value);
    }
    let id = builder.build(&mut tree);
    (tree, id)
}
