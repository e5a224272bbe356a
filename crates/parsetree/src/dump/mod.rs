//! Human-readable dumps of a parse tree
//!
//! Two formats, both read-only:
//!
//! * tags: one line per node with its dotted path of ancestor kinds,
//! * tree: every node with its attributes, indented by depth.

pub mod escape;
pub mod tags;
pub mod tree;

pub use escape::{escape, preview};
pub use tags::{print_tags, render_tags, write_tags};
pub use tree::{render_tree, TreeDumper, PARMS_ATTR, STRUCTURAL_ATTRS};
