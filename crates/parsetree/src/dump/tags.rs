use crate::tree::{NodeId, Tree};
use std::fmt::Write as _;
use std::io::{self, Write};

/// One line per node reachable from `first` (its siblings included):
/// the dotted path of ancestor kinds, the node's kind and its location.
///
/// ```text
///  . class (example.i:3)
///  . class . cdecl (example.i:4)
///  . class . cdecl . parm (example.i:4)
///  . constant (example.i:9)
/// ```
pub fn render_tags(tree: &Tree, first: NodeId) -> String {
    let mut out = String::new();
    append_level(tree, first, "", &mut out);
    out
}

pub fn write_tags<W: Write>(tree: &Tree, first: NodeId, out: &mut W) -> io::Result<()> {
    out.write_all(render_tags(tree, first).as_bytes())
}

pub fn print_tags(tree: &Tree, first: NodeId) -> io::Result<()> {
    write_tags(tree, first, &mut io::stdout().lock())
}

fn append_level(tree: &Tree, first: NodeId, path: &str, out: &mut String) {
    for id in tree.siblings(first) {
        let kind = tree.kind(id);
        let _ = writeln!(out, "{} . {} ({})", path, kind, tree.location(id));
        if let Some(child) = tree.first_child(id) {
            append_level(tree, child, &format!("{} . {}", path, kind), out);
        }
    }
}
