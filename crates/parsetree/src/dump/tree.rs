use super::escape::preview;
use crate::config::Config;
use crate::tree::{NodeId, Tree, Value};
use colored::Colorize;
use std::fmt::Write as _;
use std::io::{self, Write};

/// Attribute rendered through [`ParmList::protostr`](crate::tree::ParmList::protostr)
pub const PARMS_ATTR: &str = "parms";

/// Link and type names that never appear in a dump
pub const STRUCTURAL_ATTRS: &[&str] =
    &["nodeType", "kind", "firstChild", "lastChild", "parentNode", "nextSibling", "previousSibling"];

/// Verbose attribute dump of a tree.
///
/// ```text
/// +++ class ----------------------------------------
/// | name         - "Shape"
///
///       +++ cdecl ----------------------------------------
///       | name         - "area"
///       | parms        - int,double
///       |
/// ```
#[derive(Debug, Clone)]
pub struct TreeDumper {
    preview_len: usize,
    indent_width: usize,
    reserved_prefix: char,
    color: bool,
}

impl TreeDumper {
    pub fn new() -> Self {
        Self::from_config(&Config::default())
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            preview_len: config.preview_len,
            indent_width: config.indent_width,
            reserved_prefix: config.reserved_prefix,
            color: config.color,
        }
    }

    pub fn render_tree(&self, tree: &Tree, first: NodeId) -> String {
        let mut out = String::new();
        self.append_level(tree, first, 0, &mut out);
        out
    }

    pub fn write_tree<W: Write>(&self, tree: &Tree, first: NodeId, out: &mut W) -> io::Result<()> {
        out.write_all(self.render_tree(tree, first).as_bytes())
    }

    pub fn print_tree(&self, tree: &Tree, first: NodeId) -> io::Result<()> {
        self.write_tree(tree, first, &mut io::stdout().lock())
    }

    fn append_level(&self, tree: &Tree, first: NodeId, indent: usize, out: &mut String) {
        let pad = " ".repeat(indent);
        for id in tree.siblings(first) {
            let header = format!("+++ {} ----------------------------------------", tree.kind(id));
            if self.color {
                let _ = writeln!(out, "{}{}", pad, header.bold().cyan());
            } else {
                let _ = writeln!(out, "{}{}", pad, header);
            }

            for (name, value) in tree.attrs(id) {
                if self.is_hidden(name) {
                    continue;
                }
                let _ = writeln!(out, "{}| {:<12} - {}", pad, name, self.format_value(name, value));
            }

            match tree.first_child(id) {
                Some(child) => {
                    out.push('\n');
                    self.append_level(tree, child, indent + self.indent_width, out);
                }
                None => {
                    let _ = writeln!(out, "{}| ", pad);
                }
            }
        }
    }

    fn is_hidden(&self, name: &str) -> bool {
        STRUCTURAL_ATTRS.contains(&name) || name.starts_with(self.reserved_prefix)
    }

    fn format_value(&self, name: &str, value: &Value) -> String {
        match value {
            Value::Parms(parms) if name == PARMS_ATTR => parms.protostr(),
            Value::Str(s) => format!("\"{}\"", preview(s, self.preview_len)),
            other => other.to_string(),
        }
    }
}

impl Default for TreeDumper {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience function for dumping with the default settings
pub fn render_tree(tree: &Tree, first: NodeId) -> String {
    TreeDumper::new().render_tree(tree, first)
}
