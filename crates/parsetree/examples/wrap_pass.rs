use parsetree::{Checkpoint, CheckpointStack, Location, Parm, ParmList, Slot, Tree, TreeDumper};

/// Build a small interface: a class with two methods and a free function
fn build_tree() -> (Tree, parsetree::NodeId) {
    let mut tree = Tree::new();
    let class = tree.add_node("class", Location::new("shapes.i", 3));
    tree.set_attr(class, "name", "Shape");

    let area = tree.add_node("cdecl", Location::new("shapes.i", 4));
    tree.set_attr(area, "name", "area");
    tree.set_attr(area, "type", "double");
    tree.set_attr(area, "parms", ParmList::new(vec![Parm::new("int", "precision")]));
    tree.append_child(class, Some(area));

    let scale = tree.add_node("cdecl", Location::new("shapes.i", 5));
    tree.set_attr(scale, "name", "scale");
    tree.set_attr(scale, "type", "void");
    tree.set_attr(scale, "parms", ParmList::new(vec![Parm::new("double", "factor")]));
    tree.append_child(class, Some(scale));

    let func = tree.add_node("cdecl", Location::new("shapes.i", 8));
    tree.set_attr(func, "name", "make_shape");
    tree.set_attr(func, "type", "p.Shape");
    tree.chain_siblings(class, func);

    (tree, class)
}

/// Emit wrapper names for a declaration, renaming it only for this pass
fn emit_cdecl(cp: &mut Checkpoint<'_>, prefix: &str) {
    let node = cp.slot().node();
    let name = cp.attr_str(node, "name").unwrap_or_default().to_string();
    cp.set_attr(node, "name", format!("{}{}", prefix, name));
    cp.set_attr(node, "wrap:action", "call");
    println!("  wrapper {} ({})", cp.attr_str(node, "name").unwrap_or_default(), cp.location(node));
}

fn emit_class(cp: &mut Checkpoint<'_>) {
    let class = cp.slot().node();
    let prefix = format!("{}_", cp.attr_str(class, "name").unwrap_or_default());
    let children: Vec<_> = cp.children(class).collect();
    for child in children {
        let child_slot = cp.slot().child(child);
        let mut inner = cp.nested_require(&child_slot, &["type", "*name", "?wrap:action"]);
        emit_cdecl(&mut inner, &prefix);
    }
}

fn main() {
    let (mut tree, first) = build_tree();
    let mut stack = CheckpointStack::new();

    println!("Running wrapper pass...\n");
    let roots: Vec<_> = tree.siblings(first).collect();
    for root in roots {
        let slot = Slot::root(root);
        let mut cp = Checkpoint::require(&mut tree, &mut stack, &slot, &["*name", "?wrap:action"]);
        if cp.kind(root) == "class" {
            emit_class(&mut cp);
        } else {
            emit_cdecl(&mut cp, "_wrap_");
        }
    }

    println!("\nTree after the pass (unchanged):\n");
    if let Err(e) = TreeDumper::new().print_tree(&tree, first) {
        eprintln!("Dump error: {}", e);
    }
    assert!(stack.is_empty());
}
