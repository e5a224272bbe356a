pub mod checkpoint;
pub mod config;
pub mod dump;
pub mod error;
pub mod tree;

// Re-export commonly used items
pub use checkpoint::{AttrSpec, Checkpoint, CheckpointStack, Outcome, Slot};
pub use config::Config;
pub use dump::{print_tags, render_tags, render_tree, write_tags, TreeDumper};
pub use error::{CheckpointError, Result};
pub use tree::{Location, NodeId, Parm, ParmList, Tree, Value};
