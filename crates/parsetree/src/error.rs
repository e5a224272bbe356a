use crate::tree::Location;

/// Misuse of the checkpoint stack by a traversal.
///
/// These are defects in the calling pass, never input errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CheckpointError {
    #[error("{location}: missing attribute '{name}' in node '{kind}'")]
    MissingAttribute { kind: String, location: Location, name: String },

    #[error(
        "checkpoint nesting violation in '{kind}': a frame for '{open_kind}' is still open. \
         A handler for '{open_kind}' probably forgot to call restore"
    )]
    NestingViolation { kind: String, open_kind: String },

    #[error("restore of '{kind}' with no open checkpoint frame")]
    EmptyStack { kind: String },

    #[error(
        "restore of '{kind}' does not match the open frame for '{open_kind}'. \
         A handler for '{open_kind}' probably forgot to call restore"
    )]
    SlotMismatch { kind: String, open_kind: String },

    #[error("checkpoint stack capacity of {capacity} frames exceeded at '{kind}' (runaway recursion?)")]
    CapacityExceeded { kind: String, capacity: usize },
}

pub type Result<T> = std::result::Result<T, CheckpointError>;

/// Terminate on a checkpoint protocol violation.
///
/// The traversal's view of the tree can no longer be trusted, so there is no
/// way to continue. The error is logged and then raised as a panic, not a
/// process abort: under the default `panic = "unwind"` strategy any open
/// [`Checkpoint`](crate::Checkpoint) guards still restore their frames while
/// the stack unwinds. Build with `panic = "abort"` to stop the process at
/// this point instead.
#[track_caller]
pub fn fatal(error: CheckpointError) -> ! {
    log::error!("fatal: {}", error);
    panic!("fatal checkpoint error: {}", error)
}
