//! Error taxonomy for the gate.
//!
//! Every error is terminal for the invocation: `main` prints a single
//! diagnostic and exits 1. Rejections are returned as `Err` values rather
//! than aborting mid-validation, so each rejection path is unit-testable
//! without killing the test process.

use std::io;

use thiserror::Error;

/// Why a command line was rejected or could not be executed.
///
/// Validation errors (`Usage`, `Overflow`, `BlockedOption`,
/// `InvalidDirection`, `DisallowedToken`) are all raised before any
/// privileged action is taken.
#[derive(Debug, Error)]
pub enum GateError {
    /// Missing arguments, or the first token matches no recognized
    /// subcommand family.
    #[error("usage: docker-gate <subcommand> [options] [args...]")]
    Usage,

    /// The sanitized command line would reach the fixed byte capacity.
    #[error("the command is longer than the {capacity}-byte buffer")]
    Overflow { capacity: usize },

    /// A `-v`/`--v...` token. Volume mounts are never caller-controllable.
    #[error("-v and volume options are not allowed: {token:?}")]
    BlockedOption { token: String },

    /// A copy referenced a container path anywhere but the final operand.
    #[error("cp from container to host is not allowed: {token:?}")]
    InvalidDirection { token: String },

    /// An option token that is not on the allow-list.
    #[error("option is not allowed: {token:?}")]
    DisallowedToken { token: String },

    /// The invoking user's home directory could not be resolved from the
    /// account database.
    #[error("cannot resolve the invoking user's home directory")]
    HomeLookup,

    /// Raising privileges failed (the binary is likely not setuid root).
    #[error("privilege escalation failed: {0}")]
    Escalate(#[source] nix::Error),

    /// Replacing the process image with the runtime failed.
    #[error("exec of {binary} failed: {source}")]
    Exec {
        binary: &'static str,
        #[source]
        source: io::Error,
    },
}
