//! First-token classification.
//!
//! The classifier looks at the first token of the command line and picks the
//! validator's start state. An unrecognized first token fails the whole
//! invocation before any other token is inspected.

use crate::allowlist::AllowTables;

/// The recognized subcommand families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    /// `cp...`: copy between host and container, direction-checked.
    Copy,
    /// A subcommand on the allow-list (`run`, `exec`, `ps`, ...).
    Listed,
    /// `network...`: an allow-listed action word must follow.
    Network,
    /// Anything else. Rejected with a usage error, fail fast.
    Unrecognized,
}

/// Classify the first token of the command line.
///
/// Check order matters: the literal `cp` and `network` prefixes bracket the
/// table lookup, so `connect`/`create` used as a *first* token classify as
/// `Listed` (container create), not as network actions.
#[must_use]
pub fn classify(first: &str, tables: &AllowTables) -> CommandKind {
    if first.starts_with("cp") {
        CommandKind::Copy
    } else if tables.subcommands.matches(first) {
        CommandKind::Listed
    } else if first.starts_with("network") {
        CommandKind::Network
    } else {
        CommandKind::Unrecognized
    }
}
