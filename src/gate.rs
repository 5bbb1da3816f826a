//! Privilege escalation and process replacement.
//!
//! The only module that touches privileges or the user database. It is
//! reachable with a [`SanitizedInvocation`] in hand only, and escalation is
//! a single explicit step performed exactly once, after validation has
//! accepted the whole command line. Never interleaved with token
//! processing.

use std::os::unix::process::CommandExt;
use std::process::Command;

use nix::unistd::{getuid, setuid, Uid, User};

use crate::command::{SanitizedInvocation, DOCKER_BIN};
use crate::error::GateError;

/// Resolve the invoking user's home directory from the account database.
///
/// The real uid identifies the caller even while running setuid root.
/// `$HOME` is deliberately not consulted: the caller controls it.
pub fn invoking_user_home() -> Result<String, GateError> {
    let user = User::from_uid(getuid())
        .ok()
        .flatten()
        .ok_or(GateError::HomeLookup)?;
    user.dir
        .into_os_string()
        .into_string()
        .map_err(|_| GateError::HomeLookup)
}

/// Raise real and effective uid to root.
///
/// Requires the binary to be installed setuid root; `setuid` then promotes
/// all three uids so the runtime and its children run fully privileged.
pub fn escalate() -> Result<(), GateError> {
    setuid(Uid::from_raw(0)).map_err(GateError::Escalate)
}

/// Replace the current process image with the runtime.
///
/// The argument vector is passed as-is; no shell ever re-parses it, so no
/// metacharacter can be reinterpreted past this point. Only returns on
/// failure.
pub fn exec(invocation: &SanitizedInvocation) -> GateError {
    let err = Command::new(invocation.binary())
        .args(invocation.args())
        .exec();
    GateError::Exec {
        binary: DOCKER_BIN,
        source: err,
    }
}

/// Escalate, then exec. Returns the failure; on success the process image
/// is replaced and this function never comes back.
pub fn escalate_and_exec(invocation: &SanitizedInvocation) -> GateError {
    if let Err(err) = escalate() {
        return err;
    }
    exec(invocation)
}
