//! Sanitized invocation assembly.
//!
//! All growth goes through one capacity-checked append, so the byte-cap
//! invariant lives in exactly one place instead of being re-derived at every
//! call site. The builder never re-validates tokens; it trusts the
//! validator's accept decision.

use std::fmt;

use crate::error::GateError;

/// Absolute path of the wrapped runtime. Never resolved through the caller's
/// `PATH`: this binary runs setuid root.
pub const DOCKER_BIN: &str = "/usr/bin/docker";

/// Fixed in-container mount point for the invoking user's home directory.
pub const HOME_MOUNT_TARGET: &str = "/hosthome";

/// Byte cap for the accumulated command line (tokens plus one separator byte
/// each).
pub const MAX_INVOCATION_BYTES: usize = 1000;

/// The validated argument vector handed to the privilege gate.
///
/// Outside this crate the type is read-only; only the engine's builder path
/// can grow one, so holding a value is evidence that every token in it
/// passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizedInvocation {
    argv: Vec<String>,
    bytes: usize,
}

impl SanitizedInvocation {
    /// Start a new invocation for the fixed runtime binary.
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            argv: vec![DOCKER_BIN.to_string()],
            bytes: DOCKER_BIN.len(),
        }
    }

    /// Append one validated token, counting a separator byte.
    ///
    /// The prospective total is checked *before* the append; reaching the
    /// cap exactly already counts as overflow.
    pub(crate) fn push(&mut self, token: &str) -> Result<(), GateError> {
        let prospective = self.bytes + token.len() + 1;
        if prospective >= MAX_INVOCATION_BYTES {
            return Err(GateError::Overflow {
                capacity: MAX_INVOCATION_BYTES,
            });
        }
        self.bytes = prospective;
        self.argv.push(token.to_string());
        Ok(())
    }

    /// Inject the bind-mount generated for `run`: the invoking user's home
    /// directory mapped to [`HOME_MOUNT_TARGET`].
    pub(crate) fn push_home_mount(&mut self, home: &str) -> Result<(), GateError> {
        self.push(&format!("--volume={home}:{HOME_MOUNT_TARGET}"))
    }

    /// The runtime binary (argv\[0\]).
    #[must_use]
    pub fn binary(&self) -> &str {
        &self.argv[0]
    }

    /// The arguments after the binary, in validated order.
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.argv[1..]
    }

    /// The full argument vector including the binary.
    #[must_use]
    pub fn argv(&self) -> &[String] {
        &self.argv
    }

    /// Accumulated byte length (tokens plus separators).
    #[must_use]
    pub const fn len_bytes(&self) -> usize {
        self.bytes
    }
}

impl fmt::Display for SanitizedInvocation {
    /// Space-joined rendering, for diagnostics and the decision log only.
    /// Execution always uses the vector form, never this string.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.argv.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_the_runtime_binary() {
        let inv = SanitizedInvocation::new();
        assert_eq!(inv.binary(), DOCKER_BIN);
        assert!(inv.args().is_empty());
        assert_eq!(inv.len_bytes(), DOCKER_BIN.len());
    }

    #[test]
    fn push_accounts_for_a_separator_byte() {
        let mut inv = SanitizedInvocation::new();
        inv.push("run").expect("fits");
        assert_eq!(inv.len_bytes(), DOCKER_BIN.len() + "run".len() + 1);
        assert_eq!(inv.args(), ["run"]);
    }

    #[test]
    fn push_rejects_when_the_cap_would_be_reached() {
        let mut inv = SanitizedInvocation::new();
        // One byte short of the cap after the separator is still an overflow
        // (>= semantics).
        let filler = "x".repeat(MAX_INVOCATION_BYTES - inv.len_bytes() - 1);
        assert!(matches!(
            inv.push(&filler),
            Err(GateError::Overflow { .. })
        ));
        // The failed append must not have grown the invocation.
        assert_eq!(inv.args().len(), 0);
        assert_eq!(inv.len_bytes(), DOCKER_BIN.len());
    }

    #[test]
    fn push_accepts_just_under_the_cap() {
        let mut inv = SanitizedInvocation::new();
        let filler = "x".repeat(MAX_INVOCATION_BYTES - inv.len_bytes() - 2);
        inv.push(&filler).expect("one byte of headroom");
        assert_eq!(inv.len_bytes(), MAX_INVOCATION_BYTES - 1);
    }

    #[test]
    fn home_mount_maps_home_to_fixed_target() {
        let mut inv = SanitizedInvocation::new();
        inv.push("run").expect("subcommand");
        inv.push_home_mount("/home/alice").expect("mount fits");
        assert_eq!(inv.args()[1], "--volume=/home/alice:/hosthome");
    }

    #[test]
    fn display_joins_with_spaces() {
        let mut inv = SanitizedInvocation::new();
        inv.push("ps").expect("subcommand");
        assert_eq!(inv.to_string(), format!("{DOCKER_BIN} ps"));
    }
}
