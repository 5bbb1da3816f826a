//! Token-stream validation state machine.
//!
//! After the classifier picks a start state, the validator consumes the
//! remaining tokens strictly left to right, one state transition per token.
//! A rejection is an `Err` return, never a state: the engine aborts on the
//! first violation and nothing rejected reaches the sanitized invocation.

use crate::allowlist::AllowTables;
use crate::classifier::CommandKind;
use crate::error::GateError;

/// Validator state, advanced once per token after the subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationState {
    /// First operand of a copy. May not reference a container path.
    CopyFirstArg,
    /// Second operand of a copy. A container path is allowed only here, and
    /// only when it is the final token.
    CopySecondArg,
    /// Copy complete; any further token is a usage violation.
    CopyAccepted,
    /// `network` seen; an allow-listed action word must follow.
    NetworkPending,
    /// General stream: allow-listed options and free-form positionals.
    Accepted,
}

/// Streaming validator over the tokens following the subcommand.
#[derive(Debug)]
pub struct Validator {
    state: ValidationState,
    tables: AllowTables,
}

impl Validator {
    /// Pick the start state from the classifier's verdict.
    ///
    /// `Unrecognized` fails here, before any further token is looked at.
    pub fn new(kind: CommandKind, tables: AllowTables) -> Result<Self, GateError> {
        let state = match kind {
            CommandKind::Copy => ValidationState::CopyFirstArg,
            CommandKind::Listed => ValidationState::Accepted,
            CommandKind::Network => ValidationState::NetworkPending,
            CommandKind::Unrecognized => return Err(GateError::Usage),
        };
        Ok(Self { state, tables })
    }

    /// Validate one token and advance the state.
    ///
    /// `is_last` marks the final token of the command line; the
    /// copy-direction rule only tolerates a `:`-bearing operand there.
    pub fn step(&mut self, token: &str, is_last: bool) -> Result<(), GateError> {
        // Volume mounts are blocked in every state, before any allow-list is
        // consulted. A mistaken allow-list entry cannot reopen them.
        if token.starts_with("-v") || token.starts_with("--v") {
            return Err(GateError::BlockedOption {
                token: token.to_string(),
            });
        }

        self.state = match self.state {
            ValidationState::CopyFirstArg => {
                check_copy_direction(token, is_last)?;
                ValidationState::CopySecondArg
            }
            ValidationState::CopySecondArg => {
                check_copy_direction(token, is_last)?;
                ValidationState::CopyAccepted
            }
            // cp takes exactly two positional operands.
            ValidationState::CopyAccepted => return Err(GateError::Usage),
            ValidationState::NetworkPending => {
                if !self.tables.subcommands.matches(token) {
                    return Err(GateError::DisallowedToken {
                        token: token.to_string(),
                    });
                }
                ValidationState::Accepted
            }
            ValidationState::Accepted => {
                // Free-form positionals (image names, container names,
                // commands) pass; anything that looks like an option must be
                // explicitly allow-listed.
                if token.starts_with('-') && !self.tables.options.matches(token) {
                    return Err(GateError::DisallowedToken {
                        token: token.to_string(),
                    });
                }
                ValidationState::Accepted
            }
        };
        Ok(())
    }

    /// Terminal check once the token stream is exhausted.
    pub fn finish(&self) -> Result<(), GateError> {
        match self.state {
            ValidationState::Accepted | ValidationState::CopyAccepted => Ok(()),
            ValidationState::CopyFirstArg
            | ValidationState::CopySecondArg
            | ValidationState::NetworkPending => Err(GateError::Usage),
        }
    }

    /// Current state (diagnostics and tests).
    #[must_use]
    pub const fn state(&self) -> ValidationState {
        self.state
    }
}

/// A `:`-bearing token denotes a container-resident path; it may only appear
/// as the last operand of a copy (the destination). Anything earlier would
/// let the caller exfiltrate container files onto the host.
fn check_copy_direction(token: &str, is_last: bool) -> Result<(), GateError> {
    if !is_last && token.contains(':') {
        return Err(GateError::InvalidDirection {
            token: token.to_string(),
        });
    }
    Ok(())
}
