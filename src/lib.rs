#![cfg_attr(not(test), forbid(unsafe_code))]
//! docker-gate library.
//!
//! The command validation and sanitization engine behind the `docker-gate`
//! binary: a setuid wrapper that lets unprivileged users run a fixed subset
//! of docker commands. Every token of the caller's command line is checked
//! against an allow-list policy before any privileged action occurs.
//!
//! # Architecture
//!
//! ```text
//! argv ──▶ classifier ──▶ validator ──▶ builder ──▶ gate
//!             │               │            │          │
//!        first token     one state     capacity-   setuid(0)
//!        picks start     per token,    checked     then exec,
//!        state           fail-closed   appends     vector argv
//! ```
//!
//! The engine entry point is [`evaluate`]: pure, deterministic and free of
//! privileged side effects, so every rejection path is testable. Only a
//! successfully built [`SanitizedInvocation`] can reach the gate.

pub mod allowlist;
pub mod classifier;
pub mod cli;
pub mod command;
pub mod error;
pub mod evaluator;
pub mod gate;
pub mod logging;
pub mod validator;

pub use allowlist::{AllowEntry, AllowTable, AllowTables, MatchMode, OPTIONS, SUBCOMMANDS};
pub use classifier::{classify, CommandKind};
pub use command::{SanitizedInvocation, DOCKER_BIN, HOME_MOUNT_TARGET, MAX_INVOCATION_BYTES};
pub use error::GateError;
pub use evaluator::{evaluate, evaluate_with_tables};
pub use logging::{DecisionLogger, ENV_LOG_PATH};
pub use validator::{ValidationState, Validator};
