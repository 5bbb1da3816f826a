//! Command-line surface of the gate binary.

use clap::Parser;

/// Validating setuid wrapper around the docker CLI.
///
/// Accepts a docker command line, validates every token against a fixed
/// allow-list policy, and only on full acceptance escalates and execs the
/// runtime with the sanitized argument vector.
#[derive(Parser, Debug)]
#[command(name = "docker-gate", version, about, long_about = None)]
pub struct Cli {
    /// Docker subcommand followed by its arguments, forwarded verbatim
    /// after validation.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<String>,
}
