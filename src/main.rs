#![forbid(unsafe_code)]
//! docker-gate: validating setuid wrapper for the docker CLI.
//!
//! An unprivileged caller supplies a docker command line. Every token is
//! validated against a fixed allow-list policy; only when the whole line is
//! accepted does the process escalate to root and exec the runtime with the
//! sanitized argument vector. Any violation prints one diagnostic and exits
//! 1 with no privileged action taken.

use std::io::{self, IsTerminal};

use clap::Parser;
use colored::Colorize;

use docker_gate::cli::Cli;
use docker_gate::logging::DecisionLogger;
use docker_gate::{evaluate, gate, GateError};

/// Disable colors when stderr is not a terminal.
fn configure_colors() {
    if !io::stderr().is_terminal() {
        colored::control::set_override(false);
    }
}

fn report(err: &GateError) {
    eprintln!("{} {err}", "docker-gate:".red().bold());
}

fn run(cli: &Cli) -> i32 {
    let logger = DecisionLogger::from_env();
    let command_line = cli.command.join(" ");

    let result = gate::invoking_user_home().and_then(|home| evaluate(&cli.command, &home));
    let invocation = match result {
        Ok(invocation) => invocation,
        Err(err) => {
            if let Some(logger) = &logger {
                logger.log_deny(&command_line, &err.to_string());
            }
            report(&err);
            return 1;
        }
    };

    if let Some(logger) = &logger {
        logger.log_allow(&invocation.to_string());
    }

    // Only returns on failure; on success docker replaces this process and
    // the exit status is the runtime's own.
    let err = gate::escalate_and_exec(&invocation);
    report(&err);
    1
}

fn main() {
    configure_colors();
    let cli = Cli::parse();
    std::process::exit(run(&cli));
}
