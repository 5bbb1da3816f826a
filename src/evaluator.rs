//! Engine entry point: classify, validate and assemble in a single pass.
//!
//! This is the unit-testable surface of the guard. It performs no I/O and
//! takes no privileged action; every rejection comes back as an `Err` for
//! the binary's top-level reporter to print.

use crate::allowlist::AllowTables;
use crate::classifier::classify;
use crate::command::SanitizedInvocation;
use crate::error::GateError;
use crate::validator::Validator;

/// Validate `args` (subcommand first) against the shipped policy and build
/// the sanitized invocation.
///
/// `home` is the invoking user's home directory, already resolved from the
/// account database by the caller. Deterministic: identical `args` and
/// `home` always produce a byte-identical invocation or the same error kind.
pub fn evaluate(args: &[String], home: &str) -> Result<SanitizedInvocation, GateError> {
    evaluate_with_tables(args, home, AllowTables::default_policy())
}

/// [`evaluate`] with explicitly injected tables.
pub fn evaluate_with_tables(
    args: &[String],
    home: &str,
    tables: AllowTables,
) -> Result<SanitizedInvocation, GateError> {
    let Some((subcommand, rest)) = args.split_first() else {
        return Err(GateError::Usage);
    };

    let kind = classify(subcommand, &tables);
    let mut validator = Validator::new(kind, tables)?;

    let mut invocation = SanitizedInvocation::new();
    invocation.push(subcommand)?;

    // The home mount for `run` is generated, never caller-supplied. It goes
    // in ahead of every caller token, exactly once, unconditionally.
    if *subcommand == "run" {
        invocation.push_home_mount(home)?;
    }

    let last = rest.len().saturating_sub(1);
    for (index, token) in rest.iter().enumerate() {
        validator.step(token, index == last)?;
        invocation.push(token)?;
    }
    validator.finish()?;

    Ok(invocation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{DOCKER_BIN, MAX_INVOCATION_BYTES};

    const HOME: &str = "/home/alice";

    fn args(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| (*t).to_string()).collect()
    }

    #[test]
    fn run_injects_home_mount_before_caller_tokens() {
        let inv = evaluate(&args(&["run", "-it", "ubuntu", "bash"]), HOME).expect("accepted");
        assert_eq!(
            inv.argv(),
            [
                DOCKER_BIN,
                "run",
                "--volume=/home/alice:/hosthome",
                "-it",
                "ubuntu",
                "bash",
            ]
        );
    }

    #[test]
    fn run_without_options_still_gets_the_home_mount_once() {
        let inv = evaluate(&args(&["run", "ubuntu"]), HOME).expect("accepted");
        let mounts = inv
            .args()
            .iter()
            .filter(|a| a.starts_with("--volume="))
            .count();
        assert_eq!(mounts, 1);
    }

    #[test]
    fn other_subcommands_get_no_home_mount() {
        let inv = evaluate(&args(&["exec", "c1", "ls"]), HOME).expect("accepted");
        assert!(inv.args().iter().all(|a| !a.starts_with("--volume=")));
    }

    #[test]
    fn caller_volume_flag_is_blocked_even_for_run() {
        let err = evaluate(&args(&["run", "-v", "/etc:/etc", "ubuntu"]), HOME).unwrap_err();
        assert!(matches!(err, GateError::BlockedOption { .. }));
    }

    #[test]
    fn cp_from_container_is_rejected() {
        let err = evaluate(&args(&["cp", "c1:/etc/passwd", "./out"]), HOME).unwrap_err();
        assert!(matches!(err, GateError::InvalidDirection { .. }));
    }

    #[test]
    fn cp_to_container_is_accepted() {
        let inv = evaluate(&args(&["cp", "./conf", "c1:/etc/conf"]), HOME).expect("accepted");
        assert_eq!(inv.args(), ["cp", "./conf", "c1:/etc/conf"]);
    }

    #[test]
    fn empty_command_line_is_a_usage_error() {
        assert!(matches!(evaluate(&[], HOME), Err(GateError::Usage)));
    }

    #[test]
    fn unrecognized_subcommand_is_a_usage_error() {
        assert!(matches!(
            evaluate(&args(&["foo"]), HOME),
            Err(GateError::Usage)
        ));
    }

    #[test]
    fn network_connect_is_accepted() {
        let inv = evaluate(&args(&["network", "connect", "br0", "c1"]), HOME).expect("accepted");
        assert_eq!(inv.args(), ["network", "connect", "br0", "c1"]);
    }

    #[test]
    fn network_with_unlisted_action_is_rejected() {
        let err = evaluate(&args(&["network", "frobnicate", "br0"]), HOME).unwrap_err();
        assert!(matches!(err, GateError::DisallowedToken { .. }));
    }

    #[test]
    fn network_alone_is_a_usage_error() {
        assert!(matches!(
            evaluate(&args(&["network"]), HOME),
            Err(GateError::Usage)
        ));
    }

    #[test]
    fn disallowed_flag_on_listed_subcommand() {
        let err = evaluate(&args(&["exec", "--user=root", "c1", "sh"]), HOME).unwrap_err();
        assert!(matches!(err, GateError::DisallowedToken { .. }));
    }

    #[test]
    fn overflow_wins_over_token_level_acceptance() {
        // Every token is individually fine; the accumulated length is not.
        let mut tokens = vec!["exec", "c1"];
        let filler = "a".repeat(120);
        let fillers: Vec<String> = (0..10).map(|_| filler.clone()).collect();
        tokens.extend(fillers.iter().map(String::as_str));
        let err = evaluate(&args(&tokens), HOME).unwrap_err();
        assert!(matches!(
            err,
            GateError::Overflow {
                capacity: MAX_INVOCATION_BYTES
            }
        ));
    }

    #[test]
    fn evaluation_is_deterministic() {
        let command = args(&["run", "--hostname=pc1", "ubuntu", "bash"]);
        let first = evaluate(&command, HOME).expect("accepted");
        let second = evaluate(&command, HOME).expect("accepted");
        assert_eq!(first, second);
        assert_eq!(first.to_string(), second.to_string());
    }
}
