//! Best-effort decision logging.
//!
//! One JSON line per allow/deny decision, appended to an opt-in log file.
//! Logging never affects the decision: every write error is swallowed.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::time::SystemTime;

use nix::unistd::{geteuid, getuid};
use serde::Serialize;

/// Environment variable naming the log file.
pub const ENV_LOG_PATH: &str = "DOCKER_GATE_LOG";

/// A structured log entry for one gate decision.
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    /// Seconds since the Unix epoch.
    pub unix_ts: u64,
    pub decision: &'static str,
    pub command: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Appends decision lines to a log file.
pub struct DecisionLogger {
    path: PathBuf,
}

impl DecisionLogger {
    /// Logger writing to an explicit path.
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Build a logger from [`ENV_LOG_PATH`], if set.
    ///
    /// Honored only when real and effective uid agree: while setuid root, a
    /// caller-chosen log path would be a root file-write primitive, so the
    /// variable is ignored in that case.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        if getuid() != geteuid() {
            return None;
        }
        std::env::var_os(ENV_LOG_PATH).map(|path| Self::new(PathBuf::from(path)))
    }

    /// Record an accepted invocation.
    pub fn log_allow(&self, command: &str) {
        self.write(&LogEntry {
            unix_ts: now(),
            decision: "allow",
            command: command.to_string(),
            reason: None,
        });
    }

    /// Record a rejection and its reason.
    pub fn log_deny(&self, command: &str, reason: &str) {
        self.write(&LogEntry {
            unix_ts: now(),
            decision: "deny",
            command: command.to_string(),
            reason: Some(reason.to_string()),
        });
    }

    fn write(&self, entry: &LogEntry) {
        let Ok(line) = serde_json::to_string(entry) else {
            return;
        };
        if let Ok(mut file) = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
        {
            let _ = writeln!(file, "{line}");
        }
    }
}

fn now() -> u64 {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map_or(0, |d| d.as_secs())
}
