//! Fixed allow-list tables consulted by the validator.
//!
//! Policy is compiled in. There is no config file, no environment override
//! and no runtime extension point: at a privilege boundary the rule set must
//! not be reachable from anything the caller controls.

/// How an [`AllowEntry`] matches a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// The token matches when it equals the entry text or extends it by an
    /// unchecked suffix. This is what lets `--hostname=` cover
    /// `--hostname=pc1` without enumerating every value.
    ExactFamily,
}

/// A single allow-list entry: reference text plus matching mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllowEntry {
    pub text: &'static str,
    pub mode: MatchMode,
}

impl AllowEntry {
    const fn family(text: &'static str) -> Self {
        Self {
            text,
            mode: MatchMode::ExactFamily,
        }
    }

    /// Check whether `token` matches this entry.
    #[must_use]
    pub fn matches(&self, token: &str) -> bool {
        match self.mode {
            MatchMode::ExactFamily => token.starts_with(self.text),
        }
    }
}

/// An immutable table of allow-list entries.
#[derive(Debug, Clone, Copy)]
pub struct AllowTable {
    entries: &'static [AllowEntry],
}

impl AllowTable {
    #[must_use]
    pub const fn new(entries: &'static [AllowEntry]) -> Self {
        Self { entries }
    }

    /// True when any entry in the table matches `token`.
    #[must_use]
    pub fn matches(&self, token: &str) -> bool {
        self.entries.iter().any(|entry| entry.matches(token))
    }
}

/// Subcommands an unprivileged caller may run. The action words accepted
/// after `network` (`connect`, `create`, `disconnect`, `rm`) live in the
/// same table; the classifier runs before this lookup, so a bare `create`
/// still starts a container-create command.
pub const SUBCOMMANDS: AllowTable = AllowTable::new(&[
    AllowEntry::family("attach"),
    AllowEntry::family("connect"),
    AllowEntry::family("create"),
    AllowEntry::family("diff"),
    AllowEntry::family("disconnect"),
    AllowEntry::family("exec"),
    AllowEntry::family("inspect"),
    AllowEntry::family("kill"),
    AllowEntry::family("logs"),
    AllowEntry::family("pause"),
    AllowEntry::family("port"),
    AllowEntry::family("ps"),
    AllowEntry::family("rm"),
    AllowEntry::family("run"),
    AllowEntry::family("start"),
    AllowEntry::family("stats"),
    AllowEntry::family("stop"),
    AllowEntry::family("top"),
    AllowEntry::family("unpause"),
    AllowEntry::family("wait"),
]);

/// Options a caller may pass once a subcommand is accepted. Entries ending
/// in `=` rely on exact-family matching to carry a value. `-v`/`--volume`
/// are deliberately absent and additionally blocked by the validator even if
/// someone were to add them here.
pub const OPTIONS: AllowTable = AllowTable::new(&[
    AllowEntry::family("-d"),
    AllowEntry::family("-e"),
    AllowEntry::family("-i"),
    AllowEntry::family("-it"),
    AllowEntry::family("-t"),
    AllowEntry::family("-ti"),
    AllowEntry::family("-tid"),
    AllowEntry::family("-w"),
    AllowEntry::family("--detach"),
    AllowEntry::family("--env="),
    AllowEntry::family("--hostname="),
    AllowEntry::family("--interactive"),
    AllowEntry::family("--name="),
    AllowEntry::family("--network="),
    AllowEntry::family("--privileged"),
    AllowEntry::family("--rm"),
    AllowEntry::family("--tty"),
    AllowEntry::family("--workdir="),
]);

/// Both tables, injected into the engine at construction.
#[derive(Debug, Clone, Copy)]
pub struct AllowTables {
    pub subcommands: AllowTable,
    pub options: AllowTable,
}

impl AllowTables {
    /// The fixed shipped policy.
    #[must_use]
    pub const fn default_policy() -> Self {
        Self {
            subcommands: SUBCOMMANDS,
            options: OPTIONS,
        }
    }
}
