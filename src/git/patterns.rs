//! Compiled line patterns for the git output formats we understand.
//!
//! Each pattern is anchored to a single line. Overlapping cases (such as the
//! rename arrow in status output) are resolved by the classifier, not by
//! alternation order inside a pattern.

use regex::Regex;
use std::sync::LazyLock;

/// Token separating the original and current path of a rename entry
pub const RENAME_DIVIDER: &str = "->";

/// `git status --porcelain` entry: code, optional score digits, path
pub static STATUS_ENTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?<code>[AMRDC]{1,2}|\?\?)\d*\s+(?<path>[\w/.\-@ ]+)$").unwrap()
});

/// Status code with nothing after it, seen when a rename arrow has no source
pub static STATUS_CODE_ONLY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(?:[AMRDC]{1,2}|\?\?)\d*\s*$").unwrap());

/// Entry whose path git wrapped in C-style quotes, as it does for any path
/// with a space or a byte outside printable ASCII
pub static STATUS_QUOTED_ENTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s*(?<code>[AMRDC]{1,2}|\?\?)\d*\s+(?<path>"(?:[^"\\]|\\.)*")$"#).unwrap()
});

/// A bare path: one side of a rename arrow, or an unquoted path
pub static STATUS_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?<path>[\w/.\-@ ]+)$").unwrap());

/// `## <name>[...<upstream>] [<counts>]` header of `git status --branch`
pub static STATUS_BRANCH_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^##\s+(?:No commits yet on |Initial commit on )?(?<name>[\w/.\-]+?)(?:\.\.\.(?<upstream>[\w/.\-]+))?(?:\s+\[(?<counts>[^\]]*)\])?\s*$",
    )
    .unwrap()
});

pub static STATUS_AHEAD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bahead (?<ahead>\d+)").unwrap());

pub static STATUS_BEHIND: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bbehind (?<behind>\d+)").unwrap());

/// `git branch -vv` line: active (`*`) or other-worktree (`+`) marker, name,
/// abbreviated hash, worktree path, tracking ref
pub static BRANCH_LIST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:(?<active>\*)|\+)?\s+(?<name>[\w/.\-]+)(?:\s+[0-9a-f]{7,40}(?:\s+\([^)]*\))?(?:\s+\[(?<tracking>[\w/.\-]+)(?::[^\]]*)?\])?)?",
    )
    .unwrap()
});

/// `git remote -v` line: name, url with optional `user[:token]@`, function.
/// Local-path remotes may contain spaces.
pub static REMOTE_LIST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?<name>[\w.\-]+)\s+(?<url>(?:(?:https?|ssh|git)://)?(?:(?<user>[\w.\-]+)(?::(?<token>[^@\s/]+))?@)?(?<host>[\w.\-/%:~]+(?: +[\w.\-/%:~]+)*))\s+\((?<function>fetch|push)\)\s*$",
    )
    .unwrap()
});

pub static LOG_COMMIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^commit\s+(?<hash>\S+)").unwrap());

pub static LOG_MERGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Merge:\s+(?<first>\S+)\s+(?<second>\S+)").unwrap());

pub static LOG_AUTHOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Author:\s+(?<name>.+?)\s+<(?<email>[^>]*)>").unwrap());

pub static LOG_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Date:\s+(?<date>.+?)\s*$").unwrap());

/// Indented description line; the capture excludes the indentation and is
/// empty for git's indented blank lines
pub static LOG_DESCRIPTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s+(?<text>.*)$").unwrap());
