use crate::error::GitResult;
use crate::git::classifier::{LineMatch, SourceFormat, classify};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Parse `git branch -vv` output
///
/// Only one branch may be active; a second `*` line is kept but demoted.
pub fn parse_branch_list(output: &str) -> GitResult<Vec<BranchRef>> {
    let mut branches: Vec<BranchRef> = Vec::new();

    for line in output.lines() {
        let Some(LineMatch::Branch(mut branch)) = classify(line, SourceFormat::Branch) else {
            tracing::trace!(line, format = %SourceFormat::Branch, "skipping unmatched line");
            continue;
        };

        if branch.is_active && branches.iter().any(|b| b.is_active) {
            tracing::warn!(branch = %branch.name, "second active branch in listing; keeping first");
            branch.is_active = false;
        }
        branches.push(branch);
    }

    tracing::debug!(branches = branches.len(), "parsed branch list");
    Ok(branches)
}

/// Parse `git remote -v` output
///
/// Each line becomes one [`RemoteRef`]; duplicates are retained.
pub fn parse_remote_list(output: &str) -> GitResult<Vec<RemoteRef>> {
    let mut remotes = Vec::new();

    for line in output.lines() {
        match classify(line, SourceFormat::Remote) {
            Some(LineMatch::Remote(remote)) => remotes.push(remote),
            _ => tracing::trace!(line, format = %SourceFormat::Remote, "skipping unmatched line"),
        }
    }

    tracing::debug!(remotes = remotes.len(), "parsed remote list");
    Ok(remotes)
}

/// Represents a branch from git branch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchRef {
    pub name: String,
    pub is_active: bool,
    /// Upstream named in the `[...]` after the hash
    ///
    /// `git branch -vv` prints no brackets for a branch without an upstream,
    /// so a commit subject that itself starts with `[` (`[WIP] thing`) reads
    /// as a tracking ref here. [`RepositorySnapshot`](crate::git::RepositorySnapshot)
    /// drops such refs when it also has the remote list.
    pub tracking: Option<String>,
}

/// Represents one line of git remote -v
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteRef {
    pub name: String,
    pub url: String,
    pub user: Option<String>,
    pub token: Option<String>,
    /// Everything after the login, including any path
    pub host: String,
    pub function: RemoteFunction,
}

impl RemoteRef {
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemoteFunction {
    Fetch,
    Push,
}

impl fmt::Display for RemoteFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemoteFunction::Fetch => f.write_str("fetch"),
            RemoteFunction::Push => f.write_str("push"),
        }
    }
}
