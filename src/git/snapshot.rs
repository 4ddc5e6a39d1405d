use crate::config::settings::ParserConfig;
use crate::error::{GitError, GitResult};
use crate::git::log::{CommitRecord, LogParser};
use crate::git::refs::{self, BranchRef, RemoteRef};
use crate::git::status::{self, BranchStatus, ChangeKind, StatusEntry};
use serde::{Deserialize, Serialize};

/// Raw output of the git commands that make up one repository read
///
/// Status output is required. The other sections may be absent, in which
/// case the snapshot carries empty collections for them.
#[derive(Debug, Clone, Copy, Default)]
pub struct GitOutputs<'a> {
    /// `git status --branch --porcelain`
    pub status: Option<&'a str>,
    /// `git log`
    pub log: Option<&'a str>,
    /// `git branch -vv`
    pub branches: Option<&'a str>,
    /// `git remote -v`
    pub remotes: Option<&'a str>,
}

impl<'a> GitOutputs<'a> {
    pub fn new(status: &'a str) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn with_log(mut self, log: &'a str) -> Self {
        self.log = Some(log);
        self
    }

    pub fn with_branches(mut self, branches: &'a str) -> Self {
        self.branches = Some(branches);
        self
    }

    pub fn with_remotes(mut self, remotes: &'a str) -> Self {
        self.remotes = Some(remotes);
        self
    }
}

/// Everything known about a repository from one set of git outputs
///
/// Built wholesale by [`RepositorySnapshot::parse`]; there is no way to
/// update one in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositorySnapshot {
    pub branch_status: Option<BranchStatus>,
    pub entries: Vec<StatusEntry>,
    pub branches: Vec<BranchRef>,
    pub remotes: Vec<RemoteRef>,
    pub commits: Vec<CommitRecord>,
}

impl RepositorySnapshot {
    /// Parse a snapshot with the default parser settings
    pub fn parse(outputs: &GitOutputs<'_>) -> GitResult<Self> {
        Self::parse_with(outputs, &ParserConfig::default())
    }

    /// Parse a snapshot
    ///
    /// Fails with [`GitError::InvalidArgument`] when status output is absent
    /// or blank: `status --branch` always prints a header, so blank output
    /// means the command never ran.
    pub fn parse_with(outputs: &GitOutputs<'_>, config: &ParserConfig) -> GitResult<Self> {
        let status_output = outputs
            .status
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| GitError::InvalidArgument("status output is required".to_string()))?;

        let report = status::parse_status(status_output)?;

        let commits = match outputs.log {
            Some(log) => {
                let mut parser = match config.max_commits {
                    Some(limit) => LogParser::with_limit(limit),
                    None => LogParser::new(),
                };
                for line in log.lines() {
                    parser.feed_line(line);
                }
                parser.finish()
            }
            None => Vec::new(),
        };

        let mut branches = match outputs.branches {
            Some(output) => refs::parse_branch_list(output)?,
            None => Vec::new(),
        };

        let remotes = match outputs.remotes {
            Some(output) => refs::parse_remote_list(output)?,
            None => Vec::new(),
        };

        if outputs.remotes.is_some() {
            drop_unknown_tracking(&mut branches, &remotes);
        }

        Ok(Self {
            branch_status: report.branch_status,
            entries: report.entries,
            branches,
            remotes,
            commits,
        })
    }

    /// The branch marked active in the branch listing
    pub fn active_branch(&self) -> Option<&BranchRef> {
        self.branches.iter().find(|b| b.is_active)
    }

    /// Check if the working tree has no changes
    pub fn is_clean(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries_of(&self, kind: ChangeKind) -> impl Iterator<Item = &StatusEntry> {
        self.entries.iter().filter(move |e| e.change_kind == kind)
    }

    pub fn remotes_named<'s>(&'s self, name: &'s str) -> impl Iterator<Item = &'s RemoteRef> {
        self.remotes.iter().filter(move |r| r.name == name)
    }
}

/// Keep only tracking refs that name a local branch or sit under a known
/// remote; anything else was a bracketed commit subject.
fn drop_unknown_tracking(branches: &mut [BranchRef], remotes: &[RemoteRef]) {
    let local: Vec<String> = branches.iter().map(|b| b.name.clone()).collect();

    for branch in branches.iter_mut() {
        let Some(tracking) = &branch.tracking else {
            continue;
        };
        let known = local.iter().any(|name| name == tracking)
            || remotes.iter().any(|r| {
                tracking
                    .strip_prefix(r.name.as_str())
                    .is_some_and(|rest| rest.starts_with('/'))
            });
        if !known {
            tracing::debug!(branch = %branch.name, %tracking, "tracking ref names no remote or branch; dropping");
            branch.tracking = None;
        }
    }
}
