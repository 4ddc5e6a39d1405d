use crate::error::GitResult;
use crate::git::classifier::{LineMatch, SourceFormat, classify};
use serde::{Deserialize, Serialize};

/// Parse `git status --branch --porcelain` output
///
/// Only the first line may be a branch header. Lines that match nothing
/// are skipped.
pub fn parse_status(output: &str) -> GitResult<StatusReport> {
    let mut parser = StatusParser::new();
    for line in output.lines() {
        parser.feed_line(line);
    }
    Ok(parser.finish())
}

/// Line-at-a-time status parser
///
/// Carries its state between calls so it can be fed output as it arrives.
#[derive(Debug, Default)]
pub struct StatusParser {
    state: StatusState,
    branch_status: Option<BranchStatus>,
    entries: Vec<StatusEntry>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
enum StatusState {
    #[default]
    AwaitingBranchHeader,
    AccumulatingEntries,
}

impl StatusParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the next line of output
    pub fn feed_line(&mut self, line: &str) {
        let classified = classify(line, SourceFormat::Status);

        if self.state == StatusState::AwaitingBranchHeader {
            self.state = StatusState::AccumulatingEntries;
            if let Some(LineMatch::BranchHeader(header)) = classified {
                self.branch_status = Some(header);
                return;
            }
        }

        match classified {
            Some(LineMatch::Status(entry)) => self.entries.push(entry),
            Some(LineMatch::MalformedRename { target }) => {
                tracing::warn!(line, %target, "rename entry has no distinct source path; skipping");
            }
            _ => {
                tracing::trace!(line, format = %SourceFormat::Status, "skipping unmatched line");
            }
        }
    }

    /// Finish parsing and hand back everything collected
    pub fn finish(self) -> StatusReport {
        tracing::debug!(
            branch = ?self.branch_status.as_ref().map(|b| b.name.as_str()),
            entries = self.entries.len(),
            "parsed status output"
        );

        StatusReport {
            branch_status: self.branch_status,
            entries: self.entries,
        }
    }
}

/// Result of parsing status output
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusReport {
    pub branch_status: Option<BranchStatus>,
    pub entries: Vec<StatusEntry>,
}

/// The `## <name>` header of status output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchStatus {
    pub name: String,
    pub upstream: Option<String>,
    pub ahead: usize,
    pub behind: usize,
}

/// Represents a file entry from git status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEntry {
    pub change_kind: ChangeKind,
    pub path: String,
    /// Set only for renames: the path before the move
    pub original_path: Option<String>,
}

impl StatusEntry {
    pub fn is_rename(&self) -> bool {
        self.change_kind == ChangeKind::Renamed && self.original_path.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChangeKind {
    Added,
    Modified,
    Renamed,
    Deleted,
    Copied,
    Untracked,
}

impl ChangeKind {
    /// Map a porcelain status code to a change kind
    ///
    /// Two-letter codes are read from the first letter present, which is the
    /// index side when both sides changed.
    pub fn from_code(code: &str) -> Option<Self> {
        if code == "??" {
            return Some(ChangeKind::Untracked);
        }

        match code.trim().chars().next()? {
            'A' => Some(ChangeKind::Added),
            'M' => Some(ChangeKind::Modified),
            'R' => Some(ChangeKind::Renamed),
            'D' => Some(ChangeKind::Deleted),
            'C' => Some(ChangeKind::Copied),
            _ => None,
        }
    }
}
