use crate::error::GitResult;
use crate::git::classifier::{LineMatch, SourceFormat, classify};
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Date layout of the default `git log` format, e.g. `Mon Oct 7 10:00:00 2024 +0200`
const GIT_DATE_FORMAT: &str = "%a %b %d %H:%M:%S %Y %z";

/// Parse `git log` output in its default format
///
/// Commits come back in the order git printed them.
pub fn parse_log(output: &str) -> GitResult<Vec<CommitRecord>> {
    let mut parser = LogParser::new();
    for line in output.lines() {
        parser.feed_line(line);
    }
    Ok(parser.finish())
}

/// Render commits back into default `git log` text
pub fn render_log(commits: &[CommitRecord]) -> String {
    commits
        .iter()
        .map(CommitRecord::render)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Line-at-a-time log parser
///
/// A `commit` line closes the open record and opens the next one;
/// [`LogParser::finish`] closes the last.
#[derive(Debug, Default)]
pub struct LogParser {
    state: LogState,
    commits: Vec<CommitRecord>,
    limit: Option<usize>,
}

#[derive(Debug, Default)]
enum LogState {
    #[default]
    Idle,
    InCommit(OpenCommit),
}

#[derive(Debug)]
struct OpenCommit {
    hash: String,
    merge_parents: Option<(String, String)>,
    author: Option<(String, String)>,
    timestamp: Option<String>,
    description_lines: Vec<String>,
}

/// Which header field an open commit is waiting for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitPhase {
    AwaitingAuthor,
    AwaitingDate,
    AwaitingDescription,
}

impl OpenCommit {
    fn new(hash: String) -> Self {
        Self {
            hash,
            merge_parents: None,
            author: None,
            timestamp: None,
            description_lines: Vec::new(),
        }
    }

    fn phase(&self) -> CommitPhase {
        match (&self.author, &self.timestamp) {
            (None, _) => CommitPhase::AwaitingAuthor,
            (Some(_), None) => CommitPhase::AwaitingDate,
            (Some(_), Some(_)) => CommitPhase::AwaitingDescription,
        }
    }

    fn close(self) -> CommitRecord {
        let (author_name, author_email) = self.author.unwrap_or_default();
        if author_name.is_empty() {
            tracing::debug!(hash = %self.hash, "commit closed without an author");
        }

        CommitRecord {
            hash: self.hash,
            merge_parents: self.merge_parents,
            author_name,
            author_email,
            timestamp: self.timestamp.unwrap_or_default(),
            description_lines: self.description_lines,
        }
    }
}

impl LogParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep at most `limit` commits, in the order git printed them
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }

    /// Phase of the currently open commit, if any
    pub fn phase(&self) -> Option<CommitPhase> {
        match &self.state {
            LogState::Idle => None,
            LogState::InCommit(open) => Some(open.phase()),
        }
    }

    /// Feed the next line of output
    pub fn feed_line(&mut self, line: &str) {
        let Some(classified) = classify(line, SourceFormat::Log) else {
            tracing::trace!(line, format = %SourceFormat::Log, "skipping unmatched line");
            return;
        };

        if let LineMatch::CommitBoundary { hash } = classified {
            self.close_open_commit();
            self.state = LogState::InCommit(OpenCommit::new(hash));
            return;
        }

        let LogState::InCommit(open) = &mut self.state else {
            tracing::trace!(line, "skipping line outside any commit");
            return;
        };

        match classified {
            LineMatch::Merge { first, second } => {
                if open.phase() == CommitPhase::AwaitingAuthor && open.merge_parents.is_none() {
                    open.merge_parents = Some((first, second));
                } else {
                    tracing::warn!(hash = %open.hash, line, "unexpected Merge line; keeping first value");
                }
            }
            LineMatch::Author { name, email } => {
                if open.author.is_none() {
                    open.author = Some((name, email));
                } else {
                    tracing::warn!(hash = %open.hash, line, "duplicate Author line; keeping first value");
                }
            }
            LineMatch::Date(date) => {
                if open.timestamp.is_none() {
                    open.timestamp = Some(date);
                } else {
                    tracing::warn!(hash = %open.hash, line, "duplicate Date line; keeping first value");
                }
            }
            LineMatch::Description(text) => open.description_lines.push(text),
            _ => {
                tracing::trace!(line, "skipping line with no meaning inside a commit");
            }
        }
    }

    /// Close the last open commit and return every commit collected
    pub fn finish(mut self) -> Vec<CommitRecord> {
        self.close_open_commit();
        tracing::debug!(commits = self.commits.len(), "parsed log output");
        self.commits
    }

    fn close_open_commit(&mut self) {
        if let LogState::InCommit(open) = std::mem::take(&mut self.state) {
            if self.limit.is_none_or(|limit| self.commits.len() < limit) {
                self.commits.push(open.close());
            }
        }
    }
}

/// Represents a commit from git log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    pub hash: String,
    pub merge_parents: Option<(String, String)>,
    pub author_name: String,
    pub author_email: String,
    /// Date text exactly as git printed it
    pub timestamp: String,
    pub description_lines: Vec<String>,
}

impl CommitRecord {
    pub fn is_merge(&self) -> bool {
        self.merge_parents.is_some()
    }

    /// First description line, which git treats as the subject
    pub fn summary(&self) -> Option<&str> {
        self.description_lines.first().map(String::as_str)
    }

    /// Parse [`CommitRecord::timestamp`] as a default-format git date
    pub fn parsed_timestamp(&self) -> Option<DateTime<FixedOffset>> {
        let normalized = self.timestamp.split_whitespace().collect::<Vec<_>>().join(" ");
        DateTime::parse_from_str(&normalized, GIT_DATE_FORMAT).ok()
    }

    /// Render this commit as default `git log` text
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CommitRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "commit {}", self.hash)?;
        if let Some((first, second)) = &self.merge_parents {
            writeln!(f, "Merge: {} {}", first, second)?;
        }
        if !self.author_name.is_empty() {
            writeln!(f, "Author: {} <{}>", self.author_name, self.author_email)?;
        }
        if !self.timestamp.is_empty() {
            writeln!(f, "Date:   {}", self.timestamp)?;
        }
        writeln!(f)?;
        for line in &self.description_lines {
            writeln!(f, "    {}", line)?;
        }
        Ok(())
    }
}
