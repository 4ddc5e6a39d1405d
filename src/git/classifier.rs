use crate::git::patterns::{
    BRANCH_LIST, LOG_AUTHOR, LOG_COMMIT, LOG_DATE, LOG_DESCRIPTION, LOG_MERGE, RENAME_DIVIDER,
    REMOTE_LIST, STATUS_AHEAD, STATUS_BEHIND, STATUS_BRANCH_HEADER, STATUS_CODE_ONLY,
    STATUS_ENTRY, STATUS_PATH, STATUS_QUOTED_ENTRY,
};
use crate::git::refs::{BranchRef, RemoteFunction, RemoteRef};
use crate::git::status::{BranchStatus, ChangeKind, StatusEntry};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The git command whose output a line came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    /// `git status --branch --porcelain`
    Status,
    /// `git log` in its default format
    Log,
    /// `git branch -vv`
    Branch,
    /// `git remote -v`
    Remote,
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SourceFormat::Status => "status",
            SourceFormat::Log => "log",
            SourceFormat::Branch => "branch",
            SourceFormat::Remote => "remote",
        };
        f.write_str(name)
    }
}

/// A single classified line of git output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineMatch {
    /// `## <name>` header of status output
    BranchHeader(BranchStatus),
    /// A file entry of status output
    Status(StatusEntry),
    /// A rename arrow that cannot form a valid entry (no source, or
    /// source equal to target)
    MalformedRename { target: String },
    /// `commit <hash>` opening a new log record
    CommitBoundary { hash: String },
    /// `Merge: <first> <second>`
    Merge { first: String, second: String },
    /// `Author: <name> <<email>>`
    Author { name: String, email: String },
    /// `Date: <text>`, kept verbatim
    Date(String),
    /// Indented description text with the indentation removed
    Description(String),
    /// A line of `git branch -vv`
    Branch(BranchRef),
    /// A line of `git remote -v`
    Remote(RemoteRef),
}

/// Classify one line of output from the given source
///
/// Returns `None` when the line fits no known pattern. That is an expected
/// outcome for blank lines and output we do not model.
pub fn classify(line: &str, format: SourceFormat) -> Option<LineMatch> {
    let line = line.strip_suffix('\r').unwrap_or(line);

    match format {
        SourceFormat::Status => classify_status(line.trim_end()),
        SourceFormat::Log => classify_log(line),
        SourceFormat::Branch => classify_branch(line.trim_end()).map(LineMatch::Branch),
        SourceFormat::Remote => classify_remote(line.trim_end()).map(LineMatch::Remote),
    }
}

fn classify_status(line: &str) -> Option<LineMatch> {
    if let Some(header) = classify_branch_header(line) {
        return Some(LineMatch::BranchHeader(header));
    }

    // The rename arrow takes priority over whatever the leading code says.
    if let Some((source, target)) = line.split_once(RENAME_DIVIDER) {
        let target = bare_path(target.trim())?;

        if STATUS_CODE_ONLY.is_match(source) {
            return Some(LineMatch::MalformedRename { target });
        }

        let (_, original) = status_entry(source.trim_end())?;
        if original.is_empty() || original == target {
            return Some(LineMatch::MalformedRename { target });
        }

        return Some(LineMatch::Status(StatusEntry {
            change_kind: ChangeKind::Renamed,
            path: target,
            original_path: Some(original),
        }));
    }

    let (code, path) = status_entry(line)?;
    if path.is_empty() {
        return None;
    }

    Some(LineMatch::Status(StatusEntry {
        change_kind: ChangeKind::from_code(&code)?,
        path,
        original_path: None,
    }))
}

/// Split a status entry into its code and unquoted path
fn status_entry(text: &str) -> Option<(String, String)> {
    if let Some(caps) = STATUS_QUOTED_ENTRY.captures(text) {
        return Some((caps["code"].to_string(), bare_path(&caps["path"])?));
    }

    let caps = STATUS_ENTRY.captures(text)?;
    Some((caps["code"].to_string(), caps["path"].trim().to_string()))
}

/// A path on its own, unquoted if git quoted it
fn bare_path(text: &str) -> Option<String> {
    let path = unquote_path(text)?;
    STATUS_PATH.is_match(&path).then_some(path)
}

/// Undo git's C-style path quoting
///
/// Text without surrounding quotes comes back unchanged. Octal escapes are
/// raw bytes, so multi-byte characters arrive as several of them.
fn unquote_path(text: &str) -> Option<String> {
    let Some(inner) = text.strip_prefix('"').and_then(|t| t.strip_suffix('"')) else {
        return Some(text.to_string());
    };

    let mut bytes = Vec::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            let mut buf = [0; 4];
            bytes.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
            continue;
        }

        let byte = match chars.next()? {
            'a' => 0x07,
            'b' => 0x08,
            'f' => 0x0c,
            'n' => b'\n',
            'r' => b'\r',
            't' => b'\t',
            'v' => 0x0b,
            '"' => b'"',
            '\\' => b'\\',
            digit @ '0'..='7' => {
                let mut value = digit.to_digit(8)?;
                for _ in 0..2 {
                    value = value * 8 + chars.next()?.to_digit(8)?;
                }
                u8::try_from(value).ok()?
            }
            _ => return None,
        };
        bytes.push(byte);
    }

    String::from_utf8(bytes).ok()
}

fn classify_branch_header(line: &str) -> Option<BranchStatus> {
    let caps = STATUS_BRANCH_HEADER.captures(line)?;
    let counts = caps.name("counts").map_or("", |m| m.as_str());

    Some(BranchStatus {
        name: caps["name"].to_string(),
        upstream: caps.name("upstream").map(|m| m.as_str().to_string()),
        ahead: count(&STATUS_AHEAD, counts, "ahead")?,
        behind: count(&STATUS_BEHIND, counts, "behind")?,
    })
}

/// Extract a numeric count from a bracket clause, defaulting to zero when
/// absent. Returns `None` only for counts that overflow.
fn count(pattern: &Regex, counts: &str, group: &str) -> Option<usize> {
    match pattern.captures(counts) {
        Some(caps) => caps[group].parse().ok(),
        None => Some(0),
    }
}

fn classify_log(line: &str) -> Option<LineMatch> {
    if let Some(caps) = LOG_COMMIT.captures(line) {
        return Some(LineMatch::CommitBoundary {
            hash: caps["hash"].to_string(),
        });
    }
    if let Some(caps) = LOG_MERGE.captures(line) {
        return Some(LineMatch::Merge {
            first: caps["first"].to_string(),
            second: caps["second"].to_string(),
        });
    }
    if let Some(caps) = LOG_AUTHOR.captures(line) {
        return Some(LineMatch::Author {
            name: caps["name"].to_string(),
            email: caps["email"].to_string(),
        });
    }
    if let Some(caps) = LOG_DATE.captures(line) {
        return Some(LineMatch::Date(caps["date"].to_string()));
    }
    LOG_DESCRIPTION
        .captures(line)
        .map(|caps| LineMatch::Description(caps["text"].to_string()))
}

fn classify_branch(line: &str) -> Option<BranchRef> {
    let caps = BRANCH_LIST.captures(line)?;

    Some(BranchRef {
        name: caps["name"].to_string(),
        is_active: caps.name("active").is_some(),
        tracking: caps.name("tracking").map(|m| m.as_str().to_string()),
    })
}

fn classify_remote(line: &str) -> Option<RemoteRef> {
    let caps = REMOTE_LIST.captures(line)?;
    let function = match &caps["function"] {
        "fetch" => RemoteFunction::Fetch,
        "push" => RemoteFunction::Push,
        _ => return None,
    };

    Some(RemoteRef {
        name: caps["name"].to_string(),
        url: caps["url"].to_string(),
        user: caps.name("user").map(|m| m.as_str().to_string()),
        token: caps.name("token").map(|m| m.as_str().to_string()),
        host: caps["host"].to_string(),
        function,
    })
}
