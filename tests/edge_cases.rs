mod helpers;

use gitstate::error::GitError;
use gitstate::git::*;
use gitstate::find_common_path;
use helpers::{SAMPLE_BRANCHES, SAMPLE_LOG, SAMPLE_REMOTES, SAMPLE_STATUS};

/// Test parsing completely empty git output
#[test]
fn test_parse_empty_outputs() {
    assert_eq!(parse_status("").unwrap(), StatusReport::default());
    assert_eq!(parse_log("").unwrap().len(), 0);
    assert_eq!(parse_branch_list("").unwrap().len(), 0);
    assert_eq!(parse_remote_list("").unwrap().len(), 0);
}

/// Test that a snapshot refuses to build without status output
#[test]
fn test_snapshot_requires_status() {
    let outputs = GitOutputs {
        log: Some(SAMPLE_LOG),
        ..GitOutputs::default()
    };
    let result = RepositorySnapshot::parse(&outputs);

    assert!(matches!(result, Err(GitError::InvalidArgument(_))));
}

/// Test every change kind in one status listing
#[test]
fn test_parse_sample_status() {
    let report = parse_status(SAMPLE_STATUS).unwrap();

    let header = report.branch_status.unwrap();
    assert_eq!(header.name, "main");
    assert_eq!(header.upstream.as_deref(), Some("origin/main"));
    assert_eq!((header.ahead, header.behind), (2, 1));

    let kinds: Vec<_> = report.entries.iter().map(|e| e.change_kind).collect();
    assert_eq!(
        kinds,
        [
            ChangeKind::Modified,
            ChangeKind::Modified,
            ChangeKind::Added,
            ChangeKind::Deleted,
            ChangeKind::Renamed,
            ChangeKind::Renamed,
            ChangeKind::Untracked,
        ]
    );
    assert_eq!(report.entries[4].path, "Assets/Art/Hero@2x.png");
    assert_eq!(report.entries[4].original_path.as_deref(), Some("Assets/Art/hero.png"));
    assert_eq!(report.entries[6].path, "Assets/New Folder/notes.txt");
}

/// Test that rename entries never carry identical paths
#[test]
fn test_rename_entries_have_distinct_paths() {
    let report = parse_status(SAMPLE_STATUS).unwrap();

    for entry in report.entries.iter().filter(|e| e.change_kind == ChangeKind::Renamed) {
        let original = entry.original_path.as_deref().unwrap();
        assert_ne!(original, entry.path);
    }
    for entry in report.entries.iter().filter(|e| e.change_kind != ChangeKind::Renamed) {
        assert_eq!(entry.original_path, None);
        assert!(!entry.path.is_empty());
    }
}

/// Test parsing malformed git status output
#[test]
fn test_parse_malformed_status() {
    let output = "## main\n\nnot a status line\nUU conflict.txt\nR  -> orphan.txt\n M ok.txt\n";
    let report = parse_status(output).unwrap();

    assert_eq!(report.entries.len(), 1);
    assert_eq!(report.entries[0].path, "ok.txt");
}

/// Test that git's quoted paths come back unquoted
#[test]
fn test_parse_quoted_status_paths() {
    let output = "## main\nR  c.txt -> \"d e.txt\"\n?? \"a b.txt\"\n";
    let report = parse_status(output).unwrap();

    assert_eq!(report.entries.len(), 2);
    assert_eq!(report.entries[0].change_kind, ChangeKind::Renamed);
    assert_eq!(report.entries[0].path, "d e.txt");
    assert_eq!(report.entries[0].original_path.as_deref(), Some("c.txt"));
    assert_eq!(report.entries[1].change_kind, ChangeKind::Untracked);
    assert_eq!(report.entries[1].path, "a b.txt");
}

/// Test that blank message lines keep paragraph structure
#[test]
fn test_log_keeps_blank_message_lines() {
    let output = "commit abc1234\n\n    Subject\n    \n    Para one\n    \n    Para two";
    let commits = parse_log(output).unwrap();

    assert_eq!(commits[0].description_lines.len(), 5);
    assert_eq!(commits[0].description_lines[1], "");
    assert_eq!(parse_log(&render_log(&commits)).unwrap(), commits);
}

/// Test parsing very long file paths
#[test]
fn test_parse_very_long_paths() {
    let long_path = "a/".repeat(100) + "file.txt";
    let report = parse_status(&format!(" M {}", long_path)).unwrap();

    assert_eq!(report.entries.len(), 1);
    assert_eq!(report.entries[0].path, long_path);
}

/// Test that large ahead/behind counts survive
#[test]
fn test_parse_large_counts() {
    let report = parse_status("## main...origin/main [ahead 123456, behind 654321]").unwrap();
    let header = report.branch_status.unwrap();

    assert_eq!((header.ahead, header.behind), (123456, 654321));
}

/// Test that counts too large to represent drop the header instead of failing
#[test]
fn test_parse_overflowing_counts() {
    let output = "## main...origin/main [ahead 99999999999999999999999999]\n M a.txt";
    let report = parse_status(output).unwrap();

    assert_eq!(report.branch_status, None);
    assert_eq!(report.entries.len(), 1);
}

/// Test parsing a log with merges and multi-paragraph bodies
#[test]
fn test_parse_sample_log() {
    let commits = parse_log(SAMPLE_LOG).unwrap();

    assert_eq!(commits.len(), 3);
    assert_eq!(commits[0].hash, "2b7e8f1c9d0a4b5c6d7e8f9a0b1c2d3e4f5a6b7c");
    assert_eq!(
        commits[0].merge_parents,
        Some(("1a2b3c4".to_string(), "5d6e7f8".to_string()))
    );
    assert_eq!(commits[0].description_lines, ["Merge branch 'feature/enemies'"]);
    assert_eq!(
        commits[1].description_lines,
        [
            "Add enemy spawner",
            "",
            "Spawns waves on a timer.",
            "Difficulty scales with level."
        ]
    );
    assert_eq!(commits[2].description_lines, ["Initial commit"]);
    assert!(commits[1..].iter().all(|c| !c.is_merge()));
}

/// Test that description lines never bleed between commits
#[test]
fn test_log_descriptions_are_isolated() {
    let commits = parse_log(SAMPLE_LOG).unwrap();
    let total: usize = commits.iter().map(|c| c.description_lines.len()).sum();

    assert_eq!(total, 6);
    assert!(!commits[0].description_lines.iter().any(|l| l.contains("spawner")));
}

/// Test that a log rendered back to text parses to the same commits
#[test]
fn test_log_round_trip() {
    let commits = parse_log(SAMPLE_LOG).unwrap();
    let rendered = render_log(&commits);

    assert_eq!(parse_log(&rendered).unwrap(), commits);
}

/// Test description lines keep inner indentation-free text verbatim
#[test]
fn test_log_description_keeps_content() {
    let output = "commit abc1234\nAuthor: A <a@example.com>\nDate:   x\n\n        - indented bullet   \n";
    let commits = parse_log(output).unwrap();

    assert_eq!(commits[0].description_lines, ["- indented bullet   "]);
}

/// Test parsing commits with very long messages
#[test]
fn test_parse_commits_long_messages() {
    let long_msg = "A".repeat(10000);
    let output = format!("commit abc1234\n\n    {}\n", long_msg);
    let commits = parse_log(&output).unwrap();

    assert_eq!(commits.len(), 1);
    assert_eq!(commits[0].description_lines[0].len(), 10000);
}

/// Test parsing branch names with special characters
#[test]
fn test_parse_branches_special_chars() {
    let output = "* feature/FOO-123\n  bugfix/issue_456\n  release/v1.0.0";
    let result = parse_branch_list(output).unwrap();

    assert_eq!(result.len(), 3);
    assert_eq!(result[0].name, "feature/FOO-123");
    assert!(result[0].is_active);
    assert_eq!(result[1].name, "bugfix/issue_456");
    assert_eq!(result[2].name, "release/v1.0.0");
}

/// Test the sample branch listing
#[test]
fn test_parse_sample_branches() {
    let branches = parse_branch_list(SAMPLE_BRANCHES).unwrap();

    assert_eq!(branches.len(), 3);
    assert_eq!(branches.iter().filter(|b| b.is_active).count(), 1);
    assert_eq!(branches[0].tracking.as_deref(), Some("origin/main"));
    assert_eq!(branches[1].tracking.as_deref(), Some("origin/feature/enemies"));
    assert_eq!(branches[2].name, "spike/render-test");
    assert_eq!(branches[2].tracking, None);
}

/// Test the sample remote listing
#[test]
fn test_parse_sample_remotes() {
    let remotes = parse_remote_list(SAMPLE_REMOTES).unwrap();

    assert_eq!(remotes.len(), 4);

    let (fetch, push) = (&remotes[0], &remotes[1]);
    assert_eq!(fetch.name, push.name);
    assert_eq!(fetch.host, push.host);
    assert_eq!(fetch.url, push.url);
    assert_ne!(fetch.function, push.function);
    assert_eq!(fetch.user.as_deref(), Some("ada"));
    assert_eq!(fetch.token.as_deref(), Some("ghtoken123"));
    assert_eq!(fetch.host, "github.com/studio/game.git");

    assert_eq!(remotes[2].name, "upstream");
    assert_eq!(remotes[2].user.as_deref(), Some("git"));
    assert!(!remotes[2].has_token());
}

/// Test the full sample snapshot
#[test]
fn test_sample_snapshot() {
    let outputs = GitOutputs::new(SAMPLE_STATUS)
        .with_log(SAMPLE_LOG)
        .with_branches(SAMPLE_BRANCHES)
        .with_remotes(SAMPLE_REMOTES);
    let snapshot = RepositorySnapshot::parse(&outputs).unwrap();

    assert_eq!(snapshot.entries.len(), 7);
    assert_eq!(snapshot.commits.len(), 3);
    assert_eq!(snapshot.branches.len(), 3);
    assert_eq!(snapshot.remotes.len(), 4);
    assert_eq!(snapshot.remotes_named("upstream").count(), 2);
    assert_eq!(snapshot.entries_of(ChangeKind::Modified).count(), 2);

    // Two parses of the same input are independent and equal
    assert_eq!(RepositorySnapshot::parse(&outputs).unwrap(), snapshot);
}

/// Test common paths over the sample status entries
#[test]
fn test_common_path_of_status_entries() {
    let report = parse_status(SAMPLE_STATUS).unwrap();
    let paths: Vec<&str> = report.entries.iter().map(|e| e.path.as_str()).collect();

    assert_eq!(find_common_path("/", &paths).unwrap(), "Assets/");
}

/// Test the pinned common-path contract
#[test]
fn test_common_path_contract() {
    assert_eq!(find_common_path("/", &["/a/b/c", "/a/b/d"]).unwrap(), "/a/b/");
    assert_eq!(find_common_path("/", &["/a/b", "/c/d"]).unwrap(), "");
    assert_eq!(find_common_path("/", &["/a"]).unwrap(), "/a/");

    let none: [&str; 0] = [];
    assert!(matches!(
        find_common_path("/", &none),
        Err(GitError::InvalidArgument(_))
    ));
}
