pub mod classifier;
pub mod log;
pub mod patterns;
pub mod refs;
pub mod snapshot;
pub mod status;

// Re-export commonly used types
pub use classifier::{LineMatch, SourceFormat, classify};
pub use log::{CommitPhase, CommitRecord, LogParser, parse_log, render_log};
pub use refs::{BranchRef, RemoteFunction, RemoteRef, parse_branch_list, parse_remote_list};
pub use snapshot::{GitOutputs, RepositorySnapshot};
pub use status::{BranchStatus, ChangeKind, StatusEntry, StatusParser, StatusReport, parse_status};
