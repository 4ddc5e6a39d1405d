pub mod config;
pub mod error;
pub mod git;
pub mod logging;
pub mod path;

// Re-export commonly used types for convenience
pub use config::{Config, Environment};
pub use error::{AppError, GitError, GitResult};
pub use git::{
    BranchRef, BranchStatus, ChangeKind, CommitRecord, GitOutputs, RemoteFunction, RemoteRef,
    RepositorySnapshot, StatusEntry,
};
pub use path::find_common_path;
