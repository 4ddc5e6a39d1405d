use crate::error::{GitError, GitResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Marker file whose presence in the project root flags a development build
const DEV_ROOT_MARKER: &str = ".devroot";

/// Locations supplied by whoever hosts the parser
///
/// Nothing here is discovered; these are read from configuration and only
/// answered back.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Environment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub git_install_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub git_root: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_path: Option<PathBuf>,
}

impl Environment {
    /// Whether a git executable has been located
    pub fn git_found(&self) -> bool {
        non_empty(&self.git_install_path).is_some()
    }

    /// Whether a repository root is known
    pub fn active_repository(&self) -> bool {
        non_empty(&self.git_root).is_some()
    }

    pub fn is_development_build(&self) -> bool {
        non_empty(&self.project_path).is_some_and(|p| p.join(DEV_ROOT_MARKER).is_file())
    }

    /// Get the git executable path, or fail if none was configured
    pub fn require_git(&self) -> GitResult<&Path> {
        non_empty(&self.git_install_path).ok_or_else(|| {
            GitError::ConfigurationUnavailable("no git installation configured".to_string())
        })
    }

    /// Get the repository root, or fail if none was configured
    pub fn require_repository(&self) -> GitResult<&Path> {
        non_empty(&self.git_root).ok_or_else(|| {
            GitError::ConfigurationUnavailable("no repository root configured".to_string())
        })
    }
}

fn non_empty(path: &Option<PathBuf>) -> Option<&Path> {
    path.as_deref().filter(|p| !p.as_os_str().is_empty())
}
