use crate::error::{GitError, GitResult};

/// Find the deepest directory prefix shared by every path
///
/// The result always ends with `separator`, keeps a leading separator when
/// every path has one, and is empty when no segment is shared. A path counts
/// as being under a prefix when it starts with it or equals it without the
/// trailing separator, so `["/a"]` yields `"/a/"`.
pub fn find_common_path<S: AsRef<str>>(separator: &str, paths: &[S]) -> GitResult<String> {
    if separator.is_empty() {
        return Err(GitError::InvalidArgument("separator must not be empty".to_string()));
    }

    // First of the longest paths, so ties go to encounter order
    let longest = paths
        .iter()
        .map(AsRef::as_ref)
        .reduce(|best, path| if path.len() > best.len() { path } else { best })
        .ok_or_else(|| GitError::InvalidArgument("no paths given".to_string()))?;

    let mut common = if longest.starts_with(separator) {
        separator.to_string()
    } else {
        String::new()
    };
    let mut shared_segments = 0;

    for segment in longest.split(separator).filter(|s| !s.is_empty()) {
        let candidate = format!("{common}{segment}{separator}");
        if !paths.iter().all(|p| is_under(p.as_ref(), &candidate, separator)) {
            break;
        }
        common = candidate;
        shared_segments += 1;
    }

    if shared_segments == 0 {
        return Ok(String::new());
    }
    Ok(common)
}

fn is_under(path: &str, prefix: &str, separator: &str) -> bool {
    path.starts_with(prefix) || prefix.strip_suffix(separator) == Some(path)
}
