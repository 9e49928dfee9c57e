//! Dockerfile discovery for directory inputs.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Glob suffixes recognized as Dockerfiles.
const DOCKERFILE_PATTERNS: &[&str] = &["**/Dockerfile", "**/Dockerfile.*", "**/*.dockerfile"];

/// Discovers Dockerfiles under a directory, honoring exclude patterns.
///
/// Results are sorted so discovery order is deterministic.
///
/// # Errors
///
/// Returns an error when an exclude or discovery pattern is invalid.
pub fn dockerfiles(root: &Path, exclude_patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for suffix in DOCKERFILE_PATTERNS {
        let pattern = format!("{}/{suffix}", root.display());
        for entry in glob::glob(&pattern)
            .with_context(|| format!("invalid discovery pattern: {pattern}"))?
        {
            let path = entry.context("failed to read directory entry")?;
            if !path.is_file() {
                continue;
            }
            if should_exclude(&path, exclude_patterns) {
                debug!("excluding: {}", path.display());
                continue;
            }
            if !files.contains(&path) {
                files.push(path);
            }
        }
    }

    files.sort();
    Ok(files)
}

/// Checks if a path matches any exclude pattern.
fn should_exclude(path: &Path, patterns: &[String]) -> bool {
    let path_str = path.to_string_lossy();

    for pattern in patterns {
        if let Ok(glob_pattern) = glob::Pattern::new(pattern) {
            if glob_pattern.matches(&path_str) {
                return true;
            }
        }

        // Also check as substring for patterns like "**/vendor/**"
        let normalized = pattern.replace("**", "");
        if !normalized.is_empty() && path_str.contains(&normalized) {
            return true;
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn finds_dockerfiles_recursively() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("Dockerfile"), "FROM alpine:3.19\n").unwrap();
        fs::create_dir(tmp.path().join("svc")).unwrap();
        fs::write(tmp.path().join("svc/Dockerfile.prod"), "FROM alpine:3.19\n").unwrap();
        fs::write(tmp.path().join("svc/build.dockerfile"), "FROM alpine:3.19\n").unwrap();
        fs::write(tmp.path().join("README.md"), "docs\n").unwrap();

        let files = dockerfiles(tmp.path(), &[]).unwrap();
        assert_eq!(files.len(), 3);
        assert!(files.iter().all(|f| f.is_file()));
    }

    #[test]
    fn exclude_patterns_filter_results() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("Dockerfile"), "FROM alpine:3.19\n").unwrap();
        fs::create_dir(tmp.path().join("vendor")).unwrap();
        fs::write(tmp.path().join("vendor/Dockerfile"), "FROM alpine:3.19\n").unwrap();

        let files = dockerfiles(tmp.path(), &["**/vendor/**".to_string()]).unwrap();
        assert_eq!(files.len(), 1);
        assert!(!files[0].to_string_lossy().contains("vendor"));
    }

    #[test]
    fn empty_directory_finds_nothing() {
        let tmp = TempDir::new().unwrap();
        assert!(dockerfiles(tmp.path(), &[]).unwrap().is_empty());
    }

    #[test]
    fn results_are_sorted() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("b")).unwrap();
        fs::create_dir(tmp.path().join("a")).unwrap();
        fs::write(tmp.path().join("b/Dockerfile"), "FROM alpine:3.19\n").unwrap();
        fs::write(tmp.path().join("a/Dockerfile"), "FROM alpine:3.19\n").unwrap();

        let files = dockerfiles(tmp.path(), &[]).unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|f| f.to_string_lossy().into_owned())
            .collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }
}
