//! Locating the configuration file.
//!
//! Priority: the `--config` flag wins outright; otherwise the first
//! existing candidate out of `dockerlint.toml` then `.dockerlint.toml`
//! in the project directory, then `config.toml` under the user-level
//! config directory; otherwise built-in defaults.

use std::path::{Path, PathBuf};

/// A resolved configuration location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// File to load, or `None` for built-in defaults.
    pub path: Option<PathBuf>,
    /// Where the path came from.
    pub origin: Origin,
}

/// Origin of a resolved configuration path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Passed via `--config`.
    Flag,
    /// Found next to the input, in the project directory.
    Project,
    /// Found under the user-level config directory.
    User,
    /// Nothing found; defaults apply.
    Builtin,
}

/// Resolves which configuration file to load, if any.
///
/// A `--config` path is returned as-is without an existence check, so a
/// typo surfaces as a load error rather than a silent fallback.
#[must_use]
pub fn resolve(project_dir: &Path, flag: Option<&Path>) -> ResolvedConfig {
    if let Some(path) = flag {
        return ResolvedConfig {
            path: Some(path.to_path_buf()),
            origin: Origin::Flag,
        };
    }
    first_existing(candidates(project_dir, user_config_dir().as_deref()))
}

/// The ordered candidate list behind [`resolve`].
///
/// Split out, with the user directory injected, so tests are not racing
/// on the real environment.
fn candidates(project_dir: &Path, user_dir: Option<&Path>) -> Vec<(PathBuf, Origin)> {
    let mut list = vec![
        (project_dir.join("dockerlint.toml"), Origin::Project),
        (project_dir.join(".dockerlint.toml"), Origin::Project),
    ];
    if let Some(dir) = user_dir {
        list.push((dir.join("config.toml"), Origin::User));
    }
    list
}

fn first_existing(candidates: Vec<(PathBuf, Origin)>) -> ResolvedConfig {
    for (candidate, origin) in candidates {
        if candidate.is_file() {
            tracing::debug!(path = %candidate.display(), ?origin, "config resolved");
            return ResolvedConfig {
                path: Some(candidate),
                origin,
            };
        }
    }
    ResolvedConfig {
        path: None,
        origin: Origin::Builtin,
    }
}

/// User-level config directory: `$DOCKERLINT_CONFIG_DIR` when set
/// (tests, CI), else `~/.dockerlint`.
fn user_config_dir() -> Option<PathBuf> {
    std::env::var_os("DOCKERLINT_CONFIG_DIR")
        .map(PathBuf::from)
        .or_else(|| home::home_dir().map(|h| h.join(".dockerlint")))
}
