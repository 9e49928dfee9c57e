//! Context types and the filesystem collaborator for rule execution.

use std::io;
use std::path::{Path, PathBuf};

/// Filesystem reader abstraction.
///
/// The core never performs network or process-spawning I/O; the only
/// external collaborator is this reader, used by the input layer and by
/// rules that need to look next to the build file (e.g. for a
/// `.dockerignore`). Tests substitute [`MemoryFileSystem`].
pub trait FileSystem: Send + Sync {
    /// Reads a file to a string.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error, including `NotFound`.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Returns true if the path exists.
    fn exists(&self, path: &Path) -> bool;
}

/// [`FileSystem`] backed by the real OS filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

/// In-memory [`FileSystem`] for tests.
#[derive(Debug, Default)]
pub struct MemoryFileSystem {
    files: std::collections::HashMap<PathBuf, String>,
}

impl MemoryFileSystem {
    /// Creates an empty in-memory filesystem.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file with the given content.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.files.insert(path.into(), content.into());
        self
    }
}

impl FileSystem for MemoryFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, path.display().to_string()))
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }
}

/// Context provided to rules alongside the parsed instruction sequence.
///
/// Carries where the Dockerfile came from and the filesystem
/// collaborator, so rules like `dockerignore-present` can check for
/// sibling files without doing I/O of their own.
pub struct SourceContext<'a> {
    /// Path to the Dockerfile, or `None` when read from standard input.
    pub path: Option<&'a Path>,
    /// Raw file content.
    pub content: &'a str,
    /// Filesystem collaborator.
    pub fs: &'a dyn FileSystem,
}

impl<'a> SourceContext<'a> {
    /// Creates a context for a Dockerfile read from a path.
    #[must_use]
    pub fn new(path: &'a Path, content: &'a str, fs: &'a dyn FileSystem) -> Self {
        Self {
            path: Some(path),
            content,
            fs,
        }
    }

    /// Creates a context for content read from standard input.
    #[must_use]
    pub fn from_stdin(content: &'a str, fs: &'a dyn FileSystem) -> Self {
        Self {
            path: None,
            content,
            fs,
        }
    }

    /// Returns the directory containing the Dockerfile, if known.
    #[must_use]
    pub fn directory(&self) -> Option<&Path> {
        let dir = self.path?.parent()?;
        // A bare file name has an empty parent; treat it as the cwd.
        if dir.as_os_str().is_empty() {
            Some(Path::new("."))
        } else {
            Some(dir)
        }
    }
}
