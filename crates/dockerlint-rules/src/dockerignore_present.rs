//! Rule checking for a `.dockerignore` next to the build file.
//!
//! # Rationale
//!
//! Without a `.dockerignore`, the whole directory - `.git`, build
//! output, local secrets - is shipped to the daemon as build context and
//! is one careless `COPY` away from ending up in the image.
//!
//! This is the one rule that consults the filesystem collaborator; when
//! input comes from stdin there is no "alongside" and the rule skips.

use dockerlint_core::{Dockerfile, Finding, Rule, Severity, SourceContext, Suggestion};

/// Rule code for dockerignore-present.
pub const CODE: &str = "DL010";

/// Rule name for dockerignore-present.
pub const NAME: &str = "dockerignore-present";

/// Warns when no `.dockerignore` exists alongside the Dockerfile.
#[derive(Debug, Clone, Default)]
pub struct DockerignorePresent;

impl DockerignorePresent {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for DockerignorePresent {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Warns when no .dockerignore exists next to the Dockerfile"
    }

    fn check(&self, ctx: &SourceContext<'_>, _file: &Dockerfile) -> Vec<Finding> {
        let Some(directory) = ctx.directory() else {
            return Vec::new();
        };

        if ctx.fs.exists(&directory.join(".dockerignore")) {
            return Vec::new();
        }

        vec![Finding::new(
            CODE,
            NAME,
            Severity::Warning,
            1,
            "no .dockerignore found next to the Dockerfile",
        )
        .with_suggestion(Suggestion::new(
            "add a .dockerignore excluding VCS data, build output and local files",
        ))]
    }
}
