//! Rule requiring a non-root runtime user.
//!
//! # Rationale
//!
//! Containers run as root unless a `USER` instruction says otherwise,
//! and a root process in the container is one kernel bug away from being
//! root on the host. The *last* `USER` wins at runtime, so that is the
//! one this rule judges.
//!
//! An empty instruction sequence is exempt: with nothing to run there
//! is no effective user, and the missing-USER finding would have no
//! instruction line to anchor on.

use dockerlint_core::{Dockerfile, Finding, Opcode, Rule, Severity, SourceContext, Suggestion};

/// Rule code for non-root-user.
pub const CODE: &str = "DL007";

/// Rule name for non-root-user.
pub const NAME: &str = "non-root-user";

/// Requires the effective runtime user to be non-root.
#[derive(Debug, Clone, Default)]
pub struct NonRootUser;

impl NonRootUser {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for NonRootUser {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires a USER instruction selecting a non-root user"
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn check(&self, _ctx: &SourceContext<'_>, file: &Dockerfile) -> Vec<Finding> {
        if file.is_empty() {
            return Vec::new();
        }

        let Some(last_user) = file.last_of(&Opcode::User) else {
            let last_line = file.instructions.last().map_or(1, |i| i.line);
            return vec![Finding::new(
                CODE,
                NAME,
                Severity::Error,
                last_line,
                "no USER instruction; the container runs as root",
            )
            .with_suggestion(Suggestion::new(
                "create a dedicated user and add `USER <name>` before the final CMD",
            ))];
        };

        // `USER name:group` - only the user part decides.
        let user = last_user
            .arguments
            .first()
            .map(|a| a.split(':').next().unwrap_or(a))
            .unwrap_or("");

        if user == "root" || user == "0" {
            return vec![Finding::new(
                CODE,
                NAME,
                Severity::Error,
                last_user.line,
                "the effective USER is root",
            )
            .with_suggestion(Suggestion::new(
                "switch back to a non-root user after privileged setup steps",
            ))];
        }

        Vec::new()
    }
}
