//! Rule against hard-coded secrets in ENV instructions.
//!
//! # Rationale
//!
//! An `ENV` value is baked into the image and readable by anyone who can
//! pull it, `docker history` included. Secret-looking names with literal
//! values belong in runtime injection, not the build file.
//!
//! Placeholders are exempt: variable references (`$VAR`), `<fill-me>`
//! markers and common dummy values are documentation, not leaks.

use dockerlint_core::{Dockerfile, Finding, Opcode, Rule, Severity, SourceContext, Suggestion};

/// Rule code for env-no-secrets.
pub const CODE: &str = "DL008";

/// Rule name for env-no-secrets.
pub const NAME: &str = "env-no-secrets";

/// Name fragments that mark a variable as secret-like.
const SECRET_MARKERS: &[&str] = &["PASSWORD", "PASSWD", "SECRET", "TOKEN", "APIKEY", "API_KEY", "KEY"];

/// Literal values treated as placeholders rather than real secrets.
const PLACEHOLDER_VALUES: &[&str] = &[
    "changeme",
    "change_me",
    "placeholder",
    "example",
    "dummy",
    "none",
    "xxx",
    "xxxx",
    "***",
];

/// Flags secret-like ENV names carrying literal values.
#[derive(Debug, Clone, Default)]
pub struct EnvNoSecrets;

impl EnvNoSecrets {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

fn is_secret_name(name: &str) -> bool {
    let upper = name.to_ascii_uppercase();
    SECRET_MARKERS.iter().any(|m| upper.contains(m))
}

fn is_placeholder(value: &str) -> bool {
    let value = value.trim_matches(|c| c == '"' || c == '\'');
    if value.is_empty() || value.starts_with('$') {
        return true;
    }
    if value.starts_with('<') && value.ends_with('>') {
        return true;
    }
    PLACEHOLDER_VALUES.contains(&value.to_ascii_lowercase().as_str())
}

/// Name/value pairs from an ENV instruction, covering both the
/// `ENV K=V K2=V2` and legacy `ENV K V...` forms.
fn env_pairs(arguments: &[String]) -> Vec<(String, String)> {
    if arguments.iter().any(|a| a.contains('=')) {
        arguments
            .iter()
            .filter_map(|a| {
                let (name, value) = a.split_once('=')?;
                Some((name.to_string(), value.to_string()))
            })
            .collect()
    } else if let Some((name, value)) = arguments.split_first() {
        vec![(name.clone(), value.join(" "))]
    } else {
        Vec::new()
    }
}

impl Rule for EnvNoSecrets {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids literal secret values in ENV instructions"
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn check(&self, _ctx: &SourceContext<'_>, file: &Dockerfile) -> Vec<Finding> {
        let mut findings = Vec::new();

        for instruction in file.by_opcode(&Opcode::Env) {
            for (name, value) in env_pairs(&instruction.arguments) {
                if is_secret_name(&name) && !is_placeholder(&value) {
                    findings.push(
                        Finding::new(
                            CODE,
                            NAME,
                            Severity::Error,
                            instruction.line,
                            format!("ENV `{name}` carries a literal secret-like value"),
                        )
                        .with_suggestion(Suggestion::new(
                            "inject secrets at runtime (e.g. `docker run -e`) or via a secret store",
                        )),
                    );
                }
            }
        }

        findings
    }
}
