//! Shared helpers for inspecting shell commands inside `RUN` arguments.
//!
//! These are textual heuristics over well-known package managers,
//! download tools and test runners. They intentionally favor precision
//! over completeness: an invocation spelled in an unusual way is a
//! false negative, never a false positive.

/// Splits a `RUN` argument list into individual shell commands.
///
/// Exec-form punctuation (`["..."]`) is stripped from tokens, and the
/// stream is split at `&&`, `||`, `;` and `|` boundaries.
#[must_use]
pub fn commands(arguments: &[String]) -> Vec<Vec<String>> {
    let mut result = Vec::new();
    let mut current: Vec<String> = Vec::new();

    for raw in arguments {
        let token = raw.trim_matches(|c| matches!(c, '[' | ']' | '"' | '\'' | ','));
        if token.is_empty() {
            continue;
        }

        if matches!(token, "&&" | "||" | ";" | "|") {
            if !current.is_empty() {
                result.push(std::mem::take(&mut current));
            }
            continue;
        }

        if let Some(stripped) = token.strip_suffix(';') {
            if !stripped.is_empty() {
                current.push(stripped.to_string());
            }
            if !current.is_empty() {
                result.push(std::mem::take(&mut current));
            }
            continue;
        }

        current.push(token.to_string());
    }

    if !current.is_empty() {
        result.push(current);
    }

    result
}

/// Returns the program name of a command: the basename of the first
/// token, skipping a leading `sudo`.
#[must_use]
pub fn program(command: &[String]) -> Option<&str> {
    let mut tokens = command.iter();
    let mut first = tokens.next()?;
    if first == "sudo" {
        first = tokens.next()?;
    }
    Some(first.rsplit('/').next().unwrap_or(first))
}

/// Arguments of a command after the program token (and any `sudo`).
fn tail(command: &[String]) -> &[String] {
    let skip = if command.first().map(String::as_str) == Some("sudo") {
        2
    } else {
        1
    };
    command.get(skip.min(command.len())..).unwrap_or(&[])
}

fn tail_contains(command: &[String], subcommands: &[&str]) -> bool {
    tail(command)
        .iter()
        .any(|t| subcommands.contains(&t.as_str()))
}

/// Returns true if the command is a package-manager invocation
/// (install-like, including index refreshes such as `apt-get update`).
#[must_use]
pub fn is_package_manager(command: &[String]) -> bool {
    let Some(prog) = program(command) else {
        return false;
    };

    match prog {
        "apt-get" | "apt" => tail_contains(command, &["install", "update", "upgrade"]),
        "apk" => tail_contains(command, &["add", "update", "upgrade"]),
        "yum" | "dnf" | "zypper" => tail_contains(command, &["install", "update", "upgrade"]),
        "pip" | "pip3" => tail_contains(command, &["install"]),
        "npm" => tail_contains(command, &["install", "ci", "i"]),
        "yarn" | "pnpm" => tail_contains(command, &["install", "add"]),
        "cargo" => tail_contains(command, &["install", "fetch"]),
        "gem" | "composer" | "bundle" | "poetry" | "conda" => tail_contains(command, &["install"]),
        "go" => tail_contains(command, &["get", "download"]),
        _ => false,
    }
}

/// Returns true if the command looks like a test-runner invocation.
#[must_use]
pub fn is_test_runner(command: &[String]) -> bool {
    let Some(prog) = program(command) else {
        return false;
    };

    match prog {
        "pytest" | "rspec" | "phpunit" | "tox" | "jest" | "ctest" => true,
        "cargo" | "go" | "mvn" | "dotnet" => tail_contains(command, &["test"]),
        "npm" | "yarn" | "pnpm" => tail_contains(command, &["test"]),
        "make" | "gradle" | "gradlew" => tail_contains(command, &["test", "check"]),
        "python" | "python3" => {
            let rest = tail(command);
            rest.windows(2)
                .any(|w| w[0] == "-m" && (w[1] == "pytest" || w[1] == "unittest"))
        }
        _ => false,
    }
}

/// Known archive/installer extensions used for artifact matching.
const ARTIFACT_EXTENSIONS: &[&str] = &[
    ".tar.gz", ".tgz", ".tar.bz2", ".tbz2", ".tar.xz", ".txz", ".tar", ".zip", ".gz", ".bz2",
    ".xz", ".deb", ".rpm",
];

fn is_artifact_name(token: &str) -> bool {
    ARTIFACT_EXTENSIONS.iter().any(|ext| token.ends_with(ext))
}

fn basename(token: &str) -> String {
    token.rsplit('/').next().unwrap_or(token).to_string()
}

/// Artifact file names a download or extraction command touches.
///
/// Covers `curl -o`, `wget` (URL basename or `-O` target), `tar` and
/// `unzip` arguments. Only names with a recognized archive extension
/// are reported, so plain text fetches are ignored.
#[must_use]
pub fn downloaded_artifacts(command: &[String]) -> Vec<String> {
    let Some(prog) = program(command) else {
        return Vec::new();
    };
    if !matches!(prog, "curl" | "wget" | "tar" | "unzip") {
        return Vec::new();
    }

    let mut artifacts = Vec::new();
    let rest = tail(command);

    for (index, token) in rest.iter().enumerate() {
        if matches!(token.as_str(), "-o" | "-O" | "--output" | "--output-document") {
            if let Some(target) = rest.get(index + 1) {
                let name = basename(target);
                if is_artifact_name(&name) && !artifacts.contains(&name) {
                    artifacts.push(name);
                }
            }
            continue;
        }

        if token.starts_with('-') {
            continue;
        }

        let name = basename(token);
        if is_artifact_name(&name) && !artifacts.contains(&name) {
            artifacts.push(name);
        }
    }

    artifacts
}

/// File names removed by an `rm` command, as basenames.
#[must_use]
pub fn removed_files(command: &[String]) -> Vec<String> {
    if program(command) != Some("rm") {
        return Vec::new();
    }

    tail(command)
        .iter()
        .filter(|t| !t.starts_with('-'))
        .map(|t| basename(t))
        .collect()
}
