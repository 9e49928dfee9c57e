//! Check command implementation.

use anyhow::{bail, Context, Result};
use dockerlint_core::{
    parse, AnalysisReport, Config, Engine, OsFileSystem, RuleBox, SourceContext,
};
use dockerlint_rules::configured_rules;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::OutputFormat;

/// Runs the check command.
///
/// # Errors
///
/// Returns an error (mapped to exit code 2) on unreadable input, config
/// failures, or a Dockerfile that does not parse.
pub fn run(
    path: &Path,
    format: OutputFormat,
    rules_filter: Option<String>,
    strict_flag: bool,
    exclude: Vec<String>,
    explicit_config: Option<&Path>,
) -> Result<ExitCode> {
    let from_stdin = path.as_os_str() == "-";
    let project_dir = project_dir(path, from_stdin)?;

    let resolved = crate::config_resolver::resolve(&project_dir, explicit_config);
    let config = match &resolved.path {
        None => Config::default(),
        Some(p) => {
            if resolved.origin == crate::config_resolver::Origin::User {
                tracing::info!("using user-level config: {}", p.display());
            }
            Config::from_file(p)
                .with_context(|| format!("failed to load config: {}", p.display()))?
        }
    };

    let strict = strict_flag || config.strict;

    let rules = match rules_filter {
        Some(filter) => filter_rules(&config, &filter),
        None => configured_rules(&config),
    };

    let engine = Engine::builder().rules(rules).config(config.clone()).build();
    tracing::info!("analyzing {} with {} rules", path.display(), engine.rule_count());

    let fs = OsFileSystem;
    let mut reports: Vec<(Option<PathBuf>, AnalysisReport)> = Vec::new();

    if from_stdin {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .context("failed to read standard input")?;
        let file = parse(&content).context("failed to parse Dockerfile from stdin")?;
        let ctx = SourceContext::from_stdin(&content, &fs);
        reports.push((None, engine.run(&ctx, &file)));
    } else {
        for dockerfile_path in input_files(path, &exclude, engine.config())? {
            let content = std::fs::read_to_string(&dockerfile_path)
                .with_context(|| format!("failed to read {}", dockerfile_path.display()))?;
            let file = parse(&content)
                .with_context(|| format!("failed to parse {}", dockerfile_path.display()))?;
            let ctx = SourceContext::new(&dockerfile_path, &content, &fs);
            let report = engine.run(&ctx, &file);
            reports.push((Some(dockerfile_path), report));
        }
    }

    super::output::print(&reports, format)?;

    Ok(ExitCode::from(exit_code(&reports, strict)))
}

/// Directory used for project-level config resolution.
fn project_dir(path: &Path, from_stdin: bool) -> Result<PathBuf> {
    if from_stdin {
        return std::env::current_dir().context("failed to resolve current directory");
    }
    if path.is_dir() {
        return Ok(path.to_path_buf());
    }
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => Ok(dir.to_path_buf()),
        _ => std::env::current_dir().context("failed to resolve current directory"),
    }
}

/// Resolves the set of Dockerfiles to lint for a path argument.
fn input_files(path: &Path, exclude: &[String], config: &Config) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    if !path.is_dir() {
        bail!("no such file or directory: {}", path.display());
    }

    let mut patterns = exclude.to_vec();
    patterns.extend(config.linter.exclude.iter().cloned());

    let files = crate::discover::dockerfiles(path, &patterns)?;
    if files.is_empty() {
        bail!("no Dockerfiles found under {}", path.display());
    }
    Ok(files)
}

/// Maps analysis outcomes to the process exit code.
fn exit_code(reports: &[(Option<PathBuf>, AnalysisReport)], strict: bool) -> u8 {
    let has_errors = reports.iter().any(|(_, r)| r.has_errors());
    let has_warnings = reports
        .iter()
        .any(|(_, r)| r.has_findings_at(dockerlint_core::Severity::Warning));

    u8::from(has_errors || (strict && has_warnings))
}

/// Filters the configured rule set by comma-separated names or codes.
fn filter_rules(config: &Config, filter: &str) -> Vec<RuleBox> {
    let wanted: Vec<&str> = filter.split(',').map(str::trim).collect();
    let all = configured_rules(config);

    for name in &wanted {
        if !all.iter().any(|r| r.name() == *name || r.code() == *name) {
            tracing::warn!("unknown rule: {name}");
        }
    }

    all.into_iter()
        .filter(|r| wanted.iter().any(|w| *w == r.name() || *w == r.code()))
        .collect()
}
