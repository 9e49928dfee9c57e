//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# dockerlint configuration

# Treat warnings as failures (same as --strict)
# strict = true

[linter]
# Glob patterns to exclude from directory discovery
exclude = [
    "**/node_modules/**",
    "**/vendor/**",
]

# Base image repositories flagged by minimal-base-image (DL002)
# denylist_base_images = ["ubuntu", "debian", "node"]

# Fraction of instructions that must carry a preceding comment (DL009)
# documentation_threshold = 0.5

# Rule configurations
# Each rule can be enabled/disabled and have its severity overridden

[rules.minimal-base-image]
enabled = true
# severity = "error"  # Override default severity
# denylist = ["ubuntu", "debian"]

# [rules.documented]
# enabled = true
# threshold = 0.3

# [rules.has-test-step]
# enabled = false
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    let config_path = Path::new("dockerlint.toml");

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, DEFAULT_CONFIG)?;

    println!("Created dockerlint.toml");
    println!("\nNext steps:");
    println!("  1. Edit dockerlint.toml to configure rules");
    println!("  2. Run: dockerlint check");

    Ok(())
}
