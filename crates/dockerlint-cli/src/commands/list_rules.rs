//! List rules command implementation.

use dockerlint_rules::all_rules;

/// Runs the list-rules command.
pub fn run() {
    println!("Available rules:\n");
    println!("{:<8} {:<22} {:<9} Description", "Code", "Name", "Severity");
    println!("{}", "-".repeat(80));

    for rule in all_rules() {
        println!(
            "{:<8} {:<22} {:<9} {}",
            rule.code(),
            rule.name(),
            rule.default_severity().to_string(),
            rule.description()
        );
    }

    println!("\nPresets:");
    println!("  recommended  - All rules DL001-DL011 (default)");
    println!("  minimal      - DL001, DL007, DL008 (for gradual adoption)");

    println!("\nUse --rules to filter specific rules, e.g.:");
    println!("  dockerlint check --rules explicit-tag,non-root-user");
    println!("  dockerlint check --rules DL001,DL007,DL008");
}
