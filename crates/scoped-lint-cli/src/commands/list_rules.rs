//! List rules command implementation.

use scoped_lint_rules::all_rules;

/// Runs the list-rules command.
pub fn run() {
    println!("Available rules:\n");
    println!("{:<10} {:<20} {:<8} Description", "Code", "Name", "Fix");
    println!("{}", "-".repeat(80));

    for rule in all_rules() {
        println!(
            "{:<10} {:<20} {:<8} {}",
            rule.code(),
            rule.name(),
            if rule.has_fix() { "yes" } else { "no" },
            rule.description()
        );
    }

    println!("\nConfigure rules in scoped-lint.toml, e.g.:");
    println!("  [rules.scoped-modules]");
    println!("  severity = \"warning\"");
    println!("  internal_prefix = \"@\"");
}
