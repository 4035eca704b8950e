//! List rules command implementation.

use klint::rules::all_rules;

/// Runs the list-rules command.
pub fn run() {
    println!("Available rules:\n");
    println!(
        "{:<30} {:<14} {:<10} Description",
        "Identifier", "Category", "Severity"
    );
    println!("{}", "-".repeat(100));

    for rule in all_rules() {
        println!(
            "{:<30} {:<14} {:<10} {}",
            rule.identifier(),
            rule.category(),
            rule.severity().as_str(),
            rule.description()
        );
    }

    println!("\nSelect rules with --enable-rules / --disable-rules, e.g.:");
    println!("  klint lint --enable-rules long_line,no_wildcard_import");
    println!("  klint lint --disable-rules trailing_whitespace");
}
