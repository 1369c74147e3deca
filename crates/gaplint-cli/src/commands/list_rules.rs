//! List rules command implementation.

use gaplint_rules::all_rules;

/// Runs the list-rules command.
pub fn run() {
    println!("Available rules:\n");
    println!("{:<6} {:<28} {:<8} Description", "Code", "Name", "Kind");
    println!("{}", "-".repeat(80));

    for rule in all_rules() {
        let params = if rule.params.is_empty() {
            String::new()
        } else {
            format!(" [{}]", rule.params.join(", "))
        };
        println!(
            "{:<6} {:<28} {:<8} {}{}",
            rule.code, rule.name, rule.category, rule.description, params
        );
    }

    println!("\nDisable rules by code or name, e.g.:");
    println!("  gaplint check --disable W004,line-too-long");
    println!("  # gaplint: disable=W004           (this line)");
    println!("  # gaplint: disable(nextline)=W003 (next line)");
}
