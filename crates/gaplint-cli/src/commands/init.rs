//! Init command implementation.

use anyhow::{bail, Context, Result};
use std::path::Path;

use crate::config_resolver::DEFAULT_CONFIG_NAME;

const DEFAULT_CONFIG: &str = r#"# gaplint configuration
#
# Command-line options override the values set here.

# Maximum line width
columns = 80

# Indentation unit in spaces
indentation = 2

# Stop after this many warnings
max_warnings = 1000

# Rules to disable, by code or name ("all" disables every rule)
disable = [
    # "W004",
    # "line-too-long",
]
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    write_default(Path::new(DEFAULT_CONFIG_NAME), force)?;

    println!("Created {DEFAULT_CONFIG_NAME}");
    println!("\nNext steps:");
    println!("  1. Edit {DEFAULT_CONFIG_NAME} to adjust limits or disable rules");
    println!("  2. Run: gaplint check");

    Ok(())
}

fn write_default(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }
    std::fs::write(path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", path.display()))
}
