//! Init command implementation.

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};

const CONFIG_NAME: &str = "klint.toml";

const DEFAULT_CONFIG: &str = r#"# klint configuration

# Rules to run (default: every built-in rule)
# enable-rules = ["long_line", "no_wildcard_import"]

# Rules to skip
disable-rules = []

# Report format: text, html, json, pmd or xcode
report-type = "text"

# Write the report to a file instead of stdout
# output = "build/reports/klint.txt"

# Glob patterns skipped during discovery
exclude = [
    "**/build/**",
    "**/generated/**",
]

# Maximum tolerated issues per severity before the run fails
[thresholds]
critical = 0
major = 10
minor = 20
cosmetic = 50

[engine]
parallel = true
# jobs = 4

[rules.long_line]
max = 100

[rules.too_many_parameters]
max = 10
# severity = "critical"
"#;

/// Runs the init command in the current directory.
pub fn run(force: bool) -> Result<()> {
    let path = run_in(Path::new("."), force)?;

    println!("Created {}", path.display());
    println!("\nNext steps:");
    println!("  1. Edit {CONFIG_NAME} to configure rules and thresholds");
    println!("  2. Run: klint lint");

    Ok(())
}

fn run_in(dir: &Path, force: bool) -> Result<PathBuf> {
    let config_path = dir.join(CONFIG_NAME);

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    Ok(config_path)
}
