//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# scoped-lint configuration

[analyzer]
# Root directory to analyze (default: current directory)
# root = "./src"

# Glob patterns to exclude from analysis
exclude = [
    "**/node_modules/**",
    "**/dist/**",
]

# Respect .gitignore files
respect_gitignore = true

# Maximum number of modules analyzed in parallel (default: all cores)
# parallelism = 4

# Abort when a file cannot be parsed
fail_on_parse_error = false

# Lowest severity that fails `scoped-lint check` (info, warning, error)
fail_on = "error"

# Each rule can be enabled/disabled and have its severity overridden

[rules.scoped-modules]
enabled = true
# severity = "warning"

# Directories starting with this prefix hold internal modules
internal_prefix = "@"

# Source extensions used for index files and re-export ids
extensions = ["ts", "tsx", "mts", "cts", "js", "jsx", "mjs", "cjs"]

# Require index files to re-export every public sibling module
check_barrels = true
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    write_config(Path::new("scoped-lint.toml"), force)?;

    println!("Created scoped-lint.toml");
    println!("\nNext steps:");
    println!("  1. Edit scoped-lint.toml to configure rules");
    println!("  2. Run: scoped-lint check");

    Ok(())
}

fn write_config(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, DEFAULT_CONFIG)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use scoped_lint_core::Config;
    use tempfile::TempDir;

    #[test]
    fn default_config_parses() {
        let config = Config::parse(DEFAULT_CONFIG).unwrap();
        assert!(config.is_rule_enabled("scoped-modules"));
        let rule = config.rule("scoped-modules").unwrap();
        assert_eq!(rule.get_str("internal_prefix", ""), "@");
        assert!(rule.get_bool("check_barrels", false));
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("scoped-lint.toml");
        std::fs::write(&path, "# mine\n").unwrap();

        assert!(write_config(&path, false).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# mine\n");

        write_config(&path, true).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), DEFAULT_CONFIG);
    }
}
