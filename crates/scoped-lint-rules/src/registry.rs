//! Rule registry.

use scoped_lint_core::{Config, RuleBox};

use crate::scoped_modules::{self, ScopedModules};

/// Returns all available rules with default settings.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    vec![Box::new(ScopedModules::new())]
}

/// Returns all available rules built from their `[rules.<name>]` tables.
///
/// Disabled rules are still returned; the analyzer skips them.
#[must_use]
pub fn configured_rules(config: &Config) -> Vec<RuleBox> {
    vec![Box::new(ScopedModules::from_config(
        config.rule(scoped_modules::NAME),
    ))]
}

#[cfg(test)]
mod tests {
    use super::*;
    use scoped_lint_core::Rule;

    #[test]
    fn test_all_rules() {
        let rules = all_rules();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].name(), "scoped-modules");
        assert_eq!(rules[0].code(), "SM001");
    }

    #[test]
    fn test_configured_rules_use_options() {
        let config = Config::parse("[rules.scoped-modules]\nseverity = \"warning\"\n").unwrap();
        let rules = configured_rules(&config);
        assert_eq!(rules.len(), all_rules().len());
        assert!(rules[0].has_fix());
    }
}
