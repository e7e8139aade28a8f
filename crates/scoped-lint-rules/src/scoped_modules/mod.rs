//! Rule enforcing directory-scoped module encapsulation.
//!
//! # Rationale
//!
//! A directory whose name starts with `@` holds internal modules. They may
//! be imported by their direct parent chain (`./@utils`, `../@utils`) but
//! not reached into (`../@utils/strings`), and never re-exported.
//!
//! Index modules (`index.ts`, `index.d.ts`, ...) act as barrels: every
//! public sibling module must be re-exported from them.
//!
//! # Detected Patterns
//!
//! - `import x from '../@lib/x'` (fix: remove the statement)
//! - `export * from './@secret'` (fix: remove the statement)
//! - an `index` module not re-exporting a sibling file or a sibling
//!   directory with its own index (fix: append `export * from` lines)
//!
//! # Configuration
//!
//! - `internal_prefix`: Marker for internal directories (default: `"@"`)
//! - `extensions`: Source extensions without dots (default: js, jsx, ts, tsx)
//! - `check_barrels`: Whether to check index modules (default: true)

mod barrel;
mod boundary;
mod collector;
mod pattern;
mod reporter;

pub use barrel::{append_reexports, BarrelValidator, DEFAULT_EXTENSIONS, MISSING_EXPORTS_MESSAGE};
pub use boundary::{banned_export_message, banned_import_message};
pub use collector::{collect, unquote, Declaration, DeclarationKind};
pub use pattern::{PatternMatcher, DEFAULT_PREFIX};
pub use reporter::{Anchor, Diagnostic, Reporter};

use scoped_lint_core::{
    DirectoryReader, ModuleContext, Rule, RuleConfig, RuleError, Severity, SourceModule, Violation,
};
use tracing::{debug, warn};

/// Rule code for scoped-modules.
pub const CODE: &str = "SM001";

/// Rule name for scoped-modules.
pub const NAME: &str = "scoped-modules";

/// Enforces internal-module boundaries and barrel completeness.
#[derive(Debug, Clone)]
pub struct ScopedModules {
    matcher: PatternMatcher,
    extensions: Vec<String>,
    check_barrels: bool,
    severity: Severity,
}

impl Default for ScopedModules {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopedModules {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            matcher: PatternMatcher::default(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| (*e).to_string()).collect(),
            check_barrels: true,
            severity: Severity::Error,
        }
    }

    /// Creates the rule from its `[rules.scoped-modules]` table.
    #[must_use]
    pub fn from_config(config: Option<&RuleConfig>) -> Self {
        let mut rule = Self::new();
        let Some(config) = config else {
            return rule;
        };

        let prefix = config.get_str("internal_prefix", DEFAULT_PREFIX);
        if prefix.is_empty() {
            warn!("Empty internal_prefix for {}, using {:?}", NAME, DEFAULT_PREFIX);
        } else {
            rule = rule.internal_prefix(prefix);
        }

        let extensions = config.get_str_array("extensions");
        if !extensions.is_empty() {
            rule = rule.extensions(extensions);
        }

        rule.check_barrels(config.get_bool("check_barrels", true))
    }

    /// Sets the internal directory prefix.
    #[must_use]
    pub fn internal_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.matcher = PatternMatcher::new(prefix);
        self
    }

    /// Sets the recognized source extensions. Leading dots are ignored.
    #[must_use]
    pub fn extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extensions = extensions
            .into_iter()
            .map(|e| e.as_ref().trim_start_matches('.').to_string())
            .filter(|e| !e.is_empty())
            .collect();
        self
    }

    /// Enables or disables the barrel completeness check.
    #[must_use]
    pub fn check_barrels(mut self, enabled: bool) -> Self {
        self.check_barrels = enabled;
        self
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    fn reporter(&self) -> Reporter {
        Reporter {
            code: CODE,
            rule: NAME,
            severity: self.severity,
        }
    }
}

impl Rule for ScopedModules {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids reaching into internal modules and requires complete index barrels"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn has_fix(&self) -> bool {
        true
    }

    fn check(
        &self,
        ctx: &ModuleContext,
        module: &SourceModule,
        fs: &dyn DirectoryReader,
    ) -> Result<Vec<Violation>, RuleError> {
        let declarations = collect(module);
        let mut diagnostics = boundary::validate(&declarations, &self.matcher);

        let barrel = BarrelValidator::new(&self.matcher, &self.extensions);
        let is_index = ctx.file_name().is_some_and(|name| barrel.is_index_file(name));

        if self.check_barrels && is_index {
            debug!("Checking barrel {}", ctx.relative_path.display());
            match barrel.validate(ctx.directory(), ctx.content, &declarations, fs) {
                Ok(Some(diagnostic)) => diagnostics.push(diagnostic),
                Ok(None) => {}
                Err(err) => {
                    let partial = self.reporter().report(ctx, module, diagnostics);
                    return Err(RuleError::new(ctx.path, err.to_string()).with_violations(partial));
                }
            }
        }

        Ok(self.reporter().report(ctx, module, diagnostics))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scoped_lint_core::Config;

    #[test]
    fn defaults() {
        let rule = ScopedModules::new();
        assert_eq!(rule.name(), NAME);
        assert_eq!(rule.code(), CODE);
        assert!(rule.has_fix());
        assert_eq!(rule.matcher.prefix(), "@");
        assert_eq!(
            rule.extensions,
            vec!["ts", "tsx", "mts", "cts", "js", "jsx", "mjs", "cjs"]
        );
        assert!(rule.check_barrels);
    }

    #[test]
    fn from_config_reads_options() {
        let config = Config::parse(
            r#"
[rules.scoped-modules]
internal_prefix = "_"
extensions = [".ts", "mts"]
check_barrels = false
"#,
        )
        .unwrap();

        let rule = ScopedModules::from_config(config.rule(NAME));
        assert_eq!(rule.matcher.prefix(), "_");
        assert_eq!(rule.extensions, vec!["ts", "mts"]);
        assert!(!rule.check_barrels);
    }

    #[test]
    fn empty_prefix_falls_back_to_default() {
        let config = Config::parse("[rules.scoped-modules]\ninternal_prefix = \"\"\n").unwrap();
        let rule = ScopedModules::from_config(config.rule(NAME));
        assert_eq!(rule.matcher.prefix(), DEFAULT_PREFIX);
        assert_eq!(ScopedModules::from_config(None).matcher.prefix(), DEFAULT_PREFIX);
    }
}
