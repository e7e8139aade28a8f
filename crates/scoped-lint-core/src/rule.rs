//! Rule trait for defining lint rules.

use std::path::PathBuf;
use thiserror::Error;

use crate::context::ModuleContext;
use crate::fs::DirectoryReader;
use crate::syntax::SourceModule;
use crate::types::{Severity, Violation};

/// A rule could not finish checking a module.
///
/// This signals that the tool cannot determine correctness (for example a
/// directory it needs is unreadable), not that the source is wrong.
/// Violations found before the failure travel with the error so the host
/// can still report them.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct RuleError {
    /// Module being checked when the failure happened.
    pub path: PathBuf,
    /// Human-readable description of the failure.
    pub message: String,
    /// Violations produced before the failure.
    pub violations: Vec<Violation>,
}

impl RuleError {
    /// Creates a new rule error without partial results.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            violations: Vec::new(),
        }
    }

    /// Attaches violations produced before the failure.
    #[must_use]
    pub fn with_violations(mut self, violations: Vec<Violation>) -> Self {
        self.violations = violations;
        self
    }
}

/// A per-module lint rule.
///
/// Rules receive the parsed module and a directory reader. They must not
/// mutate the source or the file system; fixes are returned as edits on the
/// produced violations.
///
/// # Example
///
/// ```ignore
/// use scoped_lint_core::{DirectoryReader, ModuleContext, Rule, RuleError, SourceModule, Violation};
///
/// pub struct NoEmptyModules;
///
/// impl Rule for NoEmptyModules {
///     fn name(&self) -> &'static str { "no-empty-modules" }
///     fn code(&self) -> &'static str { "SM100" }
///
///     fn check(
///         &self,
///         ctx: &ModuleContext,
///         module: &SourceModule,
///         _fs: &dyn DirectoryReader,
///     ) -> Result<Vec<Violation>, RuleError> {
///         if module.statements.is_empty() { /* ... */ }
///         Ok(vec![])
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "scoped-modules").
    fn name(&self) -> &'static str;

    /// Returns the rule code (e.g., "SM001").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the default severity for violations from this rule.
    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    /// Whether any violation of this rule may carry an automatic fix.
    fn has_fix(&self) -> bool {
        false
    }

    /// Checks a single module and returns any violations found.
    ///
    /// # Errors
    ///
    /// Returns a [`RuleError`] when the environment prevents the rule from
    /// reaching a verdict.
    fn check(
        &self,
        ctx: &ModuleContext,
        module: &SourceModule,
        fs: &dyn DirectoryReader,
    ) -> Result<Vec<Violation>, RuleError>;
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;
