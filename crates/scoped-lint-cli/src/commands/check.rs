//! Check command implementation.

use anyhow::{Context, Result};
use scoped_lint_core::{Analyzer, LintResult, Severity};
use scoped_lint_rules::configured_rules;
use scoped_lint_ts::TypeScriptParser;
use std::path::Path;

use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Exit code when violations at or above the `fail_on` severity were found.
pub const EXIT_VIOLATIONS: i32 = 1;

/// Exit code when some module could not be analyzed.
pub const EXIT_FAILURES: i32 = 2;

/// Runs the check command and returns the process exit code.
pub fn run(
    path: &Path,
    format: OutputFormat,
    exclude: Vec<String>,
    fix: bool,
    source: &ConfigSource,
) -> Result<i32> {
    if let ConfigSource::Global(p) = source {
        tracing::info!("Using global config: {}", p.display());
    }
    let config = source.load().with_context(|| match source.path() {
        Some(p) => format!("Failed to load config: {}", p.display()),
        None => "Failed to load default config".to_string(),
    })?;
    let fail_on = config.analyzer.fail_on.unwrap_or(Severity::Error);

    let mut builder = Analyzer::builder()
        .root(path)
        .parser(TypeScriptParser::new())
        .excludes(exclude);
    for rule in configured_rules(&config) {
        builder = builder.rule_box(rule);
    }
    let analyzer = builder
        .config(config)
        .build()
        .context("Failed to build analyzer")?;

    tracing::info!(
        "Analyzing {:?} with {} rules",
        analyzer.root(),
        analyzer.rule_count()
    );

    if fix {
        let summary = analyzer.fix().context("Applying fixes failed")?;
        tracing::info!(
            "Applied {} fix(es) in {} file(s)",
            summary.edits_applied,
            summary.files_fixed
        );
        for failure in &summary.failures {
            tracing::warn!("Not fixed: {}", failure);
        }
    }

    let result = analyzer.analyze().context("Analysis failed")?;

    super::output::print(&result, format, analyzer.base_dir())?;

    Ok(exit_code(&result, fail_on))
}

fn exit_code(result: &LintResult, fail_on: Severity) -> i32 {
    if result.has_failures() {
        EXIT_FAILURES
    } else if result.has_violations_at(fail_on) {
        EXIT_VIOLATIONS
    } else {
        0
    }
}
