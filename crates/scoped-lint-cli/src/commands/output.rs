//! Shared output formatting for lint results.

use anyhow::Result;
use miette::{NamedSource, Report};
use scoped_lint_core::{LintResult, Severity, ViolationDiagnostic};
use std::path::Path;

use crate::OutputFormat;

/// Print lint results in the specified format.
///
/// `base` is the directory report paths are relative to; the `pretty`
/// format re-reads sources from it.
pub fn print(result: &LintResult, format: OutputFormat, base: &Path) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(result),
        OutputFormat::Json => return print_json(result),
        OutputFormat::Compact => print_compact(result),
        OutputFormat::Pretty => print_pretty(result, base),
    }
    Ok(())
}

fn print_text(result: &LintResult) {
    let (errors, warnings, infos) = result.count_by_severity();

    for violation in &result.violations {
        let severity_indicator = match violation.severity {
            Severity::Error => "\x1b[31merror\x1b[0m",
            Severity::Warning => "\x1b[33mwarning\x1b[0m",
            Severity::Info => "\x1b[34minfo\x1b[0m",
        };

        println!(
            "{} {} at {}:{}:{}",
            violation.code,
            violation.rule,
            violation.location.file.display(),
            violation.location.line,
            violation.location.column,
        );
        println!("  {}: {}", severity_indicator, violation.message);
        if let Some(suggestion) = &violation.suggestion {
            let fixable = if suggestion.edit.is_some() {
                " (fixable)"
            } else {
                ""
            };
            println!("  = help: {}{}", suggestion.message, fixable);
        }
        println!();
    }

    print_failures(result);

    let summary_color = if errors > 0 || result.has_failures() {
        "\x1b[31m"
    } else if warnings > 0 {
        "\x1b[33m"
    } else {
        "\x1b[32m"
    };

    println!(
        "{}Found {} error(s), {} warning(s), {} info(s) in {} file(s)\x1b[0m",
        summary_color, errors, warnings, infos, result.files_checked
    );

    let fixable = result.fixable_count();
    if fixable > 0 {
        println!("{fixable} violation(s) can be fixed with --fix");
    }
}

fn print_failures(result: &LintResult) {
    for failure in &result.failures {
        println!("\x1b[31mfailed\x1b[0m {failure}");
    }
    if result.has_failures() {
        println!();
    }
}

fn print_json(result: &LintResult) -> Result<()> {
    let json = serde_json::to_string_pretty(result)?;
    println!("{json}");
    Ok(())
}

fn print_compact(result: &LintResult) {
    for violation in &result.violations {
        println!("{violation}");
    }
    for failure in &result.failures {
        println!("{failure}");
    }
}

fn print_pretty(result: &LintResult, base: &Path) {
    for violation in &result.violations {
        let file = &violation.location.file;
        let report = Report::new(ViolationDiagnostic::from(violation));
        match std::fs::read_to_string(base.join(file)) {
            Ok(content) => {
                let named = NamedSource::new(file.display().to_string(), content);
                println!("{:?}", report.with_source_code(named));
            }
            Err(e) => {
                tracing::debug!("No source for {}: {}", file.display(), e);
                println!("{}\n{:?}", violation, report);
            }
        }
    }

    print_failures(result);

    let (errors, warnings, infos) = result.count_by_severity();
    println!(
        "Found {} error(s), {} warning(s), {} info(s) in {} file(s)",
        errors, warnings, infos, result.files_checked
    );
}
