//! Core analyzer for orchestrating lint execution.

use crate::allowance::{check_allow_with_reason, check_module_allow};
use crate::config::Config;
use crate::context::ModuleContext;
use crate::fixer::{apply_edits, FixError};
use crate::fs::{DirectoryReader, OsDirectoryReader};
use crate::rule::{Rule, RuleBox};
use crate::syntax::{ModuleParser, ParserBox};
use crate::types::{LintResult, ModuleFailure, Violation};

use rayon::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Upper bound on check/fix rounds per file.
pub const MAX_FIX_PASSES: usize = 10;

/// Errors that can occur during analysis.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// IO error outside module files (e.g. resolving the current directory).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing a source file.
    #[error("Parse error in {path}: {message}")]
    Parse {
        /// Path to the file that failed to parse.
        path: PathBuf,
        /// Parse error message.
        message: String,
    },

    /// Glob pattern error.
    #[error("Invalid glob pattern: {0}")]
    Glob(#[from] glob::PatternError),

    /// Directory walk error.
    #[error("File discovery failed: {0}")]
    Walk(#[from] ignore::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// A module file could not be read or written.
    #[error("Failed to access {path}: {source}")]
    File {
        /// File being read or written.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Worker pool could not be created.
    #[error("Failed to start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// No parser was registered.
    #[error("No module parser registered")]
    NoParser,

    /// A fix could not be applied.
    #[error("Cannot fix {path}: {source}")]
    Fix {
        /// File being fixed.
        path: PathBuf,
        /// Underlying fixer error.
        source: FixError,
    },
}

/// Violations and failures for a single module.
#[derive(Debug, Default)]
pub struct ModuleReport {
    /// Violations in rule registration order, each rule's in emission order.
    pub violations: Vec<Violation>,
    /// Rules that could not finish on this module.
    pub failures: Vec<ModuleFailure>,
}

/// Summary of an [`Analyzer::fix`] run.
#[derive(Debug, Default, Clone)]
pub struct FixReport {
    /// Files rewritten at least once.
    pub files_fixed: usize,
    /// Total edits applied across all passes.
    pub edits_applied: usize,
    /// Files that could not be read or written back.
    pub failures: Vec<ModuleFailure>,
}

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    root: Option<PathBuf>,
    rules: Vec<RuleBox>,
    parsers: Vec<ParserBox>,
    reader: Option<Box<dyn DirectoryReader>>,
    exclude_patterns: Vec<String>,
    config: Option<Config>,
    fail_on_parse_error: Option<bool>,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the root directory to analyze.
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Adds a per-module rule to the analyzer.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds a boxed per-module rule to the analyzer.
    #[must_use]
    pub fn rule_box(mut self, rule: RuleBox) -> Self {
        self.rules.push(rule);
        self
    }

    /// Registers a parser front end.
    #[must_use]
    pub fn parser<P: ModuleParser + 'static>(mut self, parser: P) -> Self {
        self.parsers.push(Box::new(parser));
        self
    }

    /// Replaces the OS directory reader (mainly for tests).
    #[must_use]
    pub fn directory_reader<D: DirectoryReader + 'static>(mut self, reader: D) -> Self {
        self.reader = Some(Box::new(reader));
        self
    }

    /// Adds an exclude glob pattern.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// Adds multiple exclude glob patterns.
    #[must_use]
    pub fn excludes<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_patterns
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets whether to fail on parse errors (default: from config, else false).
    #[must_use]
    pub fn fail_on_parse_error(mut self, fail: bool) -> Self {
        self.fail_on_parse_error = Some(fail);
        self
    }

    /// Builds the analyzer.
    ///
    /// # Errors
    ///
    /// Returns an error if no parser is registered, an exclude pattern is
    /// invalid, or the current directory cannot be resolved.
    pub fn build(self) -> Result<Analyzer, AnalyzerError> {
        if self.parsers.is_empty() {
            return Err(AnalyzerError::NoParser);
        }

        let config = self.config.unwrap_or_default();

        let root = self
            .root
            .unwrap_or_else(|| config.analyzer.root.clone());
        let root = if root.is_absolute() {
            root
        } else {
            std::env::current_dir()?.join(&root)
        };
        let base = match root.parent() {
            Some(parent) if root.is_file() => parent.to_path_buf(),
            _ => root.clone(),
        };

        let mut raw_patterns = self.exclude_patterns;
        raw_patterns.extend(config.analyzer.exclude.iter().cloned());

        let exclude_patterns = raw_patterns
            .into_iter()
            .map(|raw| glob::Pattern::new(&raw).map(|pattern| (raw, pattern)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Analyzer {
            root,
            base,
            rules: self.rules,
            parsers: self.parsers,
            reader: self.reader.unwrap_or_else(|| Box::new(OsDirectoryReader)),
            exclude_patterns,
            fail_on_parse_error: self
                .fail_on_parse_error
                .unwrap_or(config.analyzer.fail_on_parse_error),
            config,
        })
    }
}

/// The main analyzer that orchestrates lint execution.
///
/// Use [`Analyzer::builder()`] to construct an instance.
pub struct Analyzer {
    root: PathBuf,
    base: PathBuf,
    rules: Vec<RuleBox>,
    parsers: Vec<ParserBox>,
    reader: Box<dyn DirectoryReader>,
    exclude_patterns: Vec<(String, glob::Pattern)>,
    config: Config,
    fail_on_parse_error: bool,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the root being analyzed (a directory or a single file).
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory that reported paths are relative to.
    ///
    /// This is the root itself, or its parent when the root is a file.
    #[must_use]
    pub fn base_dir(&self) -> &Path {
        &self.base
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Analyzes all files and returns the results.
    ///
    /// Modules are analyzed independently and in parallel. A module whose
    /// rules fail is recorded in [`LintResult::failures`] and the run
    /// continues.
    ///
    /// # Errors
    ///
    /// Returns an error if file discovery fails, or a file fails to parse
    /// while `fail_on_parse_error` is set.
    pub fn analyze(&self) -> Result<LintResult, AnalyzerError> {
        info!("Starting analysis at {:?}", self.root);

        let files = self.discover_files()?;
        info!("Found {} files to analyze", files.len());

        let outcomes: Vec<Result<ModuleReport, AnalyzerError>> =
            self.in_pool(|| files.par_iter().map(|f| self.check_file(f)).collect())?;

        let mut result = LintResult::new();
        for outcome in outcomes {
            match outcome {
                Ok(report) => {
                    result.violations.extend(report.violations);
                    result.failures.extend(report.failures);
                    result.files_checked += 1;
                }
                Err(AnalyzerError::Parse { path, message }) => {
                    warn!("Failed to parse {}: {}", path.display(), message);
                    if self.fail_on_parse_error {
                        return Err(AnalyzerError::Parse { path, message });
                    }
                }
                Err(AnalyzerError::File { path, source }) => {
                    warn!("Failed to read {}: {}", path.display(), source);
                    result.failures.push(self.file_failure(&path, &source));
                }
                Err(e) => return Err(e),
            }
        }

        info!(
            "Analysis complete: {} violations, {} failures in {} files",
            result.violations.len(),
            result.failures.len(),
            result.files_checked
        );

        Ok(result)
    }

    /// Checks a single module file.
    ///
    /// The file is read from disk on every call.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, has no parser, or fails
    /// to parse.
    pub fn check_file(&self, path: &Path) -> Result<ModuleReport, AnalyzerError> {
        debug!("Analyzing: {}", path.display());

        let content = read_module(path)?;
        self.check_source(path, &content)
    }

    fn check_source(&self, path: &Path, content: &str) -> Result<ModuleReport, AnalyzerError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        let parser = self.parser_for(path).ok_or_else(|| AnalyzerError::Parse {
            path: path.to_path_buf(),
            message: format!("no parser for extension {extension:?}"),
        })?;

        let module = parser
            .parse(content, extension)
            .map_err(|e| AnalyzerError::Parse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        if module.has_errors {
            debug!("{} parsed with recovered syntax errors", path.display());
        }

        let ctx = ModuleContext::new(path, content, &self.base);
        let mut report = ModuleReport::default();

        for rule in &self.rules {
            if !self.config.is_rule_enabled(rule.name()) {
                debug!("Skipping disabled rule: {}", rule.name());
                continue;
            }

            match rule.check(&ctx, &module, self.reader.as_ref()) {
                Ok(violations) => {
                    report
                        .violations
                        .extend(self.finish_violations(rule.as_ref(), &ctx, violations));
                }
                Err(err) => {
                    warn!(
                        "Rule {} failed on {}: {}",
                        rule.name(),
                        path.display(),
                        err.message
                    );
                    report
                        .violations
                        .extend(self.finish_violations(rule.as_ref(), &ctx, err.violations));
                    report.failures.push(ModuleFailure {
                        file: ctx.relative_path.clone(),
                        rule: Some(rule.name().to_string()),
                        message: err.message,
                    });
                }
            }
        }

        Ok(report)
    }

    /// Applies automatic fixes to every discovered file.
    ///
    /// Files are processed one at a time. Each file is checked, the
    /// non-overlapping edits of that pass are applied and written back, and
    /// the file is checked again, until no edit applies or
    /// [`MAX_FIX_PASSES`] is reached. A file that cannot be read or written
    /// is recorded in [`FixReport::failures`] and the run continues.
    ///
    /// # Errors
    ///
    /// Returns an error if discovery fails or an edit is malformed.
    pub fn fix(&self) -> Result<FixReport, AnalyzerError> {
        let files = self.discover_files()?;
        let mut summary = FixReport::default();

        for path in &files {
            match self.fix_file(path) {
                Ok(0) => {}
                Ok(applied) => {
                    info!("Applied {} fix(es) to {}", applied, path.display());
                    summary.files_fixed += 1;
                    summary.edits_applied += applied;
                }
                Err(AnalyzerError::Parse { path, message }) => {
                    warn!("Failed to parse {}: {}", path.display(), message);
                    if self.fail_on_parse_error {
                        return Err(AnalyzerError::Parse { path, message });
                    }
                }
                Err(AnalyzerError::File { path, source }) => {
                    warn!("Cannot fix {}: {}", path.display(), source);
                    summary.failures.push(self.file_failure(&path, &source));
                }
                Err(e) => return Err(e),
            }
        }

        Ok(summary)
    }

    /// Fixes one file, returning the number of edits applied.
    fn fix_file(&self, path: &Path) -> Result<usize, AnalyzerError> {
        let mut content = read_module(path)?;
        let mut applied = 0;

        for pass in 1..=MAX_FIX_PASSES {
            let report = self.check_source(path, &content)?;
            let edits: Vec<_> = report.violations.iter().filter_map(Violation::edit).collect();
            if edits.is_empty() {
                break;
            }

            let outcome = apply_edits(&content, &edits).map_err(|source| AnalyzerError::Fix {
                path: path.to_path_buf(),
                source,
            })?;
            if outcome.applied == 0 || outcome.text == content {
                break;
            }

            debug!(
                "Fix pass {} on {}: {} applied, {} deferred",
                pass,
                path.display(),
                outcome.applied,
                outcome.deferred
            );
            std::fs::write(path, &outcome.text).map_err(|source| AnalyzerError::File {
                path: path.to_path_buf(),
                source,
            })?;
            content = outcome.text;
            applied += outcome.applied;
        }

        Ok(applied)
    }

    /// Applies severity overrides and suppression comments.
    ///
    /// A violation spanning the whole module is only suppressed by an
    /// `allow-module` directive; line directives apply to the rest.
    fn finish_violations(
        &self,
        rule: &dyn Rule,
        ctx: &ModuleContext,
        violations: Vec<Violation>,
    ) -> Vec<Violation> {
        let severity = self.config.rule_severity(rule.name());
        let module_allow = check_module_allow(ctx.content, rule.name());
        violations
            .into_iter()
            .filter(|v| {
                let module_wide =
                    v.location.offset == 0 && v.location.length == ctx.content.len();
                let allowed = if module_wide || module_allow.is_allowed() {
                    module_allow.clone()
                } else {
                    check_allow_with_reason(ctx.content, v.location.line, rule.name())
                };
                if allowed.is_allowed() {
                    debug!(
                        "Suppressed {} at {}:{} ({})",
                        rule.name(),
                        v.location.file.display(),
                        v.location.line,
                        allowed.reason().unwrap_or("no reason given")
                    );
                }
                !allowed.is_allowed()
            })
            .map(|mut v| {
                if let Some(severity) = severity {
                    v.severity = severity;
                }
                v
            })
            .collect()
    }

    /// Runs `op` inside a bounded pool when `parallelism` is configured.
    fn in_pool<T, F>(&self, op: F) -> Result<T, AnalyzerError>
    where
        T: Send,
        F: FnOnce() -> T + Send,
    {
        match self.config.analyzer.parallelism {
            Some(threads) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()?;
                Ok(pool.install(op))
            }
            None => Ok(op()),
        }
    }

    fn parser_for(&self, path: &Path) -> Option<&dyn ModuleParser> {
        let ext = path.extension()?.to_str()?;
        self.parsers
            .iter()
            .find(|p| p.extensions().contains(&ext))
            .map(AsRef::as_ref)
    }

    fn relative(&self, path: &Path) -> PathBuf {
        ModuleContext::new(path, "", &self.base).relative_path
    }

    fn file_failure(&self, path: &Path, error: &std::io::Error) -> ModuleFailure {
        ModuleFailure {
            file: self.relative(path),
            rule: None,
            message: error.to_string(),
        }
    }

    /// Discovers all source files handled by a registered parser.
    fn discover_files(&self) -> Result<Vec<PathBuf>, AnalyzerError> {
        let walker = ignore::WalkBuilder::new(&self.root)
            .standard_filters(self.config.analyzer.respect_gitignore)
            .build();

        let mut files = Vec::new();
        for entry in walker {
            let entry = entry?;
            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }

            let path = entry.path();
            if self.parser_for(path).is_none() {
                continue;
            }

            if self.should_exclude(path) {
                debug!("Excluding: {}", path.display());
                continue;
            }

            files.push(path.to_path_buf());
        }

        files.sort();
        Ok(files)
    }

    /// Checks if a path should be excluded.
    fn should_exclude(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();
        let relative = self.relative(path);

        for (raw, pattern) in &self.exclude_patterns {
            if pattern.matches_path(path) || pattern.matches_path(&relative) {
                return true;
            }

            // Also check as substring for patterns like "**/node_modules/**"
            let normalized_pattern = raw.replace("**", "");
            if !normalized_pattern.is_empty()
                && normalized_pattern != "/"
                && path_str.contains(&normalized_pattern)
            {
                return true;
            }
        }

        false
    }
}

fn read_module(path: &Path) -> Result<String, AnalyzerError> {
    std::fs::read_to_string(path).map_err(|source| AnalyzerError::File {
        path: path.to_path_buf(),
        source,
    })
}
