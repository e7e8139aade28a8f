//! # scoped-lint-core
//!
//! Core framework for module-boundary linting of JavaScript/TypeScript
//! projects.
//!
//! This crate provides the foundational traits and types for building
//! structure-aware linters. It includes:
//!
//! - [`ModuleParser`] for turning source text into a [`SourceModule`]
//! - [`Rule`] trait for per-module rules
//! - [`DirectoryReader`] for rules that inspect the directory layout
//! - [`Analyzer`] for orchestrating lint execution and fixes
//! - [`Violation`] and [`Edit`] for representing findings and their fixes
//!
//! ## Example
//!
//! ```ignore
//! use scoped_lint_core::Analyzer;
//!
//! let analyzer = Analyzer::builder()
//!     .root("./src")
//!     .parser(TypeScriptParser::new())
//!     .rule(MyRule::new())
//!     .build()?;
//!
//! let result = analyzer.analyze()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod config;
mod context;
mod rule;
mod syntax;
mod types;

pub mod allowance;
pub mod fixer;
pub mod fs;

pub use allowance::{check_allow_with_reason, check_module_allow, AllowCheck};
pub use analyzer::{
    Analyzer, AnalyzerBuilder, AnalyzerError, FixReport, ModuleReport, MAX_FIX_PASSES,
};
pub use config::{AnalyzerConfig, Config, ConfigError, RuleConfig};
pub use context::ModuleContext;
pub use fs::{DirectoryEntry, DirectoryError, DirectoryReader, OsDirectoryReader};
pub use rule::{Rule, RuleBox, RuleError};
pub use syntax::{
    ModuleParser, ParseError, ParserBox, SourceModule, SpecifierNode, Statement, StatementKind,
    TextRange,
};
pub use types::{
    Edit, LintResult, Location, ModuleFailure, Severity, Suggestion, Violation,
    ViolationDiagnostic,
};
