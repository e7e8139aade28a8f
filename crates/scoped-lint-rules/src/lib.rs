//! # scoped-lint-rules
//!
//! Built-in lint rules for scoped-lint.
//!
//! ## Available Rules
//!
//! | Code | Name | Description |
//! |------|------|-------------|
//! | SM001 | `scoped-modules` | Forbids reaching into `@` internal modules and requires complete index barrels |
//!
//! ## Usage
//!
//! ```ignore
//! use scoped_lint_core::Analyzer;
//! use scoped_lint_rules::ScopedModules;
//! use scoped_lint_ts::TypeScriptParser;
//!
//! let analyzer = Analyzer::builder()
//!     .root("./src")
//!     .parser(TypeScriptParser::new())
//!     .rule(ScopedModules::new())
//!     .build()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod registry;
pub mod scoped_modules;

pub use registry::{all_rules, configured_rules};
pub use scoped_modules::ScopedModules;

/// Re-export core types for convenience.
pub use scoped_lint_core::{Rule, Severity, Violation};
