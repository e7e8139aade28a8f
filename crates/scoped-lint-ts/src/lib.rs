//! # scoped-lint-ts
//!
//! Tree-sitter based JavaScript/TypeScript front end for scoped-lint.
//!
//! [`TypeScriptParser`] implements [`scoped_lint_core::ModuleParser`] and
//! turns `.js`, `.jsx`, `.ts`, `.tsx` (and their `m`/`c` variants) into the
//! top-level statement model rules work on.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod typescript;

pub use typescript::TypeScriptParser;
