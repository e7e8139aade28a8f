//! Checks that index modules re-export every sibling module.
//!
//! The expected set is built from a fresh listing of the index module's
//! directory:
//!
//! - files with a source extension, except index files, become `./<stem>`
//! - directories with an index file at their top level become `./<name>`
//! - ids the export rule would ban are dropped
//!
//! Everything else is ignored: files whose extension is not in the
//! configured list (`.json`, `.css`, ...), symlinks and devices. The default
//! list is every extension the TypeScript parser handles.

use std::collections::HashSet;
use std::path::Path;

use scoped_lint_core::{DirectoryError, DirectoryReader, Edit};
use tracing::debug;

use super::collector::{Declaration, DeclarationKind};
use super::pattern::PatternMatcher;
use super::reporter::{Anchor, Diagnostic};

/// Message for an index module with missing re-exports.
pub const MISSING_EXPORTS_MESSAGE: &str = "Missing modules expected to be exported.";

/// Source extensions recognized by default.
pub const DEFAULT_EXTENSIONS: &[&str] = &["ts", "tsx", "mts", "cts", "js", "jsx", "mjs", "cjs"];

/// Validates index (barrel) modules against their directory.
#[derive(Debug, Clone, Copy)]
pub struct BarrelValidator<'a> {
    matcher: &'a PatternMatcher,
    extensions: &'a [String],
}

impl<'a> BarrelValidator<'a> {
    /// Creates a validator for the given extensions (without dots).
    #[must_use]
    pub fn new(matcher: &'a PatternMatcher, extensions: &'a [String]) -> Self {
        Self {
            matcher,
            extensions,
        }
    }

    fn has_extension(&self, ext: &str) -> bool {
        self.extensions.iter().any(|e| e == ext)
    }

    /// Returns true for `index.<ext>` and `index.d.<ext>`.
    #[must_use]
    pub fn is_index_file(&self, name: &str) -> bool {
        let Some(rest) = name.strip_prefix("index.") else {
            return false;
        };
        self.has_extension(rest) || rest.strip_prefix("d.").is_some_and(|e| self.has_extension(e))
    }

    /// Module id of a file: `./` plus the name without its source extension.
    ///
    /// Extensions compare case-insensitively. Returns `None` for files
    /// without a recognized extension.
    #[must_use]
    pub fn module_id(&self, name: &str) -> Option<String> {
        let lower = name.to_ascii_lowercase();
        let suffixes = self
            .extensions
            .iter()
            .map(|ext| format!(".d.{}", ext.to_ascii_lowercase()))
            .chain(
                self.extensions
                    .iter()
                    .map(|ext| format!(".{}", ext.to_ascii_lowercase())),
            );

        for suffix in suffixes {
            if lower.len() > suffix.len() && lower.ends_with(&suffix) {
                return Some(format!("./{}", &name[..name.len() - suffix.len()]));
            }
        }
        None
    }

    /// Expected re-exports of the index module living in `dir`, in listing
    /// order without duplicates.
    ///
    /// # Errors
    ///
    /// Returns an error if `dir` or a candidate subdirectory cannot be listed.
    pub fn expected_exports(
        &self,
        dir: &Path,
        fs: &dyn DirectoryReader,
    ) -> Result<Vec<String>, DirectoryError> {
        let mut expected: Vec<String> = Vec::new();

        for entry in fs.list(dir)? {
            let id = if entry.is_file {
                if self.is_index_file(&entry.name) {
                    continue;
                }
                match self.module_id(&entry.name) {
                    Some(id) => id,
                    None => continue,
                }
            } else if entry.is_directory {
                format!("./{}", entry.name)
            } else {
                continue;
            };

            if self.matcher.matches(DeclarationKind::Export, &id) {
                debug!("Not expecting internal module {}", id);
                continue;
            }

            if entry.is_directory && !self.contains_index(&dir.join(&entry.name), fs)? {
                continue;
            }

            if !expected.contains(&id) {
                expected.push(id);
            }
        }

        Ok(expected)
    }

    fn contains_index(&self, dir: &Path, fs: &dyn DirectoryReader) -> Result<bool, DirectoryError> {
        Ok(fs
            .list(dir)?
            .iter()
            .any(|entry| entry.is_file && self.is_index_file(&entry.name)))
    }

    /// Checks the index module in `dir` whose text is `source`.
    ///
    /// Returns at most one diagnostic, anchored at the whole module, whose fix
    /// appends `export * from '<id>';` for each missing id.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory listing fails.
    pub fn validate(
        &self,
        dir: &Path,
        source: &str,
        declarations: &[Declaration],
        fs: &dyn DirectoryReader,
    ) -> Result<Option<Diagnostic>, DirectoryError> {
        let actual: HashSet<&str> = declarations
            .iter()
            .filter(|decl| decl.kind == DeclarationKind::Export)
            .map(|decl| decl.specifier.as_str())
            .collect();

        let missing: Vec<String> = self
            .expected_exports(dir, fs)?
            .into_iter()
            .filter(|id| !actual.contains(id.as_str()))
            .collect();

        if missing.is_empty() {
            return Ok(None);
        }

        debug!("{} missing re-export(s) in {}", missing.len(), dir.display());
        Ok(Some(Diagnostic {
            message: MISSING_EXPORTS_MESSAGE.to_string(),
            anchor: Anchor::Module,
            fix: Some(Edit::ReplaceModule {
                text: append_reexports(source, &missing),
            }),
        }))
    }
}

/// The source right-trimmed, followed by one re-export line per id.
#[must_use]
pub fn append_reexports(source: &str, ids: &[String]) -> String {
    let mut lines: Vec<String> = Vec::with_capacity(ids.len() + 1);
    let kept = source.trim_end();
    if !kept.is_empty() {
        lines.push(kept.to_string());
    }
    lines.extend(ids.iter().map(|id| format!("export * from '{id}';")));

    let mut text = lines.join("\n");
    text.push('\n');
    text
}
