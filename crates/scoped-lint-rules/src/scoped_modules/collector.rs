//! Collects import and re-export declarations of a module.

use scoped_lint_core::{SourceModule, StatementKind, TextRange};

/// Which boundary rule a declaration is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationKind {
    /// `import ... from '<specifier>'`
    Import,
    /// `export ... from '<specifier>'`
    Export,
}

/// A top-level declaration that references another module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// Import or re-export.
    pub kind: DeclarationKind,
    /// Module specifier with its quotes removed.
    pub specifier: String,
    /// Range of the specifier literal.
    pub literal: TextRange,
    /// Range of the whole statement owning the literal.
    pub statement: TextRange,
}

/// Returns the module's declarations in source order.
///
/// Exports without a `from` clause are skipped.
#[must_use]
pub fn collect(module: &SourceModule) -> Vec<Declaration> {
    module
        .statements
        .iter()
        .filter_map(|statement| {
            let kind = match statement.kind {
                StatementKind::Import => DeclarationKind::Import,
                StatementKind::Export => DeclarationKind::Export,
                StatementKind::Other => return None,
            };
            let literal = statement.specifier.as_ref()?;
            Some(Declaration {
                kind,
                specifier: unquote(&literal.raw).to_owned(),
                literal: literal.range,
                statement: statement.range,
            })
        })
        .collect()
}

/// Strips matching single or double quotes.
///
/// Anything that is not a quoted literal yields an empty string.
#[must_use]
pub fn unquote(raw: &str) -> &str {
    for quote in ['\'', '"'] {
        if let Some(inner) = raw
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    ""
}
