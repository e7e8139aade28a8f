//! Flags imports and re-exports that reach into internal modules.

use scoped_lint_core::Edit;

use super::collector::{Declaration, DeclarationKind};
use super::pattern::PatternMatcher;
use super::reporter::{Anchor, Diagnostic};

/// Message for an import of an internal module.
#[must_use]
pub fn banned_import_message(prefix: &str) -> String {
    format!(
        "This module can not be imported, because it contains internal module with prefix '{prefix}' under a parallel directory."
    )
}

/// Message for a re-export of an internal module.
#[must_use]
pub fn banned_export_message(prefix: &str) -> String {
    format!(
        "This module can not be exported, because it contains internal module with prefix '{prefix}' under a parallel directory."
    )
}

/// One diagnostic per banned declaration, in declaration order.
///
/// Each diagnostic points at the whole statement and carries a fix deleting
/// it.
#[must_use]
pub fn validate(declarations: &[Declaration], matcher: &PatternMatcher) -> Vec<Diagnostic> {
    declarations
        .iter()
        .filter(|decl| matcher.matches(decl.kind, &decl.specifier))
        .map(|decl| {
            let message = match decl.kind {
                DeclarationKind::Import => banned_import_message(matcher.prefix()),
                DeclarationKind::Export => banned_export_message(matcher.prefix()),
            };
            Diagnostic {
                message,
                anchor: Anchor::Node(decl.statement),
                fix: Some(Edit::DeleteSpan {
                    start: decl.statement.start,
                    end: decl.statement.end,
                }),
            }
        })
        .collect()
}
