//! Turns rule diagnostics into host [`Violation`]s.

use scoped_lint_core::{
    Edit, ModuleContext, Severity, SourceModule, Suggestion, TextRange, Violation,
};

/// Where a diagnostic points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// A syntax node's source range.
    Node(TextRange),
    /// The whole module.
    Module,
}

/// A finding produced by one of the validators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Message shown to the user.
    pub message: String,
    /// What the diagnostic is reported against.
    pub anchor: Anchor,
    /// Proposed fix, applied only on request.
    pub fix: Option<Edit>,
}

/// Forwards diagnostics to the host in the order they were produced.
#[derive(Debug, Clone, Copy)]
pub struct Reporter {
    /// Rule code stamped on every violation.
    pub code: &'static str,
    /// Rule name stamped on every violation.
    pub rule: &'static str,
    /// Severity stamped on every violation.
    pub severity: Severity,
}

impl Reporter {
    /// Converts every diagnostic, without deduplicating or reordering.
    #[must_use]
    pub fn report(
        &self,
        ctx: &ModuleContext,
        module: &SourceModule,
        diagnostics: Vec<Diagnostic>,
    ) -> Vec<Violation> {
        diagnostics
            .into_iter()
            .map(|diagnostic| {
                let range = match diagnostic.anchor {
                    Anchor::Node(range) => range,
                    Anchor::Module => module.span(ctx.content.len()),
                };
                let violation = Violation::new(
                    self.code,
                    self.rule,
                    self.severity,
                    ctx.location(range),
                    diagnostic.message,
                );
                match diagnostic.fix {
                    Some(edit) => {
                        violation.with_suggestion(Suggestion::with_fix(fix_help(&edit), edit))
                    }
                    None => violation,
                }
            })
            .collect()
    }
}

fn fix_help(edit: &Edit) -> String {
    match edit {
        Edit::DeleteSpan { .. } => "Remove this statement".to_string(),
        Edit::ReplaceModule { .. } => "Re-export the missing modules".to_string(),
    }
}
