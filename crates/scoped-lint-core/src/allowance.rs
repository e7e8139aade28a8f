//! Comment-based allowance directives.
//!
//! Supports directives like:
//! ```text
//! // scoped-lint: allow(scoped-modules) reason="generated barrel"
//! /* scoped-lint: allow(all) */
//! ```
//!
//! An `allow(...)` directive applies to its own line and to the line after
//! it. Diagnostics about the module as a whole (such as a missing barrel
//! export) are only suppressed by `allow-module(...)`, which may appear on
//! any line and covers every diagnostic of the named rules in the file:
//! ```text
//! // scoped-lint: allow-module(scoped-modules) reason="hand-written barrel"
//! ```

use std::collections::HashSet;

/// Comment marker introducing a directive.
const DIRECTIVE_PREFIX: &str = "scoped-lint:";

/// Result of checking for allow directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowCheck {
    /// Rule is not allowed.
    Denied,
    /// Rule is allowed with optional reason.
    Allowed {
        /// The reason provided (if any).
        reason: Option<String>,
    },
}

impl AllowCheck {
    /// Returns true if allowed.
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed { .. })
    }

    /// Returns the reason if allowed.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Allowed { reason } => reason.as_deref(),
            Self::Denied => None,
        }
    }
}

/// Reach of an allowance directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveScope {
    /// `allow(...)`: its own line and the next one.
    Line,
    /// `allow-module(...)`: the whole file.
    Module,
}

/// Parsed allowance directive.
#[derive(Debug, Clone)]
pub struct AllowDirective {
    /// Reach of the directive.
    pub scope: DirectiveScope,
    /// Rule names that are allowed.
    pub rules: HashSet<String>,
    /// Optional reason for the allowance.
    pub reason: Option<String>,
}

/// Checks source code for allowance comments.
///
/// # Arguments
///
/// * `content` - Source code content
/// * `line` - Line number to check (1-indexed)
/// * `rule_name` - Name of the rule to check for
///
/// # Returns
///
/// `AllowCheck::Allowed` with optional reason if a directive on `line` or
/// the line before names the rule (or `all`).
#[must_use]
pub fn check_allow_with_reason(content: &str, line: usize, rule_name: &str) -> AllowCheck {
    let lines: Vec<&str> = content.lines().collect();

    for check_line in [line.saturating_sub(1), line] {
        if check_line == 0 || check_line > lines.len() {
            continue;
        }

        if let Some(directive) = parse_allow_directive(lines[check_line - 1]) {
            if directive.scope == DirectiveScope::Line && directive.names(rule_name) {
                return AllowCheck::Allowed {
                    reason: directive.reason,
                };
            }
        }
    }

    AllowCheck::Denied
}

/// Checks the whole file for an `allow-module` directive naming the rule.
#[must_use]
pub fn check_module_allow(content: &str, rule_name: &str) -> AllowCheck {
    content
        .lines()
        .filter_map(parse_allow_directive)
        .find(|d| d.scope == DirectiveScope::Module && d.names(rule_name))
        .map_or(AllowCheck::Denied, |d| AllowCheck::Allowed { reason: d.reason })
}

impl AllowDirective {
    fn names(&self, rule_name: &str) -> bool {
        self.rules.contains(rule_name) || self.rules.contains("all")
    }
}

/// Parses an allowance directive from a comment on a line.
///
/// The comment may trail code (`import x from './@a'; // scoped-lint: ...`).
fn parse_allow_directive(line: &str) -> Option<AllowDirective> {
    let comment_content = if let Some(idx) = line.find("//") {
        line[idx + 2..].trim()
    } else if let Some(idx) = line.find("/*") {
        let rest = &line[idx + 2..];
        rest.split("*/").next().unwrap_or(rest).trim()
    } else {
        return None;
    };

    let directive = comment_content.strip_prefix(DIRECTIVE_PREFIX)?.trim();
    let (scope, allow_content) = if let Some(rest) = directive.strip_prefix("allow-module(") {
        (DirectiveScope::Module, rest.trim())
    } else {
        (DirectiveScope::Line, directive.strip_prefix("allow(")?.trim())
    };

    let paren_end = allow_content.find(')')?;
    let rules: HashSet<String> = allow_content[..paren_end]
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    if rules.is_empty() {
        return None;
    }

    let rest = allow_content[paren_end + 1..].trim();
    let reason = rest.strip_prefix("reason=").and_then(|reason_part| {
        let quoted = reason_part.trim().strip_prefix('"')?;
        quoted.find('"').map(|end| quoted[..end].to_string())
    });

    Some(AllowDirective {
        scope,
        rules,
        reason,
    })
}
