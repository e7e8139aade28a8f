//! Classifies module specifiers as boundary-crossing.
//!
//! A specifier is split into path segments on `/` (and `\`). A segment
//! after the first one that starts with the internal prefix names an
//! internal module. The first segment is never considered, so scoped
//! package names such as `@scope/pkg` are not internal.

use super::collector::DeclarationKind;

/// Default marker for internal module directories.
pub const DEFAULT_PREFIX: &str = "@";

/// Matches specifiers against the import and export boundary rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternMatcher {
    prefix: String,
}

impl Default for PatternMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX)
    }
}

impl PatternMatcher {
    /// Creates a matcher for directories starting with `prefix`.
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// The internal directory prefix.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns true if `specifier` violates the boundary rule for `kind`.
    ///
    /// Exports are banned whenever they reach an internal segment. Imports
    /// are banned likewise, except for `./@x`, `../@x`, `../../@x` and so
    /// on: ascension segments followed by exactly one internal segment.
    #[must_use]
    pub fn matches(&self, kind: DeclarationKind, specifier: &str) -> bool {
        if !self.has_internal_segment(specifier) {
            return false;
        }
        match kind {
            DeclarationKind::Export => true,
            DeclarationKind::Import => !self.is_parent_chain_import(specifier),
        }
    }

    fn is_internal(&self, segment: &str) -> bool {
        !self.prefix.is_empty() && segment.starts_with(self.prefix.as_str())
    }

    fn has_internal_segment(&self, specifier: &str) -> bool {
        segments(specifier).skip(1).any(|s| self.is_internal(s))
    }

    fn is_parent_chain_import(&self, specifier: &str) -> bool {
        let parts: Vec<&str> = segments(specifier).collect();
        let Some((last, ascension)) = parts.split_last() else {
            return false;
        };
        !ascension.is_empty()
            && ascension.iter().all(|s| matches!(*s, "." | ".."))
            && self.is_internal(last)
    }
}

fn segments(specifier: &str) -> impl Iterator<Item = &str> {
    specifier.split(['/', '\\'])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn import(specifier: &str) -> bool {
        PatternMatcher::default().matches(DeclarationKind::Import, specifier)
    }

    fn export(specifier: &str) -> bool {
        PatternMatcher::default().matches(DeclarationKind::Export, specifier)
    }

    #[test]
    fn plain_specifiers_never_match() {
        for specifier in ["./a", "../b/c", "react", "lodash/fp", "", "./"] {
            assert!(!import(specifier), "{specifier}");
            assert!(!export(specifier), "{specifier}");
        }
    }

    #[test]
    fn scoped_packages_are_not_internal() {
        assert!(!import("@angular/core"));
        assert!(!export("@angular/core"));
        assert!(!export("@scope/pkg/sub"));
    }

    #[test]
    fn parent_chain_imports_are_exempt() {
        assert!(!import("./@internal"));
        assert!(!import("../@internal"));
        assert!(!import("../../@internal"));
        assert!(!import("./../@internal"));
    }

    #[test]
    fn deeper_imports_are_banned() {
        assert!(import("../@internal/deep"));
        assert!(import("../@a/@b"));
        assert!(import("../@internal/"));
        assert!(import("../sibling/@internal"));
        assert!(import("pkg/@internal"));
        assert!(import("@scope/pkg/@internal"));
    }

    #[test]
    fn exports_have_no_exemption() {
        assert!(export("./@secret"));
        assert!(export("../@secret"));
        assert!(export("../../x/@secret/y"));
    }

    #[test]
    fn windows_separators() {
        assert!(export(".\\@secret"));
        assert!(!import("..\\@secret"));
        assert!(import("..\\@secret\\deep"));
    }

    #[test]
    fn custom_prefix() {
        let matcher = PatternMatcher::new("_");
        assert!(matcher.matches(DeclarationKind::Export, "./_private"));
        assert!(!matcher.matches(DeclarationKind::Export, "./@public"));
        assert!(!matcher.matches(DeclarationKind::Import, "../_private"));
    }

    #[test]
    fn empty_prefix_matches_nothing() {
        let matcher = PatternMatcher::new("");
        assert!(!matcher.matches(DeclarationKind::Export, "./a/b"));
    }
}
