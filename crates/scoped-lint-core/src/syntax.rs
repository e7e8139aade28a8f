//! Language-agnostic module syntax consumed by rules.
//!
//! A [`ModuleParser`] turns raw source text into a [`SourceModule`]: the
//! ordered list of top-level statements, each tagged with its kind and byte
//! range, plus the module-specifier sub-node for statements that reference
//! another module. Rules never see the concrete parser's tree.

use std::ops::Range;
use thiserror::Error;

/// A half-open byte range in the module source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextRange {
    /// Start byte offset (inclusive).
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
}

impl TextRange {
    /// Creates a new range.
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Length of the range in bytes.
    #[must_use]
    pub fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Whether the range is empty.
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Text covered by this range, or `""` if it is out of bounds.
    #[must_use]
    pub fn slice(self, source: &str) -> &str {
        source.get(self.start..self.end).unwrap_or("")
    }
}

impl From<Range<usize>> for TextRange {
    fn from(range: Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

/// Kind of a top-level statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    /// `import ... from '...'` or `import '...'`
    Import,
    /// Any `export ...` statement, with or without a `from` clause.
    Export,
    /// Everything else.
    Other,
}

/// The literal module specifier of an import or re-export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecifierNode {
    /// Raw source text of the literal, quotes included (e.g. `'./foo'`).
    pub raw: String,
    /// Range of the literal.
    pub range: TextRange,
}

/// A top-level statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    /// Kind of statement.
    pub kind: StatementKind,
    /// Range of the whole statement (the specifier's parent node).
    pub range: TextRange,
    /// Module specifier, when the statement references another module.
    pub specifier: Option<SpecifierNode>,
}

/// A parsed module: the unit every rule analyzes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceModule {
    /// Top-level statements in source order.
    pub statements: Vec<Statement>,
    /// Span of the whole module.
    pub range: Option<TextRange>,
    /// Whether the parser had to recover from syntax errors.
    pub has_errors: bool,
}

impl SourceModule {
    /// Span of the whole module, defaulting to `0..source_len`.
    #[must_use]
    pub fn span(&self, source_len: usize) -> TextRange {
        self.range.unwrap_or(TextRange::new(0, source_len))
    }
}

/// Errors produced by a [`ModuleParser`].
#[derive(Debug, Error)]
pub enum ParseError {
    /// No grammar handles this file extension.
    #[error("unsupported file extension: {0}")]
    UnsupportedExtension(String),
    /// The grammar could not be loaded.
    #[error("language error: {0}")]
    Language(String),
    /// The parser produced no tree.
    #[error("parse failed")]
    ParseFailed,
}

/// Front end turning source text into a [`SourceModule`].
///
/// Implementations must be usable from several threads at once.
pub trait ModuleParser: Send + Sync {
    /// Language identifier (e.g., `"typescript"`).
    fn language_id(&self) -> &'static str;

    /// File extensions this parser handles, without the dot (e.g., `&["ts"]`).
    fn extensions(&self) -> &'static [&'static str];

    /// Parses one module.
    ///
    /// `extension` is the file extension without the dot; parsers serving
    /// several dialects use it to pick a grammar.
    ///
    /// # Errors
    ///
    /// Returns an error if the extension is unsupported or parsing fails.
    fn parse(&self, source: &str, extension: &str) -> Result<SourceModule, ParseError>;
}

/// Type alias for boxed parser trait objects.
pub type ParserBox = Box<dyn ModuleParser>;
