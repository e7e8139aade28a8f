//! JavaScript/TypeScript module parser using Tree-sitter.

use scoped_lint_core::{
    ModuleParser, ParseError, SourceModule, SpecifierNode, Statement, StatementKind, TextRange,
};
use tracing::debug;
use tree_sitter::{Language, Node, Parser};

/// Parses JavaScript and TypeScript modules into top-level statements.
///
/// `.ts`, `.mts` and `.cts` files use the TypeScript grammar; every other
/// extension uses the TSX grammar so JSX in plain JavaScript parses too.
pub struct TypeScriptParser {
    typescript: Language,
    tsx: Language,
}

impl TypeScriptParser {
    /// Creates a new TypeScript parser.
    #[must_use]
    pub fn new() -> Self {
        Self {
            typescript: tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            tsx: tree_sitter_typescript::LANGUAGE_TSX.into(),
        }
    }

    fn language_for(&self, extension: &str) -> Option<&Language> {
        match extension {
            "ts" | "mts" | "cts" => Some(&self.typescript),
            "tsx" | "js" | "jsx" | "mjs" | "cjs" => Some(&self.tsx),
            _ => None,
        }
    }

    fn range(node: &Node<'_>) -> TextRange {
        TextRange::new(node.start_byte(), node.end_byte())
    }

    fn text<'a>(node: &Node<'_>, src: &'a str) -> &'a str {
        src.get(node.start_byte()..node.end_byte()).unwrap_or("")
    }

    /// The literal `source` field of an import or re-export.
    fn extract_specifier(node: &Node<'_>, src: &str) -> Option<SpecifierNode> {
        let source = node.child_by_field_name("source")?;
        Some(SpecifierNode {
            raw: Self::text(&source, src).to_owned(),
            range: Self::range(&source),
        })
    }
}

impl Default for TypeScriptParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ModuleParser for TypeScriptParser {
    fn language_id(&self) -> &'static str {
        "typescript"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["ts", "tsx", "mts", "cts", "js", "jsx", "mjs", "cjs"]
    }

    fn parse(&self, source: &str, extension: &str) -> Result<SourceModule, ParseError> {
        let language = self
            .language_for(extension)
            .ok_or_else(|| ParseError::UnsupportedExtension(extension.to_owned()))?;

        let mut parser = Parser::new();
        parser
            .set_language(language)
            .map_err(|e| ParseError::Language(e.to_string()))?;

        let tree = parser.parse(source, None).ok_or(ParseError::ParseFailed)?;
        let root = tree.root_node();

        let mut statements = Vec::new();
        let mut cursor = root.walk();
        for node in root.named_children(&mut cursor) {
            let kind = match node.kind() {
                "comment" | "hash_bang_line" => continue,
                "import_statement" => StatementKind::Import,
                "export_statement" => StatementKind::Export,
                _ => StatementKind::Other,
            };
            let specifier = match kind {
                StatementKind::Other => None,
                _ => Self::extract_specifier(&node, source),
            };
            statements.push(Statement {
                kind,
                range: Self::range(&node),
                specifier,
            });
        }

        let has_errors = root.has_error();
        debug!(
            "Parsed {} top-level statements (errors: {})",
            statements.len(),
            has_errors
        );

        Ok(SourceModule {
            statements,
            range: Some(TextRange::new(0, source.len())),
            has_errors,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(src: &str, ext: &str) -> SourceModule {
        TypeScriptParser::new().parse(src, ext).unwrap()
    }

    fn kinds(module: &SourceModule) -> Vec<StatementKind> {
        module.statements.iter().map(|s| s.kind).collect()
    }

    #[test]
    fn extracts_import_specifiers() {
        let src = "import a from '../@x/y';\nimport { b } from \"./b\";\nimport './side-effect';\n";
        let m = parse(src, "ts");

        assert_eq!(m.statements.len(), 3);
        let raws: Vec<_> = m
            .statements
            .iter()
            .map(|s| s.specifier.as_ref().unwrap().raw.as_str())
            .collect();
        assert_eq!(raws, vec!["'../@x/y'", "\"./b\"", "'./side-effect'"]);
    }

    #[test]
    fn statement_range_covers_whole_statement() {
        let src = "const x = 1;\nimport a from '../@x/y';\n";
        let m = parse(src, "ts");
        let import = &m.statements[1];

        assert_eq!(import.kind, StatementKind::Import);
        assert_eq!(import.range.slice(src), "import a from '../@x/y';");
        let specifier = import.specifier.as_ref().unwrap();
        assert_eq!(specifier.range.slice(src), "'../@x/y'");
    }

    #[test]
    fn classifies_exports() {
        let src = "export * from './a';\nexport { b } from './b';\nexport const c = 1;\nexport default c;\n";
        let m = parse(src, "ts");

        assert_eq!(kinds(&m), vec![StatementKind::Export; 4]);
        assert_eq!(m.statements[0].specifier.as_ref().unwrap().raw, "'./a'");
        assert_eq!(m.statements[1].specifier.as_ref().unwrap().raw, "'./b'");
        assert!(m.statements[2].specifier.is_none());
        assert!(m.statements[3].specifier.is_none());
    }

    #[test]
    fn comments_are_not_statements() {
        let m = parse("// header\n/* block */\nfunction f() {}\n", "js");
        assert_eq!(kinds(&m), vec![StatementKind::Other]);
    }

    #[test]
    fn type_only_import() {
        let m = parse("import type { T } from './@types';\n", "ts");
        assert_eq!(m.statements[0].kind, StatementKind::Import);
        assert_eq!(m.statements[0].specifier.as_ref().unwrap().raw, "'./@types'");
    }

    #[test]
    fn require_import_has_no_specifier() {
        let m = parse("import fs = require('fs');\n", "ts");
        assert_eq!(m.statements[0].kind, StatementKind::Import);
        assert!(m.statements[0].specifier.is_none());
    }

    #[test]
    fn jsx_in_javascript() {
        let m = parse(
            "import React from 'react';\nexport const App = () => <div />;\n",
            "jsx",
        );
        assert_eq!(kinds(&m), vec![StatementKind::Import, StatementKind::Export]);
        assert!(!m.has_errors);
    }

    #[test]
    fn recovers_from_syntax_errors() {
        let m = parse("import a from './a';\nconst = ;\n", "ts");
        assert!(m.has_errors);
        assert_eq!(m.statements[0].kind, StatementKind::Import);
    }

    #[test]
    fn module_span_is_whole_source() {
        let src = "\n\nexport * from './a';\n";
        let m = parse(src, "ts");
        assert_eq!(m.span(src.len()), TextRange::new(0, src.len()));
    }

    #[test]
    fn empty_source() {
        let m = parse("", "ts");
        assert!(m.statements.is_empty());
        assert!(!m.has_errors);
    }

    #[test]
    fn unsupported_extension() {
        let err = TypeScriptParser::new().parse("", "kt").unwrap_err();
        assert!(matches!(err, ParseError::UnsupportedExtension(ext) if ext == "kt"));
    }
}
