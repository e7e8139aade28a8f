//! Context types for rule execution.

use std::path::{Path, PathBuf};

use crate::syntax::TextRange;
use crate::types::Location;

/// Context provided to per-module rules.
///
/// Contains metadata about the module being analyzed that rules can use
/// to locate it on disk and to turn byte ranges into report locations.
#[derive(Debug, Clone)]
pub struct ModuleContext<'a> {
    /// Absolute path to the module file.
    pub path: &'a Path,
    /// Module source text.
    pub content: &'a str,
    /// Path relative to the project root.
    pub relative_path: PathBuf,
}

impl<'a> ModuleContext<'a> {
    /// Creates a new module context.
    ///
    /// `base` is the directory report paths are relative to. A module that
    /// is the base itself is reported by its file name.
    #[must_use]
    pub fn new(path: &'a Path, content: &'a str, base: &Path) -> Self {
        let relative_path = match path.strip_prefix(base) {
            Ok(rel) if !rel.as_os_str().is_empty() => rel.to_path_buf(),
            Ok(_) => path.file_name().map_or_else(|| path.to_path_buf(), PathBuf::from),
            Err(_) => path.to_path_buf(),
        };

        Self {
            path,
            content,
            relative_path,
        }
    }

    /// File name of the module (e.g. `index.ts`).
    #[must_use]
    pub fn file_name(&self) -> Option<&str> {
        self.path.file_name().and_then(|n| n.to_str())
    }

    /// Directory containing the module.
    #[must_use]
    pub fn directory(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    /// Calculates the 1-indexed line and column of a byte offset.
    ///
    /// Columns count bytes, matching the offsets parsers report.
    #[must_use]
    pub fn position_of(&self, offset: usize) -> (usize, usize) {
        let offset = offset.min(self.content.len());
        let before = &self.content.as_bytes()[..offset];
        let line = before.iter().filter(|&&b| b == b'\n').count() + 1;
        let line_start = before
            .iter()
            .rposition(|&b| b == b'\n')
            .map_or(0, |i| i + 1);
        (line, offset - line_start + 1)
    }

    /// Builds a report location for a byte range of this module.
    #[must_use]
    pub fn location(&self, range: TextRange) -> Location {
        let (line, column) = self.position_of(range.start);
        Location::new(self.relative_path.clone(), line, column).with_span(range.start, range.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx<'a>(path: &'a Path, content: &'a str) -> ModuleContext<'a> {
        ModuleContext::new(path, content, Path::new("/project"))
    }

    #[test]
    fn relative_path_is_stripped() {
        let c = ctx(Path::new("/project/src/foo/index.ts"), "");
        assert_eq!(c.relative_path, PathBuf::from("src/foo/index.ts"));
        assert_eq!(c.file_name(), Some("index.ts"));
        assert_eq!(c.directory(), Path::new("/project/src/foo"));
    }

    #[test]
    fn module_equal_to_base_uses_file_name() {
        let path = Path::new("/project/src/main.ts");
        let c = ModuleContext::new(path, "", path);
        assert_eq!(c.relative_path, PathBuf::from("main.ts"));
    }

    #[test]
    fn bare_file_name_lives_in_current_directory() {
        let c = ctx(Path::new("index.ts"), "");
        assert_eq!(c.directory(), Path::new("."));
    }

    #[test]
    fn position_round_trips_offsets() {
        let c = ctx(Path::new("test.ts"), "line1\nline2\r\nline3");
        assert_eq!(c.position_of(0), (1, 1));
        assert_eq!(c.position_of(8), (2, 3));
        assert_eq!(c.position_of(13), (3, 1));
        assert_eq!(c.position_of(999), (3, 6));
    }

    #[test]
    fn location_carries_span() {
        let content = "import a from './a';\nexport * from './@b';\n";
        let c = ctx(Path::new("/project/src/index.ts"), content);
        let loc = c.location(TextRange::new(21, 42));
        assert_eq!(loc.file, PathBuf::from("src/index.ts"));
        assert_eq!((loc.line, loc.column), (2, 1));
        assert_eq!((loc.offset, loc.length), (21, 21));
    }
}
