//! Source files and per-unit analysis contexts.

use std::path::{Path, PathBuf};
use tree_sitter::{Node, Tree};

/// A source file handed to the driver: its identifier and raw text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Path or identifier of the file.
    pub path: PathBuf,
    /// File contents.
    pub content: String,
}

impl SourceFile {
    /// Creates a source file from in-memory content.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Reads a source file from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read as UTF-8 text.
    pub fn read(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        Ok(Self::new(path, content))
    }
}

/// Everything a rule sees about one translation unit.
///
/// Built once per parsed unit per run and shared read-only between all
/// rules, possibly from several worker threads.
#[derive(Debug, Clone)]
pub struct AnalysisContext {
    source_file: SourceFile,
    tree: Tree,
}

impl AnalysisContext {
    /// Pairs a source file with its syntax tree.
    #[must_use]
    pub fn new(source_file: SourceFile, tree: Tree) -> Self {
        Self { source_file, tree }
    }

    /// The originating source file.
    #[must_use]
    pub fn source_file(&self) -> &SourceFile {
        &self.source_file
    }

    /// Path of the originating file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.source_file.path
    }

    /// Raw source text.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.source_file.content
    }

    /// The syntax tree.
    #[must_use]
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Root node of the syntax tree.
    #[must_use]
    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// Source text covered by `node`, or `""` if the range is not valid UTF-8.
    #[must_use]
    pub fn text_of(&self, node: &Node<'_>) -> &str {
        self.content()
            .get(node.start_byte()..node.end_byte())
            .unwrap_or("")
    }

    /// Returns the 1-indexed text of `line`, if it exists.
    #[must_use]
    pub fn line(&self, line: usize) -> Option<&str> {
        line.checked_sub(1)
            .and_then(|index| self.content().lines().nth(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tree_sitter::Parser;

    fn context(src: &str) -> AnalysisContext {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_kotlin_ng::LANGUAGE.into())
            .expect("kotlin grammar should load");
        let tree = parser.parse(src, None).expect("parse should produce a tree");
        AnalysisContext::new(SourceFile::new("Test.kt", src), tree)
    }

    #[test]
    fn text_of_root_is_whole_file() {
        let ctx = context("class A\n");
        assert_eq!(ctx.text_of(&ctx.root()), "class A\n");
        assert_eq!(ctx.path(), Path::new("Test.kt"));
    }

    #[test]
    fn line_lookup_is_one_indexed() {
        let ctx = context("package a\nclass B\n");
        assert_eq!(ctx.line(1), Some("package a"));
        assert_eq!(ctx.line(2), Some("class B"));
        assert_eq!(ctx.line(0), None);
        assert_eq!(ctx.line(3), None);
    }

    #[test]
    fn read_reports_missing_file() {
        assert!(SourceFile::read("/nonexistent/Missing.kt").is_err());
    }
}
