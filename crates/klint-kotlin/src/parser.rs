//! Kotlin parsing collaborator.

use klint_core::{
    DiagnosticLevel, ParseDiagnostic, ParseOutcome, ParsedUnit, SourceFile, SourceParser,
};
use rayon::prelude::*;
use std::path::Path;
use tracing::debug;
use tree_sitter::{Language, Node, Parser, Tree};

use crate::syntax::position;

const MAX_SNIPPET: usize = 32;

/// Parses Kotlin sources with tree-sitter.
///
/// Files are parsed in parallel, each on its own [`Parser`]. ERROR and
/// MISSING nodes become error diagnostics, which fail the batch.
#[derive(Clone)]
pub struct KotlinParser {
    language: Language,
}

impl KotlinParser {
    /// Creates a parser for the Kotlin grammar.
    #[must_use]
    pub fn new() -> Self {
        Self {
            language: tree_sitter_kotlin_ng::LANGUAGE.into(),
        }
    }

    /// File extensions handled by this parser.
    #[must_use]
    pub fn extensions(&self) -> &'static [&'static str] {
        &["kt", "kts"]
    }

    /// Parses a single file into a unit plus its diagnostics.
    #[must_use]
    pub fn parse_file(&self, source: &SourceFile) -> (ParsedUnit, Vec<ParseDiagnostic>) {
        let mut diagnostics = Vec::new();
        let tree = self.parse_tree(source, &mut diagnostics);

        if let Some(tree) = &tree {
            if tree.root_node().has_error() {
                collect_syntax_errors(
                    tree.root_node(),
                    &source.path,
                    &source.content,
                    &mut diagnostics,
                );
            }
        }

        debug!(
            "Parsed {} ({} diagnostics)",
            source.path.display(),
            diagnostics.len()
        );
        (
            ParsedUnit {
                source_file: source.clone(),
                tree,
            },
            diagnostics,
        )
    }

    fn parse_tree(&self, source: &SourceFile, diagnostics: &mut Vec<ParseDiagnostic>) -> Option<Tree> {
        let mut parser = Parser::new();
        if let Err(e) = parser.set_language(&self.language) {
            diagnostics.push(ParseDiagnostic::new(
                DiagnosticLevel::Fatal,
                source.path.clone(),
                1,
                1,
                format!("failed to load Kotlin grammar: {e}"),
            ));
            return None;
        }

        let tree = parser.parse(&source.content, None);
        if tree.is_none() {
            diagnostics.push(ParseDiagnostic::new(
                DiagnosticLevel::Fatal,
                source.path.clone(),
                1,
                1,
                "parser produced no syntax tree",
            ));
        }
        tree
    }
}

impl Default for KotlinParser {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for KotlinParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KotlinParser").finish_non_exhaustive()
    }
}

impl SourceParser for KotlinParser {
    fn parse(&self, sources: &[SourceFile]) -> ParseOutcome {
        let parsed: Vec<(ParsedUnit, Vec<ParseDiagnostic>)> =
            sources.par_iter().map(|s| self.parse_file(s)).collect();

        let mut units = Vec::with_capacity(parsed.len());
        let mut diagnostics = Vec::new();
        for (unit, mut unit_diagnostics) in parsed {
            units.push(unit);
            diagnostics.append(&mut unit_diagnostics);
        }
        ParseOutcome::from_units(units, diagnostics)
    }
}

/// Records ERROR and MISSING nodes, descending only into subtrees with errors.
fn collect_syntax_errors(
    root: Node<'_>,
    path: &Path,
    content: &str,
    diagnostics: &mut Vec<ParseDiagnostic>,
) {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.is_missing() {
            diagnostics.push(diagnostic_at(
                &node,
                path,
                content,
                format!("missing `{}`", node.kind()),
            ));
            continue;
        }
        if node.is_error() {
            diagnostics.push(diagnostic_at(
                &node,
                path,
                content,
                format!("unexpected `{}`", snippet(&node, content)),
            ));
            continue;
        }

        let mut cursor = node.walk();
        let children: Vec<Node<'_>> = node
            .children(&mut cursor)
            .filter(Node::has_error)
            .collect();
        stack.extend(children.into_iter().rev());
    }
}

fn diagnostic_at(
    node: &Node<'_>,
    path: &Path,
    content: &str,
    message: String,
) -> ParseDiagnostic {
    let (line, column) = position(node, content);
    ParseDiagnostic::new(
        DiagnosticLevel::Error,
        path,
        i64::try_from(line).unwrap_or(i64::MAX),
        i64::try_from(column).unwrap_or(i64::MAX),
        message,
    )
}

/// First line of the node's text, shortened for messages.
fn snippet<'a>(node: &Node<'_>, content: &'a str) -> &'a str {
    let text = node
        .utf8_text(content.as_bytes())
        .unwrap_or("")
        .lines()
        .next()
        .unwrap_or("")
        .trim();
    match text.char_indices().nth(MAX_SNIPPET) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use klint_core::ParseStatus;

    fn parse(files: &[(&str, &str)]) -> ParseOutcome {
        let sources: Vec<SourceFile> = files
            .iter()
            .map(|(path, content)| SourceFile::new(*path, *content))
            .collect();
        KotlinParser::new().parse(&sources)
    }

    #[test]
    fn valid_sources_parse_cleanly() {
        let outcome = parse(&[
            ("A.kt", "package a\n\nclass A(val x: Int)\n"),
            ("B.kts", "println(\"hi\")\n"),
        ]);
        assert_eq!(outcome.status, ParseStatus::Success);
        assert!(outcome.diagnostics.is_empty());
        assert_eq!(outcome.units.len(), 2);
        assert!(outcome.units.iter().all(|u| u.tree.is_some()));
    }

    #[test]
    fn units_keep_input_order() {
        let files: Vec<(String, String)> = (0..16)
            .map(|i| (format!("F{i}.kt"), format!("class C{i}\n")))
            .collect();
        let refs: Vec<(&str, &str)> = files
            .iter()
            .map(|(p, c)| (p.as_str(), c.as_str()))
            .collect();
        let outcome = parse(&refs);
        let paths: Vec<String> = outcome
            .units
            .iter()
            .map(|u| u.source_file.path.display().to_string())
            .collect();
        let expected: Vec<String> = files.iter().map(|(p, _)| p.clone()).collect();
        assert_eq!(paths, expected);
    }

    #[test]
    fn syntax_error_fails_the_batch() {
        let outcome = parse(&[
            ("Good.kt", "class Good\n"),
            ("Bad.kt", "class Bad {\n    fun f( {\n}\n"),
        ]);
        assert_eq!(outcome.status, ParseStatus::Failure);
        assert!(!outcome.diagnostics.is_empty());
        assert!(outcome
            .diagnostics
            .iter()
            .all(|d| d.location.path == Path::new("Bad.kt")));
        assert!(outcome
            .diagnostics
            .iter()
            .all(|d| d.level == DiagnosticLevel::Error && d.location.line >= 1));
    }

    #[test]
    fn snippet_is_truncated_to_first_line() {
        let content = "x".repeat(80) + "\nsecond";
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_kotlin_ng::LANGUAGE.into())
            .unwrap();
        let tree = parser.parse(&content, None).unwrap();
        let text = snippet(&tree.root_node(), &content);
        assert_eq!(text.len(), MAX_SNIPPET);
    }

    #[test]
    fn diagnostic_columns_count_characters() {
        let first_location = |src: &str| {
            let outcome = parse(&[("Bad.kt", src)]);
            let location = &outcome.diagnostics[0].location;
            (location.line, location.column)
        };
        assert_eq!(
            first_location("val a = \"x\" )\n"),
            first_location("val a = \"\u{e9}\" )\n")
        );
    }
}
