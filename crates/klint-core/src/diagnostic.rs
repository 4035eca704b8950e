//! Terminal rendering of parser diagnostics with a source snippet and caret.

use crate::parse::{DiagnosticLevel, ParseDiagnostic};
use colored::Colorize;
use std::collections::HashMap;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

const CARET: &str = "^~~~";

/// Renders parser diagnostics as `location level: message`, followed by the
/// offending source line and a caret under the reported column.
#[derive(Debug, Clone, Copy)]
pub struct DiagnosticRenderer {
    colored: bool,
}

impl Default for DiagnosticRenderer {
    fn default() -> Self {
        Self { colored: true }
    }
}

impl DiagnosticRenderer {
    /// Creates a renderer with colored output.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Disables ANSI styling.
    #[must_use]
    pub fn without_color(mut self) -> Self {
        self.colored = false;
        self
    }

    /// Writes every diagnostic to `out`.
    ///
    /// Source files are read from disk at most once per call. A file that
    /// cannot be read only loses its snippet; the message is still printed.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `out` fails.
    pub fn render<W: Write + ?Sized>(
        &self,
        diagnostics: &[ParseDiagnostic],
        out: &mut W,
    ) -> io::Result<()> {
        let mut sources = SourceCache::default();

        for d in diagnostics {
            writeln!(out, "{} {}: {}", d.location, self.level_tag(d.level), d.message)?;

            if let Some(content) = sources.get(&d.location.path) {
                if let Some((line, padding)) =
                    snippet(content, d.location.line, d.location.column)
                {
                    writeln!(out, "{line}")?;
                    writeln!(out, "{}{}", " ".repeat(padding), self.caret())?;
                }
            }

            writeln!(out)?;
        }

        Ok(())
    }

    fn level_tag(&self, level: DiagnosticLevel) -> String {
        if !self.colored {
            return level.as_str().to_string();
        }
        match level {
            DiagnosticLevel::Fatal | DiagnosticLevel::Error => level.as_str().red().to_string(),
            DiagnosticLevel::Warning => level.as_str().yellow().to_string(),
        }
    }

    fn caret(&self) -> String {
        if self.colored {
            CARET.green().to_string()
        } else {
            CARET.to_string()
        }
    }
}

/// Returns the source line for a 1-indexed `line` and the caret padding for
/// a 1-indexed `column`, both clamped into range.
fn snippet(content: &str, line: i64, column: i64) -> Option<(&str, usize)> {
    let index = usize::try_from(line.saturating_sub(1)).unwrap_or(0);
    let text = content.lines().nth(index)?;
    let padding = usize::try_from(column.saturating_sub(1))
        .unwrap_or(0)
        .min(text.chars().count());
    Some((text, padding))
}

/// File contents keyed by path, scoped to one rendering pass.
#[derive(Debug, Default)]
struct SourceCache {
    files: HashMap<PathBuf, Option<String>>,
}

impl SourceCache {
    fn get(&mut self, path: &Path) -> Option<&str> {
        self.files
            .entry(path.to_path_buf())
            .or_insert_with(|| std::fs::read_to_string(path).ok())
            .as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn render(diagnostics: &[ParseDiagnostic]) -> String {
        let mut out = Vec::new();
        DiagnosticRenderer::new()
            .without_color()
            .render(diagnostics, &mut out)
            .expect("writing to a Vec cannot fail");
        String::from_utf8(out).expect("output is UTF-8")
    }

    fn source(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("Main.kt");
        std::fs::write(&path, content).expect("fixture should be written");
        path
    }

    #[test]
    fn renders_line_and_caret_at_column() {
        let dir = TempDir::new().unwrap();
        let path = source(&dir, "package a\nval x = )\n");
        let d = ParseDiagnostic::new(DiagnosticLevel::Error, &path, 2, 9, "unexpected `)`");

        let output = render(&[d]);
        let expected = format!(
            "{}:2:9 error: unexpected `)`\nval x = )\n        ^~~~\n\n",
            path.display()
        );
        assert_eq!(output, expected);
    }

    #[test]
    fn non_positive_column_and_line_clamp_to_first() {
        let dir = TempDir::new().unwrap();
        let path = source(&dir, "first\nsecond\n");

        for (line, column) in [(1, 0), (1, -4), (0, 1), (-3, -3)] {
            let d = ParseDiagnostic::new(DiagnosticLevel::Warning, &path, line, column, "w");
            let output = render(&[d]);
            let lines: Vec<&str> = output.lines().collect();
            assert_eq!(lines[1], "first");
            assert_eq!(lines[2], "^~~~");
        }
    }

    #[test]
    fn column_past_end_clamps_to_line_length() {
        let dir = TempDir::new().unwrap();
        let path = source(&dir, "abc\n");
        let d = ParseDiagnostic::new(DiagnosticLevel::Error, &path, 1, 99, "e");
        let output = render(&[d]);
        assert_eq!(output.lines().nth(2), Some("   ^~~~"));
    }

    #[test]
    fn line_past_end_omits_snippet() {
        let dir = TempDir::new().unwrap();
        let path = source(&dir, "abc\n");
        let d = ParseDiagnostic::new(DiagnosticLevel::Error, &path, 5, 1, "e");
        let output = render(&[d]);
        assert_eq!(output, format!("{}:5:1 error: e\n\n", path.display()));
    }

    #[test]
    fn unreadable_file_still_prints_message() {
        let d = ParseDiagnostic::new(
            DiagnosticLevel::Fatal,
            "/nonexistent/Gone.kt",
            1,
            1,
            "grammar unavailable",
        );
        assert_eq!(
            render(&[d]),
            "/nonexistent/Gone.kt:1:1 fatal: grammar unavailable\n\n"
        );
    }

    #[test]
    fn cache_keeps_content_after_first_read() {
        let dir = TempDir::new().unwrap();
        let path = source(&dir, "cached\n");
        let mut cache = SourceCache::default();
        assert_eq!(cache.get(&path), Some("cached\n"));

        std::fs::remove_file(&path).unwrap();
        assert_eq!(cache.get(&path), Some("cached\n"));
    }

    #[test]
    fn colored_output_keeps_message_text() {
        let d = ParseDiagnostic::new(DiagnosticLevel::Error, "/nonexistent/A.kt", 1, 1, "boom");
        let mut out = Vec::new();
        DiagnosticRenderer::new().render(&[d], &mut out).unwrap();
        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("boom"));
        assert!(output.contains("error"));
    }
}
