//! Contract for the parsing collaborator.

use crate::context::SourceFile;
use std::path::PathBuf;
use tree_sitter::Tree;

/// Turns source files into syntax trees.
///
/// Implementations parse a whole batch at once and report a single
/// batch-level status alongside per-file units and diagnostics.
pub trait SourceParser: Send + Sync {
    /// Parses every file in `sources`.
    fn parse(&self, sources: &[SourceFile]) -> ParseOutcome;
}

/// Batch-level parse result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseStatus {
    /// Every file parsed well enough to lint.
    Success,
    /// At least one file failed; the run must stop.
    Failure,
}

/// One parsed file. `tree` is `None` when the parser produced nothing usable.
#[derive(Debug, Clone)]
pub struct ParsedUnit {
    /// The file that was parsed.
    pub source_file: SourceFile,
    /// The syntax tree, if any.
    pub tree: Option<Tree>,
}

/// Everything the parsing collaborator hands back for a batch.
#[derive(Debug, Clone)]
pub struct ParseOutcome {
    /// Batch-level status.
    pub status: ParseStatus,
    /// Parsed units, in input order.
    pub units: Vec<ParsedUnit>,
    /// Parser diagnostics, rendered to the terminal only.
    pub diagnostics: Vec<ParseDiagnostic>,
}

impl ParseOutcome {
    /// Builds an outcome whose status is derived from `diagnostics`:
    /// any error or fatal diagnostic fails the batch.
    #[must_use]
    pub fn from_units(units: Vec<ParsedUnit>, diagnostics: Vec<ParseDiagnostic>) -> Self {
        let status = if diagnostics.iter().any(|d| d.level.is_error()) {
            ParseStatus::Failure
        } else {
            ParseStatus::Success
        };
        Self {
            status,
            units,
            diagnostics,
        }
    }

    /// Returns true if the batch parsed successfully.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == ParseStatus::Success
    }
}

/// Severity of a parser diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticLevel {
    /// The parser could not run at all.
    Fatal,
    /// Syntax error.
    Error,
    /// Recoverable oddity.
    Warning,
}

impl DiagnosticLevel {
    /// Lowercase tag used when printing.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fatal => "fatal",
            Self::Error => "error",
            Self::Warning => "warning",
        }
    }

    /// Returns true for fatal and error levels.
    #[must_use]
    pub fn is_error(self) -> bool {
        matches!(self, Self::Fatal | Self::Error)
    }
}

impl std::fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Location reported by the parser.
///
/// Line and column are nominally 1-indexed, but parsers may report zero or
/// negative values; renderers clamp them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticLocation {
    /// File the diagnostic refers to.
    pub path: PathBuf,
    /// Line number.
    pub line: i64,
    /// Column number.
    pub column: i64,
}

impl std::fmt::Display for DiagnosticLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.path.display(), self.line, self.column)
    }
}

/// A parser-level diagnostic, distinct from a lint issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDiagnostic {
    /// Severity level.
    pub level: DiagnosticLevel,
    /// Where it was reported.
    pub location: DiagnosticLocation,
    /// Human-readable message.
    pub message: String,
}

impl ParseDiagnostic {
    /// Creates a new diagnostic.
    #[must_use]
    pub fn new(
        level: DiagnosticLevel,
        path: impl Into<PathBuf>,
        line: i64,
        column: i64,
        message: impl Into<String>,
    ) -> Self {
        Self {
            level,
            location: DiagnosticLocation {
                path: path.into(),
                line,
                column,
            },
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warnings_do_not_fail_the_batch() {
        let outcome = ParseOutcome::from_units(
            Vec::new(),
            vec![ParseDiagnostic::new(
                DiagnosticLevel::Warning,
                "A.kt",
                1,
                1,
                "odd",
            )],
        );
        assert!(outcome.is_success());
    }

    #[test]
    fn errors_fail_the_batch() {
        let outcome = ParseOutcome::from_units(
            Vec::new(),
            vec![ParseDiagnostic::new(
                DiagnosticLevel::Error,
                "A.kt",
                1,
                1,
                "bad",
            )],
        );
        assert_eq!(outcome.status, ParseStatus::Failure);
    }

    #[test]
    fn location_displays_as_path_line_column() {
        let d = ParseDiagnostic::new(DiagnosticLevel::Fatal, "src/A.kt", 3, 7, "boom");
        assert_eq!(d.location.to_string(), "src/A.kt:3:7");
        assert_eq!(d.level.to_string(), "fatal");
    }
}
