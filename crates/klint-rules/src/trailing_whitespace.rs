//! Rule to forbid trailing whitespace.
//!
//! # Rationale
//!
//! Trailing spaces and tabs are invisible in most editors and produce noisy
//! diffs when someone's editor strips them.

use klint_core::{AnalysisContext, IssueEmitter, IssueLedger, Rule, RuleConfigurations, Severity};

/// Rule identifier for trailing-whitespace.
pub const ID: &str = "trailing_whitespace";

/// Rule name for trailing-whitespace.
pub const NAME: &str = "Trailing Whitespace";

/// Flags lines ending in spaces or tabs.
#[derive(Debug, Clone, Default)]
pub struct TrailingWhitespace;

impl TrailingWhitespace {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for TrailingWhitespace {
    fn identifier(&self) -> &'static str {
        ID
    }

    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Flags lines ending in spaces or tabs"
    }

    fn category(&self) -> &'static str {
        "readability"
    }

    fn severity(&self) -> Severity {
        Severity::Cosmetic
    }

    fn inspect(
        &self,
        ctx: &AnalysisContext,
        configurations: &RuleConfigurations,
        ledger: &IssueLedger,
    ) {
        let emitter = IssueEmitter::new(self, ctx, configurations, ledger);
        for (index, line) in ctx.content().lines().enumerate() {
            let trimmed = line.trim_end_matches([' ', '\t']);
            if trimmed.len() != line.len() {
                emitter.emit(
                    index + 1,
                    trimmed.chars().count() + 1,
                    "Line has trailing whitespace",
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::check;

    #[test]
    fn test_detects_trailing_spaces_and_tabs() {
        let issues = check(&TrailingWhitespace, "class A {  \n    val x = 1\t\n}\n");
        assert_eq!(issues.len(), 2);
        assert_eq!(
            (issues[0].location().line, issues[0].location().column),
            (1, 10)
        );
        assert_eq!(
            (issues[1].location().line, issues[1].location().column),
            (2, 14)
        );
    }

    #[test]
    fn test_allows_clean_lines_and_crlf() {
        assert!(check(&TrailingWhitespace, "class A {\r\n}\r\n").is_empty());
    }

    #[test]
    fn test_whitespace_only_line() {
        let issues = check(&TrailingWhitespace, "class A\n    \n");
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].location().column, 1);
    }
}
