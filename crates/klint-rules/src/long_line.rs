//! Rule to limit line length.
//!
//! # Rationale
//!
//! Long lines force horizontal scrolling and make side-by-side diffs hard to
//! read.
//!
//! # Configuration
//!
//! - `max`: Maximum characters per line (default: 100)

use crate::limit_option;
use klint_core::{AnalysisContext, IssueEmitter, IssueLedger, Rule, RuleConfigurations, Severity};

/// Rule identifier for long-line.
pub const ID: &str = "long_line";

/// Rule name for long-line.
pub const NAME: &str = "Long Line";

/// Default maximum line length.
pub const DEFAULT_MAX: usize = 100;

/// Flags lines longer than the configured maximum.
#[derive(Debug, Clone)]
pub struct LongLine {
    max: usize,
}

impl Default for LongLine {
    fn default() -> Self {
        Self::new()
    }
}

impl LongLine {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self { max: DEFAULT_MAX }
    }

    /// Sets the maximum line length used when no option is configured.
    #[must_use]
    pub fn max(mut self, max: usize) -> Self {
        self.max = max;
        self
    }
}

impl Rule for LongLine {
    fn identifier(&self) -> &'static str {
        ID
    }

    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Flags lines longer than the configured maximum"
    }

    fn category(&self) -> &'static str {
        "size"
    }

    fn severity(&self) -> Severity {
        Severity::Minor
    }

    fn inspect(
        &self,
        ctx: &AnalysisContext,
        configurations: &RuleConfigurations,
        ledger: &IssueLedger,
    ) {
        let max = limit_option(configurations, ID, "max", self.max);
        let emitter = IssueEmitter::new(self, ctx, configurations, ledger);

        for (index, line) in ctx.content().lines().enumerate() {
            let length = line.chars().count();
            if length > max {
                emitter.emit(
                    index + 1,
                    max + 1,
                    format!("Line is {length} characters long, the limit is {max}"),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{check, inspect_file};

    #[test]
    fn test_detects_long_line() {
        let src = format!("val short = 1\nval long = \"{}\"\n", "x".repeat(120));
        let issues = check(&LongLine::new(), &src);

        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].location().line, 2);
        assert_eq!(issues[0].location().column, 101);
        assert!(issues[0].message().contains("133 characters"));
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        let src = format!("val s = \"{}\"\n", "é".repeat(90));
        assert!(check(&LongLine::new(), &src).is_empty());
    }

    #[test]
    fn test_configured_max_wins() {
        let mut configs = RuleConfigurations::default();
        configs.set(ID, "max", 10_i64);
        let issues = inspect_file(&LongLine::new(), "A.kt", "val abc = 12345\n", &configs);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message().ends_with("the limit is 10"));
    }

    #[test]
    fn test_builder_max() {
        assert_eq!(check(&LongLine::new().max(5), "val a = 1\n").len(), 1);
    }
}
