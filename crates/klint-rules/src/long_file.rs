//! Rule to limit file length.
//!
//! # Rationale
//!
//! Very long files usually hold more than one responsibility and are hard to
//! navigate.
//!
//! # Configuration
//!
//! - `max`: Maximum lines per file (default: 1000)

use crate::limit_option;
use klint_core::{AnalysisContext, IssueEmitter, IssueLedger, Rule, RuleConfigurations, Severity};

/// Rule identifier for long-file.
pub const ID: &str = "long_file";

/// Rule name for long-file.
pub const NAME: &str = "Long File";

/// Default maximum file length.
pub const DEFAULT_MAX: usize = 1000;

/// Flags files with more lines than the configured maximum.
#[derive(Debug, Clone)]
pub struct LongFile {
    max: usize,
}

impl Default for LongFile {
    fn default() -> Self {
        Self::new()
    }
}

impl LongFile {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self { max: DEFAULT_MAX }
    }

    /// Sets the maximum file length used when no option is configured.
    #[must_use]
    pub fn max(mut self, max: usize) -> Self {
        self.max = max;
        self
    }
}

impl Rule for LongFile {
    fn identifier(&self) -> &'static str {
        ID
    }

    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Flags files with more lines than the configured maximum"
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
        let lines = ctx.content().lines().count();
        if lines > max {
            IssueEmitter::new(self, ctx, configurations, ledger).emit(
                1,
                1,
                format!("File has {lines} lines, the limit is {max}"),
            );
        }
    }
}
