//! Rule to limit function parameter counts.
//!
//! # Rationale
//!
//! Functions with long parameter lists are hard to call correctly and often
//! indicate a missing abstraction (a parameter object or a builder).
//!
//! # Configuration
//!
//! - `max`: Maximum parameters per function (default: 10)

use crate::limit_option;
use klint_core::{AnalysisContext, IssueEmitter, IssueLedger, Rule, RuleConfigurations, Severity};
use klint_kotlin::syntax::{
    child_of_kind, children_of_kind, declaration_name, descendants_of_kind, position,
};

/// Rule identifier for too-many-parameters.
pub const ID: &str = "too_many_parameters";

/// Rule name for too-many-parameters.
pub const NAME: &str = "Too Many Parameters";

/// Default maximum parameter count.
pub const DEFAULT_MAX: usize = 10;

/// Flags functions declaring more parameters than the configured maximum.
#[derive(Debug, Clone)]
pub struct TooManyParameters {
    max: usize,
}

impl Default for TooManyParameters {
    fn default() -> Self {
        Self::new()
    }
}

impl TooManyParameters {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self { max: DEFAULT_MAX }
    }

    /// Sets the maximum parameter count used when no option is configured.
    #[must_use]
    pub fn max(mut self, max: usize) -> Self {
        self.max = max;
        self
    }
}

impl Rule for TooManyParameters {
    fn identifier(&self) -> &'static str {
        ID
    }

    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Flags functions with more parameters than the configured maximum"
    }

    fn category(&self) -> &'static str {
        "size"
    }

    fn severity(&self) -> Severity {
        Severity::Major
    }

    fn inspect(
        &self,
        ctx: &AnalysisContext,
        configurations: &RuleConfigurations,
        ledger: &IssueLedger,
    ) {
        let max = limit_option(configurations, ID, "max", self.max);
        let src = ctx.content();
        let emitter = IssueEmitter::new(self, ctx, configurations, ledger);

        for function in descendants_of_kind(ctx.root(), &["function_declaration"]) {
            let Some(parameters) = child_of_kind(&function, "function_value_parameters") else {
                continue;
            };
            let count = children_of_kind(&parameters, "parameter").len();
            if count <= max {
                continue;
            }
            let name = declaration_name(&function, src).unwrap_or("<anonymous>");
            let (line, column) = position(&function, src);
            emitter.emit(
                line,
                column,
                format!("Function `{name}` has {count} parameters, the limit is {max}"),
            );
        }
    }
}
