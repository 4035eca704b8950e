//! Rule to forbid wildcard imports.
//!
//! # Rationale
//!
//! `import foo.bar.*` hides where names come from and lets new members of
//! the imported package silently shadow local ones.
//!
//! # Detected Patterns
//!
//! - `import kotlin.collections.*`
//!
//! # Good Patterns
//!
//! ```text
//! import kotlin.collections.List
//! import kotlin.collections.Map as KMap
//! ```

use klint_core::{AnalysisContext, IssueEmitter, IssueLedger, Rule, RuleConfigurations, Severity};
use klint_kotlin::syntax::{child_of_kind, imports, node_text, position, qualified_id};

/// Rule identifier for no-wildcard-import.
pub const ID: &str = "no_wildcard_import";

/// Rule name for no-wildcard-import.
pub const NAME: &str = "No Wildcard Import";

/// Forbids `import foo.*`.
#[derive(Debug, Clone, Default)]
pub struct NoWildcardImport;

impl NoWildcardImport {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for NoWildcardImport {
    fn identifier(&self) -> &'static str {
        ID
    }

    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Forbids wildcard imports"
    }

    fn category(&self) -> &'static str {
        "bad practice"
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
        let src = ctx.content();
        let emitter = IssueEmitter::new(self, ctx, configurations, ledger);

        for import in imports(&ctx.root()) {
            let text = node_text(&import, src).trim_end().trim_end_matches(';').trim_end();
            if !text.ends_with('*') {
                continue;
            }
            let package = child_of_kind(&import, "qualified_identifier")
                .map(|id| qualified_id(&id, src))
                .filter(|p| !p.is_empty())
                .unwrap_or_else(|| {
                    text.trim_start_matches("import")
                        .trim_end_matches('*')
                        .trim_end_matches('.')
                        .split_whitespace()
                        .collect()
                });
            let (line, column) = position(&import, src);
            emitter.emit(line, column, format!("Wildcard import `{package}.*`"));
        }
    }
}
