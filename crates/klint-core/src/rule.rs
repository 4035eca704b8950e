//! Rule contract, issue emission and catalog selection.

use crate::config::RuleConfigurations;
use crate::context::AnalysisContext;
use crate::ledger::IssueLedger;
use crate::types::{Issue, Location, Severity};
use crate::utils::allowance::SourceLines;

use std::cell::OnceCell;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

/// A lint rule that inspects one translation unit at a time.
///
/// Rules are shared between worker threads and invoked once per
/// (context, rule) pair. An inspection must not depend on which contexts
/// were inspected before it: keep per-file state on the stack, never in
/// `self`.
///
/// # Example
///
/// ```ignore
/// use klint_core::{AnalysisContext, IssueEmitter, IssueLedger, Rule, RuleConfigurations};
///
/// pub struct NoEmptyFile;
///
/// impl Rule for NoEmptyFile {
///     fn identifier(&self) -> &'static str { "no_empty_file" }
///     fn name(&self) -> &'static str { "No Empty File" }
///     fn category(&self) -> &'static str { "convention" }
///
///     fn inspect(&self, ctx: &AnalysisContext, configs: &RuleConfigurations, ledger: &IssueLedger) {
///         if ctx.content().trim().is_empty() {
///             IssueEmitter::new(self, ctx, configs, ledger).emit(1, 1, "File is empty");
///         }
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Stable identifier used for selection and configuration (e.g. `long_line`).
    fn identifier(&self) -> &'static str;

    /// Human-readable title (e.g. "Long Line").
    fn name(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Free-form grouping tag.
    fn category(&self) -> &'static str;

    /// Severity stamped on issues unless configuration overrides it.
    fn severity(&self) -> Severity {
        Severity::Minor
    }

    /// Inspects one unit, recording zero or more issues into `ledger`.
    ///
    /// Rule-specific options live in `configurations` under the rule's own
    /// identifier.
    fn inspect(
        &self,
        ctx: &AnalysisContext,
        configurations: &RuleConfigurations,
        ledger: &IssueLedger,
    );
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;

/// Rule handle shared between the catalog and the active set.
pub type SharedRule = Arc<dyn Rule>;

/// Stamps a rule's identity onto issues and records them.
///
/// Issues on lines carrying a `// klint: allow(...)` directive for the rule
/// are dropped here.
pub struct IssueEmitter<'a> {
    rule: &'a dyn Rule,
    ctx: &'a AnalysisContext,
    severity: Severity,
    ledger: &'a IssueLedger,
    lines: OnceCell<SourceLines<'a>>,
}

impl<'a> IssueEmitter<'a> {
    /// Creates an emitter for one inspection call.
    #[must_use]
    pub fn new(
        rule: &'a dyn Rule,
        ctx: &'a AnalysisContext,
        configurations: &RuleConfigurations,
        ledger: &'a IssueLedger,
    ) -> Self {
        let severity = configurations
            .severity_override(rule.identifier())
            .unwrap_or_else(|| rule.severity());
        Self {
            rule,
            ctx,
            severity,
            ledger,
            lines: OnceCell::new(),
        }
    }

    /// Records an issue at a 1-indexed line and column.
    pub fn emit(&self, line: usize, column: usize, message: impl Into<String>) {
        let identifier = self.rule.identifier();
        let lines = self
            .lines
            .get_or_init(|| SourceLines::new(self.ctx.content()));
        if lines.check_allow(line, identifier).is_allowed() {
            debug!(
                "Suppressed {} at {}:{}",
                identifier,
                self.ctx.path().display(),
                line
            );
            return;
        }

        self.ledger.record(Issue::new(
            Location::new(self.ctx.path(), line, column),
            identifier,
            self.rule.category(),
            self.severity,
            message,
        ));
    }
}

/// The fixed catalog of known rules.
///
/// The catalog is never modified; [`RuleRegistry::select`] only filters it.
#[derive(Clone, Default)]
pub struct RuleRegistry {
    catalog: Vec<SharedRule>,
}

impl RuleRegistry {
    /// Creates a registry over `catalog`, keeping its order.
    #[must_use]
    pub fn new(catalog: Vec<RuleBox>) -> Self {
        Self {
            catalog: catalog.into_iter().map(SharedRule::from).collect(),
        }
    }

    /// All rules, in catalog order.
    #[must_use]
    pub fn rules(&self) -> &[SharedRule] {
        &self.catalog
    }

    /// Identifiers of all rules, in catalog order.
    pub fn identifiers(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.catalog.iter().map(|r| r.identifier())
    }

    /// Number of rules in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    /// Returns true if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }

    /// Rules whose identifier appears in `identifiers`, in catalog order.
    ///
    /// Identifiers with no catalog entry are ignored.
    #[must_use]
    pub fn select<S: AsRef<str>>(&self, identifiers: &[S]) -> Vec<SharedRule> {
        let wanted: HashSet<&str> = identifiers.iter().map(AsRef::as_ref).collect();

        for id in &wanted {
            if !self.catalog.iter().any(|r| r.identifier() == *id) {
                debug!("Ignoring unknown rule identifier: {}", id);
            }
        }

        self.catalog
            .iter()
            .filter(|rule| {
                let selected = wanted.contains(rule.identifier());
                if !selected {
                    debug!("Rule not selected: {}", rule.identifier());
                }
                selected
            })
            .cloned()
            .collect()
    }
}

impl std::fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.identifiers()).finish()
    }
}
