//! Lint orchestration.

use crate::config::RuleConfigurations;
use crate::context::{AnalysisContext, SourceFile};
use crate::diagnostic::DiagnosticRenderer;
use crate::ledger::IssueLedger;
use crate::parse::SourceParser;
use crate::reporter::{render_report, Reporter, ReporterKind};
use crate::rule::{Rule, RuleBox, RuleRegistry, SharedRule};
use crate::threshold::{ExitStatus, SeverityThresholds};
use crate::types::{Issue, IssueSummary};

use rayon::prelude::*;
use std::io::{self, Stdout, Write};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur while building or running a [`Driver`].
#[derive(Debug, Error)]
pub enum DriverError {
    /// IO error writing the report or diagnostics.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// No parsing collaborator was configured.
    #[error("No source parser configured")]
    MissingParser,
}

/// How the (context, rule) matrix is executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Execution {
    /// One inspection at a time, context order then registry order.
    Sequential,
    /// Inspections fan out over a rayon pool.
    Parallel {
        /// Worker count; `None` uses the global pool.
        jobs: Option<usize>,
    },
}

impl Default for Execution {
    fn default() -> Self {
        Self::Parallel { jobs: None }
    }
}

/// Builder for configuring a [`Driver`].
pub struct DriverBuilder<W = Stdout> {
    catalog: Vec<RuleBox>,
    parser: Option<Box<dyn SourceParser>>,
    reporter: ReporterKind,
    output: W,
    diagnostics: Box<dyn Write + Send>,
    renderer: DiagnosticRenderer,
    execution: Execution,
}

impl Default for DriverBuilder<Stdout> {
    fn default() -> Self {
        Self {
            catalog: Vec::new(),
            parser: None,
            reporter: ReporterKind::Text,
            output: io::stdout(),
            diagnostics: Box::new(io::stderr()),
            renderer: DiagnosticRenderer::new(),
            execution: Execution::default(),
        }
    }
}

impl DriverBuilder<Stdout> {
    /// Creates a builder writing reports to stdout and diagnostics to stderr.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<W: Write> DriverBuilder<W> {
    /// Adds a rule to the catalog.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.catalog.push(Box::new(rule));
        self
    }

    /// Adds boxed rules to the catalog, keeping their order.
    #[must_use]
    pub fn rules(mut self, rules: impl IntoIterator<Item = RuleBox>) -> Self {
        self.catalog.extend(rules);
        self
    }

    /// Sets the parsing collaborator.
    #[must_use]
    pub fn parser<P: SourceParser + 'static>(mut self, parser: P) -> Self {
        self.parser = Some(Box::new(parser));
        self
    }

    /// Selects the report format.
    #[must_use]
    pub fn reporter(mut self, kind: ReporterKind) -> Self {
        self.reporter = kind;
        self
    }

    /// Replaces the report output sink.
    #[must_use]
    pub fn output<W2: Write>(self, output: W2) -> DriverBuilder<W2> {
        DriverBuilder {
            catalog: self.catalog,
            parser: self.parser,
            reporter: self.reporter,
            output,
            diagnostics: self.diagnostics,
            renderer: self.renderer,
            execution: self.execution,
        }
    }

    /// Replaces the parser diagnostic sink.
    #[must_use]
    pub fn diagnostics<D: Write + Send + 'static>(mut self, sink: D) -> Self {
        self.diagnostics = Box::new(sink);
        self
    }

    /// Disables colors in parser diagnostics.
    #[must_use]
    pub fn without_color(mut self) -> Self {
        self.renderer = self.renderer.without_color();
        self
    }

    /// Sets the execution strategy (default: parallel on the global pool).
    #[must_use]
    pub fn execution(mut self, execution: Execution) -> Self {
        self.execution = execution;
        self
    }

    /// Builds the driver. Every catalog rule starts out active.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::MissingParser`] if no parser was set.
    pub fn build(self) -> Result<Driver<W>, DriverError> {
        let parser = self.parser.ok_or(DriverError::MissingParser)?;
        let registry = RuleRegistry::new(self.catalog);
        let active = registry.rules().to_vec();

        Ok(Driver {
            registry,
            active,
            parser,
            reporter: self.reporter.reporter(),
            ledger: IssueLedger::new(),
            output: self.output,
            diagnostics: self.diagnostics,
            renderer: self.renderer,
            execution: self.execution,
        })
    }
}

/// Runs the active rules over parsed sources and renders the report.
///
/// Use [`Driver::builder()`] to construct an instance.
pub struct Driver<W = Stdout> {
    registry: RuleRegistry,
    active: Vec<SharedRule>,
    parser: Box<dyn SourceParser>,
    reporter: Box<dyn Reporter>,
    ledger: IssueLedger,
    output: W,
    diagnostics: Box<dyn Write + Send>,
    renderer: DiagnosticRenderer,
    execution: Execution,
}

impl Driver<Stdout> {
    /// Creates a new builder for configuring a driver.
    #[must_use]
    pub fn builder() -> DriverBuilder<Stdout> {
        DriverBuilder::new()
    }
}

impl<W: Write> Driver<W> {
    /// Selects the reporter by format name. Unknown names select text.
    pub fn set_reporter(&mut self, name: &str) {
        self.set_reporter_kind(ReporterKind::from_name(name));
    }

    /// Selects the reporter by kind.
    pub fn set_reporter_kind(&mut self, kind: ReporterKind) {
        debug!("Using {} reporter", kind);
        self.reporter = kind.reporter();
    }

    /// Replaces the active rule set with the catalog rules named in
    /// `identifiers`, in catalog order. Unknown identifiers are ignored.
    pub fn register_rules<S: AsRef<str>>(&mut self, identifiers: &[S]) {
        self.active = self.registry.select(identifiers);
        info!(
            "Registered {} of {} rules",
            self.active.len(),
            self.registry.len()
        );
    }

    /// The full rule catalog.
    #[must_use]
    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// Rules that run on the next [`lint`](Self::lint), in catalog order.
    #[must_use]
    pub fn active_rules(&self) -> &[SharedRule] {
        &self.active
    }

    /// Replaces the report output sink.
    pub fn set_output(&mut self, output: W) {
        self.output = output;
    }

    /// The report output sink.
    #[must_use]
    pub fn output(&self) -> &W {
        &self.output
    }

    /// Consumes the driver, returning the output sink.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Issues recorded by the most recent run.
    #[must_use]
    pub fn issues(&self) -> Vec<Issue> {
        self.ledger.drain()
    }

    /// Lints `sources` and writes the report to the output sink.
    ///
    /// Returns [`ExitStatus::FailedInParsingFile`] without running any rule
    /// or rendering any report if the parser fails the batch.
    ///
    /// # Errors
    ///
    /// Returns an error if writing the report or diagnostics fails.
    pub fn lint(
        &mut self,
        sources: &[SourceFile],
        configurations: &RuleConfigurations,
        thresholds: &SeverityThresholds,
    ) -> Result<ExitStatus, DriverError> {
        info!(
            "Linting {} files with {} rules",
            sources.len(),
            self.active.len()
        );
        self.ledger.clear();

        let outcome = self.parser.parse(sources);
        if !outcome.diagnostics.is_empty() {
            self.renderer
                .render(&outcome.diagnostics, self.diagnostics.as_mut())?;
            self.diagnostics.flush()?;
        }
        if !outcome.is_success() {
            warn!("Parsing failed, no rules were run");
            return Ok(ExitStatus::FailedInParsingFile);
        }

        let contexts: Vec<AnalysisContext> = outcome
            .units
            .into_iter()
            .filter_map(|unit| match unit.tree {
                Some(tree) => Some(AnalysisContext::new(unit.source_file, tree)),
                None => {
                    debug!("Skipping {}: no syntax tree", unit.source_file.path.display());
                    None
                }
            })
            .collect();

        self.inspect_all(&contexts, configurations);

        let issues = self.ledger.drain();
        let summary = IssueSummary::new(&issues, sources.len());
        info!(
            "Found {} issues in {} of {} files",
            summary.total_issues(),
            summary.number_of_files_with_issues(),
            sources.len()
        );

        render_report(self.reporter.as_ref(), &issues, sources.len(), &mut self.output)?;

        Ok(ExitStatus::from_summary(&summary, thresholds))
    }

    /// Runs every (context, rule) pair. Returns once all inspections finished.
    fn inspect_all(&self, contexts: &[AnalysisContext], configurations: &RuleConfigurations) {
        let ledger = &self.ledger;

        match self.execution {
            Execution::Sequential => {
                for ctx in contexts {
                    for rule in &self.active {
                        rule.inspect(ctx, configurations, ledger);
                    }
                }
            }
            Execution::Parallel { jobs } => {
                let pairs: Vec<(&AnalysisContext, &SharedRule)> = contexts
                    .iter()
                    .flat_map(|ctx| self.active.iter().map(move |rule| (ctx, rule)))
                    .collect();
                let run = || {
                    pairs
                        .par_iter()
                        .for_each(|(ctx, rule)| rule.inspect(ctx, configurations, ledger));
                };

                match jobs.map(|n| rayon::ThreadPoolBuilder::new().num_threads(n).build()) {
                    Some(Ok(pool)) => pool.install(run),
                    Some(Err(e)) => {
                        warn!("Failed to build worker pool, using the global pool: {}", e);
                        run();
                    }
                    None => run(),
                }
            }
        }
    }
}

impl<W> std::fmt::Debug for Driver<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Driver")
            .field("registry", &self.registry)
            .field(
                "active",
                &self.active.iter().map(|r| r.identifier()).collect::<Vec<_>>(),
            )
            .field("execution", &self.execution)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::ParseOutcome;

    struct NoParser;

    impl SourceParser for NoParser {
        fn parse(&self, _sources: &[SourceFile]) -> ParseOutcome {
            ParseOutcome::from_units(Vec::new(), Vec::new())
        }
    }

    #[test]
    fn build_requires_a_parser() {
        let err = Driver::builder().build().unwrap_err();
        assert!(matches!(err, DriverError::MissingParser));
    }

    #[test]
    fn empty_batch_succeeds() {
        let mut driver = Driver::builder()
            .parser(NoParser)
            .reporter(ReporterKind::Xcode)
            .output(Vec::new())
            .build()
            .unwrap();
        let status = driver
            .lint(&[], &RuleConfigurations::default(), &SeverityThresholds::new())
            .unwrap();
        assert_eq!(status, ExitStatus::Success);
        assert!(driver.output().is_empty());
    }
}
