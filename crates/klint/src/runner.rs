//! Turns a [`Config`] into a ready-to-run driver.

use klint_core::{
    Config, Driver, DriverBuilder, DriverError, EngineConfig, Execution, ExitStatus,
    ReporterKind, RuleConfigurations, SeverityThresholds, SourceFile,
};
use klint_kotlin::KotlinParser;
use std::io::{Stdout, Write};
use tracing::debug;

/// A driver over the built-in catalog plus the options of one [`Config`].
pub struct Runner<W = Stdout> {
    driver: Driver<W>,
    configurations: RuleConfigurations,
    thresholds: SeverityThresholds,
}

impl Runner<Stdout> {
    /// Builds a runner writing the report to stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver cannot be built.
    pub fn from_config(config: &Config) -> Result<Self, DriverError> {
        Self::from_config_with(config, |builder| builder)
    }

    /// Builds a runner after letting `customize` adjust the driver builder,
    /// e.g. to redirect output or disable colors.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver cannot be built.
    pub fn from_config_with<W, F>(config: &Config, customize: F) -> Result<Runner<W>, DriverError>
    where
        W: Write,
        F: FnOnce(DriverBuilder<Stdout>) -> DriverBuilder<W>,
    {
        let builder = Driver::builder()
            .parser(KotlinParser::new())
            .rules(klint_rules::all_rules())
            .reporter(reporter_kind(config))
            .execution(execution(&config.engine));

        let mut driver = customize(builder).build()?;

        let identifiers = config.rule_identifiers(driver.registry().identifiers());
        debug!("Requested rules: {:?}", identifiers);
        driver.register_rules(&identifiers);

        Ok(Runner {
            driver,
            configurations: config.rule_configurations(),
            thresholds: config.severity_thresholds(),
        })
    }
}

impl<W: Write> Runner<W> {
    /// Overrides thresholds on top of the configured ones.
    pub fn merge_thresholds(&mut self, overrides: &SeverityThresholds) {
        self.thresholds.merge(overrides);
    }

    /// Effective thresholds.
    #[must_use]
    pub fn thresholds(&self) -> &SeverityThresholds {
        &self.thresholds
    }

    /// The underlying driver.
    #[must_use]
    pub fn driver(&self) -> &Driver<W> {
        &self.driver
    }

    /// Mutable access to the underlying driver.
    pub fn driver_mut(&mut self) -> &mut Driver<W> {
        &mut self.driver
    }

    /// Consumes the runner, returning the driver.
    pub fn into_driver(self) -> Driver<W> {
        self.driver
    }

    /// Lints `sources` with the configured rules, options and thresholds.
    ///
    /// # Errors
    ///
    /// Returns an error if writing the report fails.
    pub fn lint(&mut self, sources: &[SourceFile]) -> Result<ExitStatus, DriverError> {
        self.driver
            .lint(sources, &self.configurations, &self.thresholds)
    }
}

impl<W> std::fmt::Debug for Runner<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runner")
            .field("driver", &self.driver)
            .field("thresholds", &self.thresholds)
            .finish_non_exhaustive()
    }
}

/// Reporter selected by `report-type`, text when unset or unknown.
#[must_use]
pub fn reporter_kind(config: &Config) -> ReporterKind {
    config
        .report_type
        .as_deref()
        .map_or(ReporterKind::Text, ReporterKind::from_name)
}

/// Execution strategy selected by the `[engine]` table.
#[must_use]
pub fn execution(engine: &EngineConfig) -> Execution {
    if engine.parallel {
        Execution::Parallel { jobs: engine.jobs }
    } else {
        Execution::Sequential
    }
}
