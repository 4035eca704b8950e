//! # klint-core
//!
//! Lint engine over `tree-sitter` syntax trees.
//!
//! This crate is grammar-agnostic. It provides:
//!
//! - [`Rule`] trait and [`RuleRegistry`] for selecting active rules
//! - [`IssueLedger`], the concurrent append-only issue store of one run
//! - [`Driver`] for orchestrating parse, inspection, reporting and exit status
//! - [`Reporter`] implementations for text, HTML, JSON, PMD and Xcode output
//! - [`SeverityThresholds`] and [`ExitStatus`] for CI policies
//!
//! ## Example
//!
//! ```ignore
//! use klint_core::{Driver, RuleConfigurations, SeverityThresholds, SourceFile};
//!
//! let mut driver = Driver::builder()
//!     .parser(MyParser::new())
//!     .rule(MyRule)
//!     .build()?;
//!
//! let sources = vec![SourceFile::read("src/Main.kt")?];
//! let status = driver.lint(&sources, &RuleConfigurations::default(), &SeverityThresholds::new())?;
//! std::process::exit(status.code());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod context;
mod diagnostic;
mod driver;
mod ledger;
mod parse;
mod rule;
mod threshold;
mod types;

/// Report renderers.
pub mod reporter;

/// Utility modules for rule implementations.
pub mod utils;

pub use config::{Config, ConfigError, EngineConfig, RuleConfig, RuleConfigurations};
pub use context::{AnalysisContext, SourceFile};
pub use diagnostic::DiagnosticRenderer;
pub use driver::{Driver, DriverBuilder, DriverError, Execution};
pub use ledger::IssueLedger;
pub use parse::{
    DiagnosticLevel, DiagnosticLocation, ParseDiagnostic, ParseOutcome, ParseStatus, ParsedUnit,
    SourceParser,
};
pub use reporter::{Reporter, ReporterKind};
pub use rule::{IssueEmitter, Rule, RuleBox, RuleRegistry, SharedRule};
pub use threshold::{ExitStatus, SeverityThresholds};
pub use types::{sorted_issues, Issue, IssueSummary, Location, Severity, UnknownSeverity};
pub use utils::allowance::AllowCheck;
