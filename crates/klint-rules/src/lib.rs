//! # klint-rules
//!
//! Built-in Kotlin lint rules for klint.
//!
//! ## Available Rules
//!
//! | Identifier | Category | Severity | Description |
//! |------------|----------|----------|-------------|
//! | `long_line` | size | minor | Lines longer than `max` characters (100) |
//! | `long_file` | size | minor | Files longer than `max` lines (1000) |
//! | `trailing_whitespace` | readability | cosmetic | Lines ending in spaces or tabs |
//! | `no_wildcard_import` | bad practice | minor | `import foo.*` |
//! | `class_naming` | naming | cosmetic | Class, interface and object names that are not PascalCase |
//! | `missing_package_declaration` | convention | cosmetic | `.kt` files without a `package` header |
//! | `too_many_parameters` | size | major | Functions with more than `max` parameters (10) |
//!
//! ## Usage
//!
//! ```ignore
//! use klint_core::Driver;
//! use klint_kotlin::KotlinParser;
//!
//! let driver = Driver::builder()
//!     .parser(KotlinParser::new())
//!     .rules(klint_rules::all_rules())
//!     .build()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod catalog;
mod class_naming;
mod long_file;
mod long_line;
mod missing_package_declaration;
mod no_wildcard_import;
mod too_many_parameters;
mod trailing_whitespace;

pub use catalog::{all_rules, registry};
pub use class_naming::ClassNaming;
pub use long_file::LongFile;
pub use long_line::LongLine;
pub use missing_package_declaration::MissingPackageDeclaration;
pub use no_wildcard_import::NoWildcardImport;
pub use too_many_parameters::TooManyParameters;
pub use trailing_whitespace::TrailingWhitespace;

/// Re-export core types for convenience.
pub use klint_core::{Rule, RuleBox, Severity};

use klint_core::RuleConfigurations;
use tracing::warn;

/// Reads a non-negative `key` option for `rule_identifier`, else `default`.
pub(crate) fn limit_option(
    configurations: &RuleConfigurations,
    rule_identifier: &str,
    key: &str,
    default: usize,
) -> usize {
    let fallback = i64::try_from(default).unwrap_or(i64::MAX);
    let value = configurations.int_option(rule_identifier, key, fallback);
    usize::try_from(value).unwrap_or_else(|_| {
        warn!("Ignoring negative `{key}` = {value} for {rule_identifier}, using {default}");
        default
    })
}

#[cfg(test)]
pub(crate) mod test_support {
    use klint_core::{AnalysisContext, Issue, IssueLedger, Rule, RuleConfigurations, SourceFile};
    use klint_kotlin::KotlinParser;

    /// Runs `rule` over `src` parsed as `path`, returning issues in location order.
    pub fn inspect_file(
        rule: &dyn Rule,
        path: &str,
        src: &str,
        configurations: &RuleConfigurations,
    ) -> Vec<Issue> {
        let (unit, _) = KotlinParser::new().parse_file(&SourceFile::new(path, src));
        let tree = unit.tree.expect("kotlin source should produce a tree");
        let ctx = AnalysisContext::new(unit.source_file, tree);
        let ledger = IssueLedger::new();
        rule.inspect(&ctx, configurations, &ledger);

        let mut issues = ledger.drain();
        issues.sort_by(|a, b| a.location().cmp(b.location()));
        issues
    }

    /// Runs `rule` over `src` with default configuration.
    pub fn check(rule: &dyn Rule, src: &str) -> Vec<Issue> {
        inspect_file(rule, "Test.kt", src, &RuleConfigurations::default())
    }
}
