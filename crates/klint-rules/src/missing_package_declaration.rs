//! Rule to require a `package` header.
//!
//! # Rationale
//!
//! Files without a package land in the default package, which cannot be
//! imported from named packages and collides across modules.
//!
//! Kotlin scripts (`.kts`) are exempt.

use klint_core::{AnalysisContext, IssueEmitter, IssueLedger, Rule, RuleConfigurations, Severity};
use klint_kotlin::syntax::package_header;

/// Rule identifier for missing-package-declaration.
pub const ID: &str = "missing_package_declaration";

/// Rule name for missing-package-declaration.
pub const NAME: &str = "Missing Package Declaration";

/// Requires `.kt` files to declare a package.
#[derive(Debug, Clone, Default)]
pub struct MissingPackageDeclaration;

impl MissingPackageDeclaration {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for MissingPackageDeclaration {
    fn identifier(&self) -> &'static str {
        ID
    }

    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Requires source files to declare a package"
    }

    fn category(&self) -> &'static str {
        "convention"
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
        let is_script = ctx.path().extension().is_some_and(|ext| ext == "kts");
        if is_script || package_header(&ctx.root()).is_some() {
            return;
        }
        IssueEmitter::new(self, ctx, configurations, ledger).emit(
            1,
            1,
            "File has no package declaration",
        );
    }
}
