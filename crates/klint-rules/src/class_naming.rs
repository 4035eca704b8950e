//! Rule to enforce PascalCase type names.
//!
//! # Rationale
//!
//! Kotlin coding conventions name classes, interfaces and objects in
//! PascalCase. Mixed styles make types hard to tell apart from values.
//!
//! # Detected Patterns
//!
//! - `class user_profile`
//! - `object factory`
//! - `interface Data_Source`

use klint_core::{AnalysisContext, IssueEmitter, IssueLedger, Rule, RuleConfigurations, Severity};
use klint_kotlin::syntax::{child_of_kind, declaration_name, descendants_of_kind, position};
use tree_sitter::Node;

/// Rule identifier for class-naming.
pub const ID: &str = "class_naming";

/// Rule name for class-naming.
pub const NAME: &str = "Class Naming";

/// Requires PascalCase class, interface and object names.
#[derive(Debug, Clone, Default)]
pub struct ClassNaming;

impl ClassNaming {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

fn is_pascal_case(name: &str) -> bool {
    let name = name.trim_matches('`');
    name.chars().next().is_some_and(char::is_uppercase)
        && name.chars().all(char::is_alphanumeric)
}

fn declaration_label(node: &Node<'_>) -> &'static str {
    if node.kind() == "object_declaration" {
        "Object"
    } else if child_of_kind(node, "interface").is_some() {
        "Interface"
    } else {
        "Class"
    }
}

impl Rule for ClassNaming {
    fn identifier(&self) -> &'static str {
        ID
    }

    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Requires PascalCase class, interface and object names"
    }

    fn category(&self) -> &'static str {
        "naming"
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
        let src = ctx.content();
        let emitter = IssueEmitter::new(self, ctx, configurations, ledger);

        for decl in descendants_of_kind(ctx.root(), &["class_declaration", "object_declaration"]) {
            let Some(name) = declaration_name(&decl, src) else {
                continue;
            };
            if is_pascal_case(name) {
                continue;
            }
            let (line, column) = position(&decl, src);
            emitter.emit(
                line,
                column,
                format!(
                    "{} `{}` should be named in PascalCase",
                    declaration_label(&decl),
                    name
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::check;

    #[test]
    fn test_pascal_case_detection() {
        assert!(is_pascal_case("UserProfile"));
        assert!(is_pascal_case("Http2Client"));
        assert!(is_pascal_case("`Quoted`"));
        assert!(!is_pascal_case("userProfile"));
        assert!(!is_pascal_case("User_Profile"));
        assert!(!is_pascal_case(""));
    }

    #[test]
    fn test_detects_bad_names() {
        let src = "class user_profile\nobject factory\ninterface Data_Source\nclass Good\n";
        let issues = check(&ClassNaming, src);
        let messages: Vec<&str> = issues.iter().map(|i| i.message()).collect();
        assert_eq!(
            messages,
            vec![
                "Class `user_profile` should be named in PascalCase",
                "Object `factory` should be named in PascalCase",
                "Interface `Data_Source` should be named in PascalCase",
            ]
        );
        assert_eq!(issues[2].location().line, 3);
    }

    #[test]
    fn test_checks_nested_declarations() {
        let src = "class Outer {\n    class inner\n}\n";
        let issues = check(&ClassNaming, src);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].location().line, 2);
        assert_eq!(issues[0].location().column, 5);
    }
}
