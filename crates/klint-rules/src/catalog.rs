//! The built-in rule catalog.

use crate::{
    ClassNaming, LongFile, LongLine, MissingPackageDeclaration, NoWildcardImport,
    TooManyParameters, TrailingWhitespace,
};
use klint_core::{RuleBox, RuleRegistry};

/// Returns every built-in rule, in catalog order.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    vec![
        Box::new(LongLine::new()),
        Box::new(LongFile::new()),
        Box::new(TrailingWhitespace::new()),
        Box::new(NoWildcardImport::new()),
        Box::new(ClassNaming::new()),
        Box::new(MissingPackageDeclaration::new()),
        Box::new(TooManyParameters::new()),
    ]
}

/// Registry over [`all_rules`].
#[must_use]
pub fn registry() -> RuleRegistry {
    RuleRegistry::new(all_rules())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalog_order_is_stable() {
        let ids: Vec<&str> = registry().identifiers().collect();
        assert_eq!(
            ids,
            vec![
                "long_line",
                "long_file",
                "trailing_whitespace",
                "no_wildcard_import",
                "class_naming",
                "missing_package_declaration",
                "too_many_parameters",
            ]
        );
    }

    #[test]
    fn identifiers_are_unique_and_described() {
        let rules = all_rules();
        let ids: HashSet<&str> = rules.iter().map(|r| r.identifier()).collect();
        assert_eq!(ids.len(), rules.len());
        assert!(rules.iter().all(|r| !r.description().is_empty()));
        assert!(rules.iter().all(|r| !r.category().is_empty()));
    }
}
