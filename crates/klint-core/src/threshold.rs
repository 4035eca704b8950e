//! Severity thresholds and the exit status they produce.

use crate::types::{IssueSummary, Severity};
use std::collections::HashMap;
use tracing::warn;

/// Maximum tolerated issue count per severity.
///
/// Severities without an override use the built-in defaults
/// (`critical: 0, major: 10, minor: 20, cosmetic: 50`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeverityThresholds {
    overrides: HashMap<Severity, usize>,
}

impl SeverityThresholds {
    /// Thresholds with no overrides.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in threshold for `severity`.
    #[must_use]
    pub fn default_threshold(severity: Severity) -> usize {
        match severity {
            Severity::Critical => 0,
            Severity::Major => 10,
            Severity::Minor => 20,
            Severity::Cosmetic => 50,
        }
    }

    /// Builds thresholds from severity names, ignoring unknown names.
    #[must_use]
    pub fn from_names<S: AsRef<str>>(names: &HashMap<S, usize>) -> Self {
        let mut thresholds = Self::new();
        for (name, max) in names {
            match name.as_ref().parse::<Severity>() {
                Ok(severity) => thresholds.set(severity, *max),
                Err(e) => warn!("Ignoring threshold: {e}"),
            }
        }
        thresholds
    }

    /// Overrides the threshold for one severity.
    #[must_use]
    pub fn with(mut self, severity: Severity, max: usize) -> Self {
        self.set(severity, max);
        self
    }

    /// Overrides the threshold for one severity in place.
    pub fn set(&mut self, severity: Severity, max: usize) {
        self.overrides.insert(severity, max);
    }

    /// Merges `other` on top of `self`; overrides in `other` win.
    pub fn merge(&mut self, other: &Self) {
        self.overrides
            .extend(other.overrides.iter().map(|(s, m)| (*s, *m)));
    }

    /// Effective threshold: the override if present, else the default.
    #[must_use]
    pub fn threshold(&self, severity: Severity) -> usize {
        self.overrides
            .get(&severity)
            .copied()
            .unwrap_or_else(|| Self::default_threshold(severity))
    }

    /// Severities whose issue count exceeds the effective threshold.
    #[must_use]
    pub fn exceeded(&self, summary: &IssueSummary) -> Vec<Severity> {
        Severity::ALL
            .into_iter()
            .filter(|s| summary.number_of_issues(*s) > self.threshold(*s))
            .collect()
    }
}

/// Final status of a lint run. The numeric value is the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ExitStatus {
    /// The run completed within every threshold.
    Success = 0,
    /// The parsing collaborator reported a batch failure; no rule ran.
    FailedInParsingFile = -10,
    /// At least one severity exceeded its threshold.
    TooManyIssues = -20,
}

impl ExitStatus {
    /// Compares a summary against thresholds.
    #[must_use]
    pub fn from_summary(summary: &IssueSummary, thresholds: &SeverityThresholds) -> Self {
        let exceeded = thresholds.exceeded(summary);
        if exceeded.is_empty() {
            Self::Success
        } else {
            for severity in &exceeded {
                warn!(
                    "{} {} issue(s) exceed the threshold of {}",
                    summary.number_of_issues(*severity),
                    severity,
                    thresholds.threshold(*severity)
                );
            }
            Self::TooManyIssues
        }
    }

    /// Numeric exit code.
    #[must_use]
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Returns true for [`ExitStatus::Success`].
    #[must_use]
    pub fn is_success(self) -> bool {
        self == Self::Success
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Issue, Location};

    fn issues(severity: Severity, count: usize) -> Vec<Issue> {
        (0..count)
            .map(|i| {
                Issue::new(
                    Location::new(format!("F{i}.kt"), 1, 1),
                    "r",
                    "c",
                    severity,
                    "m",
                )
            })
            .collect()
    }

    fn status(issues: &[Issue], thresholds: &SeverityThresholds) -> ExitStatus {
        ExitStatus::from_summary(&IssueSummary::new(issues, 1), thresholds)
    }

    #[test]
    fn defaults_apply_without_overrides() {
        let thresholds = SeverityThresholds::new();
        assert_eq!(thresholds.threshold(Severity::Critical), 0);
        assert_eq!(thresholds.threshold(Severity::Major), 10);
        assert_eq!(thresholds.threshold(Severity::Minor), 20);
        assert_eq!(thresholds.threshold(Severity::Cosmetic), 50);
    }

    #[test]
    fn count_equal_to_threshold_passes() {
        let t = SeverityThresholds::new();
        assert_eq!(status(&issues(Severity::Major, 10), &t), ExitStatus::Success);
        assert_eq!(
            status(&issues(Severity::Major, 11), &t),
            ExitStatus::TooManyIssues
        );
    }

    #[test]
    fn any_critical_fails_by_default() {
        let t = SeverityThresholds::new();
        assert_eq!(
            status(&issues(Severity::Critical, 1), &t),
            ExitStatus::TooManyIssues
        );
    }

    #[test]
    fn override_replaces_default_for_that_severity_only() {
        let t = SeverityThresholds::new().with(Severity::Critical, 2);
        assert_eq!(status(&issues(Severity::Critical, 2), &t), ExitStatus::Success);
        assert_eq!(
            status(&issues(Severity::Cosmetic, 51), &t),
            ExitStatus::TooManyIssues
        );
    }

    #[test]
    fn exceeded_lists_every_failing_severity() {
        let mut all = issues(Severity::Critical, 1);
        all.extend(issues(Severity::Minor, 21));
        let summary = IssueSummary::new(&all, 1);
        assert_eq!(
            SeverityThresholds::new().exceeded(&summary),
            vec![Severity::Critical, Severity::Minor]
        );
    }

    #[test]
    fn from_names_ignores_unknown_keys() {
        let names = HashMap::from([("major", 1), ("blocker", 0)]);
        let t = SeverityThresholds::from_names(&names);
        assert_eq!(t.threshold(Severity::Major), 1);
        assert_eq!(t.threshold(Severity::Critical), 0);
    }

    #[test]
    fn merge_prefers_other() {
        let mut base = SeverityThresholds::new().with(Severity::Major, 1);
        base.merge(&SeverityThresholds::new().with(Severity::Major, 4));
        assert_eq!(base.threshold(Severity::Major), 4);
    }

    #[test]
    fn exit_codes_are_distinct() {
        assert_eq!(ExitStatus::Success.code(), 0);
        assert!(ExitStatus::FailedInParsingFile.code() < 0);
        assert!(ExitStatus::TooManyIssues.code() < 0);
        assert_ne!(
            ExitStatus::FailedInParsingFile.code(),
            ExitStatus::TooManyIssues.code()
        );
    }
}
