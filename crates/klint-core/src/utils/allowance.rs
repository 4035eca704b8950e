//! Comment-based suppression directives.
//!
//! Supports directives like:
//! ```text
//! // klint: allow(long_line) reason="generated table"
//! ```
//!
//! A directive applies to its own line when it trails code, and to the next
//! line when it sits on a comment-only line.

use std::collections::HashSet;

/// Result of checking for an allow directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowCheck {
    /// Rule is not allowed.
    Denied,
    /// Rule is allowed with optional reason.
    Allowed {
        /// The reason provided (if any).
        reason: Option<String>,
    },
}

impl AllowCheck {
    /// Returns true if allowed.
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed { .. })
    }

    /// Returns the reason if allowed.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Allowed { reason } => reason.as_deref(),
            Self::Denied => None,
        }
    }
}

#[derive(Debug, Clone)]
struct AllowDirective {
    rules: HashSet<String>,
    reason: Option<String>,
}

impl AllowDirective {
    fn covers(&self, rule_identifier: &str) -> bool {
        self.rules.contains(rule_identifier) || self.rules.contains("all")
    }
}

/// Line index over one file's content, split once and queried per issue.
#[derive(Debug, Clone)]
pub struct SourceLines<'a> {
    lines: Vec<&'a str>,
}

impl<'a> SourceLines<'a> {
    /// Splits `content` into lines.
    #[must_use]
    pub fn new(content: &'a str) -> Self {
        Self {
            lines: content.lines().collect(),
        }
    }

    /// Text of a 1-indexed line.
    #[must_use]
    pub fn get(&self, line: usize) -> Option<&'a str> {
        line.checked_sub(1).and_then(|i| self.lines.get(i)).copied()
    }

    /// Checks whether `rule_identifier` is allowed at a 1-indexed line.
    #[must_use]
    pub fn check_allow(&self, line: usize, rule_identifier: &str) -> AllowCheck {
        let own = self.get(line).and_then(parse_allow_directive);
        let above = line
            .checked_sub(1)
            .and_then(|l| self.get(l))
            .filter(|text| text.trim_start().starts_with("//"))
            .and_then(parse_allow_directive);

        own.into_iter()
            .chain(above)
            .find(|directive| directive.covers(rule_identifier))
            .map_or(AllowCheck::Denied, |directive| AllowCheck::Allowed {
                reason: directive.reason,
            })
    }
}

/// Checks source code for an allow directive covering `rule_identifier`.
///
/// # Arguments
///
/// * `content` - Source code content
/// * `line` - Line number to check (1-indexed)
/// * `rule_identifier` - Identifier of the rule to check for
#[must_use]
pub fn check_allow(content: &str, line: usize, rule_identifier: &str) -> AllowCheck {
    SourceLines::new(content).check_allow(line, rule_identifier)
}

/// Parses the first `// klint:` comment on a line.
fn parse_allow_directive(line: &str) -> Option<AllowDirective> {
    let directive = line.match_indices("//").find_map(|(start, _)| {
        line[start + 2..].trim_start().strip_prefix("klint:")
    })?;
    let allow_content = directive.trim().strip_prefix("allow(")?.trim();
    let paren_end = allow_content.find(')')?;
    let rules: HashSet<String> = allow_content[..paren_end]
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    if rules.is_empty() {
        return None;
    }

    let rest = allow_content[paren_end + 1..].trim();
    let reason = rest
        .strip_prefix("reason=")
        .map(str::trim)
        .and_then(|r| r.strip_prefix('"'))
        .and_then(|r| r.find('"').map(|end| r[..end].to_string()));

    Some(AllowDirective { rules, reason })
}
