//! Report renderers.
//!
//! A [`Reporter`] turns a drained issue set and its summary into text for one
//! output format. The driver assembles the sections with [`render_report`];
//! reporters never write anything themselves.

mod html;
mod json;
mod pmd;
mod text;
mod xcode;

pub use html::HtmlReporter;
pub use json::JsonReporter;
pub use pmd::PmdReporter;
pub use text::TextReporter;
pub use xcode::XcodeReporter;

use crate::types::{Issue, IssueSummary};
use std::io::{self, Write};
use tracing::warn;

/// Tool name printed in report headers and footers.
pub const TOOL_NAME: &str = "klint";

/// Tool version printed in report footers.
pub const TOOL_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Project URL printed in report footers.
pub const TOOL_URL: &str = "https://github.com/klint-rs/klint";

/// Renders one output format. Every operation is side-effect free.
pub trait Reporter: Send + Sync {
    /// Text emitted once before everything else. Empty means no header.
    fn header(&self) -> String {
        String::new()
    }

    /// Renders the run summary. Empty means no summary section.
    fn handle_summary(&self, number_of_total_files: usize, summary: &IssueSummary) -> String;

    /// Renders the issue listing. Empty means no issue section.
    fn handle_issues(&self, issues: &[Issue]) -> String;

    /// Text emitted once after everything else. Empty means no footer.
    fn footer(&self) -> String {
        String::new()
    }

    /// Record separator appended after each section.
    fn separator(&self) -> &str {
        "\n"
    }
}

/// Available report formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReporterKind {
    /// Plain text.
    #[default]
    Text,
    /// Standalone HTML document.
    Html,
    /// JSON document.
    Json,
    /// PMD XML for build tools.
    Pmd,
    /// `file:line:column: warning: message` lines for editors.
    Xcode,
}

impl ReporterKind {
    /// Every kind, in the order shown to users.
    pub const ALL: [ReporterKind; 5] = [
        ReporterKind::Text,
        ReporterKind::Html,
        ReporterKind::Json,
        ReporterKind::Pmd,
        ReporterKind::Xcode,
    ];

    /// Maps a format name to a kind. Unknown names fall back to text.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "text" => Self::Text,
            "html" => Self::Html,
            "json" => Self::Json,
            "pmd" => Self::Pmd,
            "xcode" => Self::Xcode,
            other => {
                warn!("Unknown report type `{other}`, using text");
                Self::Text
            }
        }
    }

    /// Lowercase name of this kind.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Html => "html",
            Self::Json => "json",
            Self::Pmd => "pmd",
            Self::Xcode => "xcode",
        }
    }

    /// Creates a reporter of this kind.
    #[must_use]
    pub fn reporter(self) -> Box<dyn Reporter> {
        match self {
            Self::Text => Box::new(TextReporter::new()),
            Self::Html => Box::new(HtmlReporter::new()),
            Self::Json => Box::new(JsonReporter::new()),
            Self::Pmd => Box::new(PmdReporter::new()),
            Self::Xcode => Box::new(XcodeReporter::new()),
        }
    }
}

impl From<&str> for ReporterKind {
    fn from(name: &str) -> Self {
        Self::from_name(name)
    }
}

impl std::fmt::Display for ReporterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Writes header, summary, issues and footer to `out`.
///
/// Each non-empty section is followed by the reporter's separator, and
/// consecutive sections are split by one extra separator. Empty sections
/// are skipped entirely.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn render_report<W: Write + ?Sized>(
    reporter: &dyn Reporter,
    issues: &[Issue],
    number_of_total_files: usize,
    out: &mut W,
) -> io::Result<()> {
    let summary = IssueSummary::new(issues, number_of_total_files);
    let sections = [
        reporter.header(),
        reporter.handle_summary(number_of_total_files, &summary),
        reporter.handle_issues(issues),
        reporter.footer(),
    ];
    write_sections(reporter.separator(), &sections, out)
}

fn write_sections<W: Write + ?Sized>(
    separator: &str,
    sections: &[String],
    out: &mut W,
) -> io::Result<()> {
    let mut first = true;
    for section in sections.iter().filter(|s| !s.is_empty()) {
        if !first {
            out.write_all(separator.as_bytes())?;
        }
        out.write_all(section.as_bytes())?;
        out.write_all(separator.as_bytes())?;
        first = false;
    }
    out.flush()
}

/// Escapes text for HTML and XML bodies and attribute values.
pub(crate) fn escape_markup(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Timestamp format shared by footers.
pub(crate) fn format_timestamp(at: &chrono::DateTime<chrono::Local>) -> String {
    at.format("%Y-%m-%d %H:%M:%S %z").to_string()
}
