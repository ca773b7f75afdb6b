//! Report renderers
//!
//! A renderer only ever sees a complete [`ReviewReport`].

pub mod markdown;

pub use markdown::render_markdown;

use crate::report::ReviewReport;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Output format of a rendered report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    /// Markdown for pull request comments
    #[default]
    Markdown,
    /// Pretty-printed JSON
    Json,
}

impl OutputFormat {
    /// All formats
    pub const ALL: [OutputFormat; 2] = [OutputFormat::Markdown, OutputFormat::Json];

    /// Format name
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Markdown => "markdown",
            OutputFormat::Json => "json",
        }
    }

    /// Render a report in this format
    ///
    /// # Errors
    /// Returns error if JSON serialization fails
    pub fn render(self, report: &ReviewReport) -> Result<String, serde_json::Error> {
        match self {
            OutputFormat::Markdown => Ok(render_markdown(report)),
            OutputFormat::Json => render_json(report),
        }
    }
}

impl Display for OutputFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OutputFormat::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| format!("unknown output format: {s}"))
    }
}

/// Render a report as pretty-printed JSON
///
/// # Errors
/// Returns error if serialization fails
pub fn render_json(report: &ReviewReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}
