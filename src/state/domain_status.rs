/// Domain status definitions for discovery results
use serde::{Deserialize, Serialize};
use std::fmt;

/// Terminal outcome of discovering sitemaps for one domain
///
/// "No sitemap found" is a `Success`; `Error` is reserved for invalid input,
/// unreachable domains, and internal failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DomainStatus {
    Success,
    Error,
}

impl DomainStatus {
    /// Returns the string written to reports
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

impl fmt::Display for DomainStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
