//! Input file handling
//!
//! The input is UTF-8 text with one domain per line. Blank lines are
//! skipped; every other line yields exactly one result row.

use crate::FinderError;
use std::path::Path;

/// Reads the domain list from a file
///
/// # Returns
///
/// * `Ok(Vec<String>)` - Non-blank lines, trimmed, in file order
/// * `Err(FinderError::Input)` - The file is missing or unreadable
pub fn read_domains(path: &Path) -> Result<Vec<String>, FinderError> {
    let content = std::fs::read_to_string(path).map_err(|source| FinderError::Input {
        path: path.display().to_string(),
        source,
    })?;

    Ok(parse_domain_list(&content))
}

/// Splits input text into domains, dropping blank lines
///
/// # Examples
///
/// ```
/// use sitemap_finder::input::parse_domain_list;
///
/// let domains = parse_domain_list("example.com\n\n  https://other.org/ \n");
/// assert_eq!(domains, vec!["example.com", "https://other.org/"]);
/// ```
pub fn parse_domain_list(content: &str) -> Vec<String> {
    let content = content.strip_prefix('\u{FEFF}').unwrap_or(content);
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
