use serde::{Serialize, Serializer};
use std::collections::HashSet;

/// Insertion-ordered set of URLs, deduplicated by exact string
///
/// Iteration order is discovery order. A URL seen twice keeps its first position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlSet {
    order: Vec<String>,
    seen: HashSet<String>,
}

impl UrlSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a URL, returning false if it was already present
    pub fn insert(&mut self, url: impl Into<String>) -> bool {
        let url = url.into();
        if self.seen.contains(&url) {
            return false;
        }
        self.seen.insert(url.clone());
        self.order.push(url);
        true
    }

    /// Inserts every URL from an iterator, keeping first-seen order
    pub fn extend<I, S>(&mut self, urls: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for url in urls {
            self.insert(url);
        }
    }

    pub fn contains(&self, url: &str) -> bool {
        self.seen.contains(url)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.order
    }

    pub fn into_vec(self) -> Vec<String> {
        self.order
    }
}

impl FromIterator<String> for UrlSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut set = UrlSet::new();
        set.extend(iter);
        set
    }
}

impl Serialize for UrlSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.order.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_order() {
        let mut set = UrlSet::new();
        set.insert("https://example.com/b");
        set.insert("https://example.com/a");
        set.insert("https://example.com/c");

        assert_eq!(
            set.as_slice(),
            &[
                "https://example.com/b".to_string(),
                "https://example.com/a".to_string(),
                "https://example.com/c".to_string(),
            ]
        );
    }

    #[test]
    fn test_duplicate_keeps_first_position() {
        let mut set = UrlSet::new();
        assert!(set.insert("https://example.com/a"));
        assert!(set.insert("https://example.com/b"));
        assert!(!set.insert("https://example.com/a"));

        assert_eq!(set.len(), 2);
        assert_eq!(set.iter().next(), Some("https://example.com/a"));
    }

    #[test]
    fn test_dedup_is_exact_string() {
        let mut set = UrlSet::new();
        set.insert("https://example.com/a");
        set.insert("https://example.com/a/");
        set.insert("http://example.com/a");
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_serializes_as_array() {
        let set: UrlSet = vec!["https://x/1".to_string(), "https://x/1".to_string()]
            .into_iter()
            .collect();
        assert_eq!(serde_json::to_string(&set).unwrap(), r#"["https://x/1"]"#);
    }
}
