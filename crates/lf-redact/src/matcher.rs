//! Case-insensitive substring matching of field names.

use std::fmt;

/// An ordered set of field-name patterns.
///
/// A key matches when its lowercased form contains the lowercased form of at
/// least one pattern. An empty set never matches; an empty pattern matches
/// every key.
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    patterns: Vec<String>,
    lowered: Vec<String>,
}

impl PatternSet {
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let patterns: Vec<String> = patterns.into_iter().map(Into::into).collect();
        let lowered = patterns.iter().map(|p| p.to_lowercase()).collect();
        Self { patterns, lowered }
    }

    pub fn matches(&self, key: &str) -> bool {
        if self.lowered.is_empty() {
            return false;
        }
        let key = key.to_lowercase();
        self.lowered.iter().any(|pattern| key.contains(pattern.as_str()))
    }

    /// Patterns as supplied, in order.
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// How a field name is treated by a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyVerdict {
    /// On the blacklist and not whitelisted: the value is replaced.
    Sensitive,
    /// On both lists: the whitelist wins and the value is kept.
    Whitelisted,
    /// On neither list.
    Plain,
}

impl KeyVerdict {
    pub fn is_redacted(&self) -> bool {
        matches!(self, KeyVerdict::Sensitive)
    }
}

impl fmt::Display for KeyVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            KeyVerdict::Sensitive => "sensitive",
            KeyVerdict::Whitelisted => "whitelisted",
            KeyVerdict::Plain => "plain",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substring_case_insensitive() {
        let set = PatternSet::new(["Token", "pass"]);
        assert!(set.matches("accessToken"));
        assert!(set.matches("REFRESH_TOKEN"));
        assert!(set.matches("Password"));
        assert!(!set.matches("username"));
    }

    #[test]
    fn test_empty_set_never_matches() {
        let set = PatternSet::new(Vec::<String>::new());
        assert!(set.is_empty());
        assert!(!set.matches(""));
        assert!(!set.matches("password"));
    }

    #[test]
    fn test_empty_pattern_matches_everything() {
        let set = PatternSet::new([""]);
        assert!(set.matches("anything"));
        assert!(set.matches(""));
    }

    #[test]
    fn test_patterns_keep_original_case() {
        let set = PatternSet::new(["ApiKey"]);
        assert_eq!(set.patterns(), &["ApiKey".to_string()]);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_verdict_display() {
        assert_eq!(KeyVerdict::Sensitive.to_string(), "sensitive");
        assert_eq!(KeyVerdict::Whitelisted.to_string(), "whitelisted");
        assert_eq!(KeyVerdict::Plain.to_string(), "plain");
        assert!(KeyVerdict::Sensitive.is_redacted());
        assert!(!KeyVerdict::Whitelisted.is_redacted());
    }
}
