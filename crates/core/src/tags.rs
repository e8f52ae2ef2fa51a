//! Resource tag sets with case-insensitive key lookup.
//!
//! Cloud providers hand tags back as an unordered list of key/value pairs
//! and treat keys as case-sensitive, so `environment` and `Environment`
//! can both be present on one resource.

use std::collections::BTreeMap;

/// Tag key/value pairs attached to a managed resource.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet {
    tags: BTreeMap<String, String>,
}

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a tag, replacing any previous value stored under the exact key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.tags.insert(key.into(), value.into());
    }

    /// `true` if any tag whose key equals `key` (any case) has a value
    /// equal to `expected` (any case).
    ///
    /// Every case variant of the key is checked, so a blocking value can
    /// never be hidden behind a differently-cased duplicate. A missing tag
    /// never matches.
    pub fn value_equals(&self, key: &str, expected: &str) -> bool {
        let key = key.to_lowercase();
        let expected = expected.to_lowercase();
        self.tags
            .iter()
            .any(|(k, v)| k.to_lowercase() == key && v.to_lowercase() == expected)
    }

    /// Number of tags, counting case variants of a key separately.
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for TagSet
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = TagSet::new();
        for (k, v) in iter {
            set.insert(k, v);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_ignores_key_case() {
        let tags: TagSet = [("environment", "production")].into_iter().collect();
        assert!(tags.value_equals("Environment", "production"));
        assert!(tags.value_equals("ENVIRONMENT", "production"));
        assert!(!tags.value_equals("Owner", "production"));
    }

    #[test]
    fn value_equals_ignores_value_case() {
        let tags: TagSet = [("Persistent", "TRUE")].into_iter().collect();
        assert!(tags.value_equals("persistent", "true"));
        assert!(!tags.value_equals("persistent", "false"));
        assert!(!tags.value_equals("Environment", ""));
    }

    #[test]
    fn any_case_variant_of_a_key_can_match() {
        let tags: TagSet = [("environment", "production"), ("Environment", "dev")]
            .into_iter()
            .collect();
        assert_eq!(tags.len(), 2);
        assert!(tags.value_equals("Environment", "production"));
        assert!(tags.value_equals("Environment", "dev"));

        let tags: TagSet = [("autostop", "false"), ("AutoStop", "true")]
            .into_iter()
            .collect();
        assert!(tags.value_equals("AutoStop", "false"));
    }

    #[test]
    fn empty_tag_value_matches_empty_expected() {
        let tags: TagSet = [("Owner", "")].into_iter().collect();
        assert!(tags.value_equals("owner", ""));
    }

    #[test]
    fn empty_set() {
        let tags = TagSet::new();
        assert!(tags.is_empty());
        assert!(!tags.value_equals("Environment", "production"));
    }
}
