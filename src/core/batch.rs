//! Grouping and batching of SSM references.

use std::collections::BTreeMap;

use crate::core::types::{LookupKey, VarName};

/// Variables waiting on each distinct lookup key.
///
/// Several variables may reference the same key; the key is fetched once
/// and the value fans out to all of them.
#[derive(Debug, Default, Clone)]
pub struct PendingGroups {
    groups: BTreeMap<LookupKey, Vec<VarName>>,
}

impl PendingGroups {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `name` references `key`.
    pub fn insert(&mut self, key: LookupKey, name: VarName) {
        self.groups.entry(key).or_default().push(name);
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Variables referencing `key`.
    pub fn names(&self, key: &str) -> &[VarName] {
        self.groups.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&LookupKey, &[VarName])> {
        self.groups.iter().map(|(k, v)| (k, v.as_slice()))
    }

    /// Partition the distinct keys into batches of at most `size`.
    ///
    /// Every key lands in exactly one batch. An empty group yields no
    /// batches.
    pub fn batches(&self, size: usize) -> Vec<Vec<LookupKey>> {
        let keys: Vec<LookupKey> = self.groups.keys().cloned().collect();
        keys.chunks(size.max(1)).map(<[_]>::to_vec).collect()
    }
}

impl FromIterator<(LookupKey, VarName)> for PendingGroups {
    fn from_iter<I: IntoIterator<Item = (LookupKey, VarName)>>(iter: I) -> Self {
        let mut groups = Self::new();
        for (key, name) in iter {
            groups.insert(key, name);
        }
        groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(key: &str, name: &str) -> (LookupKey, VarName) {
        (key.to_string(), name.to_string())
    }

    #[test]
    fn test_duplicate_keys_share_one_entry() {
        let groups: PendingGroups = [pair("/x", "A"), pair("/x", "B"), pair("/y", "C")]
            .into_iter()
            .collect();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups.names("/x"), ["A".to_string(), "B".to_string()]);
        assert_eq!(groups.batches(10), vec![vec!["/x".to_string(), "/y".to_string()]]);
    }

    #[test]
    fn test_versioned_keys_are_distinct() {
        let groups: PendingGroups = [pair("/x", "A"), pair("/x:2", "B")].into_iter().collect();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups.names("/x:2"), ["B".to_string()]);
    }

    #[test]
    fn test_empty_groups_yield_no_batches() {
        assert!(PendingGroups::new().batches(10).is_empty());
        assert!(PendingGroups::new().names("/x").is_empty());
    }

    #[test]
    fn test_batches_respect_size() {
        let groups: PendingGroups = (0..25)
            .map(|i| pair(&format!("/k{:02}", i), &format!("V{}", i)))
            .collect();
        let batches = groups.batches(10);
        let sizes: Vec<usize> = batches.iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![10, 10, 5]);
    }
}
