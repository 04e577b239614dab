//! The caller-supplied entity identifier set.

use std::collections::BTreeSet;

/// The set of entity identifiers submitted by the caller.
///
/// Bound into query evaluation as the `$ids` variable. jq has no set type,
/// so at the binding seam the set is rendered as an object keying each
/// identifier's decimal form to `0`: membership is tested with `has`, and
/// the value carries no meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdSet(BTreeSet<i64>);

impl IdSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `id` was requested.
    pub fn contains(&self, id: i64) -> bool {
        self.0.contains(&id)
    }

    /// Number of distinct identifiers.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no identifiers were requested.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Render the set as the JSON object bound to `$ids`.
    pub(crate) fn to_binding(&self) -> serde_json::Value {
        let entries = self
            .0
            .iter()
            .map(|id| (id.to_string(), serde_json::Value::from(0)));
        serde_json::Value::Object(entries.collect())
    }
}

impl FromIterator<i64> for IdSet {
    fn from_iter<I: IntoIterator<Item = i64>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<Vec<i64>> for IdSet {
    fn from(ids: Vec<i64>) -> Self {
        ids.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicates_collapse() {
        let ids: IdSet = [3, 7, 3, 7].into_iter().collect();
        assert_eq!(ids.len(), 2);
        assert!(ids.contains(3));
        assert!(ids.contains(7));
        assert!(!ids.contains(5));
    }

    #[test]
    fn test_binding_shape() {
        let ids: IdSet = vec![3, 7].into();
        assert_eq!(
            ids.to_binding(),
            serde_json::json!({"3": 0, "7": 0})
        );
    }

    #[test]
    fn test_empty_binding_is_empty_object() {
        assert_eq!(IdSet::new().to_binding(), serde_json::json!({}));
    }

    #[test]
    fn test_negative_ids_keep_sign_in_key() {
        let ids: IdSet = vec![-4].into();
        assert_eq!(ids.to_binding(), serde_json::json!({"-4": 0}));
    }
}
