//! Sorting comparison logic
//!
//! Pure functions for comparing keys across the sort fields.

use std::cmp::Ordering;

use crate::api::{KeyRecord, TTL_MISSING, TTL_PERSISTENT};
use crate::model::types::SortSpec;
use crate::{SortField, SortOrder};

/// Numeric key used when sorting by TTL
///
/// Keys that never expire sort after every finite TTL, and missing keys
/// sort after those.
///
/// # Examples
/// ```
/// use keytui::logic::sorting::ttl_sort_key;
///
/// assert!(ttl_sort_key(-1) > ttl_sort_key(1_000_000));
/// assert!(ttl_sort_key(-2) > ttl_sort_key(-1));
/// assert!(ttl_sort_key(5) < ttl_sort_key(100));
/// ```
pub fn ttl_sort_key(ttl_seconds: i64) -> i64 {
    match ttl_seconds {
        TTL_PERSISTENT => i64::MAX - 1,
        TTL_MISSING => i64::MAX,
        other => other,
    }
}

/// Compare two keys according to the sort spec
///
/// # Sort Rules
/// - Name and type compare case-insensitively, by lowercase code point (not locale collation)
/// - TTL and size compare numerically (see `ttl_sort_key`)
/// - Descending order reverses the comparison
/// - Equal keys compare `Equal`; a stable sort keeps their prior order
pub fn compare_keys(a: &KeyRecord, b: &KeyRecord, spec: SortSpec) -> Ordering {
    let result = match spec.field {
        SortField::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        SortField::Type => a.key_type.as_str().cmp(b.key_type.as_str()),
        SortField::Ttl => ttl_sort_key(a.ttl_seconds).cmp(&ttl_sort_key(b.ttl_seconds)),
        SortField::Size => a.size_bytes.cmp(&b.size_bytes),
    };

    match spec.order {
        SortOrder::Asc => result,
        SortOrder::Desc => result.reverse(),
    }
}

/// Stable in-place sort of view indices into `keys`
pub fn sort_indices(indices: &mut [usize], keys: &[KeyRecord], spec: SortSpec) {
    indices.sort_by(|&a, &b| compare_keys(&keys[a], &keys[b], spec));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::KeyType;

    fn spec(field: SortField, order: SortOrder) -> SortSpec {
        SortSpec { field, order }
    }

    #[test]
    fn test_name_case_insensitive() {
        let a = KeyRecord::new("apple", KeyType::String, -1, 0);
        let b = KeyRecord::new("Banana", KeyType::String, -1, 0);
        assert_eq!(compare_keys(&a, &b, spec(SortField::Name, SortOrder::Asc)), Ordering::Less);
        assert_eq!(compare_keys(&a, &b, spec(SortField::Name, SortOrder::Desc)), Ordering::Greater);
    }

    #[test]
    fn test_type_ordering() {
        let hash = KeyRecord::new("x", KeyType::Hash, -1, 0);
        let string = KeyRecord::new("y", KeyType::String, -1, 0);
        assert_eq!(compare_keys(&hash, &string, spec(SortField::Type, SortOrder::Asc)), Ordering::Less);
    }

    #[test]
    fn test_ttl_never_expires_sorts_last_ascending() {
        let keys = vec![
            KeyRecord::new("x", KeyType::String, 100, 0),
            KeyRecord::new("y", KeyType::String, -1, 0),
            KeyRecord::new("z", KeyType::String, 5, 0),
        ];
        let mut indices: Vec<usize> = (0..keys.len()).collect();
        sort_indices(&mut indices, &keys, spec(SortField::Ttl, SortOrder::Asc));
        let order: Vec<&str> = indices.iter().map(|&i| keys[i].name.as_str()).collect();
        assert_eq!(order, vec!["z", "x", "y"]);
    }

    #[test]
    fn test_ttl_descending_puts_persistent_first() {
        let keys = vec![
            KeyRecord::new("x", KeyType::String, 100, 0),
            KeyRecord::new("y", KeyType::String, -1, 0),
            KeyRecord::new("m", KeyType::String, -2, 0),
        ];
        let mut indices: Vec<usize> = (0..keys.len()).collect();
        sort_indices(&mut indices, &keys, spec(SortField::Ttl, SortOrder::Desc));
        let order: Vec<&str> = indices.iter().map(|&i| keys[i].name.as_str()).collect();
        assert_eq!(order, vec!["m", "y", "x"]);
    }

    #[test]
    fn test_size_numeric() {
        let small = KeyRecord::new("s", KeyType::String, -1, 9);
        let large = KeyRecord::new("l", KeyType::String, -1, 10);
        assert_eq!(compare_keys(&small, &large, spec(SortField::Size, SortOrder::Asc)), Ordering::Less);
    }

    #[test]
    fn test_ties_keep_prior_order() {
        let keys = vec![
            KeyRecord::new("Key", KeyType::String, -1, 0),
            KeyRecord::new("key", KeyType::String, -1, 0),
        ];
        let mut indices = vec![1, 0];
        sort_indices(&mut indices, &keys, spec(SortField::Name, SortOrder::Asc));
        assert_eq!(indices, vec![1, 0]);
        sort_indices(&mut indices, &keys, spec(SortField::Name, SortOrder::Desc));
        assert_eq!(indices, vec![1, 0]);
    }
}
