//! Key filter predicates
//!
//! Pure functions deciding whether a key passes the active filter.

use crate::api::{KeyRecord, TTL_PERSISTENT};
use crate::logic::pattern::KeyPattern;
use crate::model::types::{FilterSpec, TtlClass, SOON_THRESHOLD_SECS};

/// Whether a TTL snapshot falls into the given class
///
/// # Examples
/// ```
/// use keytui::logic::filter::ttl_class_matches;
/// use keytui::model::TtlClass;
///
/// assert!(ttl_class_matches(TtlClass::Persistent, -1));
/// assert!(ttl_class_matches(TtlClass::Soon, 3600));
/// assert!(!ttl_class_matches(TtlClass::Soon, 3601));
/// assert!(!ttl_class_matches(TtlClass::Expiring, -2));
/// ```
pub fn ttl_class_matches(class: TtlClass, ttl_seconds: i64) -> bool {
    match class {
        TtlClass::All => true,
        TtlClass::Persistent => ttl_seconds == TTL_PERSISTENT,
        TtlClass::Expiring => ttl_seconds > 0,
        TtlClass::Soon => ttl_seconds > 0 && ttl_seconds <= SOON_THRESHOLD_SECS,
    }
}

/// Filter compiled once and applied to many keys
#[derive(Debug, Clone)]
pub struct CompiledFilter<'a> {
    spec: &'a FilterSpec,
    pattern: KeyPattern,
}

impl<'a> CompiledFilter<'a> {
    pub fn new(spec: &'a FilterSpec) -> Self {
        Self {
            spec,
            pattern: KeyPattern::compile(&spec.pattern),
        }
    }

    pub fn matches(&self, key: &KeyRecord) -> bool {
        self.pattern.matches(&key.name)
            && (self.spec.types.is_empty() || self.spec.types.contains(&key.key_type))
            && ttl_class_matches(self.spec.ttl_class, key.ttl_seconds)
    }
}

/// Indices of the keys passing the filter, in inventory order
pub fn filter_indices(keys: &[KeyRecord], spec: &FilterSpec) -> Vec<usize> {
    let filter = CompiledFilter::new(spec);
    keys.iter()
        .enumerate()
        .filter(|(_, key)| filter.matches(key))
        .map(|(idx, _)| idx)
        .collect()
}
