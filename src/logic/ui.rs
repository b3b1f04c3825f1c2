//! UI state transition logic
//!
//! Pure functions for cycling filter, sort and page settings.

use std::collections::BTreeSet;

use crate::api::KeyType;
use crate::model::types::{PageSize, TtlClass};
use crate::SortField;

/// Cycle to the next sort field: Name → Type → TTL → Size → Name
///
/// # Examples
/// ```
/// use keytui::SortField;
/// use keytui::logic::ui::cycle_sort_field;
///
/// assert_eq!(cycle_sort_field(SortField::Name), SortField::Type);
/// assert_eq!(cycle_sort_field(SortField::Size), SortField::Name);
/// ```
pub fn cycle_sort_field(current: SortField) -> SortField {
    match current {
        SortField::Name => SortField::Type,
        SortField::Type => SortField::Ttl,
        SortField::Ttl => SortField::Size,
        SortField::Size => SortField::Name,
    }
}

/// Cycle the TTL filter: All → Persistent → Expiring → Soon → All
pub fn cycle_ttl_class(current: TtlClass) -> TtlClass {
    match current {
        TtlClass::All => TtlClass::Persistent,
        TtlClass::Persistent => TtlClass::Expiring,
        TtlClass::Expiring => TtlClass::Soon,
        TtlClass::Soon => TtlClass::All,
    }
}

/// Cycle the type filter through "any type" and each single type
///
/// A multi-type selection (only possible programmatically) restarts the cycle.
pub fn cycle_type_filter(current: &BTreeSet<KeyType>) -> BTreeSet<KeyType> {
    let next = match current.len() {
        0 => Some(KeyType::ALL[0]),
        1 => {
            let only = current.iter().next().copied();
            let pos = KeyType::ALL.iter().position(|t| Some(*t) == only);
            match pos {
                Some(idx) if idx + 1 < KeyType::ALL.len() => Some(KeyType::ALL[idx + 1]),
                _ => None,
            }
        }
        _ => None,
    };

    next.into_iter().collect()
}

/// Cycle page size: 25 → 50 → 100 → 200 → 25
pub fn cycle_page_size(current: PageSize) -> PageSize {
    match current {
        PageSize::P25 => PageSize::P50,
        PageSize::P50 => PageSize::P100,
        PageSize::P100 => PageSize::P200,
        PageSize::P200 => PageSize::P25,
    }
}

/// Should toast be dismissed (after 1.5 seconds)?
pub fn should_dismiss_toast(elapsed_ms: u128) -> bool {
    elapsed_ms >= 1500
}
