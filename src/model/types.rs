//! Shared model types
//!
//! Filter, sort and page parameters of the key list.

use std::collections::BTreeSet;

use crate::api::KeyType;
use crate::{SortField, SortOrder};

/// Keys with at most this many seconds left count as "expiring soon"
pub const SOON_THRESHOLD_SECS: i64 = 3600;

/// TTL bucket used by the key filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TtlClass {
    #[default]
    All,
    Persistent,
    Expiring,
    Soon,
}

impl TtlClass {
    pub fn as_str(&self) -> &str {
        match self {
            TtlClass::All => "All",
            TtlClass::Persistent => "Persistent",
            TtlClass::Expiring => "Expiring",
            TtlClass::Soon => "Soon (≤1h)",
        }
    }

    /// Parse a class name, falling back to `All` for anything unrecognized
    pub fn parse_lossy(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "all" | "" => TtlClass::All,
            "persistent" => TtlClass::Persistent,
            "expiring" => TtlClass::Expiring,
            "soon" => TtlClass::Soon,
            other => {
                tracing::warn!(class = other, "unknown TTL class, falling back to all");
                TtlClass::All
            }
        }
    }
}

/// Allowed page sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PageSize {
    P25,
    #[default]
    P50,
    P100,
    P200,
}

impl PageSize {
    pub const ALL: [PageSize; 4] = [PageSize::P25, PageSize::P50, PageSize::P100, PageSize::P200];

    pub fn get(self) -> usize {
        match self {
            PageSize::P25 => 25,
            PageSize::P50 => 50,
            PageSize::P100 => 100,
            PageSize::P200 => 200,
        }
    }

    pub fn from_value(value: usize) -> Option<Self> {
        PageSize::ALL.into_iter().find(|size| size.get() == value)
    }

    /// Like `from_value`, but falls back to the default size with a warning
    pub fn from_value_lossy(value: usize) -> Self {
        PageSize::from_value(value).unwrap_or_else(|| {
            tracing::warn!(page_size = value, "unsupported page size, falling back to 50");
            PageSize::default()
        })
    }
}

/// Active key filter. All three predicates must hold.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterSpec {
    /// Glob pattern (`*`, `?`), case-insensitive, empty matches all
    pub pattern: String,
    /// Allowed types, empty means any type
    pub types: BTreeSet<KeyType>,
    pub ttl_class: TtlClass,
}

/// Partial filter change; `None` fields keep their current value
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterUpdate {
    pub pattern: Option<String>,
    pub types: Option<BTreeSet<KeyType>>,
    pub ttl_class: Option<TtlClass>,
}

impl FilterUpdate {
    pub fn pattern(pattern: impl Into<String>) -> Self {
        Self {
            pattern: Some(pattern.into()),
            ..Self::default()
        }
    }

    pub fn types<I: IntoIterator<Item = KeyType>>(types: I) -> Self {
        Self {
            types: Some(types.into_iter().collect()),
            ..Self::default()
        }
    }

    pub fn ttl_class(ttl_class: TtlClass) -> Self {
        Self {
            ttl_class: Some(ttl_class),
            ..Self::default()
        }
    }
}

impl FilterSpec {
    pub fn merge(&mut self, update: FilterUpdate) {
        if let Some(pattern) = update.pattern {
            self.pattern = pattern;
        }
        if let Some(types) = update.types {
            self.types = types;
        }
        if let Some(ttl_class) = update.ttl_class {
            self.ttl_class = ttl_class;
        }
    }

    pub fn is_active(&self) -> bool {
        !self.pattern.is_empty() || !self.types.is_empty() || self.ttl_class != TtlClass::All
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub field: SortField,
    pub order: SortOrder,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            field: SortField::Name,
            order: SortOrder::Asc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageSpec {
    pub page_index: usize,
    pub page_size: PageSize,
}

/// Vim command state (for 'gg' double-key)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VimCommandState {
    #[default]
    None,
    WaitingForSecondG,
}

/// What a line-input prompt edits
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputKind {
    /// Glob pattern for the key filter
    Filter,
    /// New name for `key`
    Rename { key: String },
    /// TTL in seconds for `key`
    SetTtl { key: String },
}

impl InputKind {
    pub fn title(&self) -> String {
        match self {
            InputKind::Filter => "Filter".to_string(),
            InputKind::Rename { key } => format!("Rename {}", key),
            InputKind::SetTtl { key } => format!("TTL (seconds) for {}", key),
        }
    }
}

/// Active line-input prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputState {
    pub kind: InputKind,
    pub buffer: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_size_values() {
        assert_eq!(PageSize::from_value(100), Some(PageSize::P100));
        assert_eq!(PageSize::from_value(30), None);
        assert_eq!(PageSize::from_value_lossy(30), PageSize::P50);
    }

    #[test]
    fn test_ttl_class_fallback() {
        assert_eq!(TtlClass::parse_lossy("soon"), TtlClass::Soon);
        assert_eq!(TtlClass::parse_lossy("Persistent"), TtlClass::Persistent);
        assert_eq!(TtlClass::parse_lossy("forever"), TtlClass::All);
    }

    #[test]
    fn test_filter_merge_keeps_unset_fields() {
        let mut spec = FilterSpec::default();
        spec.merge(FilterUpdate::pattern("user:*"));
        spec.merge(FilterUpdate::types([KeyType::Hash]));

        assert_eq!(spec.pattern, "user:*");
        assert!(spec.types.contains(&KeyType::Hash));
        assert_eq!(spec.ttl_class, TtlClass::All);
        assert!(spec.is_active());
    }

    #[test]
    fn test_default_filter_inactive() {
        assert!(!FilterSpec::default().is_active());
    }
}
