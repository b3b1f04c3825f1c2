//! keytui library
//!
//! Key list state, TTL countdown and the HTTP client for the key API.
//! Exposed as a library so the state logic can be tested without a terminal.

pub mod api;
pub mod logic;
pub mod model;

/// Attribute the key list is sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortField {
    Name,
    Type,
    Ttl,
    Size,
}

impl SortField {
    pub fn as_str(&self) -> &str {
        match self {
            SortField::Name => "Name",
            SortField::Type => "Type",
            SortField::Ttl => "TTL",
            SortField::Size => "Size",
        }
    }

    /// Parse a field name, falling back to `Name` for anything unrecognized
    pub fn parse_lossy(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "name" => SortField::Name,
            "type" => SortField::Type,
            "ttl" => SortField::Ttl,
            "size" => SortField::Size,
            other => {
                tracing::warn!(field = other, "unknown sort field, falling back to name");
                SortField::Name
            }
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &str {
        match self {
            SortOrder::Asc => "↑",
            SortOrder::Desc => "↓",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }

    /// Parse an order name, falling back to `Asc` for anything unrecognized
    pub fn parse_lossy(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "asc" | "ascending" => SortOrder::Asc,
            "desc" | "descending" => SortOrder::Desc,
            other => {
                tracing::warn!(order = other, "unknown sort order, falling back to asc");
                SortOrder::Asc
            }
        }
    }
}
