//! Business Logic
//!
//! This module contains pure business logic functions that can be unit tested:
//! - errors: Error classification for key API failures
//! - filter: Key filter predicates (pattern, type, TTL class)
//! - formatting: TTL, countdown, byte and value formatting
//! - navigation: Cursor movement within the visible page
//! - paging: Page count and clamping arithmetic
//! - pattern: Glob matching for key names
//! - sorting: Key comparison for each sort field
//! - ui: UI setting cycles and toast timing

pub mod errors;
pub mod filter;
pub mod formatting;
pub mod navigation;
pub mod paging;
pub mod pattern;
pub mod sorting;
pub mod ui;
