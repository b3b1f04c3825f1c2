//! App Orchestration Methods
//!
//! `impl App` methods grouped by domain. Each submodule orchestrates between
//! the model (in the library), the API service, and the logic functions:
//!
//! - keys: loading, filtering, sorting, paging and selecting keys
//! - focus: following the focused key with the detail panel and countdown
//! - navigation: cursor movement
//! - actions: prompts and write operations (delete, rename, TTL)

pub(crate) mod actions;
pub(crate) mod focus;
pub(crate) mod keys;
pub(crate) mod navigation;
