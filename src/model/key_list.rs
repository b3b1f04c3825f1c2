//! Key List State
//!
//! Owns the key inventory and derives the filtered, sorted, paginated view
//! the user sees. Every mutation keeps `page_index` inside the valid range
//! for the current filtered count.

use std::collections::HashSet;

use crate::api::KeyRecord;
use crate::logic::{filter, paging, sorting};

use super::types::{FilterSpec, FilterUpdate, PageSize, PageSpec, SortSpec};

/// Token identifying one inventory fetch. Only the most recently issued
/// ticket may apply its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LoadTicket(u64);

impl LoadTicket {
    pub fn seq(&self) -> u64 {
        self.0
    }
}

/// Read-only snapshot of the visible page
#[derive(Debug, Clone, PartialEq)]
pub struct PageView<'a> {
    pub total_count: usize,
    pub filtered_count: usize,
    pub selected_count: usize,
    pub items: Vec<&'a KeyRecord>,
    pub page_index: usize,
    pub total_pages: usize,
}

#[derive(Clone, Debug, Default)]
pub struct KeyListState {
    inventory: Vec<KeyRecord>,
    /// Indices into `inventory` passing the filter, in display order
    view: Vec<usize>,
    filter: FilterSpec,
    sort: SortSpec,
    page: PageSpec,
    issued_seq: u64,
}

impl KeyListState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(filter: FilterSpec, sort: SortSpec, page_size: PageSize) -> Self {
        Self {
            filter,
            sort,
            page: PageSpec {
                page_index: 0,
                page_size,
            },
            ..Self::default()
        }
    }

    pub fn filter(&self) -> &FilterSpec {
        &self.filter
    }

    pub fn sort(&self) -> SortSpec {
        self.sort
    }

    pub fn page_index(&self) -> usize {
        self.page.page_index
    }

    pub fn page_size(&self) -> PageSize {
        self.page.page_size
    }

    pub fn total_count(&self) -> usize {
        self.inventory.len()
    }

    pub fn filtered_count(&self) -> usize {
        self.view.len()
    }

    pub fn total_pages(&self) -> usize {
        paging::total_pages(self.view.len(), self.page.page_size.get())
    }

    pub fn get(&self, name: &str) -> Option<&KeyRecord> {
        self.inventory.iter().find(|k| k.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    // ============================================
    // LOADING
    // ============================================

    /// Replace the whole inventory and reset to the first page
    pub fn load(&mut self, keys: Vec<KeyRecord>) {
        let mut seen = HashSet::with_capacity(keys.len());
        let before = keys.len();
        let keys: Vec<KeyRecord> = keys
            .into_iter()
            .filter(|k| seen.insert(k.name.clone()))
            .collect();

        if keys.len() != before {
            tracing::warn!(
                dropped = before - keys.len(),
                "duplicate key names in snapshot, keeping first occurrence"
            );
        }

        self.inventory = keys;
        self.recompute_view();
        self.page.page_index = 0;
    }

    /// Issue a ticket for a new fetch, superseding every earlier one
    pub fn begin_load(&mut self) -> LoadTicket {
        self.issued_seq += 1;
        LoadTicket(self.issued_seq)
    }

    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        ticket.0 == self.issued_seq
    }

    /// Apply a fetched snapshot if its ticket is still current.
    /// Returns `false` (and changes nothing) for superseded fetches.
    pub fn finish_load(&mut self, ticket: LoadTicket, keys: Vec<KeyRecord>) -> bool {
        if !self.is_current(ticket) {
            tracing::debug!(
                ticket = ticket.0,
                current = self.issued_seq,
                "discarding superseded key list response"
            );
            return false;
        }

        self.load(keys);
        true
    }

    // ============================================
    // FILTER / SORT / PAGE
    // ============================================

    /// Merge a filter change, recompute the view and go back to the first page
    pub fn set_filter(&mut self, update: FilterUpdate) {
        self.filter.merge(update);
        self.recompute_view();
        self.page.page_index = 0;
    }

    /// Re-sort the filtered set in place, keeping the page where possible
    pub fn set_sort(&mut self, spec: SortSpec) {
        self.sort = spec;
        sorting::sort_indices(&mut self.view, &self.inventory, self.sort);
        self.clamp_page();
    }

    /// Go to page `n` (clamped). Returns whether the page changed.
    pub fn go_to_page(&mut self, n: usize) -> bool {
        let target = paging::clamp_page(n, self.view.len(), self.page.page_size.get());
        if target == self.page.page_index {
            return false;
        }
        self.page.page_index = target;
        true
    }

    pub fn next_page(&mut self) -> bool {
        self.go_to_page(self.page.page_index.saturating_add(1))
    }

    pub fn prev_page(&mut self) -> bool {
        self.go_to_page(self.page.page_index.saturating_sub(1))
    }

    /// Change the page size, keeping the first item of the current page visible
    pub fn set_page_size(&mut self, size: PageSize) {
        self.page.page_index = paging::page_after_resize(
            self.page.page_index,
            self.page.page_size.get(),
            size.get(),
            self.view.len(),
        );
        self.page.page_size = size;
    }

    // ============================================
    // KEY MUTATIONS
    // ============================================

    /// Remove a key from the inventory and view. Idempotent.
    pub fn remove_key(&mut self, name: &str) -> bool {
        let Some(pos) = self.inventory.iter().position(|k| k.name == name) else {
            return false;
        };

        self.remove_at(pos);
        self.clamp_page();
        true
    }

    /// Rename a key in place, then re-filter and re-sort.
    /// An existing key with the new name is replaced.
    pub fn rename_key(&mut self, old_name: &str, new_name: &str) -> bool {
        if old_name == new_name {
            return self.contains(old_name);
        }

        let Some(mut pos) = self.inventory.iter().position(|k| k.name == old_name) else {
            return false;
        };

        if let Some(existing) = self.inventory.iter().position(|k| k.name == new_name) {
            self.remove_at(existing);
            if existing < pos {
                pos -= 1;
            }
        }

        self.inventory[pos].name = new_name.to_string();
        self.recompute_view();
        self.clamp_page();
        true
    }

    pub fn toggle_select(&mut self, name: &str, selected: bool) -> bool {
        match self.inventory.iter_mut().find(|k| k.name == name) {
            Some(key) => {
                key.selected = selected;
                true
            }
            None => false,
        }
    }

    /// Select every key on the current page, or clear them all if they
    /// are already all selected
    pub fn toggle_select_all_visible(&mut self) {
        let visible: Vec<usize> = self.visible_indices().to_vec();
        if visible.is_empty() {
            return;
        }

        let all_selected = visible.iter().all(|&i| self.inventory[i].selected);
        for i in visible {
            self.inventory[i].selected = !all_selected;
        }
    }

    pub fn clear_selection(&mut self) {
        for key in &mut self.inventory {
            key.selected = false;
        }
    }

    pub fn selected_names(&self) -> Vec<String> {
        self.inventory
            .iter()
            .filter(|k| k.selected)
            .map(|k| k.name.clone())
            .collect()
    }

    // ============================================
    // READ
    // ============================================

    pub fn current_page(&self) -> PageView<'_> {
        PageView {
            total_count: self.inventory.len(),
            filtered_count: self.view.len(),
            selected_count: self.inventory.iter().filter(|k| k.selected).count(),
            items: self
                .visible_indices()
                .iter()
                .map(|&i| &self.inventory[i])
                .collect(),
            page_index: self.page.page_index,
            total_pages: self.total_pages(),
        }
    }

    /// Filtered keys in display order, across all pages
    pub fn filtered(&self) -> impl Iterator<Item = &KeyRecord> {
        self.view.iter().map(|&i| &self.inventory[i])
    }

    fn visible_indices(&self) -> &[usize] {
        let bounds = paging::page_bounds(
            self.page.page_index,
            self.view.len(),
            self.page.page_size.get(),
        );
        &self.view[bounds]
    }

    fn recompute_view(&mut self) {
        self.view = filter::filter_indices(&self.inventory, &self.filter);
        sorting::sort_indices(&mut self.view, &self.inventory, self.sort);
    }

    fn remove_at(&mut self, pos: usize) {
        self.inventory.remove(pos);
        self.view.retain(|&i| i != pos);
        for i in &mut self.view {
            if *i > pos {
                *i -= 1;
            }
        }
    }

    fn clamp_page(&mut self) {
        self.page.page_index = paging::clamp_page(
            self.page.page_index,
            self.view.len(),
            self.page.page_size.get(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::KeyType;
    use crate::{SortField, SortOrder};

    fn key(name: &str, key_type: KeyType, ttl: i64) -> KeyRecord {
        KeyRecord::new(name, key_type, ttl, 0)
    }

    fn visible_names(state: &KeyListState) -> Vec<String> {
        state
            .current_page()
            .items
            .iter()
            .map(|k| k.name.clone())
            .collect()
    }

    #[test]
    fn test_load_empty() {
        let mut state = KeyListState::new();
        state.load(Vec::new());
        let page = state.current_page();
        assert_eq!(page.total_count, 0);
        assert_eq!(page.filtered_count, 0);
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.page_index, 0);
        assert!(page.items.is_empty());
    }

    #[test]
    fn test_load_resets_page() {
        let mut state = KeyListState::new();
        state.load((0..120).map(|i| key(&format!("k{:03}", i), KeyType::String, -1)).collect());
        assert!(state.go_to_page(2));
        state.load((0..120).map(|i| key(&format!("k{:03}", i), KeyType::String, -1)).collect());
        assert_eq!(state.page_index(), 0);
    }

    #[test]
    fn test_load_drops_duplicate_names() {
        let mut state = KeyListState::new();
        state.load(vec![
            key("a", KeyType::String, -1),
            key("a", KeyType::Hash, 10),
            key("b", KeyType::String, -1),
        ]);
        assert_eq!(state.total_count(), 2);
        assert_eq!(state.get("a").map(|k| k.key_type), Some(KeyType::String));
    }

    #[test]
    fn test_default_sort_is_name_ascending() {
        let mut state = KeyListState::new();
        state.load(vec![
            key("c", KeyType::String, -1),
            key("A", KeyType::String, -1),
            key("b", KeyType::String, -1),
        ]);
        assert_eq!(visible_names(&state), vec!["A", "b", "c"]);
    }

    #[test]
    fn test_go_to_page_noop_when_current() {
        let mut state = KeyListState::new();
        state.load((0..60).map(|i| key(&format!("k{}", i), KeyType::String, -1)).collect());
        assert!(!state.go_to_page(0));
        assert!(state.go_to_page(5));
        assert_eq!(state.page_index(), 1);
        assert!(!state.next_page());
        assert!(state.prev_page());
    }

    #[test]
    fn test_set_sort_keeps_page() {
        let mut state = KeyListState::new();
        state.load((0..60).map(|i| key(&format!("k{:02}", i), KeyType::String, i)).collect());
        state.go_to_page(1);
        state.set_sort(SortSpec {
            field: SortField::Ttl,
            order: SortOrder::Desc,
        });
        assert_eq!(state.page_index(), 1);
    }

    #[test]
    fn test_rename_replaces_existing_destination() {
        let mut state = KeyListState::new();
        state.load(vec![
            key("a", KeyType::String, -1),
            key("b", KeyType::Hash, 30),
            key("c", KeyType::List, 5),
        ]);
        assert!(state.rename_key("c", "a"));
        assert_eq!(state.total_count(), 2);
        assert_eq!(state.get("a").map(|k| k.key_type), Some(KeyType::List));
        assert_eq!(visible_names(&state), vec!["a", "b"]);
    }

    #[test]
    fn test_rename_missing_key() {
        let mut state = KeyListState::new();
        state.load(vec![key("a", KeyType::String, -1)]);
        assert!(!state.rename_key("zz", "yy"));
        assert!(state.rename_key("a", "a"));
    }

    #[test]
    fn test_toggle_select_does_not_touch_view() {
        let mut state = KeyListState::new();
        state.load(vec![key("a", KeyType::String, -1), key("b", KeyType::String, -1)]);
        state.go_to_page(0);
        assert!(state.toggle_select("b", true));
        assert!(!state.toggle_select("missing", true));

        let page = state.current_page();
        assert_eq!(page.selected_count, 1);
        assert_eq!(page.filtered_count, 2);
        assert_eq!(state.selected_names(), vec!["b"]);
    }

    #[test]
    fn test_toggle_select_all_visible() {
        let mut state = KeyListState::new();
        state.load((0..30).map(|i| key(&format!("k{:02}", i), KeyType::String, -1)).collect());
        state.set_page_size(PageSize::P25);

        state.toggle_select_all_visible();
        assert_eq!(state.current_page().selected_count, 25);

        // all visible already selected -> clears them
        state.toggle_select_all_visible();
        assert_eq!(state.current_page().selected_count, 0);

        // partial selection -> selects the rest
        state.toggle_select("k03", true);
        state.toggle_select_all_visible();
        assert_eq!(state.current_page().selected_count, 25);
    }

    #[test]
    fn test_clear_selection() {
        let mut state = KeyListState::new();
        state.load(vec![key("a", KeyType::String, -1), key("b", KeyType::Hash, 10)]);
        state.toggle_select("a", true);
        state.toggle_select("b", true);

        state.clear_selection();
        assert!(state.selected_names().is_empty());
        assert_eq!(visible_names(&state), vec!["a", "b"]);
    }

    #[test]
    fn test_finish_load_discards_stale_ticket() {
        let mut state = KeyListState::new();
        let first = state.begin_load();
        let second = state.begin_load();

        assert!(state.finish_load(second, vec![key("new", KeyType::String, -1)]));
        assert!(!state.finish_load(first, vec![key("old", KeyType::String, -1)]));
        assert!(state.contains("new"));
        assert!(!state.contains("old"));
        assert!(!state.is_current(first));
        assert!(state.is_current(second));
    }

    #[test]
    fn test_set_page_size_keeps_position() {
        let mut state = KeyListState::new();
        state.load((0..300).map(|i| key(&format!("k{:03}", i), KeyType::String, -1)).collect());
        state.go_to_page(2);
        state.set_page_size(PageSize::P25);
        assert_eq!(state.page_index(), 4);
        assert_eq!(visible_names(&state)[0], "k100");
    }
}
