//! Key list orchestration methods
//!
//! Reloading the inventory and changing filter, sort and page settings.
//! The cursor stays on the focused key when it is still visible.

use keytui::logic;
use keytui::model::{FilterUpdate, SortSpec};

use crate::services::api::ApiRequest;
use crate::App;

impl App {
    /// Fetch the inventory again. Any fetch still in flight is superseded.
    pub(crate) fn reload_keys(&mut self) {
        let ticket = self.model.keys.begin_load();
        self.loading = true;
        self.send(ApiRequest::LoadKeys {
            ticket,
            pattern: self.scan_pattern.clone(),
            limit: self.scan_limit,
        });
    }

    pub(crate) fn is_loading(&self) -> bool {
        self.loading
    }

    pub(crate) fn apply_filter(&mut self, update: FilterUpdate) {
        self.model.keys.set_filter(update);
        self.model.ui.cursor = Some(0);
        self.sync_focus();
    }

    pub(crate) fn cycle_type_filter(&mut self) {
        let next = logic::ui::cycle_type_filter(&self.model.keys.filter().types);
        self.apply_filter(FilterUpdate {
            types: Some(next),
            ..FilterUpdate::default()
        });
    }

    pub(crate) fn cycle_ttl_filter(&mut self) {
        let next = logic::ui::cycle_ttl_class(self.model.keys.filter().ttl_class);
        self.apply_filter(FilterUpdate::ttl_class(next));
    }

    pub(crate) fn clear_filters(&mut self) {
        if !self.model.keys.filter().is_active() {
            return;
        }
        self.apply_filter(FilterUpdate {
            pattern: Some(String::new()),
            types: Some(Default::default()),
            ttl_class: Some(Default::default()),
        });
        self.model.show_toast("Filters cleared".to_string());
    }

    fn set_sort_keeping_focus(&mut self, spec: SortSpec) {
        let focused = self.focused.clone();
        self.model.keys.set_sort(spec);
        let kept = focused
            .map(|name| self.model.focus_key(&name))
            .unwrap_or(false);
        if !kept {
            self.model.clamp_cursor();
        }
        self.sync_focus();
    }

    /// Cycle the sort field (resets to ascending)
    pub(crate) fn cycle_sort_field(&mut self) {
        let field = logic::ui::cycle_sort_field(self.model.keys.sort().field);
        self.set_sort_keeping_focus(SortSpec {
            field,
            order: keytui::SortOrder::Asc,
        });
    }

    pub(crate) fn toggle_sort_order(&mut self) {
        let current = self.model.keys.sort();
        self.set_sort_keeping_focus(SortSpec {
            field: current.field,
            order: current.order.toggled(),
        });
    }

    pub(crate) fn cycle_page_size(&mut self) {
        let size = logic::ui::cycle_page_size(self.model.keys.page_size());
        self.model.keys.set_page_size(size);
        self.model.clamp_cursor();
        self.sync_focus();
        self.model.show_toast(format!("{} keys per page", size.get()));
    }

    pub(crate) fn next_page(&mut self) {
        if self.model.keys.next_page() {
            self.model.ui.cursor = Some(0);
            self.sync_focus();
        }
    }

    pub(crate) fn prev_page(&mut self) {
        if self.model.keys.prev_page() {
            self.model.ui.cursor = Some(0);
            self.sync_focus();
        }
    }

    pub(crate) fn toggle_select_focused(&mut self) {
        let Some((name, selected)) = self.model.focused_key().map(|k| (k.name.clone(), k.selected)) else {
            return;
        };
        self.model.keys.toggle_select(&name, !selected);
    }

    pub(crate) fn toggle_select_all(&mut self) {
        self.model.keys.toggle_select_all_visible();
    }

    /// Esc drops the selection first, then the filters
    pub(crate) fn clear_selection_or_filters(&mut self) {
        if self.model.keys.selected_names().is_empty() {
            self.clear_filters();
        } else {
            self.model.keys.clear_selection();
        }
    }
}
