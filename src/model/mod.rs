//! Application Model
//!
//! Cloneable state of the key browser, split into focused sub-models:
//!
//! - **KeyListState**: key inventory and the filtered/sorted/paged view
//! - **UiModel**: cursor, prompts, dialogs, toast
//! - **ConnectionModel**: reachability of the key API
//!
//! The TTL countdown lives next to the model (see [`countdown`]) because it
//! owns its observer.
//!
//! No I/O happens here. The runtime applies API responses to the model.

pub mod connection;
pub mod countdown;
pub mod key_list;
pub mod types;
pub mod ui;

pub use connection::{ConnectionModel, ConnectionState};
pub use countdown::{CountdownEvent, CountdownObserver, CountdownStart, CountdownState, TtlCountdown};
pub use key_list::{KeyListState, LoadTicket, PageView};
pub use types::*;
pub use ui::UiModel;

use crate::api::KeyRecord;
use crate::logic::navigation;

/// Root application model composed of focused sub-models
#[derive(Clone, Debug)]
pub struct Model {
    pub keys: KeyListState,
    pub ui: UiModel,
    pub connection: ConnectionModel,
}

impl Model {
    pub fn new(keys: KeyListState, base_url: impl Into<String>, vim_mode: bool) -> Self {
        Self {
            keys,
            ui: UiModel::new(vim_mode),
            connection: ConnectionModel::new(base_url),
        }
    }

    /// Key under the cursor on the current page
    pub fn focused_key(&self) -> Option<&KeyRecord> {
        let cursor = self.ui.cursor?;
        self.keys.current_page().items.get(cursor).copied()
    }

    /// Keys an action applies to: the selection if any, else the focused key
    pub fn action_targets(&self) -> Vec<String> {
        let selected = self.keys.selected_names();
        if !selected.is_empty() {
            return selected;
        }
        self.focused_key()
            .map(|k| vec![k.name.clone()])
            .unwrap_or_default()
    }

    /// Re-clamp the cursor after the visible page changed
    pub fn clamp_cursor(&mut self) {
        let len = self.keys.current_page().items.len();
        self.ui.cursor = navigation::clamp_cursor(self.ui.cursor, len);
    }

    /// Put the cursor on `name` if it is on the current page
    pub fn focus_key(&mut self, name: &str) -> bool {
        let row = {
            let page = self.keys.current_page();
            navigation::find_row_by_name(page.items.iter().map(|k| k.name.as_str()), name)
        };
        match row {
            Some(row) => {
                self.ui.cursor = Some(row);
                true
            }
            None => false,
        }
    }

    pub fn has_modal(&self) -> bool {
        self.ui.has_modal()
    }

    pub fn show_toast(&mut self, message: String) {
        self.ui.show_toast(message);
    }
}
