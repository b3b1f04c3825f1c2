//! Prompts and key write operations
//!
//! Delete (with confirmation), rename, set TTL and persist. Results come
//! back through `handlers::api`; nothing here touches the list directly.

use keytui::api::TTL_PERSISTENT;
use keytui::model::{FilterUpdate, InputKind};

use crate::services::api::ApiRequest;
use crate::{utils, App};

impl App {
    /// Ask for confirmation before deleting the selection (or focused key)
    pub(crate) fn request_delete(&mut self) {
        let targets = self.model.action_targets();
        if targets.is_empty() {
            self.model.show_toast("Error: no key selected".to_string());
            return;
        }
        self.model.ui.confirm_delete = Some(targets);
    }

    pub(crate) fn confirm_delete(&mut self) {
        if let Some(keys) = self.model.ui.confirm_delete.take() {
            tracing::debug!(count = keys.len(), "deleting keys");
            self.send(ApiRequest::DeleteKeys { keys });
        }
    }

    pub(crate) fn cancel_delete(&mut self) {
        self.model.ui.confirm_delete = None;
    }

    pub(crate) fn begin_filter_input(&mut self) {
        let current = self.model.keys.filter().pattern.clone();
        self.model.ui.open_input(InputKind::Filter, current);
    }

    pub(crate) fn begin_rename(&mut self) {
        let Some(name) = self.focused.clone() else {
            return;
        };
        self.model.ui.open_input(InputKind::Rename { key: name.clone() }, name);
    }

    pub(crate) fn begin_set_ttl(&mut self) {
        let Some(key) = self.model.focused_key() else {
            return;
        };
        let initial = if key.ttl_seconds > 0 {
            key.ttl_seconds.to_string()
        } else {
            String::new()
        };
        let name = key.name.clone();
        self.model.ui.open_input(InputKind::SetTtl { key: name }, initial);
    }

    /// Remove the expiry of the focused key
    pub(crate) fn persist_focused(&mut self) {
        let Some(key) = self.model.focused_key() else {
            return;
        };
        if key.ttl_seconds == TTL_PERSISTENT {
            let message = format!("{} already has no expiry", key.name);
            self.model.show_toast(message);
            return;
        }
        let key = key.name.clone();
        self.send(ApiRequest::PersistKey { key });
    }

    pub(crate) fn input_push(&mut self, c: char) {
        if let Some(input) = &mut self.model.ui.input {
            input.buffer.push(c);
        }
        self.on_input_changed();
    }

    pub(crate) fn input_pop(&mut self) {
        if let Some(input) = &mut self.model.ui.input {
            input.buffer.pop();
        }
        self.on_input_changed();
    }

    /// The filter prompt applies while typing
    fn on_input_changed(&mut self) {
        let pattern = match &self.model.ui.input {
            Some(input) if input.kind == InputKind::Filter => input.buffer.clone(),
            _ => return,
        };
        self.apply_filter(FilterUpdate::pattern(pattern.trim()));
    }

    /// Esc: close the prompt. Cancelling the filter prompt clears the pattern.
    pub(crate) fn cancel_input(&mut self) {
        if let Some(input) = self.model.ui.input.take() {
            if input.kind == InputKind::Filter {
                self.apply_filter(FilterUpdate::pattern(""));
            }
        }
    }

    pub(crate) fn submit_input(&mut self) {
        let Some(input) = self.model.ui.input.take() else {
            return;
        };
        let value = input.buffer.trim();

        match input.kind {
            InputKind::Filter => {
                // Already applied while typing
            }
            InputKind::Rename { key } => {
                if value.is_empty() {
                    self.model.show_toast("Error: key name cannot be empty".to_string());
                } else if value != key {
                    self.send(ApiRequest::RenameKey {
                        old_name: key,
                        new_name: value.to_string(),
                    });
                }
            }
            InputKind::SetTtl { key } => match utils::parse_ttl_input(value) {
                Some(seconds) => self.send(ApiRequest::SetTtl { key, seconds }),
                None => {
                    self.model
                        .show_toast(format!("Error: invalid TTL '{}', enter whole seconds > 0", value));
                }
            },
        }
    }
}
