//! Focused key tracking
//!
//! The detail panel and the TTL countdown follow the key under the cursor.
//! Whenever the visible page or the cursor changes, `sync_focus` stops the
//! countdown of the previous key, seeds a new one from the list snapshot and
//! asks the API for fresh details.

use keytui::api::{self, KeyInfo};
use keytui::model::{countdown, CountdownStart};

use crate::services::api::ApiRequest;
use crate::App;

impl App {
    /// Follow the key under the cursor if it changed
    pub(crate) fn sync_focus(&mut self) {
        self.model.clamp_cursor();
        let current = self
            .model
            .focused_key()
            .map(|k| (k.name.clone(), k.ttl_seconds, k.fetched_at_ms));

        if current.as_ref().map(|(name, _, _)| name) == self.focused.as_ref() {
            return;
        }

        if let Some(previous) = self.focused.take() {
            self.countdown.stop(&previous);
        }
        self.model.ui.detail = None;
        self.model.ui.countdown = None;

        if let Some((name, ttl, fetched_at_ms)) = current {
            let now = api::now_ms();
            self.start_countdown(&name, countdown::ttl_now(ttl, fetched_at_ms, now), now);
            self.send(ApiRequest::FetchKeyDetail { key: name.clone() });
            self.focused = Some(name);
        }
    }

    /// Re-seed the focused key from a new snapshot
    pub(crate) fn refresh_focus(&mut self) {
        if let Some(previous) = self.focused.take() {
            self.countdown.stop(&previous);
        }
        self.sync_focus();
    }

    pub(crate) fn is_focused(&self, key: &str) -> bool {
        self.focused.as_deref() == Some(key)
    }

    pub(crate) fn start_countdown(&mut self, key: &str, ttl_seconds: i64, now_ms: i64) {
        match self.countdown.start(key, ttl_seconds, now_ms) {
            CountdownStart::Running => {
                self.model.ui.countdown = Some((key.to_string(), ttl_seconds));
            }
            CountdownStart::Expired => {
                self.model.ui.countdown = Some((key.to_string(), 0));
            }
            CountdownStart::Persistent | CountdownStart::Missing => {
                self.model.ui.countdown = None;
            }
        }
    }

    /// Details arrived for `info.name`; only applied while it is focused
    pub(crate) fn apply_key_detail(&mut self, info: KeyInfo) {
        if !self.is_focused(&info.name) {
            tracing::debug!(key = %info.name, "ignoring detail for unfocused key");
            return;
        }
        self.start_countdown(&info.name, info.ttl, api::now_ms());
        self.model.ui.detail = Some(info);
    }

    /// Drop a key the server no longer has
    pub(crate) fn forget_key(&mut self, key: &str) {
        self.countdown.stop(key);
        if self.model.keys.remove_key(key) {
            tracing::debug!(key, "removed vanished key from list");
        }
        if self.is_focused(key) {
            self.focused = None;
        }
        self.sync_focus();
    }
}
