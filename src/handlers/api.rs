//! API Response Handler
//!
//! Applies responses from the key API background service to the model.

use anyhow::Error;

use keytui::api::TTL_MISSING;
use keytui::logic::errors::{classify_error, format_error_message, ErrorCategory, ErrorType};
use keytui::logic::formatting;

use crate::services::api::ApiResponse;
use crate::App;

/// Toast a failure and, for transient errors, mark the API unreachable
fn report_error(app: &mut App, action: &str, error: &Error) {
    let error_type = classify_error(error);
    let message = format_error_message(error);
    tracing::warn!(action, ?error_type, error = %format!("{:#}", error), "key API request failed");

    if error_type.category() == ErrorCategory::Transient {
        app.model.connection.mark_disconnected(error_type, message.clone());
    }
    app.model.show_toast(format!("Error: {}: {}", action, message));
}

/// Handle API response from background service
///
/// Response types:
/// - KeysLoaded: inventory snapshot (discarded if superseded)
/// - KeyDetail: value and fresh TTL of the focused key
/// - KeysDeleted / KeyRenamed: patch the list in place
/// - TtlSet / KeyPersisted: reload the list
/// - Pong: reachability of the service
pub fn handle_api_response(app: &mut App, response: ApiResponse) {
    match response {
        ApiResponse::KeysLoaded { ticket, keys } => {
            if !app.model.keys.is_current(ticket) {
                tracing::debug!(ticket = ticket.seq(), "dropping superseded key list response");
                return;
            }
            app.loading = false;

            match keys {
                Ok(keys) => {
                    app.model.connection.mark_connected();
                    app.model.keys.finish_load(ticket, keys);
                    app.refresh_focus();
                }
                Err(e) => report_error(app, "Failed to load keys", &e),
            }
        }

        ApiResponse::KeyDetail { key, info } => match info {
            Ok(info) if info.ttl == TTL_MISSING => {
                app.model.show_toast(format!("Key {} no longer exists", key));
                app.forget_key(&key);
            }
            Ok(info) => {
                app.model.connection.mark_connected();
                app.apply_key_detail(info);
            }
            Err(e) if classify_error(&e) == ErrorType::NotFound => {
                app.model.show_toast(format!("Key {} no longer exists", key));
                app.forget_key(&key);
            }
            Err(e) => {
                if app.is_focused(&key) {
                    report_error(app, "Failed to load key details", &e);
                }
            }
        },

        ApiResponse::KeysDeleted { keys, deleted } => match deleted {
            Ok(count) => {
                for key in &keys {
                    app.forget_key(key);
                }
                let noun = if count == 1 { "key" } else { "keys" };
                app.model.show_toast(format!("Deleted {} {}", count, noun));
            }
            Err(e) => report_error(app, "Failed to delete keys", &e),
        },

        ApiResponse::KeyRenamed {
            old_name,
            new_name,
            success,
        } => match success {
            Ok(true) => {
                let was_focused = app.is_focused(&old_name);
                app.countdown.stop(&old_name);
                app.model.keys.rename_key(&old_name, &new_name);
                if was_focused {
                    app.model.focus_key(&new_name);
                }
                app.refresh_focus();
                app.model.show_toast(format!("Renamed {} → {}", old_name, new_name));
            }
            Ok(false) => {
                app.model
                    .show_toast(format!("Error: rename of {} was rejected", old_name));
            }
            Err(e) => report_error(app, "Failed to rename key", &e),
        },

        ApiResponse::TtlSet {
            key,
            seconds,
            success,
        } => match success {
            Ok(true) => {
                app.model.show_toast(format!(
                    "TTL of {} set to {}",
                    key,
                    formatting::format_ttl(seconds)
                ));
                app.reload_keys();
            }
            Ok(false) => {
                app.model
                    .show_toast(format!("Error: could not set TTL, {} does not exist", key));
            }
            Err(e) => report_error(app, "Failed to set TTL", &e),
        },

        ApiResponse::KeyPersisted { key, success } => match success {
            Ok(true) => {
                app.model.show_toast(format!("{} no longer expires", key));
                app.reload_keys();
            }
            Ok(false) => {
                app.model
                    .show_toast(format!("Error: {} has no expiry or does not exist", key));
            }
            Err(e) => report_error(app, "Failed to persist key", &e),
        },

        ApiResponse::Pong { result } => match result {
            Ok(()) => app.model.connection.mark_connected(),
            Err(e) => {
                // Only the status bar reflects failed health checks
                let error_type = classify_error(&e);
                app.model
                    .connection
                    .mark_disconnected(error_type, format_error_message(&e));
            }
        },
    }
}
