//! Countdown Event Handler

use keytui::model::CountdownEvent;

use crate::services::api::ApiRequest;
use crate::App;

/// Mirror ticks into the UI model; on expiry ask the server whether the
/// key is really gone (the local estimate can drift)
pub fn handle_countdown_event(app: &mut App, event: CountdownEvent) {
    match event {
        CountdownEvent::Tick { key, remaining } => {
            if app.is_focused(&key) {
                app.model.ui.countdown = Some((key, remaining));
            }
        }
        CountdownEvent::Expired { key } => {
            tracing::debug!(key = %key, "local countdown reached zero");
            if app.is_focused(&key) {
                app.model.ui.countdown = Some((key.clone(), 0));
            }
            app.model.show_toast(format!("Key {} expired", key));
            app.send(ApiRequest::FetchKeyDetail { key });
        }
    }
}
