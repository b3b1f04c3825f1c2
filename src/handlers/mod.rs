//! Event Handlers
//!
//! This module contains handlers for different types of events:
//! - api: API responses from background service
//! - countdown: Tick/expiry events from the TTL countdown
//! - keyboard: User keyboard input
//!
//! Handlers are functions that take &mut App and process one event.

pub mod api;
pub mod countdown;
pub mod keyboard;

pub use api::handle_api_response;
pub use countdown::handle_countdown_event;
pub use keyboard::handle_key;
