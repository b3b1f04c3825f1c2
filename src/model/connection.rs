//! Connection Model
//!
//! Reachability of the key API as seen by the periodic ping.

use std::time::Instant;

use crate::logic::errors::ErrorType;

#[derive(Clone, Debug, PartialEq)]
pub enum ConnectionState {
    Connected,
    /// No response yet since startup
    Connecting,
    /// Last request failed (with error type and user-friendly message)
    Disconnected {
        error_type: ErrorType,
        message: String,
    },
}

#[derive(Clone, Debug)]
pub struct ConnectionModel {
    pub state: ConnectionState,

    /// Base URL of the key API
    pub base_url: String,

    /// Last time a request succeeded
    pub last_success: Option<Instant>,
}

impl ConnectionModel {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            state: ConnectionState::Connecting,
            base_url: base_url.into(),
            last_success: None,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.state == ConnectionState::Connected
    }

    pub fn mark_connected(&mut self) {
        if !self.is_connected() {
            tracing::debug!(base_url = %self.base_url, "key API reachable");
        }
        self.state = ConnectionState::Connected;
        self.last_success = Some(Instant::now());
    }

    pub fn mark_disconnected(&mut self, error_type: ErrorType, message: String) {
        tracing::debug!(?error_type, message = %message, "key API unreachable");
        self.state = ConnectionState::Disconnected {
            error_type,
            message,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_connecting() {
        let model = ConnectionModel::new("http://localhost:11367");
        assert_eq!(model.state, ConnectionState::Connecting);
        assert!(model.last_success.is_none());
    }

    #[test]
    fn test_transitions() {
        let mut model = ConnectionModel::new("http://localhost:11367");
        model.mark_connected();
        assert!(model.is_connected());
        assert!(model.last_success.is_some());

        model.mark_disconnected(ErrorType::ConnectionRefused, "connection refused".to_string());
        assert!(!model.is_connected());
        assert!(matches!(
            model.state,
            ConnectionState::Disconnected { error_type: ErrorType::ConnectionRefused, .. }
        ));
    }
}
