//! External Services
//!
//! This module contains services that interact with external systems:
//! - api: API request queue service for the key API

pub mod api;
