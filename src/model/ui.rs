//! UI Model
//!
//! Cursor, prompts, dialogs and other visual state.

use std::time::Instant;

use super::types::{InputKind, InputState, VimCommandState};
use crate::api::KeyInfo;

/// UI preferences and popups
#[derive(Clone, Debug)]
pub struct UiModel {
    // ============================================
    // PREFERENCES
    // ============================================
    /// Whether vim keybindings are enabled
    pub vim_mode: bool,

    pub vim_command_state: VimCommandState,

    // ============================================
    // SELECTION
    // ============================================
    /// Highlighted row within the current page
    pub cursor: Option<usize>,

    // ============================================
    // DIALOGS & POPUPS
    // ============================================
    /// Line-input prompt (filter, rename, TTL)
    pub input: Option<InputState>,

    /// Keys awaiting delete confirmation
    pub confirm_delete: Option<Vec<String>>,

    /// Detail panel contents for the focused key
    pub detail: Option<KeyInfo>,

    /// Whether the detail panel is shown
    pub show_detail: bool,

    /// Countdown of the focused key (name, seconds left) as last reported
    pub countdown: Option<(String, i64)>,

    /// Help overlay
    pub show_help: bool,

    /// Toast message (text, timestamp)
    pub toast_message: Option<(String, Instant)>,

    /// Whether app should quit
    pub should_quit: bool,
}

impl UiModel {
    pub fn new(vim_mode: bool) -> Self {
        Self {
            vim_mode,
            vim_command_state: VimCommandState::None,
            cursor: None,
            input: None,
            confirm_delete: None,
            detail: None,
            show_detail: true,
            countdown: None,
            show_help: false,
            toast_message: None,
            should_quit: false,
        }
    }

    /// Check if any modal dialog is currently showing
    pub fn has_modal(&self) -> bool {
        self.input.is_some() || self.confirm_delete.is_some() || self.show_help
    }

    pub fn close_all_modals(&mut self) {
        self.input = None;
        self.confirm_delete = None;
        self.show_help = false;
    }

    pub fn open_input(&mut self, kind: InputKind, initial: impl Into<String>) {
        self.input = Some(InputState {
            kind,
            buffer: initial.into(),
        });
    }

    pub fn show_toast(&mut self, message: String) {
        self.toast_message = Some((message, Instant::now()));
    }

    pub fn should_dismiss_toast(&self) -> bool {
        if let Some((_, timestamp)) = &self.toast_message {
            crate::logic::ui::should_dismiss_toast(timestamp.elapsed().as_millis())
        } else {
            false
        }
    }

    pub fn dismiss_toast(&mut self) {
        self.toast_message = None;
    }
}
