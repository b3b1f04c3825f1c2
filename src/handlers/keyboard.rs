//! Keyboard Input Handler
//!
//! Dispatches key presses to App actions. Modal states (prompt, delete
//! confirmation, help) take precedence over the normal bindings.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use keytui::model::VimCommandState;

use crate::App;

/// Handle keyboard input
pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind == KeyEventKind::Release {
        return;
    }

    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.model.ui.should_quit = true;
        return;
    }

    // Line-input prompt (filter, rename, TTL)
    if app.model.ui.input.is_some() {
        match key.code {
            KeyCode::Enter => app.submit_input(),
            KeyCode::Esc => app.cancel_input(),
            KeyCode::Backspace => app.input_pop(),
            KeyCode::Char(c) => app.input_push(c),
            _ => {}
        }
        return;
    }

    // Delete confirmation
    if app.model.ui.confirm_delete.is_some() {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_delete(),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.cancel_delete(),
            _ => {} // Ignore other keys while prompt is showing
        }
        return;
    }

    // Any key closes the help overlay
    if app.model.ui.show_help {
        app.model.ui.show_help = false;
        return;
    }

    let vim = app.model.ui.vim_mode;
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    // 'gg' sequence
    let waiting_for_g = app.model.ui.vim_command_state == VimCommandState::WaitingForSecondG;
    app.model.ui.vim_command_state = VimCommandState::None;

    match key.code {
        KeyCode::Char('q') => app.model.ui.should_quit = true,

        // Vim keybindings with Ctrl modifiers (check before 'd' and other letters)
        KeyCode::Char('d') if vim && ctrl => app.half_page_down(),
        KeyCode::Char('u') if vim && ctrl => app.half_page_up(),
        KeyCode::Char('f') if vim && ctrl => app.next_page(),
        KeyCode::Char('b') if vim && ctrl => app.prev_page(),
        KeyCode::Char('j') if vim => app.move_cursor(1),
        KeyCode::Char('k') if vim => app.move_cursor(-1),
        KeyCode::Char('h') if vim => app.prev_page(),
        KeyCode::Char('l') if vim => app.next_page(),
        KeyCode::Char('g') if vim => {
            if waiting_for_g {
                app.cursor_first();
            } else {
                app.model.ui.vim_command_state = VimCommandState::WaitingForSecondG;
            }
        }
        KeyCode::Char('G') if vim => app.cursor_last(),

        KeyCode::Up => app.move_cursor(-1),
        KeyCode::Down => app.move_cursor(1),
        KeyCode::Left | KeyCode::PageUp => app.prev_page(),
        KeyCode::Right | KeyCode::PageDown => app.next_page(),
        KeyCode::Home => app.cursor_first(),
        KeyCode::End => app.cursor_last(),

        // Filters
        KeyCode::Char('/') => app.begin_filter_input(),
        KeyCode::Char('f') if ctrl => app.begin_filter_input(),
        KeyCode::Char('t') => app.cycle_type_filter(),
        KeyCode::Char('e') => app.cycle_ttl_filter(),
        KeyCode::Char('c') => app.clear_filters(),
        KeyCode::Esc => app.clear_selection_or_filters(),

        // Sorting and paging
        KeyCode::Char('s') => app.cycle_sort_field(),
        KeyCode::Char('S') => app.toggle_sort_order(),
        KeyCode::Char('p') => app.cycle_page_size(),

        // Selection
        KeyCode::Char(' ') => {
            app.toggle_select_focused();
            app.move_cursor(1);
        }
        KeyCode::Char('a') => app.toggle_select_all(),

        // Key operations
        KeyCode::Char('d') | KeyCode::Delete => app.request_delete(),
        KeyCode::Char('r') => app.begin_rename(),
        KeyCode::Char('T') => app.begin_set_ttl(),
        KeyCode::Char('x') => app.persist_focused(),
        KeyCode::Char('R') | KeyCode::F(5) => {
            app.reload_keys();
            app.model.show_toast("Reloading keys".to_string());
        }

        KeyCode::Char('i') | KeyCode::Enter => {
            app.model.ui.show_detail = !app.model.ui.show_detail;
        }
        KeyCode::Char('?') => app.model.ui.show_help = true,

        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use keytui::api::{KeyRecord, KeyType};
    use keytui::model::FilterUpdate;

    fn press(app: &mut App, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn app_with_keys() -> App {
        let mut app = App::new(Config::default()).unwrap();
        app.model.keys.load(vec![
            KeyRecord::new("user:1", KeyType::String, -1, 0),
            KeyRecord::new("user:2", KeyType::Hash, -1, 0),
            KeyRecord::new("cache:1", KeyType::String, 60, 0),
        ]);
        app
    }

    #[tokio::test]
    async fn test_esc_clears_selection_before_filters() {
        let mut app = app_with_keys();
        app.model.keys.set_filter(FilterUpdate::pattern("user:*"));
        app.model.keys.toggle_select("user:1", true);

        press(&mut app, KeyCode::Esc);
        assert!(app.model.keys.selected_names().is_empty());
        assert_eq!(app.model.keys.filter().pattern, "user:*");

        press(&mut app, KeyCode::Esc);
        assert!(app.model.keys.filter().pattern.is_empty());
        assert_eq!(app.model.keys.filtered_count(), 3);
    }
}
