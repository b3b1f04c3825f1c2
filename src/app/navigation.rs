//! Cursor movement within the current page

use keytui::logic;

use crate::App;

impl App {
    fn page_len(&self) -> usize {
        self.model.keys.current_page().items.len()
    }

    pub(crate) fn move_cursor(&mut self, delta: isize) {
        let len = self.page_len();
        self.model.ui.cursor = logic::navigation::move_cursor(self.model.ui.cursor, delta, len);
        self.sync_focus();
    }

    pub(crate) fn half_page_down(&mut self) {
        let half = (self.page_len() / 2).max(1) as isize;
        self.move_cursor(half);
    }

    pub(crate) fn half_page_up(&mut self) {
        let half = (self.page_len() / 2).max(1) as isize;
        self.move_cursor(-half);
    }

    pub(crate) fn cursor_first(&mut self) {
        if self.page_len() > 0 {
            self.model.ui.cursor = Some(0);
            self.sync_focus();
        }
    }

    pub(crate) fn cursor_last(&mut self) {
        let len = self.page_len();
        if len > 0 {
            self.model.ui.cursor = Some(len - 1);
            self.sync_focus();
        }
    }
}
