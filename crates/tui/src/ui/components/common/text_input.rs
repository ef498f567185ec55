//! Reusable UTF-8 safe text input state with cursor management.
//!
//! Shared by the hybrid dropdown input's free-text half and the policy name
//! field. Holds only buffer and cursor; focus and rendering belong to the
//! owning widget.

use crossterm::event::{KeyCode, KeyEvent};
use unicode_width::UnicodeWidthStr;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextInputState {
    /// The underlying text buffer
    input: String,
    /// Cursor byte index into `input` (always on a UTF-8 boundary)
    cursor: usize,
}

impl TextInputState {
    pub fn new() -> Self {
        Self {
            input: String::new(),
            cursor: 0,
        }
    }

    // ----- Getters -----
    pub fn input(&self) -> &str {
        &self.input
    }
    pub fn cursor(&self) -> usize {
        self.cursor
    }
    pub fn is_empty(&self) -> bool {
        self.input.trim().is_empty()
    }
    /// Terminal column of the cursor, accounting for wide glyphs.
    pub fn cursor_display_column(&self) -> u16 {
        self.input[..self.cursor].width() as u16
    }

    // ----- Setters -----
    pub fn set_input<S: Into<String>>(&mut self, s: S) {
        self.input = s.into();
        self.cursor = self.input.len();
    }

    pub fn set_cursor(&mut self, cursor: usize) {
        self.cursor = cursor.min(self.input.len());
    }

    pub fn clear(&mut self) {
        self.input.clear();
        self.cursor = 0;
    }

    // ----- Editing primitives (UTF-8 safe) -----

    /// Move cursor one Unicode scalar to the left.
    pub fn move_left(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let prev_len = self.input[..self.cursor].chars().last().map(|c| c.len_utf8()).unwrap_or(1);
        self.cursor = self.cursor.saturating_sub(prev_len);
    }

    /// Move cursor one Unicode scalar to the right.
    pub fn move_right(&mut self) {
        if self.cursor >= self.input.len() {
            return;
        }
        let mut iter = self.input[self.cursor..].chars();
        if let Some(next) = iter.next() {
            self.cursor = self.cursor.saturating_add(next.len_utf8());
        }
    }

    /// Insert a char at the cursor.
    pub fn insert_char(&mut self, c: char) {
        self.input.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Backspace the char immediately before the cursor.
    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let prev = self.input[..self.cursor].chars().last().map(|c| c.len_utf8()).unwrap_or(1);
        let start = self.cursor - prev;
        self.input.drain(start..self.cursor);
        self.cursor = start;
    }

    /// Apply one key event to the buffer. Returns true when the buffer changed.
    pub fn handle_key_event(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char(c) => {
                self.insert_char(c);
                true
            }
            KeyCode::Backspace => {
                let was_empty = self.cursor == 0;
                self.backspace();
                !was_empty
            }
            KeyCode::Left => {
                self.move_left();
                false
            }
            KeyCode::Right => {
                self.move_right();
                false
            }
            KeyCode::Home => {
                self.cursor = 0;
                false
            }
            KeyCode::End => {
                self.cursor = self.input.len();
                false
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    #[test]
    fn utf8_move_insert_backspace() {
        let mut st = TextInputState::new();
        st.set_input("h🙂llo"); // emoji is 4 bytes
        st.set_cursor(1); // between h and 🙂
        st.insert_char('e');
        assert_eq!(st.input(), "he🙂llo");
        st.move_right(); // step over 🙂
        st.backspace(); // delete 🙂
        assert_eq!(st.input(), "hello");
        st.move_left();
        st.backspace();
        assert_eq!(st.input(), "ello");
    }

    #[test]
    fn key_events_edit_and_report_changes() {
        let mut st = TextInputState::new();
        assert!(st.handle_key_event(KeyEvent::new(KeyCode::Char('6'), KeyModifiers::NONE)));
        assert!(st.handle_key_event(KeyEvent::new(KeyCode::Char('0'), KeyModifiers::NONE)));
        assert_eq!(st.input(), "60");

        assert!(!st.handle_key_event(KeyEvent::new(KeyCode::Left, KeyModifiers::NONE)));
        assert!(st.handle_key_event(KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE)));
        assert_eq!(st.input(), "0");

        // Backspace at the start of the buffer is a no-op.
        assert!(!st.handle_key_event(KeyEvent::new(KeyCode::Home, KeyModifiers::NONE)));
        assert!(!st.handle_key_event(KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE)));
        assert_eq!(st.input(), "0");
    }

    #[test]
    fn set_input_moves_cursor_to_end() {
        let mut st = TextInputState::new();
        st.set_input("365");
        assert_eq!(st.cursor(), 3);
        st.clear();
        assert_eq!(st.input(), "");
        assert_eq!(st.cursor(), 0);
    }
}
