//! Single-line text field editing.
//!
//! Just enough editing for credential forms: insert, delete,
//! cursor movement, and masked display for passwords. The cursor is a
//! char index so multi-byte input behaves.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Default, Clone)]
pub struct TextField {
    value: String,
    /// Cursor position in chars, 0..=char_count.
    cursor: usize,
    masked: bool,
}

impl TextField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn masked() -> Self {
        Self {
            masked: true,
            ..Self::default()
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// The text to draw: bullets when masked.
    pub fn display(&self) -> String {
        if self.masked {
            "•".repeat(self.value.chars().count())
        } else {
            self.value.clone()
        }
    }

    /// Cursor column in display cells.
    pub fn cursor_col(&self) -> u16 {
        self.cursor as u16
    }

    /// Applies a key event; returns true when it was consumed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            // Control chords are commands, never input.
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.insert(c);
                true
            }
            KeyCode::Backspace => {
                self.backspace();
                true
            }
            KeyCode::Delete => {
                self.delete();
                true
            }
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                true
            }
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(self.value.chars().count());
                true
            }
            KeyCode::Home => {
                self.cursor = 0;
                true
            }
            KeyCode::End => {
                self.cursor = self.value.chars().count();
                true
            }
            _ => false,
        }
    }

    fn insert(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
    }

    fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let at = self.byte_index(self.cursor - 1);
        self.value.remove(at);
        self.cursor -= 1;
    }

    fn delete(&mut self) {
        if self.cursor >= self.value.chars().count() {
            return;
        }
        let at = self.byte_index(self.cursor);
        self.value.remove(at);
    }

    fn byte_index(&self, char_idx: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_idx)
            .map_or(self.value.len(), |(i, _)| i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(field: &mut TextField, s: &str) {
        for c in s.chars() {
            field.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn typing_appends_at_cursor() {
        let mut field = TextField::new();
        type_str(&mut field, "user@prism.dev");
        assert_eq!(field.value(), "user@prism.dev");
    }

    #[test]
    fn editing_in_the_middle() {
        let mut field = TextField::new();
        type_str(&mut field, "ac");
        field.handle_key(key(KeyCode::Left));
        field.handle_key(key(KeyCode::Char('b')));
        assert_eq!(field.value(), "abc");
        field.handle_key(key(KeyCode::Backspace));
        assert_eq!(field.value(), "ac");
    }

    #[test]
    fn multibyte_input_is_safe() {
        let mut field = TextField::new();
        type_str(&mut field, "é€");
        field.handle_key(key(KeyCode::Backspace));
        assert_eq!(field.value(), "é");
        field.handle_key(key(KeyCode::Home));
        field.handle_key(key(KeyCode::Delete));
        assert!(field.is_empty());
    }

    #[test]
    fn masked_display_hides_the_value() {
        let mut field = TextField::masked();
        type_str(&mut field, "secret");
        assert_eq!(field.display(), "••••••");
        assert_eq!(field.value(), "secret");
    }
}
