use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Longest value the field accepts, in characters.
pub const CHAR_LIMIT: usize = 512;

/// Single-line editable text with a cursor, counted in characters.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct TextField {
    text: String,
    cursor: usize,
}

impl TextField {
    pub fn new(initial: &str) -> Self {
        let mut field = Self::default();
        field.set_value(initial);
        field
    }

    pub fn value(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn len(&self) -> usize {
        self.text.chars().count()
    }

    /// Replace the text and put the cursor at its end.
    pub fn set_value(&mut self, value: &str) {
        self.text = value.chars().take(CHAR_LIMIT).collect();
        self.cursor = self.len();
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_index)
            .map_or(self.text.len(), |(i, _)| i)
    }

    fn insert(&mut self, c: char) {
        if self.len() >= CHAR_LIMIT {
            return;
        }
        let at = self.byte_index(self.cursor);
        self.text.insert(at, c);
        self.cursor += 1;
    }

    fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        let at = self.byte_index(self.cursor);
        self.text.remove(at);
        true
    }

    fn delete(&mut self) -> bool {
        if self.cursor >= self.len() {
            return false;
        }
        let at = self.byte_index(self.cursor);
        self.text.remove(at);
        true
    }

    /// Apply an editing key. Returns `true` if the text changed.
    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        let control = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Char('u') if control => {
                let changed = !self.text.is_empty();
                self.set_value("");
                changed
            }
            KeyCode::Char('a') if control => {
                self.cursor = 0;
                false
            }
            KeyCode::Char('e') if control => {
                self.cursor = self.len();
                false
            }
            KeyCode::Char(_) if control || key.modifiers.contains(KeyModifiers::ALT) => false,
            KeyCode::Char(c) => {
                let before = self.len();
                self.insert(c);
                self.len() != before
            }
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                false
            }
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(self.len());
                false
            }
            KeyCode::Home => {
                self.cursor = 0;
                false
            }
            KeyCode::End => {
                self.cursor = self.len();
                false
            }
            _ => false,
        }
    }
}
