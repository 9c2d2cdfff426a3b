//! The candidate list with a filter field.

use cheatwiz_core::prompt::Outcome;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::field::TextField;
use super::KeyResult;

/// Rows of candidates shown at once.
pub const LIST_HEIGHT: usize = 10;

/// Indexes of `options` containing every whitespace-separated word of
/// `query`, ignoring case. An empty query keeps everything.
pub fn filter_options(options: &[String], query: &str) -> Vec<usize> {
    let words: Vec<String> = query.split_whitespace().map(str::to_lowercase).collect();

    options
        .iter()
        .enumerate()
        .filter(|(_, option)| {
            let option = option.to_lowercase();
            words.iter().all(|word| option.contains(word.as_str()))
        })
        .map(|(i, _)| i)
        .collect()
}

/// The `start..end` range of rows to draw so that `cursor` stays roughly
/// in the middle of a window of `height` rows.
pub fn scroll_window(cursor: usize, total: usize, height: usize) -> (usize, usize) {
    if total <= height {
        return (0, total);
    }

    let start = cursor.saturating_sub(height / 2).min(total - height);
    (start, start + height)
}

#[derive(Clone, Debug)]
pub struct SelectorState {
    options: Vec<String>,
    filtered: Vec<usize>,
    cursor: usize,
    field: TextField,
}

impl SelectorState {
    /// The filter starts out holding `prefill`, so the list may start narrowed.
    pub fn new(options: Vec<String>, prefill: &str) -> Self {
        let mut state = Self {
            options,
            filtered: Vec::new(),
            cursor: 0,
            field: TextField::new(prefill),
        };
        state.refilter();
        state
    }

    pub fn field(&self) -> &TextField {
        &self.field
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn filtered(&self) -> impl Iterator<Item = &str> {
        self.filtered.iter().map(|&i| self.options[i].as_str())
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    pub fn highlighted(&self) -> Option<&str> {
        self.filtered
            .get(self.cursor)
            .map(|&i| self.options[i].as_str())
    }

    fn refilter(&mut self) {
        self.filtered = filter_options(&self.options, self.field.value());
        self.clamp_cursor();
    }

    fn clamp_cursor(&mut self) {
        self.cursor = self.cursor.min(self.filtered.len().saturating_sub(1));
    }

    fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    fn move_down(&mut self) {
        self.cursor += 1;
        self.clamp_cursor();
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> KeyResult {
        let control = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Char('c') if control => KeyResult::Done(Outcome::GlobalExit),
            KeyCode::Esc => KeyResult::Done(Outcome::GoBack),
            KeyCode::Enter => {
                let value = self
                    .highlighted()
                    .map_or_else(|| self.field.value().to_string(), str::to_string);
                KeyResult::Done(Outcome::Value(value))
            }
            KeyCode::Up => {
                self.move_up();
                KeyResult::Continue
            }
            KeyCode::Char('p') if control => {
                self.move_up();
                KeyResult::Continue
            }
            KeyCode::Down => {
                self.move_down();
                KeyResult::Continue
            }
            KeyCode::Char('n') if control => {
                self.move_down();
                KeyResult::Continue
            }
            KeyCode::Tab => {
                if let Some(candidate) = self.highlighted().map(str::to_string) {
                    self.field.set_value(&candidate);
                    self.refilter();
                }
                KeyResult::Continue
            }
            _ => {
                if self.field.handle_key(&key) {
                    self.refilter();
                }
                KeyResult::Continue
            }
        }
    }
}
