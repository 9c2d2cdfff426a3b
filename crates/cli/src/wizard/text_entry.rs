use cheatwiz_core::prompt::Outcome;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::field::TextField;
use super::KeyResult;

/// Free-text input for a variable without candidates.
#[derive(Clone, Debug)]
pub struct TextEntryState {
    field: TextField,
}

impl TextEntryState {
    pub fn new(prefill: &str) -> Self {
        Self {
            field: TextField::new(prefill),
        }
    }

    pub fn field(&self) -> &TextField {
        &self.field
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> KeyResult {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                KeyResult::Done(Outcome::GlobalExit)
            }
            KeyCode::Esc => KeyResult::Done(Outcome::GoBack),
            KeyCode::Enter => KeyResult::Done(Outcome::Value(self.field.value().to_string())),
            _ => {
                self.field.handle_key(&key);
                KeyResult::Continue
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_enter_returns_typed_value() {
        let mut state = TextEntryState::new("");
        for c in "world".chars() {
            assert_eq!(state.handle_key(key(KeyCode::Char(c))), KeyResult::Continue);
        }
        assert_eq!(
            state.handle_key(key(KeyCode::Enter)),
            KeyResult::Done(Outcome::Value("world".to_string()))
        );
    }

    #[test]
    fn test_empty_value_is_accepted() {
        let mut state = TextEntryState::new("");
        assert_eq!(
            state.handle_key(key(KeyCode::Enter)),
            KeyResult::Done(Outcome::Value(String::new()))
        );
    }

    #[test]
    fn test_prefill_is_editable() {
        let mut state = TextEntryState::new("8080");
        state.handle_key(key(KeyCode::Backspace));
        state.handle_key(key(KeyCode::Char('1')));
        assert_eq!(state.field().value(), "8081");
    }

    #[test]
    fn test_escape_and_interrupt() {
        let mut state = TextEntryState::new("x");
        assert_eq!(
            state.handle_key(key(KeyCode::Esc)),
            KeyResult::Done(Outcome::GoBack)
        );
        assert_eq!(
            state.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            KeyResult::Done(Outcome::GlobalExit)
        );
    }
}
