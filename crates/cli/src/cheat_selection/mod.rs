//! Interactive cheat picker.
//!
//! The picker is the stage the wizard returns to when the user backs out of
//! the first variable.
//!
//! # User Interface
//!
//! - Arrow keys, Ctrl+P/Ctrl+N or j/k to move, wrapping at both ends
//! - `/` to start filtering (fuzzy match on name, description and command)
//! - Enter or a mouse click to choose
//! - `q`, Escape or Ctrl+C to quit

pub mod types;
pub mod ui;

pub use types::CheatChoice;
pub use ui::prompt_for_cheat_choice;
