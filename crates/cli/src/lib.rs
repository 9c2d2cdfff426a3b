//! Cheatwiz CLI Library
//!
//! This crate provides the terminal front end of cheatwiz: the cheat picker,
//! the interactive wizard steps that fill in each `$name` placeholder, and
//! the command-line interface of the `cw` binary.
//!
//! # Architecture
//!
//! - [`cli_args`]: Command-line argument parsing
//! - [`cheat_selection`]: Fuzzy-filtered picker over the loaded cheats
//! - [`wizard`]: Candidate selector and free-text entry, driven through
//!   [`wizard::TerminalPrompter`]
//! - [`theme`]: Colours, optionally overridden from the settings file
//!
//! All drawing happens on stderr, so `cw` can be used inside `$(...)` when
//! the output mode is `print`.
//!
//! # Examples
//!
//! ```bash
//! # Pick a cheat interactively
//! cw
//!
//! # Start the picker already filtered
//! cw -q kube
//!
//! # Fill in a cheat by ID and run it
//! cw -o exec deploy
//! ```

pub mod cheat_selection;
pub mod cli_args;
pub mod terminal;
pub mod theme;
pub mod wizard;
