//! Cheatwiz Core Library
//!
//! This crate provides the core of cheatwiz, a terminal tool that fills the
//! `$name` placeholders of a command template through a step-by-step wizard
//! and then runs, copies or prints the result.
//!
//! # Key Features
//!
//! - **Cheat Definitions**: YAML cheats and importable variable definition sets
//! - **Variable Discovery**: Ordered `$name` scanning and transitive import collection
//! - **Dynamic Values**: Candidate lists generated by shell commands, with free-text fallback
//! - **Resolution Session**: Forward and backward navigation across variables
//! - **Output**: Hooks plus execute, copy-to-clipboard or print
//!
//! The terminal front end lives in the CLI crate and plugs in through
//! [`prompt::Prompter`].
//!
//! # Examples
//!
//! Resolving a cheat with a custom prompter:
//!
//! ```no_run
//! use cheatwiz_core::cheat_definitions::{Cheat, CheatIndex};
//! use cheatwiz_core::execution::SystemShell;
//! use cheatwiz_core::prompt::{Outcome, PromptRequest, Prompter};
//! use cheatwiz_core::session::{resolve_variables, ProcessEnvironment};
//!
//! struct Always(&'static str);
//!
//! impl Prompter for Always {
//!     fn select(&mut self, _: &PromptRequest, _: &[String]) -> cheatwiz_core::error::Result<Outcome> {
//!         Ok(Outcome::Value(self.0.to_string()))
//!     }
//!     fn prompt(&mut self, _: &PromptRequest) -> cheatwiz_core::error::Result<Outcome> {
//!         Ok(Outcome::Value(self.0.to_string()))
//!     }
//! }
//!
//! let mut cheat = Cheat::new("echo $greeting");
//! let shell = SystemShell::new("/bin/sh", None);
//! resolve_variables(&mut cheat, &CheatIndex::default(), &shell, &mut Always("hi"), &ProcessEnvironment)?;
//! # Ok::<(), cheatwiz_core::error::Error>(())
//! ```

pub mod cheat_definitions;
pub mod collection;
pub mod config;
pub mod error;
pub mod execution;
pub mod file_handling;
pub mod interpolation;
pub mod output;
pub mod progress;
pub mod prompt;
pub mod session;
pub mod value_source;
