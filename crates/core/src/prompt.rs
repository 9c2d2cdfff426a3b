//! The boundary between the resolution session and whatever asks the user.

use crate::error::Result;
use crate::progress::ProgressModel;

/// What an interactive component hands back to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Value(String),
    /// Re-open the previous variable.
    GoBack,
    /// Leave the whole program.
    GlobalExit,
}

/// Everything a component needs to draw one wizard step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptRequest {
    pub variable_name: String,
    pub progress: ProgressModel,
    /// Replaces the generic "Select value for" / "Enter value for" line.
    pub custom_header: Option<String>,
    /// Initial text of the input field.
    pub prefill: String,
}

pub trait Prompter {
    /// Let the user pick one of `candidates` or type a value.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be driven.
    fn select(&mut self, request: &PromptRequest, candidates: &[String]) -> Result<Outcome>;

    /// Let the user type a value.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be driven.
    fn prompt(&mut self, request: &PromptRequest) -> Result<Outcome>;
}
