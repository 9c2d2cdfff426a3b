use log::{debug, warn};

use crate::cheat_definitions::{Scope, VariableDefinition};
use crate::execution::ShellRunner;
use crate::interpolation::substitute_literal;

/// How the value of one variable is going to be obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueSource {
    FreeText,
    Candidates(Vec<String>),
}

/// Decide between a candidate list and free-text entry for `definition`.
///
/// A value command that fails, or prints fewer than two lines, gives free
/// text. Failures are logged and never returned.
pub fn determine_source<R: ShellRunner + ?Sized>(
    definition: &VariableDefinition,
    scope: &Scope,
    runner: &R,
) -> ValueSource {
    let Some(value_command) = definition
        .value_command
        .as_deref()
        .filter(|_| definition.has_value_command())
    else {
        return ValueSource::FreeText;
    };

    let command = substitute_literal(value_command, scope);

    let output = match runner.run_shell(&command) {
        Ok(output) => output,
        Err(e) => {
            warn!(
                "Value command for {} failed, falling back to free text: {}",
                definition, e
            );
            return ValueSource::FreeText;
        }
    };

    let lines = split_lines(&output);
    debug!("Value command for {} produced {} lines", definition, lines.len());

    if lines.len() < 2 {
        ValueSource::FreeText
    } else {
        ValueSource::Candidates(lines)
    }
}

/// Non-empty, trimmed lines of `output`.
pub fn split_lines(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(ToString::to_string)
        .collect()
}
