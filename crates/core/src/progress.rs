//! What the wizard header shows at each step: the command with resolved
//! values filled in and a checklist of every variable.

use crate::interpolation::variable_spans;
use crate::session::VariableState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandSegment {
    Literal(String),
    /// A value that replaced a resolved variable.
    Resolved(String),
    /// The placeholder of the variable being asked for, by name.
    Active(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VariableProgress {
    Resolved { name: String, value: String },
    Active { name: String },
    Pending { name: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProgressModel {
    pub command: Vec<CommandSegment>,
    pub variables: Vec<VariableProgress>,
}

impl ProgressModel {
    /// Build the model for `command` while `cursor` is the active step.
    pub fn build(command: &str, states: &[VariableState], cursor: usize) -> Self {
        let mut segments = vec![CommandSegment::Literal(command.to_string())];

        for (i, state) in states.iter().enumerate() {
            let name = &state.definition.name;
            if state.resolved {
                segments = split_literals(segments, name, || {
                    CommandSegment::Resolved(state.value.clone())
                });
            } else if i == cursor {
                segments = split_literals(segments, name, || CommandSegment::Active(name.clone()));
            }
        }

        let variables = states
            .iter()
            .enumerate()
            .map(|(i, state)| {
                let name = state.definition.name.clone();
                if state.resolved {
                    VariableProgress::Resolved {
                        name,
                        value: state.value.clone(),
                    }
                } else if i == cursor {
                    VariableProgress::Active { name }
                } else {
                    VariableProgress::Pending { name }
                }
            })
            .collect();

        Self {
            command: segments,
            variables,
        }
    }

    /// The command as plain text, placeholders kept as `$name`.
    pub fn plain_command(&self) -> String {
        self.command
            .iter()
            .map(|segment| match segment {
                CommandSegment::Literal(text) | CommandSegment::Resolved(text) => text.clone(),
                CommandSegment::Active(name) => format!("${name}"),
            })
            .collect()
    }
}

/// Cut every literal segment around `$name`, inserting `make()` in its place.
/// Segments produced earlier are not searched again.
fn split_literals<F>(segments: Vec<CommandSegment>, name: &str, make: F) -> Vec<CommandSegment>
where
    F: Fn() -> CommandSegment,
{
    let mut result = Vec::with_capacity(segments.len());

    for segment in segments {
        let CommandSegment::Literal(text) = segment else {
            result.push(segment);
            continue;
        };

        let mut last = 0;
        for (start, end) in variable_spans(&text, name) {
            if start > last {
                result.push(CommandSegment::Literal(text[last..start].to_string()));
            }
            result.push(make());
            last = end;
        }
        if last < text.len() {
            result.push(CommandSegment::Literal(text[last..].to_string()));
        }
    }

    result
}
