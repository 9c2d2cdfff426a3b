use std::collections::HashMap;
use std::fmt::{Display, Formatter};

use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};

/// Resolved variable values, keyed by name, in variable order.
pub type Scope = IndexMap<String, String>;

const HEADER_FLAG: &str = "--header";

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct VariableDefinition {
    pub name: String,
    /// Shell command whose output lines become the candidate list.
    #[serde(default, rename = "command")]
    pub value_command: Option<String>,
    /// Extra selector arguments, e.g. `--header "Pick a host"`.
    #[serde(default, rename = "args")]
    pub selector_args: String,
}

impl VariableDefinition {
    /// A definition with nothing but a name, used for variables that are
    /// referenced but never defined.
    pub fn free_text(name: &str) -> Self {
        Self {
            name: name.to_string(),
            value_command: None,
            selector_args: String::new(),
        }
    }

    pub fn has_value_command(&self) -> bool {
        self.value_command
            .as_ref()
            .is_some_and(|command| !command.trim().is_empty())
    }

    /// The value following `--header` in the selector arguments, if any.
    pub fn custom_header(&self) -> Option<String> {
        if self.selector_args.trim().is_empty() {
            return None;
        }

        let arguments = match shell_words::split(&self.selector_args) {
            Ok(arguments) => arguments,
            Err(e) => {
                debug!(
                    "Could not split selector args `{}` of `{}`: {}",
                    self.selector_args, self.name, e
                );
                return None;
            }
        };

        arguments
            .iter()
            .position(|argument| argument == HEADER_FLAG)
            .and_then(|i| arguments.get(i + 1))
            .cloned()
    }
}

impl Display for VariableDefinition {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "${}", self.name)
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct DefinitionSet {
    #[serde(default)]
    pub imports: Vec<String>,
    #[serde(default)]
    pub vars: Vec<VariableDefinition>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Cheat {
    pub command: String,
    pub id: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub vars: Vec<VariableDefinition>,
    #[serde(default)]
    pub imports: Vec<String>,
    /// Values already known for this cheat. Filled by a completed session.
    #[serde(default)]
    pub scope: Scope,
}

impl Cheat {
    pub fn new(command: &str) -> Self {
        Self {
            command: command.to_string(),
            id: None,
            description: None,
            vars: Vec::new(),
            imports: Vec::new(),
            scope: Scope::new(),
        }
    }
}

impl Display for Cheat {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match (&self.id, &self.description) {
            (Some(id), Some(desc)) => write!(formatter, "{} ({})", id, desc),
            (Some(id), None) => formatter.write_str(id),
            (None, Some(desc)) => formatter.write_str(desc),
            // Neither exists, fall back to the command itself
            (None, None) => formatter.write_str(&self.command),
        }
    }
}

/// Everything loaded from a cheat file: the cheats themselves and the named
/// definition sets they may import.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct CheatIndex {
    #[serde(default)]
    pub cheats: Vec<Cheat>,
    #[serde(default)]
    pub modules: HashMap<String, DefinitionSet>,
}

impl CheatIndex {
    pub fn find_by_id(&self, id: &str) -> Option<&Cheat> {
        self.cheats
            .iter()
            .find(|cheat| cheat.id.as_deref() == Some(id))
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ColorDefinition {
    pub rgb: Option<(u8, u8, u8)>,
    pub ansi: Option<u8>,
    pub name: Option<String>,
}
