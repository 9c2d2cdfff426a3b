use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("The sub process exited with non-success code: {}", .0)]
    SubProcessExit(i32),

    #[error("Error with sub process: {}", _0)]
    SubProcess(#[from] std::io::Error),

    #[error("The value command `{}` did not finish within {} seconds", .command, .seconds)]
    SubProcessTimeout { command: String, seconds: u64 },

    #[error("Error {} {} file at `{}`: {}", .action, .file_description, .path, .original)]
    Yaml {
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    },

    #[error("For a color, only one of `rgb`, `ansi` or `name` should be defined.")]
    MultipleColorTypes,

    #[error("Unknown color name: \"{}\"", _0)]
    UnknownColorName(String),

    #[error("No cheats were found in the cheat definition YAML. Is `{}` empty?", .path)]
    EmptyCheatDefinition { path: String },

    #[error("IO error with {} file at path `{}`: {}", .file_description, .path, .original)]
    Io {
        file_description: String,
        path: String,
        original: std::io::Error,
    },

    #[error("Terminal error: {}", .0)]
    Terminal(std::io::Error),

    #[error("Cheat not found: `{}`", .0)]
    CheatNotFound(String),

    #[error("Found a non-unique cheat ID: `{}`", .0)]
    NonUniqueCheatId(String),

    #[error("Found a non-unique variable name in {}: `{}`", .0, .1)]
    NonUniqueVariableName(String, String),

    #[error("Invalid variable name in {}: `{}`", .0, .1)]
    InvalidVariableName(String, String),

    #[error("Invalid ID: ID may not be empty")]
    EmptyId,

    #[error("Invalid ID `{}`: ID may not contain spaces", .0)]
    IdWithSpace(String),

    #[error("Invalid ID `{}`: ID may not contain a colon (reserved for future use)", .0)]
    IdWithColon(String),

    #[error("Invalid ID `{}`: ID cannot be purely numeric", .0)]
    NumericId(String),
}

impl Error {
    pub fn empty_cheat_definition(path: String) -> Self {
        Self::EmptyCheatDefinition { path }
    }

    pub fn yaml_error(
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    ) -> Self {
        Self::Yaml {
            action,
            file_description,
            path,
            original,
        }
    }

    pub fn io_error(file_description: String, path: String, original: std::io::Error) -> Self {
        Self::Io {
            file_description,
            path,
            original,
        }
    }
}
