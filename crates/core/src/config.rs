//! Configuration paths and settings for cheatwiz.
//!
//! This module resolves configuration file paths (expanding `~`) and defines
//! the settings read from the YAML config file.

use std::time::Duration;

use serde::Deserialize;

use crate::cheat_definitions::ColorDefinition;

/// Default path for the cheats file
const DEFAULT_CHEATS_PATH: &str = "~/.cheatwiz/cheats.yml";
/// Default path for the settings file
const DEFAULT_CONFIG_PATH: &str = "~/.cheatwiz/config.yml";

/// Default shell to use for command execution
pub const DEFAULT_SHELL: &str = "/bin/bash";

/// Default limit for value commands, in seconds
pub const DEFAULT_VALUE_COMMAND_TIMEOUT_SECS: u64 = 30;

/// Resolves the cheats file path.
///
/// If a custom path is provided, uses that path. Otherwise, uses the default
/// cheats path. Shell expansions like `~` are resolved.
///
/// # Examples
///
/// ```
/// use cheatwiz_core::config::get_cheats_path;
///
/// let default_path = get_cheats_path(&None);
/// assert!(default_path.ends_with("cheats.yml"));
/// ```
pub fn get_cheats_path(cheats_path_arg: &Option<String>) -> String {
    let cheats_path = match cheats_path_arg {
        Some(cheats_path) => cheats_path,
        None => DEFAULT_CHEATS_PATH,
    };

    shellexpand::tilde(cheats_path).to_string()
}

/// Resolves the settings file path, the same way as [`get_cheats_path`].
pub fn get_config_path(config_path_arg: &Option<String>) -> String {
    let config_path = match config_path_arg {
        Some(config_path) => config_path,
        None => DEFAULT_CONFIG_PATH,
    };

    shellexpand::tilde(config_path).to_string()
}

/// What happens to the final command.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Run it in the shell.
    #[serde(alias = "execute")]
    Exec,
    /// Put it on the clipboard.
    Copy,
    /// Write it to stdout.
    #[default]
    Print,
}

/// Optional colour overrides for the interactive screens.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ThemeDefinition {
    /// Active variable, cursor and custom headers.
    pub accent: Option<ColorDefinition>,
    /// Resolved values.
    pub value: Option<ColorDefinition>,
    /// Candidate lines and check marks.
    pub command: Option<ColorDefinition>,
    /// Hints and pending variables.
    pub dim: Option<ColorDefinition>,
    pub divider: Option<ColorDefinition>,
    /// Background of the highlighted candidate.
    pub selected_background: Option<ColorDefinition>,
    /// Text of the highlighted candidate.
    pub selected_foreground: Option<ColorDefinition>,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub output: OutputMode,
    /// Text put in front of the final command.
    pub pre_hook: Option<String>,
    /// Text put after the final command.
    pub post_hook: Option<String>,
    pub shell: Option<String>,
    /// `None` or `0` disables the limit.
    pub value_command_timeout_secs: Option<u64>,
    pub theme: ThemeDefinition,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output: OutputMode::default(),
            pre_hook: None,
            post_hook: None,
            shell: None,
            value_command_timeout_secs: Some(DEFAULT_VALUE_COMMAND_TIMEOUT_SECS),
            theme: ThemeDefinition::default(),
        }
    }
}

impl Settings {
    /// The configured shell, else `$SHELL`, else [`DEFAULT_SHELL`].
    pub fn shell(&self) -> String {
        self.shell
            .clone()
            .or_else(|| std::env::var("SHELL").ok())
            .filter(|shell| !shell.is_empty())
            .unwrap_or_else(|| DEFAULT_SHELL.to_string())
    }

    pub fn value_command_timeout(&self) -> Option<Duration> {
        self.value_command_timeout_secs
            .filter(|&seconds| seconds > 0)
            .map(Duration::from_secs)
    }
}
