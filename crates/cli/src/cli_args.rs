//! Command-line argument parsing.
//!
//! This module defines the command-line interface of the `cw` binary using
//! the `clap` crate.

use cheatwiz_core::config::OutputMode;
use clap::{Parser, ValueEnum};

/// Where the finished command goes, as given on the command line.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputChoice {
    /// Run the command in the shell
    #[value(alias = "execute")]
    Exec,
    /// Copy the command to the clipboard
    Copy,
    /// Print the command to stdout
    Print,
}

impl From<OutputChoice> for OutputMode {
    fn from(choice: OutputChoice) -> Self {
        match choice {
            OutputChoice::Exec => OutputMode::Exec,
            OutputChoice::Copy => OutputMode::Copy,
            OutputChoice::Print => OutputMode::Print,
        }
    }
}

/// Command-line arguments for the cheatwiz CLI tool.
///
/// # Examples
///
/// ```rust
/// use clap::Parser;
/// use cheatwiz_cli::cli_args::Args;
///
/// let args = Args::parse_from(["cw", "-q", "deploy"]);
/// assert_eq!(args.query.as_deref(), Some("deploy"));
/// ```
#[derive(Parser, Debug)] // requires `derive` feature
#[command(term_width = 0)] // Just to make testing across clap features easier
pub struct Args {
    /// Path to the cheats YAML file.
    ///
    /// If not provided, defaults to `~/.cheatwiz/cheats.yml`.
    #[arg(long, short = 'c')]
    pub cheats_path: Option<String>,

    /// Path to the settings YAML file.
    ///
    /// If not provided, defaults to `~/.cheatwiz/config.yml`.
    #[arg(long, short = 'C')]
    pub config_path: Option<String>,

    /// What to do with the finished command, overriding the settings file.
    #[arg(long, short = 'o', value_enum)]
    pub output: Option<OutputChoice>,

    /// Initial filter for the cheat picker.
    #[arg(long, short = 'q')]
    pub query: Option<String>,

    /// The ID of the cheat to fill in directly, skipping the picker.
    #[arg(num_args(1))]
    pub cheat_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_args_default_values() {
        let args = Args::parse_from(["cw"]);

        assert!(args.cheats_path.is_none());
        assert!(args.config_path.is_none());
        assert!(args.output.is_none());
        assert!(args.query.is_none());
        assert!(args.cheat_id.is_none());
    }

    #[test]
    fn test_args_short_flags() {
        let args = Args::parse_from([
            "cw",
            "-c",
            "/custom/cheats.yml",
            "-C",
            "/custom/config.yml",
            "-o",
            "copy",
            "-q",
            "kube",
        ]);

        assert_eq!(args.cheats_path, Some("/custom/cheats.yml".to_string()));
        assert_eq!(args.config_path, Some("/custom/config.yml".to_string()));
        assert_eq!(args.output, Some(OutputChoice::Copy));
        assert_eq!(args.query, Some("kube".to_string()));
    }

    #[test]
    fn test_args_long_flags() {
        let args = Args::parse_from([
            "cw",
            "--cheats-path",
            "/custom/cheats.yml",
            "--config-path",
            "/custom/config.yml",
            "--output",
            "exec",
            "--query",
            "logs",
        ]);

        assert_eq!(args.cheats_path, Some("/custom/cheats.yml".to_string()));
        assert_eq!(args.config_path, Some("/custom/config.yml".to_string()));
        assert_eq!(args.output, Some(OutputChoice::Exec));
        assert_eq!(args.query, Some("logs".to_string()));
    }

    #[test]
    fn test_args_cheat_id() {
        let args = Args::parse_from(["cw", "deploy"]);
        assert_eq!(args.cheat_id, Some("deploy".to_string()));
    }

    #[test]
    fn test_output_alias_and_conversion() {
        let args = Args::parse_from(["cw", "-o", "execute"]);
        assert_eq!(args.output, Some(OutputChoice::Exec));

        assert_eq!(OutputMode::from(OutputChoice::Exec), OutputMode::Exec);
        assert_eq!(OutputMode::from(OutputChoice::Copy), OutputMode::Copy);
        assert_eq!(OutputMode::from(OutputChoice::Print), OutputMode::Print);
    }

    #[test]
    fn test_unknown_output_is_rejected() {
        assert!(Args::try_parse_from(["cw", "-o", "teleport"]).is_err());
    }

    #[test]
    fn test_too_many_positionals_are_rejected() {
        assert!(Args::try_parse_from(["cw", "deploy", "extra"]).is_err());
    }
}
