use std::io::stdout;
use std::process::ExitCode;

use clap::Parser;
use log::{debug, info};

use cheatwiz_cli::cheat_selection::{prompt_for_cheat_choice, CheatChoice};
use cheatwiz_cli::cli_args::Args;
use cheatwiz_cli::theme::Theme;
use cheatwiz_cli::wizard::TerminalPrompter;
use cheatwiz_core::cheat_definitions::{Cheat, CheatIndex};
use cheatwiz_core::config::Settings;
use cheatwiz_core::error::{Error, Result};
use cheatwiz_core::execution::SystemShell;
use cheatwiz_core::interpolation::substitute_scope;
use cheatwiz_core::output::{dispatch, SystemClipboard};
use cheatwiz_core::session::{resolve_variables, ProcessEnvironment, SessionOutcome};
use cheatwiz_core::{config, file_handling};

/// Load the settings and the cheat index, applying command-line overrides.
fn initialize_config(args: &Args) -> Result<(Settings, CheatIndex)> {
    let config_path = config::get_config_path(&args.config_path);
    debug!("Config path: `{}`", config_path);
    let mut settings = file_handling::get_settings(&config_path)?;

    if let Some(output) = args.output {
        settings.output = output.into();
    }

    let cheats_path = config::get_cheats_path(&args.cheats_path);
    debug!("Cheats path: `{}`", cheats_path);
    let index = file_handling::get_cheat_index(&cheats_path)?;

    Ok((settings, index))
}

fn execute() -> Result<()> {
    let args = Args::parse();
    let (settings, index) = initialize_config(&args)?;

    let theme = Theme::from_definition(&settings.theme)?;
    let shell = SystemShell::new(&settings.shell(), settings.value_command_timeout());
    let mut prompter = TerminalPrompter::new(theme);

    // A cheat named on the command line has no picker to return to
    let direct: Option<&Cheat> = match &args.cheat_id {
        Some(id) => Some(
            index
                .find_by_id(id)
                .ok_or_else(|| Error::CheatNotFound(id.clone()))?,
        ),
        None => None,
    };
    let query = args.query.clone().unwrap_or_default();

    loop {
        let mut cheat = match direct {
            Some(cheat) => cheat.clone(),
            None => match prompt_for_cheat_choice(&index.cheats, &theme, &query)? {
                CheatChoice::Index(i) => index.cheats[i].clone(),
                CheatChoice::Quit => return Ok(()),
            },
        };
        info!("Resolving cheat `{}`", cheat);

        match resolve_variables(&mut cheat, &index, &shell, &mut prompter, &ProcessEnvironment)? {
            SessionOutcome::Completed(_) => {
                let command = substitute_scope(&cheat.command, &cheat.scope);
                let dispatched =
                    dispatch(&command, &settings, &shell, &SystemClipboard, &mut stdout().lock())?;
                debug!("Dispatched as {:?}", dispatched);
                return Ok(());
            }
            SessionOutcome::ReturnToCaller if direct.is_none() => {
                debug!("Back to the cheat picker");
            }
            SessionOutcome::ReturnToCaller => return Ok(()),
            SessionOutcome::GlobalExit => {
                info!("Exit requested, nothing dispatched");
                return Ok(());
            }
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();

    match execute() {
        Ok(()) => ExitCode::SUCCESS,
        // The executed command already reported its own failure
        Err(Error::SubProcessExit(code)) => ExitCode::from(u8::try_from(code).unwrap_or(1)),
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
