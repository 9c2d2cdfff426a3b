//! Hands the finished command to the shell, the clipboard or stdout.

use std::env;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use log::{debug, info};

use crate::config::{OutputMode, Settings};
use crate::error::{Error, Result};
use crate::execution::ShellRunner;

/// Clipboard helpers in order of preference, with their arguments.
const CLIPBOARD_HELPERS: &[(&str, &[&str])] = &[
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
    ("pbcopy", &[]),
];

pub trait Clipboard {
    /// Copy `text`, returning `false` when no clipboard is available.
    ///
    /// # Errors
    ///
    /// Returns an error if a clipboard helper was found but failed.
    fn copy(&self, text: &str) -> Result<bool>;
}

/// Shells out to the first clipboard helper found on `PATH`.
pub struct SystemClipboard;

fn find_in_path(program: &str) -> Option<PathBuf> {
    let path = env::var_os("PATH")?;
    env::split_paths(&path)
        .map(|directory| directory.join(program))
        .find(|candidate| candidate.is_file())
}

impl Clipboard for SystemClipboard {
    fn copy(&self, text: &str) -> Result<bool> {
        let Some((program, arguments)) = CLIPBOARD_HELPERS
            .iter()
            .find(|(program, _)| find_in_path(program).is_some())
        else {
            debug!("No clipboard helper found on PATH");
            return Ok(false);
        };

        info!("Copying with `{}`", program);
        let mut child = Command::new(program)
            .args(*arguments)
            .stdin(Stdio::piped())
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(text.as_bytes())?;
        }

        let status = child.wait()?;
        if status.success() {
            Ok(true)
        } else {
            Err(Error::SubProcessExit(status.code().unwrap_or(1)))
        }
    }
}

/// The path [`dispatch`] took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatched {
    Executed,
    Copied,
    Printed,
}

pub fn apply_hooks(pre_hook: Option<&str>, command: &str, post_hook: Option<&str>) -> String {
    format!(
        "{}{}{}",
        pre_hook.unwrap_or_default(),
        command,
        post_hook.unwrap_or_default()
    )
}

/// Apply the configured hooks to `command` and send it wherever
/// `settings.output` says. Printing goes to `out`.
///
/// # Errors
///
/// Returns an error if the command or clipboard helper fails, or `out`
/// cannot be written.
pub fn dispatch<R, C, W>(
    command: &str,
    settings: &Settings,
    runner: &R,
    clipboard: &C,
    out: &mut W,
) -> Result<Dispatched>
where
    R: ShellRunner + ?Sized,
    C: Clipboard + ?Sized,
    W: Write + ?Sized,
{
    let final_command = apply_hooks(
        settings.pre_hook.as_deref(),
        command,
        settings.post_hook.as_deref(),
    );

    match settings.output {
        OutputMode::Exec => {
            eprintln!("▶ Executing: {final_command}");
            runner.execute(&final_command)?;
            Ok(Dispatched::Executed)
        }
        OutputMode::Copy => {
            if clipboard.copy(&final_command)? {
                eprintln!("✓ Copied to clipboard");
                Ok(Dispatched::Copied)
            } else {
                print_verbatim(&final_command, out)?;
                Ok(Dispatched::Printed)
            }
        }
        OutputMode::Print => {
            print_verbatim(&final_command, out)?;
            Ok(Dispatched::Printed)
        }
    }
}

fn print_verbatim<W: Write + ?Sized>(text: &str, out: &mut W) -> Result<()> {
    out.write_all(text.as_bytes())?;
    out.flush()?;
    Ok(())
}
