use std::io::Read;
use std::process::{Child, Command, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use log::{debug, info, warn};
use wait_timeout::ChildExt;

use crate::error::{Error, Result};

/// Runs shell commands on behalf of the wizard.
pub trait ShellRunner {
    /// Run `command` and return its output (stdout followed by stderr).
    ///
    /// # Errors
    ///
    /// Returns an error if the command cannot be spawned, exits with a
    /// non-zero status or runs past its timeout.
    fn run_shell(&self, command: &str) -> Result<String>;

    /// Run `command` as the final action, attached to the terminal.
    ///
    /// # Errors
    ///
    /// Returns an error if command execution fails or exits with non-zero status.
    fn execute(&self, command: &str) -> Result<()>;
}

/// [`ShellRunner`] backed by `<shell> -c <command>`.
#[derive(Debug, Clone)]
pub struct SystemShell {
    shell: String,
    timeout: Option<Duration>,
}

impl SystemShell {
    pub fn new(shell: &str, timeout: Option<Duration>) -> Self {
        Self {
            shell: shell.to_string(),
            timeout,
        }
    }

    fn command(&self, command: &str) -> Command {
        let mut shell = Command::new(&self.shell);
        shell.args(["-c", command]);
        shell
    }
}

fn spawn_reader<R: Read + Send + 'static>(source: Option<R>) -> Option<Receiver<Vec<u8>>> {
    source.map(|mut source| {
        let (sender, receiver) = mpsc::channel();
        thread::spawn(move || {
            let mut buffer = Vec::new();
            if let Err(e) = source.read_to_end(&mut buffer) {
                debug!("Stopped reading sub process output: {}", e);
            }
            if sender.send(buffer).is_err() {
                debug!("Sub process output arrived after the deadline");
            }
        });
        receiver
    })
}

/// Output of one pipe, or `None` if it is still open at `deadline`.
fn collect_output(reader: Option<Receiver<Vec<u8>>>, deadline: Option<Instant>) -> Option<String> {
    let Some(receiver) = reader else {
        return Some(String::new());
    };

    let bytes = match deadline {
        Some(deadline) => {
            match receiver.recv_timeout(deadline.saturating_duration_since(Instant::now())) {
                Ok(bytes) => bytes,
                Err(RecvTimeoutError::Timeout) => return None,
                Err(RecvTimeoutError::Disconnected) => Vec::new(),
            }
        }
        None => receiver.recv().unwrap_or_default(),
    };

    Some(String::from_utf8_lossy(&bytes).into_owned())
}

fn kill_child(child: &mut Child) {
    if let Err(e) = child.kill() {
        debug!("Could not kill sub process {}: {}", child.id(), e);
    }
    if let Err(e) = child.wait() {
        debug!("Could not reap sub process {}: {}", child.id(), e);
    }
}

fn timed_out(command: &str, timeout: Duration) -> Error {
    Error::SubProcessTimeout {
        command: command.to_string(),
        seconds: timeout.as_secs(),
    }
}

impl ShellRunner for SystemShell {
    /// With a timeout set, the limit covers both the shell itself and any
    /// background process it leaves holding stdout or stderr. Such a process
    /// is not killed; its reader thread finishes whenever the pipe closes.
    fn run_shell(&self, command: &str) -> Result<String> {
        debug!("Running value command with {}: `{}`", self.shell, command);

        let deadline = self.timeout.map(|timeout| Instant::now() + timeout);
        let mut child = self
            .command(command)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        // Drain both pipes while waiting so a chatty command cannot block on a full pipe
        let stdout_reader = spawn_reader(child.stdout.take());
        let stderr_reader = spawn_reader(child.stderr.take());

        let status = match self.timeout {
            Some(timeout) => match child.wait_timeout(timeout)? {
                Some(status) => status,
                None => {
                    warn!("Value command timed out after {:?}: `{}`", timeout, command);
                    kill_child(&mut child);
                    return Err(timed_out(command, timeout));
                }
            },
            None => child.wait()?,
        };

        let drained = collect_output(stdout_reader, deadline)
            .zip(collect_output(stderr_reader, deadline));
        let Some((mut output, errors)) = drained else {
            let timeout = self.timeout.unwrap_or_default();
            warn!(
                "Value command output still open after {:?}: `{}`",
                timeout, command
            );
            return Err(timed_out(command, timeout));
        };
        output.push_str(&errors);

        if status.success() {
            Ok(output)
        } else {
            Err(Error::SubProcessExit(status.code().unwrap_or(1)))
        }
    }

    fn execute(&self, command: &str) -> Result<()> {
        info!("Executing with {}: `{}`", self.shell, command);
        execute_command(self.command(command))
    }
}

/// Executes a command with the terminal's standard streams.
///
/// # Errors
///
/// Returns an error if command execution fails or exits with non-zero status.
pub fn execute_command(mut command: Command) -> Result<()> {
    let command = command
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());

    let status = command.spawn()?.wait()?;

    if status.success() {
        Ok(())
    } else {
        Err(Error::SubProcessExit(status.code().unwrap_or(1)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shell(timeout: Option<Duration>) -> SystemShell {
        SystemShell::new("/bin/sh", timeout)
    }

    #[test]
    fn test_run_shell_collects_stdout() {
        let output = shell(None).run_shell("printf 'a\\nb\\n'").unwrap();
        assert_eq!(output, "a\nb\n");
    }

    #[test]
    fn test_run_shell_appends_stderr() {
        let output = shell(None).run_shell("echo out; echo err >&2").unwrap();
        assert_eq!(output, "out\nerr\n");
    }

    #[test]
    fn test_run_shell_non_zero_exit() {
        let result = shell(None).run_shell("exit 3");
        assert!(matches!(result, Err(Error::SubProcessExit(3))));
    }

    #[test]
    fn test_run_shell_missing_shell() {
        let result = SystemShell::new("/this/shell/does/not/exist", None).run_shell("true");
        assert!(matches!(result, Err(Error::SubProcess(_))));
    }

    #[test]
    fn test_run_shell_timeout() {
        let result = shell(Some(Duration::from_millis(200))).run_shell("sleep 5");
        assert!(matches!(result, Err(Error::SubProcessTimeout { .. })));
    }

    #[test]
    fn test_run_shell_timeout_covers_background_output() {
        let started = Instant::now();
        let result =
            shell(Some(Duration::from_millis(500))).run_shell("sleep 5 & printf 'a\\nb\\n'");

        assert!(matches!(result, Err(Error::SubProcessTimeout { .. })));
        assert!(started.elapsed() < Duration::from_secs(3));
    }

    #[test]
    fn test_run_shell_within_timeout_keeps_output() {
        let output = shell(Some(Duration::from_secs(5)))
            .run_shell("echo out; echo err >&2")
            .unwrap();
        assert_eq!(output, "out\nerr\n");
    }

    #[test]
    fn test_execute_reports_exit_code() {
        assert!(shell(None).execute("true").is_ok());
        assert!(matches!(
            shell(None).execute("exit 7"),
            Err(Error::SubProcessExit(7))
        ));
    }
}
