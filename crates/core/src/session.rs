//! The resolution session: walks the variables of one cheat forwards and
//! backwards until every one has a value or the user leaves.

use std::collections::HashMap;
use std::hash::BuildHasher;

use log::{debug, info};

use crate::cheat_definitions::{Cheat, CheatIndex, Scope, VariableDefinition};
use crate::collection::collect_variables;
use crate::error::Result;
use crate::execution::ShellRunner;
use crate::progress::ProgressModel;
use crate::prompt::{Outcome, PromptRequest, Prompter};
use crate::value_source::{determine_source, ValueSource};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableState {
    pub definition: VariableDefinition,
    pub value: String,
    pub resolved: bool,
    /// Initial input text, taken from the environment when the session starts.
    pub prefill: String,
}

impl VariableState {
    pub fn new(definition: VariableDefinition) -> Self {
        Self {
            definition,
            value: String::new(),
            resolved: false,
            prefill: String::new(),
        }
    }

    pub fn resolve(&mut self, value: String) {
        self.value = value;
        self.resolved = true;
    }

    pub fn invalidate(&mut self) {
        self.value.clear();
        self.resolved = false;
    }
}

/// Source of prefill values, looked up by variable name.
pub trait Environment {
    fn prefill(&self, name: &str) -> Option<String>;
}

/// Reads prefill values from the process environment.
pub struct ProcessEnvironment;

impl Environment for ProcessEnvironment {
    fn prefill(&self, name: &str) -> Option<String> {
        std::env::var(name).ok().filter(|value| !value.is_empty())
    }
}

impl<S: BuildHasher> Environment for HashMap<String, String, S> {
    fn prefill(&self, name: &str) -> Option<String> {
        self.get(name).filter(|value| !value.is_empty()).cloned()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// Every variable has a value.
    Completed(Scope),
    /// The user went back past the first variable.
    ReturnToCaller,
    /// The user asked to leave the program.
    GlobalExit,
}

pub struct Session {
    command: String,
    states: Vec<VariableState>,
    /// `-1` means go back to the caller, `states.len()` means done.
    cursor: isize,
}

impl Session {
    pub fn new(command: &str, states: Vec<VariableState>) -> Self {
        Self {
            command: command.to_string(),
            states,
            cursor: 0,
        }
    }

    /// Fill every variable's prefill from `environment`. Done once, before running.
    #[must_use]
    pub fn with_prefill<E: Environment + ?Sized>(mut self, environment: &E) -> Self {
        for state in &mut self.states {
            if let Some(prefill) = environment.prefill(&state.definition.name) {
                state.prefill = prefill;
            }
        }
        self
    }

    pub fn states(&self) -> &[VariableState] {
        &self.states
    }

    pub fn cursor(&self) -> isize {
        self.cursor
    }

    /// Values of every resolved variable, in variable order.
    pub fn scope(&self) -> Scope {
        self.states
            .iter()
            .filter(|state| state.resolved)
            .map(|state| (state.definition.name.clone(), state.value.clone()))
            .collect()
    }

    /// Drive the session until it completes or the user leaves it.
    ///
    /// # Errors
    ///
    /// Returns an error if `prompter` fails. Value command failures are not errors.
    pub fn run<P, R>(&mut self, prompter: &mut P, runner: &R) -> Result<SessionOutcome>
    where
        P: Prompter + ?Sized,
        R: ShellRunner + ?Sized,
    {
        loop {
            let Ok(index) = usize::try_from(self.cursor) else {
                info!("Went back past the first variable of `{}`", self.command);
                return Ok(SessionOutcome::ReturnToCaller);
            };

            if index >= self.states.len() {
                return Ok(SessionOutcome::Completed(self.scope()));
            }

            if self.states[index].resolved {
                self.cursor += 1;
                continue;
            }

            let outcome = self.ask(index, prompter, runner)?;
            if let Some(finished) = self.apply(index, outcome) {
                return Ok(finished);
            }
        }
    }

    fn ask<P, R>(&self, index: usize, prompter: &mut P, runner: &R) -> Result<Outcome>
    where
        P: Prompter + ?Sized,
        R: ShellRunner + ?Sized,
    {
        let scope = self.scope();
        let state = &self.states[index];

        let request = PromptRequest {
            variable_name: state.definition.name.clone(),
            progress: ProgressModel::build(&self.command, &self.states, index),
            custom_header: state.definition.custom_header(),
            prefill: state.prefill.clone(),
        };

        match determine_source(&state.definition, &scope, runner) {
            ValueSource::FreeText => prompter.prompt(&request),
            ValueSource::Candidates(candidates) => prompter.select(&request, &candidates),
        }
    }

    fn apply(&mut self, index: usize, outcome: Outcome) -> Option<SessionOutcome> {
        match outcome {
            Outcome::Value(value) => {
                debug!("{} = `{}`", self.states[index].definition, value);
                self.states[index].resolve(value);
                self.cursor += 1;
            }
            Outcome::GoBack => {
                self.cursor -= 1;
                if let Ok(previous) = usize::try_from(self.cursor) {
                    self.states[previous].invalidate();
                }
            }
            Outcome::GlobalExit => return Some(SessionOutcome::GlobalExit),
        }

        None
    }
}

/// Resolve every variable `cheat` still needs, then merge the values into
/// `cheat.scope` if the session completed.
///
/// # Errors
///
/// Returns an error if `prompter` fails.
pub fn resolve_variables<P, R, E>(
    cheat: &mut Cheat,
    index: &CheatIndex,
    runner: &R,
    prompter: &mut P,
    environment: &E,
) -> Result<SessionOutcome>
where
    P: Prompter + ?Sized,
    R: ShellRunner + ?Sized,
    E: Environment + ?Sized,
{
    let states = collect_variables(cheat, index);
    if states.is_empty() {
        return Ok(SessionOutcome::Completed(Scope::new()));
    }

    let mut session = Session::new(&cheat.command, states).with_prefill(environment);
    let outcome = session.run(prompter, runner)?;

    if let SessionOutcome::Completed(scope) = &outcome {
        cheat
            .scope
            .extend(scope.iter().map(|(k, v)| (k.clone(), v.clone())));
    }

    Ok(outcome)
}
