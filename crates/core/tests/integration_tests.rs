//! Integration tests for cheatwiz-core
//!
//! These tests verify that the core functionality works together correctly
//! by testing complete workflows end-to-end: loading cheats from YAML,
//! resolving variables through a scripted prompter with a real shell, and
//! dispatching the final command.

use std::collections::{HashMap, VecDeque};
use std::io::Write;

use cheatwiz_core::cheat_definitions::CheatIndex;
use cheatwiz_core::config::{OutputMode, Settings};
use cheatwiz_core::error::{Error, Result};
use cheatwiz_core::execution::{ShellRunner, SystemShell};
use cheatwiz_core::file_handling::get_cheat_index;
use cheatwiz_core::interpolation::substitute_scope;
use cheatwiz_core::output::{dispatch, Clipboard, Dispatched};
use cheatwiz_core::prompt::{Outcome, PromptRequest, Prompter};
use cheatwiz_core::session::{resolve_variables, SessionOutcome};
use tempfile::NamedTempFile;

const CHEATS_YAML: &str = r#"
cheats:
  - id: "deploy"
    description: "Deploy a service"
    command: "deploy $service --env $env --region $region"
    imports: ["common"]
    vars:
      - name: service
        command: "printf 'api\nweb\nworker\n'"
        args: "--header 'Which service?'"
  - id: "greet"
    command: "echo hello $name"
modules:
  common:
    imports: ["regions"]
    vars:
      - name: env
        command: "printf 'staging\nproduction\n'"
  regions:
    imports: ["common"]
    vars:
      - name: region
        command: "printf '%s-eu\n%s-us\n' $env $env"
"#;

#[derive(Debug, PartialEq, Eq)]
enum Step {
    Select(String, Vec<String>),
    Prompt(String),
}

struct ScriptedPrompter {
    answers: VecDeque<Outcome>,
    steps: Vec<Step>,
    headers: Vec<Option<String>>,
}

impl ScriptedPrompter {
    fn new(answers: Vec<Outcome>) -> Self {
        Self {
            answers: answers.into(),
            steps: Vec::new(),
            headers: Vec::new(),
        }
    }

    fn answer(&mut self) -> Result<Outcome> {
        self.answers
            .pop_front()
            .ok_or_else(|| Error::Terminal(std::io::Error::other("no more answers")))
    }
}

impl Prompter for ScriptedPrompter {
    fn select(&mut self, request: &PromptRequest, candidates: &[String]) -> Result<Outcome> {
        self.steps.push(Step::Select(
            request.variable_name.clone(),
            candidates.to_vec(),
        ));
        self.headers.push(request.custom_header.clone());
        self.answer()
    }

    fn prompt(&mut self, request: &PromptRequest) -> Result<Outcome> {
        self.steps.push(Step::Prompt(request.variable_name.clone()));
        self.headers.push(request.custom_header.clone());
        self.answer()
    }
}

struct NoClipboard;

impl Clipboard for NoClipboard {
    fn copy(&self, _text: &str) -> Result<bool> {
        Ok(false)
    }
}

fn load_index() -> CheatIndex {
    let mut temp_file = NamedTempFile::new().unwrap();
    write!(temp_file, "{CHEATS_YAML}").unwrap();
    get_cheat_index(temp_file.path().to_str().unwrap()).unwrap()
}

fn value(v: &str) -> Outcome {
    Outcome::Value(v.to_string())
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
}

/// Load, resolve with dynamic lists from a real shell, and print.
#[test]
fn test_complete_resolution_workflow() {
    let index = load_index();
    let mut cheat = index.find_by_id("deploy").unwrap().clone();
    let shell = SystemShell::new("/bin/sh", Some(std::time::Duration::from_secs(10)));
    let mut prompter = ScriptedPrompter::new(vec![value("web"), value("production"), value("production-us")]);
    let environment: HashMap<String, String> = HashMap::new();

    let outcome =
        resolve_variables(&mut cheat, &index, &shell, &mut prompter, &environment).unwrap();

    assert!(matches!(outcome, SessionOutcome::Completed(_)));
    assert_eq!(
        prompter.steps,
        vec![
            Step::Select("service".to_string(), strings(&["api", "web", "worker"])),
            Step::Select("env".to_string(), strings(&["staging", "production"])),
            Step::Select(
                "region".to_string(),
                strings(&["production-eu", "production-us"])
            ),
        ]
    );
    assert_eq!(prompter.headers[0].as_deref(), Some("Which service?"));
    assert_eq!(prompter.headers[1], None);

    let final_command = substitute_scope(&cheat.command, &cheat.scope);
    assert_eq!(
        final_command,
        "deploy web --env production --region production-us"
    );

    let settings = Settings {
        output: OutputMode::Print,
        pre_hook: Some("set -e; ".to_string()),
        ..Settings::default()
    };
    let mut out = Vec::new();
    let dispatched = dispatch(&final_command, &settings, &shell, &NoClipboard, &mut out).unwrap();

    assert_eq!(dispatched, Dispatched::Printed);
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "set -e; deploy web --env production --region production-us"
    );
}

/// Going back re-runs the earlier variable's list and later lists see the new value.
#[test]
fn test_back_navigation_recomputes_dependent_list() {
    let index = load_index();
    let mut cheat = index.find_by_id("deploy").unwrap().clone();
    let shell = SystemShell::new("/bin/sh", None);
    let mut prompter = ScriptedPrompter::new(vec![
        value("api"),
        value("staging"),
        Outcome::GoBack,
        value("production"),
        value("production-eu"),
    ]);
    let environment: HashMap<String, String> = HashMap::new();

    resolve_variables(&mut cheat, &index, &shell, &mut prompter, &environment).unwrap();

    assert_eq!(
        prompter.steps[2],
        Step::Select("region".to_string(), strings(&["staging-eu", "staging-us"]))
    );
    assert_eq!(prompter.steps[3], Step::Select("env".to_string(), strings(&["staging", "production"])));
    assert_eq!(
        prompter.steps[4],
        Step::Select(
            "region".to_string(),
            strings(&["production-eu", "production-us"])
        )
    );
    assert_eq!(cheat.scope["env"], "production");
    assert_eq!(cheat.scope["region"], "production-eu");
}

/// Undefined variables become free text and prefill comes from the environment.
#[test]
fn test_undefined_variable_prompts_for_text() {
    let index = load_index();
    let mut cheat = index.find_by_id("greet").unwrap().clone();
    let shell = SystemShell::new("/bin/sh", None);
    let mut prompter = ScriptedPrompter::new(vec![value("world")]);
    let environment: HashMap<String, String> =
        [("name".to_string(), "from-env".to_string())].into_iter().collect();

    let outcome =
        resolve_variables(&mut cheat, &index, &shell, &mut prompter, &environment).unwrap();

    assert!(matches!(outcome, SessionOutcome::Completed(_)));
    assert_eq!(prompter.steps, vec![Step::Prompt("name".to_string())]);
    assert_eq!(substitute_scope(&cheat.command, &cheat.scope), "echo hello world");
}

/// A broken value command falls back to free text without an error.
#[test]
fn test_failing_value_command_degrades_to_text() {
    struct BrokenShell;

    impl ShellRunner for BrokenShell {
        fn run_shell(&self, _command: &str) -> Result<String> {
            Err(Error::SubProcessExit(127))
        }

        fn execute(&self, _command: &str) -> Result<()> {
            Ok(())
        }
    }

    let index = load_index();
    let mut cheat = index.find_by_id("deploy").unwrap().clone();
    let mut prompter = ScriptedPrompter::new(vec![value("a"), value("b"), value("c")]);
    let environment: HashMap<String, String> = HashMap::new();

    let outcome =
        resolve_variables(&mut cheat, &index, &BrokenShell, &mut prompter, &environment).unwrap();

    assert!(matches!(outcome, SessionOutcome::Completed(_)));
    assert!(prompter
        .steps
        .iter()
        .all(|step| matches!(step, Step::Prompt(_))));
}
