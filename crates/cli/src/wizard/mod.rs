//! Interactive steps of the variable wizard.
//!
//! Each step is a pure state machine ([`SelectorState`], [`TextEntryState`])
//! fed with key events by [`TerminalPrompter`], which owns the terminal for
//! the duration of one step.

pub mod field;
pub mod render;
pub mod selector;
pub mod text_entry;

use std::io::Write;

use cheatwiz_core::error::{Error, Result};
use cheatwiz_core::prompt::{Outcome, PromptRequest, Prompter};
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use crossterm::terminal;
use log::debug;

use crate::terminal::ScreenGuard;
use crate::theme::Theme;
use render::Frame;
pub use selector::SelectorState;
pub use text_entry::TextEntryState;

/// What a key press did to a step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyResult {
    Continue,
    Done(Outcome),
}

trait Step {
    fn handle_key(&mut self, key: KeyEvent) -> KeyResult;
    fn frame(&self, theme: &Theme, request: &PromptRequest, width: usize) -> Frame;
}

impl Step for SelectorState {
    fn handle_key(&mut self, key: KeyEvent) -> KeyResult {
        SelectorState::handle_key(self, key)
    }

    fn frame(&self, theme: &Theme, request: &PromptRequest, width: usize) -> Frame {
        render::selector_frame(theme, request, self, width)
    }
}

impl Step for TextEntryState {
    fn handle_key(&mut self, key: KeyEvent) -> KeyResult {
        TextEntryState::handle_key(self, key)
    }

    fn frame(&self, theme: &Theme, request: &PromptRequest, width: usize) -> Frame {
        render::text_entry_frame(theme, request, self.field(), width)
    }
}

fn redraw<W: Write, S: Step>(
    out: &mut W,
    theme: &Theme,
    request: &PromptRequest,
    step: &S,
) -> std::io::Result<()> {
    let (width, height) = terminal::size()?;
    let frame = step.frame(theme, request, usize::from(width));
    render::draw(out, &frame, width, height)
}

fn run_step<S: Step>(theme: &Theme, request: &PromptRequest, step: &mut S) -> std::io::Result<Outcome> {
    let guard = ScreenGuard::enter(false)?;
    let mut out = guard.writer();

    redraw(&mut out, theme, request, step)?;

    loop {
        match event::read()? {
            Event::Key(key) if key.kind != KeyEventKind::Release => {
                if let KeyResult::Done(outcome) = step.handle_key(key) {
                    return Ok(outcome);
                }
                redraw(&mut out, theme, request, step)?;
            }
            Event::Resize(_, _) | Event::FocusGained => redraw(&mut out, theme, request, step)?,
            _ => {}
        }
    }
}

/// Drives the wizard steps on the real terminal.
pub struct TerminalPrompter {
    theme: Theme,
}

impl TerminalPrompter {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }
}

impl Prompter for TerminalPrompter {
    fn select(&mut self, request: &PromptRequest, candidates: &[String]) -> Result<Outcome> {
        debug!(
            "Selecting ${} from {} candidates",
            request.variable_name,
            candidates.len()
        );
        let mut step = SelectorState::new(candidates.to_vec(), &request.prefill);
        run_step(&self.theme, request, &mut step).map_err(Error::Terminal)
    }

    fn prompt(&mut self, request: &PromptRequest) -> Result<Outcome> {
        debug!("Prompting for ${}", request.variable_name);
        let mut step = TextEntryState::new(&request.prefill);
        run_step(&self.theme, request, &mut step).map_err(Error::Terminal)
    }
}
