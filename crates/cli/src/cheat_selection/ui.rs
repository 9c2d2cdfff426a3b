use std::fmt::Display;
use std::io::Write;

use cheatwiz_core::cheat_definitions::Cheat;
use cheatwiz_core::error::{Error, Result};
use crossterm::cursor::MoveTo;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use crossterm::style::Color::{Black, Reset};
use crossterm::style::{
    Attribute, Color, Print, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use crossterm::terminal::{Clear, ClearType};
use crossterm::{cursor, queue, terminal};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use itertools::Itertools;

use super::types::CycleDirection::{Down, Up};
use super::types::{CheatChoice, CycleDirection, PickerAction, UiState};
use crate::terminal::ScreenGuard;
use crate::theme::Theme;

fn redraw_ui<W: Write>(
    out: &mut W,
    theme: &Theme,
    ui_state: &UiState,
    cheats: &[Cheat],
    indexes_to_display: &[usize],
) -> std::io::Result<()> {
    queue!(out, cursor::Hide, Clear(ClearType::All), MoveTo(0, 0))?;

    print_header(out, theme, ui_state, indexes_to_display.len())?;

    if indexes_to_display.is_empty() {
        queue!(
            out,
            MoveTo(0, 1),
            SetForegroundColor(Color::Red),
            Print("No matching cheats!"),
            SetAttribute(Attribute::Reset),
            SetForegroundColor(Reset),
        )?;
    } else {
        print_cheats_with_selection(out, theme, ui_state, cheats, indexes_to_display)?;
    }

    if ui_state.is_filtering {
        let row = ui_state.viewport.height + 1;
        queue!(
            out,
            MoveTo(0, row),
            SetAttribute(Attribute::Bold),
            Print(format!("Filter: {}", ui_state.filter_text)),
            SetAttribute(Attribute::Reset),
            cursor::Show,
        )?;
    }

    out.flush()
}

/// Prompts the user to choose a cheat from the list, starting with
/// `initial_query` as the filter.
///
/// # Errors
///
/// Returns [`Error::Terminal`] if the terminal cannot be driven.
pub fn prompt_for_cheat_choice(
    cheats: &[Cheat],
    theme: &Theme,
    initial_query: &str,
) -> Result<CheatChoice> {
    run_picker(cheats, theme, initial_query).map_err(Error::Terminal)
}

fn run_picker(cheats: &[Cheat], theme: &Theme, initial_query: &str) -> std::io::Result<CheatChoice> {
    let guard = ScreenGuard::enter(true)?;
    let mut out = guard.writer();

    let (width, height) = terminal::size()?;
    let mut ui_state = UiState::new(width, height, initial_query);
    let mut indexes_to_display = filter_displayed_indexes(cheats, &ui_state.filter_text);
    let mut down_row: Option<u16> = None;

    redraw_ui(&mut out, theme, &ui_state, cheats, &indexes_to_display)?;

    loop {
        let new_ui_state = match event::read()? {
            Event::Key(key_event) if key_event.kind != KeyEventKind::Release => {
                match handle_key_event(key_event, &ui_state, &indexes_to_display) {
                    PickerAction::Choose(choice) => return Ok(choice),
                    PickerAction::Update(state) => Some(state),
                    PickerAction::Move(direction) => Some(move_selected_index(
                        &ui_state,
                        indexes_to_display.len(),
                        direction,
                    )),
                    PickerAction::Bell => {
                        queue!(out, Print("\x07"))?;
                        out.flush()?;
                        None
                    }
                    PickerAction::Nothing => None,
                }
            }
            Event::Mouse(MouseEvent {
                kind,
                row,
                modifiers,
                ..
            }) if modifiers == KeyModifiers::NONE => match kind {
                MouseEventKind::Down(MouseButton::Left) => {
                    down_row = Some(row);
                    None
                }
                MouseEventKind::Up(MouseButton::Left) => {
                    if let Some(index) = down_row
                        .take()
                        .filter(|&pressed| pressed == row)
                        .and_then(|pressed| clicked_index(&ui_state, &indexes_to_display, pressed))
                    {
                        return Ok(CheatChoice::Index(index));
                    }
                    None
                }
                MouseEventKind::ScrollDown => Some(move_selected_index(
                    &ui_state,
                    indexes_to_display.len(),
                    Down,
                )),
                MouseEventKind::ScrollUp => Some(move_selected_index(
                    &ui_state,
                    indexes_to_display.len(),
                    Up,
                )),
                _ => None,
            },
            Event::Resize(width, height) => Some(handle_resize(width, height, &ui_state)),
            _ => None,
        };

        if let Some(state) = new_ui_state.filter(|state| *state != ui_state) {
            if state.filter_text != ui_state.filter_text {
                indexes_to_display = filter_displayed_indexes(cheats, &state.filter_text);
            }
            ui_state = clamp_selection(state, indexes_to_display.len());
            redraw_ui(&mut out, theme, &ui_state, cheats, &indexes_to_display)?;
        }
    }
}

/// The cheat under screen `row`, if any. Row 0 is the header.
fn clicked_index(ui_state: &UiState, indexes_to_display: &[usize], row: u16) -> Option<usize> {
    let position = usize::from(row.checked_sub(1)?) + ui_state.viewport.offset;
    if usize::from(row) > usize::from(ui_state.viewport.height) {
        return None;
    }
    indexes_to_display.get(position).copied()
}

/// Handle keyboard events in the cheat picker
fn handle_key_event(
    key_event: KeyEvent,
    ui_state: &UiState,
    indexes_to_display: &[usize],
) -> PickerAction {
    let control = key_event.modifiers.contains(KeyModifiers::CONTROL);

    match key_event.code {
        KeyCode::Up => PickerAction::Move(Up),
        KeyCode::Down => PickerAction::Move(Down),
        KeyCode::Char('p') if control => PickerAction::Move(Up),
        KeyCode::Char('n') if control => PickerAction::Move(Down),
        KeyCode::Enter => indexes_to_display
            .get(ui_state.selected_index)
            .map_or(PickerAction::Bell, |&i| {
                PickerAction::Choose(CheatChoice::Index(i))
            }),
        KeyCode::Char('c') if control => PickerAction::Choose(CheatChoice::Quit),
        KeyCode::Backspace if !ui_state.filter_text.is_empty() => {
            let mut updated_state = ui_state.clone();
            updated_state.filter_text.pop();
            PickerAction::Update(updated_state)
        }
        KeyCode::Char(c) if ui_state.is_filtering && !control => {
            let mut updated_state = ui_state.clone();
            updated_state.filter_text.push(c);
            PickerAction::Update(updated_state)
        }
        KeyCode::Esc if ui_state.is_filtering => {
            let mut updated_state = ui_state.clone();
            updated_state.is_filtering = false;
            updated_state.filter_text.clear();
            PickerAction::Update(updated_state)
        }
        KeyCode::Char('/') => {
            let mut updated_state = ui_state.clone();
            updated_state.is_filtering = true;
            PickerAction::Update(updated_state)
        }
        KeyCode::Char('j') => PickerAction::Move(Down),
        KeyCode::Char('k') => PickerAction::Move(Up),
        KeyCode::Char('q') | KeyCode::Esc => PickerAction::Choose(CheatChoice::Quit),
        _ => PickerAction::Nothing,
    }
}

/// Handle window resize events, keeping the selection visible
fn handle_resize(width: u16, height: u16, ui_state: &UiState) -> UiState {
    let mut ui_state = ui_state.clone();
    ui_state.viewport.width = width;
    ui_state.viewport.height = height.saturating_sub(2).max(1);

    let visible = usize::from(ui_state.viewport.height);
    if ui_state.selected_index >= ui_state.viewport.offset + visible {
        ui_state.viewport.offset = ui_state.selected_index + 1 - visible;
    }
    ui_state
}

/// Keep the selection inside a freshly filtered list.
fn clamp_selection(mut ui_state: UiState, displayed: usize) -> UiState {
    if ui_state.selected_index >= displayed {
        ui_state.selected_index = 0;
        ui_state.viewport.offset = 0;
    }
    ui_state
}

/// Print the header bar of the picker
fn print_header<W: Write>(
    out: &mut W,
    theme: &Theme,
    ui_state: &UiState,
    cheat_display_count: usize,
) -> std::io::Result<()> {
    let width = usize::from(ui_state.viewport.width);
    let left_padding = "  ";

    let instructions = if ui_state.is_filtering {
        "<esc>: Stop Filtering   |   <enter>: Choose".to_string()
    } else {
        format!(
            "/: Begin Filtering   |   {}/{}   |   q: Quit",
            pad_to_width_of(
                ui_state.selected_index.saturating_add(1).min(cheat_display_count),
                cheat_display_count
            ),
            cheat_display_count
        )
    };

    let content: String = format!("{left_padding}{instructions}")
        .chars()
        .take(width)
        .collect();
    let right_padding = " ".repeat(width.saturating_sub(content.chars().count()));

    queue!(
        out,
        MoveTo(0, 0),
        SetBackgroundColor(theme.accent),
        SetForegroundColor(Black),
        Print(content),
        Print(right_padding),
        SetBackgroundColor(Reset),
        SetForegroundColor(Reset),
    )?;

    Ok(())
}

/// Pad a value to match the width of the largest value
fn pad_to_width_of<T: Display>(value: T, max_number: usize) -> String {
    let width = max_number.to_string().len();
    format!("{:>width$}", value.to_string())
}

/// The text of one picker row: position, name and, for named cheats, the
/// command template.
fn row_text(cheat: &Cheat, index: usize, cheat_count: usize) -> (String, Option<String>) {
    let label = format!("[{}] {}", pad_to_width_of(index + 1, cheat_count), cheat);
    let command = (cheat.id.is_some() || cheat.description.is_some()).then(|| cheat.command.clone());
    (label, command)
}

fn write_cheat_row<W: Write>(
    out: &mut W,
    theme: &Theme,
    row: u16,
    (label, command): (String, Option<String>),
    is_selected: bool,
    width: usize,
) -> std::io::Result<()> {
    queue!(out, MoveTo(0, row), Clear(ClearType::CurrentLine))?;

    let label: String = label.chars().take(width).collect();
    let mut used = label.chars().count();

    if is_selected {
        queue!(
            out,
            SetAttribute(Attribute::Bold),
            SetBackgroundColor(theme.selected_background),
            SetForegroundColor(theme.selected_foreground),
        )?;
    } else {
        queue!(out, SetForegroundColor(theme.command))?;
    }
    queue!(out, Print(label))?;

    if let Some(command) = command {
        let command: String = format!("   {command}")
            .chars()
            .take(width.saturating_sub(used))
            .collect();
        used += command.chars().count();
        if !is_selected {
            queue!(out, SetForegroundColor(theme.dim))?;
        }
        queue!(out, Print(command))?;
    }

    if is_selected {
        queue!(out, Print(" ".repeat(width.saturating_sub(used))))?;
    }

    queue!(
        out,
        SetAttribute(Attribute::Reset),
        SetBackgroundColor(Reset),
        SetForegroundColor(Reset),
    )?;

    Ok(())
}

/// Print the visible cheats with the selected one highlighted
fn print_cheats_with_selection<W: Write>(
    out: &mut W,
    theme: &Theme,
    ui_state: &UiState,
    cheats: &[Cheat],
    indexes_to_display: &[usize],
) -> std::io::Result<()> {
    let viewport = &ui_state.viewport;

    let visible_cheats = indexes_to_display
        .iter()
        .enumerate()
        .skip(viewport.offset)
        .take(usize::from(viewport.height));

    for (row, (position, &index)) in (1u16..).zip(visible_cheats) {
        write_cheat_row(
            out,
            theme,
            row,
            row_text(&cheats[index], index, cheats.len()),
            position == ui_state.selected_index,
            usize::from(viewport.width),
        )?;
    }

    Ok(())
}

/// Move the selected index in the given direction, wrapping at both ends
fn move_selected_index(
    ui_state: &UiState,
    cheats_to_display_length: usize,
    direction: CycleDirection,
) -> UiState {
    if cheats_to_display_length == 0 {
        return ui_state.clone();
    }

    let mut ui_state = ui_state.clone();
    let height = usize::from(ui_state.viewport.height).max(1);
    let current = ui_state.selected_index;

    let new_index = match direction {
        Up if current == 0 => {
            let last = cheats_to_display_length - 1;
            ui_state.viewport.offset = last.saturating_sub(height - 1);
            last
        }
        Up => {
            let new_index = current - 1;
            if new_index < ui_state.viewport.offset {
                ui_state.viewport.offset = new_index;
            }
            new_index
        }
        Down => {
            let new_index = (current + 1) % cheats_to_display_length;
            if new_index < current {
                ui_state.viewport.offset = 0;
            } else if new_index >= ui_state.viewport.offset + height {
                ui_state.viewport.offset = new_index + 1 - height;
            }
            new_index
        }
    };

    ui_state.selected_index = new_index;
    ui_state
}

/// Indexes of the cheats matching `predicate`, in index order. A numeric
/// predicate matches on the displayed position instead of the text.
fn filter_displayed_indexes(cheats: &[Cheat], predicate: &str) -> Vec<usize> {
    if predicate.is_empty() {
        return (0..cheats.len()).collect();
    }

    let matcher = SkimMatcherV2::default();
    let numeric = predicate.chars().all(|c| c.is_ascii_digit());

    cheats
        .iter()
        .enumerate()
        .filter(|(i, cheat)| {
            if numeric {
                (i + 1).to_string().contains(predicate)
            } else {
                let haystack = [cheat.to_string(), cheat.command.clone()]
                    .into_iter()
                    .unique()
                    .join(" ");
                matcher.fuzzy_match(&haystack, predicate).is_some()
            }
        })
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cheat(id: Option<&str>, description: Option<&str>, command: &str) -> Cheat {
        let mut cheat = Cheat::new(command);
        cheat.id = id.map(str::to_string);
        cheat.description = description.map(str::to_string);
        cheat
    }

    fn sample_cheats() -> Vec<Cheat> {
        vec![
            cheat(Some("deploy"), Some("Deploy a service"), "deploy $service"),
            cheat(Some("logs"), None, "kubectl logs -f $pod"),
            cheat(None, None, "ssh $host"),
        ]
    }

    fn state(height: u16) -> UiState {
        UiState::new(80, height + 2, "")
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_filter_empty_keeps_all() {
        assert_eq!(filter_displayed_indexes(&sample_cheats(), ""), vec![0, 1, 2]);
    }

    #[test]
    fn test_filter_fuzzy_matches_name_and_command() {
        let cheats = sample_cheats();
        assert_eq!(filter_displayed_indexes(&cheats, "dply"), vec![0]);
        assert_eq!(filter_displayed_indexes(&cheats, "kubectl"), vec![1]);
        assert_eq!(filter_displayed_indexes(&cheats, "ssh"), vec![2]);
    }

    #[test]
    fn test_filter_numeric_matches_position() {
        assert_eq!(filter_displayed_indexes(&sample_cheats(), "2"), vec![1]);
    }

    #[test]
    fn test_move_selected_index_wraps() {
        let ui_state = state(10);

        let up = move_selected_index(&ui_state, 3, Up);
        assert_eq!(up.selected_index, 2);

        let down = move_selected_index(&up, 3, Down);
        assert_eq!(down.selected_index, 0);
        assert_eq!(down.viewport.offset, 0);
    }

    #[test]
    fn test_move_selected_index_scrolls_viewport() {
        let mut ui_state = state(2);
        ui_state = move_selected_index(&ui_state, 5, Down);
        ui_state = move_selected_index(&ui_state, 5, Down);
        assert_eq!(ui_state.selected_index, 2);
        assert_eq!(ui_state.viewport.offset, 1);

        let wrapped = move_selected_index(&state(2), 5, Up);
        assert_eq!(wrapped.selected_index, 4);
        assert_eq!(wrapped.viewport.offset, 3);
    }

    #[test]
    fn test_move_selected_index_empty_list() {
        let ui_state = state(10);
        assert_eq!(move_selected_index(&ui_state, 0, Down), ui_state);
    }

    #[test]
    fn test_handle_key_enter_chooses_displayed_cheat() {
        let mut ui_state = state(10);
        ui_state.selected_index = 1;
        assert_eq!(
            handle_key_event(key(KeyCode::Enter), &ui_state, &[0, 2]),
            PickerAction::Choose(CheatChoice::Index(2))
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Enter), &ui_state, &[]),
            PickerAction::Bell
        );
    }

    #[test]
    fn test_handle_key_filtering() {
        let ui_state = state(10);

        let PickerAction::Update(filtering) = handle_key_event(key(KeyCode::Char('/')), &ui_state, &[0])
        else {
            panic!("expected filtering to start");
        };
        assert!(filtering.is_filtering);

        let PickerAction::Update(typed) = handle_key_event(key(KeyCode::Char('q')), &filtering, &[0])
        else {
            panic!("expected the filter to grow");
        };
        assert_eq!(typed.filter_text, "q");

        let PickerAction::Update(stopped) = handle_key_event(key(KeyCode::Esc), &typed, &[0]) else {
            panic!("expected filtering to stop");
        };
        assert!(!stopped.is_filtering);
        assert!(stopped.filter_text.is_empty());
    }

    #[test]
    fn test_handle_key_quit() {
        let ui_state = state(10);
        assert_eq!(
            handle_key_event(key(KeyCode::Char('q')), &ui_state, &[0]),
            PickerAction::Choose(CheatChoice::Quit)
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Esc), &ui_state, &[0]),
            PickerAction::Choose(CheatChoice::Quit)
        );
        assert_eq!(
            handle_key_event(
                KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
                &ui_state,
                &[0]
            ),
            PickerAction::Choose(CheatChoice::Quit)
        );
    }

    #[test]
    fn test_clicked_index() {
        let mut ui_state = state(2);
        ui_state.viewport.offset = 1;
        assert_eq!(clicked_index(&ui_state, &[4, 5, 6], 0), None);
        assert_eq!(clicked_index(&ui_state, &[4, 5, 6], 1), Some(5));
        assert_eq!(clicked_index(&ui_state, &[4, 5, 6], 2), Some(6));
        assert_eq!(clicked_index(&ui_state, &[4, 5, 6], 3), None);
    }

    #[test]
    fn test_clamp_selection_after_filter() {
        let mut ui_state = state(10);
        ui_state.selected_index = 5;
        ui_state.viewport.offset = 2;
        let clamped = clamp_selection(ui_state, 3);
        assert_eq!(clamped.selected_index, 0);
        assert_eq!(clamped.viewport.offset, 0);
    }

    #[test]
    fn test_handle_resize_keeps_selection_visible() {
        let mut ui_state = state(20);
        ui_state.selected_index = 15;
        let resized = handle_resize(80, 12, &ui_state);
        assert_eq!(resized.viewport.height, 10);
        assert_eq!(resized.viewport.offset, 6);
    }

    #[test]
    fn test_row_text() {
        let cheats = sample_cheats();
        assert_eq!(
            row_text(&cheats[0], 0, 12),
            (
                "[ 1] deploy (Deploy a service)".to_string(),
                Some("deploy $service".to_string())
            )
        );
        assert_eq!(row_text(&cheats[2], 2, 3), ("[3] ssh $host".to_string(), None));
    }

    #[test]
    fn test_pad_to_width_of() {
        assert_eq!(pad_to_width_of(5, 100), "  5");
        assert_eq!(pad_to_width_of(42, 9), "42");
    }
}
