//! Turns a wizard step into styled lines and draws them.
//!
//! Building the lines is kept apart from writing them so the layout can be
//! checked without a terminal.

use std::io::Write;

use cheatwiz_core::progress::{CommandSegment, VariableProgress};
use cheatwiz_core::prompt::PromptRequest;
use crossterm::cursor::{self, MoveTo};
use crossterm::style::{
    Attribute, Color, Print, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use crossterm::terminal::{Clear, ClearType};
use crossterm::queue;

use super::field::TextField;
use super::selector::{scroll_window, SelectorState, LIST_HEIGHT};
use crate::theme::Theme;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SpanStyle {
    pub foreground: Option<Color>,
    pub background: Option<Color>,
    pub bold: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub style: SpanStyle,
}

impl Span {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: SpanStyle::default(),
        }
    }

    fn colored(text: impl Into<String>, color: Color) -> Self {
        Self {
            text: text.into(),
            style: SpanStyle {
                foreground: Some(color),
                ..SpanStyle::default()
            },
        }
    }

    fn bold(mut self) -> Self {
        self.style.bold = true;
        self
    }
}

pub type Line = Vec<Span>;

/// One screenful: `header` from the top, `footer` pinned to the bottom.
/// The terminal cursor goes on the last footer line at `cursor_column`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    pub header: Vec<Line>,
    pub footer: Vec<Line>,
    pub cursor_column: usize,
}

impl Frame {
    #[cfg(test)]
    pub fn plain_lines(&self) -> Vec<String> {
        self.header
            .iter()
            .chain(self.footer.iter())
            .map(|line| line.iter().map(|span| span.text.as_str()).collect())
            .collect()
    }
}

/// The title line of a step: the custom header if the variable has one.
pub struct Title<'a> {
    pub verb: &'a str,
    pub hint: &'a str,
}

const FIELD_PROMPT: &str = "> ";

fn progress_lines(theme: &Theme, request: &PromptRequest) -> Vec<Line> {
    let command: Line = request
        .progress
        .command
        .iter()
        .map(|segment| match segment {
            CommandSegment::Literal(text) => Span::plain(text.clone()),
            CommandSegment::Resolved(value) => Span::colored(value.clone(), theme.value),
            CommandSegment::Active(name) => Span::colored(format!("${name}"), theme.accent).bold(),
        })
        .collect();

    let mut lines = vec![command, Vec::new()];

    lines.extend(request.progress.variables.iter().map(|variable| match variable {
        VariableProgress::Resolved { name, value } => vec![
            Span::colored("  ✓ ", theme.command),
            Span::colored(format!("${name}"), theme.dim),
            Span::colored(" = ", theme.dim),
            Span::colored(value.clone(), theme.value),
        ],
        VariableProgress::Active { name } => vec![
            Span::colored("  ▶ ", theme.accent),
            Span::colored(format!("${name}"), theme.accent).bold(),
        ],
        VariableProgress::Pending { name } => vec![
            Span::colored("  ○ ", theme.dim),
            Span::colored(format!("${name}"), theme.dim),
        ],
    }));

    lines
}

fn divider(theme: &Theme, width: usize) -> Line {
    vec![Span::colored("─".repeat(width), theme.divider)]
}

fn title_line(theme: &Theme, request: &PromptRequest, title: &Title<'_>) -> Line {
    let mut line = match &request.custom_header {
        Some(header) => vec![Span::colored(header.clone(), theme.accent).bold()],
        None => vec![
            Span::colored(format!("{} value for ", title.verb), theme.dim),
            Span::colored(format!("${}", request.variable_name), theme.accent).bold(),
        ],
    };
    line.push(Span::colored(format!("   {}", title.hint), theme.dim));
    line
}

fn field_line(theme: &Theme, field: &TextField, placeholder: &str) -> (Line, usize) {
    let prompt = Span::colored(FIELD_PROMPT, theme.accent);
    let column = FIELD_PROMPT.chars().count() + field.cursor();

    if field.value().is_empty() {
        (vec![prompt, Span::colored(placeholder, theme.dim)], column)
    } else {
        (vec![prompt, Span::plain(field.value())], column)
    }
}

fn header(theme: &Theme, request: &PromptRequest, title: &Title<'_>, width: usize) -> Vec<Line> {
    let mut lines = progress_lines(theme, request);
    lines.push(divider(theme, width));
    lines.push(title_line(theme, request, title));
    lines
}

pub fn selector_frame(
    theme: &Theme,
    request: &PromptRequest,
    state: &SelectorState,
    width: usize,
) -> Frame {
    let title = Title {
        verb: "Select",
        hint: "ESC to go back • Enter to select",
    };

    let (start, end) = scroll_window(state.cursor(), state.filtered_len(), LIST_HEIGHT);
    let mut footer = vec![divider(theme, width)];

    if state.filtered_len() == 0 {
        footer.push(vec![Span::colored("  No matches", theme.dim)]);
    }

    for (i, candidate) in state.filtered().enumerate().take(end).skip(start) {
        if i == state.cursor() {
            footer.push(vec![
                Span::colored("› ", theme.accent),
                Span {
                    text: candidate.to_string(),
                    style: SpanStyle {
                        foreground: Some(theme.selected_foreground),
                        background: Some(theme.selected_background),
                        bold: true,
                    },
                },
            ]);
        } else {
            footer.push(vec![Span::plain("  "), Span::colored(candidate, theme.command)]);
        }
    }

    footer.push(divider(theme, width));
    let (field, cursor_column) = field_line(
        theme,
        state.field(),
        "Type to filter or enter custom value...",
    );
    footer.push(field);

    Frame {
        header: header(theme, request, &title, width),
        footer,
        cursor_column,
    }
}

pub fn text_entry_frame(
    theme: &Theme,
    request: &PromptRequest,
    field: &TextField,
    width: usize,
) -> Frame {
    let title = Title {
        verb: "Enter",
        hint: "ESC to go back • Enter to confirm",
    };

    let (field, cursor_column) = field_line(theme, field, "Enter value...");

    Frame {
        header: header(theme, request, &title, width),
        footer: vec![divider(theme, width), field],
        cursor_column,
    }
}

fn print_line<W: Write>(out: &mut W, row: u16, line: &Line, width: usize) -> std::io::Result<()> {
    queue!(out, MoveTo(0, row), Clear(ClearType::CurrentLine))?;

    let mut remaining = width;
    for span in line {
        if remaining == 0 {
            break;
        }
        let text: String = span.text.chars().take(remaining).collect();
        remaining -= text.chars().count();

        if let Some(color) = span.style.foreground {
            queue!(out, SetForegroundColor(color))?;
        }
        if let Some(color) = span.style.background {
            queue!(out, SetBackgroundColor(color))?;
        }
        if span.style.bold {
            queue!(out, SetAttribute(Attribute::Bold))?;
        }
        queue!(out, Print(text), SetAttribute(Attribute::Reset))?;
    }

    Ok(())
}

/// Draw `frame` on a terminal of `width` by `height` cells. When the screen
/// is too short the header loses its top lines first.
pub fn draw<W: Write>(out: &mut W, frame: &Frame, width: u16, height: u16) -> std::io::Result<()> {
    let width = usize::from(width);
    let height = usize::from(height);
    queue!(out, cursor::Hide, Clear(ClearType::All))?;

    let footer_start = height.saturating_sub(frame.footer.len());
    let header_room = footer_start.saturating_sub(1);
    let skipped = frame.header.len().saturating_sub(header_room);

    for (row, line) in frame.header.iter().skip(skipped).enumerate() {
        print_line(out, row as u16, line, width)?;
    }

    for (offset, line) in frame.footer.iter().enumerate() {
        print_line(out, (footer_start + offset) as u16, line, width)?;
    }

    let cursor_row = height.saturating_sub(1) as u16;
    let cursor_column = frame.cursor_column.min(width.saturating_sub(1)) as u16;
    queue!(out, MoveTo(cursor_column, cursor_row), cursor::Show)?;

    out.flush()
}
