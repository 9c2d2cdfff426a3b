//! Colours used by the picker and the wizard screens.
//!
//! Every colour can be overridden from the `theme` section of the settings
//! file with an RGB triple, an ANSI value or a colour name.

use cheatwiz_core::cheat_definitions::ColorDefinition;
use cheatwiz_core::config::ThemeDefinition;
use cheatwiz_core::error::{Error, Result};
use crossterm::style::Color;

/// Trait for converting color definitions to terminal colors
pub trait AsTermColor {
    fn as_crossterm_color(&self) -> Result<Option<Color>>;
}

fn named_color(name: &str) -> Option<Color> {
    let color = match name.to_lowercase().as_str() {
        "black" => Color::Black,
        "darkgrey" | "darkgray" => Color::DarkGrey,
        "red" => Color::Red,
        "darkred" => Color::DarkRed,
        "green" => Color::Green,
        "darkgreen" => Color::DarkGreen,
        "yellow" => Color::Yellow,
        "darkyellow" => Color::DarkYellow,
        "blue" => Color::Blue,
        "darkblue" => Color::DarkBlue,
        "magenta" => Color::Magenta,
        "darkmagenta" => Color::DarkMagenta,
        "cyan" => Color::Cyan,
        "darkcyan" => Color::DarkCyan,
        "white" => Color::White,
        "grey" | "gray" => Color::Grey,
        _ => return None,
    };
    Some(color)
}

impl AsTermColor for ColorDefinition {
    fn as_crossterm_color(&self) -> Result<Option<Color>> {
        match (self.rgb, self.ansi, &self.name) {
            (None, None, None) => Ok(None),
            (Some((r, g, b)), None, None) => Ok(Some(Color::Rgb { r, g, b })),
            (None, Some(ansi), None) => Ok(Some(Color::AnsiValue(ansi))),
            (None, None, Some(name)) => named_color(name)
                .map(Some)
                .ok_or_else(|| Error::UnknownColorName(name.clone())),
            _ => Err(Error::MultipleColorTypes),
        }
    }
}

fn color_or(definition: Option<&ColorDefinition>, fallback: Color) -> Result<Color> {
    match definition {
        None => Ok(fallback),
        Some(definition) => Ok(definition.as_crossterm_color()?.unwrap_or(fallback)),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theme {
    /// Active variable, headers and the highlighted candidate marker
    pub accent: Color,
    /// Resolved values
    pub value: Color,
    /// Candidate lines and check marks
    pub command: Color,
    /// Hints, pending variables and placeholders
    pub dim: Color,
    pub divider: Color,
    pub selected_background: Color,
    pub selected_foreground: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            accent: Color::Cyan,
            value: Color::Green,
            command: Color::Reset,
            dim: Color::DarkGrey,
            divider: Color::DarkGrey,
            selected_background: Color::DarkBlue,
            selected_foreground: Color::Yellow,
        }
    }
}

impl Theme {
    /// Build a theme from the settings, keeping the default for anything unset.
    ///
    /// # Errors
    ///
    /// Returns an error if a colour names more than one of `rgb`, `ansi` and
    /// `name`, or uses an unknown colour name.
    pub fn from_definition(definition: &ThemeDefinition) -> Result<Self> {
        let defaults = Self::default();

        Ok(Self {
            accent: color_or(definition.accent.as_ref(), defaults.accent)?,
            value: color_or(definition.value.as_ref(), defaults.value)?,
            command: color_or(definition.command.as_ref(), defaults.command)?,
            dim: color_or(definition.dim.as_ref(), defaults.dim)?,
            divider: color_or(definition.divider.as_ref(), defaults.divider)?,
            selected_background: color_or(
                definition.selected_background.as_ref(),
                defaults.selected_background,
            )?,
            selected_foreground: color_or(
                definition.selected_foreground.as_ref(),
                defaults.selected_foreground,
            )?,
        })
    }
}
