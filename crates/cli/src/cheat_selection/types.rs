//! Type definitions for cheat selection and picker state.

/// What the user chose in the cheat picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheatChoice {
    /// Position in the cheat index.
    Index(usize),
    Quit,
}

/// Direction to cycle through cheats in the picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleDirection {
    Up,
    Down,
}

/// Visible window of the cheat list.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ViewportState {
    pub offset: usize,
    pub height: u16,
    pub width: u16,
}

/// Complete state of the cheat picker.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct UiState {
    /// Position of the highlighted row among the displayed cheats
    pub selected_index: usize,
    pub viewport: ViewportState,
    /// Whether typed characters go to the filter
    pub is_filtering: bool,
    pub filter_text: String,
}

impl UiState {
    /// Initial state for a picker of `width` by `height` cells, already
    /// filtering when `query` is not empty.
    pub fn new(width: u16, height: u16, query: &str) -> Self {
        Self {
            selected_index: 0,
            viewport: ViewportState {
                offset: 0,
                // Header and filter line
                height: height.saturating_sub(2).max(1),
                width,
            },
            is_filtering: !query.is_empty(),
            filter_text: query.to_string(),
        }
    }
}

/// What a key press asks the picker to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerAction {
    Choose(CheatChoice),
    Update(UiState),
    Move(CycleDirection),
    /// Enter with nothing to select.
    Bell,
    Nothing,
}
