//! Type definitions for the interactive selector and its UI state.

use ac_time_core::completion::Accepted;

/// Outcome of an interactive selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Accepted(Accepted),
    Quit,
}

/// Direction to cycle through suggestions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CycleDirection {
    Up,
    Down,
}

/// State for the UI viewport.
///
/// Tracks the visible portion of the suggestion list when there are more
/// suggestions than can fit on screen.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ViewportState {
    pub offset: usize,
    pub height: u16,
    pub width: u16,
}

/// Complete UI state for a selection prompt.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct UiState {
    /// Index of the highlighted suggestion
    pub selected_index: usize,
    /// Viewport state for scrolling
    pub viewport: ViewportState,
    /// Text typed so far
    pub input: String,
    /// Validation error from the last submission
    pub message: Option<String>,
}

impl UiState {
    #[must_use]
    pub fn new(viewport: ViewportState) -> Self {
        Self {
            selected_index: 0,
            viewport,
            input: String::new(),
            message: None,
        }
    }

    /// A copy with new input text, the highlight back on the first suggestion.
    #[must_use]
    pub fn with_input(&self, input: String) -> Self {
        let mut updated = self.clone();
        updated.input = input;
        updated.selected_index = 0;
        updated.viewport.offset = 0;
        updated.message = None;
        updated
    }
}

/// What a key or mouse event asks the selector to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Nothing,
    Quit,
    State(UiState),
    Submit(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> ViewportState {
        ViewportState {
            offset: 3,
            height: 10,
            width: 80,
        }
    }

    #[test]
    fn test_new_state_is_empty() {
        let state = UiState::new(viewport());
        assert_eq!(state.selected_index, 0);
        assert!(state.input.is_empty());
        assert!(state.message.is_none());
    }

    #[test]
    fn test_with_input_resets_selection_and_message() {
        let mut state = UiState::new(viewport());
        state.selected_index = 4;
        state.message = Some("bad".to_string());

        let updated = state.with_input("dev".to_string());
        assert_eq!(updated.input, "dev");
        assert_eq!(updated.selected_index, 0);
        assert_eq!(updated.viewport.offset, 0);
        assert_eq!(updated.viewport.height, 10);
        assert!(updated.message.is_none());
    }

    #[test]
    fn test_ui_state_equality() {
        let state1 = UiState::new(viewport());
        let state2 = UiState::new(viewport());
        let state3 = state1.with_input("x".to_string());

        assert_eq!(state1, state2);
        assert_ne!(state1, state3);
    }
}
