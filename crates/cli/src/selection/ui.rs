use std::fmt::Display;
use std::io::{stdout, Write};
use std::time::Duration;

use crossterm::cursor::MoveTo;
use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::style::Color::{DarkGreen, DarkBlue, Reset, Yellow};
use crossterm::style::{
    Attribute, Color, Print, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{event, queue, terminal, ExecutableCommand};

use super::types::CycleDirection::{Down, Up};
use super::types::{CycleDirection, Outcome, Selection, UiState, ViewportState};
use ac_time_core::completion::{Accepted, Completer};
use ac_time_core::error::Result;

/// Rows used by the header, the message line and the input line
const RESERVED_ROWS: u16 = 3;

struct RawModeGuard;

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        // Disable raw mode on drop
        let _ = disable_raw_mode();
        let mut stdout = stdout();
        let _ = stdout.execute(DisableMouseCapture);
        let _ = stdout.execute(LeaveAlternateScreen);
    }
}

/// Result of validating submitted text.
#[derive(Debug, PartialEq, Eq)]
pub enum Validation {
    Accepted(Accepted),
    Retry(UiState),
}

fn context_rows(context: &[String]) -> u16 {
    u16::try_from(context.len()).unwrap_or(u16::MAX)
}

/// Rows left for suggestions once the header, context and input lines are placed.
fn viewport_height(terminal_height: u16, context: &[String]) -> u16 {
    terminal_height
        .saturating_sub(RESERVED_ROWS.saturating_add(context_rows(context)))
        .max(1)
}

/// Prompts the user to pick or type a value, with live fuzzy suggestions.
///
/// `context` lines (such as a calendar) are shown between the header and
/// the suggestions. Text that fails validation keeps the prompt open with
/// the error shown; only an accepted value or a quit key ends it.
///
/// # Errors
///
/// Returns an error on terminal I/O failure, or if validation fails in a way
/// the user cannot fix by retyping.
pub fn prompt_for_selection(
    label: &str,
    completer: &Completer,
    context: &[String],
) -> Result<Selection> {
    let mut stdout = stdout();

    // When this goes out of scope, raw mode, mouse capture and the alternate screen are undone
    let _raw_mode_guard = RawModeGuard;
    stdout.execute(EnterAlternateScreen)?;
    enable_raw_mode()?;
    stdout.execute(EnableMouseCapture)?;

    let (width, height) = terminal::size()?;

    let mut ui_state = UiState::new(ViewportState {
        offset: 0,
        height: viewport_height(height, context),
        width,
    });

    let mut suggestions: Vec<String> = completer.complete(&ui_state.input).collect();
    let mut new_ui_state = Some(ui_state.clone());
    let mut force_initial_draw = true;

    loop {
        if let Some(current_ui_state) = new_ui_state.take() {
            if force_initial_draw || current_ui_state != ui_state {
                suggestions = completer.complete(&current_ui_state.input).collect();
                redraw_ui(label, &current_ui_state, &suggestions, context)?;
                ui_state = current_ui_state;
            }
            force_initial_draw = false;
        }

        if !event::poll(Duration::from_millis(500))? {
            continue;
        }

        let outcome = match event::read()? {
            Event::Key(key_event) => handle_key_event(key_event, &ui_state, &suggestions),
            Event::Mouse(mouse_event) => {
                handle_mouse_event(mouse_event, &ui_state, &suggestions, context)
            }
            Event::Resize(width, height) => Outcome::State(handle_resize(
                width,
                height,
                &ui_state,
                suggestions.len(),
                context,
            )),
            _ => Outcome::Nothing,
        };

        match outcome {
            Outcome::Nothing => {}
            Outcome::Quit => return Ok(Selection::Quit),
            Outcome::State(state) => new_ui_state = Some(state),
            Outcome::Submit(text) => match validate_submission(completer, &ui_state, &text)? {
                Validation::Accepted(accepted) => return Ok(Selection::Accepted(accepted)),
                Validation::Retry(state) => new_ui_state = Some(state),
            },
        }
    }
}

/// Validates submitted text, turning recoverable errors into a message on screen.
///
/// # Errors
///
/// Passes through errors that are not recoverable by retyping.
pub fn validate_submission(
    completer: &Completer,
    ui_state: &UiState,
    text: &str,
) -> Result<Validation> {
    match completer.accept(text) {
        Ok(accepted) => Ok(Validation::Accepted(accepted)),
        Err(e) if e.is_recoverable() => {
            let mut retry_state = ui_state.with_input(text.to_string());
            retry_state.message = Some(e.to_string());
            Ok(Validation::Retry(retry_state))
        }
        Err(e) => Err(e),
    }
}

fn redraw_ui(
    label: &str,
    ui_state: &UiState,
    suggestions: &[String],
    context: &[String],
) -> Result<()> {
    let mut stdout = stdout();
    let width = ui_state.viewport.width;

    queue!(stdout, Clear(ClearType::All), MoveTo(0, 0))?;

    print_header(label, ui_state, suggestions.len())?;

    for (i, line) in context.iter().enumerate() {
        let row = u16::try_from(i + 1).unwrap_or(u16::MAX);
        queue!(stdout, MoveTo(0, row), Print(truncate_to_width(line, width)))?;
    }

    let first_row = 1 + context_rows(context);

    if suggestions.is_empty() {
        queue!(
            stdout,
            MoveTo(0, first_row),
            SetForegroundColor(Color::Red),
            Print("No matching suggestions!".to_string()),
            SetAttribute(Attribute::Reset),
        )?;
    } else {
        print_suggestions_with_selection(ui_state, suggestions, first_row)?;
    }

    let message_row = first_row.saturating_add(ui_state.viewport.height);
    if let Some(message) = &ui_state.message {
        queue!(
            stdout,
            MoveTo(0, message_row),
            SetForegroundColor(Color::Red),
            SetAttribute(Attribute::Bold),
            Print(truncate_to_width(message, width)),
            SetAttribute(Attribute::Reset),
            SetForegroundColor(Reset),
        )?;
    }

    queue!(
        stdout,
        MoveTo(0, message_row.saturating_add(1)),
        SetAttribute(Attribute::Bold),
        Print(format!("({label})> ")),
        SetAttribute(Attribute::Reset),
        Print(&ui_state.input),
    )?;

    stdout.flush()?;
    Ok(())
}

/// Handle keyboard events in the selection UI
fn handle_key_event(key_event: KeyEvent, ui_state: &UiState, suggestions: &[String]) -> Outcome {
    if key_event.kind != KeyEventKind::Press {
        return Outcome::Nothing;
    }

    match key_event.code {
        KeyCode::Up => Outcome::State(move_selected_index(ui_state, suggestions.len(), Up)),
        KeyCode::Down => Outcome::State(move_selected_index(ui_state, suggestions.len(), Down)),
        KeyCode::Tab => match suggestions.get(ui_state.selected_index) {
            Some(suggestion) => Outcome::State(ui_state.with_input(suggestion.clone())),
            None => Outcome::Nothing,
        },
        KeyCode::Enter if ui_state.input.is_empty() => Outcome::Submit(
            suggestions
                .get(ui_state.selected_index)
                .cloned()
                .unwrap_or_default(),
        ),
        KeyCode::Enter => Outcome::Submit(ui_state.input.clone()),
        KeyCode::Backspace => {
            if ui_state.input.is_empty() {
                return Outcome::Nothing;
            }
            let mut input = ui_state.input.clone();
            input.pop();
            Outcome::State(ui_state.with_input(input))
        }
        KeyCode::Esc => Outcome::Quit,
        KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => Outcome::Quit,
        KeyCode::Char('u') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
            Outcome::State(ui_state.with_input(String::new()))
        }
        KeyCode::Char(c) if !key_event.modifiers.contains(KeyModifiers::CONTROL) => {
            let mut input = ui_state.input.clone();
            input.push(c);
            Outcome::State(ui_state.with_input(input))
        }
        _ => Outcome::Nothing,
    }
}

/// Handle mouse events: the wheel moves the highlight, a left click submits a row
fn handle_mouse_event(
    mouse_event: MouseEvent,
    ui_state: &UiState,
    suggestions: &[String],
    context: &[String],
) -> Outcome {
    let MouseEvent {
        kind,
        row,
        modifiers,
        ..
    } = mouse_event;

    if modifiers != KeyModifiers::NONE {
        return Outcome::Nothing;
    }

    match kind {
        MouseEventKind::ScrollDown => {
            Outcome::State(move_selected_index(ui_state, suggestions.len(), Down))
        }
        MouseEventKind::ScrollUp => {
            Outcome::State(move_selected_index(ui_state, suggestions.len(), Up))
        }
        MouseEventKind::Down(MouseButton::Left) => {
            let first_row = 1 + context_rows(context);
            if row < first_row {
                // Click on header or context
                return Outcome::Nothing;
            }

            let clicked_index = (row - first_row) as usize + ui_state.viewport.offset;
            let on_visible_row = row - first_row < ui_state.viewport.height;
            match suggestions.get(clicked_index) {
                Some(suggestion) if on_visible_row => Outcome::Submit(suggestion.clone()),
                _ => Outcome::Nothing,
            }
        }
        _ => Outcome::Nothing,
    }
}

/// Handle window resize events
fn handle_resize(
    width: u16,
    height: u16,
    ui_state: &UiState,
    suggestion_count: usize,
    context: &[String],
) -> UiState {
    let new_height = viewport_height(height, context);
    let mut ui_state = ui_state.clone();
    let mut new_viewport = ViewportState {
        width,
        height: new_height,
        offset: ui_state.viewport.offset,
    };

    // If growing taller, try to show more items above current selection
    match new_height.cmp(&ui_state.viewport.height) {
        std::cmp::Ordering::Greater if new_viewport.offset > 0 => {
            let height_increase = new_height - ui_state.viewport.height;
            new_viewport.offset = new_viewport.offset.saturating_sub(height_increase as usize);
        }
        std::cmp::Ordering::Less
            if ui_state.selected_index >= new_viewport.offset + new_height as usize =>
        {
            new_viewport.offset = ui_state
                .selected_index
                .saturating_sub(new_height as usize - 1);

            if new_viewport.offset + new_height as usize > suggestion_count {
                new_viewport.offset = suggestion_count.saturating_sub(new_height as usize);
            }
        }
        _ => {}
    }

    ui_state.viewport = new_viewport;
    ui_state
}

/// Print the header for the selection UI
fn print_header(label: &str, ui_state: &UiState, suggestion_count: usize) -> Result<()> {
    let mut stdout = stdout();
    let width = ui_state.viewport.width as usize;

    let left_padding_size = 2usize;

    let left_padding = " ".repeat(left_padding_size);

    let position = if suggestion_count == 0 {
        0
    } else {
        ui_state.selected_index + 1
    };

    let instructions = format!(
        "{label}   |   Tab: Complete   Enter: Submit   Esc: Cancel   |   {}/{}",
        pad_to_width_of(position, suggestion_count),
        suggestion_count
    );
    let instructions = truncate_to_width(&instructions, width.saturating_sub(left_padding_size));

    let right_padding = " ".repeat(
        width
            .saturating_sub(left_padding_size)
            .saturating_sub(instructions.chars().count()),
    );

    queue!(
        stdout,
        MoveTo(0, 0),
        SetBackgroundColor(DarkGreen),
        Print(left_padding),
        Print(instructions),
        Print(right_padding),
        SetBackgroundColor(Reset),
        SetForegroundColor(Reset),
    )?;

    Ok(())
}

/// Pad a value to match the width of the largest value
fn pad_to_width_of<T: Display>(value: T, max_number: usize) -> String {
    let width = format!("{max_number}").len();
    format!("{:>width$}", value.to_string())
}

fn truncate_to_width(text: &str, width: impl Into<usize>) -> String {
    text.chars().take(width.into()).collect()
}

/// Clear and write a suggestion row in the selection UI
fn clear_and_write_suggestion_row(
    row: u16,
    suggestion: &str,
    is_selected: bool,
    terminal_width: u16,
) -> Result<()> {
    let mut stdout = stdout();

    queue!(stdout, MoveTo(0, row), Clear(ClearType::CurrentLine))?;

    let content = truncate_to_width(&format!("  {suggestion}"), terminal_width);
    let padding = " ".repeat((terminal_width as usize).saturating_sub(content.chars().count()));

    if is_selected {
        queue!(
            stdout,
            SetAttribute(Attribute::Bold),
            SetBackgroundColor(DarkBlue),
            SetForegroundColor(Yellow),
        )?;
    }

    queue!(stdout, Print(content), Print(padding))?;

    queue!(
        stdout,
        SetAttribute(Attribute::Reset),
        SetBackgroundColor(Reset),
        SetForegroundColor(Reset),
    )?;

    Ok(())
}

/// Print the visible suggestions with the selected one highlighted
fn print_suggestions_with_selection(
    ui_state: &UiState,
    suggestions: &[String],
    first_row: u16,
) -> Result<()> {
    let viewport = &ui_state.viewport;

    let visible_suggestions = suggestions
        .iter()
        .skip(viewport.offset)
        .take(viewport.height as usize);

    for (i, suggestion) in visible_suggestions.enumerate() {
        let is_selected = i + viewport.offset == ui_state.selected_index;
        let row = first_row.saturating_add(u16::try_from(i).unwrap_or(u16::MAX));

        clear_and_write_suggestion_row(row, suggestion, is_selected, viewport.width)?;
    }

    Ok(())
}

/// Move the selected index in the given direction, wrapping at either end
fn move_selected_index(
    ui_state: &UiState,
    suggestion_count: usize,
    direction: CycleDirection,
) -> UiState {
    if suggestion_count == 0 {
        return ui_state.clone();
    }

    let mut new_index = ui_state.selected_index;
    let mut ui_state = ui_state.clone();
    let height = ui_state.viewport.height.max(1) as usize;

    match direction {
        Up => {
            if new_index == 0 {
                new_index = suggestion_count - 1;
                ui_state.viewport.offset = new_index.saturating_sub(height - 1);
            } else {
                new_index -= 1;
                if new_index < ui_state.viewport.offset {
                    ui_state.viewport.offset = new_index;
                }
            }
        }
        Down => {
            new_index = (new_index + 1) % suggestion_count;
            if new_index < ui_state.selected_index {
                ui_state.viewport.offset = 0;
            } else if new_index >= ui_state.viewport.offset + height {
                ui_state.viewport.offset = new_index - height + 1;
            }
        }
    }

    ui_state.selected_index = new_index;
    ui_state
}
