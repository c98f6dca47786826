//! Interactive selection and user input handling.
//!
//! This module provides the terminal-based prompts for ac-time: the fuzzy
//! selector used for actions, projects, job types, dates and weeks, and the
//! plain line prompts for values, summaries and the billable confirmation.
//!
//! # User Interface
//!
//! The selector supports:
//! - Typing to filter suggestions (fuzzy, subsequence based)
//! - Arrow keys or the mouse wheel to move the highlight
//! - Tab to copy the highlighted suggestion into the input
//! - Enter (or a click) to submit
//! - Escape or Ctrl-C to cancel

// Export public items from submodules
pub mod colors;
pub mod input;
pub mod types;
pub mod ui;

use ac_time_core::calendar::WeekRange;
use ac_time_core::completion::{Accepted, Completer};
use ac_time_core::error::Result;
use chrono::NaiveDate;

// Re-exports for convenience
pub use input::{confirm, prompt_hours, prompt_password, prompt_summary};
pub use types::Selection;
pub use ui::prompt_for_selection;

/// Selects one of a plain completer's candidates. `None` if the user cancelled.
///
/// # Errors
///
/// Returns an error on terminal failure.
pub fn select_text(label: &str, completer: &Completer) -> Result<Option<String>> {
    Ok(match prompt_for_selection(label, completer, &[])? {
        Selection::Accepted(Accepted::Text(text)) => Some(text),
        _ => None,
    })
}

/// Selects a recent date. `None` if the user cancelled.
///
/// # Errors
///
/// Returns an error on terminal failure.
pub fn select_date(label: &str, today: NaiveDate, context: &[String]) -> Result<Option<NaiveDate>> {
    Ok(
        match prompt_for_selection(label, &Completer::Date { today }, context)? {
            Selection::Accepted(Accepted::Date(date)) => Some(date),
            _ => None,
        },
    )
}

/// Selects a recent week. `None` if the user cancelled.
///
/// # Errors
///
/// Returns an error on terminal failure.
pub fn select_week(label: &str, today: NaiveDate, context: &[String]) -> Result<Option<WeekRange>> {
    Ok(
        match prompt_for_selection(label, &Completer::Week { today }, context)? {
            Selection::Accepted(Accepted::Week(week)) => Some(week),
            _ => None,
        },
    )
}
