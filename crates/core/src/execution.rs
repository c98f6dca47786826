use std::process::{Command, Stdio};

use log::{info, warn};

use crate::error::{Error, Result};

/// Runs an external program, e.g. `cal -3`, and returns what it printed.
///
/// An empty `program_and_args` runs nothing and returns an empty string.
///
/// # Errors
///
/// Returns an error if the program cannot be started or exits with a non-zero status.
pub fn capture_command_output(program_and_args: &[String]) -> Result<String> {
    let Some((program, args)) = program_and_args.split_first() else {
        return Ok(String::new());
    };

    info!("Running `{}`", program_and_args.join(" "));

    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .output()?;

    if !output.status.success() {
        return Err(Error::CalendarExit);
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Calendar lines to show above a date or week prompt.
///
/// Failures are only logged and give no lines.
#[must_use]
pub fn calendar_lines(calendar_command: &[String]) -> Vec<String> {
    match capture_command_output(calendar_command) {
        Ok(output) => output.lines().map(|line| line.trim_end().to_string()).collect(),
        Err(e) => {
            warn!("Could not show the calendar: {e}");
            Vec::new()
        }
    }
}
