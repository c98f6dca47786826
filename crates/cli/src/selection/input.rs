use std::io::{stdin, stdout, BufRead, ErrorKind, Write};

use ac_time_core::error::{Error, Result};
use ac_time_core::records::parse_hours;
use dialoguer::{Editor, Password};

fn read_trimmed_line<R: BufRead>(reader: &mut R) -> Result<String> {
    let mut input = String::new();
    if reader.read_line(&mut input)? == 0 {
        return Err(Error::Stdio(std::io::Error::new(
            ErrorKind::UnexpectedEof,
            "input closed while waiting for an answer",
        )));
    }
    Ok(input.trim().to_string())
}

/// Reads one line of free text. Empty answers are allowed.
pub fn prompt_text_from<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    label: &str,
) -> Result<String> {
    write!(writer, "({label})> ")?;
    writer.flush()?;
    read_trimmed_line(reader)
}

/// Typed on its own at the summary prompt, opens `$EDITOR` instead.
pub const OPEN_EDITOR: &str = ":e";

/// Reads a summary line, or the text written in an editor when the answer is [`OPEN_EDITOR`].
///
/// An editor closed without saving brings the line prompt back.
pub fn prompt_summary_from<R, W, F>(
    reader: &mut R,
    writer: &mut W,
    label: &str,
    mut open_editor: F,
) -> Result<String>
where
    R: BufRead,
    W: Write,
    F: FnMut() -> Result<Option<String>>,
{
    writeln!(writer, "Type {OPEN_EDITOR} to write the {} in $EDITOR.", label.to_lowercase())?;
    loop {
        let text = prompt_text_from(reader, writer, label)?;
        if text != OPEN_EDITOR {
            return Ok(text);
        }

        match open_editor()? {
            Some(edited) => return Ok(edited.trim().to_string()),
            None => writeln!(writer, "Editor closed without saving.")?,
        }
    }
}

/// Asks for an amount of time until it parses, returning hours.
pub fn prompt_hours_from<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    label: &str,
) -> Result<f64> {
    loop {
        write!(writer, "({label})> ")?;
        writer.flush()?;

        let read_value = read_trimmed_line(reader)?;
        match parse_hours(&read_value) {
            Ok(hours) => return Ok(hours),
            Err(e) => writeln!(writer, "{e}")?,
        }
    }
}

/// Asks a yes/no question until it gets one of the two answers.
pub fn confirm_from<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    label: &str,
) -> Result<bool> {
    loop {
        write!(writer, "({label} ([y]es/[n]o))> ")?;
        writer.flush()?;

        let lowercase_input = read_trimmed_line(reader)?.to_lowercase();

        match lowercase_input.as_str() {
            "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            _ => {}
        }
    }
}

/// Prompts for a summary on the terminal, with `$EDITOR` on request
pub fn prompt_summary(label: &str) -> Result<String> {
    prompt_summary_from(&mut stdin().lock(), &mut stdout(), label, || {
        Editor::new()
            .edit("")
            .map_err(|e| Error::Editor(e.to_string()))
    })
}

/// Prompts for an amount of time on the terminal
pub fn prompt_hours(label: &str) -> Result<f64> {
    prompt_hours_from(&mut stdin().lock(), &mut stdout(), label)
}

/// Prompts for a yes/no answer on the terminal
pub fn confirm(label: &str) -> Result<bool> {
    confirm_from(&mut stdin().lock(), &mut stdout(), label)
}

/// Prompts for the account password without echoing it
pub fn prompt_password(user: &str) -> Result<String> {
    Password::new()
        .with_prompt(format!("Password for {user}"))
        .interact()
        .map_err(|e| Error::Password(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_prompt_text_allows_empty() {
        let mut reader = Cursor::new("\n");
        let mut output = Vec::new();
        let text = prompt_text_from(&mut reader, &mut output, "Summary").unwrap();
        assert_eq!(text, "");
        assert_eq!(String::from_utf8(output).unwrap(), "(Summary)> ");
    }

    #[test]
    fn test_prompt_summary_reads_line_without_editor() {
        let mut reader = Cursor::new("Fixed the login form\n");
        let mut output = Vec::new();
        let summary = prompt_summary_from(&mut reader, &mut output, "Summary", || {
            panic!("editor should not open")
        })
        .unwrap();
        assert_eq!(summary, "Fixed the login form");
    }

    #[test]
    fn test_prompt_summary_opens_editor() {
        let mut reader = Cursor::new(":e\n");
        let mut output = Vec::new();
        let summary = prompt_summary_from(&mut reader, &mut output, "Summary", || {
            Ok(Some("Long summary\nwritten in vim\n".to_string()))
        })
        .unwrap();
        assert_eq!(summary, "Long summary\nwritten in vim");
        assert!(String::from_utf8(output).unwrap().starts_with("Type :e to write the summary in $EDITOR."));
    }

    #[test]
    fn test_prompt_summary_reprompts_when_editor_not_saved() {
        let mut reader = Cursor::new(":e\nShort one\n");
        let mut output = Vec::new();
        let mut opened = 0;
        let summary = prompt_summary_from(&mut reader, &mut output, "Summary", || {
            opened += 1;
            Ok(None)
        })
        .unwrap();
        assert_eq!(summary, "Short one");
        assert_eq!(opened, 1);

        let printed = String::from_utf8(output).unwrap();
        assert!(printed.contains("Editor closed without saving."));
        assert_eq!(printed.matches("(Summary)> ").count(), 2);
    }

    #[test]
    fn test_prompt_hours_converts_minutes() {
        let mut reader = Cursor::new("90\n");
        let mut output = Vec::new();
        assert_eq!(prompt_hours_from(&mut reader, &mut output, "Value").unwrap(), 1.5);
    }

    #[test]
    fn test_prompt_hours_retries_until_valid() {
        let mut reader = Cursor::new("soon\n-5\n1:15\n");
        let mut output = Vec::new();
        assert_eq!(prompt_hours_from(&mut reader, &mut output, "Value").unwrap(), 1.25);

        let printed = String::from_utf8(output).unwrap();
        assert_eq!(printed.matches("(Value)> ").count(), 3);
        assert!(printed.contains("Invalid value `soon`"));
    }

    #[test]
    fn test_confirm() {
        let mut output = Vec::new();
        assert!(confirm_from(&mut Cursor::new("Y\n"), &mut output, "Billable").unwrap());
        assert!(!confirm_from(&mut Cursor::new("no\n"), &mut output, "Billable").unwrap());
        assert!(confirm_from(&mut Cursor::new("\nmaybe\ny\n"), &mut output, "Billable").unwrap());
    }

    #[test]
    fn test_closed_input_is_an_error() {
        let mut output = Vec::new();
        let result = confirm_from(&mut Cursor::new(""), &mut output, "Billable");
        assert!(matches!(result, Err(Error::Stdio(_))));
    }
}
