//! Rendering of daily and weekly summaries.
//!
//! Reports are built as a list of [`ReportLine`]s so they can be checked
//! without a terminal, then printed with colors by [`print_report`].

use std::fmt::{Display, Formatter};
use std::io::{stdout, Write};

use ac_time_core::calendar::format_date;
use ac_time_core::error::Result;
use ac_time_core::records::{DaySummary, Summary, Totals};
use crossterm::queue;
use crossterm::style::{Attribute, Print, ResetColor, SetAttribute, SetForegroundColor};

use crate::selection::colors::AsTermColor;

/// How a piece of a report is styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Heading,
    Plain,
    Billable,
    NonBillable,
    Total,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReportLine {
    Heading(String),
    Plain(String),
    Record { billable: bool, text: String },
    Totals(Totals),
}

/// Formats hours with at most two decimals and no trailing zeros.
#[must_use]
pub fn format_hours(hours: f64) -> String {
    let formatted = format!("{hours:.2}");
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

fn record_text(value: f64, summary: &str, summary_width: usize) -> String {
    let summary: String = summary.chars().take(summary_width).collect();
    format!("{:<6} {summary}", format_hours(value))
}

impl ReportLine {
    /// The pieces of this line and how each is styled.
    #[must_use]
    pub fn segments(&self) -> Vec<(LineKind, String)> {
        match self {
            ReportLine::Heading(text) => vec![(LineKind::Heading, text.clone())],
            ReportLine::Plain(text) => vec![(LineKind::Plain, text.clone())],
            ReportLine::Record { billable, text } => {
                let kind = if *billable {
                    LineKind::Billable
                } else {
                    LineKind::NonBillable
                };
                vec![(kind, text.clone())]
            }
            ReportLine::Totals(totals) => vec![
                (LineKind::Total, format_hours(totals.total())),
                (LineKind::Plain, " ".to_string()),
                (LineKind::Billable, format_hours(totals.billable)),
                (LineKind::Plain, " ".to_string()),
                (LineKind::NonBillable, format_hours(totals.non_billable)),
            ],
        }
    }
}

impl Display for ReportLine {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (_, text) in self.segments() {
            f.write_str(&text)?;
        }
        Ok(())
    }
}

fn day_lines(day: &DaySummary, summary_width: usize) -> Vec<ReportLine> {
    let mut lines = vec![ReportLine::Heading(format_date(day.date))];
    lines.extend(day.records.iter().map(|record| ReportLine::Record {
        billable: record.billable,
        text: record_text(record.value, &record.summary, summary_width),
    }));
    lines.push(ReportLine::Totals(day.totals));
    lines
}

/// The records of each day in the summary, each day followed by its totals.
#[must_use]
pub fn daily_report(summary: &Summary, summary_width: usize) -> Vec<ReportLine> {
    summary
        .days
        .iter()
        .flat_map(|day| day_lines(day, summary_width))
        .collect()
}

/// The daily breakdown followed by the weekly totals and billable percentage.
#[must_use]
pub fn weekly_report(summary: &Summary, summary_width: usize, target_weekly_hours: f64) -> Vec<ReportLine> {
    let mut lines = daily_report(summary, summary_width);
    lines.push(ReportLine::Heading("Weekly Hours".to_string()));
    lines.push(ReportLine::Totals(summary.totals));
    lines.push(ReportLine::Plain(format!(
        "Percent Billable: {:.2}%",
        summary.totals.billable_percentage(target_weekly_hours)
    )));
    lines
}

/// Prints report lines to stdout with billable and non-billable colors.
///
/// # Errors
///
/// Returns an error if writing to the terminal fails.
pub fn print_report(lines: &[ReportLine]) -> Result<()> {
    let mut stdout = stdout();

    for line in lines {
        for (kind, text) in line.segments() {
            if kind == LineKind::Heading {
                queue!(stdout, SetAttribute(Attribute::Bold))?;
            }
            if let Some(color) = kind.as_crossterm_color() {
                queue!(stdout, SetForegroundColor(color))?;
            }
            queue!(stdout, Print(text), ResetColor, SetAttribute(Attribute::Reset))?;
        }
        queue!(stdout, Print("\n"))?;
    }

    stdout.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ac_time_core::calendar::WeekRange;
    use ac_time_core::records::{aggregate, TimeRecord, Window};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(value: f64, billable: bool, summary: &str, record_date: NaiveDate) -> TimeRecord {
        TimeRecord {
            value,
            billable,
            summary: summary.to_string(),
            record_date,
        }
    }

    #[test]
    fn test_format_hours() {
        assert_eq!(format_hours(3.0), "3");
        assert_eq!(format_hours(1.5), "1.5");
        assert_eq!(format_hours(0.25), "0.25");
        assert_eq!(format_hours(1.0 / 3.0), "0.33");
        assert_eq!(format_hours(0.0), "0");
    }

    #[test]
    fn test_daily_report_lines() {
        let day = date(2024, 1, 1);
        let records = vec![
            record(2.0, true, "Feature work", day),
            record(1.0, false, "Standup", day),
        ];
        let summary = aggregate(&records, Window::Day(day), day);
        let lines: Vec<String> = daily_report(&summary, 60).iter().map(ToString::to_string).collect();

        assert_eq!(
            lines,
            vec![
                "Mon, 2024-01-01".to_string(),
                "2      Feature work".to_string(),
                "1      Standup".to_string(),
                "3 2 1".to_string(),
            ]
        );
    }

    #[test]
    fn test_record_lines_are_colored_by_billability() {
        let billable = ReportLine::Record {
            billable: true,
            text: "x".to_string(),
        };
        let internal = ReportLine::Record {
            billable: false,
            text: "x".to_string(),
        };
        assert_eq!(billable.segments()[0].0, LineKind::Billable);
        assert_eq!(internal.segments()[0].0, LineKind::NonBillable);
    }

    #[test]
    fn test_summary_is_truncated() {
        let day = date(2024, 1, 1);
        let records = vec![record(0.5, true, "abcdefghij", day)];
        let summary = aggregate(&records, Window::Day(day), day);
        let lines = daily_report(&summary, 4);
        assert_eq!(lines[1].to_string(), "0.5    abcd");
    }

    #[test]
    fn test_weekly_report_ends_with_totals_and_percentage() {
        let week = WeekRange::containing(date(2024, 1, 1));
        let records = vec![
            record(30.0, true, "Client", date(2024, 1, 2)),
            record(7.5, false, "Internal", date(2024, 1, 3)),
        ];
        let summary = aggregate(&records, Window::Week(week), date(2024, 1, 31));
        let lines: Vec<String> = weekly_report(&summary, 60, 37.5)
            .iter()
            .map(ToString::to_string)
            .collect();

        // Seven days of heading and totals, plus two records, plus three closing lines
        assert_eq!(lines.len(), 7 * 2 + 2 + 3);
        assert_eq!(lines[0], "Sun, 2024-01-07");
        assert_eq!(lines[lines.len() - 3], "Weekly Hours");
        assert_eq!(lines[lines.len() - 2], "37.5 30 7.5");
        assert_eq!(lines[lines.len() - 1], "Percent Billable: 80.00%");
    }
}
