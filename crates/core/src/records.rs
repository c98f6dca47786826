//! Time records and the daily/weekly summaries built from them.

use chrono::NaiveDate;

use crate::calendar::WeekRange;
use crate::error::{Error, Result};

/// A logged amount of time, in hours.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeRecord {
    pub value: f64,
    pub billable: bool,
    pub summary: String,
    pub record_date: NaiveDate,
}

/// The span of days a summary covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Window {
    Day(NaiveDate),
    Week(WeekRange),
}

impl Window {
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        match self {
            Window::Day(day) => *day == date,
            Window::Week(week) => week.contains(date),
        }
    }
}

/// Hours split by billability.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Totals {
    pub billable: f64,
    pub non_billable: f64,
}

impl Totals {
    #[must_use]
    pub fn total(&self) -> f64 {
        self.billable + self.non_billable
    }

    fn add_record(&mut self, record: &TimeRecord) {
        if record.billable {
            self.billable += record.value;
        } else {
            self.non_billable += record.value;
        }
    }

    fn add(&mut self, other: &Totals) {
        self.billable += other.billable;
        self.non_billable += other.non_billable;
    }

    /// Billable hours as a percentage of `target_hours`.
    #[must_use]
    pub fn billable_percentage(&self, target_hours: f64) -> f64 {
        if target_hours <= 0.0 {
            return 0.0;
        }
        self.billable / target_hours * 100.0
    }
}

/// The records and totals of a single day.
#[derive(Debug, Clone, PartialEq)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub records: Vec<TimeRecord>,
    pub totals: Totals,
}

/// Summary over a [`Window`]. `days` runs from the latest day back to the earliest.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub window: Window,
    pub days: Vec<DaySummary>,
    pub totals: Totals,
}

fn summarize_day(records: &[TimeRecord], date: NaiveDate) -> DaySummary {
    let records: Vec<TimeRecord> = records
        .iter()
        .filter(|record| record.record_date == date)
        .cloned()
        .collect();

    let mut totals = Totals::default();
    for record in &records {
        totals.add_record(record);
    }

    DaySummary {
        date,
        records,
        totals,
    }
}

/// Groups `records` by day within `window` and sums their hours.
///
/// For a week, days after `today` are left out, both from `days` and from the
/// weekly totals, so the weekly totals always equal the sum of the daily ones.
#[must_use]
pub fn aggregate(records: &[TimeRecord], window: Window, today: NaiveDate) -> Summary {
    let in_window: Vec<TimeRecord> = records
        .iter()
        .filter(|record| window.contains(record.record_date))
        .cloned()
        .collect();

    let dates = match window {
        Window::Day(date) => vec![date],
        Window::Week(week) => week.days_descending(today),
    };

    let days: Vec<DaySummary> = dates
        .into_iter()
        .map(|date| summarize_day(&in_window, date))
        .collect();

    let mut totals = Totals::default();
    for day in &days {
        totals.add(&day.totals);
    }

    Summary {
        window,
        days,
        totals,
    }
}

/// Converts typed time into hours.
///
/// A bare integer is minutes (`90` is 1.5 hours), a decimal is hours (`1.5`)
/// and `H:MM` is hours and minutes (`1:30`).
///
/// # Errors
///
/// Returns [`Error::InvalidValue`] for anything else, including negative values.
pub fn parse_hours(text: &str) -> Result<f64> {
    let trimmed = text.trim();
    let invalid = || Error::InvalidValue(text.to_string());

    let hours = if let Some((hours, minutes)) = trimmed.split_once(':') {
        let hours: u32 = hours.trim().parse().map_err(|_| invalid())?;
        let minutes: u32 = minutes.trim().parse().map_err(|_| invalid())?;
        if minutes >= 60 {
            return Err(invalid());
        }
        f64::from(hours) + f64::from(minutes) / 60.0
    } else if trimmed.contains('.') {
        trimmed.parse::<f64>().map_err(|_| invalid())?
    } else {
        let minutes: u32 = trimmed.parse().map_err(|_| invalid())?;
        f64::from(minutes) / 60.0
    };

    if !hours.is_finite() || hours < 0.0 {
        return Err(invalid());
    }

    Ok(hours)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(value: f64, billable: bool, record_date: NaiveDate) -> TimeRecord {
        TimeRecord {
            value,
            billable,
            summary: format!("{value}h"),
            record_date,
        }
    }

    #[test]
    fn test_daily_scenario() {
        let records = vec![
            record(2.0, true, date(2024, 1, 1)),
            record(1.0, false, date(2024, 1, 1)),
        ];
        let summary = aggregate(&records, Window::Day(date(2024, 1, 1)), date(2024, 1, 1));

        assert_eq!(summary.totals.billable, 2.0);
        assert_eq!(summary.totals.non_billable, 1.0);
        assert_eq!(summary.totals.total(), 3.0);
        assert_eq!(summary.days.len(), 1);
        assert_eq!(summary.days[0].records, records);
    }

    #[test]
    fn test_daily_ignores_other_days() {
        let records = vec![
            record(2.0, true, date(2024, 1, 1)),
            record(4.0, true, date(2024, 1, 2)),
        ];
        let summary = aggregate(&records, Window::Day(date(2024, 1, 2)), date(2024, 1, 5));
        assert_eq!(summary.totals.billable, 4.0);
        assert_eq!(summary.days[0].records.len(), 1);
    }

    #[test]
    fn test_empty_day() {
        let summary = aggregate(&[], Window::Day(date(2024, 1, 1)), date(2024, 1, 1));
        assert_eq!(summary.totals, Totals::default());
        assert!(summary.days[0].records.is_empty());
    }

    #[test]
    fn test_weekly_breakdown_descends_and_sums() {
        let week = WeekRange::containing(date(2024, 1, 1));
        let records = vec![
            record(2.0, true, date(2024, 1, 1)),
            record(1.5, false, date(2024, 1, 3)),
            record(0.25, true, date(2024, 1, 7)),
            record(8.0, true, date(2023, 12, 31)),
            record(8.0, true, date(2024, 1, 8)),
        ];
        let summary = aggregate(&records, Window::Week(week), date(2024, 2, 1));

        let dates: Vec<NaiveDate> = summary.days.iter().map(|d| d.date).collect();
        assert_eq!(dates.first(), Some(&date(2024, 1, 7)));
        assert_eq!(dates.last(), Some(&date(2024, 1, 1)));
        assert_eq!(dates.len(), 7);

        assert_eq!(summary.totals.billable, 2.25);
        assert_eq!(summary.totals.non_billable, 1.5);
        assert_eq!(summary.totals.total(), 3.75);

        let daily_sum: f64 = summary.days.iter().map(|d| d.totals.total()).sum();
        assert_eq!(summary.totals.total(), daily_sum);
    }

    #[test]
    fn test_weekly_skips_future_days() {
        let week = WeekRange::containing(date(2024, 1, 1));
        let records = vec![
            record(2.0, true, date(2024, 1, 2)),
            record(3.0, true, date(2024, 1, 5)),
        ];
        let summary = aggregate(&records, Window::Week(week), date(2024, 1, 3));

        assert_eq!(summary.days.len(), 3);
        assert_eq!(summary.days[0].date, date(2024, 1, 3));
        assert_eq!(summary.totals.billable, 2.0);
    }

    #[test]
    fn test_aggregate_is_repeatable() {
        let week = WeekRange::containing(date(2024, 1, 1));
        let records = vec![
            record(1.0, true, date(2024, 1, 1)),
            record(0.5, false, date(2024, 1, 2)),
        ];
        let first = aggregate(&records, Window::Week(week), date(2024, 1, 10));
        let second = aggregate(&records, Window::Week(week), date(2024, 1, 10));
        assert_eq!(first, second);
    }

    #[test]
    fn test_billable_percentage() {
        let totals = Totals {
            billable: 30.0,
            non_billable: 7.5,
        };
        assert_eq!(totals.billable_percentage(37.5), 80.0);
        assert_eq!(totals.billable_percentage(40.0), 75.0);
        assert_eq!(totals.billable_percentage(0.0), 0.0);
    }

    #[test]
    fn test_parse_hours_minutes() {
        assert_eq!(parse_hours("90").unwrap(), 1.5);
        assert_eq!(parse_hours("15").unwrap(), 0.25);
        assert_eq!(parse_hours(" 60 ").unwrap(), 1.0);
        assert_eq!(parse_hours("0").unwrap(), 0.0);
    }

    #[test]
    fn test_parse_hours_decimal() {
        assert_eq!(parse_hours("1.5").unwrap(), 1.5);
        assert_eq!(parse_hours(".25").unwrap(), 0.25);
    }

    #[test]
    fn test_parse_hours_clock() {
        assert_eq!(parse_hours("1:30").unwrap(), 1.5);
        assert_eq!(parse_hours("0:45").unwrap(), 0.75);
    }

    #[test]
    fn test_parse_hours_rejects_bad_input() {
        for input in ["", "abc", "-30", "-1.5", "1:75", "1:", "1.5.2", "NaN.", "1:30:00"] {
            assert!(
                matches!(parse_hours(input), Err(Error::InvalidValue(_))),
                "input `{input}`"
            );
        }
    }
}
