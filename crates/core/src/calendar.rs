//! Date and week-range helpers shared by the completers and the aggregator.
//!
//! Dates are shown to the user as `"<weekday abbrev>, YYYY-MM-DD"` and weeks
//! as `"<monday> to <sunday>"`. Both formats parse back exactly.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{Datelike, Days, NaiveDate};

use crate::error::{Error, Result};

/// Format used for date candidates, e.g. `Mon, 2024-01-01`.
pub const DATE_FORMAT: &str = "%a, %Y-%m-%d";

/// Format used for each end of a week candidate, and for the API payload.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

const WEEK_SEPARATOR: &str = " to ";

#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parses a date candidate string.
///
/// # Errors
///
/// Returns [`Error::InvalidDate`] unless the text is exactly in [`DATE_FORMAT`]
/// with a weekday that agrees with the date.
pub fn parse_date(text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT)
        .map_err(|_| Error::InvalidDate(text.to_string()))
}

/// The Monday on or before `date`.
#[must_use]
pub fn monday_of(date: NaiveDate) -> NaiveDate {
    let offset = u64::from(date.weekday().num_days_from_monday());
    date - Days::new(offset)
}

/// A Monday..Sunday window, both ends inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct WeekRange {
    pub monday: NaiveDate,
    pub sunday: NaiveDate,
}

impl WeekRange {
    /// The week containing `date`. A Monday starts its own week.
    #[must_use]
    pub fn containing(date: NaiveDate) -> Self {
        let monday = monday_of(date);
        Self {
            monday,
            sunday: monday + Days::new(6),
        }
    }

    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.monday <= date && date <= self.sunday
    }

    /// Days of the week from Sunday back to Monday, leaving out any day after `today`.
    #[must_use]
    pub fn days_descending(&self, today: NaiveDate) -> Vec<NaiveDate> {
        (0..7)
            .map(|offset| self.sunday - Days::new(offset))
            .filter(|day| *day <= today)
            .collect()
    }
}

impl Display for WeekRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{WEEK_SEPARATOR}{}",
            self.monday.format(ISO_DATE_FORMAT),
            self.sunday.format(ISO_DATE_FORMAT)
        )
    }
}

impl FromStr for WeekRange {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self> {
        let invalid = || Error::InvalidWeek(text.to_string());

        let (start, end) = text.trim().split_once(WEEK_SEPARATOR).ok_or_else(invalid)?;
        let monday =
            NaiveDate::parse_from_str(start.trim(), ISO_DATE_FORMAT).map_err(|_| invalid())?;
        let sunday =
            NaiveDate::parse_from_str(end.trim(), ISO_DATE_FORMAT).map_err(|_| invalid())?;

        let week = WeekRange::containing(monday);
        if week.monday != monday || week.sunday != sunday {
            return Err(invalid());
        }

        Ok(week)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(date(2024, 1, 1)), "Mon, 2024-01-01");
        assert_eq!(format_date(date(2024, 2, 29)), "Thu, 2024-02-29");
    }

    #[test]
    fn test_parse_date_round_trips_format() {
        assert_eq!(parse_date("Mon, 2024-01-01").unwrap(), date(2024, 1, 1));
    }

    #[test]
    fn test_parse_date_rejects_bad_input() {
        assert!(matches!(parse_date("2024-01-01"), Err(Error::InvalidDate(_))));
        assert!(matches!(parse_date("Mon, 2024-13-01"), Err(Error::InvalidDate(_))));
        assert!(matches!(parse_date(""), Err(Error::InvalidDate(_))));
    }

    #[test]
    fn test_parse_date_rejects_wrong_weekday() {
        // 2024-01-01 was a Monday
        assert!(parse_date("Tue, 2024-01-01").is_err());
    }

    #[test]
    fn test_monday_of() {
        assert_eq!(monday_of(date(2024, 1, 1)), date(2024, 1, 1));
        assert_eq!(monday_of(date(2024, 1, 3)), date(2024, 1, 1));
        assert_eq!(monday_of(date(2024, 1, 7)), date(2024, 1, 1));
        assert_eq!(monday_of(date(2024, 1, 8)), date(2024, 1, 8));
    }

    #[test]
    fn test_week_containing_crosses_month_and_year() {
        let week = WeekRange::containing(date(2025, 1, 1));
        assert_eq!(week.monday, date(2024, 12, 30));
        assert_eq!(week.sunday, date(2025, 1, 5));
        assert_eq!(week.to_string(), "2024-12-30 to 2025-01-05");
    }

    #[test]
    fn test_week_parse() {
        let week: WeekRange = "2024-01-01 to 2024-01-07".parse().unwrap();
        assert_eq!(week, WeekRange::containing(date(2024, 1, 4)));
    }

    #[test]
    fn test_week_parse_rejects_non_monday_start() {
        let result = "2024-01-02 to 2024-01-08".parse::<WeekRange>();
        assert!(matches!(result, Err(Error::InvalidWeek(_))));
    }

    #[test]
    fn test_week_parse_rejects_garbage() {
        assert!("2024-01-01".parse::<WeekRange>().is_err());
        assert!("2024-01-01 to".parse::<WeekRange>().is_err());
        assert!("last week".parse::<WeekRange>().is_err());
    }

    #[test]
    fn test_week_contains() {
        let week = WeekRange::containing(date(2024, 1, 1));
        assert!(week.contains(date(2024, 1, 1)));
        assert!(week.contains(date(2024, 1, 7)));
        assert!(!week.contains(date(2023, 12, 31)));
        assert!(!week.contains(date(2024, 1, 8)));
    }

    #[test]
    fn test_days_descending_full_week() {
        let week = WeekRange::containing(date(2024, 1, 1));
        let days = week.days_descending(date(2024, 2, 1));
        assert_eq!(days.len(), 7);
        assert_eq!(days[0], date(2024, 1, 7));
        assert_eq!(days[6], date(2024, 1, 1));
    }

    #[test]
    fn test_days_descending_skips_future_days() {
        let week = WeekRange::containing(date(2024, 1, 1));
        let days = week.days_descending(date(2024, 1, 3));
        assert_eq!(days, vec![date(2024, 1, 3), date(2024, 1, 2), date(2024, 1, 1)]);
    }
}
