//! Fuzzy matching and the candidate providers that feed the interactive prompts.
//!
//! A [`Completer`] owns (or generates) a list of candidate strings and, given
//! the text typed so far, produces the ranked suggestions to show. Matching is
//! subsequence based: a candidate is suggested when every character of the
//! query appears in it, in order. Matching uses smart case, so an all-lowercase
//! query ignores case while a query containing an uppercase letter respects it.
//!
//! ```
//! use ac_time_core::completion::fuzzy_filter;
//!
//! let words = vec!["Development".to_string(), "Meeting".to_string()];
//! assert_eq!(fuzzy_filter("dvl", &words), vec!["Development".to_string()]);
//! ```

use chrono::{Days, NaiveDate};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

use crate::calendar::{format_date, parse_date, WeekRange};
use crate::error::{Error, Result};

/// Number of date candidates offered, today included.
pub const DATE_CANDIDATE_COUNT: u64 = 30;

/// Number of week candidates offered, the current week included.
pub const WEEK_CANDIDATE_COUNT: u64 = 5;

/// Keeps the items whose text contains `query` as a subsequence, in their original order.
pub fn fuzzy_filter_by<T, F>(query: &str, items: Vec<T>, text_of: F) -> Vec<T>
where
    F: Fn(&T) -> &str,
{
    if query.is_empty() {
        return items;
    }

    // Smart case is decided here so that non-ASCII letters fold as well
    let ignore_case = !query.chars().any(char::is_uppercase);
    let matcher = SkimMatcherV2::default().respect_case();
    items
        .into_iter()
        .filter(|item| {
            let text = text_of(item);
            if ignore_case {
                matcher.fuzzy_match(&text.to_lowercase(), query).is_some()
            } else {
                matcher.fuzzy_match(text, query).is_some()
            }
        })
        .collect()
}

/// Returns the candidates matching `query`, in source order.
#[must_use]
pub fn fuzzy_filter(query: &str, candidates: &[String]) -> Vec<String> {
    fuzzy_filter_by(query, candidates.to_vec(), String::as_str)
}

/// Today and the preceding days, most recent first.
#[must_use]
pub fn generate_dates(today: NaiveDate) -> Vec<NaiveDate> {
    (0..DATE_CANDIDATE_COUNT)
        .map(|offset| today - Days::new(offset))
        .collect()
}

/// The week containing today and the preceding weeks, most recent first.
#[must_use]
pub fn generate_weeks(today: NaiveDate) -> Vec<WeekRange> {
    let current = WeekRange::containing(today);
    (0..WEEK_CANDIDATE_COUNT)
        .map(|offset| WeekRange {
            monday: current.monday - Days::new(7 * offset),
            sunday: current.sunday - Days::new(7 * offset),
        })
        .collect()
}

/// A lazy, restartable sequence of suggestions.
///
/// Cloning it gives an independent iterator starting from the same position.
#[derive(Clone, Debug)]
pub struct Suggestions(std::vec::IntoIter<String>);

impl Iterator for Suggestions {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }
}

/// What a prompt produced once its text was validated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Accepted {
    Text(String),
    Date(NaiveDate),
    Week(WeekRange),
}

/// Suggestion source for an interactive prompt.
#[derive(Clone, Debug)]
pub enum Completer {
    /// A fixed list, suggested in the order given.
    Plain(Vec<String>),
    /// The last thirty days, ranked most recent first.
    Date { today: NaiveDate },
    /// The last five Monday to Sunday weeks, ranked most recent first.
    Week { today: NaiveDate },
}

impl Completer {
    /// A plain completer over `words`, sorted alphabetically.
    pub fn sorted<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut words: Vec<String> = words.into_iter().map(Into::into).collect();
        words.sort();
        Completer::Plain(words)
    }

    /// All candidates, before any filtering.
    #[must_use]
    pub fn candidates(&self) -> Vec<String> {
        match self {
            Completer::Plain(words) => words.clone(),
            Completer::Date { today } => generate_dates(*today)
                .into_iter()
                .map(format_date)
                .collect(),
            Completer::Week { today } => generate_weeks(*today)
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }

    /// Suggestions for the text typed so far, filtered and ranked.
    #[must_use]
    pub fn complete(&self, input: &str) -> Suggestions {
        let ranked = match self {
            Completer::Plain(words) => fuzzy_filter(input, words),
            Completer::Date { today } => {
                let dated = generate_dates(*today)
                    .into_iter()
                    .map(|date| (date, format_date(date)))
                    .collect();
                let mut matches = fuzzy_filter_by(input, dated, |(_, text)| text.as_str());
                // Weekday prefixes do not sort chronologically, so rank by the date itself
                matches.sort_by(|(a, _), (b, _)| b.cmp(a));
                matches.into_iter().map(|(_, text)| text).collect()
            }
            Completer::Week { .. } => {
                let mut matches = fuzzy_filter(input, &self.candidates());
                matches.sort_by(|a, b| b.cmp(a));
                matches
            }
        };

        Suggestions(ranked.into_iter())
    }

    /// Validates submitted text against the format this completer expects.
    ///
    /// # Errors
    ///
    /// Returns a recoverable error ([`Error::is_recoverable`]) when the text
    /// does not parse or is not one of the plain candidates.
    pub fn accept(&self, text: &str) -> Result<Accepted> {
        match self {
            Completer::Plain(words) => {
                if words.iter().any(|word| word == text) {
                    Ok(Accepted::Text(text.to_string()))
                } else {
                    Err(Error::UnknownChoice(text.to_string()))
                }
            }
            Completer::Date { .. } => parse_date(text).map(Accepted::Date),
            Completer::Week { .. } => text.parse::<WeekRange>().map(Accepted::Week),
        }
    }
}

/// Finds the single item whose designated field equals `text` exactly.
///
/// # Errors
///
/// Returns [`Error::EntityNotFound`] when nothing matches and
/// [`Error::AmbiguousEntity`] when more than one item does. Either means the
/// candidate list shown to the user is out of step with `items`.
pub fn resolve_entity<'a, T, F>(kind: &'static str, text: &str, items: &'a [T], field: F) -> Result<&'a T>
where
    F: Fn(&T) -> &str,
{
    let mut matches = items.iter().filter(|item| field(*item) == text);

    let Some(first) = matches.next() else {
        return Err(Error::EntityNotFound {
            kind,
            text: text.to_string(),
        });
    };

    let extra = matches.count();
    if extra > 0 {
        return Err(Error::AmbiguousEntity {
            kind,
            text: text.to_string(),
            count: extra + 1,
        });
    }

    Ok(first)
}
