//! # Day Tokens
//!
//! A day token is what the user types to mean "one day": a keyword
//! (`today`, `yesterday`, `tomorrow`, `first`, `last`), an explicit date, or
//! the name of a notebook that isn't tied to a date at all.
//!
//! Parsing turns the raw string into a [`DayToken`] once; resolution never
//! looks at the string again.
//!
//! ## Accepted spellings
//!
//! - Keywords match by case-insensitive prefix, tried in the order
//!   today, yesterday, tomorrow, first, last. So `t` is today and `tom` is
//!   tomorrow.
//! - `YYYY-MM-DD`, `YY-MM-DD`, `YYYY/MM/DD`, `YY/MM/DD`, `DD.MM.YYYY`,
//!   `DD.MM.YY` and `DD.MM.` (the current year).
//! - Two-digit years pivot like POSIX `%y`: `69`..`99` are 1969..1999,
//!   `00`..`68` are 2000..2068.
//! - Anything else is a notebook name.

use crate::calendar::CalendarDate;
use crate::error::{LnoteError, Result};
use crate::notebook::NotebookId;
use log::trace;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DayToken {
    Today,
    Yesterday,
    Tomorrow,
    First,
    Last,
    Explicit(CalendarDate),
    NamedNotebook(String),
}

/// The outcome of resolving a single [`DayToken`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedDay {
    Date(CalendarDate),
    Notebook(NotebookId),
}

const KEYWORDS: [(&str, DayToken); 5] = [
    ("today", DayToken::Today),
    ("yesterday", DayToken::Yesterday),
    ("tomorrow", DayToken::Tomorrow),
    ("first", DayToken::First),
    ("last", DayToken::Last),
];

impl DayToken {
    /// Parses a raw token. `today` is only consulted for the `DD.MM.` form,
    /// which borrows the current year.
    pub fn parse(input: &str, today: CalendarDate) -> Result<Self> {
        let input = input.trim();
        if input.is_empty() {
            return Err(LnoteError::DayFormat(input.to_string()));
        }

        if let Some(keyword) = Self::keyword(input) {
            return Ok(keyword);
        }

        if let Some(date) = parse_explicit_date(input, today)? {
            return Ok(DayToken::Explicit(date));
        }

        Ok(DayToken::NamedNotebook(input.to_string()))
    }

    /// Matches `input` as an abbreviation of one of the day keywords.
    pub fn keyword(input: &str) -> Option<Self> {
        if input.is_empty() {
            return None;
        }
        let lower = input.to_lowercase();
        KEYWORDS
            .iter()
            .find(|(word, _)| word.starts_with(&lower))
            .map(|(_, token)| token.clone())
    }

    pub fn is_named(&self) -> bool {
        matches!(self, DayToken::NamedNotebook(_))
    }
}

impl fmt::Display for DayToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayToken::Today => f.write_str("today"),
            DayToken::Yesterday => f.write_str("yesterday"),
            DayToken::Tomorrow => f.write_str("tomorrow"),
            DayToken::First => f.write_str("first"),
            DayToken::Last => f.write_str("last"),
            DayToken::Explicit(date) => write!(f, "{}", date),
            DayToken::NamedNotebook(name) => f.write_str(name),
        }
    }
}

/// Recognizes the explicit date spellings.
///
/// Returns `Ok(None)` when the input isn't shaped like a date at all, so the
/// caller can fall back to treating it as a notebook name. Numeric input with
/// the right separators but an impossible date is an error, not a name.
fn parse_explicit_date(input: &str, today: CalendarDate) -> Result<Option<CalendarDate>> {
    let separator = ['-', '/', '.']
        .into_iter()
        .find(|sep| input.matches(*sep).count() == 2);
    let Some(separator) = separator else {
        return Ok(None);
    };

    let mut fields: Vec<&str> = input.split(separator).collect();
    if separator == '.' && fields[2].is_empty() {
        // "DD.MM." means this year
        fields.pop();
    }
    let numeric = fields
        .iter()
        .all(|f| !f.is_empty() && f.chars().all(|c| c.is_ascii_digit()));
    if !numeric {
        return Ok(None);
    }

    let bad_format = || LnoteError::DayFormat(input.to_string());
    let number = |s: &str| s.parse::<u32>().map_err(|_| bad_format());

    let (year_field, month_field, day_field) = match (separator, fields.as_slice()) {
        ('.', [d, m]) => (None, *m, *d),
        ('.', [d, m, y]) => (Some(*y), *m, *d),
        (_, [y, m, d]) => (Some(*y), *m, *d),
        _ => return Err(bad_format()),
    };
    if month_field.len() > 2 || day_field.len() > 2 {
        return Err(bad_format());
    }

    let year = match year_field {
        None => today.year(),
        Some(y) if y.len() == 4 => number(y)? as i32,
        Some(y) if y.len() <= 2 => expand_two_digit_year(number(y)?),
        Some(_) => return Err(bad_format()),
    };

    let date = CalendarDate::new(year, number(month_field)?, number(day_field)?)?;
    trace!("parsed explicit date {:?} as {}", input, date);
    Ok(Some(date))
}

fn expand_two_digit_year(yy: u32) -> i32 {
    if yy >= 69 {
        1900 + yy as i32
    } else {
        2000 + yy as i32
    }
}

/// Resolves one token against the current date and the existing notebooks.
///
/// `first` and `last` only consider notebooks whose identifiers are dates.
pub fn resolve_day(
    token: &DayToken,
    today: CalendarDate,
    existing: &[NotebookId],
) -> Result<ResolvedDay> {
    let date = match token {
        DayToken::Today => today,
        DayToken::Yesterday => today.add_days(-1)?,
        DayToken::Tomorrow => today.add_days(1)?,
        DayToken::Explicit(date) => *date,
        DayToken::First => existing
            .iter()
            .filter_map(NotebookId::as_date)
            .min()
            .ok_or_else(|| LnoteError::SelectNotebook(token.to_string()))?,
        DayToken::Last => existing
            .iter()
            .filter_map(NotebookId::as_date)
            .max()
            .ok_or_else(|| LnoteError::SelectNotebook(token.to_string()))?,
        DayToken::NamedNotebook(name) => {
            return Ok(ResolvedDay::Notebook(NotebookId::named(name)?));
        }
    };
    Ok(ResolvedDay::Date(date))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> CalendarDate {
        CalendarDate::new(y, m, d).unwrap()
    }

    fn today() -> CalendarDate {
        date(2024, 3, 15)
    }

    fn parse(s: &str) -> Result<DayToken> {
        DayToken::parse(s, today())
    }

    fn ids(names: &[&str]) -> Vec<NotebookId> {
        names.iter().map(|n| NotebookId::named(n).unwrap()).collect()
    }

    #[test]
    fn keywords_match_by_prefix() {
        assert_eq!(parse("today").unwrap(), DayToken::Today);
        assert_eq!(parse("t").unwrap(), DayToken::Today);
        assert_eq!(parse("TOD").unwrap(), DayToken::Today);
        assert_eq!(parse("tom").unwrap(), DayToken::Tomorrow);
        assert_eq!(parse("y").unwrap(), DayToken::Yesterday);
        assert_eq!(parse("f").unwrap(), DayToken::First);
        assert_eq!(parse("last").unwrap(), DayToken::Last);
    }

    #[test]
    fn explicit_date_spellings() {
        let expected = DayToken::Explicit(date(2024, 1, 5));
        assert_eq!(parse("2024-01-05").unwrap(), expected);
        assert_eq!(parse("24-01-05").unwrap(), expected);
        assert_eq!(parse("2024/1/5").unwrap(), expected);
        assert_eq!(parse("24/01/05").unwrap(), expected);
        assert_eq!(parse("05.01.2024").unwrap(), expected);
        assert_eq!(parse("5.1.24").unwrap(), expected);
    }

    #[test]
    fn day_month_dot_form_uses_current_year() {
        assert_eq!(
            parse("24.12.").unwrap(),
            DayToken::Explicit(date(2024, 12, 24))
        );
    }

    #[test]
    fn two_digit_year_pivot() {
        assert_eq!(parse("69-01-01").unwrap(), DayToken::Explicit(date(1969, 1, 1)));
        assert_eq!(parse("68-01-01").unwrap(), DayToken::Explicit(date(2068, 1, 1)));
    }

    #[test]
    fn impossible_dates_are_calendar_errors() {
        assert!(matches!(parse("2024-04-31"), Err(LnoteError::Calendar(_))));
        assert!(matches!(parse("29.02.2023"), Err(LnoteError::Calendar(_))));
    }

    #[test]
    fn malformed_numeric_dates_are_format_errors() {
        assert!(matches!(parse("123-01-01"), Err(LnoteError::DayFormat(_))));
        assert!(matches!(parse("2024-001-01"), Err(LnoteError::DayFormat(_))));
    }

    #[test]
    fn everything_else_is_a_name() {
        assert_eq!(
            parse("ideas").unwrap(),
            DayToken::NamedNotebook("ideas".into())
        );
        assert_eq!(
            parse("my-cool-notes").unwrap(),
            DayToken::NamedNotebook("my-cool-notes".into())
        );
    }

    #[test]
    fn relative_keywords_resolve_against_today() {
        let existing = ids(&[]);
        assert_eq!(
            resolve_day(&DayToken::Today, today(), &existing).unwrap(),
            ResolvedDay::Date(date(2024, 3, 15))
        );
        assert_eq!(
            resolve_day(&DayToken::Yesterday, date(2024, 3, 1), &existing).unwrap(),
            ResolvedDay::Date(date(2024, 2, 29))
        );
        assert_eq!(
            resolve_day(&DayToken::Tomorrow, date(2023, 12, 31), &existing).unwrap(),
            ResolvedDay::Date(date(2024, 1, 1))
        );
    }

    #[test]
    fn first_and_last_use_existing_date_notebooks() {
        let existing = ids(&["2024-01-05", "ideas", "2024-03-01", "2023-12-31", "zzz"]);
        assert_eq!(
            resolve_day(&DayToken::First, today(), &existing).unwrap(),
            ResolvedDay::Date(date(2023, 12, 31))
        );
        assert_eq!(
            resolve_day(&DayToken::Last, today(), &existing).unwrap(),
            ResolvedDay::Date(date(2024, 3, 1))
        );
    }

    #[test]
    fn first_without_date_notebooks_fails() {
        let existing = ids(&["ideas", "todo"]);
        assert!(matches!(
            resolve_day(&DayToken::First, today(), &existing),
            Err(LnoteError::SelectNotebook(_))
        ));
        assert!(matches!(
            resolve_day(&DayToken::Last, today(), &[]),
            Err(LnoteError::SelectNotebook(_))
        ));
    }

    #[test]
    fn named_notebook_bypasses_calendar() {
        assert_eq!(
            resolve_day(&DayToken::NamedNotebook("ideas".into()), today(), &[]).unwrap(),
            ResolvedDay::Notebook(NotebookId::named("ideas").unwrap())
        );
    }
}
