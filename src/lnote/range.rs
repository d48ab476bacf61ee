//! # Day Ranges
//!
//! A day-range expression selects a run of consecutive days. Whatever its
//! form, it resolves to an ascending, duplicate-free list of dates, and the
//! order in which the user wrote the endpoints never matters.
//!
//! ## Grammar
//!
//! | Input | Expression |
//! |---|---|
//! | `+3`, `-7` | [`DayRangeExpression::RelativeSpan`] anchored at today |
//! | `2024-01-05`, `today`, `l` | [`DayRangeExpression::SingleDay`] |
//! | `jan-mar`, `2022-2023`, `first-today`, `2024-01-01-2024-01-31` | [`DayRangeExpression::ExplicitRange`] |
//! | `thisweek`, `lastweek`, `nextweek`, `march`, `2023`, `2023/05` | [`DayRangeExpression::NamedSpan`] |
//!
//! Explicit ranges are split at the first dash where both halves parse as a
//! bound; an empty left half means `first`, an empty right half means `today`.
//!
//! Weeks run Monday through Sunday. Month names need at least three letters
//! so that `f` stays `first`.

use crate::calendar::{CalendarDate, Jdn};
use crate::day::{resolve_day, DayToken, ResolvedDay};
use crate::error::{LnoteError, Result};
use crate::notebook::NotebookId;
use log::debug;
use std::collections::BTreeSet;

const MONTHS: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// A calendar period named by a tag rather than by its endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamedSpan {
    LastWeek,
    ThisWeek,
    NextWeek,
    /// A whole month; `year: None` means the current year.
    Month { year: Option<i32>, month: u32 },
    Year(i32),
}

impl NamedSpan {
    pub fn parse(tag: &str) -> Result<Self> {
        let unknown = || LnoteError::DayRangeFormat(tag.to_string());
        let lower = tag.trim().to_lowercase();

        match lower.as_str() {
            "lastweek" => return Ok(NamedSpan::LastWeek),
            "thisweek" => return Ok(NamedSpan::ThisWeek),
            "nextweek" => return Ok(NamedSpan::NextWeek),
            _ => {}
        }

        if lower.len() >= 3 {
            if let Some(index) = MONTHS.iter().position(|m| m.starts_with(&lower)) {
                return Ok(NamedSpan::Month {
                    year: None,
                    month: index as u32 + 1,
                });
            }
        }

        if lower.len() == 4 && lower.chars().all(|c| c.is_ascii_digit()) {
            let year = lower.parse().map_err(|_| unknown())?;
            CalendarDate::new(year, 1, 1)?;
            return Ok(NamedSpan::Year(year));
        }

        if let Some((y, m)) = lower.split_once('/') {
            let digits = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());
            if y.len() == 4 && m.len() <= 2 && digits(y) && digits(m) {
                let year = y.parse().map_err(|_| unknown())?;
                let month = m.parse().map_err(|_| unknown())?;
                CalendarDate::new(year, month, 1)?;
                return Ok(NamedSpan::Month {
                    year: Some(year),
                    month,
                });
            }
        }

        Err(unknown())
    }

    /// First and last day of the span, inclusive.
    pub fn bounds(&self, today: CalendarDate) -> Result<(CalendarDate, CalendarDate)> {
        let week = |offset: i64| -> Result<(CalendarDate, CalendarDate)> {
            let monday = today.add_days(offset - today.weekday().num_days_from_monday() as i64)?;
            Ok((monday, monday.add_days(6)?))
        };
        match *self {
            NamedSpan::LastWeek => week(-7),
            NamedSpan::ThisWeek => week(0),
            NamedSpan::NextWeek => week(7),
            NamedSpan::Month { year, month } => {
                let first = CalendarDate::new(year.unwrap_or(today.year()), month, 1)?;
                Ok((first, first.last_of_month()))
            }
            NamedSpan::Year(year) => {
                let jan1 = CalendarDate::new(year, 1, 1)?;
                Ok((jan1, jan1.last_of_year()))
            }
        }
    }
}

/// One end of an explicit range: a single day or a whole period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeBound {
    Day(DayToken),
    Span(NamedSpan),
}

impl RangeBound {
    fn parse(input: &str, today: CalendarDate) -> Result<Self> {
        if let Ok(span) = NamedSpan::parse(input) {
            return Ok(RangeBound::Span(span));
        }
        match DayToken::parse(input, today)? {
            DayToken::NamedNotebook(name) => Err(LnoteError::DayRangeFormat(name)),
            token => Ok(RangeBound::Day(token)),
        }
    }

    fn bounds(
        &self,
        today: CalendarDate,
        existing: &[NotebookId],
    ) -> Result<(CalendarDate, CalendarDate)> {
        match self {
            RangeBound::Day(token) => {
                let date = resolve_date(token, today, existing)?;
                Ok((date, date))
            }
            RangeBound::Span(span) => span.bounds(today),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DayRangeExpression {
    SingleDay(DayToken),
    ExplicitRange(RangeBound, RangeBound),
    /// Every day between `anchor` and `anchor + count`, inclusive.
    RelativeSpan { anchor: DayToken, count: i64 },
    NamedSpan(NamedSpan),
}

/// The outcome of resolving a [`DayRangeExpression`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Ascending, without duplicates.
    Dates(Vec<CalendarDate>),
    Notebook(NotebookId),
}

impl DayRangeExpression {
    pub fn parse(input: &str, today: CalendarDate) -> Result<Self> {
        let input = input.trim();
        if input.is_empty() {
            return Err(LnoteError::DayRangeFormat(input.to_string()));
        }

        if let Some(count) = parse_signed_count(input)? {
            return Ok(DayRangeExpression::RelativeSpan {
                anchor: DayToken::Today,
                count,
            });
        }

        let single = DayToken::parse(input, today);
        if let Ok(token @ DayToken::Explicit(_)) = &single {
            return Ok(DayRangeExpression::SingleDay(token.clone()));
        }

        for (pos, _) in input.match_indices('-') {
            let (left, right) = (&input[..pos], &input[pos + 1..]);
            let start = if left.is_empty() {
                Ok(RangeBound::Day(DayToken::First))
            } else {
                RangeBound::parse(left, today)
            };
            let end = if right.is_empty() {
                Ok(RangeBound::Day(DayToken::Today))
            } else {
                RangeBound::parse(right, today)
            };
            if let (Ok(start), Ok(end)) = (start, end) {
                return Ok(DayRangeExpression::ExplicitRange(start, end));
            }
        }

        if let Ok(span) = NamedSpan::parse(input) {
            return Ok(DayRangeExpression::NamedSpan(span));
        }

        single.map(DayRangeExpression::SingleDay)
    }

    /// The first and last date covered, or `None` for a named notebook.
    pub fn bounds(
        &self,
        today: CalendarDate,
        existing: &[NotebookId],
    ) -> Result<Option<(CalendarDate, CalendarDate)>> {
        let bounds = match self {
            DayRangeExpression::SingleDay(token) => {
                match resolve_day(token, today, existing)? {
                    ResolvedDay::Date(date) => (date, date),
                    ResolvedDay::Notebook(_) => return Ok(None),
                }
            }
            DayRangeExpression::ExplicitRange(a, b) => {
                let (a_lo, a_hi) = a.bounds(today, existing)?;
                let (b_lo, b_hi) = b.bounds(today, existing)?;
                (a_lo.min(b_lo), a_hi.max(b_hi))
            }
            DayRangeExpression::RelativeSpan { anchor, count } => {
                let anchor = resolve_date(anchor, today, existing)?;
                let other = anchor.add_days(*count)?;
                (anchor.min(other), anchor.max(other))
            }
            DayRangeExpression::NamedSpan(span) => span.bounds(today)?,
        };
        Ok(Some(bounds))
    }
}

/// `+N` / `-N`. Anything else is not a count.
fn parse_signed_count(input: &str) -> Result<Option<i64>> {
    let Some(digits) = input.strip_prefix(['+', '-']) else {
        return Ok(None);
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Ok(None);
    }
    input
        .parse::<i64>()
        .map(Some)
        .map_err(|_| LnoteError::DayRangeFormat(input.to_string()))
}

fn resolve_date(
    token: &DayToken,
    today: CalendarDate,
    existing: &[NotebookId],
) -> Result<CalendarDate> {
    match resolve_day(token, today, existing)? {
        ResolvedDay::Date(date) => Ok(date),
        ResolvedDay::Notebook(id) => Err(LnoteError::DayRangeFormat(id.to_string())),
    }
}

/// Every date from `start` to `end` inclusive, ascending. Endpoint order is irrelevant.
pub fn enumerate_days(start: CalendarDate, end: CalendarDate) -> Result<Vec<CalendarDate>> {
    let (lo, hi) = (start.min(end).to_jdn(), start.max(end).to_jdn());
    (lo.0..=hi.0)
        .map(|n| CalendarDate::from_jdn(Jdn(n)))
        .collect()
}

pub fn resolve_range(
    expr: &DayRangeExpression,
    today: CalendarDate,
    existing: &[NotebookId],
) -> Result<Resolution> {
    let resolution = match expr.bounds(today, existing)? {
        Some((start, end)) => Resolution::Dates(enumerate_days(start, end)?),
        None => match expr {
            DayRangeExpression::SingleDay(token) => {
                match resolve_day(token, today, existing)? {
                    ResolvedDay::Notebook(id) => Resolution::Notebook(id),
                    ResolvedDay::Date(date) => Resolution::Dates(vec![date]),
                }
            }
            _ => return Err(LnoteError::DayRangeFormat(format!("{:?}", expr))),
        },
    };
    debug!("resolved {:?} to {:?}", expr, resolution);
    Ok(resolution)
}

/// Resolves a comma-separated list of expressions into one ascending,
/// duplicate-free list of dates. Named notebooks are not dates and are rejected.
pub fn resolve_ranges(
    input: &str,
    today: CalendarDate,
    existing: &[NotebookId],
) -> Result<Vec<CalendarDate>> {
    let mut dates = BTreeSet::new();
    for part in input.split(',') {
        let expr = DayRangeExpression::parse(part, today)?;
        match resolve_range(&expr, today, existing)? {
            Resolution::Dates(found) => dates.extend(found),
            Resolution::Notebook(id) => {
                return Err(LnoteError::DayRangeFormat(id.to_string()));
            }
        }
    }
    Ok(dates.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> CalendarDate {
        CalendarDate::new(y, m, d).unwrap()
    }

    // A Friday.
    fn today() -> CalendarDate {
        date(2024, 3, 15)
    }

    fn parse(s: &str) -> DayRangeExpression {
        DayRangeExpression::parse(s, today()).unwrap()
    }

    fn dates_of(s: &str, existing: &[NotebookId]) -> Vec<CalendarDate> {
        match resolve_range(&parse(s), today(), existing).unwrap() {
            Resolution::Dates(d) => d,
            Resolution::Notebook(id) => panic!("expected dates, got notebook {}", id),
        }
    }

    fn ids(names: &[&str]) -> Vec<NotebookId> {
        names.iter().map(|n| NotebookId::named(n).unwrap()).collect()
    }

    #[test]
    fn huge_relative_counts_are_calendar_errors() {
        for input in ["+9223372036854775807", "-9223372036854775808"] {
            assert!(matches!(
                resolve_ranges(input, today(), &[]),
                Err(LnoteError::Calendar(_))
            ));
        }
    }

    #[test]
    fn parses_relative_counts() {
        assert_eq!(
            parse("+3"),
            DayRangeExpression::RelativeSpan {
                anchor: DayToken::Today,
                count: 3
            }
        );
        assert_eq!(
            parse("-7"),
            DayRangeExpression::RelativeSpan {
                anchor: DayToken::Today,
                count: -7
            }
        );
    }

    #[test]
    fn parses_single_explicit_date() {
        assert_eq!(
            parse("2024-01-05"),
            DayRangeExpression::SingleDay(DayToken::Explicit(date(2024, 1, 5)))
        );
    }

    #[test]
    fn parses_iso_date_ranges() {
        assert_eq!(
            parse("2024-01-05-2024-01-10"),
            DayRangeExpression::ExplicitRange(
                RangeBound::Day(DayToken::Explicit(date(2024, 1, 5))),
                RangeBound::Day(DayToken::Explicit(date(2024, 1, 10))),
            )
        );
    }

    #[test]
    fn parses_period_ranges() {
        assert_eq!(
            parse("jan-mar"),
            DayRangeExpression::ExplicitRange(
                RangeBound::Span(NamedSpan::Month {
                    year: None,
                    month: 1
                }),
                RangeBound::Span(NamedSpan::Month {
                    year: None,
                    month: 3
                }),
            )
        );
        assert!(matches!(
            parse("2022-2023"),
            DayRangeExpression::ExplicitRange(
                RangeBound::Span(NamedSpan::Year(2022)),
                RangeBound::Span(NamedSpan::Year(2023))
            )
        ));
    }

    #[test]
    fn dashed_names_stay_names() {
        assert_eq!(
            parse("my-notes"),
            DayRangeExpression::SingleDay(DayToken::NamedNotebook("my-notes".into()))
        );
    }

    #[test]
    fn open_ended_ranges() {
        assert_eq!(
            parse("jan-"),
            DayRangeExpression::ExplicitRange(
                RangeBound::Span(NamedSpan::Month {
                    year: None,
                    month: 1
                }),
                RangeBound::Day(DayToken::Today),
            )
        );
        assert_eq!(
            parse("-today"),
            DayRangeExpression::ExplicitRange(
                RangeBound::Day(DayToken::First),
                RangeBound::Day(DayToken::Today),
            )
        );
    }

    #[test]
    fn explicit_range_is_order_insensitive() {
        let forward = dates_of("2024-01-30-2024-02-02", &[]);
        let backward = dates_of("2024-02-02-2024-01-30", &[]);
        assert_eq!(forward, backward);
        assert_eq!(
            forward,
            vec![
                date(2024, 1, 30),
                date(2024, 1, 31),
                date(2024, 2, 1),
                date(2024, 2, 2)
            ]
        );
    }

    #[test]
    fn relative_span_extends_forward_and_backward() {
        assert_eq!(
            dates_of("+2", &[]),
            vec![date(2024, 3, 15), date(2024, 3, 16), date(2024, 3, 17)]
        );
        assert_eq!(
            dates_of("-2", &[]),
            vec![date(2024, 3, 13), date(2024, 3, 14), date(2024, 3, 15)]
        );
    }

    #[test]
    fn relative_span_of_zero_is_the_anchor_once() {
        let expr = DayRangeExpression::RelativeSpan {
            anchor: DayToken::Explicit(date(2024, 2, 29)),
            count: 0,
        };
        assert_eq!(
            resolve_range(&expr, today(), &[]).unwrap(),
            Resolution::Dates(vec![date(2024, 2, 29)])
        );
    }

    #[test]
    fn weeks_run_monday_to_sunday() {
        let this_week = dates_of("thisweek", &[]);
        assert_eq!(this_week.len(), 7);
        assert_eq!(this_week[0], date(2024, 3, 11));
        assert_eq!(this_week[6], date(2024, 3, 17));

        assert_eq!(dates_of("lastweek", &[])[0], date(2024, 3, 4));
        assert_eq!(dates_of("nextweek", &[])[6], date(2024, 3, 24));
    }

    #[test]
    fn week_of_a_sunday_starts_the_previous_monday() {
        let sunday = date(2024, 3, 17);
        assert_eq!(
            NamedSpan::ThisWeek.bounds(sunday).unwrap(),
            (date(2024, 3, 11), date(2024, 3, 17))
        );
    }

    #[test]
    fn month_and_year_spans() {
        let feb = dates_of("feb", &[]);
        assert_eq!(feb.first(), Some(&date(2024, 2, 1)));
        assert_eq!(feb.last(), Some(&date(2024, 2, 29)));

        let may_2023 = dates_of("2023/05", &[]);
        assert_eq!(may_2023.len(), 31);

        assert_eq!(dates_of("2023", &[]).len(), 365);
    }

    #[test]
    fn unknown_tags_fail() {
        assert!(matches!(
            NamedSpan::parse("fortnight"),
            Err(LnoteError::DayRangeFormat(_))
        ));
        assert!(matches!(
            NamedSpan::parse("fe"),
            Err(LnoteError::DayRangeFormat(_))
        ));
        assert!(matches!(
            NamedSpan::parse("2023/13"),
            Err(LnoteError::Calendar(_))
        ));
    }

    #[test]
    fn first_to_last_uses_existing_notebooks() {
        let existing = ids(&["2024-01-05", "2024-01-03", "ideas"]);
        assert_eq!(
            dates_of("first-last", &existing),
            vec![date(2024, 1, 3), date(2024, 1, 4), date(2024, 1, 5)]
        );
    }

    #[test]
    fn range_endpoint_cannot_be_a_name() {
        let expr = DayRangeExpression::ExplicitRange(
            RangeBound::Day(DayToken::NamedNotebook("ideas".into())),
            RangeBound::Day(DayToken::Today),
        );
        assert!(matches!(
            resolve_range(&expr, today(), &[]),
            Err(LnoteError::DayRangeFormat(_))
        ));
    }

    #[test]
    fn single_name_resolves_to_notebook() {
        assert_eq!(
            resolve_range(&parse("ideas"), today(), &[]).unwrap(),
            Resolution::Notebook(NotebookId::named("ideas").unwrap())
        );
    }

    #[test]
    fn comma_lists_merge_and_dedup() {
        let dates = resolve_ranges("2024-01-03,2024-01-01-2024-01-03,2024-01-02", today(), &[])
            .unwrap();
        assert_eq!(
            dates,
            vec![date(2024, 1, 1), date(2024, 1, 2), date(2024, 1, 3)]
        );
    }

    #[test]
    fn comma_lists_reject_names() {
        assert!(matches!(
            resolve_ranges("today,ideas", today(), &[]),
            Err(LnoteError::DayRangeFormat(_))
        ));
    }
}
