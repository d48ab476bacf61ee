//! Pattern → notebook identifier resolution.
//!
//! A pattern is tried as an exact existing identifier first, then as a
//! shell-style glob (`2024-01-*`, `proj?`) when it holds `*`, `?` or `[`,
//! and only then as a day or day-range expression. This keeps a notebook
//! literally named `feb` reachable even though `feb` is also a month.

use crate::calendar::CalendarDate;
use crate::day::{resolve_day, DayToken, ResolvedDay};
use crate::error::{LnoteError, Result};
use crate::notebook::NotebookId;
use crate::range::DayRangeExpression;
use crate::store::StorageBackend;
use glob::Pattern;
use log::debug;

const GLOB_CHARS: [char; 3] = ['*', '?', '['];

/// Resolves every pattern against the existing notebooks.
///
/// Range patterns select the existing date notebooks inside the range, in
/// ascending order; a range containing none selects nothing. A pattern that
/// cannot be resolved at all fails with `SelectNotebook` unless `forgiving`,
/// in which case it is skipped. The result holds each notebook once, at its
/// first position.
pub fn select_notebooks<B: StorageBackend>(
    backend: &B,
    patterns: &[String],
    today: CalendarDate,
    forgiving: bool,
) -> Result<Vec<NotebookId>> {
    let existing = backend.list_ids()?;
    let mut selected: Vec<NotebookId> = Vec::new();

    for pattern in patterns {
        let found = match select_pattern(pattern, today, &existing) {
            Ok(found) => found,
            Err(e) if forgiving => {
                debug!("skipping pattern {:?}: {}", pattern, e);
                continue;
            }
            Err(e) => return Err(e),
        };
        for id in found {
            if !selected.contains(&id) {
                selected.push(id);
            }
        }
    }
    Ok(selected)
}

fn select_pattern(
    pattern: &str,
    today: CalendarDate,
    existing: &[NotebookId],
) -> Result<Vec<NotebookId>> {
    if let Some(id) = existing.iter().find(|id| id.as_str() == pattern) {
        return Ok(vec![id.clone()]);
    }
    if pattern.contains(GLOB_CHARS) {
        return select_glob(pattern, existing);
    }

    let expr = DayRangeExpression::parse(pattern, today)?;
    match expr.bounds(today, existing)? {
        Some((lo, hi)) => Ok(existing
            .iter()
            .filter(|id| id.as_date().is_some_and(|d| lo <= d && d <= hi))
            .cloned()
            .collect()),
        // A name that didn't match any existing notebook.
        None => Err(LnoteError::SelectNotebook(pattern.to_string())),
    }
}

/// Existing identifiers matching a glob, in listing order. No match selects
/// nothing.
fn select_glob(pattern: &str, existing: &[NotebookId]) -> Result<Vec<NotebookId>> {
    let glob = Pattern::new(pattern)
        .map_err(|e| LnoteError::SelectNotebook(format!("{} ({})", pattern, e)))?;
    Ok(existing
        .iter()
        .filter(|id| glob.matches(id.as_str()))
        .cloned()
        .collect())
}

/// Picks the single notebook a write should go to.
///
/// No pattern means today. An existing identifier is used as is. A day token
/// picks its date notebook, creating it if needed. Any other name is a named
/// notebook, created only when `create_missing` is set.
pub fn select_notebook<B: StorageBackend>(
    backend: &B,
    pattern: Option<&str>,
    today: CalendarDate,
    create_missing: bool,
) -> Result<NotebookId> {
    let pattern = pattern.map(str::trim).filter(|p| !p.is_empty());
    let Some(pattern) = pattern else {
        return ensure_exists(backend, NotebookId::for_date(today));
    };

    let existing = backend.list_ids()?;
    if let Some(id) = existing.iter().find(|id| id.as_str() == pattern) {
        return Ok(id.clone());
    }

    let token = DayToken::parse(pattern, today)?;
    match resolve_day(&token, today, &existing)? {
        ResolvedDay::Date(date) => ensure_exists(backend, NotebookId::for_date(date)),
        ResolvedDay::Notebook(id) if create_missing => ensure_exists(backend, id),
        ResolvedDay::Notebook(_) => Err(LnoteError::SelectNotebook(pattern.to_string())),
    }
}

fn ensure_exists<B: StorageBackend>(backend: &B, id: NotebookId) -> Result<NotebookId> {
    if !backend.exists(&id) {
        debug!("creating notebook {}", id);
        backend.create(&id)?;
    }
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mem_backend::MemBackend;

    fn date(y: i32, m: u32, d: u32) -> CalendarDate {
        CalendarDate::new(y, m, d).unwrap()
    }

    fn today() -> CalendarDate {
        date(2024, 3, 15)
    }

    fn id(s: &str) -> NotebookId {
        NotebookId::named(s).unwrap()
    }

    fn backend_with(names: &[&str]) -> MemBackend {
        let backend = MemBackend::new();
        for name in names {
            backend.create(&id(name)).unwrap();
        }
        backend
    }

    fn patterns(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn exact_name_wins_over_month() {
        let backend = backend_with(&["feb", "2024-02-10"]);
        let ids = select_notebooks(&backend, &patterns(&["feb"]), today(), false).unwrap();
        assert_eq!(ids, vec![id("feb")]);
    }

    #[test]
    fn range_selects_existing_dates_in_order() {
        let backend = backend_with(&["2024-03-01", "2024-01-05", "ideas", "2023-12-31"]);
        let ids = select_notebooks(&backend, &patterns(&["2023-2024"]), today(), false).unwrap();
        assert_eq!(ids, vec![id("2023-12-31"), id("2024-01-05"), id("2024-03-01")]);
    }

    #[test]
    fn first_and_last_select_extremes() {
        let backend = backend_with(&["2024-01-05", "2024-03-01", "2023-12-31"]);
        let ids =
            select_notebooks(&backend, &patterns(&["first", "last"]), today(), false).unwrap();
        assert_eq!(ids, vec![id("2023-12-31"), id("2024-03-01")]);
    }

    #[test]
    fn duplicates_keep_first_position() {
        let backend = backend_with(&["2024-03-14", "2024-03-15"]);
        let ids = select_notebooks(
            &backend,
            &patterns(&["today", "-1", "yesterday"]),
            today(),
            false,
        )
        .unwrap();
        assert_eq!(ids, vec![id("2024-03-15"), id("2024-03-14")]);
    }

    #[test]
    fn empty_range_selects_nothing() {
        let backend = backend_with(&["2024-03-14"]);
        let ids = select_notebooks(&backend, &patterns(&["nextweek"]), today(), false).unwrap();
        assert!(ids.is_empty());
    }

    #[test]
    fn unknown_name_fails_unless_forgiving() {
        let backend = backend_with(&["ideas"]);
        assert!(matches!(
            select_notebooks(&backend, &patterns(&["missing"]), today(), false),
            Err(LnoteError::SelectNotebook(_))
        ));
        let ids = select_notebooks(&backend, &patterns(&["missing", "ideas"]), today(), true)
            .unwrap();
        assert_eq!(ids, vec![id("ideas")]);
    }

    #[test]
    fn globs_match_existing_identifiers() {
        let backend = backend_with(&[
            "2024-01-05",
            "2024-01-20",
            "2024-02-01",
            "project",
            "projects-old",
            "ideas",
        ]);
        let ids = select_notebooks(&backend, &patterns(&["2024-01-*"]), today(), false).unwrap();
        assert_eq!(ids, vec![id("2024-01-05"), id("2024-01-20")]);

        let ids = select_notebooks(&backend, &patterns(&["proj*"]), today(), false).unwrap();
        assert_eq!(ids, vec![id("project"), id("projects-old")]);

        let ids = select_notebooks(&backend, &patterns(&["2024-0?-01"]), today(), false).unwrap();
        assert_eq!(ids, vec![id("2024-02-01")]);

        let ids = select_notebooks(&backend, &patterns(&["zzz*"]), today(), false).unwrap();
        assert!(ids.is_empty());
    }

    #[test]
    fn malformed_glob_is_a_select_error() {
        let backend = backend_with(&["ideas"]);
        assert!(matches!(
            select_notebooks(&backend, &patterns(&["[ideas"]), today(), false),
            Err(LnoteError::SelectNotebook(_))
        ));
    }

    #[test]
    fn single_defaults_to_today_and_creates_it() {
        let backend = MemBackend::new();
        let selected = select_notebook(&backend, None, today(), false).unwrap();
        assert_eq!(selected, id("2024-03-15"));
        assert!(backend.exists(&selected));
    }

    #[test]
    fn single_day_token_creates_date_notebook() {
        let backend = MemBackend::new();
        let selected = select_notebook(&backend, Some("y"), today(), false).unwrap();
        assert_eq!(selected, id("2024-03-14"));
        assert!(backend.exists(&selected));
    }

    #[test]
    fn single_name_requires_create_missing() {
        let backend = MemBackend::new();
        assert!(matches!(
            select_notebook(&backend, Some("ideas"), today(), false),
            Err(LnoteError::SelectNotebook(_))
        ));
        let selected = select_notebook(&backend, Some("ideas"), today(), true).unwrap();
        assert_eq!(selected, id("ideas"));
        assert!(backend.exists(&selected));
    }

    #[test]
    fn single_invalid_date_is_a_calendar_error() {
        let backend = MemBackend::new();
        assert!(matches!(
            select_notebook(&backend, Some("2024-02-30"), today(), true),
            Err(LnoteError::Calendar(_))
        ));
    }
}
