//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It is the single
//! entry point for lnote operations, regardless of the UI being used.
//!
//! ## Role and Responsibilities
//!
//! - **Dispatches** to the appropriate command function
//! - **Normalizes inputs**: raw patterns and day tokens become [`NotebookId`]s
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: that belongs in `commands/*.rs`
//! - **I/O to the terminal**: no stdout, stderr, or prompts
//! - **Clock reads**: "today" is fixed when the facade is built
//!
//! ## Patterns
//!
//! Commands that read notebooks take patterns and go through
//! [`commands::select::select_notebooks`]: an existing identifier, a day
//! (`today`, `y`, `2024-01-05`), or a day range (`-7`, `jan-mar`,
//! `thisweek`). With no pattern they act on today's notebook.
//!
//! Commands that add to one notebook take a single optional target and go
//! through [`commands::select::select_notebook`]. Prune only touches a
//! notebook that already exists.
//!
//! ## Generic Over StorageBackend
//!
//! - Production: `LnoteApi<FsBackend>`
//! - Testing: `LnoteApi<MemBackend>`

use crate::calendar::CalendarDate;
use crate::commands::{self, config::ConfigAction, select, CmdMessage, CmdResult};
use crate::day::{resolve_day, DayToken, ResolvedDay};
use crate::error::{LnoteError, Result};
use crate::notebook::{NotebookId, RenamePolicy};
use crate::range::resolve_ranges;
use crate::store::StorageBackend;
use std::fs;
use std::path::{Path, PathBuf};

/// Hidden, so never listed as a notebook.
const VIEW_DIR: &str = ".view";

/// The main API facade for lnote operations.
pub struct LnoteApi<B: StorageBackend> {
    backend: B,
    today: CalendarDate,
    data_dir: PathBuf,
}

impl<B: StorageBackend> LnoteApi<B> {
    /// `today` anchors every relative token for the lifetime of the facade.
    pub fn new(backend: B, today: CalendarDate, data_dir: PathBuf) -> Self {
        Self {
            backend,
            today,
            data_dir,
        }
    }

    pub fn today(&self) -> CalendarDate {
        self.today
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    // --- Resolution ---

    /// Resolves patterns to existing notebooks. An empty list means today.
    pub fn select<I: AsRef<str>>(&self, patterns: &[I], forgiving: bool) -> Result<Vec<NotebookId>> {
        let patterns = patterns_or_today(patterns);
        select::select_notebooks(&self.backend, &patterns, self.today, forgiving)
    }

    /// Like [`Self::select`], but an empty selection is an error.
    fn select_some<I: AsRef<str>>(&self, patterns: &[I]) -> Result<Vec<NotebookId>> {
        let ids = self.select(patterns, false)?;
        if ids.is_empty() {
            return Err(LnoteError::Api("No notebook selected".to_string()));
        }
        Ok(ids)
    }

    /// Exactly one existing notebook.
    fn select_exactly_one(&self, pattern: &str) -> Result<NotebookId> {
        let mut ids = self.select(&[pattern], false)?;
        match ids.len() {
            0 => Err(LnoteError::SelectNotebook(pattern.to_string())),
            1 => Ok(ids.remove(0)),
            n => Err(LnoteError::Api(format!(
                "Pattern {} matches {} notebooks, expected one",
                pattern, n
            ))),
        }
    }

    /// The identifier a name or day token stands for, whether or not the
    /// notebook exists. Nothing is created.
    pub fn target_id(&self, pattern: &str) -> Result<NotebookId> {
        let pattern = pattern.trim();
        let existing = self.backend.list_ids()?;
        if let Some(id) = existing.iter().find(|id| id.as_str() == pattern) {
            return Ok(id.clone());
        }
        let token = DayToken::parse(pattern, self.today)?;
        match resolve_day(&token, self.today, &existing)? {
            ResolvedDay::Date(date) => Ok(NotebookId::for_date(date)),
            ResolvedDay::Notebook(id) => Ok(id),
        }
    }

    /// The notebook a pattern (today when absent) names, which must already exist.
    fn existing_target(&self, pattern: Option<&str>) -> Result<NotebookId> {
        let id = match pattern.map(str::trim).filter(|p| !p.is_empty()) {
            Some(pattern) => self.target_id(pattern)?,
            None => NotebookId::for_date(self.today),
        };
        if !self.backend.exists(&id) {
            return Err(LnoteError::NotebookNotFound(id.to_string()));
        }
        Ok(id)
    }

    /// Every date a comma-separated list of day-range expressions covers.
    pub fn dates(&self, expression: &str) -> Result<Vec<CalendarDate>> {
        let existing = self.backend.list_ids()?;
        resolve_ranges(expression, self.today, &existing)
    }

    // --- Lifecycle ---

    pub fn create_notebooks<I: AsRef<str>>(
        &self,
        names: &[I],
        template: Option<&str>,
    ) -> Result<CmdResult> {
        let ids = names
            .iter()
            .map(|n| self.target_id(n.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        let template = template.map(|t| self.select_exactly_one(t)).transpose()?;
        commands::create::run(&self.backend, &ids, template.as_ref())
    }

    pub fn rename_notebook(&self, from: &str, to: &str, policy: RenamePolicy) -> Result<CmdResult> {
        let from = self.select_exactly_one(from)?;
        let to = self.target_id(to)?;
        commands::rename::run(&self.backend, &from, &to, policy)
    }

    /// With `forgiving`, patterns that select nothing are ignored.
    pub fn delete_notebooks<I: AsRef<str>>(
        &self,
        patterns: &[I],
        dry_run: bool,
        forgiving: bool,
    ) -> Result<CmdResult> {
        if patterns.is_empty() {
            return Err(LnoteError::Api("No notebook given".to_string()));
        }
        let ids = self.select(patterns, forgiving)?;
        commands::delete::run(&self.backend, &ids, dry_run)
    }

    // --- Content ---

    pub fn append_text(&self, target: Option<&str>, text: &str) -> Result<CmdResult> {
        let id = select::select_notebook(&self.backend, target, self.today, true)?;
        commands::append::append_text(&self.backend, &id, text)
    }

    pub fn append_lines(&self, target: Option<&str>, lines: &[String]) -> Result<CmdResult> {
        let id = select::select_notebook(&self.backend, target, self.today, true)?;
        commands::append::run(&self.backend, &id, lines)
    }

    pub fn linebreak(&self, target: Option<&str>, count: usize) -> Result<CmdResult> {
        self.append_lines(target, &vec![String::new(); count])
    }

    pub fn prune(&self, target: Option<&str>, count: i64) -> Result<CmdResult> {
        let id = self.existing_target(target)?;
        commands::prune::run(&self.backend, &id, count)
    }

    /// The notebook a prune would touch and the lines it would remove.
    pub fn prune_preview(&self, target: Option<&str>, count: i64) -> Result<(NotebookId, Vec<String>)> {
        let id = self.existing_target(target)?;
        let lines = commands::prune::preview(&self.backend, &id, count)?;
        Ok((id, lines))
    }

    pub fn merge<I: AsRef<str>>(&self, sources: &[I], destination: &str) -> Result<CmdResult> {
        if sources.is_empty() {
            return Err(LnoteError::Api("No notebooks to merge".to_string()));
        }
        let sources = self.select_some(sources)?;
        let destination = self.target_id(destination)?;
        commands::merge::run(&self.backend, &sources, &destination)
    }

    // --- Reading ---

    pub fn list<I: AsRef<str>>(&self, patterns: &[I], long: bool) -> Result<CmdResult> {
        if patterns.is_empty() {
            return commands::list::run(&self.backend, None, long);
        }
        let ids = self.select(patterns, false)?;
        commands::list::run(&self.backend, Some(&ids), long)
    }

    pub fn view<I: AsRef<str>>(&self, patterns: &[I]) -> Result<CmdResult> {
        let ids = self.select_some(patterns)?;
        commands::view::run(&self.backend, &ids)
    }

    pub fn export<I: AsRef<str>>(
        &self,
        patterns: &[I],
        output: &Path,
        preamble: Option<&str>,
    ) -> Result<CmdResult> {
        let ids = self.select_some(patterns)?;
        commands::export::run(&self.backend, &ids, output, preamble)
    }

    /// Exports as [`Self::export`], then compiles the document with `latex`.
    /// The PDF path is the last entry of `notebook_paths`.
    pub fn export_pdf<I: AsRef<str>>(
        &self,
        patterns: &[I],
        output: &Path,
        preamble: Option<&str>,
        latex: &str,
    ) -> Result<CmdResult> {
        let mut result = self.export(patterns, output, preamble)?;
        let pdf = commands::export::compile_pdf(latex, output)?;
        result.add_message(CmdMessage::success(format!("Compiled {}", pdf.display())));
        result.notebook_paths.push(pdf);
        Ok(result)
    }

    /// Compiles the selection into `.view/` under the data directory,
    /// replacing the previous one, for display in a PDF viewer.
    pub fn view_pdf<I: AsRef<str>>(
        &self,
        patterns: &[I],
        preamble: Option<&str>,
        latex: &str,
    ) -> Result<CmdResult> {
        let patterns = patterns_or_today(patterns);
        let view_dir = self.data_dir.join(VIEW_DIR);
        if view_dir.exists() {
            fs::remove_dir_all(&view_dir)?;
        }
        fs::create_dir_all(&view_dir)?;
        self.export_pdf(&patterns, &view_dir.join("view.tex"), preamble, latex)
    }

    pub fn paths<I: AsRef<str>>(&self, patterns: &[I], tex: bool) -> Result<CmdResult> {
        let ids = self.select_some(patterns)?;
        commands::paths::run(&self.backend, &ids, tex)
    }

    /// Text fragment paths to open in an editor. No pattern means today's
    /// notebook, which is created if needed.
    pub fn edit_paths<I: AsRef<str>>(&self, patterns: &[I]) -> Result<CmdResult> {
        if patterns.is_empty() {
            let id = select::select_notebook(&self.backend, None, self.today, false)?;
            return commands::paths::run(&self.backend, &[id], true);
        }
        self.paths(patterns, true)
    }

    // --- Configuration ---

    pub fn config(&self, action: ConfigAction) -> Result<CmdResult> {
        commands::config::run(&self.data_dir, action)
    }
}

fn patterns_or_today<I: AsRef<str>>(patterns: &[I]) -> Vec<String> {
    if patterns.is_empty() {
        vec!["today".to_string()]
    } else {
        patterns.iter().map(|p| p.as_ref().to_string()).collect()
    }
}
