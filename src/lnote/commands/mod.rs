//! # Command Layer
//!
//! This module contains the **core business logic** of lnote. Each command lives
//! in its own submodule and implements pure Rust functions over a
//! [`StorageBackend`](crate::store::StorageBackend).
//!
//! ## Role and Responsibilities
//!
//! - Implement the notebook content model: append, prune, merge
//! - Address notebooks through resolved identifiers, never raw paths
//! - Return structured [`CmdResult`] values with affected notebooks and messages
//! - Stay completely UI-agnostic
//!
//! ## What Commands Do NOT Do
//!
//! - **Terminal I/O**: no stdout, stderr or prompts
//! - **Argument parsing**: raw strings are turned into identifiers by
//!   [`select`] and the API facade
//! - **Exit codes**: return `Result`, let the caller decide
//! - **Clock reads**: "today" always arrives as a parameter
//!
//! ## Content Model
//!
//! A notebook's text is an ordered sequence of lines. On disk every line is
//! terminated; an empty fragment has zero lines. A fragment whose first line
//! ends in `\r\n` keeps `\r\n` endings when rewritten, any other gets `\n`.
//! A missing final terminator is added by the first write. Only append, prune
//! and merge change those lines, and only delete destroys a notebook.
//!
//! ## Testing Strategy
//!
//! Command tests use [`MemBackend`](crate::store::mem_backend::MemBackend) so
//! every branch runs without the filesystem.
//!
//! ## Command Modules
//!
//! - [`select`]: Turn patterns and day tokens into notebook identifiers
//! - [`create`]: Create empty notebooks or copies of a template
//! - [`append`]: Add lines at the end
//! - [`prune`]: Remove lines from either end
//! - [`merge`]: Concatenate notebooks into a destination
//! - [`rename`]: Move a notebook without overwriting
//! - [`delete`]: Explicitly destroy notebooks
//! - [`list`]: List notebooks with optional stats
//! - [`view`]: Read notebook content
//! - [`export`]: Write a standalone LaTeX document
//! - [`paths`]: Report notebook paths
//! - [`config`]: Show and change configuration

use crate::config::LnoteConfig;
use crate::error::{LnoteError, Result};
use crate::notebook::NotebookId;
use crate::store::{NotebookStats, StorageBackend};
use std::path::PathBuf;

pub mod append;
pub mod config;
pub mod create;
pub mod delete;
pub mod export;
pub mod list;
pub mod merge;
pub mod paths;
pub mod prune;
pub mod rename;
pub mod select;
pub mod view;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// A notebook as shown by `list`.
#[derive(Debug, Clone)]
pub struct ListedNotebook {
    pub id: NotebookId,
    /// Present for long listings only.
    pub stats: Option<NotebookStats>,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    /// Notebooks created or modified by the command.
    pub affected_notebooks: Vec<NotebookId>,
    pub listed_notebooks: Vec<ListedNotebook>,
    pub notebook_paths: Vec<PathBuf>,
    /// Lines handed back to the UI, e.g. the ones a prune removed.
    pub lines: Vec<String>,
    /// Text for display, e.g. the content `view` read.
    pub text: Option<String>,
    pub config: Option<LnoteConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_notebooks(mut self, ids: Vec<NotebookId>) -> Self {
        self.affected_notebooks = ids;
        self
    }

    pub fn with_listed_notebooks(mut self, notebooks: Vec<ListedNotebook>) -> Self {
        self.listed_notebooks = notebooks;
        self
    }

    pub fn with_notebook_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.notebook_paths = paths;
        self
    }

    pub fn with_config(mut self, config: LnoteConfig) -> Self {
        self.config = Some(config);
        self
    }
}

pub(crate) fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

/// The lines of an existing notebook.
pub(crate) fn read_lines<B: StorageBackend>(backend: &B, id: &NotebookId) -> Result<Vec<String>> {
    let text = backend
        .read_content(id)?
        .ok_or_else(|| LnoteError::NotebookNotFound(id.to_string()))?;
    Ok(text.lines().map(str::to_string).collect())
}

pub(crate) fn write_lines<B: StorageBackend>(
    backend: &B,
    id: &NotebookId,
    lines: &[String],
) -> Result<()> {
    let ending = backend
        .read_content(id)?
        .map_or("\n", |text| line_ending(&text));
    backend.write_content(id, &join_lines_with(lines, ending))
}

/// `\r\n` when the first line of `text` ends that way, `\n` otherwise.
pub(crate) fn line_ending(text: &str) -> &'static str {
    match text.find('\n') {
        Some(i) if text[..i].ends_with('\r') => "\r\n",
        _ => "\n",
    }
}

pub(crate) fn join_lines(lines: &[String]) -> String {
    join_lines_with(lines, "\n")
}

fn join_lines_with(lines: &[String], ending: &str) -> String {
    let mut text = String::with_capacity(lines.iter().map(|l| l.len() + ending.len()).sum());
    for line in lines {
        text.push_str(line);
        text.push_str(ending);
    }
    text
}

/// Concatenates chunks of lines, one blank line between non-empty chunks.
pub(crate) fn concat_chunks(chunks: impl IntoIterator<Item = Vec<String>>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for chunk in chunks.into_iter().filter(|c| !c.is_empty()) {
        if !out.is_empty() {
            out.push(String::new());
        }
        out.extend(chunk);
    }
    out
}
