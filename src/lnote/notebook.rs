//! # Notebook Addressing
//!
//! A notebook is identified by a [`NotebookId`]: either the canonical
//! `YYYY-MM-DD` string of a calendar date, or a free-form name supplied by the
//! user. Because date identifiers are zero-padded, sorting identifiers as
//! strings sorts date notebooks chronologically; `first`/`last` rely on this.
//!
//! ## On-disk layout
//!
//! ```text
//! $LNOTE_DIR/
//! ├── config.json
//! ├── 2024-01-05/
//! │   ├── 2024-01-05.tex      # the text fragment
//! │   └── plot.png            # attachments live beside it
//! └── ideas/
//!     └── ideas.tex
//! ```
//!
//! Listing the directory reconstructs the set of existing notebooks.

use crate::calendar::CalendarDate;
use crate::error::{LnoteError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

pub const DEFAULT_FILE_EXT: &str = ".tex";

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NotebookId(String);

impl NotebookId {
    pub fn for_date(date: CalendarDate) -> Self {
        Self(date.to_string())
    }

    /// A user-chosen name. It becomes a directory name, so anything that could
    /// escape the notebooks directory or hide the notebook is rejected.
    pub fn named(name: &str) -> Result<Self> {
        let invalid = name.is_empty()
            || name.starts_with('.')
            || name.contains(['/', '\\', '\0'])
            || name.trim() != name;
        if invalid {
            return Err(LnoteError::InvalidName(name.to_string()));
        }
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The date this notebook is named after, if its identifier is a
    /// canonical date string.
    pub fn as_date(&self) -> Option<CalendarDate> {
        self.0.parse().ok()
    }

    pub fn is_date(&self) -> bool {
        self.as_date().is_some()
    }
}

impl fmt::Display for NotebookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for NotebookId {
    type Error = LnoteError;

    fn try_from(name: String) -> Result<Self> {
        Self::named(&name)
    }
}

impl From<NotebookId> for String {
    fn from(id: NotebookId) -> Self {
        id.0
    }
}

impl From<CalendarDate> for NotebookId {
    fn from(date: CalendarDate) -> Self {
        Self::for_date(date)
    }
}

/// What to do when a rename target is already taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenamePolicy {
    /// Fail with [`LnoteError::RenameConflict`].
    #[default]
    Fail,
    /// Pick the first free `<name>-<n>`.
    Uniquify,
}

/// Picks the identifier a rename should actually use, given which identifiers
/// are taken.
pub fn rename_target(
    from: &NotebookId,
    to: &NotebookId,
    policy: RenamePolicy,
    is_taken: impl Fn(&NotebookId) -> bool,
) -> Result<NotebookId> {
    if !is_taken(to) {
        return Ok(to.clone());
    }
    match policy {
        RenamePolicy::Fail => Err(LnoteError::RenameConflict {
            from: from.to_string(),
            to: to.to_string(),
        }),
        RenamePolicy::Uniquify => (1..)
            .map(|n| NotebookId(format!("{}-{}", to, n)))
            .find(|candidate| !is_taken(candidate))
            .ok_or_else(|| LnoteError::Store(format!("no free name derived from {}", to))),
    }
}

/// Maps identifiers to filesystem paths under a notebooks directory.
#[derive(Debug, Clone)]
pub struct NotebookLayout {
    root: PathBuf,
    file_ext: String,
}

impl NotebookLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            file_ext: DEFAULT_FILE_EXT.to_string(),
        }
    }

    pub fn with_file_ext(mut self, ext: &str) -> Self {
        if ext.starts_with('.') {
            self.file_ext = ext.to_string();
        } else {
            self.file_ext = format!(".{}", ext);
        }
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn file_ext(&self) -> &str {
        &self.file_ext
    }

    pub fn dir_for(&self, id: &NotebookId) -> PathBuf {
        self.root.join(id.as_str())
    }

    pub fn path_for(&self, id: &NotebookId) -> PathBuf {
        self.dir_for(id)
            .join(format!("{}{}", id.as_str(), self.file_ext))
    }

    /// The text fragment's file name inside its notebook directory.
    pub fn fragment_name(&self, id: &NotebookId) -> String {
        format!("{}{}", id.as_str(), self.file_ext)
    }
}
