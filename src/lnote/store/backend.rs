use crate::error::Result;
use crate::notebook::NotebookId;
use chrono::{DateTime, Utc};
use std::path::PathBuf;

/// Size and freshness of one notebook, for long listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotebookStats {
    /// Files in the notebook directory, the text fragment included.
    pub files: usize,
    pub lines: usize,
    /// Total size of every file in the notebook directory.
    pub bytes: u64,
    pub modified: Option<DateTime<Utc>>,
}

/// Abstract interface for raw notebook I/O.
/// This trait handles the "how" of storage (filesystem vs memory),
/// while the command layer handles the "what" (lines, prune, merge).
pub trait StorageBackend {
    // --- Discovery ---

    /// All existing notebooks, sorted by identifier.
    fn list_ids(&self) -> Result<Vec<NotebookId>>;

    fn exists(&self, id: &NotebookId) -> bool;

    // --- Lifecycle ---

    /// Creates an empty notebook. Fails with `NotebookExists` if it is already there.
    fn create(&self, id: &NotebookId) -> Result<()>;

    /// Removes the notebook with everything in it.
    fn remove(&self, id: &NotebookId) -> Result<()>;

    /// Moves a notebook to a new identifier.
    /// MUST fail with `RenameConflict` rather than replace an existing destination.
    fn rename(&self, from: &NotebookId, to: &NotebookId) -> Result<()>;

    // --- Content ---

    /// Read the text fragment.
    /// Returns Ok(None) if the notebook does not exist.
    /// Returns Err only on actual I/O errors.
    fn read_content(&self, id: &NotebookId) -> Result<Option<String>>;

    /// Replace the text fragment, creating the notebook if needed.
    /// MUST be atomic (e.g. write to tmp then rename) to avoid partial writes.
    fn write_content(&self, id: &NotebookId, content: &str) -> Result<()>;

    // --- Attachments ---

    /// File names stored beside the text fragment, sorted.
    fn attachments(&self, id: &NotebookId) -> Result<Vec<String>>;

    fn read_attachment(&self, id: &NotebookId, name: &str) -> Result<Vec<u8>>;

    /// Copies attachment `name` from one notebook into another, keeping its name.
    fn copy_attachment(&self, from: &NotebookId, to: &NotebookId, name: &str) -> Result<()>;

    // --- Paths & Metadata ---

    fn stats(&self, id: &NotebookId) -> Result<NotebookStats>;

    /// Path of the text fragment.
    /// For FsBackend, this is the real path. For MemBackend, a virtual path.
    fn content_path(&self, id: &NotebookId) -> PathBuf;

    /// Directory holding the text fragment and its attachments.
    fn notebook_dir(&self, id: &NotebookId) -> PathBuf;
}
