use super::backend::{NotebookStats, StorageBackend};
use crate::error::{LnoteError, Result};
use crate::notebook::{NotebookId, DEFAULT_FILE_EXT};
use chrono::{DateTime, Utc};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Clone, Default)]
struct MemNotebook {
    text: String,
    attachments: BTreeMap<String, Vec<u8>>,
    mtime: Option<DateTime<Utc>>,
}

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since lnote is single-threaded.
/// This keeps every `StorageBackend` method on `&self`.
#[derive(Default)]
pub struct MemBackend {
    notebooks: RefCell<BTreeMap<NotebookId, MemNotebook>>,
    simulate_write_error: RefCell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    /// Test helper: drop a file next to a notebook's text fragment.
    pub fn add_attachment(&self, id: &NotebookId, name: &str, data: &[u8]) {
        self.notebooks
            .borrow_mut()
            .entry(id.clone())
            .or_default()
            .attachments
            .insert(name.to_string(), data.to_vec());
    }

    fn check_write(&self) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(LnoteError::Store("Simulated write error".to_string()));
        }
        Ok(())
    }
}

impl StorageBackend for MemBackend {
    fn list_ids(&self) -> Result<Vec<NotebookId>> {
        Ok(self.notebooks.borrow().keys().cloned().collect())
    }

    fn exists(&self, id: &NotebookId) -> bool {
        self.notebooks.borrow().contains_key(id)
    }

    fn create(&self, id: &NotebookId) -> Result<()> {
        self.check_write()?;
        let mut notebooks = self.notebooks.borrow_mut();
        if notebooks.contains_key(id) {
            return Err(LnoteError::NotebookExists(id.to_string()));
        }
        notebooks.insert(
            id.clone(),
            MemNotebook {
                mtime: Some(Utc::now()),
                ..Default::default()
            },
        );
        Ok(())
    }

    fn remove(&self, id: &NotebookId) -> Result<()> {
        self.check_write()?;
        self.notebooks
            .borrow_mut()
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| LnoteError::NotebookNotFound(id.to_string()))
    }

    fn rename(&self, from: &NotebookId, to: &NotebookId) -> Result<()> {
        self.check_write()?;
        let mut notebooks = self.notebooks.borrow_mut();
        if !notebooks.contains_key(from) {
            return Err(LnoteError::NotebookNotFound(from.to_string()));
        }
        if notebooks.contains_key(to) {
            return Err(LnoteError::RenameConflict {
                from: from.to_string(),
                to: to.to_string(),
            });
        }
        if let Some(notebook) = notebooks.remove(from) {
            notebooks.insert(to.clone(), notebook);
        }
        Ok(())
    }

    fn read_content(&self, id: &NotebookId) -> Result<Option<String>> {
        Ok(self.notebooks.borrow().get(id).map(|nb| nb.text.clone()))
    }

    fn write_content(&self, id: &NotebookId, content: &str) -> Result<()> {
        self.check_write()?;
        let mut notebooks = self.notebooks.borrow_mut();
        let notebook = notebooks.entry(id.clone()).or_default();
        notebook.text = content.to_string();
        notebook.mtime = Some(Utc::now());
        Ok(())
    }

    fn attachments(&self, id: &NotebookId) -> Result<Vec<String>> {
        self.notebooks
            .borrow()
            .get(id)
            .map(|nb| nb.attachments.keys().cloned().collect())
            .ok_or_else(|| LnoteError::NotebookNotFound(id.to_string()))
    }

    fn read_attachment(&self, id: &NotebookId, name: &str) -> Result<Vec<u8>> {
        self.notebooks
            .borrow()
            .get(id)
            .and_then(|nb| nb.attachments.get(name))
            .cloned()
            .ok_or_else(|| LnoteError::Store(format!("no attachment {} in {}", name, id)))
    }

    fn copy_attachment(&self, from: &NotebookId, to: &NotebookId, name: &str) -> Result<()> {
        self.check_write()?;
        let data = self.read_attachment(from, name)?;
        self.notebooks
            .borrow_mut()
            .entry(to.clone())
            .or_default()
            .attachments
            .insert(name.to_string(), data);
        Ok(())
    }

    fn stats(&self, id: &NotebookId) -> Result<NotebookStats> {
        let notebooks = self.notebooks.borrow();
        let nb = notebooks
            .get(id)
            .ok_or_else(|| LnoteError::NotebookNotFound(id.to_string()))?;
        Ok(NotebookStats {
            files: 1 + nb.attachments.len(),
            lines: nb.text.lines().count(),
            bytes: nb.text.len() as u64
                + nb.attachments.values().map(|d| d.len() as u64).sum::<u64>(),
            modified: nb.mtime,
        })
    }

    fn content_path(&self, id: &NotebookId) -> PathBuf {
        self.notebook_dir(id)
            .join(format!("{}{}", id, DEFAULT_FILE_EXT))
    }

    fn notebook_dir(&self, id: &NotebookId) -> PathBuf {
        PathBuf::from(format!("memory://{}", id))
    }
}
