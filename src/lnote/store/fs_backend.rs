use super::backend::{NotebookStats, StorageBackend};
use crate::error::{LnoteError, Result};
use crate::notebook::{NotebookId, NotebookLayout};
use chrono::{DateTime, Utc};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub struct FsBackend {
    layout: NotebookLayout,
}

impl FsBackend {
    pub fn new(root: PathBuf) -> Self {
        Self {
            layout: NotebookLayout::new(root),
        }
    }

    pub fn with_file_ext(mut self, ext: &str) -> Self {
        self.layout = self.layout.with_file_ext(ext);
        self
    }

    pub fn layout(&self) -> &NotebookLayout {
        &self.layout
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).map_err(LnoteError::Io)?;
        }
        Ok(())
    }

    /// Regular, non-hidden files in a notebook directory.
    fn files_in(&self, id: &NotebookId) -> Result<Vec<(String, fs::Metadata)>> {
        let dir = self.layout.dir_for(id);
        if !dir.is_dir() {
            return Err(LnoteError::NotebookNotFound(id.to_string()));
        }
        let mut files = Vec::new();
        for entry in fs::read_dir(&dir).map_err(LnoteError::Io)? {
            let entry = entry.map_err(LnoteError::Io)?;
            let meta = entry.metadata().map_err(LnoteError::Io)?;
            if !meta.is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                if !name.starts_with('.') {
                    files.push((name.to_string(), meta));
                }
            }
        }
        files.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(files)
    }
}

impl StorageBackend for FsBackend {
    fn list_ids(&self) -> Result<Vec<NotebookId>> {
        let root = self.layout.root();
        if !root.exists() {
            return Ok(Vec::new());
        }

        let mut ids = Vec::new();
        for entry in fs::read_dir(root).map_err(LnoteError::Io)? {
            let entry = entry.map_err(LnoteError::Io)?;
            if !entry.path().is_dir() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                // Hidden and otherwise unaddressable directories are not notebooks.
                if let Ok(id) = NotebookId::named(name) {
                    ids.push(id);
                }
            }
        }
        ids.sort();
        Ok(ids)
    }

    fn exists(&self, id: &NotebookId) -> bool {
        self.layout.dir_for(id).is_dir()
    }

    fn create(&self, id: &NotebookId) -> Result<()> {
        if self.layout.dir_for(id).exists() {
            return Err(LnoteError::NotebookExists(id.to_string()));
        }
        self.write_content(id, "")
    }

    fn remove(&self, id: &NotebookId) -> Result<()> {
        let dir = self.layout.dir_for(id);
        if !dir.is_dir() {
            return Err(LnoteError::NotebookNotFound(id.to_string()));
        }
        fs::remove_dir_all(&dir).map_err(LnoteError::Io)?;
        debug!("removed {}", dir.display());
        Ok(())
    }

    fn rename(&self, from: &NotebookId, to: &NotebookId) -> Result<()> {
        let from_dir = self.layout.dir_for(from);
        let to_dir = self.layout.dir_for(to);
        if !from_dir.is_dir() {
            return Err(LnoteError::NotebookNotFound(from.to_string()));
        }
        if to_dir.exists() {
            return Err(LnoteError::RenameConflict {
                from: from.to_string(),
                to: to.to_string(),
            });
        }

        fs::rename(&from_dir, &to_dir).map_err(LnoteError::Io)?;

        // The fragment is named after its notebook.
        let moved_fragment = to_dir.join(self.layout.fragment_name(from));
        let fragment = self.layout.path_for(to);
        if moved_fragment.exists() && !fragment.exists() {
            fs::rename(&moved_fragment, &fragment).map_err(LnoteError::Io)?;
        }
        debug!("renamed {} to {}", from_dir.display(), to_dir.display());
        Ok(())
    }

    fn read_content(&self, id: &NotebookId) -> Result<Option<String>> {
        if !self.exists(id) {
            return Ok(None);
        }
        let path = self.layout.path_for(id);
        if !path.exists() {
            return Ok(Some(String::new()));
        }
        let content = fs::read_to_string(path).map_err(LnoteError::Io)?;
        Ok(Some(content))
    }

    fn write_content(&self, id: &NotebookId, content: &str) -> Result<()> {
        let dir = self.layout.dir_for(id);
        self.ensure_dir(&dir)?;

        let target_path = self.layout.path_for(id);

        // Atomic Write
        let tmp_path = dir.join(format!(".{}-{}.tmp", id, Uuid::new_v4()));
        fs::write(&tmp_path, content).map_err(LnoteError::Io)?;
        fs::rename(&tmp_path, &target_path).map_err(LnoteError::Io)?;
        debug!("wrote {} bytes to {}", content.len(), target_path.display());

        Ok(())
    }

    fn attachments(&self, id: &NotebookId) -> Result<Vec<String>> {
        let fragment = self.layout.fragment_name(id);
        Ok(self
            .files_in(id)?
            .into_iter()
            .map(|(name, _)| name)
            .filter(|name| *name != fragment)
            .collect())
    }

    fn read_attachment(&self, id: &NotebookId, name: &str) -> Result<Vec<u8>> {
        fs::read(self.layout.dir_for(id).join(name)).map_err(LnoteError::Io)
    }

    fn copy_attachment(&self, from: &NotebookId, to: &NotebookId, name: &str) -> Result<()> {
        let source = self.layout.dir_for(from).join(name);
        let dest_dir = self.layout.dir_for(to);
        self.ensure_dir(&dest_dir)?;
        fs::copy(&source, dest_dir.join(name)).map_err(LnoteError::Io)?;
        Ok(())
    }

    fn stats(&self, id: &NotebookId) -> Result<NotebookStats> {
        let files = self.files_in(id)?;
        let lines = self
            .read_content(id)?
            .map(|text| text.lines().count())
            .unwrap_or(0);
        let fragment = self.layout.fragment_name(id);
        let modified = files
            .iter()
            .find(|(name, _)| *name == fragment)
            .and_then(|(_, meta)| meta.modified().ok())
            .map(DateTime::<Utc>::from);

        Ok(NotebookStats {
            files: files.len(),
            lines,
            bytes: files.iter().map(|(_, meta)| meta.len()).sum(),
            modified,
        })
    }

    fn content_path(&self, id: &NotebookId) -> PathBuf {
        self.layout.path_for(id)
    }

    fn notebook_dir(&self, id: &NotebookId) -> PathBuf {
        self.layout.dir_for(id)
    }
}
