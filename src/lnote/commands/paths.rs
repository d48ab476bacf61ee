use crate::commands::CmdResult;
use crate::error::{LnoteError, Result};
use crate::notebook::NotebookId;
use crate::store::StorageBackend;

/// The notebook directory of each notebook, or its text fragment when `tex` is set.
pub fn run<B: StorageBackend>(backend: &B, ids: &[NotebookId], tex: bool) -> Result<CmdResult> {
    let mut paths = Vec::with_capacity(ids.len());
    for id in ids {
        if !backend.exists(id) {
            return Err(LnoteError::NotebookNotFound(id.to_string()));
        }
        paths.push(if tex {
            backend.content_path(id)
        } else {
            backend.notebook_dir(id)
        });
    }
    Ok(CmdResult::default().with_notebook_paths(paths))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mem_backend::MemBackend;
    use std::path::PathBuf;

    fn id(s: &str) -> NotebookId {
        NotebookId::named(s).unwrap()
    }

    #[test]
    fn directory_or_fragment() {
        let backend = MemBackend::new();
        backend.create(&id("a")).unwrap();

        let dirs = run(&backend, &[id("a")], false).unwrap();
        assert_eq!(dirs.notebook_paths, vec![PathBuf::from("memory://a")]);

        let tex = run(&backend, &[id("a")], true).unwrap();
        assert_eq!(tex.notebook_paths, vec![PathBuf::from("memory://a/a.tex")]);
    }

    #[test]
    fn missing_notebook_fails() {
        let backend = MemBackend::new();
        assert!(run(&backend, &[id("a")], false).is_err());
    }
}
