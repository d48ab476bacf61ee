use crate::commands::{CmdMessage, CmdResult};
use crate::error::{LnoteError, Result};
use crate::notebook::NotebookId;
use crate::store::StorageBackend;

/// Destroys notebooks with their attachments. Every identifier is checked
/// before anything is removed, so a typo deletes nothing.
pub fn run<B: StorageBackend>(backend: &B, ids: &[NotebookId], dry_run: bool) -> Result<CmdResult> {
    if let Some(missing) = ids.iter().find(|id| !backend.exists(id)) {
        return Err(LnoteError::NotebookNotFound(missing.to_string()));
    }

    let mut result = CmdResult::default();
    for id in ids {
        if dry_run {
            result.add_message(CmdMessage::info(format!("Would delete {}", id)));
            continue;
        }
        backend.remove(id)?;
        result.add_message(CmdMessage::success(format!("Notebook deleted: {}", id)));
        result.affected_notebooks.push(id.clone());
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mem_backend::MemBackend;

    fn id(s: &str) -> NotebookId {
        NotebookId::named(s).unwrap()
    }

    #[test]
    fn deletes_notebooks() {
        let backend = MemBackend::new();
        backend.create(&id("a")).unwrap();
        backend.create(&id("b")).unwrap();
        let res = run(&backend, &[id("a")], false).unwrap();
        assert_eq!(res.affected_notebooks, vec![id("a")]);
        assert!(!backend.exists(&id("a")));
        assert!(backend.exists(&id("b")));
    }

    #[test]
    fn dry_run_keeps_everything() {
        let backend = MemBackend::new();
        backend.create(&id("a")).unwrap();
        let res = run(&backend, &[id("a")], true).unwrap();
        assert!(res.affected_notebooks.is_empty());
        assert!(res.messages[0].content.contains("Would delete a"));
        assert!(backend.exists(&id("a")));
    }

    #[test]
    fn unknown_id_deletes_nothing() {
        let backend = MemBackend::new();
        backend.create(&id("a")).unwrap();
        assert!(matches!(
            run(&backend, &[id("a"), id("nope")], false),
            Err(LnoteError::NotebookNotFound(_))
        ));
        assert!(backend.exists(&id("a")));
    }
}
