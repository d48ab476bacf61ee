use crate::commands::{CmdMessage, CmdResult};
use crate::error::{LnoteError, Result};
use crate::notebook::{rename_target, NotebookId, RenamePolicy};
use crate::store::StorageBackend;

/// Moves a notebook to a new identifier. An occupied destination is never
/// overwritten: depending on `policy` the rename fails or picks a free name.
pub fn run<B: StorageBackend>(
    backend: &B,
    from: &NotebookId,
    to: &NotebookId,
    policy: RenamePolicy,
) -> Result<CmdResult> {
    if !backend.exists(from) {
        return Err(LnoteError::NotebookNotFound(from.to_string()));
    }
    let mut result = CmdResult::default();
    if from == to {
        result.add_message(CmdMessage::info(format!("{} is already named {}", from, to)));
        return Ok(result);
    }

    let target = rename_target(from, to, policy, |candidate| backend.exists(candidate))?;
    backend.rename(from, &target)?;

    if &target != to {
        result.add_message(CmdMessage::warning(format!(
            "{} is taken, used {} instead",
            to, target
        )));
    }
    result.add_message(CmdMessage::success(format!(
        "Renamed {} to {}",
        from, target
    )));
    result.affected_notebooks.push(target);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mem_backend::MemBackend;

    fn id(s: &str) -> NotebookId {
        NotebookId::named(s).unwrap()
    }

    fn setup() -> MemBackend {
        let backend = MemBackend::new();
        backend.write_content(&id("a"), "alpha\n").unwrap();
        backend.write_content(&id("b"), "beta\n").unwrap();
        backend
    }

    #[test]
    fn renames_to_free_name() {
        let backend = setup();
        let res = run(&backend, &id("a"), &id("c"), RenamePolicy::Fail).unwrap();
        assert_eq!(res.affected_notebooks, vec![id("c")]);
        assert!(!backend.exists(&id("a")));
        assert_eq!(backend.read_content(&id("c")).unwrap().unwrap(), "alpha\n");
    }

    #[test]
    fn conflict_leaves_both_notebooks_intact() {
        let backend = setup();
        assert!(matches!(
            run(&backend, &id("a"), &id("b"), RenamePolicy::Fail),
            Err(LnoteError::RenameConflict { .. })
        ));
        assert_eq!(backend.read_content(&id("a")).unwrap().unwrap(), "alpha\n");
        assert_eq!(backend.read_content(&id("b")).unwrap().unwrap(), "beta\n");
    }

    #[test]
    fn uniquify_picks_a_free_name() {
        let backend = setup();
        let res = run(&backend, &id("a"), &id("b"), RenamePolicy::Uniquify).unwrap();
        assert_eq!(res.affected_notebooks, vec![id("b-1")]);
        assert_eq!(backend.read_content(&id("b")).unwrap().unwrap(), "beta\n");
        assert_eq!(backend.read_content(&id("b-1")).unwrap().unwrap(), "alpha\n");
    }

    #[test]
    fn missing_source_fails() {
        let backend = setup();
        assert!(matches!(
            run(&backend, &id("zzz"), &id("c"), RenamePolicy::Fail),
            Err(LnoteError::NotebookNotFound(_))
        ));
    }
}
