use crate::commands::{CmdResult, ListedNotebook};
use crate::error::Result;
use crate::notebook::NotebookId;
use crate::store::StorageBackend;

/// Lists the given notebooks, or all of them when `ids` is `None`.
/// With `long`, each entry carries its [`NotebookStats`](crate::store::NotebookStats).
pub fn run<B: StorageBackend>(
    backend: &B,
    ids: Option<&[NotebookId]>,
    long: bool,
) -> Result<CmdResult> {
    let ids = match ids {
        Some(ids) => ids.to_vec(),
        None => backend.list_ids()?,
    };

    let mut listed = Vec::with_capacity(ids.len());
    for id in ids {
        let stats = if long { Some(backend.stats(&id)?) } else { None };
        listed.push(ListedNotebook { id, stats });
    }
    Ok(CmdResult::default().with_listed_notebooks(listed))
}
