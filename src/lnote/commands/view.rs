use crate::commands::{concat_chunks, join_lines, read_lines, CmdResult};
use crate::error::Result;
use crate::notebook::NotebookId;
use crate::store::StorageBackend;

/// Reads the notebooks' content, concatenated the same way `merge` would.
/// Nothing is written.
pub fn run<B: StorageBackend>(backend: &B, ids: &[NotebookId]) -> Result<CmdResult> {
    let chunks = ids
        .iter()
        .map(|id| read_lines(backend, id))
        .collect::<Result<Vec<_>>>()?;
    let paths = ids.iter().map(|id| backend.content_path(id)).collect();

    let mut result = CmdResult::default().with_notebook_paths(paths);
    result.text = Some(join_lines(&concat_chunks(chunks)));
    Ok(result)
}
