use crate::commands::{plural, read_lines, write_lines, CmdMessage, CmdResult};
use crate::error::{LnoteError, Result};
use crate::notebook::NotebookId;
use crate::store::StorageBackend;
use log::debug;

/// Removes `|count|` lines: from the end for a positive count, from the
/// beginning for a negative one. The removed lines come back in
/// [`CmdResult::lines`].
///
/// Asking for more lines than the notebook has fails with `PruneRange` and
/// writes nothing.
pub fn run<B: StorageBackend>(backend: &B, id: &NotebookId, count: i64) -> Result<CmdResult> {
    let mut lines = read_lines(backend, id)?;
    let mut result = CmdResult::default();

    if count == 0 {
        result.add_message(CmdMessage::info(format!("Nothing pruned from {}", id)));
        return Ok(result);
    }

    let removed = cut(&mut lines, id, count)?;
    write_lines(backend, id, &lines)?;
    debug!("pruned {} line(s) from {}", removed.len(), id);

    result.add_message(CmdMessage::success(format!(
        "Pruned {} line{} from the {} of {}",
        removed.len(),
        plural(removed.len()),
        if count > 0 { "end" } else { "beginning" },
        id
    )));
    result.affected_notebooks.push(id.clone());
    result.lines = removed;
    Ok(result)
}

/// The lines `run` would remove, without removing them.
pub fn preview<B: StorageBackend>(backend: &B, id: &NotebookId, count: i64) -> Result<Vec<String>> {
    let mut lines = read_lines(backend, id)?;
    cut(&mut lines, id, count)
}

fn cut(lines: &mut Vec<String>, id: &NotebookId, count: i64) -> Result<Vec<String>> {
    let requested = usize::try_from(count.unsigned_abs()).unwrap_or(usize::MAX);
    if requested > lines.len() {
        return Err(LnoteError::PruneRange {
            notebook: id.to_string(),
            requested,
            available: lines.len(),
        });
    }
    Ok(if count >= 0 {
        lines.split_off(lines.len() - requested)
    } else {
        lines.drain(..requested).collect()
    })
}
