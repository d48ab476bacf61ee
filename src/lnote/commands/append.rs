use crate::commands::{read_lines, write_lines, CmdMessage, CmdResult};
use crate::error::Result;
use crate::notebook::NotebookId;
use crate::store::StorageBackend;
use log::debug;

/// Adds `lines` at the end of the notebook, creating it if absent.
pub fn run<B: StorageBackend>(backend: &B, id: &NotebookId, lines: &[String]) -> Result<CmdResult> {
    let mut content = if backend.exists(id) {
        read_lines(backend, id)?
    } else {
        Vec::new()
    };
    content.extend(lines.iter().cloned());
    write_lines(backend, id, &content)?;
    debug!("appended {} line(s) to {}", lines.len(), id);

    let mut result = CmdResult::default().with_affected_notebooks(vec![id.clone()]);
    result.add_message(CmdMessage::success(format!(
        "Appended {} line{} to {}",
        lines.len(),
        super::plural(lines.len()),
        id
    )));
    Ok(result)
}

/// Appends free text. Surrounding whitespace is dropped; empty text adds a
/// single blank line (a paragraph break in LaTeX).
pub fn append_text<B: StorageBackend>(backend: &B, id: &NotebookId, text: &str) -> Result<CmdResult> {
    let trimmed = text.trim();
    let lines: Vec<String> = if trimmed.is_empty() {
        vec![String::new()]
    } else {
        trimmed.lines().map(str::to_string).collect()
    };
    run(backend, id, &lines)
}
