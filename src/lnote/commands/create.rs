use crate::commands::{CmdMessage, CmdResult};
use crate::error::{LnoteError, Result};
use crate::notebook::NotebookId;
use crate::store::StorageBackend;

/// Creates each notebook, optionally as a copy of `template` (text and
/// attachments). Notebooks that already exist are skipped with a warning.
pub fn run<B: StorageBackend>(
    backend: &B,
    ids: &[NotebookId],
    template: Option<&NotebookId>,
) -> Result<CmdResult> {
    let template = match template {
        Some(t) => {
            let text = backend
                .read_content(t)?
                .ok_or_else(|| LnoteError::NotebookNotFound(t.to_string()))?;
            Some((t, text, backend.attachments(t)?))
        }
        None => None,
    };

    let mut result = CmdResult::default();
    for id in ids {
        if backend.exists(id) {
            result.add_message(CmdMessage::warning(format!(
                "Notebook {} already exists, skipped",
                id
            )));
            continue;
        }

        backend.create(id)?;
        if let Some((source, text, attachments)) = &template {
            backend.write_content(id, text)?;
            for name in attachments {
                backend.copy_attachment(source, id, name)?;
            }
        }
        result.add_message(CmdMessage::success(format!("Notebook created: {}", id)));
        result.affected_notebooks.push(id.clone());
    }
    Ok(result)
}
