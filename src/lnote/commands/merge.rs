use crate::commands::{concat_chunks, plural, read_lines, write_lines, CmdMessage, CmdResult};
use crate::error::{LnoteError, Result};
use crate::notebook::NotebookId;
use crate::store::StorageBackend;
use log::debug;

/// Concatenates `sources`, in the order given, onto the end of `destination`.
///
/// The destination is created if needed; existing content stays in front.
/// Attachments are copied unless the destination already has a file of the
/// same name. Sources are only read.
pub fn run<B: StorageBackend>(
    backend: &B,
    sources: &[NotebookId],
    destination: &NotebookId,
) -> Result<CmdResult> {
    if sources.is_empty() {
        return Err(LnoteError::Api("No notebooks to merge".to_string()));
    }
    if sources.contains(destination) {
        return Err(LnoteError::Api(format!(
            "Cannot merge notebook {} into itself",
            destination
        )));
    }

    let mut chunks = Vec::with_capacity(sources.len() + 1);
    if backend.exists(destination) {
        chunks.push(read_lines(backend, destination)?);
    }
    for source in sources {
        chunks.push(read_lines(backend, source)?);
    }
    let merged = concat_chunks(chunks);

    let mut result = CmdResult::default();
    let mut taken = if backend.exists(destination) {
        backend.attachments(destination)?
    } else {
        Vec::new()
    };

    write_lines(backend, destination, &merged)?;

    for source in sources {
        for name in backend.attachments(source)? {
            if taken.contains(&name) {
                result.add_message(CmdMessage::warning(format!(
                    "Attachment {} from {} not copied: {} already has one",
                    name, source, destination
                )));
                continue;
            }
            backend.copy_attachment(source, destination, &name)?;
            taken.push(name);
        }
    }
    debug!("merged {:?} into {}", sources, destination);

    result.affected_notebooks.push(destination.clone());
    result.add_message(CmdMessage::success(format!(
        "Merged {} notebook{} into {}",
        sources.len(),
        plural(sources.len()),
        destination
    )));
    Ok(result)
}
