use crate::config::LnoteConfig;
use crate::error::{LnoteError, Result};
use log::debug;
use std::env;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

pub const EDITOR_ENV: &str = "LNOTE_EDITOR";
pub const PDF_VIEWER_ENV: &str = "LNOTE_PDFVIEWER";

/// `$LNOTE_EDITOR` if set, else the configured editor.
pub fn get_editor(config: &LnoteConfig) -> String {
    match env::var(EDITOR_ENV) {
        Ok(editor) if !editor.trim().is_empty() => editor,
        _ => config.editor.clone(),
    }
}

/// `$LNOTE_PDFVIEWER` if set, else the configured viewer.
pub fn get_pdf_viewer(config: &LnoteConfig) -> String {
    match env::var(PDF_VIEWER_ENV) {
        Ok(viewer) if !viewer.trim().is_empty() => viewer,
        _ => config.pdf_viewer.clone(),
    }
}

/// A command line such as `code --wait` split into program and arguments.
pub(crate) fn command_from(line: &str, what: &str) -> Result<Command> {
    let mut words = line.split_whitespace();
    let program = words
        .next()
        .ok_or_else(|| LnoteError::Api(format!("No {} configured", what)))?;
    let mut command = Command::new(program);
    command.args(words);
    Ok(command)
}

/// Opens all files side by side in one editor process and waits for it.
/// The editor string may carry arguments, e.g. `code --wait`.
pub fn open_in_editor(editor: &str, paths: &[PathBuf]) -> Result<()> {
    let mut command = command_from(editor, "editor")?;

    debug!("launching {} on {:?}", editor, paths);
    let status = command
        .args(paths)
        .status()
        .map_err(|e| LnoteError::Api(format!("Failed to launch editor '{}': {}", editor, e)))?;

    if !status.success() {
        return Err(LnoteError::Api(format!(
            "Editor '{}' exited with non-zero status",
            editor
        )));
    }
    Ok(())
}

/// Starts the viewer on `pdf` and returns without waiting for it to close.
pub fn open_in_viewer(viewer: &str, pdf: &Path) -> Result<()> {
    let mut command = command_from(viewer, "PDF viewer")?;

    debug!("launching {} on {}", viewer, pdf.display());
    command
        .arg(pdf)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| LnoteError::Api(format!("Failed to launch PDF viewer '{}': {}", viewer, e)))?;
    Ok(())
}
