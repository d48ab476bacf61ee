//! Standalone LaTeX export.
//!
//! The selected notebooks are concatenated as by `merge`, wrapped in a
//! preamble and `\end{document}`, and written to a new `.tex` file. Their
//! attachments are copied next to it so `\includegraphics` keeps working.
//! [`compile_pdf`] then optionally runs the configured LaTeX compiler on it.

use crate::commands::{concat_chunks, join_lines, read_lines, CmdMessage, CmdResult};
use crate::editor::command_from;
use crate::error::{LnoteError, Result};
use crate::notebook::NotebookId;
use crate::store::StorageBackend;
use log::debug;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::process::Stdio;

pub const DEFAULT_PREAMBLE: &str = "\\documentclass{scrartcl}
\\usepackage{amsmath}
\\usepackage{amsthm}
\\usepackage{graphicx}
\\usepackage{commath}
\\begin{document}";

const EPILOG: &str = "\\end{document}";

pub fn render(preamble: &str, body: &str) -> String {
    format!("{}\n\n{}\n{}\n", preamble.trim(), body.trim(), EPILOG)
}

/// Writes the document to `output`, which must not exist yet.
pub fn run<B: StorageBackend>(
    backend: &B,
    ids: &[NotebookId],
    output: &Path,
    preamble: Option<&str>,
) -> Result<CmdResult> {
    if ids.is_empty() {
        return Err(LnoteError::Api("No notebook selected".to_string()));
    }
    let chunks = ids
        .iter()
        .map(|id| read_lines(backend, id))
        .collect::<Result<Vec<_>>>()?;
    let document = render(
        preamble.unwrap_or(DEFAULT_PREAMBLE),
        &join_lines(&concat_chunks(chunks)),
    );

    let mut file = match OpenOptions::new().write(true).create_new(true).open(output) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            return Err(LnoteError::OutputExists(output.to_path_buf()));
        }
        Err(e) => return Err(LnoteError::Io(e)),
    };
    file.write_all(document.as_bytes())
        .map_err(LnoteError::Io)?;
    debug!("exported {:?} to {}", ids, output.display());

    let mut result = CmdResult::default().with_notebook_paths(vec![output.to_path_buf()]);
    let out_dir = output.parent().unwrap_or_else(|| Path::new("."));
    for id in ids {
        for name in backend.attachments(id)? {
            let target = out_dir.join(&name);
            if target.exists() {
                result.add_message(CmdMessage::warning(format!(
                    "Attachment {} not copied: {} exists",
                    name,
                    target.display()
                )));
                continue;
            }
            fs::write(&target, backend.read_attachment(id, &name)?).map_err(LnoteError::Io)?;
        }
    }

    result.add_message(CmdMessage::success(format!(
        "Exported to {}",
        output.display()
    )));
    Ok(result)
}

/// Runs `latex` on an exported document from inside its directory and
/// returns the PDF written beside it.
pub fn compile_pdf(latex: &str, tex: &Path) -> Result<PathBuf> {
    let dir = match tex.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file = tex
        .file_name()
        .ok_or_else(|| LnoteError::Api(format!("Not a file: {}", tex.display())))?;
    let mut command = command_from(latex, "LaTeX compiler")?;

    debug!("compiling {} with {}", tex.display(), latex);
    let output = command
        .args(["-interaction=nonstopmode", "-halt-on-error"])
        .arg(file)
        .current_dir(dir)
        .stdin(Stdio::null())
        .output()
        .map_err(|e| LnoteError::Api(format!("Failed to run '{}': {}", latex, e)))?;

    if !output.status.success() {
        // TeX reports errors on stdout as lines starting with '!'.
        let log = String::from_utf8_lossy(&output.stdout);
        let reason = log
            .lines()
            .find(|line| line.starts_with('!'))
            .unwrap_or("non-zero exit status");
        return Err(LnoteError::Api(format!(
            "'{}' failed on {}: {}",
            latex,
            tex.display(),
            reason
        )));
    }

    let pdf = tex.with_extension("pdf");
    if !pdf.exists() {
        return Err(LnoteError::Api(format!(
            "'{}' produced no {}",
            latex,
            pdf.display()
        )));
    }
    Ok(pdf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mem_backend::MemBackend;
    use tempfile::tempdir;

    fn id(s: &str) -> NotebookId {
        NotebookId::named(s).unwrap()
    }

    #[test]
    fn writes_standalone_document() {
        let temp = tempdir().unwrap();
        let backend = MemBackend::new();
        backend.write_content(&id("a"), "Hello.\n").unwrap();
        backend.write_content(&id("b"), "World.\n").unwrap();

        let out = temp.path().join("notes.tex");
        run(&backend, &[id("a"), id("b")], &out, None).unwrap();

        let text = fs::read_to_string(&out).unwrap();
        assert!(text.starts_with("\\documentclass{scrartcl}\n"));
        assert!(text.contains("\\begin{document}\n\nHello.\n\nWorld.\n\\end{document}\n"));
    }

    #[test]
    fn custom_preamble() {
        let temp = tempdir().unwrap();
        let backend = MemBackend::new();
        backend.write_content(&id("a"), "x\n").unwrap();
        let out = temp.path().join("out.tex");
        run(
            &backend,
            &[id("a")],
            &out,
            Some("\\documentclass{article}\n\\begin{document}"),
        )
        .unwrap();
        assert_eq!(
            fs::read_to_string(&out).unwrap(),
            "\\documentclass{article}\n\\begin{document}\n\nx\n\\end{document}\n"
        );
    }

    #[test]
    fn refuses_to_overwrite() {
        let temp = tempdir().unwrap();
        let backend = MemBackend::new();
        backend.write_content(&id("a"), "x\n").unwrap();
        let out = temp.path().join("out.tex");
        fs::write(&out, "precious").unwrap();

        assert!(matches!(
            run(&backend, &[id("a")], &out, None),
            Err(LnoteError::OutputExists(_))
        ));
        assert_eq!(fs::read_to_string(&out).unwrap(), "precious");
    }

    #[test]
    fn copies_attachments_beside_output() {
        let temp = tempdir().unwrap();
        let backend = MemBackend::new();
        backend.write_content(&id("a"), "x\n").unwrap();
        backend.add_attachment(&id("a"), "plot.png", b"png");
        let out = temp.path().join("out.tex");
        run(&backend, &[id("a")], &out, None).unwrap();
        assert_eq!(fs::read(temp.path().join("plot.png")).unwrap(), b"png");
    }

    #[test]
    fn source_notebooks_unchanged() {
        let temp = tempdir().unwrap();
        let backend = MemBackend::new();
        backend.write_content(&id("a"), "x\n").unwrap();
        run(&backend, &[id("a")], &temp.path().join("o.tex"), None).unwrap();
        assert_eq!(backend.read_content(&id("a")).unwrap().unwrap(), "x\n");
        assert_eq!(backend.list_ids().unwrap(), vec![id("a")]);
    }

    #[test]
    fn compile_with_missing_compiler_fails() {
        let temp = tempdir().unwrap();
        let tex = temp.path().join("doc.tex");
        fs::write(&tex, "x").unwrap();
        assert!(matches!(
            compile_pdf("lnote-no-such-latex-xyz", &tex),
            Err(LnoteError::Api(_))
        ));
        assert!(matches!(compile_pdf("  ", &tex), Err(LnoteError::Api(_))));
    }

    #[cfg(unix)]
    #[test]
    fn compile_reports_failures() {
        let temp = tempdir().unwrap();
        let tex = temp.path().join("doc.tex");
        fs::write(&tex, "x").unwrap();

        let err = compile_pdf("false", &tex).unwrap_err();
        assert!(err.to_string().contains("non-zero exit status"));

        let err = compile_pdf("true", &tex).unwrap_err();
        assert!(err.to_string().contains("produced no"));
    }

    #[cfg(unix)]
    #[test]
    fn compile_returns_the_pdf_beside_the_document() {
        let temp = tempdir().unwrap();
        let script = temp.path().join("fake-latex.sh");
        fs::write(&script, "for arg; do last=$arg; done\ntouch \"${last%.tex}.pdf\"\n").unwrap();

        let out_dir = temp.path().join("out");
        fs::create_dir(&out_dir).unwrap();
        let backend = MemBackend::new();
        backend.write_content(&id("a"), "x\n").unwrap();
        let tex = out_dir.join("notes.tex");
        run(&backend, &[id("a")], &tex, None).unwrap();

        let pdf = compile_pdf(&format!("sh {}", script.display()), &tex).unwrap();
        assert_eq!(pdf, out_dir.join("notes.pdf"));
        assert!(pdf.exists());
    }
}
