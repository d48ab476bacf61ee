//! # Configuration
//!
//! lnote keeps its settings in `config.json` inside the data directory, next
//! to the notebooks. A missing file means defaults.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `file-ext` | `.tex` | Extension of notebook text fragments |
//! | `editor` | `vim` | Editor for `lnote edit`; `$LNOTE_EDITOR` overrides it |
//! | `export-preamble` | built-in | LaTeX preamble used by `lnote export` |
//! | `latex` | `pdflatex` | Compiler for `export --pdf` and `view --pdf` |
//! | `pdf-viewer` | `xdg-open` | Viewer for `view --pdf`; `$LNOTE_PDFVIEWER` overrides it |
//!
//! ## CLI Usage
//!
//! - `lnote config`: Show all configuration values.
//! - `lnote config <key>`: Show one value.
//! - `lnote config <key> <value>`: Set a value.

use crate::error::{LnoteError, Result};
use crate::notebook::DEFAULT_FILE_EXT;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_EDITOR: &str = "vim";
const DEFAULT_LATEX: &str = "pdflatex";
const DEFAULT_PDF_VIEWER: &str = "xdg-open";

pub const KEYS: [&str; 5] = ["file-ext", "editor", "export-preamble", "latex", "pdf-viewer"];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LnoteConfig {
    /// Extension of notebook text fragments (e.g. ".tex")
    #[serde(default = "default_file_ext")]
    pub file_ext: String,

    #[serde(default = "default_editor")]
    pub editor: String,

    /// Replaces the built-in preamble of exported documents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_preamble: Option<String>,

    /// LaTeX compiler command, arguments allowed.
    #[serde(default = "default_latex")]
    pub latex: String,

    #[serde(default = "default_pdf_viewer")]
    pub pdf_viewer: String,
}

fn default_file_ext() -> String {
    DEFAULT_FILE_EXT.to_string()
}

fn default_editor() -> String {
    DEFAULT_EDITOR.to_string()
}

fn default_latex() -> String {
    DEFAULT_LATEX.to_string()
}

fn default_pdf_viewer() -> String {
    DEFAULT_PDF_VIEWER.to_string()
}

impl Default for LnoteConfig {
    fn default() -> Self {
        Self {
            file_ext: default_file_ext(),
            editor: default_editor(),
            export_preamble: None,
            latex: default_latex(),
            pdf_viewer: default_pdf_viewer(),
        }
    }
}

impl LnoteConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(LnoteError::Io)?;
        let mut config: LnoteConfig =
            serde_json::from_str(&content).map_err(LnoteError::Serialization)?;
        let ext = config.file_ext.clone();
        config.set_file_ext(&ext);
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(LnoteError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(LnoteError::Serialization)?;
        fs::write(config_path, content).map_err(LnoteError::Io)?;
        Ok(())
    }

    /// Set the file extension (normalizes to start with a dot)
    pub fn set_file_ext(&mut self, ext: &str) {
        if ext.starts_with('.') {
            self.file_ext = ext.to_string();
        } else {
            self.file_ext = format!(".{}", ext);
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "file-ext" => Some(self.file_ext.clone()),
            "editor" => Some(self.editor.clone()),
            "export-preamble" => Some(
                self.export_preamble
                    .clone()
                    .unwrap_or_else(|| "(built-in)".to_string()),
            ),
            "latex" => Some(self.latex.clone()),
            "pdf-viewer" => Some(self.pdf_viewer.clone()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        match key {
            "file-ext" => {
                let ext = value.trim().trim_start_matches('.');
                if ext.is_empty() || ext.contains(['/', '\\']) {
                    return Err(format!("Invalid file extension: {:?}", value));
                }
                self.set_file_ext(ext);
            }
            "editor" => {
                if value.trim().is_empty() {
                    return Err("Editor must not be empty".to_string());
                }
                self.editor = value.trim().to_string();
            }
            "export-preamble" => {
                self.export_preamble = if value.trim().is_empty() {
                    None
                } else {
                    Some(value.to_string())
                };
            }
            "latex" | "pdf-viewer" => {
                let value = value.trim();
                if value.is_empty() {
                    return Err(format!("{} must not be empty", key));
                }
                if key == "latex" {
                    self.latex = value.to_string();
                } else {
                    self.pdf_viewer = value.to_string();
                }
            }
            _ => return Err(format!("Unknown config key: {}", key)),
        }
        Ok(())
    }
}
