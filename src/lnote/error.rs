use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LnoteError {
    /// Invalid year/month/day combination, or a date outside 1..=9999.
    #[error("bad calendar date: {0}")]
    Calendar(String),

    #[error("bad day format: {0}")]
    DayFormat(String),

    #[error("bad dayrange format: {0}")]
    DayRangeFormat(String),

    #[error("notebook not found: {0}")]
    SelectNotebook(String),

    #[error("cannot prune {requested} line(s) from notebook \"{notebook}\": it has only {available}")]
    PruneRange {
        notebook: String,
        requested: usize,
        available: usize,
    },

    #[error("cannot rename notebook \"{from}\" to \"{to}\": file exists")]
    RenameConflict { from: String, to: String },

    #[error("no such notebook: {0}")]
    NotebookNotFound(String),

    #[error("cannot create notebook \"{0}\": file exists")]
    NotebookExists(String),

    #[error("invalid notebook name: {0:?}")]
    InvalidName(String),

    #[error("refusing to overwrite {}", .0.display())]
    OutputExists(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, LnoteError>;
