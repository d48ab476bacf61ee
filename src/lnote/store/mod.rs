//! # Storage Layer
//!
//! Raw notebook I/O lives behind the [`StorageBackend`] trait so that
//! resolution and content mutation can be tested without touching the disk.
//!
//! ## Philosophy
//!
//! - **Files are Truth**: a notebook exists exactly when its directory exists.
//!   There is no index or cache; listing the notebooks directory reconstructs
//!   the set of identifiers that `first`/`last` resolve against.
//! - **No silent overwrites**: `create` and `rename` refuse occupied targets.
//!   Only `write_content` replaces data, and it does so atomically.
//! - **Backends are dumb**: line handling, pruning and merging belong to the
//!   command layer. A backend only moves bytes.
//!
//! ## Implementations
//!
//! - [`fs_backend::FsBackend`]: production, rooted at the notebooks directory.
//! - [`mem_backend::MemBackend`]: in-memory, for tests.
//!
//! ## Storage Layout
//!
//! ```text
//! <data dir>/
//! ├── config.json             # LnoteConfig
//! ├── 2024-01-05/
//! │   ├── 2024-01-05.tex      # text fragment
//! │   └── sketch.png          # attachment
//! └── ideas/
//!     └── ideas.tex
//! ```

pub mod backend;
pub mod fs_backend;
pub mod mem_backend;

pub use backend::{NotebookStats, StorageBackend};
