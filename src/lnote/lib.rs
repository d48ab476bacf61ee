//! # lnote Architecture
//!
//! lnote keeps one LaTeX notebook per day (or per name) and lets you address
//! them the way you think about them: `today`, `y`, `2024-01-05`, `-7`,
//! `thisweek`, `jan-mar`. It is a **library that happens to have a CLI
//! client**: everything below the CLI is UI-agnostic.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, prompts, formats output                │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! │  - Reads the clock once to obtain "today"                   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Normalizes inputs (patterns → NotebookIds)               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Notebook content model: append, prune, merge, rename     │
//! │  - Returns structured CmdResult values                      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - StorageBackend trait                                     │
//! │  - FsBackend (production), MemBackend (testing)             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Beside the stack sit the pure resolvers the commands build on:
//! [`calendar`] (date ↔ Julian Day Number), [`day`] (one token → one date or
//! name), [`range`] (expression → ascending dates) and [`notebook`]
//! (identifiers and paths). They take "today" and the existing notebooks as
//! parameters and never touch the disk.
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code:
//! - Takes regular Rust function arguments
//! - Returns regular Rust types (`Result<CmdResult>`)
//! - **Never** writes to stdout/stderr or installs a logger
//! - **Never** calls `std::process::exit`
//! - **Never** reads the system clock
//!
//! Diagnostics go through the `log` facade; the binary decides where they end up.
//!
//! ## Testing Strategy
//!
//! 1. **Resolvers and commands**: unit tests beside the code, using
//!    [`store::mem_backend::MemBackend`].
//! 2. **Filesystem**: integration tests in `tests/` against a temp directory.
//! 3. **CLI**: end-to-end tests running the `lnote` binary.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Business logic for each command
//! - [`store`]: Storage abstraction and implementations
//! - [`calendar`], [`day`], [`range`]: Date arithmetic and token resolution
//! - [`notebook`]: Notebook identifiers, layout and rename policy
//! - [`config`]: Configuration management
//! - [`init`]: Data directory discovery and context wiring
//! - [`editor`]: External editor integration
//! - [`error`]: Error types
//! - `cli`: Argument parsing and printing for the binary (not part of the lib API)

pub mod api;
pub mod calendar;
pub mod commands;
pub mod config;
pub mod day;
pub mod editor;
pub mod error;
pub mod init;
pub mod notebook;
pub mod range;
pub mod store;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
