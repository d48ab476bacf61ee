//! # lnote CLI
//!
//! The binary is intentionally thin: the CLI lives in `src/lnote/cli/`, while
//! this file only invokes `cli::run()` and handles process termination.
//!
//! ```text
//! main.rs ──▶ cli::run()
//!               ├─ setup.rs     clap argument definitions
//!               ├─ commands.rs  logging, context wiring, dispatch, prompts
//!               └─ render.rs    colored terminal output
//!                     │
//!                     ▼
//!               lnote::api::LnoteApi
//! ```

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
