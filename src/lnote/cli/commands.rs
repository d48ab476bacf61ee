//! # CLI Layer
//!
//! This module is **one possible UI client** for lnote; it is not the application itself.
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr, stdin prompts)
//! - Installs the logger
//! - Reads the system clock
//! - Formats output for human consumption
//!
//! ## Structure
//!
//! - `run()`: Main dispatch logic (called by `main.rs`)
//! - `init_context()`: Builds `AppContext` with API and configuration
//! - `handle_*()`: Per-command handlers that call the API and print the result
//! - `confirm()`: The yes/no prompt guarding destructive commands

use super::render::{
    print_config, print_dates, print_lines, print_messages, print_notebook_list, print_paths,
    print_text,
};
use super::setup::{Cli, Commands};
use clap::Parser;
use env_logger::Env;
use lnote::api::LnoteApi;
use lnote::commands::config::ConfigAction;
use lnote::commands::CmdMessage;
use lnote::config::LnoteConfig;
use lnote::editor::{get_editor, get_pdf_viewer, open_in_editor, open_in_viewer};
use lnote::error::{LnoteError, Result};
use lnote::init::{data_dir, initialize, local_today};
use lnote::notebook::RenamePolicy;
use lnote::store::fs_backend::FsBackend;
use log::debug;
use std::io::{self, IsTerminal, Read, Write};
use std::path::{Path, PathBuf};

struct AppContext {
    api: LnoteApi<FsBackend>,
    config: LnoteConfig,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let ctx = init_context(cli.dir.as_deref())?;

    match cli.command {
        None => handle_list(&ctx, vec![], false),
        Some(Commands::Create { names, template }) => handle_create(&ctx, names, template),
        Some(Commands::Delete {
            patterns,
            force,
            dry_run,
        }) => handle_delete(&ctx, patterns, force, dry_run),
        Some(Commands::Rename { old, new, uniquify }) => handle_rename(&ctx, &old, &new, uniquify),
        Some(Commands::List { patterns, long }) => handle_list(&ctx, patterns, long),
        Some(Commands::Edit { patterns, editor }) => handle_edit(&ctx, patterns, editor),
        Some(Commands::Merge { sources, target }) => handle_merge(&ctx, sources, &target),
        Some(Commands::Export {
            patterns,
            output,
            pdf,
        }) => handle_export(&ctx, patterns, &output, pdf),
        Some(Commands::View {
            patterns,
            pdf,
            viewer,
        }) => handle_view(&ctx, patterns, pdf, viewer),
        Some(Commands::Path { patterns, tex }) => handle_paths(&ctx, patterns, tex),
        Some(Commands::Text {
            notebook,
            text,
            file,
            stdin,
        }) => handle_text(&ctx, notebook, text, file, stdin),
        Some(Commands::Linebreak { notebook, count }) => handle_linebreak(&ctx, notebook, count),
        Some(Commands::Prune {
            notebook,
            count,
            force,
        }) => handle_prune(&ctx, notebook, count, force),
        Some(Commands::Dates { expression }) => handle_dates(&ctx, &expression),
        Some(Commands::Config { key, value }) => handle_config(&ctx, key, value),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    // A second init (e.g. in tests) is harmless.
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or(level))
        .format_timestamp(None)
        .try_init();
}

fn init_context(dir: Option<&Path>) -> Result<AppContext> {
    let data_dir = data_dir(dir)?;
    let today = local_today()?;
    let ctx = initialize(data_dir, today)?;
    Ok(AppContext {
        api: ctx.api,
        config: ctx.config,
    })
}

fn handle_create(ctx: &AppContext, names: Vec<String>, template: Option<String>) -> Result<()> {
    let result = ctx.api.create_notebooks(&names, template.as_deref())?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_delete(ctx: &AppContext, patterns: Vec<String>, force: bool, dry_run: bool) -> Result<()> {
    if dry_run {
        let result = ctx.api.delete_notebooks(&patterns, true, false)?;
        print_messages(&result.messages);
        return Ok(());
    }

    if !force {
        let preview = ctx.api.delete_notebooks(&patterns, true, false)?;
        if preview.messages.is_empty() {
            print_messages(&[CmdMessage::info("No notebooks to delete.")]);
            return Ok(());
        }
        println!("This will permanently remove:");
        print_messages(&preview.messages);
        if !confirm("Delete?")? {
            print_messages(&[CmdMessage::info("Operation cancelled.")]);
            return Ok(());
        }
    }

    let result = ctx.api.delete_notebooks(&patterns, false, false)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_rename(ctx: &AppContext, old: &str, new: &str, uniquify: bool) -> Result<()> {
    let policy = if uniquify {
        RenamePolicy::Uniquify
    } else {
        RenamePolicy::Fail
    };
    let result = ctx.api.rename_notebook(old, new, policy)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_list(ctx: &AppContext, patterns: Vec<String>, long: bool) -> Result<()> {
    let result = ctx.api.list(&patterns, long)?;
    print_notebook_list(&result.listed_notebooks);
    print_messages(&result.messages);
    Ok(())
}

fn handle_edit(ctx: &AppContext, patterns: Vec<String>, editor: Option<String>) -> Result<()> {
    let result = ctx.api.edit_paths(&patterns)?;
    print_messages(&result.messages);
    let editor = editor.unwrap_or_else(|| get_editor(&ctx.config));
    open_in_editor(&editor, &result.notebook_paths)
}

fn handle_merge(ctx: &AppContext, sources: Vec<String>, target: &str) -> Result<()> {
    let result = ctx.api.merge(&sources, target)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_export(ctx: &AppContext, patterns: Vec<String>, output: &Path, pdf: bool) -> Result<()> {
    let preamble = ctx.config.export_preamble.as_deref();
    let result = if pdf {
        ctx.api
            .export_pdf(&patterns, output, preamble, &ctx.config.latex)?
    } else {
        ctx.api.export(&patterns, output, preamble)?
    };
    print_messages(&result.messages);
    Ok(())
}

fn handle_view(
    ctx: &AppContext,
    patterns: Vec<String>,
    pdf: bool,
    viewer: Option<String>,
) -> Result<()> {
    if pdf {
        let preamble = ctx.config.export_preamble.as_deref();
        let result = ctx.api.view_pdf(&patterns, preamble, &ctx.config.latex)?;
        let viewer = viewer.unwrap_or_else(|| get_pdf_viewer(&ctx.config));
        return match result.notebook_paths.last() {
            Some(pdf) => open_in_viewer(&viewer, pdf),
            None => Err(LnoteError::Api("Nothing to view".to_string())),
        };
    }

    let result = ctx.api.view(&patterns)?;
    if let Some(text) = &result.text {
        print_text(text);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_paths(ctx: &AppContext, patterns: Vec<String>, tex: bool) -> Result<()> {
    let result = ctx.api.paths(&patterns, tex)?;
    print_paths(&result.notebook_paths);
    Ok(())
}

fn handle_text(
    ctx: &AppContext,
    notebook: Option<String>,
    words: Vec<String>,
    file: Option<PathBuf>,
    from_stdin: bool,
) -> Result<()> {
    let text = if let Some(path) = file {
        debug!("appending {}", path.display());
        std::fs::read_to_string(&path)?
    } else if from_stdin || (words.is_empty() && !io::stdin().is_terminal()) {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else if words.is_empty() {
        return Err(LnoteError::Api(
            "No text given (pass words, --file or --stdin)".to_string(),
        ));
    } else {
        words.join(" ")
    };

    let result = ctx.api.append_text(notebook.as_deref(), &text)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_linebreak(ctx: &AppContext, notebook: Option<String>, count: usize) -> Result<()> {
    let result = ctx.api.linebreak(notebook.as_deref(), count)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_prune(ctx: &AppContext, notebook: Option<String>, count: i64, force: bool) -> Result<()> {
    if !force && count != 0 {
        let (id, lines) = ctx.api.prune_preview(notebook.as_deref(), count)?;
        println!("This will remove from {}:", id);
        print_lines(&lines);
        if !confirm("Prune?")? {
            print_messages(&[CmdMessage::info("Operation cancelled.")]);
            return Ok(());
        }
    }

    let result = ctx.api.prune(notebook.as_deref(), count)?;
    if force {
        print_lines(&result.lines);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_dates(ctx: &AppContext, expression: &str) -> Result<()> {
    let dates = ctx.api.dates(expression)?;
    print_dates(&dates);
    Ok(())
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };
    let show_all = matches!(action, ConfigAction::ShowAll);

    let result = ctx.api.config(action)?;
    if show_all {
        if let Some(config) = &result.config {
            print_config(config);
        }
    }
    print_messages(&result.messages);
    Ok(())
}

/// Asks on the terminal; only an answer starting with `y` confirms.
fn confirm(question: &str) -> Result<bool> {
    print!("{} [y/N] ", question);
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_lowercase().starts_with('y'))
}
