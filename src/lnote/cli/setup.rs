use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "lnote", bin_name = "lnote", version)]
#[command(about = "Day-addressed LaTeX notebooks", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Notebooks directory (defaults to $LNOTE_DIR, then the platform data dir)
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

/// Notebooks are addressed by name or by day: `today`, `y`, `2024-01-05`,
/// `05.01.`, ranges such as `-7`, `jan-mar`, `thisweek`, or lists `a,b`.
/// Patterns may start with `-` (`-today`, `-2024-01-05`), so a command's
/// options go before its patterns.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create notebooks
    #[command(alias = "c")]
    Create {
        /// Names or days of the notebooks to create
        #[arg(required = true, allow_hyphen_values = true)]
        names: Vec<String>,

        /// Copy text and attachments from this notebook
        #[arg(short, long)]
        template: Option<String>,
    },

    /// Delete notebooks
    #[command(alias = "d")]
    Delete {
        /// Notebooks to delete
        #[arg(required = true, allow_hyphen_values = true)]
        patterns: Vec<String>,

        /// Do not ask for confirmation
        #[arg(short, long)]
        force: bool,

        /// Only report what would be deleted
        #[arg(short = 't', long = "test")]
        dry_run: bool,
    },

    /// Rename a notebook
    #[command(alias = "r")]
    Rename {
        #[arg(allow_hyphen_values = true)]
        old: String,
        #[arg(allow_hyphen_values = true)]
        new: String,

        /// Pick a free `<new>-<n>` name instead of failing when `new` exists
        #[arg(short, long)]
        uniquify: bool,
    },

    /// List notebooks
    #[command(alias = "l")]
    List {
        /// Restrict the listing to these notebooks
        #[arg(allow_hyphen_values = true)]
        patterns: Vec<String>,

        /// Show file count, lines, size and modification time
        #[arg(short, long)]
        long: bool,
    },

    /// Open notebooks in the editor (today's by default)
    #[command(alias = "e")]
    Edit {
        #[arg(allow_hyphen_values = true)]
        patterns: Vec<String>,

        /// Editor command to use for this invocation
        #[arg(short, long)]
        editor: Option<String>,
    },

    /// Append notebooks to a target notebook
    #[command(alias = "m")]
    Merge {
        /// Notebooks to merge, in order
        #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
        sources: Vec<String>,

        /// Notebook receiving the merged content
        #[arg(allow_hyphen_values = true)]
        target: String,
    },

    /// Write notebooks out as a standalone LaTeX document
    #[command(alias = "x")]
    Export {
        #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
        patterns: Vec<String>,

        /// Output file; must not exist
        output: PathBuf,

        /// Also compile the document with the configured LaTeX compiler
        #[arg(long)]
        pdf: bool,
    },

    /// Print notebook content (today's by default)
    #[command(alias = "v")]
    View {
        #[arg(allow_hyphen_values = true)]
        patterns: Vec<String>,

        /// Compile the notebooks and open the PDF instead
        #[arg(short = 'e', long)]
        pdf: bool,

        /// PDF viewer to use for this invocation
        #[arg(short = 'p', long, requires = "pdf")]
        viewer: Option<String>,
    },

    /// Print notebook paths (today's by default)
    Path {
        #[arg(allow_hyphen_values = true)]
        patterns: Vec<String>,

        /// Print the text fragment instead of the directory
        #[arg(long)]
        tex: bool,
    },

    /// Append text to a notebook (today's by default)
    #[command(alias = "t")]
    Text {
        /// Target notebook
        #[arg(short, long)]
        notebook: Option<String>,

        /// Text to append
        text: Vec<String>,

        /// Append the content of a file
        #[arg(short, long, conflicts_with = "stdin")]
        file: Option<PathBuf>,

        /// Append text read from stdin
        #[arg(short = 'i', long)]
        stdin: bool,
    },

    /// Append blank lines to a notebook (today's by default)
    #[command(alias = "b")]
    Linebreak {
        /// Target notebook
        #[arg(short, long)]
        notebook: Option<String>,

        /// Number of blank lines
        #[arg(short, long, default_value_t = 1)]
        count: usize,
    },

    /// Remove lines from the end (or, with a negative count, the start) of a notebook
    #[command(alias = "u")]
    Prune {
        /// Target notebook
        #[arg(short, long)]
        notebook: Option<String>,

        /// Lines to remove
        #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
        count: i64,

        /// Do not ask for confirmation
        #[arg(short, long)]
        force: bool,
    },

    /// Print the dates a day-range expression covers
    Dates {
        #[arg(default_value = "today", allow_hyphen_values = true)]
        expression: String,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (file-ext, editor, export-preamble, latex, pdf-viewer)
        key: Option<String>,

        /// Value to set
        value: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn definitions_are_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn aliases_parse() {
        let cli = Cli::try_parse_from(["lnote", "u", "-c", "-2"]).unwrap();
        match cli.command {
            Some(Commands::Prune { count, force, .. }) => {
                assert_eq!(count, -2);
                assert!(!force);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn merge_takes_target_last() {
        let cli = Cli::try_parse_from(["lnote", "m", "a", "b", "dest"]).unwrap();
        match cli.command {
            Some(Commands::Merge { sources, target }) => {
                assert_eq!(sources, vec!["a", "b"]);
                assert_eq!(target, "dest");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn negative_patterns_are_not_flags() {
        let cli = Cli::try_parse_from(["lnote", "list", "-7"]).unwrap();
        match cli.command {
            Some(Commands::List { patterns, long }) => {
                assert_eq!(patterns, vec!["-7"]);
                assert!(!long);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn hyphen_led_day_ranges_are_patterns() {
        let cli = Cli::try_parse_from(["lnote", "list", "-l", "-today"]).unwrap();
        match cli.command {
            Some(Commands::List { patterns, long }) => {
                assert_eq!(patterns, vec!["-today"]);
                assert!(long);
            }
            other => panic!("unexpected {:?}", other),
        }

        let cli = Cli::try_parse_from(["lnote", "dates", "-2024-01-05"]).unwrap();
        match cli.command {
            Some(Commands::Dates { expression }) => assert_eq!(expression, "-2024-01-05"),
            other => panic!("unexpected {:?}", other),
        }

        let cli = Cli::try_parse_from(["lnote", "d", "-f", "-yesterday"]).unwrap();
        match cli.command {
            Some(Commands::Delete { patterns, force, .. }) => {
                assert_eq!(patterns, vec!["-yesterday"]);
                assert!(force);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn view_pdf_options() {
        let cli = Cli::try_parse_from(["lnote", "v", "-e", "-p", "okular", "thisweek"]).unwrap();
        match cli.command {
            Some(Commands::View {
                patterns,
                pdf,
                viewer,
            }) => {
                assert_eq!(patterns, vec!["thisweek"]);
                assert!(pdf);
                assert_eq!(viewer.as_deref(), Some("okular"));
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(Cli::try_parse_from(["lnote", "view", "-p", "okular"]).is_err());
    }

    #[test]
    fn dir_is_global() {
        let cli = Cli::try_parse_from(["lnote", "list", "--dir", "/tmp/n"]).unwrap();
        assert_eq!(cli.dir, Some(PathBuf::from("/tmp/n")));
    }
}
