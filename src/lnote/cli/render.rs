use chrono::{DateTime, Local, Utc};
use colored::Colorize;
use lnote::calendar::CalendarDate;
use lnote::commands::{CmdMessage, ListedNotebook, MessageLevel};
use lnote::config::{LnoteConfig, KEYS};
use std::path::PathBuf;

const NAME_WIDTH: usize = 24;

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub(super) fn print_notebook_list(notebooks: &[ListedNotebook]) {
    print!("{}", render_notebook_list(notebooks));
}

pub(super) fn render_notebook_list(notebooks: &[ListedNotebook]) -> String {
    if notebooks.is_empty() {
        return "No notebooks found.\n".to_string();
    }

    let mut output = String::new();
    for notebook in notebooks {
        let name = notebook.id.as_str();
        let name = if notebook.id.is_date() {
            name.normal()
        } else {
            name.cyan()
        };
        match &notebook.stats {
            None => output.push_str(&format!("{}\n", name)),
            Some(stats) => output.push_str(&format!(
                "{:<width$} {:>3} files {:>6} lines {:>9}  {}\n",
                name,
                stats.files,
                stats.lines,
                format_size(stats.bytes),
                format_modified(stats.modified).dimmed(),
                width = NAME_WIDTH
            )),
        }
    }
    output
}

pub(super) fn print_paths(paths: &[PathBuf]) {
    for path in paths {
        println!("{}", path.display());
    }
}

pub(super) fn print_text(text: &str) {
    print!("{}", text);
}

pub(super) fn print_lines(lines: &[String]) {
    for line in lines {
        println!("  {}", line.dimmed());
    }
}

pub(super) fn print_dates(dates: &[CalendarDate]) {
    for date in dates {
        println!("{}", date);
    }
}

pub(super) fn print_config(config: &LnoteConfig) {
    print!("{}", render_config(config));
}

pub(super) fn render_config(config: &LnoteConfig) -> String {
    let mut output = String::new();
    for key in KEYS {
        let value = config.get(key).unwrap_or_default();
        if value.contains('\n') {
            output.push_str(&format!("{} =\n{}\n", key, value));
        } else {
            output.push_str(&format!("{} = {}\n", key, value));
        }
    }
    output
}

fn format_size(bytes: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = KIB * 1024;
    if bytes >= MIB {
        format!("{:.1} MiB", bytes as f64 / MIB as f64)
    } else if bytes >= KIB {
        format!("{:.1} KiB", bytes as f64 / KIB as f64)
    } else {
        format!("{} B", bytes)
    }
}

fn format_modified(modified: Option<DateTime<Utc>>) -> String {
    match modified {
        Some(time) => time.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string(),
        None => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lnote::notebook::NotebookId;
    use lnote::store::NotebookStats;

    fn listed(name: &str, stats: Option<NotebookStats>) -> ListedNotebook {
        ListedNotebook {
            id: NotebookId::named(name).unwrap(),
            stats,
        }
    }

    #[test]
    fn empty_list() {
        assert_eq!(render_notebook_list(&[]), "No notebooks found.\n");
    }

    #[test]
    fn short_list_has_one_name_per_line() {
        colored::control::set_override(false);
        let out = render_notebook_list(&[listed("2024-01-01", None), listed("ideas", None)]);
        assert_eq!(out, "2024-01-01\nideas\n");
    }

    #[test]
    fn long_list_shows_stats() {
        colored::control::set_override(false);
        let stats = NotebookStats {
            files: 2,
            lines: 10,
            bytes: 2048,
            modified: None,
        };
        let out = render_notebook_list(&[listed("ideas", Some(stats))]);
        assert!(out.starts_with("ideas"));
        assert!(out.contains("2 files"));
        assert!(out.contains("10 lines"));
        assert!(out.contains("2.0 KiB"));
        assert!(out.trim_end().ends_with('-'));
    }

    #[test]
    fn sizes() {
        assert_eq!(format_size(12), "12 B");
        assert_eq!(format_size(1536), "1.5 KiB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.0 MiB");
    }

    #[test]
    fn config_lists_every_key() {
        let out = render_config(&LnoteConfig::default());
        assert!(out.contains("file-ext = .tex"));
        assert!(out.contains("editor = vim"));
        assert!(out.contains("export-preamble = (built-in)"));
        assert!(out.contains("latex = pdflatex"));
        assert!(out.contains("pdf-viewer = xdg-open"));
    }
}
