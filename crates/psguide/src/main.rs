//! `psguide` - CLI for the personal security checklist
//!
//! This binary loads the checklist document, renders filtered views and
//! completion summaries, and records progress in the local database.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use serde_json::json;
use tracing::error;

use psguide::cli::{
    Cli, Command, ConfigCommand, ExportCommand, ImportCommand, ListCommand, OutputFormat,
    ResetCommand, StatusCommand, SummaryCommand, ThemeAction, ThemeCommand, ToggleCommand,
};
use psguide::summary::{overview, priority_counts, priority_summary, section_progress};
use psguide::{
    filter_sections, init_logging, Config, Document, Filter, ProgressStore, Storage, ThemeStore,
};

type CliResult = Result<(), Box<dyn std::error::Error>>;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("psguide: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> CliResult {
    let config = if cli.command.needs_config() {
        Config::load_from(cli.config.clone())?
    } else {
        Config::default()
    };
    let document_path = cli
        .document
        .clone()
        .unwrap_or_else(|| config.document_path());

    match cli.command {
        Command::List(cmd) => handle_list(&config, &document_path, &cmd),
        Command::Toggle(cmd) => handle_toggle(&config, &document_path, &cmd),
        Command::Summary(cmd) => handle_summary(&config, &document_path, &cmd),
        Command::Reset(cmd) => handle_reset(&config, &cmd),
        Command::Export(cmd) => handle_export(&config, cmd),
        Command::Import(cmd) => handle_import(&config, &cmd),
        Command::Theme(cmd) => handle_theme(&config, &cmd),
        Command::Config(cmd) => handle_config(&config, cli.config.as_deref(), cmd),
        Command::Status(cmd) => handle_status(&config, &document_path, &cmd),
    }
}

/// Load the checklist. A failure is reported and nothing is rendered.
fn load_document(path: &Path) -> Result<Document, Box<dyn std::error::Error>> {
    Document::load(path).map_err(|e| {
        error!(path = %path.display(), "Checklist could not be loaded");
        e.into()
    })
}

fn open_storage(config: &Config) -> Result<Storage, Box<dyn std::error::Error>> {
    Ok(Storage::open(config.database_path())?)
}

fn check_mark(done: bool) -> &'static str {
    if done {
        "[x]"
    } else {
        "[ ]"
    }
}

fn handle_list(config: &Config, document_path: &Path, cmd: &ListCommand) -> CliResult {
    let document = load_document(document_path)?;
    let storage = open_storage(config)?;
    let store = ProgressStore::open_with_key(&storage, config.storage.progress_key.as_str());

    let filter = Filter::new()
        .with_query(cmd.search.clone().unwrap_or_default())
        .hiding(&cmd.hidden_priorities(config));
    let views = filter_sections(document.sections(), &filter);
    let show_items = cmd.show_items(config);

    match OutputFormat::resolve(cmd.format, config) {
        OutputFormat::Json => {
            let sections: Vec<_> = views
                .iter()
                .map(|view| {
                    let counts: serde_json::Map<_, _> = priority_counts(view.section)
                        .into_iter()
                        .map(|(priority, n)| (priority.as_str().to_string(), json!(n)))
                        .collect();
                    let items: Vec<_> = view
                        .items
                        .iter()
                        .map(|item| {
                            json!({
                                "id": item.id,
                                "point": item.point,
                                "details": item.details,
                                "priority": item.priority,
                                "done": store.is_done(&item.id),
                            })
                        })
                        .collect();
                    json!({
                        "slug": view.section.slug,
                        "title": view.section.title,
                        "label": view.section.slug_label(),
                        "description": view.section.description,
                        "progress": section_progress(view.section, store.progress()),
                        "priorities": counts,
                        "items": items,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&sections)?);
        }
        OutputFormat::Table => {
            if views.is_empty() {
                if filter.needle().is_empty() {
                    println!("The checklist has no sections.");
                } else {
                    println!("No sections match \"{}\".", filter.query().trim());
                }
                return Ok(());
            }

            for view in &views {
                let progress = section_progress(view.section, store.progress());
                let counts: Vec<String> = priority_counts(view.section)
                    .into_iter()
                    .map(|(priority, n)| format!("{n} {priority}"))
                    .collect();
                println!(
                    "{:<40} {:>3}/{:<3} {:>3}%  {}",
                    format!("{} ({})", view.section.title, view.section.slug_label()),
                    progress.done,
                    progress.total,
                    progress.percent,
                    counts.join(", ")
                );
                if show_items {
                    for item in &view.items {
                        println!(
                            "    {} {} [{}]",
                            check_mark(store.is_done(&item.id)),
                            item.point,
                            item.priority
                        );
                    }
                }
            }
        }
    }
    Ok(())
}

fn handle_toggle(config: &Config, document_path: &Path, cmd: &ToggleCommand) -> CliResult {
    let document = load_document(document_path)?;
    let item = document.find_item(&cmd.section, &cmd.item).map_err(|e| {
        if e.is_not_found() {
            format!("{e} (see `psguide list --items` for available items)").into()
        } else {
            Box::<dyn std::error::Error>::from(e)
        }
    })?;
    let section = document.section(&cmd.section)?;

    let storage = open_storage(config)?;
    let mut store = ProgressStore::open_with_key(&storage, config.storage.progress_key.as_str());
    let done = store.toggle(item)?;

    let progress = section_progress(section, store.progress());
    println!("{} {}", check_mark(done), item.point);
    println!(
        "{}: {}/{} done ({}%)",
        section.title, progress.done, progress.total, progress.percent
    );
    Ok(())
}

fn handle_summary(config: &Config, document_path: &Path, cmd: &SummaryCommand) -> CliResult {
    let document = load_document(document_path)?;
    let storage = open_storage(config)?;
    let store = ProgressStore::open_with_key(&storage, config.storage.progress_key.as_str());

    let headline = overview(&document, store.progress());
    let by_priority = priority_summary(&document, store.progress());

    match OutputFormat::resolve(cmd.format, config) {
        OutputFormat::Json => {
            let sections: Vec<_> = document
                .sections()
                .iter()
                .map(|section| {
                    json!({
                        "slug": section.slug,
                        "title": section.title,
                        "progress": section_progress(section, store.progress()),
                    })
                })
                .collect();
            let output = json!({
                "overview": headline,
                "priorities": by_priority,
                "sections": sections,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Table => {
            println!("Checklist Progress");
            println!("==================");
            println!(
                "Sections: {}   Items: {}   Done: {} ({}%)",
                headline.sections,
                headline.completion.total,
                headline.completion.done,
                headline.completion.percent
            );
            println!();
            println!("[By priority]");
            for bucket in &by_priority.buckets {
                println!(
                    "  {:<10} {:>3}/{:<3} {:>3}%",
                    bucket.priority.label(),
                    bucket.completion.done,
                    bucket.completion.total,
                    bucket.completion.percent
                );
            }
            println!();
            println!("[By section]");
            for section in document.sections() {
                let progress = section_progress(section, store.progress());
                let marker = if progress.is_complete() { " *" } else { "" };
                println!(
                    "  {:<30} {:>3}/{:<3} {:>3}%{marker}",
                    section.title, progress.done, progress.total, progress.percent
                );
            }
        }
    }
    Ok(())
}

fn handle_reset(config: &Config, cmd: &ResetCommand) -> CliResult {
    let storage = open_storage(config)?;
    let mut store = ProgressStore::open_with_key(&storage, config.storage.progress_key.as_str());

    if !cmd.yes {
        println!(
            "This will clear progress for {} completed item(s).",
            store.done_count()
        );
        println!("Use --yes to confirm.");
        return Ok(());
    }

    store.reset()?;
    println!("Progress cleared.");
    Ok(())
}

fn handle_export(config: &Config, cmd: ExportCommand) -> CliResult {
    let storage = open_storage(config)?;
    let store = ProgressStore::open_with_key(&storage, config.storage.progress_key.as_str());
    let dump = store.export()?;

    let output = cmd
        .output
        .unwrap_or_else(|| PathBuf::from(&config.export.file_name));
    if output.as_os_str() == "-" {
        println!("{dump}");
    } else {
        std::fs::write(&output, format!("{dump}\n"))?;
        println!(
            "Exported {} completed item(s) to {}",
            store.done_count(),
            output.display()
        );
    }
    Ok(())
}

fn handle_import(config: &Config, cmd: &ImportCommand) -> CliResult {
    let dump = std::fs::read_to_string(&cmd.file)
        .map_err(|e| format!("could not read {}: {e}", cmd.file.display()))?;

    let storage = open_storage(config)?;
    let mut store = ProgressStore::open_with_key(&storage, config.storage.progress_key.as_str());
    let done = store.import(&dump)?;
    println!(
        "Imported {done} completed item(s) from {}",
        cmd.file.display()
    );
    Ok(())
}

fn handle_theme(config: &Config, cmd: &ThemeCommand) -> CliResult {
    let storage = open_storage(config)?;
    let mut store = ThemeStore::open_with_key(&storage, config.storage.theme_key.as_str());

    match cmd.action.unwrap_or(ThemeAction::Show) {
        ThemeAction::Show => println!("{}", store.theme()),
        ThemeAction::Toggle => println!("{}", store.toggle()?),
        ThemeAction::Set { theme } => {
            store.set(theme.into())?;
            println!("{}", store.theme());
        }
    }
    Ok(())
}

fn handle_config(config: &Config, custom_path: Option<&Path>, cmd: ConfigCommand) -> CliResult {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                let hidden: Vec<&str> = config
                    .display
                    .hidden_priorities
                    .iter()
                    .map(|p| p.as_str())
                    .collect();

                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Document]");
                println!("  Path:               {}", config.document_path().display());
                println!();
                println!("[Storage]");
                println!("  Database path:      {}", config.database_path().display());
                println!("  Progress slot:      {}", config.storage.progress_key);
                println!("  Theme slot:         {}", config.storage.theme_key);
                println!();
                println!("[Display]");
                println!("  Default format:     {:?}", config.display.default_format);
                println!(
                    "  Hidden priorities:  {}",
                    if hidden.is_empty() {
                        "none".to_string()
                    } else {
                        hidden.join(", ")
                    }
                );
                println!("  Show items:         {}", config.display.show_items);
                println!();
                println!("[Export]");
                println!("  File name:          {}", config.export.file_name);
            }
        }
        ConfigCommand::Path => {
            let path = custom_path.map_or_else(Config::default_config_path, Path::to_path_buf);
            println!("{}", path.display());
        }
        ConfigCommand::Validate { file } => {
            let path = file
                .or_else(|| custom_path.map(Path::to_path_buf))
                .unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}

fn handle_status(config: &Config, document_path: &Path, cmd: &StatusCommand) -> CliResult {
    let storage = open_storage(config)?;
    let stats = storage.stats()?;
    let progress = ProgressStore::open_with_key(&storage, config.storage.progress_key.as_str());
    let theme = ThemeStore::open_with_key(&storage, config.storage.theme_key.as_str());
    let document_found = document_path.is_file();

    if cmd.json {
        let slot_keys = storage.keys()?;
        let status = json!({
            "document_path": document_path,
            "document_found": document_found,
            "database_path": storage.path(),
            "slots": stats.total_slots,
            "slot_keys": slot_keys,
            "last_updated": stats.last_updated,
            "db_size_bytes": stats.db_size_bytes,
            "completed_items": progress.done_count(),
            "theme": theme.theme(),
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("psguide status");
        println!("--------------");
        println!(
            "Document:      {}{}",
            document_path.display(),
            if document_found { "" } else { " (not found)" }
        );
        println!("Database:      {}", storage.path().display());
        println!("Size:          {} bytes", stats.db_size_bytes);
        println!("Slots:         {}", stats.total_slots);
        println!(
            "Last updated:  {}",
            stats
                .last_updated
                .map_or_else(|| "never".to_string(), |t| t.to_rfc3339())
        );
        println!("Completed:     {} item(s)", progress.done_count());
        println!("Theme:         {}", theme.theme());
    }
    Ok(())
}
