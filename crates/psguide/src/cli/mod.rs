//! Command-line interface for psguide.
//!
//! This module provides the CLI structure for the `psguide` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    ConfigCommand, ExportCommand, ImportCommand, ListCommand, OutputFormat, PriorityArg,
    ResetCommand, StatusCommand, SummaryCommand, ThemeAction, ThemeArg, ThemeCommand,
    ToggleCommand,
};

use crate::logging::Verbosity;

/// psguide - Work through the personal security checklist
///
/// Browse checklist sections, search and filter by priority, and track which
/// items you have completed. Progress is kept in a local database.
#[derive(Debug, Parser)]
#[command(name = "psguide")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Path to the checklist document (overrides `document.path`)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub document: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List sections with progress, filtered by search and priority
    List(ListCommand),

    /// Mark an item done, or undone if it already is
    Toggle(ToggleCommand),

    /// Show overall and per-priority completion
    Summary(SummaryCommand),

    /// Clear all progress
    Reset(ResetCommand),

    /// Write progress as JSON
    Export(ExportCommand),

    /// Restore progress from an exported file
    Import(ImportCommand),

    /// Show or change the display theme
    Theme(ThemeCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Show storage and document status
    Status(StatusCommand),
}

impl Command {
    /// Whether the command needs the merged configuration before it runs.
    ///
    /// `config path` and `config validate` must work while the configuration
    /// file itself is broken.
    #[must_use]
    pub fn needs_config(&self) -> bool {
        !matches!(
            self,
            Self::Config(ConfigCommand::Path | ConfigCommand::Validate { .. })
        )
    }
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.verbose)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn status_cli(verbose: u8, quiet: bool) -> Cli {
        Cli {
            config: None,
            document: None,
            verbose,
            quiet,
            command: Command::Status(StatusCommand { json: false }),
        }
    }

    #[test]
    fn test_cli_name() {
        let cli = Cli::command();
        assert_eq!(cli.get_name(), "psguide");
    }

    #[test]
    fn test_verbosity() {
        assert_eq!(status_cli(0, true).verbosity(), Verbosity::Quiet);
        assert_eq!(status_cli(0, false).verbosity(), Verbosity::Normal);
        assert_eq!(status_cli(1, false).verbosity(), Verbosity::Verbose);
        assert_eq!(status_cli(2, false).verbosity(), Verbosity::Trace);
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_list_with_filters() {
        let args = [
            "psguide", "list", "-s", "vpn", "--hide", "advanced", "--hide", "optional", "--items",
            "-f", "json",
        ];
        let cli = Cli::try_parse_from(args).unwrap();
        let Command::List(cmd) = cli.command else {
            panic!("expected list command");
        };
        assert_eq!(cmd.search.as_deref(), Some("vpn"));
        assert_eq!(cmd.hide, vec![PriorityArg::Advanced, PriorityArg::Optional]);
        assert!(cmd.items);
        assert_eq!(cmd.format, Some(OutputFormat::Json));
    }

    #[test]
    fn test_parse_toggle() {
        let args = ["psguide", "toggle", "authentication", "Use a Strong Password"];
        let cli = Cli::try_parse_from(args).unwrap();
        let Command::Toggle(cmd) = cli.command else {
            panic!("expected toggle command");
        };
        assert_eq!(cmd.section, "authentication");
        assert_eq!(cmd.item, "Use a Strong Password");
    }

    #[test]
    fn test_parse_toggle_requires_item() {
        let args = ["psguide", "toggle", "authentication"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_parse_reset() {
        let cli = Cli::try_parse_from(["psguide", "reset"]).unwrap();
        assert!(matches!(cli.command, Command::Reset(ResetCommand { yes: false })));

        let cli = Cli::try_parse_from(["psguide", "reset", "--yes"]).unwrap();
        assert!(matches!(cli.command, Command::Reset(ResetCommand { yes: true })));
    }

    #[test]
    fn test_parse_export_stdout() {
        let cli = Cli::try_parse_from(["psguide", "export", "-o", "-"]).unwrap();
        let Command::Export(cmd) = cli.command else {
            panic!("expected export command");
        };
        assert_eq!(cmd.output, Some(PathBuf::from("-")));
    }

    #[test]
    fn test_parse_import() {
        let cli = Cli::try_parse_from(["psguide", "import", "progress.json"]).unwrap();
        assert!(matches!(cli.command, Command::Import(_)));
    }

    #[test]
    fn test_parse_theme_variants() {
        let cli = Cli::try_parse_from(["psguide", "theme"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Theme(ThemeCommand { action: None })
        ));

        let cli = Cli::try_parse_from(["psguide", "theme", "toggle"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Theme(ThemeCommand {
                action: Some(ThemeAction::Toggle)
            })
        ));

        let cli = Cli::try_parse_from(["psguide", "theme", "set", "light"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Theme(ThemeCommand {
                action: Some(ThemeAction::Set {
                    theme: ThemeArg::Light
                })
            })
        ));
    }

    #[test]
    fn test_parse_theme_set_rejects_unknown() {
        assert!(Cli::try_parse_from(["psguide", "theme", "set", "sepia"]).is_err());
    }

    #[test]
    fn test_parse_config_validate_file() {
        let cli = Cli::try_parse_from(["psguide", "config", "validate", "/tmp/c.toml"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Config(ConfigCommand::Validate { file: Some(_) })
        ));
    }

    #[test]
    fn test_config_inspection_does_not_need_config() {
        let cli = Cli::try_parse_from(["psguide", "config", "validate", "other.toml"]).unwrap();
        assert!(!cli.command.needs_config());

        let cli = Cli::try_parse_from(["psguide", "config", "path"]).unwrap();
        assert!(!cli.command.needs_config());

        let cli = Cli::try_parse_from(["psguide", "config", "show"]).unwrap();
        assert!(cli.command.needs_config());

        let cli = Cli::try_parse_from(["psguide", "list"]).unwrap();
        assert!(cli.command.needs_config());
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let args = [
            "psguide",
            "summary",
            "-d",
            "/srv/checklist.yml",
            "-c",
            "/custom/config.toml",
            "-vv",
        ];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.document, Some(PathBuf::from("/srv/checklist.yml")));
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_parse_with_quiet() {
        let cli = Cli::try_parse_from(["psguide", "-q", "status"]).unwrap();
        assert!(cli.quiet);
    }
}
