//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::config::{Config, DisplayFormat};
use crate::document::Priority;
use crate::store::Theme;

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Search text matched against points, details, and section titles
    #[arg(short, long)]
    pub search: Option<String>,

    /// Hide a priority tier (repeatable)
    #[arg(long, value_enum, value_name = "PRIORITY")]
    pub hide: Vec<PriorityArg>,

    /// Show every visible item under its section
    #[arg(short, long)]
    pub items: bool,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,
}

impl ListCommand {
    /// Tiers to hide: the command line wins over the configured default.
    #[must_use]
    pub fn hidden_priorities(&self, config: &Config) -> Vec<Priority> {
        if self.hide.is_empty() {
            config.display.hidden_priorities.clone()
        } else {
            self.hide.iter().copied().map(Priority::from).collect()
        }
    }

    /// Whether to print items.
    #[must_use]
    pub fn show_items(&self, config: &Config) -> bool {
        self.items || config.display.show_items
    }
}

/// Toggle command arguments.
#[derive(Debug, Args)]
pub struct ToggleCommand {
    /// Slug of the section holding the item
    pub section: String,

    /// The item's point text or its full identity
    pub item: String,
}

/// Summary command arguments.
#[derive(Debug, Args)]
pub struct SummaryCommand {
    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,
}

/// Reset command arguments.
#[derive(Debug, Args)]
pub struct ResetCommand {
    /// Confirm clearing all progress
    #[arg(short, long)]
    pub yes: bool,
}

/// Export command arguments.
#[derive(Debug, Args)]
pub struct ExportCommand {
    /// Output file (`-` for stdout). Defaults to `export.file_name`
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Import command arguments.
#[derive(Debug, Args)]
pub struct ImportCommand {
    /// A file previously written by `export`
    pub file: PathBuf,
}

/// Theme command arguments.
#[derive(Debug, Args)]
pub struct ThemeCommand {
    /// What to do with the theme (defaults to `show`)
    #[command(subcommand)]
    pub action: Option<ThemeAction>,
}

/// Theme actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum ThemeAction {
    /// Print the current theme
    Show,

    /// Switch between light and dark
    Toggle,

    /// Set a specific theme
    Set {
        /// The theme to use
        #[arg(value_enum)]
        theme: ThemeArg,
    },
}

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        file: Option<PathBuf>,
    },
}

/// Priority argument for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PriorityArg {
    /// Essential items
    Essential,
    /// Optional items
    Optional,
    /// Advanced items
    Advanced,
}

impl From<PriorityArg> for Priority {
    fn from(arg: PriorityArg) -> Self {
        match arg {
            PriorityArg::Essential => Self::Essential,
            PriorityArg::Optional => Self::Optional,
            PriorityArg::Advanced => Self::Advanced,
        }
    }
}

/// Theme argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeArg {
    /// Light background
    Light,
    /// Dark background
    Dark,
}

impl From<ThemeArg> for Theme {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Light => Self::Light,
            ThemeArg::Dark => Self::Dark,
        }
    }
}

/// Output format for commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Formatted table
    #[default]
    Table,
    /// JSON output
    Json,
}

impl OutputFormat {
    /// The explicit choice, or the configured default.
    #[must_use]
    pub fn resolve(choice: Option<Self>, config: &Config) -> Self {
        choice.unwrap_or(match config.display.default_format {
            DisplayFormat::Table => Self::Table,
            DisplayFormat::Json => Self::Json,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_arg_conversion() {
        assert_eq!(Priority::from(PriorityArg::Essential), Priority::Essential);
        assert_eq!(Priority::from(PriorityArg::Optional), Priority::Optional);
        assert_eq!(Priority::from(PriorityArg::Advanced), Priority::Advanced);
    }

    #[test]
    fn test_theme_arg_conversion() {
        assert_eq!(Theme::from(ThemeArg::Light), Theme::Light);
        assert_eq!(Theme::from(ThemeArg::Dark), Theme::Dark);
    }

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Table);
    }

    #[test]
    fn test_output_format_resolve() {
        let mut config = Config::default();
        assert_eq!(OutputFormat::resolve(None, &config), OutputFormat::Table);

        config.display.default_format = DisplayFormat::Json;
        assert_eq!(OutputFormat::resolve(None, &config), OutputFormat::Json);
        assert_eq!(
            OutputFormat::resolve(Some(OutputFormat::Table), &config),
            OutputFormat::Table
        );
    }

    #[test]
    fn test_hidden_priorities_from_config() {
        let mut config = Config::default();
        config.display.hidden_priorities = vec![Priority::Advanced];

        let cmd = ListCommand {
            search: None,
            hide: Vec::new(),
            items: false,
            format: None,
        };
        assert_eq!(cmd.hidden_priorities(&config), vec![Priority::Advanced]);
    }

    #[test]
    fn test_hidden_priorities_flag_overrides_config() {
        let mut config = Config::default();
        config.display.hidden_priorities = vec![Priority::Advanced];

        let cmd = ListCommand {
            search: None,
            hide: vec![PriorityArg::Essential],
            items: false,
            format: None,
        };
        assert_eq!(cmd.hidden_priorities(&config), vec![Priority::Essential]);
    }

    #[test]
    fn test_show_items() {
        let mut config = Config::default();
        let cmd = ListCommand {
            search: None,
            hide: Vec::new(),
            items: false,
            format: None,
        };
        assert!(!cmd.show_items(&config));

        config.display.show_items = true;
        assert!(cmd.show_items(&config));
    }

    #[test]
    fn test_config_command_debug() {
        let cmd = ConfigCommand::Show { json: false };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("Show"));
    }
}
