//! CLI interface using clap.
//!
//! Provides command-line arguments and subcommands for the tool.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use chat_link_extractor::application::ExportFormat;
use chat_link_extractor::domain::{Locale, SortDirection, SortField, ViewState};

/// Chat Link Extractor - pull every link out of a chat export CSV.
///
/// Expects a header row with date, user and message columns
/// (e.g. `Date,User,Message`).
#[derive(Parser, Debug)]
#[command(name = "chat-links")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging (use multiple times for more verbosity).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file to use instead of ~/.chat-links/config.toml.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Search, user filter and sort order applied before listing or exporting.
#[derive(Args, Debug, Clone, Default)]
pub struct ViewArgs {
    /// Case-insensitive text matched against URL, message and domain.
    #[arg(short, long)]
    pub search: Option<String>,

    /// Only links posted by this user (exact match).
    #[arg(short, long)]
    pub user: Option<String>,

    /// Sort field: date, user, domain or url.
    #[arg(long)]
    pub sort: Option<SortField>,

    /// Sort direction: asc or desc.
    #[arg(long)]
    pub order: Option<SortDirection>,
}

impl ViewArgs {
    /// Applies the given arguments on top of an initial view.
    #[must_use]
    pub fn apply(&self, mut view: ViewState) -> ViewState {
        if let Some(search) = &self.search {
            view.search.clone_from(search);
        }
        if let Some(user) = &self.user {
            view.user = Some(user.clone());
        }
        if let Some(field) = self.sort {
            view.sort_field = field;
        }
        if let Some(direction) = self.order {
            view.sort_direction = direction;
        }
        view
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List extracted links as a table.
    Links {
        /// Chat export CSV file.
        file: PathBuf,

        #[command(flatten)]
        view: ViewArgs,

        /// Maximum number of links to show (0 = all).
        #[arg(short, long, default_value = "50")]
        limit: usize,
    },

    /// Export extracted links to a file or stdout.
    Export {
        /// Chat export CSV file.
        file: PathBuf,

        #[command(flatten)]
        view: ViewArgs,

        /// Output format: csv, txt or json.
        #[arg(short, long, default_value = "csv")]
        format: ExportFormat,

        /// Remove URLs from the exported message text.
        #[arg(long)]
        strip_urls: bool,

        /// Label and file name language: en or ko.
        #[arg(long)]
        locale: Option<Locale>,

        /// Output directory (file name is generated).
        #[arg(short, long, default_value = ".")]
        output: PathBuf,

        /// Write to stdout instead of a file.
        #[arg(long, conflicts_with = "output")]
        stdout: bool,
    },

    /// Show link statistics.
    Stats {
        /// Chat export CSV file.
        file: PathBuf,

        #[command(flatten)]
        view: ViewArgs,
    },

    /// List the users who posted links.
    Users {
        /// Chat export CSV file.
        file: PathBuf,
    },

    /// Print a short shareable summary of the extracted links.
    Share {
        /// Chat export CSV file.
        file: PathBuf,

        #[command(flatten)]
        view: ViewArgs,

        /// Summary language: en or ko.
        #[arg(long)]
        locale: Option<Locale>,
    },

    /// Inspect or create the configuration file.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the effective configuration.
    Show,
    /// Write a commented default configuration file if none exists.
    Init,
}
