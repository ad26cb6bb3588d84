//! Chat Link Extractor - pull every link out of a chat export.
//!
//! Reads a chat export CSV (one row per message with date, user and message
//! columns), extracts every URL and lets you filter, sort and export them.
//!
//!   chat-links links chat.csv --search github --sort domain --order asc
//!   chat-links export chat.csv --format json -o exports/
//!   chat-links stats chat.csv --user Alice
//!   chat-links share chat.csv --locale ko

mod cli;

use std::io::Write;
use std::path::Path;

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use chat_link_extractor::application::{
    format_links_table, format_share_summary, format_stats, format_users, CsvIngester,
    ExportFormat, ExportOptions, Exporter, LinkCollection,
};
use chat_link_extractor::domain::{AppConfig, Locale};
use chat_link_extractor::infrastructure::{
    config_file_path, ensure_config_exists, load_config, read_upload, render_config,
};
use cli::{Cli, Commands, ConfigAction, ViewArgs};

fn main() {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

/// Main application logic.
fn run(cli: Cli) -> anyhow::Result<()> {
    let config_path = cli.config.as_deref();
    let load = || load_config(config_path);

    match cli.command {
        Commands::Links { file, view, limit } => {
            cmd_links(&file, &view, limit, &load()?)?;
        }
        Commands::Export {
            file,
            view,
            format,
            strip_urls,
            locale,
            output,
            stdout,
        } => {
            let config = load()?;
            let mut options = ExportOptions::from(&config.export);
            options.strip_urls |= strip_urls;
            if let Some(locale) = locale {
                options.locale = locale;
            }
            let target = if stdout { None } else { Some(output.as_path()) };
            cmd_export(&file, &view, format, options, target, &config)?;
        }
        Commands::Stats { file, view } => {
            cmd_stats(&file, &view, &load()?)?;
        }
        Commands::Users { file } => {
            cmd_users(&file, &load()?)?;
        }
        Commands::Share { file, view, locale } => {
            let config = load()?;
            cmd_share(&file, &view, locale.unwrap_or(config.export.locale), &config)?;
        }
        Commands::Config { action } => {
            cmd_config(&action, config_path)?;
        }
    }

    Ok(())
}

/// Runs one ingestion: read, parse, extract.
fn load_collection(path: &Path, config: &AppConfig) -> anyhow::Result<LinkCollection> {
    let bytes = read_upload(path, config.ingest.max_file_bytes)?;

    let ingestion = CsvIngester::new(config.ingest.clone()).ingest(&bytes);
    if let Some(error) = ingestion.error {
        return Err(error).with_context(|| format!("Failed to read {}", path.display()));
    }

    Ok(LinkCollection::from_messages(&ingestion.messages))
}

/// List links command.
fn cmd_links(path: &Path, args: &ViewArgs, limit: usize, config: &AppConfig) -> anyhow::Result<()> {
    let links = load_collection(path, config)?;
    let view_state = args.apply(config.view.initial_view());

    let mut view = links.view(&view_state);
    let matched = view.len();
    if limit > 0 {
        view.truncate(limit);
    }

    if view.is_empty() {
        println!("{}", "No links found".yellow());
        return Ok(());
    }

    println!(
        "{}",
        format_links_table(
            &view,
            Some((view_state.sort_field, view_state.sort_direction))
        )
    );

    if view.len() < matched {
        println!("Showing {} of {} links (use --limit 0 for all)", view.len(), matched);
    }

    Ok(())
}

/// Export links to a file or stdout.
fn cmd_export(
    path: &Path,
    args: &ViewArgs,
    format: ExportFormat,
    options: ExportOptions,
    target_dir: Option<&Path>,
    config: &AppConfig,
) -> anyhow::Result<()> {
    let links = load_collection(path, config)?;
    let view = links.view(&args.apply(config.view.initial_view()));

    let file = Exporter::new(options).export(&view, format)?;

    match target_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create directory {}", dir.display()))?;
            let out_path = dir.join(&file.filename);
            std::fs::write(&out_path, &file.bytes)
                .with_context(|| format!("Failed to write {}", out_path.display()))?;
            println!(
                "{} Exported {} links to {}",
                "✓".green().bold(),
                view.len(),
                out_path.display()
            );
        }
        None => {
            std::io::stdout()
                .write_all(&file.bytes)
                .context("Failed to write to stdout")?;
        }
    }

    Ok(())
}

/// Show statistics command.
fn cmd_stats(path: &Path, args: &ViewArgs, config: &AppConfig) -> anyhow::Result<()> {
    let links = load_collection(path, config)?;
    let view_state = args.apply(config.view.initial_view());

    println!("{}", format_stats(&links.stats(&view_state)));

    Ok(())
}

/// List users command.
fn cmd_users(path: &Path, config: &AppConfig) -> anyhow::Result<()> {
    let links = load_collection(path, config)?;
    let users = links.users();

    println!("{}", format_users(&users, links.links()));
    println!();
    println!("Total: {} user(s)", users.len());

    Ok(())
}

/// Print share summary command.
fn cmd_share(
    path: &Path,
    args: &ViewArgs,
    locale: Locale,
    config: &AppConfig,
) -> anyhow::Result<()> {
    let links = load_collection(path, config)?;
    let view = links.view(&args.apply(config.view.initial_view()));

    println!("{}", format_share_summary(&view, locale));

    Ok(())
}

/// Config inspection command.
fn cmd_config(action: &ConfigAction, custom: Option<&Path>) -> anyhow::Result<()> {
    let path = config_file_path(custom);

    match action {
        ConfigAction::Show => {
            let config = load_config(custom)?;
            println!("{} {}", "📂 Config file:".bold(), path.display());
            if !path.exists() {
                println!("   (not found, showing defaults)");
            }
            println!();
            println!("{}", render_config(&config)?);
        }
        ConfigAction::Init => {
            if ensure_config_exists(&path)? {
                println!("{} Created {}", "✓".green().bold(), path.display());
            } else {
                println!("Config already exists: {}", path.display());
            }
        }
    }

    Ok(())
}

/// Setup tracing/logging based on verbosity level.
fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).without_time().with_writer(std::io::stderr))
        .with(filter)
        .init();
}
