//! shopkeep CLI
//!
//! Command-line interface for catalog-image ingestion and catalog-item
//! maintenance against the point-of-sale's commerce catalog.

use std::io::Write;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::LevelFilter;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

mod cli_types;
mod commands;
mod error;

use cli_types::{Cli, Commands, ConfigAction};

fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose, cli.quiet);

    let result = match cli.command {
        Commands::Images { dry_run } => commands::images::run(cli.root, dry_run),
        Commands::Renew { purchase_order_id } => commands::renew::run(&purchase_order_id),
        Commands::Stockout {
            renew_names,
            delete_depleted,
        } => commands::stockout::run(renew_names, delete_depleted),
        Commands::Dedupe => commands::dedupe::run(cli.root),
        Commands::Locations => commands::locations::run(),
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::run_show(),
            ConfigAction::Setup => commands::config::run_setup(),
            ConfigAction::Path => commands::config::run_path(),
        },
    };

    if let Err(e) = result {
        log::error!(
            "{} {e}",
            "\u{2718}".if_supports_color(Stdout, |t| t.red()),
        );
        std::process::exit(1);
    }
}

/// Message-only logging by default; `--verbose` adds timestamps and
/// debug-level messages, `--quiet` drops everything below warn.
fn init_logger(verbose: bool, quiet: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else if quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    builder.filter_level(level);
    if verbose {
        builder.format_timestamp_millis();
    } else {
        builder.format(|buf, record| writeln!(buf, "{}", record.args()));
    }
    builder.init();
}

/// Block on a yes/no confirmation, the gate in front of every
/// destructive step. Anything other than `y` ends the whole run.
pub(crate) fn confirm_or_exit(message: &str) {
    log::info!("{}", message.if_supports_color(Stdout, |t| t.bold()));
    print!("Do you want to continue? [y/N] ");
    std::io::stdout().flush().unwrap();

    let mut input = String::new();
    std::io::stdin().read_line(&mut input).unwrap();

    if !input.trim().eq_ignore_ascii_case("y") {
        log::info!("{}", "Terminating.".if_supports_color(Stdout, |t| t.dimmed()));
        std::process::exit(0);
    }
}

/// A single-thread runtime; remote calls run one at a time on it.
pub(crate) fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("Failed to create tokio runtime")
}

/// The standard spinner used while a sweep is running.
pub(crate) fn spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("  {spinner:.cyan} {msg}")
            .expect("static pattern")
            .tick_chars("/-\\|"),
    );
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

/// Mask a secret, showing only the first 2 characters.
pub(crate) fn mask_value(s: &str) -> String {
    if s.len() <= 2 {
        "****".to_string()
    } else {
        format!("{}****", &s[..2])
    }
}
