//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "shopkeep")]
#[command(about = "Catalog image ingestion and item upkeep for the point of sale", long_about = None)]
#[command(version)]
pub(crate) struct Cli {
    /// Image root directory (overrides the configured images.root)
    #[arg(short, long, global = true)]
    pub root: Option<PathBuf>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Validate pending product images, match them to catalog records,
    /// and upload them
    Images {
        /// Classify and match only; move and upload nothing
        #[arg(short = 'n', long)]
        dry_run: bool,
    },

    /// Duplicate or modify catalog items from a purchase-order sheet
    Renew {
        /// Purchase order id; the sheet whose title contains it is used
        purchase_order_id: String,
    },

    /// Find sold-out batches that have a successor batch in place
    Stockout {
        /// Strip the expiry stamp from each successor batch's name
        #[arg(long)]
        renew_names: bool,

        /// Delete the depleted batch objects (asks for confirmation)
        #[arg(long)]
        delete_depleted: bool,
    },

    /// Report pending files that were already uploaded
    Dedupe,

    /// List the merchant's locations
    Locations,

    /// Manage shopkeep configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show current settings and their sources
    Show,

    /// Interactively set up the config file
    Setup,

    /// Print the config file path
    Path,
}
