use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use shopkeep_lib::{ImageLayout, Settings, find_reuploads};

use crate::error::CliError;

/// Report pending files that already exist in the uploaded directory.
/// Nothing is moved; the list is for manual cleanup.
pub(crate) fn run(root_override: Option<PathBuf>) -> Result<(), CliError> {
    let settings = Settings::load()?;
    let root = match root_override {
        Some(root) => root,
        None => settings.require_image_root()?.clone(),
    };
    let layout = ImageLayout::new(root);

    let report = find_reuploads(&layout)?;

    log::info!("{}", "Duplicate check:".if_supports_color(Stdout, |t| t.bold()));
    log::info!("  uploaded files: {}", report.uploaded_count);
    log::info!("  pending files:  {}", report.pending_count);

    if report.duplicates.is_empty() {
        log::info!(
            "  {} nothing in the pending directory was uploaded before",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        );
        return Ok(());
    }

    log::warn!(
        "  {} {} pending files were already uploaded:",
        "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
        report.duplicates.len(),
    );
    for name in &report.duplicates {
        log::warn!("    {}", name.if_supports_color(Stdout, |t| t.dimmed()));
    }

    Ok(())
}
