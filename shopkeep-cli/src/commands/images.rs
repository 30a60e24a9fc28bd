use std::path::{Path, PathBuf};

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use shopkeep_catalog::CatalogClient;
use shopkeep_lib::{
    CorrelateProgress, CorrelationReport, ImageLayout, RoutePlan, Settings, UploadProgress,
    UploadSummary, correlate, execute_moves, plan_routes, upload_images,
};

use crate::error::CliError;

/// Run the images pipeline: classify and route the pending directory,
/// correlate valid SKUs against the catalog, upload matched images, and
/// file everything into its destination directory.
pub(crate) fn run(root_override: Option<PathBuf>, dry_run: bool) -> Result<(), CliError> {
    let settings = Settings::load()?;
    let root = match root_override {
        Some(root) => root,
        None => settings.require_image_root()?.clone(),
    };
    let layout = ImageLayout::new(root);
    let pending = layout.pending();

    log::info!(
        "Checking pending images in: {}",
        pending.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    if dry_run {
        log::info!(
            "{}",
            "Dry run: nothing will be moved or uploaded".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    log::info!("");

    // Phase 1: classification
    let plan = plan_routes(&pending)?;
    print_route_debrief(&plan);

    if !dry_run {
        move_bucket(
            &plan.invalid_types,
            "invalid file types",
            &pending,
            &layout.invalid_file_type(),
        );
        move_bucket(
            &plan.invalid_sizes,
            "oversized files",
            &pending,
            &layout.invalid_file_size(),
        );
        move_bucket(
            &plan.invalid_names,
            "invalid file names",
            &pending,
            &layout.invalid_file_name(),
        );
    }

    if plan.valid.is_empty() {
        log::info!(
            "{}",
            "No valid SKU images to check against the catalog.".if_supports_color(Stdout, |t| t.dimmed()),
        );
        return Ok(());
    }

    // Phase 2: correlation (read-only, so a dry run skips the prompt)
    if !dry_run {
        crate::confirm_or_exit(&format!(
            "Next step: check {} SKUs against the catalog.",
            plan.valid.len()
        ));
    }

    let client = CatalogClient::new(&settings.credentials()?)?;
    let rt = crate::runtime();

    let pb = crate::spinner();
    let progress = |p: CorrelateProgress| match p {
        CorrelateProgress::Searching { sku, index, total } => {
            pb.set_message(format!("[{}/{}] Checking SKU {}", index + 1, total, sku));
        }
        CorrelateProgress::Done => pb.finish_and_clear(),
    };
    let report = rt.block_on(correlate(&client, &plan.valid, &progress));
    print_correlation_debrief(&report);

    if dry_run {
        return Ok(());
    }

    // Phase 3: file non-existing SKUs for the sheet
    let non_existing: Vec<String> = report
        .non_existing
        .iter()
        .map(|v| v.file_name.clone())
        .collect();
    move_bucket(
        &non_existing,
        "files for SKUs not in the catalog",
        &pending,
        &layout.not_yet_on_excel(),
    );

    if report.existing.is_empty() {
        log::info!(
            "{}",
            "No matched SKUs to upload.".if_supports_color(Stdout, |t| t.dimmed()),
        );
        return Ok(());
    }

    // Phase 4: upload and file the uploaded images
    crate::confirm_or_exit(&format!(
        "Next step: upload {} images against their catalog objects.",
        report.existing.len()
    ));

    let pb = crate::spinner();
    let progress = |p: UploadProgress| match p {
        UploadProgress::Uploading {
            file_name,
            index,
            total,
        } => {
            pb.set_message(format!("[{}/{}] Uploading {}", index + 1, total, file_name));
        }
        UploadProgress::Done => pb.finish_and_clear(),
    };
    let summary = rt.block_on(upload_images(&client, &pending, &report.existing, &progress));
    print_upload_summary(&summary);

    move_bucket(
        &summary.uploaded,
        "uploaded files",
        &pending,
        &layout.uploaded(),
    );

    Ok(())
}

/// Move one bucket behind a confirmation; empty buckets move nothing.
fn move_bucket(files: &[String], what: &str, source: &Path, dest: &Path) {
    if files.is_empty() {
        log::info!(
            "{}",
            format!("No {what} to move.").if_supports_color(Stdout, |t| t.dimmed()),
        );
        return;
    }

    crate::confirm_or_exit(&format!(
        "Next step: move {} {what} to {}.",
        files.len(),
        dest.display()
    ));

    let summary = execute_moves(files, source, dest);
    log::info!(
        "  {} {} files moved",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        summary.moved,
    );
    for failure in &summary.failures {
        log::warn!(
            "  {} {}: {} ({})",
            "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
            failure.file_name,
            failure.message,
            failure.kind.describe(),
        );
    }
    log::info!("");
}

/// The classification debrief: bucket counts, their contents, and the
/// add-up consistency check.
fn print_route_debrief(plan: &RoutePlan) {
    log::info!("{}", "Classification:".if_supports_color(Stdout, |t| t.bold()));
    log::info!("  scanned:            {}", plan.scanned);
    log::info!("  valid SKUs:         {}", plan.valid.len());
    log::info!("  duplicate variants: {}", plan.duplicates.len());
    log::info!("  invalid names:      {}", plan.invalid_names.len());
    log::info!("  invalid types:      {}", plan.invalid_types.len());
    log::info!("  invalid sizes:      {}", plan.invalid_sizes.len());

    if plan.totals_add_up() {
        log::info!(
            "  {} every scanned file is in exactly one bucket",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        );
    } else {
        log::warn!(
            "  {} bucket sizes do not add up to the scan count; check the directory before continuing",
            "\u{2718}".if_supports_color(Stdout, |t| t.red()),
        );
    }

    for name in &plan.invalid_names {
        log::info!(
            "  {} {} (invalid name)",
            "?".if_supports_color(Stdout, |t| t.yellow()),
            name.if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    for name in &plan.invalid_types {
        log::info!(
            "  {} {} (invalid type)",
            "?".if_supports_color(Stdout, |t| t.yellow()),
            name.if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    for name in &plan.invalid_sizes {
        log::info!(
            "  {} {} (over 15 MB)",
            "?".if_supports_color(Stdout, |t| t.yellow()),
            name.if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    log::info!("");
}

/// The SKU debrief: partition sizes and whether every search landed.
fn print_correlation_debrief(report: &CorrelationReport) {
    log::info!("{}", "SKU check:".if_supports_color(Stdout, |t| t.bold()));
    log::info!("  in catalog:     {}", report.existing.len());
    log::info!("  not in catalog: {}", report.non_existing.len());

    if report.all_accounted_for() {
        log::info!(
            "  {} every SKU search got an answer",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        );
    } else {
        log::warn!(
            "  {} {} searches failed; those files stay in the pending directory",
            "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
            report.failures.len(),
        );
        for failure in &report.failures {
            log::warn!("    {}: {}", failure.sku, failure.error);
        }
    }

    for m in &report.existing {
        log::debug!("  {} -> object {}", m.file_name, m.object_id);
    }
    log::info!("");
}

fn print_upload_summary(summary: &UploadSummary) {
    if !summary.uploaded.is_empty() {
        log::info!(
            "  {} {} images uploaded",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
            summary.uploaded.len(),
        );
    }
    for (file, error) in &summary.failures {
        log::warn!(
            "  {} {file}: {error}",
            "\u{2718}".if_supports_color(Stdout, |t| t.red()),
        );
    }
    log::info!("");
}
