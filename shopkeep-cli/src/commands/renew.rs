use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use shopkeep_catalog::CatalogClient;
use shopkeep_lib::{CleanseAction, CleanseProgress, Settings, cleanse_item, sweep_rows};
use shopkeep_sheets::{DriveClient, parse_rows};

use crate::error::CliError;

/// Run the renewal pipeline: fetch the purchase-order sheet, decide
/// duplicate-vs-modify per row, rewrite the payloads, and submit them in
/// one batch.
pub(crate) fn run(purchase_order_id: &str) -> Result<(), CliError> {
    let settings = Settings::load()?;
    let location_id = settings.require_location_id()?.to_owned();
    let expiry_attr = settings.expiry_attribute()?;
    let sheets_token = settings.require_sheets_token()?.to_owned();
    let folder_id = settings.require_purchase_order_folder()?.to_owned();

    let rt = crate::runtime();

    // Fetch and parse the sheet.
    let drive = DriveClient::new(sheets_token)?;
    let pb = crate::spinner();
    pb.set_message(format!("Fetching purchase order {purchase_order_id}..."));
    let rows = rt.block_on(async {
        let file = drive.find_purchase_order(&folder_id, purchase_order_id).await?;
        let csv = drive.export_csv(&file.id).await?;
        Ok::<_, CliError>((file.name, csv))
    });
    pb.finish_and_clear();
    let (template_name, csv) = rows?;

    log::info!(
        "Template: {}",
        template_name.if_supports_color(Stdout, |t| t.cyan()),
    );
    let rows = parse_rows(&csv)?;
    log::info!("{} rows to renew", rows.len());
    if rows.is_empty() {
        log::info!(
            "{}",
            "Nothing to do.".if_supports_color(Stdout, |t| t.dimmed()),
        );
        return Ok(());
    }
    log::info!("");

    // Decide duplicate-vs-modify per row. Any API failure here is fatal.
    let client = CatalogClient::new(&settings.credentials()?)?;
    let pb = crate::spinner();
    let progress = |p: CleanseProgress| match p {
        CleanseProgress::Searching { sku, index, total } => {
            pb.set_message(format!("[{}/{}] Matching SKU {}", index + 1, total, sku));
        }
        CleanseProgress::Done => pb.finish_and_clear(),
    };
    let sweep = rt.block_on(sweep_rows(&client, &location_id, &rows, &progress))?;

    if !sweep.missing_skus.is_empty() {
        log::error!("The following SKUs do not exist in the catalog:");
        for sku in &sweep.missing_skus {
            log::error!("  {sku}");
        }
        return Err(CliError::other(
            "fix the sheet (or the catalog) and run again",
        ));
    }
    if !sweep.counts_match(rows.len()) {
        return Err(CliError::other(format!(
            "sheet has {} rows but {} catalog items matched; check manually before renewing",
            rows.len(),
            sweep.candidates.len(),
        )));
    }

    let duplicates = sweep
        .candidates
        .iter()
        .filter(|c| c.action == CleanseAction::Duplicate)
        .count();
    let modifies = sweep.candidates.len() - duplicates;
    log::info!("{}", "Renewal plan:".if_supports_color(Stdout, |t| t.bold()));
    log::info!("  new batch objects:    {duplicates}");
    log::info!("  modified in place:    {modifies}");
    for candidate in &sweep.candidates {
        let action = match candidate.action {
            CleanseAction::Duplicate => "duplicate",
            CleanseAction::Modify => "modify",
        };
        log::debug!(
            "  {} {} [{action}]",
            candidate.row.sku,
            candidate.item.item_data.name,
        );
    }
    log::info!("");

    // Rewrite every payload before anything is submitted; a single
    // malformed row aborts the whole batch.
    let mut log_entries = Vec::with_capacity(sweep.candidates.len());
    let mut objects = Vec::with_capacity(sweep.candidates.len());
    for candidate in sweep.candidates {
        log_entries.push((
            candidate.row.sku.to_string(),
            match candidate.action {
                CleanseAction::Duplicate => "duplicate",
                CleanseAction::Modify => "modify",
            },
            candidate.item.item_data.name.clone(),
        ));
        objects.push(cleanse_item(candidate, &expiry_attr)?);
    }

    crate::confirm_or_exit(&format!(
        "{} catalog items are ready to be submitted.",
        objects.len()
    ));

    rt.block_on(client.batch_upsert_catalog_objects(&objects))?;
    log::info!(
        "{} {} catalog items submitted",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        objects.len(),
    );

    if let Err(e) = write_run_log(purchase_order_id, &template_name, &log_entries) {
        log::warn!("Warning: could not write renewal log: {e}");
    }

    Ok(())
}

/// Write a plain-text record of what was submitted, so a renewal can be
/// audited after the fact.
fn write_run_log(
    purchase_order_id: &str,
    template_name: &str,
    entries: &[(String, &str, String)],
) -> std::io::Result<()> {
    use std::io::Write;

    let path = std::env::temp_dir().join(format!(
        "shopkeep-renewal-{}.log",
        chrono::Local::now().format("%Y%m%d-%H%M%S"),
    ));
    let mut file = std::fs::File::create(&path)?;

    writeln!(file, "=== Renewal Log ===")?;
    writeln!(
        file,
        "Date: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
    )?;
    writeln!(file, "Purchase order: {purchase_order_id}")?;
    writeln!(file, "Template: {template_name}")?;
    writeln!(file)?;
    for (sku, action, name) in entries {
        writeln!(file, "{sku}  [{action}]  {name}")?;
    }

    log::info!("Renewal log written to {}", path.display());
    Ok(())
}
