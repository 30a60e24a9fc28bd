use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use shopkeep_catalog::CatalogClient;
use shopkeep_lib::{
    Settings, StockoutProgress, delete_depleted, find_batch_pairs, find_stock_out_names,
    renew_successor_names,
};

use crate::error::CliError;

/// Run the stock-out sweep: list sold-out items at the location, pair
/// each with its successor batch, and optionally renew successor names
/// and delete the depleted objects.
pub(crate) fn run(renew_names: bool, delete: bool) -> Result<(), CliError> {
    let settings = Settings::load()?;
    let location_id = settings.require_location_id()?.to_owned();
    let client = CatalogClient::new(&settings.credentials()?)?;
    let rt = crate::runtime();

    let pb = crate::spinner();
    let progress = |p: StockoutProgress| match p {
        StockoutProgress::Listing { found } => {
            pb.set_message(format!("{found} sold-out items so far..."));
        }
        StockoutProgress::Pairing { name, index, total } => {
            pb.set_message(format!("[{}/{}] Pairing {}", index + 1, total, name));
        }
        StockoutProgress::Done => pb.finish_and_clear(),
    };

    let names = rt.block_on(find_stock_out_names(&client, &location_id, &progress))?;
    log::info!("{} items out of stock at {location_id}", names.len());

    let (pairs, failures) = rt.block_on(find_batch_pairs(&client, &names, &progress));

    for (name, error) in &failures {
        log::warn!(
            "  {} {name}: {error}",
            "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
        );
    }

    if pairs.is_empty() {
        log::info!(
            "{}",
            "No sold-out items have a successor batch in place.".if_supports_color(Stdout, |t| t.dimmed()),
        );
        return Ok(());
    }

    log::info!(
        "{}",
        format!("{} batch pairs found:", pairs.len()).if_supports_color(Stdout, |t| t.bold()),
    );
    for pair in &pairs {
        log::info!(
            "  {} {} {} {}",
            pair.name.if_supports_color(Stdout, |t| t.cyan()),
            pair.depleted_id.if_supports_color(Stdout, |t| t.dimmed()),
            "\u{2192}".if_supports_color(Stdout, |t| t.green()),
            pair.successor_id,
        );
    }
    log::info!("");

    if renew_names {
        let summary = rt.block_on(renew_successor_names(&client, &pairs));
        log::info!(
            "  {} {} successor names renewed",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
            summary.renamed,
        );
        for (id, name) in &summary.skipped {
            log::warn!(
                "  {} {id} kept its name {name:?} (no expiry stamp)",
                "?".if_supports_color(Stdout, |t| t.yellow()),
            );
        }
        for (id, error) in &summary.failures {
            log::warn!(
                "  {} {id}: {error}",
                "\u{2718}".if_supports_color(Stdout, |t| t.red()),
            );
        }
    } else {
        log::info!(
            "{}",
            "Run with --renew-names to strip expiry stamps from successor names."
                .if_supports_color(Stdout, |t| t.dimmed()),
        );
    }

    if delete {
        crate::confirm_or_exit(&format!(
            "About to delete {} depleted batch objects.",
            pairs.len()
        ));
        rt.block_on(delete_depleted(&client, &pairs))?;
        log::info!(
            "  {} {} depleted batches deleted",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
            pairs.len(),
        );
    } else {
        log::info!(
            "{}",
            "Run with --delete-depleted to remove the sold-out batch objects."
                .if_supports_color(Stdout, |t| t.dimmed()),
        );
    }

    Ok(())
}
