use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use shopkeep_catalog::CatalogClient;
use shopkeep_lib::Settings;

use crate::error::CliError;

/// List the merchant's locations; used to find the location id the
/// renew/stockout commands are configured with.
pub(crate) fn run() -> Result<(), CliError> {
    let settings = Settings::load()?;
    let client = CatalogClient::new(&settings.credentials()?)?;
    let rt = crate::runtime();

    let locations = rt.block_on(client.list_locations())?;

    if locations.is_empty() {
        log::info!(
            "{}",
            "No locations on this account.".if_supports_color(Stdout, |t| t.dimmed()),
        );
        return Ok(());
    }

    for location in &locations {
        log::info!(
            "{} {}",
            location.id.if_supports_color(Stdout, |t| t.bold()),
            location
                .name
                .as_deref()
                .unwrap_or("(unnamed)")
                .if_supports_color(Stdout, |t| t.cyan()),
        );
        for (key, value) in &location.extra {
            log::info!(
                "  {} {}",
                format!("{key}:").if_supports_color(Stdout, |t| t.cyan()),
                render_value(value),
            );
        }
        log::info!("");
    }

    Ok(())
}

fn render_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
