use std::io::Write;
use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use shopkeep_lib::{SettingSource, Settings, config_path, settings_sources};

use crate::error::CliError;
use crate::mask_value;

/// Show current settings and where each one comes from.
pub(crate) fn run_show() -> Result<(), CliError> {
    let path = config_path();
    let settings = Settings::load()?;
    let sources = settings_sources();

    log::info!(
        "{}",
        "shopkeep configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("");

    if path.exists() {
        log::info!(
            "  Config file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(exists)".if_supports_color(Stdout, |t| t.green()),
        );
    } else {
        log::info!(
            "  Config file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(not found)".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    log::info!("");

    let environment = settings.environment.to_string();
    let image_root = settings
        .image_root
        .as_ref()
        .map(|p| p.display().to_string());
    let fields: &[(&str, &SettingSource, Option<String>, bool)] = &[
        ("access_token", &sources.access_token, settings.access_token.clone(), true),
        ("environment", &sources.environment, Some(environment), false),
        ("location_id", &sources.location_id, settings.location_id.clone(), false),
        ("image_root", &sources.image_root, image_root, false),
        (
            "expiry_attribute_key",
            &sources.expiry_attribute_key,
            settings.expiry_attribute_key.clone(),
            false,
        ),
        (
            "expiry_attribute_definition_id",
            &sources.expiry_attribute_definition_id,
            settings.expiry_attribute_definition_id.clone(),
            false,
        ),
        ("sheets_token", &sources.sheets_token, settings.sheets_token.clone(), true),
        (
            "purchase_order_folder_id",
            &sources.purchase_order_folder_id,
            settings.purchase_order_folder_id.clone(),
            false,
        ),
    ];

    for (name, source, value, is_secret) in fields {
        let source_str = format!("({source})");
        match value {
            Some(v) => {
                let shown = if *is_secret { mask_value(v) } else { v.clone() };
                log::info!(
                    "  {} {} {}",
                    format!("{name}:").if_supports_color(Stdout, |t| t.cyan()),
                    shown,
                    source_str.if_supports_color(Stdout, |t| t.dimmed()),
                );
            }
            None => {
                log::info!(
                    "  {} {} {}",
                    format!("{name}:").if_supports_color(Stdout, |t| t.cyan()),
                    "not set".if_supports_color(Stdout, |t| t.yellow()),
                    source_str.if_supports_color(Stdout, |t| t.dimmed()),
                );
            }
        }
    }

    Ok(())
}

/// Interactively write the config file, defaulting each field to its
/// current value.
pub(crate) fn run_setup() -> Result<(), CliError> {
    log::info!(
        "{}",
        "shopkeep configuration setup".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("");

    let existing = Settings::load()?;

    log::info!(
        "  {}",
        "Catalog API:".if_supports_color(Stdout, |t| t.dimmed()),
    );
    let access_token = read_line("access_token", existing.access_token.as_deref(), true);
    let environment = read_line(
        "environment (production/sandbox)",
        Some(&existing.environment.to_string()),
        true,
    );
    let location_id = read_line("location_id", existing.location_id.as_deref(), false);
    let expiry_attribute_key = read_line(
        "expiry_attribute_key",
        existing.expiry_attribute_key.as_deref(),
        false,
    );
    let expiry_attribute_definition_id = read_line(
        "expiry_attribute_definition_id",
        existing.expiry_attribute_definition_id.as_deref(),
        false,
    );

    log::info!("");
    log::info!(
        "  {}",
        "Purchase-order sheets:".if_supports_color(Stdout, |t| t.dimmed()),
    );
    let sheets_token = read_line("sheets token", existing.sheets_token.as_deref(), false);
    let purchase_order_folder_id = read_line(
        "purchase_order_folder_id",
        existing.purchase_order_folder_id.as_deref(),
        false,
    );

    log::info!("");
    log::info!(
        "  {}",
        "Images:".if_supports_color(Stdout, |t| t.dimmed()),
    );
    let image_root = read_line(
        "image root directory",
        existing
            .image_root
            .as_ref()
            .map(|p| p.to_str().unwrap_or(""))
            .filter(|s| !s.is_empty()),
        false,
    );

    let environment = environment.expect("required field");
    let environment = shopkeep_catalog::Environment::parse(&environment)
        .ok_or_else(|| CliError::other(format!("invalid environment {environment:?}")))?;

    let settings = Settings {
        access_token,
        environment,
        location_id,
        image_root: image_root.map(PathBuf::from),
        expiry_attribute_key,
        expiry_attribute_definition_id,
        sheets_token,
        purchase_order_folder_id,
    };

    let path = settings.save_to_file()?;
    log::info!("");
    log::info!(
        "{} Configuration saved to {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        path.display().if_supports_color(Stdout, |t| t.cyan()),
    );

    Ok(())
}

/// Print the config file path.
pub(crate) fn run_path() -> Result<(), CliError> {
    println!("{}", config_path().display());
    Ok(())
}

/// Prompt for one field, offering the current value as the default.
fn read_line(prompt: &str, default: Option<&str>, required: bool) -> Option<String> {
    loop {
        if let Some(def) = default {
            print!("  {prompt} [{def}]: ");
        } else {
            print!("  {prompt}: ");
        }
        std::io::stdout().flush().unwrap();

        let mut input = String::new();
        std::io::stdin().read_line(&mut input).unwrap();
        let trimmed = input.trim().to_string();

        if trimmed.is_empty() {
            if let Some(def) = default {
                return Some(def.to_string());
            }
            if required {
                log::warn!(
                    "    {}",
                    "This field is required.".if_supports_color(Stdout, |t| t.yellow()),
                );
                continue;
            }
            return None;
        }
        return Some(trimmed);
    }
}
