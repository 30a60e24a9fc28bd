//! Shared application settings.
//!
//! Every command reads the same resolution chain: environment variables
//! first, then `~/.config/shopkeep/config.toml`. Nothing is embedded in
//! the binary and nothing falls back to a hard-coded account value; a
//! command that needs a missing setting says which env var or config key
//! provides it.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use shopkeep_catalog::{Credentials, Environment};

use crate::cleanse::ExpiryAttribute;

const ENV_ACCESS_TOKEN: &str = "SHOPKEEP_ACCESS_TOKEN";
const ENV_ENVIRONMENT: &str = "SHOPKEEP_ENVIRONMENT";
const ENV_LOCATION_ID: &str = "SHOPKEEP_LOCATION_ID";
const ENV_IMAGE_ROOT: &str = "SHOPKEEP_IMAGE_ROOT";
const ENV_EXPIRY_KEY: &str = "SHOPKEEP_EXPIRY_ATTRIBUTE_KEY";
const ENV_EXPIRY_DEFINITION: &str = "SHOPKEEP_EXPIRY_ATTRIBUTE_DEFINITION_ID";
const ENV_SHEETS_TOKEN: &str = "SHOPKEEP_SHEETS_TOKEN";
const ENV_PO_FOLDER: &str = "SHOPKEEP_PURCHASE_ORDER_FOLDER_ID";

/// Errors resolving or persisting settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("missing {name}; set {env} or add {key:?} to {path}")]
    Missing {
        name: &'static str,
        env: &'static str,
        key: &'static str,
        path: String,
    },

    #[error("invalid environment {0:?} (use \"production\" or \"sandbox\")")]
    InvalidEnvironment(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Canonical path to the config file: `~/.config/shopkeep/config.toml`.
pub fn config_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("shopkeep").join("config.toml")
}

/// TOML config file format.
#[derive(Debug, Default, Serialize, Deserialize)]
struct ConfigFile {
    catalog: Option<CatalogSection>,
    sheets: Option<SheetsSection>,
    images: Option<ImagesSection>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct CatalogSection {
    access_token: Option<String>,
    environment: Option<String>,
    location_id: Option<String>,
    expiry_attribute_key: Option<String>,
    expiry_attribute_definition_id: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct SheetsSection {
    token: Option<String>,
    purchase_order_folder_id: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct ImagesSection {
    root: Option<String>,
}

/// Resolved settings for one run.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub access_token: Option<String>,
    pub environment: Environment,
    pub location_id: Option<String>,
    pub image_root: Option<PathBuf>,
    pub expiry_attribute_key: Option<String>,
    pub expiry_attribute_definition_id: Option<String>,
    pub sheets_token: Option<String>,
    pub purchase_order_folder_id: Option<String>,
}

impl Settings {
    /// Resolve every field from env vars and the config file.
    ///
    /// Missing fields stay `None`; only the command that needs a field
    /// turns its absence into an error. An unparseable environment name
    /// fails immediately; silently talking to production instead of
    /// sandbox is worse than stopping.
    pub fn load() -> Result<Settings, SettingsError> {
        let file = load_config_file().unwrap_or_default();
        let catalog = file.catalog.unwrap_or_default();
        let sheets = file.sheets.unwrap_or_default();
        let images = file.images.unwrap_or_default();

        let environment = match resolve(ENV_ENVIRONMENT, catalog.environment) {
            Some(name) => Environment::parse(&name)
                .ok_or_else(|| SettingsError::InvalidEnvironment(name))?,
            None => Environment::default(),
        };

        Ok(Settings {
            access_token: resolve(ENV_ACCESS_TOKEN, catalog.access_token),
            environment,
            location_id: resolve(ENV_LOCATION_ID, catalog.location_id),
            image_root: resolve(ENV_IMAGE_ROOT, images.root).map(PathBuf::from),
            expiry_attribute_key: resolve(ENV_EXPIRY_KEY, catalog.expiry_attribute_key),
            expiry_attribute_definition_id: resolve(
                ENV_EXPIRY_DEFINITION,
                catalog.expiry_attribute_definition_id,
            ),
            sheets_token: resolve(ENV_SHEETS_TOKEN, sheets.token),
            purchase_order_folder_id: resolve(ENV_PO_FOLDER, sheets.purchase_order_folder_id),
        })
    }

    /// Credentials for the catalog API.
    pub fn credentials(&self) -> Result<Credentials, SettingsError> {
        let token = self.access_token.clone().ok_or(missing(
            "catalog access token",
            ENV_ACCESS_TOKEN,
            "catalog.access_token",
        ))?;
        Ok(Credentials::new(token, self.environment))
    }

    pub fn require_location_id(&self) -> Result<&str, SettingsError> {
        self.location_id.as_deref().ok_or(missing(
            "location id",
            ENV_LOCATION_ID,
            "catalog.location_id",
        ))
    }

    pub fn require_image_root(&self) -> Result<&PathBuf, SettingsError> {
        self.image_root
            .as_ref()
            .ok_or(missing("image root", ENV_IMAGE_ROOT, "images.root"))
    }

    /// The configured expiry custom attribute (key + definition id).
    pub fn expiry_attribute(&self) -> Result<ExpiryAttribute, SettingsError> {
        let key = self.expiry_attribute_key.clone().ok_or(missing(
            "expiry attribute key",
            ENV_EXPIRY_KEY,
            "catalog.expiry_attribute_key",
        ))?;
        let definition_id = self.expiry_attribute_definition_id.clone().ok_or(missing(
            "expiry attribute definition id",
            ENV_EXPIRY_DEFINITION,
            "catalog.expiry_attribute_definition_id",
        ))?;
        Ok(ExpiryAttribute { key, definition_id })
    }

    pub fn require_sheets_token(&self) -> Result<&str, SettingsError> {
        self.sheets_token
            .as_deref()
            .ok_or(missing("drive token", ENV_SHEETS_TOKEN, "sheets.token"))
    }

    pub fn require_purchase_order_folder(&self) -> Result<&str, SettingsError> {
        self.purchase_order_folder_id.as_deref().ok_or(missing(
            "purchase-order folder id",
            ENV_PO_FOLDER,
            "sheets.purchase_order_folder_id",
        ))
    }

    /// Persist the current values to the config file, creating parent
    /// directories as needed. Returns the path written.
    pub fn save_to_file(&self) -> Result<PathBuf, SettingsError> {
        let path = config_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = ConfigFile {
            catalog: Some(CatalogSection {
                access_token: self.access_token.clone(),
                environment: Some(self.environment.to_string()),
                location_id: self.location_id.clone(),
                expiry_attribute_key: self.expiry_attribute_key.clone(),
                expiry_attribute_definition_id: self.expiry_attribute_definition_id.clone(),
            }),
            sheets: Some(SheetsSection {
                token: self.sheets_token.clone(),
                purchase_order_folder_id: self.purchase_order_folder_id.clone(),
            }),
            images: Some(ImagesSection {
                root: self
                    .image_root
                    .as_ref()
                    .map(|p| p.to_string_lossy().into_owned()),
            }),
        };

        let serialized = toml::to_string_pretty(&file)?;
        let tmp = path.with_extension("toml.tmp");
        std::fs::write(&tmp, &serialized)?;
        std::fs::rename(&tmp, &path)?;
        Ok(path)
    }
}

fn missing(name: &'static str, env: &'static str, key: &'static str) -> SettingsError {
    SettingsError::Missing {
        name,
        env,
        key,
        path: config_path().display().to_string(),
    }
}

fn resolve(env_var: &str, file_value: Option<String>) -> Option<String> {
    std::env::var(env_var)
        .ok()
        .filter(|v| !v.is_empty())
        .or(file_value)
}

fn load_config_file() -> Option<ConfigFile> {
    let content = std::fs::read_to_string(config_path()).ok()?;
    toml::from_str(&content).ok()
}

/// Where a setting's value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingSource {
    EnvVar(&'static str),
    ConfigFile,
    Default,
    Missing,
}

impl std::fmt::Display for SettingSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EnvVar(var) => write!(f, "env ${var}"),
            Self::ConfigFile => write!(f, "config file"),
            Self::Default => write!(f, "default"),
            Self::Missing => write!(f, "not set"),
        }
    }
}

/// Provenance of each setting, for `config show`.
#[derive(Debug)]
pub struct SettingsSources {
    pub access_token: SettingSource,
    pub environment: SettingSource,
    pub location_id: SettingSource,
    pub image_root: SettingSource,
    pub expiry_attribute_key: SettingSource,
    pub expiry_attribute_definition_id: SettingSource,
    pub sheets_token: SettingSource,
    pub purchase_order_folder_id: SettingSource,
}

/// Determine where each setting is coming from.
pub fn settings_sources() -> SettingsSources {
    let file = load_config_file().unwrap_or_default();
    let catalog = file.catalog.unwrap_or_default();
    let sheets = file.sheets.unwrap_or_default();
    let images = file.images.unwrap_or_default();

    let source = |env: &'static str, file_value: &Option<String>, default: bool| {
        if std::env::var(env).is_ok_and(|v| !v.is_empty()) {
            SettingSource::EnvVar(env)
        } else if file_value.is_some() {
            SettingSource::ConfigFile
        } else if default {
            SettingSource::Default
        } else {
            SettingSource::Missing
        }
    };

    SettingsSources {
        access_token: source(ENV_ACCESS_TOKEN, &catalog.access_token, false),
        environment: source(ENV_ENVIRONMENT, &catalog.environment, true),
        location_id: source(ENV_LOCATION_ID, &catalog.location_id, false),
        image_root: source(ENV_IMAGE_ROOT, &images.root, false),
        expiry_attribute_key: source(ENV_EXPIRY_KEY, &catalog.expiry_attribute_key, false),
        expiry_attribute_definition_id: source(
            ENV_EXPIRY_DEFINITION,
            &catalog.expiry_attribute_definition_id,
            false,
        ),
        sheets_token: source(ENV_SHEETS_TOKEN, &sheets.token, false),
        purchase_order_folder_id: source(ENV_PO_FOLDER, &sheets.purchase_order_folder_id, false),
    }
}
