use thiserror::Error;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Missing or invalid configuration
    #[error("{0}")]
    Settings(#[from] shopkeep_lib::SettingsError),

    /// Catalog API failure
    #[error("{0}")]
    Catalog(#[from] shopkeep_catalog::CatalogError),

    /// Purchase-order sheet failure
    #[error("{0}")]
    Sheets(#[from] shopkeep_sheets::SheetsError),

    /// Cleansing sweep or payload rewrite failure
    #[error("{0}")]
    Cleanse(#[from] shopkeep_lib::CleanseError),

    /// Catch-all for other fatal conditions
    #[error("{0}")]
    Other(String),
}

impl CliError {
    pub(crate) fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}
