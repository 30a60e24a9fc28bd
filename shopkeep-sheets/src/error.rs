/// Errors that can occur fetching or parsing the purchase-order template.
#[derive(Debug, thiserror::Error)]
pub enum SheetsError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid or expired drive token")]
    Unauthorized,

    #[error("drive error (HTTP {status}): {message}")]
    Server { status: u16, message: String },

    #[error("no spreadsheet in the purchase-order folder matches {0:?}")]
    TemplateNotFound(String),

    #[error("template is missing the {0:?} column")]
    MissingColumn(&'static str),

    #[error("template row {line}: {message}")]
    BadRow { line: usize, message: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
