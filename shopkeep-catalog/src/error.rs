use std::fmt;

use crate::types::ApiError;

/// Errors returned by the catalog API as a displayable list.
///
/// The API reports failures as a list of category/code/detail records;
/// all of them are kept so the log shows everything the server said.
#[derive(Debug, Clone)]
pub struct ApiErrorList(pub Vec<ApiError>);

impl fmt::Display for ApiErrorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("(no error detail)");
        }
        for (i, e) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}/{}", e.category, e.code)?;
            if let Some(detail) = &e.detail {
                write!(f, ": {detail}")?;
            }
        }
        Ok(())
    }
}

/// Errors that can occur talking to the catalog API.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid or expired access token")]
    Unauthorized,

    #[error("catalog API error: {0}")]
    Api(ApiErrorList),

    #[error("server error (HTTP {status}): {message}")]
    Server { status: u16, message: String },

    #[error("response is missing {field}")]
    MissingField { field: &'static str },

    #[error("unexpected response shape: {0}")]
    UnexpectedResponse(String),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

impl CatalogError {
    /// The API error records carried by this error, if any.
    pub fn api_errors(&self) -> &[ApiError] {
        match self {
            CatalogError::Api(list) => &list.0,
            _ => &[],
        }
    }
}
