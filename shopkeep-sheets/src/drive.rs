//! File-hosting API client for the purchase-order folder.

use std::time::Duration;

use serde::Deserialize;

use crate::error::SheetsError;

const BASE_URL: &str = "https://www.googleapis.com/drive/v3";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// A file entry in the purchase-order folder.
#[derive(Debug, Clone, Deserialize)]
pub struct DriveFile {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Default, Deserialize)]
struct FileListResponse {
    #[serde(default)]
    files: Vec<DriveFile>,
}

/// Client for the drive that hosts the purchase-order spreadsheets.
pub struct DriveClient {
    http: reqwest::Client,
    token: String,
}

impl DriveClient {
    pub fn new(token: impl Into<String>) -> Result<Self, SheetsError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            token: token.into(),
        })
    }

    /// List the non-trashed files inside a folder.
    pub async fn list_folder(&self, folder_id: &str) -> Result<Vec<DriveFile>, SheetsError> {
        let query = format!("'{folder_id}' in parents and trashed=false");
        let resp = self
            .http
            .get(format!("{BASE_URL}/files"))
            .query(&[("q", query.as_str()), ("fields", "files(id,name)")])
            .bearer_auth(&self.token)
            .send()
            .await?;
        let resp = check_status(resp)?;
        let body: FileListResponse = resp.json().await?;
        Ok(body.files)
    }

    /// Find the purchase-order sheet whose title carries the given id.
    ///
    /// Titles follow a loose "PO-1234 supplier-name" convention, so a
    /// substring match on the id is how the sheet has always been found.
    pub async fn find_purchase_order(
        &self,
        folder_id: &str,
        purchase_order_id: &str,
    ) -> Result<DriveFile, SheetsError> {
        let files = self.list_folder(folder_id).await?;
        for file in files {
            if file.name.contains(purchase_order_id) {
                log::debug!("matched template {:?} ({})", file.name, file.id);
                return Ok(file);
            }
        }
        Err(SheetsError::TemplateNotFound(purchase_order_id.to_owned()))
    }

    /// Download a spreadsheet's CSV export.
    pub async fn export_csv(&self, file_id: &str) -> Result<String, SheetsError> {
        let resp = self
            .http
            .get(format!("{BASE_URL}/files/{file_id}/export"))
            .query(&[("mimeType", "text/csv")])
            .bearer_auth(&self.token)
            .send()
            .await?;
        let resp = check_status(resp)?;
        Ok(resp.text().await?)
    }
}

fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, SheetsError> {
    let status = resp.status();
    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        return Err(SheetsError::Unauthorized);
    }
    if !status.is_success() {
        return Err(SheetsError::Server {
            status: status.as_u16(),
            message: status.canonical_reason().unwrap_or("unknown").to_owned(),
        });
    }
    Ok(resp)
}
