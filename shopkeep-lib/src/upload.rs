//! Image upload against matched catalog objects.

use std::path::Path;

use shopkeep_catalog::CatalogClient;

use crate::correlate::CatalogMatch;

/// Progress callback events for the upload loop.
#[derive(Debug, Clone)]
pub enum UploadProgress {
    Uploading {
        file_name: String,
        index: usize,
        total: usize,
    },
    Done,
}

/// Outcome of the upload loop.
#[derive(Debug, Default)]
pub struct UploadSummary {
    /// File names whose image was attached; only these move to the
    /// uploaded directory afterwards.
    pub uploaded: Vec<String>,
    pub failures: Vec<(String, String)>,
}

/// Attach each matched file to its catalog object, one at a time.
///
/// A failed upload is logged and skipped; the file stays in the pending
/// directory for the next run.
pub async fn upload_images(
    client: &CatalogClient,
    pending_dir: &Path,
    matches: &[CatalogMatch],
    progress: &dyn Fn(UploadProgress),
) -> UploadSummary {
    let mut summary = UploadSummary::default();

    for (index, m) in matches.iter().enumerate() {
        progress(UploadProgress::Uploading {
            file_name: m.file_name.clone(),
            index,
            total: matches.len(),
        });

        let path = pending_dir.join(&m.file_name);
        match client
            .create_catalog_image(&m.object_id, m.sku.as_str(), &path)
            .await
        {
            Ok(()) => summary.uploaded.push(m.file_name.clone()),
            Err(e) => {
                log::warn!("upload of {} failed: {e}", m.file_name);
                summary.failures.push((m.file_name.clone(), e.to_string()));
            }
        }
    }

    progress(UploadProgress::Done);
    summary
}
