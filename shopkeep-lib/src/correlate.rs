//! SKU-to-catalog correlation.
//!
//! Each valid pending image is checked against the catalog with a
//! text-filter search on its SKU. Files whose SKU has a catalog record
//! are ready to upload; files without one wait until the item is added
//! through the sheet; a failed search leaves its file in neither set and
//! is surfaced in the report.

use shopkeep_catalog::{CatalogClient, SearchCatalogItemsRequest};
use shopkeep_core::Sku;

use crate::router::ValidImage;

/// A pending file matched to a catalog object.
#[derive(Debug, Clone)]
pub struct CatalogMatch {
    pub file_name: String,
    pub sku: Sku,
    /// Id of the first object the search returned.
    pub object_id: String,
}

/// A search that failed; the file is skipped this run, not retried.
#[derive(Debug, Clone)]
pub struct SearchFailure {
    pub file_name: String,
    pub sku: Sku,
    pub error: String,
}

/// Progress callback events for the correlation sweep.
#[derive(Debug, Clone)]
pub enum CorrelateProgress {
    Searching {
        sku: Sku,
        index: usize,
        total: usize,
    },
    Done,
}

/// Result of the correlation sweep.
///
/// `existing` and `non_existing` are disjoint by construction; their
/// union is the valid set minus the failures.
#[derive(Debug, Default)]
pub struct CorrelationReport {
    /// Number of files searched.
    pub searched: usize,
    pub existing: Vec<CatalogMatch>,
    pub non_existing: Vec<ValidImage>,
    pub failures: Vec<SearchFailure>,
}

impl CorrelationReport {
    /// The debrief check: every searched SKU ended up on one side.
    /// False means at least one search failed and its file was skipped.
    pub fn all_accounted_for(&self) -> bool {
        self.existing.len() + self.non_existing.len() == self.searched
    }
}

/// Run the correlation sweep over the valid pending images, one search
/// per file, in order.
pub async fn correlate(
    client: &CatalogClient,
    images: &[ValidImage],
    progress: &dyn Fn(CorrelateProgress),
) -> CorrelationReport {
    let mut report = CorrelationReport {
        searched: images.len(),
        ..Default::default()
    };

    for (index, image) in images.iter().enumerate() {
        progress(CorrelateProgress::Searching {
            sku: image.sku.clone(),
            index,
            total: images.len(),
        });

        let request = SearchCatalogItemsRequest::text(image.sku.as_str());
        let outcome = match client.search_catalog_items(&request).await {
            Ok(resp) => Ok(resp.items.first().map(|item| item.id.clone())),
            Err(e) => {
                log::warn!("SKU {} search failed: {e}", image.sku);
                Err(e.to_string())
            }
        };
        record_search_outcome(&mut report, image, outcome);
    }

    progress(CorrelateProgress::Done);
    report
}

/// File one search result into the report: a first object id means the
/// SKU exists, an empty result means it doesn't, and a failed search
/// puts the file in neither partition.
fn record_search_outcome(
    report: &mut CorrelationReport,
    image: &ValidImage,
    outcome: Result<Option<String>, String>,
) {
    match outcome {
        Ok(Some(object_id)) => report.existing.push(CatalogMatch {
            file_name: image.file_name.clone(),
            sku: image.sku.clone(),
            object_id,
        }),
        Ok(None) => report.non_existing.push(image.clone()),
        Err(error) => report.failures.push(SearchFailure {
            file_name: image.file_name.clone(),
            sku: image.sku.clone(),
            error,
        }),
    }
}

#[cfg(test)]
#[path = "tests/correlate_tests.rs"]
mod tests;
