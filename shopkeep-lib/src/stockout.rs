//! Stock-out detection and batch succession.
//!
//! When a batch sells out, its successor (same product name plus a newer
//! expiry stamp) should take over: the successor's name loses the stamp
//! and the depleted object goes away. This module finds the sold-out
//! items, pairs each with its successor by name-prefix search, and
//! carries the two follow-up operations.

use shopkeep_catalog::{
    CatalogClient, CatalogError, CatalogItem, ProductType, SearchCatalogItemsRequest, StockLevel,
};
use shopkeep_core::strip_expiry;

/// A sold-out batch and the successor that replaces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchPair {
    /// Product name the pair was discovered under.
    pub name: String,
    /// Object id of the depleted batch.
    pub depleted_id: String,
    /// Object id of the next batch of the same product.
    pub successor_id: String,
}

/// Progress callback events for the pairing sweep.
#[derive(Debug, Clone)]
pub enum StockoutProgress {
    /// One page of sold-out items fetched so far.
    Listing { found: usize },
    Pairing {
        name: String,
        index: usize,
        total: usize,
    },
    Done,
}

/// Names of all items with zero stock at the location.
///
/// Walks the cursor-paginated stock-level search to the end; an error on
/// any page is fatal to the sweep (a partial list would silently skip
/// batches).
pub async fn find_stock_out_names(
    client: &CatalogClient,
    location_id: &str,
    progress: &dyn Fn(StockoutProgress),
) -> Result<Vec<String>, CatalogError> {
    let mut names = Vec::new();
    let mut cursor: Option<String> = None;

    loop {
        let request = SearchCatalogItemsRequest {
            stock_levels: vec![StockLevel::Out],
            enabled_location_ids: vec![location_id.to_owned()],
            product_types: vec![ProductType::Regular],
            cursor: cursor.take(),
            ..Default::default()
        };
        let resp = client.search_catalog_items(&request).await?;

        names.extend(resp.items.into_iter().map(|item| item.item_data.name));
        progress(StockoutProgress::Listing { found: names.len() });

        match resp.cursor {
            Some(next) if !next.is_empty() => cursor = Some(next),
            _ => break,
        }
    }

    Ok(names)
}

/// Pair each sold-out item name with its successor batch.
///
/// A prefix search on the name returns the batches of that product in
/// catalog order; two or more objects mean a successor exists and the
/// first two form a pair. A failed search is logged and skipped; the
/// remaining names still pair up. Returns the pairs and the skipped
/// names with their errors.
pub async fn find_batch_pairs(
    client: &CatalogClient,
    names: &[String],
    progress: &dyn Fn(StockoutProgress),
) -> (Vec<BatchPair>, Vec<(String, String)>) {
    let mut pairs = Vec::new();
    let mut failures = Vec::new();

    for (index, name) in names.iter().enumerate() {
        progress(StockoutProgress::Pairing {
            name: name.clone(),
            index,
            total: names.len(),
        });

        match client.search_objects_by_name_prefix(name).await {
            Ok(objects) => {
                if let Some(pair) = pair_from_siblings(name, &objects) {
                    pairs.push(pair);
                }
            }
            Err(e) => {
                log::warn!("prefix search for {name:?} failed: {e}");
                failures.push((name.clone(), e.to_string()));
            }
        }
    }

    progress(StockoutProgress::Done);
    (pairs, failures)
}

/// First and second sibling become the pair; a lone object has no
/// successor and produces none.
fn pair_from_siblings(name: &str, siblings: &[CatalogItem]) -> Option<BatchPair> {
    if siblings.len() < 2 {
        return None;
    }
    Some(BatchPair {
        name: name.to_owned(),
        depleted_id: siblings[0].id.clone(),
        successor_id: siblings[1].id.clone(),
    })
}

/// Outcome of renewing successor names.
#[derive(Debug, Default)]
pub struct RenewSummary {
    pub renamed: usize,
    /// Successors whose name carried no expiry stamp; left untouched.
    pub skipped: Vec<(String, String)>,
    pub failures: Vec<(String, String)>,
}

/// Strip the expiry stamp from each successor's name and upsert it back.
///
/// A successor whose name does not end in a full stamp was renamed by
/// hand at some point; it is reported and left alone rather than
/// truncated blindly.
pub async fn renew_successor_names(client: &CatalogClient, pairs: &[BatchPair]) -> RenewSummary {
    let mut summary = RenewSummary::default();

    for pair in pairs {
        let mut object = match client.retrieve_catalog_object(&pair.successor_id).await {
            Ok(object) => object,
            Err(e) => {
                log::warn!("retrieve of {} failed: {e}", pair.successor_id);
                summary.failures.push((pair.successor_id.clone(), e.to_string()));
                continue;
            }
        };

        let renewed = match strip_expiry(&object.item_data.name) {
            Some(head) => head.to_owned(),
            None => {
                log::warn!(
                    "{:?} has no trailing expiry stamp; leaving its name alone",
                    object.item_data.name
                );
                summary.skipped.push((
                    pair.successor_id.clone(),
                    object.item_data.name.clone(),
                ));
                continue;
            }
        };

        log::info!("renewing {:?} -> {renewed:?}", object.item_data.name);
        object.item_data.name = renewed;

        match client.upsert_catalog_object(&object).await {
            Ok(()) => summary.renamed += 1,
            Err(e) => {
                log::warn!("upsert of {} failed: {e}", pair.successor_id);
                summary.failures.push((pair.successor_id.clone(), e.to_string()));
            }
        }
    }

    summary
}

/// Delete the depleted batch objects in one call.
pub async fn delete_depleted(
    client: &CatalogClient,
    pairs: &[BatchPair],
) -> Result<(), CatalogError> {
    let ids: Vec<String> = pairs.iter().map(|p| p.depleted_id.clone()).collect();
    client.batch_delete_catalog_objects(&ids).await
}

#[cfg(test)]
#[path = "tests/stockout_tests.rs"]
mod tests;
