//! Catalog item cleansing.
//!
//! The renewal workflow: every purchase-order row names a SKU that is
//! being restocked with a new expiry date and price. Items that still
//! have stock on hand (or already carry several batches) are duplicated
//! into a new batch object; sold-out single-batch items are modified in
//! place. "Cleansing" is the payload rewrite that makes a retrieved
//! catalog object safe to submit back: placeholder ids for creations,
//! expiry stamp on the name, expiry custom attribute, and the new price.

use std::collections::BTreeMap;

use uuid::Uuid;

use shopkeep_catalog::{
    CatalogClient, CatalogError, CatalogItem, CustomAttributeValue, ProductType,
    SearchCatalogItemsRequest,
};
use shopkeep_core::{PriceError, Sku, append_expiry, parse_price_cents};
use shopkeep_sheets::PurchaseOrderRow;

/// How a matched catalog item is to be resubmitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanseAction {
    /// Create a fresh batch object alongside the existing one.
    Duplicate,
    /// Rewrite the existing object in place.
    Modify,
}

/// A purchase-order row matched to its catalog item.
#[derive(Debug)]
pub struct CleanseCandidate {
    pub row: PurchaseOrderRow,
    pub action: CleanseAction,
    pub item: CatalogItem,
}

/// Result of the decision sweep over the purchase-order rows.
#[derive(Debug, Default)]
pub struct CleanseSweep {
    pub candidates: Vec<CleanseCandidate>,
    /// Rows whose SKU returned no catalog match; any entry here aborts
    /// the run before anything is written.
    pub missing_skus: Vec<Sku>,
}

impl CleanseSweep {
    /// The pre-write consistency check: every sheet row must have found
    /// exactly one candidate.
    pub fn counts_match(&self, row_count: usize) -> bool {
        self.candidates.len() == row_count
    }
}

/// The custom attribute that stores expiry dates, as configured for the
/// merchant account.
#[derive(Debug, Clone)]
pub struct ExpiryAttribute {
    pub key: String,
    pub definition_id: String,
}

/// Errors from the sweep or the payload rewrite. All of these are fatal
/// to the renewal run; nothing is submitted after one occurs.
#[derive(Debug, thiserror::Error)]
pub enum CleanseError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("SKU {sku}: catalog item has no variations")]
    NoVariations { sku: Sku },

    #[error("SKU {sku}: {source}")]
    Price {
        sku: Sku,
        #[source]
        source: PriceError,
    },

    #[error("SKU {sku}: first variation has no price money to rewrite")]
    MissingPrice { sku: Sku },
}

/// Progress callback events for the decision sweep.
#[derive(Debug, Clone)]
pub enum CleanseProgress {
    Searching {
        sku: Sku,
        index: usize,
        total: usize,
    },
    Done,
}

/// Decide duplicate-vs-modify for every purchase-order row.
///
/// More than one match means the item already has multiple batches, so
/// the new batch is another duplicate. A single match is decided by its
/// on-hand count at the location: zero means the old batch is gone and
/// the object can be modified in place; anything still in stock forces a
/// duplicate. Negative counts are a bookkeeping defect: reported, then
/// treated like zero. Any API failure here is fatal.
pub async fn sweep_rows(
    client: &CatalogClient,
    location_id: &str,
    rows: &[PurchaseOrderRow],
    progress: &dyn Fn(CleanseProgress),
) -> Result<CleanseSweep, CleanseError> {
    let mut sweep = CleanseSweep::default();

    for (index, row) in rows.iter().enumerate() {
        progress(CleanseProgress::Searching {
            sku: row.sku.clone(),
            index,
            total: rows.len(),
        });

        let request = SearchCatalogItemsRequest {
            text_filter: Some(row.sku.to_string()),
            enabled_location_ids: vec![location_id.to_owned()],
            product_types: vec![ProductType::Regular],
            ..Default::default()
        };
        let mut items = client.search_catalog_items(&request).await?.items;

        match items.len() {
            0 => {
                sweep.missing_skus.push(row.sku.clone());
            }
            1 => {
                let item = items.remove(0);
                let variation_id = item
                    .item_data
                    .variations
                    .first()
                    .map(|v| v.id.clone())
                    .ok_or_else(|| CleanseError::NoVariations {
                        sku: row.sku.clone(),
                    })?;

                let count = client
                    .retrieve_inventory_count(&variation_id, location_id)
                    .await?;
                log::debug!("SKU {} has {count} on hand", row.sku);

                let action = if count > 0 {
                    CleanseAction::Duplicate
                } else {
                    if count < 0 {
                        log::error!("{} has an inventory count of {count}", row.sku);
                        log::error!("inventory below zero, fix the count in the catalog");
                    }
                    CleanseAction::Modify
                };
                sweep.candidates.push(CleanseCandidate {
                    row: row.clone(),
                    action,
                    item,
                });
            }
            _ => {
                // Several batches already exist; the first object is the
                // template for the new one.
                sweep.candidates.push(CleanseCandidate {
                    row: row.clone(),
                    action: CleanseAction::Duplicate,
                    item: items.swap_remove(0),
                });
            }
        }
    }

    progress(CleanseProgress::Done);
    Ok(sweep)
}

/// Rewrite a candidate's payload according to its action.
///
/// Duplicates get placeholder ids (so the upsert creates instead of
/// overwriting), lose their variation back-references, have any
/// stockable conversion repointed at the first variation's new
/// placeholder, and take the expiry stamp on their name. Both actions
/// write the expiry attribute and the first variation's price.
pub fn cleanse_item(
    candidate: CleanseCandidate,
    attr: &ExpiryAttribute,
) -> Result<CatalogItem, CleanseError> {
    let CleanseCandidate {
        row,
        action,
        mut item,
    } = candidate;

    if item.item_data.variations.is_empty() {
        return Err(CleanseError::NoVariations { sku: row.sku });
    }

    if action == CleanseAction::Duplicate {
        item.id = placeholder_id();
        for variation in &mut item.item_data.variations {
            variation.id = placeholder_id();
            variation.item_variation_data.item_id = None;
        }
        let first_id = item.item_data.variations[0].id.clone();
        for variation in &mut item.item_data.variations {
            if let Some(conversion) = &mut variation.item_variation_data.stockable_conversion {
                conversion.stockable_item_variation_id = first_id.clone();
            }
        }

        item.item_data.name = append_expiry(&item.item_data.name, &row.expiry_date);
    }

    write_expiry_attribute(&mut item, attr, &row.expiry_date);

    let cents = parse_price_cents(&row.price).map_err(|source| CleanseError::Price {
        sku: row.sku.clone(),
        source,
    })?;
    match &mut item.item_data.variations[0].item_variation_data.price_money {
        Some(money) => money.amount = cents,
        None => return Err(CleanseError::MissingPrice { sku: row.sku }),
    }

    Ok(item)
}

fn placeholder_id() -> String {
    format!("#{}", Uuid::new_v4())
}

/// Write the expiry date into whichever custom-attribute map the item
/// keeps: the item-level map (multi-variation layout), the first
/// variation's map (single-variation layout), or a newly created map
/// when the item has never had the attribute.
fn write_expiry_attribute(item: &mut CatalogItem, attr: &ExpiryAttribute, expiry: &str) {
    if let Some(values) = &mut item.custom_attribute_values {
        set_expiry_value(values, attr, expiry);
        return;
    }
    if let Some(values) = &mut item.item_data.variations[0].custom_attribute_values {
        set_expiry_value(values, attr, expiry);
        return;
    }

    log::warn!(
        "{:?} has no expiry attribute yet; creating one",
        item.item_data.name
    );
    let mut values = BTreeMap::new();
    set_expiry_value(&mut values, attr, expiry);
    if item.item_data.variations.len() == 1 {
        item.item_data.variations[0].custom_attribute_values = Some(values);
    } else {
        item.custom_attribute_values = Some(values);
    }
}

fn set_expiry_value(
    values: &mut BTreeMap<String, CustomAttributeValue>,
    attr: &ExpiryAttribute,
    expiry: &str,
) {
    let value = values
        .entry(attr.key.clone())
        .or_insert_with(|| CustomAttributeValue {
            name: Some("expiry-date".to_owned()),
            key: Some(attr.key.clone()),
            custom_attribute_definition_id: Some(attr.definition_id.clone()),
            attribute_type: Some("NUMBER".to_owned()),
            ..Default::default()
        });
    value.number_value = Some(expiry.to_owned());
}

#[cfg(test)]
#[path = "tests/cleanse_tests.rs"]
mod tests;
