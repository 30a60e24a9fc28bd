//! Request and response payloads for the catalog API.
//!
//! Catalog objects round-trip through these types: fields the tool
//! rewrites are modeled, everything else is preserved in flattened
//! `extra` maps so an upsert never drops data the server sent.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One error record from an API error payload.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiError {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

/// Error envelope the API wraps failures in.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorResponse {
    #[serde(default)]
    pub errors: Vec<ApiError>,
}

/// A catalog item object (`"type": "ITEM"`).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogItem {
    #[serde(rename = "type")]
    pub object_type: String,
    pub id: String,
    /// Item-level custom attributes. The API hoists attributes up here
    /// for multi-variation items; single-variation items keep them on
    /// the variation instead.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_attribute_values: Option<BTreeMap<String, CustomAttributeValue>>,
    pub item_data: ItemData,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ItemData {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variations: Vec<ItemVariation>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A variation object nested inside an item (`"type": "ITEM_VARIATION"`).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ItemVariation {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub object_type: Option<String>,
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_attribute_values: Option<BTreeMap<String, CustomAttributeValue>>,
    pub item_variation_data: ItemVariationData,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ItemVariationData {
    /// Back-reference to the parent item; must be dropped when the
    /// variation is re-created under a placeholder item id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_money: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stockable_conversion: Option<StockableConversion>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Money {
    pub amount: i64,
    pub currency: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StockableConversion {
    pub stockable_item_variation_id: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A custom attribute value keyed into an object's
/// `custom_attribute_values` map.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CustomAttributeValue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_attribute_definition_id: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub attribute_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_value: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A merchant location record.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Location {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ---------------------------------------------------------------------------
// Search requests
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StockLevel {
    Out,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductType {
    Regular,
    GiftCard,
}

/// Body for the item-search endpoint. Unset fields are omitted from the
/// request entirely.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchCatalogItemsRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_filter: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub stock_levels: Vec<StockLevel>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub enabled_location_ids: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub product_types: Vec<ProductType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
}

impl SearchCatalogItemsRequest {
    /// A plain text-filter search, the shape used for SKU lookups.
    pub fn text(filter: impl Into<String>) -> Self {
        Self {
            text_filter: Some(filter.into()),
            ..Default::default()
        }
    }
}

/// Body for the object-search endpoint (prefix query over an attribute).
#[derive(Debug, Clone, Serialize)]
pub(crate) struct SearchCatalogObjectsRequest {
    pub object_types: Vec<&'static str>,
    pub include_deleted_objects: bool,
    pub include_related_objects: bool,
    pub query: ObjectQuery,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct ObjectQuery {
    pub prefix_query: PrefixQuery,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct PrefixQuery {
    pub attribute_name: String,
    pub attribute_prefix: String,
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
pub struct SearchCatalogItemsResponse {
    /// Omitted by the server when nothing matched; an empty list here
    /// means "no results".
    #[serde(default)]
    pub items: Vec<CatalogItem>,
    #[serde(default)]
    pub cursor: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SearchCatalogObjectsResponse {
    #[serde(default)]
    pub objects: Vec<CatalogItem>,
    #[serde(default)]
    #[allow(dead_code)]
    pub cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RetrieveCatalogObjectResponse {
    pub object: CatalogItem,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RetrieveInventoryCountResponse {
    #[serde(default)]
    pub counts: Vec<InventoryCount>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct InventoryCount {
    /// Decimal quantity as a string, e.g. `"3"` or `"-1"`.
    #[serde(default)]
    pub quantity: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ListLocationsResponse {
    #[serde(default)]
    pub locations: Vec<Location>,
}

/// Response body for upsert/delete/image calls. The tool only cares that
/// the call succeeded; the echoed objects are ignored.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct AcknowledgedResponse {}

// ---------------------------------------------------------------------------
// Mutating requests
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub(crate) struct UpsertCatalogObjectRequest<'a> {
    pub idempotency_key: String,
    pub object: &'a CatalogItem,
}

#[derive(Debug, Serialize)]
pub(crate) struct BatchUpsertCatalogObjectsRequest<'a> {
    pub idempotency_key: String,
    pub batches: Vec<ObjectBatch<'a>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ObjectBatch<'a> {
    pub objects: &'a [CatalogItem],
}

#[derive(Debug, Serialize)]
pub(crate) struct BatchDeleteCatalogObjectsRequest<'a> {
    pub object_ids: &'a [String],
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateCatalogImageRequest {
    pub idempotency_key: String,
    pub object_id: String,
    pub image: ImageObject,
}

#[derive(Debug, Serialize)]
pub(crate) struct ImageObject {
    #[serde(rename = "type")]
    pub object_type: &'static str,
    pub id: &'static str,
    pub image_data: ImageData,
}

#[derive(Debug, Serialize)]
pub(crate) struct ImageData {
    pub name: String,
}

impl ImageObject {
    /// A new image object under a placeholder id, named after the SKU it
    /// illustrates.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            object_type: "IMAGE",
            id: "#new-image",
            image_data: ImageData { name: name.into() },
        }
    }
}
