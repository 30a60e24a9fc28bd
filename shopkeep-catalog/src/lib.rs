//! Client for the commerce-catalog API.
//!
//! Thin typed wrapper over the catalog vendor's HTTP endpoints: item and
//! object search, inventory counts, object upsert/retrieve/delete, image
//! attachment, and location listing. Payload types preserve fields they
//! don't model so a retrieved object can be mutated and written back
//! without losing anything.

pub mod client;
pub mod credentials;
pub mod error;
pub mod types;

pub use client::CatalogClient;
pub use credentials::{Credentials, Environment};
pub use error::{ApiErrorList, CatalogError};
pub use types::{
    ApiError, CatalogItem, CustomAttributeValue, ItemData, ItemVariation, ItemVariationData,
    Location, Money, ProductType, SearchCatalogItemsRequest, SearchCatalogItemsResponse,
    StockLevel, StockableConversion,
};
