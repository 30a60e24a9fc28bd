use std::path::Path;
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::multipart::{Form, Part};
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::credentials::Credentials;
use crate::error::{ApiErrorList, CatalogError};
use crate::types::{
    AcknowledgedResponse, BatchDeleteCatalogObjectsRequest, BatchUpsertCatalogObjectsRequest,
    CatalogItem, CreateCatalogImageRequest, ErrorResponse, ImageObject, ListLocationsResponse,
    Location, ObjectBatch, ObjectQuery, PrefixQuery, RetrieveCatalogObjectResponse,
    RetrieveInventoryCountResponse, SearchCatalogItemsRequest, SearchCatalogItemsResponse,
    SearchCatalogObjectsRequest, UpsertCatalogObjectRequest,
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the commerce-catalog API.
///
/// All calls are issued one at a time by the callers; the client carries
/// no retry or backoff, so a failed call surfaces immediately.
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: String,
    access_token: String,
}

impl CatalogClient {
    /// Create a client for the environment named in the credentials.
    pub fn new(creds: &Credentials) -> Result<Self, CatalogError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            base_url: creds.environment.base_url().to_owned(),
            access_token: creds.access_token.clone(),
        })
    }

    /// Search catalog items (text filter, stock levels, pagination).
    pub async fn search_catalog_items(
        &self,
        body: &SearchCatalogItemsRequest,
    ) -> Result<SearchCatalogItemsResponse, CatalogError> {
        self.post_json("/v2/catalog/search-catalog-items", body).await
    }

    /// Search catalog ITEM objects whose name starts with `prefix`.
    pub async fn search_objects_by_name_prefix(
        &self,
        prefix: &str,
    ) -> Result<Vec<CatalogItem>, CatalogError> {
        let body = SearchCatalogObjectsRequest {
            object_types: vec!["ITEM"],
            include_deleted_objects: false,
            include_related_objects: false,
            query: ObjectQuery {
                prefix_query: PrefixQuery {
                    attribute_name: "name".to_owned(),
                    attribute_prefix: prefix.to_owned(),
                },
            },
        };
        let resp: crate::types::SearchCatalogObjectsResponse =
            self.post_json("/v2/catalog/search", &body).await?;
        Ok(resp.objects)
    }

    /// On-hand count of a variation at one location.
    ///
    /// A response without counts is an error: every tracked variation
    /// must report a quantity before stock decisions are made on it.
    pub async fn retrieve_inventory_count(
        &self,
        catalog_object_id: &str,
        location_id: &str,
    ) -> Result<i64, CatalogError> {
        let url = format!(
            "{}/v2/inventory/{}?location_ids={}",
            self.base_url, catalog_object_id, location_id
        );
        let resp = self
            .http
            .get(url)
            .bearer_auth(&self.access_token)
            .send()
            .await?;
        let body: RetrieveInventoryCountResponse = self.read_response(resp).await?;

        let count = body
            .counts
            .first()
            .ok_or(CatalogError::MissingField { field: "counts" })?;
        let quantity = count
            .quantity
            .as_deref()
            .ok_or(CatalogError::MissingField { field: "counts[0].quantity" })?;
        quantity.parse::<i64>().map_err(|_| {
            CatalogError::UnexpectedResponse(format!("quantity {quantity:?} is not an integer"))
        })
    }

    /// Retrieve a single catalog object by id.
    pub async fn retrieve_catalog_object(
        &self,
        object_id: &str,
    ) -> Result<CatalogItem, CatalogError> {
        let url = format!(
            "{}/v2/catalog/object/{}?include_related_objects=false",
            self.base_url, object_id
        );
        let resp = self
            .http
            .get(url)
            .bearer_auth(&self.access_token)
            .send()
            .await?;
        let body: RetrieveCatalogObjectResponse = self.read_response(resp).await?;
        Ok(body.object)
    }

    /// Upsert a single catalog object under a fresh idempotency key.
    pub async fn upsert_catalog_object(&self, object: &CatalogItem) -> Result<(), CatalogError> {
        let body = UpsertCatalogObjectRequest {
            idempotency_key: Uuid::new_v4().to_string(),
            object,
        };
        let _: AcknowledgedResponse = self.post_json("/v2/catalog/object", &body).await?;
        Ok(())
    }

    /// Upsert a batch of catalog objects under a fresh idempotency key.
    pub async fn batch_upsert_catalog_objects(
        &self,
        objects: &[CatalogItem],
    ) -> Result<(), CatalogError> {
        let body = BatchUpsertCatalogObjectsRequest {
            idempotency_key: Uuid::new_v4().to_string(),
            batches: vec![ObjectBatch { objects }],
        };
        let _: AcknowledgedResponse = self.post_json("/v2/catalog/batch-upsert", &body).await?;
        Ok(())
    }

    /// Delete catalog objects by id.
    pub async fn batch_delete_catalog_objects(
        &self,
        object_ids: &[String],
    ) -> Result<(), CatalogError> {
        let body = BatchDeleteCatalogObjectsRequest { object_ids };
        let _: AcknowledgedResponse = self.post_json("/v2/catalog/batch-delete", &body).await?;
        Ok(())
    }

    /// Attach an image file to a catalog object.
    ///
    /// Multipart upload: a JSON `request` part describing the new image
    /// object, and the file bytes as `image_file`.
    pub async fn create_catalog_image(
        &self,
        object_id: &str,
        image_name: &str,
        image_path: &Path,
    ) -> Result<(), CatalogError> {
        let request = CreateCatalogImageRequest {
            idempotency_key: Uuid::new_v4().to_string(),
            object_id: object_id.to_owned(),
            image: ImageObject::named(image_name),
        };

        let file_name = image_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("image")
            .to_owned();
        let bytes = std::fs::read(image_path)?;

        let form = Form::new()
            .part(
                "request",
                Part::text(serde_json::to_string(&request)?).mime_str("application/json")?,
            )
            .part("image_file", Part::bytes(bytes).file_name(file_name));

        let resp = self
            .http
            .post(format!("{}/v2/catalog/images", self.base_url))
            .bearer_auth(&self.access_token)
            .multipart(form)
            .send()
            .await?;
        let _: AcknowledgedResponse = self.read_response(resp).await?;
        Ok(())
    }

    /// List the merchant's locations.
    pub async fn list_locations(&self) -> Result<Vec<Location>, CatalogError> {
        let resp = self
            .http
            .get(format!("{}/v2/locations", self.base_url))
            .bearer_auth(&self.access_token)
            .send()
            .await?;
        let body: ListLocationsResponse = self.read_response(resp).await?;
        Ok(body.locations)
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, CatalogError> {
        log::debug!("POST {path}");
        let resp = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .bearer_auth(&self.access_token)
            .json(body)
            .send()
            .await?;
        self.read_response(resp).await
    }

    /// Triage a response: auth failures and API error payloads first,
    /// then parse the expected body.
    async fn read_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, CatalogError> {
        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(CatalogError::Unauthorized);
        }

        let text = resp.text().await?;
        if !status.is_success() {
            if let Ok(body) = serde_json::from_str::<ErrorResponse>(&text) {
                if !body.errors.is_empty() {
                    return Err(CatalogError::Api(ApiErrorList(body.errors)));
                }
            }
            return Err(CatalogError::Server {
                status: status.as_u16(),
                message: text.chars().take(200).collect(),
            });
        }

        serde_json::from_str(&text).map_err(|e| {
            let snippet: String = text.chars().take(200).collect();
            CatalogError::UnexpectedResponse(format!("{e}. Response: {snippet}"))
        })
    }
}
