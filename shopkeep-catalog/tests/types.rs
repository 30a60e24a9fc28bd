use serde_json::{Value, json};

use shopkeep_catalog::{
    ApiError, ApiErrorList, CatalogItem, ProductType, SearchCatalogItemsRequest, StockLevel,
};

fn sample_item() -> Value {
    json!({
        "type": "ITEM",
        "id": "R2D2C3PO",
        "updated_at": "2026-05-01T10:00:00Z",
        "version": 7,
        "item_data": {
            "name": "Oat Milk 1L",
            "description": "Barista edition",
            "variations": [
                {
                    "type": "ITEM_VARIATION",
                    "id": "VARIATION1",
                    "item_variation_data": {
                        "item_id": "R2D2C3PO",
                        "sku": "123456789",
                        "pricing_type": "FIXED_PRICING",
                        "price_money": { "amount": 450, "currency": "CAD" }
                    }
                }
            ]
        }
    })
}

#[test]
fn item_round_trip_preserves_unmodeled_fields() {
    let original = sample_item();
    let item: CatalogItem = serde_json::from_value(original.clone()).unwrap();

    // Modeled fields are visible...
    assert_eq!(item.id, "R2D2C3PO");
    assert_eq!(item.item_data.name, "Oat Milk 1L");
    let variation = &item.item_data.variations[0];
    assert_eq!(variation.item_variation_data.sku.as_deref(), Some("123456789"));
    assert_eq!(
        variation.item_variation_data.price_money.as_ref().unwrap().amount,
        450
    );

    // ...and everything the server sent survives a round trip.
    let round_tripped = serde_json::to_value(&item).unwrap();
    assert_eq!(round_tripped, original);
}

#[test]
fn mutated_item_keeps_extras() {
    let mut item: CatalogItem = serde_json::from_value(sample_item()).unwrap();
    item.id = "#placeholder".to_owned();
    item.item_data.name.push_str("20261231");

    let out = serde_json::to_value(&item).unwrap();
    assert_eq!(out["id"], "#placeholder");
    assert_eq!(out["item_data"]["name"], "Oat Milk 1L20261231");
    // Unmodeled siblings are still present after the rewrite.
    assert_eq!(out["version"], 7);
    assert_eq!(out["item_data"]["description"], "Barista edition");
    assert_eq!(
        out["item_data"]["variations"][0]["item_variation_data"]["pricing_type"],
        "FIXED_PRICING"
    );
}

#[test]
fn absent_variations_deserialize_to_empty() {
    let item: CatalogItem = serde_json::from_value(json!({
        "type": "ITEM",
        "id": "X",
        "item_data": { "name": "Bare" }
    }))
    .unwrap();
    assert!(item.item_data.variations.is_empty());
    assert!(item.custom_attribute_values.is_none());
}

#[test]
fn text_search_request_omits_unset_fields() {
    let req = SearchCatalogItemsRequest::text("123456789");
    let body = serde_json::to_value(&req).unwrap();
    assert_eq!(body, json!({ "text_filter": "123456789" }));
}

#[test]
fn stock_out_search_request_shape() {
    let req = SearchCatalogItemsRequest {
        stock_levels: vec![StockLevel::Out],
        enabled_location_ids: vec!["L1".to_owned()],
        product_types: vec![ProductType::Regular],
        ..Default::default()
    };
    let body = serde_json::to_value(&req).unwrap();
    assert_eq!(
        body,
        json!({
            "stock_levels": ["OUT"],
            "enabled_location_ids": ["L1"],
            "product_types": ["REGULAR"]
        })
    );
}

#[test]
fn api_error_list_display_includes_every_record() {
    let list = ApiErrorList(vec![
        ApiError {
            category: "INVALID_REQUEST_ERROR".to_owned(),
            code: "NOT_FOUND".to_owned(),
            detail: Some("object not found".to_owned()),
            field: None,
        },
        ApiError {
            category: "RATE_LIMIT_ERROR".to_owned(),
            code: "RATE_LIMITED".to_owned(),
            detail: None,
            field: None,
        },
    ]);
    let shown = list.to_string();
    assert!(shown.contains("INVALID_REQUEST_ERROR/NOT_FOUND: object not found"));
    assert!(shown.contains("RATE_LIMIT_ERROR/RATE_LIMITED"));
}

#[test]
fn error_payload_deserializes() {
    let e: ApiError = serde_json::from_value(json!({
        "category": "AUTHENTICATION_ERROR",
        "code": "UNAUTHORIZED",
        "detail": "This request could not be authorized."
    }))
    .unwrap();
    assert_eq!(e.category, "AUTHENTICATION_ERROR");
    assert_eq!(e.code, "UNAUTHORIZED");
    assert_eq!(e.detail.as_deref(), Some("This request could not be authorized."));
}
