use super::*;

use serde_json::{Value, json};
use shopkeep_catalog::CatalogItem;

fn attr() -> ExpiryAttribute {
    ExpiryAttribute {
        key: "Square:attr-key".to_owned(),
        definition_id: "DEFINITION".to_owned(),
    }
}

fn row(expiry: &str, price: &str) -> PurchaseOrderRow {
    PurchaseOrderRow {
        sku: Sku::parse("123456789").unwrap(),
        expiry_date: expiry.to_owned(),
        price: price.to_owned(),
    }
}

/// A single-variation item as the search endpoint returns it.
fn single_variation_item() -> CatalogItem {
    serde_json::from_value(json!({
        "type": "ITEM",
        "id": "ITEM_ID",
        "version": 3,
        "item_data": {
            "name": "Oat Milk 1L",
            "variations": [
                {
                    "type": "ITEM_VARIATION",
                    "id": "VAR_1",
                    "item_variation_data": {
                        "item_id": "ITEM_ID",
                        "sku": "123456789",
                        "price_money": { "amount": 450, "currency": "CAD" }
                    }
                }
            ]
        }
    }))
    .unwrap()
}

/// A two-variation item with an item-level attribute map and a stockable
/// conversion on the second variation.
fn multi_variation_item() -> CatalogItem {
    serde_json::from_value(json!({
        "type": "ITEM",
        "id": "ITEM_ID",
        "custom_attribute_values": {
            "Square:attr-key": {
                "name": "expiry-date",
                "key": "Square:attr-key",
                "custom_attribute_definition_id": "DEFINITION",
                "type": "NUMBER",
                "number_value": "20250101"
            }
        },
        "item_data": {
            "name": "Kombucha",
            "variations": [
                {
                    "type": "ITEM_VARIATION",
                    "id": "VAR_A",
                    "item_variation_data": {
                        "item_id": "ITEM_ID",
                        "sku": "123456789",
                        "price_money": { "amount": 700, "currency": "CAD" }
                    }
                },
                {
                    "type": "ITEM_VARIATION",
                    "id": "VAR_B",
                    "item_variation_data": {
                        "item_id": "ITEM_ID",
                        "sku": "123456789",
                        "price_money": { "amount": 2500, "currency": "CAD" },
                        "stockable_conversion": {
                            "stockable_item_variation_id": "VAR_A",
                            "stockable_quantity": "4"
                        }
                    }
                }
            ]
        }
    }))
    .unwrap()
}

#[test]
fn modify_rewrites_price_and_attribute_only() {
    let candidate = CleanseCandidate {
        row: row("20261231", "19.99"),
        action: CleanseAction::Modify,
        item: single_variation_item(),
    };
    let item = cleanse_item(candidate, &attr()).unwrap();

    // Identity and name untouched.
    assert_eq!(item.id, "ITEM_ID");
    assert_eq!(item.item_data.name, "Oat Milk 1L");
    let variation = &item.item_data.variations[0];
    assert_eq!(variation.id, "VAR_1");
    assert_eq!(variation.item_variation_data.item_id.as_deref(), Some("ITEM_ID"));

    // Price converted to cents.
    assert_eq!(variation.item_variation_data.price_money.as_ref().unwrap().amount, 1999);

    // Attribute created on the single variation.
    let values = variation.custom_attribute_values.as_ref().unwrap();
    let value = &values["Square:attr-key"];
    assert_eq!(value.number_value.as_deref(), Some("20261231"));
    assert_eq!(value.custom_attribute_definition_id.as_deref(), Some("DEFINITION"));
    assert_eq!(value.attribute_type.as_deref(), Some("NUMBER"));
}

#[test]
fn duplicate_gets_placeholder_ids_and_name_stamp() {
    let candidate = CleanseCandidate {
        row: row("20261231", "4.5"),
        action: CleanseAction::Duplicate,
        item: single_variation_item(),
    };
    let item = cleanse_item(candidate, &attr()).unwrap();

    assert!(item.id.starts_with('#'), "item id should be a placeholder");
    let variation = &item.item_data.variations[0];
    assert!(variation.id.starts_with('#'));
    assert_ne!(item.id, variation.id);
    // Back-reference must not survive into the created object.
    assert!(variation.item_variation_data.item_id.is_none());

    assert_eq!(item.item_data.name, "Oat Milk 1L20261231");
    assert_eq!(variation.item_variation_data.price_money.as_ref().unwrap().amount, 450);
}

#[test]
fn duplicate_repoints_stockable_conversion_at_first_variation() {
    let candidate = CleanseCandidate {
        row: row("20261231", "25"),
        action: CleanseAction::Duplicate,
        item: multi_variation_item(),
    };
    let item = cleanse_item(candidate, &attr()).unwrap();

    let first_id = item.item_data.variations[0].id.clone();
    assert!(first_id.starts_with('#'));
    let second = &item.item_data.variations[1];
    assert_eq!(
        second
            .item_variation_data
            .stockable_conversion
            .as_ref()
            .unwrap()
            .stockable_item_variation_id,
        first_id
    );
}

#[test]
fn item_level_attribute_map_is_updated_in_place() {
    let candidate = CleanseCandidate {
        row: row("20270615", "7"),
        action: CleanseAction::Modify,
        item: multi_variation_item(),
    };
    let item = cleanse_item(candidate, &attr()).unwrap();

    let values = item.custom_attribute_values.as_ref().unwrap();
    assert_eq!(values["Square:attr-key"].number_value.as_deref(), Some("20270615"));
    // The single-variation path was not taken.
    assert!(item.item_data.variations[0].custom_attribute_values.is_none());
    // Price lands on the first variation: 7 -> 700 cents.
    assert_eq!(
        item.item_data.variations[0].item_variation_data.price_money.as_ref().unwrap().amount,
        700
    );
}

#[test]
fn created_attribute_lands_at_item_level_for_multi_variation_items() {
    let mut bare = multi_variation_item();
    bare.custom_attribute_values = None;

    let candidate = CleanseCandidate {
        row: row("20270615", "7"),
        action: CleanseAction::Modify,
        item: bare,
    };
    let item = cleanse_item(candidate, &attr()).unwrap();

    assert!(item.custom_attribute_values.is_some());
    assert!(item.item_data.variations[0].custom_attribute_values.is_none());
}

#[test]
fn variation_attribute_map_is_preferred_when_item_has_none() {
    let mut item = single_variation_item();
    // Give the variation an existing (stale) expiry value.
    let candidate = CleanseCandidate {
        row: row("20250101", "1"),
        action: CleanseAction::Modify,
        item: item.clone(),
    };
    item = cleanse_item(candidate, &attr()).unwrap();

    // Second pass updates the same map instead of creating another.
    let candidate = CleanseCandidate {
        row: row("20261231", "2"),
        action: CleanseAction::Modify,
        item,
    };
    let item = cleanse_item(candidate, &attr()).unwrap();

    assert!(item.custom_attribute_values.is_none());
    let values = item.item_data.variations[0].custom_attribute_values.as_ref().unwrap();
    assert_eq!(values.len(), 1);
    assert_eq!(values["Square:attr-key"].number_value.as_deref(), Some("20261231"));
}

#[test]
fn malformed_price_is_fatal_and_names_the_sku() {
    let candidate = CleanseCandidate {
        row: row("20261231", "19.999"),
        action: CleanseAction::Modify,
        item: single_variation_item(),
    };
    match cleanse_item(candidate, &attr()) {
        Err(CleanseError::Price { sku, .. }) => assert_eq!(sku.as_str(), "123456789"),
        other => panic!("expected price error, got {other:?}"),
    }
}

#[test]
fn item_without_variations_is_rejected() {
    let item: CatalogItem = serde_json::from_value(json!({
        "type": "ITEM",
        "id": "X",
        "item_data": { "name": "Ghost" }
    }))
    .unwrap();
    let candidate = CleanseCandidate {
        row: row("20261231", "1"),
        action: CleanseAction::Modify,
        item,
    };
    assert!(matches!(
        cleanse_item(candidate, &attr()),
        Err(CleanseError::NoVariations { .. })
    ));
}

#[test]
fn missing_price_money_is_rejected() {
    let item: CatalogItem = serde_json::from_value(json!({
        "type": "ITEM",
        "id": "X",
        "item_data": {
            "name": "Unpriced",
            "variations": [
                { "type": "ITEM_VARIATION", "id": "V", "item_variation_data": { "sku": "123456789" } }
            ]
        }
    }))
    .unwrap();
    let candidate = CleanseCandidate {
        row: row("20261231", "1"),
        action: CleanseAction::Modify,
        item,
    };
    assert!(matches!(
        cleanse_item(candidate, &attr()),
        Err(CleanseError::MissingPrice { .. })
    ));
}

#[test]
fn cleansed_duplicate_serializes_without_dropped_fields() {
    let candidate = CleanseCandidate {
        row: row("20261231", "4.50"),
        action: CleanseAction::Duplicate,
        item: single_variation_item(),
    };
    let item = cleanse_item(candidate, &attr()).unwrap();
    let out: Value = serde_json::to_value(&item).unwrap();

    // Fields the rewrite never touched are still in the payload.
    assert_eq!(out["version"], 3);
    assert_eq!(
        out["item_data"]["variations"][0]["item_variation_data"]["sku"],
        "123456789"
    );
    // And the back-reference is gone rather than null.
    assert!(
        out["item_data"]["variations"][0]["item_variation_data"]
            .get("item_id")
            .is_none()
    );
}

#[test]
fn counts_match_requires_every_row_matched() {
    let sweep = CleanseSweep {
        candidates: vec![],
        missing_skus: vec![],
    };
    assert!(sweep.counts_match(0));
    assert!(!sweep.counts_match(1));
}
