use super::*;

use serde_json::json;

fn item(id: &str, name: &str) -> CatalogItem {
    serde_json::from_value(json!({
        "type": "ITEM",
        "id": id,
        "item_data": { "name": name }
    }))
    .unwrap()
}

#[test]
fn two_siblings_form_a_pair() {
    let siblings = vec![
        item("OLD", "Oat Milk 1L"),
        item("NEW", "Oat Milk 1L20261231"),
    ];
    let pair = pair_from_siblings("Oat Milk 1L", &siblings).unwrap();
    assert_eq!(
        pair,
        BatchPair {
            name: "Oat Milk 1L".to_owned(),
            depleted_id: "OLD".to_owned(),
            successor_id: "NEW".to_owned(),
        }
    );
}

#[test]
fn extra_siblings_still_pair_first_and_second() {
    let siblings = vec![
        item("A", "Kombucha20260101"),
        item("B", "Kombucha20260301"),
        item("C", "Kombucha20260601"),
    ];
    let pair = pair_from_siblings("Kombucha", &siblings).unwrap();
    assert_eq!(pair.depleted_id, "A");
    assert_eq!(pair.successor_id, "B");
}

#[test]
fn lone_batch_has_no_successor() {
    let siblings = vec![item("ONLY", "Oat Milk 1L")];
    assert!(pair_from_siblings("Oat Milk 1L", &siblings).is_none());
    assert!(pair_from_siblings("Oat Milk 1L", &[]).is_none());
}
