use super::*;

use serde_json::json;

#[test]
fn keys_come_back_in_tier_order_regardless_of_attachment() {
    let reference = SelectionRef::by_coordinate(16.1, 80.1)
        .and(SelectionKey::ById("S1".into()))
        .and(SelectionKey::ByIds {
            ticket_id: "T1".into(),
            sub_id: "S1".into(),
        });

    let tiers: Vec<u8> = reference.keys_by_tier().iter().map(|k| k.tier()).collect();
    assert_eq!(tiers, vec![0, 1, 2]);
}

#[test]
fn decodes_the_full_navigation_shape() {
    let reference: SelectionRef = serde_json::from_value(json!({
        "selectedTicket": { "ticket_id": "T1", "sub_id": "S1" },
        "ticketId": "S1",
        "latitude": 16.1,
        "longitude": 80.1,
    }))
    .unwrap();

    let keys = reference.keys_by_tier();
    assert_eq!(keys.len(), 3);
    assert_eq!(
        keys[0],
        &SelectionKey::ByIds {
            ticket_id: "T1".into(),
            sub_id: "S1".into(),
        }
    );
    assert_eq!(keys[1], &SelectionKey::ById("S1".into()));
    assert_eq!(
        keys[2],
        &SelectionKey::ByCoordinate {
            latitude: 16.1,
            longitude: 80.1,
        }
    );
}

#[test]
fn decodes_numeric_ids_and_string_coordinates() {
    let reference: SelectionRef = serde_json::from_value(json!({
        "selectedTicket": { "ticket_id": 41, "sub_id": 7 },
        "latitude": "16.1",
        "longitude": "80.1",
    }))
    .unwrap();

    let keys = reference.keys_by_tier();
    assert_eq!(
        keys[0],
        &SelectionKey::ByIds {
            ticket_id: "41".into(),
            sub_id: "7".into(),
        }
    );
    assert_eq!(
        keys[1],
        &SelectionKey::ByCoordinate {
            latitude: 16.1,
            longitude: 80.1,
        }
    );
}

#[test]
fn partial_shapes_decode_to_partial_references() {
    let reference: SelectionRef =
        serde_json::from_value(json!({ "ticketId": "T1" })).unwrap();
    assert_eq!(reference, SelectionRef::by_id("T1"));

    let reference: SelectionRef = serde_json::from_value(json!({})).unwrap();
    assert!(reference.is_empty());

    // A lone latitude is not a usable coordinate key.
    let reference: SelectionRef =
        serde_json::from_value(json!({ "latitude": 16.1 })).unwrap();
    assert!(reference.is_empty());
}

#[test]
fn coordinate_accessor_finds_the_coordinate_key() {
    let reference = SelectionRef::by_id("T1");
    assert_eq!(reference.coordinate(), None);

    let reference = reference.and(SelectionKey::ByCoordinate {
        latitude: 16.1,
        longitude: 80.1,
    });
    assert_eq!(reference.coordinate(), Some((16.1, 80.1)));
}

#[test]
fn inbox_hands_out_the_reference_exactly_once() {
    let inbox = SelectionInbox::new();
    assert_eq!(inbox.take(), None);

    inbox.put(SelectionRef::by_id("T1"));
    assert_eq!(inbox.take(), Some(SelectionRef::by_id("T1")));
    assert_eq!(inbox.take(), None);
}

#[test]
fn a_new_reference_replaces_an_unread_one() {
    let inbox = SelectionInbox::new();
    inbox.put(SelectionRef::by_id("T1"));
    inbox.put(SelectionRef::by_id("T2"));

    assert_eq!(inbox.take(), Some(SelectionRef::by_id("T2")));
    assert_eq!(inbox.take(), None);
}
