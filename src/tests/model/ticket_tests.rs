use super::*;

use serde_json::json;

#[test]
fn ids_decode_from_strings_and_numbers() {
    let ticket: RawTicket = serde_json::from_value(json!({
        "ticket_id": 41,
        "sub_tickets": [{ "sub_id": "S1" }, { "sub_id": 7 }],
    }))
    .unwrap();

    assert_eq!(ticket.ticket_id.as_str(), "41");
    assert_eq!(ticket.sub_tickets[0].sub_id.as_str(), "S1");
    assert_eq!(ticket.sub_tickets[1].sub_id.as_str(), "7");
}

#[test]
fn missing_optional_fields_decode_leniently() {
    let ticket: RawTicket = serde_json::from_value(json!({
        "ticket_id": "T1",
        "some_future_field": true,
    }))
    .unwrap();

    assert!(ticket.sub_tickets.is_empty());
    assert!(ticket.latitude.is_none());
    assert!(ticket.user_name.is_none());
}

#[test]
fn coordinates_decode_as_numbers_or_strings() {
    let ticket: RawTicket = serde_json::from_value(json!({
        "ticket_id": "T1",
        "latitude": 16.303771,
        "longitude": "80.435537",
    }))
    .unwrap();

    assert_eq!(
        ticket.latitude.as_ref().and_then(LooseFloat::as_finite),
        Some(16.303771)
    );
    assert_eq!(
        ticket.longitude.as_ref().and_then(LooseFloat::as_finite),
        Some(80.435537)
    );
}

#[test]
fn presence_ignores_empty_strings() {
    assert!(LooseFloat::Num(0.0).is_present());
    assert!(LooseFloat::Text("16.3".to_string()).is_present());
    assert!(LooseFloat::Text("garbled".to_string()).is_present());
    assert!(!LooseFloat::Text(String::new()).is_present());
    assert!(!LooseFloat::Text("   ".to_string()).is_present());
}

#[test]
fn only_finite_numerics_parse() {
    assert_eq!(LooseFloat::Num(16.3).as_finite(), Some(16.3));
    assert_eq!(
        LooseFloat::Text(" 16.3 ".to_string()).as_finite(),
        Some(16.3)
    );
    assert_eq!(LooseFloat::Text("garbled".to_string()).as_finite(), None);
    assert_eq!(LooseFloat::Text(String::new()).as_finite(), None);
    assert_eq!(LooseFloat::Num(f64::NAN).as_finite(), None);
    assert_eq!(LooseFloat::Num(f64::INFINITY).as_finite(), None);
}
