use super::*;
use std::collections::BTreeMap;
use std::str::FromStr;
use uuid::Uuid;

#[test]
fn test_new_ids_are_unique() {
    let a = CreditApplicationId::new();
    let b = CreditApplicationId::new();
    assert_ne!(a, b);
}

#[test]
fn test_new_ids_are_time_ordered() {
    let first = ImportId::new();
    let second = ImportId::new();
    assert!(first.into_inner() <= second.into_inner());
}

#[test]
fn test_ids_key_ordered_maps() {
    let first = ImportId::from_uuid(Uuid::from_u128(1));
    let second = ImportId::from_uuid(Uuid::from_u128(2));
    assert!(first < second);

    let mut by_id = BTreeMap::new();
    by_id.insert(second, "second");
    by_id.insert(first, "first");
    assert_eq!(by_id.into_values().collect::<Vec<_>>(), vec!["first", "second"]);
}

#[test]
fn test_round_trip_through_string() {
    let uuid = Uuid::new_v4();
    let id = ReservationId::from_str(&uuid.to_string()).unwrap();
    assert_eq!(id, ReservationId::from_uuid(uuid));
    assert_eq!(id.to_string(), uuid.to_string());
}

#[test]
fn test_from_str_rejects_garbage() {
    assert!(PaymentEntryId::from_str("not-a-uuid").is_err());
    assert!(ImporterId::from_str("").is_err());
}

#[test]
fn test_serializes_as_bare_uuid() {
    let uuid = Uuid::new_v4();
    let id = UserId::from_uuid(uuid);
    let json = serde_json::to_string(&id).unwrap();
    assert_eq!(json, format!("\"{uuid}\""));

    let back: UserId = serde_json::from_str(&json).unwrap();
    assert_eq!(back, id);
}
