use super::*;
use crate::reference::DocumentKind;

fn room(id: i64, name: &str, status: RoomStatus, location: Option<&str>) -> Room {
    Room {
        room_id: id,
        room_name: name.to_owned(),
        building_name: "HQ".to_owned(),
        floor: 3,
        room_no: "301".to_owned(),
        capacity: 8,
        status,
        detail_location: location.map(ToOwned::to_owned),
    }
}

fn draft() -> RoomDraft {
    RoomDraft {
        room_name: " Orion ".to_owned(),
        building_name: " HQ ".to_owned(),
        floor: 3,
        room_no: " 301 ".to_owned(),
        capacity: 6,
        status: RoomStatus::Active,
        detail_location: Some(" /api/api/rooms/floormaps/a.svg ".to_owned()),
    }
}

// =============================================================
// Wire format
// =============================================================

#[test]
fn room_deserializes_camel_case() {
    let json = r#"{"roomId":7,"roomName":"Orion","buildingName":"HQ","floor":3,"roomNo":"301","capacity":8,"status":"INACTIVE","detailLocation":"/api/rooms/floormaps/a.svg"}"#;
    let parsed: Room = serde_json::from_str(json).unwrap();
    assert_eq!(parsed.room_id, 7);
    assert_eq!(parsed.status, RoomStatus::Inactive);
    assert_eq!(parsed.detail_location.as_deref(), Some("/api/rooms/floormaps/a.svg"));
}

#[test]
fn room_missing_optional_fields_default() {
    let parsed: Room = serde_json::from_str(r#"{"roomId":1,"roomName":"A"}"#).unwrap();
    assert_eq!(parsed.status, RoomStatus::Active);
    assert_eq!(parsed.detail_location, None);
    assert_eq!(parsed.capacity, 0);
}

#[test]
fn draft_serializes_camel_case_and_uppercase_status() {
    let value = serde_json::to_value(draft()).unwrap();
    assert_eq!(value["roomName"], " Orion ");
    assert_eq!(value["status"], "ACTIVE");
    assert!(value.get("roomId").is_none());
}

#[test]
fn status_parses_case_insensitively() {
    assert_eq!("inactive".parse::<RoomStatus>().unwrap(), RoomStatus::Inactive);
    assert_eq!(" ACTIVE ".parse::<RoomStatus>().unwrap(), RoomStatus::Active);
    assert!("archived".parse::<RoomStatus>().is_err());
}

// =============================================================
// Draft validation
// =============================================================

#[test]
fn validate_trims_and_normalizes_location() {
    let valid = draft().validate().unwrap();
    assert_eq!(valid.room_name, "Orion");
    assert_eq!(valid.building_name, "HQ");
    assert_eq!(valid.room_no, "301");
    assert_eq!(valid.detail_location.as_deref(), Some("/api/rooms/floormaps/a.svg"));
}

#[test]
fn validate_blank_location_becomes_none() {
    let mut d = draft();
    d.detail_location = Some("   ".to_owned());
    assert_eq!(d.validate().unwrap().detail_location, None);
}

#[test]
fn validate_rejects_missing_name() {
    let mut d = draft();
    d.room_name = "  ".to_owned();
    let err = d.validate().unwrap_err();
    assert_eq!(err.to_string(), "room name is required");
}

#[test]
fn validate_rejects_missing_building() {
    let mut d = draft();
    d.building_name.clear();
    assert!(d.validate().is_err());
}

#[test]
fn validate_rejects_zero_capacity() {
    let mut d = draft();
    d.capacity = 0;
    assert_eq!(d.validate().unwrap_err().to_string(), "capacity must be at least 1");
}

#[test]
fn draft_from_room_prefills_every_field() {
    let r = room(3, "Lyra", RoomStatus::Inactive, Some("x.svg"));
    let d = RoomDraft::from(&r);
    assert_eq!(d.room_name, "Lyra");
    assert_eq!(d.status, RoomStatus::Inactive);
    assert_eq!(d.detail_location.as_deref(), Some("x.svg"));
}

// =============================================================
// Floor map resolution
// =============================================================

#[test]
fn room_floor_map_resolves_svg() {
    let r = room(1, "A", RoomStatus::Active, Some("https://intra/api/api/rooms/floormaps/plan.svg?v=2"));
    let resolved = r.floor_map().unwrap();
    assert_eq!(resolved.filename, "plan.svg");
    assert_eq!(resolved.kind, DocumentKind::Svg);
}

#[test]
fn room_without_location_is_empty_reference() {
    let r = room(1, "A", RoomStatus::Active, None);
    assert_eq!(r.floor_map(), Err(ReferenceError::Empty));
}

#[test]
fn location_label_skips_blank_parts() {
    let mut r = room(1, "A", RoomStatus::Active, None);
    assert_eq!(r.location_label(), "HQ · 3F · 301");
    r.room_no.clear();
    assert_eq!(r.location_label(), "HQ · 3F");
}

// =============================================================
// Filtering
// =============================================================

#[test]
fn filter_by_query_and_status() {
    let rooms = vec![
        room(1, "Orion", RoomStatus::Active, None),
        room(2, "Lyra", RoomStatus::Inactive, None),
        room(3, "Orion Annex", RoomStatus::Inactive, None),
    ];
    let filter = RoomFilter { query: "orion".to_owned(), status: StatusFilter::All };
    let ids: Vec<i64> = filter.apply(&rooms).iter().map(|r| r.room_id).collect();
    assert_eq!(ids, vec![1, 3]);

    let filter = RoomFilter { query: "orion".to_owned(), status: StatusFilter::Only(RoomStatus::Inactive) };
    let ids: Vec<i64> = filter.apply(&rooms).iter().map(|r| r.room_id).collect();
    assert_eq!(ids, vec![3]);
}

#[test]
fn empty_filter_matches_all() {
    let rooms = vec![room(1, "A", RoomStatus::Active, None), room(2, "B", RoomStatus::Inactive, None)];
    assert_eq!(RoomFilter::default().apply(&rooms).len(), 2);
}
