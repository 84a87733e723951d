use super::*;

fn filled() -> RoomFormState {
    RoomFormState {
        room_name: " Orion ".into(),
        building_name: "HQ".into(),
        floor: "3".into(),
        room_no: "301".into(),
        capacity: "10".into(),
        ..RoomFormState::default()
    }
}

#[test]
fn valid_form_produces_trimmed_draft() {
    let draft = filled().to_draft().unwrap();
    assert_eq!(draft.room_name, "Orion");
    assert_eq!(draft.floor, 3);
    assert_eq!(draft.capacity, 10);
    assert_eq!(draft.detail_location, None);
}

#[test]
fn location_is_normalized() {
    let mut form = filled();
    form.detail_location = " /api/api/rooms/floormaps/a.svg ".into();
    assert_eq!(form.to_draft().unwrap().detail_location.as_deref(), Some("/api/rooms/floormaps/a.svg"));
}

#[test]
fn bad_numbers_are_named() {
    let mut form = filled();
    form.capacity = "-2".into();
    assert_eq!(
        form.to_draft(),
        Err(WorkflowError::Invalid("capacity must be a positive whole number".into()))
    );
    form.capacity = "4".into();
    form.floor = "B1".into();
    assert_eq!(form.to_draft(), Err(WorkflowError::Invalid("floor must be a whole number".into())));
}

#[test]
fn missing_name_is_rejected() {
    let mut form = filled();
    form.room_name = "   ".into();
    assert!(matches!(form.to_draft(), Err(WorkflowError::Invalid(_))));
}

#[test]
fn for_room_round_trips_into_draft() {
    let room = Room {
        room_id: 4,
        room_name: "Lyra".into(),
        building_name: "Annex".into(),
        floor: -1,
        room_no: "B12".into(),
        capacity: 4,
        status: RoomStatus::Inactive,
        detail_location: Some("/api/rooms/floormaps/b.svg".into()),
    };
    let form = RoomFormState::for_room(&room);
    assert!(form.is_edit());
    assert_eq!(form.to_draft().unwrap(), RoomDraft::from(&room));
}
