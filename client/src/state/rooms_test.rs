use super::*;

fn room(id: i64, name: &str, status: RoomStatus) -> Room {
    Room {
        room_id: id,
        room_name: name.to_owned(),
        building_name: "HQ".to_owned(),
        floor: 2,
        room_no: format!("2{id:02}"),
        capacity: 6,
        status,
        detail_location: None,
    }
}

fn loaded() -> RoomsState {
    let mut state = RoomsState::default();
    state.begin_load();
    state.finish_load(Ok(vec![
        room(1, "Orion", RoomStatus::Active),
        room(2, "Vega", RoomStatus::Inactive),
        room(3, "Lyra", RoomStatus::Active),
    ]));
    state
}

#[test]
fn load_success_replaces_items() {
    let state = loaded();
    assert!(!state.loading);
    assert_eq!(state.items.len(), 3);
    assert_eq!(state.error, None);
}

#[test]
fn load_failure_keeps_rows_and_reports_inline() {
    let mut state = loaded();
    state.begin_load();
    state.finish_load(Err(WorkflowError::Transport("offline".into())));
    assert_eq!(state.items.len(), 3);
    assert_eq!(state.error.as_deref(), Some("network error: offline"));
}

#[test]
fn text_and_status_filters_combine() {
    let mut state = loaded();
    state.set_status_filter("ACTIVE");
    assert_eq!(state.visible().len(), 2);
    state.set_query("ly".into());
    let names: Vec<String> = state.visible().into_iter().map(|r| r.room_name).collect();
    assert_eq!(names, vec!["Lyra"]);
    state.set_status_filter("");
    state.set_query("202".into());
    assert_eq!(state.visible()[0].room_name, "Vega");
}

#[test]
fn status_filter_value_round_trips() {
    let mut state = RoomsState::default();
    assert_eq!(state.status_filter_value(), "");
    state.set_status_filter("inactive");
    assert_eq!(state.status_filter_value(), "INACTIVE");
    state.set_status_filter("bogus");
    assert_eq!(state.status_filter_value(), "");
}

#[test]
fn mutation_closes_dialog_and_requests_reload() {
    let mut state = loaded();
    state.dialog = RoomDialog::Detail(2);
    state.mutation_done();
    assert_eq!(state.dialog, RoomDialog::Closed);
    assert_eq!(state.reload_seq, 1);
}

#[test]
fn detail_for_vanished_room_closes_on_reload() {
    let mut state = loaded();
    state.dialog = RoomDialog::Detail(2);
    state.finish_load(Ok(vec![room(1, "Orion", RoomStatus::Active)]));
    assert_eq!(state.dialog, RoomDialog::Closed);
}
