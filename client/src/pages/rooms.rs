//! Rooms list page.
//!
//! Loads every room, filters client-side by text and status, and layers the
//! detail, create and edit dialogs over the table. Every successful mutation
//! closes its dialog and reloads from the server.

use leptos::prelude::*;

use crate::components::floor_map_preview::FloorMapPreview;
use crate::components::room_detail_dialog::RoomDetailDialog;
use crate::components::room_form_dialog::RoomFormDialog;
use crate::state::room_form::RoomFormState;
use crate::state::rooms::{RoomDialog, RoomsState};
use rooms::{Room, RoomStatus};
#[cfg(feature = "csr")]
use rooms::Session;

#[component]
pub fn RoomsPage() -> impl IntoView {
    #[cfg(feature = "csr")]
    let session = expect_context::<RwSignal<Session>>();
    let state = RwSignal::new(RoomsState::default());
    let form = RwSignal::new(RoomFormState::default());

    let reload_seq = Memo::new(move |_| state.with(|s| s.reload_seq));
    let dialog = Memo::new(move |_| state.with(|s| s.dialog.clone()));

    Effect::new(move || {
        let seq = reload_seq.get();
        state.update(RoomsState::begin_load);

        #[cfg(feature = "csr")]
        leptos::task::spawn_local(async move {
            let mut api = crate::net::api::Api::new(session.get_untracked());
            let result = api.list_rooms().await;
            crate::state::session::commit(session, api.into_session());
            if let Err(err) = &result {
                log::warn!("room list load {seq} failed: {err}");
            }
            state.try_update(|s| {
                if s.reload_seq == seq {
                    s.finish_load(result);
                }
            });
        });
        #[cfg(not(feature = "csr"))]
        {
            let _ = seq;
        }
    });

    let open_create = move |_| {
        form.set(RoomFormState::default());
        state.update(|s| s.dialog = RoomDialog::Create);
    };
    let open_edit = Callback::new(move |room_id: i64| {
        let Some(room) = state.with_untracked(|s| s.room(room_id).cloned()) else {
            return;
        };
        form.set(RoomFormState::for_room(&room));
        state.update(|s| s.dialog = RoomDialog::Edit(room_id));
    });
    let close_dialog = Callback::new(move |()| state.update(|s| s.dialog = RoomDialog::Closed));
    let mutation_done = Callback::new(move |()| state.update(RoomsState::mutation_done));

    let row = move |room: Room| {
        let room_id = room.room_id;
        let location = Signal::derive({
            let location = room.detail_location.clone();
            move || location.clone()
        });
        view! {
            <tr class="rooms__row" on:click=move |_| state.update(|s| s.dialog = RoomDialog::Detail(room_id))>
                <td class="rooms__preview">
                    <FloorMapPreview location=location />
                </td>
                <td>{room.room_name.clone()}</td>
                <td>{room.location_label()}</td>
                <td class="rooms__capacity">{room.capacity}</td>
                <td>
                    <span class=format!("status status--{}", room.status.as_str().to_ascii_lowercase())>
                        {room.status.label()}
                    </span>
                </td>
            </tr>
        }
    };

    view! {
        <section class="rooms">
            <header class="rooms__header">
                <h1>"Rooms"</h1>
                <input
                    class="rooms__search"
                    type="search"
                    placeholder="Search name, building or room no."
                    prop:value=move || state.with(|s| s.filter.query.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        state.update(|s| s.set_query(value));
                    }
                />
                <select
                    class="rooms__status"
                    prop:value=move || state.with(RoomsState::status_filter_value)
                    on:change=move |ev| {
                        let value = event_target_value(&ev);
                        state.update(|s| s.set_status_filter(&value));
                    }
                >
                    <option value="">"All statuses"</option>
                    {[RoomStatus::Active, RoomStatus::Inactive]
                        .into_iter()
                        .map(|status| view! { <option value=status.as_str()>{status.label()}</option> })
                        .collect_view()}
                </select>
                <button class="btn btn--primary" on:click=open_create>
                    "New room"
                </button>
            </header>
            <Show when=move || state.with(|s| s.error.is_some())>
                <p class="rooms__error">{move || state.with(|s| s.error.clone().unwrap_or_default())}</p>
            </Show>
            <Show when=move || state.with(|s| s.loading)>
                <p class="rooms__loading">"Loading rooms..."</p>
            </Show>
            <table class="rooms__table">
                <thead>
                    <tr>
                        <th>"Floor plan"</th>
                        <th>"Name"</th>
                        <th>"Location"</th>
                        <th>"Capacity"</th>
                        <th>"Status"</th>
                    </tr>
                </thead>
                <tbody>
                    <For each=move || state.with(RoomsState::visible) key=|room| room.clone() children=row />
                </tbody>
            </table>
            <Show when=move || state.with(|s| !s.loading && s.error.is_none() && s.visible().is_empty())>
                <p class="rooms__empty">"No rooms match."</p>
            </Show>
        </section>
        {move || match dialog.get() {
            RoomDialog::Closed => ().into_any(),
            RoomDialog::Detail(room_id) => match state.with_untracked(|s| s.room(room_id).cloned()) {
                Some(room) => {
                    view! {
                        <RoomDetailDialog
                            room=room
                            on_close=close_dialog
                            on_edit=Callback::new(move |()| open_edit.run(room_id))
                            on_deleted=mutation_done
                        />
                    }
                        .into_any()
                }
                None => ().into_any(),
            },
            RoomDialog::Create | RoomDialog::Edit(_) => {
                view! { <RoomFormDialog form=form on_cancel=close_dialog on_saved=mutation_done /> }.into_any()
            }
        }}
    }
}
