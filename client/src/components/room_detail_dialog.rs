//! Read-only room detail with a large floor-plan preview, edit, and delete.
//!
//! Delete asks for confirmation first. A failed delete keeps both dialogs
//! open with the server's message; success hands control back to the page.

use leptos::prelude::*;

use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::floor_map_preview::FloorMapPreview;
use rooms::Room;
#[cfg(feature = "csr")]
use rooms::Session;

#[component]
pub fn RoomDetailDialog(room: Room, on_close: Callback<()>, on_edit: Callback<()>, on_deleted: Callback<()>) -> impl IntoView {
    #[cfg(feature = "csr")]
    let session = expect_context::<RwSignal<Session>>();
    let confirming = RwSignal::new(false);
    let deleting = RwSignal::new(false);
    let delete_error = RwSignal::new(None::<String>);

    let room_id = room.room_id;
    let location = room.detail_location.clone().filter(|l| !l.trim().is_empty());
    let location_signal = Signal::derive({
        let location = location.clone();
        move || location.clone()
    });

    let confirm_delete = Callback::new(move |()| {
        if deleting.get_untracked() {
            return;
        }
        deleting.set(true);
        delete_error.set(None);

        #[cfg(feature = "csr")]
        leptos::task::spawn_local(async move {
            let mut api = crate::net::api::Api::new(session.get_untracked());
            let result = api.delete_room(room_id).await;
            crate::state::session::commit(session, api.into_session());
            deleting.try_set(false);
            match result {
                Ok(()) => on_deleted.run(()),
                Err(err) => {
                    log::warn!("delete room {room_id} failed: {err}");
                    delete_error.try_set(Some(err.to_string()));
                }
            }
        });
        #[cfg(not(feature = "csr"))]
        {
            let _ = (room_id, on_deleted);
        }
    });
    let cancel_delete = Callback::new(move |()| {
        confirming.set(false);
        delete_error.set(None);
    });

    let confirm_message = format!("Delete \"{}\"? This cannot be undone.", room.room_name);

    view! {
        <div class="dialog-backdrop" on:click=move |_| on_close.run(())>
            <div class="dialog dialog--room-detail" on:click=move |ev| ev.stop_propagation()>
                <h2>{room.room_name.clone()}</h2>
                <dl class="room-detail__fields">
                    <dt>"Building"</dt>
                    <dd>{room.building_name.clone()}</dd>
                    <dt>"Floor"</dt>
                    <dd>{format!("{}F", room.floor)}</dd>
                    <dt>"Room no."</dt>
                    <dd>{room.room_no.clone()}</dd>
                    <dt>"Capacity"</dt>
                    <dd>{room.capacity}</dd>
                    <dt>"Status"</dt>
                    <dd>
                        <span class=format!("status status--{}", room.status.as_str().to_ascii_lowercase())>
                            {room.status.label()}
                        </span>
                    </dd>
                    <dt>"Location"</dt>
                    <dd class="room-detail__location">{location.clone().unwrap_or_else(|| "-".to_owned())}</dd>
                </dl>
                <FloorMapPreview location=location_signal large=true />
                <div class="dialog__actions">
                    <button class="btn btn--danger" on:click=move |_| confirming.set(true)>
                        "Delete"
                    </button>
                    <button class="btn" on:click=move |_| on_close.run(())>
                        "Close"
                    </button>
                    <button class="btn btn--primary" on:click=move |_| on_edit.run(())>
                        "Edit"
                    </button>
                </div>
            </div>
        </div>
        <Show when=move || confirming.get()>
            <ConfirmDialog
                title="Delete room"
                message=confirm_message.clone()
                confirm_label="Delete"
                busy=deleting
                error=delete_error
                on_cancel=cancel_delete
                on_confirm=confirm_delete
            />
        </Show>
    }
}
