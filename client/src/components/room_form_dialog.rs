//! Create/edit dialog for a room.
//!
//! The location field takes free text, or a floor-plan URL chosen from the
//! picker or produced by the designer. A preview of the current value sits
//! under the field.

use leptos::prelude::*;

use crate::components::floor_map_picker::FloorMapPicker;
use crate::components::floor_map_preview::FloorMapPreview;
use crate::components::floor_plan_designer::FloorPlanDesigner;
use crate::state::room_form::RoomFormState;
use rooms::RoomStatus;
#[cfg(feature = "csr")]
use rooms::Session;

/// Secondary dialog stacked over the form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Overlay {
    None,
    Picker,
    Designer,
}

#[component]
pub fn RoomFormDialog(form: RwSignal<RoomFormState>, on_cancel: Callback<()>, on_saved: Callback<()>) -> impl IntoView {
    #[cfg(feature = "csr")]
    let session = expect_context::<RwSignal<Session>>();
    let saving = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);
    let overlay = RwSignal::new(Overlay::None);

    let location = Signal::derive(move || {
        let raw = form.with(|f| f.detail_location.trim().to_owned());
        (!raw.is_empty()).then_some(raw)
    });

    let on_location_chosen = Callback::new(move |url: String| {
        form.update(|f| f.detail_location = url);
        overlay.set(Overlay::None);
    });
    let close_overlay = Callback::new(move |()| overlay.set(Overlay::None));

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if saving.get_untracked() {
            return;
        }
        let state = form.get_untracked();
        let draft = match state.to_draft() {
            Ok(draft) => draft,
            Err(err) => {
                error.set(Some(err.to_string()));
                return;
            }
        };
        error.set(None);
        saving.set(true);

        #[cfg(feature = "csr")]
        leptos::task::spawn_local(async move {
            let mut api = crate::net::api::Api::new(session.get_untracked());
            let result = match state.room_id {
                Some(room_id) => api.update_room(room_id, &draft).await,
                None => api.create_room(&draft).await,
            };
            crate::state::session::commit(session, api.into_session());
            saving.try_set(false);
            match result {
                Ok(room) => {
                    log::info!("room {} saved", room.room_id);
                    on_saved.run(());
                }
                Err(err) => {
                    error.try_set(Some(err.to_string()));
                }
            }
        });
        #[cfg(not(feature = "csr"))]
        {
            let _ = (draft, on_saved);
        }
    };

    let text_field = move |label: &'static str, input_type: &'static str, get: fn(&RoomFormState) -> String, set: fn(&mut RoomFormState, String)| {
        view! {
            <label class="dialog__label">
                {label}
                <input
                    class="dialog__input"
                    type=input_type
                    prop:value=move || form.with(get)
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        form.update(|f| set(f, value));
                    }
                />
            </label>
        }
    };

    view! {
        <div class="dialog-backdrop" on:click=move |_| on_cancel.run(())>
            <div class="dialog dialog--room-form" on:click=move |ev| ev.stop_propagation()>
                <h2>{move || if form.with(RoomFormState::is_edit) { "Edit room" } else { "New room" }}</h2>
                <form class="dialog__form" on:submit=submit>
                    {text_field("Name", "text", |f| f.room_name.clone(), |f, v| f.room_name = v)}
                    {text_field("Building", "text", |f| f.building_name.clone(), |f, v| f.building_name = v)}
                    <div class="dialog__row">
                        {text_field("Floor", "number", |f| f.floor.clone(), |f, v| f.floor = v)}
                        {text_field("Room no.", "text", |f| f.room_no.clone(), |f, v| f.room_no = v)}
                        {text_field("Capacity", "number", |f| f.capacity.clone(), |f, v| f.capacity = v)}
                    </div>
                    <label class="dialog__label">
                        "Status"
                        <select
                            class="dialog__input"
                            prop:value=move || form.with(|f| f.status.as_str())
                            on:change=move |ev| {
                                if let Ok(status) = event_target_value(&ev).parse::<RoomStatus>() {
                                    form.update(|f| f.status = status);
                                }
                            }
                        >
                            {[RoomStatus::Active, RoomStatus::Inactive]
                                .into_iter()
                                .map(|status| view! { <option value=status.as_str()>{status.label()}</option> })
                                .collect_view()}
                        </select>
                    </label>
                    <label class="dialog__label">
                        "Location"
                        <input
                            class="dialog__input"
                            type="text"
                            placeholder="Free text or a floor-plan URL"
                            prop:value=move || form.with(|f| f.detail_location.clone())
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                form.update(|f| f.detail_location = value);
                            }
                        />
                    </label>
                    <div class="dialog__location-actions">
                        <button class="btn" type="button" on:click=move |_| overlay.set(Overlay::Picker)>
                            "Choose floor plan"
                        </button>
                        <button class="btn" type="button" on:click=move |_| overlay.set(Overlay::Designer)>
                            "Draw floor plan"
                        </button>
                    </div>
                    <FloorMapPreview location=location />
                    <Show when=move || error.get().is_some()>
                        <p class="dialog__error">{move || error.get().unwrap_or_default()}</p>
                    </Show>
                    <div class="dialog__actions">
                        <button class="btn" type="button" on:click=move |_| on_cancel.run(())>
                            "Cancel"
                        </button>
                        <button class="btn btn--primary" type="submit" disabled=move || saving.get()>
                            {move || if saving.get() { "Saving..." } else { "Save" }}
                        </button>
                    </div>
                </form>
            </div>
        </div>
        {move || match overlay.get() {
            Overlay::None => ().into_any(),
            Overlay::Picker => {
                let initial_url = location.get_untracked();
                view! { <FloorMapPicker initial_url=initial_url on_cancel=close_overlay on_select=on_location_chosen /> }
                    .into_any()
            }
            Overlay::Designer => {
                let initial_title = form.with_untracked(|f| f.room_name.trim().to_owned());
                view! {
                    <FloorPlanDesigner initial_title=initial_title on_cancel=close_overlay on_saved=on_location_chosen />
                }
                    .into_any()
            }
        }}
    }
}
