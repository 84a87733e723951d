//! Dialog for choosing an existing floor plan.
//!
//! SYSTEM CONTEXT
//! ==============
//! Opened from the room form. Lists stored documents, filters them, previews
//! the selection, and hands the confirmed absolute URL back through
//! `on_select`. Recently used plans are offered above the full list.

#[cfg(test)]
#[path = "floor_map_picker_test.rs"]
mod floor_map_picker_test;

use leptos::prelude::*;
use rooms::picker::PickerState;
use rooms::preview::PreviewState;
use rooms::recent::{RecentFloorMap, RecentFloorMaps};
use rooms::reference;
#[cfg(feature = "csr")]
use rooms::Session;

#[cfg(feature = "csr")]
use crate::net::abort::{self, InFlight};

/// URL of the listed entry a recent item refers to, if it is still listed.
/// Recent items hold absolute URLs; the list holds backend-relative ones.
fn listed_url(picker: &PickerState, recent_url: &str, origin: &str) -> Option<String> {
    picker
        .entries()
        .iter()
        .find(|entry| reference::same_document(origin, &entry.url, recent_url))
        .map(|entry| entry.url.clone())
}

/// Recent items that are still listed, most recent first, each paired with
/// the listed URL it selects.
fn available_recent(picker: &PickerState, recent: &RecentFloorMaps, origin: &str) -> Vec<(RecentFloorMap, String)> {
    recent
        .entries()
        .iter()
        .filter_map(|item| listed_url(picker, &item.url, origin).map(|listed| (item.clone(), listed)))
        .collect()
}

fn recent_label(item: &RecentFloorMap) -> String {
    item.title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(&item.filename)
        .to_owned()
}

#[cfg(feature = "csr")]
type PreviewRequest = StoredValue<InFlight<web_sys::AbortController>, LocalStorage>;

/// Fetch the selected entry's markup, aborting the previous selection's request.
#[cfg(feature = "csr")]
fn fetch_preview(
    picker: RwSignal<Option<PickerState>>,
    session: RwSignal<Session>,
    in_flight: PreviewRequest,
    ticket: rooms::preview::FetchTicket,
) {
    let mut signal = None;
    in_flight.update_value(|f| signal = abort::start(f, ticket.id));
    leptos::task::spawn_local(async move {
        let mut api = crate::net::api::Api::new(session.get_untracked());
        let result = api.fetch_markup(&ticket.path, signal.as_ref()).await;
        crate::state::session::commit(session, api.into_session());
        in_flight.try_update_value(|f| f.finish(ticket.id));
        picker.try_update(|state| {
            if let Some(state) = state.as_mut()
                && !state.apply_preview(&ticket, result)
            {
                log::debug!("dropped stale preview for {}", ticket.filename);
            }
        });
    });
}

/// Floor-map picker dialog.
#[component]
pub fn FloorMapPicker(
    initial_url: Option<String>,
    on_cancel: Callback<()>,
    on_select: Callback<String>,
) -> impl IntoView {
    #[cfg(feature = "csr")]
    let session = expect_context::<RwSignal<Session>>();
    let recent = expect_context::<RwSignal<RecentFloorMaps>>();
    let picker = RwSignal::new(None::<PickerState>);
    let list_error = RwSignal::new(None::<String>);
    let origin = crate::util::browser::origin();
    #[cfg(feature = "csr")]
    let in_flight: PreviewRequest = StoredValue::new_local(InFlight::default());

    #[cfg(feature = "csr")]
    {
        let origin = origin.clone();
        leptos::task::spawn_local(async move {
            let mut api = crate::net::api::Api::new(session.get_untracked());
            let result = api.list_floor_maps().await;
            crate::state::session::commit(session, api.into_session());
            match result {
                Ok(entries) => {
                    let mut state = PickerState::new(entries, initial_url.as_deref(), &origin);
                    let ticket = state.load_selected_preview();
                    picker.try_set(Some(state));
                    if let Some(ticket) = ticket {
                        fetch_preview(picker, session, in_flight, ticket);
                    }
                }
                Err(err) => {
                    list_error.try_set(Some(err.to_string()));
                }
            }
        });
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = initial_url;
    }

    let select = Callback::new(move |url: String| {
        let mut ticket = None;
        picker.update(|state| {
            if let Some(state) = state.as_mut() {
                ticket = state.select(&url);
            }
        });
        #[cfg(feature = "csr")]
        {
            match ticket {
                Some(ticket) => fetch_preview(picker, session, in_flight, ticket),
                None => {
                    in_flight.update_value(|f| {
                        f.abort();
                    });
                }
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = ticket;
        }
    });

    let confirm = move |_| {
        #[cfg(feature = "csr")]
        {
            let Some(state) = picker.get_untracked() else {
                return;
            };
            let Some(url) = state.confirm(&crate::util::browser::origin()) else {
                return;
            };
            if let Some(entry) = state.selected() {
                let item = RecentFloorMap::from_entry(entry, url.clone(), crate::util::browser::now_ms());
                recent.update(|r| r.push(item));
            }
            on_select.run(url);
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = on_select;
        }
    };

    #[cfg(feature = "csr")]
    on_cleanup(move || {
        in_flight.try_update_value(|f| {
            f.abort();
        });
    });

    let query = move || picker.with(|p| p.as_ref().map(|p| p.query().to_owned()).unwrap_or_default());
    let has_selection = move || picker.with(|p| p.as_ref().is_some_and(|p| p.selected().is_some()));

    view! {
        <div class="dialog-backdrop dialog-backdrop--stacked" on:click=move |_| on_cancel.run(())>
            <div class="dialog dialog--picker" on:click=move |ev| ev.stop_propagation()>
                <h2>"Choose floor plan"</h2>
                <input
                    class="dialog__input picker__search"
                    type="search"
                    placeholder="Search by title or filename"
                    prop:value=query
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        picker.update(|p| {
                            if let Some(p) = p.as_mut() {
                                p.set_query(value);
                            }
                        });
                    }
                />
                <Show when=move || list_error.get().is_some()>
                    <p class="dialog__error">{move || list_error.get().unwrap_or_default()}</p>
                </Show>
                <div class="picker__body">
                    <div class="picker__lists">
                        {move || {
                            let items = picker
                                .with(|p| p.as_ref().map(|p| recent.with(|r| available_recent(p, r, &origin))))
                                .unwrap_or_default();
                            (!items.is_empty())
                                .then(|| {
                                    view! {
                                        <h3 class="picker__heading">"Recent"</h3>
                                        <ul class="picker__list picker__list--recent">
                                            {items
                                                .into_iter()
                                                .map(|(item, listed)| {
                                                    let label = recent_label(&item);
                                                    view! {
                                                        <li>
                                                            <button
                                                                class="picker__item"
                                                                on:click=move |_| select.run(listed.clone())
                                                            >
                                                                {label}
                                                            </button>
                                                        </li>
                                                    }
                                                })
                                                .collect_view()}
                                        </ul>
                                    }
                                })
                        }}
                        <h3 class="picker__heading">"All floor plans"</h3>
                        <Show
                            when=move || picker.with(Option::is_some)
                            fallback=move || {
                                view! {
                                    <p class="picker__loading">
                                        {move || if list_error.get().is_some() { "" } else { "Loading..." }}
                                    </p>
                                }
                            }
                        >
                            <ul class="picker__list">
                                {move || {
                                    picker
                                        .with(|p| {
                                            p.as_ref()
                                                .map(|p| {
                                                    p.filtered()
                                                        .into_iter()
                                                        .map(|e| (e.clone(), p.is_selected(e)))
                                                        .collect::<Vec<_>>()
                                                })
                                        })
                                        .unwrap_or_default()
                                        .into_iter()
                                        .map(|(entry, selected)| {
                                            let url = entry.url.clone();
                                            view! {
                                                <li>
                                                    <button
                                                        class="picker__item"
                                                        class:picker__item--selected=selected
                                                        on:click=move |_| select.run(url.clone())
                                                    >
                                                        <span class="picker__title">{entry.display_title().to_owned()}</span>
                                                        <span class="picker__meta">{entry.size_label()}</span>
                                                    </button>
                                                </li>
                                            }
                                        })
                                        .collect_view()
                                }}
                            </ul>
                        </Show>
                    </div>
                    <div class="picker__preview">
                        {move || {
                            match picker.with(|p| p.as_ref().map(|p| p.preview().clone())) {
                                Some(PreviewState::Ready(markup)) => {
                                    view! { <div class="picker__svg" inner_html=markup></div> }.into_any()
                                }
                                Some(PreviewState::Failed(message)) => {
                                    view! { <p class="dialog__error">{message}</p> }.into_any()
                                }
                                Some(PreviewState::Loading) => {
                                    view! { <p class="picker__loading">"Loading preview..."</p> }.into_any()
                                }
                                Some(PreviewState::Idle) | None => {
                                    view! { <p class="picker__empty">"Select a floor plan to preview it."</p> }
                                        .into_any()
                                }
                            }
                        }}
                    </div>
                </div>
                <div class="dialog__actions">
                    <button class="btn" on:click=move |_| on_cancel.run(())>
                        "Cancel"
                    </button>
                    <button class="btn btn--primary" disabled=move || !has_selection() on:click=confirm>
                        "Use this plan"
                    </button>
                </div>
            </div>
        </div>
    }
}
