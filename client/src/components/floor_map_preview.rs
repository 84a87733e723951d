//! Lazy inline preview of a room's floor plan.
//!
//! DESIGN
//! ======
//! Each preview owns its own [`PreviewCache`], so a row fetches a given
//! document at most once no matter how often it re-renders. When the
//! reference changes or the row unmounts, the outstanding request is aborted
//! and any late response is dropped by its ticket.

#[cfg(test)]
#[path = "floor_map_preview_test.rs"]
mod floor_map_preview_test;

use leptos::prelude::*;
use rooms::preview::{Placeholder, PreviewCache, PreviewPlan, PreviewState};
#[cfg(feature = "csr")]
use rooms::Session;

#[cfg(feature = "csr")]
use crate::net::abort::{self, InFlight};

/// What the preview box shows.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Slot {
    Placeholder(Placeholder, String),
    Preview(PreviewState),
}

fn placeholder_text(placeholder: Placeholder, raw: Option<&str>) -> String {
    match placeholder {
        Placeholder::Empty => "No floor plan".to_owned(),
        Placeholder::Unresolvable => "Unrecognized floor plan link".to_owned(),
        Placeholder::NotSvg => raw.map(str::trim).unwrap_or_default().to_owned(),
    }
}

fn slot_for(plan: &PreviewPlan, raw: Option<&str>) -> Slot {
    match plan {
        PreviewPlan::Placeholder(p) => Slot::Placeholder(*p, placeholder_text(*p, raw)),
        PreviewPlan::Cached(state) => Slot::Preview(state.clone()),
        PreviewPlan::Fetch(_) => Slot::Preview(PreviewState::Loading),
    }
}

/// Floor-plan thumbnail (or detail-sized view) for a `detailLocation`.
#[component]
pub fn FloorMapPreview(#[prop(into)] location: Signal<Option<String>>, #[prop(optional)] large: bool) -> impl IntoView {
    #[cfg(feature = "csr")]
    let session = expect_context::<RwSignal<Session>>();
    let cache = StoredValue::new(PreviewCache::new());
    #[cfg(feature = "csr")]
    let in_flight = StoredValue::new_local(InFlight::<web_sys::AbortController>::default());
    let slot = RwSignal::new(Slot::Preview(PreviewState::Idle));

    Effect::new(move || {
        let raw = location.get();
        let mut plan = None;
        let mut active = None;
        cache.update_value(|c| {
            plan = Some(c.request(raw.as_deref()));
            active = c.active().map(|t| t.id);
        });
        let Some(plan) = plan else {
            return;
        };
        slot.set(slot_for(&plan, raw.as_deref()));

        #[cfg(feature = "csr")]
        {
            in_flight.update_value(|f| {
                f.retain(active);
            });
            if let PreviewPlan::Fetch(ticket) = plan {
                let mut signal = None;
                in_flight.update_value(|f| signal = abort::start(f, ticket.id));
                leptos::task::spawn_local(async move {
                    let mut api = crate::net::api::Api::new(session.get_untracked());
                    let result = api.fetch_markup(&ticket.path, signal.as_ref()).await;
                    crate::state::session::commit(session, api.into_session());
                    in_flight.try_update_value(|f| f.finish(ticket.id));
                    let accepted = cache.try_update_value(|c| c.complete(&ticket, result)).unwrap_or(false);
                    if accepted && let Some(state) = cache.try_with_value(|c| c.state(&ticket.filename)) {
                        slot.try_set(Slot::Preview(state));
                    }
                });
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = active;
        }
    });

    on_cleanup(move || {
        cache.try_update_value(PreviewCache::cancel);
        #[cfg(feature = "csr")]
        {
            in_flight.try_update_value(|f| {
                f.abort();
            });
        }
    });

    view! {
        <div class="floor-map-preview" class:floor-map-preview--large=large>
            {move || match slot.get() {
                Slot::Placeholder(kind, text) => {
                    view! {
                        <span
                            class="floor-map-preview__placeholder"
                            class:floor-map-preview__placeholder--text=kind == Placeholder::NotSvg
                        >
                            {text}
                        </span>
                    }
                        .into_any()
                }
                Slot::Preview(PreviewState::Ready(markup)) => {
                    view! { <div class="floor-map-preview__svg" inner_html=markup></div> }.into_any()
                }
                Slot::Preview(PreviewState::Failed(message)) => {
                    view! { <span class="floor-map-preview__error">{message}</span> }.into_any()
                }
                Slot::Preview(PreviewState::Loading | PreviewState::Idle) => {
                    view! { <span class="floor-map-preview__loading">"Loading floor plan..."</span> }.into_any()
                }
            }}
        </div>
    }
}
