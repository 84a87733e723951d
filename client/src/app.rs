//! Root application component and shared context.
//!
//! SYSTEM CONTEXT
//! ==============
//! `App` provides the session and recent-floor-map signals to every page and
//! dialog. Both are loaded once from `localStorage` and written back whenever
//! they change, so a token refresh in one request is visible to the next.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;
use rooms::Session;
use rooms::recent::RecentFloorMaps;

use crate::pages::rooms::RoomsPage;
use crate::state::{recent, session};

/// Root component.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let session_signal = RwSignal::new(session::load());
    let recent_signal = RwSignal::new(recent::load());
    provide_context::<RwSignal<Session>>(session_signal);
    provide_context::<RwSignal<RecentFloorMaps>>(recent_signal);

    Effect::new(move || session::store(&session_signal.get()));
    Effect::new(move || recent::store(&recent_signal.get()));

    view! {
        <Title text="Rooms" />
        <Router>
            <main class="app">
                <Routes fallback=|| view! { <p class="app__not-found">"Page not found."</p> }>
                    <Route path=path!("/") view=RoomsPage />
                    <Route path=path!("/rooms") view=RoomsPage />
                </Routes>
            </main>
        </Router>
    }
}
