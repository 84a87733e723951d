//! Browser front-end for the rooms area.
//!
//! Built with Leptos and compiled to WebAssembly under the `csr` feature.
//! Without that feature the crate still compiles natively so the pure state
//! and helper logic can be unit-tested with plain `cargo test`.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`app`] | Root component, context providers and routes |
//! | [`pages`] | Route-level screens |
//! | [`components`] | Dialogs, previews and the floor-plan designer host |
//! | [`net`] | REST calls over `gloo-net` |
//! | [`state`] | Page state and persisted session / recent list |
//! | [`util`] | Storage glue and DOM input mapping |

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install the panic hook and logger, then mount the app.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::mount_to_body(app::App);
}
