//! # client
//!
//! Leptos + WASM browser client for CloudLab.
//!
//! Pages, components, and browser glue live here; experiment state, the API
//! client, and validation come from the `cloudlab` crate. Building with the
//! `csr` feature produces the browser bundle (see `index.html` for trunk);
//! without it the crate compiles natively so the pure helpers can be tested.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod util;

/// WASM entry point: install panic and log hooks, then mount the app.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::mount_to_body(app::App);
}
