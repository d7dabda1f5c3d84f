//! # blaze-admin
//!
//! Leptos + WASM staff dashboard for the Blaze ride-hailing, rental and
//! delivery platform. Talks to the external Django REST backend over
//! JWT-authenticated HTTP and a websocket ops feed.
//!
//! This crate contains pages, components, application state, the token
//! and session plumbing, and the typed API client.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// Browser entry point: hydrate the server-rendered DOM.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::hydrate_body(app::App);
}
