//! Areatrans Frontend Entry Point

mod api;
mod app;
mod components;
mod config;
mod context;
mod domain;
mod error;
mod models;
mod pages;
mod session;
mod store;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(config::log_level()).is_err() {
        web_sys::console::warn_1(&"logger already initialised".into());
    }
    log::info!("[APP] api base: {:?}", config::api_base());
    mount_to_body(App);
}
