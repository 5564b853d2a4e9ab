//! Section Header Component
//!
//! Kicker, title and hub line shared by all sections, plus the inline error banner.

use leptos::prelude::*;

use crate::context::use_app_context;

#[component]
pub fn SectionHeader(
    #[prop(into)] kicker: String,
    #[prop(into)] title: String,
    /// Filters and refresh buttons on the right.
    #[prop(optional)]
    children: Option<Children>,
) -> impl IntoView {
    let ctx = use_app_context();

    view! {
        <div class="section-header">
            <div>
                <div class="kicker">{kicker}</div>
                <h3>{title}</h3>
                <div class="sub">"HUB: " <b>{move || ctx.hub.get()}</b></div>
            </div>
            <div class="filters">{children.map(|c| c())}</div>
        </div>
    }
}

/// Shows the message while it is non-empty.
#[component]
pub fn ErrorBanner(error: RwSignal<String>) -> impl IntoView {
    view! {
        <Show when=move || !error.get().is_empty()>
            <div class="error-banner">
                <span>{move || error.get()}</span>
                <button class="error-close" title="Cerrar" on:click=move |_| error.set(String::new())>
                    "✕"
                </button>
            </div>
        </Show>
    }
}
