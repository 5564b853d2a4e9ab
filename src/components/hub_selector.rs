//! Hub Selector Component
//!
//! Chip bar for switching the hub every section is filtered by.

use leptos::prelude::*;

use crate::context::use_app_context;
use crate::domain::HUBS;

#[component]
pub fn HubSelector() -> impl IntoView {
    let ctx = use_app_context();

    view! {
        <div class="block-card">
            <div class="block-title-row">
                <h2>"Selecciona HUB"</h2>
                <span class="helper-text">"Filtra todas las funciones por HUB"</span>
            </div>
            <div class="hub-chips">
                {HUBS
                    .iter()
                    .map(|hub| {
                        let hub = *hub;
                        let chip_class = move || {
                            if ctx.hub.get() == hub { "chip active" } else { "chip" }
                        };
                        view! {
                            <button class=chip_class title=hub on:click=move |_| ctx.select_hub(hub)>
                                {hub}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>
        </div>
    }
}
