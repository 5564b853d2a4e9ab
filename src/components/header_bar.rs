//! Header Bar Component
//!
//! Welcome line, session email, notification bell and logout.

use leptos::prelude::*;

use crate::domain::notification::unread_count;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn HeaderBar(
    #[prop(into)] welcome: String,
    #[prop(into)] email: Option<String>,
    panel_open: RwSignal<bool>,
    #[prop(into)] on_logout: Callback<()>,
) -> impl IntoView {
    let store = use_app_store();
    let unread = move || unread_count(&store.notifications().read());

    view! {
        <div class="header-card">
            <div class="header-left">
                <h1>{welcome}</h1>
                <div class="subline">
                    <span class="badge">"HOME"</span>
                    <span class="dot">"•"</span>
                    <span class="small-text">{email.unwrap_or_else(|| "Sesión activa".to_string())}</span>
                </div>
            </div>
            <div class="header-right">
                <button
                    class=move || if panel_open.get() { "notif-btn active" } else { "notif-btn" }
                    title="Notificaciones"
                    on:click=move |_| panel_open.update(|open| *open = !*open)
                >
                    "🔔"
                    <Show when=move || { unread() > 0 }>
                        <span class="notif-bubble">{unread}</span>
                    </Show>
                </button>
                <button class="btn btn-dark" on:click=move |_| on_logout.run(())>
                    "Cerrar sesión"
                </button>
            </div>
        </div>
    }
}
