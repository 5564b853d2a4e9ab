//! Notification Panel Component
//!
//! Latest entries of the local notification log.

use leptos::prelude::*;

use crate::domain::format::format_when;
use crate::domain::notification::recent;
use crate::store::{
    store_clear_notifications, store_mark_all_read, store_mark_read, use_app_store,
    AppStateStoreFields,
};

#[component]
pub fn NotificationPanel() -> impl IntoView {
    let store = use_app_store();
    let entries = move || recent(&store.notifications().read());

    view! {
        <div class="block-card notif-panel">
            <div class="block-title-row">
                <h2>"Notificaciones"</h2>
                <div class="notif-actions">
                    <button class="btn btn-small" on:click=move |_| store_mark_all_read(&store)>
                        "Marcar todo como leído"
                    </button>
                    <button class="btn btn-small btn-danger-soft" on:click=move |_| store_clear_notifications(&store)>
                        "Limpiar"
                    </button>
                </div>
            </div>
            <Show
                when=move || !entries().is_empty()
                fallback=|| view! { <div class="helper-text">"No hay notificaciones."</div> }
            >
                <div class="notif-list">
                    <For
                        each=entries
                        key=|n| (n.id.clone(), n.read)
                        children=move |n| {
                            let id = n.id.clone();
                            let item_class = if n.read { "notif-item read" } else { "notif-item" };
                            view! {
                                <button class=item_class on:click=move |_| store_mark_read(&store, &id)>
                                    <div class="notif-top">
                                        <span class="notif-type">{n.kind_label().to_string()}</span>
                                        <span class="notif-when">{format_when(&n.created_at)}</span>
                                    </div>
                                    <div class="notif-title-row">
                                        <span class="notif-title">{n.title.clone()}</span>
                                        {(!n.read).then(|| view! { <span class="unread-dot"></span> })}
                                    </div>
                                    <div class="notif-msg">
                                        <b>{n.hub.clone()}</b>
                                        " — "
                                        {n.message.clone()}
                                    </div>
                                </button>
                            }
                        }
                    />
                </div>
            </Show>
        </div>
    }
}
