//! Home Page
//!
//! Dashboard shell: header, notification log, hub chips, module cards and
//! the active section. Owns the app store and the hub/section context.

use leptos::prelude::*;
use leptos_router::components::Redirect;
use reactive_stores::Store;

use crate::components::{
    AttendanceSection, ContactsSection, DeliverySection, FleetSection, HeaderBar, HubSelector,
    IncidentsSection, KilosLitrosSection, ModuleGrid, NotificationPanel, PurchasesSection,
    SettlementSection,
};
use crate::context::AppContext;
use crate::domain::hub::default_hub;
use crate::domain::Section;
use crate::session;
use crate::store::AppState;

#[component]
pub fn HomePage() -> impl IntoView {
    if !session::is_authenticated() {
        log::info!("[HOME] no session, back to login");
        return view! { <Redirect path="/" /> }.into_any();
    }

    let store = Store::new(AppState::load());
    provide_context(store);

    let (hub, set_hub) = signal(default_hub());
    let (section, set_section) = signal(Section::Asistencias);
    let ctx = AppContext::new((hub, set_hub), (section, set_section), store);
    provide_context(ctx);

    let panel_open = RwSignal::new(false);
    let logged_out = RwSignal::new(false);
    let logout = move |_| {
        session::clear();
        log::info!("[HOME] logged out");
        logged_out.set(true);
    };

    let email = session::user().map(|u| u.email).filter(|e| !e.is_empty());

    view! {
        <Show when=move || logged_out.get()>
            <Redirect path="/" />
        </Show>
        <div class="page">
            <div class="container">
                <HeaderBar
                    welcome=session::welcome_message()
                    email=email
                    panel_open=panel_open
                    on_logout=logout
                />
                <Show when=move || panel_open.get()>
                    <NotificationPanel />
                </Show>
                <HubSelector />
                <ModuleGrid />
                <div class="panel-card">
                    <div class="panel-header">
                        <div class="panel-kicker">
                            <span class="kicker-hub">{move || hub.get()}</span>
                            <span class="dot">"•"</span>
                            <span class="kicker-module">{move || section.get().label()}</span>
                        </div>
                        <h2 class="panel-title">{move || section.get().label()}</h2>
                    </div>
                    {move || match section.get() {
                        Section::Asistencias => view! { <AttendanceSection /> }.into_any(),
                        Section::Liquidaciones => view! { <SettlementSection /> }.into_any(),
                        Section::Flota => view! { <FleetSection /> }.into_any(),
                        Section::Incidencias => view! { <IncidentsSection /> }.into_any(),
                        Section::Reparto => view! { <DeliverySection /> }.into_any(),
                        Section::Compras => view! { <PurchasesSection /> }.into_any(),
                        Section::KilosLitros => view! { <KilosLitrosSection /> }.into_any(),
                        Section::Contactos => view! { <ContactsSection /> }.into_any(),
                    }}
                </div>
            </div>
        </div>
    }
    .into_any()
}
