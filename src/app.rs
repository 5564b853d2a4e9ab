//! Areatrans Frontend App
//!
//! Router with the login page at `/` and the dashboard at `/home`.

use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

use crate::pages::{HomePage, LoginPage};

#[component]
pub fn App() -> impl IntoView {
    view! {
        <Router>
            <Routes fallback=|| view! { <div class="empty">"Página no encontrada"</div> }>
                <Route path=path!("/") view=LoginPage />
                <Route path=path!("/home") view=HomePage />
            </Routes>
        </Router>
    }
}
