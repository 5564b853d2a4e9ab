use leptos::prelude::*;

use crate::context::use_app_context;
use crate::domain::Section;

/// One card per dashboard section; the active one is highlighted.
#[component]
pub fn ModuleGrid() -> impl IntoView {
    let ctx = use_app_context();

    view! {
        <div class="modules-grid">
            {Section::ALL
                .into_iter()
                .map(|section| {
                    let card_class = move || {
                        if ctx.section.get() == section { "module-card active" } else { "module-card" }
                    };
                    view! {
                        <button class=card_class on:click=move |_| ctx.select_section(section)>
                            <div class="module-title">{section.label()}</div>
                            <div class="module-subtitle">{section.subtitle()}</div>
                        </button>
                    }
                })
                .collect_view()}
        </div>
    }
}
