//! Contacts Section Component
//!
//! Phone list per hub with inline editing.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::{DeleteConfirmButton, ErrorBanner, SectionHeader};
use crate::context::use_app_context;
use crate::domain::contact::{tel_href, ContactForm};
use crate::domain::entity::{prepend, remove_by_id, replace_by_id};
use crate::models::Contact;

const KIND: &str = "Contactos";

#[component]
pub fn ContactsSection() -> impl IntoView {
    let ctx = use_app_context();

    let items = RwSignal::new(Vec::<Contact>::new());
    let loading = RwSignal::new(false);
    let saving = RwSignal::new(false);
    let error = RwSignal::new(String::new());
    let form = RwSignal::new(ContactForm::default());
    let editing = RwSignal::new(None::<i64>);
    let edit_form = RwSignal::new(ContactForm::default());
    let busy_id = RwSignal::new(None::<i64>);

    let load = move || {
        let hub = ctx.hub.get_untracked();
        loading.set(true);
        error.set(String::new());
        spawn_local(async move {
            let result = api::list_contacts(&hub).await;
            if !ctx.is_current_hub(&hub) {
                return;
            }
            match result {
                Ok(list) => items.set(list),
                Err(e) => {
                    log::warn!("contacts load failed for {}: {}", hub, e);
                    items.set(Vec::new());
                    error.set(e.to_string());
                }
            }
            loading.set(false);
        });
    };

    Effect::new(move |_| {
        ctx.hub.track();
        items.set(Vec::new());
        form.set(ContactForm::default());
        editing.set(None);
        load();
    });

    let add = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let draft = match form.with_untracked(|f| f.validate()) {
            Ok(d) => d,
            Err(e) => {
                error.set(e.to_string());
                return;
            }
        };
        let hub = ctx.hub.get_untracked();
        saving.set(true);
        error.set(String::new());
        spawn_local(async move {
            match api::create_contact(&hub, &draft).await {
                Ok(created) => {
                    if ctx.is_current_hub(&hub) {
                        items.update(|list| prepend(list, created));
                        form.set(ContactForm::default());
                    }
                    ctx.notify(&hub, KIND, "Contacto agregado", format!("{} · {}", hub, draft.nombre));
                }
                Err(e) => error.set(e.to_string()),
            }
            saving.set(false);
        });
    };

    let save_edit = move |id: i64| {
        let draft = match edit_form.with_untracked(|f| f.validate()) {
            Ok(d) => d,
            Err(e) => {
                error.set(e.to_string());
                return;
            }
        };
        let hub = ctx.hub.get_untracked();
        busy_id.set(Some(id));
        error.set(String::new());
        spawn_local(async move {
            match api::update_contact(&hub, id, &draft).await {
                Ok(updated) => {
                    if ctx.is_current_hub(&hub) {
                        items.update(|list| {
                            replace_by_id(list, updated);
                        });
                        editing.set(None);
                    }
                    ctx.notify(&hub, KIND, "Contacto actualizado", format!("{} · {}", hub, draft.nombre));
                }
                Err(e) => error.set(e.to_string()),
            }
            busy_id.set(None);
        });
    };

    let remove = move |c: Contact| {
        let hub = ctx.hub.get_untracked();
        busy_id.set(Some(c.id));
        error.set(String::new());
        spawn_local(async move {
            match api::delete_contact(&hub, c.id).await {
                Ok(()) => {
                    if ctx.is_current_hub(&hub) {
                        items.update(|list| remove_by_id(list, c.id));
                        if editing.try_get_untracked() == Some(Some(c.id)) {
                            editing.set(None);
                        }
                    }
                    ctx.notify(&hub, KIND, "Contacto eliminado", format!("{} · {}", hub, c.nombre));
                }
                Err(e) => error.set(e.to_string()),
            }
            busy_id.set(None);
        });
    };

    let row_view = move |c: Contact| {
        let id = c.id;
        let is_busy = Signal::derive(move || busy_id.get() == Some(id));
        if editing.get() == Some(id) {
            view! {
                <tr>
                    <td>
                        <input
                            class="inline-input"
                            prop:value=move || edit_form.with(|f| f.nombre.clone())
                            on:input=move |ev| edit_form.update(|f| f.nombre = event_target_value(&ev))
                        />
                    </td>
                    <td>
                        <input
                            class="inline-input"
                            prop:value=move || edit_form.with(|f| f.cargo.clone())
                            on:input=move |ev| edit_form.update(|f| f.cargo = event_target_value(&ev))
                        />
                    </td>
                    <td>
                        <input
                            class="inline-input"
                            prop:value=move || edit_form.with(|f| f.telefono.clone())
                            on:input=move |ev| edit_form.update(|f| f.telefono = event_target_value(&ev))
                        />
                    </td>
                    <td class="row-actions">
                        <button class="btn btn-blue" disabled=move || is_busy.get() on:click=move |_| save_edit(id)>
                            {move || if is_busy.get() { "Guardando..." } else { "Guardar" }}
                        </button>
                        <button class="btn" on:click=move |_| editing.set(None)>"Cancelar"</button>
                    </td>
                </tr>
            }
            .into_any()
        } else {
            let href = tel_href(&c.telefono);
            let question = format!("¿Eliminar el contacto \"{}\"?", c.nombre);
            let for_edit = c.clone();
            let for_delete = c.clone();
            view! {
                <tr>
                    <td><b>{c.nombre.clone()}</b></td>
                    <td>{if c.cargo.is_empty() { "—".to_string() } else { c.cargo.clone() }}</td>
                    <td>
                        <a class="tel-link" href=href>{c.telefono.clone()}</a>
                    </td>
                    <td class="row-actions">
                        <button
                            class="btn"
                            on:click=move |_| {
                                error.set(String::new());
                                edit_form.set(ContactForm::from_contact(&for_edit));
                                editing.set(Some(id));
                            }
                        >
                            "Editar"
                        </button>
                        <DeleteConfirmButton
                            question=question
                            disabled=is_busy
                            on_confirm=move |_| remove(for_delete.clone())
                        />
                    </td>
                </tr>
            }
            .into_any()
        }
    };

    view! {
        <div class="section">
            <SectionHeader kicker="CONTACTOS" title="Lista de contactos por plaza">
                <button class="btn" disabled=move || loading.get() on:click=move |_| load()>
                    {move || if loading.get() { "Cargando..." } else { "Refrescar" }}
                </button>
            </SectionHeader>

            <form class="block-card form-grid" on:submit=add>
                <label>
                    <span class="label">"Nombre"</span>
                    <input
                        placeholder="Ej: Juan Pérez"
                        prop:value=move || form.with(|f| f.nombre.clone())
                        on:input=move |ev| form.update(|f| f.nombre = event_target_value(&ev))
                    />
                </label>
                <label>
                    <span class="label">"Cargo"</span>
                    <input
                        placeholder="Ej: Coordinador"
                        prop:value=move || form.with(|f| f.cargo.clone())
                        on:input=move |ev| form.update(|f| f.cargo = event_target_value(&ev))
                    />
                </label>
                <label>
                    <span class="label">"Teléfono"</span>
                    <input
                        placeholder="Ej: +34 600 000 000"
                        prop:value=move || form.with(|f| f.telefono.clone())
                        on:input=move |ev| form.update(|f| f.telefono = event_target_value(&ev))
                    />
                </label>
                <button type="submit" class="btn btn-orange" disabled=move || saving.get()>
                    {move || if saving.get() { "Agregando..." } else { "Agregar" }}
                </button>
            </form>
            <ErrorBanner error=error />

            <div class="table-wrap">
                <div class="table-title">
                    <b>"Listado"</b>
                    <span class="muted">{move || format!(" · {} contactos", items.with(|l| l.len()))}</span>
                </div>
                <Show
                    when=move || items.with(|l| !l.is_empty())
                    fallback=move || {
                        view! {
                            <div class="empty">
                                {move || if loading.get() { "Cargando..." } else { "No hay contactos en esta plaza." }}
                            </div>
                        }
                    }
                >
                    <table class="table">
                        <thead>
                            <tr>
                                <th>"Nombre"</th>
                                <th>"Cargo"</th>
                                <th>"Teléfono"</th>
                                <th class="col-actions">"Acciones"</th>
                            </tr>
                        </thead>
                        <tbody>
                            {move || items.get().into_iter().map(row_view).collect_view()}
                        </tbody>
                    </table>
                </Show>
            </div>
        </div>
    }
}
