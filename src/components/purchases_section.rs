//! Purchases Section Component
//!
//! Shopping list per hub: add, tick as bought, edit inline, delete.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::{DeleteConfirmButton, ErrorBanner, SectionHeader};
use crate::context::use_app_context;
use crate::domain::entity::{prepend, remove_by_id, replace_by_id};
use crate::domain::format::format2;
use crate::domain::purchase::{line_total, summarize, PurchaseForm};
use crate::models::PurchaseItem;

const KIND: &str = "Compras";

#[component]
pub fn PurchasesSection() -> impl IntoView {
    let ctx = use_app_context();

    let items = RwSignal::new(Vec::<PurchaseItem>::new());
    let loading = RwSignal::new(false);
    let saving = RwSignal::new(false);
    let error = RwSignal::new(String::new());
    let form = RwSignal::new(PurchaseForm::default());
    let editing = RwSignal::new(None::<i64>);
    let edit_form = RwSignal::new(PurchaseForm::default());
    let busy_id = RwSignal::new(None::<i64>);

    let summary = Memo::new(move |_| items.with(|list| summarize(list)));

    let load = move || {
        let hub = ctx.hub.get_untracked();
        loading.set(true);
        error.set(String::new());
        spawn_local(async move {
            let result = api::list_purchases(&hub).await;
            if !ctx.is_current_hub(&hub) {
                return;
            }
            match result {
                Ok(list) => {
                    log::debug!("{} purchases loaded for {}", list.len(), hub);
                    items.set(list);
                }
                Err(e) => {
                    log::warn!("purchases load failed for {}: {}", hub, e);
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
        form.set(PurchaseForm::default());
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
            match api::create_purchase(&hub, &draft).await {
                Ok(created) => {
                    let name = created.item.clone();
                    if ctx.is_current_hub(&hub) {
                        items.update(|list| prepend(list, created));
                        form.set(PurchaseForm::default());
                    }
                    ctx.notify(&hub, KIND, "Agregado", format!("{} · {}", hub, name));
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
            match api::update_purchase(&hub, id, &draft).await {
                Ok(updated) => {
                    if ctx.is_current_hub(&hub) {
                        items.update(|list| {
                            replace_by_id(list, updated);
                        });
                        editing.set(None);
                    }
                    ctx.notify(&hub, KIND, "Actualizado", format!("{} · {}", hub, draft.item));
                }
                Err(e) => error.set(e.to_string()),
            }
            busy_id.set(None);
        });
    };

    let toggle_bought = move |it: PurchaseItem| {
        let hub = ctx.hub.get_untracked();
        let comprado = !it.comprado;
        // Optimistic; rolled back when the server refuses.
        items.update(|list| {
            replace_by_id(list, PurchaseItem { comprado, ..it.clone() });
        });
        busy_id.set(Some(it.id));
        spawn_local(async move {
            let result = api::set_purchase_bought(&hub, it.id, comprado).await;
            busy_id.set(None);
            if !ctx.is_current_hub(&hub) {
                return;
            }
            match result {
                Ok(updated) => {
                    items.update(|list| {
                        replace_by_id(list, updated);
                    });
                }
                Err(e) => {
                    items.update(|list| {
                        replace_by_id(list, it);
                    });
                    error.set(e.to_string());
                }
            }
        });
    };

    let remove = move |it: PurchaseItem| {
        let hub = ctx.hub.get_untracked();
        busy_id.set(Some(it.id));
        error.set(String::new());
        spawn_local(async move {
            match api::delete_purchase(&hub, it.id).await {
                Ok(()) => {
                    if ctx.is_current_hub(&hub) {
                        items.update(|list| remove_by_id(list, it.id));
                    }
                    ctx.notify(&hub, KIND, "Eliminado", format!("{} · {}", hub, it.item));
                }
                Err(e) => error.set(e.to_string()),
            }
            busy_id.set(None);
        });
    };

    let row_view = move |it: PurchaseItem| {
        let id = it.id;
        let is_busy = Signal::derive(move || busy_id.get() == Some(id));
        let row_class = if it.comprado { "row-done" } else { "" };
        let for_toggle = it.clone();
        let checkbox = view! {
            <td>
                <input
                    type="checkbox"
                    title="Comprado"
                    prop:checked=it.comprado
                    disabled=move || is_busy.get()
                    on:change=move |_| toggle_bought(for_toggle.clone())
                />
            </td>
        };

        if editing.get() == Some(id) {
            view! {
                <tr class=row_class>
                    {checkbox}
                    <td>
                        <input
                            class="inline-input"
                            prop:value=move || edit_form.with(|f| f.item.clone())
                            on:input=move |ev| edit_form.update(|f| f.item = event_target_value(&ev))
                        />
                    </td>
                    <td>
                        <input
                            class="inline-input"
                            prop:value=move || edit_form.with(|f| f.descripcion.clone())
                            on:input=move |ev| edit_form.update(|f| f.descripcion = event_target_value(&ev))
                        />
                    </td>
                    <td>
                        <input
                            class="inline-input"
                            prop:value=move || edit_form.with(|f| f.donde.clone())
                            on:input=move |ev| edit_form.update(|f| f.donde = event_target_value(&ev))
                        />
                    </td>
                    <td>
                        <input
                            class="inline-input num"
                            inputmode="decimal"
                            prop:value=move || edit_form.with(|f| f.precio.clone())
                            on:input=move |ev| edit_form.update(|f| f.precio = event_target_value(&ev))
                        />
                    </td>
                    <td>
                        <input
                            class="inline-input num"
                            inputmode="numeric"
                            prop:value=move || edit_form.with(|f| f.cantidad.clone())
                            on:input=move |ev| edit_form.update(|f| f.cantidad = event_target_value(&ev))
                        />
                    </td>
                    <td><b>{move || format2(edit_form.with(|f| f.preview_total()))}</b></td>
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
            let question = format!("¿Eliminar \"{}\"?", it.item);
            let total = format2(line_total(&it));
            let specs = it.specs().to_string();
            let for_edit = it.clone();
            let for_delete = it.clone();
            view! {
                <tr class=row_class>
                    {checkbox}
                    <td><b>{it.item.clone()}</b></td>
                    <td>{if specs.is_empty() { "—".to_string() } else { specs }}</td>
                    <td>{if it.donde.is_empty() { "—".to_string() } else { it.donde.clone() }}</td>
                    <td>{format2(it.precio)}</td>
                    <td>{it.cantidad}</td>
                    <td><b>{total}</b></td>
                    <td class="row-actions">
                        <button
                            class="btn"
                            on:click=move |_| {
                                error.set(String::new());
                                edit_form.set(PurchaseForm::from_item(&for_edit));
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
            <SectionHeader kicker="COMPRAS" title="Listado de compras por HUB">
                <button class="btn" disabled=move || loading.get() on:click=move |_| load()>
                    {move || if loading.get() { "Cargando..." } else { "Refrescar" }}
                </button>
            </SectionHeader>

            <div class="block-card summary-card">
                <h4>"Resumen"</h4>
                <div class="summary-line">
                    <span>"Items: " <b>{move || summary.get().items}</b></span>
                    <span>"Unidades: " <b>{move || summary.get().units}</b></span>
                    <span>"Total estimado: " <b>{move || format2(summary.get().total)}</b></span>
                </div>
            </div>

            <form class="block-card form-grid" on:submit=add>
                <label>
                    <span class="label">"Qué comprar"</span>
                    <input
                        placeholder="Ej: cinta embalar"
                        prop:value=move || form.with(|f| f.item.clone())
                        on:input=move |ev| form.update(|f| f.item = event_target_value(&ev))
                    />
                </label>
                <label>
                    <span class="label">"Especificaciones"</span>
                    <input
                        placeholder="Ej: 48mm x 66m"
                        prop:value=move || form.with(|f| f.descripcion.clone())
                        on:input=move |ev| form.update(|f| f.descripcion = event_target_value(&ev))
                    />
                </label>
                <label>
                    <span class="label">"Dónde comprar"</span>
                    <input
                        placeholder="Ej: Amazon / proveedor"
                        prop:value=move || form.with(|f| f.donde.clone())
                        on:input=move |ev| form.update(|f| f.donde = event_target_value(&ev))
                    />
                </label>
                <label>
                    <span class="label">"Precio (vacío = 1)"</span>
                    <input
                        inputmode="decimal"
                        placeholder="1,00"
                        prop:value=move || form.with(|f| f.precio.clone())
                        on:input=move |ev| form.update(|f| f.precio = event_target_value(&ev))
                    />
                </label>
                <label>
                    <span class="label">"Cantidad"</span>
                    <input
                        inputmode="numeric"
                        placeholder="1"
                        prop:value=move || form.with(|f| f.cantidad.clone())
                        on:input=move |ev| form.update(|f| f.cantidad = event_target_value(&ev))
                    />
                </label>
                <div>
                    <span class="label">"Total"</span>
                    <div class="total-box">{move || format2(form.with(|f| f.preview_total()))}</div>
                </div>
                <button type="submit" class="btn btn-orange" disabled=move || saving.get()>
                    {move || if saving.get() { "Agregando..." } else { "Agregar" }}
                </button>
            </form>
            <ErrorBanner error=error />

            <div class="table-wrap">
                <div class="table-title">
                    <b>"Lista"</b>
                    <span class="muted">{move || format!(" · {} items", items.with(|l| l.len()))}</span>
                </div>
                <Show
                    when=move || items.with(|l| !l.is_empty())
                    fallback=move || {
                        view! {
                            <div class="empty">
                                {move || if loading.get() { "Cargando..." } else { "No hay compras aún." }}
                            </div>
                        }
                    }
                >
                    <table class="table">
                        <thead>
                            <tr>
                                <th>"OK"</th>
                                <th>"Qué comprar"</th>
                                <th>"Especificaciones"</th>
                                <th>"Dónde"</th>
                                <th>"Precio"</th>
                                <th>"Cant."</th>
                                <th>"Total"</th>
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
