//! Incidents Section Component
//!
//! Vehicle list on the left, open vehicles as tabs on the right. The active
//! tab shows the incident log with cost totals and inline editing.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::{DeleteConfirmButton, ErrorBanner};
use crate::context::use_app_context;
use crate::domain::entity::{remove_by_id, replace_by_id};
use crate::domain::fleet::{incident_costs, sort_vehicles, vehicle_label, IncidentForm, OpenTabs};
use crate::domain::format::{format2, format_fecha_es, today, today_ymd};
use crate::models::{Vehicle, VehicleIncident};

const KIND: &str = "Flota";

fn blank_form() -> IncidentForm {
    IncidentForm {
        fecha: today_ymd(),
        ..Default::default()
    }
}

#[component]
pub fn IncidentsSection() -> impl IntoView {
    let ctx = use_app_context();

    let vehicles = RwSignal::new(Vec::<Vehicle>::new());
    let loading_vehicles = RwSignal::new(false);
    let tabs = RwSignal::new(OpenTabs::default());

    let items = RwSignal::new(Vec::<VehicleIncident>::new());
    let loading_items = RwSignal::new(false);
    let error = RwSignal::new(String::new());
    let form = RwSignal::new(blank_form());
    let saving = RwSignal::new(false);
    let editing = RwSignal::new(None::<i64>);
    let edit_form = RwSignal::new(IncidentForm::default());
    let busy_id = RwSignal::new(None::<i64>);

    let active = Memo::new(move |_| tabs.with(|t| t.active));
    let costs = Memo::new(move |_| items.with(|list| incident_costs(list, today())));

    let label_for = move |id: i64| {
        vehicles.with(|list| {
            list.iter()
                .find(|v| v.id == id)
                .map(vehicle_label)
                .unwrap_or_else(|| format!("Vehículo {}", id))
        })
    };

    let load_vehicles = move || {
        let hub = ctx.hub.get_untracked();
        loading_vehicles.set(true);
        error.set(String::new());
        spawn_local(async move {
            let result = api::list_vehicles(&hub).await;
            if !ctx.is_current_hub(&hub) {
                return;
            }
            match result {
                Ok(mut list) => {
                    sort_vehicles(&mut list);
                    vehicles.set(list);
                }
                Err(e) => {
                    vehicles.set(Vec::new());
                    error.set(e.to_string());
                }
            }
            loading_vehicles.set(false);
        });
    };

    Effect::new(move |_| {
        ctx.hub.track();
        vehicles.set(Vec::new());
        tabs.update(|t| t.clear());
        load_vehicles();
    });

    // Incident log follows the active tab.
    Effect::new(move |_| {
        let Some(vehicle_id) = active.get() else {
            items.set(Vec::new());
            loading_items.set(false);
            return;
        };
        let hub = ctx.hub.get_untracked();
        items.set(Vec::new());
        editing.set(None);
        form.set(blank_form());
        loading_items.set(true);
        error.set(String::new());
        spawn_local(async move {
            let result = api::list_incidents(&hub, vehicle_id).await;
            if active.try_get_untracked() != Some(Some(vehicle_id)) {
                return;
            }
            match result {
                Ok(list) => items.set(list),
                Err(e) => {
                    log::warn!("incidents load failed for vehicle {}: {}", vehicle_id, e);
                    error.set(e.to_string());
                }
            }
            loading_items.set(false);
        });
    });

    let add = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(vehicle_id) = active.get_untracked() else {
            return;
        };
        let draft = match form.with_untracked(|f| f.validate()) {
            Ok(d) => d,
            Err(e) => {
                error.set(e.to_string());
                return;
            }
        };
        let hub = ctx.hub.get_untracked();
        let label = label_for(vehicle_id);
        saving.set(true);
        error.set(String::new());
        spawn_local(async move {
            match api::create_incident(&hub, vehicle_id, &draft).await {
                Ok(created) => {
                    if ctx.is_current_hub(&hub) {
                        if active.try_get_untracked() == Some(Some(vehicle_id)) {
                            items.update(|list| list.insert(0, created));
                        }
                        form.set(blank_form());
                    }
                    ctx.notify(&hub, KIND, "Incidencia agregada", format!("{}: {} · {}", hub, label, draft.titulo));
                }
                Err(e) => error.set(e.to_string()),
            }
            saving.set(false);
        });
    };

    let save_edit = move |id: i64| {
        let Some(vehicle_id) = active.get_untracked() else {
            return;
        };
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
            match api::update_incident(&hub, vehicle_id, id, &draft).await {
                Ok(updated) => {
                    if ctx.is_current_hub(&hub) && active.try_get_untracked() == Some(Some(vehicle_id)) {
                        items.update(|list| {
                            replace_by_id(list, updated);
                        });
                        editing.set(None);
                    }
                    ctx.notify(&hub, KIND, "Incidencia actualizada", hub.clone());
                }
                Err(e) => error.set(e.to_string()),
            }
            busy_id.set(None);
        });
    };

    let remove = move |id: i64| {
        let Some(vehicle_id) = active.get_untracked() else {
            return;
        };
        let hub = ctx.hub.get_untracked();
        busy_id.set(Some(id));
        error.set(String::new());
        spawn_local(async move {
            match api::delete_incident(&hub, vehicle_id, id).await {
                Ok(()) => {
                    if ctx.is_current_hub(&hub) && active.try_get_untracked() == Some(Some(vehicle_id)) {
                        items.update(|list| remove_by_id(list, id));
                    }
                    ctx.notify(&hub, KIND, "Incidencia eliminada", hub.clone());
                }
                Err(e) => error.set(e.to_string()),
            }
            busy_id.set(None);
        });
    };

    let row_view = move |it: VehicleIncident| {
        let id = it.id;
        let is_busy = Signal::derive(move || busy_id.get() == Some(id));
        if editing.get() == Some(id) {
            view! {
                <tr>
                    <td>
                        <input
                            class="inline-input"
                            type="date"
                            prop:value=move || edit_form.with(|f| f.fecha.clone())
                            on:input=move |ev| edit_form.update(|f| f.fecha = event_target_value(&ev))
                        />
                    </td>
                    <td>
                        <input
                            class="inline-input"
                            prop:value=move || edit_form.with(|f| f.titulo.clone())
                            on:input=move |ev| edit_form.update(|f| f.titulo = event_target_value(&ev))
                        />
                    </td>
                    <td>
                        <input
                            class="inline-input"
                            prop:value=move || edit_form.with(|f| f.descripcion.clone())
                            on:input=move |ev| edit_form.update(|f| f.descripcion = event_target_value(&ev))
                        />
                    </td>
                    <td class="num">
                        <input
                            class="inline-input num"
                            inputmode="decimal"
                            prop:value=move || edit_form.with(|f| f.coste.clone())
                            on:input=move |ev| edit_form.update(|f| f.coste = event_target_value(&ev))
                        />
                    </td>
                    <td class="num">
                        <input
                            class="inline-input num"
                            inputmode="numeric"
                            prop:value=move || edit_form.with(|f| f.km.clone())
                            on:input=move |ev| edit_form.update(|f| f.km = event_target_value(&ev))
                        />
                    </td>
                    <td class="row-actions">
                        <button class="btn btn-blue" disabled=move || is_busy.get() on:click=move |_| save_edit(id)>
                            "Guardar"
                        </button>
                        <button class="btn" on:click=move |_| editing.set(None)>"Cancelar"</button>
                    </td>
                </tr>
            }
            .into_any()
        } else {
            let question = format!("¿Eliminar la incidencia \"{}\"?", it.titulo);
            let for_edit = it.clone();
            view! {
                <tr>
                    <td>{format_fecha_es(&it.fecha)}</td>
                    <td><b>{it.titulo.clone()}</b></td>
                    <td>{if it.descripcion.is_empty() { "—".to_string() } else { it.descripcion.clone() }}</td>
                    <td class="num">{format2(it.coste)}</td>
                    <td class="num">{it.km}</td>
                    <td class="row-actions">
                        <button
                            class="btn"
                            on:click=move |_| {
                                error.set(String::new());
                                edit_form.set(IncidentForm::from_incident(&for_edit));
                                editing.set(Some(id));
                            }
                        >
                            "Editar"
                        </button>
                        <DeleteConfirmButton question=question disabled=is_busy on_confirm=move |_| remove(id) />
                    </td>
                </tr>
            }
            .into_any()
        }
    };

    view! {
        <div class="split">
            <div class="block-card vehicle-list">
                <div class="block-title-row">
                    <b>"Vehículos"</b>
                    <button class="btn btn-small" disabled=move || loading_vehicles.get() on:click=move |_| load_vehicles()>
                        {move || if loading_vehicles.get() { "Cargando..." } else { "Refrescar" }}
                    </button>
                </div>
                <Show
                    when=move || vehicles.with(|l| !l.is_empty())
                    fallback=move || {
                        view! {
                            <div class="empty">
                                {move || if loading_vehicles.get() { "Cargando..." } else { "No hay vehículos en este HUB." }}
                            </div>
                        }
                    }
                >
                    <For
                        each=move || vehicles.get()
                        key=|v| v.id
                        children=move |v| {
                            let id = v.id;
                            let item_class = move || {
                                if active.get() == Some(id) { "vehicle-item active" } else { "vehicle-item" }
                            };
                            view! {
                                <button class=item_class on:click=move |_| tabs.update(|t| t.open(id))>
                                    {vehicle_label(&v)}
                                </button>
                            }
                        }
                    />
                </Show>
            </div>

            <div class="block-card incident-panel">
                <div class="tab-strip">
                    <For
                        each=move || tabs.with(|t| t.ids.clone())
                        key=|id| *id
                        children=move |id| {
                            let tab_class = move || if active.get() == Some(id) { "tab active" } else { "tab" };
                            view! {
                                <div class=tab_class on:click=move |_| tabs.update(|t| t.active = Some(id))>
                                    {move || label_for(id)}
                                    <span
                                        class="tab-close"
                                        title="Cerrar"
                                        on:click=move |ev| {
                                            ev.stop_propagation();
                                            tabs.update(|t| {
                                                t.close(id);
                                            });
                                        }
                                    >
                                        "✕"
                                    </span>
                                </div>
                            }
                        }
                    />
                </div>

                <ErrorBanner error=error />

                {move || match active.get() {
                    None => {
                        view! {
                            <div class="helper-text">"Selecciona un vehículo para ver/añadir incidencias."</div>
                        }
                            .into_any()
                    }
                    Some(vehicle_id) => {
                        view! {
                            <h3>{move || format!("Incidencias · {}", label_for(vehicle_id))}</h3>
                            <div class="summary-line">
                                <span>"Total coste este mes: " <b>{move || format2(costs.get().month)}</b></span>
                                <span>"Total coste este año: " <b>{move || format2(costs.get().year)}</b></span>
                            </div>

                            <form class="form-grid" on:submit=add>
                                <input
                                    placeholder="Título"
                                    prop:value=move || form.with(|f| f.titulo.clone())
                                    on:input=move |ev| form.update(|f| f.titulo = event_target_value(&ev))
                                />
                                <input
                                    placeholder="Descripción"
                                    prop:value=move || form.with(|f| f.descripcion.clone())
                                    on:input=move |ev| form.update(|f| f.descripcion = event_target_value(&ev))
                                />
                                <input
                                    type="date"
                                    prop:value=move || form.with(|f| f.fecha.clone())
                                    on:input=move |ev| form.update(|f| f.fecha = event_target_value(&ev))
                                />
                                <input
                                    placeholder="Coste"
                                    inputmode="decimal"
                                    prop:value=move || form.with(|f| f.coste.clone())
                                    on:input=move |ev| form.update(|f| f.coste = event_target_value(&ev))
                                />
                                <input
                                    placeholder="KM"
                                    inputmode="numeric"
                                    prop:value=move || form.with(|f| f.km.clone())
                                    on:input=move |ev| form.update(|f| f.km = event_target_value(&ev))
                                />
                                <button type="submit" class="btn btn-sky" disabled=move || saving.get()>
                                    "Agregar incidencia"
                                </button>
                            </form>

                            <div class="table-wrap">
                                {move || {
                                    if loading_items.get() {
                                        view! { <div class="empty">"Cargando..."</div> }.into_any()
                                    } else if items.with(|l| l.is_empty()) {
                                        view! { <div class="empty">"Sin incidencias todavía."</div> }.into_any()
                                    } else {
                                        view! {
                                            <table class="table">
                                                <thead>
                                                    <tr>
                                                        <th>"Fecha"</th>
                                                        <th>"Título"</th>
                                                        <th>"Descripción"</th>
                                                        <th class="num">"Coste"</th>
                                                        <th class="num">"KM"</th>
                                                        <th class="col-actions">"Acciones"</th>
                                                    </tr>
                                                </thead>
                                                <tbody>
                                                    {items.get().into_iter().map(row_view).collect_view()}
                                                </tbody>
                                            </table>
                                        }
                                            .into_any()
                                    }
                                }}
                            </div>
                        }
                            .into_any()
                    }
                }}
            </div>
        </div>
    }
}
