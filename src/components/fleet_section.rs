//! Fleet Section Component

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::{DeleteConfirmButton, ErrorBanner, SectionHeader};
use crate::context::use_app_context;
use crate::domain::entity::remove_by_id;
use crate::domain::fleet::{merge_vehicle, normalize_plate, sort_vehicles, DEFAULT_VEHICLE_TYPE, VEHICLE_TYPES};
use crate::models::Vehicle;

const KIND: &str = "Flota";

/// Vehicles of the selected hub.
#[component]
pub fn FleetSection() -> impl IntoView {
    let ctx = use_app_context();

    let vehicles = RwSignal::new(Vec::<Vehicle>::new());
    let loading = RwSignal::new(false);
    let saving = RwSignal::new(false);
    let deleting = RwSignal::new(None::<i64>);
    let error = RwSignal::new(String::new());
    let plate = RwSignal::new(String::new());
    let tipo = RwSignal::new(DEFAULT_VEHICLE_TYPE.to_string());

    let load = move || {
        let hub = ctx.hub.get_untracked();
        loading.set(true);
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
                    log::warn!("fleet load failed for {}: {}", hub, e);
                    vehicles.set(Vec::new());
                    error.set(e.to_string());
                }
            }
            loading.set(false);
        });
    };

    Effect::new(move |_| {
        ctx.hub.track();
        vehicles.set(Vec::new());
        plate.set(String::new());
        load();
    });

    let add = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let matricula = normalize_plate(&plate.get_untracked());
        if matricula.is_empty() {
            return;
        }
        let tipo_value = tipo.get_untracked();
        let hub = ctx.hub.get_untracked();
        saving.set(true);
        error.set(String::new());
        spawn_local(async move {
            match api::create_vehicle(&hub, &matricula, &tipo_value).await {
                Ok(v) => {
                    let message = format!("{}: {} · {}", hub, v.matricula, v.tipo);
                    if ctx.is_current_hub(&hub) {
                        vehicles.update(|list| merge_vehicle(list, v));
                        plate.set(String::new());
                    }
                    ctx.notify(&hub, KIND, "Vehículo agregado", message);
                }
                Err(e) => error.set(e.to_string()),
            }
            saving.set(false);
        });
    };

    let remove = move |v: Vehicle| {
        let hub = ctx.hub.get_untracked();
        deleting.set(Some(v.id));
        error.set(String::new());
        spawn_local(async move {
            match api::delete_vehicle(&hub, v.id).await {
                Ok(()) => {
                    if ctx.is_current_hub(&hub) {
                        vehicles.update(|list| remove_by_id(list, v.id));
                    }
                    ctx.notify(&hub, KIND, "Vehículo eliminado", format!("{}: {}", hub, v.matricula));
                }
                Err(e) => error.set(e.to_string()),
            }
            deleting.set(None);
        });
    };

    view! {
        <div class="section">
            <SectionHeader kicker="FLOTA" title="Vehículos por HUB">
                <button class="btn" disabled=move || loading.get() on:click=move |_| load()>
                    {move || if loading.get() { "Cargando..." } else { "Refrescar" }}
                </button>
            </SectionHeader>

            <form class="block-card form-row" on:submit=add>
                <label>
                    <span class="label">"Matrícula"</span>
                    <input
                        placeholder="Ej: 1234 ABC"
                        prop:value=move || plate.get()
                        on:input=move |ev| plate.set(event_target_value(&ev))
                    />
                </label>
                <label>
                    <span class="label">"Tipo"</span>
                    <select class="select" on:change=move |ev| tipo.set(event_target_value(&ev))>
                        {VEHICLE_TYPES
                            .into_iter()
                            .map(|t| {
                                view! { <option value=t selected=move || tipo.get() == t>{t}</option> }
                            })
                            .collect_view()}
                    </select>
                </label>
                <button type="submit" class="btn btn-orange" disabled=move || saving.get()>
                    {move || if saving.get() { "Agregando..." } else { "Agregar" }}
                </button>
            </form>
            <ErrorBanner error=error />

            <div class="table-wrap">
                <div class="table-title">
                    <b>"Vehículos"</b>
                    <span class="muted">{move || format!(" · {}", vehicles.with(|l| l.len()))}</span>
                </div>
                <Show
                    when=move || vehicles.with(|l| !l.is_empty())
                    fallback=move || {
                        view! {
                            <div class="empty">
                                {move || if loading.get() { "Cargando..." } else { "No hay vehículos en este HUB." }}
                            </div>
                        }
                    }
                >
                    <table class="table">
                        <thead>
                            <tr>
                                <th>"Matrícula"</th>
                                <th>"Tipo"</th>
                                <th class="col-actions">"Acciones"</th>
                            </tr>
                        </thead>
                        <tbody>
                            <For
                                each=move || vehicles.get()
                                key=|v| v.id
                                children=move |v| {
                                    let id = v.id;
                                    let question = format!("¿Borrar el vehículo {}?", v.matricula);
                                    let for_delete = v.clone();
                                    view! {
                                        <tr>
                                            <td><b>{v.matricula.clone()}</b></td>
                                            <td>{if v.tipo.is_empty() { "—".to_string() } else { v.tipo.clone() }}</td>
                                            <td class="row-actions">
                                                <DeleteConfirmButton
                                                    question=question
                                                    label="Borrar"
                                                    disabled=Signal::derive(move || deleting.get() == Some(id))
                                                    on_confirm=move |_| remove(for_delete.clone())
                                                />
                                            </td>
                                        </tr>
                                    }
                                }
                            />
                        </tbody>
                    </table>
                </Show>
            </div>
        </div>
    }
}
