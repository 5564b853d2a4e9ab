//! Delivery Section Component
//!
//! Route clients with their delivery status, a status filter and the live
//! moto positions of the hub. Coordinates are listed as data.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::{DeleteConfirmButton, ErrorBanner, SectionHeader};
use crate::context::use_app_context;
use crate::domain::delivery::{coords, sort_routes, summarize, visible_located, DeliveryClientForm, DeliveryStatus, StatusFilter};
use crate::domain::entity::{remove_by_id, replace_by_id};
use crate::domain::hub::hub_center;
use crate::models::{DeliveryClient, MotoPosition, SettlementRoute};

const KIND: &str = "Reparto";
const MOTO_POLL_MS: u32 = 8_000;

fn moto_label(m: &MotoPosition) -> String {
    match (&m.vehiculo, m.vehiculo_id) {
        (Some(v), _) if !v.matricula.is_empty() => v.matricula.clone(),
        (_, Some(id)) => format!("Moto {}", id),
        _ => "Moto".to_string(),
    }
}

fn status_class(status: DeliveryStatus) -> &'static str {
    match status {
        DeliveryStatus::Pendiente => "status status-pending",
        DeliveryStatus::Entregado => "status status-done",
        DeliveryStatus::Anulado => "status status-void",
        DeliveryStatus::CambiadoDia => "status status-moved",
    }
}

#[component]
pub fn DeliverySection() -> impl IntoView {
    let ctx = use_app_context();

    let routes = RwSignal::new(Vec::<SettlementRoute>::new());
    let route_id = RwSignal::new(None::<i64>);
    let clients = RwSignal::new(Vec::<DeliveryClient>::new());
    let motos = RwSignal::new(Vec::<MotoPosition>::new());
    let filter = RwSignal::new(StatusFilter::default());
    let selected = RwSignal::new(None::<i64>);
    let form = RwSignal::new(DeliveryClientForm::default());

    let loading_routes = RwSignal::new(false);
    let loading = RwSignal::new(false);
    let saving = RwSignal::new(false);
    let busy_id = RwSignal::new(None::<i64>);
    let error = RwSignal::new(String::new());

    let summary = Memo::new(move |_| clients.with(|list| summarize(list)));
    let located = Memo::new(move |_| {
        let f = filter.get();
        clients.with(|list| visible_located(list, &f).into_iter().cloned().collect::<Vec<_>>())
    });

    let refresh_motos = move || {
        let hub = ctx.hub.get_untracked();
        spawn_local(async move {
            let list = api::list_motos(&hub).await;
            if ctx.is_current_hub(&hub) {
                motos.set(list);
            }
        });
    };

    let load_routes = move || {
        let hub = ctx.hub.get_untracked();
        loading_routes.set(true);
        error.set(String::new());
        spawn_local(async move {
            let result = api::list_routes(&hub).await;
            if !ctx.is_current_hub(&hub) {
                return;
            }
            match result {
                Ok(mut list) => {
                    sort_routes(&mut list);
                    route_id.set(list.first().map(|r| r.id));
                    routes.set(list);
                }
                Err(e) => {
                    log::warn!("delivery routes failed for {}: {}", hub, e);
                    routes.set(Vec::new());
                    route_id.set(None);
                    error.set(e.to_string());
                }
            }
            loading_routes.set(false);
        });
    };

    let load_clients = move || {
        let hub = ctx.hub.get_untracked();
        let Some(rid) = route_id.get_untracked() else {
            clients.set(Vec::new());
            loading.set(false);
            return;
        };
        loading.set(true);
        spawn_local(async move {
            let result = api::list_delivery_clients(&hub, rid).await;
            if !ctx.is_current_hub(&hub) || route_id.try_get_untracked() != Some(Some(rid)) {
                return;
            }
            match result {
                Ok(list) => clients.set(list),
                Err(e) => {
                    clients.set(Vec::new());
                    error.set(e.to_string());
                }
            }
            loading.set(false);
        });
    };

    Effect::new(move |_| {
        ctx.hub.track();
        routes.set(Vec::new());
        route_id.set(None);
        clients.set(Vec::new());
        motos.set(Vec::new());
        selected.set(None);
        load_routes();
        refresh_motos();
    });

    Effect::new(move |_| {
        route_id.track();
        selected.set(None);
        load_clients();
    });

    // Motos keep moving while the section is open.
    let alive = Arc::new(AtomicBool::new(true));
    {
        let alive = Arc::clone(&alive);
        spawn_local(async move {
            loop {
                TimeoutFuture::new(MOTO_POLL_MS).await;
                if !alive.load(Ordering::Relaxed) {
                    break;
                }
                refresh_motos();
            }
        });
    }
    on_cleanup(move || alive.store(false, Ordering::Relaxed));

    let add = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let draft = match form.with_untracked(|f| f.validate(route_id.get_untracked())) {
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
            match api::create_delivery_client(&hub, &draft).await {
                Ok(c) => {
                    let message = format!("{}: {}", hub, c.nombre);
                    if ctx.is_current_hub(&hub) {
                        if route_id.try_get_untracked() == Some(Some(draft.route_id)) {
                            clients.update(|list| list.push(c));
                        }
                        form.set(DeliveryClientForm::default());
                    }
                    ctx.notify(&hub, KIND, "Cliente agregado", message);
                }
                Err(e) => error.set(e.to_string()),
            }
            saving.set(false);
        });
    };

    let cycle_status = move |c: DeliveryClient| {
        let hub = ctx.hub.get_untracked();
        let next = c.estado.next();
        busy_id.set(Some(c.id));
        error.set(String::new());
        spawn_local(async move {
            match api::set_delivery_status(&hub, c.id, next).await {
                Ok(updated) => {
                    if ctx.is_current_hub(&hub) {
                        clients.update(|list| {
                            replace_by_id(list, updated);
                        });
                    }
                }
                Err(e) => error.set(e.to_string()),
            }
            busy_id.set(None);
        });
    };

    let remove = move |c: DeliveryClient| {
        let hub = ctx.hub.get_untracked();
        busy_id.set(Some(c.id));
        error.set(String::new());
        spawn_local(async move {
            match api::delete_delivery_client(&hub, c.id).await {
                Ok(()) => {
                    if ctx.is_current_hub(&hub) {
                        clients.update(|list| remove_by_id(list, c.id));
                        if selected.try_get_untracked() == Some(Some(c.id)) {
                            selected.set(None);
                        }
                    }
                    ctx.notify(&hub, KIND, "Cliente eliminado", format!("{}: {}", hub, c.nombre));
                }
                Err(e) => error.set(e.to_string()),
            }
            busy_id.set(None);
        });
    };

    let client_row = move |c: DeliveryClient| {
        let id = c.id;
        let estado = c.estado;
        let dimmed = move || !filter.get().allows(estado);
        let is_selected = move || selected.get() == Some(id);
        let row_class = move || {
            let mut class = String::from("client-row");
            if is_selected() {
                class.push_str(" selected");
            }
            if dimmed() {
                class.push_str(" dimmed");
            }
            class
        };
        let located_text = if coords(&c).is_some() {
            "📍 Ubicado en el mapa"
        } else {
            "⏳ Sin coords aún (pendiente geocoding)"
        };
        let question = format!("¿Eliminar a {}?", c.nombre);
        let for_status = c.clone();
        let for_delete = c.clone();
        let is_busy = Signal::derive(move || busy_id.get() == Some(id));
        view! {
            <div class=row_class on:click=move |_| selected.set(Some(id))>
                <div class="client-main">
                    <b>{c.nombre.clone()}</b>
                    <span class="muted">{c.direccion.clone()}</span>
                    <span class="muted small">{located_text}</span>
                </div>
                <span class=status_class(estado)>{estado.label()}</span>
                <div class="row-actions">
                    <button
                        class="btn"
                        disabled=move || is_busy.get()
                        on:click=move |ev| {
                            ev.stop_propagation();
                            cycle_status(for_status.clone());
                        }
                    >
                        "Cambiar estado"
                    </button>
                    <DeleteConfirmButton
                        question=question
                        disabled=is_busy
                        on_confirm=move |_| remove(for_delete.clone())
                    />
                </div>
            </div>
        }
    };

    let filter_box = move |status: DeliveryStatus| {
        view! {
            <label class="check">
                <input
                    type="checkbox"
                    prop:checked=move || filter.get().allows(status)
                    on:change=move |_| filter.update(|f| f.toggle(status))
                />
                {status.label()}
            </label>
        }
    };

    view! {
        <div class="section">
            <SectionHeader kicker="REPARTO" title="Clientes por ruta">
                <button
                    class="btn"
                    disabled=move || loading_routes.get()
                    on:click=move |_| {
                        load_routes();
                        refresh_motos();
                    }
                >
                    {move || if loading_routes.get() { "Cargando..." } else { "Refrescar" }}
                </button>
            </SectionHeader>
            <ErrorBanner error=error />

            <div class="block-card form-row">
                <label>
                    <span class="label">"Ruta"</span>
                    <Show
                        when=move || routes.with(|l| !l.is_empty())
                        fallback=|| view! { <span class="muted">"No hay rutas"</span> }
                    >
                        <select
                            class="select"
                            on:change=move |ev| route_id.set(event_target_value(&ev).parse::<i64>().ok())
                        >
                            {move || {
                                routes
                                    .get()
                                    .into_iter()
                                    .map(|r| {
                                        let rid = r.id;
                                        view! {
                                            <option value=rid.to_string() selected=move || route_id.get() == Some(rid)>
                                                {format!("Ruta {}", r.code)}
                                            </option>
                                        }
                                    })
                                    .collect_view()
                            }}
                        </select>
                    </Show>
                </label>
                <div class="summary-line">
                    {move || {
                        let s = summary.get();
                        format!(
                            "Total: {} · P: {} · E: {} · A: {} · 🟨: {}",
                            s.total,
                            s.pendientes,
                            s.entregados,
                            s.anulados,
                            s.cambiados,
                        )
                    }}
                </div>
            </div>

            <div class="block-card filter-row">
                {DeliveryStatus::ALL.into_iter().map(filter_box).collect_view()}
            </div>

            <form class="block-card form-row" on:submit=add>
                <label>
                    <span class="label">"Nombre"</span>
                    <input
                        placeholder="Cliente"
                        prop:value=move || form.with(|f| f.nombre.clone())
                        on:input=move |ev| form.update(|f| f.nombre = event_target_value(&ev))
                    />
                </label>
                <label>
                    <span class="label">"Dirección"</span>
                    <input
                        placeholder="Calle, número, ciudad"
                        prop:value=move || form.with(|f| f.direccion.clone())
                        on:input=move |ev| form.update(|f| f.direccion = event_target_value(&ev))
                    />
                </label>
                <details class="coords-details">
                    <summary>"Coordenadas (opcional)"</summary>
                    <input
                        placeholder="lat"
                        inputmode="decimal"
                        prop:value=move || form.with(|f| f.lat.clone())
                        on:input=move |ev| form.update(|f| f.lat = event_target_value(&ev))
                    />
                    <input
                        placeholder="lng"
                        inputmode="decimal"
                        prop:value=move || form.with(|f| f.lng.clone())
                        on:input=move |ev| form.update(|f| f.lng = event_target_value(&ev))
                    />
                </details>
                <button type="submit" class="btn btn-orange" disabled=move || saving.get() || route_id.get().is_none()>
                    {move || if saving.get() { "Agregando..." } else { "Agregar cliente" }}
                </button>
            </form>

            <div class="delivery-layout">
                <div class="table-wrap">
                    <div class="table-title">
                        <b>"Clientes"</b>
                        <span class="muted">{move || format!(" · {}", clients.with(|l| l.len()))}</span>
                    </div>
                    <Show
                        when=move || clients.with(|l| !l.is_empty())
                        fallback=move || {
                            view! {
                                <div class="empty">
                                    {move || if loading.get() { "Cargando..." } else { "Sin clientes en esta ruta." }}
                                </div>
                            }
                        }
                    >
                        <div class="client-list">
                            {move || clients.get().into_iter().map(client_row).collect_view()}
                        </div>
                    </Show>
                </div>

                <div class="table-wrap data-panel">
                    <div class="table-title">
                        <b>"Centro del HUB"</b>
                        <span class="muted">
                            {move || {
                                let (lat, lng) = hub_center(&ctx.hub.get());
                                format!(" · {:.4}, {:.4}", lat, lng)
                            }}
                        </span>
                    </div>

                    <div class="table-title">
                        <b>"Clientes ubicados"</b>
                        <span class="muted">{move || format!(" · {}", located.with(|l| l.len()))}</span>
                    </div>
                    <table class="table">
                        <thead>
                            <tr>
                                <th>"Cliente"</th>
                                <th>"Estado"</th>
                                <th class="num">"Lat"</th>
                                <th class="num">"Lng"</th>
                            </tr>
                        </thead>
                        <tbody>
                            {move || {
                                located
                                    .get()
                                    .into_iter()
                                    .filter_map(|c| coords(&c).map(|(lat, lng)| (c, lat, lng)))
                                    .map(|(c, lat, lng)| {
                                        let id = c.id;
                                        let tr_class = move || if selected.get() == Some(id) { "selected" } else { "" };
                                        view! {
                                            <tr class=tr_class on:click=move |_| selected.set(Some(id))>
                                                <td>{c.nombre.clone()}</td>
                                                <td>{c.estado.label()}</td>
                                                <td class="num">{format!("{:.5}", lat)}</td>
                                                <td class="num">{format!("{:.5}", lng)}</td>
                                            </tr>
                                        }
                                    })
                                    .collect_view()
                            }}
                        </tbody>
                    </table>

                    <div class="table-title">
                        <b>"Motos"</b>
                        <span class="muted">{move || format!(" · {}", motos.with(|l| l.len()))}</span>
                    </div>
                    <Show
                        when=move || motos.with(|l| !l.is_empty())
                        fallback=|| view! { <div class="empty">"Sin posiciones de motos."</div> }
                    >
                        <table class="table">
                            <thead>
                                <tr>
                                    <th>"Moto"</th>
                                    <th>"Tipo"</th>
                                    <th class="num">"Lat"</th>
                                    <th class="num">"Lng"</th>
                                    <th>"Hora"</th>
                                </tr>
                            </thead>
                            <tbody>
                                {move || {
                                    motos
                                        .get()
                                        .into_iter()
                                        .map(|m| {
                                            let tipo = m.vehiculo.as_ref().map(|v| v.tipo.clone()).unwrap_or_default();
                                            view! {
                                                <tr>
                                                    <td><b>{moto_label(&m)}</b></td>
                                                    <td>{tipo}</td>
                                                    <td class="num">{format!("{:.5}", m.lat)}</td>
                                                    <td class="num">{format!("{:.5}", m.lng)}</td>
                                                    <td class="muted">{m.ts.clone().unwrap_or_default()}</td>
                                                </tr>
                                            }
                                        })
                                        .collect_view()
                                }}
                            </tbody>
                        </table>
                    </Show>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MotoVehicle;

    fn moto(id: Option<i64>, matricula: &str) -> MotoPosition {
        MotoPosition {
            vehiculo_id: id,
            lat: 40.0,
            lng: -3.0,
            ts: None,
            vehiculo: Some(MotoVehicle { matricula: matricula.into(), tipo: "Moto".into() }),
        }
    }

    #[test]
    fn test_moto_label() {
        assert_eq!(moto_label(&moto(Some(3), "1234ABC")), "1234ABC");
        assert_eq!(moto_label(&moto(Some(3), "")), "Moto 3");
        let mut bare = moto(None, "");
        bare.vehiculo = None;
        assert_eq!(moto_label(&bare), "Moto");
    }
}
