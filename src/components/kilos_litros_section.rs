//! Kilos/Litros Section Component
//!
//! Monthly totals per hub, route and employee, plus the per-day history with
//! inline editing.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::{picked_period, DeleteConfirmButton, ErrorBanner, MonthPicker, SectionHeader};
use crate::context::use_app_context;
use crate::domain::entity::remove_by_id;
use crate::domain::format::{current_period, format2, pad2, today_ymd};
use crate::domain::kilos_litros::{by_employee, by_route, for_day, period_of, sort_entries, totals, KilosLitrosForm};
use crate::models::KilosLitrosEntry;

const KIND: &str = "Kilos/Litros";

#[component]
pub fn KilosLitrosSection() -> impl IntoView {
    let ctx = use_app_context();
    let (y0, m0) = current_period();

    let year = RwSignal::new(y0);
    let month = RwSignal::new(m0);
    let selected_day = RwSignal::new(today_ymd());

    let items = RwSignal::new(Vec::<KilosLitrosEntry>::new());
    let loading = RwSignal::new(false);
    let saving = RwSignal::new(false);
    let error = RwSignal::new(String::new());
    let form = RwSignal::new(KilosLitrosForm::for_day(&today_ymd()));
    let editing = RwSignal::new(None::<i64>);
    let edit_form = RwSignal::new(KilosLitrosForm::default());
    let busy_id = RwSignal::new(None::<i64>);

    let month_totals = Memo::new(move |_| items.with(|list| totals(list)));
    let route_rows = Memo::new(move |_| items.with(|list| by_route(list)));
    let employee_rows = Memo::new(move |_| items.with(|list| by_employee(list)));
    let day_rows = Memo::new(move |_| {
        let day = selected_day.get();
        items.with(|list| for_day(list, &day).into_iter().cloned().collect::<Vec<_>>())
    });

    let load = move || {
        let (Some(hub), Some((y, m))) = (ctx.hub.try_get_untracked(), picked_period(year, month)) else {
            return;
        };
        loading.set(true);
        error.set(String::new());
        spawn_local(async move {
            let result = api::load_kilos_litros(&hub, y, m).await;
            if !ctx.is_current_hub(&hub) || picked_period(year, month) != Some((y, m)) {
                return;
            }
            match result {
                Ok(data) => {
                    let mut list = data.items;
                    sort_entries(&mut list);
                    items.set(list);
                }
                Err(e) => {
                    log::warn!("kilos/litros load failed for {} {}-{}: {}", hub, y, pad2(m), e);
                    items.set(Vec::new());
                    error.set(e.to_string());
                }
            }
            loading.set(false);
        });
    };

    Effect::new(move |_| {
        ctx.hub.track();
        year.track();
        month.track();
        editing.set(None);
        load();
    });

    // Picking a day in another month moves the month filter along.
    Effect::new(move |_| {
        if let Some((y, m)) = period_of(&selected_day.get()) {
            if year.get_untracked() != y {
                year.set(y);
            }
            if month.get_untracked() != m {
                month.set(m);
            }
        }
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
            match api::create_kilos_litros(&hub, &draft).await {
                Ok(it) => {
                    let message = format!("{} · {} · Ruta {} · {}", hub, it.day, it.ruta_numero, it.nombre);
                    if ctx.is_current_hub(&hub) {
                        if period_of(&it.day) == picked_period(year, month) {
                            items.update(|list| {
                                list.push(it);
                                sort_entries(list);
                            });
                        }
                        form.set(KilosLitrosForm::for_day(&draft.day));
                    }
                    ctx.notify(&hub, KIND, "Registro agregado", message);
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
            match api::update_kilos_litros(&hub, id, &draft).await {
                Ok(()) => {
                    ctx.notify(
                        &hub,
                        KIND,
                        "Registro editado",
                        format!("{} · {} · Ruta {} · {}", hub, draft.day, draft.ruta_numero, draft.nombre),
                    );
                    if ctx.is_current_hub(&hub) {
                        editing.set(None);
                        // Renamed or moved entries must drop out of the summaries.
                        load();
                    }
                }
                Err(e) => error.set(e.to_string()),
            }
            busy_id.set(None);
        });
    };

    let remove = move |it: KilosLitrosEntry| {
        let hub = ctx.hub.get_untracked();
        busy_id.set(Some(it.id));
        error.set(String::new());
        spawn_local(async move {
            match api::delete_kilos_litros(&hub, it.id).await {
                Ok(()) => {
                    if ctx.is_current_hub(&hub) {
                        items.update(|list| remove_by_id(list, it.id));
                    }
                    ctx.notify(&hub, KIND, "Registro eliminado", format!("{} · {} · Ruta {}", hub, it.day, it.ruta_numero));
                }
                Err(e) => error.set(e.to_string()),
            }
            busy_id.set(None);
        });
    };

    let day_row = move |it: KilosLitrosEntry| {
        let id = it.id;
        let is_busy = Signal::derive(move || busy_id.get() == Some(id));
        if editing.get() == Some(id) {
            view! {
                <tr>
                    <td>
                        <input
                            class="inline-input num"
                            inputmode="numeric"
                            prop:value=move || edit_form.with(|f| f.ruta.clone())
                            on:input=move |ev| edit_form.update(|f| f.ruta = event_target_value(&ev))
                        />
                    </td>
                    <td>
                        <input
                            class="inline-input"
                            placeholder="nombre"
                            prop:value=move || edit_form.with(|f| f.nombre.clone())
                            on:input=move |ev| edit_form.update(|f| f.nombre = event_target_value(&ev))
                        />
                    </td>
                    <td>
                        <input
                            class="inline-input num"
                            inputmode="numeric"
                            prop:value=move || edit_form.with(|f| f.clientes.clone())
                            on:input=move |ev| edit_form.update(|f| f.clientes = event_target_value(&ev))
                        />
                    </td>
                    <td>
                        <input
                            class="inline-input num"
                            inputmode="decimal"
                            prop:value=move || edit_form.with(|f| f.kilos.clone())
                            on:input=move |ev| edit_form.update(|f| f.kilos = event_target_value(&ev))
                        />
                    </td>
                    <td>
                        <input
                            class="inline-input num"
                            inputmode="decimal"
                            prop:value=move || edit_form.with(|f| f.litros.clone())
                            on:input=move |ev| edit_form.update(|f| f.litros = event_target_value(&ev))
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
            let question = format!("¿Borrar el registro {} · Ruta {} · {}?", it.day, it.ruta_numero, it.nombre);
            let for_edit = it.clone();
            let for_delete = it.clone();
            view! {
                <tr>
                    <td><b>{it.ruta_numero}</b></td>
                    <td>{it.nombre.clone()}</td>
                    <td>{it.clientes}</td>
                    <td>{format2(it.kilos)}</td>
                    <td>{format2(it.litros)}</td>
                    <td class="row-actions">
                        <button
                            class="btn"
                            on:click=move |_| {
                                error.set(String::new());
                                edit_form.set(KilosLitrosForm::from_entry(&for_edit));
                                editing.set(Some(id));
                            }
                        >
                            "Editar"
                        </button>
                        <DeleteConfirmButton
                            question=question
                            label="Borrar"
                            disabled=is_busy
                            on_confirm=move |_| remove(for_delete.clone())
                        />
                    </td>
                </tr>
            }
            .into_any()
        }
    };

    let empty_month = move || {
        view! {
            <div class="empty">
                {move || if loading.get() { "Cargando..." } else { "No hay datos para este mes." }}
            </div>
        }
    };

    view! {
        <div class="section">
            <SectionHeader kicker="KILOS / LITROS" title="Resumen mensual + histórico por día">
                <MonthPicker year=year month=month />
                <button class="btn" disabled=move || loading.get() on:click=move |_| load()>
                    {move || if loading.get() { "Cargando..." } else { "Refrescar" }}
                </button>
            </SectionHeader>

            <div class="block-card summary-card">
                <div class="block-title-row">
                    <h4>{move || format!("Resumen mensual · {}-{}", year.get(), pad2(month.get()))}</h4>
                    <span class="muted">"Totales del HUB"</span>
                </div>
                <div class="summary-grid">
                    <div class="sum-box">
                        <div class="sum-label">"Clientes"</div>
                        <div class="sum-value">{move || month_totals.get().clientes}</div>
                    </div>
                    <div class="sum-box">
                        <div class="sum-label">"Kilos"</div>
                        <div class="sum-value">{move || format2(month_totals.get().kilos)}</div>
                    </div>
                    <div class="sum-box">
                        <div class="sum-label">"Litros"</div>
                        <div class="sum-value">{move || format2(month_totals.get().litros)}</div>
                    </div>
                </div>
            </div>

            <form class="block-card form-grid" on:submit=add>
                <label>
                    <span class="label">"Día"</span>
                    <input
                        type="date"
                        prop:value=move || form.with(|f| f.day.clone())
                        on:input=move |ev| form.update(|f| f.day = event_target_value(&ev))
                    />
                </label>
                <label>
                    <span class="label">"Ruta"</span>
                    <input
                        inputmode="numeric"
                        prop:value=move || form.with(|f| f.ruta.clone())
                        on:input=move |ev| form.update(|f| f.ruta = event_target_value(&ev))
                    />
                </label>
                <label>
                    <span class="label">"Nombre"</span>
                    <input
                        placeholder="Ej: gabriel"
                        prop:value=move || form.with(|f| f.nombre.clone())
                        on:input=move |ev| form.update(|f| f.nombre = event_target_value(&ev))
                    />
                </label>
                <label>
                    <span class="label">"Clientes"</span>
                    <input
                        inputmode="numeric"
                        prop:value=move || form.with(|f| f.clientes.clone())
                        on:input=move |ev| form.update(|f| f.clientes = event_target_value(&ev))
                    />
                </label>
                <label>
                    <span class="label">"Kilos"</span>
                    <input
                        inputmode="decimal"
                        prop:value=move || form.with(|f| f.kilos.clone())
                        on:input=move |ev| form.update(|f| f.kilos = event_target_value(&ev))
                    />
                </label>
                <label>
                    <span class="label">"Litros"</span>
                    <input
                        inputmode="decimal"
                        prop:value=move || form.with(|f| f.litros.clone())
                        on:input=move |ev| form.update(|f| f.litros = event_target_value(&ev))
                    />
                </label>
                <button
                    type="submit"
                    class="btn btn-orange"
                    disabled=move || saving.get() || form.with(|f| f.validate().is_err())
                >
                    {move || if saving.get() { "Agregando..." } else { "Agregar registro" }}
                </button>
            </form>
            <ErrorBanner error=error />

            <div class="table-wrap">
                <div class="table-title">
                    <b>"Resumen por ruta (mes)"</b>
                    <span class="muted">" · Suma total del mes por ruta"</span>
                </div>
                <Show when=move || route_rows.with(|r| !r.is_empty()) fallback=empty_month>
                    <table class="table">
                        <thead>
                            <tr>
                                <th>"Ruta"</th>
                                <th>"Clientes (mes)"</th>
                                <th>"Kilos (mes)"</th>
                                <th>"Litros (mes)"</th>
                            </tr>
                        </thead>
                        <tbody>
                            {move || {
                                route_rows
                                    .get()
                                    .into_iter()
                                    .map(|(ruta, g)| {
                                        view! {
                                            <tr>
                                                <td><b>{ruta}</b></td>
                                                <td>{g.clientes}</td>
                                                <td>{format2(g.kilos)}</td>
                                                <td>{format2(g.litros)}</td>
                                            </tr>
                                        }
                                    })
                                    .collect_view()
                            }}
                        </tbody>
                    </table>
                </Show>
            </div>

            <div class="table-wrap">
                <div class="table-title">
                    <b>"Resumen por empleado (mes)"</b>
                    <span class="muted">" · Suma total del mes por nombre"</span>
                </div>
                <Show when=move || employee_rows.with(|r| !r.is_empty()) fallback=empty_month>
                    <table class="table">
                        <thead>
                            <tr>
                                <th>"Nombre"</th>
                                <th>"Clientes (mes)"</th>
                                <th>"Kilos (mes)"</th>
                                <th>"Litros (mes)"</th>
                            </tr>
                        </thead>
                        <tbody>
                            {move || {
                                employee_rows
                                    .get()
                                    .into_iter()
                                    .map(|g| {
                                        view! {
                                            <tr>
                                                <td><b>{g.key}</b></td>
                                                <td>{g.clientes}</td>
                                                <td>{format2(g.kilos)}</td>
                                                <td>{format2(g.litros)}</td>
                                            </tr>
                                        }
                                    })
                                    .collect_view()
                            }}
                        </tbody>
                    </table>
                </Show>
            </div>

            <div class="table-wrap">
                <div class="day-picker">
                    <label>
                        <span class="label">"Día"</span>
                        <input
                            type="date"
                            prop:value=move || selected_day.get()
                            on:input=move |ev| selected_day.set(event_target_value(&ev))
                        />
                    </label>
                    <span class="muted">"Histórico del día seleccionado: " <b>{move || selected_day.get()}</b></span>
                </div>
                <Show
                    when=move || day_rows.with(|r| !r.is_empty())
                    fallback=move || {
                        view! {
                            <div class="empty">
                                {move || if loading.get() { "Cargando..." } else { "No hay registros para ese día." }}
                            </div>
                        }
                    }
                >
                    <table class="table">
                        <thead>
                            <tr>
                                <th>"Ruta"</th>
                                <th>"Nombre"</th>
                                <th>"Clientes"</th>
                                <th>"Kilos"</th>
                                <th>"Litros"</th>
                                <th class="col-actions">"Acciones"</th>
                            </tr>
                        </thead>
                        <tbody>{move || day_rows.get().into_iter().map(day_row).collect_view()}</tbody>
                    </table>
                </Show>
            </div>
        </div>
    }
}
