//! Settlement Section Component
//!
//! Month sheet with one column group per route and one row per day, followed
//! by the balance per driver and per route.
//!
//! The sheet body only re-renders when the routes or the month change; cells
//! read the book reactively so typing never rebuilds the inputs.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::{picked_period, ErrorBanner, MonthPicker, SectionHeader};
use crate::context::use_app_context;
use crate::domain::format::{
    current_period, days_in_month, format_money_es, is_weekend, pad2, weekday_label, ymd,
};
use crate::domain::settlement::{
    cell_value, diff_label, diff_value, driver_names, driver_status, driver_summary, route_summary,
    rows_for_save, update_cell, SettlementBook, SettlementField,
};
use crate::error::ApiResult;
use crate::models::SettlementRoute;

const KIND: &str = "Liquidaciones";
const DRIVER_LIST_ID: &str = "repartidores-list";

fn sign_class(base: &str, value: f64) -> String {
    if value > 0.0 {
        format!("{} pos", base)
    } else if value < 0.0 {
        format!("{} neg", base)
    } else {
        base.to_string()
    }
}

async fn fetch_book(hub: &str, year: i32, month: u32, routes: &[SettlementRoute]) -> ApiResult<SettlementBook> {
    let mut book = SettlementBook::new();
    for route in routes {
        let data = api::load_settlement_month(hub, year, month, &route.code).await?;
        book.insert(route.code.clone(), data.rows);
    }
    Ok(book)
}

#[component]
pub fn SettlementSection() -> impl IntoView {
    let ctx = use_app_context();
    let (y0, m0) = current_period();

    let year = RwSignal::new(y0);
    let month = RwSignal::new(m0);
    let routes = RwSignal::new(Vec::<SettlementRoute>::new());
    let book = RwSignal::new(SettlementBook::new());
    let dirty = RwSignal::new(false);
    let loading = RwSignal::new(false);
    let saving = RwSignal::new(false);
    let creating = RwSignal::new(false);
    let new_code = RwSignal::new(String::new());
    let error = RwSignal::new(String::new());

    let names = Memo::new(move |_| routes.with(|r| book.with(|b| driver_names(r, b))));
    let drivers = Memo::new(move |_| routes.with(|r| book.with(|b| driver_summary(r, b))));
    let per_route = Memo::new(move |_| routes.with(|r| book.with(|b| route_summary(r, b))));

    // Loads the month of every route; `reload_routes` also refreshes the route list.
    let load = move |reload_routes: bool| {
        let (Some(hub), Some((y, m))) = (ctx.hub.try_get_untracked(), picked_period(year, month)) else {
            return;
        };
        loading.set(true);
        error.set(String::new());
        spawn_local(async move {
            let list = if reload_routes {
                match api::list_routes(&hub).await {
                    Ok(list) => list,
                    Err(e) => {
                        if !ctx.is_current_hub(&hub) {
                            return;
                        }
                        routes.set(Vec::new());
                        book.set(SettlementBook::new());
                        error.set(e.to_string());
                        loading.set(false);
                        return;
                    }
                }
            } else {
                routes.try_get_untracked().unwrap_or_default()
            };
            let result = fetch_book(&hub, y, m, &list).await;
            if !ctx.is_current_hub(&hub) || picked_period(year, month) != Some((y, m)) {
                return;
            }
            routes.set(list);
            match result {
                Ok(data) => book.set(data),
                Err(e) => {
                    log::warn!("settlement load failed for {} {}/{}: {}", hub, pad2(m), y, e);
                    book.set(SettlementBook::new());
                    error.set(e.to_string());
                }
            }
            dirty.set(false);
            loading.set(false);
        });
    };

    Effect::new(move |_| {
        ctx.hub.track();
        year.track();
        month.track();
        load(true);
    });

    let create_route = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let code = new_code.get_untracked().trim().to_string();
        if code.is_empty() {
            return;
        }
        let hub = ctx.hub.get_untracked();
        creating.set(true);
        error.set(String::new());
        spawn_local(async move {
            match api::create_route(&hub, &code).await {
                Ok(_) => {
                    ctx.notify(&hub, KIND, "Ruta creada", format!("{}: {}", hub, code));
                    if ctx.is_current_hub(&hub) {
                        new_code.set(String::new());
                        load(true);
                    }
                }
                Err(e) => error.set(e.to_string()),
            }
            creating.set(false);
        });
    };

    let save_all = move |_: web_sys::MouseEvent| {
        if !dirty.get_untracked() {
            return;
        }
        let hub = ctx.hub.get_untracked();
        let (y, m) = (year.get_untracked(), month.get_untracked());
        let payload: Vec<(String, Vec<_>)> = routes.with_untracked(|list| {
            book.with_untracked(|b| {
                list.iter()
                    .filter_map(|r| b.get(&r.code).map(|rows| (r.code.clone(), rows_for_save(rows))))
                    .collect()
            })
        });
        saving.set(true);
        error.set(String::new());
        spawn_local(async move {
            let mut failed = None;
            for (code, rows) in &payload {
                if let Err(e) = api::save_settlement_month(&hub, y, m, code, rows).await {
                    failed = Some(e);
                    break;
                }
            }
            match failed {
                None => {
                    if ctx.is_current_hub(&hub) && picked_period(year, month) == Some((y, m)) {
                        dirty.set(false);
                    }
                    ctx.notify(&hub, KIND, "Guardado", format!("{} · {}/{}", hub, pad2(m), y));
                }
                Some(e) => {
                    log::error!("settlement save failed for {}: {}", hub, e);
                    error.set(e.to_string());
                }
            }
            saving.set(false);
        });
    };

    let edit = move |code: String, day: String, field: SettlementField, value: String| {
        book.update(|b| update_cell(b.entry(code).or_default(), &day, field, &value));
        dirty.set(true);
    };

    let cell_input = move |code: String, day: String, field: SettlementField| {
        let (c, d) = (code.clone(), day.clone());
        let value = move || book.with(|b| b.get(&c).map(|rows| cell_value(rows, &d, field)).unwrap_or_default());
        let mode = if field == SettlementField::Comment { "text" } else { "decimal" };
        let placeholder = match field {
            SettlementField::Repartidor => "ej: gabriel",
            SettlementField::Comment => "nota...",
            _ => "0,00",
        };
        match field {
            // Names are normalized, so they are committed on change rather than per keystroke.
            SettlementField::Repartidor => view! {
                <input
                    class="cell-input"
                    placeholder=placeholder
                    list=DRIVER_LIST_ID
                    prop:value=value
                    on:change=move |ev| edit(code.clone(), day.clone(), field, event_target_value(&ev))
                />
            }
            .into_any(),
            _ => view! {
                <input
                    class="cell-input"
                    placeholder=placeholder
                    inputmode=mode
                    prop:value=value
                    on:input=move |ev| edit(code.clone(), day.clone(), field, event_target_value(&ev))
                />
            }
            .into_any(),
        }
    };

    let sheet_body = move || {
        let (y, m) = (year.get(), month.get());
        let codes: Vec<String> = routes.with(|r| r.iter().map(|x| x.code.clone()).collect());
        (1..=days_in_month(y, m))
            .map(|d| {
                let day = ymd(y, m, d);
                let row_class = if is_weekend(y, m, d) { "weekend" } else { "" };
                let groups = codes
                    .iter()
                    .map(|code| {
                        let (c, dd) = (code.clone(), day.clone());
                        let diff = Memo::new(move |_| {
                            book.with(|b| {
                                b.get(&c)
                                    .map(|rows| {
                                        diff_value(
                                            &cell_value(rows, &dd, SettlementField::Metalico),
                                            &cell_value(rows, &dd, SettlementField::Ingreso),
                                        )
                                    })
                                    .unwrap_or(0.0)
                            })
                        });
                        view! {
                            <td>{cell_input(code.clone(), day.clone(), SettlementField::Repartidor)}</td>
                            <td>{cell_input(code.clone(), day.clone(), SettlementField::Metalico)}</td>
                            <td>{cell_input(code.clone(), day.clone(), SettlementField::Ingreso)}</td>
                            <td class=move || sign_class("diff-cell", diff.get())>{move || diff_label(diff.get())}</td>
                            <td>{cell_input(code.clone(), day.clone(), SettlementField::Comment)}</td>
                        }
                    })
                    .collect_view();
                view! {
                    <tr class=row_class>
                        <td class="sticky-date">
                            <div class="date-num">{day.clone()}</div>
                            <div class="date-wk">{weekday_label(y, m, d)}</div>
                        </td>
                        {groups}
                    </tr>
                }
            })
            .collect_view()
    };

    view! {
        <div class="section">
            <SectionHeader kicker="LIQUIDACIONES" title="Mes a mes · Por rutas">
                <MonthPicker year=year month=month />
                <button class="btn" on:click=move |_| load(false)>
                    {move || if loading.get() { "Cargando..." } else { "Refrescar" }}
                </button>
                <button
                    class="btn btn-orange"
                    disabled=move || !dirty.get() || saving.get()
                    on:click=save_all
                >
                    {move || if saving.get() { "Guardando..." } else { "Guardar todo" }}
                </button>
            </SectionHeader>

            <form class="create-row" on:submit=create_route>
                <input
                    class="input-grow"
                    placeholder="Nueva ruta (ej: 103, 143, 310...)"
                    prop:value=move || new_code.get()
                    on:input=move |ev| new_code.set(event_target_value(&ev))
                />
                <button type="submit" class="btn" disabled=move || creating.get()>
                    {move || if creating.get() { "Creando..." } else { "Crear ruta" }}
                </button>
            </form>
            <ErrorBanner error=error />

            <Show when=move || dirty.get()>
                <div class="pending-bar">"Tienes cambios sin guardar."</div>
            </Show>

            <div class="sheet-wrap">
                <table class="sheet">
                    <thead>
                        <tr>
                            <th class="sticky-date">"FECHA"</th>
                            {move || {
                                routes
                                    .get()
                                    .into_iter()
                                    .map(|r| view! { <th class="route-group" colspan="5">{format!("RUTA {}", r.code)}</th> })
                                    .collect_view()
                            }}
                        </tr>
                        <tr>
                            <th class="sticky-date"></th>
                            {move || {
                                (0..routes.with(|r| r.len()))
                                    .map(|_| {
                                        view! {
                                            <th class="sub">"REPARTIDOR"</th>
                                            <th class="sub">"METÁLICO"</th>
                                            <th class="sub">"INGRESO"</th>
                                            <th class="sub">"DIFERENCIA"</th>
                                            <th class="sub">"COMENTARIO"</th>
                                        }
                                    })
                                    .collect_view()
                            }}
                        </tr>
                    </thead>
                    <tbody>{sheet_body}</tbody>
                </table>
            </div>

            <datalist id=DRIVER_LIST_ID>
                {move || names.get().into_iter().map(|n| view! { <option value=n></option> }).collect_view()}
            </datalist>

            <div class="block-card summary-card">
                <div class="block-title-row">
                    <h4>"Resumen por repartidor"</h4>
                    <span class="muted">"(+ debe · − a favor)"</span>
                </div>
                <Show
                    when=move || drivers.with(|d| !d.is_empty())
                    fallback=|| view! { <div class="helper-text">"No hay diferencias registradas."</div> }
                >
                    <table class="table summary">
                        <thead>
                            <tr>
                                <th>"Repartidor"</th>
                                <th>"Estado"</th>
                                <th class="num">"Total"</th>
                            </tr>
                        </thead>
                        <tbody>
                            {move || {
                                drivers
                                    .get()
                                    .into_iter()
                                    .map(|s| {
                                        view! {
                                            <tr>
                                                <td>
                                                    <b>{s.name.clone()}</b>
                                                    {(!s.comments.is_empty())
                                                        .then(|| {
                                                            view! {
                                                                <div class="sum-comments">
                                                                    {s
                                                                        .comments
                                                                        .iter()
                                                                        .map(|c| view! { <div>{format!("• {}", c)}</div> })
                                                                        .collect_view()}
                                                                </div>
                                                            }
                                                        })}
                                                </td>
                                                <td>{driver_status(s.total)}</td>
                                                <td class="num">
                                                    <b class=sign_class("amount", s.total)>{diff_label(s.total)}</b>
                                                </td>
                                            </tr>
                                        }
                                    })
                                    .collect_view()
                            }}
                        </tbody>
                    </table>
                </Show>

                <h4>{move || format!("Resumen por ruta ({}/{})", pad2(month.get()), year.get())}</h4>
                <div class="muted">"“Generó” = Total Metálico del mes · Descuadre = Metálico − Ingreso"</div>
                <table class="table summary">
                    <thead>
                        <tr>
                            <th>"Ruta"</th>
                            <th>"Generó (Metálico)"</th>
                            <th>"Ingresó (Banco)"</th>
                            <th class="num">"Descuadre"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            per_route
                                .get()
                                .into_iter()
                                .map(|rt| {
                                    let count = rt.mismatches.len();
                                    let detail = (count > 0)
                                        .then(|| {
                                            view! {
                                                <tr>
                                                    <td colspan="4" class="route-detail">
                                                        <div class="route-detail-title">
                                                            {format!("Descuadres detectados ({}) — origen:", count)}
                                                        </div>
                                                        <div class="route-detail-grid">
                                                            {rt
                                                                .mismatches
                                                                .iter()
                                                                .map(|it| {
                                                                    let who = if it.repartidor.is_empty() {
                                                                        "—".to_string()
                                                                    } else {
                                                                        it.repartidor.clone()
                                                                    };
                                                                    view! {
                                                                        <div class="route-detail-item">
                                                                            <div><b>{it.day.clone()}</b> " · " {who}</div>
                                                                            <div>
                                                                                <span class=sign_class("amount", it.diff)>{diff_label(it.diff)}</span>
                                                                                {(!it.comment.is_empty()).then(|| format!(" · {}", it.comment))}
                                                                            </div>
                                                                        </div>
                                                                    }
                                                                })
                                                                .collect_view()}
                                                        </div>
                                                    </td>
                                                </tr>
                                            }
                                        });
                                    view! {
                                        <tr>
                                            <td><b>{format!("Ruta {}", rt.code)}</b></td>
                                            <td>{format!("{} €", format_money_es(rt.total_metalico))}</td>
                                            <td>{format!("{} €", format_money_es(rt.total_ingreso))}</td>
                                            <td class="num">
                                                <b class=sign_class("amount", rt.total_diff)>{diff_label(rt.total_diff)}</b>
                                            </td>
                                        </tr>
                                        {detail}
                                    }
                                })
                                .collect_view()
                        }}
                    </tbody>
                </table>

                <div class="note">
                    <b>"Nota:"</b>
                    " Diferencia = Metálico − Ingreso. "
                    <span class="amount pos">"Positivo"</span>
                    " ⇒ depositó de menos (debe). "
                    <span class="amount neg">"Negativo"</span>
                    " ⇒ depositó de más (a favor)."
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_class() {
        assert_eq!(sign_class("amount", 2.0), "amount pos");
        assert_eq!(sign_class("amount", -0.5), "amount neg");
        assert_eq!(sign_class("amount", 0.0), "amount");
    }
}
