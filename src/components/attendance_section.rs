//! Attendance Section Component
//!
//! Monthly grid of employees by day. Edits to codes and extra hours are
//! applied locally and buffered; "Guardar cambios" sends them one by one.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::{picked_period, DeleteConfirmButton, ErrorBanner, MonthPicker, SectionHeader};
use crate::context::use_app_context;
use crate::domain::attendance::{
    apply_code, apply_extra_hours, effective_code, sum_extra_hours, AttendanceChange, PendingChanges,
    CODE_OPTIONS,
};
use crate::domain::format::{current_period, days_in_month, format_number_es, is_weekend, pad2, weekday_label};
use crate::models::AttendanceRow;

const KIND: &str = "Asistencias";

/// Cell currently open for editing.
#[derive(Debug, Clone, PartialEq)]
enum OpenCell {
    Code { employee_id: String, day: u32 },
    Hours { employee_id: String, day: u32 },
}

fn code_class(code: &str) -> String {
    if code.is_empty() {
        "att-cell".to_string()
    } else {
        format!("att-cell code-{}", code)
    }
}

#[component]
pub fn AttendanceSection() -> impl IntoView {
    let ctx = use_app_context();
    let (y0, m0) = current_period();

    let year = RwSignal::new(y0);
    let month = RwSignal::new(m0);
    let rows = RwSignal::new(Vec::<AttendanceRow>::new());
    let month_days = RwSignal::new(0u32);
    let loaded = RwSignal::new(false);
    let loading = RwSignal::new(false);
    let saving_all = RwSignal::new(false);
    let creating = RwSignal::new(false);
    let error = RwSignal::new(String::new());
    let new_name = RwSignal::new(String::new());
    let pending = RwSignal::new(PendingChanges::default());
    let open_cell = RwSignal::new(None::<OpenCell>);
    let hours_draft = RwSignal::new(String::new());

    let load = move || {
        let (Some(hub), Some((y, m))) = (ctx.hub.try_get_untracked(), picked_period(year, month)) else {
            return;
        };
        loading.set(true);
        error.set(String::new());
        spawn_local(async move {
            let result = api::load_attendance(&hub, y, m).await;
            if !ctx.is_current_hub(&hub) || picked_period(year, month) != Some((y, m)) {
                return;
            }
            match result {
                Ok(data) => {
                    let n = if data.days_in_month > 0 { data.days_in_month } else { days_in_month(y, m) };
                    month_days.set(n);
                    rows.set(data.rows);
                    loaded.set(true);
                }
                Err(e) => {
                    log::warn!("attendance load failed for {} {}-{}: {}", hub, y, pad2(m), e);
                    rows.set(Vec::new());
                    loaded.set(false);
                    error.set(e.to_string());
                }
            }
            pending.update(|p| p.clear());
            open_cell.set(None);
            loading.set(false);
        });
    };

    Effect::new(move |_| {
        ctx.hub.track();
        year.track();
        month.track();
        load();
    });

    let set_code = move |employee_id: String, day: u32, code: String| {
        let (y, m) = (year.get_untracked(), month.get_untracked());
        let mut stored = None;
        rows.update(|list| {
            if let Some(row) = list.iter_mut().find(|r| r.employee.id == employee_id) {
                stored = Some(apply_code(row, y, m, day, &code));
            }
        });
        if let Some(code) = stored {
            pending.update(|p| p.record(AttendanceChange::Code { employee_id, day, code }));
        }
    };

    let set_hours = move |employee_id: String, day: u32, hours: String| {
        let mut stored = None;
        rows.update(|list| {
            if let Some(row) = list.iter_mut().find(|r| r.employee.id == employee_id) {
                stored = Some(apply_extra_hours(row, day, &hours));
            }
        });
        if let Some(hours) = stored {
            pending.update(|p| p.record(AttendanceChange::ExtraHours { employee_id, day, hours }));
        }
    };

    // Closes the hours editor, buffering the value when it changed.
    let commit_hours = move |employee_id: String, day: u32, previous: String| {
        let next = hours_draft.get_untracked().trim().to_string();
        open_cell.set(None);
        if next != previous {
            set_hours(employee_id, day, next);
        }
    };

    let save_all = move |_: web_sys::MouseEvent| {
        let changes: Vec<AttendanceChange> = pending.with_untracked(|p| p.iter().cloned().collect());
        if changes.is_empty() {
            return;
        }
        let hub = ctx.hub.get_untracked();
        let (y, m) = (year.get_untracked(), month.get_untracked());
        saving_all.set(true);
        error.set(String::new());
        spawn_local(async move {
            let mut failed = None;
            for change in &changes {
                if let Err(e) = api::save_attendance_change(&hub, y, m, change).await {
                    failed = Some(e);
                    break;
                }
            }
            match failed {
                None => {
                    if ctx.is_current_hub(&hub) && picked_period(year, month) == Some((y, m)) {
                        pending.update(|p| p.clear());
                    }
                    ctx.notify(&hub, KIND, "Cambios guardados", format!("{}: {} cambio(s)", hub, changes.len()));
                }
                Some(e) => {
                    log::error!("attendance save failed for {}: {}", hub, e);
                    error.set(e.to_string());
                }
            }
            saving_all.set(false);
        });
    };

    let add_employee = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let name = new_name.get_untracked().trim().to_string();
        if name.is_empty() {
            return;
        }
        let hub = ctx.hub.get_untracked();
        creating.set(true);
        error.set(String::new());
        spawn_local(async move {
            match api::create_employee(&hub, &name).await {
                Ok(()) => {
                    ctx.notify(&hub, KIND, "Empleado creado", format!("{}: {}", hub, name));
                    if ctx.is_current_hub(&hub) {
                        new_name.set(String::new());
                        load();
                    }
                }
                Err(e) => error.set(e.to_string()),
            }
            creating.set(false);
        });
    };

    let delete_employee = move |employee_id: String, name: String| {
        let hub = ctx.hub.get_untracked();
        error.set(String::new());
        spawn_local(async move {
            match api::delete_employee(&hub, &employee_id).await {
                Ok(()) => {
                    ctx.notify(&hub, KIND, "Empleado eliminado", format!("{}: {}", hub, name));
                    if ctx.is_current_hub(&hub) {
                        load();
                    }
                }
                Err(e) => error.set(e.to_string()),
            }
        });
    };

    let code_cell = move |row: &AttendanceRow, day: u32| {
        let (y, m) = (year.get_untracked(), month.get_untracked());
        let employee_id = row.employee.id.clone();
        let shown = effective_code(row, y, m, day);
        let dirty = pending.with(|p| p.has_code(&employee_id, day));
        let is_open = open_cell.with(|c| {
            c.as_ref() == Some(&OpenCell::Code { employee_id: employee_id.clone(), day })
        });

        let mut class = code_class(&shown);
        if is_weekend(y, m, day) {
            class.push_str(" weekend");
        }
        if dirty {
            class.push_str(" dirty");
        }
        let title = if dirty { "Pendiente de guardar" } else { "Click para editar" };

        if is_open {
            let current = shown.clone();
            view! {
                <td class=format!("{} editing", class)>
                    <select
                        class="cell-select"
                        autofocus=true
                        on:change=move |ev| {
                            let next = event_target_value(&ev);
                            open_cell.set(None);
                            if next != current {
                                set_code(employee_id.clone(), day, next);
                            }
                        }
                        on:keydown=move |ev: web_sys::KeyboardEvent| {
                            if ev.key() == "Escape" {
                                ev.prevent_default();
                                open_cell.set(None);
                            }
                        }
                    >
                        {CODE_OPTIONS
                            .into_iter()
                            .map(|(value, label)| {
                                view! { <option value=value selected=value == shown>{label}</option> }
                            })
                            .collect_view()}
                    </select>
                </td>
            }
            .into_any()
        } else {
            view! {
                <td
                    class=class
                    title=title
                    on:click=move |_| open_cell.set(Some(OpenCell::Code { employee_id: employee_id.clone(), day }))
                >
                    <span class="cell-text">{shown}</span>
                </td>
            }
            .into_any()
        }
    };

    let hours_cell = move |row: &AttendanceRow, day: u32| {
        let (y, m) = (year.get_untracked(), month.get_untracked());
        let employee_id = row.employee.id.clone();
        let value = row.extra_hours.get(&day.to_string()).cloned().unwrap_or_default();
        let dirty = pending.with(|p| p.has_hours(&employee_id, day));
        let is_open = open_cell.with(|c| {
            c.as_ref() == Some(&OpenCell::Hours { employee_id: employee_id.clone(), day })
        });

        let mut class = String::from("he-cell");
        if is_weekend(y, m, day) {
            class.push_str(" weekend");
        }
        if dirty {
            class.push_str(" dirty");
        }

        if is_open {
            let (id_blur, prev_blur) = (employee_id.clone(), value.clone());
            let (id_key, prev_key) = (employee_id, value);
            view! {
                <td class=format!("{} editing", class)>
                    <input
                        class="he-input"
                        placeholder="0,5"
                        autofocus=true
                        prop:value=move || hours_draft.get()
                        on:input=move |ev| hours_draft.set(event_target_value(&ev))
                        on:blur=move |_| {
                            if open_cell.get_untracked().is_some() {
                                commit_hours(id_blur.clone(), day, prev_blur.clone());
                            }
                        }
                        on:keydown=move |ev: web_sys::KeyboardEvent| {
                            match ev.key().as_str() {
                                "Escape" => {
                                    ev.prevent_default();
                                    open_cell.set(None);
                                }
                                "Enter" => {
                                    ev.prevent_default();
                                    commit_hours(id_key.clone(), day, prev_key.clone());
                                }
                                _ => {}
                            }
                        }
                    />
                </td>
            }
            .into_any()
        } else {
            let title = if dirty { "Pendiente de guardar" } else { "Click para editar horas" };
            let current = value.clone();
            view! {
                <td
                    class=class
                    title=title
                    on:click=move |_| {
                        hours_draft.set(current.clone());
                        open_cell.set(Some(OpenCell::Hours { employee_id: employee_id.clone(), day }));
                    }
                >
                    {value}
                </td>
            }
            .into_any()
        }
    };

    let day_numbers = move || (1..=month_days.get()).collect::<Vec<u32>>();

    let employee_rows = move |row: AttendanceRow| {
        let days = day_numbers();
        let employee_id = row.employee.id.clone();
        let name = row.employee.name.clone();
        let label = name.clone();
        let he_total = format_number_es(sum_extra_hours(&row.extra_hours));
        let question = format!("¿De verdad deseas eliminar a {}?", name);
        let code_cells = days.iter().map(|d| code_cell(&row, *d)).collect_view();
        let hour_cells = days.iter().map(|d| hours_cell(&row, *d)).collect_view();
        let t = row.totals;

        view! {
            <tr>
                <td class="sticky-left">{label}</td>
                {code_cells}
                <td class="total">{t.trabajo}</td>
                <td class="total">{t.descanso}</td>
                <td class="total">{t.vacaciones}</td>
                <td class="total">{t.enfermedad}</td>
                <td class="total">{t.festivos}</td>
                <td class="total">{he_total}</td>
                <td class="action">
                    <DeleteConfirmButton
                        question=question
                        on_confirm=move |_| delete_employee(employee_id.clone(), name.clone())
                    />
                </td>
            </tr>
            <tr class="he-row">
                <td class="sticky-left he-label">"Horas Extras"</td>
                {hour_cells}
                <td colspan="7"></td>
            </tr>
        }
    };

    view! {
        <div class="section">
            <SectionHeader kicker="ASISTENCIAS" title="Control mensual">
                <MonthPicker year=year month=month />
                <button class="btn" on:click=move |_| load()>
                    {move || if loading.get() { "Cargando..." } else { "Refrescar" }}
                </button>
                <button
                    class="btn btn-orange"
                    title="Guarda todos los cambios pendientes"
                    disabled=move || saving_all.get() || pending.with(|p| p.is_empty())
                    on:click=save_all
                >
                    {move || {
                        if saving_all.get() {
                            "Guardando...".to_string()
                        } else {
                            match pending.with(|p| p.len()) {
                                0 => "Guardar cambios".to_string(),
                                n => format!("Guardar cambios ({})", n),
                            }
                        }
                    }}
                </button>
            </SectionHeader>

            <form class="create-row" on:submit=add_employee>
                <input
                    class="input-grow"
                    placeholder="Nombre y apellidos del nuevo empleado"
                    prop:value=move || new_name.get()
                    on:input=move |ev| new_name.set(event_target_value(&ev))
                />
                <button type="submit" class="btn" disabled=move || creating.get()>
                    {move || if creating.get() { "Añadiendo..." } else { "Añadir persona" }}
                </button>
            </form>
            <ErrorBanner error=error />

            <Show when=move || pending.with(|p| !p.is_empty())>
                <div class="pending-bar">
                    "Tienes " <b>{move || pending.with(|p| p.len())}</b> " cambio(s) sin guardar."
                </div>
            </Show>

            <Show when=move || loaded.get()>
                <div class="sheet-wrap attendance">
                    <table class="sheet">
                        <thead>
                            <tr>
                                <th class="sticky-left">"Nombres y apellidos"</th>
                                {move || {
                                    let (y, m) = (year.get_untracked(), month.get_untracked());
                                    day_numbers()
                                        .into_iter()
                                        .map(|d| {
                                            let th_class = if is_weekend(y, m, d) { "day weekend" } else { "day" };
                                            view! {
                                                <th class=th_class>
                                                    <div class="day-num">{pad2(d)}</div>
                                                    <div class="day-name">{weekday_label(y, m, d)}</div>
                                                </th>
                                            }
                                        })
                                        .collect_view()
                                }}
                                <th class="total">"Trab."</th>
                                <th class="total">"Desc."</th>
                                <th class="total">"Vac."</th>
                                <th class="total">"Enf."</th>
                                <th class="total">"Fest."</th>
                                <th class="total">"HE"</th>
                                <th class="action">"Acción"</th>
                            </tr>
                        </thead>
                        <tbody>{move || rows.get().into_iter().map(employee_rows).collect_view()}</tbody>
                    </table>
                </div>
            </Show>

            <div class="legend">
                <b>"Leyenda:"</b>
                " 1=Trabajo · F=Festivo · D=Descanso · V=Vacaciones · E=Enfermedad · HE = suma horas extra."
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_class() {
        assert_eq!(code_class(""), "att-cell");
        assert_eq!(code_class("V"), "att-cell code-V");
    }
}
