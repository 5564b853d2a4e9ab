//! Attendance Commands

use serde::Serialize;

use super::{call, call_json, encode, hub_url, query, Method};
use crate::domain::attendance::AttendanceChange;
use crate::domain::format::ymd;
use crate::error::ApiResult;
use crate::models::AttendanceMonth;

// ========================
// Argument Structs
// ========================

#[derive(Serialize)]
struct NameArgs<'a> {
    name: &'a str,
}

#[derive(Serialize)]
struct DayCodeArgs<'a> {
    date: String,
    code: &'a str,
}

#[derive(Serialize)]
struct ExtraHoursArgs<'a> {
    date: String,
    hours: &'a str,
}

// ========================
// Commands
// ========================

pub async fn load_attendance(hub: &str, year: i32, month: u32) -> ApiResult<AttendanceMonth> {
    let q = query(&[("year", year.to_string()), ("month", month.to_string())]);
    let url = hub_url(hub, &format!("/asistencias?{}", q));
    let json = call(Method::Get, &url, "Error cargando asistencias").await?;
    Ok(serde_json::from_value(json)?)
}

pub async fn create_employee(hub: &str, name: &str) -> ApiResult<()> {
    call_json(Method::Post, &hub_url(hub, "/employees"), &NameArgs { name }, "No pude crear el empleado").await?;
    Ok(())
}

pub async fn delete_employee(hub: &str, employee_id: &str) -> ApiResult<()> {
    let url = hub_url(hub, &format!("/employees/{}", encode(employee_id)));
    call(Method::Delete, &url, "No pude eliminar el empleado").await?;
    Ok(())
}

/// Sends one buffered edit for the given month.
pub async fn save_attendance_change(
    hub: &str,
    year: i32,
    month: u32,
    change: &AttendanceChange,
) -> ApiResult<()> {
    let date = ymd(year, month, change.day());
    let emp = encode(change.employee_id());
    match change {
        AttendanceChange::Code { code, .. } => {
            let url = hub_url(hub, &format!("/asistencias/{}/day", emp));
            call_json(Method::Put, &url, &DayCodeArgs { date, code }, "No pude guardar asistencias").await?;
        }
        AttendanceChange::ExtraHours { hours, .. } => {
            let url = hub_url(hub, &format!("/asistencias/{}/extra-hours", emp));
            call_json(Method::Put, &url, &ExtraHoursArgs { date, hours }, "No pude guardar horas extra").await?;
        }
    }
    Ok(())
}
