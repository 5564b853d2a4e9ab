//! Settlement Commands

use serde::Serialize;

use super::{call, call_json, hub_url, list_field, query, unwrap_record, Method};
use crate::error::ApiResult;
use crate::models::{SettlementMonth, SettlementRoute, SettlementRow};

// ========================
// Argument Structs
// ========================

#[derive(Serialize)]
struct RouteCodeArgs<'a> {
    code: &'a str,
}

#[derive(Serialize)]
struct SaveMonthArgs<'a> {
    year: i32,
    month: u32,
    route_code: &'a str,
    rows: &'a [SettlementRow],
}

// ========================
// Commands
// ========================

/// Routes of the hub. Also used by the delivery section.
pub async fn list_routes(hub: &str) -> ApiResult<Vec<SettlementRoute>> {
    let json = call(Method::Get, &hub_url(hub, "/liquidaciones/routes"), "Error cargando rutas").await?;
    list_field(&json, "routes")
}

pub async fn create_route(hub: &str, code: &str) -> ApiResult<SettlementRoute> {
    let json = call_json(
        Method::Post,
        &hub_url(hub, "/liquidaciones/routes"),
        &RouteCodeArgs { code },
        "No pude crear la ruta",
    )
    .await?;
    unwrap_record(json, &["route"])
}

pub async fn load_settlement_month(
    hub: &str,
    year: i32,
    month: u32,
    route_code: &str,
) -> ApiResult<SettlementMonth> {
    let q = query(&[
        ("year", year.to_string()),
        ("month", month.to_string()),
        ("route_code", route_code.to_string()),
    ]);
    let url = hub_url(hub, &format!("/liquidaciones?{}", q));
    let json = call(Method::Get, &url, &format!("Error cargando ruta {}", route_code)).await?;
    Ok(serde_json::from_value(json)?)
}

pub async fn save_settlement_month(
    hub: &str,
    year: i32,
    month: u32,
    route_code: &str,
    rows: &[SettlementRow],
) -> ApiResult<()> {
    call_json(
        Method::Put,
        &hub_url(hub, "/liquidaciones"),
        &SaveMonthArgs { year, month, route_code, rows },
        &format!("No pude guardar ruta {}", route_code),
    )
    .await?;
    Ok(())
}
