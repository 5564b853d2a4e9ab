//! Kilos/Litros Commands

use super::{call, call_json, hub_url, query, unwrap_record, Method};
use crate::error::{ApiError, ApiResult};
use crate::models::{KilosLitrosDraft, KilosLitrosEntry, KilosLitrosMonth};

pub async fn load_kilos_litros(hub: &str, year: i32, month: u32) -> ApiResult<KilosLitrosMonth> {
    let q = query(&[("year", year.to_string()), ("month", month.to_string())]);
    let url = hub_url(hub, &format!("/kiloslitros?{}", q));
    let json = call(Method::Get, &url, "Error cargando kilos/litros").await?;
    Ok(serde_json::from_value(json)?)
}

pub async fn create_kilos_litros(hub: &str, draft: &KilosLitrosDraft) -> ApiResult<KilosLitrosEntry> {
    let json = call_json(Method::Post, &hub_url(hub, "/kiloslitros"), draft, "No pude agregar el registro").await?;
    unwrap_record(json, &["item"]).map_err(|_| ApiError::Decode("registro sin id".to_string()))
}

pub async fn update_kilos_litros(hub: &str, id: i64, draft: &KilosLitrosDraft) -> ApiResult<()> {
    let url = hub_url(hub, &format!("/kiloslitros/{}", id));
    call_json(Method::Put, &url, draft, "No pude actualizar el registro").await?;
    Ok(())
}

pub async fn delete_kilos_litros(hub: &str, id: i64) -> ApiResult<()> {
    let url = hub_url(hub, &format!("/kiloslitros/{}", id));
    call(Method::Delete, &url, "No pude eliminar el registro").await?;
    Ok(())
}
