//! Delivery Commands

use serde::Serialize;

use super::{call, call_json, hub_url, list_field, query, unwrap_record, Method};
use crate::domain::delivery::DeliveryStatus;
use crate::error::ApiResult;
use crate::models::{DeliveryClient, DeliveryClientDraft, MotoPosition};

// ========================
// Argument Structs
// ========================

#[derive(Serialize)]
struct StatusArgs {
    estado: DeliveryStatus,
}

// ========================
// Commands
// ========================

pub async fn list_delivery_clients(hub: &str, route_id: i64) -> ApiResult<Vec<DeliveryClient>> {
    let q = query(&[("route_id", route_id.to_string())]);
    let url = hub_url(hub, &format!("/reparto/clientes?{}", q));
    let json = call(Method::Get, &url, "Error cargando clientes").await?;
    list_field(&json, "items")
}

pub async fn create_delivery_client(hub: &str, draft: &DeliveryClientDraft) -> ApiResult<DeliveryClient> {
    let json = call_json(Method::Post, &hub_url(hub, "/reparto/clientes"), draft, "No pude agregar").await?;
    unwrap_record(json, &["item"])
}

pub async fn set_delivery_status(hub: &str, id: i64, estado: DeliveryStatus) -> ApiResult<DeliveryClient> {
    let url = hub_url(hub, &format!("/reparto/clientes/{}", id));
    let json = call_json(Method::Put, &url, &StatusArgs { estado }, "No pude actualizar").await?;
    unwrap_record(json, &["item"])
}

pub async fn delete_delivery_client(hub: &str, id: i64) -> ApiResult<()> {
    call(Method::Delete, &hub_url(hub, &format!("/reparto/clientes/{}", id)), "No pude eliminar").await?;
    Ok(())
}

/// Live moto positions. Failures read as "no motos".
pub async fn list_motos(hub: &str) -> Vec<MotoPosition> {
    let fetched = async {
        let json = call(Method::Get, &hub_url(hub, "/reparto/motos"), "Error cargando motos").await?;
        list_field::<MotoPosition>(&json, "items")
    };
    match fetched.await {
        Ok(list) => list,
        Err(e) => {
            log::debug!("[API] motos unavailable: {}", e);
            Vec::new()
        }
    }
}
