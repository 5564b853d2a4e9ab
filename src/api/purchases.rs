//! Purchase Commands

use serde::Serialize;

use super::{call, call_json, hub_url, list_field, unwrap_record, Method};
use crate::error::ApiResult;
use crate::models::{PurchaseDraft, PurchaseItem};

// ========================
// Argument Structs
// ========================

#[derive(Serialize)]
struct BoughtArgs {
    comprado: bool,
}

// ========================
// Commands
// ========================

pub async fn list_purchases(hub: &str) -> ApiResult<Vec<PurchaseItem>> {
    let json = call(Method::Get, &hub_url(hub, "/compras"), "Error cargando compras").await?;
    list_field(&json, "items")
}

pub async fn create_purchase(hub: &str, draft: &PurchaseDraft) -> ApiResult<PurchaseItem> {
    let json = call_json(Method::Post, &hub_url(hub, "/compras"), draft, "No pude agregar").await?;
    unwrap_record(json, &["item"])
}

pub async fn update_purchase(hub: &str, id: i64, draft: &PurchaseDraft) -> ApiResult<PurchaseItem> {
    let url = hub_url(hub, &format!("/compras/{}", id));
    let json = call_json(Method::Put, &url, draft, "No pude actualizar").await?;
    unwrap_record(json, &["item"])
}

pub async fn set_purchase_bought(hub: &str, id: i64, comprado: bool) -> ApiResult<PurchaseItem> {
    let url = hub_url(hub, &format!("/compras/{}", id));
    let json = call_json(Method::Put, &url, &BoughtArgs { comprado }, "No pude actualizar").await?;
    unwrap_record(json, &["item"])
}

pub async fn delete_purchase(hub: &str, id: i64) -> ApiResult<()> {
    call(Method::Delete, &hub_url(hub, &format!("/compras/{}", id)), "No pude eliminar").await?;
    Ok(())
}
