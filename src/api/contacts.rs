//! Contact Commands

use super::{call, call_json, hub_url, list_field, unwrap_record, Method};
use crate::error::ApiResult;
use crate::models::{Contact, ContactDraft};

pub async fn list_contacts(hub: &str) -> ApiResult<Vec<Contact>> {
    let json = call(Method::Get, &hub_url(hub, "/contactos"), "Error cargando contactos").await?;
    list_field(&json, "items")
}

pub async fn create_contact(hub: &str, draft: &ContactDraft) -> ApiResult<Contact> {
    let json = call_json(Method::Post, &hub_url(hub, "/contactos"), draft, "No pude agregar").await?;
    unwrap_record(json, &["item"])
}

pub async fn update_contact(hub: &str, id: i64, draft: &ContactDraft) -> ApiResult<Contact> {
    let url = hub_url(hub, &format!("/contactos/{}", id));
    let json = call_json(Method::Put, &url, draft, "No pude actualizar").await?;
    unwrap_record(json, &["item"])
}

pub async fn delete_contact(hub: &str, id: i64) -> ApiResult<()> {
    call(Method::Delete, &hub_url(hub, &format!("/contactos/{}", id)), "No pude eliminar").await?;
    Ok(())
}
