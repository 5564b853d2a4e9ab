//! Fleet Commands
//!
//! Vehicles of a hub and the incident log of each vehicle.

use serde::Serialize;

use super::{call, call_json, hub_url, list_field, unwrap_record, Method};
use crate::error::{ApiError, ApiResult};
use crate::models::{IncidentDraft, Vehicle, VehicleIncident};

// ========================
// Argument Structs
// ========================

#[derive(Serialize)]
struct CreateVehicleArgs<'a> {
    matricula: &'a str,
    tipo: &'a str,
}

// ========================
// Commands
// ========================

pub async fn list_vehicles(hub: &str) -> ApiResult<Vec<Vehicle>> {
    let json = call(Method::Get, &hub_url(hub, "/flota"), "Error cargando flota").await?;
    list_field(&json, "vehicles")
}

pub async fn create_vehicle(hub: &str, matricula: &str, tipo: &str) -> ApiResult<Vehicle> {
    let json = call_json(
        Method::Post,
        &hub_url(hub, "/flota"),
        &CreateVehicleArgs { matricula, tipo },
        "No pude agregar el vehículo",
    )
    .await?;
    let vehicle: Vehicle = unwrap_record(json, &["vehicle", "vehiculo"])?;
    if vehicle.matricula.is_empty() {
        return Err(ApiError::Decode("vehículo sin matrícula".to_string()));
    }
    Ok(vehicle)
}

pub async fn delete_vehicle(hub: &str, id: i64) -> ApiResult<()> {
    call(Method::Delete, &hub_url(hub, &format!("/flota/{}", id)), "No pude borrar el vehículo").await?;
    Ok(())
}

pub async fn list_incidents(hub: &str, vehicle_id: i64) -> ApiResult<Vec<VehicleIncident>> {
    let url = hub_url(hub, &format!("/flota/{}/incidencias", vehicle_id));
    let json = call(Method::Get, &url, "Error cargando incidencias").await?;
    list_field(&json, "items")
}

pub async fn create_incident(hub: &str, vehicle_id: i64, draft: &IncidentDraft) -> ApiResult<VehicleIncident> {
    let url = hub_url(hub, &format!("/flota/{}/incidencias", vehicle_id));
    let json = call_json(Method::Post, &url, draft, "No pude guardar").await?;
    unwrap_record(json, &["item"])
}

pub async fn update_incident(
    hub: &str,
    vehicle_id: i64,
    id: i64,
    draft: &IncidentDraft,
) -> ApiResult<VehicleIncident> {
    let url = hub_url(hub, &format!("/flota/{}/incidencias/{}", vehicle_id, id));
    let json = call_json(Method::Put, &url, draft, "No pude actualizar").await?;
    unwrap_record(json, &["item"])
}

pub async fn delete_incident(hub: &str, vehicle_id: i64, id: i64) -> ApiResult<()> {
    let url = hub_url(hub, &format!("/flota/{}/incidencias/{}", vehicle_id, id));
    call(Method::Delete, &url, "No pude eliminar").await?;
    Ok(())
}
