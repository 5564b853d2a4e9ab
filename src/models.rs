//! Data Models
//!
//! Wire types shared with the Areatrans REST backend.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

/// `null` and missing both become `T::default()`.
fn null_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}

/// Employee ids arrive as numbers or strings depending on the endpoint.
fn id_string<'de, D>(d: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        S(String),
        N(i64),
    }
    Ok(match Raw::deserialize(d)? {
        Raw::S(s) => s,
        Raw::N(n) => n.to_string(),
    })
}

// ========================
// Auth
// ========================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct User {
    #[serde(default, deserialize_with = "null_default")]
    pub email: String,
    #[serde(default, deserialize_with = "null_default")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoginResponse {
    #[serde(default, deserialize_with = "null_default")]
    pub message: String,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default, deserialize_with = "null_default")]
    pub token: String,
}

// ========================
// Asistencias
// ========================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    #[serde(default, deserialize_with = "null_default")]
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AttendanceTotals {
    #[serde(default)]
    pub trabajo: u32,
    #[serde(default)]
    pub descanso: u32,
    #[serde(default)]
    pub vacaciones: u32,
    #[serde(default)]
    pub enfermedad: u32,
    #[serde(default)]
    pub festivos: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRow {
    pub employee: Employee,
    /// Day of month (as text, "1".."31") to attendance code.
    #[serde(default, deserialize_with = "null_default")]
    pub days: BTreeMap<String, String>,
    /// Day of month to hours as typed ("2,5").
    #[serde(default, deserialize_with = "null_default")]
    pub extra_hours: BTreeMap<String, String>,
    #[serde(default, deserialize_with = "null_default")]
    pub totals: AttendanceTotals,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AttendanceMonth {
    #[serde(default)]
    pub days_in_month: u32,
    #[serde(default, deserialize_with = "null_default")]
    pub rows: Vec<AttendanceRow>,
}

// ========================
// Liquidaciones
// ========================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettlementRoute {
    pub id: i64,
    #[serde(deserialize_with = "id_string")]
    pub code: String,
}

/// One day of a route. Amounts are kept as typed (`"1.234,50"`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SettlementRow {
    pub day: String,
    #[serde(default, deserialize_with = "null_default")]
    pub repartidor: String,
    #[serde(default, deserialize_with = "null_default")]
    pub metalico: String,
    #[serde(default, deserialize_with = "null_default")]
    pub ingreso: String,
    #[serde(default, deserialize_with = "null_default")]
    pub comment: String,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct SettlementMonth {
    #[serde(default, deserialize_with = "null_default")]
    pub rows: Vec<SettlementRow>,
}

// ========================
// Compras
// ========================

fn one() -> f64 {
    1.0
}

fn one_u32() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseItem {
    pub id: i64,
    #[serde(default, deserialize_with = "null_default")]
    pub item: String,
    #[serde(default, deserialize_with = "null_default")]
    pub especificaciones: String,
    #[serde(default, deserialize_with = "null_default")]
    pub descripcion: String,
    #[serde(default, deserialize_with = "null_default")]
    pub donde: String,
    #[serde(default = "one")]
    pub precio: f64,
    #[serde(default = "one_u32")]
    pub cantidad: u32,
    #[serde(default)]
    pub comprado: bool,
}

impl PurchaseItem {
    /// Newer backends send `especificaciones`, older ones `descripcion`.
    pub fn specs(&self) -> &str {
        if self.especificaciones.trim().is_empty() {
            &self.descripcion
        } else {
            &self.especificaciones
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PurchaseDraft {
    pub item: String,
    pub descripcion: String,
    pub donde: String,
    pub precio: f64,
    pub cantidad: u32,
}

// ========================
// Contactos
// ========================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub id: i64,
    #[serde(default, deserialize_with = "null_default")]
    pub nombre: String,
    #[serde(default, deserialize_with = "null_default")]
    pub cargo: String,
    #[serde(default, deserialize_with = "null_default")]
    pub telefono: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ContactDraft {
    pub nombre: String,
    pub cargo: String,
    pub telefono: String,
}

// ========================
// Flota / Incidencias
// ========================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: i64,
    #[serde(default, deserialize_with = "null_default")]
    pub matricula: String,
    #[serde(default, deserialize_with = "null_default")]
    pub tipo: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleIncident {
    pub id: i64,
    #[serde(default)]
    pub vehiculo_id: Option<i64>,
    #[serde(default, deserialize_with = "null_default")]
    pub titulo: String,
    #[serde(default, deserialize_with = "null_default")]
    pub descripcion: String,
    /// `dd/mm/yyyy` from the backend.
    #[serde(default, deserialize_with = "null_default")]
    pub fecha: String,
    #[serde(default, deserialize_with = "null_default")]
    pub coste: f64,
    #[serde(default, deserialize_with = "null_default")]
    pub km: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IncidentDraft {
    pub titulo: String,
    pub descripcion: String,
    /// `yyyy-mm-dd`
    pub fecha: String,
    pub coste: f64,
    pub km: i64,
}

// ========================
// Kilos/Litros
// ========================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KilosLitrosEntry {
    pub id: i64,
    #[serde(default, deserialize_with = "null_default")]
    pub day: String,
    #[serde(default, deserialize_with = "null_default")]
    pub ruta_numero: i64,
    #[serde(default, deserialize_with = "null_default")]
    pub nombre: String,
    #[serde(default, deserialize_with = "null_default")]
    pub clientes: i64,
    #[serde(default, deserialize_with = "null_default")]
    pub kilos: f64,
    #[serde(default, deserialize_with = "null_default")]
    pub litros: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct KilosLitrosTotals {
    #[serde(default)]
    pub clientes: i64,
    #[serde(default)]
    pub kilos: f64,
    #[serde(default)]
    pub litros: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct KilosLitrosMonth {
    #[serde(default, deserialize_with = "null_default")]
    pub items: Vec<KilosLitrosEntry>,
    #[serde(default, deserialize_with = "null_default")]
    pub totals: KilosLitrosTotals,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KilosLitrosDraft {
    pub day: String,
    pub ruta_numero: i64,
    pub nombre: String,
    pub clientes: i64,
    pub kilos: f64,
    pub litros: f64,
}

// ========================
// Reparto
// ========================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryClient {
    pub id: i64,
    #[serde(default)]
    pub route_id: Option<i64>,
    #[serde(default, deserialize_with = "null_default")]
    pub cliente_codigo: String,
    #[serde(default, deserialize_with = "null_default")]
    pub nombre: String,
    #[serde(default, deserialize_with = "null_default")]
    pub direccion: String,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lng: Option<f64>,
    #[serde(default)]
    pub estado: crate::domain::delivery::DeliveryStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeliveryClientDraft {
    pub route_id: i64,
    pub nombre: String,
    pub direccion: String,
    pub estado: crate::domain::delivery::DeliveryStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MotoVehicle {
    #[serde(default, deserialize_with = "null_default")]
    pub matricula: String,
    #[serde(default, deserialize_with = "null_default")]
    pub tipo: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotoPosition {
    #[serde(default)]
    pub vehiculo_id: Option<i64>,
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub ts: Option<String>,
    #[serde(default)]
    pub vehiculo: Option<MotoVehicle>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attendance_row_tolerates_nulls() {
        let json = r#"{
            "employee": {"id": 7, "name": "Ana"},
            "days": {"1": "1", "2": "D"},
            "extra_hours": null
        }"#;
        let row: AttendanceRow = serde_json::from_str(json).unwrap();
        assert_eq!(row.employee.id, "7");
        assert_eq!(row.days.get("2").map(String::as_str), Some("D"));
        assert!(row.extra_hours.is_empty());
        assert_eq!(row.totals, AttendanceTotals::default());
    }

    #[test]
    fn test_purchase_defaults_and_specs() {
        let it: PurchaseItem =
            serde_json::from_str(r#"{"id": 1, "item": "Guantes", "descripcion": "talla L", "donde": null}"#)
                .unwrap();
        assert_eq!(it.precio, 1.0);
        assert_eq!(it.cantidad, 1);
        assert_eq!(it.specs(), "talla L");
        assert_eq!(it.donde, "");
    }

    #[test]
    fn test_route_code_numeric_or_text() {
        let r: SettlementRoute = serde_json::from_str(r#"{"id": 3, "code": 2}"#).unwrap();
        assert_eq!(r.code, "2");
        let r: SettlementRoute = serde_json::from_str(r#"{"id": 3, "code": "002"}"#).unwrap();
        assert_eq!(r.code, "002");
    }

    #[test]
    fn test_delivery_draft_omits_missing_coords() {
        let draft = DeliveryClientDraft {
            route_id: 1,
            nombre: "Bar Pepe".into(),
            direccion: "C/ Mayor 1".into(),
            estado: Default::default(),
            lat: None,
            lng: None,
        };
        let v = serde_json::to_value(&draft).unwrap();
        assert_eq!(v["estado"], "pendiente");
        assert!(v.get("lat").is_none());
    }
}
