//! Vehicles, their incident log and the open-vehicle tab strip.

use chrono::Datelike;

use crate::domain::entity::{ValidationError, ValidationResult};
use crate::domain::format::{parse_decimal, parse_fecha, parse_int};
use crate::models::{IncidentDraft, Vehicle, VehicleIncident};

pub const VEHICLE_TYPES: [&str; 6] = ["Moto", "Camion", "Trailer", "Carrozado", "Mus", "Furgoneta"];

pub const DEFAULT_VEHICLE_TYPE: &str = "Furgoneta";

/// Trimmed, uppercase, single spaces.
pub fn normalize_plate(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ").to_uppercase()
}

/// Drops entries without a plate and orders by plate.
pub fn sort_vehicles(list: &mut Vec<Vehicle>) {
    list.retain(|v| !v.matricula.trim().is_empty());
    list.sort_by(|a, b| a.matricula.cmp(&b.matricula));
}

/// Adds a newly created vehicle unless the id or plate is already listed.
pub fn merge_vehicle(list: &mut Vec<Vehicle>, vehicle: Vehicle) {
    let exists = list
        .iter()
        .any(|v| v.id == vehicle.id || v.matricula == vehicle.matricula);
    if !exists {
        list.push(vehicle);
    }
    sort_vehicles(list);
}

/// `"1234 ABC · Furgoneta"`, or just the plate when the type is unknown.
pub fn vehicle_label(v: &Vehicle) -> String {
    let plate = if v.matricula.is_empty() {
        format!("Vehículo {}", v.id)
    } else {
        v.matricula.clone()
    };
    if v.tipo.is_empty() {
        plate
    } else {
        format!("{} · {}", plate, v.tipo)
    }
}

// ========================
// Incidents
// ========================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct IncidentForm {
    pub titulo: String,
    pub descripcion: String,
    /// `yyyy-mm-dd` from the date input.
    pub fecha: String,
    pub coste: String,
    pub km: String,
}

impl IncidentForm {
    pub fn from_incident(it: &VehicleIncident) -> Self {
        Self {
            titulo: it.titulo.clone(),
            descripcion: it.descripcion.clone(),
            fecha: crate::domain::format::fecha_to_input(&it.fecha),
            coste: it.coste.to_string(),
            km: it.km.to_string(),
        }
    }

    /// Cost and km default to 0 when blank or unparseable.
    pub fn validate(&self) -> ValidationResult<IncidentDraft> {
        let titulo = self.titulo.trim();
        if titulo.is_empty() {
            return Err(ValidationError("Título obligatorio"));
        }
        let fecha = self.fecha.trim();
        if fecha.is_empty() {
            return Err(ValidationError("Fecha obligatoria"));
        }
        Ok(IncidentDraft {
            titulo: titulo.to_string(),
            descripcion: self.descripcion.trim().to_string(),
            fecha: fecha.to_string(),
            coste: parse_decimal(&self.coste).unwrap_or(0.0),
            km: parse_int(&self.km).unwrap_or(0),
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct IncidentCostSummary {
    pub month: f64,
    pub year: f64,
}

/// Incident cost in the month and year of `today`. Undated incidents are ignored.
pub fn incident_costs(items: &[VehicleIncident], today: chrono::NaiveDate) -> IncidentCostSummary {
    let mut s = IncidentCostSummary::default();
    for it in items {
        let Some(d) = parse_fecha(&it.fecha) else { continue };
        if !it.coste.is_finite() || d.year() != today.year() {
            continue;
        }
        s.year += it.coste;
        if d.month() == today.month() {
            s.month += it.coste;
        }
    }
    s
}

// ========================
// Open tabs
// ========================

/// Vehicles opened in the incident view, most recent first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OpenTabs {
    pub ids: Vec<i64>,
    pub active: Option<i64>,
}

impl OpenTabs {
    pub fn open(&mut self, id: i64) {
        if !self.ids.contains(&id) {
            self.ids.insert(0, id);
        }
        self.active = Some(id);
    }

    /// Closes a tab. If it was active, the first remaining tab takes over.
    /// Returns true when the active vehicle changed.
    pub fn close(&mut self, id: i64) -> bool {
        self.ids.retain(|x| *x != id);
        if self.active == Some(id) {
            self.active = self.ids.first().copied();
            true
        } else {
            false
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
        self.active = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn vehicle(id: i64, plate: &str) -> Vehicle {
        Vehicle { id, matricula: plate.into(), tipo: "Moto".into() }
    }

    fn incident(id: i64, fecha: &str, coste: f64) -> VehicleIncident {
        VehicleIncident {
            id,
            vehiculo_id: Some(1),
            titulo: "x".into(),
            descripcion: String::new(),
            fecha: fecha.into(),
            coste,
            km: 0,
        }
    }

    #[test]
    fn test_normalize_plate() {
        assert_eq!(normalize_plate("  1234   abc "), "1234 ABC");
    }

    #[test]
    fn test_sort_and_merge() {
        let mut list = vec![vehicle(2, "B"), vehicle(3, ""), vehicle(1, "A")];
        sort_vehicles(&mut list);
        assert_eq!(list.iter().map(|v| v.id).collect::<Vec<_>>(), vec![1, 2]);
        merge_vehicle(&mut list, vehicle(9, "A"));
        assert_eq!(list.len(), 2);
        merge_vehicle(&mut list, vehicle(4, "0"));
        assert_eq!(list[0].id, 4);
    }

    #[test]
    fn test_vehicle_label() {
        assert_eq!(vehicle_label(&vehicle(1, "1234 ABC")), "1234 ABC · Moto");
        let bare = Vehicle { id: 5, matricula: String::new(), tipo: String::new() };
        assert_eq!(vehicle_label(&bare), "Vehículo 5");
    }

    #[test]
    fn test_incident_form() {
        let f = IncidentForm {
            titulo: " Pinchazo ".into(),
            fecha: "2024-06-03".into(),
            coste: "45,90".into(),
            km: "".into(),
            ..Default::default()
        };
        let d = f.validate().unwrap();
        assert_eq!(d.titulo, "Pinchazo");
        assert_eq!(d.coste, 45.9);
        assert_eq!(d.km, 0);

        let mut no_date = f.clone();
        no_date.fecha.clear();
        assert_eq!(no_date.validate().unwrap_err().0, "Fecha obligatoria");
        let mut no_title = f;
        no_title.titulo = " ".into();
        assert_eq!(no_title.validate().unwrap_err().0, "Título obligatorio");
    }

    #[test]
    fn test_form_from_backend_date() {
        let f = IncidentForm::from_incident(&incident(1, "09/05/2024", 10.0));
        assert_eq!(f.fecha, "2024-05-09");
    }

    #[test]
    fn test_incident_costs() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let items = vec![
            incident(1, "03/06/2024", 10.0),
            incident(2, "2024-02-01", 5.0),
            incident(3, "01/06/2023", 100.0),
            incident(4, "", 7.0),
        ];
        assert_eq!(incident_costs(&items, today), IncidentCostSummary { month: 10.0, year: 15.0 });
    }

    #[test]
    fn test_tabs() {
        let mut t = OpenTabs::default();
        t.open(1);
        t.open(2);
        t.open(1);
        assert_eq!(t.ids, vec![2, 1]);
        assert_eq!(t.active, Some(1));
        assert!(t.close(1));
        assert_eq!(t.active, Some(2));
        t.open(3);
        assert!(!t.close(2));
        assert_eq!(t.active, Some(3));
        assert!(t.close(3));
        assert_eq!(t.active, None);
    }
}
