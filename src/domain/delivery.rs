//! Delivery route clients and their status.

use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::entity::{ValidationError, ValidationResult};
use crate::domain::format::parse_decimal;
use crate::models::{DeliveryClient, DeliveryClientDraft, SettlementRoute};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    #[default]
    Pendiente,
    Entregado,
    Anulado,
    CambiadoDia,
}

impl DeliveryStatus {
    pub const ALL: [DeliveryStatus; 4] = [
        DeliveryStatus::Pendiente,
        DeliveryStatus::Entregado,
        DeliveryStatus::Anulado,
        DeliveryStatus::CambiadoDia,
    ];

    /// Anything unknown (or missing) counts as pending.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "entregado" => DeliveryStatus::Entregado,
            "anulado" => DeliveryStatus::Anulado,
            "cambiado_dia" => DeliveryStatus::CambiadoDia,
            _ => DeliveryStatus::Pendiente,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryStatus::Pendiente => "pendiente",
            DeliveryStatus::Entregado => "entregado",
            DeliveryStatus::Anulado => "anulado",
            DeliveryStatus::CambiadoDia => "cambiado_dia",
        }
    }

    /// Click cycle: pendiente → entregado → anulado → cambiado_dia → pendiente.
    pub fn next(&self) -> Self {
        match self {
            DeliveryStatus::Pendiente => DeliveryStatus::Entregado,
            DeliveryStatus::Entregado => DeliveryStatus::Anulado,
            DeliveryStatus::Anulado => DeliveryStatus::CambiadoDia,
            DeliveryStatus::CambiadoDia => DeliveryStatus::Pendiente,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DeliveryStatus::Pendiente => "🔴 Pendiente",
            DeliveryStatus::Entregado => "✅ Entregado",
            DeliveryStatus::Anulado => "⛔ Anulado",
            DeliveryStatus::CambiadoDia => "🟨 Cambiado de día",
        }
    }
}

impl<'de> Deserialize<'de> for DeliveryStatus {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(d)?;
        Ok(raw.map(|s| Self::parse(&s)).unwrap_or_default())
    }
}

/// Which statuses are visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusFilter {
    pub pendientes: bool,
    pub entregados: bool,
    pub anulados: bool,
    pub cambiados: bool,
}

impl Default for StatusFilter {
    fn default() -> Self {
        Self { pendientes: true, entregados: true, anulados: true, cambiados: true }
    }
}

impl StatusFilter {
    pub fn allows(&self, status: DeliveryStatus) -> bool {
        match status {
            DeliveryStatus::Pendiente => self.pendientes,
            DeliveryStatus::Entregado => self.entregados,
            DeliveryStatus::Anulado => self.anulados,
            DeliveryStatus::CambiadoDia => self.cambiados,
        }
    }

    pub fn toggle(&mut self, status: DeliveryStatus) {
        let flag = match status {
            DeliveryStatus::Pendiente => &mut self.pendientes,
            DeliveryStatus::Entregado => &mut self.entregados,
            DeliveryStatus::Anulado => &mut self.anulados,
            DeliveryStatus::CambiadoDia => &mut self.cambiados,
        };
        *flag = !*flag;
    }
}

/// Located clients have finite coordinates; the backend sends `0,0` for
/// addresses it could not geocode.
pub fn coords(c: &DeliveryClient) -> Option<(f64, f64)> {
    match (c.lat, c.lng) {
        (Some(lat), Some(lng)) if lat.is_finite() && lng.is_finite() && (lat, lng) != (0.0, 0.0) => {
            Some((lat, lng))
        }
        _ => None,
    }
}

/// Clients that would get a map marker: located and not filtered out.
pub fn visible_located<'a>(clients: &'a [DeliveryClient], filter: &StatusFilter) -> Vec<&'a DeliveryClient> {
    clients
        .iter()
        .filter(|c| coords(c).is_some() && filter.allows(c.estado))
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeliverySummary {
    pub total: usize,
    pub pendientes: usize,
    pub entregados: usize,
    pub anulados: usize,
    pub cambiados: usize,
}

pub fn summarize(clients: &[DeliveryClient]) -> DeliverySummary {
    let mut s = DeliverySummary { total: clients.len(), ..Default::default() };
    for c in clients {
        match c.estado {
            DeliveryStatus::Pendiente => s.pendientes += 1,
            DeliveryStatus::Entregado => s.entregados += 1,
            DeliveryStatus::Anulado => s.anulados += 1,
            DeliveryStatus::CambiadoDia => s.cambiados += 1,
        }
    }
    s
}

pub fn sort_routes(routes: &mut [SettlementRoute]) {
    routes.sort_by(|a, b| a.code.cmp(&b.code));
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeliveryClientForm {
    pub nombre: String,
    pub direccion: String,
    pub lat: String,
    pub lng: String,
}

impl DeliveryClientForm {
    /// Coordinates are optional, but only used when both parse.
    pub fn validate(&self, route_id: Option<i64>) -> ValidationResult<DeliveryClientDraft> {
        let nombre = self.nombre.trim();
        if nombre.is_empty() {
            return Err(ValidationError("Nombre obligatorio"));
        }
        let direccion = self.direccion.trim();
        if direccion.is_empty() {
            return Err(ValidationError("Dirección obligatoria (se usa para ubicar en el mapa)"));
        }
        let route_id = route_id.ok_or(ValidationError("Selecciona una ruta"))?;
        let (lat, lng) = match (parse_decimal(&self.lat), parse_decimal(&self.lng)) {
            (Some(lat), Some(lng)) => (Some(lat), Some(lng)),
            _ => (None, None),
        };
        Ok(DeliveryClientDraft {
            route_id,
            nombre: nombre.to_string(),
            direccion: direccion.to_string(),
            estado: DeliveryStatus::Pendiente,
            lat,
            lng,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(id: i64, estado: DeliveryStatus, lat: Option<f64>, lng: Option<f64>) -> DeliveryClient {
        DeliveryClient {
            id,
            route_id: Some(1),
            cliente_codigo: String::new(),
            nombre: format!("c{}", id),
            direccion: "C/ Mayor".into(),
            lat,
            lng,
            estado,
        }
    }

    #[test]
    fn test_status_cycle_and_parse() {
        let mut s = DeliveryStatus::Pendiente;
        for _ in 0..4 {
            s = s.next();
        }
        assert_eq!(s, DeliveryStatus::Pendiente);
        assert_eq!(DeliveryStatus::parse("ENTREGADO"), DeliveryStatus::Entregado);
        assert_eq!(DeliveryStatus::parse("???"), DeliveryStatus::Pendiente);
        assert_eq!(DeliveryStatus::CambiadoDia.as_str(), "cambiado_dia");
    }

    #[test]
    fn test_status_serde() {
        let c: DeliveryClient =
            serde_json::from_str(r#"{"id": 1, "estado": "cambiado_dia", "lat": 0.0, "lng": 0.0}"#).unwrap();
        assert_eq!(c.estado, DeliveryStatus::CambiadoDia);
        let c: DeliveryClient = serde_json::from_str(r#"{"id": 1, "estado": null}"#).unwrap();
        assert_eq!(c.estado, DeliveryStatus::Pendiente);
        assert_eq!(serde_json::to_value(DeliveryStatus::CambiadoDia).unwrap(), "cambiado_dia");
    }

    #[test]
    fn test_coords_and_filter() {
        let clients = vec![
            client(1, DeliveryStatus::Pendiente, Some(40.0), Some(-3.0)),
            client(2, DeliveryStatus::Entregado, Some(40.1), Some(-3.1)),
            client(3, DeliveryStatus::Pendiente, Some(0.0), Some(0.0)),
            client(4, DeliveryStatus::Pendiente, None, Some(-3.0)),
        ];
        let mut filter = StatusFilter::default();
        assert_eq!(visible_located(&clients, &filter).len(), 2);
        filter.toggle(DeliveryStatus::Entregado);
        let ids: Vec<i64> = visible_located(&clients, &filter).iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn test_summary() {
        let clients = vec![
            client(1, DeliveryStatus::Pendiente, None, None),
            client(2, DeliveryStatus::Entregado, None, None),
            client(3, DeliveryStatus::CambiadoDia, None, None),
            client(4, DeliveryStatus::Entregado, None, None),
        ];
        assert_eq!(
            summarize(&clients),
            DeliverySummary { total: 4, pendientes: 1, entregados: 2, anulados: 0, cambiados: 1 }
        );
    }

    #[test]
    fn test_form_validation() {
        let form = DeliveryClientForm {
            nombre: "Bar".into(),
            direccion: "C/ Sol 2".into(),
            lat: "40,41".into(),
            lng: "".into(),
        };
        let d = form.validate(Some(7)).unwrap();
        assert_eq!(d.route_id, 7);
        assert_eq!((d.lat, d.lng), (None, None));
        assert_eq!(form.validate(None).unwrap_err().0, "Selecciona una ruta");
        let mut no_addr = form.clone();
        no_addr.direccion.clear();
        assert!(no_addr.validate(Some(7)).unwrap_err().0.starts_with("Dirección obligatoria"));
    }
}
