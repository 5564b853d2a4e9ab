//! Purchase request form rules and list summary.

use crate::domain::entity::{ValidationError, ValidationResult};
use crate::domain::format::{parse_decimal, parse_int};
use crate::models::{PurchaseDraft, PurchaseItem};

/// Raw form fields as typed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PurchaseForm {
    pub item: String,
    pub descripcion: String,
    pub donde: String,
    pub precio: String,
    pub cantidad: String,
}

impl PurchaseForm {
    pub fn from_item(it: &PurchaseItem) -> Self {
        Self {
            item: it.item.clone(),
            descripcion: it.specs().to_string(),
            donde: it.donde.clone(),
            precio: it.precio.to_string(),
            cantidad: it.cantidad.to_string(),
        }
    }

    /// Blank price or quantity means 1.
    pub fn validate(&self) -> ValidationResult<PurchaseDraft> {
        let item = self.item.trim();
        if item.is_empty() {
            return Err(ValidationError("El campo 'Qué comprar' es obligatorio."));
        }
        let precio = parse_decimal(&self.precio).unwrap_or(1.0);
        if precio < 0.0 {
            return Err(ValidationError("Precio inválido."));
        }
        let cantidad = parse_int(&self.cantidad).unwrap_or(1);
        if cantidad <= 0 {
            return Err(ValidationError("Cantidad inválida."));
        }
        Ok(PurchaseDraft {
            item: item.to_string(),
            descripcion: self.descripcion.trim().to_string(),
            donde: self.donde.trim().to_string(),
            precio,
            cantidad: u32::try_from(cantidad).map_err(|_| ValidationError("Cantidad inválida."))?,
        })
    }

    /// Line total as currently typed, blanks counted as 1.
    pub fn preview_total(&self) -> f64 {
        let precio = parse_decimal(&self.precio).unwrap_or(1.0);
        let cantidad = parse_int(&self.cantidad).unwrap_or(1);
        precio * cantidad as f64
    }
}

pub fn line_total(it: &PurchaseItem) -> f64 {
    it.precio * f64::from(it.cantidad)
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PurchaseSummary {
    pub items: usize,
    pub units: u64,
    pub total: f64,
}

pub fn summarize(items: &[PurchaseItem]) -> PurchaseSummary {
    items.iter().fold(PurchaseSummary::default(), |mut s, it| {
        s.items += 1;
        s.units += u64::from(it.cantidad);
        s.total += line_total(it);
        s
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(item: &str, precio: &str, cantidad: &str) -> PurchaseForm {
        PurchaseForm {
            item: item.into(),
            precio: precio.into(),
            cantidad: cantidad.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults_to_one() {
        let d = form(" Cinta ", "", "").validate().unwrap();
        assert_eq!(d.item, "Cinta");
        assert_eq!(d.precio, 1.0);
        assert_eq!(d.cantidad, 1);
    }

    #[test]
    fn test_comma_price_and_truncated_quantity() {
        let d = form("Cinta", "2,5", "3.9").validate().unwrap();
        assert_eq!(d.precio, 2.5);
        assert_eq!(d.cantidad, 3);
    }

    #[test]
    fn test_validation_messages() {
        assert_eq!(
            form("  ", "1", "1").validate().unwrap_err().to_string(),
            "El campo 'Qué comprar' es obligatorio."
        );
        assert_eq!(form("x", "-1", "1").validate().unwrap_err().0, "Precio inválido.");
        assert_eq!(form("x", "1", "0").validate().unwrap_err().0, "Cantidad inválida.");
        assert_eq!(form("x", "1", "-4").validate().unwrap_err().0, "Cantidad inválida.");
    }

    #[test]
    fn test_preview_total() {
        assert_eq!(form("x", "", "").preview_total(), 1.0);
        assert_eq!(form("x", "2,5", "4").preview_total(), 10.0);
    }

    #[test]
    fn test_summary() {
        let mk = |id, precio, cantidad| PurchaseItem {
            id,
            item: "x".into(),
            especificaciones: String::new(),
            descripcion: String::new(),
            donde: String::new(),
            precio,
            cantidad,
            comprado: false,
        };
        let s = summarize(&[mk(1, 2.5, 4), mk(2, 10.0, 1)]);
        assert_eq!(s, PurchaseSummary { items: 2, units: 5, total: 20.0 });
    }
}
