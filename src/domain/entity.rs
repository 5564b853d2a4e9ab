//! Domain Layer - Core Entity Trait
//!
//! Backend records with a numeric id, plus the list helpers every section
//! uses to apply a server response to its local copy.

use thiserror::Error;

use crate::models::{
    Contact, DeliveryClient, KilosLitrosEntry, PurchaseItem, SettlementRoute, Vehicle,
    VehicleIncident,
};

pub trait Entity: Clone {
    fn id(&self) -> i64;
}

macro_rules! impl_entity {
    ($($ty:ty),* $(,)?) => {
        $(impl Entity for $ty {
            fn id(&self) -> i64 {
                self.id
            }
        })*
    };
}

impl_entity!(
    Contact,
    DeliveryClient,
    KilosLitrosEntry,
    PurchaseItem,
    SettlementRoute,
    Vehicle,
    VehicleIncident,
);

/// Form validation failure; the message is shown as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ValidationError(pub &'static str);

pub type ValidationResult<T> = Result<T, ValidationError>;

/// Replace the entry with the same id; returns false if none matched.
pub fn replace_by_id<T: Entity>(list: &mut [T], updated: T) -> bool {
    match list.iter_mut().find(|x| x.id() == updated.id()) {
        Some(slot) => {
            *slot = updated;
            true
        }
        None => false,
    }
}

pub fn remove_by_id<T: Entity>(list: &mut Vec<T>, id: i64) {
    list.retain(|x| x.id() != id);
}

/// Insert at the front, dropping any stale copy with the same id.
pub fn prepend<T: Entity>(list: &mut Vec<T>, item: T) {
    remove_by_id(list, item.id());
    list.insert(0, item);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact(id: i64, nombre: &str) -> Contact {
        Contact {
            id,
            nombre: nombre.to_string(),
            cargo: String::new(),
            telefono: "600000000".to_string(),
        }
    }

    #[test]
    fn test_replace_and_remove() {
        let mut list = vec![contact(1, "Ana"), contact(2, "Luis")];
        assert!(replace_by_id(&mut list, contact(2, "Luisa")));
        assert_eq!(list[1].nombre, "Luisa");
        assert!(!replace_by_id(&mut list, contact(9, "Nadie")));
        remove_by_id(&mut list, 1);
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].id, 2);
    }

    #[test]
    fn test_prepend_dedupes() {
        let mut list = vec![contact(1, "Ana"), contact(2, "Luis")];
        prepend(&mut list, contact(2, "Luis B"));
        assert_eq!(list.iter().map(|c| c.id).collect::<Vec<_>>(), vec![2, 1]);
        assert_eq!(list[0].nombre, "Luis B");
    }
}
