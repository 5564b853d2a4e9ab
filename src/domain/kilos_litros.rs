//! Kilos/litros delivered per route and day.

use std::collections::BTreeMap;

use crate::domain::entity::{ValidationError, ValidationResult};
use crate::domain::format::{is_ymd, parse_decimal, parse_int};
use crate::models::{KilosLitrosDraft, KilosLitrosEntry, KilosLitrosTotals};

/// Names are stored lowercase.
pub fn normalize_name(value: &str) -> String {
    value.trim().to_lowercase()
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct KilosLitrosForm {
    pub day: String,
    pub ruta: String,
    pub nombre: String,
    pub clientes: String,
    pub kilos: String,
    pub litros: String,
}

impl KilosLitrosForm {
    pub fn for_day(day: &str) -> Self {
        Self { day: day.to_string(), ..Default::default() }
    }

    pub fn from_entry(it: &KilosLitrosEntry) -> Self {
        Self {
            day: it.day.clone(),
            ruta: it.ruta_numero.to_string(),
            nombre: it.nombre.clone(),
            clientes: it.clientes.to_string(),
            kilos: it.kilos.to_string(),
            litros: it.litros.to_string(),
        }
    }

    /// At least one of kilos or litros must be given; the other becomes 0.
    pub fn validate(&self) -> ValidationResult<KilosLitrosDraft> {
        let day = self.day.trim();
        if !is_ymd(day) {
            return Err(ValidationError("Día inválido (YYYY-MM-DD)."));
        }
        let ruta = parse_int(&self.ruta).filter(|r| *r > 0).ok_or(ValidationError("Ruta inválida."))?;
        let nombre = normalize_name(&self.nombre);
        if nombre.is_empty() {
            return Err(ValidationError("Nombre inválido."));
        }
        let clientes = parse_int(&self.clientes)
            .filter(|c| *c >= 0)
            .ok_or(ValidationError("Clientes inválido."))?;
        let kilos = parse_decimal(&self.kilos).filter(|k| *k >= 0.0);
        let litros = parse_decimal(&self.litros).filter(|l| *l >= 0.0);
        if kilos.is_none() && litros.is_none() {
            return Err(ValidationError("Debe indicar kilos o litros (>= 0)."));
        }
        Ok(KilosLitrosDraft {
            day: day.to_string(),
            ruta_numero: ruta,
            nombre,
            clientes,
            kilos: kilos.unwrap_or(0.0),
            litros: litros.unwrap_or(0.0),
        })
    }
}

/// Day, then route, then id.
pub fn sort_entries(items: &mut [KilosLitrosEntry]) {
    items.sort_by(|a, b| {
        a.day
            .cmp(&b.day)
            .then(a.ruta_numero.cmp(&b.ruta_numero))
            .then(a.id.cmp(&b.id))
    });
}

pub fn totals(items: &[KilosLitrosEntry]) -> KilosLitrosTotals {
    items.iter().fold(KilosLitrosTotals::default(), |mut t, it| {
        t.clientes += it.clientes;
        t.kilos += it.kilos;
        t.litros += it.litros;
        t
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct GroupTotals {
    pub key: String,
    pub clientes: i64,
    pub kilos: f64,
    pub litros: f64,
}

fn group<F>(items: &[KilosLitrosEntry], key_of: F) -> BTreeMap<String, GroupTotals>
where
    F: Fn(&KilosLitrosEntry) -> Option<String>,
{
    let mut map: BTreeMap<String, GroupTotals> = BTreeMap::new();
    for it in items {
        let Some(key) = key_of(it) else { continue };
        let g = map.entry(key.clone()).or_insert_with(|| GroupTotals {
            key,
            clientes: 0,
            kilos: 0.0,
            litros: 0.0,
        });
        g.clientes += it.clientes;
        g.kilos += it.kilos;
        g.litros += it.litros;
    }
    map
}

/// Monthly totals per route, ascending route number.
pub fn by_route(items: &[KilosLitrosEntry]) -> Vec<(i64, GroupTotals)> {
    let mut out: Vec<(i64, GroupTotals)> = group(items, |it| Some(it.ruta_numero.to_string()))
        .into_values()
        .filter_map(|g| g.key.parse::<i64>().ok().map(|r| (r, g)))
        .collect();
    out.sort_by_key(|(r, _)| *r);
    out
}

/// Monthly totals per employee, most kilos first.
pub fn by_employee(items: &[KilosLitrosEntry]) -> Vec<GroupTotals> {
    let mut out: Vec<GroupTotals> = group(items, |it| {
        let n = normalize_name(&it.nombre);
        (!n.is_empty()).then_some(n)
    })
    .into_values()
    .collect();
    out.sort_by(|a, b| b.kilos.total_cmp(&a.kilos));
    out
}

pub fn for_day<'a>(items: &'a [KilosLitrosEntry], day: &str) -> Vec<&'a KilosLitrosEntry> {
    items.iter().filter(|it| it.day == day).collect()
}

/// `(year, month)` of a `YYYY-MM-DD` day, used to keep the month filter in sync.
pub fn period_of(day: &str) -> Option<(i32, u32)> {
    if !is_ymd(day) {
        return None;
    }
    let year = day.get(0..4)?.parse().ok()?;
    let month = day.get(5..7)?.parse().ok()?;
    Some((year, month))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: i64, day: &str, ruta: i64, nombre: &str, kilos: f64) -> KilosLitrosEntry {
        KilosLitrosEntry {
            id,
            day: day.into(),
            ruta_numero: ruta,
            nombre: nombre.into(),
            clientes: 10,
            kilos,
            litros: 1.0,
        }
    }

    fn form(ruta: &str, nombre: &str, clientes: &str, kilos: &str, litros: &str) -> KilosLitrosForm {
        KilosLitrosForm {
            day: "2024-06-03".into(),
            ruta: ruta.into(),
            nombre: nombre.into(),
            clientes: clientes.into(),
            kilos: kilos.into(),
            litros: litros.into(),
        }
    }

    #[test]
    fn test_validate_ok() {
        let d = form("3", "  PACO ", "12", "150,5", "").validate().unwrap();
        assert_eq!(d.nombre, "paco");
        assert_eq!(d.ruta_numero, 3);
        assert_eq!(d.kilos, 150.5);
        assert_eq!(d.litros, 0.0);
    }

    #[test]
    fn test_validate_errors() {
        assert_eq!(form("0", "a", "1", "1", "").validate().unwrap_err().0, "Ruta inválida.");
        assert_eq!(form("2", " ", "1", "1", "").validate().unwrap_err().0, "Nombre inválido.");
        assert_eq!(form("2", "a", "", "1", "").validate().unwrap_err().0, "Clientes inválido.");
        assert_eq!(form("2", "a", "-1", "1", "").validate().unwrap_err().0, "Clientes inválido.");
        assert_eq!(
            form("2", "a", "1", "-3", "").validate().unwrap_err().0,
            "Debe indicar kilos o litros (>= 0)."
        );
        let mut bad_day = form("2", "a", "1", "1", "");
        bad_day.day = "03/06/2024".into();
        assert!(bad_day.validate().is_err());
    }

    #[test]
    fn test_sort_and_totals() {
        let mut items = vec![
            entry(3, "2024-06-04", 1, "ana", 5.0),
            entry(2, "2024-06-03", 2, "luis", 10.0),
            entry(1, "2024-06-03", 2, "ana", 1.0),
            entry(4, "2024-06-03", 1, "Ana ", 2.0),
        ];
        sort_entries(&mut items);
        assert_eq!(items.iter().map(|i| i.id).collect::<Vec<_>>(), vec![4, 1, 2, 3]);
        let t = totals(&items);
        assert_eq!(t.clientes, 40);
        assert_eq!(t.kilos, 18.0);
        assert_eq!(t.litros, 4.0);
    }

    #[test]
    fn test_groupings() {
        let items = vec![
            entry(1, "2024-06-03", 10, "ana", 1.0),
            entry(2, "2024-06-03", 2, "luis", 10.0),
            entry(3, "2024-06-04", 10, "Ana", 5.0),
        ];
        let routes = by_route(&items);
        assert_eq!(routes.iter().map(|(r, _)| *r).collect::<Vec<_>>(), vec![2, 10]);
        assert_eq!(routes[1].1.kilos, 6.0);

        let people = by_employee(&items);
        assert_eq!(people[0].key, "luis");
        assert_eq!(people[1].key, "ana");
        assert_eq!(people[1].clientes, 20);

        assert_eq!(for_day(&items, "2024-06-04").len(), 1);
    }

    #[test]
    fn test_period_of() {
        assert_eq!(period_of("2023-11-30"), Some((2023, 11)));
        assert_eq!(period_of("nope"), None);
    }
}
