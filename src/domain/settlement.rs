//! Cash settlement reconciliation
//!
//! Each route has one row per day with the cash a driver collected
//! (metálico) and what was deposited (ingreso). The difference is positive
//! when the driver still owes money and negative when they deposited extra.

use std::collections::{BTreeMap, BTreeSet};

use crate::domain::format::{format_money_es, parse_money_es};
use crate::models::{SettlementRoute, SettlementRow};

/// Month data per route code.
pub type SettlementBook = BTreeMap<String, Vec<SettlementRow>>;

const EPSILON: f64 = 0.00001;

/// Trim, lowercase and collapse internal whitespace.
pub fn normalize_name(value: &str) -> String {
    value
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

pub fn diff_value(metalico: &str, ingreso: &str) -> f64 {
    parse_money_es(metalico) - parse_money_es(ingreso)
}

pub fn row_diff(row: &SettlementRow) -> f64 {
    diff_value(&row.metalico, &row.ingreso)
}

pub fn diff_label(value: f64) -> String {
    if value == 0.0 {
        "—".to_string()
    } else {
        format!("{} €", format_money_es(value))
    }
}

/// Human reading of a driver's balance.
pub fn driver_status(total: f64) -> String {
    if total > EPSILON {
        format!("debe depositar {} €", format_money_es(total))
    } else if total < -EPSILON {
        format!("tiene {} € a su favor", format_money_es(total.abs()))
    } else {
        "sin descuadre".to_string()
    }
}

/// Row for the day, or a blank one if nothing was entered.
pub fn row_for_day(rows: &[SettlementRow], day: &str) -> SettlementRow {
    rows.iter()
        .find(|r| r.day == day)
        .cloned()
        .unwrap_or_else(|| SettlementRow { day: day.to_string(), ..Default::default() })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettlementField {
    Repartidor,
    Metalico,
    Ingreso,
    Comment,
}

/// Current text of one cell; blank when the day has no row yet.
pub fn cell_value(rows: &[SettlementRow], day: &str, field: SettlementField) -> String {
    let Some(row) = rows.iter().find(|r| r.day == day) else {
        return String::new();
    };
    match field {
        SettlementField::Repartidor => row.repartidor.clone(),
        SettlementField::Metalico => row.metalico.clone(),
        SettlementField::Ingreso => row.ingreso.clone(),
        SettlementField::Comment => row.comment.clone(),
    }
}

/// Edits one cell, creating the day's row if needed. Rows stay sorted by day.
pub fn update_cell(rows: &mut Vec<SettlementRow>, day: &str, field: SettlementField, value: &str) {
    let idx = match rows.iter().position(|r| r.day == day) {
        Some(i) => i,
        None => {
            rows.push(SettlementRow { day: day.to_string(), ..Default::default() });
            rows.len() - 1
        }
    };
    let row = &mut rows[idx];
    match field {
        SettlementField::Repartidor => row.repartidor = normalize_name(value),
        SettlementField::Metalico => row.metalico = value.to_string(),
        SettlementField::Ingreso => row.ingreso = value.to_string(),
        SettlementField::Comment => row.comment = value.to_string(),
    }
    rows.sort_by(|a, b| a.day.cmp(&b.day));
}

/// Rows as they are sent on save: names normalized, comments trimmed.
pub fn rows_for_save(rows: &[SettlementRow]) -> Vec<SettlementRow> {
    rows.iter()
        .map(|r| SettlementRow {
            repartidor: normalize_name(&r.repartidor),
            comment: r.comment.trim().to_string(),
            ..r.clone()
        })
        .collect()
}

/// Distinct driver names across all routes, for autocomplete.
pub fn driver_names(routes: &[SettlementRoute], book: &SettlementBook) -> Vec<String> {
    routes
        .iter()
        .filter_map(|r| book.get(&r.code))
        .flatten()
        .map(|row| normalize_name(&row.repartidor))
        .filter(|n| !n.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct DriverSummary {
    pub name: String,
    pub total: f64,
    pub comments: Vec<String>,
}

/// Balance per driver over every route of the month. Drivers with no
/// difference and no comments are left out; largest imbalance first.
pub fn driver_summary(routes: &[SettlementRoute], book: &SettlementBook) -> Vec<DriverSummary> {
    let mut acc: BTreeMap<String, (f64, Vec<String>)> = BTreeMap::new();
    for row in routes.iter().filter_map(|r| book.get(&r.code)).flatten() {
        let name = normalize_name(&row.repartidor);
        if name.is_empty() {
            continue;
        }
        let entry = acc.entry(name).or_default();
        entry.0 += row_diff(row);
        let comment = row.comment.trim();
        if !comment.is_empty() && !entry.1.iter().any(|c| c == comment) {
            entry.1.push(comment.to_string());
        }
    }

    let mut out: Vec<DriverSummary> = acc
        .into_iter()
        .map(|(name, (total, comments))| DriverSummary { name, total, comments })
        .filter(|s| s.total.abs() > EPSILON || !s.comments.is_empty())
        .collect();
    out.sort_by(|a, b| b.total.abs().total_cmp(&a.total.abs()));
    out
}

#[derive(Debug, Clone, PartialEq)]
pub struct Mismatch {
    pub day: String,
    pub repartidor: String,
    pub diff: f64,
    pub comment: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RouteSummary {
    pub code: String,
    pub total_metalico: f64,
    pub total_ingreso: f64,
    pub total_diff: f64,
    pub mismatches: Vec<Mismatch>,
}

/// Month totals per route with the days that don't reconcile.
/// Routes with the largest absolute difference come first.
pub fn route_summary(routes: &[SettlementRoute], book: &SettlementBook) -> Vec<RouteSummary> {
    let empty = Vec::new();
    let mut out: Vec<RouteSummary> = routes
        .iter()
        .map(|route| {
            let rows = book.get(&route.code).unwrap_or(&empty);
            let mut summary = RouteSummary {
                code: route.code.clone(),
                total_metalico: 0.0,
                total_ingreso: 0.0,
                total_diff: 0.0,
                mismatches: Vec::new(),
            };
            for row in rows {
                let metal = parse_money_es(&row.metalico);
                let ing = parse_money_es(&row.ingreso);
                let diff = metal - ing;
                summary.total_metalico += metal;
                summary.total_ingreso += ing;
                summary.total_diff += diff;
                if diff != 0.0 {
                    summary.mismatches.push(Mismatch {
                        day: row.day.clone(),
                        repartidor: normalize_name(&row.repartidor),
                        diff,
                        comment: row.comment.trim().to_string(),
                    });
                }
            }
            summary.mismatches.sort_by(|a, b| a.day.cmp(&b.day));
            summary
        })
        .collect();
    out.sort_by(|a, b| b.total_diff.abs().total_cmp(&a.total_diff.abs()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(id: i64, code: &str) -> SettlementRoute {
        SettlementRoute { id, code: code.to_string() }
    }

    fn row(day: &str, who: &str, metal: &str, ing: &str, comment: &str) -> SettlementRow {
        SettlementRow {
            day: day.to_string(),
            repartidor: who.to_string(),
            metalico: metal.to_string(),
            ingreso: ing.to_string(),
            comment: comment.to_string(),
        }
    }

    fn sample() -> (Vec<SettlementRoute>, SettlementBook) {
        let routes = vec![route(1, "001"), route(2, "002")];
        let mut book = SettlementBook::new();
        book.insert(
            "001".into(),
            vec![
                row("2024-06-03", "Juan  Pérez", "100,00", "90,00", "faltan 10"),
                row("2024-06-04", "juan pérez", "50", "50", ""),
            ],
        );
        book.insert(
            "002".into(),
            vec![
                row("2024-06-05", "Marta", "1.000,00", "1.020,00", ""),
                row("2024-06-03", "Luis", "20", "20", ""),
            ],
        );
        (routes, book)
    }

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("  Juan   PÉREZ "), "juan pérez");
        assert_eq!(normalize_name(""), "");
    }

    #[test]
    fn test_diff_and_labels() {
        assert_eq!(diff_value("1.234,50", "1.000"), 234.5);
        assert_eq!(diff_label(0.0), "—");
        assert_eq!(diff_label(-20.0), "-20,00 €");
        assert_eq!(driver_status(10.0), "debe depositar 10,00 €");
        assert_eq!(driver_status(-20.0), "tiene 20,00 € a su favor");
        assert_eq!(driver_status(0.0), "sin descuadre");
    }

    #[test]
    fn test_update_cell_upserts_sorted() {
        let mut rows = vec![row("2024-06-05", "", "", "", "")];
        update_cell(&mut rows, "2024-06-02", SettlementField::Repartidor, " Ana  López ");
        update_cell(&mut rows, "2024-06-05", SettlementField::Metalico, "12,5");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].day, "2024-06-02");
        assert_eq!(rows[0].repartidor, "ana lópez");
        assert_eq!(rows[1].metalico, "12,5");
        assert_eq!(row_for_day(&rows, "2024-06-09").day, "2024-06-09");
        assert_eq!(cell_value(&rows, "2024-06-05", SettlementField::Metalico), "12,5");
        assert_eq!(cell_value(&rows, "2024-06-09", SettlementField::Comment), "");
    }

    #[test]
    fn test_rows_for_save() {
        let out = rows_for_save(&[row("2024-06-01", " Ana ", "1", "1", "  ok ")]);
        assert_eq!(out[0].repartidor, "ana");
        assert_eq!(out[0].comment, "ok");
    }

    #[test]
    fn test_driver_names() {
        let (routes, book) = sample();
        assert_eq!(driver_names(&routes, &book), vec!["juan pérez", "luis", "marta"]);
    }

    #[test]
    fn test_driver_summary() {
        let (routes, book) = sample();
        let s = driver_summary(&routes, &book);
        // luis reconciles and has no comment
        assert_eq!(s.len(), 2);
        assert_eq!(s[0].name, "marta");
        assert_eq!(s[0].total, -20.0);
        assert_eq!(s[1].name, "juan pérez");
        assert_eq!(s[1].total, 10.0);
        assert_eq!(s[1].comments, vec!["faltan 10".to_string()]);
    }

    #[test]
    fn test_route_summary() {
        let (mut routes, book) = sample();
        routes.push(route(3, "003"));
        let s = route_summary(&routes, &book);
        assert_eq!(s[0].code, "002");
        assert_eq!(s[0].total_metalico, 1020.0);
        assert_eq!(s[0].total_diff, -20.0);
        assert_eq!(s[0].mismatches.len(), 1);
        assert_eq!(s[1].code, "001");
        assert_eq!(s[1].mismatches[0].repartidor, "juan pérez");
        assert_eq!(s[2].code, "003");
        assert_eq!(s[2].total_diff, 0.0);
    }

    #[test]
    fn test_driver_summary_keeps_commented_zero_balance() {
        let routes = vec![route(1, "001")];
        let mut book = SettlementBook::new();
        book.insert(
            "001".into(),
            vec![
                row("2024-06-03", "Ana", "40", "40", "pagó con tarjeta"),
                row("2024-06-04", "Pedro", "15", "15", ""),
                row("2024-06-05", "ana", "10", "10", "pagó con tarjeta"),
            ],
        );
        let s = driver_summary(&routes, &book);
        assert_eq!(s.len(), 1);
        assert_eq!(s[0].name, "ana");
        assert_eq!(s[0].total, 0.0);
        assert_eq!(s[0].comments, vec!["pagó con tarjeta".to_string()]);
        assert_eq!(driver_status(s[0].total), "sin descuadre");
    }

    #[test]
    fn test_driver_status_ignores_rounding_noise() {
        assert_eq!(driver_status(0.000001), "sin descuadre");
        assert_eq!(driver_status(-0.000009), "sin descuadre");
        assert_eq!(driver_status(0.01), "debe depositar 0,01 €");
    }

    #[test]
    fn test_route_mismatches_sorted_by_day() {
        let routes = vec![route(1, "010")];
        let mut book = SettlementBook::new();
        book.insert(
            "010".into(),
            vec![
                row("2024-06-20", "Luis", "30", "25", ""),
                row("2024-06-02", "Luis", "10", "12", "sobra"),
                row("2024-06-11", "Marta", "5", "5", ""),
                row("2024-06-07", "Marta", "8", "0", ""),
            ],
        );
        let s = route_summary(&routes, &book);
        let days: Vec<&str> = s[0].mismatches.iter().map(|m| m.day.as_str()).collect();
        assert_eq!(days, vec!["2024-06-02", "2024-06-07", "2024-06-20"]);
        assert_eq!(s[0].mismatches[0].diff, -2.0);
        assert_eq!(s[0].mismatches[0].comment, "sobra");
        assert_eq!(s[0].total_diff, 11.0);
    }
}
