//! Attendance grid: codes, weekend defaults, totals and the unsaved-changes buffer.

use std::collections::BTreeMap;

use crate::domain::format::{self, is_weekend};
use crate::models::{AttendanceRow, AttendanceTotals};

/// `(code, label)` in the order the cell editor lists them.
pub const CODE_OPTIONS: [(&str, &str); 10] = [
    ("", "—"),
    ("1", "1 (Trabajo)"),
    ("F", "F (Festivo)"),
    ("D", "D (Descanso)"),
    ("V", "V (Vacaciones)"),
    ("E", "E (Enfermedad)"),
    ("L", "L (Licencia)"),
    ("O", "O (Otros)"),
    ("M", "M (Incapacidad)"),
    ("C", "C (Comp. Horas)"),
];

pub const REST_CODE: &str = "D";

pub fn code_label(code: &str) -> &'static str {
    CODE_OPTIONS
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, l)| *l)
        .unwrap_or("—")
}

/// Stored code for the day, or `D` on weekends when nothing is stored yet.
pub fn effective_code(row: &AttendanceRow, year: i32, month: u32, day: u32) -> String {
    match row.days.get(&day.to_string()) {
        Some(code) if !code.is_empty() => code.clone(),
        _ if is_weekend(year, month, day) => REST_CODE.to_string(),
        _ => String::new(),
    }
}

/// Totals over the stored day codes. `F` also counts as a worked day.
pub fn compute_totals(days: &BTreeMap<String, String>) -> AttendanceTotals {
    let mut t = AttendanceTotals::default();
    for code in days.values() {
        match code.as_str() {
            "1" => t.trabajo += 1,
            "F" => {
                t.trabajo += 1;
                t.festivos += 1;
            }
            "D" => t.descanso += 1,
            "V" => t.vacaciones += 1,
            "E" => t.enfermedad += 1,
            _ => {}
        }
    }
    t
}

/// Sets the code for a day and refreshes the row totals. Returns the code that
/// was actually stored: clearing a weekend day puts it back to `D`.
pub fn apply_code(row: &mut AttendanceRow, year: i32, month: u32, day: u32, code: &str) -> String {
    let final_code = if code.is_empty() && is_weekend(year, month, day) {
        REST_CODE.to_string()
    } else {
        code.to_string()
    };
    let key = day.to_string();
    if final_code.is_empty() {
        row.days.remove(&key);
    } else {
        row.days.insert(key, final_code.clone());
    }
    row.totals = compute_totals(&row.days);
    final_code
}

/// Stores the trimmed hours text for a day; blank removes it.
pub fn apply_extra_hours(row: &mut AttendanceRow, day: u32, hours: &str) -> String {
    let clean = hours.trim().to_string();
    let key = day.to_string();
    if clean.is_empty() {
        row.extra_hours.remove(&key);
    } else {
        row.extra_hours.insert(key, clean.clone());
    }
    clean
}

/// Sum of typed hours (`2,5` or `2.5`), rounded to cents. Junk entries are skipped.
pub fn sum_extra_hours(map: &BTreeMap<String, String>) -> f64 {
    let total: f64 = map.values().filter_map(|v| format::parse_decimal(v)).sum();
    format::round2(total)
}

// ========================
// Pending changes
// ========================

#[derive(Debug, Clone, PartialEq)]
pub enum AttendanceChange {
    Code { employee_id: String, day: u32, code: String },
    ExtraHours { employee_id: String, day: u32, hours: String },
}

impl AttendanceChange {
    fn key(&self) -> (u8, &str, u32) {
        match self {
            AttendanceChange::Code { employee_id, day, .. } => (0, employee_id, *day),
            AttendanceChange::ExtraHours { employee_id, day, .. } => (1, employee_id, *day),
        }
    }

    pub fn employee_id(&self) -> &str {
        self.key().1
    }

    pub fn day(&self) -> u32 {
        self.key().2
    }
}

/// Unsaved edits, one per (kind, employee, day). A later edit of the same cell
/// replaces the earlier one but keeps its position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PendingChanges {
    changes: Vec<AttendanceChange>,
}

impl PendingChanges {
    pub fn record(&mut self, change: AttendanceChange) {
        match self.changes.iter_mut().find(|c| c.key() == change.key()) {
            Some(slot) => *slot = change,
            None => self.changes.push(change),
        }
    }

    /// Whether the code cell has an unsaved edit.
    pub fn has_code(&self, employee_id: &str, day: u32) -> bool {
        self.changes.iter().any(|c| c.key() == (0, employee_id, day))
    }

    /// Whether the extra-hours cell has an unsaved edit.
    pub fn has_hours(&self, employee_id: &str, day: u32) -> bool {
        self.changes.iter().any(|c| c.key() == (1, employee_id, day))
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AttendanceChange> {
        self.changes.iter()
    }

    pub fn clear(&mut self) {
        self.changes.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Employee;

    fn make_row(days: &[(&str, &str)]) -> AttendanceRow {
        AttendanceRow {
            employee: Employee { id: "1".into(), name: "Ana".into() },
            days: days.iter().map(|(d, c)| (d.to_string(), c.to_string())).collect(),
            extra_hours: BTreeMap::new(),
            totals: AttendanceTotals::default(),
        }
    }

    // June 2024: the 1st is a Saturday, the 3rd a Monday.

    #[test]
    fn test_effective_code_weekend_default() {
        let row = make_row(&[("3", "V")]);
        assert_eq!(effective_code(&row, 2024, 6, 1), "D");
        assert_eq!(effective_code(&row, 2024, 6, 3), "V");
        assert_eq!(effective_code(&row, 2024, 6, 4), "");
        let row = make_row(&[("1", "1")]);
        assert_eq!(effective_code(&row, 2024, 6, 1), "1");
    }

    #[test]
    fn test_apply_code_recomputes_totals() {
        let mut row = make_row(&[("3", "1"), ("4", "F"), ("5", "D")]);
        apply_code(&mut row, 2024, 6, 6, "V");
        assert_eq!(
            row.totals,
            AttendanceTotals { trabajo: 2, descanso: 1, vacaciones: 1, enfermedad: 0, festivos: 1 }
        );
        apply_code(&mut row, 2024, 6, 3, "");
        assert!(!row.days.contains_key("3"));
        assert_eq!(row.totals.trabajo, 1);
    }

    #[test]
    fn test_clearing_weekend_restores_rest_day() {
        let mut row = make_row(&[("1", "1")]);
        let stored = apply_code(&mut row, 2024, 6, 1, "");
        assert_eq!(stored, "D");
        assert_eq!(row.days.get("1").map(String::as_str), Some("D"));
        assert_eq!(row.totals.descanso, 1);
    }

    #[test]
    fn test_extra_hours() {
        let mut row = make_row(&[]);
        apply_extra_hours(&mut row, 3, " 2,5 ");
        apply_extra_hours(&mut row, 4, "1.25");
        apply_extra_hours(&mut row, 5, "x");
        assert_eq!(sum_extra_hours(&row.extra_hours), 3.75);
        apply_extra_hours(&mut row, 3, "  ");
        assert!(!row.extra_hours.contains_key("3"));
    }

    #[test]
    fn test_pending_last_write_wins_in_place() {
        let mut p = PendingChanges::default();
        p.record(AttendanceChange::Code { employee_id: "1".into(), day: 3, code: "1".into() });
        p.record(AttendanceChange::ExtraHours { employee_id: "1".into(), day: 3, hours: "2".into() });
        p.record(AttendanceChange::Code { employee_id: "2".into(), day: 3, code: "V".into() });
        p.record(AttendanceChange::Code { employee_id: "1".into(), day: 3, code: "E".into() });
        assert_eq!(p.len(), 3);
        assert_eq!(
            p.iter().next(),
            Some(&AttendanceChange::Code { employee_id: "1".into(), day: 3, code: "E".into() })
        );
        assert!(p.has_code("2", 3));
        assert!(p.has_hours("1", 3));
        assert!(!p.has_hours("2", 3));
        p.clear();
        assert!(p.is_empty());
    }

    #[test]
    fn test_code_label() {
        assert_eq!(code_label("M"), "M (Incapacidad)");
        assert_eq!(code_label("?"), "—");
    }
}
