//! Spanish-locale number and date helpers shared by every section.

use chrono::{Datelike, Local, NaiveDate};

pub const WEEKDAYS_ES: [&str; 7] = ["Dom", "Lun", "Mar", "Mié", "Jue", "Vie", "Sáb"];

pub const MONTHS_ES: [&str; 12] = [
    "Enero", "Febrero", "Marzo", "Abril", "Mayo", "Junio",
    "Julio", "Agosto", "Septiembre", "Octubre", "Noviembre", "Diciembre",
];

// ========================
// Dates
// ========================

pub fn pad2(n: u32) -> String {
    format!("{:02}", n)
}

/// `YYYY-MM-DD`
pub fn ymd(year: i32, month: u32, day: u32) -> String {
    format!("{}-{}-{}", year, pad2(month), pad2(day))
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (ny, nm) = if month >= 12 { (year + 1, 1) } else { (year, month + 1) };
    NaiveDate::from_ymd_opt(ny, nm, 1)
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(30)
}

fn date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
}

pub fn weekday_label(year: i32, month: u32, day: u32) -> &'static str {
    date(year, month, day)
        .map(|d| WEEKDAYS_ES[d.weekday().num_days_from_sunday() as usize])
        .unwrap_or("")
}

pub fn is_weekend(year: i32, month: u32, day: u32) -> bool {
    date(year, month, day)
        .map(|d| matches!(d.weekday().num_days_from_sunday(), 0 | 6))
        .unwrap_or(false)
}

pub fn month_label(month: u32) -> &'static str {
    MONTHS_ES.get(month.wrapping_sub(1) as usize).copied().unwrap_or("")
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn today_ymd() -> String {
    today().format("%Y-%m-%d").to_string()
}

/// Current (year, month).
pub fn current_period() -> (i32, u32) {
    let t = today();
    (t.year(), t.month())
}

/// `YYYY-MM-DD` check, strict on shape and calendar validity.
pub fn is_ymd(value: &str) -> bool {
    let b = value.as_bytes();
    b.len() == 10
        && b[4] == b'-'
        && b[7] == b'-'
        && NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
}

/// Parses both `dd/mm/yyyy` (what the backend returns) and `yyyy-mm-dd`.
pub fn parse_fecha(value: &str) -> Option<NaiveDate> {
    let s = value.trim();
    if s.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(s, "%d/%m/%Y")
        .or_else(|_| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .ok()
}

/// Display form `dd/mm/yyyy`. Unknown shapes pass through, empty shows a dash.
pub fn format_fecha_es(value: &str) -> String {
    let s = value.trim();
    if s.is_empty() {
        return "—".to_string();
    }
    match NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        Ok(d) if s.len() == 10 => d.format("%d/%m/%Y").to_string(),
        _ => s.to_string(),
    }
}

/// Value for `<input type="date">`, which only accepts `yyyy-mm-dd`.
pub fn fecha_to_input(value: &str) -> String {
    parse_fecha(value)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// RFC 3339 timestamp to local `dd/mm/yyyy HH:MM`.
pub fn format_when(rfc3339: &str) -> String {
    chrono::DateTime::parse_from_rfc3339(rfc3339)
        .map(|dt| dt.with_timezone(&Local).format("%d/%m/%Y %H:%M").to_string())
        .unwrap_or_else(|_| rfc3339.to_string())
}

// ========================
// Numbers
// ========================

/// Decimal input accepting either `,` or `.` as separator.
pub fn parse_decimal(value: &str) -> Option<f64> {
    let s = value.trim().replace(',', ".");
    if s.is_empty() {
        return None;
    }
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Integer input; decimals are truncated.
pub fn parse_int(value: &str) -> Option<i64> {
    parse_decimal(value).map(|v| v.trunc() as i64)
}

/// Money typed the Spanish way: `1.234,56`. Anything unparseable is zero.
pub fn parse_money_es(value: &str) -> f64 {
    let s = value.trim().replace('.', "").replacen(',', ".", 1);
    if s.is_empty() {
        return 0.0;
    }
    s.parse::<f64>().ok().filter(|v| v.is_finite()).unwrap_or(0.0)
}

/// `1234.5` -> `1.234,50`, `-3` -> `-3,00`
pub fn format_money_es(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let fixed = format!("{:.2}", value.abs());
    let (int_part, dec_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    format!("{}{},{}", sign, group_thousands(int_part), dec_part)
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}

/// Two decimals, dot separator.
pub fn format2(value: f64) -> String {
    format!("{:.2}", value)
}

/// Plain number with a Spanish decimal comma, no grouping.
pub fn format_number_es(value: f64) -> String {
    // `+ 0.0` folds a negative zero into zero.
    let rounded = round2(value) + 0.0;
    let s = if rounded.fract() == 0.0 {
        format!("{:.0}", rounded)
    } else {
        format!("{}", rounded)
    };
    s.replace('.', ",")
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2024, 12), 31);
        assert_eq!(days_in_month(2024, 4), 30);
    }

    #[test]
    fn test_weekdays() {
        // 2024-06-01 was a Saturday
        assert_eq!(weekday_label(2024, 6, 1), "Sáb");
        assert_eq!(weekday_label(2024, 6, 3), "Lun");
        assert!(is_weekend(2024, 6, 1));
        assert!(is_weekend(2024, 6, 2));
        assert!(!is_weekend(2024, 6, 3));
    }

    #[test]
    fn test_ymd() {
        assert_eq!(ymd(2024, 3, 7), "2024-03-07");
        assert!(is_ymd("2024-03-07"));
        assert!(!is_ymd("2024-3-7"));
        assert!(!is_ymd("2024-02-30"));
    }

    #[test]
    fn test_fecha_formats() {
        assert_eq!(format_fecha_es("2024-05-09"), "09/05/2024");
        assert_eq!(format_fecha_es("09/05/2024"), "09/05/2024");
        assert_eq!(format_fecha_es(""), "—");
        assert_eq!(fecha_to_input("09/05/2024"), "2024-05-09");
        assert_eq!(fecha_to_input("2024-05-09"), "2024-05-09");
        assert_eq!(fecha_to_input("mañana"), "");
        assert_eq!(parse_fecha("31/12/2023"), NaiveDate::from_ymd_opt(2023, 12, 31));
        assert_eq!(parse_fecha("31-12-2023"), None);
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_decimal("2,5"), Some(2.5));
        assert_eq!(parse_decimal(" 3.25 "), Some(3.25));
        assert_eq!(parse_decimal(""), None);
        assert_eq!(parse_decimal("abc"), None);
        assert_eq!(parse_int("7,9"), Some(7));
    }

    #[test]
    fn test_money_es() {
        assert_eq!(parse_money_es("1.234,56"), 1234.56);
        assert_eq!(parse_money_es("12"), 12.0);
        assert_eq!(parse_money_es(""), 0.0);
        assert_eq!(parse_money_es("x"), 0.0);
        assert_eq!(format_money_es(1234.5), "1.234,50");
        assert_eq!(format_money_es(-3.0), "-3,00");
        assert_eq!(format_money_es(1234567.891), "1.234.567,89");
        assert_eq!(format_money_es(0.0), "0,00");
    }

    #[test]
    fn test_format_number_es() {
        assert_eq!(format_number_es(2.5), "2,5");
        assert_eq!(format_number_es(3.0), "3");
        assert_eq!(format_number_es(1.005 + 0.001), "1,01");
        assert_eq!(format2(3.0), "3.00");
    }

    #[test]
    fn test_format_number_es_large_and_negative_zero() {
        assert_eq!(format_number_es(1e20), "100000000000000000000");
        assert_eq!(format_number_es(-12.0), "-12");
        assert_eq!(format_number_es(-0.001), "0");
    }
}
