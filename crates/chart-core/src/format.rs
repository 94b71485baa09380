// File: crates/chart-core/src/format.rs
// Summary: Number formatting for tick/tooltip labels and KPI value formatting.

use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;

/// Extra digits rendered before rounding; enough to decide ties on the exact binary value.
const GUARD_DIGITS: usize = 30;

/// Magnitude from which `to_fixed` switches to exponential output.
const FIXED_LIMIT: f64 = 1e21;

/// Fixed-point formatting with `Number.prototype.toFixed` semantics:
/// ties round away from zero, decided on the exact binary value.
/// Magnitudes of `1e21` and above print in shortest exponential form (`1.5e+21`).
pub fn to_fixed(value: f64, digits: usize) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity".into() } else { "-Infinity".into() };
    }
    if value.abs() >= FIXED_LIMIT {
        return format!("{value:e}").replacen('e', "e+", 1);
    }
    let wide = format!("{:.*}", digits + GUARD_DIGITS, value.abs());
    let (kept, dropped) = wide.split_at(wide.len() - GUARD_DIGITS);
    let kept = kept.strip_suffix('.').unwrap_or(kept);
    let round_up = dropped.as_bytes().first().is_some_and(|d| *d >= b'5');

    let mut out = if round_up { increment_decimal(kept) } else { kept.to_string() };
    if value < 0.0 {
        out.insert(0, '-');
    }
    out
}

/// Add one unit in the last place of a plain decimal string ("9.99" -> "10.00").
fn increment_decimal(s: &str) -> String {
    let mut bytes = s.as_bytes().to_vec();
    let mut i = bytes.len();
    while i > 0 {
        i -= 1;
        match bytes[i] {
            b'.' => continue,
            b'9' => bytes[i] = b'0',
            d => {
                bytes[i] = d + 1;
                return String::from_utf8_lossy(&bytes).into_owned();
            }
        }
    }
    let mut out = String::with_capacity(bytes.len() + 1);
    out.push('1');
    out.push_str(&String::from_utf8_lossy(&bytes));
    out
}

/// Axis/tooltip label: thousands abbreviate to one decimal with a `k` suffix,
/// everything else uses `decimals` fixed digits.
pub fn format_number(value: f64, decimals: usize) -> String {
    if value >= 1000.0 {
        return format!("{}k", to_fixed(value / 1000.0, 1));
    }
    to_fixed(value, decimals)
}

/// Shortest round-trip representation, used for SVG coordinates.
pub fn format_coord(value: f64) -> String {
    if value == 0.0 {
        // avoid "-0"
        return "0".to_string();
    }
    format!("{value}")
}

/// A KPI value as delivered by the dashboard API: a number or a string.
#[derive(Clone, Debug, PartialEq)]
pub enum KpiValue<'a> {
    Number(f64),
    Text(&'a str),
}

impl<'a> From<f64> for KpiValue<'a> {
    fn from(v: f64) -> Self { KpiValue::Number(v) }
}

impl<'a> From<&'a str> for KpiValue<'a> {
    fn from(v: &'a str) -> Self { KpiValue::Text(v) }
}

/// Format a KPI card value: ratios become percentages, durations become `"Nd Nh"`,
/// ISO timestamps become dates, other numbers get thousands grouping.
pub fn format_kpi_value<'a>(value: impl Into<KpiValue<'a>>) -> String {
    match value.into() {
        KpiValue::Number(v) if (0.0..=1.0).contains(&v) => format!("{}%", to_fixed(v * 100.0, 1)),
        KpiValue::Number(v) => group_thousands(v),
        KpiValue::Text(s) => format_kpi_text(s),
    }
}

fn iso_duration_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^P(?:(\d+)D)?(?:T(?:(\d+)H)?(?:(\d+)M)?(?:(\d+(?:\.\d+)?)S)?)?$").expect("valid regex")
    })
}

fn timedelta_days_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d+)\s+days?\s+(\d+):(\d+):(\d+(?:\.\d+)?)$").expect("valid regex"))
}

fn timedelta_bare_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d+)\s+(\d+):(\d+):(\d+(?:\.\d+)?)$").expect("valid regex"))
}

fn iso_datetime_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}(?:\.\d+)?Z$").expect("valid regex"))
}

fn format_kpi_text(s: &str) -> String {
    if let Some(c) = iso_duration_re().captures(s) {
        let mut parts = Vec::new();
        if let Some(d) = c.get(1) {
            parts.push(format!("{}d", d.as_str()));
        }
        if let Some(h) = c.get(2) {
            parts.push(format!("{}h", h.as_str()));
        }
        return parts.join(" ");
    }

    let timedelta = timedelta_days_re().captures(s).or_else(|| timedelta_bare_re().captures(s));
    if let Some(c) = timedelta {
        let days: u64 = c[1].parse().unwrap_or(0);
        let hours: u64 = c[2].parse().unwrap_or(0);
        let mut parts = Vec::new();
        if days > 0 {
            parts.push(format!("{}d", &c[1]));
        }
        if hours > 0 {
            parts.push(format!("{hours}h"));
        }
        return parts.join(" ");
    }

    if iso_datetime_re().is_match(s) {
        if let Ok(dt) = s.parse::<DateTime<Utc>>() {
            return dt.format("%Y-%m-%d").to_string();
        }
    }

    s.to_string()
}

/// en-US style grouping with at most three fraction digits ("12,345.679").
pub fn group_thousands(value: f64) -> String {
    if !value.is_finite() {
        return to_fixed(value, 0);
    }
    let fixed = to_fixed(value, 3);
    let (sign, body) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed.as_str()),
    };
    let (int_part, frac_part) = body.split_once('.').unwrap_or((body, ""));
    let frac = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if grouped == "0" && frac.is_empty() { "" } else { sign };
    if frac.is_empty() { format!("{sign}{grouped}") } else { format!("{sign}{grouped}.{frac}") }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_number_abbreviates_thousands() {
        assert_eq!(format_number(999.0, 0), "999");
        assert_eq!(format_number(1000.0, 0), "1.0k");
        assert_eq!(format_number(1500.0, 0), "1.5k");
        assert_eq!(format_number(12.34, 1), "12.3");
        assert_eq!(format_number(999.0, 1), "999.0");
        assert_eq!(format_number(-2500.0, 0), "-2500");
    }

    #[test]
    fn to_fixed_rounds_ties_away_from_zero() {
        assert_eq!(to_fixed(0.5, 0), "1");
        assert_eq!(to_fixed(2.5, 0), "3");
        assert_eq!(to_fixed(1.25, 1), "1.3");
        assert_eq!(to_fixed(-1.25, 1), "-1.3");
        // 1.005 is stored slightly below the tie
        assert_eq!(to_fixed(1.005, 2), "1.00");
        assert_eq!(to_fixed(9.96, 1), "10.0");
        assert_eq!(to_fixed(99.5, 0), "100");
    }

    #[test]
    fn to_fixed_keeps_negative_zero_sign_like_ecmascript() {
        assert_eq!(to_fixed(-0.04, 1), "-0.0");
        assert_eq!(to_fixed(0.0, 2), "0.00");
    }

    #[test]
    fn to_fixed_switches_to_exponent_at_1e21() {
        assert_eq!(to_fixed(1e21, 2), "1e+21");
        assert_eq!(to_fixed(-8.6e256, 0), "-8.6e+256");
        assert_eq!(to_fixed(1.5e300, 1), "1.5e+300");
        assert_eq!(to_fixed(9.99e20, 0), "999000000000000000000");
    }

    #[test]
    fn to_fixed_non_finite() {
        assert_eq!(to_fixed(f64::NAN, 1), "NaN");
        assert_eq!(to_fixed(f64::NEG_INFINITY, 1), "-Infinity");
    }

    #[test]
    fn coords_use_shortest_representation() {
        assert_eq!(format_coord(60.0), "60");
        assert_eq!(format_coord(12.5), "12.5");
        assert_eq!(format_coord(-0.0), "0");
    }

    #[test]
    fn kpi_ratios_become_percentages() {
        assert_eq!(format_kpi_value(0.873), "87.3%");
        assert_eq!(format_kpi_value(1.0), "100.0%");
        assert_eq!(format_kpi_value(0.0), "0.0%");
    }

    #[test]
    fn kpi_numbers_are_grouped() {
        assert_eq!(format_kpi_value(1234567.0), "1,234,567");
        assert_eq!(format_kpi_value(1234.5678), "1,234.568");
        assert_eq!(format_kpi_value(-4321.0), "-4,321");
        assert_eq!(format_kpi_value(42.0), "42");
    }

    #[test]
    fn kpi_durations() {
        assert_eq!(format_kpi_value("P1DT2H30M"), "1d 2h");
        assert_eq!(format_kpi_value("PT5H"), "5h");
        assert_eq!(format_kpi_value("21 days 07:51:32.537698930"), "21d 7h");
        assert_eq!(format_kpi_value("8 01:46:17.215038"), "8d 1h");
        assert_eq!(format_kpi_value("0 days 00:10:00"), "");
    }

    #[test]
    fn kpi_datetimes_become_dates() {
        assert_eq!(format_kpi_value("2025-10-30T04:33:30.165861Z"), "2025-10-30");
    }

    #[test]
    fn kpi_other_text_is_verbatim() {
        assert_eq!(format_kpi_value("N/A"), "N/A");
    }
}
