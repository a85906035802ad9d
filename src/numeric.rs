//! Brazilian-locale number handling.
//!
//! The read path turns cell content into display text ("1234,56", "50,00%")
//! and the merge path turns that display text back into numbers.
use crate::excel::sheet::Cell;
use regex::Regex;
use std::sync::LazyLock;
static GROUPED_INTEGER: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[-+]?\d{1,3}(\.\d{3})+$").ok());
static INTEGER_LIKE_DECIMAL: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^([-+]?\d+)\.0+$").ok());
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PercentScale {
    /// Source cells hold 0..1 and are multiplied by 100 for display.
    Fraction,
    /// Source cells already hold 0..100.
    Points,
}
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberMode {
    Plain,
    Percent(PercentScale),
}
pub fn to_display(cell: &Cell, mode: NumberMode, blank_zero: bool) -> String {
    if cell.is_blank() {
        return if blank_zero {
            display_value(0.0, mode, true)
        } else {
            String::new()
        };
    }
    match cell {
        Cell::Number(v) | Cell::Date(v) => display_value(*v, mode, false),
        Cell::Text(raw) => text_to_display(raw, mode),
        Cell::Empty => String::new(),
    }
}
pub fn text_to_display(raw: &str, mode: NumberMode) -> String {
    let token = raw.split_whitespace().next().unwrap_or_default();
    let (body, has_percent_sign) = token
        .strip_suffix('%')
        .map_or((token, false), |body| (body, true));
    parse_locale_number(body).map_or_else(
        || token.to_owned(),
        |v| display_value(v, mode, has_percent_sign),
    )
}
fn display_value(v: f64, mode: NumberMode, already_points: bool) -> String {
    match mode {
        NumberMode::Plain => format_locale(v),
        NumberMode::Percent(scale) => {
            let points = if already_points || scale == PercentScale::Points {
                v
            } else {
                v * 100.0
            };
            format!("{}%", format_locale(points))
        }
    }
}
/// Parses "1.234,56", "1234,56", "1.234" and "1234.5".
pub fn parse_locale_number(token: &str) -> Option<f64> {
    let t = token.trim();
    if t.is_empty() {
        return None;
    }
    let normalized = if t.contains(',') {
        t.replace('.', "").replace(',', ".")
    } else if matches_pattern(&GROUPED_INTEGER, t) {
        t.replace('.', "")
    } else {
        t.to_owned()
    };
    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}
/// Two decimals with a comma decimal mark.
pub fn format_locale(v: f64) -> String {
    let rounded = (v * 100.0).round() / 100.0 + 0.0;
    format!("{rounded:.2}").replace('.', ",")
}
pub fn format_number(v: f64) -> String {
    if !v.is_finite() {
        return v.to_string();
    }
    if v.fract().abs() < f64::EPSILON && v.abs() < 1e15 {
        format!("{:.0}", v + 0.0)
    } else {
        format!("{v}")
    }
}
/// "123.0" becomes "123"; anything else is left to the caller.
pub fn integer_text(s: &str) -> Option<String> {
    let re = INTEGER_LIKE_DECIMAL.as_ref()?;
    let caps = re.captures(s.trim())?;
    caps.get(1).map(|m| m.as_str().to_owned())
}
/// Integer code text from a number cell or from the first token of a text cell.
pub fn code_text(cell: &Cell) -> String {
    match cell {
        Cell::Number(v) | Cell::Date(v) => {
            round_f64_to_i64(v.trunc()).map_or_else(|| format_number(*v), |n| n.to_string())
        }
        Cell::Text(raw) => {
            let token = raw.split_whitespace().next().unwrap_or_default();
            token
                .replace(',', ".")
                .parse::<f64>()
                .ok()
                .and_then(|v| round_f64_to_i64(v.trunc()))
                .map_or_else(|| token.to_owned(), |n| n.to_string())
        }
        Cell::Empty => String::new(),
    }
}
pub fn display_to_f64(s: &str) -> f64 {
    let cleaned: String = s
        .chars()
        .filter(|c| !matches!(c, '.' | '%') && !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    if cleaned.is_empty() {
        return 0.0;
    }
    match cleaned.parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        Ok(_) | Err(_) => {
            tracing::debug!(value = s, "valor numérico inválido, gravando 0");
            0.0
        }
    }
}
pub fn display_to_i64(s: &str) -> i64 {
    round_f64_to_i64(display_to_f64(s)).unwrap_or(0)
}
#[allow(
    clippy::cast_precision_loss,
    clippy::as_conversions,
    reason = "stored integers stay far below 2^53"
)]
pub const fn int_to_f64(v: i64) -> f64 {
    v as f64
}
/// Percentage display text ("12,34%") to a stored fraction (0.1234).
pub fn display_to_fraction(s: &str) -> f64 {
    display_to_f64(s) / 100.0
}
#[allow(
    clippy::cast_possible_truncation,
    clippy::as_conversions,
    reason = "range is checked before the cast"
)]
pub fn round_f64_to_i64(v: f64) -> Option<i64> {
    const I64_MIN_F64: f64 = -9_223_372_036_854_775_808.0;
    const I64_MAX_F64: f64 = 9_223_372_036_854_774_784.0;
    if !v.is_finite() {
        return None;
    }
    let rounded = v.round();
    if !(I64_MIN_F64..=I64_MAX_F64).contains(&rounded) {
        return None;
    }
    Some(rounded as i64)
}
fn matches_pattern(re: &LazyLock<Option<Regex>>, s: &str) -> bool {
    re.as_ref().is_some_and(|re| re.is_match(s))
}
