//! Money and percentage formatting shared by every panel.

/// Whole-dollar amount with thousands separators: `$1,234,567`, `-$950`.
#[must_use]
pub fn format_currency(value: f64) -> String {
    let rounded = value.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    let digits = format!("{:.0}", rounded.abs());
    format!("{sign}${}", group_thousands(&digits))
}

/// Short form for tight cells: `$1.2M`, `$12K`, `$950`.
#[must_use]
pub fn format_compact_currency(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let abs = value.abs();
    if abs >= 1_000_000.0 {
        format!("{sign}${:.1}M", abs / 1_000_000.0)
    } else if abs >= 1_000.0 {
        format!("{sign}${:.0}K", abs / 1_000.0)
    } else {
        format!("{sign}${abs:.0}")
    }
}

/// One-decimal percentage with an explicit sign for gains: `+12.3%`.
#[must_use]
pub fn format_signed_percent(value: f64) -> String {
    // Avoid "-0.0%" for tiny losses that round to zero.
    let value = if value.abs() < 0.05 { 0.0 } else { value };
    if value >= 0.0 {
        format!("+{value:.1}%")
    } else {
        format!("{value:.1}%")
    }
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
