//! Formatting utilities for metric display.

/// Format a signed pnl with an explicit sign, thousands separators, and
/// two decimal places (`+1,234.50`).
#[must_use]
pub fn format_pnl(value: f64) -> String {
    let sign = if value >= 0.0 { "+" } else { "-" };
    let abs = format!("{:.2}", value.abs());
    let (int_part, frac_part) = abs.split_once('.').unwrap_or((&abs, "00"));
    format!("{sign}{}.{frac_part}", group_thousands(int_part))
}

/// Format a fraction as a signed percentage with two decimal places
/// (`0.1523` becomes `+15.23%`).
#[must_use]
pub fn format_percent(value: f64) -> String {
    let sign = if value >= 0.0 { "+" } else { "" };
    format!("{sign}{:.2}%", value * 100.0)
}

fn group_thousands(digits: &str) -> String {
    let bytes = digits.as_bytes();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, b) in bytes.iter().enumerate() {
        if i > 0 && (bytes.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(char::from(*b));
    }
    out
}
