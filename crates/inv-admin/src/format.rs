//! Display formatting for money and shares.

use rust_decimal::{Decimal, RoundingStrategy};

/// Format an amount as Vietnamese đồng: whole units, `.` thousands
/// separator, ` ₫` suffix.
///
/// ```
/// use inv_admin::format::format_currency;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_currency(Decimal::from(50000)), "50.000 ₫");
/// ```
pub fn format_currency(amount: Decimal) -> String {
    let rounded = amount
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let digits = rounded.abs().to_string();
    format!("{sign}{} ₫", group_thousands(&digits))
}

/// Format a 0-100 share with one decimal, e.g. `12.5%`
pub fn format_percentage(value: f64) -> String {
    format!("{value:.1}%")
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    grouped
}
