//! Currency display

use rust_decimal::prelude::*;

pub const CURRENCY: &str = "LKR";

/// Format an amount as `LKR 24,000.00`
///
/// Zero renders as `LKR 0`, matching the booking pages.
pub fn format_currency(amount: Decimal) -> String {
    if amount.is_zero() {
        return format!("{CURRENCY} 0");
    }

    let rounded = amount
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .abs();
    let fixed = format!("{rounded:.2}");
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount.is_sign_negative() { "-" } else { "" };
    format!("{CURRENCY} {sign}{grouped}.{cents}")
}
