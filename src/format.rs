//! Display formatting for prices, counts and dates.

use chrono::{Datelike, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};

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

/// `$1,234.50`
pub fn currency(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    let whole = rounded.abs().trunc();
    let cents = ((rounded.abs() - whole) * Decimal::ONE_HUNDRED).trunc();
    format!("{}${}.{:0>2}", sign, group_thousands(&whole.to_string()), cents.to_string())
}

pub fn count(value: u64) -> String {
    group_thousands(&value.to_string())
}

/// `M/D/YYYY`
pub fn date(value: NaiveDate) -> String {
    format!("{}/{}/{}", value.month(), value.day(), value.year())
}

pub fn optional_date(value: Option<NaiveDate>) -> String {
    value.map(date).unwrap_or_else(|| "N/A".to_string())
}
