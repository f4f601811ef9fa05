// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::{Decimal, RoundingStrategy};

pub const RUPEE: &str = "₹";

const CRORE: f64 = 10_000_000.0;
const LAKH: f64 = 100_000.0;
const THOUSAND: f64 = 1_000.0;

/// Short chart label: crore, lakh and thousand scales with one decimal.
///
/// The scaled value is the f64 quotient, rounded half-up on its exact binary
/// value: 1250 reads "1.3K" but 1450 reads "1.4K" since 1.45 is stored as
/// 1.4499999999999999556.
pub fn shorten_magnitude(amount: f64) -> String {
    if !amount.is_finite() {
        return format!("{}{}", RUPEE, amount);
    }
    if amount >= CRORE {
        format!("{}{}Cr", RUPEE, one_decimal(amount / CRORE))
    } else if amount >= LAKH {
        format!("{}{}L", RUPEE, one_decimal(amount / LAKH))
    } else if amount >= THOUSAND {
        format!("{}{}K", RUPEE, one_decimal(amount / THOUSAND))
    } else {
        format!("{}{}", RUPEE, amount.round() as i64)
    }
}

fn one_decimal(v: f64) -> String {
    match Decimal::from_f64_retain(v) {
        Some(d) => format!(
            "{:.1}",
            d.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
        ),
        // Beyond Decimal's range a tie at one decimal cannot occur.
        None => format!("{:.1}", v),
    }
}

/// Whole-rupee amount with Indian digit grouping, e.g. `₹11,61,695`.
pub fn format_indian_currency(amount: f64) -> String {
    if !amount.is_finite() {
        return format!("{}{}", RUPEE, amount);
    }
    let whole = amount.round() as i64;
    let sign = if whole < 0 { "-" } else { "" };
    format!("{}{}{}", sign, RUPEE, group_indian(&whole.unsigned_abs().to_string()))
}

fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}
