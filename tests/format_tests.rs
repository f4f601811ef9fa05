// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use finvest::engine::project_recurring;
use finvest::format::{format_indian_currency, shorten_magnitude};

#[test]
fn shorten_magnitude_golden_values() {
    assert_eq!(shorten_magnitude(12_500_000.0), "₹1.3Cr");
    assert_eq!(shorten_magnitude(250_000.0), "₹2.5L");
    assert_eq!(shorten_magnitude(5_000.0), "₹5.0K");
    assert_eq!(shorten_magnitude(500.0), "₹500");
}

#[test]
fn shorten_magnitude_rounds_half_up() {
    assert_eq!(shorten_magnitude(1_250.0), "₹1.3K");
    assert_eq!(shorten_magnitude(1_249.0), "₹1.2K");
    assert_eq!(shorten_magnitude(175_000.0), "₹1.8L");
}

#[test]
fn shorten_magnitude_rounds_the_binary_quotient() {
    // 1450 / 1000 is just below 1.45 in binary.
    assert_eq!(shorten_magnitude(1_450.0), "₹1.4K");
    assert_eq!(shorten_magnitude(1_350.0), "₹1.4K");
}

#[test]
fn huge_amounts_stay_on_the_crore_scale() {
    for amount in [7e28, 1e31, 1e300] {
        let label = shorten_magnitude(amount);
        assert!(label.starts_with("₹") && label.ends_with("Cr"), "{}", label);
    }
    assert!(shorten_magnitude(1e31).starts_with("₹999999999999999983222784"));
}

#[test]
fn shorten_magnitude_labels_a_sip_maturity() {
    let p = project_recurring(5000.0, 12.0, 10).unwrap();
    assert_eq!(shorten_magnitude(p.accumulated_value), "₹11.6L");
    assert_eq!(shorten_magnitude(p.total_contributed), "₹6.0L");
    assert_eq!(shorten_magnitude(p.growth_amount), "₹5.6L");
}

#[test]
fn small_and_negative_amounts_stay_raw() {
    assert_eq!(shorten_magnitude(0.0), "₹0");
    assert_eq!(shorten_magnitude(999.4), "₹999");
    assert_eq!(shorten_magnitude(-5_000.0), "₹-5000");
}

#[test]
fn indian_grouping() {
    assert_eq!(format_indian_currency(1_161_695.38), "₹11,61,695");
    assert_eq!(format_indian_currency(600_000.0), "₹6,00,000");
    assert_eq!(format_indian_currency(12_500_000.0), "₹1,25,00,000");
    assert_eq!(format_indian_currency(999.5), "₹1,000");
    assert_eq!(format_indian_currency(42.0), "₹42");
    assert_eq!(format_indian_currency(-61_051.0), "-₹61,051");
}
