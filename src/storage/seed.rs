// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{Storage, StorageResult};
use crate::models::{NewGlossaryTerm, NewMutualFund};
use rust_decimal::Decimal;

fn pct(tenths: i64) -> Option<Decimal> {
    Some(Decimal::new(tenths, 1))
}

#[allow(clippy::too_many_arguments)]
fn fund(
    name: &str,
    category: &str,
    risk: &str,
    r1: i64,
    r3: i64,
    r5: i64,
    min_sip: i64,
    description: &str,
) -> NewMutualFund {
    NewMutualFund {
        name: name.into(),
        category: category.into(),
        fund_type: "Equity".into(),
        risk: risk.into(),
        returns_1y: pct(r1),
        returns_3y: pct(r3),
        returns_5y: pct(r5),
        min_sip: Decimal::from(min_sip),
        description: Some(description.into()),
    }
}

pub fn fixture_funds() -> Vec<NewMutualFund> {
    vec![
        fund(
            "Axis Bluechip Fund",
            "Large Cap",
            "Moderate",
            128,
            142,
            151,
            500,
            "A large cap equity fund that invests in blue chip companies with stable growth.",
        ),
        fund(
            "Mirae Asset Emerging Bluechip",
            "Mid Cap",
            "Moderately High",
            153,
            168,
            179,
            1000,
            "A mid cap fund focusing on emerging companies with high growth potential.",
        ),
        fund(
            "Parag Parikh Flexi Cap Fund",
            "Flexi Cap",
            "Moderate",
            141,
            153,
            162,
            1000,
            "A flexible portfolio that invests across large, mid, and small cap companies.",
        ),
        fund(
            "HDFC Index Fund - Nifty 50",
            "Index",
            "Moderate",
            148,
            152,
            160,
            500,
            "Tracks the NIFTY 50 index and mirrors its performance.",
        ),
        fund(
            "Mirae Asset Tax Saver Fund",
            "ELSS",
            "High",
            158,
            167,
            175,
            500,
            "Equity Linked Savings Scheme that offers tax benefits under Section 80C.",
        ),
    ]
}

pub fn fixture_glossary() -> Vec<NewGlossaryTerm> {
    [
        (
            "SIP (Systematic Investment Plan)",
            "A method of investing a fixed amount in mutual funds at regular intervals, typically monthly.",
        ),
        (
            "Mutual Fund",
            "An investment vehicle that pools money from multiple investors to invest in securities like stocks, bonds, etc.",
        ),
        (
            "NAV (Net Asset Value)",
            "The per unit value of a mutual fund, calculated by dividing the total value of all the assets by the number of units.",
        ),
        (
            "ELSS (Equity Linked Savings Scheme)",
            "A type of mutual fund that invests primarily in equities and offers tax benefits under Section 80C of the Income Tax Act.",
        ),
        (
            "Expense Ratio",
            "The annual fee charged by mutual funds to cover operating expenses, expressed as a percentage of the fund's assets.",
        ),
        (
            "Rupee Cost Averaging",
            "An investment strategy where you invest a fixed amount at regular intervals regardless of market price, reducing the impact of volatility.",
        ),
    ]
    .into_iter()
    .map(|(term, definition)| NewGlossaryTerm {
        term: term.into(),
        definition: definition.into(),
    })
    .collect()
}

/// Loads the demo funds and glossary into `store`.
pub fn seed(store: &mut dyn Storage) -> StorageResult<()> {
    let funds = fixture_funds();
    let terms = fixture_glossary();
    log::info!(
        "seeding {} funds and {} glossary terms",
        funds.len(),
        terms.len()
    );
    for f in funds {
        store.create_fund(f)?;
    }
    for t in terms {
        store.create_glossary_term(t)?;
    }
    Ok(())
}
