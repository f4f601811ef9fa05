// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::calc::print_projection;
use crate::engine::{Projection, project_recurring};
use crate::format::format_indian_currency;
use crate::models::MutualFund;
use crate::storage::Storage;
use crate::utils::{fmt_percent, maybe_print_json, parse_years, pretty_table};
use anyhow::{Context, Result, anyhow};
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

pub fn handle(store: &dyn Storage, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(store, sub)?,
        Some(("show", sub)) => show(store, sub)?,
        _ => {}
    }
    Ok(())
}

pub fn query_funds(store: &dyn Storage, category: Option<&str>) -> Result<Vec<MutualFund>> {
    let funds = match category.map(str::trim).filter(|c| !c.is_empty()) {
        Some(c) => store
            .funds_by_category(c)
            .with_context(|| format!("Load funds in category '{}'", c))?,
        None => store.list_funds().context("Load funds")?,
    };
    Ok(funds)
}

fn list(store: &dyn Storage, sub: &clap::ArgMatches) -> Result<()> {
    let category = sub.get_one::<String>("category").map(|s| s.as_str());
    let funds = query_funds(store, category)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &funds)? {
        return Ok(());
    }
    let rows = funds
        .into_iter()
        .map(|f| {
            vec![
                f.id.to_string(),
                f.name,
                f.category,
                f.risk,
                fmt_percent(f.returns_1y),
                fmt_percent(f.returns_3y),
                fmt_percent(f.returns_5y),
                format_indian_currency(f.min_sip.to_f64().unwrap_or_default()),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["ID", "Name", "Category", "Risk", "1Y", "3Y", "5Y", "Min SIP"],
            rows
        )
    );
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct FundIllustration {
    pub fund: MutualFund,
    pub years: u32,
    pub projection: Option<Projection>,
}

/// Projects the fund's minimum SIP at its longest recorded return.
pub fn illustrate(fund: MutualFund, years: u32) -> Result<FundIllustration> {
    let projection = match fund.best_known_return() {
        Some(rate) => {
            let rate = rate
                .to_f64()
                .ok_or_else(|| anyhow!("Return {} is out of range", rate))?;
            let amount = fund
                .min_sip
                .to_f64()
                .ok_or_else(|| anyhow!("Minimum SIP {} is out of range", fund.min_sip))?;
            Some(
                project_recurring(amount, rate.max(0.0), years)
                    .with_context(|| format!("Project SIP for '{}'", fund.name))?,
            )
        }
        None => None,
    };
    Ok(FundIllustration {
        fund,
        years,
        projection,
    })
}

fn show(store: &dyn Storage, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let years = parse_years(sub.get_one::<String>("years").unwrap())?;
    let fund = store
        .get_fund(id)
        .context("Load fund")?
        .ok_or_else(|| anyhow!("Mutual fund {} not found", id))?;
    let ill = illustrate(fund, years)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &ill)? {
        return Ok(());
    }

    let f = &ill.fund;
    let rows = vec![
        vec!["Name".into(), f.name.clone()],
        vec!["Category".into(), f.category.clone()],
        vec!["Type".into(), f.fund_type.clone()],
        vec!["Risk".into(), f.risk.clone()],
        vec!["Returns 1Y".into(), fmt_percent(f.returns_1y)],
        vec!["Returns 3Y".into(), fmt_percent(f.returns_3y)],
        vec!["Returns 5Y".into(), fmt_percent(f.returns_5y)],
        vec![
            "Min SIP".into(),
            format_indian_currency(f.min_sip.to_f64().unwrap_or_default()),
        ],
        vec!["About".into(), f.description.clone().unwrap_or_default()],
    ];
    println!("{}", pretty_table(&["Field", "Value"], rows));
    match &ill.projection {
        Some(p) => {
            println!(
                "Minimum SIP for {} years at {} (past returns are not a guarantee):",
                ill.years,
                fmt_percent(f.best_known_return())
            );
            print_projection(p);
        }
        None => println!("No return history recorded; nothing to illustrate."),
    }
    Ok(())
}
