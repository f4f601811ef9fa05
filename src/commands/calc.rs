// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::exporter::write_series_csv;
use crate::engine::{Projection, growth_milestones, project_recurring, project_single};
use crate::format::{format_indian_currency, shorten_magnitude};
use crate::utils::{maybe_print_json, parse_amount, parse_year_list, parse_years, pretty_table};
use anyhow::{Context, Result};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Recurring,
    Single,
}

pub fn handle_sip(sub: &clap::ArgMatches) -> Result<()> {
    run(Mode::Recurring, sub)
}

pub fn handle_lumpsum(sub: &clap::ArgMatches) -> Result<()> {
    run(Mode::Single, sub)
}

/// Parses the shared `--amount/--rate/--years` arguments and projects them.
pub fn projection_from_args(mode: Mode, sub: &clap::ArgMatches) -> Result<Projection> {
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    let rate = parse_amount(sub.get_one::<String>("rate").unwrap())?;
    let years = parse_years(sub.get_one::<String>("years").unwrap())?;
    let projection = match mode {
        Mode::Recurring => project_recurring(amount, rate, years),
        Mode::Single => project_single(amount, rate, years),
    }
    .context("Cannot project these inputs")?;
    log::debug!(
        "{:?} projection: amount={} rate={} years={} value={}",
        mode,
        amount,
        rate,
        years,
        projection.accumulated_value
    );
    Ok(projection)
}

fn run(mode: Mode, sub: &clap::ArgMatches) -> Result<()> {
    let projection = projection_from_args(mode, sub)?;

    if let Some(path) = sub.get_one::<String>("csv") {
        write_series_csv(Path::new(path.trim()), &projection.series)?;
        eprintln!("Wrote yearly series to {}", path.trim());
    }

    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &projection)? {
        return Ok(());
    }
    print_projection(&projection);
    Ok(())
}

pub fn print_projection(p: &Projection) {
    let rows = p
        .series
        .iter()
        .map(|pt| {
            vec![
                pt.year.to_string(),
                format_indian_currency(pt.contributed_to_date),
                format_indian_currency(pt.growth_to_date),
                format_indian_currency(pt.contributed_to_date + pt.growth_to_date),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Year", "Invested", "Est. Returns", "Total Value"], rows)
    );
    println!(
        "Invested {}  |  Est. returns {}  |  Total value {}",
        format_indian_currency(p.total_contributed),
        format_indian_currency(p.growth_amount),
        format_indian_currency(p.accumulated_value)
    );
}

pub fn handle_milestones(sub: &clap::ArgMatches) -> Result<()> {
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    let rate = parse_amount(sub.get_one::<String>("rate").unwrap())?;
    let horizons = parse_year_list(sub.get_one::<String>("years").unwrap())?;
    let milestones =
        growth_milestones(amount, rate, &horizons).context("Cannot project these inputs")?;

    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &milestones)? {
        return Ok(());
    }
    let rows = milestones
        .iter()
        .map(|m| {
            vec![
                format!("{}Y", m.year),
                shorten_magnitude(m.value),
                "█".repeat((m.height_percent / 5) as usize),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Horizon", "Value", ""], rows));

    if let Some(&longest) = horizons.iter().max() {
        let invested = amount * 12.0 * f64::from(longest);
        let final_value = milestones
            .iter()
            .find(|m| m.year == longest)
            .map(|m| m.value)
            .unwrap_or_default();
        println!(
            "Total investment {}  |  Est. returns {}  |  Final value {}",
            shorten_magnitude(invested),
            shorten_magnitude(final_value - invested),
            shorten_magnitude(final_value)
        );
    }
    Ok(())
}
