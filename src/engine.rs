// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Compounding projections behind the SIP and lumpsum calculators.
//!
//! Recurring plans compound monthly as an annuity-due (every instalment earns
//! a full month, including the month it is paid in). Single plans compound
//! once a year. The two modes are intentionally not aligned.

use serde::Serialize;
use thiserror::Error;

pub const MONTHS_PER_YEAR: u32 = 12;

/// Longest horizon accepted. The series holds one point per year, so the
/// horizon bounds its allocation.
pub const MAX_DURATION_YEARS: u32 = 100;

/// Horizons shown by the SIP growth chart.
pub const DEFAULT_MILESTONE_YEARS: [u32; 5] = [1, 3, 5, 10, 20];

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("invalid {name}: {reason}")]
    InvalidArgument { name: &'static str, reason: String },
}

/// One chart point. Amounts are rounded to whole currency units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YearPoint {
    pub year: u32,
    pub contributed_to_date: f64,
    pub growth_to_date: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Projection {
    pub total_contributed: f64,
    pub accumulated_value: f64,
    pub growth_amount: f64,
    pub series: Vec<YearPoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Milestone {
    pub year: u32,
    pub value: f64,
    pub height_percent: u32,
}

fn invalid(name: &'static str, reason: impl Into<String>) -> EngineError {
    EngineError::InvalidArgument {
        name,
        reason: reason.into(),
    }
}

fn require_amount(name: &'static str, v: f64) -> Result<(), EngineError> {
    if !v.is_finite() {
        return Err(invalid(name, "must be a finite number"));
    }
    if v <= 0.0 {
        return Err(invalid(name, format!("must be greater than zero, got {}", v)));
    }
    Ok(())
}

fn require_rate(v: f64) -> Result<(), EngineError> {
    if !v.is_finite() {
        return Err(invalid("annual_rate_percent", "must be a finite number"));
    }
    if v < 0.0 {
        return Err(invalid(
            "annual_rate_percent",
            format!("must not be negative, got {}", v),
        ));
    }
    Ok(())
}

fn require_years(years: u32) -> Result<(), EngineError> {
    if years == 0 {
        return Err(invalid("duration_years", "must be at least one year"));
    }
    if years > MAX_DURATION_YEARS {
        return Err(invalid(
            "duration_years",
            format!("must be at most {} years, got {}", MAX_DURATION_YEARS, years),
        ));
    }
    Ok(())
}

fn months_in(years: u32) -> u32 {
    years * MONTHS_PER_YEAR
}

fn require_finite(v: f64) -> Result<f64, EngineError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(invalid("duration_years", "projection overflows"))
    }
}

/// Future value of `periods` monthly instalments, each compounding for its own month too.
fn annuity_due_value(contribution: f64, monthly_rate: f64, periods: u32) -> f64 {
    let n = f64::from(periods);
    if monthly_rate == 0.0 {
        return contribution * n;
    }
    let growth = (1.0 + monthly_rate).powf(n);
    contribution * ((growth - 1.0) / monthly_rate) * (1.0 + monthly_rate)
}

fn monthly_rate(annual_rate_percent: f64) -> f64 {
    annual_rate_percent / f64::from(MONTHS_PER_YEAR) / 100.0
}

/// SIP projection: `contribution` paid every month for `duration_years`.
pub fn project_recurring(
    contribution: f64,
    annual_rate_percent: f64,
    duration_years: u32,
) -> Result<Projection, EngineError> {
    require_amount("contribution", contribution)?;
    require_rate(annual_rate_percent)?;
    require_years(duration_years)?;

    let periods = months_in(duration_years);
    let r = monthly_rate(annual_rate_percent);
    let accumulated_value = require_finite(annuity_due_value(contribution, r, periods))?;
    let total_contributed = contribution * f64::from(periods);

    let mut series = Vec::with_capacity(duration_years as usize + 1);
    series.push(YearPoint {
        year: 0,
        contributed_to_date: 0.0,
        growth_to_date: 0.0,
    });
    for year in 1..=duration_years {
        let p = year * MONTHS_PER_YEAR;
        let year_value = annuity_due_value(contribution, r, p);
        let contributed = contribution * f64::from(p);
        series.push(YearPoint {
            year,
            contributed_to_date: contributed.round(),
            growth_to_date: (year_value - contributed).round(),
        });
    }

    Ok(Projection {
        total_contributed,
        accumulated_value,
        growth_amount: accumulated_value - total_contributed,
        series,
    })
}

/// Lumpsum projection: `principal` invested once, compounded annually.
pub fn project_single(
    principal: f64,
    annual_rate_percent: f64,
    duration_years: u32,
) -> Result<Projection, EngineError> {
    require_amount("principal", principal)?;
    require_rate(annual_rate_percent)?;
    require_years(duration_years)?;

    let factor = 1.0 + annual_rate_percent / 100.0;
    let accumulated_value = require_finite(principal * factor.powf(f64::from(duration_years)))?;

    let series = (0..=duration_years)
        .map(|year| {
            let year_value = principal * factor.powf(f64::from(year));
            YearPoint {
                year,
                contributed_to_date: principal,
                growth_to_date: (year_value - principal).round(),
            }
        })
        .collect();

    Ok(Projection {
        total_contributed: principal,
        accumulated_value,
        growth_amount: accumulated_value - principal,
        series,
    })
}

/// Rounded SIP maturity values at each horizon, with bar heights scaled to the largest.
pub fn growth_milestones(
    contribution: f64,
    annual_rate_percent: f64,
    horizons: &[u32],
) -> Result<Vec<Milestone>, EngineError> {
    require_amount("contribution", contribution)?;
    require_rate(annual_rate_percent)?;

    let r = monthly_rate(annual_rate_percent);
    let mut values = Vec::with_capacity(horizons.len());
    for &year in horizons {
        require_years(year)?;
        let value = require_finite(annuity_due_value(contribution, r, months_in(year)))?;
        values.push((year, value.round()));
    }

    let max_value = values.iter().map(|(_, v)| *v).fold(0.0_f64, f64::max);
    Ok(values
        .into_iter()
        .map(|(year, value)| Milestone {
            year,
            value,
            height_percent: if max_value > 0.0 {
                (value / max_value * 100.0).round() as u32
            } else {
                0
            },
        })
        .collect())
}
