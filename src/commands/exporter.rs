// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::YearPoint;
use anyhow::{Context, Result};
use std::path::Path;

/// Writes one row per year: `year,invested,returns,total`.
pub fn write_series_csv(path: &Path, series: &[YearPoint]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("Create CSV at {}", path.display()))?;
    wtr.write_record(["year", "invested", "returns", "total"])?;
    for pt in series {
        wtr.write_record([
            pt.year.to_string(),
            format!("{:.0}", pt.contributed_to_date),
            format!("{:.0}", pt.growth_to_date),
            format!("{:.0}", pt.contributed_to_date + pt.growth_to_date),
        ])?;
    }
    wtr.flush()?;
    log::info!("exported {} series rows to {}", series.len(), path.display());
    Ok(())
}
