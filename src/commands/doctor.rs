// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::Config;
use crate::storage::Storage;
use crate::utils::pretty_table;
use anyhow::Result;
use serde::Serialize;

/// `(issue, detail)` pairs; empty when everything checks out.
pub fn diagnose(store: &dyn Storage, env: &dyn Fn(&str) -> Option<String>) -> Result<Vec<(String, String)>> {
    let mut rows = Vec::new();

    // 1) Settings that do not resolve
    match Config::resolve_with(env, store) {
        Ok(cfg) if cfg.api_key.is_none() => {
            rows.push(("missing_api_key".into(), "GEMINI_API_KEY".into()));
        }
        Ok(_) => {}
        Err(e) => rows.push(("invalid_setting".into(), format!("{:#}", e))),
    }

    // 2) Empty catalogue
    let funds = store.list_funds()?;
    if funds.is_empty() {
        rows.push(("empty_funds".into(), "no mutual funds stored".into()));
    }
    if store.list_glossary_terms()?.is_empty() {
        rows.push(("empty_glossary".into(), "no glossary terms stored".into()));
    }

    // 3) Funds the SIP illustration cannot use
    for f in funds {
        if f.best_known_return().is_none() {
            rows.push(("fund_without_returns".into(), format!("{} ({})", f.name, f.id)));
        }
        if f.min_sip <= rust_decimal::Decimal::ZERO {
            rows.push(("fund_min_sip_not_positive".into(), format!("{} ({})", f.name, f.id)));
        }
    }
    Ok(rows)
}

pub fn handle(store: &dyn Storage) -> Result<()> {
    let issues = diagnose(store, &crate::config::process_env)?;
    if issues.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        let rows = issues.into_iter().map(|(i, d)| vec![i, d]).collect();
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct Health {
    pub status: &'static str,
    pub funds: usize,
    pub glossary_terms: usize,
    pub assistant_configured: bool,
}

pub fn health(store: &dyn Storage, cfg: &Config) -> Result<Health> {
    Ok(Health {
        status: "healthy",
        funds: store.list_funds()?.len(),
        glossary_terms: store.list_glossary_terms()?.len(),
        assistant_configured: cfg.api_key.is_some(),
    })
}
