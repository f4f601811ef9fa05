// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::GlossaryTerm;
use crate::storage::Storage;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::{Context, Result, anyhow};

pub fn handle(store: &dyn Storage, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => {
            let terms = store.list_glossary_terms().context("Load glossary")?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &terms)? {
                let rows = terms.into_iter().map(|t| vec![t.term, t.definition]).collect();
                println!("{}", pretty_table(&["Term", "Definition"], rows));
            }
        }
        Some(("show", sub)) => {
            let term = lookup(store, sub.get_one::<String>("term").unwrap())?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &term)? {
                println!("{}\n\n{}", term.term, term.definition);
            }
        }
        _ => {}
    }
    Ok(())
}

pub fn lookup(store: &dyn Storage, term: &str) -> Result<GlossaryTerm> {
    let term = term.trim();
    store
        .glossary_term(term)
        .context("Load glossary term")?
        .ok_or_else(|| anyhow!("Glossary term '{}' not found", term))
}
