// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use finvest::config::Config;
use finvest::storage::{MemStorage, SqliteStorage, Storage};
use finvest::{cli, commands, db};

fn open_store(kind: &str) -> Result<Box<dyn Storage>> {
    let store: Box<dyn Storage> = match kind {
        "memory" => Box::new(MemStorage::seeded()?),
        _ => Box::new(SqliteStorage::open(db::open_or_init()?)?),
    };
    log::debug!("using {} store", kind);
    Ok(store)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = cli::build_cli();
    let matches = cli.get_matches();
    let kind = matches
        .get_one::<String>("store")
        .map(String::as_str)
        .unwrap_or("sqlite");

    // Calculators are pure and never touch the store.
    match matches.subcommand() {
        Some(("sip", sub)) => return commands::calc::handle_sip(sub),
        Some(("lumpsum", sub)) => return commands::calc::handle_lumpsum(sub),
        Some(("milestones", sub)) => return commands::calc::handle_milestones(sub),
        _ => {}
    }

    let mut store = open_store(kind)?;

    match matches.subcommand() {
        Some(("init", _)) => {
            if kind == "memory" {
                println!("In-memory store seeded (nothing written to disk)");
            } else {
                println!("Database initialized at {}", db::db_path()?.display());
            }
        }
        Some(("health", _)) => {
            let cfg = Config::resolve(&*store)?;
            let h = commands::doctor::health(&*store, &cfg)?;
            println!("{}", serde_json::to_string_pretty(&h)?);
        }
        Some(("doctor", _)) => commands::doctor::handle(&*store)?,
        Some(("funds", sub)) => commands::funds::handle(&*store, sub)?,
        Some(("glossary", sub)) => commands::glossary::handle(&*store, sub)?,
        Some(("user", sub)) => commands::users::handle(&mut *store, sub)?,
        Some(("chat", sub)) => {
            let cfg = Config::resolve(&*store)?;
            commands::chat::handle(&mut *store, &cfg, sub)?
        }
        Some(("config", sub)) => commands::settings::handle(&mut *store, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
