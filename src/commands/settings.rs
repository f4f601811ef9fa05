// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::{Setting, lookup, mask_secret, process_env, store_setting};
use crate::storage::Storage;
use crate::utils::pretty_table;
use anyhow::Result;

pub fn handle(store: &mut dyn Storage, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", _)) => show(store)?,
        Some(("set", sub)) => {
            let setting: Setting = sub.get_one::<String>("key").unwrap().parse()?;
            let value = sub.get_one::<String>("value").unwrap();
            store_setting(store, setting, value)?;
            println!("Set {}", setting.key());
        }
        _ => {}
    }
    Ok(())
}

fn show(store: &dyn Storage) -> Result<()> {
    let mut rows = Vec::new();
    for setting in Setting::ALL {
        let (value, source) = lookup(setting, &process_env, store)?;
        let shown = match value {
            Some(v) if setting.is_secret() => mask_secret(&v),
            Some(v) => v,
            None => "-".into(),
        };
        rows.push(vec![
            setting.key().to_string(),
            shown,
            source.label().to_string(),
            setting.env_var().to_string(),
        ]);
    }
    println!(
        "{}",
        pretty_table(&["Key", "Value", "Source", "Env override"], rows)
    );
    Ok(())
}
