// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{NewUser, User};
use crate::storage::Storage;
use crate::utils::pretty_table;
use anyhow::{Context, Result, anyhow};

pub fn handle(store: &mut dyn Storage, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let username = sub.get_one::<String>("username").unwrap().trim().to_string();
            if username.is_empty() {
                return Err(anyhow!("Username must not be empty"));
            }
            let user = store
                .create_user(NewUser { username })
                .context("Create user")?;
            println!("Added user '{}' (id {})", user.username, user.id);
        }
        Some(("show", sub)) => {
            let user = require_user(store, sub.get_one::<String>("username").unwrap())?;
            let messages = store
                .chat_messages_for_user(user.id)
                .context("Load chat history")?;
            println!(
                "{}",
                pretty_table(
                    &["ID", "Username", "Messages"],
                    vec![vec![
                        user.id.to_string(),
                        user.username,
                        messages.len().to_string()
                    ]]
                )
            );
        }
        _ => {}
    }
    Ok(())
}

pub fn require_user(store: &dyn Storage, username: &str) -> Result<User> {
    let username = username.trim();
    store
        .get_user_by_username(username)
        .context("Load user")?
        .ok_or_else(|| anyhow!("User '{}' not found; add it with `finvest user add`", username))
}
