// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::chat::{ChatError, ChatTurn, Completion, GeminiClient, respond};
use crate::commands::users::require_user;
use crate::config::Config;
use crate::models::NewChatMessage;
use crate::storage::Storage;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::{Context, Result};
use std::fs;

pub fn handle(store: &mut dyn Storage, cfg: &Config, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("send", sub)) => {
            let client = GeminiClient::from_config(cfg)?;
            send(store, &client, sub)?;
        }
        Some(("history", sub)) => history(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn load_transcript(path: &str) -> Result<Vec<ChatTurn>> {
    let raw = fs::read_to_string(path).with_context(|| format!("Read transcript {}", path))?;
    serde_json::from_str(&raw).with_context(|| format!("Parse transcript {}", path))
}

/// One assistant exchange. History comes from `--conversation` if given, else
/// from the stored messages of `--user`; new turns are recorded for `--user`.
pub fn send(
    store: &mut dyn Storage,
    provider: &dyn Completion,
    sub: &clap::ArgMatches,
) -> Result<()> {
    let message = sub.get_one::<String>("message").unwrap();
    let user = match sub.get_one::<String>("user") {
        Some(u) => Some(require_user(store, u)?),
        None => None,
    };

    let history = match (sub.get_one::<String>("conversation"), &user) {
        (Some(path), _) => load_transcript(path.trim())?,
        (None, Some(u)) => store
            .chat_messages_for_user(u.id)
            .context("Load chat history")?
            .into_iter()
            .map(|m| ChatTurn::new(m.role, m.content))
            .collect(),
        (None, None) => Vec::new(),
    };

    let exchange = match respond(provider, &history, message) {
        Ok(x) => x,
        Err(e @ ChatError::Timeout { .. }) => {
            return Err(e).context("The assistant took too long to answer; try again in a moment");
        }
        Err(e @ ChatError::Upstream { .. }) => {
            return Err(e).context("The assistant service reported an error");
        }
        Err(e) => return Err(e.into()),
    };

    if let Some(u) = &user {
        let new_turns = exchange.conversation[exchange.conversation.len() - 2..]
            .iter()
            .map(|turn| NewChatMessage {
                user_id: Some(u.id),
                role: turn.role,
                content: turn.content.clone(),
            })
            .collect();
        store
            .create_chat_messages(new_turns)
            .context("Record chat exchange")?;
        log::info!("recorded exchange for user '{}'", u.username);
    }

    if let Some(path) = sub.get_one::<String>("save") {
        fs::write(path.trim(), serde_json::to_string_pretty(&exchange.conversation)?)
            .with_context(|| format!("Write transcript {}", path.trim()))?;
    }

    if !maybe_print_json(sub.get_flag("json"), false, &exchange)? {
        println!("{}", exchange.response);
    }
    Ok(())
}

fn history(store: &dyn Storage, sub: &clap::ArgMatches) -> Result<()> {
    let user = require_user(store, sub.get_one::<String>("user").unwrap())?;
    let messages = store
        .chat_messages_for_user(user.id)
        .context("Load chat history")?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &messages)? {
        return Ok(());
    }
    let rows = messages
        .into_iter()
        .map(|m| {
            vec![
                m.timestamp.format("%Y-%m-%d %H:%M").to_string(),
                m.role.to_string(),
                m.content,
            ]
        })
        .collect();
    println!("{}", pretty_table(&["When", "Role", "Message"], rows));
    Ok(())
}
