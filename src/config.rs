// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Runtime settings. Each key resolves from the environment first, then the
//! persisted `settings` table, then a built-in default.

use crate::storage::Storage;
use anyhow::{anyhow, Context, Result};
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Setting {
    ApiKey,
    Model,
    BaseUrl,
    ChatTimeoutSecs,
}

impl Setting {
    pub const ALL: [Setting; 4] = [
        Setting::ApiKey,
        Setting::Model,
        Setting::BaseUrl,
        Setting::ChatTimeoutSecs,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Setting::ApiKey => "gemini_api_key",
            Setting::Model => "gemini_model",
            Setting::BaseUrl => "gemini_base_url",
            Setting::ChatTimeoutSecs => "chat_timeout_secs",
        }
    }

    pub fn env_var(&self) -> &'static str {
        match self {
            Setting::ApiKey => "GEMINI_API_KEY",
            Setting::Model => "FINVEST_GEMINI_MODEL",
            Setting::BaseUrl => "FINVEST_GEMINI_BASE_URL",
            Setting::ChatTimeoutSecs => "FINVEST_CHAT_TIMEOUT_SECS",
        }
    }

    pub fn default_value(&self) -> Option<&'static str> {
        match self {
            Setting::ApiKey => None,
            Setting::Model => Some("gemini-1.5-pro"),
            Setting::BaseUrl => Some("https://generativelanguage.googleapis.com"),
            Setting::ChatTimeoutSecs => Some("30"),
        }
    }

    pub fn is_secret(&self) -> bool {
        matches!(self, Setting::ApiKey)
    }
}

impl FromStr for Setting {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Setting::ALL
            .into_iter()
            .find(|k| k.key() == s.trim())
            .ok_or_else(|| {
                let known: Vec<&str> = Setting::ALL.iter().map(|k| k.key()).collect();
                anyhow!("Unknown setting '{}' (known: {})", s, known.join(", "))
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Env,
    Stored,
    Default,
    Unset,
}

impl Source {
    pub fn label(&self) -> &'static str {
        match self {
            Source::Env => "env",
            Source::Stored => "settings",
            Source::Default => "default",
            Source::Unset => "unset",
        }
    }
}

/// Looks a setting up through env, store, default. Returns the value and where it came from.
pub fn lookup(
    setting: Setting,
    env: &dyn Fn(&str) -> Option<String>,
    store: &dyn Storage,
) -> Result<(Option<String>, Source)> {
    if let Some(v) = env(setting.env_var()).filter(|v| !v.trim().is_empty()) {
        return Ok((Some(v.trim().to_string()), Source::Env));
    }
    if let Some(v) = store
        .get_setting(setting.key())
        .with_context(|| format!("Read setting '{}'", setting.key()))?
    {
        return Ok((Some(v), Source::Stored));
    }
    Ok(match setting.default_value() {
        Some(d) => (Some(d.to_string()), Source::Default),
        None => (None, Source::Unset),
    })
}

pub fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

fn parse_timeout(raw: &str) -> Result<Duration> {
    let secs: u64 = raw
        .trim()
        .parse()
        .with_context(|| format!("Invalid chat timeout '{}', expected whole seconds", raw))?;
    if secs == 0 {
        return Err(anyhow!("Chat timeout must be at least one second"));
    }
    Ok(Duration::from_secs(secs))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub chat_timeout: Duration,
}

impl Config {
    pub fn resolve(store: &dyn Storage) -> Result<Self> {
        Self::resolve_with(&process_env, store)
    }

    pub fn resolve_with(env: &dyn Fn(&str) -> Option<String>, store: &dyn Storage) -> Result<Self> {
        let get = |s: Setting| -> Result<Option<String>> { Ok(lookup(s, env, store)?.0) };
        let model = get(Setting::Model)?.unwrap_or_default();
        let base_url = get(Setting::BaseUrl)?
            .unwrap_or_default()
            .trim_end_matches('/')
            .to_string();
        let timeout_raw = get(Setting::ChatTimeoutSecs)?.unwrap_or_else(|| "30".into());
        Ok(Self {
            api_key: get(Setting::ApiKey)?,
            model,
            base_url,
            chat_timeout: parse_timeout(&timeout_raw)?,
        })
    }
}

/// Validates and persists a setting.
pub fn store_setting(store: &mut dyn Storage, setting: Setting, value: &str) -> Result<()> {
    let value = value.trim();
    if setting == Setting::ChatTimeoutSecs {
        parse_timeout(value)?;
    }
    store
        .set_setting(setting.key(), value)
        .with_context(|| format!("Write setting '{}'", setting.key()))?;
    log::info!("setting '{}' updated", setting.key());
    Ok(())
}

pub fn mask_secret(v: &str) -> String {
    let n = v.chars().count();
    if n <= 4 {
        "****".to_string()
    } else {
        let tail: String = v.chars().skip(n - 4).collect();
        format!("****{}", tail)
    }
}
