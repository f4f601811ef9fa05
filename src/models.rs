// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub username: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "assistant" => Ok(Role::Assistant),
            other => Err(format!("unknown role '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: i64,
    pub user_id: Option<i64>,
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewChatMessage {
    pub user_id: Option<i64>,
    pub role: Role,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MutualFund {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub fund_type: String,
    pub risk: String,
    pub returns_1y: Option<Decimal>, // percent
    pub returns_3y: Option<Decimal>,
    pub returns_5y: Option<Decimal>,
    pub min_sip: Decimal,
    pub description: Option<String>,
}

impl MutualFund {
    /// Longest-horizon return on record: 5Y, then 3Y, then 1Y.
    pub fn best_known_return(&self) -> Option<Decimal> {
        self.returns_5y.or(self.returns_3y).or(self.returns_1y)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMutualFund {
    pub name: String,
    pub category: String,
    pub fund_type: String,
    pub risk: String,
    pub returns_1y: Option<Decimal>,
    pub returns_3y: Option<Decimal>,
    pub returns_5y: Option<Decimal>,
    pub min_sip: Decimal,
    pub description: Option<String>,
}

impl NewMutualFund {
    pub fn with_id(self, id: i64) -> MutualFund {
        MutualFund {
            id,
            name: self.name,
            category: self.category,
            fund_type: self.fund_type,
            risk: self.risk,
            returns_1y: self.returns_1y,
            returns_3y: self.returns_3y,
            returns_5y: self.returns_5y,
            min_sip: self.min_sip,
            description: self.description,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlossaryTerm {
    pub id: i64,
    pub term: String,
    pub definition: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewGlossaryTerm {
    pub term: String,
    pub definition: String,
}
