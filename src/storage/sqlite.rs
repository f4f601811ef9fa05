// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{seed, Storage, StorageError, StorageResult};
use crate::db::init_schema;
use crate::models::{
    ChatMessage, GlossaryTerm, MutualFund, NewChatMessage, NewGlossaryTerm, NewMutualFund,
    NewUser, Role, User,
};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, ErrorCode, OptionalExtension};
use rust_decimal::Decimal;

const FUND_COLUMNS: &str = "id, name, category, type, risk, returns_1y, returns_3y, returns_5y, min_sip, description";

/// Persistent backend over a SQLite connection.
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Creates the schema if needed and seeds fixtures into an empty catalogue.
    pub fn open(conn: Connection) -> StorageResult<Self> {
        init_schema(&conn)?;
        let mut store = Self { conn };
        if store.catalogue_is_empty()? {
            seed::seed(&mut store)?;
        }
        Ok(store)
    }

    pub fn open_in_memory() -> StorageResult<Self> {
        Self::open(Connection::open_in_memory()?)
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    fn catalogue_is_empty(&self) -> StorageResult<bool> {
        let n: i64 = self.conn.query_row(
            "SELECT (SELECT COUNT(*) FROM mutual_funds) + (SELECT COUNT(*) FROM glossary_terms)",
            [],
            |r| r.get(0),
        )?;
        Ok(n == 0)
    }

    fn query_funds(&self, filter: &str, args: &[&dyn rusqlite::ToSql]) -> StorageResult<Vec<MutualFund>> {
        let sql = format!("SELECT {} FROM mutual_funds {} ORDER BY id", FUND_COLUMNS, filter);
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(args, FundRow::from_row)?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row?.into_fund()?);
        }
        Ok(out)
    }
}

fn conflict_or(err: rusqlite::Error, what: impl FnOnce() -> String) -> StorageError {
    match &err {
        rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::ConstraintViolation => {
            StorageError::Conflict(what())
        }
        _ => StorageError::Sqlite(err),
    }
}

fn parse_dec(col: &str, raw: &str) -> StorageResult<Decimal> {
    raw.parse::<Decimal>()
        .map_err(|e| StorageError::Corrupt(format!("{} '{}': {}", col, raw, e)))
}

fn parse_opt_dec(col: &str, raw: Option<String>) -> StorageResult<Option<Decimal>> {
    raw.map(|s| parse_dec(col, &s)).transpose()
}

fn opt_text(d: Option<Decimal>) -> Option<String> {
    d.map(|v| v.to_string())
}

struct FundRow {
    id: i64,
    name: String,
    category: String,
    fund_type: String,
    risk: String,
    returns_1y: Option<String>,
    returns_3y: Option<String>,
    returns_5y: Option<String>,
    min_sip: String,
    description: Option<String>,
}

impl FundRow {
    fn from_row(r: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: r.get(0)?,
            name: r.get(1)?,
            category: r.get(2)?,
            fund_type: r.get(3)?,
            risk: r.get(4)?,
            returns_1y: r.get(5)?,
            returns_3y: r.get(6)?,
            returns_5y: r.get(7)?,
            min_sip: r.get(8)?,
            description: r.get(9)?,
        })
    }

    fn into_fund(self) -> StorageResult<MutualFund> {
        Ok(MutualFund {
            id: self.id,
            name: self.name,
            category: self.category,
            fund_type: self.fund_type,
            risk: self.risk,
            returns_1y: parse_opt_dec("returns_1y", self.returns_1y)?,
            returns_3y: parse_opt_dec("returns_3y", self.returns_3y)?,
            returns_5y: parse_opt_dec("returns_5y", self.returns_5y)?,
            min_sip: parse_dec("min_sip", &self.min_sip)?,
            description: self.description,
        })
    }
}

fn user_from_row(r: &rusqlite::Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: r.get(0)?,
        username: r.get(1)?,
    })
}

fn glossary_from_row(r: &rusqlite::Row<'_>) -> rusqlite::Result<GlossaryTerm> {
    Ok(GlossaryTerm {
        id: r.get(0)?,
        term: r.get(1)?,
        definition: r.get(2)?,
    })
}

impl Storage for SqliteStorage {
    fn get_user(&self, id: i64) -> StorageResult<Option<User>> {
        Ok(self
            .conn
            .query_row(
                "SELECT id, username FROM users WHERE id=?1",
                params![id],
                user_from_row,
            )
            .optional()?)
    }

    fn get_user_by_username(&self, username: &str) -> StorageResult<Option<User>> {
        Ok(self
            .conn
            .query_row(
                "SELECT id, username FROM users WHERE username=?1",
                params![username],
                user_from_row,
            )
            .optional()?)
    }

    fn create_user(&mut self, user: NewUser) -> StorageResult<User> {
        self.conn
            .execute(
                "INSERT INTO users(username) VALUES (?1)",
                params![&user.username],
            )
            .map_err(|e| conflict_or(e, || format!("username '{}' already exists", user.username)))?;
        Ok(User {
            id: self.conn.last_insert_rowid(),
            username: user.username,
        })
    }

    fn chat_messages_for_user(&self, user_id: i64) -> StorageResult<Vec<ChatMessage>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, user_id, role, content, timestamp FROM chat_messages
             WHERE user_id=?1 ORDER BY id",
        )?;
        let rows = stmt.query_map(params![user_id], |r| {
            Ok((
                r.get::<_, i64>(0)?,
                r.get::<_, Option<i64>>(1)?,
                r.get::<_, String>(2)?,
                r.get::<_, String>(3)?,
                r.get::<_, DateTime<Utc>>(4)?,
            ))
        })?;
        let mut out = Vec::new();
        for row in rows {
            let (id, user_id, role, content, timestamp) = row?;
            let role: Role = role.parse().map_err(StorageError::Corrupt)?;
            out.push(ChatMessage {
                id,
                user_id,
                role,
                content,
                timestamp,
            });
        }
        Ok(out)
    }

    fn create_chat_messages(
        &mut self,
        messages: Vec<NewChatMessage>,
    ) -> StorageResult<Vec<ChatMessage>> {
        let tx = self.conn.transaction()?;
        let timestamp = Utc::now();
        let mut out = Vec::with_capacity(messages.len());
        for message in messages {
            if let Some(uid) = message.user_id {
                let known: bool = tx.query_row(
                    "SELECT EXISTS(SELECT 1 FROM users WHERE id=?1)",
                    params![uid],
                    |r| r.get(0),
                )?;
                if !known {
                    return Err(StorageError::UnknownUser(uid));
                }
            }
            tx.execute(
                "INSERT INTO chat_messages(user_id, role, content, timestamp) VALUES (?1, ?2, ?3, ?4)",
                params![
                    message.user_id,
                    message.role.as_str(),
                    &message.content,
                    timestamp
                ],
            )?;
            out.push(ChatMessage {
                id: tx.last_insert_rowid(),
                user_id: message.user_id,
                role: message.role,
                content: message.content,
                timestamp,
            });
        }
        tx.commit()?;
        Ok(out)
    }

    fn list_funds(&self) -> StorageResult<Vec<MutualFund>> {
        self.query_funds("", &[])
    }

    fn get_fund(&self, id: i64) -> StorageResult<Option<MutualFund>> {
        Ok(self.query_funds("WHERE id=?1", &[&id])?.into_iter().next())
    }

    fn funds_by_category(&self, category: &str) -> StorageResult<Vec<MutualFund>> {
        self.query_funds("WHERE category=?1", &[&category])
    }

    fn create_fund(&mut self, fund: NewMutualFund) -> StorageResult<MutualFund> {
        self.conn.execute(
            "INSERT INTO mutual_funds(name, category, type, risk, returns_1y, returns_3y, returns_5y, min_sip, description)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                &fund.name,
                &fund.category,
                &fund.fund_type,
                &fund.risk,
                opt_text(fund.returns_1y),
                opt_text(fund.returns_3y),
                opt_text(fund.returns_5y),
                fund.min_sip.to_string(),
                &fund.description
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        Ok(fund.with_id(id))
    }

    fn list_glossary_terms(&self) -> StorageResult<Vec<GlossaryTerm>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, term, definition FROM glossary_terms ORDER BY id")?;
        let rows = stmt.query_map([], glossary_from_row)?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }

    fn glossary_term(&self, term: &str) -> StorageResult<Option<GlossaryTerm>> {
        // SQLite's lower() only folds ASCII; compare in Rust to match MemStorage.
        let needle = term.to_lowercase();
        Ok(self
            .list_glossary_terms()?
            .into_iter()
            .find(|g| g.term.to_lowercase() == needle))
    }

    fn create_glossary_term(&mut self, term: NewGlossaryTerm) -> StorageResult<GlossaryTerm> {
        self.conn
            .execute(
                "INSERT INTO glossary_terms(term, definition) VALUES (?1, ?2)",
                params![&term.term, &term.definition],
            )
            .map_err(|e| conflict_or(e, || format!("glossary term '{}' already exists", term.term)))?;
        Ok(GlossaryTerm {
            id: self.conn.last_insert_rowid(),
            term: term.term,
            definition: term.definition,
        })
    }

    fn get_setting(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self
            .conn
            .query_row(
                "SELECT value FROM settings WHERE key=?1",
                params![key],
                |r| r.get(0),
            )
            .optional()?)
    }

    fn set_setting(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO settings(key, value) VALUES(?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value=excluded.value",
            params![key, value],
        )?;
        Ok(())
    }
}
