// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{seed, Storage, StorageError, StorageResult};
use crate::models::{
    ChatMessage, GlossaryTerm, MutualFund, NewChatMessage, NewGlossaryTerm, NewMutualFund,
    NewUser, User,
};
use chrono::Utc;
use std::collections::BTreeMap;

/// Monotonic id source owned by a single table. First id is 1.
#[derive(Debug, Default, Clone)]
pub struct IdArena {
    last: i64,
}

impl IdArena {
    pub fn allocate(&mut self) -> i64 {
        self.last += 1;
        self.last
    }

    pub fn last_allocated(&self) -> i64 {
        self.last
    }
}

#[derive(Debug, Clone)]
struct Table<T> {
    ids: IdArena,
    rows: BTreeMap<i64, T>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            ids: IdArena::default(),
            rows: BTreeMap::new(),
        }
    }
}

impl<T: Clone> Table<T> {
    fn insert_with(&mut self, build: impl FnOnce(i64) -> T) -> T {
        let id = self.ids.allocate();
        let row = build(id);
        self.rows.insert(id, row.clone());
        row
    }

    fn contains(&self, id: i64) -> bool {
        self.rows.contains_key(&id)
    }

    fn get(&self, id: i64) -> Option<T> {
        self.rows.get(&id).cloned()
    }

    fn find(&self, pred: impl Fn(&T) -> bool) -> Option<T> {
        self.rows.values().find(|r| pred(r)).cloned()
    }

    fn filter(&self, pred: impl Fn(&T) -> bool) -> Vec<T> {
        self.rows.values().filter(|r| pred(r)).cloned().collect()
    }

    fn all(&self) -> Vec<T> {
        self.rows.values().cloned().collect()
    }
}

/// Volatile backend. Lives as long as the process.
#[derive(Debug, Default, Clone)]
pub struct MemStorage {
    users: Table<User>,
    chat_messages: Table<ChatMessage>,
    funds: Table<MutualFund>,
    glossary: Table<GlossaryTerm>,
    settings: BTreeMap<String, String>,
}

impl MemStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty store loaded with the demo funds and glossary.
    pub fn seeded() -> StorageResult<Self> {
        let mut store = Self::new();
        seed::seed(&mut store)?;
        Ok(store)
    }
}

impl Storage for MemStorage {
    fn get_user(&self, id: i64) -> StorageResult<Option<User>> {
        Ok(self.users.get(id))
    }

    fn get_user_by_username(&self, username: &str) -> StorageResult<Option<User>> {
        Ok(self.users.find(|u| u.username == username))
    }

    fn create_user(&mut self, user: NewUser) -> StorageResult<User> {
        if self.users.find(|u| u.username == user.username).is_some() {
            return Err(StorageError::Conflict(format!(
                "username '{}' already exists",
                user.username
            )));
        }
        Ok(self.users.insert_with(|id| User {
            id,
            username: user.username,
        }))
    }

    fn chat_messages_for_user(&self, user_id: i64) -> StorageResult<Vec<ChatMessage>> {
        Ok(self.chat_messages.filter(|m| m.user_id == Some(user_id)))
    }

    fn create_chat_messages(
        &mut self,
        messages: Vec<NewChatMessage>,
    ) -> StorageResult<Vec<ChatMessage>> {
        if let Some(uid) = messages
            .iter()
            .filter_map(|m| m.user_id)
            .find(|uid| !self.users.contains(*uid))
        {
            return Err(StorageError::UnknownUser(uid));
        }
        let timestamp = Utc::now();
        Ok(messages
            .into_iter()
            .map(|m| {
                self.chat_messages.insert_with(|id| ChatMessage {
                    id,
                    user_id: m.user_id,
                    role: m.role,
                    content: m.content,
                    timestamp,
                })
            })
            .collect())
    }

    fn list_funds(&self) -> StorageResult<Vec<MutualFund>> {
        Ok(self.funds.all())
    }

    fn get_fund(&self, id: i64) -> StorageResult<Option<MutualFund>> {
        Ok(self.funds.get(id))
    }

    fn funds_by_category(&self, category: &str) -> StorageResult<Vec<MutualFund>> {
        Ok(self.funds.filter(|f| f.category == category))
    }

    fn create_fund(&mut self, fund: NewMutualFund) -> StorageResult<MutualFund> {
        Ok(self.funds.insert_with(|id| fund.with_id(id)))
    }

    fn list_glossary_terms(&self) -> StorageResult<Vec<GlossaryTerm>> {
        Ok(self.glossary.all())
    }

    fn glossary_term(&self, term: &str) -> StorageResult<Option<GlossaryTerm>> {
        let needle = term.to_lowercase();
        Ok(self.glossary.find(|g| g.term.to_lowercase() == needle))
    }

    fn create_glossary_term(&mut self, term: NewGlossaryTerm) -> StorageResult<GlossaryTerm> {
        if self.glossary.find(|g| g.term == term.term).is_some() {
            return Err(StorageError::Conflict(format!(
                "glossary term '{}' already exists",
                term.term
            )));
        }
        Ok(self.glossary.insert_with(|id| GlossaryTerm {
            id,
            term: term.term,
            definition: term.definition,
        }))
    }

    fn get_setting(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.settings.get(key).cloned())
    }

    fn set_setting(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.settings.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
