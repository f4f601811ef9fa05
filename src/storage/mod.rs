// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Repository for users, chat transcripts, fund listings and glossary terms.
//!
//! Callers receive a `Storage` by injection; nothing here is process-global.

use crate::models::{
    ChatMessage, GlossaryTerm, MutualFund, NewChatMessage, NewGlossaryTerm, NewMutualFund,
    NewUser, User,
};
use thiserror::Error;

pub mod memory;
pub mod seed;
pub mod sqlite;

pub use memory::MemStorage;
pub use sqlite::SqliteStorage;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("sqlite: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("corrupt row: {0}")]
    Corrupt(String),
    #[error("user {0} does not exist")]
    UnknownUser(i64),
}

pub type StorageResult<T> = Result<T, StorageError>;

pub trait Storage {
    fn get_user(&self, id: i64) -> StorageResult<Option<User>>;
    fn get_user_by_username(&self, username: &str) -> StorageResult<Option<User>>;
    fn create_user(&mut self, user: NewUser) -> StorageResult<User>;

    fn chat_messages_for_user(&self, user_id: i64) -> StorageResult<Vec<ChatMessage>>;
    /// Records every message or none of them. Fails with `UnknownUser` if a
    /// message names a user that is not stored.
    fn create_chat_messages(
        &mut self,
        messages: Vec<NewChatMessage>,
    ) -> StorageResult<Vec<ChatMessage>>;

    fn create_chat_message(&mut self, message: NewChatMessage) -> StorageResult<ChatMessage> {
        self.create_chat_messages(vec![message])?
            .pop()
            .ok_or_else(|| StorageError::Corrupt("chat message was not recorded".into()))
    }

    fn list_funds(&self) -> StorageResult<Vec<MutualFund>>;
    fn get_fund(&self, id: i64) -> StorageResult<Option<MutualFund>>;
    fn funds_by_category(&self, category: &str) -> StorageResult<Vec<MutualFund>>;
    fn create_fund(&mut self, fund: NewMutualFund) -> StorageResult<MutualFund>;

    fn list_glossary_terms(&self) -> StorageResult<Vec<GlossaryTerm>>;
    /// Case-insensitive exact match on the term.
    fn glossary_term(&self, term: &str) -> StorageResult<Option<GlossaryTerm>>;
    fn create_glossary_term(&mut self, term: NewGlossaryTerm) -> StorageResult<GlossaryTerm>;

    fn get_setting(&self, key: &str) -> StorageResult<Option<String>>;
    fn set_setting(&mut self, key: &str, value: &str) -> StorageResult<()>;
}
