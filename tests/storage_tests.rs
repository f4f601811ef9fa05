// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use finvest::models::{NewChatMessage, NewGlossaryTerm, NewMutualFund, NewUser, Role};
use finvest::storage::{MemStorage, SqliteStorage, Storage, StorageError};
use rust_decimal::Decimal;

fn backends() -> Vec<(&'static str, Box<dyn Storage>)> {
    vec![
        ("memory", Box::new(MemStorage::seeded().unwrap())),
        ("sqlite", Box::new(SqliteStorage::open_in_memory().unwrap())),
    ]
}

#[test]
fn backends_agree_on_seeded_catalogue() {
    let mem = MemStorage::seeded().unwrap();
    let sql = SqliteStorage::open_in_memory().unwrap();
    assert_eq!(mem.list_funds().unwrap(), sql.list_funds().unwrap());
    assert_eq!(
        mem.list_glossary_terms().unwrap(),
        sql.list_glossary_terms().unwrap()
    );

    let funds = sql.list_funds().unwrap();
    assert_eq!(funds.len(), 5);
    assert_eq!(funds[0].name, "Axis Bluechip Fund");
    assert_eq!(funds[0].returns_5y, Some(Decimal::new(151, 1)));
    assert_eq!(funds[0].min_sip, Decimal::from(500));
}

#[test]
fn fund_lookups() {
    for (name, store) in backends() {
        let elss = store.funds_by_category("ELSS").unwrap();
        assert_eq!(elss.len(), 1, "{}", name);
        assert_eq!(elss[0].name, "Mirae Asset Tax Saver Fund");
        assert!(store.funds_by_category("Debt").unwrap().is_empty());

        let second = store.get_fund(2).unwrap().unwrap();
        assert_eq!(second.category, "Mid Cap");
        assert!(store.get_fund(99).unwrap().is_none(), "{}", name);
    }
}

#[test]
fn glossary_lookup_ignores_case() {
    for (name, store) in backends() {
        let t = store.glossary_term("expense ratio").unwrap();
        assert_eq!(t.map(|t| t.term), Some("Expense Ratio".to_string()), "{}", name);
        assert!(store.glossary_term("Expense").unwrap().is_none());
    }
}

#[test]
fn ids_are_allocated_in_order_per_table() {
    for (name, mut store) in backends() {
        let a = store
            .create_user(NewUser {
                username: "asha".into(),
            })
            .unwrap();
        let b = store
            .create_user(NewUser {
                username: "ravi".into(),
            })
            .unwrap();
        assert_eq!((a.id, b.id), (1, 2), "{}", name);

        let fund = store
            .create_fund(NewMutualFund {
                name: "Corporate Bond Fund".into(),
                category: "Debt".into(),
                fund_type: "Debt".into(),
                risk: "Low".into(),
                returns_1y: Some(Decimal::new(72, 1)),
                returns_3y: None,
                returns_5y: None,
                min_sip: Decimal::from(1000),
                description: None,
            })
            .unwrap();
        assert_eq!(fund.id, 6, "{}", name);
        assert_eq!(store.get_fund(6).unwrap(), Some(fund));
        assert_eq!(store.get_user(2).unwrap(), Some(b));
    }
}

#[test]
fn duplicates_are_conflicts() {
    for (name, mut store) in backends() {
        store
            .create_user(NewUser {
                username: "asha".into(),
            })
            .unwrap();
        let err = store
            .create_user(NewUser {
                username: "asha".into(),
            })
            .unwrap_err();
        assert!(matches!(err, StorageError::Conflict(_)), "{}: {:?}", name, err);

        let err = store
            .create_glossary_term(NewGlossaryTerm {
                term: "Mutual Fund".into(),
                definition: "again".into(),
            })
            .unwrap_err();
        assert!(matches!(err, StorageError::Conflict(_)), "{}: {:?}", name, err);
    }
}

#[test]
fn chat_messages_are_kept_per_user_in_order() {
    for (name, mut store) in backends() {
        let u = store
            .create_user(NewUser {
                username: "asha".into(),
            })
            .unwrap();
        let other = store
            .create_user(NewUser {
                username: "ravi".into(),
            })
            .unwrap();
        for (uid, role, content) in [
            (u.id, Role::User, "What is an SIP?"),
            (other.id, Role::User, "Hello"),
            (u.id, Role::Assistant, "A monthly investment plan."),
        ] {
            store
                .create_chat_message(NewChatMessage {
                    user_id: Some(uid),
                    role,
                    content: content.into(),
                })
                .unwrap();
        }
        let msgs = store.chat_messages_for_user(u.id).unwrap();
        let got: Vec<(Role, &str)> = msgs.iter().map(|m| (m.role, m.content.as_str())).collect();
        assert_eq!(
            got,
            vec![
                (Role::User, "What is an SIP?"),
                (Role::Assistant, "A monthly investment plan.")
            ],
            "{}",
            name
        );
        assert!(msgs[0].timestamp <= msgs[1].timestamp);
        assert!(msgs[0].id < msgs[1].id);
    }
}

#[test]
fn messages_for_unknown_users_are_refused() {
    for (name, mut store) in backends() {
        let err = store
            .create_chat_message(NewChatMessage {
                user_id: Some(42),
                role: Role::User,
                content: "hello".into(),
            })
            .unwrap_err();
        assert!(matches!(err, StorageError::UnknownUser(42)), "{}: {:?}", name, err);
    }
}

#[test]
fn an_exchange_is_recorded_whole_or_not_at_all() {
    for (name, mut store) in backends() {
        let u = store
            .create_user(NewUser {
                username: "asha".into(),
            })
            .unwrap();
        let err = store
            .create_chat_messages(vec![
                NewChatMessage {
                    user_id: Some(u.id),
                    role: Role::User,
                    content: "What is NAV?".into(),
                },
                NewChatMessage {
                    user_id: Some(u.id + 100),
                    role: Role::Assistant,
                    content: "Net asset value.".into(),
                },
            ])
            .unwrap_err();
        assert!(matches!(err, StorageError::UnknownUser(_)), "{}: {:?}", name, err);
        assert!(store.chat_messages_for_user(u.id).unwrap().is_empty(), "{}", name);

        let saved = store
            .create_chat_messages(vec![
                NewChatMessage {
                    user_id: Some(u.id),
                    role: Role::User,
                    content: "What is NAV?".into(),
                },
                NewChatMessage {
                    user_id: Some(u.id),
                    role: Role::Assistant,
                    content: "Net asset value.".into(),
                },
            ])
            .unwrap();
        let stored: Vec<i64> = store
            .chat_messages_for_user(u.id)
            .unwrap()
            .iter()
            .map(|m| m.id)
            .collect();
        let ids: Vec<i64> = saved.iter().map(|m| m.id).collect();
        assert_eq!(stored, ids, "{}", name);
        assert_eq!(saved[1].role, Role::Assistant);
    }
}

#[test]
fn glossary_lookup_folds_non_ascii_case_alike() {
    for (name, mut store) in backends() {
        store
            .create_glossary_term(NewGlossaryTerm {
                term: "ÉQUITÉ".into(),
                definition: "Ownership in a company.".into(),
            })
            .unwrap();
        let found = store.glossary_term("équité").unwrap();
        assert_eq!(found.map(|t| t.term), Some("ÉQUITÉ".to_string()), "{}", name);
    }
}

#[test]
fn settings_round_trip_and_overwrite() {
    for (name, mut store) in backends() {
        assert_eq!(store.get_setting("gemini_model").unwrap(), None, "{}", name);
        store.set_setting("gemini_model", "a").unwrap();
        store.set_setting("gemini_model", "b").unwrap();
        assert_eq!(store.get_setting("gemini_model").unwrap().as_deref(), Some("b"));
    }
}

#[test]
fn unseeded_memory_store_is_empty() {
    let store = MemStorage::new();
    assert!(store.list_funds().unwrap().is_empty());
    assert!(store.list_glossary_terms().unwrap().is_empty());
}
