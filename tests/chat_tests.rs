// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use finvest::chat::{ChatError, ChatTurn, Completion, GeminiClient, respond};
use finvest::models::{NewUser, Role};
use finvest::storage::{MemStorage, Storage};
use finvest::{cli, commands};
use std::cell::RefCell;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::thread;
use std::time::{Duration, Instant};
use tempfile::tempdir;

/// Records every prompt and answers with a canned reply.
struct Canned {
    reply: &'static str,
    prompts: RefCell<Vec<String>>,
}

impl Canned {
    fn new(reply: &'static str) -> Self {
        Self {
            reply,
            prompts: RefCell::new(Vec::new()),
        }
    }
}

impl Completion for Canned {
    fn complete(&self, prompt: &str) -> Result<String, ChatError> {
        self.prompts.borrow_mut().push(prompt.to_string());
        Ok(self.reply.to_string())
    }
}

struct AlwaysTimesOut;

impl Completion for AlwaysTimesOut {
    fn complete(&self, _prompt: &str) -> Result<String, ChatError> {
        Err(ChatError::Timeout { secs: 30 })
    }
}

/// Serves exactly one HTTP request on loopback and returns the base URL.
/// The request line is sent back over the channel.
fn serve_once(
    status: &'static str,
    body: &'static str,
    stall: Option<Duration>,
) -> (String, std::sync::mpsc::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = std::sync::mpsc::channel();
    thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());
        let mut request_line = String::new();
        reader.read_line(&mut request_line).unwrap();
        let mut content_length = 0usize;
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).unwrap();
            if line == "\r\n" || line.is_empty() {
                break;
            }
            let lower = line.to_ascii_lowercase();
            if let Some(v) = lower.strip_prefix("content-length:") {
                content_length = v.trim().parse().unwrap();
            }
        }
        let mut payload = vec![0u8; content_length];
        reader.read_exact(&mut payload).unwrap();
        tx.send(request_line).unwrap();

        if let Some(d) = stall {
            thread::sleep(d);
            return;
        }
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        let _ = stream.write_all(response.as_bytes());
    });
    (format!("http://{}", addr), rx)
}

fn client(base: &str, timeout: Duration) -> GeminiClient {
    GeminiClient::new("test-key", "gemini-1.5-pro", base, timeout).unwrap()
}

#[test]
fn respond_appends_both_turns() {
    let provider = Canned::new("An SIP invests a fixed amount every month.");
    let history = vec![
        ChatTurn::new(Role::User, "Hi"),
        ChatTurn::new(Role::Assistant, "Hello! Ask me about investing."),
    ];
    let x = respond(&provider, &history, "  What is an SIP?  ").unwrap();

    assert_eq!(x.response, "An SIP invests a fixed amount every month.");
    assert_eq!(x.conversation.len(), 4);
    assert_eq!(x.conversation[2], ChatTurn::new(Role::User, "What is an SIP?"));
    assert_eq!(x.conversation[3].role, Role::Assistant);

    let prompts = provider.prompts.borrow();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("\nUser: Hi\n"));
    assert!(prompts[0].ends_with("\nUser: What is an SIP?\n"));
}

#[test]
fn blank_message_never_reaches_the_provider() {
    let provider = Canned::new("unused");
    let err = respond(&provider, &[], " \n ").unwrap_err();
    assert!(matches!(err, ChatError::EmptyMessage));
    assert!(provider.prompts.borrow().is_empty());
}

#[test]
fn gemini_client_reads_first_candidate() {
    let (base, rx) = serve_once(
        "200 OK",
        r#"{"candidates":[{"content":{"parts":[{"text":"NAV is "},{"text":"net asset value."}]}}]}"#,
        None,
    );
    let reply = client(&base, Duration::from_secs(5)).complete("prompt").unwrap();
    assert_eq!(reply, "NAV is net asset value.");

    let request_line = rx.recv().unwrap();
    assert!(request_line.starts_with("POST /v1beta/models/gemini-1.5-pro:generateContent?key=test-key"));
}

#[test]
fn gemini_client_reports_upstream_status() {
    let (base, _rx) = serve_once("500 Internal Server Error", r#"{"error":"boom"}"#, None);
    match client(&base, Duration::from_secs(5)).complete("prompt") {
        Err(ChatError::Upstream { status, body }) => {
            assert_eq!(status, 500);
            assert!(body.contains("boom"));
        }
        other => panic!("expected Upstream, got {:?}", other),
    }
}

#[test]
fn gemini_client_rejects_malformed_and_empty_replies() {
    let (base, _rx) = serve_once("200 OK", "not json", None);
    let err = client(&base, Duration::from_secs(5)).complete("p").unwrap_err();
    assert!(matches!(err, ChatError::MalformedResponse(_)), "{:?}", err);

    let (base, _rx) = serve_once("200 OK", r#"{"candidates":[]}"#, None);
    let err = client(&base, Duration::from_secs(5)).complete("p").unwrap_err();
    assert!(matches!(err, ChatError::EmptyResponse), "{:?}", err);
}

#[test]
fn gemini_client_gives_up_at_the_deadline() {
    let (base, _rx) = serve_once("200 OK", "{}", Some(Duration::from_secs(5)));
    let started = Instant::now();
    let err = client(&base, Duration::from_secs(1)).complete("p").unwrap_err();
    assert!(matches!(err, ChatError::Timeout { secs: 1 }), "{:?}", err);
    assert!(started.elapsed() < Duration::from_secs(4));
}

#[test]
fn send_records_the_exchange_and_saves_transcript() {
    let mut store = MemStorage::seeded().unwrap();
    let user = store
        .create_user(NewUser {
            username: "asha".into(),
        })
        .unwrap();
    let dir = tempdir().unwrap();
    let out = dir.path().join("transcript.json");
    let out_str = out.to_string_lossy().to_string();

    let provider = Canned::new("ELSS funds have a three year lock-in.");
    for question in ["What is ELSS?", "And the lock-in?"] {
        let matches = cli::build_cli().get_matches_from([
            "finvest", "chat", "send", question, "--user", "asha", "--save", &out_str,
        ]);
        let (_, chat) = matches.subcommand().unwrap();
        let (_, send) = chat.subcommand().unwrap();
        commands::chat::send(&mut store, &provider, send).unwrap();
    }

    let stored = store.chat_messages_for_user(user.id).unwrap();
    let roles: Vec<Role> = stored.iter().map(|m| m.role).collect();
    assert_eq!(
        roles,
        vec![Role::User, Role::Assistant, Role::User, Role::Assistant]
    );
    assert_eq!(stored[2].content, "And the lock-in?");

    // Second prompt carried the first exchange as history.
    let prompts = provider.prompts.borrow();
    assert!(prompts[1].contains("\nUser: What is ELSS?\n"));
    assert!(prompts[1].contains("\nAssistant: ELSS funds have a three year lock-in.\n"));

    let saved: Vec<ChatTurn> =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(saved.len(), 4);
}

#[test]
fn send_continues_a_saved_conversation_without_a_user() {
    let mut store = MemStorage::new();
    let dir = tempdir().unwrap();
    let path = dir.path().join("in.json");
    let history = vec![
        ChatTurn::new(Role::User, "What is NAV?"),
        ChatTurn::new(Role::Assistant, "Net asset value per unit."),
    ];
    std::fs::write(&path, serde_json::to_string(&history).unwrap()).unwrap();
    let path_str = path.to_string_lossy().to_string();

    let provider = Canned::new("It is published daily.");
    let matches = cli::build_cli().get_matches_from([
        "finvest",
        "chat",
        "send",
        "How often is it published?",
        "--conversation",
        &path_str,
    ]);
    let (_, chat) = matches.subcommand().unwrap();
    let (_, send) = chat.subcommand().unwrap();
    commands::chat::send(&mut store, &provider, send).unwrap();

    assert!(provider.prompts.borrow()[0].contains("\nAssistant: Net asset value per unit.\n"));
}

#[test]
fn send_surfaces_timeouts_distinctly() {
    let mut store = MemStorage::new();
    let matches = cli::build_cli().get_matches_from(["finvest", "chat", "send", "hello"]);
    let (_, chat) = matches.subcommand().unwrap();
    let (_, send) = chat.subcommand().unwrap();
    let err = commands::chat::send(&mut store, &AlwaysTimesOut, send).unwrap_err();

    assert!(err.to_string().contains("took too long"));
    assert!(matches!(
        err.downcast_ref::<ChatError>(),
        Some(ChatError::Timeout { .. })
    ));
}

#[test]
fn send_requires_a_known_user() {
    let mut store = MemStorage::new();
    let matches =
        cli::build_cli().get_matches_from(["finvest", "chat", "send", "hi", "--user", "nobody"]);
    let (_, chat) = matches.subcommand().unwrap();
    let (_, send) = chat.subcommand().unwrap();
    let err = commands::chat::send(&mut store, &Canned::new("x"), send).unwrap_err();
    assert!(err.to_string().contains("User 'nobody' not found"));
}
