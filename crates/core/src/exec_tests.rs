// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use tokio::io::AsyncReadExt;

fn bound(id: i64, instance: &str) -> (ExecSession, mpsc::Receiver<EntrypointExecRequest>) {
    let (tx, rx) = mpsc::channel(4);
    let template = ExecTemplate::new(
        vec!["sh".to_string(), "-c".to_string(), "true".to_string()],
        InputSource::new(&b"input"[..]),
        tx,
    );
    (
        ExecSession::bind(template, ExecId::new(id), InstanceId::new(instance)),
        rx,
    )
}

#[test]
fn bind_copies_template_fields() {
    let (session, _rx) = bound(5, "web-1");
    assert_eq!(session.id, ExecId::new(5));
    assert_eq!(session.instance_id, "web-1");
    assert_eq!(session.args, vec!["sh", "-c", "true"]);
    assert!(!session.is_connected());
}

#[test]
fn first_connect_wins() {
    let (session, _rx) = bound(1, "web-1");
    assert!(session.connect());
    assert!(!session.connect());
    assert!(session.is_connected());
}

#[test]
fn concurrent_connects_have_one_winner() {
    let (session, _rx) = bound(1, "web-1");
    let session = Arc::new(session);
    let winners: usize = (0..16)
        .map(|_| {
            let session = Arc::clone(&session);
            std::thread::spawn(move || session.connect())
        })
        .collect::<Vec<_>>()
        .into_iter()
        .map(|h| usize::from(h.join().unwrap()))
        .sum();
    assert_eq!(winners, 1);
}

#[tokio::test]
async fn input_can_be_taken_once() {
    let (session, _rx) = bound(1, "web-1");
    let mut stream = session.input.take().unwrap();
    assert!(session.input.take().is_none());
    assert!(!session.input.is_available());

    let mut buf = String::new();
    stream.read_to_string(&mut buf).await.unwrap();
    assert_eq!(buf, "input");
}

#[tokio::test]
async fn sink_reaches_receiver() {
    let (session, mut rx) = bound(3, "web-1");
    session
        .events
        .send(EntrypointExecRequest::Exited { code: 2 })
        .await
        .unwrap();
    assert_eq!(rx.recv().await, Some(EntrypointExecRequest::Exited { code: 2 }));
}

#[test]
fn config_carries_id_and_args() {
    let (session, _rx) = bound(8, "web-1");
    let config = session.config();
    assert_eq!(config.id, ExecId::new(8));
    assert_eq!(config.args, session.args);
}

#[test]
fn debug_omits_capabilities() {
    let (session, _rx) = bound(2, "web-1");
    let rendered = format!("{session:?}");
    assert!(rendered.contains("web-1"));
    assert!(!rendered.contains("events"));
}
