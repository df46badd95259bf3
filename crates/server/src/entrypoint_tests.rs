// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::{Config, Server};
use flo_core::test_support::instance;
use flo_core::{DeploymentId, InputSource, InstanceId};
use std::time::Duration;

fn server() -> Server {
    let server = Server::new(Config::default());
    server.register_instance(instance("web-1", "web"));
    server
}

fn start(server: &Server, arg: &str) -> flo_core::ExecId {
    server
        .start_exec(
            &DeploymentId::new("web"),
            vec![arg.to_string()],
            InputSource::empty(),
        )
        .unwrap()
        .id
}

#[test]
fn config_lists_sessions_by_id() {
    let server = server();
    let first = start(&server, "one");
    let second = start(&server, "two");

    let config = server.entrypoint_config(&InstanceId::new("web-1")).unwrap();
    assert_eq!(config.instance_id, "web-1");
    let ids: Vec<_> = config.exec.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![first, second]);
    assert_eq!(config.exec[1].args, vec!["two"]);
}

#[test]
fn config_for_idle_instance_is_empty() {
    let server = server();
    let config = server.entrypoint_config(&InstanceId::new("other")).unwrap();
    assert!(config.exec.is_empty());
}

#[tokio::test]
async fn watcher_yields_current_then_changes() {
    let server = server();
    let mut watcher = server.watch_entrypoint_config(InstanceId::new("WEB-1"));

    let initial = watcher.next().await.unwrap();
    assert!(initial.exec.is_empty());

    let id = start(&server, "sh");
    let added = watcher.next().await.unwrap();
    assert_eq!(added.exec.len(), 1);
    assert_eq!(added.exec[0].id, id);

    server.finish_exec(id).unwrap();
    let removed = watcher.next().await.unwrap();
    assert!(removed.exec.is_empty());
}

#[tokio::test]
async fn watcher_ignores_unrelated_commits() {
    let server = server();
    server.register_instance(instance("api-1", "api"));
    let mut watcher = server.watch_entrypoint_config(InstanceId::new("web-1"));
    watcher.next().await.unwrap();

    // Commits that do not touch web-1's sessions
    server.register_instance(instance("api-2", "api"));
    server
        .start_exec(
            &DeploymentId::new("api"),
            vec!["sh".to_string()],
            InputSource::empty(),
        )
        .unwrap();

    let pending = tokio::time::timeout(Duration::from_millis(50), watcher.next()).await;
    assert!(pending.is_err(), "watcher woke without a change");

    let id = start(&server, "sh");
    let config = watcher.next().await.unwrap();
    assert_eq!(config.exec[0].id, id);
}
