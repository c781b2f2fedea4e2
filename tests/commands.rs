//! Integration tests for the SVR: control commands.

mod common;

use common::TestServer;
use std::time::Duration;

const QUIET: Duration = Duration::from_millis(300);

#[tokio::test]
async fn test_who_lists_clients_in_join_order() {
    let server = TestServer::spawn(17021).await.expect("Failed to spawn test server");

    let mut alice = server.join("alice").await.unwrap();
    let mut bob = server.join("bob").await.unwrap();
    let _carol = server.join("carol").await.unwrap();

    bob.send_line("SVR:who").await.unwrap();
    assert_eq!(
        bob.recv_who(3).await.unwrap(),
        ["alice", "bob (YOU)", "carol"]
    );

    alice.send_line("SVR:who").await.unwrap();
    assert_eq!(
        alice.recv_who(3).await.unwrap(),
        ["alice (YOU)", "bob", "carol"]
    );

    // Only the requester gets the listing.
    bob.expect_silence(QUIET).await.unwrap();
}

#[tokio::test]
async fn test_who_alone() {
    let server = TestServer::spawn(17022).await.expect("Failed to spawn test server");

    let mut alice = server.join("alice").await.unwrap();
    alice.send_line("SVR:who").await.unwrap();
    assert_eq!(alice.recv_who(1).await.unwrap(), ["alice (YOU)"]);
}

#[tokio::test]
async fn test_rename() {
    let server = TestServer::spawn(17023).await.expect("Failed to spawn test server");

    let mut alice = server.join("alice").await.unwrap();
    let mut bob = server.join("bob").await.unwrap();

    alice.send_line("SVR:rename carol").await.unwrap();
    assert_eq!(
        alice.recv_line().await.unwrap(),
        "Your new username is carol"
    );
    // Renames are not announced.
    bob.expect_silence(QUIET).await.unwrap();

    alice.send_line("renamed now").await.unwrap();
    assert_eq!(bob.recv_chat("carol").await.unwrap(), "renamed now");

    bob.send_line("SVR:who").await.unwrap();
    assert_eq!(bob.recv_who(2).await.unwrap(), ["carol", "bob (YOU)"]);
}

#[tokio::test]
async fn test_rename_to_blank_is_rejected() {
    let server = TestServer::spawn(17024).await.expect("Failed to spawn test server");

    let mut alice = server.join("alice").await.unwrap();
    let mut bob = server.join("bob").await.unwrap();

    for line in ["SVR:rename ", "SVR:rename    "] {
        alice.send_line(line).await.unwrap();
        assert_eq!(alice.recv_line().await.unwrap(), "Invalid username.");
    }

    alice.send_line("still alice").await.unwrap();
    assert_eq!(bob.recv_chat("alice").await.unwrap(), "still alice");
}

#[tokio::test]
async fn test_near_miss_commands_are_chat() {
    let server = TestServer::spawn(17025).await.expect("Failed to spawn test server");

    let mut alice = server.join("alice").await.unwrap();
    let mut bob = server.join("bob").await.unwrap();

    for line in ["SVR:who ", "svr:who", "SVR:rename", "SVR:disconnect please"] {
        alice.send_line(line).await.unwrap();
        assert_eq!(bob.recv_chat("alice").await.unwrap(), line);
    }
    alice.expect_silence(QUIET).await.unwrap();
}

#[tokio::test]
async fn test_disconnect_announces_departure() {
    let server = TestServer::spawn(17026).await.expect("Failed to spawn test server");

    let mut alice = server.join("alice").await.unwrap();
    let mut bob = server.join("bob").await.unwrap();
    let mut carol = server.join("carol").await.unwrap();

    alice.send_line("SVR:disconnect").await.unwrap();
    alice.expect_eof().await.unwrap();

    for peer in [&mut bob, &mut carol] {
        assert_eq!(
            peer.recv_line().await.unwrap(),
            "The client alice has disconnected."
        );
    }

    bob.send_line("SVR:who").await.unwrap();
    assert_eq!(bob.recv_who(2).await.unwrap(), ["bob (YOU)", "carol"]);
}

#[tokio::test]
async fn test_disconnect_uses_current_name() {
    let server = TestServer::spawn(17027).await.expect("Failed to spawn test server");

    let mut alice = server.join("alice").await.unwrap();
    let mut bob = server.join("bob").await.unwrap();

    alice.send_line("SVR:rename dora").await.unwrap();
    alice.recv_line().await.unwrap();
    alice.send_line("SVR:disconnect").await.unwrap();
    alice.expect_eof().await.unwrap();

    assert_eq!(
        bob.recv_line().await.unwrap(),
        "The client dora has disconnected."
    );
}
