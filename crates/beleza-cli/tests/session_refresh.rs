//! End-to-end token refresh tests against a mock API.
//!
//! Verifies the single refresh-and-retry cycle and the forced sign-out on a
//! terminal 401, through the real binary.

use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn temp_home_with_token(token: &str) -> TempDir {
    let home = TempDir::new().expect("create temp beleza home");
    fs::write(
        home.path().join("session.json"),
        format!(r#"{{"auth_token":"{token}"}}"#),
    )
    .unwrap();
    home
}

fn can_bind_localhost() -> bool {
    std::net::TcpListener::bind("127.0.0.1:0").is_ok()
}

#[tokio::test]
async fn test_expired_token_is_refreshed_transparently() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = temp_home_with_token("stale");
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/services"))
        .and(header("authorization", "Bearer stale"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/refresh-token"))
        .and(header("authorization", "Bearer stale"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"accessToken": "fresh"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/services"))
        .and(header("authorization", "Bearer fresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "s1", "name": "Corte", "priceCents": 12_000, "durationMin": 45},
        ])))
        .expect(1)
        .mount(&server)
        .await;

    cargo_bin_cmd!("beleza")
        .env("BELEZA_HOME", home.path())
        .env("BELEZA_BASE_URL", server.uri())
        .args(["services", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Corte"));

    // The refreshed token was persisted write-through
    let session = fs::read_to_string(home.path().join("session.json")).unwrap();
    assert!(session.contains("fresh"));
    assert!(!session.contains("stale"));
}

#[tokio::test]
async fn test_terminal_401_signs_out_and_clears_session() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = temp_home_with_token("stale");
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/services"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/refresh-token"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    cargo_bin_cmd!("beleza")
        .env("BELEZA_HOME", home.path())
        .env("BELEZA_BASE_URL", server.uri())
        .args(["services", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Your session has expired"))
        .stderr(predicate::str::contains("sign in again"));

    assert!(!home.path().join("session.json").exists());
}

#[test]
fn test_network_failure_reports_unreachable_server() {
    let home = temp_home_with_token("t");

    cargo_bin_cmd!("beleza")
        .env("BELEZA_HOME", home.path())
        // Nothing listens here
        .env("BELEZA_BASE_URL", "http://127.0.0.1:9")
        .args(["services", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not reach the server"));
}
