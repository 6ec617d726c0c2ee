//! Scenario: `rom` binary end to end against a mock backend.
//!
//! # Invariants under test
//! - Invalid product and credential input exits non-zero before any request.
//! - Commands needing a session fail with "not authenticated" when none is stored.
//! - The placeholder policy labels substituted data on stdout.
//! - Terminal orders offer no choices.
//! - `config-hash` and `config-check` work without a backend.

use std::path::Path;

use assert_cmd::Command;
use httpmock::prelude::*;
use httpmock::Method::PATCH;
use predicates::prelude::*;
use serde_json::json;

fn write_session(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("session.json");
    let body = json!({
        "token": "tok-cli",
        "user": { "id": 3, "username": "chef_maria", "role": "admin" }
    });
    std::fs::write(&path, body.to_string()).unwrap();
    path
}

fn rom(dir: &Path, base_url: &str, session: &Path) -> Command {
    let mut cmd = Command::cargo_bin("rom").unwrap();
    cmd.current_dir(dir)
        .env("ROM_API_BASE_URL", base_url)
        .env("ROM_SESSION_PATH", session)
        .env_remove("ROM_DEGRADED_MODE")
        .env("RUST_LOG", "warn");
    cmd
}

#[test]
fn negative_price_fails_before_network() {
    let server = MockServer::start();
    let create = server.mock(|when, then| {
        when.method(POST).path("/api/products");
        then.status(201);
    });
    let dir = tempfile::tempdir().unwrap();
    let session = write_session(dir.path());

    rom(dir.path(), &server.base_url(), &session)
        .args(["products", "create", "--name", "Refrigerante", "--price", "-5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("greater than zero"));

    create.assert_hits(0);
}

#[test]
fn comma_price_is_sent_as_number() {
    let server = MockServer::start();
    let create = server.mock(|when, then| {
        when.method(POST)
            .path("/api/products")
            .header("authorization", "Bearer tok-cli")
            .json_body(json!({ "name": "Batata Frita", "price": 12.5 }));
        then.status(201)
            .json_body(json!({ "id": 9, "name": "Batata Frita", "price": 12.5 }));
    });
    let dir = tempfile::tempdir().unwrap();
    let session = write_session(dir.path());

    rom(dir.path(), &server.base_url(), &session)
        .args(["products", "create", "--name", "Batata Frita", "--price", "12,50"])
        .assert()
        .success()
        .stdout(predicate::str::contains("created=true id=9 price=12.50"));

    create.assert();
}

#[test]
fn bad_username_fails_before_network() {
    let server = MockServer::start();
    let login = server.mock(|when, then| {
        when.method(POST).path("/api/auth/login");
        then.status(200);
    });
    let dir = tempfile::tempdir().unwrap();
    let session = dir.path().join("session.json");

    rom(dir.path(), &server.base_url(), &session)
        .args(["login", "--username", "chef maria", "--password", "pw"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("letters, numbers and underscore"));

    login.assert_hits(0);
    assert!(!session.exists());
}

#[test]
fn orders_without_session_are_refused() {
    let server = MockServer::start();
    let list = server.mock(|when, then| {
        when.method(GET).path("/api/orders");
        then.status(200).json_body(json!({ "orders": [] }));
    });
    let dir = tempfile::tempdir().unwrap();

    rom(dir.path(), &server.base_url(), &dir.path().join("missing.json"))
        .args(["orders", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not authenticated"));

    list.assert_hits(0);
}

#[test]
fn placeholder_policy_labels_product_list() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/products");
        then.status(500);
    });
    let dir = tempfile::tempdir().unwrap();
    let session = write_session(dir.path());

    rom(dir.path(), &server.base_url(), &session)
        .env("ROM_DEGRADED_MODE", "placeholder")
        .args(["products", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("source=placeholder"))
        .stdout(predicate::str::contains("Batata Frita"))
        .stdout(predicate::str::contains("count=6"));

    // Default policy surfaces the failure instead.
    rom(dir.path(), &server.base_url(), &session)
        .args(["products", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to fetch products"));
}

#[test]
fn delivered_order_offers_no_choices() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/orders");
        then.status(200).json_body(json!({ "orders": [{
            "id": 7,
            "total_amount": 59.8,
            "status": "delivered",
            "created_at": "2026-03-01T12:00:00Z",
            "updated_at": "2026-03-01T12:30:00Z"
        }]}));
    });
    let patch = server.mock(|when, then| {
        when.method(PATCH).path("/api/orders/7/status");
        then.status(200);
    });
    let dir = tempfile::tempdir().unwrap();
    let session = write_session(dir.path());

    rom(dir.path(), &server.base_url(), &session)
        .args(["orders", "options", "--id", "7"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already in a final status"));

    rom(dir.path(), &server.base_url(), &session)
        .args(["orders", "cancel", "--id", "7"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already in a final status"));

    patch.assert_hits(0);
}

#[test]
fn config_hash_and_check_run_offline() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("base.yaml");
    std::fs::write(
        &base,
        "api:\n  base_url: \"http://localhost:3001\"\ndegraded_mode:\n  policy: \"fail\"\n",
    )
    .unwrap();
    let typo = dir.path().join("typo.yaml");
    std::fs::write(&typo, "sesion:\n  path: \"/tmp/x.json\"\n").unwrap();

    Command::cargo_bin("rom")
        .unwrap()
        .current_dir(dir.path())
        .args(["config-hash", base.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("config_hash="));

    Command::cargo_bin("rom")
        .unwrap()
        .current_dir(dir.path())
        .args(["config-check", base.to_str().unwrap(), typo.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("unused=/sesion/path"));

    Command::cargo_bin("rom")
        .unwrap()
        .current_dir(dir.path())
        .args([
            "config-check",
            base.to_str().unwrap(),
            typo.to_str().unwrap(),
            "--fail-on-unused",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("CONFIG_UNUSED_KEYS"));
}

#[test]
fn new_order_aggregates_items_by_name() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/products");
        then.status(200).json_body(json!([
            { "id": 1, "name": "Burger", "price": 25.9 },
            { "id": 4, "name": "Soda", "price": 8.0 }
        ]));
    });
    let create = server.mock(|when, then| {
        when.method(POST).path("/api/orders").json_body(json!({
            "items": [
                { "product_name": "Burger", "quantity": 2, "unit_price": 25.9, "total_price": 51.8 },
                { "product_name": "Soda", "quantity": 1, "unit_price": 8.0, "total_price": 8.0 }
            ],
            "total_amount": 59.8,
            "user_id": 3
        }));
        then.status(201).json_body(json!({ "id": 101 }));
    });
    let dir = tempfile::tempdir().unwrap();
    let session = write_session(dir.path());

    rom(dir.path(), &server.base_url(), &session)
        .args(["orders", "new", "--item", "burger", "--item", "Soda", "--item", "Burger"])
        .assert()
        .success()
        .stdout(predicate::str::contains("qty=2"))
        .stdout(predicate::str::contains("total=59.80"))
        .stdout(predicate::str::contains("created=true order_id=101"));

    create.assert();
}

#[test]
fn item_names_with_digits_and_x_are_orderable() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/products");
        then.status(200).json_body(json!([
            { "id": 1, "name": "Box 12", "price": 30.0 },
            { "id": 2, "name": "Combo X1", "price": 20.0 },
            { "id": 3, "name": "Suco x2", "price": 9.0 }
        ]));
    });
    let create = server.mock(|when, then| {
        when.method(POST).path("/api/orders").json_body(json!({
            "items": [
                { "product_name": "Box 12", "quantity": 1, "unit_price": 30.0, "total_price": 30.0 },
                { "product_name": "Combo X1", "quantity": 3, "unit_price": 20.0, "total_price": 60.0 },
                { "product_name": "Suco x2", "quantity": 1, "unit_price": 9.0, "total_price": 9.0 }
            ],
            "total_amount": 99.0,
            "user_id": 3
        }));
        then.status(201).json_body(json!({ "id": 102 }));
    });
    let dir = tempfile::tempdir().unwrap();
    let session = write_session(dir.path());

    rom(dir.path(), &server.base_url(), &session)
        .args([
            "orders", "new", "--item", "Box 12", "--item", "Combo X1 x3", "--item", "Suco x2",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("created=true order_id=102"));

    create.assert();
}
