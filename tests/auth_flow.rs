//! End-to-end signup/login flows driven through the HTTP router.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt;

use zk_login::api::{create_router, AppState};
use zk_login::config::Config;
use zk_login::crypto::{create_commitment, generate_proof, ProofSystem};
use zk_login::store::MemoryCredentialStore;

struct TestServer {
    app: Router,
    proof_system: ProofSystem,
    keys_dir: String,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        std::fs::remove_dir_all(&self.keys_dir).ok();
    }
}

fn test_server(name: &str) -> TestServer {
    let keys_dir = format!("./target/test_keys_e2e_{}", name);
    let proof_system = ProofSystem::setup(&keys_dir).unwrap();

    let config = Config {
        server_host: "127.0.0.1".to_string(),
        server_port: 0,
        database_url: String::new(),
        zk_keys_dir: keys_dir.clone(),
        db_max_connections: 1,
        db_min_connections: 1,
        request_timeout_secs: 30,
    };

    let vk = proof_system.verifying_key.clone();
    let state = AppState {
        store: Arc::new(MemoryCredentialStore::new()),
        vk: Arc::new(vk),
        config: Arc::new(config),
    };

    TestServer {
        app: create_router(state),
        proof_system,
        keys_dir,
    }
}

async fn send_json(
    app: &Router,
    method: &str,
    uri: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    send(app, request).await
}

async fn send_get(app: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

fn b64(bytes: &[u8]) -> String {
    base64_simd::STANDARD.encode_to_string(bytes)
}

async fn signup(app: &Router, account_id: &str, password: &str) -> ([u8; 32], [u8; 32]) {
    let (salt, commitment) = create_commitment(password).unwrap();
    let (status, _) = send_json(
        app,
        "POST",
        "/api/auth/signup",
        serde_json::json!({
            "accountId": account_id,
            "salt": b64(&salt),
            "commitment": b64(&commitment),
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    (salt, commitment)
}

#[tokio::test]
async fn test_signup_then_login_accepts() {
    let server = test_server("accept");

    signup(&server.app, "alice@x.com", "hunter2").await;

    // Client fetches login data back from the server, exactly as a real
    // login would, and proves against what the server returned.
    let (status, body) = send_get(&server.app, "/api/auth/login-data?accountId=alice@x.com").await;
    assert_eq!(status, StatusCode::OK);

    let salt = base64_simd::STANDARD
        .decode_to_vec(body["salt"].as_str().unwrap())
        .unwrap();
    let commitment: [u8; 32] = base64_simd::STANDARD
        .decode_to_vec(body["commitment"].as_str().unwrap())
        .unwrap()
        .try_into()
        .unwrap();

    let bundle =
        generate_proof("hunter2", &salt, &commitment, &server.proof_system.proving_key).unwrap();

    let (status, body) = send_json(
        &server.app,
        "POST",
        "/api/auth/login",
        serde_json::json!({
            "accountId": "alice@x.com",
            "proof": b64(&bundle.proof),
            "publicSignals": b64(&bundle.public_signals),
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["accepted"], true);
}

#[tokio::test]
async fn test_proof_for_other_commitment_rejected() {
    // A valid proof bound to a different credential (same password!) must
    // come back as a generic invalid-credentials rejection, not an accept
    // and not a server error.
    let server = test_server("replay");

    signup(&server.app, "alice@x.com", "hunter2").await;
    let (salt_b, commitment_b) = create_commitment("hunter2").unwrap();

    let bundle = generate_proof(
        "hunter2",
        &salt_b,
        &commitment_b,
        &server.proof_system.proving_key,
    )
    .unwrap();

    let (status, body) = send_json(
        &server.app,
        "POST",
        "/api/auth/login",
        serde_json::json!({
            "accountId": "alice@x.com",
            "proof": b64(&bundle.proof),
            "publicSignals": b64(&bundle.public_signals),
        }),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "invalid credentials");
}

#[tokio::test]
async fn test_malformed_proof_rejected_as_invalid_credentials() {
    let server = test_server("malformed");

    signup(&server.app, "alice@x.com", "hunter2").await;

    let (status, body) = send_json(
        &server.app,
        "POST",
        "/api/auth/login",
        serde_json::json!({
            "accountId": "alice@x.com",
            "proof": b64(b"garbage bytes, not a proof"),
            "publicSignals": b64(b"also garbage"),
        }),
    )
    .await;

    // Same outward outcome as a cryptographic reject.
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "invalid credentials");
}

#[tokio::test]
async fn test_unknown_account_login_data_not_found() {
    let server = test_server("unknown");

    let (status, _) = send_get(&server.app, "/api/auth/login-data?accountId=ghost@x.com").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_duplicate_signup_conflicts() {
    let server = test_server("conflict");

    signup(&server.app, "alice@x.com", "hunter2").await;

    let (salt, commitment) = create_commitment("other-password").unwrap();
    let (status, _) = send_json(
        &server.app,
        "POST",
        "/api/auth/signup",
        serde_json::json!({
            "accountId": "alice@x.com",
            "salt": b64(&salt),
            "commitment": b64(&commitment),
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_malformed_signup_payload_rejected() {
    let server = test_server("badpayload");

    let (status, _) = send_json(
        &server.app,
        "POST",
        "/api/auth/signup",
        serde_json::json!({
            "accountId": "alice@x.com",
            "salt": b64(&[0u8; 4]),
            "commitment": "not base64!!",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
