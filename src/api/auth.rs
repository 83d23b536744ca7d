use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::crypto::{verify_proof, COMMITMENT_LEN, SALT_LEN};
use crate::error::AuthError;
use crate::store::Credential;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub account_id: String,
    /// Base64, SALT_LEN bytes. Derived client-side; the password never leaves the client.
    pub salt: String,
    /// Base64, COMMITMENT_LEN bytes.
    pub commitment: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupResponse {
    pub account_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginDataQuery {
    pub account_id: String,
}

#[derive(Debug, Serialize)]
pub struct LoginDataResponse {
    pub salt: String,
    pub commitment: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub account_id: String,
    pub proof: String,
    pub public_signals: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub accepted: bool,
}

/// Validate and sanitize an account identifier (an email address).
fn validate_account_id(account_id: &str) -> Result<String, AuthError> {
    let trimmed = account_id.trim();

    if trimmed.len() < 3 || trimmed.len() > 254 {
        return Err(AuthError::InvalidRequest(
            "account id must be 3-254 characters".to_string(),
        ));
    }

    if !trimmed.contains('@') || trimmed.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(AuthError::InvalidRequest(
            "account id must be an email address".to_string(),
        ));
    }

    Ok(trimmed.to_lowercase())
}

fn decode_fixed(value: &str, expected_len: usize, field: &str) -> Result<Vec<u8>, AuthError> {
    let bytes = base64_simd::STANDARD
        .decode_to_vec(value)
        .map_err(|e| AuthError::InvalidRequest(format!("invalid {} encoding: {}", field, e)))?;

    if bytes.len() != expected_len {
        return Err(AuthError::InvalidRequest(format!(
            "{} must be {} bytes",
            field, expected_len
        )));
    }

    Ok(bytes)
}

/// POST /api/auth/signup
///
/// The client has already run the commitment derivation; the server only
/// checks shape and stores. Atomic check-and-insert in the store upholds
/// no-overwrite signup.
pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<(StatusCode, Json<SignupResponse>), AuthError> {
    let account_id = validate_account_id(&req.account_id)?;
    let salt = decode_fixed(&req.salt, SALT_LEN, "salt")?;
    let commitment = decode_fixed(&req.commitment, COMMITMENT_LEN, "commitment")?;

    let credential = Credential {
        salt,
        commitment,
        created_at: chrono::Utc::now().timestamp(),
    };

    state.store.put(&account_id, credential).await?;

    tracing::info!(account = %account_id, "account registered");
    Ok((StatusCode::CREATED, Json(SignupResponse { account_id })))
}

/// GET /api/auth/login-data?accountId=...
///
/// Returns the salt and commitment the client needs to build its proof.
/// Salt and commitment are not secrets; the password is the only secret
/// and it never appears on the wire.
pub async fn login_data(
    State(state): State<AppState>,
    Query(query): Query<LoginDataQuery>,
) -> Result<Json<LoginDataResponse>, AuthError> {
    let account_id = validate_account_id(&query.account_id)?;
    let credential = state.store.get(&account_id).await?;

    Ok(Json(LoginDataResponse {
        salt: base64_simd::STANDARD.encode_to_string(&credential.salt),
        commitment: base64_simd::STANDARD.encode_to_string(&credential.commitment),
    }))
}

/// POST /api/auth/login
///
/// The expected commitment is always the stored one; the client-submitted
/// public signals are cross-checked against it inside verify_proof. A
/// structurally invalid proof is logged for diagnostics but returns the
/// same generic 401 as a cryptographic reject.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AuthError> {
    let account_id = validate_account_id(&req.account_id)?;
    let credential = state.store.get(&account_id).await?;

    let decoded = base64_simd::STANDARD
        .decode_to_vec(&req.proof)
        .and_then(|proof| {
            base64_simd::STANDARD
                .decode_to_vec(&req.public_signals)
                .map(|signals| (proof, signals))
        });
    let (proof_bytes, signal_bytes) = match decoded {
        Ok(pair) => pair,
        Err(e) => {
            tracing::warn!(account = %account_id, error = %e, "undecodable proof payload");
            return Err(AuthError::InvalidCredentials);
        }
    };

    let commitment: [u8; COMMITMENT_LEN] = credential
        .commitment
        .as_slice()
        .try_into()
        .map_err(|_| AuthError::Internal("stored commitment has invalid length".to_string()))?;

    let accepted = match verify_proof(&proof_bytes, &signal_bytes, &commitment, &state.vk) {
        Ok(valid) => valid,
        Err(AuthError::MalformedProof(detail)) => {
            tracing::warn!(account = %account_id, %detail, "structurally invalid proof");
            false
        }
        Err(e) => return Err(e),
    };

    if !accepted {
        tracing::info!(account = %account_id, "login rejected");
        return Err(AuthError::InvalidCredentials);
    }

    tracing::info!(account = %account_id, "login accepted");
    Ok(Json(LoginResponse { accepted: true }))
}
