use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    /// Malformed request payload (missing/undecodable fields, bad account id).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Password violates a client-side constraint (empty, unencodable).
    #[error("invalid password: {0}")]
    InvalidPassword(String),

    /// The OS secure random source could not be read.
    #[error("secure randomness unavailable: {0}")]
    RandomnessUnavailable(String),

    /// The supplied password does not satisfy the commitment relation.
    /// This is the expected wrong-password case, not a system error.
    #[error("witness does not match the stored commitment")]
    WitnessMismatch,

    /// Generic authentication failure returned to clients. Deliberately
    /// carries no detail about which check rejected.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Proof or public signals failed structural decoding before the
    /// cryptographic check ran.
    #[error("malformed proof: {0}")]
    MalformedProof(String),

    /// Failure internal to the proving capability (setup, synthesis,
    /// serialization). Never conflated with a wrong password.
    #[error("proving backend error: {0}")]
    ProvingBackend(String),

    #[error("verification key unavailable: {0}")]
    VerificationKeyUnavailable(String),

    /// An in-flight proving task was cancelled before completing.
    #[error("proof generation cancelled")]
    Cancelled,

    #[error("account already exists")]
    AlreadyExists,

    #[error("account not found")]
    NotFound,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<std::io::Error> for AuthError {
    fn from(err: std::io::Error) -> Self {
        AuthError::Internal(err.to_string())
    }
}

// HTTP mapping. Expected authentication failures collapse into one generic
// 401 body so a network observer cannot tell a cryptographic reject from a
// malformed proof; system errors return a generic 500 and keep the detail
// in server logs only.
impl axum::response::IntoResponse for AuthError {
    fn into_response(self) -> axum::response::Response {
        use axum::http::StatusCode;

        let (status, message) = match &self {
            AuthError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AuthError::InvalidPassword(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AuthError::WitnessMismatch | AuthError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "invalid credentials".to_string())
            }
            AuthError::MalformedProof(detail) => {
                tracing::warn!(%detail, "rejected structurally invalid proof");
                (StatusCode::UNAUTHORIZED, "invalid credentials".to_string())
            }
            AuthError::AlreadyExists => {
                (StatusCode::CONFLICT, "account already exists".to_string())
            }
            AuthError::NotFound => (StatusCode::NOT_FOUND, "account not found".to_string()),
            AuthError::RandomnessUnavailable(_)
            | AuthError::ProvingBackend(_)
            | AuthError::VerificationKeyUnavailable(_)
            | AuthError::Cancelled
            | AuthError::Database(_)
            | AuthError::Config(_)
            | AuthError::Internal(_) => {
                tracing::error!(error = %self, "request failed with server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        let body = serde_json::json!({
            "error": message,
        });

        (status, axum::Json(body)).into_response()
    }
}
