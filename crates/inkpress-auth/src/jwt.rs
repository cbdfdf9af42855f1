//! Token issuance and the credential verifier.
//!
//! [`verify_bearer`] is the single entry point used by the route gates. It
//! takes the raw `Authorization` header value and either returns the decoded
//! [`Claims`] or a [`CredentialError`] naming the precise cause. Converting a
//! `CredentialError` into an [`AppError`] collapses the causes into two public
//! messages, so clients cannot learn why a token was refused.

use chrono::Utc;
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
    errors::ErrorKind as JwtErrorKind,
};
use thiserror::Error;

use inkpress_config::JwtConfig;
use inkpress_core::AppError;
use inkpress_core::errors::{INVALID_CREDENTIAL, MALFORMED_CREDENTIAL};

use crate::claims::Claims;

const BEARER_PREFIX: &str = "Bearer ";

/// Why a credential was refused (or could not be issued).
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("authorization header is missing")]
    Missing,

    #[error("authorization header is not a bearer credential")]
    Malformed,

    #[error("token has expired")]
    Expired,

    #[error("token signature does not match")]
    BadSignature,

    #[error("token is structurally invalid: {0}")]
    Invalid(String),

    #[error("token is missing its subject or role")]
    IncompleteClaims,

    #[error("failed to sign token: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

impl CredentialError {
    /// Short label used for log fields and metric labels.
    pub fn reason(&self) -> &'static str {
        match self {
            CredentialError::Missing => "missing",
            CredentialError::Malformed => "malformed",
            CredentialError::Expired => "expired",
            CredentialError::BadSignature => "bad_signature",
            CredentialError::Invalid(_) => "invalid",
            CredentialError::IncompleteClaims => "incomplete_claims",
            CredentialError::Signing(_) => "signing",
        }
    }
}

impl From<CredentialError> for AppError {
    fn from(err: CredentialError) -> Self {
        match err {
            CredentialError::Missing | CredentialError::Malformed => {
                AppError::unauthorized(MALFORMED_CREDENTIAL)
            }
            CredentialError::Signing(e) => AppError::internal(e),
            _ => AppError::unauthorized(INVALID_CREDENTIAL),
        }
    }
}

/// Creates an access token valid for the configured lifetime.
pub fn create_access_token(
    subject: &str,
    role: &str,
    jwt_config: &JwtConfig,
) -> Result<String, CredentialError> {
    create_token_with_expiry(subject, role, jwt_config.access_token_expiry, jwt_config)
}

/// Creates a token expiring `expires_in` seconds from now.
///
/// A negative `expires_in` yields a token that is already expired.
pub fn create_token_with_expiry(
    subject: &str,
    role: &str,
    expires_in: i64,
    jwt_config: &JwtConfig,
) -> Result<String, CredentialError> {
    let now = Utc::now().timestamp();
    let exp = now.saturating_add(expires_in).max(0) as usize;

    let claims = Claims {
        sub: subject.to_string(),
        role: role.to_string(),
        iat: now.max(0) as usize,
        exp,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(CredentialError::Signing)
}

/// Extracts the token from a `Bearer <token>` header value.
///
/// The scheme is matched case-sensitively, and the token must be a single
/// non-empty word.
pub fn parse_bearer(header: Option<&str>) -> Result<&str, CredentialError> {
    let header = header.ok_or(CredentialError::Missing)?;
    let token = header
        .strip_prefix(BEARER_PREFIX)
        .ok_or(CredentialError::Malformed)?;

    if token.is_empty() || token.chars().any(char::is_whitespace) {
        return Err(CredentialError::Malformed);
    }

    Ok(token)
}

/// Verifies a raw token and returns its claims.
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, CredentialError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = jwt_config.leeway;
    validation.set_required_spec_claims(&["exp", "sub"]);

    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        JwtErrorKind::ExpiredSignature => CredentialError::Expired,
        JwtErrorKind::InvalidSignature => CredentialError::BadSignature,
        _ => CredentialError::Invalid(e.to_string()),
    })?;

    if !claims.is_complete() {
        return Err(CredentialError::IncompleteClaims);
    }

    Ok(claims)
}

/// The credential verifier: header value in, claims out.
pub fn verify_bearer(
    header: Option<&str>,
    jwt_config: &JwtConfig,
) -> Result<Claims, CredentialError> {
    let token = parse_bearer(header)?;
    verify_token(token, jwt_config)
}
