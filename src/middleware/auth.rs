use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use inkpress_auth::{Claims, CredentialError, verify_bearer};
use inkpress_core::AppError;
use tracing::{debug, warn};

use crate::metrics::track_credential_check;
use crate::state::AppState;

/// Extractor that verifies the bearer credential and yields the caller's claims.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn subject(&self) -> &str {
        &self.0.sub
    }

    pub fn role(&self) -> &str {
        &self.0.role
    }

    /// Exact, case-sensitive comparison.
    pub fn has_role(&self, role: &str) -> bool {
        self.0.role == role
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = match parts.headers.get(header::AUTHORIZATION) {
            Some(value) => match value.to_str() {
                Ok(value) => Some(value),
                Err(_) => return Err(reject(CredentialError::Malformed, parts)),
            },
            None => None,
        };

        match verify_bearer(header, &state.jwt_config) {
            Ok(claims) => {
                track_credential_check("accepted");
                debug!(sub = %claims.sub, role = %claims.role, "credential accepted");
                Ok(AuthUser(claims))
            }
            Err(err) => Err(reject(err, parts)),
        }
    }
}

fn reject(err: CredentialError, parts: &Parts) -> AppError {
    track_credential_check(err.reason());
    warn!(
        reason = err.reason(),
        error = %err,
        method = %parts.method,
        path = %parts.uri.path(),
        "credential rejected"
    );
    err.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;
    use inkpress_auth::{create_access_token, create_token_with_expiry, roles};
    use inkpress_config::JwtConfig;
    use inkpress_core::ErrorKind;
    use inkpress_core::errors::{INVALID_CREDENTIAL, MALFORMED_CREDENTIAL};
    use inkpress_db::{MemoryCategoryStore, MemoryPostStore};
    use std::sync::Arc;

    fn test_state() -> AppState {
        AppState::new(
            Arc::new(MemoryPostStore::new()),
            Arc::new(MemoryCategoryStore::new()),
            JwtConfig {
                secret: "middleware-test-secret-at-least-32-chars".to_string(),
                access_token_expiry: 3600,
                leeway: 0,
            },
        )
    }

    async fn extract(state: &AppState, authorization: Option<&str>) -> Result<AuthUser, AppError> {
        let mut builder = Request::builder().uri("/api/posts");
        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        let (mut parts, _) = builder.body(()).unwrap().into_parts();
        AuthUser::from_request_parts(&mut parts, state).await
    }

    #[tokio::test]
    async fn test_valid_token_yields_identity() {
        let state = test_state();
        let token = create_access_token("user-9", roles::USER, &state.jwt_config).unwrap();

        let auth_user = extract(&state, Some(&format!("Bearer {token}"))).await.unwrap();
        assert_eq!(auth_user.subject(), "user-9");
        assert!(auth_user.has_role(roles::USER));
        assert!(!auth_user.has_role("User"));
    }

    #[tokio::test]
    async fn test_missing_header_is_unauthenticated() {
        let state = test_state();
        let err = extract(&state, None).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthenticated);
        assert_eq!(err.public_message(), MALFORMED_CREDENTIAL);
    }

    #[tokio::test]
    async fn test_wrong_scheme_is_unauthenticated() {
        let state = test_state();
        let err = extract(&state, Some("Basic dXNlcjpwYXNz")).await.unwrap_err();
        assert_eq!(err.public_message(), MALFORMED_CREDENTIAL);
    }

    #[tokio::test]
    async fn test_expired_token_is_unauthenticated() {
        let state = test_state();
        let token =
            create_token_with_expiry("user-9", roles::USER, -60, &state.jwt_config).unwrap();

        let err = extract(&state, Some(&format!("Bearer {token}"))).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthenticated);
        assert_eq!(err.public_message(), INVALID_CREDENTIAL);
    }
}
