//! Role authorization.
//!
//! [`authorize`] is the single check: exact, case-sensitive role match with
//! no hierarchy. The `Require*` extractors run the verifier and then this
//! check, so a handler taking one never executes for the wrong caller.

use inkpress_auth::roles;
use inkpress_core::AppError;
use inkpress_core::errors::{INSUFFICIENT_PERMISSIONS, MALFORMED_CREDENTIAL};
use tracing::warn;

use crate::metrics::track_authorization_check;
use crate::middleware::auth::AuthUser;

/// Checks that `identity` exists and carries `required_role`.
pub fn authorize(identity: Option<&AuthUser>, required_role: &str) -> Result<(), AppError> {
    let Some(identity) = identity else {
        return Err(AppError::unauthorized(MALFORMED_CREDENTIAL));
    };

    let allowed = identity.has_role(required_role);
    track_authorization_check(allowed, required_role);

    if !allowed {
        warn!(
            sub = %identity.subject(),
            role = %identity.role(),
            required_role,
            "authorization denied"
        );
        return Err(AppError::forbidden(INSUFFICIENT_PERMISSIONS));
    }

    Ok(())
}

/// Declares an extractor that admits only callers holding a given role.
macro_rules! require_role {
    ($name:ident, $role:expr) => {
        #[derive(Debug, Clone)]
        pub struct $name(pub $crate::middleware::auth::AuthUser);

        impl axum::extract::FromRequestParts<$crate::state::AppState> for $name {
            type Rejection = inkpress_core::AppError;

            async fn from_request_parts(
                parts: &mut axum::http::request::Parts,
                state: &$crate::state::AppState,
            ) -> Result<Self, Self::Rejection> {
                let auth_user = <$crate::middleware::auth::AuthUser as axum::extract::FromRequestParts<
                    $crate::state::AppState,
                >>::from_request_parts(parts, state)
                .await?;

                $crate::middleware::role::authorize(Some(&auth_user), $role)?;

                Ok($name(auth_user))
            }
        }
    };
}

require_role!(RequireAdmin, roles::ADMIN);
