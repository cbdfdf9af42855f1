//! Access token issuance.
//!
//! The API never issues tokens itself; operators mint them here.

use inkpress_auth::{CredentialError, create_token_with_expiry, roles};
use inkpress_config::JwtConfig;

/// Roles offered in the interactive prompt.
pub const KNOWN_ROLES: [&str; 2] = [roles::ADMIN, roles::USER];

/// Signs a token for `subject` with `role`.
///
/// `expiry` overrides the configured lifetime, in seconds.
pub fn issue_token(
    subject: &str,
    role: &str,
    expiry: Option<i64>,
    jwt_config: &JwtConfig,
) -> Result<String, CredentialError> {
    let expires_in = expiry.unwrap_or(jwt_config.access_token_expiry);
    create_token_with_expiry(subject, role, expires_in, jwt_config)
}

pub fn is_known_role(role: &str) -> bool {
    KNOWN_ROLES.contains(&role)
}
