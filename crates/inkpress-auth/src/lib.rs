//! # Inkpress Auth
//!
//! Bearer credential handling for the Inkpress API.
//!
//! - [`claims`]: The claim set carried by every access token, plus role names
//! - [`jwt`]: Token issuance and the credential verifier
//!
//! Verification is stateless: a token is accepted when its HS256 signature
//! matches the process-wide secret, it has not expired, and it names a
//! non-empty subject and role. Every failure surfaces to clients as one of two
//! generic messages; the precise [`CredentialError`] is only for logs and
//! metrics.
//!
//! # Example
//!
//! ```ignore
//! use inkpress_auth::{create_access_token, verify_bearer, roles};
//! use inkpress_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let token = create_access_token("user-42", roles::ADMIN, &config)?;
//! let claims = verify_bearer(Some(&format!("Bearer {token}")), &config)?;
//! assert_eq!(claims.role, roles::ADMIN);
//! ```

pub mod claims;
pub mod jwt;

// Re-export commonly used types at crate root
pub use claims::{Claims, roles};
pub use jwt::{
    CredentialError, create_access_token, create_token_with_expiry, parse_bearer, verify_bearer,
    verify_token,
};
