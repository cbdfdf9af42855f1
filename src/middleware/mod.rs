//! Route gates.
//!
//! Gates are axum extractors. A handler that takes one cannot run until the
//! gate has passed, and it receives the caller's identity as a typed argument.
//!
//! - [`auth`]: [`AuthUser`](auth::AuthUser), the credential verifier
//! - [`role`]: The role authorizer and role-gated extractors such as
//!   [`RequireAdmin`](role::RequireAdmin)
//!
//! # Flow
//!
//! 1. Client sends `Authorization: Bearer <token>`
//! 2. `AuthUser` verifies the token, or rejects with 401
//! 3. A role extractor compares the role, or rejects with 403
//! 4. The handler runs; the store is never touched by a rejected request
//!
//! # Example
//!
//! ```ignore
//! use crate::middleware::auth::AuthUser;
//! use crate::middleware::role::RequireAdmin;
//!
//! // Any valid token
//! async fn create_post(auth_user: AuthUser) -> impl IntoResponse { /* ... */ }
//!
//! // Admin role only
//! async fn delete_post(RequireAdmin(auth_user): RequireAdmin) -> impl IntoResponse { /* ... */ }
//! ```

pub mod auth;
pub mod role;
