//! JWT claim set for access tokens.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Role names understood by the route gates.
///
/// Roles are compared as exact, case-sensitive strings. There is no
/// hierarchy: an `admin` token does not satisfy a route that requires `user`.
pub mod roles {
    pub const ADMIN: &str = "admin";
    pub const USER: &str = "user";
}

/// Claims embedded in every access token.
///
/// # Fields
///
/// - `sub`: Subject (user) identifier
/// - `role`: Single role name, see [`roles`]
/// - `iat`: Issued-at timestamp
/// - `exp`: Expiration timestamp
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// Subject identifier
    pub sub: String,
    /// Role name
    pub role: String,
    /// Token issued-at timestamp (Unix timestamp)
    #[serde(default)]
    pub iat: usize,
    /// Token expiration timestamp (Unix timestamp)
    pub exp: usize,
}

impl Claims {
    /// True when subject and role are both present.
    pub fn is_complete(&self) -> bool {
        !self.sub.trim().is_empty() && !self.role.trim().is_empty()
    }
}
