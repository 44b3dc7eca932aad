//! Externally-supplied user identity.
//!
//! Authentication happens outside this crate; screens receive an optional
//! [`UserContext`] and pass it down. Guest mode is simply the absence of a
//! context.

use serde::{Deserialize, Serialize};

/// Role assigned to an authenticated user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular shopper. Accounts without an explicit role resolve here.
    #[default]
    Customer,
    /// Seller/operator with product management access.
    Admin,
}

impl Role {
    /// Wire label for this role.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Admin => "admin",
        }
    }
}

/// An authenticated user's identity, as supplied by the auth service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserContext {
    /// Account identifier from the auth service.
    pub id: String,
    pub role: Role,
}

impl UserContext {
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
