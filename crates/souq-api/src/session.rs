//! # Session
//!
//! The authenticated session passed explicitly to every API consumer.
//!
//! ## No Ambient State
//! The session is a plain value handed to constructors. Nothing in this
//! workspace reads a token out of a global, a thread-local, or an
//! environment variable at request time: if you hold a `Session`, you can
//! call the backend; if you don't, you can't.
//!
//! ## Role Resolution
//! The backend reports the user's role as a string at login. It is parsed
//! into a [`Role`] with an explicit capability set ONCE, here, and
//! consulted through [`Session::require_shopper`] afterwards.

use serde::{Deserialize, Serialize};
use souq_core::{Capabilities, Role};

use crate::error::{ApiError, ApiResult};

/// An authenticated marketplace session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Bearer token identifying the user to the backend.
    access_token: String,

    /// Backend user ID.
    pub user_id: String,

    /// Role resolved at session start.
    pub role: Role,
}

impl Session {
    /// Creates a session from login response data.
    ///
    /// The role string comes straight from the backend; unknown values
    /// resolve to `Customer`.
    pub fn new(access_token: impl Into<String>, user_id: impl Into<String>, role: &str) -> Self {
        Session {
            access_token: access_token.into(),
            user_id: user_id.into(),
            role: Role::parse(role),
        }
    }

    /// The capability set for this session's role.
    pub fn capabilities(&self) -> Capabilities {
        self.role.capabilities()
    }

    /// Renders the Authorization header value.
    ///
    /// ## Errors
    /// `Unauthenticated` when the token is empty - a session without a
    /// token must never produce an authenticated request.
    pub fn bearer(&self) -> ApiResult<String> {
        if self.access_token.trim().is_empty() {
            return Err(ApiError::Unauthenticated);
        }
        Ok(format!("Bearer {}", self.access_token))
    }

    /// Guards shopping operations (cart mutations, checkout).
    ///
    /// ## Errors
    /// - `Unauthenticated` when no token is present
    /// - `Forbidden` when the role cannot shop (administrators)
    pub fn require_shopper(&self) -> ApiResult<()> {
        if self.access_token.trim().is_empty() {
            return Err(ApiError::Unauthenticated);
        }
        if !self.capabilities().can_shop {
            return Err(ApiError::Forbidden { role: self.role });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_header() {
        let session = Session::new("tok-123", "user-1", "customer");
        assert_eq!(session.bearer().unwrap(), "Bearer tok-123");
    }

    #[test]
    fn test_empty_token_is_unauthenticated() {
        let session = Session::new("", "user-1", "customer");
        assert!(matches!(session.bearer(), Err(ApiError::Unauthenticated)));
        assert!(matches!(
            session.require_shopper(),
            Err(ApiError::Unauthenticated)
        ));
    }

    #[test]
    fn test_seller_can_shop() {
        let session = Session::new("tok", "user-2", "seller");
        assert!(session.require_shopper().is_ok());
        assert!(session.capabilities().can_manage_store);
    }

    #[test]
    fn test_admin_cannot_shop() {
        let session = Session::new("tok", "user-3", "admin");
        assert!(matches!(
            session.require_shopper(),
            Err(ApiError::Forbidden { role: Role::Admin })
        ));
    }
}
