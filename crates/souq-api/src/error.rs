//! # API Error Types
//!
//! Error types for backend communication.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       API Error Categories                              │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │   Session       │  │   Transport     │  │     Backend             │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  Unauthenticated│  │  Connection     │  │  InvalidPromoCode       │ │
//! │  │  Forbidden      │  │  InvalidResponse│  │  OrderSubmissionFailed  │ │
//! │  └─────────────────┘  └─────────────────┘  │  Backend { status }     │ │
//! │                                            └─────────────────────────┘ │
//! │                                                                         │
//! │  CoreError converts in via #[from]:                                     │
//! │  InvalidQuantity / ItemNotFound / CheckoutInvalid all surface through   │
//! │  ApiError::Core without losing the inner detail.                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Recovery Semantics
//! - `Unauthenticated` → prompt re-login; nothing local is discarded
//! - `InvalidPromoCode` → prior discount (if any) stays applied
//! - `OrderSubmissionFailed` → cart AND checkout form are preserved so
//!   resubmission needs no re-entry
//! - `Core` (quantity/validation) → surfaced inline, state untouched

use souq_core::{CoreError, Role};
use thiserror::Error;

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors from talking to the marketplace backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No session token, or the backend rejected it (401/403 on a
    /// shopping endpoint). The caller should prompt re-login.
    #[error("Not authenticated: sign in to continue")]
    Unauthenticated,

    /// The session's role is not allowed to perform this operation.
    #[error("Role {role:?} is not permitted to shop")]
    Forbidden { role: Role },

    /// The backend did not recognize the promo code.
    #[error("Invalid promo code: {code}")]
    InvalidPromoCode { code: String },

    /// Order submission failed (network or server). The cart is kept so
    /// the user can retry without re-entering anything.
    #[error("Order submission failed: {reason}")]
    OrderSubmissionFailed { reason: String },

    /// Could not reach the backend at all.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// The backend answered with an unexpected status.
    #[error("Backend returned HTTP {status}")]
    Backend { status: u16 },

    /// The backend's response body did not match the wire contract.
    #[error("Invalid response from backend: {0}")]
    InvalidResponse(String),

    /// Domain error from souq-core (cart rules, checkout validation).
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl ApiError {
    /// Whether the user can recover by fixing input and retrying, as
    /// opposed to infrastructure failures.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ApiError::InvalidPromoCode { .. } | ApiError::Core(_) | ApiError::Unauthenticated
        )
    }
}

impl From<souq_core::ValidationError> for ApiError {
    fn from(err: souq_core::ValidationError) -> Self {
        ApiError::Core(CoreError::Validation(err))
    }
}
