//! # Error Types
//!
//! Domain-specific error types for souq-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  souq-core errors (this file)                                          │
//! │  ├── CoreError        - Cart and domain rule violations                │
//! │  └── ValidationError  - Checkout field validation failures             │
//! │                                                                         │
//! │  souq-api errors (separate crate)                                      │
//! │  └── ApiError         - Session, transport, backend failures           │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → caller                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product ID, field name, etc.)
//! 3. Errors are enum variants, never String
//! 4. Recoverable errors carry enough detail to show the user inline

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These represent cart rule violations. They are recoverable: the cart
/// keeps its prior state and the caller surfaces the message inline.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Quantity below 1 passed to an add operation.
    #[error("Invalid quantity: {quantity} (must be at least 1)")]
    InvalidQuantity { quantity: i64 },

    /// Product is not in the cart.
    ///
    /// Returned by quantity updates only. Removal of an absent product
    /// is a no-op, matching the backend's DELETE semantics.
    #[error("Product {product_id} not in cart")]
    ItemNotFound { product_id: String },

    /// Cart has exceeded maximum allowed distinct items.
    #[error("Cart cannot have more than {max} items")]
    CartTooLarge { max: usize },

    /// Item quantity exceeds maximum allowed.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: i64 },

    /// Checkout validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// A single failed checkout field.
///
/// Collected into `ValidationError::CheckoutInvalid` so one submission
/// attempt reports every problem at once rather than the first hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// The field that failed ("address", "card_number", ...).
    pub field: String,
    /// Human-readable reason.
    pub reason: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        FieldError {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

/// Input validation errors.
///
/// Single-field variants are used by the individual validators; the
/// checkout validator aggregates every failure into `CheckoutInvalid`
/// so submission is blocked with the full list.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Invalid format (e.g., card number, expiry month).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// One or more checkout fields failed validation.
    #[error("checkout form invalid: {}", format_fields(.fields))]
    CheckoutInvalid { fields: Vec<FieldError> },
}

fn format_fields(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InvalidQuantity { quantity: 0 };
        assert_eq!(err.to_string(), "Invalid quantity: 0 (must be at least 1)");

        let err = CoreError::ItemNotFound {
            product_id: "p-42".to_string(),
        };
        assert_eq!(err.to_string(), "Product p-42 not in cart");
    }

    #[test]
    fn test_checkout_invalid_lists_all_fields() {
        let err = ValidationError::CheckoutInvalid {
            fields: vec![
                FieldError::new("address", "is required"),
                FieldError::new("cvc", "must be exactly 3 digits"),
            ],
        };
        let msg = err.to_string();
        assert!(msg.contains("address: is required"));
        assert!(msg.contains("cvc: must be exactly 3 digits"));
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "phone".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
