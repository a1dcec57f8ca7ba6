//! # Checkout Validation
//!
//! Field validation for the checkout form.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: THIS MODULE (client-side, before submission)                 │
//! │  ├── address/phone present                                              │
//! │  ├── card number, expiry, CVC format (card payments only)              │
//! │  └── ALL failures aggregated into one CheckoutInvalid                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Backend (authoritative)                                       │
//! │  ├── stock revalidation                                                 │
//! │  └── payment authorization                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Accepted Card Numbers
//! Visa (13 or 16 digits, leading 4) and Mastercard (16 digits, leading
//! 51-55), i.e. the classic pattern
//! `^(4[0-9]{12}([0-9]{3})?|5[1-5][0-9]{14})$`.
//!
//! ## Known Permissiveness
//! Expiry validation checks format only (month 01-12, two-digit year); it
//! does not compare against the current date. A card expired last month
//! still validates here and is rejected by the payment backend instead.

use crate::error::{FieldError, ValidationError};
use crate::types::{CheckoutForm, PaymentMethod};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates the shipping address: non-empty after trimming.
pub fn validate_address(address: &str) -> ValidationResult<()> {
    if address.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "address".to_string(),
        });
    }

    Ok(())
}

/// Validates the phone number: non-empty after trimming.
///
/// Number formats vary too much by region to pin down further; the
/// backend applies its own rules.
pub fn validate_phone(phone: &str) -> ValidationResult<()> {
    if phone.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "phone".to_string(),
        });
    }

    Ok(())
}

/// Validates a Visa or Mastercard card number.
///
/// ## Rules
/// - Visa: 13 or 16 digits, starting with 4
/// - Mastercard: 16 digits, starting with 51-55
///
/// ## Example
/// ```rust
/// use souq_core::validation::validate_card_number;
///
/// assert!(validate_card_number("4111111111111111").is_ok());
/// assert!(validate_card_number("4222222222222").is_ok());      // 13-digit Visa
/// assert!(validate_card_number("601111111111111").is_err());   // wrong prefix
/// ```
pub fn validate_card_number(number: &str) -> ValidationResult<()> {
    let number = number.trim();

    if number.is_empty() {
        return Err(ValidationError::Required {
            field: "card_number".to_string(),
        });
    }

    if !number.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "card_number".to_string(),
            reason: "must contain only digits".to_string(),
        });
    }

    let digits: Vec<u8> = number.bytes().map(|b| b - b'0').collect();
    let accepted = match (digits.first().copied(), digits.len()) {
        // Visa: 4 followed by 12 or 15 digits
        (Some(4), 13) | (Some(4), 16) => true,
        // Mastercard: 51-55 followed by 14 digits
        (Some(5), 16) => matches!(digits.get(1).copied(), Some(1..=5)),
        _ => false,
    };

    if !accepted {
        return Err(ValidationError::InvalidFormat {
            field: "card_number".to_string(),
            reason: "must be a valid Visa or Mastercard number".to_string(),
        });
    }

    Ok(())
}

/// Validates a two-digit expiry month, "01" through "12".
pub fn validate_expiry_month(month: &str) -> ValidationResult<()> {
    let valid = month.len() == 2
        && month.chars().all(|c| c.is_ascii_digit())
        && matches!(month.parse::<u8>(), Ok(1..=12));

    if !valid {
        return Err(ValidationError::InvalidFormat {
            field: "expiry_month".to_string(),
            reason: "must be a two-digit month between 01 and 12".to_string(),
        });
    }

    Ok(())
}

/// Validates a two-digit expiry year.
///
/// No comparison against the current date; see the module docs.
pub fn validate_expiry_year(year: &str) -> ValidationResult<()> {
    if year.len() != 2 || !year.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "expiry_year".to_string(),
            reason: "must be exactly two digits".to_string(),
        });
    }

    Ok(())
}

/// Validates a CVC: exactly 3 digits.
pub fn validate_cvc(cvc: &str) -> ValidationResult<()> {
    if cvc.len() != 3 || !cvc.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "cvc".to_string(),
            reason: "must be exactly 3 digits".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Checkout Form Validator
// =============================================================================

/// Validates the full checkout form before submission.
///
/// All rules are evaluated; failures are aggregated into a single
/// `CheckoutInvalid` listing every failed field, so the user fixes the
/// form in one pass. Submission is blocked until this returns `Ok`.
pub fn validate_checkout(form: &CheckoutForm) -> ValidationResult<()> {
    let mut fields = Vec::new();

    collect(&mut fields, validate_address(&form.address));
    collect(&mut fields, validate_phone(&form.phone));

    if form.payment_method == PaymentMethod::Card {
        match &form.card {
            Some(card) => {
                collect(&mut fields, validate_card_number(&card.number));
                collect(&mut fields, validate_expiry_month(&card.expiry_month));
                collect(&mut fields, validate_expiry_year(&card.expiry_year));
                collect(&mut fields, validate_cvc(&card.cvc));
            }
            None => {
                // Paying by card with no card details: report every field
                for field in ["card_number", "expiry_month", "expiry_year", "cvc"] {
                    fields.push(FieldError::new(field, "is required for card payment"));
                }
            }
        }
    }

    if fields.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::CheckoutInvalid { fields })
    }
}

/// Folds a single-field validation result into the aggregate list.
fn collect(fields: &mut Vec<FieldError>, result: ValidationResult<()>) {
    if let Err(err) = result {
        match err {
            ValidationError::Required { field } => {
                fields.push(FieldError::new(field, "is required"));
            }
            ValidationError::TooLong { field, max } => {
                fields.push(FieldError::new(
                    field,
                    format!("must be at most {} characters", max),
                ));
            }
            ValidationError::InvalidFormat { field, reason } => {
                fields.push(FieldError::new(field, reason));
            }
            ValidationError::CheckoutInvalid { fields: nested } => {
                fields.extend(nested);
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
