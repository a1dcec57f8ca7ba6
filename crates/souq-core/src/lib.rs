//! # souq-core: Pure Business Logic for Souq
//!
//! This crate is the **heart** of the Souq marketplace client. It contains
//! all business logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Souq Client Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    souq-api (REST consumer)                     │   │
//! │  │    Session ──► CartStore ──► PromoEngine ──► CheckoutFlow       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ souq-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │ validation│  │   │
//! │  │   │  Snapshot │  │   Money   │  │   Cart    │  │  checkout │  │   │
//! │  │   │   Role    │  │  Totals   │  │ CartItem  │  │   rules   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 Marketplace REST Backend (external)             │   │
//! │  │        /cart/  /apply-promo/  /checkout/  (bearer token)        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (ProductSnapshot, PromoDiscount, Role, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - The cart and its mutation rules
//! - [`error`] - Domain error types
//! - [`validation`] - Checkout field validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Network and file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use souq_core::cart::Cart;
//! use souq_core::money::Money;
//! use souq_core::types::{OrderTotals, ProductSnapshot, PromoDiscount};
//!
//! let mut cart = Cart::new();
//! cart.add_item(
//!     &ProductSnapshot {
//!         id: "p-1".into(),
//!         name: "Olive Oil 1L".into(),
//!         price_cents: 1000,
//!         store_name: "Corner Grocer".into(),
//!         image: None,
//!     },
//!     2,
//! )
//! .unwrap();
//!
//! let totals = OrderTotals::compute(
//!     cart.subtotal(),
//!     Some(&PromoDiscount { code: "SAVE3".into(), amount_off_cents: 300 }),
//!     Money::from_cents(souq_core::DEFAULT_DELIVERY_FEE_CENTS),
//! );
//! assert_eq!(totals.total_cents, 2200); // 2×$10.00 − $3.00 + $5.00
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use souq_core::Money` instead of
// `use souq_core::money::Money`

pub use cart::{Cart, CartItem};
pub use error::{CoreError, CoreResult, FieldError, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum distinct items allowed in a single cart
///
/// Prevents runaway carts and keeps order payloads reasonable.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum quantity of a single item in cart
///
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Default delivery fee in cents applied at checkout ($5.00)
///
/// Overridable via configuration in souq-api; the backend may replace it
/// with a computed fee on the created order.
pub const DEFAULT_DELIVERY_FEE_CENTS: i64 = 500;
