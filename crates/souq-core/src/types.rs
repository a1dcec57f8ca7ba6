//! # Domain Types
//!
//! Core domain types used throughout Souq.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ ProductSnapshot │   │  PromoDiscount  │   │  CheckoutForm   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  code           │   │  address        │       │
//! │  │  name           │   │  amount_off     │   │  phone          │       │
//! │  │  price_cents    │   └─────────────────┘   │  payment_method │       │
//! │  │  store_name     │                         │  card?          │       │
//! │  └─────────────────┘                         └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  PaymentMethod  │   │      Role       │   │   OrderTotals   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  Cash           │   │  Customer       │   │  subtotal       │       │
//! │  │  Card           │   │  Seller         │   │  discount       │       │
//! │  └─────────────────┘   │  Admin          │   │  delivery_fee   │       │
//! │                        └─────────────────┘   │  total          │       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! The cart freezes product data (`ProductSnapshot`) at the moment the
//! backend reports it. If the seller renames or reprices the product, the
//! cart still displays what the user agreed to; the backend revalidates
//! at checkout.

use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Product Snapshot
// =============================================================================

/// Frozen product data carried inside a cart line.
///
/// Built from the backend's cart payload; never mutated locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSnapshot {
    /// Product ID from the backend.
    pub id: String,

    /// Display name at the time the cart was fetched.
    pub name: String,

    /// Unit price in cents at the time the cart was fetched.
    pub price_cents: i64,

    /// Name of the store selling the product.
    pub store_name: String,

    /// Relative image path on the backend, if any.
    pub image: Option<String>,
}

impl ProductSnapshot {
    /// Returns the unit price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

// =============================================================================
// Promo Discount
// =============================================================================

/// A redeemed promo code and its fixed monetary discount.
///
/// Resolved by the backend; locally we only require the code to be a
/// non-empty string before asking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromoDiscount {
    /// The code the user entered.
    pub code: String,

    /// Amount off the cart subtotal, in cents. Never negative.
    pub amount_off_cents: i64,
}

impl PromoDiscount {
    /// Returns the discount as a Money type.
    #[inline]
    pub fn amount_off(&self) -> Money {
        Money::from_cents(self.amount_off_cents)
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// How the order will be paid.
///
/// The backend's wire value for `Card` is `"visa"` (historical contract);
/// the wire mapping lives in souq-api, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Cash on delivery.
    Cash,
    /// Card payment collected at checkout.
    Card,
}

impl Default for PaymentMethod {
    fn default() -> Self {
        PaymentMethod::Cash
    }
}

// =============================================================================
// Checkout Form
// =============================================================================

/// Card details, required only when paying by card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDetails {
    /// Card number (Visa or Mastercard).
    pub number: String,
    /// Two-digit expiry month, "01"-"12".
    pub expiry_month: String,
    /// Two-digit expiry year.
    pub expiry_year: String,
    /// Three-digit card verification code.
    pub cvc: String,
}

impl CardDetails {
    /// Joins month and year into the backend's "MM/YY" expiry format.
    pub fn expiry_date(&self) -> String {
        format!("{}/{}", self.expiry_month, self.expiry_year)
    }
}

/// Shipping and payment details entered by the user.
///
/// Kept intact across failed submissions so the user never re-enters
/// data after a validation or network error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CheckoutForm {
    /// Shipping address. Required, non-empty after trimming.
    pub address: String,

    /// Contact phone number. Required, non-empty after trimming.
    pub phone: String,

    /// Selected payment method.
    pub payment_method: PaymentMethod,

    /// Card details; must be present iff `payment_method` is `Card`.
    pub card: Option<CardDetails>,
}

// =============================================================================
// Role & Capabilities
// =============================================================================

/// What a session is allowed to do.
///
/// Resolved once from the role at session start, then consulted
/// explicitly, instead of scattering `role == "admin"` string checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    /// May browse, hold a cart, and place orders.
    pub can_shop: bool,
    /// May manage an own store and its products.
    pub can_manage_store: bool,
    /// May administer users, stores and orders platform-wide.
    pub can_administer: bool,
}

/// The role of the authenticated user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Regular shopper.
    Customer,
    /// Store owner; also shops like a customer.
    Seller,
    /// Platform administrator; operates the back office, does not shop.
    Admin,
}

impl Role {
    /// Parses the backend's role string. Unknown roles default to the
    /// least-privileged `Customer`.
    pub fn parse(role: &str) -> Self {
        match role.trim().to_lowercase().as_str() {
            "admin" => Role::Admin,
            "seller" => Role::Seller,
            _ => Role::Customer,
        }
    }

    /// The explicit capability set for this role.
    pub const fn capabilities(&self) -> Capabilities {
        match self {
            Role::Customer => Capabilities {
                can_shop: true,
                can_manage_store: false,
                can_administer: false,
            },
            Role::Seller => Capabilities {
                can_shop: true,
                can_manage_store: true,
                can_administer: false,
            },
            Role::Admin => Capabilities {
                can_shop: false,
                can_manage_store: false,
                can_administer: true,
            },
        }
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::Customer
    }
}

// =============================================================================
// Order Totals
// =============================================================================

/// The computed money summary of an order.
///
/// ## Total Rule
/// `total = max(0, subtotal - discount) + delivery_fee`
///
/// The discount never drives the goods portion negative; the delivery
/// fee is added after flooring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderTotals {
    pub subtotal_cents: i64,
    pub discount_cents: i64,
    pub delivery_fee_cents: i64,
    pub total_cents: i64,
}

impl OrderTotals {
    /// Computes totals from a subtotal, an optional discount, and the
    /// delivery fee.
    pub fn compute(subtotal: Money, discount: Option<&PromoDiscount>, delivery_fee: Money) -> Self {
        let discount_amount = discount.map(|d| d.amount_off()).unwrap_or_default();
        let goods = subtotal.saturating_sub_to_zero(discount_amount);
        OrderTotals {
            subtotal_cents: subtotal.cents(),
            discount_cents: discount_amount.cents(),
            delivery_fee_cents: delivery_fee.cents(),
            total_cents: (goods + delivery_fee).cents(),
        }
    }

    /// The grand total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse() {
        assert_eq!(Role::parse("admin"), Role::Admin);
        assert_eq!(Role::parse("Seller"), Role::Seller);
        assert_eq!(Role::parse("customer"), Role::Customer);
        // Unknown roles fall back to least privilege
        assert_eq!(Role::parse("superuser"), Role::Customer);
        assert_eq!(Role::parse(""), Role::Customer);
    }

    #[test]
    fn test_capabilities_per_role() {
        assert!(Role::Customer.capabilities().can_shop);
        assert!(!Role::Customer.capabilities().can_manage_store);

        assert!(Role::Seller.capabilities().can_shop);
        assert!(Role::Seller.capabilities().can_manage_store);

        assert!(Role::Admin.capabilities().can_administer);
        assert!(!Role::Admin.capabilities().can_shop);
    }

    #[test]
    fn test_card_expiry_date_format() {
        let card = CardDetails {
            number: "4111111111111111".to_string(),
            expiry_month: "01".to_string(),
            expiry_year: "25".to_string(),
            cvc: "123".to_string(),
        };
        assert_eq!(card.expiry_date(), "01/25");
    }

    #[test]
    fn test_order_totals_with_discount_and_fee() {
        // One item at $10.00 × 2, $3.00 promo, $5.00 delivery → $22.00
        let totals = OrderTotals::compute(
            Money::from_cents(2000),
            Some(&PromoDiscount {
                code: "SAVE3".to_string(),
                amount_off_cents: 300,
            }),
            Money::from_cents(500),
        );
        assert_eq!(totals.total_cents, 2200);
        assert_eq!(totals.discount_cents, 300);
    }

    #[test]
    fn test_order_totals_oversized_discount() {
        // Discount larger than subtotal: goods floor at zero, fee still due
        let totals = OrderTotals::compute(
            Money::from_cents(400),
            Some(&PromoDiscount {
                code: "BIG".to_string(),
                amount_off_cents: 10_000,
            }),
            Money::from_cents(500),
        );
        assert_eq!(totals.total_cents, 500);
    }

    #[test]
    fn test_order_totals_no_discount() {
        let totals = OrderTotals::compute(Money::from_cents(1000), None, Money::from_cents(500));
        assert_eq!(totals.total_cents, 1500);
        assert_eq!(totals.discount_cents, 0);
    }
}
