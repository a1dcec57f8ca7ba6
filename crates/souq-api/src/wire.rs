//! # Wire Types
//!
//! Serde types matching the marketplace backend's JSON contract, and the
//! conversions into domain types.
//!
//! ## Endpoints
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Backend Contract                                 │
//! │                                                                         │
//! │  GET    /cart/          →  CartResponse                                 │
//! │  POST   /cart/          ←  AddItemRequest        →  CartResponse        │
//! │  PUT    /cart/          ←  UpdateCartRequest     →  CartResponse        │
//! │  DELETE /cart/          ←  RemoveItemRequest     →  CartResponse        │
//! │  POST   /apply-promo/   ←  ApplyPromoRequest     →  PromoResponse       │
//! │  POST   /checkout/      ←  CheckoutRequest       →  OrderConfirmation   │
//! │                                                                         │
//! │  All requests carry `Authorization: Bearer <token>`                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Field Names Are The Contract
//! These structs use the backend's snake_case names verbatim
//! (`phone_number`, `visa_number`, `expiry_date`). Do not rename them to
//! taste; the backend predates this client.
//!
//! ## Decimal Prices And Numeric IDs
//! The backend serializes prices and discounts from decimal columns, so
//! they arrive as quoted strings (`"price": "10.00"`) or, depending on
//! renderer settings, as plain numbers. IDs are database integers. Both
//! are normalized here: decimals become integer cents, IDs become
//! strings, and the rest of the workspace never sees the raw forms.

use serde::{Deserialize, Serialize};
use souq_core::{Cart, CartItem, CheckoutForm, PaymentMethod, ProductSnapshot};

/// Field-level deserializers absorbing the backend's loose scalar forms.
mod flex {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(i64),
        Text(String),
    }

    /// Accepts a JSON number or string, yielding the ID as a string.
    pub fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match RawId::deserialize(deserializer)? {
            RawId::Number(n) => n.to_string(),
            RawId::Text(s) => s,
        })
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawDecimal {
        Number(f64),
        Text(String),
    }

    /// Accepts a decimal as a JSON number or a quoted string ("10.00").
    pub fn decimal<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        match RawDecimal::deserialize(deserializer)? {
            RawDecimal::Number(n) => Ok(n),
            RawDecimal::Text(s) => s.trim().parse::<f64>().map_err(serde::de::Error::custom),
        }
    }
}

// =============================================================================
// Cart Payloads
// =============================================================================

/// The store selling a product, as embedded in cart payloads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireStore {
    pub name: String,
}

/// A product as embedded in cart payloads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireProduct {
    /// Numeric database ID; normalized to a string.
    #[serde(deserialize_with = "flex::id_string")]
    pub id: String,
    pub name: String,
    /// Decimal price, e.g. "10.00" or 10.0 for $10.00.
    #[serde(deserialize_with = "flex::decimal")]
    pub price: f64,
    #[serde(default)]
    pub image: Option<String>,
    pub store: WireStore,
}

impl WireProduct {
    /// Freezes this wire product into a domain snapshot (decimal → cents).
    pub fn into_snapshot(self) -> ProductSnapshot {
        ProductSnapshot {
            price_cents: souq_core::Money::from_decimal(self.price).cents(),
            id: self.id,
            name: self.name,
            store_name: self.store.name,
            image: self.image,
        }
    }
}

/// A cart line as reported by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireCartLine {
    /// Backend line ID (not the product ID).
    pub id: i64,
    pub quantity: i64,
    pub product: WireProduct,
}

/// The full cart as reported by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartResponse {
    pub items: Vec<WireCartLine>,
}

impl CartResponse {
    /// Converts the backend's payload into the domain cart.
    ///
    /// The server is authoritative: the returned cart REPLACES local
    /// state, it is never merged into it.
    pub fn into_cart(self) -> Cart {
        let mut cart = Cart::new();
        cart.items = self
            .items
            .into_iter()
            .map(|line| {
                let snapshot = line.product.into_snapshot();
                CartItem::from_snapshot(&snapshot, line.quantity)
            })
            .collect();
        cart
    }
}

/// `POST /cart/` body: adds to a product's quantity (server-side
/// increment, with the backend's stock check applied).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddItemRequest {
    pub product_id: String,
    pub quantity: i64,
}

/// `PUT /cart/` body: sets the quantity for a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateCartRequest {
    pub product_id: String,
    pub quantity: i64,
}

/// `DELETE /cart/` body: removes a product's line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoveItemRequest {
    pub product_id: String,
}

// =============================================================================
// Promo Payloads
// =============================================================================

/// `POST /apply-promo/` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplyPromoRequest {
    pub promo_code: String,
}

/// `POST /apply-promo/` response: the resolved discount as a decimal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromoResponse {
    #[serde(deserialize_with = "flex::decimal")]
    pub discount: f64,
}

// =============================================================================
// Checkout Payloads
// =============================================================================

/// `POST /checkout/` body.
///
/// Card fields are omitted entirely (not null) for cash payments, per
/// the backend contract. `payment_method` for card payments is the
/// historical wire value `"visa"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutRequest {
    pub address: String,
    pub phone_number: String,
    pub payment_method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visa_number: Option<String>,
    /// "MM/YY" format.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cvc: Option<String>,
}

impl CheckoutRequest {
    /// Builds the wire payload from a validated checkout form.
    ///
    /// Call `validation::validate_checkout` first; this constructor
    /// trusts its input and only shapes it for the wire.
    pub fn from_form(form: &CheckoutForm) -> Self {
        let (payment_method, card) = match form.payment_method {
            PaymentMethod::Cash => ("cash", None),
            PaymentMethod::Card => ("visa", form.card.as_ref()),
        };

        CheckoutRequest {
            address: form.address.trim().to_string(),
            phone_number: form.phone.trim().to_string(),
            payment_method: payment_method.to_string(),
            visa_number: card.map(|c| c.number.clone()),
            expiry_date: card.map(|c| c.expiry_date()),
            cvc: card.map(|c| c.cvc.clone()),
        }
    }
}

/// `POST /checkout/` response: the created order.
///
/// The backend returns the full order record; only the identifier and
/// status matter here, the rest is ignored on deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderConfirmation {
    /// Backend identifier for the created order. A numeric `id` on the
    /// wire, normalized to a string.
    #[serde(rename = "id", deserialize_with = "flex::id_string")]
    pub order_id: String,
    /// Order status as reported by the backend ("pending", ...).
    #[serde(default)]
    pub status: Option<String>,
}

// =============================================================================
// Unit Tests
// =============================================================================
