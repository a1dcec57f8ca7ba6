//! # Cart
//!
//! The session-local shopping cart and its mutation rules.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Cart Operations                                   │
//! │                                                                         │
//! │  User Action              Operation               Cart Change           │
//! │  ───────────              ─────────               ───────────           │
//! │                                                                         │
//! │  Click Product ──────────► add_item() ──────────► line +qty or insert  │
//! │                                                                         │
//! │  Change Quantity ────────► update_quantity() ───► line.qty = n         │
//! │                            (n < 1 removes the line)                     │
//! │                                                                         │
//! │  Click Remove ───────────► remove_item() ───────► line deleted          │
//! │                            (no-op when absent)                          │
//! │                                                                         │
//! │  Order Submitted ────────► clear() ─────────────► empty cart            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Lines are unique by `product_id`; adding the same product again
//!   increases its quantity.
//! - Every line has quantity ≥ 1; an update below 1 removes the line.
//! - Stock ceilings are enforced by the backend (the caller), never here.
//! - Line order is insertion order, preserved across updates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::ProductSnapshot;
use crate::{MAX_CART_ITEMS, MAX_ITEM_QUANTITY};

// =============================================================================
// Cart Item
// =============================================================================

/// A line in the shopping cart.
///
/// Product data is frozen at the time the line was created (snapshot
/// pattern): the cart keeps displaying the price the user saw even if
/// the seller changes it afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Product ID (backend identifier).
    pub product_id: String,

    /// Product name at time of adding (frozen).
    pub name: String,

    /// Selling store at time of adding (frozen).
    pub store_name: String,

    /// Unit price in cents at time of adding (frozen).
    pub unit_price_cents: i64,

    /// Quantity in cart, always ≥ 1.
    pub quantity: i64,

    /// When this line was created.
    pub added_at: DateTime<Utc>,
}

impl CartItem {
    /// Creates a new cart line from a product snapshot and quantity.
    pub fn from_snapshot(product: &ProductSnapshot, quantity: i64) -> Self {
        CartItem {
            product_id: product.id.clone(),
            name: product.name.clone(),
            store_name: product.store_name.clone(),
            unit_price_cents: product.price_cents,
            quantity,
            added_at: Utc::now(),
        }
    }

    /// The line total (unit price × quantity).
    pub fn line_total_cents(&self) -> i64 {
        self.unit_price_cents * self.quantity
    }

    /// The line total as Money.
    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_cents(self.line_total_cents())
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart: an ordered collection of lines, unique by product.
///
/// Created empty at session start, mutated through the operations below,
/// cleared on successful order submission.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Lines in the cart, in insertion order.
    pub items: Vec<CartItem>,

    /// When the cart was created or last cleared.
    pub created_at: DateTime<Utc>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart {
            items: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Adds a product to the cart or increases its quantity if present.
    ///
    /// ## Errors
    /// - `InvalidQuantity` if `quantity` < 1
    /// - `QuantityTooLarge` if the resulting quantity exceeds the cap
    /// - `CartTooLarge` when inserting beyond the distinct-item cap
    pub fn add_item(&mut self, product: &ProductSnapshot, quantity: i64) -> CoreResult<()> {
        if quantity < 1 {
            return Err(CoreError::InvalidQuantity { quantity });
        }

        if let Some(item) = self.items.iter_mut().find(|i| i.product_id == product.id) {
            let new_qty = item.quantity + quantity;
            if new_qty > MAX_ITEM_QUANTITY {
                return Err(CoreError::QuantityTooLarge {
                    requested: new_qty,
                    max: MAX_ITEM_QUANTITY,
                });
            }
            item.quantity = new_qty;
            return Ok(());
        }

        if quantity > MAX_ITEM_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested: quantity,
                max: MAX_ITEM_QUANTITY,
            });
        }

        if self.items.len() >= MAX_CART_ITEMS {
            return Err(CoreError::CartTooLarge {
                max: MAX_CART_ITEMS,
            });
        }

        self.items.push(CartItem::from_snapshot(product, quantity));
        Ok(())
    }

    /// Replaces the quantity of a line.
    ///
    /// ## Behavior
    /// - Quantity below 1 removes the line
    /// - `ItemNotFound` if the product is not in the cart
    /// - `QuantityTooLarge` beyond the cap
    pub fn update_quantity(&mut self, product_id: &str, quantity: i64) -> CoreResult<()> {
        if quantity < 1 {
            if !self.contains(product_id) {
                return Err(CoreError::ItemNotFound {
                    product_id: product_id.to_string(),
                });
            }
            self.remove_item(product_id);
            return Ok(());
        }

        if quantity > MAX_ITEM_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested: quantity,
                max: MAX_ITEM_QUANTITY,
            });
        }

        match self.items.iter_mut().find(|i| i.product_id == product_id) {
            Some(item) => {
                item.quantity = quantity;
                Ok(())
            }
            None => Err(CoreError::ItemNotFound {
                product_id: product_id.to_string(),
            }),
        }
    }

    /// Deletes a line unconditionally. No-op if the product is absent.
    pub fn remove_item(&mut self, product_id: &str) {
        self.items.retain(|i| i.product_id != product_id);
    }

    /// Whether the cart holds a line for this product.
    pub fn contains(&self, product_id: &str) -> bool {
        self.items.iter().any(|i| i.product_id == product_id)
    }

    /// Clears all lines from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
        self.created_at = Utc::now();
    }

    /// Number of distinct lines in the cart.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Total quantity across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// The subtotal (sum of line totals). Zero for an empty cart.
    pub fn subtotal_cents(&self) -> i64 {
        self.items.iter().map(|i| i.line_total_cents()).sum()
    }

    /// The subtotal as Money.
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_cents(self.subtotal_cents())
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(id: &str, price_cents: i64) -> ProductSnapshot {
        ProductSnapshot {
            id: id.to_string(),
            name: format!("Product {}", id),
            price_cents,
            store_name: "Test Store".to_string(),
            image: None,
        }
    }

    #[test]
    fn test_add_item_increases_subtotal_by_line_total() {
        let mut cart = Cart::new();
        let product = snapshot("1", 1000); // $10.00

        cart.add_item(&product, 2).unwrap();

        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.total_quantity(), 2);
        assert_eq!(cart.subtotal_cents(), 2000); // 2 × $10.00
    }

    #[test]
    fn test_add_same_product_increments_quantity() {
        let mut cart = Cart::new();
        let product = snapshot("1", 999);

        cart.add_item(&product, 2).unwrap();
        cart.add_item(&product, 3).unwrap();

        assert_eq!(cart.item_count(), 1); // Still one distinct line
        assert_eq!(cart.total_quantity(), 5);
    }

    #[test]
    fn test_add_item_rejects_quantity_below_one() {
        let mut cart = Cart::new();
        let product = snapshot("1", 999);

        let err = cart.add_item(&product, 0).unwrap_err();
        assert!(matches!(err, CoreError::InvalidQuantity { quantity: 0 }));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity_replaces() {
        let mut cart = Cart::new();
        cart.add_item(&snapshot("1", 500), 2).unwrap();

        cart.update_quantity("1", 7).unwrap();
        assert_eq!(cart.total_quantity(), 7);
        assert_eq!(cart.subtotal_cents(), 3500);
    }

    #[test]
    fn test_update_quantity_zero_removes_line() {
        let mut cart = Cart::new();
        cart.add_item(&snapshot("1", 500), 2).unwrap();

        cart.update_quantity("1", 0).unwrap();
        assert!(!cart.contains("1"));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity_missing_product() {
        let mut cart = Cart::new();
        let err = cart.update_quantity("ghost", 3).unwrap_err();
        assert!(matches!(err, CoreError::ItemNotFound { .. }));
    }

    #[test]
    fn test_remove_item_is_noop_when_absent() {
        let mut cart = Cart::new();
        cart.add_item(&snapshot("1", 500), 1).unwrap();

        cart.remove_item("not-here");
        assert_eq!(cart.item_count(), 1);

        cart.remove_item("1");
        assert!(cart.is_empty());
    }

    #[test]
    fn test_empty_cart_subtotal_is_zero() {
        let cart = Cart::new();
        assert_eq!(cart.subtotal_cents(), 0);
    }

    #[test]
    fn test_quantity_cap() {
        let mut cart = Cart::new();
        let product = snapshot("1", 100);

        assert!(cart.add_item(&product, MAX_ITEM_QUANTITY).is_ok());
        let err = cart.add_item(&product, 1).unwrap_err();
        assert!(matches!(err, CoreError::QuantityTooLarge { .. }));
    }

    #[test]
    fn test_cart_item_serializes_camel_case() {
        let item = CartItem::from_snapshot(&snapshot("p-1", 1000), 2);
        let json = serde_json::to_value(&item).unwrap();

        assert_eq!(json["productId"], "p-1");
        assert_eq!(json["unitPriceCents"], 1000);
        assert_eq!(json["storeName"], "Test Store");
    }

    #[test]
    fn test_cart_clear() {
        let mut cart = Cart::new();
        cart.add_item(&snapshot("1", 999), 2).unwrap();
        assert!(!cart.is_empty());

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.subtotal_cents(), 0);
    }
}
