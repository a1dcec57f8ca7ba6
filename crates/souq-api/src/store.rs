//! # Cart Store
//!
//! The session's cart, mirrored from the authoritative server cart.
//!
//! ## Server-Authoritative Updates
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   Mutation Round-Trip                                   │
//! │                                                                         │
//! │  set_quantity(p, 3)                                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  PUT /cart/ { product_id, quantity } ───────► backend                   │
//! │       │                                          │                      │
//! │       │              ┌───────────────────────────┘                      │
//! │       ▼              ▼                                                  │
//! │  Ok(CartResponse) ── REPLACE local cart wholesale                       │
//! │  Err(..) ─────────── local cart UNCHANGED (no optimistic update,        │
//! │                      so there is nothing to roll back)                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Concurrent multi-tab writes are not reconciled; the backend applies
//! last-write-wins and the next response reflects it.
//!
//! ## Promo State
//! The applied discount lives here, next to the cart it discounts. A
//! failed `apply_promo` leaves the previously applied discount in place.

use tracing::{debug, info, warn};

use souq_core::{Cart, CoreError, Money, OrderTotals, PromoDiscount};

use crate::client::ApiClient;
use crate::error::{ApiError, ApiResult};

/// Local mirror of the server cart, plus the applied promo discount.
#[derive(Debug)]
pub struct CartStore {
    client: ApiClient,
    cart: Cart,
    discount: Option<PromoDiscount>,
}

impl CartStore {
    /// Creates an empty store for the session behind `client`.
    ///
    /// Call [`refresh`](Self::refresh) to load the server cart.
    pub fn new(client: ApiClient) -> Self {
        CartStore {
            client,
            cart: Cart::new(),
            discount: None,
        }
    }

    /// Read access to the mirrored cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The currently applied promo discount, if any.
    pub fn discount(&self) -> Option<&PromoDiscount> {
        self.discount.as_ref()
    }

    /// The client this store mutates through.
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Reloads the cart from the server.
    pub async fn refresh(&mut self) -> ApiResult<()> {
        self.cart = self.client.fetch_cart().await?;
        debug!(items = self.cart.item_count(), "Cart refreshed");
        Ok(())
    }

    /// Sets the quantity of a product on the server cart.
    ///
    /// ## Behavior
    /// - quantity < 1 removes the line (mirrors the cart rule)
    /// - `ItemNotFound` when lowering a product that is not in the cart
    /// - on any error, local state is left unchanged
    pub async fn set_quantity(&mut self, product_id: &str, quantity: i64) -> ApiResult<()> {
        if quantity < 1 {
            if !self.cart.contains(product_id) {
                return Err(ApiError::Core(CoreError::ItemNotFound {
                    product_id: product_id.to_string(),
                }));
            }
            return self.remove_item(product_id).await;
        }

        if quantity > souq_core::MAX_ITEM_QUANTITY {
            return Err(ApiError::Core(CoreError::QuantityTooLarge {
                requested: quantity,
                max: souq_core::MAX_ITEM_QUANTITY,
            }));
        }

        self.cart = self.client.set_quantity(product_id, quantity).await?;
        debug!(product_id = %product_id, quantity = %quantity, "Quantity set");
        Ok(())
    }

    /// Adds to a product's quantity (new line starts at `quantity`).
    ///
    /// The backend increments server-side and applies its stock check,
    /// so concurrent adds from two tabs both take effect. The quantity
    /// cap is checked against the mirrored line before sending.
    pub async fn add_item(&mut self, product_id: &str, quantity: i64) -> ApiResult<()> {
        if quantity < 1 {
            return Err(ApiError::Core(CoreError::InvalidQuantity { quantity }));
        }

        let current = self
            .cart
            .items
            .iter()
            .find(|i| i.product_id == product_id)
            .map(|i| i.quantity)
            .unwrap_or(0);
        if current + quantity > souq_core::MAX_ITEM_QUANTITY {
            return Err(ApiError::Core(CoreError::QuantityTooLarge {
                requested: current + quantity,
                max: souq_core::MAX_ITEM_QUANTITY,
            }));
        }

        self.cart = self.client.add_item(product_id, quantity).await?;
        debug!(product_id = %product_id, quantity = %quantity, "Item added");
        Ok(())
    }

    /// Removes a product's line from the server cart.
    ///
    /// No-op server-side when the product is absent; the response is
    /// mirrored either way.
    pub async fn remove_item(&mut self, product_id: &str) -> ApiResult<()> {
        self.cart = self.client.remove_item(product_id).await?;
        debug!(product_id = %product_id, "Item removed");
        Ok(())
    }

    /// Applies a promo code via the backend resolver.
    ///
    /// ## Behavior
    /// - empty code (after trim) → `InvalidPromoCode` without a request
    /// - backend rejection → `InvalidPromoCode`; the PRIOR discount (if
    ///   any) stays applied
    /// - success → the new discount replaces the prior one
    pub async fn apply_promo(&mut self, code: &str) -> ApiResult<Money> {
        let code = code.trim();
        if code.is_empty() {
            return Err(ApiError::InvalidPromoCode {
                code: String::new(),
            });
        }

        match self.client.apply_promo(code).await {
            Ok(response) => {
                let amount_off = Money::from_decimal(response.discount);
                info!(code = %code, amount_off = %amount_off, "Promo applied");
                self.discount = Some(PromoDiscount {
                    code: code.to_string(),
                    amount_off_cents: amount_off.cents(),
                });
                Ok(amount_off)
            }
            Err(err) => {
                warn!(code = %code, error = %err, "Promo rejected, keeping prior discount");
                Err(err)
            }
        }
    }

    /// Computes the order totals for the current cart, discount, and
    /// configured delivery fee. Never negative before the fee.
    pub fn totals(&self) -> OrderTotals {
        OrderTotals::compute(
            self.cart.subtotal(),
            self.discount.as_ref(),
            Money::from_cents(self.client.delivery_fee_cents()),
        )
    }

    /// Test-only mutable access for seeding the mirror without a server.
    #[cfg(test)]
    pub(crate) fn cart_mut(&mut self) -> &mut Cart {
        &mut self.cart
    }

    /// Clears the mirrored cart and discount after a successful order.
    ///
    /// The backend clears its cart as part of order creation; this keeps
    /// the mirror in step without another fetch.
    pub(crate) fn clear_after_order(&mut self) {
        self.cart.clear();
        self.discount = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;
    use crate::session::Session;
    use souq_core::{CartItem, ProductSnapshot};

    fn store_with_items(items: Vec<(&str, i64, i64)>) -> CartStore {
        let config = ApiConfig::from_env_or(Some("http://localhost:8000/api".to_string()), None);
        let client = ApiClient::new(config, Session::new("tok", "u", "customer")).unwrap();
        let mut store = CartStore::new(client);
        for (id, price, qty) in items {
            let snapshot = ProductSnapshot {
                id: id.to_string(),
                name: format!("Product {}", id),
                price_cents: price,
                store_name: "Test Store".to_string(),
                image: None,
            };
            store.cart.items.push(CartItem::from_snapshot(&snapshot, qty));
        }
        store
    }

    #[test]
    fn test_totals_with_discount_and_fee() {
        // $10.00 × 2, $3.00 discount, $5.00 delivery → $22.00
        let mut store = store_with_items(vec![("p-1", 1000, 2)]);
        store.discount = Some(PromoDiscount {
            code: "SAVE3".to_string(),
            amount_off_cents: 300,
        });

        let totals = store.totals();
        assert_eq!(totals.subtotal_cents, 2000);
        assert_eq!(totals.total_cents, 2200);
    }

    #[test]
    fn test_totals_never_negative_before_fee() {
        let mut store = store_with_items(vec![("p-1", 100, 1)]);
        store.discount = Some(PromoDiscount {
            code: "HUGE".to_string(),
            amount_off_cents: 99_999,
        });

        assert_eq!(store.totals().total_cents, 500); // fee only
    }

    #[tokio::test]
    async fn test_empty_promo_code_rejected_locally() {
        let mut store = store_with_items(vec![]);
        let err = store.apply_promo("   ").await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidPromoCode { .. }));
    }

    #[tokio::test]
    async fn test_set_quantity_zero_on_missing_product() {
        let mut store = store_with_items(vec![]);
        let err = store.set_quantity("ghost", 0).await.unwrap_err();
        assert!(matches!(
            err,
            ApiError::Core(CoreError::ItemNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_add_item_rejects_bad_quantity_locally() {
        let mut store = store_with_items(vec![]);
        let err = store.add_item("p-1", 0).await.unwrap_err();
        assert!(matches!(
            err,
            ApiError::Core(CoreError::InvalidQuantity { quantity: 0 })
        ));
    }

    #[tokio::test]
    async fn test_add_item_rejects_cap_overflow_locally() {
        let mut store = store_with_items(vec![("p-1", 100, souq_core::MAX_ITEM_QUANTITY)]);
        let err = store.add_item("p-1", 1).await.unwrap_err();
        assert!(matches!(
            err,
            ApiError::Core(CoreError::QuantityTooLarge { .. })
        ));
        // Mirror untouched by the rejected add
        assert_eq!(store.cart().total_quantity(), souq_core::MAX_ITEM_QUANTITY);
    }

    #[test]
    fn test_clear_after_order() {
        let mut store = store_with_items(vec![("p-1", 1000, 2)]);
        store.discount = Some(PromoDiscount {
            code: "SAVE3".to_string(),
            amount_off_cents: 300,
        });

        store.clear_after_order();
        assert!(store.cart().is_empty());
        assert!(store.discount().is_none());
    }
}
