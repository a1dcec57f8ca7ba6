//! # Checkout Flow
//!
//! The checkout state machine and order submission.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Checkout States                                    │
//! │                                                                         │
//! │   ┌──────┐  submit()  ┌────────────┐  fields ok  ┌────────────┐        │
//! │   │ Idle │───────────►│ Validating │────────────►│ Submitting │        │
//! │   └──────┘            └─────┬──────┘             └─────┬──────┘        │
//! │      ▲                      │ fields bad               │               │
//! │      │                      ▼                          ▼               │
//! │      │                ┌──────────┐   POST fails  ┌───────────┐         │
//! │      └────reset()─────│  Failed  │◄──────────────│ Succeeded │         │
//! │                       └──────────┘   POST ok ───►└───────────┘         │
//! │                                                                         │
//! │   Failed → Idle only on explicit reset() (user retry).                  │
//! │   No automatic retry, ever.                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## What Survives a Failure
//! Everything. The cart store and the checkout form are left exactly as
//! they were, for both validation failures and submission failures, so
//! the user resubmits without re-entering anything. Only a SUCCESSFUL
//! submission clears the cart.

use tracing::{info, warn};

use souq_core::{validation, CheckoutForm};

use crate::error::{ApiError, ApiResult};
use crate::store::CartStore;
use crate::wire::{CheckoutRequest, OrderConfirmation};

/// Where a checkout attempt currently stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutState {
    /// No attempt in progress.
    Idle,
    /// Form fields are being validated locally.
    Validating,
    /// The order is in flight to the backend.
    Submitting,
    /// The backend created the order.
    Succeeded { order_id: String },
    /// Validation or submission failed; cart and form are intact.
    Failed { reason: String },
}

/// Drives one checkout attempt at a time.
#[derive(Debug)]
pub struct CheckoutFlow {
    state: CheckoutState,
}

impl CheckoutFlow {
    pub fn new() -> Self {
        CheckoutFlow {
            state: CheckoutState::Idle,
        }
    }

    /// The current state, for rendering progress or errors.
    pub fn state(&self) -> &CheckoutState {
        &self.state
    }

    /// Returns to `Idle` after a terminal state, for a user-driven retry
    /// or a fresh order. No-op while an attempt is in flight.
    pub fn reset(&mut self) {
        if matches!(
            self.state,
            CheckoutState::Failed { .. } | CheckoutState::Succeeded { .. }
        ) {
            self.state = CheckoutState::Idle;
        }
    }

    /// Validates the form and submits the order.
    ///
    /// ## Flow
    /// 1. `Validating`: run the full field validator; an aggregated
    ///    failure stops here and the cart stays populated.
    /// 2. `Submitting`: shape the wire payload and POST it.
    /// 3. On success: clear the cart store, return the confirmation.
    /// 4. On failure: cart and form untouched; state is `Failed`.
    pub async fn submit(
        &mut self,
        store: &mut CartStore,
        form: &CheckoutForm,
    ) -> ApiResult<OrderConfirmation> {
        if store.cart().is_empty() {
            let err = ApiError::OrderSubmissionFailed {
                reason: "Cart is empty".to_string(),
            };
            self.state = CheckoutState::Failed {
                reason: err.to_string(),
            };
            return Err(err);
        }

        self.state = CheckoutState::Validating;
        if let Err(err) = validation::validate_checkout(form) {
            warn!(error = %err, "Checkout blocked by validation");
            self.state = CheckoutState::Failed {
                reason: err.to_string(),
            };
            return Err(err.into());
        }

        self.state = CheckoutState::Submitting;
        let request = CheckoutRequest::from_form(form);
        let client = store.client().clone();

        match client.submit_checkout(&request).await {
            Ok(confirmation) => {
                store.clear_after_order();
                info!(order_id = %confirmation.order_id, "Checkout complete");
                self.state = CheckoutState::Succeeded {
                    order_id: confirmation.order_id.clone(),
                };
                Ok(confirmation)
            }
            Err(err) => {
                warn!(error = %err, "Checkout submission failed, cart preserved");
                self.state = CheckoutState::Failed {
                    reason: err.to_string(),
                };
                Err(err)
            }
        }
    }
}

impl Default for CheckoutFlow {
    fn default() -> Self {
        CheckoutFlow::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ApiClient;
    use crate::config::ApiConfig;
    use crate::session::Session;
    use souq_core::{CartItem, CoreError, PaymentMethod, ProductSnapshot, ValidationError};

    fn store_with_one_item() -> CartStore {
        let config = ApiConfig::from_env_or(Some("http://localhost:8000/api".to_string()), None);
        let client = ApiClient::new(config, Session::new("tok", "u", "customer")).unwrap();
        let mut store = CartStore::new(client);
        let snapshot = ProductSnapshot {
            id: "p-1".to_string(),
            name: "Olive Oil 1L".to_string(),
            price_cents: 1000,
            store_name: "Corner Grocer".to_string(),
            image: None,
        };
        store
            .cart_mut()
            .items
            .push(CartItem::from_snapshot(&snapshot, 2));
        store
    }

    // Run with RUST_LOG=souq_api=debug to see the flow's warn/info lines.
    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    fn valid_cash_form() -> CheckoutForm {
        CheckoutForm {
            address: "12 Market Street".to_string(),
            phone: "0100200300".to_string(),
            payment_method: PaymentMethod::Cash,
            card: None,
        }
    }

    #[tokio::test]
    async fn test_empty_cart_blocks_submission() {
        let config = ApiConfig::from_env_or(Some("http://localhost:8000/api".to_string()), None);
        let client = ApiClient::new(config, Session::new("tok", "u", "customer")).unwrap();
        let mut store = CartStore::new(client);
        let mut flow = CheckoutFlow::new();

        let err = flow.submit(&mut store, &valid_cash_form()).await.unwrap_err();
        assert!(matches!(err, ApiError::OrderSubmissionFailed { .. }));
        assert!(matches!(flow.state(), CheckoutState::Failed { .. }));
    }

    #[tokio::test]
    async fn test_invalid_form_fails_validation_and_keeps_cart() {
        init_tracing();
        let mut store = store_with_one_item();
        let mut flow = CheckoutFlow::new();

        let mut form = valid_cash_form();
        form.address = String::new();

        let err = flow.submit(&mut store, &form).await.unwrap_err();
        match err {
            ApiError::Core(CoreError::Validation(ValidationError::CheckoutInvalid { fields })) => {
                assert_eq!(fields[0].field, "address");
            }
            other => panic!("expected CheckoutInvalid, got {other}"),
        }

        // Cart survives the failed attempt
        assert_eq!(store.cart().item_count(), 1);
        assert!(matches!(flow.state(), CheckoutState::Failed { .. }));
    }

    #[tokio::test]
    async fn test_reset_returns_to_idle_after_failure() {
        let mut store = store_with_one_item();
        let mut flow = CheckoutFlow::new();

        let mut form = valid_cash_form();
        form.phone = String::new();
        let _ = flow.submit(&mut store, &form).await;

        assert!(matches!(flow.state(), CheckoutState::Failed { .. }));
        flow.reset();
        assert_eq!(*flow.state(), CheckoutState::Idle);
    }

    #[test]
    fn test_reset_is_noop_when_idle() {
        let mut flow = CheckoutFlow::new();
        flow.reset();
        assert_eq!(*flow.state(), CheckoutState::Idle);
    }
}
