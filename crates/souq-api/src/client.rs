//! # API Client
//!
//! HTTP client wrapper for the marketplace backend.
//!
//! ## Request Shape
//! Every method renders the session's bearer token, sends one request,
//! and maps the response:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Status Mapping                                     │
//! │                                                                         │
//! │  401 / 403          → ApiError::Unauthenticated (re-login)              │
//! │  4xx on /apply-promo → ApiError::InvalidPromoCode                       │
//! │  any failure on /checkout → ApiError::OrderSubmissionFailed             │
//! │  other non-2xx      → ApiError::Backend { status }                      │
//! │  transport error    → ApiError::Connection                              │
//! │  body mismatch      → ApiError::InvalidResponse                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The client is deliberately thin: it does not hold cart state. The
//! [`CartStore`](crate::store::CartStore) layers the server-authoritative
//! state handling on top.

use reqwest::StatusCode;
use tracing::{debug, info, warn};

use souq_core::Cart;

use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult};
use crate::session::Session;
use crate::wire::{
    AddItemRequest, ApplyPromoRequest, CartResponse, CheckoutRequest, OrderConfirmation,
    PromoResponse, RemoveItemRequest, UpdateCartRequest,
};

/// HTTP client for the marketplace backend.
///
/// Holds the session explicitly; there is no ambient token. Cloning is
/// cheap (`reqwest::Client` is an `Arc` internally).
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    config: ApiConfig,
    session: Session,
}

impl ApiClient {
    /// Creates a client for the given backend and session.
    pub fn new(config: ApiConfig, session: Session) -> ApiResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::Connection(format!("Failed to build HTTP client: {}", e)))?;

        Ok(ApiClient {
            client,
            config,
            session,
        })
    }

    /// The configured delivery fee, passed through for total computation.
    pub fn delivery_fee_cents(&self) -> i64 {
        self.config.delivery_fee_cents
    }

    /// The session this client authenticates as.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Fetches the current cart. `GET /cart/`
    pub async fn fetch_cart(&self) -> ApiResult<Cart> {
        let bearer = self.session.bearer()?;
        let url = self.config.endpoint("cart/");
        debug!(url = %url, "fetch_cart");

        let resp = self
            .client
            .get(&url)
            .header(reqwest::header::AUTHORIZATION, bearer)
            .send()
            .await
            .map_err(|e| ApiError::Connection(format!("Failed to fetch cart: {}", e)))?;

        let response: CartResponse = Self::parse(resp).await?;
        Ok(response.into_cart())
    }

    /// Adds to a product's quantity in the server cart. `POST /cart/`
    ///
    /// The increment happens server-side, so two tabs adding the same
    /// product both land instead of overwriting each other.
    pub async fn add_item(&self, product_id: &str, quantity: i64) -> ApiResult<Cart> {
        self.session.require_shopper()?;
        let bearer = self.session.bearer()?;
        let url = self.config.endpoint("cart/");
        debug!(product_id = %product_id, quantity = %quantity, "add_item");

        let resp = self
            .client
            .post(&url)
            .header(reqwest::header::AUTHORIZATION, bearer)
            .json(&AddItemRequest {
                product_id: product_id.to_string(),
                quantity,
            })
            .send()
            .await
            .map_err(|e| ApiError::Connection(format!("Failed to add item: {}", e)))?;

        let response: CartResponse = Self::parse(resp).await?;
        Ok(response.into_cart())
    }

    /// Sets the quantity of a product in the server cart. `PUT /cart/`
    ///
    /// Returns the updated cart exactly as the server reports it.
    pub async fn set_quantity(&self, product_id: &str, quantity: i64) -> ApiResult<Cart> {
        self.session.require_shopper()?;
        let bearer = self.session.bearer()?;
        let url = self.config.endpoint("cart/");
        debug!(product_id = %product_id, quantity = %quantity, "set_quantity");

        let resp = self
            .client
            .put(&url)
            .header(reqwest::header::AUTHORIZATION, bearer)
            .json(&UpdateCartRequest {
                product_id: product_id.to_string(),
                quantity,
            })
            .send()
            .await
            .map_err(|e| ApiError::Connection(format!("Failed to update cart: {}", e)))?;

        let response: CartResponse = Self::parse(resp).await?;
        Ok(response.into_cart())
    }

    /// Removes a product's line from the server cart. `DELETE /cart/`
    pub async fn remove_item(&self, product_id: &str) -> ApiResult<Cart> {
        self.session.require_shopper()?;
        let bearer = self.session.bearer()?;
        let url = self.config.endpoint("cart/");
        debug!(product_id = %product_id, "remove_item");

        let resp = self
            .client
            .delete(&url)
            .header(reqwest::header::AUTHORIZATION, bearer)
            .json(&RemoveItemRequest {
                product_id: product_id.to_string(),
            })
            .send()
            .await
            .map_err(|e| ApiError::Connection(format!("Failed to remove item: {}", e)))?;

        let response: CartResponse = Self::parse(resp).await?;
        Ok(response.into_cart())
    }

    /// Resolves a promo code. `POST /apply-promo/`
    ///
    /// Any 4xx from the backend means the code was not recognized.
    pub async fn apply_promo(&self, code: &str) -> ApiResult<PromoResponse> {
        let bearer = self.session.bearer()?;
        let url = self.config.endpoint("apply-promo/");
        debug!(code = %code, "apply_promo");

        let resp = self
            .client
            .post(&url)
            .header(reqwest::header::AUTHORIZATION, bearer)
            .json(&ApplyPromoRequest {
                promo_code: code.to_string(),
            })
            .send()
            .await
            .map_err(|e| ApiError::Connection(format!("Failed to apply promo: {}", e)))?;

        if resp.status().is_client_error() {
            warn!(code = %code, status = %resp.status(), "Promo code rejected");
            return Err(ApiError::InvalidPromoCode {
                code: code.to_string(),
            });
        }

        Self::parse(resp).await
    }

    /// Submits the order. `POST /checkout/`
    ///
    /// Every failure path here maps to `OrderSubmissionFailed` so the
    /// caller knows the cart must be preserved for retry. 401/403 still
    /// map to `Unauthenticated` (the session died, not the order).
    pub async fn submit_checkout(&self, request: &CheckoutRequest) -> ApiResult<OrderConfirmation> {
        self.session.require_shopper()?;
        let bearer = self.session.bearer()?;
        let url = self.config.endpoint("checkout/");
        debug!(payment_method = %request.payment_method, "submit_checkout");

        let resp = self
            .client
            .post(&url)
            .header(reqwest::header::AUTHORIZATION, bearer)
            .json(request)
            .send()
            .await
            .map_err(|e| ApiError::OrderSubmissionFailed {
                reason: format!("Network error: {}", e),
            })?;

        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ApiError::Unauthenticated);
        }
        if !status.is_success() {
            return Err(ApiError::OrderSubmissionFailed {
                reason: format!("Backend returned HTTP {}", status.as_u16()),
            });
        }

        let confirmation: OrderConfirmation = resp.json().await.map_err(|e| {
            // The order may have been created; surface it as a submission
            // failure so the user re-checks before retrying.
            ApiError::OrderSubmissionFailed {
                reason: format!("Unreadable confirmation: {}", e),
            }
        })?;

        info!(order_id = %confirmation.order_id, "Order submitted");
        Ok(confirmation)
    }

    /// Shared response handling for cart and promo endpoints.
    async fn parse<T: serde::de::DeserializeOwned>(resp: reqwest::Response) -> ApiResult<T> {
        let status = resp.status();

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ApiError::Unauthenticated);
        }
        if !status.is_success() {
            return Err(ApiError::Backend {
                status: status.as_u16(),
            });
        }

        resp.json::<T>()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_with(session: Session) -> ApiClient {
        let config = ApiConfig::from_env_or(Some("http://localhost:8000/api".to_string()), None);
        ApiClient::new(config, session).unwrap()
    }

    #[tokio::test]
    async fn test_missing_token_refused_before_any_request() {
        // No server is listening: if the session guard did not run first,
        // these calls would surface Connection instead of Unauthenticated.
        let client = client_with(Session::new("", "user-1", "customer"));

        let err = client.fetch_cart().await.unwrap_err();
        assert!(matches!(err, ApiError::Unauthenticated));

        let err = client.set_quantity("p-1", 2).await.unwrap_err();
        assert!(matches!(err, ApiError::Unauthenticated));

        let err = client.add_item("p-1", 1).await.unwrap_err();
        assert!(matches!(err, ApiError::Unauthenticated));
    }

    #[tokio::test]
    async fn test_admin_refused_cart_mutation() {
        let client = client_with(Session::new("tok", "user-1", "admin"));
        let err = client.set_quantity("p-1", 2).await.unwrap_err();
        assert!(matches!(err, ApiError::Forbidden { .. }));

        let err = client.add_item("p-1", 1).await.unwrap_err();
        assert!(matches!(err, ApiError::Forbidden { .. }));
    }

    #[test]
    fn test_delivery_fee_passthrough() {
        let config = ApiConfig::from_env_or(Some("http://localhost:8000/api".to_string()), Some(750));
        let client = ApiClient::new(config, Session::new("tok", "u", "customer")).unwrap();
        assert_eq!(client.delivery_fee_cents(), 750);
    }
}
