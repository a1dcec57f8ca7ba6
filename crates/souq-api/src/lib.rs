//! # souq-api: REST Consumer for the Souq Marketplace Backend
//!
//! This crate owns every interaction with the marketplace backend:
//! sessions, the cart mirror, promo resolution, and order submission.
//!
//! ## Layer Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        souq-api Layers                                  │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  CheckoutFlow (checkout.rs)                                      │  │
//! │  │  Idle → Validating → Submitting → {Succeeded | Failed}          │  │
//! │  └────────────────────────────┬─────────────────────────────────────┘  │
//! │                               │                                         │
//! │  ┌────────────────────────────▼─────────────────────────────────────┐  │
//! │  │  CartStore (store.rs)                                            │  │
//! │  │  Server-authoritative cart mirror + applied promo discount       │  │
//! │  └────────────────────────────┬─────────────────────────────────────┘  │
//! │                               │                                         │
//! │  ┌────────────────────────────▼─────────────────────────────────────┐  │
//! │  │  ApiClient (client.rs) + wire DTOs (wire.rs)                     │  │
//! │  │  reqwest, bearer token from an explicit Session                  │  │
//! │  └────────────────────────────┬─────────────────────────────────────┘  │
//! │                               │ HTTP                                    │
//! │                    Marketplace REST backend                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust,no_run
//! use souq_api::{ApiClient, ApiConfig, CartStore, CheckoutFlow, Session};
//! use souq_core::types::{CheckoutForm, PaymentMethod};
//!
//! # async fn run() -> Result<(), souq_api::ApiError> {
//! let session = Session::new("token-from-login", "user-1", "customer");
//! let client = ApiClient::new(ApiConfig::default(), session)?;
//!
//! let mut store = CartStore::new(client);
//! store.refresh().await?;
//! store.set_quantity("p-1", 2).await?;
//! store.apply_promo("SAVE3").await?;
//!
//! let form = CheckoutForm {
//!     address: "12 Market Street".into(),
//!     phone: "0100200300".into(),
//!     payment_method: PaymentMethod::Cash,
//!     card: None,
//! };
//! let mut flow = CheckoutFlow::new();
//! let confirmation = flow.submit(&mut store, &form).await?;
//! println!("order {}", confirmation.order_id);
//! # Ok(())
//! # }
//! ```

pub mod checkout;
pub mod client;
pub mod config;
pub mod error;
pub mod session;
pub mod store;
pub mod wire;

pub use checkout::{CheckoutFlow, CheckoutState};
pub use client::ApiClient;
pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use session::Session;
pub use store::CartStore;
pub use wire::{CheckoutRequest, OrderConfirmation};
