//! # API Configuration
//!
//! Connection settings for the marketplace backend.
//!
//! Values can be provided directly or picked up from the environment,
//! in that order of precedence:
//!
//! | Setting            | Env var                   | Default                     |
//! |--------------------|---------------------------|-----------------------------|
//! | Base URL           | `SOUQ_API_URL`            | `http://localhost:8000/api` |
//! | Request timeout    | `SOUQ_TIMEOUT_SECS`       | 30 seconds                  |
//! | Delivery fee       | `SOUQ_DELIVERY_FEE_CENTS` | 500 ($5.00)                 |

use std::time::Duration;

use souq_core::DEFAULT_DELIVERY_FEE_CENTS;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the backend API client.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Backend base URL, without trailing slash
    /// (e.g. "http://localhost:8000/api").
    pub base_url: String,

    /// Per-request timeout applied to the HTTP client.
    pub timeout: Duration,

    /// Delivery fee in cents added to every order total.
    pub delivery_fee_cents: i64,
}

impl ApiConfig {
    /// Creates a config from explicit values with environment fallback.
    pub fn from_env_or(base_url: Option<String>, delivery_fee_cents: Option<i64>) -> Self {
        let base_url = base_url
            .or_else(|| std::env::var("SOUQ_API_URL").ok())
            .unwrap_or_else(|| "http://localhost:8000/api".to_string());

        let timeout_secs = std::env::var("SOUQ_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let delivery_fee_cents = delivery_fee_cents
            .or_else(|| {
                std::env::var("SOUQ_DELIVERY_FEE_CENTS")
                    .ok()
                    .and_then(|v| v.parse::<i64>().ok())
            })
            .unwrap_or(DEFAULT_DELIVERY_FEE_CENTS);

        ApiConfig {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(timeout_secs),
            delivery_fee_cents,
        }
    }

    /// Joins a path onto the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig::from_env_or(None, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_values_win() {
        let config = ApiConfig::from_env_or(Some("https://souq.example/api/".to_string()), Some(0));
        assert_eq!(config.base_url, "https://souq.example/api");
        assert_eq!(config.delivery_fee_cents, 0);
    }

    #[test]
    fn test_endpoint_join() {
        let config = ApiConfig::from_env_or(Some("http://localhost:8000/api".to_string()), None);
        assert_eq!(config.endpoint("cart/"), "http://localhost:8000/api/cart/");
        assert_eq!(
            config.endpoint("/apply-promo/"),
            "http://localhost:8000/api/apply-promo/"
        );
    }

    #[test]
    fn test_defaults() {
        // Not asserting on env-var fallback here: other tests may run in
        // parallel and std::env is process-global.
        let config = ApiConfig::from_env_or(Some("http://localhost:8000/api".to_string()), None);
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }
}
