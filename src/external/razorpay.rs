use crate::config::RazorpayConfig;
use crate::error::{AppError, AppResult};
use crate::utils::generate_receipt;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

/// Smallest amount the gateway will accept, in minor currency units.
pub const MIN_ORDER_AMOUNT: i64 = 100;

/// A stalled gateway call fails instead of holding the request open.
const GATEWAY_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(10);

/// Gateway order handle returned to the client verbatim. The client completes
/// payment against it out-of-band; no confirmation step comes back here.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GatewayOrder {
    pub id: String,
    pub amount: i64,
    pub currency: String,
    pub receipt: String,
    pub status: String,
}

#[derive(Clone)]
pub struct RazorpayClient {
    client: Client,
    config: RazorpayConfig,
}

impl RazorpayClient {
    pub fn new(config: RazorpayConfig) -> Self {
        let client = Client::builder()
            .timeout(GATEWAY_TIMEOUT)
            .build()
            .expect("Failed to build gateway HTTP client");
        Self { client, config }
    }

    /// Create a capture-on-payment order with the gateway. The amount is
    /// checked before any network call; gateway and network failures all
    /// surface as `GatewayError` and are never retried here.
    pub async fn create_order(&self, amount: i64, currency: &str) -> AppResult<GatewayOrder> {
        if amount < MIN_ORDER_AMOUNT {
            return Err(AppError::ValidationError("Invalid amount.".to_string()));
        }

        let url = format!("{}/v1/orders", self.config.base_url);
        let receipt = generate_receipt();

        let body = json!({
            "amount": amount,
            "currency": currency,
            "receipt": receipt,
            "payment_capture": 1,
        });

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.config.key_id, Some(&self.config.key_secret))
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::GatewayError(format!("Gateway request failed: {e}")))?;

        if response.status().is_success() {
            let order: GatewayOrder = response
                .json()
                .await
                .map_err(|e| AppError::GatewayError(format!("Malformed gateway response: {e}")))?;
            log::info!(
                "Created gateway order {} for {} {}",
                order.id,
                order.amount,
                order.currency
            );
            Ok(order)
        } else {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            Err(AppError::GatewayError(format!(
                "Gateway rejected order creation ({status}): {error_text}"
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> RazorpayClient {
        RazorpayClient::new(RazorpayConfig {
            key_id: "rzp_test_key".to_string(),
            key_secret: "rzp_test_secret".to_string(),
            base_url: "http://127.0.0.1:1".to_string(),
        })
    }

    #[tokio::test]
    async fn rejects_amount_below_minimum_without_network() {
        // base_url is unroutable; an amount failure must come back before any call
        let client = test_client();
        let err = client.create_order(99, "INR").await.unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[tokio::test]
    async fn unreachable_gateway_maps_to_gateway_error() {
        let client = test_client();
        let err = client.create_order(1300, "INR").await.unwrap_err();
        assert!(matches!(err, AppError::GatewayError(_)));
    }
}
