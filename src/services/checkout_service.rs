use crate::error::AppResult;
use crate::external::{GatewayOrder, MailerService, OrderConfirmation, RazorpayClient};
use crate::models::{CheckoutRequest, CheckoutResponse, CreateGatewayOrderRequest};
use crate::services::OrderService;

/// Single-currency store; everything is charged in paise.
const CURRENCY: &str = "INR";

/// Composes the order writer, the payment gateway and the mailer into the two
/// checkout entry points. No state spans the two calls: a gateway order that
/// is never finalized is reconciled by the gateway and the client, not here.
#[derive(Clone)]
pub struct CheckoutService {
    orders: OrderService,
    gateway: RazorpayClient,
    mailer: MailerService,
}

impl CheckoutService {
    pub fn new(orders: OrderService, gateway: RazorpayClient, mailer: MailerService) -> Self {
        Self {
            orders,
            gateway,
            mailer,
        }
    }

    pub async fn create_gateway_order(
        &self,
        request: CreateGatewayOrderRequest,
    ) -> AppResult<GatewayOrder> {
        self.gateway.create_order(request.total_amount, CURRENCY).await
    }

    /// Finalize a checkout: write the order atomically, then hand the
    /// confirmation mail to a detached task. The response depends only on the
    /// write; the mail task is logged to completion either way.
    pub async fn finalize(&self, request: CheckoutRequest) -> AppResult<CheckoutResponse> {
        let order_id = self.orders.place_order(&request).await?;

        let mailer = self.mailer.clone();
        let confirmation = OrderConfirmation {
            order_id,
            name: request.name,
            email: request.email,
            phone: request.phone,
            address: request.address,
            payment: request.payment,
            total_amount: request.total_amount,
            items: request.cart,
        };
        tokio::spawn(async move {
            if let Err(e) = mailer.send_order_confirmation(&confirmation).await {
                log::error!(
                    "Confirmation mail for order {} failed: {e}",
                    confirmation.order_id
                );
            }
        });

        Ok(CheckoutResponse {
            success: true,
            order_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::test_utils::{test_checkout_service, test_pool, valid_checkout};

    #[tokio::test]
    async fn finalize_succeeds_even_when_the_mailer_is_down() {
        let pool = test_pool().await;
        // test_checkout_service wires an unroutable mailer URL
        let service = test_checkout_service(pool.clone());

        let response = service.finalize(valid_checkout()).await.unwrap();
        assert!(response.success);

        let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders WHERE id = ?")
            .bind(response.order_id)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[tokio::test]
    async fn finalize_rejects_invalid_request_without_notifying() {
        let pool = test_pool().await;
        let service = test_checkout_service(pool.clone());

        let mut request = valid_checkout();
        request.payment.clear();

        let err = service.finalize(request).await.unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));

        let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(rows, 0);
    }

    #[tokio::test]
    async fn gateway_order_amount_checked_before_any_call() {
        let pool = test_pool().await;
        let service = test_checkout_service(pool);

        let err = service
            .create_gateway_order(CreateGatewayOrderRequest { total_amount: 50 })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[tokio::test]
    async fn unreachable_gateway_surfaces_gateway_error() {
        let pool = test_pool().await;
        let service = test_checkout_service(pool);

        let err = service
            .create_gateway_order(CreateGatewayOrderRequest { total_amount: 1300 })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::GatewayError(_)));
    }
}
