use crate::config::MailerConfig;
use crate::error::{AppError, AppResult};
use crate::models::CartItem;
use reqwest::Client;

/// Everything the confirmation mail needs, captured before the send is
/// detached from the request.
#[derive(Debug, Clone)]
pub struct OrderConfirmation {
    pub order_id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub payment: String,
    pub total_amount: i64,
    pub items: Vec<CartItem>,
}

#[derive(Clone)]
pub struct MailerService {
    client: Client,
    config: MailerConfig,
}

impl MailerService {
    pub fn new(config: MailerConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Deliver the order confirmation. Callers treat failure as best-effort;
    /// nothing downstream of checkout depends on the result.
    pub async fn send_order_confirmation(&self, order: &OrderConfirmation) -> AppResult<()> {
        let subject = format!("Order #{} confirmed", order.order_id);
        let body = render_confirmation_body(order);

        let params = [
            ("from", self.config.from_email.as_str()),
            ("to", order.email.as_str()),
            ("subject", subject.as_str()),
            ("text", body.as_str()),
        ];

        let response = self
            .client
            .post(&self.config.api_url)
            .basic_auth("api", Some(&self.config.api_key))
            .form(&params)
            .send()
            .await
            .map_err(|e| AppError::NotificationError(format!("Mail request failed: {e}")))?;

        if response.status().is_success() {
            log::info!(
                "Order confirmation mail sent for order {} to {}",
                order.order_id,
                order.email
            );
            Ok(())
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            Err(AppError::NotificationError(format!(
                "Mail delivery failed: {error_text}"
            )))
        }
    }
}

fn render_confirmation_body(order: &OrderConfirmation) -> String {
    let mut body = format!(
        "Hi {},\n\nThanks for your order #{}.\n\nItems:\n",
        order.name, order.order_id
    );
    for item in &order.items {
        let size = item.size.as_deref().unwrap_or("-");
        body.push_str(&format!(
            "  product {} (size {}) x{} @ {}\n",
            item.id, size, item.quantity, item.price
        ));
    }
    body.push_str(&format!(
        "\nTotal: {}\nPayment: {}\nShipping to: {}\nPhone: {}\n",
        order.total_amount, order.payment, order.address, order.phone
    ));
    body
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_order() -> OrderConfirmation {
        OrderConfirmation {
            order_id: 7,
            name: "Asha".to_string(),
            email: "asha@example.com".to_string(),
            phone: "9876543210".to_string(),
            address: "12 MG Road, Bengaluru".to_string(),
            payment: "razorpay".to_string(),
            total_amount: 1300,
            items: vec![
                CartItem {
                    id: 1,
                    size: Some("M".to_string()),
                    quantity: 2,
                    price: 500,
                },
                CartItem {
                    id: 2,
                    size: None,
                    quantity: 1,
                    price: 300,
                },
            ],
        }
    }

    #[test]
    fn body_lists_every_item_and_total() {
        let body = render_confirmation_body(&sample_order());
        assert!(body.contains("order #7"));
        assert!(body.contains("product 1 (size M) x2 @ 500"));
        assert!(body.contains("product 2 (size -) x1 @ 300"));
        assert!(body.contains("Total: 1300"));
    }

    #[tokio::test]
    async fn unreachable_mail_api_maps_to_notification_error() {
        let mailer = MailerService::new(MailerConfig {
            api_url: "http://127.0.0.1:1/messages".to_string(),
            api_key: "key-test".to_string(),
            from_email: "orders@shop.example".to_string(),
        });
        let err = mailer
            .send_order_confirmation(&sample_order())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotificationError(_)));
    }
}
