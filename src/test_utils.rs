//! Shared fixtures for unit and endpoint tests.

use crate::config::{DatabaseConfig, MailerConfig, RazorpayConfig};
use crate::database::{DbPool, create_pool, run_migrations};
use crate::external::{MailerService, RazorpayClient};
use crate::models::{CartItem, CheckoutRequest};
use crate::services::{CheckoutService, OrderService};

/// Fresh in-memory database with the real migrations applied. A single
/// connection, because every pooled connection would otherwise get its own
/// private `:memory:` database.
pub async fn test_pool() -> DbPool {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
    };
    let pool = create_pool(&config).await.expect("create test pool");
    run_migrations(&pool).await.expect("run migrations");
    pool
}

pub async fn seed_product(pool: &DbPool, id: i64, name: &str, image_url: Option<&str>) {
    sqlx::query("INSERT INTO products (id, name, image_url) VALUES (?, ?, ?)")
        .bind(id)
        .bind(name)
        .bind(image_url)
        .execute(pool)
        .await
        .expect("seed product");
}

/// Reference cart: 2 x 500 + 1 x 300 = 1300.
pub fn valid_checkout() -> CheckoutRequest {
    CheckoutRequest {
        name: "Asha Verma".to_string(),
        email: "asha@example.com".to_string(),
        phone: "9876543210".to_string(),
        address: "12 MG Road, Bengaluru".to_string(),
        cart: vec![
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
        payment: "razorpay".to_string(),
        total_amount: 1300,
    }
}

/// Gateway and mailer pointed at unroutable endpoints: gateway calls fail
/// fast, mail failures exercise the best-effort path.
pub fn test_checkout_service(pool: DbPool) -> CheckoutService {
    let gateway = RazorpayClient::new(RazorpayConfig {
        key_id: "rzp_test_key".to_string(),
        key_secret: "rzp_test_secret".to_string(),
        base_url: "http://127.0.0.1:1".to_string(),
    });
    let mailer = MailerService::new(MailerConfig {
        api_url: "http://127.0.0.1:1/messages".to_string(),
        api_key: "key-test".to_string(),
        from_email: "orders@shop.example".to_string(),
    });
    CheckoutService::new(OrderService::new(pool), gateway, mailer)
}
