use actix_web::{App, body::MessageBody, http::StatusCode, test, test::TestRequest, web};
use serde_json::Value;

use crate::database::DbPool;
use crate::handlers;
use crate::middlewares::AuthMiddleware;
use crate::services::{CouponService, OrderService};
use crate::test_utils::{test_checkout_service, test_pool};
use crate::utils::JwtService;

// Test-only secret. DO NOT re-use anywhere.
const TEST_JWT_SECRET: &str = "endpoint-test-secret";

pub struct TestContext {
    pub pool: DbPool,
}

pub async fn test_context() -> TestContext {
    TestContext {
        pool: test_pool().await,
    }
}

fn jwt_service() -> JwtService {
    JwtService::new(TEST_JWT_SECRET, 3600)
}

pub fn admin_token() -> String {
    jwt_service()
        .generate_access_token("admin")
        .expect("Failed to mint test token")
}

/// Build the full app (auth middleware included), run one request against the
/// context's database, and hand back status plus parsed body.
pub async fn send_request(ctx: &TestContext, req: TestRequest) -> (StatusCode, Value) {
    let app = App::new()
        .wrap(AuthMiddleware::new(jwt_service()))
        .app_data(web::Data::new(CouponService::new(ctx.pool.clone())))
        .app_data(web::Data::new(OrderService::new(ctx.pool.clone())))
        .app_data(web::Data::new(test_checkout_service(ctx.pool.clone())))
        .route("/", web::get().to(handlers::health))
        .configure(handlers::checkout_config)
        .configure(handlers::coupon_config)
        .configure(handlers::order_config)
        .configure(handlers::admin_config);

    let service = test::init_service(app).await;

    match test::try_call_service(&service, req.to_request()).await {
        Ok(response) => {
            let status = response.status();
            let bytes = test::read_body(response).await;
            (status, parse_body(&bytes))
        }
        Err(e) => {
            // Middleware rejections surface as errors rather than responses
            let response = e.error_response();
            let status = response.status();
            let bytes = response
                .into_body()
                .try_into_bytes()
                .expect("Failed to read error body");
            (status, parse_body(&bytes))
        }
    }
}

fn parse_body(bytes: &[u8]) -> Value {
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}
