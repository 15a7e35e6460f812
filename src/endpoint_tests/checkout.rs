use actix_web::{http::StatusCode, test::TestRequest};
use serde_json::json;

use super::helpers::{send_request, test_context};
use crate::test_utils::seed_product;

fn reference_checkout_body() -> serde_json::Value {
    json!({
        "name": "Asha Verma",
        "email": "asha@example.com",
        "phone": "9876543210",
        "address": "12 MG Road, Bengaluru",
        "cart": [
            {"id": 1, "size": "M", "quantity": 2, "price": 500},
            {"id": 2, "quantity": 1, "price": 300}
        ],
        "payment": "razorpay",
        "total_amount": 1300
    })
}

#[actix_web::test]
async fn health_endpoint_is_public() {
    let ctx = test_context().await;
    let (status, _) = send_request(&ctx, TestRequest::get().uri("/")).await;
    assert_eq!(status, StatusCode::OK);
}

#[actix_web::test]
async fn checkout_then_lookup_by_phone() {
    let ctx = test_context().await;
    seed_product(&ctx.pool, 1, "Block Print Kurta", Some("kurta.jpg")).await;
    seed_product(&ctx.pool, 2, "Silk Dupatta", None).await;

    let req = TestRequest::post()
        .uri("/checkout")
        .set_json(reference_checkout_body());
    let (status, body) = send_request(&ctx, req).await;

    // The test mailer is unreachable; checkout must succeed regardless
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    let order_id = body["order_id"].as_i64().unwrap();
    assert!(order_id > 0);

    let (status, body) =
        send_request(&ctx, TestRequest::get().uri("/orders/9876543210")).await;
    assert_eq!(status, StatusCode::OK);

    let orders = body.as_array().unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0]["id"].as_i64().unwrap(), order_id);
    assert_eq!(orders[0]["total_amount"], json!(1300));

    let items = orders[0]["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["name"], json!("Block Print Kurta"));
    assert_eq!(items[0]["image_url"], json!("kurta.jpg"));
    assert_eq!(items[1]["name"], json!("Silk Dupatta"));
    assert_eq!(items[1]["price"], json!(300));
}

#[actix_web::test]
async fn checkout_with_missing_fields_is_400_and_writes_nothing() {
    let ctx = test_context().await;

    let mut body = reference_checkout_body();
    body["payment"] = json!("");
    let req = TestRequest::post().uri("/checkout").set_json(body);
    let (status, body) = send_request(&ctx, req).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], json!("VALIDATION_ERROR"));

    let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
        .fetch_one(&ctx.pool)
        .await
        .unwrap();
    assert_eq!(rows, 0);
}

#[actix_web::test]
async fn checkout_with_empty_cart_is_400() {
    let ctx = test_context().await;

    let mut body = reference_checkout_body();
    body["cart"] = json!([]);
    let req = TestRequest::post().uri("/checkout").set_json(body);
    let (status, _) = send_request(&ctx, req).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn create_order_with_invalid_amount_is_400() {
    let ctx = test_context().await;

    let req = TestRequest::post()
        .uri("/checkout/create-order")
        .set_json(json!({"total_amount": 50}));
    let (status, body) = send_request(&ctx, req).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], json!("Invalid amount."));
}

#[actix_web::test]
async fn create_order_with_gateway_down_is_502() {
    let ctx = test_context().await;

    // The test gateway base URL is unroutable
    let req = TestRequest::post()
        .uri("/checkout/create-order")
        .set_json(json!({"total_amount": 1300}));
    let (status, body) = send_request(&ctx, req).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"]["code"], json!("GATEWAY_ERROR"));
}
