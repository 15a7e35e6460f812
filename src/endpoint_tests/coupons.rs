use actix_web::{http::StatusCode, test::TestRequest};
use serde_json::json;

use super::helpers::{TestContext, admin_token, send_request, test_context};

fn add_coupon_request(body: serde_json::Value) -> TestRequest {
    TestRequest::post()
        .uri("/admin/coupons/add")
        .insert_header(("Authorization", format!("Bearer {}", admin_token())))
        .set_json(body)
}

async fn seed_coupon(ctx: &TestContext, body: serde_json::Value) {
    let (status, _) = send_request(ctx, add_coupon_request(body)).await;
    assert_eq!(status, StatusCode::CREATED);
}

fn save10() -> serde_json::Value {
    json!({
        "coupon_code": "SAVE10",
        "discount_type": "percentage",
        "discount_value": 10,
        "min_cart_value": 500,
        "max_discount": 50
    })
}

#[actix_web::test]
async fn apply_coupon_returns_quote_fields() {
    let ctx = test_context().await;
    seed_coupon(&ctx, save10()).await;

    let req = TestRequest::post()
        .uri("/coupons/apply")
        .set_json(json!({"coupon_code": "SAVE10", "cart_total": 1000}));
    let (status, body) = send_request(&ctx, req).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["discount"], json!(50));
    assert_eq!(body["final_total"], json!(950));
    assert_eq!(body["coupon_code"], json!("SAVE10"));
}

#[actix_web::test]
async fn apply_unknown_coupon_is_404() {
    let ctx = test_context().await;

    let req = TestRequest::post()
        .uri("/coupons/apply")
        .set_json(json!({"coupon_code": "NOPE", "cart_total": 1000}));
    let (status, body) = send_request(&ctx, req).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], json!("NOT_FOUND"));
}

#[actix_web::test]
async fn apply_expired_coupon_is_400() {
    let ctx = test_context().await;
    seed_coupon(
        &ctx,
        json!({
            "coupon_code": "BYGONE",
            "discount_type": "flat",
            "discount_value": 100,
            "expiry_date": "2020-01-01"
        }),
    )
    .await;

    let req = TestRequest::post()
        .uri("/coupons/apply")
        .set_json(json!({"coupon_code": "BYGONE", "cart_total": 1000}));
    let (status, body) = send_request(&ctx, req).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], json!("VALIDATION_ERROR"));
}

#[actix_web::test]
async fn apply_below_minimum_is_400() {
    let ctx = test_context().await;
    seed_coupon(&ctx, save10()).await;

    let req = TestRequest::post()
        .uri("/coupons/apply")
        .set_json(json!({"coupon_code": "SAVE10", "cart_total": 499}));
    let (status, body) = send_request(&ctx, req).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("Minimum cart value")
    );
}

#[actix_web::test]
async fn apply_with_missing_fields_is_400() {
    let ctx = test_context().await;

    let req = TestRequest::post()
        .uri("/coupons/apply")
        .set_json(json!({"coupon_code": "SAVE10"}));
    let (status, _) = send_request(&ctx, req).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn public_list_only_advertises_live_coupons() {
    let ctx = test_context().await;
    seed_coupon(&ctx, save10()).await;
    seed_coupon(
        &ctx,
        json!({
            "coupon_code": "BYGONE",
            "discount_type": "flat",
            "discount_value": 100,
            "expiry_date": "2020-01-01"
        }),
    )
    .await;
    sqlx::query("UPDATE coupons SET is_active = 0 WHERE coupon_code = 'SAVE10'")
        .execute(&ctx.pool)
        .await
        .unwrap();
    seed_coupon(
        &ctx,
        json!({
            "coupon_code": "FRESH",
            "discount_type": "flat",
            "discount_value": 100
        }),
    )
    .await;

    let (status, body) = send_request(&ctx, TestRequest::get().uri("/coupons")).await;

    assert_eq!(status, StatusCode::OK);
    let codes: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["coupon_code"].as_str().unwrap())
        .collect();
    assert_eq!(codes, vec!["FRESH"]);
}

#[actix_web::test]
async fn admin_routes_reject_missing_or_bad_tokens() {
    let ctx = test_context().await;

    let bare = TestRequest::get().uri("/admin/coupons");
    let (status, _) = send_request(&ctx, bare).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let forged = TestRequest::get()
        .uri("/admin/coupons")
        .insert_header(("Authorization", "Bearer not-a-token"));
    let (status, _) = send_request(&ctx, forged).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn duplicate_coupon_code_is_409() {
    let ctx = test_context().await;
    seed_coupon(&ctx, save10()).await;

    let (status, body) = send_request(&ctx, add_coupon_request(save10())).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], json!("CONFLICT"));
}

#[actix_web::test]
async fn add_coupon_without_required_fields_is_400() {
    let ctx = test_context().await;

    let req = add_coupon_request(json!({
        "coupon_code": "",
        "discount_type": "flat",
        "discount_value": 100
    }));
    let (status, _) = send_request(&ctx, req).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn admin_list_returns_full_rows() {
    let ctx = test_context().await;
    seed_coupon(&ctx, save10()).await;

    let req = TestRequest::get()
        .uri("/admin/coupons")
        .insert_header(("Authorization", format!("Bearer {}", admin_token())));
    let (status, body) = send_request(&ctx, req).await;

    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["coupon_code"], json!("SAVE10"));
    assert_eq!(rows[0]["is_active"], json!(true));
    assert!(rows[0]["id"].is_i64());
}

#[actix_web::test]
async fn delete_coupon_by_id() {
    let ctx = test_context().await;
    seed_coupon(&ctx, save10()).await;

    let missing = TestRequest::delete()
        .uri("/admin/coupons/delete/999")
        .insert_header(("Authorization", format!("Bearer {}", admin_token())));
    let (status, _) = send_request(&ctx, missing).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let id: i64 = sqlx::query_scalar("SELECT id FROM coupons WHERE coupon_code = 'SAVE10'")
        .fetch_one(&ctx.pool)
        .await
        .unwrap();
    let req = TestRequest::delete()
        .uri(&format!("/admin/coupons/delete/{id}"))
        .insert_header(("Authorization", format!("Bearer {}", admin_token())));
    let (status, body) = send_request(&ctx, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
}
