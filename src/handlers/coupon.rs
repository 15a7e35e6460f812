use crate::models::{ApplyCouponRequest, CouponQuote, PublicCoupon};
use crate::services::CouponService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/coupons",
    tag = "coupon",
    responses(
        (status = 200, description = "Active, unexpired coupons", body = [PublicCoupon])
    )
)]
pub async fn list_public_coupons(
    coupon_service: web::Data<CouponService>,
) -> Result<HttpResponse> {
    match coupon_service.list_active_coupons().await {
        Ok(coupons) => Ok(HttpResponse::Ok().json(coupons)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/coupons/apply",
    tag = "coupon",
    request_body = ApplyCouponRequest,
    responses(
        (status = 200, description = "Coupon applied", body = CouponQuote),
        (status = 400, description = "Missing fields, expired, or below minimum cart value"),
        (status = 404, description = "Invalid or inactive coupon")
    )
)]
pub async fn apply_coupon(
    coupon_service: web::Data<CouponService>,
    request: web::Json<ApplyCouponRequest>,
) -> Result<HttpResponse> {
    match coupon_service.apply_coupon(request.into_inner()).await {
        Ok(quote) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "discount": quote.discount,
            "final_total": quote.final_total,
            "coupon_code": quote.coupon_code
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn coupon_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/coupons")
            .route("", web::get().to(list_public_coupons))
            .route("/apply", web::post().to(apply_coupon)),
    );
}
