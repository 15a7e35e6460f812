use crate::models::{Coupon, CreateCouponRequest};
use crate::services::CouponService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    post,
    path = "/admin/coupons/add",
    tag = "admin",
    request_body = CreateCouponRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Coupon created", body = Coupon),
        (status = 400, description = "Required fields missing"),
        (status = 401, description = "Missing or invalid credential"),
        (status = 409, description = "Coupon code already exists")
    )
)]
pub async fn add_coupon(
    coupon_service: web::Data<CouponService>,
    request: web::Json<CreateCouponRequest>,
) -> Result<HttpResponse> {
    match coupon_service.create_coupon(request.into_inner()).await {
        Ok(coupon) => Ok(HttpResponse::Created().json(json!({
            "success": true,
            "message": "Coupon added successfully.",
            "data": coupon
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/admin/coupons",
    tag = "admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All coupon rows, newest first", body = [Coupon]),
        (status = 401, description = "Missing or invalid credential")
    )
)]
pub async fn list_coupons(coupon_service: web::Data<CouponService>) -> Result<HttpResponse> {
    match coupon_service.list_coupons().await {
        Ok(coupons) => Ok(HttpResponse::Ok().json(coupons)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/admin/coupons/delete/{id}",
    tag = "admin",
    params(("id" = i64, Path, description = "Coupon id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Coupon deleted"),
        (status = 401, description = "Missing or invalid credential"),
        (status = 404, description = "Coupon not found")
    )
)]
pub async fn delete_coupon(
    coupon_service: web::Data<CouponService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match coupon_service.delete_coupon(path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Coupon deleted successfully."
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn admin_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin/coupons")
            .route("/add", web::post().to(add_coupon))
            .route("", web::get().to(list_coupons))
            .route("/delete/{id}", web::delete().to(delete_coupon)),
    );
}
