use crate::external::GatewayOrder;
use crate::models::{CheckoutRequest, CheckoutResponse, CreateGatewayOrderRequest};
use crate::services::CheckoutService;
use actix_web::{HttpResponse, ResponseError, Result, web};

#[utoipa::path(
    post,
    path = "/checkout/create-order",
    tag = "checkout",
    request_body = CreateGatewayOrderRequest,
    responses(
        (status = 200, description = "Gateway order created", body = GatewayOrder),
        (status = 400, description = "Invalid amount"),
        (status = 502, description = "Payment gateway unavailable")
    )
)]
pub async fn create_order(
    checkout_service: web::Data<CheckoutService>,
    request: web::Json<CreateGatewayOrderRequest>,
) -> Result<HttpResponse> {
    match checkout_service
        .create_gateway_order(request.into_inner())
        .await
    {
        // The gateway order object goes back to the client verbatim
        Ok(order) => Ok(HttpResponse::Ok().json(order)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/checkout",
    tag = "checkout",
    request_body = CheckoutRequest,
    responses(
        (status = 200, description = "Order placed", body = CheckoutResponse),
        (status = 400, description = "Missing or invalid fields"),
        (status = 500, description = "Order could not be persisted")
    )
)]
pub async fn checkout(
    checkout_service: web::Data<CheckoutService>,
    request: web::Json<CheckoutRequest>,
) -> Result<HttpResponse> {
    match checkout_service.finalize(request.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(response)),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn checkout_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/checkout")
            .route("/create-order", web::post().to(create_order))
            .route("", web::post().to(checkout)),
    );
}
