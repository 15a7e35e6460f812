use crate::models::OrderWithItems;
use crate::services::OrderService;
use actix_web::{HttpResponse, ResponseError, Result, web};

#[utoipa::path(
    get,
    path = "/orders/{phone}",
    tag = "order",
    params(("phone" = String, Path, description = "Customer phone number")),
    responses(
        (status = 200, description = "Orders for the phone number, newest first", body = [OrderWithItems])
    )
)]
pub async fn get_orders_by_phone(
    order_service: web::Data<OrderService>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    match order_service.get_orders_by_phone(&path.into_inner()).await {
        Ok(orders) => Ok(HttpResponse::Ok().json(orders)),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn order_config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/orders").route("/{phone}", web::get().to(get_orders_by_phone)));
}
