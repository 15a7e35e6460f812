use actix_web::web;
use utoipa::OpenApi;
use utoipa::{
    Modify,
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

use crate::external::GatewayOrder;
use crate::handlers;
use crate::models::*;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.as_mut().unwrap();
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        )
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::checkout::create_order,
        handlers::checkout::checkout,
        handlers::coupon::list_public_coupons,
        handlers::coupon::apply_coupon,
        handlers::order::get_orders_by_phone,
        handlers::admin::add_coupon,
        handlers::admin::list_coupons,
        handlers::admin::delete_coupon,
    ),
    components(
        schemas(
            CartItem,
            CheckoutRequest,
            CheckoutResponse,
            Order,
            OrderItemDetail,
            OrderWithItems,
            Coupon,
            PublicCoupon,
            DiscountType,
            CreateCouponRequest,
            ApplyCouponRequest,
            CouponQuote,
            CreateGatewayOrderRequest,
            GatewayOrder,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "checkout", description = "Payment intent creation and order finalization"),
        (name = "coupon", description = "Public coupon listing and application"),
        (name = "order", description = "Order lookup"),
        (name = "admin", description = "Administrative coupon management")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    );
}
