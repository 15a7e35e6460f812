pub mod admin;
pub mod checkout;
pub mod coupon;
pub mod order;

pub use admin::admin_config;
pub use checkout::checkout_config;
pub use coupon::coupon_config;
pub use order::order_config;

use actix_web::HttpResponse;

pub async fn health() -> HttpResponse {
    HttpResponse::Ok().body("Pasheon backend is running")
}
