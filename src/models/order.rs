use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// One client-submitted cart line. Price and quantity are trusted as given;
/// they are not re-checked against the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CartItem {
    pub id: i64, // product id
    #[serde(default)]
    pub size: Option<String>,
    pub quantity: i64,
    pub price: i64, // unit price, minor currency units
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CheckoutRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub cart: Vec<CartItem>,
    pub payment: String,
    pub total_amount: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CheckoutResponse {
    pub success: bool,
    pub order_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Order {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub payment: String,
    pub total_amount: i64,
    pub created_at: DateTime<Utc>,
}

/// Order line joined against the product catalog for display.
#[derive(Debug, Serialize, Deserialize, FromRow, ToSchema)]
pub struct OrderItemDetail {
    pub name: String,
    pub image_url: Option<String>,
    pub size: Option<String>,
    pub quantity: i64,
    pub price: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderWithItems {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItemDetail>,
}
