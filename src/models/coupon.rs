use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    Flat,
    Percentage,
}

impl std::fmt::Display for DiscountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiscountType::Flat => write!(f, "flat"),
            DiscountType::Percentage => write!(f, "percentage"),
        }
    }
}

/// Full coupon row, as stored. Only exposed on the admin surface.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Coupon {
    pub id: i64,
    pub coupon_code: String,
    pub discount_type: DiscountType,
    pub discount_value: i64,
    pub min_cart_value: i64,
    pub max_discount: Option<i64>,
    pub expiry_date: Option<NaiveDate>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Public projection advertised to carts: no id, no active flag.
#[derive(Debug, Serialize, Deserialize, FromRow, ToSchema)]
pub struct PublicCoupon {
    pub coupon_code: String,
    pub discount_type: DiscountType,
    pub discount_value: i64,
    pub min_cart_value: i64,
    pub max_discount: Option<i64>,
    pub expiry_date: Option<NaiveDate>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateCouponRequest {
    pub coupon_code: String,
    pub discount_type: DiscountType,
    pub discount_value: i64,
    pub min_cart_value: Option<i64>,
    pub max_discount: Option<i64>,
    pub expiry_date: Option<NaiveDate>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApplyCouponRequest {
    pub coupon_code: String,
    pub cart_total: i64, // minor currency units
}

/// Result of evaluating a coupon against a cart subtotal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CouponQuote {
    pub discount: i64,
    pub final_total: i64,
    pub coupon_code: String,
}
