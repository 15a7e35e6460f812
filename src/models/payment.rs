use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateGatewayOrderRequest {
    pub total_amount: i64, // minor currency units
}
