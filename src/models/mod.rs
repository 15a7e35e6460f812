pub mod coupon;
pub mod order;
pub mod payment;

pub use coupon::*;
pub use order::*;
pub use payment::*;
