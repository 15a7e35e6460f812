pub mod mailer;
pub mod razorpay;

pub use mailer::{MailerService, OrderConfirmation};
pub use razorpay::{GatewayOrder, MIN_ORDER_AMOUNT, RazorpayClient};
