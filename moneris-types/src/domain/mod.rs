//! Domain models for the payment client.

pub mod money;
pub mod payment;

pub use money::{Currency, Money};
pub use payment::{CardDetails, Credentials, IdempotencyKey, PaymentMethodSpec, PaymentRequest};
