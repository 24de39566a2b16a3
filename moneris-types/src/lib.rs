//! # Moneris Types
//!
//! Domain types and wire DTOs for the Moneris payment-creation client.
//! This crate has ZERO IO dependencies - only data structures, business
//! rules, and the serde shapes of the external API contract.
//!
//! ## Architecture
//!
//! - `domain/` - Pure domain types (Money, Credentials, PaymentRequest)
//! - `dto/` - Wire-format bodies matching the Moneris API byte-for-byte
//! - `error/` - Domain and validation error types

pub mod domain;
pub mod dto;
pub mod error;

// Re-export commonly used types
pub use domain::{
    CardDetails, Credentials, Currency, IdempotencyKey, Money, PaymentMethodSpec, PaymentRequest,
};
pub use dto::*;
pub use error::{DomainError, ValidationError};
