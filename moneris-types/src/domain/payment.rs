//! Payment request domain model.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::money::Money;

/// Merchant credentials passed through to the API headers.
///
/// Held only for the lifetime of a single submission; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub merchant_id: String,
    pub api_key: String,
}

impl Credentials {
    pub fn new(merchant_id: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            merchant_id: merchant_id.into(),
            api_key: api_key.into(),
        }
    }
}

/// Caller-owned idempotency key for duplicate-payment protection.
///
/// Opaque to the API; a UUID v4 is generated when the caller does not
/// supply one. Must be regenerated whenever the logical request changes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdempotencyKey(String);

impl IdempotencyKey {
    /// Creates a fresh random key (UUID v4).
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for IdempotencyKey {
    fn default() -> Self {
        Self::new()
    }
}

impl From<String> for IdempotencyKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl std::fmt::Display for IdempotencyKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Raw card details as entered on the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardDetails {
    /// Card number, possibly with embedded whitespace.
    pub card_number: String,
    /// Expiry month, 1-12.
    pub expiry_month: u8,
    /// Four-digit expiry year.
    pub expiry_year: u16,
    /// Card security code, 1-4 digits.
    pub cvv: String,
}

impl CardDetails {
    /// Card number with all whitespace stripped, as the API expects it.
    pub fn normalized_number(&self) -> String {
        self.card_number
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect()
    }
}

/// How the payment is funded: fresh card data or a stored method.
///
/// Exactly one variant per request. Only a new card can be stored for
/// later use; a stored method never carries a store flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentMethodSpec {
    /// Raw card data entered by the cardholder.
    NewCard {
        card: CardDetails,
        /// Store the card as a reusable payment method.
        store: bool,
    },
    /// A previously stored/tokenized payment method.
    StoredMethod { payment_method_id: String },
}

/// The fully assembled logical payment request, independent of wire encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRequest {
    pub idempotency_key: IdempotencyKey,
    pub amount: Money,
    pub payment_method: PaymentMethodSpec,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idempotency_keys_are_unique() {
        assert_ne!(IdempotencyKey::new(), IdempotencyKey::new());
    }

    #[test]
    fn test_idempotency_key_from_string_roundtrip() {
        let key = IdempotencyKey::from("my-key-1".to_string());
        assert_eq!(key.as_str(), "my-key-1");
        assert_eq!(key.to_string(), "my-key-1");
    }

    #[test]
    fn test_normalized_number_strips_whitespace() {
        let card = CardDetails {
            card_number: "4242 4242 4242 4242".to_string(),
            expiry_month: 12,
            expiry_year: 2030,
            cvv: "123".to_string(),
        };
        assert_eq!(card.normalized_number(), "4242424242424242");
    }

    #[test]
    fn test_normalized_number_position_independent() {
        let a = CardDetails {
            card_number: " 42424242 42424242".to_string(),
            expiry_month: 1,
            expiry_year: 2030,
            cvv: "123".to_string(),
        };
        let b = CardDetails {
            card_number: "4242424242424242 ".to_string(),
            expiry_month: 1,
            expiry_year: 2030,
            cvv: "123".to_string(),
        };
        assert_eq!(a.normalized_number(), b.normalized_number());
    }
}
