//! Wire-format bodies for the payment-creation endpoint.
//!
//! Field names here are part of the external API contract and must match
//! byte-for-byte; serde renames do the mapping from Rust conventions.

use serde::{Deserialize, Serialize};

use crate::domain::Currency;

/// JSON body of `POST /payments`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentBody {
    pub idempotency_key: String,
    pub amount: AmountBody,
    pub payment_method: PaymentMethodBody,
}

/// Amount in minor units plus ISO 4217 currency code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmountBody {
    pub amount: i64,
    pub currency: Currency,
}

/// Payment method variants, discriminated by `paymentMethodSource`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "paymentMethodSource")]
pub enum PaymentMethodBody {
    /// Raw card data.
    #[serde(rename = "CARD", rename_all = "camelCase")]
    Card {
        card: CardBody,
        store_payment_method: StoreDirective,
    },
    /// Previously stored/tokenized method.
    #[serde(rename = "PAYMENT_METHOD_ID", rename_all = "camelCase")]
    PaymentMethodId {
        payment_method_id: String,
        store_payment_method: StoreDirective,
    },
}

/// Card fields nested under `paymentMethod.card`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardBody {
    pub card_number: String,
    pub expiry_month: u8,
    pub expiry_year: u16,
    pub card_security_code: String,
}

/// Whether the processor should keep the card on file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StoreDirective {
    CardholderInitiated,
    DoNotStore,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_card_body_wire_shape() {
        let body = CreatePaymentBody {
            idempotency_key: "key-1".to_string(),
            amount: AmountBody {
                amount: 100,
                currency: Currency::CAD,
            },
            payment_method: PaymentMethodBody::Card {
                card: CardBody {
                    card_number: "4242424242424242".to_string(),
                    expiry_month: 12,
                    expiry_year: 2030,
                    card_security_code: "123".to_string(),
                },
                store_payment_method: StoreDirective::DoNotStore,
            },
        };

        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "idempotencyKey": "key-1",
                "amount": { "amount": 100, "currency": "CAD" },
                "paymentMethod": {
                    "paymentMethodSource": "CARD",
                    "card": {
                        "cardNumber": "4242424242424242",
                        "expiryMonth": 12,
                        "expiryYear": 2030,
                        "cardSecurityCode": "123"
                    },
                    "storePaymentMethod": "DO_NOT_STORE"
                }
            })
        );
    }

    #[test]
    fn test_stored_method_wire_shape() {
        let method = PaymentMethodBody::PaymentMethodId {
            payment_method_id: "pm_42".to_string(),
            store_payment_method: StoreDirective::DoNotStore,
        };

        assert_eq!(
            serde_json::to_value(&method).unwrap(),
            json!({
                "paymentMethodSource": "PAYMENT_METHOD_ID",
                "paymentMethodId": "pm_42",
                "storePaymentMethod": "DO_NOT_STORE"
            })
        );
    }

    #[test]
    fn test_store_directive_screaming_snake() {
        assert_eq!(
            serde_json::to_value(StoreDirective::CardholderInitiated).unwrap(),
            "CARDHOLDER_INITIATED"
        );
    }

    #[test]
    fn test_body_deserializes_back() {
        let raw = r#"{
            "idempotencyKey": "k",
            "amount": { "amount": 250, "currency": "USD" },
            "paymentMethod": {
                "paymentMethodSource": "PAYMENT_METHOD_ID",
                "paymentMethodId": "pm_1",
                "storePaymentMethod": "DO_NOT_STORE"
            }
        }"#;
        let body: CreatePaymentBody = serde_json::from_str(raw).unwrap();
        assert_eq!(body.amount.amount, 250);
        assert!(matches!(
            body.payment_method,
            PaymentMethodBody::PaymentMethodId { .. }
        ));
    }
}
