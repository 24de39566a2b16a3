//! Assembly of the outbound payment-creation request.
//!
//! Pure transformation from validated input to headers plus JSON body; no
//! network I/O happens here. Validation runs first so a malformed request
//! is never built, and failures name the specific field.

use moneris_types::{
    AmountBody, CardBody, CreatePaymentBody, Credentials, PaymentMethodBody, PaymentMethodSpec,
    PaymentRequest, StoreDirective, ValidationError,
};

/// API version pinned by this client (latest stable).
pub const DEFAULT_API_VERSION: &str = "2024-09-17";

/// Placeholder shown in place of the API key in redacted output.
pub const REDACTED_MARKER: &str = "[HIDDEN]";

/// Header set for a payment-creation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestHeaders {
    pub content_type: &'static str,
    pub api_version: String,
    pub merchant_id: String,
    pub api_key: String,
}

impl RequestHeaders {
    /// Headers as name/value pairs, in wire order.
    pub fn to_pairs(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("Content-Type", self.content_type),
            ("Api-Version", &self.api_version),
            ("X-Merchant-Id", &self.merchant_id),
            ("X-API-Key", &self.api_key),
        ]
    }

    /// Same header set with the API key masked.
    ///
    /// The only sanctioned way to log or display headers; the raw key never
    /// appears in the output.
    pub fn redacted_pairs(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("Content-Type", self.content_type),
            ("Api-Version", &self.api_version),
            ("X-Merchant-Id", &self.merchant_id),
            ("X-API-Key", REDACTED_MARKER),
        ]
    }
}

/// A fully assembled request, ready for the HTTP transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltRequest {
    pub headers: RequestHeaders,
    pub body: CreatePaymentBody,
}

/// Builds payment-creation requests for a fixed API version.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    api_version: String,
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_API_VERSION)
    }
}

impl RequestBuilder {
    pub fn new(api_version: impl Into<String>) -> Self {
        Self {
            api_version: api_version.into(),
        }
    }

    /// Validates the input and assembles headers plus JSON body.
    ///
    /// Total and side-effect free. The first invalid field wins; on success
    /// the body matches the wire contract exactly.
    pub fn build(
        &self,
        credentials: &Credentials,
        request: &PaymentRequest,
    ) -> Result<BuiltRequest, ValidationError> {
        if credentials.merchant_id.trim().is_empty() {
            return Err(ValidationError::missing("merchantId"));
        }
        if credentials.api_key.trim().is_empty() {
            return Err(ValidationError::missing("apiKey"));
        }

        let payment_method = build_payment_method(&request.payment_method)?;

        let body = CreatePaymentBody {
            idempotency_key: request.idempotency_key.as_str().to_string(),
            amount: AmountBody {
                amount: request.amount.amount(),
                currency: request.amount.currency(),
            },
            payment_method,
        };

        let headers = RequestHeaders {
            content_type: "application/json",
            api_version: self.api_version.clone(),
            merchant_id: credentials.merchant_id.clone(),
            api_key: credentials.api_key.clone(),
        };

        Ok(BuiltRequest { headers, body })
    }
}

fn build_payment_method(spec: &PaymentMethodSpec) -> Result<PaymentMethodBody, ValidationError> {
    match spec {
        PaymentMethodSpec::NewCard { card, store } => {
            let number = card.normalized_number();
            if number.is_empty() {
                return Err(ValidationError::missing("cardNumber"));
            }
            if !number.chars().all(|c| c.is_ascii_digit()) {
                return Err(ValidationError::new("cardNumber", "must contain digits only"));
            }
            if card.cvv.is_empty() || card.cvv.len() > 4 {
                return Err(ValidationError::new("cvv", "must be 1-4 digits"));
            }
            if !card.cvv.chars().all(|c| c.is_ascii_digit()) {
                return Err(ValidationError::new("cvv", "must contain digits only"));
            }
            if !(1..=12).contains(&card.expiry_month) {
                return Err(ValidationError::new("expiryMonth", "must be 1-12"));
            }

            let store_payment_method = if *store {
                StoreDirective::CardholderInitiated
            } else {
                StoreDirective::DoNotStore
            };

            Ok(PaymentMethodBody::Card {
                card: CardBody {
                    card_number: number,
                    expiry_month: card.expiry_month,
                    expiry_year: card.expiry_year,
                    card_security_code: card.cvv.clone(),
                },
                store_payment_method,
            })
        }
        PaymentMethodSpec::StoredMethod { payment_method_id } => {
            if payment_method_id.trim().is_empty() {
                return Err(ValidationError::missing("paymentMethodId"));
            }
            // Stored methods are never (re-)stored.
            Ok(PaymentMethodBody::PaymentMethodId {
                payment_method_id: payment_method_id.clone(),
                store_payment_method: StoreDirective::DoNotStore,
            })
        }
    }
}
