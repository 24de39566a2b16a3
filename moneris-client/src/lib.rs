//! # Moneris Client
//!
//! A typed client for the Moneris payment-creation API: pure request
//! assembly ([`builder`]), pure response classification ([`outcome`]), and
//! a thin reqwest transport tying the two together.

pub mod builder;
pub mod outcome;

use std::time::Duration;

use reqwest::Client;

use moneris_types::{Credentials, PaymentRequest, ValidationError};

pub use builder::{BuiltRequest, RequestBuilder, RequestHeaders, DEFAULT_API_VERSION};
pub use outcome::{Outcome, ResponseBody};

/// Moneris sandbox environment.
pub const SANDBOX_BASE_URL: &str = "https://api.sb.moneris.io";

/// Default bound on the blocking call; cancellation is not supported.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Payment-creation API client.
///
/// One HTTPS connection per submission, bounded by [`DEFAULT_TIMEOUT`]
/// unless overridden. No retries: idempotency keys make resubmission safe,
/// but that is the caller's call.
pub struct MonerisClient {
    base_url: String,
    builder: RequestBuilder,
    timeout: Duration,
    http: Client,
}

impl MonerisClient {
    /// Creates a new client against the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            builder: RequestBuilder::default(),
            timeout: DEFAULT_TIMEOUT,
            http: Client::new(),
        }
    }

    /// Creates a client against the Moneris sandbox.
    pub fn sandbox() -> Self {
        Self::new(SANDBOX_BASE_URL)
    }

    /// Overrides the pinned `Api-Version` header.
    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.builder = RequestBuilder::new(api_version);
        self
    }

    /// Overrides the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Assembles the request without sending it.
    ///
    /// The CLI uses this to show headers (redacted) and body before the
    /// actual submission.
    pub fn assemble(
        &self,
        credentials: &Credentials,
        request: &PaymentRequest,
    ) -> Result<BuiltRequest, ValidationError> {
        self.builder.build(credentials, request)
    }

    /// Builds, submits, and classifies a payment-creation request.
    ///
    /// Validation problems fail fast before anything is sent. Once a request
    /// goes out, every path yields a renderable [`Outcome`]: network errors
    /// become [`Outcome::TransportFailure`], never a panic or a lost result.
    pub async fn create_payment(
        &self,
        credentials: &Credentials,
        request: &PaymentRequest,
    ) -> Result<Outcome, ValidationError> {
        let built = self.builder.build(credentials, request)?;
        Ok(self.submit(&built).await)
    }

    /// Submits an already-assembled request.
    pub async fn submit(&self, built: &BuiltRequest) -> Outcome {
        let url = format!("{}/payments", self.base_url);
        tracing::debug!(
            %url,
            headers = ?built.headers.redacted_pairs(),
            idempotency_key = %built.body.idempotency_key,
            "submitting payment-creation request"
        );

        let mut req = self
            .http
            .post(&url)
            .timeout(self.timeout)
            .json(&built.body);
        for (name, value) in built.headers.to_pairs() {
            req = req.header(name, value);
        }

        match req.send().await {
            Ok(resp) => {
                let status = resp.status().as_u16();
                match resp.text().await {
                    Ok(text) => {
                        let outcome = Outcome::classify(status, &text);
                        tracing::debug!(status, success = outcome.is_success(), "response received");
                        outcome
                    }
                    // Response arrived but the body stream died underneath us.
                    Err(e) => Outcome::TransportFailure(e.to_string()),
                }
            }
            Err(e) => {
                tracing::debug!(error = %e, "transport failure");
                Outcome::TransportFailure(e.to_string())
            }
        }
    }
}
