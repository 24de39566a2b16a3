//! Moneris CLI
//!
//! Command-line client for creating payments against the Moneris sandbox.
//! Plays the input-collector and presentation roles: gathers credentials and
//! payment details, shows the assembled request (headers redacted), submits
//! it, and renders the classified outcome.

use std::time::Duration;

use anyhow::Result;
use chrono::{Datelike, Utc};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

use moneris_client::{BuiltRequest, MonerisClient, Outcome, DEFAULT_API_VERSION, SANDBOX_BASE_URL};
use moneris_types::{
    CardDetails, Credentials, Currency, IdempotencyKey, Money, PaymentMethodSpec, PaymentRequest,
    ValidationError,
};

#[derive(Parser)]
#[command(name = "moneris")]
#[command(author, version, about = "Moneris payment-creation CLI client", long_about = None)]
struct Cli {
    /// Base URL of the payments API
    #[arg(long, env = "MONERIS_API_URL", default_value = SANDBOX_BASE_URL)]
    api_url: String,

    /// Merchant ID from Moneris access credentials
    #[arg(long, env = "MONERIS_MERCHANT_ID")]
    merchant_id: Option<String>,

    /// API key from Moneris access credentials
    #[arg(long, env = "MONERIS_API_KEY")]
    api_key: Option<String>,

    /// API version header sent with every request
    #[arg(long, env = "MONERIS_API_VERSION", default_value = DEFAULT_API_VERSION)]
    api_version: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a payment
    Purchase {
        #[command(subcommand)]
        method: PurchaseCommands,
    },
    /// Print the HTTP status code legend for payment creation
    Codes,
}

#[derive(Subcommand)]
enum PurchaseCommands {
    /// Pay with raw card details
    Card {
        /// Amount in major currency units (e.g. 1.00)
        #[arg(long)]
        amount: Decimal,
        /// Currency (CAD, USD, EUR, GBP, INR, HKD)
        #[arg(long, default_value = "CAD")]
        currency: Currency,
        /// Card number; embedded spaces are stripped
        #[arg(long, default_value = "4242424242424242")]
        card_number: String,
        #[arg(long, default_value_t = 12)]
        expiry_month: u8,
        #[arg(long, default_value_t = 2030)]
        expiry_year: u16,
        #[arg(long, default_value = "123")]
        cvv: String,
        /// Store the card as a reusable payment method
        #[arg(long)]
        store: bool,
        /// Idempotency key; a UUID v4 is generated when omitted.
        /// Reuse a key only to retry the identical submission.
        #[arg(long)]
        idempotency_key: Option<String>,
    },
    /// Pay with a previously stored payment method
    Stored {
        /// Amount in major currency units (e.g. 1.00)
        #[arg(long)]
        amount: Decimal,
        /// Currency (CAD, USD, EUR, GBP, INR, HKD)
        #[arg(long, default_value = "CAD")]
        currency: Currency,
        /// Identifier of the stored payment method
        #[arg(long)]
        payment_method_id: String,
        /// Idempotency key; a UUID v4 is generated when omitted
        #[arg(long)]
        idempotency_key: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Codes => {
            print_codes_legend();
            Ok(())
        }
        Commands::Purchase { method } => {
            let credentials = Credentials::new(
                cli.merchant_id.unwrap_or_default(),
                cli.api_key.unwrap_or_default(),
            );
            let request = payment_request(method, Utc::now().year() as u16)?;

            let client = MonerisClient::new(&cli.api_url)
                .with_api_version(cli.api_version)
                .with_timeout(Duration::from_secs(cli.timeout_secs));

            let built = client.assemble(&credentials, &request)?;
            print_request(&built)?;

            let outcome = client.submit(&built).await;
            render_outcome(&outcome);

            if !outcome.is_success() {
                std::process::exit(1);
            }
            Ok(())
        }
    }
}

/// Turns parsed flags into a [`PaymentRequest`].
///
/// The expiry-year-vs-wall-clock check lives here rather than in the
/// builder, which stays free of time dependence.
fn payment_request(method: PurchaseCommands, current_year: u16) -> Result<PaymentRequest> {
    let (amount, currency, idempotency_key, payment_method) = match method {
        PurchaseCommands::Card {
            amount,
            currency,
            card_number,
            expiry_month,
            expiry_year,
            cvv,
            store,
            idempotency_key,
        } => {
            if expiry_year < current_year {
                anyhow::bail!(ValidationError::new(
                    "expiryYear",
                    format!("must be {} or later", current_year),
                ));
            }
            (
                amount,
                currency,
                idempotency_key,
                PaymentMethodSpec::NewCard {
                    card: CardDetails {
                        card_number,
                        expiry_month,
                        expiry_year,
                        cvv,
                    },
                    store,
                },
            )
        }
        PurchaseCommands::Stored {
            amount,
            currency,
            payment_method_id,
            idempotency_key,
        } => (
            amount,
            currency,
            idempotency_key,
            PaymentMethodSpec::StoredMethod { payment_method_id },
        ),
    };

    Ok(PaymentRequest {
        idempotency_key: idempotency_key
            .map(IdempotencyKey::from)
            .unwrap_or_default(),
        amount: Money::from_decimal(amount, currency)?,
        payment_method,
    })
}

fn print_request(built: &BuiltRequest) -> Result<()> {
    println!("Request headers:");
    println!("{}", serde_json::to_string_pretty(&headers_json(built))?);
    println!();
    println!("Request body:");
    println!("{}", serde_json::to_string_pretty(&built.body)?);
    println!();
    Ok(())
}

/// Redacted headers as a JSON object; the raw API key never reaches stdout.
fn headers_json(built: &BuiltRequest) -> serde_json::Value {
    built
        .headers
        .redacted_pairs()
        .into_iter()
        .map(|(name, value)| (name.to_string(), serde_json::Value::from(value)))
        .collect::<serde_json::Map<_, _>>()
        .into()
}

fn render_outcome(outcome: &Outcome) {
    match outcome {
        Outcome::Created(_) => println!("✓ Payment created (HTTP 201)"),
        Outcome::ClientError { status, .. } => println!("✗ Failed: HTTP {}", status),
        Outcome::ServerError { status, .. } => println!("✗ Server error: HTTP {}", status),
        Outcome::TransportFailure(reason) => println!("✗ Transport failure: {}", reason),
    }
    if let Some(body) = outcome.body() {
        println!();
        println!("Server response:");
        println!("{}", body.to_display_string());
    }
}

fn print_codes_legend() {
    println!("HTTP status codes for payment creation:");
    println!();
    println!("  201  Created               Payment was created successfully");
    println!("  400  Bad Request           Invalid request data (missing fields, wrong format)");
    println!("  401  Unauthorized          No valid API key or access token");
    println!("  403  Forbidden             No permission for the requested resource");
    println!("  409  Conflict              Resource state conflict or existing idempotency key");
    println!("  422  Unprocessable Content Semantic or business validation errors");
    println!("  429  Too Many Requests     Rate limit exceeded, slow down");
    println!("  500  Internal Server Error Unexpected error");
    println!("  503  Service Unavailable   Service temporarily unavailable");
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_headers_json_redacts_key() {
        let cli = MonerisClient::sandbox();
        let credentials = Credentials::new("merchant-1", "sk_live_secret");
        let request = PaymentRequest {
            idempotency_key: IdempotencyKey::from("k".to_string()),
            amount: Money::new(100, Currency::CAD).unwrap(),
            payment_method: PaymentMethodSpec::StoredMethod {
                payment_method_id: "pm_1".to_string(),
            },
        };
        let built = cli.assemble(&credentials, &request).unwrap();
        let rendered = headers_json(&built).to_string();
        assert!(!rendered.contains("sk_live_secret"));
        assert!(rendered.contains("[HIDDEN]"));
    }

    #[test]
    fn test_payment_request_generates_key_when_omitted() {
        let method = PurchaseCommands::Stored {
            amount: "1.00".parse().unwrap(),
            currency: Currency::CAD,
            payment_method_id: "pm_1".to_string(),
            idempotency_key: None,
        };
        let request = payment_request(method, 2026).unwrap();
        assert!(!request.idempotency_key.as_str().is_empty());
        assert_eq!(request.amount.amount(), 100);
    }

    fn card_method(expiry_year: u16) -> PurchaseCommands {
        PurchaseCommands::Card {
            amount: "1.00".parse().unwrap(),
            currency: Currency::CAD,
            card_number: "4242424242424242".to_string(),
            expiry_month: 12,
            expiry_year,
            cvv: "123".to_string(),
            store: false,
            idempotency_key: None,
        }
    }

    #[test]
    fn test_expiry_year_in_past_rejected() {
        let err = payment_request(card_method(1999), 2026).unwrap_err();
        assert!(err.to_string().contains("expiryYear"), "{}", err);
    }

    #[test]
    fn test_current_year_expiry_accepted() {
        let request = payment_request(card_method(2026), 2026).unwrap();
        assert!(matches!(
            request.payment_method,
            PaymentMethodSpec::NewCard { .. }
        ));
    }
}
