//! Type-safe monetary value with embedded currency.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// Currencies accepted by the payment form (ISO 4217).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    CAD,
    USD,
    EUR,
    GBP,
    INR,
    HKD,
}

impl Currency {
    /// Returns the number of minor units per major unit.
    pub fn minor_units_per_major(&self) -> i64 {
        match self {
            Currency::CAD
            | Currency::USD
            | Currency::EUR
            | Currency::GBP
            | Currency::INR
            | Currency::HKD => 100,
        }
    }

    /// Returns the currency symbol.
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::CAD | Currency::USD | Currency::HKD => "$",
            Currency::EUR => "€",
            Currency::GBP => "£",
            Currency::INR => "₹",
        }
    }

    /// All supported currencies, in form order.
    pub fn all() -> &'static [Currency] {
        &[
            Currency::CAD,
            Currency::USD,
            Currency::EUR,
            Currency::GBP,
            Currency::INR,
            Currency::HKD,
        ]
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::str::FromStr for Currency {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "CAD" => Ok(Currency::CAD),
            "USD" => Ok(Currency::USD),
            "EUR" => Ok(Currency::EUR),
            "GBP" => Ok(Currency::GBP),
            "INR" => Ok(Currency::INR),
            "HKD" => Ok(Currency::HKD),
            _ => Err(DomainError::UnknownCurrency(s.to_string())),
        }
    }
}

/// Type-safe money representation with embedded currency.
///
/// Amount is stored in the smallest unit of the currency (cents, paise, etc.)
/// to avoid floating-point precision issues. Deliberately not `Deserialize`:
/// the only ways in are [`Money::new`] and [`Money::from_decimal`], which
/// enforce the non-negative invariant. The wire carries [`crate::AmountBody`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Money {
    amount: i64,
    currency: Currency,
}

impl Money {
    /// Creates a new Money value from minor units.
    pub fn new(amount: i64, currency: Currency) -> Result<Self, DomainError> {
        if amount < 0 {
            return Err(DomainError::NegativeAmount);
        }
        Ok(Self { amount, currency })
    }

    /// Converts a user-facing decimal amount to minor units.
    ///
    /// Minor units are `amount * 100` rounded half-up (midpoint away from
    /// zero), so `1.005` is always `101` cents regardless of platform.
    pub fn from_decimal(amount: Decimal, currency: Currency) -> Result<Self, DomainError> {
        let minor = (amount * Decimal::from(currency.minor_units_per_major()))
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        let minor = minor
            .to_i64()
            .ok_or_else(|| DomainError::AmountOutOfRange(amount.to_string()))?;
        Self::new(minor, currency)
    }

    /// Returns the amount in smallest currency unit.
    pub fn amount(&self) -> i64 {
        self.amount
    }

    /// Returns the currency.
    pub fn currency(&self) -> Currency {
        self.currency
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let per_major = self.currency.minor_units_per_major();
        let major = self.amount / per_major;
        let minor = (self.amount % per_major).abs();
        write!(f, "{}{}.{:02}", self.currency.symbol(), major, minor)
    }
}
