//! Type-safe price representation using decimal arithmetic.
//!
//! The Storefront API returns money as a decimal string plus an ISO 4217
//! currency code. [`Price`] parses that pair and renders it for display.

use std::fmt;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The amount is not a decimal number.
    #[error("invalid amount {0:?}")]
    InvalidAmount(String),
    /// The currency code is not three ASCII letters.
    #[error("invalid currency code {0:?}")]
    InvalidCurrency(String),
}

/// A price with currency information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Parse an API money pair (`"19.9"`, `"USD"`).
    ///
    /// # Errors
    ///
    /// Returns an error if the amount is not a decimal or the currency code
    /// is malformed.
    pub fn parse(amount: &str, currency_code: &str) -> Result<Self, PriceError> {
        let amount = Decimal::from_str(amount.trim())
            .map_err(|_| PriceError::InvalidAmount(amount.to_string()))?;
        let currency_code = CurrencyCode::parse(currency_code)?;
        Ok(Self::new(amount, currency_code))
    }

    /// Whether the amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Format for display (e.g., `$19.99`, `€5.00`, `CLP 10.000`).
    #[must_use]
    pub fn display(&self) -> String {
        let places = self.currency_code.decimal_places();
        let rounded = self
            .amount
            .round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero);
        let formatted = format!("{rounded:.prec$}", prec = places as usize);
        let number = group_thousands(&formatted, places == 0);

        let (sign, number) = number
            .strip_prefix('-')
            .map_or(("", number.as_str()), |rest| ("-", rest));

        match self.currency_code.symbol() {
            Some(symbol) => format!("{sign}{symbol}{number}"),
            None => format!("{sign}{} {number}", self.currency_code.code()),
        }
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// Insert thousands separators into a formatted decimal string.
///
/// Zero-decimal currencies group with `.` (Latin American style), the rest
/// with `,`.
fn group_thousands(formatted: &str, dot_grouping: bool) -> String {
    let (sign, unsigned) = formatted
        .strip_prefix('-')
        .map_or(("", formatted), |rest| ("-", rest));
    let (int_part, frac_part) = unsigned
        .split_once('.')
        .map_or((unsigned, None), |(i, f)| (i, Some(f)));

    let separator = if dot_grouping { '.' } else { ',' };
    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(c);
    }

    match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

/// ISO 4217 currency code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyCode(String);

impl Default for CurrencyCode {
    fn default() -> Self {
        Self("USD".to_string())
    }
}

impl CurrencyCode {
    /// Parse a three letter currency code (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns an error if the code is not exactly three ASCII letters.
    pub fn parse(code: &str) -> Result<Self, PriceError> {
        let code = code.trim();
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(PriceError::InvalidCurrency(code.to_string()));
        }
        Ok(Self(code.to_ascii_uppercase()))
    }

    /// The three letter code.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.0
    }

    /// Display symbol for well-known currencies.
    #[must_use]
    pub fn symbol(&self) -> Option<&'static str> {
        match self.0.as_str() {
            "USD" | "CAD" | "AUD" | "MXN" => Some("$"),
            "EUR" => Some("€"),
            "GBP" => Some("£"),
            "JPY" => Some("¥"),
            _ => None,
        }
    }

    /// Number of minor unit digits shown for the currency.
    #[must_use]
    pub fn decimal_places(&self) -> u32 {
        match self.0.as_str() {
            "CLP" | "JPY" | "KRW" | "PYG" | "VND" | "ISK" => 0,
            _ => 2,
        }
    }
}

impl FromStr for CurrencyCode {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
