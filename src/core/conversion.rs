//! Fixed-rate currency conversion.

use anyhow::{Result, bail};
use std::fmt::Display;

/// Default rate: Argentine pesos per US dollar.
pub const DEFAULT_RATE: f64 = 1350.50;
pub const DEFAULT_SOURCE_CURRENCY: &str = "ARS";
pub const DEFAULT_TARGET_CURRENCY: &str = "USD";

/// An immutable exchange rate, expressed as source-currency units per one
/// target-currency unit.
#[derive(Debug, Clone, PartialEq)]
pub struct ExchangeRate {
    source: String,
    target: String,
    rate: f64,
}

impl ExchangeRate {
    /// Creates a rate. Fails unless `rate` is finite and strictly positive.
    pub fn new(source: &str, target: &str, rate: f64) -> Result<Self> {
        if !rate.is_finite() || rate <= 0.0 {
            bail!("Exchange rate must be a positive number, got {rate}");
        }
        if source.trim().is_empty() || target.trim().is_empty() {
            bail!("Currency codes must not be empty");
        }
        Ok(Self {
            source: source.trim().to_uppercase(),
            target: target.trim().to_uppercase(),
            rate,
        })
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// Converts a source-currency amount into the target currency.
    ///
    /// No rounding is applied; see [`format_amount`] for presentation.
    pub fn convert(&self, amount: f64) -> f64 {
        amount / self.rate
    }

    /// Converts a target-currency amount back into the source currency.
    pub fn revert(&self, converted: f64) -> f64 {
        converted * self.rate
    }
}

impl Default for ExchangeRate {
    fn default() -> Self {
        Self {
            source: DEFAULT_SOURCE_CURRENCY.to_string(),
            target: DEFAULT_TARGET_CURRENCY.to_string(),
            rate: DEFAULT_RATE,
        }
    }
}

impl Display for ExchangeRate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} per {}", format_amount(self.rate), self.source, self.target)
    }
}

/// Formats a monetary value with two decimals.
pub fn format_amount(value: f64) -> String {
    format!("{value:.2}")
}

/// Builds the user-facing summary of a single conversion.
pub fn format_conversion(amount: f64, rate: &ExchangeRate, converted: f64) -> String {
    format!(
        "Conversion summary:\n  Amount entered: ${} {}\n  Exchange rate: ${} {} per {}\n  Converted amount: ${} {}",
        format_amount(amount),
        rate.source(),
        format_amount(rate.rate()),
        rate.source(),
        rate.target(),
        format_amount(converted),
        rate.target(),
    )
}
