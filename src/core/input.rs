//! Validation of user answers and the retry loops built on top of them.

use crate::core::ports::{Prompt, Prompter, UserNotifier};
use anyhow::Result;
use thiserror::Error;
use tracing::debug;

pub const AMOUNT_PROMPT: &str = "Enter the amount to convert";
pub const NAME_PROMPT: &str = "Enter your name";
pub const CANCEL_HINT: &str = "type 'cancel' or press Ctrl-D to stop";

/// Reasons an amount answer is rejected.
#[derive(Debug, Error, PartialEq)]
pub enum AmountError {
    #[error("no amount was entered")]
    Empty,
    #[error("'{0}' is not a number")]
    NotANumber(String),
    #[error("the amount must be a finite number")]
    NotFinite,
    #[error("the amount must be greater than zero, got {0}")]
    NotPositive(f64),
}

/// Parses a strictly positive, finite amount.
pub fn parse_amount(text: &str) -> Result<f64, AmountError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(AmountError::Empty);
    }
    let amount: f64 = trimmed
        .parse()
        .map_err(|_| AmountError::NotANumber(trimmed.to_string()))?;
    if !amount.is_finite() {
        return Err(AmountError::NotFinite);
    }
    if amount <= 0.0 {
        return Err(AmountError::NotPositive(amount));
    }
    Ok(amount)
}

/// Returns the trimmed name, or `None` when nothing but whitespace was given.
pub fn parse_name(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Prompts until a valid amount is entered or the user cancels.
pub fn request_amount(
    prompter: &mut dyn Prompter,
    notifier: &mut dyn UserNotifier,
    currency: &str,
) -> Result<Prompt<f64>> {
    let prompt = format!("{AMOUNT_PROMPT} ({currency}, {CANCEL_HINT}):");
    loop {
        let text = match prompter.read_line(&prompt)? {
            Prompt::Value(text) => text,
            Prompt::Cancelled => return Ok(Prompt::Cancelled),
        };
        match parse_amount(&text) {
            Ok(amount) => return Ok(Prompt::Value(amount)),
            Err(e) => {
                debug!(input = %text, error = %e, "Rejected amount");
                notifier.error(&format!(
                    "Error: {e}. Please enter a valid number greater than zero."
                ))?;
            }
        }
    }
}

/// Prompts until a non-blank name is entered or the user cancels.
pub fn request_name(
    prompter: &mut dyn Prompter,
    notifier: &mut dyn UserNotifier,
) -> Result<Prompt<String>> {
    let prompt = format!("{NAME_PROMPT} ({CANCEL_HINT}):");
    loop {
        let text = match prompter.read_line(&prompt)? {
            Prompt::Value(text) => text,
            Prompt::Cancelled => return Ok(Prompt::Cancelled),
        };
        match parse_name(&text) {
            Some(name) => return Ok(Prompt::Value(name)),
            None => notifier.error("Error: the name cannot be empty.")?,
        }
    }
}
