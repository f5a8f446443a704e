//! Error taxonomy for rate queries.

use thiserror::Error;

/// Everything that can go wrong between a user input and a displayed rate.
///
/// All variants are caught at the view boundary and rendered as a message;
/// none of them are fatal to the process.
#[derive(Debug, Error)]
pub enum RateError {
    /// Amount was zero, negative or not a finite number on an explicit submit.
    #[error("amount must be a positive number (got {0})")]
    InvalidAmount(f64),

    /// A real conversion was requested with the same currency on both sides.
    #[error("pick two different currencies ({0} is on both sides)")]
    DegenerateCurrencyPair(String),

    /// The provider answered, but its rate table lacks the requested currency.
    #[error("no rate available for {currency}")]
    RateUnavailable { currency: String },

    /// Transport failure, non-success status or a malformed payload.
    #[error("rate provider unavailable: {0}")]
    ProviderUnavailable(String),
}

impl From<reqwest::Error> for RateError {
    fn from(err: reqwest::Error) -> Self {
        RateError::ProviderUnavailable(err.to_string())
    }
}
