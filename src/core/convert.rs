//! Amount conversion between two currencies.

use tracing::debug;

use crate::core::error::RateError;
use crate::core::rates::RateProvider;

/// Converts amounts through a [`RateProvider`].
///
/// Stateless and idempotent: repeated calls with identical arguments against
/// an unchanged rate table yield identical output. The result is kept at full
/// precision; rounding happens only at display time.
pub struct ConversionEngine<'a> {
    provider: &'a dyn RateProvider,
}

impl<'a> ConversionEngine<'a> {
    pub fn new(provider: &'a dyn RateProvider) -> Self {
        ConversionEngine { provider }
    }

    /// Converts `amount` units of `from` into `to`.
    ///
    /// The identity pair short-circuits without touching the provider, and an
    /// invalid amount fails before any query is issued.
    pub async fn convert(&self, amount: f64, from: &str, to: &str) -> Result<f64, RateError> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(RateError::InvalidAmount(amount));
        }

        if from == to {
            debug!(%from, "identity conversion, skipping provider");
            return Ok(amount);
        }

        let snapshot = self.provider.get_rate(amount, from, to).await?;
        snapshot
            .rates
            .get(to)
            .copied()
            .ok_or_else(|| RateError::RateUnavailable {
                currency: to.to_string(),
            })
    }
}
