//! Load-once currency catalog shared by the views.

use std::collections::BTreeMap;

use tokio::sync::Mutex;
use tracing::debug;

use crate::core::error::RateError;
use crate::core::rates::RateProvider;

/// Memoizes the provider's currency list for the lifetime of a view.
///
/// The list is fetched at most once; there is no invalidation. A failed load
/// is not cached, so the next interaction retries. Holding the lock across
/// the fetch also keeps concurrent callers from issuing duplicate requests.
#[derive(Default)]
pub struct CurrencyCatalog {
    cached: Mutex<Option<BTreeMap<String, String>>>,
}

impl CurrencyCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get_or_load(
        &self,
        provider: &dyn RateProvider,
    ) -> Result<BTreeMap<String, String>, RateError> {
        let mut cached = self.cached.lock().await;
        if let Some(list) = cached.as_ref() {
            debug!("currency catalog served from memory");
            return Ok(list.clone());
        }

        let list = provider.list_currencies().await?;
        debug!(count = list.len(), "currency catalog loaded");
        *cached = Some(list.clone());
        Ok(list)
    }
}
