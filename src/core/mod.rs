//! Core business logic abstractions

pub mod catalog;
pub mod convert;
pub mod coordinator;
pub mod error;
pub mod format;
pub mod log;
pub mod rates;
pub mod trend;

// Re-export main types for cleaner imports
pub use catalog::CurrencyCatalog;
pub use convert::ConversionEngine;
pub use coordinator::{QuerySlot, QueryState};
pub use error::RateError;
pub use rates::{RateProvider, RateSeries, RateSnapshot};
pub use trend::{Trend, TrendDirection, TrendPoint, TrendSummary};
