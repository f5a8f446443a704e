pub mod convert;
pub mod currencies;
pub mod lookup;
pub mod rates;
pub mod trend;
pub mod ui;
pub mod watch;
