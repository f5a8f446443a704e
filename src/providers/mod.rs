pub mod frankfurter;

pub use frankfurter::{DEFAULT_BASE_URL, FrankfurterProvider};
