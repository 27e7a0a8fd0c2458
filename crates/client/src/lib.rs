//! Provider clients for city-explorer.
//!
//! Each client wraps one upstream HTTP API and implements the matching
//! gateway trait from `explorer-core`.

pub mod businesses;
pub mod error;
pub mod forecast;
pub mod geocode;
pub(crate) mod http;

pub use businesses::{BusinessSearchClient, BusinessSearchConfig};
pub use error::ProviderError;
pub use forecast::{ForecastClient, ForecastConfig};
pub use geocode::{GeocodeClient, GeocodeConfig};
