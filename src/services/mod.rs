// Service exports
pub mod cache;
pub mod dataset;
pub mod geocoder;

pub use cache::{CacheKey, CacheStats, LocationCache};
pub use dataset::DatasetError;
pub use geocoder::{GeocodeError, NominatimGeocoder};
