//! Weather lookup for wearlog
//!
//! Resolves the current location, queries an OpenWeather-compatible API and
//! hands a single `WeatherSnapshot` to the caller.

pub mod location;
pub mod lookup;
pub mod provider;
pub mod types;

pub use location::LocationSource;
pub use lookup::WeatherLookup;
pub use provider::WeatherProvider;
pub use types::*;
