//! Fire-once weather lookup.
//!
//! `get` spawns the location + weather fetch on the runtime and invokes the
//! callback at most once. Failures are logged and the callback is dropped
//! unused; there is no timeout, retry or cancellation.

use std::sync::Arc;

use tokio::runtime::Handle;

use crate::location::LocationSource;
use crate::provider::WeatherProvider;
use crate::types::{WeatherError, WeatherSnapshot};

#[derive(Debug, Clone)]
pub struct WeatherLookup {
    provider: Arc<WeatherProvider>,
    location: Arc<LocationSource>,
    runtime: Handle,
}

impl WeatherLookup {
    pub fn new(provider: WeatherProvider, location: LocationSource, runtime: Handle) -> Self {
        Self {
            provider: Arc::new(provider),
            location: Arc::new(location),
            runtime,
        }
    }

    /// Request the current weather; `callback` runs on a runtime worker if
    /// the lookup succeeds and is never called otherwise.
    pub fn get<F>(&self, callback: F)
    where
        F: FnOnce(WeatherSnapshot) + Send + 'static,
    {
        let provider = self.provider.clone();
        let location = self.location.clone();

        self.runtime.spawn(async move {
            match resolve(&provider, &location).await {
                Ok(snapshot) => {
                    tracing::info!(
                        place = %snapshot.place_name,
                        temperature = snapshot.temperature,
                        "Weather lookup resolved"
                    );
                    callback(snapshot);
                }
                Err(e) => tracing::warn!("Weather lookup failed: {}", e),
            }
        });
    }
}

async fn resolve(
    provider: &WeatherProvider,
    location: &LocationSource,
) -> Result<WeatherSnapshot, WeatherError> {
    let location = location.current().await?;
    tracing::debug!("Got location: {}, {}", location.latitude, location.longitude);
    provider.fetch(&location).await
}
