//! OpenWeather-compatible current-weather client.

use crate::types::{CurrentWeatherResponse, Location, WeatherError, WeatherSnapshot};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

const REQUEST_TIMEOUT_SECS: u64 = 10;
const CURRENT_WEATHER_PATH: &str = "/data/2.5/weather";

#[derive(Debug, Clone)]
pub struct WeatherProvider {
    client: Arc<Client>,
    base_url: String,
    api_key: Option<String>,
    units: String,
    lang: String,
}

impl WeatherProvider {
    /// Create a provider for `base_url` (e.g. `https://api.openweathermap.org`).
    ///
    /// Defaults to metric units and Korean condition descriptions.
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client: Arc::new(client),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
            units: "metric".to_string(),
            lang: "kr".to_string(),
        })
    }

    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.units = units.into();
        self
    }

    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }

    /// Fetch the current conditions at `location`.
    pub async fn fetch(&self, location: &Location) -> Result<WeatherSnapshot, WeatherError> {
        let api_key = self.api_key.as_deref().ok_or(WeatherError::MissingApiKey)?;
        let url = format!("{}{}", self.base_url, CURRENT_WEATHER_PATH);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("lat", location.latitude.to_string()),
                ("lon", location.longitude.to_string()),
                ("appid", api_key.to_string()),
                ("units", self.units.clone()),
                ("lang", self.lang.clone()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(WeatherError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: CurrentWeatherResponse = response
            .json()
            .await
            .map_err(|e| WeatherError::Parse(e.to_string()))?;

        let mut snapshot = body.into_snapshot()?;
        if snapshot.place_name.is_empty() {
            if let Some(city) = &location.city_name {
                snapshot.place_name = city.clone();
            }
        }

        tracing::debug!(
            temperature = snapshot.temperature,
            place = %snapshot.place_name,
            "Fetched current weather"
        );
        Ok(snapshot)
    }
}
