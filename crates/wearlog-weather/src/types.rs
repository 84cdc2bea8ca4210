use serde::{Deserialize, Serialize};

/// A single point-in-time weather reading.
///
/// Seeds the post form defaults and drives the clothing recommendation.
/// Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct WeatherSnapshot {
    /// °C
    pub temperature: f64,
    /// °C
    pub feels_like: f64,
    pub condition_description: String,
    pub place_name: String,
}

/// Geographic location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub city_name: Option<String>,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            city_name: None,
        }
    }
}

/// `GET /data/2.5/weather` response, reduced to the fields we read.
#[derive(Debug, Deserialize)]
pub(crate) struct CurrentWeatherResponse {
    pub main: MainReadings,
    #[serde(default)]
    pub weather: Vec<ConditionEntry>,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MainReadings {
    pub temp: f64,
    pub feels_like: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ConditionEntry {
    pub description: String,
}

impl CurrentWeatherResponse {
    pub(crate) fn into_snapshot(self) -> Result<WeatherSnapshot, WeatherError> {
        let condition = self
            .weather
            .into_iter()
            .next()
            .ok_or_else(|| WeatherError::Parse("response has no weather entries".to_string()))?;

        Ok(WeatherSnapshot {
            temperature: self.main.temp,
            feels_like: self.main.feels_like,
            condition_description: condition.description,
            place_name: self.name,
        })
    }
}

/// Location service errors
#[derive(Debug, thiserror::Error)]
pub enum LocationError {
    #[error("Location permission denied")]
    PermissionDenied,
    #[error("Location service unavailable")]
    ServiceUnavailable,
    #[error("Location request timed out")]
    Timeout,
    #[error("Location error: {0}")]
    Other(String),
}

/// Weather provider errors
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Location error: {0}")]
    Location(#[from] LocationError),
    #[error("Weather API returned {status}: {message}")]
    Api { status: u16, message: String },
    #[error("Weather API key is not configured")]
    MissingApiKey,
    #[error("Parse error: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_response_into_snapshot() {
        let body = serde_json::json!({
            "main": { "temp": 5.3, "feels_like": 1.2, "humidity": 40 },
            "weather": [
                { "id": 800, "main": "Clear", "description": "맑음" },
                { "id": 701, "main": "Mist", "description": "박무" }
            ],
            "name": "Seoul"
        });
        let response: CurrentWeatherResponse = serde_json::from_value(body).unwrap();
        let snapshot = response.into_snapshot().unwrap();

        assert_eq!(snapshot.temperature, 5.3);
        assert_eq!(snapshot.feels_like, 1.2);
        assert_eq!(snapshot.condition_description, "맑음");
        assert_eq!(snapshot.place_name, "Seoul");
    }

    #[test]
    fn test_response_without_conditions_is_parse_error() {
        let body = serde_json::json!({
            "main": { "temp": 5.0, "feels_like": 1.0 },
            "weather": [],
            "name": "Seoul"
        });
        let response: CurrentWeatherResponse = serde_json::from_value(body).unwrap();
        assert!(matches!(response.into_snapshot(), Err(WeatherError::Parse(_))));
    }

    #[test]
    fn test_default_snapshot_is_zeroed() {
        let snapshot = WeatherSnapshot::default();
        assert_eq!(snapshot.temperature, 0.0);
        assert!(snapshot.place_name.is_empty());
    }
}
