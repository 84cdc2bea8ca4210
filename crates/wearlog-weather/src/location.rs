//! Current-location resolution.
//!
//! Stands in for device geolocation: either fixed coordinates, an
//! ip-api style lookup, or a source that always refuses.

use crate::types::{Location, LocationError};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

const REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Deserialize)]
struct IpLookupResponse {
    #[serde(default)]
    status: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
    city: Option<String>,
}

#[derive(Debug, Clone)]
pub enum LocationSource {
    Fixed(Location),
    Ip { client: Client, url: String },
    Denied,
}

impl LocationSource {
    pub fn fixed(latitude: f64, longitude: f64) -> Self {
        Self::Fixed(Location::new(latitude, longitude))
    }

    pub fn ip(url: impl Into<String>) -> Result<Self, LocationError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| LocationError::Other(e.to_string()))?;
        Ok(Self::Ip {
            client,
            url: url.into(),
        })
    }

    pub async fn current(&self) -> Result<Location, LocationError> {
        match self {
            Self::Fixed(location) => Ok(location.clone()),
            Self::Denied => Err(LocationError::PermissionDenied),
            Self::Ip { client, url } => lookup_ip(client, url).await,
        }
    }
}

async fn lookup_ip(client: &Client, url: &str) -> Result<Location, LocationError> {
    let response = client.get(url).send().await.map_err(|e| {
        if e.is_timeout() {
            LocationError::Timeout
        } else {
            LocationError::Other(e.to_string())
        }
    })?;

    if !response.status().is_success() {
        tracing::debug!("IP lookup returned status {}", response.status());
        return Err(LocationError::ServiceUnavailable);
    }

    let body: IpLookupResponse = response
        .json()
        .await
        .map_err(|e| LocationError::Other(e.to_string()))?;

    if body.status.as_deref().is_some_and(|s| s != "success") {
        return Err(LocationError::ServiceUnavailable);
    }

    match (body.lat, body.lon) {
        (Some(latitude), Some(longitude)) => Ok(Location {
            latitude,
            longitude,
            city_name: body.city.filter(|c| !c.is_empty()),
        }),
        _ => Err(LocationError::ServiceUnavailable),
    }
}
