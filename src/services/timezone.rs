//! Timezone lookup and validation for the date & time widget.

use anyhow::Result;
use log::warn;
use serde::Deserialize;

const OPEN_METEO_URL: &str = "https://api.open-meteo.com/v1/forecast";

#[derive(Debug, Deserialize)]
struct ForecastTimezone {
    timezone: String,
}

/// Validate a timezone choice as the datetime widget accepts it.
///
/// The empty string ("follow the viewing client") and "Local" are deliberate
/// choices; everything else must be a known IANA identifier.
pub fn is_valid_timezone(id: &str) -> bool {
    id.is_empty() || id == "Local" || id.parse::<chrono_tz::Tz>().is_ok()
}

pub struct TimezoneClient {
    client: reqwest::Client,
    base_url: String,
}

impl TimezoneClient {
    pub fn new() -> Self {
        Self::with_base_url(OPEN_METEO_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Resolve the IANA timezone at a coordinate, used to pre-fill the
    /// timezone field after a location is picked.
    ///
    /// Failures degrade to `None`; the field simply stays on its current
    /// value.
    pub async fn timezone_for(&self, latitude: f64, longitude: f64) -> Option<String> {
        match self.try_lookup(latitude, longitude).await {
            Ok(timezone) if is_valid_timezone(&timezone) => Some(timezone),
            Ok(timezone) => {
                warn!("Lookup returned unknown timezone {timezone:?}; ignoring");
                None
            }
            Err(err) => {
                warn!("Timezone lookup for ({latitude}, {longitude}) failed: {err:#}");
                None
            }
        }
    }

    async fn try_lookup(&self, latitude: f64, longitude: f64) -> Result<String> {
        let response: ForecastTimezone = self
            .client
            .get(&self.base_url)
            .query(&[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                ("timezone", "auto".to_string()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(response.timezone)
    }
}

impl Default for TimezoneClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_identifiers_are_valid() {
        assert!(is_valid_timezone("Europe/London"));
        assert!(is_valid_timezone("America/New_York"));
        assert!(is_valid_timezone("UTC"));
    }

    #[test]
    fn test_special_values_are_valid() {
        assert!(is_valid_timezone(""));
        assert!(is_valid_timezone("Local"));
    }

    #[test]
    fn test_garbage_is_invalid() {
        assert!(!is_valid_timezone("Europe/Atlantis"));
        assert!(!is_valid_timezone("local"));
    }

    #[test]
    fn test_parses_forecast_response() {
        let body = r#"{"latitude": 48.86, "longitude": 2.34, "timezone": "Europe/Paris"}"#;
        let parsed: ForecastTimezone = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.timezone, "Europe/Paris");
    }
}
