//! Location search for the weather widget, backed by Nominatim.

use anyhow::Result;
use log::warn;
use serde::Deserialize;

use homedeck_types::LocationRef;

const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org/search";
// Nominatim's usage policy requires an identifying User-Agent.
const USER_AGENT: &str = concat!("homedeck/", env!("CARGO_PKG_VERSION"));

/// One place as Nominatim returns it; coordinates arrive as strings.
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    display_name: String,
    lat: String,
    lon: String,
}

fn to_locations(places: Vec<NominatimPlace>) -> Vec<LocationRef> {
    places
        .into_iter()
        .filter_map(|place| {
            Some(LocationRef {
                latitude: place.lat.parse().ok()?,
                longitude: place.lon.parse().ok()?,
                name: place.display_name,
            })
        })
        .collect()
}

pub struct GeocodingClient {
    client: reqwest::Client,
    base_url: String,
}

impl GeocodingClient {
    pub fn new() -> Result<Self> {
        Self::with_base_url(NOMINATIM_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Search for places matching a free-text query.
    ///
    /// Failures degrade to an empty result list; the form shows "no matches"
    /// rather than an error state.
    pub async fn search(&self, query: &str) -> Vec<LocationRef> {
        if query.trim().is_empty() {
            return Vec::new();
        }
        match self.try_search(query).await {
            Ok(locations) => locations,
            Err(err) => {
                warn!("Location search for {query:?} failed: {err:#}");
                Vec::new()
            }
        }
    }

    async fn try_search(&self, query: &str) -> Result<Vec<LocationRef>> {
        let places: Vec<NominatimPlace> = self
            .client
            .get(&self.base_url)
            .query(&[("q", query), ("format", "json"), ("limit", "5")])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(to_locations(places))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_nominatim_response() {
        let body = r#"[
            {"display_name": "Paris, Île-de-France, France", "lat": "48.8535", "lon": "2.3484"},
            {"display_name": "Paris, Texas, USA", "lat": "33.6609", "lon": "-95.5555"}
        ]"#;
        let places: Vec<NominatimPlace> = serde_json::from_str(body).unwrap();
        let locations = to_locations(places);
        assert_eq!(locations.len(), 2);
        assert_eq!(locations[0].name, "Paris, Île-de-France, France");
        assert!((locations[0].latitude - 48.8535).abs() < 1e-9);
        assert!((locations[1].longitude - -95.5555).abs() < 1e-9);
    }

    #[test]
    fn test_unparseable_coordinates_are_skipped() {
        let places = vec![NominatimPlace {
            display_name: "Nowhere".to_string(),
            lat: "not-a-number".to_string(),
            lon: "0".to_string(),
        }];
        assert!(to_locations(places).is_empty());
    }
}
