//! Nearby-place lookup backed by the Amap place API.
//!
//! The map panel treats this as decoration: any failure, from a missing
//! key to an upstream error, degrades to an empty result list.

use std::env;

use reqwest::Client;
use serde_json::Value;

use crate::errors::{AppError, Result};
use crate::models::place::PlaceInfo;

const AROUND_URL: &str = "https://restapi.amap.com/v3/place/around";
const SEARCH_RADIUS_METERS: u32 = 2000;
const PAGE_SIZE: u32 = 10;

#[derive(Clone)]
pub struct MapService {
    client: Client,
    key: String,
}

impl MapService {
    pub fn from_env() -> Result<Self> {
        let key = env::var("AMAP_KEY").map_err(|_| AppError::Config("AMAP_KEY not set".to_string()))?;

        Ok(Self { client: Client::new(), key })
    }

    /// Places of one category around a coordinate. `category` is one of
    /// `restaurant`, `hotel` or `traffic`; anything else searches
    /// restaurants.
    pub async fn search_nearby(&self, lng: f64, lat: f64, category: &str) -> Vec<PlaceInfo> {
        let types_code = match category.to_lowercase().as_str() {
            "hotel" => "100000",
            "traffic" => "150000",
            _ => "050000",
        };

        let params = [
            ("key", self.key.clone()),
            ("location", format!("{},{}", lng, lat)),
            ("radius", SEARCH_RADIUS_METERS.to_string()),
            ("types", types_code.to_string()),
            ("offset", PAGE_SIZE.to_string()),
            ("page", "1".to_string()),
            ("extensions", "all".to_string()),
        ];

        let response = match self.client.get(AROUND_URL).query(&params).send().await {
            Ok(response) => response,
            Err(err) => {
                log::warn!("nearby-place request failed: {}", err);
                return Vec::new();
            }
        };

        if !response.status().is_success() {
            log::warn!("nearby-place request failed with status {}", response.status());
            return Vec::new();
        }

        let root: Value = match response.json().await {
            Ok(root) => root,
            Err(err) => {
                log::warn!("nearby-place response was not JSON: {}", err);
                return Vec::new();
            }
        };

        if root.get("status").and_then(Value::as_str) != Some("1") {
            log::warn!(
                "nearby-place lookup rejected: {}",
                root.get("info").and_then(Value::as_str).unwrap_or("unknown reason")
            );
            return Vec::new();
        }

        match root.get("pois").and_then(Value::as_array) {
            Some(pois) => pois.iter().map(place_from_poi).collect(),
            None => Vec::new(),
        }
    }
}

fn place_from_poi(poi: &Value) -> PlaceInfo {
    let text = |field: &str| poi.get(field).and_then(Value::as_str).map(str::to_string);

    let photo_url = poi
        .get("photos")
        .and_then(Value::as_array)
        .and_then(|photos| photos.first())
        .and_then(|photo| photo.get("url"))
        .and_then(Value::as_str)
        .map(str::to_string);

    // `location` comes as "lng,lat"; either half may fail to parse on its own.
    let (lng, lat) = match poi.get("location").and_then(Value::as_str) {
        Some(location) if location.contains(',') => {
            let mut coords = location.split(',');
            let lng = coords.next().and_then(|v| v.parse().ok());
            let lat = coords.next().and_then(|v| v.parse().ok());
            (lng, lat)
        }
        _ => (None, None),
    };

    PlaceInfo {
        name: text("name"),
        address: text("address"),
        place_type: text("type"),
        distance: text("distance"),
        tel: text("tel"),
        photo_url,
        lng,
        lat,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn poi_fields_map_onto_place_info() {
        let poi = json!({
            "name": "Ichiran",
            "address": "1-2-3 Ueno",
            "type": "Dining",
            "distance": "240",
            "tel": "03-1234-5678",
            "location": "139.774,35.712",
            "photos": [{"url": "https://img.example/1.jpg"}, {"url": "https://img.example/2.jpg"}],
        });

        let place = place_from_poi(&poi);

        assert_eq!(place.name.as_deref(), Some("Ichiran"));
        assert_eq!(place.distance.as_deref(), Some("240"));
        assert_eq!(place.lng, Some(139.774));
        assert_eq!(place.lat, Some(35.712));
        assert_eq!(place.photo_url.as_deref(), Some("https://img.example/1.jpg"));
    }

    #[test]
    fn sparse_poi_maps_to_empty_fields() {
        let place = place_from_poi(&json!({}));

        assert!(place.name.is_none());
        assert!(place.lng.is_none());
        assert!(place.photo_url.is_none());
    }

    #[test]
    fn unparseable_location_halves_are_dropped_independently() {
        let place = place_from_poi(&json!({"location": "139.774,north"}));

        assert_eq!(place.lng, Some(139.774));
        assert_eq!(place.lat, None);

        let place = place_from_poi(&json!({"location": "139.774"}));
        assert_eq!(place.lng, None);
        assert_eq!(place.lat, None);
    }

    #[test]
    fn non_string_tel_reads_as_absent() {
        let place = place_from_poi(&json!({"tel": []}));

        assert!(place.tel.is_none());
    }
}
