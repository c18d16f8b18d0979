use serde::{Deserialize, Serialize};

/// A nearby place as returned to the map panel. Every field is optional
/// so a sparse upstream record still renders.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceInfo {
    pub name: Option<String>,
    pub address: Option<String>,
    #[serde(rename = "type")]
    pub place_type: Option<String>,
    pub distance: Option<String>,
    pub lng: Option<f64>,
    pub lat: Option<f64>,
    pub tel: Option<String>,
    pub photo_url: Option<String>,
}
