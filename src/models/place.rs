use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq)]
pub struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq)]
pub struct Viewport {
    pub low: LatLng,
    pub high: LatLng,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AddressComponent {
    pub long_text: String,
    pub short_text: String,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub language_code: String,
}

impl AddressComponent {
    pub fn has_type(&self, category: &str) -> bool {
        self.types.iter().any(|t| t == category)
    }
}

#[skip_serializing_none]
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct DisplayName {
    pub text: String,
    pub language_code: Option<String>,
}

/// Place record as returned by the place details endpoint for our field mask.
///
/// `id`, `location` and `viewport` are required; a body without them is not a
/// place and fails to deserialize. The remaining fields default when omitted.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlaceDetail {
    #[serde(default)]
    pub name: String,
    pub id: String,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub formatted_address: String,
    #[serde(default)]
    pub short_formatted_address: String,
    #[serde(default)]
    pub address_components: Vec<AddressComponent>,
    pub location: LatLng,
    pub viewport: Viewport,
    #[serde(default)]
    pub google_maps_uri: String,
    #[serde(default)]
    pub utc_offset_minutes: i32,
    #[serde(default)]
    pub display_name: DisplayName,
}

impl PlaceDetail {
    /// Minimal shape check run before normalizing. Returns the reason on failure.
    pub fn validate(&self) -> Result<(), String> {
        if self.id.trim().is_empty() {
            return Err("place detail has an empty id".to_string());
        }
        if !self.location.latitude.is_finite() || !self.location.longitude.is_finite() {
            return Err(format!("place {} has a non-finite location", self.id));
        }
        Ok(())
    }

    /// First component, in service order, tagged with `category`.
    pub fn find_component(&self, category: &str) -> Option<&AddressComponent> {
        self.address_components.iter().find(|c| c.has_type(category))
    }
}
