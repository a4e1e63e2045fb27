use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use tracing::warn;
use crate::models::place::{AddressComponent, LatLng, PlaceDetail, Viewport};
use crate::models::suggestion::{display_label, AutocompleteSuggestion};

pub const LOCALITY: &str = "locality";
pub const POSTAL_CODE: &str = "postal_code";
pub const POSTAL_CODE_SUFFIX: &str = "postal_code_suffix";
pub const ADMINISTRATIVE_AREA_LEVEL_1: &str = "administrative_area_level_1";
pub const COUNTRY: &str = "country";

#[skip_serializing_none]
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct LocationText {
    pub main_text: String,
    pub secondary_text: Option<String>,
}

impl LocationText {
    pub fn display_label(&self) -> String {
        display_label(&self.main_text, self.secondary_text.as_deref())
    }
}

/// Normalized, caller-facing location record.
///
/// Derived fields are `None` (and absent from the JSON) when the place has no
/// address component of that category.
#[skip_serializing_none]
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StudioLocation {
    pub location: LatLng,
    pub text: LocationText,
    pub google_id: String,
    pub types: Vec<String>,
    pub formatted_address: String,
    pub short_formatted_address: String,
    pub address_components: Vec<AddressComponent>,
    pub utc_offset_minutes: i32,
    pub viewport: Viewport,
    pub google_maps_uri: String,
    pub locality: Option<String>,
    pub postal_code: Option<u32>,
    pub postal_code_suffix: Option<u32>,
    pub administrative_area_level1: Option<AddressComponent>,
    pub country: Option<AddressComponent>,
}

impl StudioLocation {
    pub fn from_place_detail(suggestion: &AutocompleteSuggestion, detail: PlaceDetail) -> Self {
        let locality = detail
            .find_component(LOCALITY)
            .map(|c| c.long_text.clone())
            .filter(|t| !t.is_empty());
        let postal_code = detail
            .find_component(POSTAL_CODE)
            .and_then(|c| parse_component_number(&detail.id, POSTAL_CODE, c));
        let postal_code_suffix = detail
            .find_component(POSTAL_CODE_SUFFIX)
            .and_then(|c| parse_component_number(&detail.id, POSTAL_CODE_SUFFIX, c));
        let administrative_area_level1 = detail.find_component(ADMINISTRATIVE_AREA_LEVEL_1).cloned();
        let country = detail.find_component(COUNTRY).cloned();

        Self {
            location: detail.location,
            text: LocationText {
                main_text: suggestion.main_text().to_string(),
                secondary_text: suggestion.secondary_text().map(str::to_string),
            },
            google_id: detail.id,
            types: detail.types,
            formatted_address: detail.formatted_address,
            short_formatted_address: detail.short_formatted_address,
            address_components: detail.address_components,
            utc_offset_minutes: detail.utc_offset_minutes,
            viewport: detail.viewport,
            google_maps_uri: detail.google_maps_uri,
            locality,
            postal_code,
            postal_code_suffix,
            administrative_area_level1,
            country,
        }
    }
}

fn parse_component_number(place_id: &str, category: &str, component: &AddressComponent) -> Option<u32> {
    let parsed = parse_postal_code(&component.long_text);
    if parsed.is_none() {
        warn!(
            "Dropping {} for place {}, {:?} is not numeric",
            category, place_id, component.long_text
        );
    }
    parsed
}

/// Integer value of the leading digits of `text`, e.g. `"62704-1234"` is 62704.
///
/// Returns `None` when the text does not start with a digit or the value does
/// not fit a `u32`.
pub fn parse_postal_code(text: &str) -> Option<u32> {
    let trimmed = text.trim_start();
    let digits_end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    trimmed[..digits_end].parse().ok()
}
