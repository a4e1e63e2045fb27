#![allow(dead_code)]

use serde_json::{json, Value};

pub const API_KEY: &str = "test-api-key";

pub fn suggestion_json(place_id: &str, main: &str, secondary: Option<&str>) -> Value {
    let mut structured = json!({ "mainText": { "text": main, "matches": [{ "endOffset": 8 }] } });
    if let Some(secondary) = secondary {
        structured["secondaryText"] = json!({ "text": secondary });
    }
    json!({
        "placePrediction": {
            "place": format!("places/{place_id}"),
            "placeId": place_id,
            "text": { "text": format!("{main}, {}", secondary.unwrap_or_default()) },
            "structuredFormat": structured,
            "types": ["street_address", "geocode"]
        }
    })
}

pub fn place_detail_json(place_id: &str, components: Value) -> Value {
    json!({
        "name": format!("places/{place_id}"),
        "id": place_id,
        "types": ["street_address"],
        "formattedAddress": "123 Main St, Springfield, IL 62704, USA",
        "shortFormattedAddress": "123 Main St, Springfield",
        "addressComponents": components,
        "location": { "latitude": 39.7817, "longitude": -89.6501 },
        "viewport": {
            "low": { "latitude": 39.7803, "longitude": -89.6515 },
            "high": { "latitude": 39.7830, "longitude": -89.6488 }
        },
        "googleMapsUri": "https://maps.google.com/?cid=123",
        "utcOffsetMinutes": -300,
        "displayName": { "text": "123 Main St", "languageCode": "en" }
    })
}

pub fn springfield_components() -> Value {
    json!([
        { "longText": "123", "shortText": "123", "types": ["street_number"], "languageCode": "en-US" },
        { "longText": "Main Street", "shortText": "Main St", "types": ["route"], "languageCode": "en" },
        { "longText": "Springfield", "shortText": "Springfield", "types": ["locality", "political"], "languageCode": "en" },
        { "longText": "Illinois", "shortText": "IL", "types": ["administrative_area_level_1", "political"], "languageCode": "en" },
        { "longText": "62704", "shortText": "62704", "types": ["postal_code"], "languageCode": "en-US" }
    ])
}
