use std::time::Duration;
use futures::future::BoxFuture;
use futures::FutureExt;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Url};
use serde_json::Value;
use tracing::{debug, warn};
use crate::error::PlacesError;
use crate::models::{AutocompleteRequest, AutocompleteResponse, AutocompleteSuggestion, PlaceDetail};

pub const DEFAULT_BASE_URL: &str = "https://places.googleapis.com/v1";
pub const API_KEY_HEADER: &str = "X-Goog-Api-Key";
pub const FIELD_MASK_HEADER: &str = "X-Goog-FieldMask";
pub const PLACE_DETAIL_FIELD_MASK: &str = "name,id,types,formattedAddress,addressComponents,location,viewport,googleMapsUri,utcOffsetMinutes,displayName,shortFormattedAddress";

/// The two remote lookups the location input depends on.
pub trait PlacesApi: Send + Sync {
    fn autocomplete<'a>(
        &'a self,
        input: &'a str,
        types: Option<&'a [String]>,
    ) -> BoxFuture<'a, Result<Vec<AutocompleteSuggestion>, PlacesError>>;

    fn place_detail<'a>(&'a self, place_id: &'a str) -> BoxFuture<'a, Result<PlaceDetail, PlacesError>>;
}

pub struct GooglePlacesRepo {
    client: Client,
    base_url: Url,
    api_key: String,
}

/// Place ids are opaque tokens of `[A-Za-z0-9_-]`; anything else is refused
/// before it can reach a request path.
pub fn validate_place_id(place_id: &str) -> Result<(), PlacesError> {
    let valid = !place_id.is_empty()
        && place_id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-');
    if valid {
        Ok(())
    } else {
        warn!("Refusing place id {:?}", place_id);
        Err(PlacesError::InvalidPlaceId {
            place_id: place_id.to_string(),
        })
    }
}

impl GooglePlacesRepo {
    pub fn new(
        base_url: &str,
        api_key: &str,
        timeout_secs: u64,
    ) -> Result<Self, PlacesError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        let parsed = Url::parse(base_url).map_err(|e| PlacesError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(PlacesError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: "URL cannot be a base".to_string(),
            });
        }

        Ok(Self {
            client,
            base_url: parsed,
            api_key: api_key.to_string(),
        })
    }

    /// Base URL with `segments` appended, each percent-encoded as one segment.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    pub async fn fetch_autocomplete_suggestions(
        &self,
        input: &str,
        types: Option<&[String]>,
    ) -> Result<Vec<AutocompleteSuggestion>, PlacesError> {
        let url = self.endpoint(&["places:autocomplete"]);
        let body = AutocompleteRequest::new(input, types);

        let response = self.client
            .post(url.clone())
            .header(CONTENT_TYPE, "application/json")
            .header(API_KEY_HEADER, &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Autocomplete request for {:?} failed with status: {}", input, status);
            return Err(PlacesError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let bytes = response.bytes().await?;
        let parsed: AutocompleteResponse = serde_json::from_slice(&bytes)
            .map_err(|source| PlacesError::Deserialize {
                context: format!("autocomplete response for {:?}", input),
                source,
            })?;

        debug!("Received {} suggestions for {:?}", parsed.suggestions.len(), input);
        Ok(parsed.suggestions)
    }

    pub async fn fetch_place_detail(
        &self,
        place_id: &str,
    ) -> Result<PlaceDetail, PlacesError> {
        validate_place_id(place_id)?;
        let url = self.endpoint(&["places", place_id]);

        let response = self.client
            .get(url.clone())
            .header(CONTENT_TYPE, "application/json")
            .header(API_KEY_HEADER, &self.api_key)
            .header(FIELD_MASK_HEADER, PLACE_DETAIL_FIELD_MASK)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Place detail request for {} failed with status: {}", place_id, status);
            return Err(PlacesError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let bytes = response.bytes().await?;
        parse_place_detail(place_id, &bytes)
    }
}

/// Parses a place detail body, rejecting error payloads and bodies missing
/// the fields normalization relies on.
pub fn parse_place_detail(place_id: &str, bytes: &[u8]) -> Result<PlaceDetail, PlacesError> {
    let context = format!("place detail {}", place_id);
    let value: Value = serde_json::from_slice(bytes)
        .map_err(|source| PlacesError::Deserialize { context: context.clone(), source })?;

    if let Some(error) = value.get("error") {
        let message = error
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| error.to_string());
        warn!("Place detail for {} returned an error payload: {}", place_id, message);
        return Err(PlacesError::Upstream { context, message });
    }

    let detail: PlaceDetail = serde_json::from_value(value)
        .map_err(|source| PlacesError::Deserialize { context, source })?;
    detail
        .validate()
        .map_err(|reason| PlacesError::InvalidPlaceDetail { reason })?;

    Ok(detail)
}

impl PlacesApi for GooglePlacesRepo {
    fn autocomplete<'a>(
        &'a self,
        input: &'a str,
        types: Option<&'a [String]>,
    ) -> BoxFuture<'a, Result<Vec<AutocompleteSuggestion>, PlacesError>> {
        self.fetch_autocomplete_suggestions(input, types).boxed()
    }

    fn place_detail<'a>(&'a self, place_id: &'a str) -> BoxFuture<'a, Result<PlaceDetail, PlacesError>> {
        self.fetch_place_detail(place_id).boxed()
    }
}
