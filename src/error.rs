use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlacesError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("places service returned an error for {context}: {message}")]
    Upstream { context: String, message: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid place id {place_id:?}")]
    InvalidPlaceId { place_id: String },

    #[error("invalid places base URL {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("invalid place detail: {reason}")]
    InvalidPlaceDetail { reason: String },
}
