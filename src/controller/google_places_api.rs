use std::sync::Arc;
use axum::{Extension, Json, Router};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, warn};
use crate::controller::AppState;
use crate::error::PlacesError;
use crate::models::{AutocompleteSuggestion, StudioLocation};
use crate::repositories::google_places::PlacesApi;
use crate::widget::{AUTOCOMPLETE_ERROR_MESSAGE, PLACE_DETAIL_ERROR_MESSAGE};

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/autocomplete", post(proxy_autocomplete))
        .route("/resolve", post(resolve_suggestion))
        .route_layer(Extension(app_state.places))
}

#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct AutocompleteParams {
    pub input: String,
    #[serde(default)]
    pub types: Option<Vec<String>>,
}

pub async fn proxy_autocomplete(
    Extension(places): Extension<Arc<dyn PlacesApi>>,
    Json(body): Json<AutocompleteParams>,
) -> impl IntoResponse {
    if body.input.is_empty() {
        return (StatusCode::OK, Json(json!({ "suggestions": [] }))).into_response();
    }

    let suggestions_res = places
        .autocomplete(
            &body.input,
            body.types.as_deref(),
        ).await;

    return match suggestions_res {
        Ok(suggestions) => {
            (StatusCode::OK, Json(json!({ "suggestions": suggestions }))).into_response()
        }
        Err(e) => {
            warn!("Something went wrong retrieving place suggestions due to: {}", e);
            (StatusCode::BAD_GATEWAY, AUTOCOMPLETE_ERROR_MESSAGE).into_response()
        }
    };
}

pub async fn resolve_suggestion(
    Extension(places): Extension<Arc<dyn PlacesApi>>,
    Json(suggestion): Json<AutocompleteSuggestion>,
) -> impl IntoResponse {
    let place_detail_res = places
        .place_detail(
            suggestion.place_id()
        ).await;

    return match place_detail_res {
        Ok(detail) => {
            let location = StudioLocation::from_place_detail(&suggestion, detail);
            info!("Resolved place {} to {}", location.google_id, location.formatted_address);
            (StatusCode::OK, Json(location)).into_response()
        }
        Err(e @ PlacesError::InvalidPlaceId { .. }) => {
            warn!("Rejected resolve request due to: {}", e);
            (StatusCode::BAD_REQUEST, PLACE_DETAIL_ERROR_MESSAGE).into_response()
        }
        Err(e) => {
            warn!("Something went wrong resolving place {} due to: {}", suggestion.place_id(), e);
            (StatusCode::BAD_GATEWAY, PLACE_DETAIL_ERROR_MESSAGE).into_response()
        }
    };
}
