use std::sync::Arc;
use anyhow::Context;
use clap::Parser;
use dotenv::dotenv;
use tracing::info;
use studio_location::config::Config;
use studio_location::controller::{self, AppState};
use studio_location::repositories::google_places::GooglePlacesRepo;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = Config::parse();
    info!("Starting studio location service in {} mode", config.environment);

    let places = GooglePlacesRepo::new(
        &config.places_base_url,
        &config.google_maps_api_key,
        config.request_timeout_secs,
    ).context("Failed to build the places client")?;

    let app_state = AppState {
        places: Arc::new(places),
    };

    controller::serve(app_state, &config).await
}
