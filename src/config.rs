use clap::Parser;
use crate::repositories::google_places::DEFAULT_BASE_URL;

#[derive(Parser, Clone, Debug)]
pub struct Config {
    #[clap(env, long, default_value = "development")]
    pub environment: String,

    /// Key sent to the places service as `X-Goog-Api-Key`.
    #[clap(env, long, hide_env_values = true)]
    pub google_maps_api_key: String,

    #[clap(env, long, default_value = DEFAULT_BASE_URL)]
    pub places_base_url: String,

    /// Comma separated list of origins allowed by CORS.
    #[clap(env, long, default_value = "http://localhost:3000")]
    pub origin_urls: String,

    #[clap(env, long, default_value_t = 3000)]
    pub port: u16,

    #[clap(env, long, default_value_t = 10)]
    pub request_timeout_secs: u64,

    #[clap(env, long, default_value_t = 64)]
    pub max_concurrent_requests: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_only_key_is_given() {
        let config = Config::try_parse_from(["studio-location", "--google-maps-api-key", "test-key"]).unwrap();

        assert_eq!(config.google_maps_api_key, "test-key");
        assert_eq!(config.places_base_url, DEFAULT_BASE_URL);
        assert_eq!(config.port, 3000);
        assert_eq!(config.request_timeout_secs, 10);
        assert_eq!(config.max_concurrent_requests, 64);
    }

    #[test]
    fn api_key_is_required() {
        std::env::remove_var("GOOGLE_MAPS_API_KEY");
        assert!(Config::try_parse_from(["studio-location"]).is_err());
    }
}
