//! Location input for the portfolio site: turns free-form address text into a
//! normalized [`StudioLocation`](models::StudioLocation) via the places
//! autocomplete and place details services.

pub mod config;
pub mod controller;
pub mod error;
pub mod helpers;
pub mod models;
pub mod repositories;
pub mod widget;

pub use error::PlacesError;
pub use models::StudioLocation;
