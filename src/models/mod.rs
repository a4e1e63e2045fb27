pub mod place;
pub mod studio_location;
pub mod suggestion;

pub use place::{AddressComponent, DisplayName, LatLng, PlaceDetail, Viewport};
pub use studio_location::{LocationText, StudioLocation};
pub use suggestion::{AutocompleteRequest, AutocompleteResponse, AutocompleteSuggestion};
