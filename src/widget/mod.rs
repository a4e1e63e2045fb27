//! Headless location input.
//!
//! [`LocationInput`] owns the typed text, the suggestion list, both error slots
//! and the current [`Selection`]. It performs no I/O: handlers that need a
//! remote lookup return a tagged request, and the host feeds the result back
//! through [`LocationInput::on_suggestions`] or [`LocationInput::on_place_detail`].
//! Only the most recently issued request of each kind is applied.

pub mod driver;

use tracing::{debug, info, warn};
use crate::error::PlacesError;
use crate::models::{AutocompleteSuggestion, PlaceDetail, StudioLocation};

pub const DEFAULT_PLACEHOLDER: &str = "Enter Address, City, or Zip Code";
pub const AUTOCOMPLETE_ERROR_MESSAGE: &str =
    "There was an error retrieving place suggestions. Please try again later.";
pub const PLACE_DETAIL_ERROR_MESSAGE: &str =
    "There was an error retrieving details about this location. Try again later or try a different location.";

#[derive(Clone, Debug, Default, PartialEq)]
pub struct LocationInputProps {
    /// Controlled value. When set the input is disabled and shows this location.
    pub value: Option<StudioLocation>,
    /// Primary place types passed through to autocomplete.
    pub types: Option<Vec<String>>,
    pub placeholder: Option<String>,
    pub label: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

#[derive(Clone, Debug, PartialEq)]
pub struct SuggestionRequest {
    pub id: RequestId,
    pub input: String,
    pub types: Option<Vec<String>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PlaceDetailRequest {
    pub id: RequestId,
    pub place_id: String,
}

#[derive(Debug)]
pub enum Selection {
    Empty,
    Pending(AutocompleteSuggestion),
    Resolved(StudioLocation),
    Failed {
        suggestion: AutocompleteSuggestion,
        error: PlacesError,
    },
}

impl Selection {
    pub fn kind(&self) -> SelectionKind {
        match self {
            Selection::Empty => SelectionKind::Empty,
            Selection::Pending(_) => SelectionKind::Pending,
            Selection::Resolved(_) => SelectionKind::Resolved,
            Selection::Failed { .. } => SelectionKind::Failed,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionKind {
    Empty,
    Pending,
    Resolved,
    Failed,
}

/// Render-ready view of the widget.
#[derive(Clone, Debug, PartialEq)]
pub struct LocationInputView {
    pub label: Option<String>,
    pub placeholder: String,
    pub text: String,
    pub disabled: bool,
    pub readonly: bool,
    pub clear_visible: bool,
    pub suggestions: Option<Vec<AutocompleteSuggestion>>,
    pub selection: SelectionKind,
    pub autocomplete_error: Option<&'static str>,
    pub place_detail_error: Option<&'static str>,
}

pub type OnSelect = Box<dyn FnMut(Option<StudioLocation>) + Send>;

pub struct LocationInput {
    props: LocationInputProps,
    on_select: OnSelect,
    text: String,
    suggestions: Option<Vec<AutocompleteSuggestion>>,
    selection: Selection,
    autocomplete_error: Option<PlacesError>,
    next_request: u64,
    latest_suggestion_request: Option<RequestId>,
    latest_detail_request: Option<RequestId>,
    // Set once a clear has asked the caller to drop its controlled value.
    value_cleared: bool,
}

impl LocationInput {
    pub fn new(
        props: LocationInputProps,
        on_select: impl FnMut(Option<StudioLocation>) + Send + 'static,
    ) -> Self {
        Self {
            props,
            on_select: Box::new(on_select),
            text: String::new(),
            suggestions: None,
            selection: Selection::Empty,
            autocomplete_error: None,
            next_request: 0,
            latest_suggestion_request: None,
            latest_detail_request: None,
            value_cleared: false,
        }
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn suggestions(&self) -> Option<&[AutocompleteSuggestion]> {
        self.suggestions.as_deref()
    }

    pub fn is_controlled(&self) -> bool {
        self.props.value.is_some()
    }

    /// Typing is blocked while a suggestion is selected.
    pub fn is_readonly(&self) -> bool {
        !matches!(self.selection, Selection::Empty)
    }

    /// Text shown in the input.
    pub fn display_text(&self) -> String {
        match &self.props.value {
            Some(value) => value.text.display_label(),
            None => self.text.clone(),
        }
    }

    pub fn autocomplete_error(&self) -> Option<&PlacesError> {
        self.autocomplete_error.as_ref()
    }

    pub fn place_detail_error(&self) -> Option<&PlacesError> {
        match &self.selection {
            Selection::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    pub fn snapshot(&self) -> LocationInputView {
        LocationInputView {
            label: self.props.label.clone(),
            placeholder: self
                .props
                .placeholder
                .clone()
                .unwrap_or_else(|| DEFAULT_PLACEHOLDER.to_string()),
            text: self.display_text(),
            disabled: self.is_controlled(),
            readonly: self.is_readonly(),
            clear_visible: self.is_controlled(),
            suggestions: self.suggestions.clone(),
            selection: self.selection.kind(),
            autocomplete_error: self.autocomplete_error.as_ref().map(|_| AUTOCOMPLETE_ERROR_MESSAGE),
            place_detail_error: self.place_detail_error().map(|_| PLACE_DETAIL_ERROR_MESSAGE),
        }
    }

    /// Replaces the caller-supplied props, e.g. after the caller stored the
    /// location it was handed.
    pub fn set_props(&mut self, props: LocationInputProps) {
        if props.value != self.props.value {
            self.value_cleared = false;
        }
        self.props = props;
    }

    pub fn set_value(&mut self, value: Option<StudioLocation>) {
        let props = LocationInputProps {
            value,
            ..self.props.clone()
        };
        self.set_props(props);
    }

    fn issue_request_id(&mut self) -> RequestId {
        self.next_request += 1;
        RequestId(self.next_request)
    }

    fn suggestion_request(&mut self) -> SuggestionRequest {
        let id = self.issue_request_id();
        self.latest_suggestion_request = Some(id);
        SuggestionRequest {
            id,
            input: self.text.clone(),
            types: self.props.types.clone(),
        }
    }

    /// Text change from the user. Non-empty text yields a suggestion request.
    pub fn on_change(&mut self, text: &str) -> Option<SuggestionRequest> {
        if self.is_controlled() || self.is_readonly() {
            debug!("Ignoring text change while the input is locked");
            return None;
        }

        self.text = text.to_string();
        if self.text.is_empty() {
            self.suggestions = None;
            self.latest_suggestion_request = None;
            return None;
        }

        Some(self.suggestion_request())
    }

    /// Refocus reopens suggestions for the existing text when none are held.
    pub fn on_focus(&mut self) -> Option<SuggestionRequest> {
        if self.is_controlled() || self.is_readonly() {
            return None;
        }
        if self.text.is_empty() || self.suggestions.is_some() {
            return None;
        }

        Some(self.suggestion_request())
    }

    pub fn on_suggestions(
        &mut self,
        request: RequestId,
        result: Result<Vec<AutocompleteSuggestion>, PlacesError>,
    ) {
        if self.latest_suggestion_request != Some(request) {
            debug!("Discarding stale suggestion response {:?}", request);
            return;
        }
        self.latest_suggestion_request = None;

        match result {
            Ok(suggestions) => {
                self.autocomplete_error = None;
                self.suggestions = Some(suggestions);
            }
            Err(e) => {
                warn!("Failed to retrieve place suggestions for {:?} due to: {}", self.text, e);
                self.suggestions = None;
                self.autocomplete_error = Some(e);
            }
        }
    }

    /// Selects the suggestion at `index` in the held list.
    pub fn select(&mut self, index: usize) -> Option<PlaceDetailRequest> {
        let suggestion = self.suggestions.as_ref()?.get(index)?.clone();
        self.select_suggestion(suggestion)
    }

    pub fn select_suggestion(&mut self, suggestion: AutocompleteSuggestion) -> Option<PlaceDetailRequest> {
        if self.is_controlled() {
            debug!("Ignoring selection while the input is controlled");
            return None;
        }

        self.suggestions = None;
        self.latest_suggestion_request = None;
        self.text = suggestion.display_label();

        let id = self.issue_request_id();
        self.latest_detail_request = Some(id);
        let place_id = suggestion.place_id().to_string();
        info!("Resolving place {} for {:?}", place_id, self.text);
        self.selection = Selection::Pending(suggestion);

        Some(PlaceDetailRequest { id, place_id })
    }

    pub fn on_place_detail(
        &mut self,
        request: RequestId,
        result: Result<PlaceDetail, PlacesError>,
    ) {
        if self.latest_detail_request != Some(request) {
            debug!("Discarding stale place detail response {:?}", request);
            return;
        }
        self.latest_detail_request = None;

        let suggestion = match std::mem::replace(&mut self.selection, Selection::Empty) {
            Selection::Pending(suggestion) => suggestion,
            other => {
                self.selection = other;
                return;
            }
        };

        let detail = result.and_then(|detail| {
            detail
                .validate()
                .map(|_| detail)
                .map_err(|reason| PlacesError::InvalidPlaceDetail { reason })
        });

        match detail {
            Ok(detail) => {
                let location = StudioLocation::from_place_detail(&suggestion, detail);
                self.selection = Selection::Resolved(location.clone());
                (self.on_select)(Some(location));
            }
            Err(error) => {
                warn!(
                    "Failed to retrieve details for place {} due to: {}",
                    suggestion.place_id(),
                    error
                );
                self.selection = Selection::Failed { suggestion, error };
            }
        }
    }

    fn is_empty(&self) -> bool {
        self.text.is_empty()
            && self.suggestions.is_none()
            && matches!(self.selection, Selection::Empty)
            && self.autocomplete_error.is_none()
            && self.latest_suggestion_request.is_none()
            && (self.props.value.is_none() || self.value_cleared)
    }

    /// Resets text, suggestions, errors and selection, then reports `None` to
    /// the caller. A no-op when already empty.
    pub fn clear(&mut self) {
        if self.is_empty() {
            return;
        }

        self.text.clear();
        self.suggestions = None;
        self.autocomplete_error = None;
        self.selection = Selection::Empty;
        self.latest_suggestion_request = None;
        self.latest_detail_request = None;
        if self.props.value.is_some() {
            self.value_cleared = true;
        }
        (self.on_select)(None);
    }

    /// Hides the suggestion list. Text and selection are untouched.
    pub fn dismiss_suggestions(&mut self) {
        self.suggestions = None;
        self.latest_suggestion_request = None;
    }
}
