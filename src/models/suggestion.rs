use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct TextMatch {
    #[serde(default)]
    pub start_offset: u32,
    #[serde(default)]
    pub end_offset: u32,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Default)]
pub struct FormattableText {
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub matches: Vec<TextMatch>,
}

#[skip_serializing_none]
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct StructuredFormat {
    pub main_text: FormattableText,
    pub secondary_text: Option<FormattableText>,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct PlacePrediction {
    #[serde(default)]
    pub place: String,
    pub place_id: String,
    #[serde(default)]
    pub text: FormattableText,
    pub structured_format: StructuredFormat,
    #[serde(default)]
    pub types: Vec<String>,
}

/// One autocomplete candidate.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct AutocompleteSuggestion {
    pub place_prediction: PlacePrediction,
}

impl AutocompleteSuggestion {
    pub fn place_id(&self) -> &str {
        &self.place_prediction.place_id
    }

    pub fn main_text(&self) -> &str {
        &self.place_prediction.structured_format.main_text.text
    }

    pub fn secondary_text(&self) -> Option<&str> {
        self.place_prediction
            .structured_format
            .secondary_text
            .as_ref()
            .map(|t| t.text.as_str())
    }

    /// Text placed in the input once this suggestion is picked.
    pub fn display_label(&self) -> String {
        display_label(self.main_text(), self.secondary_text())
    }
}

/// `"<main> <secondary>"`. A missing secondary text leaves the trailing space.
pub fn display_label(main_text: &str, secondary_text: Option<&str>) -> String {
    format!("{} {}", main_text, secondary_text.unwrap_or_default())
}

#[skip_serializing_none]
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AutocompleteRequest {
    pub input: String,
    pub included_primary_types: Option<Vec<String>>,
}

impl AutocompleteRequest {
    pub fn new(input: &str, types: Option<&[String]>) -> Self {
        Self {
            input: input.to_string(),
            included_primary_types: types.map(|t| t.to_vec()),
        }
    }
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Default)]
pub struct AutocompleteResponse {
    #[serde(default)]
    pub suggestions: Vec<AutocompleteSuggestion>,
}
