//! Shared query parameter types for API handlers.

use serde::Deserialize;

use mediavault_core::filter::FilterSpec;

/// Query parameters accepted by `GET /media`.
///
/// Filter values arrive as raw strings; the filter engine owns their
/// validation so a bad one becomes a 400 naming the field.
#[derive(Debug, Default, Deserialize)]
pub struct MediaListParams {
    pub page: Option<i64>,
    pub language: Option<String>,
    #[serde(rename = "mediaType")]
    pub media_type: Option<String>,
    pub score: Option<String>,
    /// Lower score bound, inclusive.
    #[serde(rename = "scoreG")]
    pub score_min: Option<String>,
    /// Upper score bound, inclusive.
    #[serde(rename = "scoreL")]
    pub score_max: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
}

impl MediaListParams {
    pub fn filter_spec(&self) -> FilterSpec {
        FilterSpec {
            language: self.language.clone(),
            media_type: self.media_type.clone(),
            score: self.score.clone(),
            score_min: self.score_min.clone(),
            score_max: self.score_max.clone(),
            date_from: self.from.clone(),
            date_to: self.to.clone(),
        }
    }
}

/// Query parameters for `POST /media/addMedia`; `?many=true` switches the
/// expected body to an array of items.
#[derive(Debug, Default, Deserialize)]
pub struct AddMediaParams {
    #[serde(default)]
    pub many: bool,
}
