//! Pure filter engine over an owner-scoped media collection.
//!
//! Filters combine as a strict AND conjunction in a fixed order: language,
//! media type, score (exact / lower bound / upper bound), completion-date
//! range. The whole spec is validated before any predicate runs, so a bad
//! value never yields a partially filtered set.

use chrono::NaiveDate;

use crate::error::CoreError;
use crate::media::{self, Language, MediaItem, MediaType};

/// Raw, per-request filter criteria as received from the query string.
///
/// Values stay as strings here; [`filter_media`] owns their validation so a
/// bad one is reported naming the offending field.
#[derive(Debug, Default, Clone)]
pub struct FilterSpec {
    pub language: Option<String>,
    pub media_type: Option<String>,
    pub score: Option<String>,
    pub score_min: Option<String>,
    pub score_max: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
}

impl FilterSpec {
    /// True when no recognized filter key carries a value.
    pub fn is_empty(&self) -> bool {
        self.language.is_none()
            && self.media_type.is_none()
            && self.score.is_none()
            && self.score_min.is_none()
            && self.score_max.is_none()
            && self.date_from.is_none()
            && self.date_to.is_none()
    }
}

/// Apply `spec` to `items`.
///
/// Returns `Ok(None)` when no filtering was requested at all -- a distinct
/// outcome from `Ok(Some(vec![]))`, which means filters ran and nothing
/// matched. Callers branch on this to decide whether to show the
/// unfiltered collection.
pub fn filter_media(
    items: &[MediaItem],
    spec: &FilterSpec,
) -> Result<Option<Vec<MediaItem>>, CoreError> {
    if spec.is_empty() {
        return Ok(None);
    }

    let criteria = Criteria::validate(spec)?;
    let results = items
        .iter()
        .filter(|item| criteria.matches(item))
        .cloned()
        .collect();
    Ok(Some(results))
}

/// An enum-valued filter. A value that names no known variant is not an
/// input error; it simply matches nothing.
enum EnumFilter<T> {
    Known(T),
    Unmatchable,
}

impl<T: PartialEq> EnumFilter<T> {
    fn accepts(&self, value: &T) -> bool {
        match self {
            Self::Known(wanted) => value == wanted,
            Self::Unmatchable => false,
        }
    }
}

/// The validated form of a [`FilterSpec`].
struct Criteria {
    language: Option<EnumFilter<Language>>,
    media_type: Option<EnumFilter<MediaType>>,
    score: Option<f64>,
    score_min: Option<f64>,
    score_max: Option<f64>,
    date_range: Option<(NaiveDate, NaiveDate)>,
}

impl Criteria {
    fn validate(spec: &FilterSpec) -> Result<Self, CoreError> {
        let language = spec.language.as_deref().map(parse_enum::<Language>);
        let media_type = spec.media_type.as_deref().map(parse_enum::<MediaType>);

        let score = parse_score(spec.score.as_deref(), "score")?;
        let score_min = parse_score(spec.score_min.as_deref(), "scoreG")?;
        let score_max = parse_score(spec.score_max.as_deref(), "scoreL")?;

        // The date range needs both bounds; a single bound is inert, not
        // partially applied.
        let date_range = match (spec.date_from.as_deref(), spec.date_to.as_deref()) {
            (Some(from), Some(to)) => {
                Some((parse_bound(from, "from")?, parse_bound(to, "to")?))
            }
            _ => None,
        };

        Ok(Self {
            language,
            media_type,
            score,
            score_min,
            score_max,
            date_range,
        })
    }

    fn matches(&self, item: &MediaItem) -> bool {
        if let Some(language) = &self.language {
            if !language.accepts(&item.language) {
                return false;
            }
        }
        if let Some(media_type) = &self.media_type {
            if !media_type.accepts(&item.media_type) {
                return false;
            }
        }
        if let Some(score) = self.score {
            if item.score != score {
                return false;
            }
        }
        if let Some(min) = self.score_min {
            if item.score < min {
                return false;
            }
        }
        if let Some(max) = self.score_max {
            if item.score > max {
                return false;
            }
        }
        if let Some((from, to)) = self.date_range {
            if item.completed_date < from || item.completed_date > to {
                return false;
            }
        }
        true
    }
}

fn parse_enum<T: std::str::FromStr>(raw: &str) -> EnumFilter<T> {
    match raw.parse() {
        Ok(value) => EnumFilter::Known(value),
        Err(_) => EnumFilter::Unmatchable,
    }
}

fn parse_score(raw: Option<&str>, field: &str) -> Result<Option<f64>, CoreError> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| invalid_filter(field))?;
    if !media::score_in_range(value) {
        return Err(invalid_filter(field));
    }
    Ok(Some(value))
}

fn parse_bound(raw: &str, field: &str) -> Result<NaiveDate, CoreError> {
    media::parse_date(raw).ok_or_else(|| invalid_filter(field))
}

fn invalid_filter(field: &str) -> CoreError {
    CoreError::Validation(format!("Invalid '{field}' filter value."))
}
