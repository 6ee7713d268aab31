use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{is_blank, parse_tags};
use crate::errors::{DomainError, Result};

/// Inclusive `[from, to]` date range, sent as two `YYYY-MM-DD` strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange(pub NaiveDate, pub NaiveDate);

/// Sparse `where` object for `getArticlesByPage`. Only keys that are present
/// constrain the query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_published: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_deleted: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_at: Option<DateRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_at: Option<DateRange>,
}

/// Raw search-form values as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchForm {
    pub title: Option<String>,
    /// `;`-separated tag list.
    pub tags: Option<String>,
    /// `"true"`, `"false"` or anything else meaning "all".
    pub is_published: Option<String>,
    pub is_deleted: Option<String>,
    /// Date or date-time strings; only the leading `YYYY-MM-DD` is kept.
    pub post_at: Option<(String, String)>,
    pub update_at: Option<(String, String)>,
}

impl ArticleFilter {
    /// Normalises raw search input into a sparse filter.
    ///
    /// Blank fields and unrecognised status values are dropped rather than
    /// rejected; only a date that cannot be read is an error.
    pub fn from_search_form(form: SearchForm) -> Result<Self> {
        let tags = form
            .tags
            .as_deref()
            .map(parse_tags)
            .filter(|tags| !tags.is_empty());

        Ok(Self {
            title: form.title.filter(|title| !is_blank(title)),
            tags,
            is_published: form.is_published.as_deref().and_then(parse_status),
            is_deleted: form.is_deleted.as_deref().and_then(parse_status),
            post_at: form.post_at.map(|(from, to)| date_range(&from, &to)).transpose()?,
            update_at: form.update_at.map(|(from, to)| date_range(&from, &to)).transpose()?,
        })
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

fn parse_status(raw: &str) -> Option<bool> {
    match raw.trim() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

fn date_range(from: &str, to: &str) -> Result<DateRange> {
    Ok(DateRange(date_prefix(from)?, date_prefix(to)?))
}

fn date_prefix(raw: &str) -> Result<NaiveDate> {
    let raw = raw.trim();
    let prefix = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(prefix, "%Y-%m-%d")
        .map_err(|e| DomainError::Validation(format!("invalid date '{raw}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn blank_form_yields_empty_where() {
        let filter = ArticleFilter::from_search_form(SearchForm {
            title: Some("   ".into()),
            tags: Some(" ; ".into()),
            is_published: Some("all".into()),
            ..Default::default()
        })
        .unwrap();

        assert!(filter.is_empty());
        assert_eq!(serde_json::to_value(&filter).unwrap(), json!({}));
    }

    #[test]
    fn populated_form_is_normalised() {
        let filter = ArticleFilter::from_search_form(SearchForm {
            title: Some("rust".into()),
            tags: Some("a;b;".into()),
            is_published: Some("true".into()),
            is_deleted: Some("false".into()),
            post_at: Some(("2020-01-01 00:00:00".into(), "2020-02-01T12:00:00Z".into())),
            update_at: None,
        })
        .unwrap();

        assert_eq!(
            serde_json::to_value(&filter).unwrap(),
            json!({
                "title": "rust",
                "tags": ["a", "b"],
                "isPublished": true,
                "isDeleted": false,
                "postAt": ["2020-01-01", "2020-02-01"]
            })
        );
    }

    #[test]
    fn unreadable_date_is_rejected() {
        let err = ArticleFilter::from_search_form(SearchForm {
            update_at: Some(("yesterday".into(), "2020-01-01".into())),
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}
