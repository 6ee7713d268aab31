use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::is_blank;

/// An article as returned by the remote API.
///
/// `id` is assigned remotely and never changes. `is_published` and
/// `is_deleted` are independent flags; deletion is a soft status, records are
/// never removed client-side. The single-article query does not return the
/// timestamps or counters, so those default when absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub markdown: String,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default)]
    pub is_deleted: bool,
    #[serde(default, with = "timestamp")]
    pub post_at: Option<DateTime<Utc>>,
    #[serde(default, with = "timestamp")]
    pub update_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub liked: u64,
}

/// The `AddOrUpdateArticleInput` payload.
///
/// Has no identifier field at all: the target id of an update travels as a
/// separate variable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleInput {
    pub title: String,
    pub tags: Vec<String>,
    pub markdown: String,
    pub is_published: bool,
    pub is_deleted: bool,
}

/// Editable article contents, with the identifier when editing an existing
/// record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleDraft {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub markdown: String,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default)]
    pub is_deleted: bool,
}

impl ArticleDraft {
    /// Splits the draft into its identifier and the mutation payload.
    pub fn into_parts(self) -> (Option<String>, ArticleInput) {
        let input = ArticleInput {
            title: self.title,
            tags: self.tags,
            markdown: self.markdown,
            is_published: self.is_published,
            is_deleted: self.is_deleted,
        };
        (self.id, input)
    }

    /// Title and markdown must both contain something other than whitespace.
    pub fn is_submittable(&self) -> bool {
        !is_blank(&self.title) && !is_blank(&self.markdown)
    }

    /// Appends tags that are not already present, keeping first-seen order.
    pub fn merge_tags<I>(&mut self, tags: I)
    where
        I: IntoIterator<Item = String>,
    {
        for tag in tags {
            if !self.tags.contains(&tag) {
                self.tags.push(tag);
            }
        }
    }

    pub fn remove_tag(&mut self, index: usize) -> Option<String> {
        (index < self.tags.len()).then(|| self.tags.remove(index))
    }
}

impl From<&ArticleRecord> for ArticleDraft {
    fn from(record: &ArticleRecord) -> Self {
        Self {
            id: Some(record.id.clone()),
            title: record.title.clone(),
            tags: record.tags.clone(),
            markdown: record.markdown.clone(),
            is_published: record.is_published,
            is_deleted: record.is_deleted,
        }
    }
}

/// Paginated envelope returned by `getArticlesByPage`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticlePage {
    pub docs: Vec<ArticleRecord>,
    pub total_docs: u64,
    pub has_next_page: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// Server confirmation of `updatePublishStatus`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishStatus {
    #[serde(rename = "_id")]
    pub id: String,
    pub is_published: bool,
}

/// Server confirmation of `updateDeleteStatus`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteStatus {
    #[serde(rename = "_id")]
    pub id: String,
    pub is_deleted: bool,
}

/// Lenient timestamp codec. The API has been seen to send RFC 3339 strings,
/// epoch milliseconds (as numbers or numeric strings) and empty strings.
mod timestamp {
    use chrono::{DateTime, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Millis(i64),
        Text(String),
    }

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(at) => serializer.serialize_some(&at.to_rfc3339()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<Raw>::deserialize(deserializer)? {
            None => Ok(None),
            Some(Raw::Millis(ms)) => from_millis(ms).map(Some),
            Some(Raw::Text(text)) => {
                let text = text.trim();
                if text.is_empty() {
                    return Ok(None);
                }
                if let Ok(ms) = text.parse::<i64>() {
                    return from_millis(ms).map(Some);
                }
                text.parse::<DateTime<Utc>>()
                    .map(Some)
                    .map_err(de::Error::custom)
            }
        }
    }

    fn from_millis<E: de::Error>(ms: i64) -> Result<DateTime<Utc>, E> {
        DateTime::from_timestamp_millis(ms)
            .ok_or_else(|| E::custom(format!("timestamp {ms} out of range")))
    }
}
