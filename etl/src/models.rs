use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// Documentation: https://developers.google.com/youtube/v3/docs/search/list
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchListResponse {
    #[serde(default)]
    pub items: Vec<SearchResult>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResult {
    pub id: SearchResultId,
    pub snippet: Option<SearchSnippet>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResultId {
    #[serde(rename = "videoId")]
    pub video_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchSnippet {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "publishedAt")]
    pub published_at: Option<String>,
}

// Documentation: https://developers.google.com/youtube/v3/docs/videos/list
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VideoListResponse {
    #[serde(default)]
    pub items: Vec<VideoItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VideoItem {
    pub id: String,
    pub statistics: Option<VideoStatistics>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VideoStatistics {
    #[serde(rename = "viewCount")]
    pub view_count: Option<String>,
}

/// A search hit merged with its statistics, before any cleaning.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawVideo {
    pub video_id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub published_at: Option<String>,
    pub view_count: Option<String>,
}

/// One cleaned output row. Only the transformer builds these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoRecord {
    video_id: String,
    title: String,
    description: String,
    published_at: DateTime<Utc>,
    view_count: u64,
    extracted_date: NaiveDate,
}

impl VideoRecord {
    pub(crate) fn new(
        video_id: String,
        title: String,
        description: String,
        published_at: DateTime<Utc>,
        view_count: u64,
        extracted_date: NaiveDate,
    ) -> Self {
        VideoRecord {
            video_id,
            title,
            description,
            published_at,
            view_count,
            extracted_date,
        }
    }

    pub fn video_id(&self) -> &str {
        &self.video_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn published_at(&self) -> DateTime<Utc> {
        self.published_at
    }

    pub fn view_count(&self) -> u64 {
        self.view_count
    }

    pub fn extracted_date(&self) -> NaiveDate {
        self.extracted_date
    }
}

/// Column order of the output file, matching the `VideoRecord` field order.
pub const COLUMNS: [&str; 6] = [
    "video_id",
    "title",
    "description",
    "published_at",
    "view_count",
    "extracted_date",
];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VideoTable {
    records: Vec<VideoRecord>,
}

impl VideoTable {
    pub(crate) fn new(records: Vec<VideoRecord>) -> Self {
        VideoTable { records }
    }

    pub fn columns(&self) -> &'static [&'static str] {
        &COLUMNS
    }

    pub fn records(&self) -> &[VideoRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, VideoRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a VideoTable {
    type Item = &'a VideoRecord;
    type IntoIter = std::slice::Iter<'a, VideoRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub path: String,
    pub rows: usize,
    pub columns: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn search_response_tolerates_non_video_hits_and_missing_fields() {
        let body = json!({
            "kind": "youtube#searchListResponse",
            "items": [
                {
                    "id": { "kind": "youtube#video", "videoId": "abc" },
                    "snippet": {
                        "title": "Intro",
                        "description": "",
                        "publishedAt": "2023-01-01T00:00:00Z"
                    }
                },
                { "id": { "kind": "youtube#channel", "channelId": "UC1" } }
            ]
        });

        let parsed: SearchListResponse = serde_json::from_value(body).unwrap();
        assert_eq!(parsed.items.len(), 2);
        assert_eq!(parsed.items[0].id.video_id.as_deref(), Some("abc"));
        assert_eq!(
            parsed.items[0].snippet.as_ref().unwrap().published_at.as_deref(),
            Some("2023-01-01T00:00:00Z")
        );
        assert!(parsed.items[1].id.video_id.is_none());
        assert!(parsed.items[1].snippet.is_none());
    }

    #[test]
    fn empty_responses_deserialize_to_no_items() {
        let search: SearchListResponse = serde_json::from_value(json!({})).unwrap();
        let videos: VideoListResponse = serde_json::from_value(json!({})).unwrap();
        assert!(search.items.is_empty());
        assert!(videos.items.is_empty());
    }

    #[test]
    fn statistics_view_count_is_optional() {
        let body = json!({
            "items": [
                { "id": "a", "statistics": { "viewCount": "150", "likeCount": "3" } },
                { "id": "b", "statistics": { "likeCount": "1" } },
                { "id": "c" }
            ]
        });

        let parsed: VideoListResponse = serde_json::from_value(body).unwrap();
        let counts: Vec<Option<&str>> = parsed
            .items
            .iter()
            .map(|item| item.statistics.as_ref().and_then(|s| s.view_count.as_deref()))
            .collect();
        assert_eq!(counts, vec![Some("150"), None, None]);
    }
}
