use crate::config::Config;
use crate::error::ExtractError;
use crate::models::{RawVideo, SearchListResponse, VideoListResponse};
use crate::utils::join_video_ids;
use async_trait::async_trait;
use log::{info, warn};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use url::Url;

/// The two remote lookups the extract stage needs.
#[async_trait]
pub trait VideoApi {
    async fn search_videos(
        &self,
        query: &str,
        max_results: u32,
    ) -> Result<SearchListResponse, ExtractError>;

    async fn video_statistics(
        &self,
        video_ids: &[String],
    ) -> Result<VideoListResponse, ExtractError>;
}

pub struct YouTubeClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl YouTubeClient {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        YouTubeClient {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: base_url.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.api_key.clone(), config.api_base_url.clone())
    }

    fn endpoint(&self, resource: &str, params: &[(&str, &str)]) -> Result<Url, ExtractError> {
        let base = format!("{}/{}", self.base_url.trim_end_matches('/'), resource);
        let mut url = Url::parse_with_params(&base, params)?;
        url.query_pairs_mut().append_pair("key", &self.api_key);
        Ok(url)
    }

    pub(crate) fn search_url(&self, query: &str, max_results: u32) -> Result<Url, ExtractError> {
        let max_results = max_results.to_string();
        self.endpoint(
            "search",
            &[
                ("part", "snippet"),
                ("q", query),
                ("type", "video"),
                ("maxResults", &max_results),
            ],
        )
    }

    pub(crate) fn statistics_url(&self, video_ids: &[String]) -> Result<Url, ExtractError> {
        let ids = join_video_ids(video_ids);
        self.endpoint("videos", &[("part", "statistics"), ("id", &ids)])
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ExtractError> {
        let response = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json::<T>()
            .await?;
        Ok(response)
    }
}

#[async_trait]
impl VideoApi for YouTubeClient {
    async fn search_videos(
        &self,
        query: &str,
        max_results: u32,
    ) -> Result<SearchListResponse, ExtractError> {
        let url = self.search_url(query, max_results)?;
        self.get_json(url).await
    }

    async fn video_statistics(
        &self,
        video_ids: &[String],
    ) -> Result<VideoListResponse, ExtractError> {
        let url = self.statistics_url(video_ids)?;
        self.get_json(url).await
    }
}

pub async fn extract<A>(
    api: &A,
    query: &str,
    max_results: u32,
) -> Result<Vec<RawVideo>, ExtractError>
where
    A: VideoApi + ?Sized,
{
    let search = api.search_videos(query, max_results).await?;
    info!("Search for {query:?} returned {} items", search.items.len());

    let video_ids: Vec<String> = search
        .items
        .iter()
        .filter_map(|item| item.id.video_id.clone())
        .collect();

    if video_ids.is_empty() {
        info!("No videos found, skipping statistics lookup");
        return Ok(Vec::new());
    }

    let statistics = api.video_statistics(&video_ids).await?;
    info!(
        "Fetched statistics for {} of {} videos",
        statistics.items.len(),
        video_ids.len()
    );

    Ok(merge_statistics(search, statistics))
}

/// Joins search hits with statistics by video id. Hits without a statistics
/// entry keep `view_count: None`.
pub fn merge_statistics(
    search: SearchListResponse,
    statistics: VideoListResponse,
) -> Vec<RawVideo> {
    let view_counts: HashMap<String, Option<String>> = statistics
        .items
        .into_iter()
        .map(|item| (item.id, item.statistics.and_then(|s| s.view_count)))
        .collect();

    let mut unmatched = 0;
    let records: Vec<RawVideo> = search
        .items
        .into_iter()
        .filter_map(|item| {
            let video_id = item.id.video_id?;
            let snippet = item.snippet.unwrap_or_default();
            let view_count = match view_counts.get(&video_id) {
                Some(count) => count.clone(),
                None => {
                    unmatched += 1;
                    None
                }
            };
            Some(RawVideo {
                video_id,
                title: snippet.title,
                description: snippet.description,
                published_at: snippet.published_at,
                view_count,
            })
        })
        .collect();

    if unmatched > 0 {
        warn!("{unmatched} videos had no statistics entry, view count set to 0");
    }

    records
}
