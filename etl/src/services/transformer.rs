use crate::error::TransformError;
use crate::models::{RawVideo, VideoRecord, VideoTable};
use crate::utils::{parse_iso8601, parse_view_count};
use chrono::NaiveDate;
use log::info;
use std::collections::HashSet;

/// Cleans the merged records into the output table.
///
/// Rows without a title are dropped, duplicate video ids keep their first
/// occurrence, and every surviving row is stamped with `extracted_date`.
/// A missing or malformed `published_at` fails the whole stage.
pub fn transform(
    raw: Vec<RawVideo>,
    extracted_date: NaiveDate,
) -> Result<VideoTable, TransformError> {
    let input_len = raw.len();
    let mut seen = HashSet::new();
    let mut records = Vec::with_capacity(input_len);

    for video in raw {
        let Some(title) = video.title else {
            continue;
        };
        if !seen.insert(video.video_id.clone()) {
            continue;
        }

        let published_at = video
            .published_at
            .as_deref()
            .and_then(parse_iso8601)
            .ok_or_else(|| TransformError::InvalidPublishedAt {
                video_id: video.video_id.clone(),
                value: video.published_at.clone(),
            })?;

        records.push(VideoRecord::new(
            video.video_id,
            title.trim().to_string(),
            video.description.unwrap_or_default(),
            published_at,
            parse_view_count(video.view_count.as_deref()),
            extracted_date,
        ));
    }

    info!(
        "Transformed {} records, dropped {}",
        records.len(),
        input_len - records.len()
    );

    Ok(VideoTable::new(records))
}
