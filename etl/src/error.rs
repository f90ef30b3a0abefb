use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("YouTube API request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Invalid YouTube API URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

#[derive(Debug, Error, PartialEq)]
pub enum TransformError {
    #[error("Invalid publishedAt for video {video_id}: {value:?}")]
    InvalidPublishedAt {
        video_id: String,
        value: Option<String>,
    },
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Extract stage failed: {0}")]
    Extract(#[from] ExtractError),
    #[error("Transform stage failed: {0}")]
    Transform(#[from] TransformError),
    #[error("Load stage failed: {0}")]
    Load(#[from] LoadError),
}
