pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod utils;

pub use config::Config;
pub use error::{ExtractError, LoadError, PipelineError, TransformError};
pub use models::{LoadReport, RawVideo, VideoRecord, VideoTable};
pub use pipeline::run_pipeline;
