pub mod extractor;
pub mod loader;
pub mod transformer;

pub use extractor::{extract, merge_statistics, VideoApi, YouTubeClient};
pub use loader::{load, read_back, LoadedFile};
pub use transformer::transform;
