use crate::config::Config;
use crate::error::PipelineError;
use crate::models::LoadReport;
use crate::services::{extract, load, transform, VideoApi};
use chrono::NaiveDate;
use log::info;

/// Runs extract, transform and load in order. The first failing stage aborts
/// the run and nothing is written.
pub async fn run_pipeline<A>(
    api: &A,
    config: &Config,
    extracted_date: NaiveDate,
) -> Result<LoadReport, PipelineError>
where
    A: VideoApi + ?Sized,
{
    info!("Extracting data...");
    let raw = extract(api, &config.query, config.max_results).await?;

    info!("Transforming data...");
    let table = transform(raw, extracted_date)?;

    info!("Loading data...");
    let report = load(&table, &config.output_path)?;

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ExtractError, LoadError, TransformError};
    use crate::services::extractor::tests::{search_hit, stats, FakeApi};
    use crate::services::read_back;
    use tempfile::tempdir;

    fn run_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 17).unwrap()
    }

    #[tokio::test]
    async fn writes_cleaned_rows_end_to_end() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("videos.csv");
        let config = Config::new("key", "rust", output.to_string_lossy());
        let api = FakeApi::new(
            vec![
                search_hit("a", Some(" Intro "), "2023-01-01T00:00:00Z"),
                search_hit("b", None, "2023-01-02T00:00:00Z"),
                search_hit("c", Some("Third"), "2023-01-03T00:00:00Z"),
            ],
            // "c" is missing from the statistics response.
            vec![stats("b", None), stats("a", Some("150"))],
        );

        let report = run_pipeline(&api, &config, run_date()).await.unwrap();
        let loaded = read_back(&output).unwrap();

        assert_eq!(report.rows, 2);
        assert_eq!(loaded.records.len(), 2);
        assert_eq!(loaded.records[0].video_id(), "a");
        assert_eq!(loaded.records[0].title(), "Intro");
        assert_eq!(loaded.records[0].view_count(), 150);
        assert_eq!(loaded.records[1].video_id(), "c");
        assert_eq!(loaded.records[1].view_count(), 0);
        assert!(loaded.records.iter().all(|r| r.extracted_date() == run_date()));
    }

    #[tokio::test]
    async fn extract_failure_aborts_before_writing() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("videos.csv");
        let config = Config::new("key", "rust", output.to_string_lossy());

        let err = run_pipeline(&FakeApi::failing(), &config, run_date())
            .await
            .unwrap_err();

        assert!(matches!(err, PipelineError::Extract(ExtractError::InvalidUrl(_))));
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn transform_failure_aborts_before_writing() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("videos.csv");
        let config = Config::new("key", "rust", output.to_string_lossy());
        let api = FakeApi::new(
            vec![search_hit("a", Some("A"), "not a date")],
            vec![stats("a", Some("1"))],
        );

        let err = run_pipeline(&api, &config, run_date()).await.unwrap_err();

        assert!(matches!(
            err,
            PipelineError::Transform(TransformError::InvalidPublishedAt { .. })
        ));
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn load_failure_is_reported() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("missing").join("videos.csv");
        let config = Config::new("key", "rust", output.to_string_lossy());
        let api = FakeApi::new(
            vec![search_hit("a", Some("A"), "2023-01-01T00:00:00Z")],
            vec![stats("a", Some("1"))],
        );

        let err = run_pipeline(&api, &config, run_date()).await.unwrap_err();

        assert!(matches!(err, PipelineError::Load(LoadError::Io(_))));
    }

    #[tokio::test]
    async fn empty_search_writes_header_only() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("videos.csv");
        let config = Config::new("key", "nothing", output.to_string_lossy());
        let api = FakeApi::new(Vec::new(), Vec::new());

        let report = run_pipeline(&api, &config, run_date()).await.unwrap();
        let loaded = read_back(&output).unwrap();

        assert_eq!(report.rows, 0);
        assert_eq!(loaded.headers.len(), 6);
        assert!(api.statistics_calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn config_limits_search_size() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("videos.csv");
        let config = Config::new("key", "rust", output.to_string_lossy()).with_max_results(1);
        let api = FakeApi::new(
            vec![
                search_hit("a", Some("A"), "2023-01-01T00:00:00Z"),
                search_hit("b", Some("B"), "2023-01-01T00:00:00Z"),
            ],
            vec![stats("a", Some("1")), stats("b", Some("2"))],
        );

        let report = run_pipeline(&api, &config, run_date()).await.unwrap();

        assert_eq!(report.rows, 1);
    }
}
