use crate::error::LoadError;
use crate::models::{LoadReport, VideoRecord, VideoTable};
use csv::{ReaderBuilder, WriterBuilder};
use log::info;
use std::fs::File;
use std::path::Path;

/// Writes the table as CSV, replacing whatever is at `path`.
///
/// The header row is always written, so an empty run still leaves a file with
/// the expected columns. Parent directories are not created.
pub fn load(table: &VideoTable, path: impl AsRef<Path>) -> Result<LoadReport, LoadError> {
    let path = path.as_ref();
    let file = File::create(path)?;

    let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
    writer.write_record(table.columns())?;
    for record in table {
        writer.serialize(record)?;
    }
    writer.flush()?;

    let report = LoadReport {
        path: path.display().to_string(),
        rows: table.len(),
        columns: table.columns().len(),
    };
    info!(
        "Data saved to {} ({} rows, {} columns)",
        report.path, report.rows, report.columns
    );

    Ok(report)
}

/// Header and rows of a previously written output file.
#[derive(Debug)]
pub struct LoadedFile {
    pub headers: Vec<String>,
    pub records: Vec<VideoRecord>,
}

pub fn read_back(path: impl AsRef<Path>) -> Result<LoadedFile, LoadError> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let headers = reader.headers()?.iter().map(String::from).collect();
    let records = reader
        .deserialize::<VideoRecord>()
        .collect::<Result<Vec<_>, _>>()?;

    Ok(LoadedFile { headers, records })
}
