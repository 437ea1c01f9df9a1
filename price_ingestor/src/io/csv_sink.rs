//! CSV file sink.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use snafu::ResultExt;

use super::{EncodeSnafu, IoSnafu, RecordTable, SinkError, TableSink};

/// Writes tables as CSV files under a single output directory.
///
/// The directory is created on first write. Existing files with the same
/// name are overwritten; a re-run replaces the previous export.
#[derive(Debug, Clone)]
pub struct CsvSink {
    out_dir: PathBuf,
}

impl CsvSink {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self { out_dir: out_dir.into() }
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }
}

#[async_trait]
impl TableSink for CsvSink {
    type Output = PathBuf;

    async fn write_table(&self, name: &str, table: &RecordTable) -> Result<PathBuf, SinkError> {
        std::fs::create_dir_all(&self.out_dir).context(IoSnafu {
            path: self.out_dir.display().to_string(),
        })?;
        let path = self.out_dir.join(name);
        let display = path.display().to_string();

        let mut writer = csv::Writer::from_path(&path)
            .context(EncodeSnafu { path: display.clone() })?;
        writer
            .write_record(&table.columns)
            .context(EncodeSnafu { path: display.clone() })?;
        for row in &table.rows {
            writer
                .write_record(row)
                .context(EncodeSnafu { path: display.clone() })?;
        }
        writer.flush().context(IoSnafu { path: display })?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> RecordTable {
        let mut table = RecordTable::new(&["date", "country", "price"]);
        table.push_row(vec!["2023-06-01".into(), "NL".into(), "87.5".into()]);
        table.push_row(vec!["2023-06-02".into(), "NL".into(), "-3.25".into()]);
        table
    }

    #[tokio::test]
    async fn writes_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let sink = CsvSink::new(dir.path());
        let path = sink.write_table("nl_test.csv", &sample_table()).await.unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(lines.next(), Some("date,country,price"));
        assert_eq!(lines.next(), Some("2023-06-01,NL,87.5"));
        assert_eq!(lines.next(), Some("2023-06-02,NL,-3.25"));
        assert_eq!(lines.next(), None);
    }

    #[tokio::test]
    async fn creates_missing_output_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("exports").join("2023");
        let sink = CsvSink::new(&nested);
        let path = sink.write_table("out.csv", &sample_table()).await.unwrap();
        assert!(path.exists());
        assert_eq!(path.parent(), Some(nested.as_path()));
    }

    #[tokio::test]
    async fn rewrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let sink = CsvSink::new(dir.path());
        sink.write_table("out.csv", &sample_table()).await.unwrap();

        let mut smaller = RecordTable::new(&["date"]);
        smaller.push_row(vec!["2024-01-01".into()]);
        let path = sink.write_table("out.csv", &smaller).await.unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 2);
    }
}
