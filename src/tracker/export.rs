use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use tokio::{fs::OpenOptions, io::AsyncWriteExt};
use tracing::{debug, info};

use crate::utils::time::export_timestamp;

use super::records::{single_line, SessionRecord};

/// Gives up looking for a free file name after this many attempts.
const MAX_NAME_ATTEMPTS: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// There were no records, nothing was written.
    NothingToExport,
    Exported { path: PathBuf, records: usize },
}

pub fn export_file_name(moment: DateTime<Local>, attempt: usize) -> String {
    let timestamp = export_timestamp(moment);
    if attempt == 0 {
        format!("records_{timestamp}.csv")
    } else {
        format!("records_{timestamp}_{attempt}.csv")
    }
}

/// Serializes records as CSV with a header row. Columns are
/// `project,start_time,end_time,duration,notes`.
pub fn records_to_csv(records: &[SessionRecord]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(vec![]);
    if records.is_empty() {
        // Serializing a struct writes the header lazily, so an empty list would get none.
        writer.write_record(["project", "start_time", "end_time", "duration", "notes"])?;
    }
    for record in records {
        writer.serialize(record.row())?;
    }
    writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush csv data: {}", e.error()))
}

/// Writes records into a new timestamped file inside `dir`. Existing files are never
/// overwritten, a numeric suffix is added instead.
pub async fn export_records(
    records: &[SessionRecord],
    dir: &Path,
    moment: DateTime<Local>,
) -> Result<ExportOutcome> {
    if records.is_empty() {
        debug!("Export requested without records");
        return Ok(ExportOutcome::NothingToExport);
    }

    let data = records_to_csv(records)?;
    tokio::fs::create_dir_all(dir)
        .await
        .with_context(|| format!("Failed to create export directory {dir:?}"))?;

    for attempt in 0..MAX_NAME_ATTEMPTS {
        let path = dir.join(export_file_name(moment, attempt));
        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await;
        let mut file = match file {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
            Err(e) => return Err(e).with_context(|| format!("Failed to create {path:?}")),
        };
        file.write_all(&data)
            .await
            .with_context(|| format!("Failed to write {path:?}"))?;
        file.flush().await?;

        info!("Exported {} records into {path:?}", records.len());
        return Ok(ExportOutcome::Exported {
            path,
            records: records.len(),
        });
    }

    anyhow::bail!("Couldn't find a free export file name in {dir:?}")
}

/// Tab separated rows without a header, one line per record.
pub fn clipboard_text<'a>(records: impl IntoIterator<Item = &'a SessionRecord>) -> String {
    records
        .into_iter()
        .map(|record| {
            let row = record.row();
            [
                single_line(row.project),
                row.start_time,
                row.end_time,
                row.duration,
                single_line(row.notes),
            ]
            .join("\t")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use chrono::{Local, TimeZone};
    use tempfile::tempdir;

    use crate::{tracker::records::tests::record, utils::logging::TEST_LOGGING};

    use super::{clipboard_text, export_file_name, export_records, records_to_csv, ExportOutcome};

    #[tokio::test]
    async fn empty_export_writes_nothing() -> Result<()> {
        *TEST_LOGGING;
        let dir = tempdir()?;
        let moment = Local.with_ymd_and_hms(2024, 3, 15, 18, 30, 0).unwrap();

        let outcome = export_records(&[], dir.path(), moment).await?;

        assert_eq!(outcome, ExportOutcome::NothingToExport);
        assert_eq!(std::fs::read_dir(dir.path())?.count(), 0);
        Ok(())
    }

    #[tokio::test]
    async fn export_writes_header_and_rows() -> Result<()> {
        *TEST_LOGGING;
        let dir = tempdir()?;
        let moment = Local.with_ymd_and_hms(2024, 3, 15, 18, 30, 0).unwrap();
        let records = vec![
            record("Alpha", 0, 65, "first"),
            record("Beta", 100, 3600, "second"),
            record("Alpha", 4000, 5, ""),
        ];

        let outcome = export_records(&records, dir.path(), moment).await?;

        let expected_path = dir.path().join("records_20240315_183000.csv");
        assert_eq!(
            outcome,
            ExportOutcome::Exported {
                path: expected_path.clone(),
                records: 3
            }
        );
        let content = std::fs::read_to_string(expected_path)?;
        let lines = content.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "project,start_time,end_time,duration,notes");
        assert_eq!(lines[1], "Alpha,09:00:00,09:01:05,00:01:05,first");
        assert_eq!(lines[2], "Beta,09:01:40,10:01:40,01:00:00,second");
        assert_eq!(lines[3], "Alpha,10:06:40,10:06:45,00:00:05,");
        Ok(())
    }

    #[tokio::test]
    async fn repeated_exports_do_not_overwrite() -> Result<()> {
        let dir = tempdir()?;
        let moment = Local.with_ymd_and_hms(2024, 3, 15, 18, 30, 0).unwrap();
        let records = vec![record("Alpha", 0, 10, "")];

        export_records(&records, dir.path(), moment).await?;
        let second = export_records(&records, dir.path(), moment).await?;

        assert_eq!(
            second,
            ExportOutcome::Exported {
                path: dir.path().join(export_file_name(moment, 1)),
                records: 1
            }
        );
        assert_eq!(std::fs::read_dir(dir.path())?.count(), 2);
        Ok(())
    }

    #[test]
    fn csv_quotes_special_characters() -> Result<()> {
        let records = vec![record("Alpha, Inc", 0, 10, "said \"hi\"\nthen left")];

        let data = String::from_utf8(records_to_csv(&records)?)?;

        let mut reader = csv::Reader::from_reader(data.as_bytes());
        let rows = reader
            .records()
            .collect::<Result<Vec<_>, _>>()?;
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], "Alpha, Inc");
        assert_eq!(&rows[0][4], "said \"hi\"\nthen left");
        Ok(())
    }

    #[test]
    fn empty_csv_still_has_header() -> Result<()> {
        let data = String::from_utf8(records_to_csv(&[])?)?;
        assert_eq!(data, "project,start_time,end_time,duration,notes\n");
        Ok(())
    }

    #[test]
    fn clipboard_has_one_line_per_record() {
        let records = vec![
            record("Alpha", 0, 7, "multi\nline\tnotes"),
            record("Beta", 60, 42, ""),
        ];

        let text = clipboard_text(&records);

        let lines = text.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "Alpha\t09:00:00\t09:00:07\t00:00:07\tmulti line notes");
        assert_eq!(lines[1], "Beta\t09:01:00\t09:01:42\t00:00:42\t");
        assert_eq!(lines[0].split('\t').count(), 5);
    }

    #[test]
    fn clipboard_is_empty_without_records() {
        assert_eq!(clipboard_text(&[]), "");
    }
}
