// CSV export of task snapshots

use crate::error::{Result, TaskError};
use crate::record::CsvRecord;
use chrono::NaiveDate;
use fs2::FileExt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Result of an export attempt that did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// The input was empty, nothing was written
    NothingToExport,
    /// Header plus `rows` data lines were written
    Written { path: Option<PathBuf>, rows: usize },
}

/// Serializes records to CSV
///
/// Every data field is wrapped in double quotes and embedded quotes are
/// doubled. The header line is written bare.
#[derive(Debug, Default, Clone, Copy)]
pub struct CsvExporter;

impl CsvExporter {
    pub fn new() -> Self {
        Self
    }

    /// Write CSV to any writer. Empty input writes nothing.
    pub fn write_csv<R: CsvRecord, W: Write>(&self, records: &[R], out: &mut W) -> io::Result<ExportOutcome> {
        if records.is_empty() {
            debug!("write_csv: no records");
            return Ok(ExportOutcome::NothingToExport);
        }

        writeln!(out, "{}", R::HEADER.join(","))?;
        for record in records {
            let row: Vec<String> = record.fields().iter().map(|f| quote(f)).collect();
            writeln!(out, "{}", row.join(","))?;
        }
        out.flush()?;

        Ok(ExportOutcome::Written {
            path: None,
            rows: records.len(),
        })
    }

    /// Export to a file, replacing any previous content
    ///
    /// Nothing is created when `records` is empty. On failure a partially
    /// written file may remain at `path`.
    pub fn export_file<R: CsvRecord>(&self, records: &[R], path: &Path) -> Result<ExportOutcome> {
        if records.is_empty() {
            info!(path = ?path, "Nothing to export");
            return Ok(ExportOutcome::NothingToExport);
        }

        let export_err = |source: io::Error| TaskError::Export {
            path: path.to_path_buf(),
            source,
        };

        let file = File::create(path).map_err(export_err)?;

        // Held until the file is dropped at the end of this function
        file.lock_exclusive().map_err(export_err)?;

        let mut writer = BufWriter::new(&file);
        let outcome = self.write_csv(records, &mut writer).map_err(export_err)?;
        drop(writer);
        file.sync_all().map_err(export_err)?;

        let rows = match outcome {
            ExportOutcome::Written { rows, .. } => rows,
            ExportOutcome::NothingToExport => 0,
        };
        info!(path = ?path, rows, "Exported tasks to CSV");

        Ok(ExportOutcome::Written {
            path: Some(path.to_path_buf()),
            rows,
        })
    }
}

/// Default export file name for a given day: `tasks_export_<YYYY-MM-DD>.csv`
pub fn export_file_name(date: NaiveDate) -> String {
    format!("tasks_export_{}.csv", date.format("%Y-%m-%d"))
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Priority;
    use crate::store::TaskStore;
    use std::fs;
    use tempfile::TempDir;

    fn fixed_today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn due() -> NaiveDate {
        NaiveDate::from_ymd_opt(2030, 1, 1).unwrap()
    }

    fn export_to_string(store: &TaskStore) -> (ExportOutcome, String) {
        let mut buf = Vec::new();
        let outcome = CsvExporter::new().write_csv(store.list(), &mut buf).unwrap();
        (outcome, String::from_utf8(buf).unwrap())
    }

    #[test]
    fn test_quote() {
        assert_eq!(quote("plain"), "\"plain\"");
        assert_eq!(quote("A, B"), "\"A, B\"");
        assert_eq!(quote("He said \"hi\""), "\"He said \"\"hi\"\"\"");
        assert_eq!(quote(""), "\"\"");
    }

    #[test]
    fn test_write_csv_escapes_fields() {
        let mut store = TaskStore::with_clock(fixed_today);
        store.add("A, B", "He said \"hi\"", due(), Priority::High);

        let (outcome, csv) = export_to_string(&store);
        assert_eq!(outcome, ExportOutcome::Written { path: None, rows: 1 });

        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "ID,Title,Description,Due Date,Priority,Status,Created Date");
        assert_eq!(
            lines[1],
            r#""1","A, B","He said ""hi""","01-01-2030","HIGH","PENDING","01-06-2024""#
        );
        assert_eq!(csv.matches(r#""He said ""hi""""#).count(), 1);
        assert_eq!(csv.matches(r#""A, B""#).count(), 1);
    }

    #[test]
    fn test_write_csv_preserves_order_and_status() {
        let mut store = TaskStore::with_clock(fixed_today);
        store.add("first", "", due(), Priority::Low);
        let second = store.add("second", "", due(), Priority::Medium);
        store.add("third", "", due(), Priority::High);
        store.mark_complete(second).unwrap();

        let (_, csv) = export_to_string(&store);
        let rows: Vec<&str> = csv.lines().skip(1).collect();
        assert_eq!(rows.len(), store.list().len());
        assert!(rows[0].starts_with("\"1\",\"first\""));
        assert!(rows[1].contains("\"MEDIUM\",\"COMPLETED\""));
        assert!(rows[2].starts_with("\"3\",\"third\""));
    }

    #[test]
    fn test_write_csv_empty_writes_nothing() {
        let store = TaskStore::with_clock(fixed_today);
        let (outcome, csv) = export_to_string(&store);
        assert_eq!(outcome, ExportOutcome::NothingToExport);
        assert!(csv.is_empty());
    }

    #[test]
    fn test_export_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(export_file_name(fixed_today()));

        let mut store = TaskStore::with_clock(fixed_today);
        store.add("Pay bills", "Electric + water", due(), Priority::High);
        store.add("Groceries", "Milk, eggs", due(), Priority::Medium);

        let outcome = CsvExporter::new().export_file(store.list(), &path).unwrap();
        assert_eq!(
            outcome,
            ExportOutcome::Written {
                path: Some(path.clone()),
                rows: 2
            }
        );

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 3);
        assert!(content.contains("\"Milk, eggs\""));
    }

    #[test]
    fn test_export_file_overwrites_previous() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out.csv");
        fs::write(&path, "stale\nstale\nstale\nstale\n").unwrap();

        let mut store = TaskStore::with_clock(fixed_today);
        store.add("only", "", due(), Priority::Low);
        CsvExporter::new().export_file(store.list(), &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);
        assert!(!content.contains("stale"));
    }

    #[test]
    fn test_export_file_empty_creates_no_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("empty.csv");

        let store = TaskStore::with_clock(fixed_today);
        let outcome = CsvExporter::new().export_file(store.list(), &path).unwrap();

        assert_eq!(outcome, ExportOutcome::NothingToExport);
        assert!(!path.exists());
    }

    #[test]
    fn test_export_file_failure() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing-dir").join("out.csv");

        let mut store = TaskStore::with_clock(fixed_today);
        store.add("a", "", due(), Priority::Low);

        let err = CsvExporter::new().export_file(store.list(), &path).unwrap_err();
        match err {
            TaskError::Export { path: p, .. } => assert_eq!(p, path),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_export_file_name() {
        assert_eq!(export_file_name(fixed_today()), "tasks_export_2024-06-01.csv");
    }
}
